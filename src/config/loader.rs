//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    BuildSettings,
    ConfigError,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".ymo.json";

/// ディレクトリから設定を読み込む
///
/// `.ymo.json` ファイルを探して読み込む
///
/// # Arguments
/// * `dir` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
fn load_from_dir(dir: &Path) -> Result<Option<BuildSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: BuildSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// 設定を読み込んでバリデーションする
///
/// 設定ファイルがない場合はデフォルト値を使う
///
/// # Arguments
/// * `dir` - 設定ファイルを探すディレクトリ（`None` ならデフォルト値）
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(dir: Option<&Path>) -> Result<BuildSettings, ConfigError> {
    tracing::debug!("Loading settings for: {:?}", dir);

    let settings = if let Some(dir) = dir {
        load_from_dir(dir)?.map_or_else(BuildSettings::default, |loaded| {
            tracing::debug!("Loaded settings: {:?}", loaded);
            loaded
        })
    } else {
        BuildSettings::default()
    };

    // バリデーション
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(settings)
}
