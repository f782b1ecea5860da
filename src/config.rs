//! ビルド設定
/// 設定ファイルの読み込み
mod loader;
/// 設定の型とバリデーション
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_settings,
};
pub use types::{
    BuildSettings,
    ConfigError,
    DirectoryOrder,
    ValidationError,
};
