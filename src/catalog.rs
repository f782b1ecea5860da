//! 翻訳カタログの入力定義
//!
//! カタログのパース自体は外部に任せ、ここではユニットの形と
//! どのユニットをインデックスに含めるかだけを扱う。

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::SourceError;

/// カタログ中の 1 メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogUnit {
    pub source_text: String,
    pub target_text: String,
    /// 空文字はコンテキストなし
    pub context: String,
    pub is_translated: bool,
    pub is_fuzzy: bool,
}

impl CatalogUnit {
    /// 翻訳済みユニットを作成する
    #[must_use]
    pub fn translated(source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
            is_translated: true,
            ..Self::default()
        }
    }

    /// コンテキストを設定する
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// インデックスに含めるべきかを判定する
    ///
    /// 翻訳済み、または fuzzy かつ `include_fuzzy` が有効で訳文が空でない場合に含める。
    #[must_use]
    pub fn is_included(&self, include_fuzzy: bool) -> bool {
        self.is_translated || (self.is_fuzzy && include_fuzzy && !self.target_text.is_empty())
    }
}

/// カタログユニットを供給するもの
pub trait CatalogSource {
    /// 全ユニットを読み込み順に返す
    ///
    /// # Errors
    /// ソースが読めない場合は [`SourceError`]
    fn units(&self) -> Result<Vec<CatalogUnit>, SourceError>;
}

impl CatalogSource for Vec<CatalogUnit> {
    fn units(&self) -> Result<Vec<CatalogUnit>, SourceError> {
        Ok(self.clone())
    }
}

/// JSON 形式に書き出されたカタログファイル
///
/// ```json
/// [{"sourceText": "Save", "targetText": "保存", "isTranslated": true}]
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    /// ファイルパス
    path: PathBuf,
}

impl JsonCatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonCatalogFile {
    fn units(&self) -> Result<Vec<CatalogUnit>, SourceError> {
        tracing::debug!("Loading catalog from: {:?}", self.path);

        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Io { path: self.path.clone(), source })?;
        let units: Vec<CatalogUnit> = serde_json::from_str(&content)?;

        tracing::debug!("Loaded {} catalog units", units.len());
        Ok(units)
    }
}
