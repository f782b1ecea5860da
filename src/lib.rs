//! ymo-index
//!
//! 翻訳カタログと CSV オーバーライドから、ハッシュで引ける YMO バイナリを生成する

pub mod builder;
pub mod catalog;
pub mod config;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod key;
pub mod overrides;
pub mod pipeline;
pub mod reader;
mod test_utils;

pub use builder::IndexBuilder;
pub use error::BuildError;
pub use pipeline::{
    BuildOutput,
    build_ymo,
};
pub use reader::YmoIndex;
