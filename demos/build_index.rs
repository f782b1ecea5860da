//! YMO インデックス生成のデモ
//!
//! 使用方法:
//! ```
//! RUST_LOG=debug cargo run --example build_index
//! ```

use ymo_index::catalog::CatalogUnit;
use ymo_index::config::BuildSettings;
use ymo_index::{
    YmoIndex,
    build_ymo,
};

fn main() {
    // tracing を初期化（INFO レベル）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let catalog = vec![
        CatalogUnit::translated("Save", "保存"),
        CatalogUnit::translated("Open", "打开").with_context("menu"),
        CatalogUnit::translated("Graphics", "图形"),
        CatalogUnit {
            source_text: "Quit".to_string(),
            target_text: "退出".to_string(),
            is_fuzzy: true,
            ..CatalogUnit::default()
        },
    ];
    let overrides = vec![
        vec!["Save".to_string(), "保存中".to_string()],
        vec!["malformed".to_string()],
    ];

    let start = std::time::Instant::now();
    let output = match build_ymo(&catalog, Some(&overrides), &BuildSettings::default()) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Build failed: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Built {} bytes in {:?}", output.bytes.len(), start.elapsed());
    tracing::info!("Report: {:?}", output.report);

    let index = match YmoIndex::parse(&output.bytes) {
        Ok(index) => index,
        Err(e) => {
            tracing::error!("Failed to read back: {e}");
            std::process::exit(1);
        }
    };

    for source in ["Save", "Quit", "Graphics: Advanced"] {
        tracing::info!("{source:?} -> {:?}", index.translate(source));
    }
    tracing::info!("menu/Open -> {:?}", index.lookup_with_context("Open", "menu"));
}
