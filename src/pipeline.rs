//! The two-pass build: catalog first, overrides second, then serialize.

use crate::builder::{
    IndexBuilder,
    IngestReport,
};
use crate::catalog::CatalogSource;
use crate::config::{
    BuildSettings,
    ConfigError,
    DirectoryOrder,
};
use crate::error::BuildError;
use crate::overrides::OverrideSource;

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// The serialized YMO blob.
    pub bytes: Vec<u8>,
    pub report: IngestReport,
}

/// Builds a YMO blob from a catalog and optional overrides.
///
/// Override rows are applied after every catalog unit, so they win on any
/// hash collision with a catalog entry.
///
/// # Errors
/// - [`BuildError::Config`] when `settings` fail validation
/// - [`BuildError::SourceUnavailable`] when either source cannot be read
/// - [`BuildError::Encoding`] when text is not representable in the encoding
/// - [`BuildError::Capacity`] when the result does not fit the 16-bit fields
pub fn build_ymo(
    catalog: &dyn CatalogSource,
    overrides: Option<&dyn OverrideSource>,
    settings: &BuildSettings,
) -> Result<BuildOutput, BuildError> {
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    let encoding = settings
        .text_encoding()
        .map_err(|e| ConfigError::ValidationErrors(vec![e]))?;

    let mut builder =
        IndexBuilder::new(encoding).with_collision_warning(settings.warn_on_collision);

    let units = catalog.units()?;
    builder.ingest_catalog(&units, settings.include_fuzzy)?;

    if let Some(overrides) = overrides {
        let records = overrides.rows()?;
        builder.ingest_overrides(&records)?;
    }

    if settings.directory_order == DirectoryOrder::Hash {
        builder.sort_by_hash();
    }

    let bytes = builder.serialize(settings.byte_order)?;
    let report = builder.report().clone();

    tracing::info!(
        "Built YMO index: {} entries ({} from catalog, {} overrides, {} collisions)",
        builder.len(),
        report.catalog_included,
        report.overrides_applied,
        report.collisions
    );

    Ok(BuildOutput { bytes, report })
}
