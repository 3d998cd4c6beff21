//! Component installer

use super::{InstallContext, InstallReport};
use crate::types::Result;
use tracing::info;

/// Components ship code only; they are loaded from the vendor directory.
pub(super) fn install(ctx: &InstallContext<'_>) -> Result<InstallReport> {
    info!(package = %ctx.package.name, "component package, nothing to copy");
    Ok(InstallReport::default())
}
