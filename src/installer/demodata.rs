//! Demo data installer

use super::{InstallContext, InstallReport};
use crate::executor::copy_with_rules;
use crate::types::{to_slash_path, Result};

pub(super) fn install(ctx: &InstallContext<'_>) -> Result<InstallReport> {
    let rules = ctx.rules(&[])?;
    let source = ctx.package_source(Some("src"));
    let destination = ctx.shop_source();

    let mut report = InstallReport::default();
    report.record(
        to_slash_path(&destination),
        copy_with_rules(&source, &destination, &rules)?,
    );
    Ok(report)
}
