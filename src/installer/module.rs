//! Module installer

use super::{InstallContext, InstallReport};
use crate::executor::copy_with_rules;
use crate::types::{to_slash_path, Result};

pub(super) fn install(ctx: &InstallContext<'_>) -> Result<InstallReport> {
    let rules = ctx.rules(&[])?;
    let source = ctx.package_source(None);
    let target = ctx.shop_source().join("modules").join(ctx.target_name());

    if !ctx.may_write(&target) {
        return Ok(InstallReport::skipped());
    }

    let mut report = InstallReport::default();
    report.record(
        to_slash_path(&target),
        copy_with_rules(&source, &target, &rules)?,
    );
    Ok(report)
}
