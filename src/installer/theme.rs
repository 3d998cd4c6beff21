//! Theme installer
//!
//! A theme is split in two: its templates go to
//! `source/Application/views/<target>`, its public assets to
//! `source/out/<target>`.

use super::{InstallContext, InstallReport};
use crate::executor::copy_with_rules;
use crate::types::{to_slash_path, Result};

const DEFAULT_ASSETS_DIR: &str = "out";

pub(super) fn install(ctx: &InstallContext<'_>) -> Result<InstallReport> {
    let assets_dir = ctx
        .package
        .settings
        .assets_directory
        .as_deref()
        .unwrap_or(DEFAULT_ASSETS_DIR);
    let assets_glob = format!("{}/**", assets_dir);
    let view_rules = ctx.rules(&[assets_dir, assets_glob.as_str()])?;
    let asset_rules = ctx.rules(&[])?;

    let source = ctx.package_source(None);
    let views_target = ctx
        .shop_source()
        .join("Application")
        .join("views")
        .join(ctx.target_name());
    let assets_target = ctx.shop_source().join("out").join(ctx.target_name());

    if !ctx.may_write(&views_target) {
        return Ok(InstallReport::skipped());
    }

    let mut report = InstallReport::default();
    report.record(
        to_slash_path(&views_target),
        copy_with_rules(&source, &views_target, &view_rules)?,
    );
    report.record(
        to_slash_path(&assets_target),
        copy_with_rules(&source.join(assets_dir), &assets_target, &asset_rules)?,
    );
    Ok(report)
}
