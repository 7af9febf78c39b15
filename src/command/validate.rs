use std::fs;

use anyhow::{bail, Context, Result};

use snv::node_cfg::{self, Config};
use snv::report::Report;
use snv::rules::validate_config;

use crate::argsets::RunArgs;

const RAW_CONFIG_FILE: &str = "raw_config.json";
const NORMALIZED_CONFIG_FILE: &str = "normalized_config.json";
const VALIDATION_REPORT_FILE: &str = "validation_report.json";

/// Full pipeline: shape-validate the config, run the business rules,
/// write the report, and fail if any error-level finding exists.
pub fn validate(args: RunArgs) -> Result<()> {
    let cfg = load_and_normalize(&args)?;

    let findings = validate_config(&cfg);
    let report = Report::from_findings(findings);

    let report_path = args.out.join(VALIDATION_REPORT_FILE);
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("could not write {}", report_path.display()))?;

    log::info!(
        "Validation summary: {} error(s), {} warning(s)",
        report.summary.errors,
        report.summary.warnings
    );
    log::info!("wrote: {}", report_path.display());

    if report.blocking() {
        bail!("business-rule validation failed; cannot proceed to generation");
    }
    Ok(())
}

/// Shape validation only; writes the raw copy and the normalized config.
pub fn normalize(args: RunArgs) -> Result<()> {
    load_and_normalize(&args).map(|_| ())
}

fn load_and_normalize(args: &RunArgs) -> Result<Config> {
    fs::create_dir_all(&args.out)
        .with_context(|| format!("could not create output folder {}", args.out.display()))?;

    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("could not read config file {}", args.config.display()))?;

    // Keep a pretty-printed raw copy alongside the outputs for traceability
    let raw_value: serde_json::Value =
        serde_json::from_str(&raw).context("invalid JSON in config file")?;
    fs::write(
        args.out.join(RAW_CONFIG_FILE),
        serde_json::to_string_pretty(&raw_value)?,
    )?;

    let cfg = node_cfg::from_str(&raw).context("config shape validation failed")?;

    let normalized_path = args.out.join(NORMALIZED_CONFIG_FILE);
    fs::write(&normalized_path, serde_json::to_string_pretty(&cfg)?)?;
    log::debug!("wrote: {}", normalized_path.display());

    Ok(cfg)
}
