//! Business-rule catalog and orchestrator.
//!
//! Rules are independent pure functions over the immutable config; the
//! orchestrator runs every rule unconditionally and concatenates the
//! findings. Nothing short-circuits: an error from one rule never stops
//! another, so the caller always sees the complete picture.

pub mod plc;
pub mod secop;
mod types;

pub use types::{Finding, Severity, CATEGORY_IMPLEMENTATION};

use crate::node_cfg::Config;

/// Run the full rule catalog and return a flat list of findings.
///
/// The catalog order below is fixed so that reports serialize identically
/// across runs; it carries no semantic meaning.
pub fn validate_config(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    // --- SECoP rules ---
    findings.extend(secop::non_empty_modules(cfg)); // R-NODE-001
    findings.extend(secop::interface_classes_single(cfg)); // R-MOD-001
    findings.extend(secop::features_and_offset_unsupported(cfg)); // R-MOD-002
    findings.extend(secop::required_accessibles(cfg)); // R-CLS-001/002/003
    findings.extend(secop::forbidden_accessibles_by_class(cfg)); // R-CLS-004
    findings.extend(secop::custom_command_accessibles(cfg)); // R-ACC-001
    findings.extend(secop::members_match_type(cfg)); // R-ACC-002
    findings.extend(secop::numeric_ranges_coherent(cfg)); // R-ACC-003
    findings.extend(secop::target_limits_within_target(cfg)); // R-ACC-004
    findings.extend(secop::string_requires_maxchars(cfg)); // R-ACC-005
    findings.extend(secop::array_requires_maxlen(cfg)); // R-ACC-006
    findings.extend(secop::standard_accessible_readonly_policy(cfg)); // R-ACC-007
    findings.extend(secop::target_type_matches_value(cfg)); // R-ACC-008
    findings.extend(secop::checkable_requires_manual_plc(cfg)); // R-ACC-009
    findings.extend(secop::command_datainfo_shape(cfg)); // R-ACC-010
    findings.extend(secop::datainfo_type_supported(cfg)); // R-DI-001
    findings.extend(secop::status_structure_and_codes(cfg)); // R-STAT-001..005

    // --- PLC/tooling rules ---
    findings.extend(plc::tooling_refs_exist(cfg)); // R-PLC-001
    findings.extend(plc::node_fields_configured(cfg)); // R-PLC-010
    findings.extend(plc::module_timestamp_tag_configured(cfg)); // R-PLC-020
    findings.extend(plc::status_hw_error_fields_configured(cfg)); // R-PLC-021
    findings.extend(plc::status_disabled_fields_coherent(cfg)); // R-PLC-022/023
    findings.extend(plc::target_change_possible_configured(cfg)); // R-PLC-026
    findings.extend(plc::target_reach_fields(cfg)); // R-PLC-024/025
    findings.extend(plc::value_mapping_by_type(cfg)); // R-PLC-030/031
    findings.extend(plc::target_mapping_by_type(cfg)); // R-PLC-032/033
    findings.extend(plc::clear_errors_cmd_stmt(cfg)); // R-PLC-040

    findings
}
