//! PLC/tooling rules (x-plc coherence + mapping completeness).
//!
//! These rules never check ST syntax; expressions are opaque strings. They
//! ensure x-plc does not reference unknown accessibles, that mappings do not
//! contradict the SECoP datainfo (errors), and that missing mappings surface
//! as implementation warnings. An absent x-plc block means "nothing
//! configured yet", so completeness warnings still apply to it.

use std::collections::BTreeMap;

use crate::constants::accessibles as keys;
use crate::node_cfg::{Config, InterfaceClass, Module};
use crate::rules::types::{Finding, CATEGORY_IMPLEMENTATION};

const IMPLEMENTATION_WARNING_SUFFIX: &str =
    "Manual PLC implementation will be required. Refer to generated tasks list.";

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn unconfigured<I, S>(path: impl Into<String>, field: &str, plc_refs: I) -> Finding
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Finding::warning(
        "R-PLC-010",
        path,
        format!("The field {field} is not configured. {IMPLEMENTATION_WARNING_SUFFIX}"),
    )
    .with_category(CATEGORY_IMPLEMENTATION)
    .with_plc_refs(plc_refs)
}

/// Status enum label->code table, provided status is tuple(enum, string).
/// A structurally broken status is reported by R-STAT-001, not here.
fn status_enum_codes(module: &Module) -> Option<&BTreeMap<String, i64>> {
    let status = module.accessibles.get(keys::STATUS)?;
    let di = &status.datainfo;
    if di.type_ != "tuple" {
        return None;
    }
    let frags = di.tuple_fragments()?;
    if frags.len() != 2 || frags[0].type_ != "enum" {
        return None;
    }
    frags[0].enum_codes()
}

/// R-PLC-001: x-plc fragments must match existing SECoP accessibles.
pub fn tooling_refs_exist(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(xplc) = &module.x_plc else { continue };

        let fragments = [
            (keys::VALUE, xplc.value.is_some()),
            (keys::STATUS, xplc.status.is_some()),
            (keys::TARGET, xplc.target.is_some()),
            (keys::CLEAR_ERRORS, xplc.clear_errors.is_some()),
        ];

        for (name, present) in fragments {
            if present && !module.accessibles.contains_key(name) {
                findings.push(
                    Finding::error(
                        "R-PLC-001",
                        format!("$.modules.{mod_name}.x-plc.{name}"),
                        format!(
                            "x-plc.{name} is present but the SECoP accessible '{name}' is missing"
                        ),
                    )
                    .with_hint(format!(
                        "Either remove x-plc.{name} or add '{name}' under \
                         modules.{mod_name}.accessibles."
                    )),
                );
            }
        }
    }

    findings
}

/// R-PLC-010: node-level x-plc fields should be configured. Missing or
/// empty values are warnings; an absent node block reports the tcp,
/// secop_version and plc_timestamp_tag fields as unconfigured.
pub fn node_fields_configured(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    let xplc = cfg.x_plc.as_ref();

    match xplc.and_then(|x| x.tcp.as_ref()) {
        None => {
            findings.push(unconfigured("$.x-plc.tcp", "x-plc.tcp", ["SecopInit"]));
        }
        Some(tcp) => {
            if is_blank(tcp.server_ip.as_deref()) {
                findings.push(unconfigured(
                    "$.x-plc.tcp.server_ip",
                    "x-plc.tcp.server_ip",
                    ["SecopInit"],
                ));
            }
            if tcp.server_port.is_none() {
                findings.push(unconfigured(
                    "$.x-plc.tcp.server_port",
                    "x-plc.tcp.server_port",
                    ["SecopInit"],
                ));
            }
            if is_blank(tcp.interface_healthy_tag.as_deref()) {
                findings.push(unconfigured(
                    "$.x-plc.tcp.interface_healthy_tag",
                    "x-plc.tcp.interface_healthy_tag",
                    ["SecopMapFromPlc"],
                ));
            }
        }
    }

    if is_blank(xplc.and_then(|x| x.secop_version.as_deref())) {
        findings.push(unconfigured(
            "$.x-plc.secop_version",
            "x-plc.secop_version",
            ["SecopInit"],
        ));
    }

    if is_blank(xplc.and_then(|x| x.plc_timestamp_tag.as_deref())) {
        findings.push(unconfigured(
            "$.x-plc.plc_timestamp_tag",
            "x-plc.plc_timestamp_tag",
            ["SecopMapFromPlc"],
        ));
    }

    findings
}

/// R-PLC-020: module-level timestamp_tag should be configured.
pub fn module_timestamp_tag_configured(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let tag = module.x_plc.as_ref().and_then(|x| x.timestamp_tag.as_deref());
        if is_blank(tag) {
            findings.push(
                Finding::warning(
                    "R-PLC-020",
                    format!("$.modules.{mod_name}.x-plc.timestamp_tag"),
                    format!(
                        "The field x-plc.timestamp_tag is not configured. \
                         {IMPLEMENTATION_WARNING_SUFFIX}"
                    ),
                )
                .with_category(CATEGORY_IMPLEMENTATION)
                .with_plc_refs(["SecopMapFromPlc"]),
            );
        }
    }

    findings
}

/// R-PLC-021: if the x-plc.status fragment exists, its hw_error fields
/// should be configured.
pub fn status_hw_error_fields_configured(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(status) = module.x_plc.as_ref().and_then(|x| x.status.as_ref()) else {
            continue;
        };

        for (field, value) in [
            ("hw_error_expr", &status.hw_error_expr),
            ("hw_error_description", &status.hw_error_description),
        ] {
            if is_blank(value.as_deref()) {
                findings.push(
                    Finding::warning(
                        "R-PLC-021",
                        format!("$.modules.{mod_name}.x-plc.status.{field}"),
                        format!(
                            "The field x-plc.status.{field} is not configured. \
                             {IMPLEMENTATION_WARNING_SUFFIX}"
                        ),
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapFromPlc"]),
                );
            }
        }
    }

    findings
}

/// R-PLC-022 / R-PLC-023: coherence between the disabled_* tooling fields
/// and the DISABLED:0 status enum member. Presence without enum support is
/// an error; enum support without the fields is only a warning. The
/// asymmetry is deliberate.
pub fn status_disabled_fields_coherent(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(status) = module.x_plc.as_ref().and_then(|x| x.status.as_ref()) else {
            continue;
        };

        let has_disabled_0 = status_enum_codes(module)
            .and_then(|codes| codes.get("DISABLED"))
            .copied()
            == Some(0);

        let expr_present = !is_blank(status.disabled_expr.as_deref());
        let desc_present = !is_blank(status.disabled_description.as_deref());

        if (expr_present || desc_present) && !has_disabled_0 {
            findings.push(
                Finding::error(
                    "R-PLC-022",
                    format!("$.modules.{mod_name}.x-plc.status"),
                    "x-plc.status.disabled_* is present but status enum does not contain DISABLED:0.",
                )
                .with_hint(
                    "Add DISABLED:0 to status enum members or remove x-plc.status.disabled_* fields.",
                ),
            );
        }

        if has_disabled_0 {
            for (field, present) in [
                ("disabled_expr", expr_present),
                ("disabled_description", desc_present),
            ] {
                if !present {
                    findings.push(
                        Finding::warning(
                            "R-PLC-023",
                            format!("$.modules.{mod_name}.x-plc.status.{field}"),
                            format!(
                                "Status enum contains DISABLED:0, but x-plc.status.{field} is \
                                 not configured. {IMPLEMENTATION_WARNING_SUFFIX}"
                            ),
                        )
                        .with_category(CATEGORY_IMPLEMENTATION)
                        .with_plc_refs(["SecopMapFromPlc"]),
                    );
                }
            }
        }
    }

    findings
}

/// R-PLC-026: if the x-plc.target fragment exists, change_possible_expr
/// should be configured.
pub fn target_change_possible_configured(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(target) = module.x_plc.as_ref().and_then(|x| x.target.as_ref()) else {
            continue;
        };

        if is_blank(target.change_possible_expr.as_deref()) {
            findings.push(
                Finding::warning(
                    "R-PLC-026",
                    format!("$.modules.{mod_name}.x-plc.target.change_possible_expr"),
                    format!(
                        "The field x-plc.target.change_possible_expr is not configured. \
                         {IMPLEMENTATION_WARNING_SUFFIX}"
                    ),
                )
                .with_category(CATEGORY_IMPLEMENTATION)
                .with_plc_refs(["SecopMapFromPlc"]),
            );
        }
    }

    findings
}

/// R-PLC-024 / R-PLC-025: reach_* fields belong to Drivable modules only.
/// Presence elsewhere is an error; for Drivable modules reach_timeout_s is
/// expected, and reach_abs_tolerance too unless the target is an enum.
pub fn target_reach_fields(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let target_cfg = module.x_plc.as_ref().and_then(|x| x.target.as_ref());
        let is_drivable = module.implements(InterfaceClass::Drivable);
        let target_type = module
            .accessibles
            .get(keys::TARGET)
            .map(|a| a.datainfo.ty())
            .unwrap_or("");

        if let Some(target) = target_cfg {
            if target.reach_timeout_s.is_some() && !is_drivable {
                findings.push(
                    Finding::error(
                        "R-PLC-024",
                        format!("$.modules.{mod_name}.x-plc.target.reach_timeout_s"),
                        "x-plc.target.reach_timeout_s is only allowed for Drivable modules.",
                    )
                    .with_hint(
                        "Remove reach_timeout_s or change module interface_classes to Drivable.",
                    ),
                );
            }

            if target.reach_abs_tolerance.is_some() && !is_drivable {
                findings.push(
                    Finding::error(
                        "R-PLC-024",
                        format!("$.modules.{mod_name}.x-plc.target.reach_abs_tolerance"),
                        "x-plc.target.reach_abs_tolerance is only allowed for Drivable modules.",
                    )
                    .with_hint(
                        "Remove reach_abs_tolerance or change module interface_classes to Drivable.",
                    ),
                );
            }
        }

        if !is_drivable {
            continue;
        }

        if target_cfg.and_then(|t| t.reach_timeout_s).is_none() {
            findings.push(
                Finding::warning(
                    "R-PLC-025",
                    format!("$.modules.{mod_name}.x-plc.target.reach_timeout_s"),
                    format!(
                        "The field x-plc.target.reach_timeout_s is not configured. \
                         {IMPLEMENTATION_WARNING_SUFFIX}"
                    ),
                )
                .with_category(CATEGORY_IMPLEMENTATION)
                .with_plc_refs(["SecopInit"]),
            );
        }

        if target_type != "enum" && target_cfg.and_then(|t| t.reach_abs_tolerance).is_none() {
            findings.push(
                Finding::warning(
                    "R-PLC-025",
                    format!("$.modules.{mod_name}.x-plc.target.reach_abs_tolerance"),
                    format!(
                        "The field x-plc.target.reach_abs_tolerance is not configured. \
                         {IMPLEMENTATION_WARNING_SUFFIX}"
                    ),
                )
                .with_category(CATEGORY_IMPLEMENTATION)
                .with_plc_refs([format!("ST_Module_{mod_name}")]),
            );
        }
    }

    findings
}

/// R-PLC-030 / R-PLC-031: polymorphic x-plc.value mapping. Enum values use
/// enum_tag + enum_member_map, everything else uses read_expr. Contradictions
/// are errors; missing mappings are implementation warnings.
pub fn value_mapping_by_type(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(value) = module.accessibles.get(keys::VALUE) else {
            continue;
        };

        let value_type = value.datainfo.ty();
        let value_cfg = module.x_plc.as_ref().and_then(|x| x.value.as_ref());

        let has_read_expr = value_cfg.is_some_and(|v| !is_blank(v.read_expr.as_deref()));
        let has_enum_tag = value_cfg.is_some_and(|v| !is_blank(v.enum_tag.as_deref()));
        let has_enum_map =
            value_cfg.is_some_and(|v| v.enum_member_map.as_ref().is_some_and(|m| !m.is_empty()));

        if value_type == "enum" {
            if has_read_expr {
                findings.push(
                    Finding::error(
                        "R-PLC-030",
                        format!("$.modules.{mod_name}.x-plc.value.read_expr"),
                        "Invalid x-plc.value: SECoP value is enum, so read_expr must not be defined.",
                    )
                    .with_hint(
                        "Use x-plc.value.enum_tag + x-plc.value.enum_member_map for enum values.",
                    ),
                );
            }

            if !(has_enum_tag && has_enum_map) {
                findings.push(
                    Finding::warning(
                        "R-PLC-031",
                        format!("$.modules.{mod_name}.x-plc.value"),
                        format!(
                            "The field x-plc.value (enum mapping) is not configured. \
                             {IMPLEMENTATION_WARNING_SUFFIX}"
                        ),
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapFromPlc".to_string(), format!("ET_Module_{mod_name}")]),
                );
            }
        } else {
            if has_enum_tag || has_enum_map {
                findings.push(
                    Finding::error(
                        "R-PLC-030",
                        format!("$.modules.{mod_name}.x-plc.value"),
                        format!(
                            "Invalid x-plc.value: SECoP value is type '{value_type}', so \
                             enum_tag/enum_member_map must not be defined."
                        ),
                    )
                    .with_hint("Use x-plc.value.read_expr for non-enum values."),
                );
            }

            if !has_read_expr {
                findings.push(
                    Finding::warning(
                        "R-PLC-031",
                        format!("$.modules.{mod_name}.x-plc.value.read_expr"),
                        format!(
                            "The field x-plc.value.read_expr is not configured. \
                             {IMPLEMENTATION_WARNING_SUFFIX}"
                        ),
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapFromPlc"]),
                );
            }
        }
    }

    findings
}

/// R-PLC-032 / R-PLC-033: polymorphic x-plc.target mapping. Enum targets use
/// enum_tag (and never a tolerance), everything else uses write_stmt.
pub fn target_mapping_by_type(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(target) = module.accessibles.get(keys::TARGET) else {
            continue;
        };

        let target_type = target.datainfo.ty();
        let target_cfg = module.x_plc.as_ref().and_then(|x| x.target.as_ref());

        let has_write_stmt = target_cfg.is_some_and(|t| !is_blank(t.write_stmt.as_deref()));
        let has_enum_tag = target_cfg.is_some_and(|t| !is_blank(t.enum_tag.as_deref()));

        if target_type == "enum" {
            if has_write_stmt {
                findings.push(
                    Finding::error(
                        "R-PLC-032",
                        format!("$.modules.{mod_name}.x-plc.target.write_stmt"),
                        "Invalid x-plc.target: SECoP target is enum, so write_stmt must not be defined.",
                    )
                    .with_hint("Use x-plc.target.enum_tag for enum targets."),
                );
            }

            if !has_enum_tag {
                findings.push(
                    Finding::warning(
                        "R-PLC-033",
                        format!("$.modules.{mod_name}.x-plc.target.enum_tag"),
                        format!(
                            "The field x-plc.target.enum_tag is not configured. \
                             {IMPLEMENTATION_WARNING_SUFFIX}"
                        ),
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapToPlc"]),
                );
            }

            if target_cfg.and_then(|t| t.reach_abs_tolerance).is_some() {
                findings.push(
                    Finding::error(
                        "R-PLC-032",
                        format!("$.modules.{mod_name}.x-plc.target.reach_abs_tolerance"),
                        "Invalid x-plc.target.reach_abs_tolerance: enum targets must not use reach_abs_tolerance.",
                    )
                    .with_hint("Remove reach_abs_tolerance for enum targets."),
                );
            }
        } else {
            if has_enum_tag {
                findings.push(
                    Finding::error(
                        "R-PLC-032",
                        format!("$.modules.{mod_name}.x-plc.target.enum_tag"),
                        format!(
                            "Invalid x-plc.target: SECoP target is type '{target_type}', so \
                             enum_tag must not be defined."
                        ),
                    )
                    .with_hint("Use x-plc.target.write_stmt for non-enum targets."),
                );
            }

            if !has_write_stmt {
                findings.push(
                    Finding::warning(
                        "R-PLC-033",
                        format!("$.modules.{mod_name}.x-plc.target.write_stmt"),
                        format!(
                            "The field x-plc.target.write_stmt is not configured. \
                             {IMPLEMENTATION_WARNING_SUFFIX}"
                        ),
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapToPlc"]),
                );
            }
        }
    }

    findings
}

/// R-PLC-040: a clear_errors accessible without a cmd_stmt is fine but
/// worth flagging: the generator clears the SECoP error report by default,
/// cmd_stmt only adds extra actions.
pub fn clear_errors_cmd_stmt(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        if !module.accessibles.contains_key(keys::CLEAR_ERRORS) {
            continue;
        }

        let message = format!(
            "Missing PLC command statement for {mod_name}.clear_errors. The generator will \
             clear SECoP ErrorReport only (by default). If you would like the command to \
             perform an extra action, write it in cmd_stmt."
        );

        match module.x_plc.as_ref().and_then(|x| x.clear_errors.as_ref()) {
            None => {
                findings.push(
                    Finding::warning(
                        "R-PLC-040",
                        format!("$.modules.{mod_name}.x-plc.clear_errors"),
                        message,
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapToPlc"]),
                );
            }
            Some(ce) if is_blank(ce.cmd_stmt.as_deref()) => {
                findings.push(
                    Finding::warning(
                        "R-PLC-040",
                        format!("$.modules.{mod_name}.x-plc.clear_errors.cmd_stmt"),
                        message,
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs(["SecopMapToPlc"]),
                );
            }
            Some(_) => {}
        }
    }

    findings
}
