//! SECoP business rules (protocol/domain coherence).
//!
//! The shape layer has already validated types, required fields and defaults.
//! These rules validate cross-field constraints and the constraints specific
//! to the PLC SEC node target. Every rule is a pure function over the config
//! returning findings; rules never fail, and no rule suppresses another.

use itertools::Itertools;

use crate::constants::accessibles as keys;
use crate::constants::protocol;
use crate::node_cfg::{Config, InterfaceClass, Members};
use crate::rules::types::{Finding, CATEGORY_IMPLEMENTATION};

/// R-NODE-001: the node must contain at least one module.
///
/// The shape layer accepts an empty modules mapping, so this is enforced
/// here as a business constraint.
pub fn non_empty_modules(cfg: &Config) -> Vec<Finding> {
    if cfg.modules.is_empty() {
        vec![Finding::error(
            "R-NODE-001",
            "$.modules",
            "Node must contain at least one module",
        )]
    } else {
        Vec::new()
    }
}

/// R-MOD-001: `interface_classes` must hold exactly one recognized class.
///
/// Readable is implicit in Writable, and Writable is implicit in Drivable,
/// so declaring more than one class is redundant at best.
pub fn interface_classes_single(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let classes = &module.interface_classes;
        let path = format!("$.modules.{mod_name}.interface_classes");

        if classes.len() != 1 {
            findings.push(
                Finding::error(
                    "R-MOD-001",
                    path,
                    "interface_classes must be a list with exactly one element",
                )
                .with_hint(
                    "Use exactly one of: ['Readable'], ['Writable'], or ['Drivable']. \
                     Readable is implicit in Writable, and Writable is implicit in Drivable.",
                ),
            );
            continue;
        }

        let cls = &classes[0];
        if cls.parse::<InterfaceClass>().is_err() {
            findings.push(
                Finding::error("R-MOD-001", path, format!("Invalid interface class '{cls}'"))
                    .with_hint(
                        "Allowed values are: Readable, Writable, Drivable. Readable is \
                         implicit in Writable, and Writable is implicit in Drivable.",
                    ),
            );
        }
    }

    findings
}

/// R-MOD-002: the PLC SEC node supports neither the HasOffset feature nor
/// the legacy `offset` accessible. HasOffset is the only feature name the
/// protocol defines here; anything else is not implemented either.
pub fn features_and_offset_unsupported(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let unknown: Vec<&str> = module
            .features
            .iter()
            .map(String::as_str)
            .filter(|f| *f != keys::FEATURE_HAS_OFFSET)
            .collect();
        if !unknown.is_empty() {
            findings.push(
                Finding::error(
                    "R-MOD-002",
                    format!("$.modules.{mod_name}.features"),
                    "Unsupported feature(s) in module.features (not implemented on this PLC SEC node).",
                )
                .with_hint(format!(
                    "Only supported protocol feature name is 'HasOffset' (but PLC does not \
                     implement it). Unknown={unknown:?}"
                )),
            );
        }

        if module.features.iter().any(|f| f == keys::FEATURE_HAS_OFFSET) {
            findings.push(
                Finding::error(
                    "R-MOD-002",
                    format!("$.modules.{mod_name}.features"),
                    "features includes 'HasOffset', but this PLC SEC node does not implement HasOffset.",
                )
                .with_hint(
                    "For PLC nodes, offset/scaling/format conversions should be handled directly \
                     in PLC logic; provide the final scaled value via 'value'.",
                ),
            );
        }

        if module.accessibles.contains_key(keys::OFFSET) {
            findings.push(
                Finding::error(
                    "R-MOD-002",
                    format!("$.modules.{mod_name}.accessibles.offset"),
                    "Module defines 'offset', but this PLC SEC node does not implement the offset accessible.",
                )
                .with_hint(
                    "For PLC nodes, apply offsets in PLC logic and expose only the final scaled \
                     value via 'value'.",
                ),
            );
        }
    }

    findings
}

/// R-CLS-001/002/003: required accessibles per capability tier.
///
/// Readable: value, status, pollinterval; Writable adds target; Drivable
/// adds stop. Derived from the lattice, so a Drivable module is checked
/// against all three tiers.
pub fn required_accessibles(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        if module.implements(InterfaceClass::Readable) {
            let missing: Vec<&str> = [keys::VALUE, keys::STATUS, keys::POLLINTERVAL]
                .into_iter()
                .filter(|k| !module.accessibles.contains_key(*k))
                .collect();
            if !missing.is_empty() {
                findings.push(
                    Finding::error(
                        "R-CLS-001",
                        format!("$.modules.{mod_name}.accessibles"),
                        "Readable modules must define value/status/pollinterval",
                    )
                    .with_hint(format!("Missing: {missing:?}")),
                );
            }
        }

        if module.implements(InterfaceClass::Writable)
            && !module.accessibles.contains_key(keys::TARGET)
        {
            findings.push(Finding::error(
                "R-CLS-002",
                format!("$.modules.{mod_name}.accessibles.target"),
                "Writable/Drivable modules must define target",
            ));
        }

        if module.implements(InterfaceClass::Drivable)
            && !module.accessibles.contains_key(keys::STOP)
        {
            findings.push(Finding::error(
                "R-CLS-003",
                format!("$.modules.{mod_name}.accessibles.stop"),
                "Drivable modules must define stop command",
            ));
        }
    }

    findings
}

/// R-CLS-004: forbid standard accessibles outside the allow-list of the
/// declared interface class. Names starting with '_' are customised and
/// always allowed.
pub fn forbidden_accessibles_by_class(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        // R-MOD-001 reports malformed tag lists; the allow-list keys off the
        // first declared tag regardless.
        let Some(first) = module.interface_classes.first() else {
            continue;
        };

        let allowed: &[&str] = match first.parse::<InterfaceClass>() {
            Ok(InterfaceClass::Readable) => {
                &[keys::VALUE, keys::STATUS, keys::POLLINTERVAL, keys::CLEAR_ERRORS]
            }
            Ok(InterfaceClass::Writable) => &[
                keys::VALUE,
                keys::STATUS,
                keys::POLLINTERVAL,
                keys::TARGET,
                keys::TARGET_LIMITS,
                keys::CLEAR_ERRORS,
            ],
            Ok(InterfaceClass::Drivable) => &[
                keys::VALUE,
                keys::STATUS,
                keys::POLLINTERVAL,
                keys::TARGET,
                keys::TARGET_LIMITS,
                keys::CLEAR_ERRORS,
                keys::STOP,
            ],
            // An unrecognized class allows no standard accessibles
            Err(_) => &[],
        };

        for acc_name in module.accessibles.keys() {
            if acc_name.starts_with(keys::CUSTOM_PREFIX) {
                continue;
            }
            if !allowed.contains(&acc_name.as_str()) {
                findings.push(
                    Finding::error(
                        "R-CLS-004",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}"),
                        format!("Accessible '{acc_name}' is not allowed for interface class '{first}'"),
                    )
                    .with_hint(
                        "Supported non-customised accessibles are: Readable: value, status, \
                         pollinterval, clear_errors; Writable: Readable + target, target_limits; \
                         Drivable: Writable + stop.",
                    ),
                );
            }
        }
    }

    findings
}

/// R-ACC-001: custom command accessibles are allowed but not generated
/// automatically; warn so the developer completes the PLC code.
pub fn custom_command_accessibles(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            if acc_name.starts_with(keys::CUSTOM_PREFIX) && acc.datainfo.type_ == "command" {
                findings.push(
                    Finding::warning(
                        "R-ACC-001",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}"),
                        format!(
                            "Custom command accessible '{acc_name}' is not generated automatically; \
                             the generator will emit placeholders and the developer must implement \
                             it manually."
                        ),
                    )
                    .with_hint(
                        "Implement the command behaviour manually in the PLC project (or follow \
                         the demo patterns).",
                    ),
                );
            }
        }
    }

    findings
}

/// R-ACC-002: the resolved `members` shape must agree with `type`:
/// enum -> label->code mapping, tuple -> fragment list, array -> mapping.
pub fn members_match_type(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let di = &acc.datainfo;
            let path = format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo.members");

            match di.type_.as_str() {
                "enum" => {
                    if !matches!(di.members, Some(Members::Codes(_))) {
                        findings.push(Finding::error(
                            "R-ACC-002",
                            path,
                            "Invalid datainfo.members for type 'enum' (must be a label->code mapping).",
                        ));
                    }
                }
                "tuple" => {
                    if !matches!(di.members, Some(Members::Fragments(_))) {
                        findings.push(Finding::error(
                            "R-ACC-002",
                            path,
                            "Invalid datainfo.members for type 'tuple' (must be a list).",
                        ));
                    }
                }
                "array" => {
                    if !matches!(di.members, Some(Members::Codes(_) | Members::Element(_))) {
                        findings.push(Finding::error(
                            "R-ACC-002",
                            path,
                            "Invalid datainfo.members for type 'array' (must be an object).",
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    findings
}

/// R-ACC-003: if both min and max exist, min must be strictly below max.
pub fn numeric_ranges_coherent(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let di = &acc.datainfo;
            if let (Some(min), Some(max)) = (di.min, di.max) {
                if min >= max {
                    findings.push(Finding::error(
                        "R-ACC-003",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo"),
                        "Invalid numeric range: min must be < max.",
                    ));
                }
            }
        }
    }

    findings
}

/// R-ACC-004: `target_limits` must restrict `target`, checked per bound and
/// only when both sides provide the relevant bound.
pub fn target_limits_within_target(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let (Some(target), Some(limits)) = (
            module.accessibles.get(keys::TARGET),
            module.accessibles.get(keys::TARGET_LIMITS),
        ) else {
            continue;
        };

        let target_di = &target.datainfo;
        let limits_di = &limits.datainfo;
        let path = format!("$.modules.{mod_name}.accessibles.target_limits.datainfo");

        if let (Some(target_min), Some(limits_min)) = (target_di.min, limits_di.min) {
            if limits_min < target_min {
                findings.push(Finding::error(
                    "R-ACC-004",
                    path.clone(),
                    "target_limits.min must be >= target.min (target_limits restricts target).",
                ));
            }
        }

        if let (Some(target_max), Some(limits_max)) = (target_di.max, limits_di.max) {
            if limits_max > target_max {
                findings.push(Finding::error(
                    "R-ACC-004",
                    path,
                    "target_limits.max must be <= target.max (target_limits restricts target).",
                ));
            }
        }
    }

    findings
}

/// R-ACC-005: string values need a fixed length on the PLC side.
pub fn string_requires_maxchars(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let di = &acc.datainfo;
            if di.type_ == "string" && di.maxchars.is_none_or(|n| n <= 0) {
                findings.push(
                    Finding::error(
                        "R-ACC-005",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo.maxchars"),
                        "datainfo.maxchars is required (>0) when datainfo.type == 'string'.",
                    )
                    .with_hint(
                        "Set maxchars so the generator can declare a PLC STRING with a fixed length.",
                    ),
                );
            }
        }
    }

    findings
}

/// R-ACC-006: array values need a fixed length on the PLC side.
pub fn array_requires_maxlen(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let di = &acc.datainfo;
            if di.type_ == "array" && di.maxlen.is_none_or(|n| n <= 0) {
                findings.push(
                    Finding::error(
                        "R-ACC-006",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo.maxlen"),
                        "datainfo.maxlen is required (>0) when datainfo.type == 'array'.",
                    )
                    .with_hint(
                        "Set maxlen so the generator can declare a PLC ARRAY with a fixed length.",
                    ),
                );
            }
        }
    }

    findings
}

/// R-ACC-007: readonly policy for the standard accessibles used here:
/// value and status must be read-only, target must be writable.
pub fn standard_accessible_readonly_policy(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, must_be_readonly) in [(keys::VALUE, true), (keys::STATUS, true), (keys::TARGET, false)]
        {
            if let Some(acc) = module.accessibles.get(acc_name) {
                if acc.readonly != must_be_readonly {
                    findings.push(Finding::error(
                        "R-ACC-007",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}.readonly"),
                        format!("Accessible '{acc_name}' must have readonly={must_be_readonly}."),
                    ));
                }
            }
        }
    }

    findings
}

/// R-ACC-008: in Writable/Drivable modules, target (and target_limits, if
/// present) must carry the same datainfo.type as value.
pub fn target_type_matches_value(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        if !module.implements(InterfaceClass::Writable) {
            continue;
        }

        // Missing value/target is already handled by the required-accessible rules
        let (Some(value), Some(target)) = (
            module.accessibles.get(keys::VALUE),
            module.accessibles.get(keys::TARGET),
        ) else {
            continue;
        };

        let value_type = value.datainfo.ty();
        let target_type = target.datainfo.ty();

        if target_type != value_type {
            findings.push(
                Finding::error(
                    "R-ACC-008",
                    format!("$.modules.{mod_name}.accessibles.target.datainfo.type"),
                    "target.datainfo.type must match value.datainfo.type",
                )
                .with_hint(format!("value.type='{value_type}', target.type='{target_type}'")),
            );
        }

        if let Some(limits) = module.accessibles.get(keys::TARGET_LIMITS) {
            let limits_type = limits.datainfo.ty();
            if limits_type != value_type {
                findings.push(
                    Finding::error(
                        "R-ACC-008",
                        format!("$.modules.{mod_name}.accessibles.target_limits.datainfo.type"),
                        "target_limits.datainfo.type must match value.datainfo.type",
                    )
                    .with_hint(format!(
                        "value.type='{value_type}', target_limits.type='{limits_type}'"
                    )),
                );
            }
        }
    }

    findings
}

/// R-ACC-009: checkable=true means the generator emits placeholders and the
/// developer completes the PLC code.
pub fn checkable_requires_manual_plc(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            if acc.checkable == Some(true) {
                findings.push(
                    Finding::warning(
                        "R-ACC-009",
                        format!("$.modules.{mod_name}.accessibles.{acc_name}.checkable"),
                        "checkable=true requires manual PLC implementation (generator will emit placeholders)",
                    )
                    .with_category(CATEGORY_IMPLEMENTATION)
                    .with_plc_refs([format!("ST_Module_{mod_name}")]),
                );
            }
        }
    }

    findings
}

/// R-ACC-010: command datainfo may only carry `argument` and/or `result` as
/// optional fields, and those must declare a supported type of their own.
pub fn command_datainfo_shape(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let di = &acc.datainfo;
            if di.ty() != "command" {
                continue;
            }

            let base = format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo");

            if di.unit.is_some()
                || di.min.is_some()
                || di.max.is_some()
                || di.maxchars.is_some()
                || di.maxlen.is_some()
                || di.members.is_some()
            {
                findings.push(Finding::error(
                    "R-ACC-010",
                    base.clone(),
                    "Invalid command datainfo: only 'argument' and/or 'result' are allowed as optional fields.",
                ));
            }

            for (sub_name, sub) in [("argument", &di.argument), ("result", &di.result)] {
                let Some(sub) = sub else { continue };

                let sub_type = sub.ty();
                if sub_type.is_empty() {
                    findings.push(Finding::error(
                        "R-ACC-010",
                        format!("{base}.{sub_name}.type"),
                        format!("Invalid command datainfo: '{sub_name}' must define 'type'."),
                    ));
                    continue;
                }

                if !protocol::is_supported_type(sub_type) {
                    findings.push(
                        Finding::error(
                            "R-ACC-010",
                            format!("{base}.{sub_name}.type"),
                            format!(
                                "Invalid command datainfo: '{sub_name}.type' is not supported on \
                                 this PLC SEC node."
                            ),
                        )
                        .with_hint(format!(
                            "Allowed types (this generator): {:?}",
                            *protocol::SUPPORTED_TYPES
                        )),
                    );
                }
            }
        }
    }

    findings
}

/// R-DI-001: datainfo.type must be defined by the SECoP protocol and
/// supported by the current PLC SEC node version.
pub fn datainfo_type_supported(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        for (acc_name, acc) in &module.accessibles {
            let t = acc.datainfo.ty();
            let path = format!("$.modules.{mod_name}.accessibles.{acc_name}.datainfo.type");

            if protocol::is_plc_unsupported(t) {
                findings.push(
                    Finding::error(
                        "R-DI-001",
                        path,
                        "type not required/supported on current sec node plc version",
                    )
                    .with_hint(format!(
                        "Allowed types (this generator): {:?}",
                        *protocol::SUPPORTED_TYPES
                    )),
                );
                continue;
            }

            if !protocol::is_protocol_type(t) {
                findings.push(
                    Finding::error(
                        "R-DI-001",
                        path,
                        format!("datainfo.type '{t}' is not defined by the SECoP protocol"),
                    )
                    .with_hint(format!(
                        "Allowed types (this generator): {:?}",
                        *protocol::SUPPORTED_TYPES
                    )),
                );
            }
        }
    }

    findings
}

/// R-STAT-001..005: status must be tuple(enum, string), its enum must carry
/// the protocol-fixed codes, and anything beyond the known labels is only a
/// warning (the generator will ignore it).
///
/// A structurally broken status short-circuits the remaining status checks
/// for that module only; no other rule is affected.
pub fn status_structure_and_codes(cfg: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (mod_name, module) in &cfg.modules {
        let Some(status) = module.accessibles.get(keys::STATUS) else {
            continue;
        };
        let di = &status.datainfo;
        let base = format!("$.modules.{mod_name}.accessibles.status.datainfo");

        // 1) Structure: tuple(enum, string)
        if di.type_ != "tuple" {
            findings.push(Finding::error(
                "R-STAT-001",
                format!("{base}.type"),
                "status must be datainfo.type == 'tuple'",
            ));
            continue;
        }

        let frags = di.tuple_fragments().unwrap_or(&[]);
        if frags.len() != 2 {
            findings.push(Finding::error(
                "R-STAT-001",
                format!("{base}.members"),
                "status must be tuple(enum,string) with exactly 2 members, as defined by the protocol",
            ));
            continue;
        }

        if frags[0].type_ != "enum" {
            findings.push(Finding::error(
                "R-STAT-001",
                format!("{base}.members[0]"),
                "status.members[0] must be an enum definition",
            ));
            continue;
        }

        if frags[1].type_ != "string" {
            findings.push(Finding::error(
                "R-STAT-001",
                format!("{base}.members[1]"),
                "status.members[1] must be a string definition",
            ));
            continue;
        }

        let Some(codes) = frags[0].enum_codes() else {
            findings.push(Finding::error(
                "R-STAT-001",
                format!("{base}.members[0].members"),
                "status enum members must be a label->code mapping",
            ));
            continue;
        };

        let codes_path = format!("{base}.members[0].members");
        let is_drivable = module.implements(InterfaceClass::Drivable);

        // 2) Expected codes (presence + exact value) for the mandatory states
        let mut expected: Vec<(&str, i64)> = vec![
            ("IDLE", protocol::STATUS_IDLE),
            ("WARN", protocol::STATUS_WARN),
            ("ERROR", protocol::STATUS_ERROR),
        ];
        if is_drivable {
            expected.push(("BUSY", protocol::STATUS_BUSY));
        }

        for (label, expected_code) in expected {
            let rule_id = if label == "BUSY" { "R-STAT-003" } else { "R-STAT-002" };

            match codes.get(label) {
                None => {
                    findings.push(Finding::error(
                        rule_id,
                        codes_path.clone(),
                        format!("{label}:{expected_code} is required"),
                    ));
                }
                Some(&actual) if actual != expected_code => {
                    findings.push(
                        Finding::error(
                            rule_id,
                            codes_path.clone(),
                            format!(
                                "Wrong status code for '{label}': expected {expected_code}, got {actual}"
                            ),
                        )
                        .with_hint("Status codes are fixed by the SECoP protocol."),
                    );
                }
                Some(_) => {}
            }
        }

        // 3) BUSY is forbidden outside Drivable modules
        if !is_drivable && codes.contains_key("BUSY") {
            findings.push(Finding::error(
                "R-STAT-003",
                codes_path.clone(),
                "BUSY is forbidden for non-Drivable modules",
            ));
        }

        // 4) DISABLED, if present, must use the fixed code 0
        if let Some(&disabled) = codes.get("DISABLED") {
            if disabled != protocol::STATUS_DISABLED {
                findings.push(
                    Finding::error(
                        "R-STAT-004",
                        codes_path.clone(),
                        format!("Wrong status code for 'DISABLED': expected 0, got {disabled}"),
                    )
                    .with_hint("DISABLED status code is fixed by the SECoP protocol."),
                );
            }
        }

        // 5) Extra status labels are ignored by the generator (warning only)
        let extra: Vec<&str> = codes
            .keys()
            .map(String::as_str)
            .filter(|k| !protocol::KNOWN_STATUS_LABELS.contains(k))
            .sorted()
            .collect();
        if !extra.is_empty() {
            findings.push(Finding::warning(
                "R-STAT-005",
                codes_path,
                format!(
                    "Status enum contains unsupported members for current PLC SEC node version; \
                     they will be ignored by the generator. Extra={extra:?}"
                ),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::Severity;
    use serde_json::json;

    fn cfg(value: serde_json::Value) -> Config {
        serde_json::from_value(value).unwrap()
    }

    fn node_with_module(module: serde_json::Value) -> Config {
        cfg(json!({
            "equipment_id": "eq",
            "description": "d",
            "firmware": "fw",
            "modules": {"m1": module}
        }))
    }

    fn ids(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule_id).collect()
    }

    fn protocol_status() -> serde_json::Value {
        json!({
            "description": "status",
            "datainfo": {
                "type": "tuple",
                "members": [
                    {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400}},
                    {"type": "string"}
                ]
            },
            "readonly": true
        })
    }

    #[test]
    fn empty_node_is_an_error() {
        let cfg = cfg(json!({
            "equipment_id": "eq", "description": "d", "firmware": "fw", "modules": {}
        }));
        let findings = non_empty_modules(&cfg);
        assert_eq!(ids(&findings), ["R-NODE-001"]);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn two_interface_classes_yield_one_finding() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable", "Writable"],
            "description": "d", "implementation": "i", "accessibles": {}
        }));
        assert_eq!(ids(&interface_classes_single(&cfg)), ["R-MOD-001"]);
    }

    #[test]
    fn unrecognized_interface_class_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Movable"],
            "description": "d", "implementation": "i", "accessibles": {}
        }));
        let findings = interface_classes_single(&cfg);
        assert_eq!(ids(&findings), ["R-MOD-001"]);
        assert!(findings[0].message.contains("Movable"));
    }

    #[test]
    fn features_are_rejected() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "features": ["HasOffset", "HasLimits"],
            "description": "d", "implementation": "i", "accessibles": {}
        }));
        // one finding for the unknown feature, one for HasOffset itself
        assert_eq!(ids(&features_and_offset_unsupported(&cfg)), ["R-MOD-002", "R-MOD-002"]);
    }

    #[test]
    fn offset_accessible_is_rejected_regardless_of_class() {
        for class in ["Readable", "Writable", "Drivable"] {
            let cfg = node_with_module(json!({
                "interface_classes": [class],
                "description": "d", "implementation": "i",
                "accessibles": {
                    "offset": {"description": "o", "datainfo": {"type": "double"}}
                }
            }));
            let findings = features_and_offset_unsupported(&cfg);
            assert_eq!(ids(&findings), ["R-MOD-002"], "class {class}");
            assert_eq!(findings[0].path, "$.modules.m1.accessibles.offset");
        }
    }

    #[test]
    fn readable_missing_accessibles() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {"description": "v", "datainfo": {"type": "double"}, "readonly": true}
            }
        }));
        let findings = required_accessibles(&cfg);
        assert_eq!(ids(&findings), ["R-CLS-001"]);
        let hint = findings[0].hint.as_deref().unwrap();
        assert!(hint.contains("status") && hint.contains("pollinterval"));
    }

    #[test]
    fn drivable_requires_all_three_tiers() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Drivable"],
            "description": "d", "implementation": "i", "accessibles": {}
        }));
        assert_eq!(
            ids(&required_accessibles(&cfg)),
            ["R-CLS-001", "R-CLS-002", "R-CLS-003"]
        );
    }

    #[test]
    fn target_on_readable_is_forbidden() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "target": {"description": "t", "datainfo": {"type": "double"}}
            }
        }));
        let findings = forbidden_accessibles_by_class(&cfg);
        assert_eq!(ids(&findings), ["R-CLS-004"]);
        assert!(findings[0].message.contains("'target'"));
    }

    #[test]
    fn custom_accessibles_are_always_allowed() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_calibrate": {"description": "c", "datainfo": {"type": "command"}}
            }
        }));
        assert!(forbidden_accessibles_by_class(&cfg).is_empty());
    }

    #[test]
    fn custom_command_warns_for_manual_implementation() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_calibrate": {"description": "c", "datainfo": {"type": "command"}},
                "_gain": {"description": "g", "datainfo": {"type": "double"}}
            }
        }));
        let findings = custom_command_accessibles(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-001"]);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].path, "$.modules.m1.accessibles._calibrate");
    }

    #[test]
    fn enum_without_members_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_mode": {"description": "m", "datainfo": {"type": "enum"}}
            }
        }));
        assert_eq!(ids(&members_match_type(&cfg)), ["R-ACC-002"]);
    }

    #[test]
    fn tuple_with_mapping_members_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_pair": {"description": "p", "datainfo": {"type": "tuple", "members": {"A": 1}}}
            }
        }));
        assert_eq!(ids(&members_match_type(&cfg)), ["R-ACC-002"]);
    }

    #[test]
    fn array_accepts_element_schema_members() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_samples": {
                    "description": "s",
                    "datainfo": {"type": "array", "maxlen": 8, "members": {"type": "int"}}
                }
            }
        }));
        assert!(members_match_type(&cfg).is_empty());
    }

    #[test]
    fn inverted_range_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {
                    "description": "v",
                    "datainfo": {"type": "double", "min": 10.0, "max": 10.0},
                    "readonly": true
                }
            }
        }));
        assert_eq!(ids(&numeric_ranges_coherent(&cfg)), ["R-ACC-003"]);
    }

    #[test]
    fn target_limits_must_narrow_target() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Writable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "target": {
                    "description": "t",
                    "datainfo": {"type": "double", "min": 0.0, "max": 100.0}
                },
                "target_limits": {
                    "description": "tl",
                    "datainfo": {"type": "double", "min": -1.0, "max": 150.0}
                }
            }
        }));
        // both bounds violated independently
        assert_eq!(ids(&target_limits_within_target(&cfg)), ["R-ACC-004", "R-ACC-004"]);
    }

    #[test]
    fn target_limits_checked_only_with_both_bounds() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Writable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "target": {"description": "t", "datainfo": {"type": "double", "max": 100.0}},
                "target_limits": {"description": "tl", "datainfo": {"type": "double", "min": -1.0}}
            }
        }));
        assert!(target_limits_within_target(&cfg).is_empty());
    }

    #[test]
    fn string_maxchars_cases() {
        for (maxchars, expect_error) in
            [(json!(null), true), (json!(0), true), (json!(1), false)]
        {
            let mut datainfo = json!({"type": "string"});
            if !maxchars.is_null() {
                datainfo["maxchars"] = maxchars.clone();
            }
            let cfg = node_with_module(json!({
                "interface_classes": ["Readable"],
                "description": "d", "implementation": "i",
                "accessibles": {"_label": {"description": "l", "datainfo": datainfo}}
            }));
            let findings = string_requires_maxchars(&cfg);
            assert_eq!(!findings.is_empty(), expect_error, "maxchars={maxchars}");
        }
    }

    #[test]
    fn array_requires_positive_maxlen() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_samples": {
                    "description": "s",
                    "datainfo": {"type": "array", "maxlen": 0, "members": {"type": "int"}}
                }
            }
        }));
        assert_eq!(ids(&array_requires_maxlen(&cfg)), ["R-ACC-006"]);
    }

    #[test]
    fn readonly_policy_violations() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Writable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {"description": "v", "datainfo": {"type": "double"}},
                "status": protocol_status(),
                "target": {
                    "description": "t",
                    "datainfo": {"type": "double"},
                    "readonly": true
                }
            }
        }));
        // value not readonly, target readonly; status is fine
        let findings = standard_accessible_readonly_policy(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-007", "R-ACC-007"]);
        assert!(findings.iter().any(|f| f.path.ends_with("value.readonly")));
        assert!(findings.iter().any(|f| f.path.ends_with("target.readonly")));
    }

    #[test]
    fn target_type_must_match_value_type() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Writable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {"description": "v", "datainfo": {"type": "double"}, "readonly": true},
                "target": {"description": "t", "datainfo": {"type": "int"}}
            }
        }));
        let findings = target_type_matches_value(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-008"]);
        assert!(findings[0].hint.as_deref().unwrap().contains("target.type='int'"));
    }

    #[test]
    fn target_type_not_checked_on_readable() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {"description": "v", "datainfo": {"type": "double"}, "readonly": true},
                "target": {"description": "t", "datainfo": {"type": "int"}}
            }
        }));
        assert!(target_type_matches_value(&cfg).is_empty());
    }

    #[test]
    fn checkable_warns_with_plc_ref() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "value": {
                    "description": "v",
                    "datainfo": {"type": "double"},
                    "readonly": true,
                    "checkable": true
                }
            }
        }));
        let findings = checkable_requires_manual_plc(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-009"]);
        assert_eq!(findings[0].category, Some(CATEGORY_IMPLEMENTATION));
        assert_eq!(findings[0].plc_refs, ["ST_Module_m1"]);
    }

    #[test]
    fn command_with_extra_attributes_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_go": {"description": "g", "datainfo": {"type": "command", "unit": "s"}}
            }
        }));
        assert_eq!(ids(&command_datainfo_shape(&cfg)), ["R-ACC-010"]);
    }

    #[test]
    fn command_argument_type_must_be_supported() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_go": {
                    "description": "g",
                    "datainfo": {
                        "type": "command",
                        "argument": {"type": "blob"},
                        "result": {"type": "double"}
                    }
                }
            }
        }));
        let findings = command_datainfo_shape(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-010"]);
        assert!(findings[0].path.ends_with("argument.type"));
    }

    #[test]
    fn command_argument_with_blank_type_is_an_error() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_go": {
                    "description": "g",
                    "datainfo": {"type": "command", "argument": {"type": "  "}}
                }
            }
        }));
        let findings = command_datainfo_shape(&cfg);
        assert_eq!(ids(&findings), ["R-ACC-010"]);
        assert!(findings[0].message.contains("must define 'type'"));
    }

    #[test]
    fn unsupported_and_unknown_types() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "_a": {"description": "a", "datainfo": {"type": "scaled"}},
                "_b": {"description": "b", "datainfo": {"type": "vector"}}
            }
        }));
        let findings = datainfo_type_supported(&cfg);
        assert_eq!(ids(&findings), ["R-DI-001", "R-DI-001"]);
        assert!(findings[0].message.contains("not required/supported"));
        assert!(findings[1].message.contains("not defined by the SECoP protocol"));
    }

    #[test]
    fn valid_status_produces_no_findings() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {"status": protocol_status()}
        }));
        assert!(status_structure_and_codes(&cfg).is_empty());
    }

    #[test]
    fn non_tuple_status_short_circuits() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {"description": "s", "datainfo": {"type": "int"}, "readonly": true}
            }
        }));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-001"]);
        assert!(findings[0].path.ends_with("datainfo.type"));
    }

    #[test]
    fn status_tuple_needs_exactly_two_members() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {
                    "description": "s",
                    "datainfo": {"type": "tuple", "members": [{"type": "enum", "members": {"IDLE": 100}}]},
                    "readonly": true
                }
            }
        }));
        assert_eq!(ids(&status_structure_and_codes(&cfg)), ["R-STAT-001"]);
    }

    #[test]
    fn missing_and_wrong_base_codes() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {
                    "description": "s",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 101, "WARN": 200}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                }
            }
        }));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-002", "R-STAT-002"]);
        assert!(findings[0].message.contains("expected 100, got 101"));
        assert!(findings[1].message.contains("ERROR:400 is required"));
    }

    #[test]
    fn busy_required_for_drivable() {
        let module = |members: serde_json::Value| {
            json!({
                "interface_classes": ["Drivable"],
                "description": "d", "implementation": "i",
                "accessibles": {
                    "status": {
                        "description": "s",
                        "datainfo": {
                            "type": "tuple",
                            "members": [{"type": "enum", "members": members}, {"type": "string"}]
                        },
                        "readonly": true
                    }
                }
            })
        };

        // BUSY missing entirely
        let cfg = node_with_module(module(json!({"IDLE": 100, "WARN": 200, "ERROR": 400})));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-003"]);
        assert_eq!(findings[0].message, "BUSY:300 is required");

        // BUSY with the wrong code
        let cfg = node_with_module(module(
            json!({"IDLE": 100, "WARN": 200, "ERROR": 400, "BUSY": 100}),
        ));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-003"]);
        assert!(findings[0].message.contains("expected 300, got 100"));
    }

    #[test]
    fn busy_forbidden_for_non_drivable() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {
                    "description": "s",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400, "BUSY": 300}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                }
            }
        }));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-003"]);
        assert_eq!(findings[0].message, "BUSY is forbidden for non-Drivable modules");
    }

    #[test]
    fn disabled_must_be_zero() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {
                    "description": "s",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400, "DISABLED": 5}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                }
            }
        }));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-004"]);
    }

    #[test]
    fn extra_status_labels_warn_only() {
        let cfg = node_with_module(json!({
            "interface_classes": ["Readable"],
            "description": "d", "implementation": "i",
            "accessibles": {
                "status": {
                    "description": "s",
                    "datainfo": {
                        "type": "tuple",
                        "members": [
                            {"type": "enum", "members": {"IDLE": 100, "WARN": 200, "ERROR": 400, "PAUSED": 250, "ALIGNING": 150}},
                            {"type": "string"}
                        ]
                    },
                    "readonly": true
                }
            }
        }));
        let findings = status_structure_and_codes(&cfg);
        assert_eq!(ids(&findings), ["R-STAT-005"]);
        assert_eq!(findings[0].severity, Severity::Warning);
        // sorted label list
        assert!(findings[0].message.contains("[\"ALIGNING\", \"PAUSED\"]"));
    }
}
