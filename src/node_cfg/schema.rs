//! Typed model of the SECoP node configuration file (plus `x-plc` tooling).
//!
//! Deserialization is strict: unknown fields anywhere in the document are
//! rejected, and defaults are applied for the optional fields. Cross-field
//! coherence is out of scope here; that is the job of the rule catalog,
//! which consumes this model read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level configuration file structure.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    pub equipment_id: String,
    pub description: String,
    pub firmware: String,

    pub modules: BTreeMap<String, Module>,

    /// Node-level tooling data. Not part of the SECoP protocol itself; kept
    /// under "x-plc" so it can be stripped to obtain a pure describe JSON.
    #[serde(rename = "x-plc", default, skip_serializing_if = "Option::is_none")]
    pub x_plc: Option<NodeTooling>,
}

/// One module inside the SECoP node.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    pub interface_classes: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,

    pub description: String,
    pub implementation: String,

    pub accessibles: BTreeMap<String, Accessible>,

    #[serde(rename = "x-plc", default, skip_serializing_if = "Option::is_none")]
    pub x_plc: Option<ModuleTooling>,
}

impl Module {
    /// Highest capability named anywhere in `interface_classes`.
    ///
    /// The single-class constraint is a business rule; capability checks
    /// stay membership-based so they keep working on malformed tag lists.
    pub fn capability(&self) -> Option<InterfaceClass> {
        self.interface_classes
            .iter()
            .filter_map(|c| c.parse().ok())
            .max()
    }

    pub fn implements(&self, cls: InterfaceClass) -> bool {
        self.capability().is_some_and(|c| c.implies(cls))
    }
}

/// SECoP interface class, ordered by capability: Drivable implies Writable
/// implies Readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InterfaceClass {
    Readable,
    Writable,
    Drivable,
}

impl InterfaceClass {
    pub fn implies(self, other: InterfaceClass) -> bool {
        self >= other
    }
}

impl std::str::FromStr for InterfaceClass {
    type Err = &'static str;
    fn from_str(value: &str) -> Result<Self, &'static str> {
        match value {
            "Readable" => Ok(Self::Readable),
            "Writable" => Ok(Self::Writable),
            "Drivable" => Ok(Self::Drivable),
            _ => Err("invalid value"),
        }
    }
}

/// A SECoP accessible parameter/command in the describe structure.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Accessible {
    pub description: String,
    pub datainfo: DataInfo,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkable: Option<bool>,
}

/// SECoP "datainfo" object describing one value's datatype.
///
/// `type` is kept as a free string: an unrecognized type name must surface
/// as a rule finding, not as a shape failure.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DataInfo {
    #[serde(rename = "type")]
    pub type_: String,

    // Common optional fields used by numeric/string/array types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxchars: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlen: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Members>,

    // command-specific (SECoP): optional argument / result datainfo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Box<DataInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<DataInfo>>,
}

impl DataInfo {
    pub fn ty(&self) -> &str {
        self.type_.trim()
    }

    pub fn is_enum(&self) -> bool {
        self.ty() == "enum"
    }

    /// Enum label->code table, when `members` resolved to that shape.
    pub fn enum_codes(&self) -> Option<&BTreeMap<String, i64>> {
        match &self.members {
            Some(Members::Codes(codes)) => Some(codes),
            _ => None,
        }
    }

    /// Tuple member fragments, when `members` resolved to that shape.
    pub fn tuple_fragments(&self) -> Option<&[DataInfo]> {
        match &self.members {
            Some(Members::Fragments(frags)) => Some(frags),
            _ => None,
        }
    }
}

/// Shape-resolved `datainfo.members` union.
///
/// The valid variant depends on the sibling `type`:
/// - enum: `{"off": 0, "on": 1}` (label -> integer code)
/// - tuple: `[{"type": "enum", ...}, {"type": "string"}]` (ordered fragments)
/// - array: a single element schema, e.g. `{"type": "int"}`
///
/// Deserialization only resolves which shape the document used; whether that
/// shape agrees with `type` is a rule concern.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Members {
    Codes(BTreeMap<String, i64>),
    Fragments(Vec<DataInfo>),
    Element(Box<DataInfo>),
}

// ---------------------------------------------------------------------------
// Node-level tooling ("x-plc")
// ---------------------------------------------------------------------------

/// TCP server settings used by the generated PLC project.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TcpTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_healthy_tag: Option<String>,
}

/// Tooling configuration at SECoP node level.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodeTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpTooling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secop_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plc_timestamp_tag: Option<String>,
}

// ---------------------------------------------------------------------------
// Module-level tooling ("x-plc")
// ---------------------------------------------------------------------------

/// PLC mapping for the `value` accessible.
///
/// Non-enum values use `read_expr`; enum values use `enum_tag` plus
/// `enum_member_map` instead.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValueTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_member_map: Option<BTreeMap<String, String>>,
}

/// PLC-related status extensions (project-specific).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatusTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_error_expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_error_description: Option<String>,
}

/// PLC mapping for `target` write behaviour.
///
/// Non-enum targets use `write_stmt`; enum targets use `enum_tag`. The
/// `reach_*` fields describe setpoint settling and only make sense on
/// Drivable modules.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_stmt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_possible_expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach_timeout_s: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach_abs_tolerance: Option<f64>,
}

/// PLC mapping for the `clear_errors` command.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClearErrorsTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd_stmt: Option<String>,
}

/// Tooling configuration under module-level "x-plc".
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleTooling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueTooling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusTooling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetTooling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_errors: Option<ClearErrorsTooling>,
}
