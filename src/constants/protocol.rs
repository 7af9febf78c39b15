//! SECoP protocol vocabulary: datatype names and fixed status codes.

use itertools::Itertools;
use once_cell::sync::Lazy;

/// Datatypes defined by the SECoP protocol.
pub const PROTOCOL_TYPES: [&str; 12] = [
    "double", "scaled", "int", "bool", "enum", "string", "blob", "array", "tuple", "struct",
    "matrix", "command",
];

/// Protocol-legal datatypes the current PLC SEC node version does not implement.
pub const PLC_UNSUPPORTED_TYPES: [&str; 4] = ["scaled", "blob", "matrix", "struct"];

/// Sorted list of the types this generator accepts, for use in hints.
pub static SUPPORTED_TYPES: Lazy<Vec<&str>> = Lazy::new(|| {
    PROTOCOL_TYPES
        .iter()
        .copied()
        .filter(|t| !PLC_UNSUPPORTED_TYPES.contains(t))
        .sorted()
        .collect()
});

pub fn is_protocol_type(t: &str) -> bool {
    PROTOCOL_TYPES.contains(&t)
}

pub fn is_plc_unsupported(t: &str) -> bool {
    PLC_UNSUPPORTED_TYPES.contains(&t)
}

pub fn is_supported_type(t: &str) -> bool {
    is_protocol_type(t) && !is_plc_unsupported(t)
}

// Status codes are fixed by the SECoP protocol
pub const STATUS_DISABLED: i64 = 0;
pub const STATUS_IDLE: i64 = 100;
pub const STATUS_WARN: i64 = 200;
pub const STATUS_BUSY: i64 = 300;
pub const STATUS_ERROR: i64 = 400;

/// Status enum labels the generator knows how to map.
pub const KNOWN_STATUS_LABELS: [&str; 5] = ["DISABLED", "IDLE", "WARN", "BUSY", "ERROR"];
