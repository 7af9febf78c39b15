// Standard SECoP accessible names used by the rules

pub const VALUE: &str = "value";
pub const STATUS: &str = "status";
pub const POLLINTERVAL: &str = "pollinterval";
pub const TARGET: &str = "target";
pub const TARGET_LIMITS: &str = "target_limits";
pub const STOP: &str = "stop";
pub const CLEAR_ERRORS: &str = "clear_errors";

// Legacy accessible, not implemented on the PLC SEC node
pub const OFFSET: &str = "offset";

/// Prefix marking an accessible as customised/user-defined.
pub const CUSTOM_PREFIX: &str = "_";

/// The only feature name the SECoP protocol defines for this node family.
pub const FEATURE_HAS_OFFSET: &str = "HasOffset";
