use serde::Serialize;

/// Category tag for findings the developer must resolve by writing PLC code.
pub const CATEGORY_IMPLEMENTATION: &str = "implementation";

/// Two-level severity model:
/// - `Error`: cannot proceed to generate an importable PLC project.
/// - `Warning`: generation can continue, but placeholders will be emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
}

/// A single rule finding.
///
/// `rule_id` is a stable identifier (used in documentation and CI logs);
/// `path` is a JSONPath-like locator pointing at the offending node. Optional
/// fields that are unset are omitted from serialized output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Finding {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plc_refs: Vec<String>,
}

impl Finding {
    fn new(
        rule_id: &'static str,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            rule_id,
            severity,
            path: path.into(),
            message: message.into(),
            hint: None,
            category: None,
            plc_refs: Vec::new(),
        }
    }

    pub fn error(rule_id: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Finding::new(rule_id, Severity::Error, path, message)
    }

    pub fn warning(
        rule_id: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Finding::new(rule_id, Severity::Warning, path, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_category(mut self, category: &'static str) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_plc_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plc_refs = refs.into_iter().map(Into::into).collect();
        self
    }
}
