//! Defines the issue records produced by the validator.

use serde::Serialize;
use std::fmt;

/// The category of a structural issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueType {
    /// A required link between objects is missing.
    Logical,
    /// An attribute has a value that makes no sense for the object.
    Parameter,
    /// The object is electrically incomplete (e.g. no voltage level).
    #[serde(rename = "Power-system")]
    PowerSystem,
}

impl IssueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueType::Logical => "Logical",
            IssueType::Parameter => "Parameter",
            IssueType::PowerSystem => "Power-system",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured report of one problem in the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "Type")]
    pub kind: IssueType,
    /// Human-readable description, fixed per rule.
    #[serde(rename = "Issue")]
    pub description: &'static str,
    /// Identifier of the owning element, or `UNKNOWN`.
    #[serde(rename = "Object")]
    pub object: String,
}

impl Issue {
    pub fn new(kind: IssueType, description: &'static str, object: impl Into<String>) -> Self {
        Issue {
            kind,
            description,
            object: object.into(),
        }
    }

    pub fn logical(description: &'static str, object: impl Into<String>) -> Self {
        Self::new(IssueType::Logical, description, object)
    }

    pub fn parameter(description: &'static str, object: impl Into<String>) -> Self {
        Self::new(IssueType::Parameter, description, object)
    }

    pub fn power_system(description: &'static str, object: impl Into<String>) -> Self {
        Self::new(IssueType::PowerSystem, description, object)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.kind, self.description, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serializes_with_table_columns() {
        let issue = Issue::power_system("Transformer winding without BaseVoltage", "T2");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Type": "Power-system",
                "Issue": "Transformer winding without BaseVoltage",
                "Object": "T2"
            })
        );
    }

    #[test]
    fn test_display() {
        let issue = Issue::logical("Line without terminals", "L2");
        assert_eq!(issue.to_string(), "[Logical] Line without terminals (L2)");
    }
}
