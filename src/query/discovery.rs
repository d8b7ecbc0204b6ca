//! Model discovery: tag names and class counts

use crate::index::{CimClass, ModelAccess};
use serde::Serialize;

/// Number of elements of one CIM class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    #[serde(rename = "Class")]
    pub class: &'static str,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Sorted distinct local tag names containing `needle` (case-sensitive)
pub fn tag_names_containing<M: ModelAccess + ?Sized>(model: &M, needle: &str) -> Vec<String> {
    model
        .tag_names()
        .into_iter()
        .filter(|name| name.contains(needle))
        .map(str::to_owned)
        .collect()
}

/// Element counts for every class the queries and rules read
pub fn class_counts<M: ModelAccess + ?Sized>(model: &M) -> Vec<ClassCount> {
    CimClass::ALL
        .into_iter()
        .map(|class| ClassCount {
            class: class.local_name(),
            count: model.by_type(class).len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_index;

    #[test]
    fn test_tag_names_containing() {
        let index = fixture_index();
        assert_eq!(
            tag_names_containing(&index, "BaseVoltage"),
            vec!["BaseVoltage", "BaseVoltage.nominalVoltage", "TransformerEnd.BaseVoltage"]
        );
        let limits = tag_names_containing(&index, "Limit");
        assert_eq!(limits.first().map(String::as_str), Some("CurrentLimit"));
        assert_eq!(limits.len(), 10);
        assert!(tag_names_containing(&index, "limit").is_empty());
    }

    #[test]
    fn test_class_counts() {
        let index = fixture_index();
        let counts = class_counts(&index);
        assert_eq!(counts.len(), CimClass::ALL.len());
        let count = |name: &str| counts.iter().find(|c| c.class == name).map(|c| c.count);
        assert_eq!(count("SynchronousMachine"), Some(2));
        assert_eq!(count("PowerTransformerEnd"), Some(3));
        assert_eq!(count("VoltageLimit"), Some(0));
    }
}
