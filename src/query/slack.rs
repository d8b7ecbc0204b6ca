//! Slack generator detection
//!
//! The slack (reference) machine is the first `SynchronousMachine` whose
//! `referencePriority` text is exactly `"1"`.

use crate::index::{CimClass, CimProperty, ModelAccess};
use serde::Serialize;
use std::fmt;

/// Outcome of slack generator detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SlackGenerator {
    /// No element anywhere declares `SynchronousMachine.referencePriority`
    NoPriorityConcept,
    /// Priorities exist but none is `"1"`
    NoSlackDesignated {
        /// Machines that declare a priority
        candidates: usize,
    },
    /// Slack machine and its name
    Found { name: String },
    /// Slack machine without `IdentifiedObject.name`
    FoundUnnamed,
}

impl SlackGenerator {
    pub fn is_found(&self) -> bool {
        matches!(self, SlackGenerator::Found { .. } | SlackGenerator::FoundUnnamed)
    }
}

impl fmt::Display for SlackGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackGenerator::NoPriorityConcept => {
                f.write_str("No SynchronousMachine.referencePriority attribute defined in this EQ profile.")
            }
            SlackGenerator::NoSlackDesignated { .. } => {
                f.write_str("referencePriority exists, but no generator is set as slack (priority = 1).")
            }
            SlackGenerator::Found { name } => write!(f, "Slack generator: {}", name),
            SlackGenerator::FoundUnnamed => f.write_str("Slack generator found but name missing."),
        }
    }
}

/// Find the slack generator of a model
pub fn slack_generator<M: ModelAccess + ?Sized>(model: &M) -> SlackGenerator {
    if !model.declares(CimProperty::SynchronousMachineReferencePriority) {
        return SlackGenerator::NoPriorityConcept;
    }

    let machines = model.by_type(CimClass::SynchronousMachine);
    let slack = machines.iter().copied().find(|&sm| {
        model.child_text(sm, CimProperty::SynchronousMachineReferencePriority) == Some("1")
    });

    match slack {
        Some(sm) => match model.child_text(sm, CimProperty::IdentifiedObjectName) {
            Some(name) => SlackGenerator::Found {
                name: name.to_string(),
            },
            None => SlackGenerator::FoundUnnamed,
        },
        None => SlackGenerator::NoSlackDesignated {
            candidates: machines
                .iter()
                .filter(|&&sm| model.property_count(sm, CimProperty::SynchronousMachineReferencePriority) > 0)
                .count(),
        },
    }
}
