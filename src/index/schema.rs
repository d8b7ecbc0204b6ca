//! CIM Schema Names
//!
//! Typed names for the classes, properties and RDF attributes the queries and
//! rules read. Each name knows its local part; the namespace comes from the
//! session's [`NamespaceBindings`](crate::config::NamespaceBindings).

use std::fmt;

/// CIM classes the engine looks up by type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CimClass {
    GeneratingUnit,
    SynchronousMachine,
    PowerTransformer,
    PowerTransformerEnd,
    BaseVoltage,
    ACLineSegment,
    Terminal,
    OperationalLimitSet,
    OperationalLimit,
    CurrentLimit,
    ActivePowerLimit,
    ApparentPowerLimit,
    VoltageLimit,
    OperationalLimitType,
}

impl CimClass {
    /// Every class, in summary order
    pub const ALL: [CimClass; 14] = [
        CimClass::GeneratingUnit,
        CimClass::SynchronousMachine,
        CimClass::PowerTransformer,
        CimClass::PowerTransformerEnd,
        CimClass::BaseVoltage,
        CimClass::ACLineSegment,
        CimClass::Terminal,
        CimClass::OperationalLimitSet,
        CimClass::OperationalLimit,
        CimClass::CurrentLimit,
        CimClass::ActivePowerLimit,
        CimClass::ApparentPowerLimit,
        CimClass::VoltageLimit,
        CimClass::OperationalLimitType,
    ];

    /// Concrete classes a listed operational limit may be
    pub const OPERATIONAL_LIMITS: [CimClass; 5] = [
        CimClass::OperationalLimit,
        CimClass::CurrentLimit,
        CimClass::ActivePowerLimit,
        CimClass::ApparentPowerLimit,
        CimClass::VoltageLimit,
    ];

    /// Local tag name
    pub const fn local_name(self) -> &'static str {
        match self {
            CimClass::GeneratingUnit => "GeneratingUnit",
            CimClass::SynchronousMachine => "SynchronousMachine",
            CimClass::PowerTransformer => "PowerTransformer",
            CimClass::PowerTransformerEnd => "PowerTransformerEnd",
            CimClass::BaseVoltage => "BaseVoltage",
            CimClass::ACLineSegment => "ACLineSegment",
            CimClass::Terminal => "Terminal",
            CimClass::OperationalLimitSet => "OperationalLimitSet",
            CimClass::OperationalLimit => "OperationalLimit",
            CimClass::CurrentLimit => "CurrentLimit",
            CimClass::ActivePowerLimit => "ActivePowerLimit",
            CimClass::ApparentPowerLimit => "ApparentPowerLimit",
            CimClass::VoltageLimit => "VoltageLimit",
            CimClass::OperationalLimitType => "OperationalLimitType",
        }
    }

    /// Position in [`CimClass::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look a class up by local tag name
    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.local_name() == name)
    }

    /// True for the operational-limit family
    pub fn is_operational_limit(self) -> bool {
        Self::OPERATIONAL_LIMITS.contains(&self)
    }

    /// Properties carrying a limit's value, in lookup order
    ///
    /// Empty for classes outside the operational-limit family.
    pub const fn limit_value_properties(self) -> &'static [CimProperty] {
        use CimProperty::*;
        match self {
            CimClass::OperationalLimit => &[OperationalLimitValue],
            CimClass::CurrentLimit => &[OperationalLimitValue, CurrentLimitValue, CurrentLimitNormalValue],
            CimClass::ActivePowerLimit => &[
                OperationalLimitValue,
                ActivePowerLimitValue,
                ActivePowerLimitNormalValue,
            ],
            CimClass::ApparentPowerLimit => &[
                OperationalLimitValue,
                ApparentPowerLimitValue,
                ApparentPowerLimitNormalValue,
            ],
            CimClass::VoltageLimit => &[OperationalLimitValue, VoltageLimitValue, VoltageLimitNormalValue],
            _ => &[],
        }
    }
}

impl fmt::Display for CimClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// CIM properties (child elements) the engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CimProperty {
    IdentifiedObjectName,
    GeneratingUnitMaxOperatingP,
    SynchronousMachineVoltageRegulationRange,
    SynchronousMachineType,
    SynchronousMachineReferencePriority,
    RegulatingCondEqRegulatingControl,
    RotatingMachineGeneratingUnit,
    PowerTransformerEndPowerTransformer,
    PowerTransformerEndEndNumber,
    TransformerEndBaseVoltage,
    BaseVoltageNominalVoltage,
    TerminalConductingEquipment,
    TerminalTopologicalNode,
    OperationalLimitSetTerminal,
    OperationalLimitSetOperationalLimit,
    OperationalLimitOperationalLimitType,
    OperationalLimitValue,
    CurrentLimitValue,
    CurrentLimitNormalValue,
    ActivePowerLimitValue,
    ActivePowerLimitNormalValue,
    ApparentPowerLimitValue,
    ApparentPowerLimitNormalValue,
    VoltageLimitValue,
    VoltageLimitNormalValue,
    OperationalLimitTypeKind,
}

impl CimProperty {
    pub const COUNT: usize = 26;

    /// Every property, indexed by discriminant
    pub const ALL: [CimProperty; Self::COUNT] = [
        CimProperty::IdentifiedObjectName,
        CimProperty::GeneratingUnitMaxOperatingP,
        CimProperty::SynchronousMachineVoltageRegulationRange,
        CimProperty::SynchronousMachineType,
        CimProperty::SynchronousMachineReferencePriority,
        CimProperty::RegulatingCondEqRegulatingControl,
        CimProperty::RotatingMachineGeneratingUnit,
        CimProperty::PowerTransformerEndPowerTransformer,
        CimProperty::PowerTransformerEndEndNumber,
        CimProperty::TransformerEndBaseVoltage,
        CimProperty::BaseVoltageNominalVoltage,
        CimProperty::TerminalConductingEquipment,
        CimProperty::TerminalTopologicalNode,
        CimProperty::OperationalLimitSetTerminal,
        CimProperty::OperationalLimitSetOperationalLimit,
        CimProperty::OperationalLimitOperationalLimitType,
        CimProperty::OperationalLimitValue,
        CimProperty::CurrentLimitValue,
        CimProperty::CurrentLimitNormalValue,
        CimProperty::ActivePowerLimitValue,
        CimProperty::ActivePowerLimitNormalValue,
        CimProperty::ApparentPowerLimitValue,
        CimProperty::ApparentPowerLimitNormalValue,
        CimProperty::VoltageLimitValue,
        CimProperty::VoltageLimitNormalValue,
        CimProperty::OperationalLimitTypeKind,
    ];

    /// Local tag name (`Class.role`)
    pub const fn local_name(self) -> &'static str {
        match self {
            CimProperty::IdentifiedObjectName => "IdentifiedObject.name",
            CimProperty::GeneratingUnitMaxOperatingP => "GeneratingUnit.maxOperatingP",
            CimProperty::SynchronousMachineVoltageRegulationRange => {
                "SynchronousMachine.voltageRegulationRange"
            }
            CimProperty::SynchronousMachineType => "SynchronousMachine.type",
            CimProperty::SynchronousMachineReferencePriority => "SynchronousMachine.referencePriority",
            CimProperty::RegulatingCondEqRegulatingControl => "RegulatingCondEq.RegulatingControl",
            CimProperty::RotatingMachineGeneratingUnit => "RotatingMachine.GeneratingUnit",
            CimProperty::PowerTransformerEndPowerTransformer => "PowerTransformerEnd.PowerTransformer",
            CimProperty::PowerTransformerEndEndNumber => "PowerTransformerEnd.endNumber",
            CimProperty::TransformerEndBaseVoltage => "TransformerEnd.BaseVoltage",
            CimProperty::BaseVoltageNominalVoltage => "BaseVoltage.nominalVoltage",
            CimProperty::TerminalConductingEquipment => "Terminal.ConductingEquipment",
            CimProperty::TerminalTopologicalNode => "Terminal.TopologicalNode",
            CimProperty::OperationalLimitSetTerminal => "OperationalLimitSet.Terminal",
            CimProperty::OperationalLimitSetOperationalLimit => "OperationalLimitSet.OperationalLimit",
            CimProperty::OperationalLimitOperationalLimitType => {
                "OperationalLimit.OperationalLimitType"
            }
            CimProperty::OperationalLimitValue => "OperationalLimit.value",
            CimProperty::CurrentLimitValue => "CurrentLimit.value",
            CimProperty::CurrentLimitNormalValue => "CurrentLimit.normalValue",
            CimProperty::ActivePowerLimitValue => "ActivePowerLimit.value",
            CimProperty::ActivePowerLimitNormalValue => "ActivePowerLimit.normalValue",
            CimProperty::ApparentPowerLimitValue => "ApparentPowerLimit.value",
            CimProperty::ApparentPowerLimitNormalValue => "ApparentPowerLimit.normalValue",
            CimProperty::VoltageLimitValue => "VoltageLimit.value",
            CimProperty::VoltageLimitNormalValue => "VoltageLimit.normalValue",
            CimProperty::OperationalLimitTypeKind => "OperationalLimitType.kind",
        }
    }

    /// Position in [`CimProperty::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CimProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// RDF attributes on CIM elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfAttribute {
    /// `rdf:ID`, the element's identifier
    Id,
    /// `rdf:about`, used by difference and boundary profiles
    About,
    /// `rdf:resource`, a reference to another element
    Resource,
}

impl RdfAttribute {
    pub const ALL: [RdfAttribute; 3] = [RdfAttribute::Id, RdfAttribute::About, RdfAttribute::Resource];

    /// Local attribute name
    pub const fn local_name(self) -> &'static str {
        match self {
            RdfAttribute::Id => "ID",
            RdfAttribute::About => "about",
            RdfAttribute::Resource => "resource",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RdfAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rdf:{}", self.local_name())
    }
}
