//! # Unit Types
//!
//! Input units for positions and forces, and the [`UnitConvention`] that
//! fixes how entered values are scaled before they reach the calculation.
//!
//! ## Convention
//!
//! Positions are entered in a length unit, forces in a force unit, and
//! applied couples in `force × length`. The diagram is always reported in
//! newton-metres. Entering positions in millimetres and forces in newtons
//! therefore yields N·mm products, which are divided by 1000:
//!
//! ```rust
//! use moment_core::units::{UnitConvention, LengthUnit, ForceUnit};
//!
//! let convention = UnitConvention::default();
//! assert_eq!(convention.length, LengthUnit::Millimeter);
//! assert_eq!(convention.force, ForceUnit::Newton);
//! assert_eq!(convention.magnitude_scale(), 0.001);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Unit Selection
// ============================================================================

/// Unit used for positions along the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Meter,
}

impl LengthUnit {
    /// Length of one unit in metres
    pub fn in_meters(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.001,
            LengthUnit::Meter => 1.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Meter => "m",
        }
    }
}

/// Unit used for entered force magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceUnit {
    #[default]
    Newton,
    Kilonewton,
}

impl ForceUnit {
    /// Size of one unit in newtons
    pub fn in_newtons(&self) -> f64 {
        match self {
            ForceUnit::Newton => 1.0,
            ForceUnit::Kilonewton => 1000.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ForceUnit::Newton => "N",
            ForceUnit::Kilonewton => "kN",
        }
    }
}

/// Input units for a session. Output moments are always N·m.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConvention {
    pub length: LengthUnit,
    pub force: ForceUnit,
}

impl UnitConvention {
    /// Symbol of the reported moment unit
    pub const MOMENT_SYMBOL: &'static str = "N·m";

    pub fn new(length: LengthUnit, force: ForceUnit) -> Self {
        Self { length, force }
    }

    /// Factor converting `force × length` in input units to N·m.
    ///
    /// Applied to every force and couple magnitude at the session boundary.
    pub fn magnitude_scale(&self) -> f64 {
        self.length.in_meters() * self.force.in_newtons()
    }

    /// Label for entered couples, e.g. `N·mm`
    pub fn couple_symbol(&self) -> String {
        format!("{}·{}", self.force.symbol(), self.length.symbol())
    }
}
