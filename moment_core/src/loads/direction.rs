//! Load directions and the sign convention that maps them to signed magnitudes
//!
//! Users enter an unsigned magnitude plus a direction label. The
//! [`SignConvention`] table turns that pair into the signed value the
//! moment calculation consumes, so the calculation itself never sees labels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Sign assigned to a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(&self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Behaviour shared by force and couple direction labels
pub trait Direction: Copy + FromStr<Err = CalcError> + std::fmt::Display {
    /// Signed unit factor for this direction under a convention
    fn sign(&self, convention: &SignConvention) -> f64;

    /// Labels accepted when parsing, for help text
    fn accepted_labels() -> &'static str;
}

/// Direction of a transverse point force
///
/// # Example
/// ```
/// use moment_core::loads::ForceDirection;
///
/// let dir: ForceDirection = "down".parse().unwrap();
/// assert_eq!(dir, ForceDirection::Down);
/// assert_eq!("上".parse::<ForceDirection>().unwrap(), ForceDirection::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceDirection {
    Up,
    Down,
}

impl ForceDirection {
    pub const ALL: [ForceDirection; 2] = [ForceDirection::Up, ForceDirection::Down];

    pub fn label(&self) -> &'static str {
        match self {
            ForceDirection::Up => "up",
            ForceDirection::Down => "down",
        }
    }
}

impl FromStr for ForceDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" | "上" => Ok(ForceDirection::Up),
            "down" | "d" | "下" => Ok(ForceDirection::Down),
            other => Err(CalcError::invalid_input(
                "force_direction",
                other,
                format!("expected one of: {}", Self::accepted_labels()),
            )),
        }
    }
}

impl std::fmt::Display for ForceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Direction for ForceDirection {
    fn sign(&self, convention: &SignConvention) -> f64 {
        match self {
            ForceDirection::Up => convention.up.factor(),
            ForceDirection::Down => convention.down.factor(),
        }
    }

    fn accepted_labels() -> &'static str {
        "up, u, 上, down, d, 下"
    }
}

/// Rotational sense of an applied couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentDirection {
    Clockwise,
    CounterClockwise,
}

impl MomentDirection {
    pub const ALL: [MomentDirection; 2] = [MomentDirection::Clockwise, MomentDirection::CounterClockwise];

    pub fn label(&self) -> &'static str {
        match self {
            MomentDirection::Clockwise => "cw",
            MomentDirection::CounterClockwise => "ccw",
        }
    }
}

impl FromStr for MomentDirection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cw" | "clockwise" | "顺时针" => Ok(MomentDirection::Clockwise),
            "ccw" | "counterclockwise" | "counter-clockwise" | "anticlockwise" | "逆时针" => {
                Ok(MomentDirection::CounterClockwise)
            }
            other => Err(CalcError::invalid_input(
                "moment_direction",
                other,
                format!("expected one of: {}", Self::accepted_labels()),
            )),
        }
    }
}

impl std::fmt::Display for MomentDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Direction for MomentDirection {
    fn sign(&self, convention: &SignConvention) -> f64 {
        match self {
            MomentDirection::Clockwise => convention.clockwise.factor(),
            MomentDirection::CounterClockwise => convention.counter_clockwise.factor(),
        }
    }

    fn accepted_labels() -> &'static str {
        "cw, clockwise, 顺时针, ccw, counterclockwise, anticlockwise, 逆时针"
    }
}

/// Lookup table from direction label to sign.
///
/// The default treats downward forces and counter-clockwise couples as
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignConvention {
    pub up: Sign,
    pub down: Sign,
    pub clockwise: Sign,
    pub counter_clockwise: Sign,
}

impl Default for SignConvention {
    fn default() -> Self {
        Self {
            up: Sign::Negative,
            down: Sign::Positive,
            clockwise: Sign::Negative,
            counter_clockwise: Sign::Positive,
        }
    }
}

impl SignConvention {
    /// Signed magnitude for an unsigned entry
    pub fn apply<D: Direction>(&self, direction: D, magnitude: f64) -> f64 {
        direction.sign(self) * magnitude
    }
}
