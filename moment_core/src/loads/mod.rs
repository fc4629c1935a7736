//! Concentrated loads on a beam
//!
//! # Overview
//!
//! - [`PointLoad`] - A signed transverse force at one position
//! - [`AppliedMoment`] - A signed couple at one position
//! - [`ForceDirection`] / [`MomentDirection`] - Direction labels entered by the user
//! - [`SignConvention`] - Lookup table from direction label to sign
//! - [`LoadSession`] - The editable force and couple tables of one session
//!
//! # Example
//!
//! ```
//! use moment_core::loads::{PointLoad, AppliedMoment};
//!
//! let load = PointLoad::new(120.0, 1.5);
//! let couple = AppliedMoment::new(60.0, -0.8);
//! assert_eq!(load.position, 120.0);
//! assert_eq!(couple.magnitude, -0.8);
//! ```

pub mod direction;
pub mod session;

pub use direction::{Direction, ForceDirection, MomentDirection, Sign, SignConvention};
pub use session::{ForceEntry, LoadEntry, LoadSession, MomentEntry};

use serde::{Deserialize, Serialize};

/// A concentrated transverse force
///
/// Sign convention is chosen by the caller; the calculation treats the
/// sign as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from the left end of the beam
    pub position: f64,
    /// Signed force
    pub magnitude: f64,
}

impl PointLoad {
    pub fn new(position: f64, magnitude: f64) -> Self {
        Self { position, magnitude }
    }
}

/// A concentrated couple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedMoment {
    /// Distance from the left end of the beam
    pub position: f64,
    /// Signed couple
    pub magnitude: f64,
}

impl AppliedMoment {
    pub fn new(position: f64, magnitude: f64) -> Self {
        Self { position, magnitude }
    }
}
