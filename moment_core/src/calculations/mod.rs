//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - result type - Calculation output (JSON-serializable)
//! - `calculate(input) -> Result<_, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`moment_diagram`] - Bending-moment curve from point loads and couples

pub mod moment_diagram;

pub use moment_diagram::{
    calculate, compute, CriticalPoint, CriticalPointMap, LastLoadPolicy, MomentDiagram,
    MomentDiagramInput, DEFAULT_SAMPLE_COUNT,
};
