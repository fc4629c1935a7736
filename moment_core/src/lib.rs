//! # moment_core - Bending-Moment Diagram Engine
//!
//! `moment_core` computes the bending-moment curve of a straight beam or
//! shaft carrying concentrated forces and couples, and renders it as a
//! text report or an SVG plot. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless calculation**: [`calculations::moment_diagram::calculate`] is a pure function
//! - **Explicit session state**: loads entered interactively live in a [`LoadSession`]
//! - **Signs at the boundary**: direction labels become signed values through a [`SignConvention`]
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use moment_core::{DiagramConfig, LoadSession};
//! use moment_core::calculations::calculate;
//! use moment_core::loads::{ForceDirection, MomentDirection};
//!
//! let config = DiagramConfig::default();
//! let mut session = LoadSession::new();
//! session.add_force(40.0, ForceDirection::Down, 1500.0).unwrap();
//! session.add_force(180.0, ForceDirection::Up, 900.0).unwrap();
//! session.add_moment(100.0, MomentDirection::CounterClockwise, 20_000.0).unwrap();
//!
//! let diagram = calculate(&config.diagram_input(&session)).unwrap();
//! assert_eq!(diagram.len(), config.sample_count);
//!
//! let json = serde_json::to_string(&diagram).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The moment diagram calculation
//! - [`loads`] - Point loads, couples, directions and the load session
//! - [`config`] - TOML configuration
//! - [`report`] - Text report and annotation formatting
//! - [`plot`] - SVG rendering
//! - [`units`] - Unit wrappers and the input unit convention
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod loads;
pub mod plot;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{LastLoadPolicy, MomentDiagram, MomentDiagramInput};
pub use config::DiagramConfig;
pub use errors::{CalcError, CalcResult};
pub use loads::{AppliedMoment, LoadSession, PointLoad, SignConvention};
