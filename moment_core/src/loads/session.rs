//! Interactive Load Session
//!
//! Holds the force and couple tables a user builds up entry by entry, and
//! turns them into signed, unit-scaled loads for the moment calculation.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::direction::{Direction, ForceDirection, MomentDirection, SignConvention};
use super::{AppliedMoment, PointLoad};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Load Entry
// ============================================================================

/// One row of a load table: position, direction label and unsigned magnitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadEntry<D> {
    /// Unique identifier for this row
    pub id: Uuid,

    /// Distance from the left end of the beam (input length unit)
    pub position: f64,

    /// Direction label; carries the sign
    pub direction: D,

    /// Unsigned magnitude (input force or couple unit)
    pub magnitude: f64,
}

impl<D: Direction> LoadEntry<D> {
    /// Create a validated entry
    pub fn new(position: f64, direction: D, magnitude: f64) -> CalcResult<Self> {
        if !position.is_finite() {
            return Err(CalcError::non_finite("position", position));
        }
        if position < 0.0 {
            return Err(CalcError::invalid_input(
                "position",
                position.to_string(),
                "Position is measured from the left end and cannot be negative",
            ));
        }
        if !magnitude.is_finite() {
            return Err(CalcError::non_finite("magnitude", magnitude));
        }
        if magnitude < 0.0 {
            return Err(CalcError::invalid_input(
                "magnitude",
                magnitude.to_string(),
                "Magnitude is unsigned; choose the direction instead",
            ));
        }

        // -0.0 is stored as 0.0
        Ok(Self {
            id: Uuid::new_v4(),
            position: position + 0.0,
            direction,
            magnitude: magnitude + 0.0,
        })
    }

    /// Magnitude with direction sign and unit scale applied
    pub fn signed_magnitude(&self, convention: &SignConvention, magnitude_scale: f64) -> f64 {
        convention.apply(self.direction, self.magnitude) * magnitude_scale
    }
}

/// A row of the force table
pub type ForceEntry = LoadEntry<ForceDirection>;

/// A row of the couple table
pub type MomentEntry = LoadEntry<MomentDirection>;

// ============================================================================
// Load Session
// ============================================================================

/// Loads entered during one interactive session
///
/// Rows are kept in entry order so table indices stay stable for the user;
/// sorting by position happens inside the calculation.
///
/// # Example
/// ```
/// use moment_core::loads::{LoadSession, ForceDirection, MomentDirection, SignConvention};
///
/// let mut session = LoadSession::new();
/// session.add_force(50.0, ForceDirection::Down, 1200.0).unwrap();
/// session.add_moment(120.0, MomentDirection::Clockwise, 3000.0).unwrap();
///
/// let (forces, moments) = session.snapshot(&SignConvention::default(), 0.001);
/// assert_eq!(forces[0].magnitude, 1.2);
/// assert_eq!(moments[0].magnitude, -3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSession {
    forces: Vec<ForceEntry>,
    moments: Vec<MomentEntry>,
}

impl LoadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a force row and return its id
    pub fn add_force(&mut self, position: f64, direction: ForceDirection, magnitude: f64) -> CalcResult<Uuid> {
        let entry = ForceEntry::new(position, direction, magnitude)?;
        let id = entry.id;
        debug!(%id, position, %direction, magnitude, "force added");
        self.forces.push(entry);
        Ok(id)
    }

    /// Add a couple row and return its id
    pub fn add_moment(&mut self, position: f64, direction: MomentDirection, magnitude: f64) -> CalcResult<Uuid> {
        let entry = MomentEntry::new(position, direction, magnitude)?;
        let id = entry.id;
        debug!(%id, position, %direction, magnitude, "moment added");
        self.moments.push(entry);
        Ok(id)
    }

    /// Add a force row (builder pattern)
    pub fn with_force(mut self, position: f64, direction: ForceDirection, magnitude: f64) -> CalcResult<Self> {
        self.add_force(position, direction, magnitude)?;
        Ok(self)
    }

    /// Add a couple row (builder pattern)
    pub fn with_moment(mut self, position: f64, direction: MomentDirection, magnitude: f64) -> CalcResult<Self> {
        self.add_moment(position, direction, magnitude)?;
        Ok(self)
    }

    /// Delete a force by its table index
    pub fn remove_force(&mut self, index: usize) -> CalcResult<ForceEntry> {
        if index >= self.forces.len() {
            return Err(CalcError::load_not_found(format!("force #{}", index)));
        }
        Ok(self.forces.remove(index))
    }

    /// Delete a couple by its table index
    pub fn remove_moment(&mut self, index: usize) -> CalcResult<MomentEntry> {
        if index >= self.moments.len() {
            return Err(CalcError::load_not_found(format!("moment #{}", index)));
        }
        Ok(self.moments.remove(index))
    }

    /// Delete a row from either table by id. Returns true if a row was removed.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        if let Some(pos) = self.forces.iter().position(|f| f.id == id) {
            self.forces.remove(pos);
            return true;
        }
        if let Some(pos) = self.moments.iter().position(|m| m.id == id) {
            self.moments.remove(pos);
            return true;
        }
        false
    }

    pub fn forces(&self) -> &[ForceEntry] {
        &self.forces
    }

    pub fn moments(&self) -> &[MomentEntry] {
        &self.moments
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty() && self.moments.is_empty()
    }

    pub fn clear(&mut self) {
        self.forces.clear();
        self.moments.clear();
    }

    /// Signed, scaled copies of both tables for one calculation
    pub fn snapshot(&self, convention: &SignConvention, magnitude_scale: f64) -> (Vec<PointLoad>, Vec<AppliedMoment>) {
        let forces = self
            .forces
            .iter()
            .map(|f| PointLoad::new(f.position, f.signed_magnitude(convention, magnitude_scale)))
            .collect();
        let moments = self
            .moments
            .iter()
            .map(|m| AppliedMoment::new(m.position, m.signed_magnitude(convention, magnitude_scale)))
            .collect();
        (forces, moments)
    }
}

// ============================================================================
// Tests
// ============================================================================
