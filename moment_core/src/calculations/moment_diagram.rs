//! Bending-Moment Diagram
//!
//! Builds the bending-moment curve of a straight beam from concentrated
//! forces and couples by superposition over a uniform sample grid.
//!
//! ## Contributions
//! - Point load `f` at `p`: ramp `(x - p) * f` for every sample `x > p`
//! - Couple `m` at `q`: step `m` for every sample `x >= q`
//!
//! The caller supplies loads that already describe the free body; no
//! support reactions are computed here.
//!
//! ## Critical Points
//! Each processed point load records an annotation value keyed by its
//! position: the moment at the first sample beyond the load, read *before*
//! that load's own ramp is added. Couples then shift annotations to their
//! right; an annotation at exactly the couple's position only moves when
//! it and the couple have the same strict sign.
//!
//! ## Example
//! ```rust
//! use moment_core::calculations::moment_diagram::{calculate, MomentDiagramInput};
//! use moment_core::loads::{PointLoad, AppliedMoment};
//!
//! let input = MomentDiagramInput::new(100.0)
//!     .with_sample_count(101)
//!     .with_point_load(PointLoad::new(20.0, 2.0))
//!     .with_point_load(PointLoad::new(80.0, -1.0))
//!     .with_applied_moment(AppliedMoment::new(50.0, 10.0));
//!
//! let diagram = calculate(&input).unwrap();
//! assert_eq!(diagram.len(), 101);
//! assert_eq!(diagram.critical_points.get(20.0), Some(0.0));
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::loads::{AppliedMoment, PointLoad};

/// Default number of samples along the beam
pub const DEFAULT_SAMPLE_COUNT: usize = 5000;

/// Which point loads take part in the ramp superposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastLoadPolicy {
    /// The load furthest along the beam contributes nothing
    #[default]
    SkipLast,
    /// Every point load contributes
    IncludeAll,
}

impl LastLoadPolicy {
    /// Number of sorted loads to process out of `total`
    fn processed_count(&self, total: usize) -> usize {
        match self {
            LastLoadPolicy::SkipLast => total.saturating_sub(1),
            LastLoadPolicy::IncludeAll => total,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LastLoadPolicy::SkipLast => "skip-last",
            LastLoadPolicy::IncludeAll => "include-all",
        }
    }
}

// ============================================================================
// Critical Points
// ============================================================================

/// An annotated value at a load position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalPoint {
    pub position: f64,
    pub moment: f64,
}

/// Position-keyed annotation values, one entry per distinct position.
///
/// Keys compare with exact float equality, matching how coincident loads
/// are detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriticalPointMap {
    points: Vec<CriticalPoint>,
}

impl CriticalPointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value at `position`
    pub fn insert(&mut self, position: f64, moment: f64) {
        match self.points.iter_mut().find(|p| p.position == position) {
            Some(existing) => existing.moment = moment,
            None => self.points.push(CriticalPoint { position, moment }),
        }
    }

    pub fn get(&self, position: f64) -> Option<f64> {
        self.points.iter().find(|p| p.position == position).map(|p| p.moment)
    }

    pub fn remove(&mut self, position: f64) -> Option<f64> {
        let idx = self.points.iter().position(|p| p.position == position)?;
        Some(self.points.remove(idx).moment)
    }

    pub fn contains(&self, position: f64) -> bool {
        self.get(position).is_some()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriticalPoint> {
        self.points.iter()
    }

    /// Shift annotations for a couple at `q` with magnitude `m`
    fn apply_couple(&mut self, couple: &AppliedMoment) {
        let (q, m) = (couple.position, couple.magnitude);
        for point in &mut self.points {
            if point.position > q {
                point.moment += m;
            } else if point.position == q && same_strict_sign(point.moment, m) {
                point.moment += m;
            }
        }
    }
}

fn same_strict_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

// ============================================================================
// Input / Result
// ============================================================================

/// Everything needed to build one diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentDiagramInput {
    /// Signed point loads, any order
    pub point_loads: Vec<PointLoad>,
    /// Signed couples, any order
    pub applied_moments: Vec<AppliedMoment>,
    /// Beam length, same unit as positions
    pub beam_length: f64,
    /// Number of samples including both ends
    pub sample_count: usize,
    #[serde(default)]
    pub policy: LastLoadPolicy,
}

impl MomentDiagramInput {
    /// Empty input over `[0, beam_length]` with default sampling and policy
    pub fn new(beam_length: f64) -> Self {
        Self {
            point_loads: Vec::new(),
            applied_moments: Vec::new(),
            beam_length,
            sample_count: DEFAULT_SAMPLE_COUNT,
            policy: LastLoadPolicy::default(),
        }
    }

    pub fn with_point_load(mut self, load: PointLoad) -> Self {
        self.point_loads.push(load);
        self
    }

    pub fn with_applied_moment(mut self, couple: AppliedMoment) -> Self {
        self.applied_moments.push(couple);
        self
    }

    pub fn with_point_loads(mut self, loads: impl IntoIterator<Item = PointLoad>) -> Self {
        self.point_loads.extend(loads);
        self
    }

    pub fn with_applied_moments(mut self, couples: impl IntoIterator<Item = AppliedMoment>) -> Self {
        self.applied_moments.extend(couples);
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_policy(mut self, policy: LastLoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check domain and every load before any work is done
    pub fn validate(&self) -> CalcResult<()> {
        if !self.beam_length.is_finite() {
            return Err(CalcError::non_finite("beam_length", self.beam_length));
        }
        if self.beam_length <= 0.0 {
            return Err(CalcError::invalid_domain(
                "beam_length",
                self.beam_length.to_string(),
                "Beam length must be positive",
            ));
        }
        if self.sample_count < 2 {
            return Err(CalcError::invalid_domain(
                "sample_count",
                self.sample_count.to_string(),
                "At least two samples are needed to cover both ends",
            ));
        }

        let loads = self
            .point_loads
            .iter()
            .enumerate()
            .map(|(i, l)| (format!("point_loads[{}]", i), l.position, l.magnitude));
        let couples = self
            .applied_moments
            .iter()
            .enumerate()
            .map(|(i, m)| (format!("applied_moments[{}]", i), m.position, m.magnitude));

        for (field, position, magnitude) in loads.chain(couples) {
            if !position.is_finite() {
                return Err(CalcError::non_finite(format!("{}.position", field), position));
            }
            if !magnitude.is_finite() {
                return Err(CalcError::non_finite(format!("{}.magnitude", field), magnitude));
            }
            if position < 0.0 || position > self.beam_length {
                return Err(CalcError::position_out_of_range(field, position, self.beam_length));
            }
        }
        Ok(())
    }
}

/// A sampled bending-moment curve with its annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentDiagram {
    pub beam_length: f64,
    /// `(position, moment)` pairs, positions strictly increasing
    pub samples: Vec<(f64, f64)>,
    pub critical_points: CriticalPointMap,
}

impl MomentDiagram {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|&(x, _)| x)
    }

    pub fn moments(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|&(_, m)| m)
    }

    pub fn min_moment(&self) -> f64 {
        self.moments().fold(f64::INFINITY, f64::min)
    }

    pub fn max_moment(&self) -> f64 {
        self.moments().fold(f64::NEG_INFINITY, f64::max)
    }

    /// `(min, max)` of the sampled moments
    pub fn value_range(&self) -> (f64, f64) {
        (self.min_moment(), self.max_moment())
    }

    /// Sample with the largest absolute moment
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .copied()
            .fold(None, |best: Option<(f64, f64)>, s| match best {
                Some(b) if b.1.abs() >= s.1.abs() => Some(b),
                _ => Some(s),
            })
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Evenly spaced positions over `[0, beam_length]`, both ends included
pub fn sample_positions(beam_length: f64, sample_count: usize) -> Vec<f64> {
    if sample_count == 0 {
        return Vec::new();
    }
    if sample_count == 1 {
        return vec![0.0];
    }
    let step = beam_length / (sample_count - 1) as f64;
    let mut positions: Vec<f64> = (0..sample_count).map(|i| i as f64 * step).collect();
    positions[sample_count - 1] = beam_length;
    positions
}

/// Positions are finite after validation, so `partial_cmp` is total here
fn by_position(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Build the diagram for `input`.
///
/// Pure: the same input always yields the same diagram.
pub fn calculate(input: &MomentDiagramInput) -> CalcResult<MomentDiagram> {
    input.validate()?;

    debug!(
        point_loads = input.point_loads.len(),
        applied_moments = input.applied_moments.len(),
        beam_length = input.beam_length,
        sample_count = input.sample_count,
        policy = input.policy.display_name(),
        "computing moment diagram"
    );

    // sort_by is stable; coincident loads (0.0 and -0.0 included) keep entry order
    let mut loads = input.point_loads.clone();
    loads.sort_by(|a, b| by_position(a.position, b.position));
    let mut couples = input.applied_moments.clone();
    couples.sort_by(|a, b| by_position(a.position, b.position));

    let positions = sample_positions(input.beam_length, input.sample_count);
    let mut moments = vec![0.0; positions.len()];
    let mut critical_points = CriticalPointMap::new();

    let processed = input.policy.processed_count(loads.len());
    for load in &loads[..processed] {
        let start = positions.partition_point(|&x| x <= load.position);
        if start == positions.len() {
            debug!(position = load.position, "point load at beam end has no span beyond it");
            continue;
        }

        // snapshot before this load's ramp is added
        critical_points.insert(load.position, moments[start]);

        for (x, m) in positions[start..].iter().zip(&mut moments[start..]) {
            *m += (x - load.position) * load.magnitude;
        }
    }

    critical_points.remove(0.0);

    for couple in &couples {
        let start = positions.partition_point(|&x| x < couple.position);
        for m in &mut moments[start..] {
            *m += couple.magnitude;
        }
        critical_points.apply_couple(couple);
    }

    Ok(MomentDiagram {
        beam_length: input.beam_length,
        samples: positions.into_iter().zip(moments).collect(),
        critical_points,
    })
}

/// Build a diagram with the default last-load policy
pub fn compute(
    point_loads: &[PointLoad],
    applied_moments: &[AppliedMoment],
    beam_length: f64,
    sample_count: usize,
) -> CalcResult<MomentDiagram> {
    let input = MomentDiagramInput::new(beam_length)
        .with_point_loads(point_loads.iter().copied())
        .with_applied_moments(applied_moments.iter().copied())
        .with_sample_count(sample_count);
    calculate(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOL
    }

    /// 100 long, 101 samples: sample `i` sits exactly at position `i`
    fn unit_grid() -> MomentDiagramInput {
        MomentDiagramInput::new(100.0).with_sample_count(101)
    }

    fn moment_at(diagram: &MomentDiagram, x: f64) -> f64 {
        diagram
            .samples
            .iter()
            .find(|s| s.0 == x)
            .map(|s| s.1)
            .expect("sample position not on grid")
    }

    #[test]
    fn test_no_loads() {
        let diagram = calculate(&unit_grid()).unwrap();
        assert_eq!(diagram.len(), 101);
        assert!(diagram.moments().all(|m| m == 0.0));
        assert!(diagram.critical_points.is_empty());
    }

    #[test]
    fn test_single_point_load_is_skipped() {
        let diagram = calculate(&unit_grid().with_point_load(PointLoad::new(40.0, 3.0))).unwrap();
        assert!(diagram.moments().all(|m| m == 0.0));
        assert!(diagram.critical_points.is_empty());
    }

    #[test]
    fn test_two_point_loads_ramp() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(70.0, -5.0))
                .with_point_load(PointLoad::new(30.0, 2.0)),
        )
        .unwrap();

        for &(x, m) in &diagram.samples {
            if x <= 30.0 {
                assert_eq!(m, 0.0, "x = {}", x);
            } else {
                assert!(approx_eq(m, (x - 30.0) * 2.0), "x = {}", x);
            }
        }
        assert_eq!(diagram.critical_points.len(), 1);
        assert_eq!(diagram.critical_points.get(30.0), Some(0.0));
    }

    #[test]
    fn test_snapshot_reads_earlier_loads() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(10.0, 1.0))
                .with_point_load(PointLoad::new(40.0, 1.0))
                .with_point_load(PointLoad::new(90.0, 1.0)),
        )
        .unwrap();

        // first sample beyond 40 is 41, carrying (41 - 10) * 1
        assert!(approx_eq(diagram.critical_points.get(40.0).unwrap(), 31.0));
        assert_eq!(diagram.critical_points.get(10.0), Some(0.0));
        assert!(!diagram.critical_points.contains(90.0));
        assert!(approx_eq(moment_at(&diagram, 100.0), 90.0 + 60.0));
    }

    #[test]
    fn test_coincident_loads_overwrite_annotation() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(20.0, 2.0))
                .with_point_load(PointLoad::new(20.0, 3.0))
                .with_point_load(PointLoad::new(60.0, 1.0)),
        )
        .unwrap();

        // second load at 20 snapshots after the first ramp: (21 - 20) * 2
        assert_eq!(diagram.critical_points.len(), 1);
        assert!(approx_eq(diagram.critical_points.get(20.0).unwrap(), 2.0));
        assert!(approx_eq(moment_at(&diagram, 50.0), 30.0 * 5.0));
    }

    #[test]
    fn test_coincident_loads_skip_last_entered() {
        let first_small = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(30.0, 1.0))
                .with_point_load(PointLoad::new(30.0, 5.0)),
        )
        .unwrap();
        assert!(approx_eq(moment_at(&first_small, 40.0), 10.0));

        let first_large = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(30.0, 5.0))
                .with_point_load(PointLoad::new(30.0, 1.0)),
        )
        .unwrap();
        assert!(approx_eq(moment_at(&first_large, 40.0), 50.0));
    }

    #[test]
    fn test_signed_zero_positions_keep_entry_order() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(0.0, 1.0))
                .with_point_load(PointLoad::new(-0.0, 5.0)),
        )
        .unwrap();
        assert!(approx_eq(moment_at(&diagram, 10.0), 10.0));
        assert!(diagram.critical_points.is_empty());
    }

    #[test]
    fn test_load_at_origin_not_annotated() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(0.0, 1.5))
                .with_point_load(PointLoad::new(50.0, 1.0)),
        )
        .unwrap();

        assert!(diagram.critical_points.is_empty());
        assert_eq!(moment_at(&diagram, 0.0), 0.0);
        assert!(approx_eq(moment_at(&diagram, 10.0), 15.0));
    }

    #[test]
    fn test_single_applied_moment_step() {
        let diagram = calculate(&unit_grid().with_applied_moment(AppliedMoment::new(30.0, 5.0))).unwrap();

        for &(x, m) in &diagram.samples {
            if x < 30.0 {
                assert_eq!(m, 0.0);
            } else {
                assert_eq!(m, 5.0);
            }
        }
        assert_eq!(moment_at(&diagram, 30.0), 5.0);
        assert!(diagram.critical_points.is_empty());
    }

    #[test]
    fn test_moment_shifts_annotations_to_its_right() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(10.0, 1.0))
                .with_point_load(PointLoad::new(40.0, 1.0))
                .with_point_load(PointLoad::new(90.0, 1.0))
                .with_applied_moment(AppliedMoment::new(25.0, 2.0)),
        )
        .unwrap();

        assert_eq!(diagram.critical_points.get(10.0), Some(0.0));
        assert!(approx_eq(diagram.critical_points.get(40.0).unwrap(), 33.0));
    }

    #[test]
    fn test_coincident_moment_same_sign_adds() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(10.0, 1.0))
                .with_point_load(PointLoad::new(40.0, 1.0))
                .with_point_load(PointLoad::new(90.0, 1.0))
                .with_applied_moment(AppliedMoment::new(40.0, 5.0)),
        )
        .unwrap();

        assert!(approx_eq(diagram.critical_points.get(40.0).unwrap(), 36.0));
        assert!(approx_eq(moment_at(&diagram, 40.0), 30.0 + 5.0));
    }

    #[test]
    fn test_coincident_moment_opposite_sign_ignored() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(10.0, 1.0))
                .with_point_load(PointLoad::new(40.0, 1.0))
                .with_point_load(PointLoad::new(90.0, 1.0))
                .with_applied_moment(AppliedMoment::new(40.0, -5.0)),
        )
        .unwrap();

        assert!(approx_eq(diagram.critical_points.get(40.0).unwrap(), 31.0));
        // the curve itself still steps
        assert!(approx_eq(moment_at(&diagram, 40.0), 30.0 - 5.0));
    }

    #[test]
    fn test_coincident_moment_zero_annotation_ignored() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(10.0, 1.0))
                .with_point_load(PointLoad::new(90.0, 1.0))
                .with_applied_moment(AppliedMoment::new(10.0, 4.0)),
        )
        .unwrap();

        assert_eq!(diagram.critical_points.get(10.0), Some(0.0));
        assert_eq!(moment_at(&diagram, 10.0), 4.0);
    }

    #[test]
    fn test_include_all_policy() {
        let diagram = calculate(
            &unit_grid()
                .with_policy(LastLoadPolicy::IncludeAll)
                .with_point_load(PointLoad::new(40.0, 3.0)),
        )
        .unwrap();

        assert!(approx_eq(moment_at(&diagram, 50.0), 30.0));
        assert_eq!(diagram.critical_points.get(40.0), Some(0.0));
    }

    #[test]
    fn test_load_at_beam_end_contributes_nothing() {
        let diagram = calculate(
            &unit_grid()
                .with_policy(LastLoadPolicy::IncludeAll)
                .with_point_load(PointLoad::new(100.0, 3.0)),
        )
        .unwrap();

        assert!(diagram.moments().all(|m| m == 0.0));
        assert!(diagram.critical_points.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = MomentDiagramInput::new(217.0)
            .with_point_load(PointLoad::new(128.0, -0.6))
            .with_point_load(PointLoad::new(12.5, 1.1))
            .with_point_load(PointLoad::new(200.0, 0.4))
            .with_applied_moment(AppliedMoment::new(128.0, 3.0));

        let a = calculate(&input).unwrap();
        let b = calculate(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampling_monotonic() {
        let diagram = compute(&[], &[], 217.0, 7).unwrap();
        let positions: Vec<f64> = diagram.positions().collect();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0], 0.0);
        assert_eq!(positions[6], 217.0);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_sample_count() {
        let diagram = compute(&[], &[], 217.0, DEFAULT_SAMPLE_COUNT).unwrap();
        assert_eq!(diagram.len(), 5000);
        assert_eq!(diagram.samples.last().map(|s| s.0), Some(217.0));
    }

    #[test]
    fn test_invalid_domain() {
        let err = calculate(&MomentDiagramInput::new(0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN");

        let err = calculate(&MomentDiagramInput::new(10.0).with_sample_count(1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN");

        let err = calculate(&MomentDiagramInput::new(f64::INFINITY)).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_INPUT");
    }

    #[test]
    fn test_non_finite_load() {
        let err = calculate(&unit_grid().with_point_load(PointLoad::new(10.0, f64::NAN))).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_INPUT");

        let err = calculate(&unit_grid().with_applied_moment(AppliedMoment::new(f64::NAN, 1.0))).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_INPUT");
    }

    #[test]
    fn test_position_out_of_range() {
        let err = calculate(&unit_grid().with_applied_moment(AppliedMoment::new(120.0, 1.0))).unwrap_err();
        assert_eq!(err, CalcError::position_out_of_range("applied_moments[0]", 120.0, 100.0));
    }

    #[test]
    fn test_value_range_and_peak() {
        let diagram = calculate(
            &unit_grid()
                .with_point_load(PointLoad::new(50.0, -1.0))
                .with_point_load(PointLoad::new(60.0, 1.0))
                .with_applied_moment(AppliedMoment::new(10.0, 20.0)),
        )
        .unwrap();

        let (min, max) = diagram.value_range();
        assert!(approx_eq(max, 20.0));
        assert!(approx_eq(min, 20.0 - 50.0));
        assert_eq!(diagram.peak(), Some((100.0, -30.0)));
    }

    #[test]
    fn test_critical_point_map() {
        let mut map = CriticalPointMap::new();
        map.insert(5.0, 1.0);
        map.insert(2.0, 3.0);
        map.insert(5.0, 4.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(5.0), Some(4.0));
        assert_eq!(map.remove(2.0), Some(3.0));
        assert_eq!(map.remove(2.0), None);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[{"position":5.0,"moment":4.0}]"#);
    }
}
