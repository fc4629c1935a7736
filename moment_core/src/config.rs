//! # Configuration
//!
//! Diagram settings read from a TOML file. Every field has a default, so a
//! file only needs the values it changes:
//!
//! ```toml
//! beam_length = 300.0
//! policy = "include-all"
//!
//! [units]
//! length = "millimeter"
//! force = "kilonewton"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::moment_diagram::{LastLoadPolicy, MomentDiagramInput, DEFAULT_SAMPLE_COUNT};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{LoadSession, SignConvention};
use crate::plot::PlotOptions;
use crate::units::UnitConvention;

/// Shaft length of the reference setup (128 + 89 mm)
pub const DEFAULT_BEAM_LENGTH: f64 = 217.0;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Beam length in the configured length unit
    pub beam_length: f64,
    pub sample_count: usize,
    pub policy: LastLoadPolicy,
    pub units: UnitConvention,
    pub sign_convention: SignConvention,
    pub plot: PlotOptions,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            beam_length: DEFAULT_BEAM_LENGTH,
            sample_count: DEFAULT_SAMPLE_COUNT,
            policy: LastLoadPolicy::default(),
            units: UnitConvention::default(),
            sign_convention: SignConvention::default(),
            plot: PlotOptions::default(),
        }
    }
}

impl DiagramConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> CalcResult<Self> {
        let cfg: DiagramConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> CalcResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let content = self.to_toml_string()?;
        fs::write(path, content)
            .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.beam_length.is_finite() && self.beam_length > 0.0) {
            return Err(CalcError::config_error(format!(
                "beam_length must be a positive number, got {}",
                self.beam_length
            )));
        }
        if self.sample_count < 2 {
            return Err(CalcError::config_error(format!(
                "sample_count must be at least 2, got {}",
                self.sample_count
            )));
        }
        Ok(())
    }

    /// Calculation input for the current session contents
    pub fn diagram_input(&self, session: &LoadSession) -> MomentDiagramInput {
        let (forces, moments) = session.snapshot(&self.sign_convention, self.units.magnitude_scale());
        MomentDiagramInput::new(self.beam_length)
            .with_sample_count(self.sample_count)
            .with_policy(self.policy)
            .with_point_loads(forces)
            .with_applied_moments(moments)
    }
}

/// Load the configuration at `path`, or defaults when no path is given or
/// the file does not exist.
pub fn load_or_default(path: Option<&Path>) -> CalcResult<DiagramConfig> {
    let Some(path) = path else {
        return Ok(DiagramConfig::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(DiagramConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let cfg = DiagramConfig::from_toml_str(&content)?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{ForceDirection, MomentDirection, Sign};
    use crate::units::{ForceUnit, LengthUnit};

    #[test]
    fn test_defaults() {
        let cfg = DiagramConfig::default();
        assert_eq!(cfg.beam_length, 217.0);
        assert_eq!(cfg.sample_count, 5000);
        assert_eq!(cfg.policy, LastLoadPolicy::SkipLast);
        assert_eq!(cfg.units.magnitude_scale(), 0.001);
    }

    #[test]
    fn test_partial_toml() {
        let cfg = DiagramConfig::from_toml_str(
            r#"
            beam_length = 300.0
            policy = "include-all"

            [units]
            length = "meter"
            force = "kilonewton"

            [sign_convention]
            up = "positive"
            down = "negative"
            clockwise = "negative"
            counter_clockwise = "positive"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.beam_length, 300.0);
        assert_eq!(cfg.sample_count, DEFAULT_SAMPLE_COUNT);
        assert_eq!(cfg.policy, LastLoadPolicy::IncludeAll);
        assert_eq!(cfg.units, UnitConvention::new(LengthUnit::Meter, ForceUnit::Kilonewton));
        assert_eq!(cfg.sign_convention.up, Sign::Positive);
    }

    #[test]
    fn test_toml_roundtrip() {
        let cfg = DiagramConfig::default();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(DiagramConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_config() {
        let err = DiagramConfig::from_toml_str("sample_count = 1").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        let err = DiagramConfig::from_toml_str("beam_length = \"long\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = load_or_default(Some(Path::new("does-not-exist/flexure.toml"))).unwrap();
        assert_eq!(cfg, DiagramConfig::default());
        assert_eq!(load_or_default(None).unwrap(), DiagramConfig::default());
    }

    #[test]
    fn test_diagram_input_from_session() {
        let cfg = DiagramConfig::default();
        let session = LoadSession::new()
            .with_force(100.0, ForceDirection::Up, 2000.0)
            .unwrap()
            .with_moment(50.0, MomentDirection::CounterClockwise, 1000.0)
            .unwrap();

        let input = cfg.diagram_input(&session);
        assert_eq!(input.beam_length, 217.0);
        assert_eq!(input.point_loads[0].magnitude, -2.0);
        assert_eq!(input.applied_moments[0].magnitude, 1.0);
    }
}
