//! Parsing of `POS,DIR,MAG` load triples

use moment_core::loads::{Direction, LoadSession};
use moment_core::CalcResult;

/// A load as typed by the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSpec<D> {
    pub position: f64,
    pub direction: D,
    pub magnitude: f64,
}

/// Parse from already split fields: position, direction, magnitude
pub fn parse_fields<D: Direction>(fields: &[&str]) -> Result<LoadSpec<D>, String> {
    let [position, direction, magnitude] = fields else {
        return Err(format!("expected POS,DIR,MAG but got {} field(s)", fields.len()));
    };
    let position = position
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("position '{}': {}", position.trim(), e))?;
    let direction = direction.parse::<D>().map_err(|e| e.to_string())?;
    let magnitude = magnitude
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("magnitude '{}': {}", magnitude.trim(), e))?;
    Ok(LoadSpec {
        position,
        direction,
        magnitude,
    })
}

/// clap value parser for `POS,DIR,MAG`
pub fn parse_load_spec<D: Direction>(s: &str) -> Result<LoadSpec<D>, String> {
    let fields: Vec<&str> = s.split(',').collect();
    parse_fields(&fields)
}

pub trait AddToSession {
    fn add_to(&self, session: &mut LoadSession) -> CalcResult<()>;
}

impl AddToSession for LoadSpec<moment_core::loads::ForceDirection> {
    fn add_to(&self, session: &mut LoadSession) -> CalcResult<()> {
        session.add_force(self.position, self.direction, self.magnitude).map(|_| ())
    }
}

impl AddToSession for LoadSpec<moment_core::loads::MomentDirection> {
    fn add_to(&self, session: &mut LoadSession) -> CalcResult<()> {
        session.add_moment(self.position, self.direction, self.magnitude).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moment_core::loads::{ForceDirection, MomentDirection};

    #[test]
    fn test_parse_force() {
        let spec: LoadSpec<ForceDirection> = parse_load_spec("12.5, down, 300").unwrap();
        assert_eq!(
            spec,
            LoadSpec {
                position: 12.5,
                direction: ForceDirection::Down,
                magnitude: 300.0
            }
        );
    }

    #[test]
    fn test_parse_moment_chinese_label() {
        let spec: LoadSpec<MomentDirection> = parse_load_spec("60,顺时针,5000").unwrap();
        assert_eq!(spec.direction, MomentDirection::Clockwise);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_load_spec::<ForceDirection>("12,down").is_err());
        assert!(parse_load_spec::<ForceDirection>("x,down,3").is_err());
        assert!(parse_load_spec::<ForceDirection>("1,down,y").is_err());
        assert!(parse_load_spec::<MomentDirection>("1,down,3").is_err());
    }

    #[test]
    fn test_add_to_session() {
        let mut session = LoadSession::new();
        parse_load_spec::<ForceDirection>("10,up,5").unwrap().add_to(&mut session).unwrap();
        parse_load_spec::<MomentDirection>("20,ccw,5").unwrap().add_to(&mut session).unwrap();
        assert_eq!(session.forces().len(), 1);
        assert_eq!(session.moments().len(), 1);

        let bad: LoadSpec<ForceDirection> = parse_load_spec("10,up,-5").unwrap();
        assert!(bad.add_to(&mut session).is_err());
    }
}
