/// Strip parameters, slider ranges and textual parameter changes
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, space0},
    combinator::{all_consuming, value},
    number::complete::double,
    sequence::{delimited, separated_pair},
    IResult,
};
use std::fmt;
use std::str::FromStr;

use crate::error::ParamError;

/// Geometry parameters of the strip.
///
/// No range checks happen here; the shell keeps values inside the
/// ranges reported by [`ParamName::range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripParams {
    pub radius: f64,
    pub twist: f64,
    pub u_steps: u32,
    pub v_steps: u32,
}

impl Default for StripParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            twist: 0.5,
            u_steps: 10,
            v_steps: 5,
        }
    }
}

impl StripParams {
    pub fn get(&self, name: ParamName) -> f64 {
        match name {
            ParamName::Radius => self.radius,
            ParamName::Twist => self.twist,
            ParamName::USteps => f64::from(self.u_steps),
            ParamName::VSteps => f64::from(self.v_steps),
        }
    }

    /// Store `raw` under `name`, truncating step counts toward zero.
    pub fn set(&mut self, name: ParamName, raw: f64) -> Result<(), ParamError> {
        match name {
            ParamName::Radius => self.radius = raw,
            ParamName::Twist => self.twist = raw,
            ParamName::USteps => self.u_steps = coerce_steps(name, raw)?,
            ParamName::VSteps => self.v_steps = coerce_steps(name, raw)?,
        }
        Ok(())
    }
}

fn coerce_steps(name: ParamName, raw: f64) -> Result<u32, ParamError> {
    let truncated = raw.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated > f64::from(u32::MAX) {
        return Err(ParamError::InvalidSteps { name, value: raw });
    }
    Ok(truncated as u32)
}

/// The four user-adjustable parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    Radius,
    Twist,
    USteps,
    VSteps,
}

impl ParamName {
    pub const ALL: [ParamName; 4] = [
        ParamName::Radius,
        ParamName::Twist,
        ParamName::USteps,
        ParamName::VSteps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamName::Radius => "radius",
            ParamName::Twist => "twist",
            ParamName::USteps => "u_steps",
            ParamName::VSteps => "v_steps",
        }
    }

    /// Human-readable slider label
    pub fn label(self) -> &'static str {
        match self {
            ParamName::Radius => "Radius",
            ParamName::Twist => "Twist",
            ParamName::USteps => "Length detail",
            ParamName::VSteps => "Width detail",
        }
    }

    /// Suggested slider range for the shell
    pub fn range(self) -> ParamRange {
        match self {
            ParamName::Radius => ParamRange::new(1.0, 3.0, 0.1),
            ParamName::Twist => ParamRange::new(0.5, 2.0, 0.1),
            ParamName::USteps => ParamRange::new(10.0, 100.0, 10.0),
            ParamName::VSteps => ParamRange::new(5.0, 30.0, 1.0),
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match all_consuming(param_name)(s.trim()) {
            Ok((_, name)) => Ok(name),
            Err(_) => Err(ParamError::UnknownParameter(s.to_string())),
        }
    }
}

/// Slider bounds: values snap to `min + k * step` and stay in `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Snap to the slider grid, then move `ticks` steps and clamp.
    pub fn nudge(&self, value: f64, ticks: i32) -> f64 {
        let index = ((value - self.min) / self.step).round() + f64::from(ticks);
        let snapped = self.min + index * self.step;
        // keep 0.1-style steps from drifting to 1.2000000000000002
        let rounded = (snapped * 1e9).round() / 1e9;
        self.clamp(rounded)
    }
}

/// A parsed `name=value` change, e.g. `radius=2.5` or `uSteps = 40`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub name: ParamName,
    pub value: f64,
}

impl ParamChange {
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        match all_consuming(delimited(space0, param_change, space0))(input) {
            Ok((_, change)) => Ok(change),
            Err(e) => Err(ParamError::Syntax {
                input: input.to_string(),
                reason: format!("{:?}", e),
            }),
        }
    }
}

impl FromStr for ParamChange {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn param_change(input: &str) -> IResult<&str, ParamChange> {
    let (input, (name, value)) =
        separated_pair(param_name, delimited(space0, char('='), space0), double)(input)?;
    Ok((input, ParamChange { name, value }))
}

fn param_name(input: &str) -> IResult<&str, ParamName> {
    alt((
        value(ParamName::Radius, tag("radius")),
        value(ParamName::Twist, tag("twist")),
        value(ParamName::USteps, alt((tag("u_steps"), tag("uSteps")))),
        value(ParamName::VSteps, alt((tag("v_steps"), tag("vSteps")))),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_load() {
        let params = StripParams::default();
        assert_eq!(params.radius, 1.0);
        assert_eq!(params.twist, 0.5);
        assert_eq!(params.u_steps, 10);
        assert_eq!(params.v_steps, 5);
    }

    #[test]
    fn test_steps_truncate_like_slider_values() {
        let mut params = StripParams::default();
        params.set(ParamName::USteps, 40.0).unwrap();
        params.set(ParamName::VSteps, 7.9).unwrap();
        assert_eq!(params.u_steps, 40);
        assert_eq!(params.v_steps, 7);
    }

    #[test]
    fn test_invalid_steps_rejected() {
        let mut params = StripParams::default();
        assert!(params.set(ParamName::USteps, -1.0).is_err());
        assert!(params.set(ParamName::VSteps, f64::NAN).is_err());
        assert!(params.set(ParamName::VSteps, 1e12).is_err());
        assert_eq!(params, StripParams::default());
    }

    #[test]
    fn test_float_params_are_not_range_checked() {
        let mut params = StripParams::default();
        params.set(ParamName::Radius, 12.0).unwrap();
        params.set(ParamName::Twist, -3.0).unwrap();
        assert_eq!(params.radius, 12.0);
        assert_eq!(params.twist, -3.0);
    }

    #[test]
    fn test_parse_change() {
        let change = ParamChange::parse("radius=2.5").unwrap();
        assert_eq!(change.name, ParamName::Radius);
        assert_eq!(change.value, 2.5);

        let change: ParamChange = " uSteps = 40 ".parse().unwrap();
        assert_eq!(change.name, ParamName::USteps);
        assert_eq!(change.value, 40.0);

        let change = ParamChange::parse("v_steps=12.0").unwrap();
        assert_eq!(change.name, ParamName::VSteps);
    }

    #[test]
    fn test_parse_change_errors() {
        assert!(ParamChange::parse("radius").is_err());
        assert!(ParamChange::parse("colour=1").is_err());
        assert!(ParamChange::parse("twist=abc").is_err());
        assert!(ParamChange::parse("twist=1.0 extra").is_err());
    }

    #[test]
    fn test_name_round_trip() {
        for name in ParamName::ALL {
            assert_eq!(name.as_str().parse::<ParamName>().unwrap(), name);
        }
        assert!("depth".parse::<ParamName>().is_err());
    }

    #[test]
    fn test_nudge_snaps_and_clamps() {
        let range = ParamName::Radius.range();
        assert!((range.nudge(1.0, 2) - 1.2).abs() < 1e-12);
        assert_eq!(range.nudge(2.95, 5), 3.0);
        assert_eq!(range.nudge(1.0, -1), 1.0);

        let u_range = ParamName::USteps.range();
        assert_eq!(u_range.nudge(10.0, 1), 20.0);
        assert_eq!(u_range.nudge(100.0, 1), 100.0);
    }
}
