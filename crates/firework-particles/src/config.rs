//! Simulation tuning constants, optionally loaded from TOML

use crate::fade::Easing;
use firework_core::{Color, FireworkError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-open float range `[min, max)`, written as `[min, max]` in TOML
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl From<[f32; 2]> for Range {
    fn from([min, max]: [f32; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Range> for [f32; 2] {
    fn from(r: Range) -> Self {
        [r.min, r.max]
    }
}

/// Half-open integer range `[min, max)`, written as `[min, max]` in TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl From<[usize; 2]> for CountRange {
    fn from([min, max]: [usize; 2]) -> Self {
        Self { min, max }
    }
}

impl From<CountRange> for [usize; 2] {
    fn from(r: CountRange) -> Self {
        [r.min, r.max]
    }
}

/// Every tunable of the simulation and trail overlay.
///
/// Velocities and accelerations are in pixels per tick; fade durations in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FireworkConfig {
    /// Pool size; also the hard cap on simultaneously active particles
    pub capacity: usize,
    /// Added to vy every tick
    pub gravity: f32,
    /// Multiplies vx and vy every tick
    pub friction: f32,
    /// A shell bursts once its vy is at or above this value
    pub apex_velocity: f32,

    pub shell_velocity_x: Range,
    pub shell_velocity_y: Range,
    pub shell_size: f32,
    pub shell_color: Color,
    pub shell_life: Range,
    /// Seconds of shell fade per unit of `life`
    pub shell_life_scale: f64,
    /// Alpha a shell fades down to while climbing
    pub shell_alpha_floor: f32,

    pub shrapnel_count: CountRange,
    pub shrapnel_speed: Range,
    pub shrapnel_size: Range,
    /// Seconds until a shrapnel piece is fully transparent and released
    pub shrapnel_fade: Range,

    pub fade_easing: Easing,
    /// Burst colors; one is picked per explosion
    pub palette: Vec<Color>,

    /// Color painted over the whole surface every frame
    pub trail_color: Color,
    /// Opacity of that overlay; lower means longer trails
    pub trail_alpha: f32,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            gravity: 0.05,
            friction: 0.98,
            apex_velocity: -1.0,
            shell_velocity_x: Range::new(-0.75, 0.75),
            shell_velocity_y: Range::new(-17.0, -7.0),
            shell_size: 2.0,
            shell_color: Color::WHITE,
            shell_life: Range::new(100.0, 150.0),
            shell_life_scale: 0.01,
            shell_alpha_floor: 0.8,
            shrapnel_count: CountRange::new(50, 100),
            shrapnel_speed: Range::new(2.0, 6.0),
            shrapnel_size: Range::new(1.0, 2.5),
            shrapnel_fade: Range::new(1.5, 2.5),
            fade_easing: Easing::QuadOut,
            palette: vec![
                Color::from_hex(0xff4081),
                Color::from_hex(0x40c4ff),
                Color::from_hex(0xffeb3b),
                Color::from_hex(0x69f0a6),
                Color::from_hex(0xe040fb),
                Color::from_hex(0xffffff),
            ],
            trail_color: Color::BLACK,
            trail_alpha: 0.1,
        }
    }
}

impl FireworkConfig {
    /// Parse and validate a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(FireworkError::InvalidConfig(
                "capacity must be at least 1".into(),
            ));
        }
        check_unit("friction", self.friction as f64, f64::MIN_POSITIVE, 1.0)?;
        check_unit("shell_alpha_floor", self.shell_alpha_floor as f64, 0.0, 1.0)?;
        check_unit("trail_alpha", self.trail_alpha as f64, 0.0, 1.0)?;

        for (name, range) in [
            ("shell_velocity_x", self.shell_velocity_x),
            ("shell_velocity_y", self.shell_velocity_y),
            ("shell_life", self.shell_life),
            ("shrapnel_speed", self.shrapnel_speed),
            ("shrapnel_size", self.shrapnel_size),
            ("shrapnel_fade", self.shrapnel_fade),
        ] {
            if !(range.min <= range.max) {
                return Err(FireworkError::InvalidConfig(format!(
                    "{name}: min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        if self.shrapnel_count.min > self.shrapnel_count.max {
            return Err(FireworkError::InvalidConfig(format!(
                "shrapnel_count: min {} exceeds max {}",
                self.shrapnel_count.min, self.shrapnel_count.max
            )));
        }
        if self.shrapnel_fade.min <= 0.0 {
            return Err(FireworkError::InvalidConfig(
                "shrapnel_fade must be positive".into(),
            ));
        }
        // Shell fade duration is life * scale, so both must be positive
        if !(self.shell_life.min > 0.0) || !(self.shell_life_scale > 0.0) {
            return Err(FireworkError::InvalidConfig(
                "shell_life and shell_life_scale must be positive".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(FireworkError::InvalidConfig(
                "palette needs at least one color".into(),
            ));
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(FireworkError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_sane() {
        let config = FireworkConfig::default();
        config.validate().unwrap();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.shrapnel_count, CountRange::new(50, 100));
    }

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let toml_str = r##"
capacity = 250
gravity = 0.1
shrapnel_count = [10, 20]
palette = ["#ff0000", "#00ff00"]
fade_easing = "linear"
"##;
        let config = FireworkConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.capacity, 250);
        assert!((config.gravity - 0.1).abs() < 1e-6);
        assert_eq!(config.shrapnel_count, CountRange::new(10, 20));
        assert_eq!(config.palette[1], Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(config.fade_easing, Easing::Linear);
        // untouched keys
        assert!((config.friction - 0.98).abs() < 1e-6);
        assert_eq!(config.shell_velocity_y, Range::new(-17.0, -7.0));
    }

    #[test]
    fn toml_integer_ranges_coerce() {
        let config = FireworkConfig::from_toml_str("shrapnel_speed = [1, 3]").unwrap();
        assert_eq!(config.shrapnel_speed, Range::new(1.0, 3.0));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = FireworkConfig::from_toml_str("gravityy = 1.0").unwrap_err();
        assert!(matches!(err, FireworkError::TomlParseError(_)));
    }

    #[test]
    fn rejects_bad_palette_color() {
        let err = FireworkConfig::from_toml_str("palette = [\"#12\"]").unwrap_err();
        assert!(matches!(err, FireworkError::TomlParseError(_)));
    }

    #[test]
    fn validation_failures() {
        let mut config = FireworkConfig::default();
        config.capacity = 0;
        assert!(matches!(config.validate(), Err(FireworkError::InvalidConfig(_))));

        let mut config = FireworkConfig::default();
        config.friction = 1.5;
        assert!(matches!(
            config.validate(),
            Err(FireworkError::ValueOutOfRange { .. })
        ));

        let mut config = FireworkConfig::default();
        config.shrapnel_speed = Range::new(6.0, 2.0);
        assert!(config.validate().is_err());

        let mut config = FireworkConfig::default();
        config.shrapnel_count = CountRange::new(10, 5);
        assert!(config.validate().is_err());

        let mut config = FireworkConfig::default();
        config.palette.clear();
        assert!(config.validate().is_err());

        let mut config = FireworkConfig::default();
        config.trail_alpha = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_length_shell_fade_is_rejected() {
        let err = FireworkConfig::from_toml_str("shell_life_scale = 0.0").unwrap_err();
        assert!(matches!(err, FireworkError::InvalidConfig(_)));

        let err = FireworkConfig::from_toml_str("shell_life = [0.0, 10.0]").unwrap_err();
        assert!(matches!(err, FireworkError::InvalidConfig(_)));

        let mut config = FireworkConfig::default();
        config.shrapnel_fade = Range::new(0.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = 64").unwrap();
        writeln!(file, "trail_alpha = 0.25").unwrap();

        let config = FireworkConfig::load(file.path()).unwrap();
        assert_eq!(config.capacity, 64);
        assert!((config.trail_alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = FireworkConfig::load("/nonexistent/firework.toml").unwrap_err();
        assert!(matches!(err, FireworkError::IoError(_)));
    }
}
