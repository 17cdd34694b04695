/// Viewer configuration file (`mobius.toml`)
use anyhow::{bail, Context, Result};
use mobius_core::render::DepthSort;
use mobius_core::{Camera, ParamChange, ParamName, StripParams};
use nalgebra::Point3;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_rotate_step() -> f64 {
    0.1
}

fn default_camera_distance() -> f64 {
    mobius_core::projection::DEFAULT_DISTANCE
}

fn default_light() -> [f64; 3] {
    [5.0, 5.0, 5.0]
}

/// Back-to-front ordering selectable from the CLI or config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Un-rotated centroid z
    #[default]
    Model,
    /// Centroid depth after the camera yaw
    View,
}

impl From<SortMode> for DepthSort {
    fn from(mode: SortMode) -> Self {
        match mode {
            SortMode::Model => DepthSort::ModelZ,
            SortMode::View => DepthSort::ViewSpace,
        }
    }
}

/// Values given on the command line; `None` falls back to the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub radius: Option<f64>,
    pub twist: Option<f64>,
    pub u_steps: Option<u32>,
    pub v_steps: Option<u32>,
    /// Applied in order after the individual flags
    pub set: Vec<ParamChange>,
    pub rotate_step: Option<f64>,
    pub depth_sort: Option<SortMode>,
}

/// Final startup settings after layering defaults, file and command line
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub params: StripParams,
    pub depth_sort: SortMode,
    pub rotate_step: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub twist: Option<f64>,
    #[serde(default)]
    pub u_steps: Option<u32>,
    #[serde(default)]
    pub v_steps: Option<u32>,
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f64,
    #[serde(default = "default_light")]
    pub light: [f64; 3],
    #[serde(default = "default_rotate_step")]
    pub rotate_step: f64,
    #[serde(default)]
    pub depth_sort: SortMode,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            radius: None,
            twist: None,
            u_steps: None,
            v_steps: None,
            camera_distance: default_camera_distance(),
            light: default_light(),
            rotate_step: default_rotate_step(),
            depth_sort: SortMode::default(),
        }
    }
}

impl FileConfig {
    /// Read an explicitly requested config file; a missing file is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// First readable config on the search path, if any
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            let Ok(contents) = std::fs::read_to_string(&path) else {
                continue;
            };
            match Self::parse(&contents) {
                Ok(config) => {
                    log::info!("loaded config from {:?}", path);
                    return Some(config);
                }
                Err(e) => log::warn!("Failed to parse config file {:?}: {:#}", path, e),
            }
        }
        None
    }

    /// File values layered over the built-in defaults
    pub fn strip_params(&self) -> StripParams {
        let defaults = StripParams::default();
        StripParams {
            radius: self.radius.unwrap_or(defaults.radius),
            twist: self.twist.unwrap_or(defaults.twist),
            u_steps: self.u_steps.unwrap_or(defaults.u_steps),
            v_steps: self.v_steps.unwrap_or(defaults.v_steps),
        }
    }

    /// Command line over file over defaults; `--set` changes land last
    pub fn resolve(&self, overrides: &Overrides) -> Result<Resolved> {
        let mut params = self.strip_params();
        let flags = [
            (ParamName::Radius, overrides.radius),
            (ParamName::Twist, overrides.twist),
            (ParamName::USteps, overrides.u_steps.map(f64::from)),
            (ParamName::VSteps, overrides.v_steps.map(f64::from)),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                params.set(name, value)?;
            }
        }
        for change in &overrides.set {
            params
                .set(change.name, change.value)
                .with_context(|| format!("Invalid --set {}={}", change.name, change.value))?;
        }

        Ok(Resolved {
            params,
            depth_sort: overrides.depth_sort.unwrap_or(self.depth_sort),
            rotate_step: overrides.rotate_step.unwrap_or(self.rotate_step),
        })
    }

    pub fn camera(&self) -> Camera {
        let [x, y, z] = self.light;
        Camera::new(self.camera_distance).with_light(Point3::new(x, y, z))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("mobius.toml"), PathBuf::from(".mobius.toml")];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mobius").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".mobius.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FileConfig::parse("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.strip_params(), StripParams::default());
        assert_eq!(config.camera(), Camera::default());
    }

    #[test]
    fn test_partial_config() {
        let config = FileConfig::parse(
            r#"
            radius = 2.5
            v_steps = 12
            light = [0.0, 4.0, -2.0]
            depth_sort = "view"
            "#,
        )
        .unwrap();

        let params = config.strip_params();
        assert_eq!(params.radius, 2.5);
        assert_eq!(params.twist, 0.5);
        assert_eq!(params.v_steps, 12);
        assert_eq!(config.camera().light_pos, Point3::new(0.0, 4.0, -2.0));
        assert_eq!(config.depth_sort, SortMode::View);
        assert_eq!(config.rotate_step, 0.1);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        assert!(FileConfig::parse("u_steps = -3").is_err());
        assert!(FileConfig::parse("depth_sort = \"sideways\"").is_err());
    }

    #[test]
    fn test_file_values_beat_defaults() {
        let config = FileConfig::parse("twist = 1.5\nrotate_step = 0.25").unwrap();
        let resolved = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(resolved.params.twist, 1.5);
        assert_eq!(resolved.params.radius, 1.0);
        assert_eq!(resolved.rotate_step, 0.25);
        assert_eq!(resolved.depth_sort, SortMode::Model);
    }

    #[test]
    fn test_command_line_beats_file() {
        let config = FileConfig::parse(
            r#"
            radius = 2.5
            u_steps = 30
            rotate_step = 0.25
            depth_sort = "view"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            radius: Some(1.8),
            u_steps: Some(60),
            rotate_step: Some(0.05),
            depth_sort: Some(SortMode::Model),
            ..Default::default()
        };

        let resolved = config.resolve(&overrides).unwrap();
        assert_eq!(resolved.params.radius, 1.8);
        assert_eq!(resolved.params.u_steps, 60);
        assert_eq!(resolved.params.v_steps, 5);
        assert_eq!(resolved.rotate_step, 0.05);
        assert_eq!(resolved.depth_sort, SortMode::Model);
    }

    #[test]
    fn test_set_changes_apply_after_flags() {
        let overrides = Overrides {
            radius: Some(2.0),
            u_steps: Some(20),
            set: vec![
                ParamChange::parse("radius=2.7").unwrap(),
                ParamChange::parse("u_steps=40").unwrap(),
                ParamChange::parse("u_steps=50").unwrap(),
            ],
            ..Default::default()
        };

        let resolved = FileConfig::default().resolve(&overrides).unwrap();
        assert_eq!(resolved.params.radius, 2.7);
        assert_eq!(resolved.params.u_steps, 50);
    }

    #[test]
    fn test_invalid_set_change_is_an_error() {
        let overrides = Overrides {
            set: vec![ParamChange::parse("u_steps=-1").unwrap()],
            ..Default::default()
        };

        let err = FileConfig::default().resolve(&overrides).unwrap_err();
        assert!(format!("{err:#}").contains("u_steps"));
    }

    #[test]
    fn test_missing_explicit_path() {
        assert!(FileConfig::from_path(Path::new("/nonexistent/mobius.toml")).is_err());
    }
}
