//! World configuration, loadable from YAML. Every field has a default, so a
//! config file only needs to list what it changes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How wall-clock frame time is turned into simulation ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Accumulate frame time and run every whole tick it covers.
    #[default]
    FixedStep,
    /// At most one tick per frame, once a full tick interval has elapsed.
    FrameCoupled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Simulation ticks per second.
    pub fps: f64,
    pub pacing: Pacing,
    /// Upper bound on ticks run for a single frame in fixed-step pacing.
    pub max_ticks_per_frame: u32,
    /// Subtracted from every object's vertical energy each tick.
    pub gravity: f32,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub cubes: CubeGridConfig,
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            pacing: Pacing::FixedStep,
            max_ticks_per_frame: 5,
            gravity: 0.02,
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            cubes: CubeGridConfig::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Vec3,
    /// Energy added per tick while a movement key is held.
    pub speed: f32,
    /// Yaw change in radians per tick while a rotate key is held.
    pub turn_rate: f32,
    /// Radians of yaw/pitch per pixel of pointer motion.
    pub look_sensitivity: f32,
    /// Distance of the third-person camera behind the player.
    pub camera_distance: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            speed: 0.01,
            turn_rate: 0.05,
            look_sensitivity: 0.01,
            camera_distance: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub muzzle_speed: f32,
    /// Spawn distance in front of the player along its facing direction.
    pub muzzle_offset: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            muzzle_speed: 3.0,
            muzzle_offset: 0.7,
        }
    }
}

/// Grid of cubes placed at world start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeGridConfig {
    pub rows: u32,
    pub columns: u32,
    pub spacing: f32,
    /// Position of the cube in row 0, column 0.
    pub origin: Vec3,
    /// Uniform scale; the collision radius is half the scaled cube diagonal.
    pub scale: f32,
}

impl Default for CubeGridConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 7,
            spacing: 1.0,
            origin: Vec3::new(-3.0, 0.0, -6.0),
            scale: 0.3,
        }
    }
}

impl CubeGridConfig {
    pub fn count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

/// Source of the static collision surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainConfig {
    None,
    HeightField(HeightFieldConfig),
    Triangles { triangles: Vec<TriangleConfig> },
}

impl Default for TerrainConfig {
    /// A 50×50 grass plane at `y = 0`.
    fn default() -> Self {
        let grass = Some("grass".to_string());
        Self::Triangles {
            triangles: vec![
                TriangleConfig {
                    vertices: [
                        Vec3::new(25.0, 0.0, -25.0),
                        Vec3::new(-25.0, 0.0, -25.0),
                        Vec3::new(25.0, 0.0, 25.0),
                    ],
                    uvs: [Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)],
                    texture: grass.clone(),
                },
                TriangleConfig {
                    vertices: [
                        Vec3::new(-25.0, 0.0, -25.0),
                        Vec3::new(-25.0, 0.0, 25.0),
                        Vec3::new(25.0, 0.0, 25.0),
                    ],
                    uvs: [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
                    texture: grass,
                },
            ],
        }
    }
}

/// Terrain built from a grayscale height-field image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightFieldConfig {
    pub path: PathBuf,
    #[serde(default = "HeightFieldConfig::default_center")]
    pub center: Vec3,
    #[serde(default = "HeightFieldConfig::default_size")]
    pub size: Vec3,
    #[serde(default = "HeightFieldConfig::default_max_uv")]
    pub max_uv: Vec2,
    #[serde(default)]
    pub texture: Option<String>,
}

impl HeightFieldConfig {
    fn default_center() -> Vec3 {
        Vec3::new(0.0, -5.0, 0.0)
    }

    fn default_size() -> Vec3 {
        Vec3::new(200.0, 20.0, 200.0)
    }

    fn default_max_uv() -> Vec2 {
        Vec2::new(10.0, 10.0)
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            center: Self::default_center(),
            size: Self::default_size(),
            max_uv: Self::default_max_uv(),
            texture: Some("grass".to_string()),
        }
    }
}

/// One explicitly placed terrain triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleConfig {
    pub vertices: [Vec3; 3],
    #[serde(default = "TriangleConfig::default_uvs")]
    pub uvs: [Vec2; 3],
    #[serde(default)]
    pub texture: Option<String>,
}

impl TriangleConfig {
    fn default_uvs() -> [Vec2; 3] {
        [Vec2::ZERO, Vec2::X, Vec2::ONE]
    }
}

impl WorldConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded world config");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "max_ticks_per_frame must be at least 1".into(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        if !(self.cubes.scale.is_finite() && self.cubes.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cube scale must be positive, got {}",
                self.cubes.scale
            )));
        }
        if !self.cubes.spacing.is_finite() || !self.cubes.origin.is_finite() {
            return Err(ConfigError::Invalid(
                "cube spacing and origin must be finite".into(),
            ));
        }
        if !(self.bullet.muzzle_speed.is_finite() && self.bullet.muzzle_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "muzzle_speed must be non-negative, got {}",
                self.bullet.muzzle_speed
            )));
        }
        let player = &self.player;
        if !(player.start.is_finite()
            && player.speed.is_finite()
            && player.turn_rate.is_finite()
            && player.look_sensitivity.is_finite()
            && player.camera_distance.is_finite())
        {
            return Err(ConfigError::Invalid("player settings must be finite".into()));
        }
        if let TerrainConfig::HeightField(field) = &self.terrain {
            if !field.size.cmpgt(Vec3::ZERO).all() {
                return Err(ConfigError::Invalid(format!(
                    "height field size must be positive on every axis, got {}",
                    field.size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        WorldConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = WorldConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
fps: 30
pacing: frame_coupled
gravity: 0.0
cubes:
  rows: 2
  columns: 3
terrain:
  kind: none
"#;
        let config = WorldConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.pacing, Pacing::FrameCoupled);
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.cubes.count(), 6);
        assert_eq!(config.cubes.scale, 0.3);
        assert_eq!(config.terrain, TerrainConfig::None);
    }

    #[test]
    fn height_field_terrain_parses_with_defaults() {
        let yaml = r#"
terrain:
  kind: height_field
  path: resources/heightmap.png
  texture: grass
"#;
        let config = WorldConfig::from_yaml_str(yaml).unwrap();
        let TerrainConfig::HeightField(field) = config.terrain else {
            panic!("expected height field terrain");
        };
        assert_eq!(field.path, PathBuf::from("resources/heightmap.png"));
        assert_eq!(field.center, Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(field.size, Vec3::new(200.0, 20.0, 200.0));
    }

    #[test]
    fn explicit_triangles_parse() {
        let yaml = r#"
terrain:
  kind: triangles
  triangles:
    - vertices: [[0, 0, 0], [0, 0, 1], [1, 0, 1]]
      texture: wood
"#;
        let config = WorldConfig::from_yaml_str(yaml).unwrap();
        let TerrainConfig::Triangles { triangles } = config.terrain else {
            panic!("expected explicit triangles");
        };
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].texture.as_deref(), Some("wood"));
    }

    #[test]
    fn yaml_round_trip() {
        let config = WorldConfig::default();
        let text = config.to_yaml_string().unwrap();
        assert_eq!(WorldConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_non_positive_fps() {
        let err = WorldConfig::from_yaml_str("fps: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_cube_scale() {
        let err = WorldConfig::from_yaml_str("cubes: { scale: 0 }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_pacing() {
        let err = WorldConfig::from_yaml_str("pacing: sometimes").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gravity: 0.5").unwrap();
        let config = WorldConfig::load(file.path()).unwrap();
        assert_eq!(config.gravity, 0.5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WorldConfig::load("/nonexistent/cubefire.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
