//! Configuration schema types for `gridfill.toml`
//!
//! Defines the structure and validation rules for gridfill configuration.
//! Every section and field is optional; missing values take the defaults
//! below.

use crate::canvas::Bounds;
use crate::color::parse_color;
use crate::fill::{Algorithm, Connectivity};
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Canvas extent and fill bounding-box settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Lowest cell `[x, y]` of the drawable canvas
    #[serde(default = "default_canvas_min")]
    pub min: [i32; 2],
    /// Highest cell `[x, y]` of the drawable canvas
    #[serde(default = "default_canvas_max")]
    pub max: [i32; 2],
    /// Cells added on every side of the vertex extent to bound seeded fills
    #[serde(default = "default_padding")]
    pub padding: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { min: default_canvas_min(), max: default_canvas_max(), padding: default_padding() }
    }
}

fn default_canvas_min() -> [i32; 2] {
    [-1000, -1000]
}

fn default_canvas_max() -> [i32; 2] {
    [1000, 1000]
}

fn default_padding() -> i32 {
    2
}

/// Reveal cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Milliseconds between reveal ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Cells painted per tick
    #[serde(default = "default_batch")]
    pub batch: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { interval_ms: default_interval_ms(), batch: default_batch() }
    }
}

fn default_interval_ms() -> u64 {
    5
}

fn default_batch() -> usize {
    1
}

/// Default fill behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub connectivity: Connectivity,
    /// Paint the seed cell with the seed tag when it is selected
    #[serde(default)]
    pub mark_seed: bool,
    /// Join the last vertex back to the first when drawing edges
    #[serde(default = "default_true")]
    pub close_polygon: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            connectivity: Connectivity::default(),
            mark_seed: false,
            close_polygon: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Display colors, as CSS color strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_boundary")]
    pub boundary: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_seed")]
    pub seed: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            boundary: default_boundary(),
            fill: default_fill(),
            seed: default_seed(),
        }
    }
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_boundary() -> String {
    "#0000FF".to_string()
}

fn default_fill() -> String {
    "#00FF00".to_string()
}

fn default_seed() -> String {
    "#0000FF".to_string()
}

/// Complete gridfill.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridfillConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "canvas.max")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gridfill.toml: '{}' {}", self.field, self.message)
    }
}

impl GridfillConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (axis, name) in [(0, "x"), (1, "y")] {
            if self.canvas.min[axis] > self.canvas.max[axis] {
                errors.push(ConfigValidationError {
                    field: "canvas.min".to_string(),
                    message: format!("{} must not exceed canvas.max", name),
                });
            }
        }

        if self.canvas.padding < 0 {
            errors.push(ConfigValidationError {
                field: "canvas.padding".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if self.animation.interval_ms == 0 {
            errors.push(ConfigValidationError {
                field: "animation.interval_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.animation.batch == 0 {
            errors.push(ConfigValidationError {
                field: "animation.batch".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        for (field, value) in [
            ("palette.background", &self.palette.background),
            ("palette.boundary", &self.palette.boundary),
            ("palette.fill", &self.palette.fill),
            ("palette.seed", &self.palette.seed),
        ] {
            if let Err(e) = parse_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("is not a valid color: {}", e),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The canvas extent as cell bounds
    pub fn canvas_extent(&self) -> Bounds {
        let [min_x, min_y] = self.canvas.min;
        let [max_x, max_y] = self.canvas.max;
        Bounds::new(min_x, min_y, max_x, max_y)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.animation.interval_ms)
    }

    /// Resolved display palette, falling back to the defaults for any
    /// entry that does not parse.
    pub fn palette(&self) -> Palette {
        Palette::from_config(&self.palette).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: GridfillConfig = toml::from_str("").unwrap();
        assert_eq!(config.canvas.min, [-1000, -1000]);
        assert_eq!(config.canvas.max, [1000, 1000]);
        assert_eq!(config.canvas.padding, 2);
        assert_eq!(config.animation.interval_ms, 5);
        assert_eq!(config.animation.batch, 1);
        assert_eq!(config.fill.algorithm, Algorithm::Flood);
        assert_eq!(config.fill.connectivity, Connectivity::Four);
        assert!(!config.fill.mark_seed);
        assert!(config.fill.close_polygon);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r##"
[canvas]
min = [-50, -40]
max = [50, 40]
padding = 3

[animation]
interval_ms = 20
batch = 8

[fill]
algorithm = "scanline"
connectivity = "eight"
mark_seed = true
close_polygon = false

[palette]
boundary = "red"
fill = "#FFFF00"
"##;
        let config: GridfillConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.canvas_extent(), Bounds::new(-50, -40, 50, 40));
        assert_eq!(config.canvas.padding, 3);
        assert_eq!(config.interval(), Duration::from_millis(20));
        assert_eq!(config.animation.batch, 8);
        assert_eq!(config.fill.algorithm, Algorithm::Scanline);
        assert_eq!(config.fill.connectivity, Connectivity::Eight);
        assert!(config.fill.mark_seed);
        assert!(!config.fill.close_polygon);
        assert_eq!(config.palette.seed, "#0000FF");
        assert_eq!(config.palette().boundary, image::Rgba([255, 0, 0, 255]));
        assert!(config.is_valid());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result: Result<GridfillConfig, _> = toml::from_str("[fill]\nalgorithm = \"spray\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_inverted_canvas() {
        let toml = r#"
[canvas]
min = [10, 0]
max = [0, 10]
"#;
        let config: GridfillConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "canvas.min");
    }

    #[test]
    fn test_validation_zero_batch_and_interval() {
        let toml = r#"
[animation]
interval_ms = 0
batch = 0
"#;
        let config: GridfillConfig = toml::from_str(toml).unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "animation.interval_ms"));
        assert!(errors.iter().any(|e| e.field == "animation.batch"));
    }

    #[test]
    fn test_validation_bad_color() {
        let config: GridfillConfig = toml::from_str("[palette]\nfill = \"#12\"").unwrap();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "palette.fill"));
        assert!(errors[0].to_string().starts_with("gridfill.toml: 'palette.fill'"));
    }

    #[test]
    fn test_validation_negative_padding() {
        let config: GridfillConfig = toml::from_str("[canvas]\npadding = -1").unwrap();
        assert!(config.validate().iter().any(|e| e.field == "canvas.padding"));
    }
}
