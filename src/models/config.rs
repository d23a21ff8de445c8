use crate::error::{ConfigError, ConvertError};
use quant::ColorPalette;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "QUANTPNG_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Named palettes; merged over the built-in ones
    #[serde(default)]
    pub palettes: HashMap<String, PaletteConfig>,

    /// Palette used when none is requested
    #[serde(default = "default_palette")]
    pub default_palette: Option<String>,
}

fn default_palette() -> Option<String> {
    Some("bw".to_string())
}

/// A palette as written in the config file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Hex colors, e.g. `"#ff0000"`; order defines the palette indices
    pub colors: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl PaletteConfig {
    fn builtin(description: &str, colors: &[&str]) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            description: Some(description.to_string()),
        }
    }
}

impl AppConfig {
    /// Parse YAML and merge its palettes over the built-in ones.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_yaml::from_str(content)?;
        let mut config = Self::default();
        config.palettes.extend(parsed.palettes);
        config.default_palette = parsed.default_palette;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            palettes = config.palettes.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// The config file to use: the explicit path, else `$QUANTPNG_CONFIG`.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load the resolved config file, or the built-ins if there is none.
    ///
    /// Errors reading or parsing an existing file are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`load`](Self::load) but falls back to the built-ins on error.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        match Self::load(explicit) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Name of the palette used when none is requested
    pub fn default_palette_name(&self) -> &str {
        self.default_palette.as_deref().unwrap_or("bw")
    }

    /// Palette names in sorted order
    pub fn palette_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.palettes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the named palette.
    pub fn palette(&self, name: &str) -> Result<ColorPalette, ConvertError> {
        let config = self
            .palettes
            .get(name)
            .ok_or_else(|| ConvertError::UnknownPalette(name.to_string()))?;
        Ok(ColorPalette::from_hex(&config.colors)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut palettes = HashMap::new();
        palettes.insert(
            "bw".to_string(),
            PaletteConfig::builtin("Black and white", &["#000000", "#ffffff"]),
        );
        palettes.insert(
            "grey4".to_string(),
            PaletteConfig::builtin(
                "Four grey levels",
                &["#000000", "#555555", "#aaaaaa", "#ffffff"],
            ),
        );
        palettes.insert(
            "rgb8".to_string(),
            PaletteConfig::builtin(
                "Corners of the RGB cube",
                &[
                    "#000000", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#00ffff", "#ff00ff",
                    "#ffffff",
                ],
            ),
        );

        Self {
            palettes,
            default_palette: default_palette(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant::Rgba64;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_palette, Some("bw".to_string()));
        assert_eq!(config.palette_names(), vec!["bw", "grey4", "rgb8"]);

        let bw = config.palette("bw").unwrap();
        assert_eq!(bw.colors(), &[Rgba64::BLACK, Rgba64::WHITE]);
        assert_eq!(config.palette("grey4").unwrap().len(), 4);
        assert_eq!(config.palette("rgb8").unwrap().len(), 8);
    }

    #[test]
    fn test_unknown_palette() {
        let config = AppConfig::default();
        let err = config.palette("sepia").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownPalette(name) if name == "sepia"));
    }

    #[test]
    fn test_invalid_palette_color() {
        let yaml = r##"
palettes:
  broken:
    colors: ["#000000", "#zzzzzz"]
"##;
        let config = AppConfig::from_yaml(yaml).unwrap();
        let err = config.palette("broken").unwrap_err();
        assert!(matches!(err, ConvertError::Palette(_)));
    }

    #[test]
    fn test_deserialize_merges_builtins() {
        let yaml = r##"
palettes:
  poster7:
    description: Seven-color panel
    colors:
      - "#000000"
      - "#ffffff"
      - "#00ff00"
      - "#0000ff"
      - "#ff0000"
      - "#ffff00"
      - "#ff8000"
  bw:
    colors: ["#ffffff", "#000000"]
default_palette: poster7
"##;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.default_palette_name(), "poster7");
        assert_eq!(config.palette_names(), vec!["bw", "grey4", "poster7", "rgb8"]);
        assert_eq!(config.palette("poster7").unwrap().len(), 7);
        assert_eq!(
            config.palettes["poster7"].description.as_deref(),
            Some("Seven-color panel")
        );
        // User entries replace built-ins of the same name
        assert_eq!(config.palette("bw").unwrap()[0], Rgba64::WHITE);
    }

    #[test]
    fn test_missing_default_palette_uses_bw() {
        let config = AppConfig::from_yaml("palettes: {}\n").unwrap();
        assert_eq!(config.default_palette, Some("bw".to_string()));

        let config = AppConfig::from_yaml("default_palette: null\n").unwrap();
        assert_eq!(config.default_palette_name(), "bw");
    }

    #[test]
    fn test_from_yaml_parse_error() {
        let err = AppConfig::from_yaml("palettes: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file(Path::new("/nonexistent/quantpng.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = Path::new("/tmp/explicit.yaml");
        assert_eq!(
            AppConfig::resolve_path(Some(explicit)),
            Some(PathBuf::from("/tmp/explicit.yaml"))
        );
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = AppConfig::load_or_default(Some(Path::new("/nonexistent/quantpng.yaml")));
        assert_eq!(config.palette_names(), vec!["bw", "grey4", "rgb8"]);
    }
}
