//! Pipeline configuration.
use serde::de::Error;

/// Station pipeline configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reject loaded station records outside the WGS84 lon/lat ranges
    #[serde(default = "Config::default_validate_coordinates")]
    pub validate_coordinates: bool,

    /// Voronoi overlay settings
    #[serde(default)]
    pub voronoi: VoronoiConfig,
}

/// Settings for Voronoi overlay generation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoronoiConfig {
    /// Margin added around the station extent when the clip bounds are
    /// derived from the stations, relative to the extent's width/height
    #[serde(default = "VoronoiConfig::default_padding_ratio")]
    pub padding_ratio: f64,
}

impl VoronoiConfig {
    const fn default_padding_ratio() -> f64 {
        0.0
    }
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            padding_ratio: Self::default_padding_ratio(),
        }
    }
}

impl Config {
    const fn default_validate_coordinates() -> bool {
        true
    }

    pub fn with_validate_coordinates(mut self, validate: bool) -> Self {
        self.validate_coordinates = validate;
        self
    }

    pub fn with_padding_ratio(mut self, ratio: f64) -> Self {
        assert!(
            ratio.is_finite() && ratio >= 0.0,
            "Padding ratio must be finite and non-negative"
        );

        if ratio > 1.0 {
            log::warn!(
                "Voronoi padding ratio of {} is larger than the station extent itself",
                ratio
            );
        }

        self.voronoi.padding_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let ratio = self.voronoi.padding_ratio;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(format!(
                "Voronoi padding ratio must be finite and non-negative, got {}",
                ratio
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_coordinates: Self::default_validate_coordinates(),
            voronoi: VoronoiConfig::default(),
        }
    }
}
