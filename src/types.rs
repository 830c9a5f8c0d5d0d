//! Core types for the geocoder control builder

use crate::error::{GeocoderError, GeocoderResult};
use crate::utils::naming;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Default built-in provider registry key
pub const DEFAULT_PROVIDER: &str = "nominatim";

/// Corner of the map canvas the control is docked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::TopLeft => "topleft",
            Position::TopRight => "topright",
            Position::BottomLeft => "bottomleft",
            Position::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = GeocoderError;

    fn from_str(s: &str) -> GeocoderResult<Self> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                GeocoderError::InvalidOption(format!(
                    "position '{s}' is not one of topleft, topright, bottomleft, bottomright"
                ))
            })
    }
}

/// Debug options for control construction and rendering
#[derive(Debug, Clone, Default)]
pub struct DebugOptions {
    /// Enable verbose logging
    pub enabled: bool,
    /// Log the normalized options bag
    pub log_options: bool,
    /// Log the full rendered fragment
    pub log_fragment: bool,
}

/// Source text of a JavaScript function, carried verbatim into the fragment.
///
/// The text is never parsed or executed here; the page's script engine
/// evaluates it when the fragment runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptSource(String);

impl ScriptSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScriptSource {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for ScriptSource {
    fn from(source: String) -> Self {
        Self(source)
    }
}

/// Name of the JavaScript variable holding the parent map object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapHandle(String);

impl MapHandle {
    /// Wrap an existing map variable name, which must be a valid identifier
    pub fn new(name: &str) -> GeocoderResult<Self> {
        if !naming::is_js_identifier(name) {
            return Err(GeocoderError::InvalidOption(format!(
                "map handle '{name}' is not a valid JavaScript identifier"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Generate a fresh `map_<hex>` handle
    pub fn generate() -> Self {
        Self(naming::unique_name("map"))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative configuration of a geocoder control
#[derive(Debug, Clone)]
pub struct GeocoderOptions {
    /// Start with the search box collapsed
    pub collapsed: bool,
    /// Corner the control is docked to
    pub position: Position,
    /// Mark the selected result on the map (`defaultMarkGeocode`)
    pub add_marker: bool,
    /// Built-in provider registry key, ignored when `service_url` is set
    pub geocode_provider: String,
    /// Provider-specific parameters such as API keys
    pub geocode_provider_options: Option<Map<String, Value>>,
    /// Endpoint of a custom provider
    pub service_url: Option<String>,
    /// Lookup function of a custom provider
    pub geocode_function: Option<ScriptSource>,
    /// Function turning raw provider responses into `{name, center, bbox}` results
    pub results_handler_function: Option<ScriptSource>,
    /// Further plugin options passed through verbatim
    pub extra: Map<String, Value>,
    /// Debug options
    pub debug: Option<DebugOptions>,
}

impl Default for GeocoderOptions {
    fn default() -> Self {
        Self {
            collapsed: false,
            position: Position::TopRight,
            add_marker: true,
            geocode_provider: DEFAULT_PROVIDER.to_string(),
            geocode_provider_options: None,
            service_url: None,
            geocode_function: None,
            results_handler_function: None,
            extra: Map::new(),
            debug: None,
        }
    }
}

/// Kind of static resource a page must load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Script,
    Stylesheet,
}

/// Static resource the plugin depends on, declared once per page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: &'static str,
    pub url: &'static str,
    pub kind: AssetKind,
}
