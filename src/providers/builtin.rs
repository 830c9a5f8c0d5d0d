//! Providers shipped with leaflet-control-geocoder

use crate::{
    error::{GeocoderError, GeocoderResult},
    providers::ProviderConfig,
};
use std::collections::HashMap;

/// Factory names registered on `L.Control.Geocoder` by the 2.4.0 release
pub const KNOWN_PROVIDERS: &[&str] = &[
    "arcgis",
    "bing",
    "geocodeEarth",
    "google",
    "here",
    "latLng",
    "mapbox",
    "mapQuest",
    "neutrino",
    "nominatim",
    "openCage",
    "pelias",
    "photon",
    "what3words",
];

pub fn is_known(name: &str) -> bool {
    KNOWN_PROVIDERS.contains(&name)
}

/// Built-in provider addressed by its registry key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinProvider {
    name: String,
}

impl BuiltinProvider {
    pub fn new(name: &str) -> GeocoderResult<Self> {
        if name.trim().is_empty() {
            return Err(GeocoderError::InvalidOption(
                "geocodeProvider must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ProviderConfig for BuiltinProvider {
    fn validate(&self) -> GeocoderResult<()> {
        // The plugin registry is open-ended, so unknown keys may come from add-ons.
        if !is_known(&self.name) {
            log::warn!(
                "geocodeProvider '{}' is not a built-in leaflet-control-geocoder provider",
                self.name
            );
        }
        Ok(())
    }

    fn registry_key(&self, _instance_name: &str) -> String {
        self.name.clone()
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("provider".to_string(), self.name.clone());
        config
    }
}
