//! User-defined provider backed by a service URL and function source

use crate::{
    error::{GeocoderError, GeocoderResult},
    providers::ProviderConfig,
    types::ScriptSource,
};
use std::collections::HashMap;
use url::Url;

/// Prefix of the factory key a custom provider is registered under
pub const REGISTRY_PREFIX: &str = "custom_";
/// Prefix of the class key a custom provider is registered under
pub const CLASS_PREFIX: &str = "Custom_";

#[derive(Debug, Clone, PartialEq)]
pub struct CustomProvider {
    service_url: String,
    geocode_function: ScriptSource,
    results_handler: Option<ScriptSource>,
}

impl CustomProvider {
    pub fn new(
        service_url: &str,
        geocode_function: ScriptSource,
        results_handler: Option<ScriptSource>,
    ) -> GeocoderResult<Self> {
        if service_url.trim().is_empty() {
            return Err(GeocoderError::InvalidOption(
                "serviceUrl must not be empty".to_string(),
            ));
        }

        // Relative endpoints resolve against the page, so only absolute ones are checked.
        if service_url.contains("://") {
            if let Err(err) = Url::parse(service_url) {
                log::warn!("serviceUrl '{service_url}' does not parse as a URL: {err}");
            }
        }

        Ok(Self {
            service_url: service_url.to_string(),
            geocode_function,
            results_handler,
        })
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn geocode_function(&self) -> &ScriptSource {
        &self.geocode_function
    }

    pub fn results_handler(&self) -> Option<&ScriptSource> {
        self.results_handler.as_ref()
    }

    /// Key of the provider class, next to the factory key
    pub fn class_key(&self, instance_name: &str) -> String {
        format!("{CLASS_PREFIX}{instance_name}")
    }
}

impl ProviderConfig for CustomProvider {
    fn validate(&self) -> GeocoderResult<()> {
        if self.geocode_function.as_str().trim().is_empty() {
            return Err(GeocoderError::MissingDependency(
                "geocodeFunction must not be empty for a custom provider".to_string(),
            ));
        }
        Ok(())
    }

    fn registry_key(&self, instance_name: &str) -> String {
        format!("{REGISTRY_PREFIX}{instance_name}")
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("service_url".to_string(), self.service_url.clone());
        config.insert(
            "results_handler".to_string(),
            self.results_handler.is_some().to_string(),
        );
        config
    }
}
