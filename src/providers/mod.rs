//! Geocoding provider selection
//!
//! A control uses exactly one provider: a built-in one the plugin already
//! knows by name, or a custom one assembled from a service URL and
//! user-supplied function source. The choice is made once, when the control
//! is constructed.

pub mod builtin;
pub mod custom;

pub use builtin::BuiltinProvider;
pub use custom::CustomProvider;

use crate::{
    error::{GeocoderError, GeocoderResult},
    types::GeocoderOptions,
};
use std::collections::HashMap;

/// Common surface of both provider kinds
pub trait ProviderConfig {
    /// Validate the configuration
    fn validate(&self) -> GeocoderResult<()>;

    /// Key under which the provider factory is found in `L.Control.Geocoder`
    fn registry_key(&self, instance_name: &str) -> String;

    /// Provider configuration (for debugging/logging)
    fn config(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// The provider a control resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeProvider {
    Builtin(BuiltinProvider),
    Custom(CustomProvider),
}

impl GeocodeProvider {
    /// Pick the provider path; a service URL always selects the custom one.
    pub fn resolve(options: &GeocoderOptions) -> GeocoderResult<Self> {
        let provider = match &options.service_url {
            Some(service_url) => {
                let geocode_function = options.geocode_function.clone().ok_or_else(|| {
                    GeocoderError::MissingDependency(
                        "serviceUrl requires geocodeFunction for the custom provider".to_string(),
                    )
                })?;
                GeocodeProvider::Custom(CustomProvider::new(
                    service_url,
                    geocode_function,
                    options.results_handler_function.clone(),
                )?)
            }
            None => {
                if options.geocode_function.is_some() {
                    return Err(GeocoderError::MissingDependency(
                        "geocodeFunction is only used by a custom provider and requires serviceUrl"
                            .to_string(),
                    ));
                }
                if options.results_handler_function.is_some() {
                    return Err(GeocoderError::MissingDependency(
                        "resultsHandlerFunction is only used by a custom provider and requires serviceUrl"
                            .to_string(),
                    ));
                }
                GeocodeProvider::Builtin(BuiltinProvider::new(&options.geocode_provider)?)
            }
        };

        provider.validate()?;
        Ok(provider)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, GeocodeProvider::Custom(_))
    }
}

impl ProviderConfig for GeocodeProvider {
    fn validate(&self) -> GeocoderResult<()> {
        match self {
            GeocodeProvider::Builtin(p) => p.validate(),
            GeocodeProvider::Custom(p) => p.validate(),
        }
    }

    fn registry_key(&self, instance_name: &str) -> String {
        match self {
            GeocodeProvider::Builtin(p) => p.registry_key(instance_name),
            GeocodeProvider::Custom(p) => p.registry_key(instance_name),
        }
    }

    fn config(&self) -> HashMap<String, String> {
        match self {
            GeocodeProvider::Builtin(p) => p.config(),
            GeocodeProvider::Custom(p) => p.config(),
        }
    }
}
