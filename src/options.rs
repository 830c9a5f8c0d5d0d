//! Normalization of [`GeocoderOptions`] into the plugin's options bag
//!
//! The bag is the JSON object handed to `L.Control.geocoder`. Named options
//! are written under the plugin's camelCase keys, absent values are left out,
//! provider options stay nested under `geocodeProviderOptions`, and extra
//! options are copied verbatim.

use crate::{
    error::{GeocoderError, GeocoderResult},
    providers::GeocodeProvider,
    types::GeocoderOptions,
};
use serde_json::{Map, Value};

/// Key/value options object serialized into the fragment
pub type OptionsBag = Map<String, Value>;

pub const COLLAPSED: &str = "collapsed";
pub const POSITION: &str = "position";
pub const DEFAULT_MARK_GEOCODE: &str = "defaultMarkGeocode";
pub const GEOCODE_PROVIDER: &str = "geocodeProvider";
pub const GEOCODE_PROVIDER_OPTIONS: &str = "geocodeProviderOptions";
pub const SERVICE_URL: &str = "serviceUrl";
pub const GEOCODE_FUNCTION: &str = "geocodeFunction";
pub const RESULTS_HANDLER_FUNCTION: &str = "resultsHandlerFunction";
/// Filled in by the fragment with the resolved provider instance
pub const GEOCODER: &str = "geocoder";
pub const GEOCODING_QUERY_PARAMS: &str = "geocodingQueryParams";
pub const REVERSE_QUERY_PARAMS: &str = "reverseQueryParams";

/// Keys owned by named options; extra options may not shadow them
pub const RESERVED_KEYS: &[&str] = &[
    COLLAPSED,
    POSITION,
    DEFAULT_MARK_GEOCODE,
    GEOCODE_PROVIDER,
    GEOCODE_PROVIDER_OPTIONS,
    SERVICE_URL,
    GEOCODE_FUNCTION,
    RESULTS_HANDLER_FUNCTION,
    GEOCODER,
];

/// Extra options the custom provider reads as objects
pub const OBJECT_KEYS: &[&str] = &[GEOCODING_QUERY_PARAMS, REVERSE_QUERY_PARAMS];

/// Check that an extra option may be passed through
pub fn check_extra(key: &str, value: &Value) -> GeocoderResult<()> {
    if RESERVED_KEYS.contains(&key) {
        return Err(GeocoderError::InvalidOption(format!(
            "extra option '{key}' collides with a named option"
        )));
    }
    if OBJECT_KEYS.contains(&key) && !value.is_object() {
        return Err(GeocoderError::InvalidOption(format!(
            "{key} must be an object, got {value}"
        )));
    }
    Ok(())
}

/// Build the options bag for an already resolved provider
pub fn normalize(options: &GeocoderOptions, provider: &GeocodeProvider) -> GeocoderResult<OptionsBag> {
    let mut bag = OptionsBag::new();
    bag.insert(COLLAPSED.to_string(), Value::Bool(options.collapsed));
    bag.insert(POSITION.to_string(), serde_json::to_value(options.position)?);
    bag.insert(DEFAULT_MARK_GEOCODE.to_string(), Value::Bool(options.add_marker));

    match provider {
        GeocodeProvider::Builtin(builtin) => {
            bag.insert(
                GEOCODE_PROVIDER.to_string(),
                Value::String(builtin.name().to_string()),
            );
        }
        GeocodeProvider::Custom(custom) => {
            bag.insert(
                SERVICE_URL.to_string(),
                Value::String(custom.service_url().to_string()),
            );
            bag.insert(
                GEOCODE_FUNCTION.to_string(),
                Value::String(custom.geocode_function().as_str().to_string()),
            );
            if let Some(handler) = custom.results_handler() {
                bag.insert(
                    RESULTS_HANDLER_FUNCTION.to_string(),
                    Value::String(handler.as_str().to_string()),
                );
            }
        }
    }

    if let Some(provider_options) = &options.geocode_provider_options {
        bag.insert(
            GEOCODE_PROVIDER_OPTIONS.to_string(),
            Value::Object(provider_options.clone()),
        );
    }

    for (key, value) in &options.extra {
        check_extra(key, value)?;
        bag.insert(key.clone(), value.clone());
    }

    Ok(bag)
}
