//! The geocoder control and its builder

use crate::{
    error::{GeocoderError, GeocoderResult},
    options::{self, OptionsBag},
    providers::{GeocodeProvider, ProviderConfig},
    template,
    types::{Asset, AssetKind, DebugOptions, GeocoderOptions, MapHandle, Position, ScriptSource},
    utils::{debug, naming, script_json},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Zoom level the map is set to when a result is selected
pub const RESULT_ZOOM: u8 = 11;

/// Plugin script, pinned to the release the fragment targets
pub const GEOCODER_JS: Asset = Asset {
    name: "Control.Geocoder.js",
    url: "https://unpkg.com/leaflet-control-geocoder@2.4.0/dist/Control.Geocoder.js",
    kind: AssetKind::Script,
};

/// Plugin stylesheet, pinned to the release the fragment targets
pub const GEOCODER_CSS: Asset = Asset {
    name: "Control.Geocoder.css",
    url: "https://unpkg.com/leaflet-control-geocoder@2.4.0/dist/Control.Geocoder.css",
    kind: AssetKind::Stylesheet,
};

/// A fully validated geocoder control, ready to render
#[derive(Debug, Clone)]
pub struct GeocoderControl {
    name: String,
    options: OptionsBag,
    provider: GeocodeProvider,
    debug: Option<DebugOptions>,
}

#[derive(Serialize)]
struct FragmentContext<'a> {
    name: &'a str,
    options: String,
    eval_geocode_function: bool,
    eval_results_handler: bool,
    custom: bool,
    class_key: String,
    provider_key: String,
    provider_literal: String,
    map: &'a str,
    zoom: u8,
}

impl GeocoderControl {
    /// Validate `options` and assign the control a unique name
    pub fn new(options: GeocoderOptions) -> GeocoderResult<Self> {
        let provider = GeocodeProvider::resolve(&options)?;
        let bag = options::normalize(&options, &provider)?;
        let name = naming::unique_name("geocoder");

        debug::log(
            &options.debug,
            "Constructed geocoder control",
            &format!("name: {name}, provider: {:?}", provider.config()),
        );

        Ok(Self {
            name,
            options: bag,
            provider,
            debug: options.debug,
        })
    }

    pub fn builder() -> GeocoderControlBuilder {
        GeocoderControlBuilder::new()
    }

    /// Unique instance name, e.g. `geocoder_0f3c...`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized options bag
    pub fn options(&self) -> &OptionsBag {
        &self.options
    }

    pub fn provider(&self) -> &GeocodeProvider {
        &self.provider
    }

    /// Key the fragment looks the provider up under in `L.Control.Geocoder`
    pub fn provider_key(&self) -> String {
        self.provider.registry_key(&self.name)
    }

    /// Static resources the host page must load once
    pub fn assets(&self) -> [Asset; 2] {
        [GEOCODER_JS, GEOCODER_CSS]
    }

    /// Options bag as script-safe JSON
    pub fn options_json(&self) -> GeocoderResult<String> {
        script_json::to_script_json(&self.options)
    }

    /// Render the script fragment attaching this control to `map`
    pub fn render(&self, map: &MapHandle) -> GeocoderResult<String> {
        let options = self.options_json()?;
        debug::log_options(&self.debug, &self.name, &options);

        let provider_key = self.provider_key();
        let class_key = match &self.provider {
            GeocodeProvider::Custom(custom) => custom.class_key(&self.name),
            GeocodeProvider::Builtin(_) => String::new(),
        };

        let context = FragmentContext {
            name: &self.name,
            options,
            eval_geocode_function: self.options.contains_key(options::GEOCODE_FUNCTION),
            eval_results_handler: self.options.contains_key(options::RESULTS_HANDLER_FUNCTION),
            custom: self.provider.is_custom(),
            class_key,
            provider_literal: script_json::to_script_json(&provider_key)?,
            provider_key,
            map: map.name(),
            zoom: RESULT_ZOOM,
        };

        let fragment = template::render(template::GEOCODER_TEMPLATE, &context)?;
        debug::log_fragment(&self.debug, &self.name, &fragment);
        log::debug!("Rendered {} for map {}", self.name, map);
        Ok(fragment)
    }
}

/// Builder for [`GeocoderControl`] with the plugin's defaults.
///
/// Setters never fail; the first invalid value is reported by [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GeocoderControlBuilder {
    options: GeocoderOptions,
    error: Option<GeocoderError>,
}

impl GeocoderControlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, error: GeocoderError) -> Self {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self
    }

    /// Start with the search box collapsed until hovered or clicked
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.options.collapsed = collapsed;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.options.position = position;
        self
    }

    /// Set the position from its plugin name (`topleft`, `topright`, ...)
    pub fn position_name(self, name: &str) -> Self {
        match name.parse::<Position>() {
            Ok(position) => self.position(position),
            Err(err) => self.fail(err),
        }
    }

    /// Mark the selected result on the map
    pub fn add_marker(mut self, add_marker: bool) -> Self {
        self.options.add_marker = add_marker;
        self
    }

    /// Use a built-in provider by registry key
    pub fn provider(mut self, name: &str) -> Self {
        self.options.geocode_provider = name.to_string();
        self
    }

    /// Replace the provider options with any JSON object
    pub fn provider_options<T: Serialize>(mut self, provider_options: T) -> Self {
        match serde_json::to_value(provider_options) {
            Ok(Value::Object(map)) => {
                self.options.geocode_provider_options = Some(map);
                self
            }
            Ok(other) => self.fail(GeocoderError::InvalidOption(format!(
                "geocodeProviderOptions must be an object, got {other}"
            ))),
            Err(err) => self.fail(err.into()),
        }
    }

    /// Set a single provider option, such as an API key
    pub fn provider_option<T: Serialize>(mut self, key: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.options
                    .geocode_provider_options
                    .get_or_insert_with(Map::new)
                    .insert(key.to_string(), value);
                self
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Endpoint of a custom provider; requires [`geocode_function`](Self::geocode_function)
    pub fn service_url(mut self, url: &str) -> Self {
        self.options.service_url = Some(url.to_string());
        self
    }

    pub fn geocode_function(mut self, source: impl Into<ScriptSource>) -> Self {
        self.options.geocode_function = Some(source.into());
        self
    }

    pub fn results_handler_function(mut self, source: impl Into<ScriptSource>) -> Self {
        self.options.results_handler_function = Some(source.into());
        self
    }

    /// Pass any other plugin option through verbatim.
    ///
    /// Query parameter maps must still be JSON objects.
    pub fn option<T: Serialize>(mut self, key: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => match options::check_extra(key, &value) {
                Ok(()) => {
                    self.options.extra.insert(key.to_string(), value);
                    self
                }
                Err(err) => self.fail(err),
            },
            Err(err) => self.fail(err.into()),
        }
    }

    /// Query parameters the custom provider sends with lookups
    pub fn geocoding_query_params<T: Serialize>(self, params: T) -> Self {
        self.option(options::GEOCODING_QUERY_PARAMS, params)
    }

    /// Query parameters the custom provider sends with reverse lookups
    pub fn reverse_query_params<T: Serialize>(self, params: T) -> Self {
        self.option(options::REVERSE_QUERY_PARAMS, params)
    }

    pub fn placeholder(self, text: &str) -> Self {
        self.option("placeholder", text)
    }

    pub fn error_message(self, text: &str) -> Self {
        self.option("errorMessage", text)
    }

    pub fn debug(mut self, debug: DebugOptions) -> Self {
        self.options.debug = Some(debug);
        self
    }

    /// The options collected so far
    pub fn options(&self) -> &GeocoderOptions {
        &self.options
    }

    pub fn build(self) -> GeocoderResult<GeocoderControl> {
        if let Some(error) = self.error {
            return Err(error);
        }
        GeocoderControl::new(self.options)
    }
}
