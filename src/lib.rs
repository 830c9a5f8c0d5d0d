//! # geocoder-control
//!
//! Typed configuration for the [leaflet-control-geocoder](https://github.com/perliedman/leaflet-control-geocoder)
//! plugin, rendered into script fragments that attach a geocoding search box to a Leaflet map.
//!
//! The crate does not geocode anything itself. It validates the configuration, assembles the
//! plugin's options object, and emits JavaScript that the page runs later. Custom lookup and
//! result-handling functions are carried as source text and only evaluated by the page.
//!
//! ## Quick Start
//!
//! ```rust
//! use geocoder_control::{GeocoderControl, MapHandle, Position};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let control = GeocoderControl::builder()
//!         .collapsed(true)
//!         .position(Position::TopLeft)
//!         .provider("photon")
//!         .build()?;
//!
//!     let map = MapHandle::new("map_main")?;
//!     let fragment = control.render(&map)?;
//!     assert!(fragment.contains(".addTo(map_main)"));
//!     Ok(())
//! }
//! ```

pub mod control;
pub mod error;
pub mod options;
pub mod page;
pub mod providers;
pub mod template;
pub mod types;
pub mod utils;

// Re-export common types
pub use control::{GeocoderControl, GeocoderControlBuilder};
pub use error::{GeocoderError, GeocoderResult as Result};
pub use page::Page;
pub use types::{DebugOptions, GeocoderOptions, MapHandle, Position, ScriptSource};

/// Build a control from `options` and render its fragment for `map` in one step
///
/// # Examples
///
/// ```rust
/// use geocoder_control::{render_geocoder, GeocoderOptions, MapHandle};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fragment = render_geocoder(GeocoderOptions::default(), &MapHandle::new("map_1")?)?;
/// assert!(fragment.contains("\"nominatim\""));
/// # Ok(())
/// # }
/// ```
pub fn render_geocoder(options: GeocoderOptions, map: &MapHandle) -> Result<String> {
    use utils::debug;

    let debug_options = options.debug.clone();
    debug::log(&debug_options, "Rendering geocoder", &format!("map: {map}"));

    match GeocoderControl::new(options).and_then(|control| control.render(map)) {
        Ok(fragment) => {
            debug::log(
                &debug_options,
                "Rendered geocoder",
                &format!("{} bytes", fragment.len()),
            );
            Ok(fragment)
        }
        Err(error) => {
            debug::log(
                &debug_options,
                "Geocoder error",
                &format!("{error}\n\nTroubleshooting: {}", get_troubleshooting_info(&error)),
            );
            Err(error)
        }
    }
}

/// Hint for resolving a construction or render failure
pub fn get_troubleshooting_info(error: &GeocoderError) -> String {
    match error {
        GeocoderError::InvalidOption(_) => "Check enumerated options: position must be one of topleft, topright, bottomleft or bottomright, serviceUrl must not be blank, and map handles must be JavaScript identifiers.".to_string(),
        GeocoderError::MissingDependency(_) => "A custom provider needs both serviceUrl and geocodeFunction; resultsHandlerFunction is only used together with them.".to_string(),
        GeocoderError::SerializationError(_) => "Option values must be representable as JSON: strings, numbers, booleans, arrays and objects with string keys.".to_string(),
        GeocoderError::ConfigError(_) => "Each control can be added to one map only; build a new control for every map on the page.".to_string(),
        GeocoderError::TemplateError(_) | GeocoderError::Other(_) => {
            "This is unexpected; enable debug logging to see the options that were rendered.".to_string()
        }
    }
}
