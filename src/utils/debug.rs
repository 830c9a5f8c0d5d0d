//! Debug logging helpers, gated by [`DebugOptions`]

use crate::types::DebugOptions;

/// Log a message if debugging is enabled
pub fn log(options: &Option<DebugOptions>, message: &str, data: &str) {
    if let Some(debug_opts) = options {
        if debug_opts.enabled {
            log::debug!("[geocoder-control] {message}: {data}");
        }
    }
}

/// Log the normalized options bag if options logging is enabled
pub fn log_options(options: &Option<DebugOptions>, name: &str, json: &str) {
    if let Some(debug_opts) = options {
        if debug_opts.enabled && debug_opts.log_options {
            log::debug!("[geocoder-control] OPTIONS {name}: {json}");
        }
    }
}

/// Log the rendered fragment if fragment logging is enabled
pub fn log_fragment(options: &Option<DebugOptions>, name: &str, fragment: &str) {
    if let Some(debug_opts) = options {
        if debug_opts.enabled && debug_opts.log_fragment {
            log::debug!("[geocoder-control] FRAGMENT {name}:\n{fragment}");
        }
    }
}

/// Create default debug options with all logging enabled
pub fn debug_all() -> DebugOptions {
    DebugOptions {
        enabled: true,
        log_options: true,
        log_fragment: true,
    }
}

/// Create debug options with only basic logging enabled
pub fn debug_basic() -> DebugOptions {
    DebugOptions {
        enabled: true,
        log_options: false,
        log_fragment: false,
    }
}
