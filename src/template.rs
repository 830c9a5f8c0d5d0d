//! Compiled-in handlebars templates for fragments and pages

use crate::error::{GeocoderError, GeocoderResult};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

pub const GEOCODER_TEMPLATE: &str = "geocoder";
pub const PAGE_TEMPLATE: &str = "page";

fn get_templates() -> GeocoderResult<Handlebars<'static>> {
    let mut h = Handlebars::new();
    h.set_strict_mode(true);
    h.register_template_string(
        GEOCODER_TEMPLATE,
        include_str!("../templates/geocoder.js.hbs"),
    )?;
    h.register_template_string(PAGE_TEMPLATE, include_str!("../templates/page.html.hbs"))?;
    Ok(h)
}

static TEMPLATES: Lazy<GeocoderResult<Handlebars<'static>>> = Lazy::new(get_templates);

/// Render one of the compiled-in templates
pub fn render<T: Serialize>(template: &str, data: &T) -> GeocoderResult<String> {
    let registry = TEMPLATES.as_ref().map_err(GeocoderError::clone)?;
    Ok(registry.render(template, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_compile() {
        assert!(TEMPLATES.is_ok());
    }

    #[test]
    fn test_missing_field_is_an_error_in_strict_mode() {
        let result = render(GEOCODER_TEMPLATE, &json!({"name": "geocoder_x"}));
        assert!(matches!(result, Err(GeocoderError::TemplateError(_))));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        assert!(render("nope", &json!({})).is_err());
    }
}
