//! Assembly of several controls into one HTML document
//!
//! A page declares every asset once, no matter how many controls need it, and
//! tracks the provider registry keys its fragments add to
//! `L.Control.Geocoder` so two custom providers can never claim the same key.

use crate::{
    control::GeocoderControl,
    error::{GeocoderError, GeocoderResult},
    template,
    types::{Asset, AssetKind, MapHandle},
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct Page {
    title: String,
    assets: Vec<Asset>,
    containers: Vec<String>,
    fragments: Vec<String>,
    /// control name -> map it is bound to
    bindings: HashMap<String, MapHandle>,
    registered_providers: HashSet<String>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    stylesheets: Vec<&'a str>,
    scripts: Vec<&'a str>,
    containers: &'a [String],
    fragments: &'a [String],
}

impl Page {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Declare a static resource; repeated declarations of the same name are ignored
    pub fn add_asset(&mut self, asset: Asset) {
        if !self.assets.iter().any(|a| a.name == asset.name) {
            self.assets.push(asset);
        }
    }

    /// Add a `<div>` with the given id to the body
    pub fn add_container(&mut self, id: &str) {
        if !self.containers.iter().any(|c| c == id) {
            self.containers.push(id.to_string());
        }
    }

    /// Add a host script (for example the map declaration) ahead of later fragments
    pub fn add_script(&mut self, script: String) {
        self.fragments.push(script);
    }

    /// Render `control` for `map` and add it to the page.
    ///
    /// Fails without touching the page if the control is already bound or its
    /// provider key is already registered.
    pub fn add(&mut self, control: &GeocoderControl, map: &MapHandle) -> GeocoderResult<()> {
        if let Some(bound) = self.bindings.get(control.name()) {
            return Err(GeocoderError::ConfigError(format!(
                "control {} is already bound to map {bound}",
                control.name()
            )));
        }

        let provider_key = control.provider_key();
        let registers = control.provider().is_custom();
        if registers && self.registered_providers.contains(&provider_key) {
            return Err(GeocoderError::ConfigError(format!(
                "provider key {provider_key} is already registered on this page"
            )));
        }

        let fragment = control.render(map)?;

        for asset in control.assets() {
            self.add_asset(asset);
        }
        if registers {
            self.registered_providers.insert(provider_key);
        }
        self.bindings
            .insert(control.name().to_string(), map.clone());
        self.fragments.push(fragment);
        log::info!("Added {} to page '{}' (map {map})", control.name(), self.title);
        Ok(())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Custom provider keys the page's fragments register
    pub fn registered_providers(&self) -> &HashSet<String> {
        &self.registered_providers
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Map a control was bound to, by control name
    pub fn binding(&self, control_name: &str) -> Option<&MapHandle> {
        self.bindings.get(control_name)
    }

    /// Render the complete HTML document
    pub fn render(&self) -> GeocoderResult<String> {
        let urls = |kind: AssetKind| {
            self.assets
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.url)
                .collect::<Vec<_>>()
        };
        let context = PageContext {
            title: &self.title,
            stylesheets: urls(AssetKind::Stylesheet),
            scripts: urls(AssetKind::Script),
            containers: &self.containers,
            fragments: &self.fragments,
        };
        template::render(template::PAGE_TEMPLATE, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{GEOCODER_CSS, GEOCODER_JS};

    fn custom_control() -> GeocoderControl {
        GeocoderControl::builder()
            .service_url("https://x/geocode")
            .geocode_function("function(q,cb){cb([])}")
            .build()
            .unwrap()
    }

    #[test]
    fn test_assets_declared_once() {
        let mut page = Page::new("test");
        for _ in 0..3 {
            let control = GeocoderControl::builder().build().unwrap();
            page.add(&control, &MapHandle::generate()).unwrap();
        }
        assert_eq!(page.assets(), &[GEOCODER_JS, GEOCODER_CSS]);
        assert_eq!(page.fragments().len(), 3);

        let html = page.render().unwrap();
        assert_eq!(html.matches(GEOCODER_JS.url).count(), 1);
        assert_eq!(html.matches(GEOCODER_CSS.url).count(), 1);
    }

    #[test]
    fn test_control_cannot_be_bound_twice() {
        let mut page = Page::new("test");
        let control = GeocoderControl::builder().build().unwrap();
        page.add(&control, &MapHandle::generate()).unwrap();

        let second = page.add(&control, &MapHandle::generate());
        assert!(matches!(second, Err(GeocoderError::ConfigError(_))));
        assert_eq!(page.fragments().len(), 1);
    }

    #[test]
    fn test_custom_providers_register_distinct_keys() {
        let mut page = Page::new("test");
        let a = custom_control();
        let b = custom_control();
        page.add(&a, &MapHandle::generate()).unwrap();
        page.add(&b, &MapHandle::generate()).unwrap();

        assert_eq!(page.registered_providers().len(), 2);
        assert!(page.registered_providers().contains(&a.provider_key()));
        assert!(page.registered_providers().contains(&b.provider_key()));
    }

    #[test]
    fn test_builtin_providers_do_not_register() {
        let mut page = Page::new("test");
        page.add(&GeocoderControl::builder().build().unwrap(), &MapHandle::generate())
            .unwrap();
        assert!(page.registered_providers().is_empty());
    }

    #[test]
    fn test_render_includes_containers_and_escapes_title() {
        let map = MapHandle::generate();
        let mut page = Page::new("<Maps & more>");
        page.add_container(map.name());
        page.add_script(format!("var {map} = L.map('{map}');"));
        page.add(&GeocoderControl::builder().build().unwrap(), &map).unwrap();

        let html = page.render().unwrap();
        assert!(html.contains(&format!("<div id=\"{map}\"")));
        assert!(html.contains("&lt;Maps &amp; more&gt;"));
        let declared = html.find(&format!("var {map} = L.map")).unwrap();
        let used = html.find(&format!(".addTo({map})")).unwrap();
        assert!(declared < used);
    }
}
