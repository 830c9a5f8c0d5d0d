//! Integration tests for geocoder control construction and rendering
//!
//! These cover the documented scenarios end to end through the public API.

use geocoder_control::{
    options::OptionsBag, page::Page, providers::ProviderConfig, GeocoderControl, GeocoderError,
    GeocoderOptions, MapHandle, Position, ScriptSource,
};
use serde_json::{json, Value};
use std::collections::HashSet;

const PREFIX: &str = "geocoder_";

/// Every `geocoder_<32 hex>` identifier appearing in `text`
fn identifiers(text: &str) -> HashSet<String> {
    let mut found = HashSet::new();
    for (start, _) in text.match_indices(PREFIX) {
        let tail = &text[start + PREFIX.len()..];
        let hex: String = tail.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
        if hex.len() == 32 {
            found.insert(format!("{PREFIX}{hex}"));
        }
    }
    found
}

/// The JSON literal assigned to `geocoderOpts_<name>`
fn options_literal(fragment: &str, name: &str) -> OptionsBag {
    let marker = format!("var geocoderOpts_{name} = ");
    let start = fragment.find(&marker).expect("options declaration") + marker.len();
    let end = start + fragment[start..].find(";\n").expect("end of declaration");
    serde_json::from_str(&fragment[start..end]).expect("options literal is JSON")
}

fn custom_options() -> GeocoderOptions {
    GeocoderOptions {
        service_url: Some("https://x/geocode".to_string()),
        geocode_function: Some(ScriptSource::new("function(q,cb){cb([])}")),
        ..Default::default()
    }
}

#[test]
fn test_scenario_defaults() {
    let control = GeocoderControl::new(GeocoderOptions::default()).unwrap();
    let map = MapHandle::new("map_default").unwrap();
    let fragment = control.render(&map).unwrap();

    let literal = options_literal(&fragment, control.name());
    assert_eq!(
        Value::Object(literal),
        json!({
            "collapsed": false,
            "position": "topright",
            "defaultMarkGeocode": true,
            "geocodeProvider": "nominatim"
        })
    );
    assert!(fragment.contains(&format!("var geocoderName_{} = \"nominatim\";", control.name())));
}

#[test]
fn test_scenario_custom_provider() {
    let control = GeocoderControl::new(custom_options()).unwrap();
    let name = control.name().to_string();
    let fragment = control.render(&MapHandle::new("map_custom").unwrap()).unwrap();

    // registered under a derived name
    assert!(fragment.contains("L.Util.extend(L.Control.Geocoder, {"));
    assert!(fragment.contains(&format!("Custom_{name}: customGeocoderClass_{name},")));
    assert!(fragment.contains(&format!("custom_{name}: function(options)")));
    // function text re-evaluated as code
    assert!(fragment.contains(&format!(
        "eval(\"geocoderOpts_{name}['geocodeFunction'] = \""
    )));
    let literal = options_literal(&fragment, &name);
    assert_eq!(literal["geocodeFunction"], json!("function(q,cb){cb([])}"));
    // derived name selected instead of the default
    assert!(fragment.contains(&format!("var geocoderName_{name} = \"custom_{name}\";")));
    assert!(!fragment.contains("nominatim"));
}

#[test]
fn test_scenario_two_maps_on_one_page() {
    let mut page = Page::new("two maps");
    let first = GeocoderControl::new(custom_options()).unwrap();
    let second = GeocoderControl::new(custom_options()).unwrap();
    let map_a = MapHandle::generate();
    let map_b = MapHandle::generate();

    page.add(&first, &map_a).unwrap();
    page.add(&second, &map_b).unwrap();

    assert_ne!(first.name(), second.name());
    assert_ne!(first.provider_key(), second.provider_key());
    assert_eq!(page.registered_providers().len(), 2);

    let ids_a = identifiers(&page.fragments()[0]);
    let ids_b = identifiers(&page.fragments()[1]);
    assert!(ids_a.is_disjoint(&ids_b));
    assert!(page.fragments()[0].contains(&format!(".addTo({map_a})")));
    assert!(page.fragments()[1].contains(&format!(".addTo({map_b})")));
    assert_eq!(page.binding(first.name()), Some(&map_a));
}

#[test]
fn test_fragment_uses_one_identifier_and_no_placeholders() {
    let configurations = vec![
        GeocoderOptions::default(),
        custom_options(),
        GeocoderOptions {
            results_handler_function: Some(ScriptSource::new("function(d){return d;}")),
            position: Position::BottomRight,
            collapsed: true,
            ..custom_options()
        },
    ];

    for options in configurations {
        let control = GeocoderControl::new(options).unwrap();
        let fragment = control.render(&MapHandle::new("map_x").unwrap()).unwrap();
        let ids = identifiers(&fragment);
        assert_eq!(ids.len(), 1, "identifiers found: {ids:?}");
        assert!(ids.contains(control.name()));
        assert!(!fragment.contains("{{"));
        assert!(!fragment.contains("}}"));
    }
}

#[test]
fn test_options_round_trip_through_fragment() {
    let control = GeocoderControl::builder()
        .collapsed(true)
        .add_marker(false)
        .position(Position::TopLeft)
        .provider("openCage")
        .provider_option("apiKey", "abc")
        .option("suggestMinLength", 3)
        .build()
        .unwrap();
    let fragment = control.render(&MapHandle::new("m").unwrap()).unwrap();

    let literal = options_literal(&fragment, control.name());
    assert_eq!(&literal, control.options());
    assert_eq!(literal["defaultMarkGeocode"], json!(false));
    assert_eq!(literal["position"], json!("topleft"));
    assert_eq!(literal["geocodeProviderOptions"], json!({"apiKey": "abc"}));
}

#[test]
fn test_render_twice_is_identical() {
    let control = GeocoderControl::new(custom_options()).unwrap();
    let map = MapHandle::generate();
    assert_eq!(control.render(&map).unwrap(), control.render(&map).unwrap());
}

#[test]
fn test_service_url_without_function_fails_at_construction() {
    let options = GeocoderOptions {
        service_url: Some("https://x/geocode".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        GeocoderControl::new(options),
        Err(GeocoderError::MissingDependency(_))
    ));
}

#[test]
fn test_center_position_fails_at_construction() {
    let result = GeocoderControl::builder().position_name("center").build();
    assert!(matches!(result, Err(GeocoderError::InvalidOption(_))));
}

#[test]
fn test_failed_control_does_not_affect_page() {
    let mut page = Page::new("partial");
    let good = GeocoderControl::builder().build().unwrap();
    let bad = GeocoderControl::builder()
        .service_url("https://x/geocode")
        .build();

    assert!(bad.is_err());
    page.add(&good, &MapHandle::generate()).unwrap();
    assert_eq!(page.fragments().len(), 1);
}

#[test]
fn test_custom_provider_config_reports_url() {
    let control = GeocoderControl::new(custom_options()).unwrap();
    let config = control.provider().config();
    assert_eq!(config.get("service_url").unwrap(), "https://x/geocode");
    assert_eq!(config.get("results_handler").unwrap(), "false");
}

#[test]
fn test_concurrent_construction_yields_unique_names() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                (0..50)
                    .map(|_| GeocoderControl::new(custom_options()).unwrap().provider_key())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut keys = HashSet::new();
    for handle in handles {
        for key in handle.join().unwrap() {
            assert!(keys.insert(key), "duplicate provider key");
        }
    }
    assert_eq!(keys.len(), 400);
}

#[test]
fn test_relative_service_url_is_kept_verbatim() {
    let control = GeocoderControl::builder()
        .service_url("/api/geocode/")
        .geocode_function("function(q,cb){cb([])}")
        .build()
        .unwrap();
    let fragment = control.render(&MapHandle::new("map_rel").unwrap()).unwrap();

    let literal = options_literal(&fragment, control.name());
    assert_eq!(literal["serviceUrl"], json!("/api/geocode/"));
    assert!(fragment.contains(&format!(
        "var geocoderName_{0} = \"custom_{0}\";",
        control.name()
    )));
}

#[test]
fn test_line_separators_are_escaped_in_fragment() {
    let control = GeocoderControl::builder()
        .placeholder("a\u{2028}b\u{2029}c")
        .build()
        .unwrap();
    let fragment = control.render(&MapHandle::new("map_sep").unwrap()).unwrap();

    assert!(!fragment.contains('\u{2028}'));
    assert!(!fragment.contains('\u{2029}'));
    let literal = options_literal(&fragment, control.name());
    assert_eq!(literal["placeholder"], json!("a\u{2028}b\u{2029}c"));
}
