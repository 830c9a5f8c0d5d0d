//! geocoder-control CLI - render geocoder search controls for Leaflet maps
//!
//! Builds a control from command-line flags and prints the script fragment,
//! the options object, or a complete HTML page.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use geocoder_control::{
    control::{GEOCODER_CSS, GEOCODER_JS},
    providers::builtin::KNOWN_PROVIDERS,
    types::{Asset, AssetKind, DEFAULT_PROVIDER},
    GeocoderControl, MapHandle, Page, Position,
};
use std::fs;
use std::path::{Path, PathBuf};

const LEAFLET_JS: Asset = Asset {
    name: "leaflet.js",
    url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    kind: AssetKind::Script,
};

const LEAFLET_CSS: Asset = Asset {
    name: "leaflet.css",
    url: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    kind: AssetKind::Stylesheet,
};

#[derive(Parser)]
#[command(name = "geocoder-control")]
#[command(about = "Render Leaflet geocoder controls")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a geocoder control
    Render {
        /// Name of the map variable the control attaches to (generated if omitted)
        #[arg(short, long)]
        map: Option<String>,

        /// Corner of the map the control is placed in
        #[arg(short, long, value_enum, default_value = "topright")]
        position: PositionCli,

        /// Start with the search box collapsed
        #[arg(short, long)]
        collapsed: bool,

        /// Do not mark the selected result on the map
        #[arg(long)]
        no_marker: bool,

        /// Built-in provider name
        #[arg(long, env = "GEOCODER_PROVIDER", default_value = DEFAULT_PROVIDER)]
        provider: String,

        /// API key passed to the provider as `apiKey`
        #[arg(long, env = "GEOCODER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Custom provider endpoint; requires --geocode-function
        #[arg(long, env = "GEOCODER_SERVICE_URL")]
        service_url: Option<String>,

        /// File holding the custom provider's geocode function source
        #[arg(long)]
        geocode_function: Option<PathBuf>,

        /// File holding the custom provider's results handler function source
        #[arg(long)]
        results_handler: Option<PathBuf>,

        /// Extra plugin option as key=value (value parsed as JSON, else taken as a string)
        #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
        options: Vec<(String, String)>,

        /// Enable debug output
        #[arg(short, long)]
        debug: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "fragment")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List built-in providers
    Providers,
    /// List the script and stylesheet a page must load
    Assets,
}

#[derive(ValueEnum, Clone, Debug)]
enum PositionCli {
    Topleft,
    Topright,
    Bottomleft,
    Bottomright,
}

impl From<PositionCli> for Position {
    fn from(position: PositionCli) -> Self {
        match position {
            PositionCli::Topleft => Position::TopLeft,
            PositionCli::Topright => Position::TopRight,
            PositionCli::Bottomleft => Position::BottomLeft,
            PositionCli::Bottomright => Position::BottomRight,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Fragment,
    Json,
    Html,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            map,
            position,
            collapsed,
            no_marker,
            provider,
            api_key,
            service_url,
            geocode_function,
            results_handler,
            options,
            debug,
            format,
            output,
        } => {
            init_logging(debug);

            let mut builder = GeocoderControl::builder()
                .position(position.into())
                .collapsed(collapsed)
                .add_marker(!no_marker)
                .provider(&provider);
            if let Some(api_key) = api_key {
                builder = builder.provider_option("apiKey", api_key);
            }
            if let Some(url) = service_url {
                builder = builder.service_url(&url);
            }
            if let Some(path) = geocode_function {
                builder = builder.geocode_function(read_source(&path)?);
            }
            if let Some(path) = results_handler {
                builder = builder.results_handler_function(read_source(&path)?);
            }
            for (key, value) in options {
                let value = serde_json::from_str::<serde_json::Value>(&value)
                    .unwrap_or(serde_json::Value::String(value));
                builder = builder.option(&key, value);
            }
            if debug {
                builder = builder.debug(geocoder_control::utils::debug::debug_all());
            }

            let map = match map {
                Some(name) => MapHandle::new(&name)?,
                None => MapHandle::generate(),
            };

            let control = match builder.build() {
                Ok(control) => control,
                Err(error) => {
                    eprintln!("{} {}", "Error:".red().bold(), error);
                    eprintln!(
                        "{} {}",
                        "Troubleshooting:".yellow(),
                        geocoder_control::get_troubleshooting_info(&error)
                    );
                    std::process::exit(1);
                }
            };

            let rendered = match format {
                OutputFormat::Fragment => control.render(&map)?,
                OutputFormat::Json => serde_json::to_string_pretty(control.options())?,
                OutputFormat::Html => render_page(&control, &map)?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("{} {}", "Wrote".green(), path.display());
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Providers => {
            println!("{}", "Built-in Geocoding Providers".bold().blue());
            println!("{}", "─".repeat(40).dimmed());
            for name in KNOWN_PROVIDERS {
                if *name == DEFAULT_PROVIDER {
                    println!("  {} {}", name.green(), "(default)".dimmed());
                } else {
                    println!("  {name}");
                }
            }
        }
        Commands::Assets => {
            for asset in [GEOCODER_JS, GEOCODER_CSS] {
                let kind = match asset.kind {
                    AssetKind::Script => "script",
                    AssetKind::Stylesheet => "stylesheet",
                };
                println!("{:<12} {}", kind.cyan(), asset.url);
            }
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Standalone page with a world map and the control attached to it
fn render_page(control: &GeocoderControl, map: &MapHandle) -> anyhow::Result<String> {
    let mut page = Page::new("Geocoder");
    page.add_asset(LEAFLET_JS);
    page.add_asset(LEAFLET_CSS);
    page.add_container(map.name());
    page.add_script(format!(
        "    var {map} = L.map('{map}').setView([0, 0], 2);\n    \
         L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', \
         {{ attribution: '&copy; OpenStreetMap contributors' }}).addTo({map});"
    ));
    page.add(control, map)?;
    Ok(page.render()?)
}
