use std::env;

use clap::{Parser, Subcommand};
use foundation::LatLon;
use geocode::GeocodeClient;
use layers::{HeadlessWidget, TileLayerId, Viewport};
use nearby::{DEFAULT_WIKI_API, NearbyFetcher, THUMBNAIL_SIZE_PX, WikiSource};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use viewer::{SearchOutcome, Viewer, format_distance};

const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:9200/search";

type CliViewer = Viewer<GeocodeClient, WikiSource, HeadlessWidget>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless map viewer: place search and nearby articles")]
struct Args {
    /// Geocode proxy endpoint (default: $VIEWER_PROXY_URL or the local proxy)
    #[arg(long)]
    proxy_url: Option<String>,

    /// MediaWiki action API (default: $WIKI_API_URL or English Wikipedia)
    #[arg(long)]
    wiki_api: Option<String>,

    /// Client identifier sent upstream (default: $VIEWER_USER_AGENT)
    #[arg(long)]
    user_agent: Option<String>,

    /// Thumbnail edge requested for article previews, in pixels
    #[arg(long, default_value_t = THUMBNAIL_SIZE_PX)]
    thumbnail_px: u32,

    /// Base map: standard, satellite or explore
    #[arg(long, default_value = "standard")]
    layer: TileLayerId,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Geocode a place and list articles around it
    Search {
        /// Place name (at least three characters)
        query: String,
    },

    /// List articles around a coordinate
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Treat the coordinate as the user's location (adds distances)
        #[arg(long)]
        here: bool,
    },

    /// List the available base maps
    Layers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Command::Layers = args.command {
        print_layers(args.json)?;
        return Ok(());
    }

    let proxy_url = args.proxy_url.unwrap_or_else(|| {
        env::var("VIEWER_PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string())
    });
    let wiki_api = args
        .wiki_api
        .unwrap_or_else(|| env::var("WIKI_API_URL").unwrap_or_else(|_| DEFAULT_WIKI_API.to_string()));
    let user_agent = args.user_agent.unwrap_or_else(|| {
        env::var("VIEWER_USER_AGENT")
            .unwrap_or_else(|_| concat!("atlas-nearby-viewer/", env!("CARGO_PKG_VERSION")).to_string())
    });

    let geocoder = GeocodeClient::new(proxy_url, &user_agent)?;
    let source = WikiSource::new(wiki_api, &user_agent)?.with_thumbnail_px(args.thumbnail_px);
    let mut viewer = Viewer::new(
        geocoder,
        NearbyFetcher::new(source),
        HeadlessWidget::new(),
        Viewport::default(),
    );
    viewer.set_active_layer(args.layer);

    match args.command {
        Command::Search { query } => {
            let outcome = viewer.search(&query).await;
            if !matches!(outcome, SearchOutcome::Found(_)) {
                report_search(&outcome, args.json)?;
                debug!(counters = ?viewer.counters().snapshot(), "viewer activity");
                return Ok(());
            }
            info!(?outcome, "search resolved");
        }
        Command::Nearby { lat, lon, here } => {
            let center = LatLon::checked(lat, lon)
                .ok_or_else(|| format!("coordinate out of range: {lat},{lon}"))?;
            if here {
                viewer.on_geolocated(Some(center)).await;
            } else {
                let zoom = viewer.viewport().zoom;
                viewer.on_move_end(center, zoom).await;
            }
        }
        Command::Layers => {}
    }

    print_points(&viewer, args.json)?;
    debug!(counters = ?viewer.counters().snapshot(), "viewer activity");
    Ok(())
}

fn report_search(outcome: &SearchOutcome, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    match outcome {
        SearchOutcome::TooShort => println!("query too short"),
        SearchOutcome::NoMatch => println!("no results"),
        SearchOutcome::Failed => println!("search failed"),
        SearchOutcome::Found(result) => println!("{}\t{}", result.display_name, result.coordinate),
    }
    Ok(())
}

fn print_points(viewer: &CliViewer, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let cards = viewer.cards();
    if as_json {
        let counters: serde_json::Map<String, serde_json::Value> = viewer
            .counters()
            .snapshot()
            .into_iter()
            .map(|(name, count)| (name.to_string(), count.into()))
            .collect();
        let out = json!({
            "viewport": viewer.viewport(),
            "cards": cards,
            "counters": counters,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let viewport = viewer.viewport();
    println!(
        "{} @ z{} ({})",
        viewport.center, viewport.zoom, viewport.active_layer
    );
    if cards.is_empty() {
        println!("no nearby articles");
        return Ok(());
    }
    for card in &cards {
        let distance = card.distance_m.map(format_distance).unwrap_or_default();
        println!(
            "{}/{}\t{}\t{}\t{}",
            card.position.index + 1,
            card.position.count,
            card.title,
            distance,
            card.url
        );
    }
    Ok(())
}

fn print_layers(as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let layers: Vec<_> = TileLayerId::ALL
            .iter()
            .map(|id| {
                let source = id.source();
                json!({
                    "id": id,
                    "name": source.name,
                    "url_template": source.url_template,
                    "subdomains": source.subdomains,
                    "attribution": source.attribution,
                    "min_zoom": source.min_zoom,
                    "max_zoom": source.max_zoom,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&layers)?);
        return Ok(());
    }
    for id in TileLayerId::ALL {
        let source = id.source();
        println!(
            "{id}\t{}\tz{}-{}\t{}",
            source.name, source.min_zoom, source.max_zoom, source.url_template
        );
    }
    Ok(())
}
