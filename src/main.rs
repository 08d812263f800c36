use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Result;
use clap::Parser;
use sportlocate_app::{AppContext, MapModel, WeatherModel};
use sportlocate_core::Config;

/// Find sport venues in a Finnish city, optionally with a weather-aware pick.
#[derive(Debug, Parser)]
#[command(name = "sportlocate", version, about)]
struct Cli {
    /// City to search; stored as the new current city
    #[arg(long)]
    city: Option<String>,

    /// Recommend one venue suited to the current weather
    #[arg(long)]
    recommend: bool,

    /// Print the map as GeoJSON instead of a venue list
    #[arg(long)]
    geojson: bool,

    /// Highlight the venue with this id
    #[arg(long, value_name = "ID")]
    select: Option<i64>,

    /// List known cities and exit
    #[arg(long)]
    list_cities: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn log_events(map: &mut MapModel) {
    for event in map.take_events() {
        tracing::debug!("Map event: {:?}", event);
    }
}

fn main() -> Result<()> {
    sportlocate_core::init()?;
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    if cli.list_cities {
        for city in ctx.cities() {
            println!("{:>4}  {}", city.code, city.name);
        }
        return Ok(());
    }

    if let Some(city) = &cli.city {
        ctx.set_city(city)?;
    }
    let city = ctx.current_city();
    tracing::info!("Showing venues for {}", city);

    let (venue_tx, venue_rx) = mpsc::channel();
    let mut map = MapModel::new();
    map.begin_request();
    ctx.request_show_venues(&venue_tx);
    map.apply(venue_rx.recv()?);
    log_events(&mut map);

    if !map.error_message().is_empty() {
        eprintln!("{}", map.error_message());
        return Ok(());
    }

    if cli.recommend {
        let (weather_tx, weather_rx) = mpsc::channel();
        let mut weather = WeatherModel::new();
        weather.begin_refresh();
        ctx.request_weather(&weather_tx);
        weather.apply(weather_rx.recv()?);

        match weather.report() {
            Some(report) => {
                println!(
                    "Weather in {}: {}, {:.1}°C, wind {:.1} km/h",
                    city,
                    weather.condition(),
                    weather.temperature(),
                    weather.wind_speed()
                );
                if !weather.advisory().is_empty() {
                    println!("{}", weather.advisory());
                }

                ctx.request_recommendation(&venue_tx, report.clone());
                map.apply(venue_rx.recv()?);
                log_events(&mut map);
                if map.recommendation_unavailable() {
                    println!("No recommendation available");
                }
            }
            None => eprintln!("{}", weather.error_message()),
        }
    }

    if let Some(id) = cli.select {
        ctx.select_venue(id);
        map.select(ctx.selected_venue_id());
        log_events(&mut map);
    }

    if cli.geojson {
        println!("{}", serde_json::to_string_pretty(&map.to_geojson())?);
        return Ok(());
    }

    println!("{} venues in {}:", map.venues().len(), city);
    for venue in map.venues() {
        let marker = if venue.id == map.selected_id() { "*" } else { " " };
        println!(
            "{} [{}] {} ({:.4}, {:.4}){}",
            marker,
            venue.id,
            venue.name,
            venue.lat,
            venue.lon,
            if venue.info.is_empty() {
                String::new()
            } else {
                format!(" - {}", venue.info)
            }
        );
    }

    Ok(())
}
