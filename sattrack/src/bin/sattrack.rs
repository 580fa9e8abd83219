use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use sattrack_lib::{
    config::Config,
    geocoder::OpenWeatherMapGeocoder,
    imagery::SatelliteImagery,
    tle_source::{N2yoClient, TleSetSource, TleSource},
    view::SatelliteViewBuilder,
};
use sattypes::prelude::SatelliteId;

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file.
    ///
    /// Defaults are used when not provided, API keys may also come from the environment.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image URL to attach to the record as-is
    #[arg(long, group = "image")]
    image_url: Option<String>,

    /// Look up an image for the satellite name
    #[arg(long, group = "image")]
    lookup_image: bool,

    /// Serve TLEs from a local TLE set file instead of N2YO
    #[arg(long = "tle-file")]
    tle_file: Option<PathBuf>,

    /// Propagate to this RFC 3339 instant instead of now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// NORAD catalog number
    satellite_id: SatelliteId,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let cfg = Config::load_or_default(opts.config.as_ref())?;
    let agent = cfg.http.agent()?;

    let tle_source: Box<dyn TleSource> = match &opts.tle_file {
        Some(p) => Box::new(TleSetSource::load(p)?),
        None => Box::new(N2yoClient::from_config(agent.clone(), &cfg.n2yo)?),
    };
    let payload = tle_source.tle_payload(opts.satellite_id)?;

    let image_url = if opts.lookup_image {
        let imagery = SatelliteImagery::from_config(agent.clone(), &cfg.imagery)?;
        Some(imagery.image_url(&payload.info.satname))
    } else {
        opts.image_url.clone()
    };

    let geocoder = OpenWeatherMapGeocoder::from_config(agent, &cfg.geocoder)?;
    let builder = SatelliteViewBuilder::new(geocoder);
    let at = opts.at.unwrap_or_else(Utc::now);
    let record = builder.build_display_record_at(image_url.as_deref(), &payload, at)?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
