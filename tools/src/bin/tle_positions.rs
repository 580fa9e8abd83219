use chrono::{DateTime, Utc};
use clap::Parser;
use sattrack_lib::{propagator::propagate, tle_source::TleSetSource};
use std::fs::File;
use std::io::{self, prelude::*};
use std::path::PathBuf;

/// Print the sub-point, elevation and ground speed of every entry in a TLE set file
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Propagate to this RFC 3339 instant instead of now
    #[arg(short = 'a', long)]
    at: Option<DateTime<Utc>>,

    /// Output file path to write, stdout when not provided
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// TLE set file to read
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let mut output: Box<dyn Write> = match &opts.output {
        Some(p) => Box::new(File::create(p)?),
        None => Box::new(io::stdout().lock()),
    };

    let src = TleSetSource::load(&opts.input)?;
    let at = opts.at.unwrap_or_else(Utc::now);

    writeln!(
        output,
        "name,catalog_number,lat,long,latitude,longitude,elevation_km,ground_speed_kmps"
    )?;
    for tle in src.tle_set() {
        let s = propagate(tle, at)?;
        writeln!(
            output,
            "\"{}\",{},{},{},{},{},{},{}",
            tle.name,
            tle.catalog_number().unwrap_or_default(),
            s.sub_latitude,
            s.sub_longitude,
            s.latitude,
            s.longitude,
            s.elevation_display(),
            s.ground_speed_kmps,
        )?;
    }

    Ok(())
}
