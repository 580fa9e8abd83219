use clap::Parser;
use sattrack_lib::convert::to_decimal_degrees;

/// Convert D:M:S angles to decimal degrees
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Angles to convert, e.g. 28:15:49.9 or -81:30:00
    #[arg(required = true, allow_hyphen_values = true)]
    angles: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    for angle in opts.angles.iter() {
        let degrees = to_decimal_degrees(angle)?;
        println!("{angle}\t{degrees}");
    }

    Ok(())
}
