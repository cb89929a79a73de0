use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use satpredict::elements::OrbitalElements;
use satpredict::error::PredictError;
use satpredict::file::{read_horizon_file, read_tle_file};
use satpredict::observer::GroundStation;
use satpredict::passes::PassPredictor;

/// Predicts passes of satellites over a ground station.
#[derive(Debug, Parser)]
struct Args {
    /// File of three-line element sets
    tle_file: String,

    /// Only satellites whose name contains this (case-insensitive)
    #[arg(short, long)]
    name: Option<String>,

    /// Station latitude, degrees north
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Station longitude, degrees east
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Station height, metres
    #[arg(long, default_value_t = 0.0)]
    height: f64,

    /// File of 36 horizon elevations, degrees
    #[arg(long)]
    horizon: Option<String>,

    /// RFC 3339 start time [default: now]
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    #[arg(long, default_value_t = 24)]
    hours: i64,

    /// Start a quarter orbit early, to catch a pass already in progress
    #[arg(long)]
    wind_back: bool,

    /// Downlink frequency in Hz, shown Doppler-corrected at AOS and LOS
    #[arg(long)]
    downlink: Option<i64>,

    /// Uplink frequency in Hz, shown Doppler-corrected at AOS and LOS
    #[arg(long)]
    uplink: Option<i64>,

    /// Also print positions through each pass, this many seconds apart
    #[arg(long)]
    track: Option<i64>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PredictError> {
    let station = match &args.horizon {
        Some(path) => {
            let mask = read_horizon_file(path)?;
            GroundStation::with_horizon("station", args.lat, args.lon, args.height, &mask)?
        }
        None => GroundStation::new("station", args.lat, args.lon, args.height),
    };
    let start = args.start.unwrap_or_else(Utc::now);
    let filter = args.name.as_ref().map(|name| name.to_lowercase());

    for tle in read_tle_file(&args.tle_file)? {
        if let Some(filter) = &filter {
            if !tle.name.to_lowercase().contains(filter) {
                continue;
            }
        }

        let elements = OrbitalElements::new(tle);
        let name = elements.name().to_string();
        let mut predictor = match PassPredictor::new(elements, station.clone()) {
            Ok(predictor) => predictor,
            Err(PredictError::SatelliteNotVisible(_)) => {
                info!(satellite = %name, "skipping, never visible");
                continue;
            }
            Err(err) => return Err(err),
        };

        println!("== {} ==", name);
        for pass in predictor.passes(start, args.hours, args.wind_back)? {
            println!("{}", pass);
            println!("Pole crossing: {}", pass.pole_crossing);

            if let Some(freq) = args.downlink {
                let aos = predictor.downlink_freq(freq, pass.start_time);
                let los = predictor.downlink_freq(freq, pass.end_time);
                println!("Downlink: {} Hz at AOS, {} Hz at LOS", aos, los);
            }
            if let Some(freq) = args.uplink {
                let aos = predictor.uplink_freq(freq, pass.start_time);
                let los = predictor.uplink_freq(freq, pass.end_time);
                println!("Uplink: {} Hz at AOS, {} Hz at LOS", aos, los);
            }

            if let Some(step) = args.track {
                let minutes = pass.duration().num_minutes() + 1;
                for pos in predictor.positions(pass.start_time, step, 0, minutes) {
                    println!("  {}", pos);
                }
            }
            println!();
        }
    }

    Ok(())
}
