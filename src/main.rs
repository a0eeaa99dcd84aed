//! Simulated walk toward the stadium
//!
//! Drives the full pipeline with scripted providers: a location thread and
//! a motion thread feed the update loop, snapshots are printed as they are
//! recomputed, and haptic edges are reported.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use stadium_compass::algorithms::compute_bearing_and_distance;
use stadium_compass::api::{ensure_location_access, CsvFormatter};
use stadium_compass::{
    AppConfig, CallbackNavigationApi, ConfigurationManager, GeoPoint, HeadingReading, JsonFormatter,
    LocationProvider, MockLocationProvider, MockMotionProvider, MotionProvider, SnapshotFormatter,
    TextFormatter, UpdateLoop, STADIUM,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Compact,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "stadium-compass", about = "Point a simulated device at the stadium")]
struct Args {
    /// Starting latitude (degrees)
    #[arg(long, default_value_t = 51.5007, allow_negative_numbers = true)]
    start_lat: f64,

    /// Starting longitude (degrees)
    #[arg(long, default_value_t = -0.1246, allow_negative_numbers = true)]
    start_lon: f64,

    /// Number of fixes along the walk
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Fraction of the way to the stadium the walk covers
    #[arg(long, default_value_t = 0.9)]
    progress: f64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
    format: OutputFormat,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Position jitter (meters) applied to each fix
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Sleep between samples as a real device would
    #[arg(long)]
    realtime: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .get_config()
            .clone(),
        None => AppConfig::default(),
    };

    let start = GeoPoint::new(args.start_lat, args.start_lon);
    let end = GeoPoint::new(
        start.lat + (STADIUM.lat - start.lat) * args.progress,
        start.lon + (STADIUM.lon - start.lon) * args.progress,
    );
    let location = scripted_walk(start, end, args.steps, args.jitter, args.seed);
    let motion = MockMotionProvider::sway(config.motion_interval(), args.steps * 2, 8.0);

    let haptics = Arc::new(AtomicU32::new(0));
    let api = build_api(&config, args.format, Arc::clone(&haptics))?;

    let update_loop = UpdateLoop::spawn(api, config.channel_capacity)?;
    let producers = [
        spawn_location_thread(location, update_loop.sender(), args.realtime),
        spawn_motion_thread(motion, update_loop.sender(), args.realtime),
    ];
    for producer in producers {
        producer
            .join()
            .map_err(|_| anyhow::anyhow!("sensor thread panicked"))??;
    }

    let api = update_loop.shutdown()?;
    let snapshot = api.snapshot();
    if let Some(derived) = snapshot.derived {
        log::info!(
            "Finished {} from the stadium after {} updates, {} haptic(s)",
            stadium_compass::format_distance(derived.distance_meters),
            snapshot.sequence_number,
            haptics.load(Ordering::Relaxed)
        );
    }
    Ok(())
}

/// Walk with a heading that swings around the true bearing so the device
/// passes in and out of alignment
fn scripted_walk(start: GeoPoint, end: GeoPoint, steps: usize, jitter: f64, seed: u64) -> MockLocationProvider {
    let mut provider = MockLocationProvider::new();
    let steps = steps.max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let point = GeoPoint::new(
            start.lat + (end.lat - start.lat) * t,
            start.lon + (end.lon - start.lon) * t,
        );
        let (bearing, _) = compute_bearing_and_distance(point, STADIUM);
        let swing = 30.0 * (i as f64 * 0.7).cos() * (1.0 - t);
        provider.push_fix(point);
        provider.push_heading(HeadingReading::magnetic((bearing + swing).rem_euclid(360.0)));
    }
    provider.with_jitter(jitter, 0.0, seed)
}

fn build_api(
    config: &AppConfig,
    format: OutputFormat,
    haptics: Arc<AtomicU32>,
) -> anyhow::Result<CallbackNavigationApi> {
    let mut api = CallbackNavigationApi::from_config(config)?;
    let formatter = SnapshotFormatter::new();

    if format == OutputFormat::Csv {
        println!("{}", CsvFormatter::new().header());
    }

    api.register_snapshot_callback(Box::new(move |snapshot| {
        let formatted = formatter.format(snapshot);
        match format {
            OutputFormat::Text => println!("{}", TextFormatter::new().format_text(&formatted)),
            OutputFormat::Compact => println!("{}", TextFormatter::compact().format_text(&formatted)),
            OutputFormat::Csv => println!("{}", CsvFormatter::new().format_csv(&formatted)),
            OutputFormat::Json => match JsonFormatter::new().format_json(&formatted) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("Failed to serialize snapshot: {}", e),
            },
        }
    }));

    api.register_haptic_callback(Box::new(move |event| {
        haptics.fetch_add(1, Ordering::Relaxed);
        log::info!("*buzz* aligned at {:.1}°", event.bearing_to_target);
    }));

    Ok(api)
}

fn spawn_location_thread(
    mut provider: MockLocationProvider,
    sender: stadium_compass::UpdateSender,
    realtime: bool,
) -> thread::JoinHandle<anyhow::Result<()>> {
    thread::spawn(move || {
        ensure_location_access(&mut provider)?;

        while let Some(update) = provider.poll()? {
            sender.send(update)?;
            if realtime {
                thread::sleep(Duration::from_millis(500));
            }
        }
        Ok(())
    })
}

fn spawn_motion_thread(
    mut provider: MockMotionProvider,
    sender: stadium_compass::UpdateSender,
    realtime: bool,
) -> thread::JoinHandle<anyhow::Result<()>> {
    thread::spawn(move || {
        let interval = provider.sample_interval();
        while let Some(update) = provider.poll()? {
            sender.send(update)?;
            if realtime {
                thread::sleep(interval);
            }
        }
        Ok(())
    })
}
