use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tdlog::{LoopingReader, MappedLog, PoseRecord, TdlReader, TdlWriter};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Record, replay and inspect Tracked Data Log (.tdl) files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a synthetic object spinning about the Y axis
    Record(RecordArgs),
    /// Print the stored name and every record
    Dump(DumpArgs),
    /// Summarize a log without decoding it record by record
    Info { path: PathBuf },
    /// Check the header; exits 1 if it does not match
    Validate { path: PathBuf },
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Output path; `.tdl` is appended if missing
    path: PathBuf,

    /// Tracked object name (stored truncated to 32 bytes)
    #[arg(short, long, default_value = "Object")]
    name: String,

    /// Samples per second
    #[arg(long, default_value_t = 60.0)]
    rate_hz: f64,

    /// Rotation speed
    #[arg(long, default_value_t = 45.0)]
    degrees_per_sec: f64,

    /// Distance of the object from the origin along X
    #[arg(long, default_value_t = 0.0)]
    radius: f32,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration_secs: Option<f64>,
}

#[derive(Args, Debug)]
struct DumpArgs {
    path: PathBuf,

    /// Play the log this many times, wrapping at the end
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    loops: u64,

    /// Stop after printing this many records
    #[arg(long)]
    limit: Option<u64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Record(args) => record(args),
        Command::Dump(args) => dump(args),
        Command::Info { path } => show_info(path),
        Command::Validate { path } => validate(path),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Sample period and optional stop time, checked before anything touches
/// the filesystem.
fn pacing(rate_hz: f64, duration_secs: Option<f64>) -> anyhow::Result<(Duration, Option<Duration>)> {
    if rate_hz <= 0.0 || !rate_hz.is_finite() {
        bail!("--rate-hz must be a positive number");
    }
    let period = Duration::try_from_secs_f64(1.0 / rate_hz)
        .with_context(|| format!("--rate-hz {rate_hz} gives an unusable sample period"))?;
    if period.is_zero() {
        bail!("--rate-hz {rate_hz} is too high");
    }
    let limit = duration_secs
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("--duration-secs {secs} is not a valid duration"))
        })
        .transpose()?;
    Ok((period, limit))
}

fn record(args: RecordArgs) -> anyhow::Result<()> {
    let (period, limit) = pacing(args.rate_hz, args.duration_secs)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let mut writer = TdlWriter::create(&args.path, &args.name)?;
    info!(
        path = %writer.path().display(),
        name = writer.name(),
        rate_hz = args.rate_hz,
        "recording, press Ctrl+C to stop"
    );

    let start = Instant::now();
    let mut next_tick = start;
    let mut last_report = start;

    while running.load(Ordering::SeqCst) {
        let elapsed = start.elapsed();
        if limit.is_some_and(|l| elapsed >= l) {
            break;
        }

        let degrees = (elapsed.as_secs_f64() * args.degrees_per_sec).rem_euclid(360.0);
        let pose = PoseRecord::rotation_y(degrees.to_radians() as f32, [args.radius, 0.0, 0.0]);
        writer.write_record(&pose)?;

        if last_report.elapsed() >= Duration::from_secs(5) {
            info!(records = writer.records_written(), angle = degrees, "status");
            last_report = Instant::now();
        }

        next_tick += period;
        if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    writer.sync()?;
    println!(
        "Recorded {} poses of '{}' to {} in {:.1}s",
        writer.records_written(),
        writer.name(),
        writer.path().display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn dump(args: DumpArgs) -> anyhow::Result<()> {
    let reader = TdlReader::open(&args.path)
        .with_context(|| format!("cannot read {}", args.path.display()))?;
    println!("name: {}", reader.name());

    let mut looping = LoopingReader::new(reader);
    let mut printed = 0u64;

    while let Some(pose) = looping.next_record()? {
        if looping.loops() >= args.loops || args.limit.is_some_and(|l| printed >= l) {
            break;
        }
        print_pose(printed, &pose);
        printed += 1;
    }

    if printed == 0 {
        println!("(no records)");
    }
    Ok(())
}

fn print_pose(index: u64, pose: &PoseRecord) {
    let [x, y, z] = pose.position;
    let m = &pose.orientation;
    println!(
        "{:>6}  pos=({:.4}, {:.4}, {:.4})  rot=[{:.4} {:.4} {:.4} | {:.4} {:.4} {:.4} | {:.4} {:.4} {:.4}]",
        index, x, y, z, m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8]
    );
}

fn show_info(path: PathBuf) -> anyhow::Result<()> {
    let log = MappedLog::open(&path).with_context(|| format!("cannot map {}", path.display()))?;
    #[cfg(unix)]
    if let Err(e) = log.advise_sequential() {
        tracing::warn!(error = %e, "madvise failed");
    }

    println!("Tracked Data Log");
    println!("================");
    println!("File:         {}", path.display());
    println!("Name:         {}", log.name());
    println!("Size:         {} bytes", log.len());
    println!("Data offset:  {}", log.data_offset());
    println!("Records:      {}", log.record_count());
    if log.trailing_bytes() > 0 {
        println!(
            "Trailing:     {} bytes (truncated final record)",
            log.trailing_bytes()
        );
    }

    if let Some(first) = log.iter().next() {
        let last = log.iter().last().unwrap_or(first);
        println!("First pos:    {:?}", first.position);
        println!("Last pos:     {:?}", last.position);
    }
    Ok(())
}

fn validate(path: PathBuf) -> anyhow::Result<()> {
    let mut file =
        std::fs::File::open(&path).with_context(|| format!("cannot open {}", path.display()))?;
    if tdlog::format::validate_header(&mut file)? {
        println!("{}: valid", path.display());
        Ok(())
    } else {
        bail!("{}: not a tracked data log", path.display())
    }
}
