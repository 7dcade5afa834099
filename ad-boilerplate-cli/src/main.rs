//! areaDetector Boilerplate CLI Application
//!
//! Command-line front end for the ad-boilerplate library. It adds:
//! - Target validation (must be an existing `AD<Device>` folder)
//! - Logging setup (errors only, or step-by-step with --debug)
//! - Optional TOML generator configuration
//! - Writing `<Device>Detector_boilerplate` to the output directory

use ad_boilerplate::{Collection, DriverDirectory, Generator, GeneratorConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

mod config;

/// Utility for creating boilerplate ophyd classes
#[derive(Parser, Debug)]
#[command(name = "collect-ad-boilerplate")]
#[command(about = "Utility for creating boilerplate ophyd classes", long_about = None)]
#[command(version)]
struct Args {
    /// Location of locally installed areaDetector driver folder structure
    /// (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    target: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Extra verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to generator configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write the boilerplate file to (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Fail on malformed record declarations instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Also print the collected PV mapping as JSON
    #[arg(long)]
    dump_mapping: bool,
}

fn main() {
    let args = Args::parse();

    init_logging(args.debug, args.verbose);

    if let Err(err) = run(&args) {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    log::debug!("areaDetector boilerplate CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using ad-boilerplate library v{}", ad_boilerplate::VERSION);

    let target = match &args.target {
        Some(target) => target.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let driver = DriverDirectory::open(&target)?;

    let mut generator_config = match &args.config {
        Some(path) => {
            log::debug!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => GeneratorConfig::new(),
    };
    if args.strict {
        generator_config.strict = true;
    }

    let generator = Generator::new(generator_config);
    let collection = generator
        .collect(&driver)
        .with_context(|| format!("Failed to collect PVs from {:?}", driver.root))?;

    let file_name = collection.names.output_file_name();
    let output_path = match &args.output_dir {
        Some(dir) => dir.join(&file_name),
        None => PathBuf::from(&file_name),
    };

    write_output(&generator, &collection, &output_path)?;

    if args.dump_mapping {
        print_mapping(&collection)?;
    }

    println!(
        "Done. Temporary boilerplate file saved to {}",
        output_path.display()
    );
    Ok(())
}

/// Create the boilerplate file and write both classes into it
fn write_output(generator: &Generator, collection: &Collection, path: &Path) -> Result<()> {
    log::debug!("Writing boilerplate to {:?}", path);

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut out = BufWriter::new(file);

    generator
        .write(&mut out, collection)
        .with_context(|| format!("Failed to write output file: {:?}", path))?;
    out.flush()
        .with_context(|| format!("Failed to write output file: {:?}", path))?;

    Ok(())
}

/// Print the collected mapping as pretty JSON on stdout
fn print_mapping(collection: &Collection) -> Result<()> {
    let summary = serde_json::json!({
        "device": collection.names.device,
        "detector": collection.names.detector,
        "cam": collection.names.cam,
        "templates": collection.templates,
        "includes_file_handling": collection.signals.includes_file_handling,
        "stats": collection.stats,
        "signals": collection.signals.mapping.iter().collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Initialize logging based on the debug flag and verbosity level
fn init_logging(debug: bool, verbose: u8) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = match (debug, verbose) {
        (_, v) if v >= 2 => LevelFilter::Trace,
        (true, _) | (_, 1) => LevelFilter::Debug,
        _ => LevelFilter::Error,
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
