//! Voronoi mosaic CLI
//!
//! Scatters random colored sites over a canvas, paints every pixel with the
//! color of its nearest site and writes the result as a PNG.
//!
//! Run with: `mosaic -p 20 -w 800 -h 600`
//!
//! ## YAML config file
//!
//! ```yaml
//! points: 20
//! width: 800
//! height: 600
//! seed: 7
//! output: mosaic.png
//! show_sites: false
//! ```
//!
//! Run with: `mosaic --config mosaic.yaml`. Flags given on the command line
//! win over values from the file.
//!
//! Flags may be written Go-style with one or two dashes (`-help`, `--p 5`).

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Deserialize;

use mosaic_core::{draw_sites, CpuBackend, MosaicConfig, SiteCollection, VoronoiComputer};

const DEFAULT_OUTPUT: &str = "image.png";

/// Long flag names that may also be spelled with a single dash
const LONG_FLAGS: &[&str] = &["help", "seed", "output", "config", "show-sites"];

#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(about = "Render a random Voronoi mosaic to a PNG", long_about = None)]
#[command(disable_help_flag = true)]
struct Args {
    /// Number of origin points (p >= 0) [default: 5]
    #[arg(short = 'p', allow_negative_numbers = true)]
    points: Option<i64>,

    /// Canvas width in pixels [default: 640]
    #[arg(short = 'w', allow_negative_numbers = true)]
    width: Option<i64>,

    /// Canvas height in pixels [default: 480]
    #[arg(short = 'h', allow_negative_numbers = true)]
    height: Option<i64>,

    /// Print usage and flag descriptions (the image is still generated)
    #[arg(long)]
    help: bool,

    /// Random seed for reproducibility (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path [default: image.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw site positions as dots
    #[arg(long)]
    show_sites: bool,
}

/// YAML config file format
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    points: Option<i64>,
    #[serde(default)]
    width: Option<i64>,
    #[serde(default)]
    height: Option<i64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    show_sites: Option<bool>,
}

fn load_config(path: &PathBuf) -> anyhow::Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {:?}", path))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {:?}", path))
}

/// Fully resolved run settings
#[derive(Debug)]
struct Settings {
    points: i64,
    width: i64,
    height: i64,
    seed: Option<u64>,
    output: PathBuf,
    show_sites: bool,
}

/// Merge CLI args over file values over built-in defaults.
fn resolve_settings(args: &Args, file: FileConfig) -> Settings {
    fn pick<T: std::fmt::Debug>(name: &str, cli: Option<T>, file: Option<T>, default: T) -> T {
        match (cli, file) {
            (Some(cli), Some(file)) => {
                warn!("{} from command line ({:?}) overrides config file ({:?})", name, cli, file);
                cli
            }
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => default,
        }
    }

    Settings {
        points: pick("points", args.points, file.points, MosaicConfig::DEFAULT_POINTS),
        width: pick("width", args.width, file.width, MosaicConfig::DEFAULT_WIDTH),
        height: pick("height", args.height, file.height, MosaicConfig::DEFAULT_HEIGHT),
        seed: args.seed.or(file.seed),
        output: pick("output", args.output.clone(), file.output, PathBuf::from(DEFAULT_OUTPUT)),
        show_sites: args.show_sites || file.show_sites.unwrap_or(false),
    }
}

/// Rewrite Go-style flags into the spelling clap expects.
///
/// `-help`/`-seed`/... gain a second dash and `--p`/`--w`/`--h`/`--o` lose one.
/// Everything after a bare `--` is passed through untouched.
fn normalize_args<I: IntoIterator<Item = String>>(raw: I) -> Vec<String> {
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in raw.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let stripped = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
        let Some(body) = stripped else {
            out.push(arg);
            continue;
        };
        let name = body.split('=').next().unwrap_or(body);

        if LONG_FLAGS.contains(&name) {
            out.push(format!("--{}", body));
        } else if matches!(name, "p" | "w" | "h" | "o") {
            out.push(format!("-{}", body));
        } else {
            out.push(arg);
        }
    }
    out
}

fn print_usage(settings: &Settings) {
    println!("Voronoi mosaic generator");
    println!("How to use:");
    println!("\tIf you only want an image:");
    println!(
        "\tjust run `mosaic` and it will generate a {} by {} image with {} points.\n",
        settings.width, settings.height, settings.points
    );
    println!("If you want to customize your image size and amount of points, check the flag description:");
    // Flag descriptions go to stderr, like Go's flag.PrintDefaults
    eprintln!("{}", Args::command().render_help());
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse_from(normalize_args(std::env::args()));
    debug!("{:?}", args);

    let file = args.config.as_ref().map(load_config).transpose()?.unwrap_or_default();
    let settings = resolve_settings(&args, file);

    // Help does not stop the run
    if args.help {
        print_usage(&settings);
    }

    let config = MosaicConfig::new(settings.points, settings.width, settings.height)?;
    let seed = settings.seed.unwrap_or_else(wall_clock_seed);
    info!("Using seed: {}", seed);

    let sites = SiteCollection::seeded(config.points, config.width, config.height, seed);
    debug!("sites: {:?}", sites.sites);

    let image = render(&config, &sites, settings.show_sites)?;
    save_png(&image, &settings.output)?;

    println!(
        "Output saved to: {:?} ({}x{}, {} points)",
        settings.output, config.width, config.height, config.points
    );
    Ok(())
}

/// Rasterize `sites` with a progress bar over rows
fn render(
    config: &MosaicConfig,
    sites: &SiteCollection,
    show_sites: bool,
) -> anyhow::Result<image::RgbaImage> {
    let progress = ProgressBar::new(config.height as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut computer = VoronoiComputer::new(CpuBackend::new());
    let result = computer
        .compute_with_progress(config.width, config.height, sites.as_slice(), &mut |_| {
            progress.inc(1)
        })
        .with_context(|| {
            format!(
                "cannot rasterize {}x{} canvas with {} points",
                config.width, config.height, config.points
            )
        });
    match &result {
        Ok(_) => progress.finish_and_clear(),
        Err(_) => progress.abandon(),
    }
    let result = result?;
    info!("Rasterized in {:.1} ms", start.elapsed().as_secs_f64() * 1000.0);
    debug!("cell areas: {:?}", result.cell_areas);

    let mut image = result.to_image()?;
    if show_sites {
        draw_sites(&mut image, sites.as_slice());
    }
    Ok(image)
}

fn save_png(image: &image::RgbaImage, output: &Path) -> anyhow::Result<()> {
    image
        .save_with_format(output, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {:?}", output))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("mosaic")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_normalize_go_style_flags() {
        let normalized = normalize_args(argv(&["-help", "--p", "3", "--w=10", "-seed", "4", "-h", "-2", "--o", "x.png"]));
        assert_eq!(
            normalized,
            argv(&["--help", "-p", "3", "-w=10", "--seed", "4", "-h", "-2", "-o", "x.png"])
        );
    }

    #[test]
    fn test_normalize_leaves_values_and_passthrough() {
        let normalized = normalize_args(argv(&["-o", "out.png", "--", "-help"]));
        assert_eq!(normalized, argv(&["-o", "out.png", "--", "-help"]));
    }

    #[test]
    fn test_parse_double_dash_output() {
        let args = Args::parse_from(normalize_args(argv(&["--o", "out.png"])));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(normalize_args(argv(&[])));
        let settings = resolve_settings(&args, FileConfig::default());
        assert_eq!((settings.points, settings.width, settings.height), (5, 640, 480));
        assert_eq!(settings.output, PathBuf::from("image.png"));
        assert!(!settings.show_sites);
        assert!(!args.help);
    }

    #[test]
    fn test_parse_short_flags_and_negative() {
        let args = Args::parse_from(normalize_args(argv(&["-p", "-3", "-w", "8", "-h", "9", "-help"])));
        assert_eq!(args.points, Some(-3));
        assert_eq!(args.width, Some(8));
        assert_eq!(args.height, Some(9));
        assert!(args.help);
    }

    #[test]
    fn test_cli_overrides_file() {
        let args = Args::parse_from(normalize_args(argv(&["-p", "12"])));
        let file: FileConfig = serde_yaml::from_str("points: 3\nwidth: 20\nseed: 9\nshow_sites: true\n").unwrap();
        let settings = resolve_settings(&args, file);
        assert_eq!(settings.points, 12);
        assert_eq!(settings.width, 20);
        assert_eq!(settings.height, 480);
        assert_eq!(settings.seed, Some(9));
        assert!(settings.show_sites);
    }

    #[test]
    fn test_unknown_config_key_rejected() {
        assert!(serde_yaml::from_str::<FileConfig>("pionts: 3\n").is_err());
    }
}
