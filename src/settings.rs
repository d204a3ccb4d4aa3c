use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Quantity, RefractError};
use crate::input::{self, Inputs};
use crate::scene::Canvas;
use crate::sweep::{Sweep, MAX_SWEEP_STEPS};

/// Environment variable prefix for configuration overrides, e.g. `REFRACT_N2=1.33`.
pub const ENV_PREFIX: &str = "refract";
/// Separates nested keys in environment overrides, e.g. `REFRACT_CANVAS__WIDTH=1024`.
pub const ENV_SEPARATOR: &str = "__";
/// Environment variable naming the directory that holds `config/`.
pub const ROOT_DIR_VAR: &str = "REFRACT_ROOT_DIR";

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
        let config_dir = dir.join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn default_config_is_valid() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.alpha, 30.0);
        assert_eq!(settings.n1, 1.0);
        assert_eq!(settings.n2, 1.5);
        assert_eq!(settings.canvas, Canvas::default());
        assert!(settings.sweep.is_none());
    }

    #[test]
    fn local_config_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "default.toml", "alpha = 10.0\nn1 = 1.0\nn2 = 1.5\n");
        write_config(dir.path(), "local.toml", "alpha = 45.0\nn1 = 1.5\nn2 = 1.0\n");
        let settings = load_from_root(dir.path(), environment()).unwrap();
        assert_eq!(settings.alpha, 45.0);
        assert_eq!(settings.n1, 1.5);
    }

    #[test]
    fn sweep_section_is_read() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "default.toml",
            "alpha = 0.0\nn1 = 1.0\nn2 = 1.33\n\n[sweep]\nstart = 0.0\nend = 89.0\nsteps = 90\n",
        );
        let settings = load_from_root(dir.path(), environment()).unwrap();
        assert_eq!(
            settings.sweep,
            Some(Sweep {
                start: 0.0,
                end: 89.0,
                steps: 90
            })
        );
    }

    #[test]
    fn zero_index_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "default.toml", "alpha = 0.0\nn1 = 1.0\nn2 = 0.0\n");
        assert!(load_from_root(dir.path(), environment()).is_err());
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "default.toml", "alpha = 10.0\nn1 = 1.0\nn2 = 1.5\n");
        let vars = config::Map::from([
            ("REFRACT_N2".to_string(), "1.33".to_string()),
            ("REFRACT_CANVAS__WIDTH".to_string(), "1024".to_string()),
            ("REFRACT_CANVAS__HEIGHT".to_string(), "512".to_string()),
        ]);
        let settings = load_from_root(dir.path(), environment().source(Some(vars))).unwrap();
        assert_eq!(settings.n2, 1.33);
        assert_eq!(settings.canvas.width, 1024.0);
        assert_eq!(settings.canvas.height, 512.0);
        assert_eq!(settings.canvas.ray_length, 100.0);
    }

    #[test]
    fn cli_overrides_config() {
        let mut settings = load_default_config().unwrap();
        let args = CliArgs::parse_from(["refract", "-a", "60", "--n1", "1.5", "--n2", "1.0"]);
        apply_args(&mut settings, &args);
        assert_eq!(settings.inputs(), Inputs { alpha: 60.0, n1: 1.5, n2: 1.0 });
    }

    #[test]
    fn cli_sweep_overrides_config() {
        let mut settings = load_default_config().unwrap();
        let args = CliArgs::parse_from(["refract", "--sweep", "0", "90", "91", "-o", "out.json"]);
        apply_args(&mut settings, &args);
        assert_eq!(
            settings.sweep,
            Some(Sweep {
                start: 0.0,
                end: 90.0,
                steps: 91
            })
        );
        assert_eq!(settings.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn cli_oversized_sweep_is_ignored() {
        let mut settings = load_default_config().unwrap();
        let args = CliArgs::parse_from(["refract", "--sweep", "0", "90", "1e19"]);
        apply_args(&mut settings, &args);
        assert!(settings.sweep.is_none());

        let args = CliArgs::parse_from(["refract", "--sweep", "0", "90", "1000001"]);
        apply_args(&mut settings, &args);
        assert!(settings.sweep.is_none());
    }

    #[test]
    fn cli_output_without_sweep_flag() {
        let args = CliArgs::try_parse_from(["refract", "-o", "out.json"]).unwrap();
        let mut settings = load_default_config().unwrap();
        settings.sweep = Some(Sweep {
            start: 0.0,
            end: 90.0,
            steps: 91,
        });
        apply_args(&mut settings, &args);
        assert_eq!(settings.output, Some(PathBuf::from("out.json")));
        assert!(settings.sweep.is_some());
    }

    #[test]
    fn cli_rejects_unusable_numbers() {
        assert!(CliArgs::try_parse_from(["refract", "--n2", "glass"]).is_err());
        assert!(CliArgs::try_parse_from(["refract", "-a", "NaN"]).is_err());
        let args = CliArgs::try_parse_from(["refract", "-a", "-15"]).unwrap();
        assert_eq!(args.alpha, Some(-15.0));
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Incidence angle in degrees.
    pub alpha: f64,
    /// Refractive index of the medium the ray starts in.
    pub n1: f64,
    /// Refractive index of the medium the ray enters.
    pub n2: f64,
    #[serde(default)]
    pub canvas: Canvas,
    pub sweep: Option<Sweep>,
    /// Where to write the sweep table. Printed to stdout when unset.
    pub output: Option<PathBuf>,
    /// Read `alpha n1 n2` lines from stdin instead of using the configured inputs.
    #[serde(default)]
    pub stdin: bool,
}

impl Settings {
    pub fn inputs(&self) -> Inputs {
        Inputs {
            alpha: self.alpha,
            n1: self.n1,
            n2: self.n2,
        }
    }
}

/// Load `config/default.toml` from the project root, without local,
/// environment or command-line overrides.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Load the full configuration stack: the config file, then `REFRACT_*`
/// environment variables, then command-line arguments.
pub fn load_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let mut config = load_from_root(&root, environment())?;

    let args = CliArgs::parse();
    apply_args(&mut config, &args);

    validate_config(&config)?;

    info!("{}", config);

    Ok(config)
}

/// `REFRACT_*` environment variables, with `__` between nested keys.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
}

fn load_from_root(root: &Path, environment: Environment) -> Result<Settings> {
    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(environment)
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

fn apply_args(config: &mut Settings, args: &CliArgs) {
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(n1) = args.n1 {
        config.n1 = n1;
    }
    if let Some(n2) = args.n2 {
        config.n2 = n2;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }

    if let Some(values) = &args.sweep {
        match values.as_slice() {
            [start, end, steps]
                if *steps >= 0.0 && steps.fract() == 0.0 && *steps <= MAX_SWEEP_STEPS as f64 =>
            {
                config.sweep = Some(Sweep {
                    start: *start,
                    end: *end,
                    steps: *steps as usize,
                });
            }
            _ => warn!(
                "Sweep requires start, end and a whole number of steps up to {}. Got {:?}, ignoring.",
                MAX_SWEEP_STEPS,
                values
            ),
        }
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if args.stdin {
        config.stdin = true;
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the REFRACT_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var(ROOT_DIR_VAR) {
        return Ok(PathBuf::from(path));
    }

    // Fallback: walk upward from the executable to the nearest directory holding "config"
    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Could not find project root directory, set {}", ROOT_DIR_VAR))
}

fn validate_config(config: &Settings) -> Result<()> {
    crate::snell::critical_angle(config.n1, config.n2).context("Invalid refractive indices")?;
    crate::snell::solve_refraction(config.alpha, config.n1, config.n2)
        .context("Invalid incidence angle")?;
    if !(config.canvas.width > 0.0 && config.canvas.height > 0.0) {
        return Err(anyhow!(
            "Canvas dimensions must be greater than 0, got {}x{}",
            config.canvas.width,
            config.canvas.height
        ));
    }
    if let Some(sweep) = &config.sweep {
        sweep.validate().context("Invalid sweep")?;
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "refract - Snell's law at a planar interface")]
pub struct CliArgs {
    /// Incidence angle in degrees, measured from the surface normal.
    #[arg(short, long, allow_negative_numbers = true, value_parser = parse_alpha)]
    alpha: Option<f64>,

    /// Refractive index of the medium the ray starts in.
    #[arg(long, value_parser = parse_n1)]
    n1: Option<f64>,

    /// Refractive index of the medium the ray enters.
    #[arg(long, value_parser = parse_n2)]
    n2: Option<f64>,

    /// Canvas width in pixels for the visualization.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels for the visualization.
    #[arg(long)]
    height: Option<f64>,

    /// Tabulate the refracted angle over a range of incidence angles.
    /// Format: start end steps
    #[arg(long, num_args = 3, allow_negative_numbers = true)]
    sweep: Option<Vec<f64>>,

    /// File to write the sweep to, whether the sweep comes from `--sweep` or
    /// the configuration file. Files ending in `.json` are written as JSON.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read `alpha n1 n2` lines from stdin and print a readout for each.
    #[arg(long)]
    stdin: bool,
}

fn parse_alpha(s: &str) -> std::result::Result<f64, RefractError> {
    input::parse_field(s, Quantity::IncidenceAngle)
}

fn parse_n1(s: &str) -> std::result::Result<f64, RefractError> {
    input::parse_field(s, Quantity::OriginIndex)
}

fn parse_n2(s: &str) -> std::result::Result<f64, RefractError> {
    input::parse_field(s, Quantity::DestinationIndex)
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incidence Angle: {:.6}
  - Refractive Index n1: {:.6}
  - Refractive Index n2: {:.6}
  - Canvas: {}x{} (ray length {})
  - Sweep: {:?}
  ",
            self.alpha,
            self.n1,
            self.n2,
            self.canvas.width,
            self.canvas.height,
            self.canvas.ray_length,
            self.sweep,
        )
    }
}
