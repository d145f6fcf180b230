use clap::{Parser, Subcommand};
use psy_air::{SolverConfig, compare_wet_bulb_solvers, evaluate};
use psy_air::{saturation_pressure, saturation_temperature};
use psy_batch::{BatchError, load_solver_config, parse_pressure, parse_temperature, split_quantity};
use psy_core::{
    Pressure, PressureUnit, PsyError, PsyResult, QuantityKind, Temperature, TemperatureUnit,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "psy-cli")]
#[command(about = "Psychro CLI - humid air property calculator", long_about = None)]
struct Cli {
    /// Solver settings YAML (overrides a batch file's solver block)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every property of one state
    Props {
        /// Dry-bulb temperature, e.g. "30 C"
        #[arg(short, long)]
        temperature: String,
        /// Relative humidity in percent
        #[arg(long)]
        rh: f64,
        /// Total pressure, e.g. "101.325 kPa"
        #[arg(short, long, default_value = "1 atm")]
        pressure: String,
        /// Treat the pressure as a gauge reading
        #[arg(long)]
        gauge: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Saturation pressure of a temperature, or saturation temperature of a pressure
    Saturation {
        #[arg(short, long, conflicts_with = "pressure")]
        temperature: Option<String>,
        #[arg(short, long)]
        pressure: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Run both wet-bulb solvers and show how far apart they are
    WetBulb {
        #[arg(short, long)]
        temperature: String,
        #[arg(long)]
        rh: f64,
        #[arg(short, long, default_value = "1 atm")]
        pressure: String,
        #[arg(long)]
        gauge: bool,
    },
    /// Convert a temperature or pressure to another unit
    Convert {
        /// Quantity to convert, e.g. "14.7 psi"
        quantity: String,
        /// Target unit token, e.g. "kPa"
        target: String,
        /// Source pressure is a gauge reading
        #[arg(long)]
        gauge: bool,
    },
    /// Evaluate every state of a batch YAML file
    Batch {
        /// Path to the batch YAML file
        batch_path: PathBuf,
        /// Write the JSON report here instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Property(#[from] PsyError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = solver_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Props {
            temperature,
            rh,
            pressure,
            gauge,
            json,
        } => cmd_props(&temperature, rh, &pressure, gauge, json, &config),
        Commands::Saturation {
            temperature,
            pressure,
            json,
        } => cmd_saturation(temperature.as_deref(), pressure.as_deref(), json),
        Commands::WetBulb {
            temperature,
            rh,
            pressure,
            gauge,
        } => cmd_wet_bulb(&temperature, rh, &pressure, gauge, &config),
        Commands::Convert {
            quantity,
            target,
            gauge,
        } => {
            println!("{}", convert_quantity(&quantity, &target, gauge)?);
            Ok(())
        }
        Commands::Batch { batch_path, output } => {
            cmd_batch(&batch_path, output.as_deref(), cli.config.is_some().then_some(config))
        }
    }
}

fn solver_config(path: Option<&Path>) -> CliResult<SolverConfig> {
    match path {
        Some(path) => Ok(load_solver_config(path)?),
        None => Ok(SolverConfig::default()),
    }
}

fn cmd_props(
    temperature: &str,
    rh: f64,
    pressure: &str,
    gauge: bool,
    json: bool,
    config: &SolverConfig,
) -> CliResult<()> {
    let dry_bulb = parse_temperature(temperature)?;
    let pressure = parse_pressure(pressure, gauge)?;
    let props = evaluate(&dry_bulb, rh, &pressure, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    println!("Dry bulb:            {:>12.4} °C", props.dry_bulb_c);
    println!("Relative humidity:   {:>12.4} %", props.relative_humidity);
    println!("Pressure:            {:>12.2} Pa", props.pressure_pa);
    println!("Saturation pressure: {:>12.4} Pa", props.saturation_pressure_pa);
    println!("Partial pressure:    {:>12.4} Pa", props.partial_pressure_pa);
    match props.dew_point_c {
        Some(dp) => println!("Dew point:           {:>12.4} °C", dp),
        None => println!("Dew point:           {:>12} ", "n/a"),
    }
    println!("Wet bulb (Ferrel):   {:>12.4} °C", props.wet_bulb_c);
    match props.wet_bulb_line_c {
        Some(wb) => println!("Wet bulb (line):     {:>12.4} °C", wb),
        None => println!("Wet bulb (line):     {:>12} ", "n/a"),
    }
    println!("Mole fraction:       {:>12.6}", props.mole_fraction);
    println!("Humidity ratio:      {:>12.6} kg/kg", props.humidity_ratio);
    println!("Mass fraction:       {:>12.6} kg/kg", props.mass_fraction);
    println!("Vapor density:       {:>12.6} kg/m³", props.vapor_density);
    println!("Humid volume:        {:>12.6} m³/kg", props.humid_volume);
    println!("Humid density:       {:>12.6} kg/m³", props.humid_density);
    println!("Molar mass:          {:>12.4} g/mol", props.humid_molar_mass);
    println!("Dry air enthalpy:    {:>12.4} kJ/kg", props.dry_air_enthalpy);
    println!("Vapor enthalpy:      {:>12.4} kJ/kg", props.water_vapor_enthalpy);
    println!("Humid air enthalpy:  {:>12.4} kJ/kg", props.humid_air_enthalpy);
    Ok(())
}

#[derive(Serialize)]
struct SaturationReport {
    temperature: Temperature,
    pressure: Pressure,
}

fn cmd_saturation(
    temperature: Option<&str>,
    pressure: Option<&str>,
    json: bool,
) -> CliResult<()> {
    let report = match (temperature, pressure) {
        (Some(t), None) => {
            let temperature = parse_temperature(t)?;
            let pressure = saturation_pressure(&temperature)?;
            SaturationReport {
                temperature,
                pressure,
            }
        }
        (None, Some(p)) => {
            let pressure = parse_pressure(p, false)?;
            let temperature = saturation_temperature(&pressure)?;
            SaturationReport {
                temperature,
                pressure,
            }
        }
        _ => {
            return Err(CliError::Usage(
                "pass exactly one of --temperature or --pressure".to_string(),
            ));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}  <->  {}", report.temperature, report.pressure);
    }
    Ok(())
}

fn cmd_wet_bulb(
    temperature: &str,
    rh: f64,
    pressure: &str,
    gauge: bool,
    config: &SolverConfig,
) -> CliResult<()> {
    let dry_bulb = parse_temperature(temperature)?;
    let pressure = parse_pressure(pressure, gauge)?;
    let cmp = compare_wet_bulb_solvers(&dry_bulb, rh, &pressure, config)?;
    println!("Ferrel:     {:.4} °C", cmp.ferrel_c);
    println!("Line:       {:.4} °C", cmp.line_c);
    println!(
        "Difference: {:.4} °C ({})",
        cmp.difference_c,
        if cmp.agrees {
            "within tolerance"
        } else {
            "outside tolerance"
        }
    );
    Ok(())
}

fn cmd_batch(
    batch_path: &Path,
    output: Option<&Path>,
    config_override: Option<SolverConfig>,
) -> CliResult<()> {
    println!("Evaluating batch: {}", batch_path.display());
    let mut batch = psy_batch::load_yaml(batch_path)?;
    if let Some(config) = config_override {
        batch.solver = config;
    }
    let outcomes = psy_batch::run_batch(&batch);

    if let Some(output) = output {
        psy_batch::save_json(output, &outcomes)?;
        println!("✓ Wrote {} states to {}", outcomes.len(), output.display());
        return Ok(());
    }

    for outcome in &outcomes {
        match &outcome.result {
            Ok(props) => println!(
                "  {:<24} wet bulb {:>8.3} °C  humidity ratio {:.6}",
                outcome.id, props.wet_bulb_c, props.humidity_ratio
            ),
            Err(err) => println!("  {:<24} ✗ {}", outcome.id, err),
        }
    }
    Ok(())
}

// Target unit tokens may carry a prefix, e.g. "kPa" or "mK".
fn temperature_unit(token: &str) -> PsyResult<(TemperatureUnit, f64)> {
    let desc = QuantityKind::Temperature.resolve(token)?;
    let unit = TemperatureUnit::from_symbol(desc.symbol)
        .ok_or_else(|| PsyError::invalid_unit(token, QuantityKind::Temperature.name()))?;
    Ok((unit, desc.prefix_factor))
}

fn pressure_unit(token: &str) -> PsyResult<(PressureUnit, f64)> {
    let desc = QuantityKind::Pressure.resolve(token)?;
    let unit = PressureUnit::from_symbol(desc.symbol)
        .ok_or_else(|| PsyError::invalid_unit(token, QuantityKind::Pressure.name()))?;
    Ok((unit, desc.prefix_factor))
}

/// Convert `"<value> <unit>"` to `target`, picking the quantity from the source unit.
fn convert_quantity(quantity: &str, target: &str, gauge: bool) -> PsyResult<String> {
    let (_, source_unit) = split_quantity(quantity)?;
    let value = if QuantityKind::Temperature.resolve(source_unit).is_ok() {
        let temperature = parse_temperature(quantity)?;
        let (unit, factor) = temperature_unit(target)?;
        temperature.value_in(unit) / factor
    } else {
        let (value, unit) = split_quantity(quantity)?;
        let pressure = Pressure::new(value, unit, !gauge)?;
        let (unit, factor) = pressure_unit(target)?;
        pressure.value_in(unit) / factor
    };
    Ok(format!("{value} {target}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(quantity: &str, target: &str) -> f64 {
        let out = convert_quantity(quantity, target, false).unwrap();
        out.split_whitespace().next().unwrap().parse().unwrap()
    }

    #[test]
    fn converts_temperatures() {
        assert!((converted("100 C", "F") - 212.0).abs() < 1e-9);
        assert!((converted("0 C", "K") - 273.15).abs() < 1e-9);
        assert!((converted("300 K", "Celsius") - 26.85).abs() < 1e-9);
    }

    #[test]
    fn converts_pressures_with_prefixes() {
        assert!((converted("1 atm", "kPa") - 101.325).abs() < 1e-9);
        assert!((converted("760 mmHg", "atm") - 1.0).abs() < 1e-6);
        assert!((converted("1 bar", "Pa") - 1e5).abs() < 1e-6);
    }

    #[test]
    fn rejects_cross_quantity_targets() {
        assert!(matches!(
            convert_quantity("30 C", "kPa", false),
            Err(PsyError::InvalidUnit { .. })
        ));
        assert!(convert_quantity("1 atm", "F", false).is_err());
        assert!(convert_quantity("1 furlong", "Pa", false).is_err());
    }

    #[test]
    fn gauge_conversion_keeps_relative_value() {
        assert!((converted("0 atm", "Pa")).abs() < 1e-12);
        let out = convert_quantity("-1 atm", "Pa", true).unwrap();
        assert!(out.starts_with("-101325"));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "psy-cli", "props", "-t", "30 C", "--rh", "50", "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Props { json: true, .. }));

        let cli = Cli::try_parse_from([
            "psy-cli",
            "--config",
            "solver.yaml",
            "batch",
            "states.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("solver.yaml")));

        assert!(
            Cli::try_parse_from(["psy-cli", "saturation", "-t", "20 C", "-p", "1 atm"]).is_err()
        );
    }
}
