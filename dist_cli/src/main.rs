//! # Distribuciones CLI
//!
//! Command-line front end over `dist_core`: the same validation,
//! calculations and reports as the desktop app, for scripting.
//!
//! ```text
//! dist_cli binomial --n 10 --p 0.5 [--population 100] [--x todos] [--png grafica.png] [--json]
//! dist_cli hypergeometric --population 20 --successes 6 --sample 5 --x 2 [--png grafica.png] [--json]
//! dist_cli frequencies datos.xlsx --column estado [--json]
//! ```
//!
//! Exit code 1 on any validation, calculation or file error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use dist_core::calculations::binomial::{calculate, BinomialInput};
use dist_core::calculations::hypergeometric::{probability, summarize};
use dist_core::chart::ChartData;
use dist_core::chart_image::{image_path, save_chart_png};
use dist_core::dataset::{frequency_percent, Dataset};
use dist_core::errors::{DistError, DistResult};
use dist_core::format::{format_probability, hypergeometric_report, report};
use dist_core::settings::DisplaySettings;
use dist_core::validation::{
    parse_desired_successes, parse_hypergeometric_x, parse_x_selection, parse_x_values, validate_hypergeometric,
    validate_with_population, XSelection,
};

#[derive(Parser, Debug)]
#[command(name = "dist_cli")]
#[command(about = "Calculadora de distribuciones binomial e hipergeométrica")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Decimal places in text reports
    #[arg(long, global = true, default_value = "6")]
    decimals: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Binomial distribution B(n, p), optionally over a finite population N
    Binomial {
        /// Number of trials (sample size)
        #[arg(long)]
        n: String,

        /// Success probability, 0 to 1
        #[arg(long)]
        p: String,

        /// Population size; omit or 0 for an infinite population
        #[arg(long, default_value = "")]
        population: String,

        /// X values: "todos", a number k (0..k) or a comma list
        #[arg(long, default_value = "todos")]
        x: String,

        /// Also save the chart as a PNG image
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Hypergeometric distribution with automatic model selection
    Hypergeometric {
        /// Population size N
        #[arg(long)]
        population: String,

        /// Successes in the population K
        #[arg(long)]
        successes: String,

        /// Sample size n
        #[arg(long)]
        sample: String,

        /// Desired successes; a comma list or "todos" prints P(X = x) for each
        #[arg(long)]
        x: String,

        /// Also save the chart as a PNG image (single x only)
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Value frequencies of one column of an Excel or CSV file
    Frequencies {
        /// .xlsx, .xls or .csv file with a header row
        file: PathBuf,

        /// Column name
        #[arg(long)]
        column: String,
    },
}

#[derive(Serialize)]
struct FrequencyRow<'a> {
    value: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct PointProbability {
    x: u64,
    probability: f64,
}

fn to_json<T: Serialize>(value: &T) -> DistResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| DistError::Internal { message: e.to_string() })
}

fn run(cli: &Cli) -> DistResult<String> {
    let settings = DisplaySettings::default().with_decimals(cli.decimals);

    match &cli.command {
        Commands::Binomial {
            n,
            p,
            population,
            x,
            png,
        } => {
            let params = validate_with_population(n, p, population)?;
            let x_values = parse_x_values(x, params.n)?;
            let result = calculate(&BinomialInput::new(params, x_values))?;
            debug!("binomial result for {} values", result.x_values.len());
            if let Some(path) = png {
                save_chart_png(&ChartData::binomial(&result), &image_path(path))?;
            }
            if cli.json {
                to_json(&result)
            } else {
                Ok(report(&result, &settings))
            }
        }

        Commands::Hypergeometric {
            population,
            successes,
            sample,
            x,
            png,
        } => {
            let params = validate_hypergeometric(population, successes, sample)?;

            // A single number is the desired x of a full summary; anything else lists P(X = x)
            if let XSelection::UpTo(_) = parse_x_selection(x)? {
                let x = parse_desired_successes(x)?;
                let summary = summarize(params.population, params.successes, params.sample, x)?;
                if let Some(path) = png {
                    save_chart_png(&ChartData::hypergeometric(&summary), &image_path(path))?;
                }
                return if cli.json {
                    to_json(&summary)
                } else {
                    Ok(hypergeometric_report(&summary, &settings))
                };
            }

            if png.is_some() {
                return Err(DistError::invalid_input(
                    "png",
                    x.as_str(),
                    "La gráfica solo se puede guardar para un único valor de x",
                ));
            }
            let model = dist_core::calculations::hypergeometric::select_model(params.sample, params.population)?;
            let points = parse_hypergeometric_x(x, &params)?
                .into_iter()
                .map(|x| probability(&params, x, model).map(|probability| PointProbability { x, probability }))
                .collect::<DistResult<Vec<_>>>()?;

            if cli.json {
                to_json(&points)
            } else {
                let mut out = format!("Modelo: {}\n", model);
                for point in &points {
                    out.push_str(&format!("P(X={}) = {}\n", point.x, format_probability(point.probability)));
                }
                Ok(out)
            }
        }

        Commands::Frequencies { file, column } => {
            let dataset = Dataset::from_path(file)?;
            let frequencies = dataset.frequencies(column)?;
            if cli.json {
                let rows: Vec<FrequencyRow<'_>> = frequencies
                    .iter()
                    .map(|(value, count)| FrequencyRow { value, count: *count })
                    .collect();
                to_json(&rows)
            } else {
                let total = dataset.row_count();
                let mut out = format!("{}\nTotal de registros (N): {}\n", dataset.summary().label(), total);
                for (value, count) in &frequencies {
                    out.push_str(&format!("• {}: {} ({})\n", value, count, frequency_percent(*count, total)));
                }
                Ok(out)
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            if cli.json {
                match serde_json::to_string_pretty(&err) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("{}: {}", err.title(), err),
                }
            } else {
                eprintln!("{}: {}", err.title(), err);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dist_core::chart_image::{IMAGE_HEIGHT, IMAGE_WIDTH};
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dist_cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_binomial_defaults() {
        let parsed = cli(&["binomial", "--n", "10", "--p", "0.5"]);
        assert!(!parsed.json);
        assert_eq!(parsed.decimals, 6);
        match parsed.command {
            Commands::Binomial {
                n,
                p,
                population,
                x,
                png,
            } => {
                assert_eq!((n.as_str(), p.as_str()), ("10", "0.5"));
                assert_eq!(population, "");
                assert_eq!(x, "todos");
                assert!(png.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        assert!(Cli::try_parse_from(["dist_cli", "binomial", "--n", "10"]).is_err());
        assert!(Cli::try_parse_from(["dist_cli", "frequencies", "datos.csv"]).is_err());
    }

    #[test]
    fn test_binomial_report() {
        let output = run(&cli(&["binomial", "--n", "10", "--p", "0.5"])).unwrap();
        assert!(output.contains("Media (μ = n × p): 5.000000"));
        assert!(output.contains("Varianza (σ² = n × p × q): 2.500000"));
    }

    #[test]
    fn test_binomial_json() {
        let output = run(&cli(&["--json", "binomial", "--n", "1", "--p", "0.3"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let probs = value["probabilities"].as_array().unwrap();
        assert!((probs[0].as_f64().unwrap() - 0.7).abs() < 1e-12);
        assert!((probs[1].as_f64().unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_probability_fails() {
        let err = run(&cli(&["binomial", "--n", "10", "--p", "1.5"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_hypergeometric_summary_and_list() {
        let output = run(&cli(&[
            "hypergeometric", "--population", "20", "--successes", "6", "--sample", "5", "--x", "2",
        ]))
        .unwrap();
        assert!(output.contains("• Modelo: Hipergeométrica"));

        let output = run(&cli(&[
            "hypergeometric", "--population", "20", "--successes", "2", "--sample", "5", "--x", "todos",
        ]))
        .unwrap();
        assert!(output.starts_with("Modelo: Hipergeométrica"));
        assert_eq!(output.lines().filter(|l| l.starts_with("P(X=")).count(), 3);
    }

    #[test]
    fn test_png_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grafica");
        let path_arg = path.to_string_lossy().into_owned();

        run(&cli(&["binomial", "--n", "8", "--p", "0.4", "--png", &path_arg])).unwrap();
        let bytes = std::fs::read(path.with_extension("png")).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), IMAGE_WIDTH);
        assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), IMAGE_HEIGHT);

        let err = run(&cli(&[
            "hypergeometric", "--population", "20", "--successes", "2", "--sample", "5", "--x", "todos", "--png",
            &path_arg,
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_frequencies() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"pieza,estado\n1,ok\n2,falla\n3,ok\n4,\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let output = run(&cli(&["frequencies", &path, "--column", "estado"])).unwrap();
        assert!(output.contains("Total de registros (N): 4"));
        assert!(output.contains("• ok: 2 (50.0%)"));
        assert_eq!(output.lines().filter(|l| l.starts_with('•')).count(), 2);

        let err = run(&cli(&["frequencies", &path, "--column", "color"])).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
