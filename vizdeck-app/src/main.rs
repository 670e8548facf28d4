//! Vizdeck dashboard host
//!
//! Minimal host around the render core: loads the fund-analysis table
//! from a JSON-records file, renders one named unit and prints the
//! normalized figure (or the structured error) as JSON on stdout.
//!
//! Usage:
//!   vizdeck-app --list [--data <records.json>]
//!   vizdeck-app <unit-name> [--data <records.json>]
//!
//! The data path defaults to the VIZDECK_DATA environment variable.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;

use vizdeck::{Dashboard, DataSource};
use vizdeck_core::{Dataset, UnitError};

/// Loads the shared dataset from a JSON-records file on first use.
struct FileSource {
    path: PathBuf,
}

impl DataSource for FileSource {
    fn load(&self) -> Result<Dataset, UnitError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            UnitError::DataUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        Dataset::from_json_records(&text)
    }
}

#[derive(Debug)]
struct Args {
    unit: Option<String>,
    data: Option<PathBuf>,
    list: bool,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        unit: None,
        data: None,
        list: false,
    };
    let mut argv = argv.into_iter();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--list" => args.list = true,
            "--data" => {
                let path = argv.next().ok_or("--data requires a path")?;
                args.data = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                return Err("usage: vizdeck-app <unit-name> [--data <records.json>] | --list".into())
            }
            name if !name.starts_with('-') && args.unit.is_none() => {
                args.unit = Some(name.to_string());
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }
    Ok(args)
}

fn data_path(args: &Args) -> Result<PathBuf, String> {
    if let Some(path) = &args.data {
        return Ok(path.clone());
    }
    env::var("VIZDECK_DATA")
        .map(PathBuf::from)
        .map_err(|_| "no dataset: pass --data <records.json> or set VIZDECK_DATA".to_string())
}

fn main() -> ExitCode {
    let _ = vizdeck::telemetry::init_default_tracing();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if args.list {
        // listing needs no dataset; use a source that reports absence
        let dashboard = Dashboard::with_standard_units(|| {
            Err::<Dataset, UnitError>(UnitError::DataUnavailable("not configured".into()))
        });
        for name in dashboard.unit_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let Some(unit) = args.unit.as_deref() else {
        eprintln!("usage: vizdeck-app <unit-name> [--data <records.json>] | --list");
        return ExitCode::FAILURE;
    };

    let path = match data_path(&args) {
        Ok(path) => path,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let dashboard = Dashboard::with_standard_units(FileSource { path });
    info!(unit = %unit, "rendering");

    match dashboard.render(unit) {
        Ok(figure) => {
            match serde_json::to_string_pretty(&figure) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("failed to serialize figure: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // structured error on stdout so callers can branch on `kind`
            match serde_json::to_string_pretty(&err) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_unit_and_data_path() {
        let args = parse_args(argv(&["return_risk_scatter", "--data", "funds.json"])).unwrap();
        assert_eq!(args.unit.as_deref(), Some("return_risk_scatter"));
        assert_eq!(args.data, Some(PathBuf::from("funds.json")));
        assert!(!args.list);
    }

    #[test]
    fn test_unit_name_stays_usable_alongside_data_path() {
        let args = parse_args(argv(&["factor_heatmap", "--data", "funds.json"])).unwrap();
        let Some(unit) = args.unit.as_deref() else {
            panic!("expected a unit name");
        };
        let path = data_path(&args).unwrap();
        assert_eq!(unit, "factor_heatmap");
        assert_eq!(path, PathBuf::from("funds.json"));
    }

    #[test]
    fn test_unexpected_flag_is_rejected() {
        let err = parse_args(argv(&["--bogus"])).unwrap_err();
        assert!(err.contains("--bogus"));
    }
}
