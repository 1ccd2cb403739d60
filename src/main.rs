/// Command-line entry point for the water-usage outlier service.
///
/// Thin collaborator over the library: reads the measurement file, runs the
/// load-and-classify pipeline, prints the summary and the filtered outlier
/// alerts, and optionally writes a JSON run report.
///
/// Usage:
///   aquamon_service <measurements.txt> [--year Y] [--month M]
///                   [--json PATH] [--config PATH] [--verbose]

use std::path::Path;
use std::process::ExitCode;

use aquamon_service::alert::OutlierFilter;
use aquamon_service::config::AppConfig;
use aquamon_service::logging::{self, LogLevel, Subsystem};
use aquamon_service::pipeline;
use aquamon_service::report::RunReport;

struct CliArgs {
    data_file: Option<String>,
    year: Option<i32>,
    month: Option<i32>,
    json_path: Option<String>,
    config_path: Option<String>,
    verbose: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs {
        data_file: None,
        year: None,
        month: None,
        json_path: None,
        config_path: None,
        verbose: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--year" => {
                let value = iter.next().ok_or("--year requires a value")?;
                args.year = Some(value.parse().map_err(|_| format!("invalid year '{}'", value))?);
            }
            "--month" => {
                let value = iter.next().ok_or("--month requires a value")?;
                args.month =
                    Some(value.parse().map_err(|_| format!("invalid month '{}'", value))?);
            }
            "--json" => {
                args.json_path = Some(iter.next().ok_or("--json requires a path")?);
            }
            "--config" => {
                args.config_path = Some(iter.next().ok_or("--config requires a path")?);
            }
            "--verbose" => args.verbose = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            path => {
                if args.data_file.is_some() {
                    return Err("more than one measurement file given".to_string());
                }
                args.data_file = Some(path.to_string());
            }
        }
    }

    if args.month.is_some() && args.year.is_none() {
        return Err("--month requires --year".to_string());
    }

    Ok(args)
}

fn filter_from_args(args: &CliArgs) -> OutlierFilter {
    match (args.month, args.year) {
        (Some(month), Some(year)) => OutlierFilter::YearMonth { month, year },
        (None, Some(year)) => OutlierFilter::Year(year),
        _ => OutlierFilter::All,
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => AppConfig::from_file(Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    let min_level = if args.verbose {
        LogLevel::Debug
    } else {
        config.min_log_level()
    };
    logging::init_logger(min_level, config.log_file.as_deref());

    let data_file = args
        .data_file
        .clone()
        .or_else(|| config.data_file.clone())
        .ok_or("no measurement file given (argument or config data_file)")?;

    logging::debug(Subsystem::System, &format!("loading {}", data_file));
    let text = std::fs::read_to_string(&data_file)
        .map_err(|e| format!("cannot read {}: {}", data_file, e))?;

    let log = pipeline::load(&text)?;
    let summary = log.summary();

    println!("Measurements loaded: {}", summary.record_count);
    println!(
        "Fitted line: volume = {:.3} * duration + {:.3}",
        summary.slope, summary.intercept
    );
    println!("Outlier threshold: |residual| > {:.2} L", summary.threshold);
    println!("Outliers detected: {}", summary.outlier_count);

    let filter = filter_from_args(&args);
    let mut found = false;
    for view in log.query(filter) {
        println!(
            "[ALERT] Date: {} | Duration: {} | Volume: {:.2} L",
            view.date, view.duration_label, view.volume_liters
        );
        found = true;
    }
    if !found {
        println!("No outliers match the given filter.");
    }

    if let Some(path) = &args.json_path {
        RunReport::new(&log, filter).write_json(Path::new(path))?;
        logging::info(Subsystem::System, &format!("report written to {}", path));
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
