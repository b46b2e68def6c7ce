use std::fs;
use std::path::PathBuf;

use sucrose::api::{Chart, ChartConfig, ChartKind};
use sucrose::core::ChartData;
use sucrose::render::SvgRenderer;
use sucrose::telemetry::init_default_tracing;

const USAGE: &str = "usage: render_chart <kind> --data <path> [--config <path>] [--output <path>] [--report]";

#[derive(Debug)]
struct CliArgs {
    kind: ChartKind,
    data: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    report: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let data = ChartData::from_json_str(&read(&args.data)?)
        .map_err(|err| format!("invalid data: {err}"))?;
    let config = match &args.config {
        Some(path) => ChartConfig::from_json_str(&read(path)?)
            .map_err(|err| format!("invalid config: {err}"))?,
        None => ChartConfig::default(),
    };

    let mut chart = Chart::new(SvgRenderer::new(), args.kind, config)
        .and_then(|chart| chart.with_data(data))
        .map_err(|err| err.to_string())?;
    let outcome = chart.render().map_err(|err| err.to_string())?;

    if args.report {
        let report = serde_json::json!({
            "outcome": outcome,
            "layout": chart.last_report(),
        });
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report: {err}"))?;
        eprintln!("{payload}");
    }

    let svg = chart.into_renderer().into_svg();
    match &args.output {
        Some(path) => fs::write(path, svg)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{svg}");
            Ok(())
        }
    }
}

fn read(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("--help" | "-h") | None => return Err(USAGE.to_owned()),
        Some(tag) => tag.parse::<ChartKind>().map_err(|err| err.to_string())?,
    };

    let mut data = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut report = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--data" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data".to_owned())?;
                data = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--report" => report = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let data = data.ok_or_else(|| "missing --data".to_owned())?;
    Ok(CliArgs {
        kind,
        data,
        config,
        output,
        report,
    })
}
