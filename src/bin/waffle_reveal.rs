use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

use waffle_reveal::config::WaffleConfig;
use waffle_reveal::input::CsvSource;
use waffle_reveal::output::schema::schema_json_pretty;
use waffle_reveal::output::OutputCollector;
use waffle_reveal::plotting::SvgSurface;
use waffle_reveal::script::{play, InteractionScript};
use waffle_reveal::waffle::{CommandLog, WaffleChart};

#[derive(Parser)]
#[command(name = "waffle-reveal")]
#[command(
    about = "Interactive waffle charts with guess-and-reveal",
    long_about = "Builds one 10x10 waffle grid per category from category/subcategory/value records, \
                  plays hover and click interactions against it, and renders SVG snapshots or a JSON \
                  report of every draw command."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render an SVG snapshot of the chart
    Render {
        /// CSV file with `category,subcategory,value` columns.
        #[arg(long, required = true)]
        data: String,
        /// Chart configuration JSON (palette, timing, layout, captions). Defaults are used when omitted.
        #[arg(long)]
        config: Option<String>,
        /// Output SVG path.
        #[arg(long, required = true)]
        out: String,
        /// Interaction script JSON to play before taking the snapshot.
        #[arg(long)]
        script: Option<String>,
        /// Take the snapshot at this clock time instead of after all reveals finish.
        #[arg(long, requires = "script")]
        at_ms: Option<u64>,
        /// Force overwrite of existing output files.
        #[arg(short, long)]
        force: bool,
    },
    /// Play an interaction script and write a JSON report of every surface command
    Simulate {
        /// CSV file with `category,subcategory,value` columns.
        #[arg(long, required = true)]
        data: String,
        /// Chart configuration JSON. Defaults are used when omitted.
        #[arg(long)]
        config: Option<String>,
        /// Interaction script JSON.
        #[arg(long, required = true)]
        script: String,
        /// Stop playback at this clock time.
        #[arg(long)]
        until_ms: Option<u64>,
        /// Output report path.
        #[arg(long, required = true)]
        out: String,
        /// Force overwrite of existing output files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the JSON Schema of the simulation report
    Schema,
}

fn check_output_path(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

    if !force && path.exists() {
        anyhow::bail!(
            "Output file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    Ok(())
}

fn load_chart(data: &str, config: Option<&str>) -> Result<WaffleChart> {
    let config = WaffleConfig::load_or_default(config)
        .with_context(|| format!("Error loading config {}", config.unwrap_or("<default>")))?;
    let mut source = CsvSource::new(data);
    WaffleChart::from_source(&mut source, config)
        .with_context(|| format!("Error building chart from {}", data))
}

fn run_render(
    data: &str,
    config: Option<&str>,
    out: &str,
    script: Option<&str>,
    at_ms: Option<u64>,
    force: bool,
) -> Result<()> {
    check_output_path(out, force)?;
    let mut chart = load_chart(data, config)?;
    let mut surface = SvgSurface::new(&chart.config);
    chart.draw(&mut surface)?;

    if let Some(script_path) = script {
        let script = InteractionScript::load(script_path)
            .with_context(|| format!("Error loading script {}", script_path))?;
        let summary = play(&mut chart, &mut surface, &script, at_ms)?;
        info!(
            "Played {} events ({} ignored), snapshot at {} ms",
            summary.handled + summary.ignored,
            summary.ignored,
            summary.ended_at_ms
        );
    }

    surface
        .save(out)
        .with_context(|| format!("Error writing {}", out))?;
    Ok(())
}

fn run_simulate(
    data: &str,
    config: Option<&str>,
    script: &str,
    until_ms: Option<u64>,
    out: &str,
    force: bool,
) -> Result<()> {
    check_output_path(out, force)?;
    let mut chart = load_chart(data, config)?;
    let script_data = InteractionScript::load(script)
        .with_context(|| format!("Error loading script {}", script))?;

    let mut log = CommandLog::new();
    chart.draw(&mut log)?;
    let summary = play(&mut chart, &mut log, &script_data, until_ms)?;
    info!(
        "Playback finished at {} ms: {} handled, {} ignored, {} skipped",
        summary.ended_at_ms, summary.handled, summary.ignored, summary.skipped
    );

    OutputCollector::new()
        .with_source(data)
        .with_panels(&chart)
        .with_playback(&summary)
        .with_commands(log.into_commands())
        .write_json(out)
        .with_context(|| format!("Error writing report {}", out))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(2);
            }
        }
    }
    log_builder.init();

    let result = match &cli.command {
        Commands::Render {
            data,
            config,
            out,
            script,
            at_ms,
            force,
        } => run_render(data, config.as_deref(), out, script.as_deref(), *at_ms, *force),
        Commands::Simulate {
            data,
            config,
            script,
            until_ms,
            out,
            force,
        } => run_simulate(data, config.as_deref(), script, *until_ms, out, *force),
        Commands::Schema => {
            println!("{}", schema_json_pretty());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn repo_file(rel: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(rel)
            .to_string_lossy()
            .into_owned()
    }

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_existing_output_refused_without_force() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("chart.svg");
        std::fs::write(&out, "old").unwrap();

        let err = check_output_path(&path_str(&out), false).unwrap_err();
        assert!(err.to_string().contains("--force"), "{}", err);
        assert!(check_output_path(&path_str(&out), true).is_ok());
    }

    #[test]
    fn test_missing_parent_is_created() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/deeper/report.json");
        check_output_path(&path_str(&out), false).unwrap();
        assert!(dir.path().join("nested/deeper").is_dir());
        assert!(!out.exists());
    }

    #[test]
    fn test_render_writes_svg_and_respects_force() {
        let dir = TempDir::new().unwrap();
        let out = path_str(&dir.path().join("chart.svg"));
        let data = repo_file("data/data.csv");
        let config = repo_file("config/waffle.json");
        let script = repo_file("scripts/demo.json");

        run_render(&data, Some(&config), &out, Some(&script), None, false).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("id=\"water-caption-number\""));
        assert!(svg.contains("safe water to drink"));

        assert!(run_render(&data, Some(&config), &out, None, None, false).is_err());
        run_render(&data, None, &out, None, None, true).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(!svg.contains("safe water to drink"));
    }

    #[test]
    fn test_simulate_writes_report() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out/report.json");
        run_simulate(
            &repo_file("data/data.csv"),
            Some(&repo_file("config/waffle.json")),
            &repo_file("scripts/demo.json"),
            Some(500),
            &path_str(&out),
            false,
        )
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["ended_at_ms"], 500);
        assert_eq!(report["playback"]["skipped"], 3);
        assert_eq!(report["panels"][0]["final_state"], "revealing");
    }

    #[test]
    fn test_bad_data_reports_context() {
        let dir = TempDir::new().unwrap();
        let out = path_str(&dir.path().join("chart.svg"));
        let err = run_render("/nonexistent/data.csv", None, &out, None, None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Error building chart from /nonexistent/data.csv"));
    }

    #[test]
    fn test_schema_names_report_fields() {
        let schema = schema_json_pretty();
        assert!(schema.contains("final_state"));
        assert!(schema.contains("ended_at_ms"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let args = ["waffle-reveal", "render", "--data", "d.csv", "--out", "o.svg", "--at-ms", "5"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["waffle-reveal", "--log-level", "debug", "simulate", "--data", "d.csv", "--script", "s.json", "--out", "r.json", "-f"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Simulate { force: true, until_ms: None, .. }));
    }
}
