//! Starfield CLI: turn GitHub activity snapshots into constellation profiles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use starfield_core::config::EngineConfig;
use starfield_core::output::write_output;
use starfield_core::pipeline::{self, PipelineRun};
use starfield_core::snapshot::discover_snapshots;

#[derive(Parser)]
#[command(
    name = "starfield-map",
    about = "Starfield - Chart your GitHub history as a night sky"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map one or more activity snapshots to constellation profiles
    Map {
        /// Snapshot JSON files or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (several inputs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Engine config JSON; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum constellations to keep
        #[arg(long)]
        max_constellations: Option<usize>,

        /// Reference time for dormancy checks (RFC 3339)
        #[arg(long)]
        as_of: Option<String>,

        /// Leave archived repositories out of the sky
        #[arg(long)]
        exclude_archived: bool,

        /// Show per-phase timing breakdown and debug logs
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // The fmt subscriber also bridges `log` records from the core crate.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Map {
            inputs,
            output,
            config,
            max_constellations,
            as_of,
            exclude_archived,
            verbose,
            quiet,
        } => {
            init_logging(verbose, quiet);

            let mut engine_config = match config {
                Some(path) => match EngineConfig::from_json_file(&path) {
                    Ok(c) => c,
                    Err(e) => fail(&format!("Error reading config {}: {e}", path.display())),
                },
                None => EngineConfig::default(),
            };
            if let Some(max) = max_constellations {
                engine_config.max_constellations = max;
            }
            if exclude_archived {
                engine_config.include_archived = false;
            }
            if let Some(raw) = as_of {
                match DateTime::parse_from_rfc3339(&raw) {
                    Ok(t) => engine_config.reference_time = Some(t.with_timezone(&Utc)),
                    Err(e) => fail(&format!("Invalid --as-of '{raw}': {e}")),
                }
            }

            let snapshots = discover_snapshots(&inputs);
            if snapshots.is_empty() {
                fail("No snapshot files found");
            }

            if snapshots.len() == 1 {
                let input = &snapshots[0];
                let output_path = output.unwrap_or_else(|| default_output_path(input, None));
                if quiet {
                    run_quiet(input, &engine_config, &output_path);
                } else {
                    run_with_progress(input, &engine_config, &output_path, verbose);
                }
            } else {
                run_batch(&snapshots, &engine_config, output.as_deref(), quiet);
            }
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// `<dir>/<stem>.starfield.json`, next to the input unless `dir` is given.
fn default_output_path(input: &Path, dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "profile".to_string());
    let parent = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    parent.join(format!("{stem}.starfield.json"))
}

/// Output path for every batch input; two inputs may not share one.
fn batch_output_paths(snapshots: &[PathBuf], dir: Option<&Path>) -> Result<Vec<PathBuf>, String> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(snapshots.len());
    for input in snapshots {
        let output = default_output_path(input, dir);
        if let Some(first) = claimed.insert(output.clone(), input) {
            return Err(format!(
                "{} and {} would both write {}",
                first.display(),
                input.display(),
                output.display()
            ));
        }
        paths.push(output);
    }
    Ok(paths)
}

fn run_quiet(input: &Path, config: &EngineConfig, output_path: &Path) {
    match pipeline::run_pipeline_on_file(input, config, None) {
        Ok(run) => {
            if let Err(e) = write_output(&run.profile, output_path) {
                fail(&format!("Error writing output: {e}"));
            }
        }
        Err(e) => fail(&format!("Mapping failed: {e}")),
    }
}

fn run_with_progress(input: &Path, config: &EngineConfig, output_path: &Path, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Loading snapshot...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let run = match pipeline::run_pipeline_on_file(input, config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            fail(&format!("Mapping failed: {e}"));
        }
    };
    pb.finish_and_clear();

    print_summary(input, &run);
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        start.elapsed().as_secs_f64() * 1000.0
    );

    if verbose {
        println!("\n  Phase Timings:");
        for (phase, secs) in &run.phase_timings {
            println!("    {:<14} {:.3}ms", phase, secs * 1000.0);
        }
    }

    if let Err(e) = write_output(&run.profile, output_path) {
        fail(&format!("Error writing output: {e}"));
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path.display()
    );
}

/// Map every snapshot on the rayon pool; report in input order.
fn run_batch(snapshots: &[PathBuf], config: &EngineConfig, output_dir: Option<&Path>, quiet: bool) {
    let output_paths = match batch_output_paths(snapshots, output_dir) {
        Ok(paths) => paths,
        Err(e) => fail(&format!("Output collision: {e}")),
    };

    let results: Vec<(PathBuf, Result<PipelineRun, String>)> = snapshots
        .par_iter()
        .map(|input| {
            let result =
                pipeline::run_pipeline_on_file(input, config, None).map_err(|e| e.to_string());
            (input.clone(), result)
        })
        .collect();

    let mut failures = 0usize;
    for ((input, result), output_path) in results.into_iter().zip(output_paths) {
        let run = match result {
            Ok(run) => run,
            Err(e) => {
                eprintln!("{} {}: {e}", style("✗").red().bold(), input.display());
                failures += 1;
                continue;
            }
        };
        if let Err(e) = write_output(&run.profile, &output_path) {
            eprintln!("{} {}: {e}", style("✗").red().bold(), output_path.display());
            failures += 1;
            continue;
        }
        if !quiet {
            print_summary(&input, &run);
            println!("  {:<14} {}", "Output:", output_path.display());
        }
    }

    if failures > 0 {
        fail(&format!("{failures} of {} snapshots failed", snapshots.len()));
    }
}

fn print_summary(input: &Path, run: &PipelineRun) {
    let stats = &run.profile.stats;
    println!(
        "\n{}  Starfield Map: {}",
        style("✓").green().bold(),
        style(
            input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        )
        .bold()
    );
    println!(
        "  {:<14} {}",
        "Constellations:",
        stats.total_constellations
    );
    println!("  {:<14} {}", "Stars:", stats.total_stars);
    println!("  {:<14} {}", "Meteors:", stats.total_meteors);
    println!("  {:<14} {}", "Nebulas:", stats.total_nebulas);
    println!(
        "  {:<14} {} (peak {:02}:00)",
        "Sky:",
        run.profile.sky.sky_type,
        run.profile.sky.peak_hour
    );
    if !stats.brightest_constellation.is_empty() {
        println!("  {:<14} {}", "Brightest:", stats.brightest_constellation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lands_beside_input_by_default() {
        assert_eq!(
            default_output_path(Path::new("data/octocat.json"), None),
            PathBuf::from("data/octocat.starfield.json")
        );
        assert_eq!(
            default_output_path(Path::new("octocat.json"), None),
            PathBuf::from("octocat.starfield.json")
        );
    }

    #[test]
    fn batch_output_goes_to_directory() {
        assert_eq!(
            default_output_path(Path::new("data/octocat.json"), Some(Path::new("out"))),
            PathBuf::from("out/octocat.starfield.json")
        );
    }

    #[test]
    fn batch_rejects_shared_output_path() {
        let inputs = [PathBuf::from("a/x.json"), PathBuf::from("b/x.json")];
        let err = batch_output_paths(&inputs, Some(Path::new("out"))).unwrap_err();
        assert!(err.contains("a/x.json"));
        assert!(err.contains("b/x.json"));

        // beside their inputs they do not clash
        let paths = batch_output_paths(&inputs, None).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a/x.starfield.json"),
                PathBuf::from("b/x.starfield.json")
            ]
        );
    }

    #[test]
    fn cli_parses_map_flags() {
        let cli = Cli::parse_from([
            "starfield-map",
            "map",
            "a.json",
            "b.json",
            "--max-constellations",
            "4",
            "--as-of",
            "2025-01-01T00:00:00Z",
            "--exclude-archived",
        ]);
        let Commands::Map {
            inputs,
            max_constellations,
            as_of,
            exclude_archived,
            ..
        } = cli.command;
        assert_eq!(inputs.len(), 2);
        assert_eq!(max_constellations, Some(4));
        assert_eq!(as_of.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert!(exclude_archived);
    }
}
