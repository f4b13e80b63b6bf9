mod builtins;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sensord_sensor::config::{default_config_path, load_config_from_path};
use sensord_sensor::{ProcessRole, RolePolicy, SampleRound, SelectionOutcome, SensorConfig, SensorFramework};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Select sensor modules by capability and sample them.
#[derive(Parser, Debug)]
#[command(name = "sensord", version, about)]
struct Args {
    /// Path to the sensor configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Role of this process; overrides the configuration file
    #[arg(long, global = true)]
    role: Option<ProcessRole>,

    /// Log every selection decision
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run selection once and print the active modules
    Select {
        /// Print modules and the decision trail as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run selection, then sample the active modules periodically
    Run {
        /// Stop after this many sampling rounds
        #[arg(long)]
        iterations: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config =
        load_config_from_path(&config_path).with_context(|| format!("failed to load configuration from {}", config_path.display()))?;
    let role = args.role.unwrap_or_else(|| config.role_or_default());
    debug!(path = %config_path.display(), role = %role, "configuration loaded");

    let framework = SensorFramework::with_trail_capacity(config.trail_capacity);
    if let Some(summary) = select(&framework, &config, role).summary() {
        debug!(active = summary.active, considered = summary.considered, "selection finished");
    }

    match args.command {
        Command::Select { json } => print_selection(&framework, json),
        Command::Run { iterations } => {
            framework.start();
            let result = sample_loop(&framework, config.sample_interval(), iterations, print_round).await;
            framework.stop();
            framework.shutdown();
            result.map(|rounds| info!(rounds, "sampling finished"))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the built-in catalog, apply the component filter and run selection.
fn select(framework: &SensorFramework, config: &SensorConfig, role: ProcessRole) -> SelectionOutcome {
    let mut catalog = builtins::catalog();
    catalog.apply_filter(&config.components);
    framework.select(&catalog, &RolePolicy::new(role))
}

fn print_selection(framework: &SensorFramework, json: bool) -> Result<()> {
    let modules = framework.modules();
    if json {
        let out = serde_json::json!({
            "modules": modules,
            "decisions": framework.trail(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if modules.is_empty() {
        println!("No sensor modules selected");
        return Ok(());
    }
    for (position, module) in modules.iter().enumerate() {
        println!(
            "{position}. {} [{}] priority {} {} {}",
            module.provider,
            module.capability,
            module.priority,
            module.status.icon(),
            module.status.display()
        );
    }
    Ok(())
}

fn print_round(round: &SampleRound) -> Result<()> {
    for reading in &round.readings {
        println!("{}", serde_json::to_string(reading)?);
    }
    Ok(())
}

/// Sample every `period` until `iterations` rounds ran or Ctrl-C is pressed.
async fn sample_loop<F>(framework: &SensorFramework, period: Duration, iterations: Option<u64>, mut on_round: F) -> Result<u64>
where
    F: FnMut(&SampleRound) -> Result<()>,
{
    let mut interval = tokio::time::interval(period);
    let mut rounds = 0;
    info!(period_secs = period.as_secs_f64(), "sampling sensors");

    loop {
        if iterations.is_some_and(|limit| rounds >= limit) {
            break;
        }
        tokio::select! {
            _ = interval.tick() => {
                let round = framework.sample();
                for failure in &round.failures {
                    warn!(provider = %failure.provider, error = %failure.error, "sample failed");
                }
                on_round(&round)?;
                rounds += 1;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping sensors");
                break;
            }
        }
    }
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensord_sensor::ComponentFilter;

    fn config_with(include: &[&str]) -> SensorConfig {
        SensorConfig {
            components: ComponentFilter {
                include: Some(include.iter().map(|name| name.to_string()).collect()),
                exclude: Vec::new(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn filter_limits_builtins() {
        let framework = SensorFramework::new();
        let outcome = select(&framework, &config_with(&["heartbeat", "ft_tester"]), ProcessRole::Application);

        assert_eq!(outcome.summary().map(|s| (s.considered, s.skipped, s.active)), Some((2, 1, 1)));
        assert_eq!(framework.modules()[0].provider, "heartbeat");
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["sensord", "select", "--json", "--role", "hnp"]).unwrap();
        assert_eq!(args.role, Some(ProcessRole::Coordinator));
        assert!(matches!(args.command, Command::Select { json: true }));

        assert!(Args::try_parse_from(["sensord", "--role", "nobody", "select"]).is_err());
    }

    #[tokio::test]
    async fn sample_loop_stops_after_iterations() {
        let framework = SensorFramework::new();
        select(&framework, &config_with(&["heartbeat"]), ProcessRole::Application);
        framework.start();

        let mut beats = Vec::new();
        let rounds = sample_loop(&framework, Duration::from_millis(5), Some(3), |round| {
            beats.extend(round.readings.iter().map(|r| r.value.clone()));
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(rounds, 3);
        assert_eq!(beats, vec![serde_json::json!(1), serde_json::json!(2), serde_json::json!(3)]);
        framework.shutdown();
    }
}
