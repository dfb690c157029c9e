//! iftar - countdown to the next fast boundary
//!
//! Resolves the caller's location, fetches today's prayer times and counts
//! down to whichever comes next:
//! - Fajr, which ends the suhoor meal window
//! - Maghrib, which opens iftar

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use iftar::cli::{Cli, Commands, Display, NextArgs};
use iftar::config::AppConfig;
use iftar::location::StaticLocationProvider;
use iftar::notification::{PermissionGate, SystemNotifier};
use iftar::prayer::{
    method_for_country, AladhanClient, CountryLookup, CountrySource, LoadError,
    PrayerTimeService, PrayerTimesError,
};
use iftar::schedule::{
    next_event, time_remaining, Clock, CountdownEngine, CountdownEvent, CountdownHandle,
    SystemClock,
};
use iftar::types::LoadStatus;

type Service = PrayerTimeService<StaticLocationProvider, CountrySource, AladhanClient>;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        match e.downcast_ref::<LoadError>() {
            Some(load_error) => {
                Display::show_status(&LoadStatus::Error(format!("{e:#}")));
                Display::show_suggestion(load_error.suggestion());
            }
            None => Display::show_error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        generate_completions(shell);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match command {
        Commands::Times(args) => {
            args.apply(&mut config)?;
            let loaded = build_service(&config)
                .context("failed to set up HTTP clients")?
                .load()
                .await?;
            Display::show_timings(&loaded);
        }
        Commands::Next(args) => show_next(args, &mut config).await?,
        Commands::Countdown(args) => {
            args.apply(&mut config)?;
            run_countdown(&config).await?;
        }
        Commands::Method(args) => {
            args.apply(&mut config)?;
            let lookup = CountrySource::from_config(config.country.as_deref(), &config.service)
                .context("failed to set up HTTP clients")?;
            let country = lookup.country_code().await;
            Display::show_method(country.as_deref(), method_for_country(country.as_deref()));
        }
        Commands::NotifyPermission(args) => {
            args.apply(&mut config)?;
            let mut gate =
                PermissionGate::new(SystemNotifier::detect(config.notifications), config.language);
            gate.sync().await;
            Display::show_permission(gate.request_manually().await);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Builds the prayer-time pipeline from the merged configuration.
fn build_service(config: &AppConfig) -> Result<Service, PrayerTimesError> {
    let location = StaticLocationProvider::new(config.coordinates());
    let country = CountrySource::from_config(config.country.as_deref(), &config.service)?;
    let source = AladhanClient::new(&config.service)?;
    Ok(PrayerTimeService::new(location, country, source))
}

async fn show_next(args: NextArgs, config: &mut AppConfig) -> Result<()> {
    args.location.apply(config)?;
    let loaded = build_service(config)
        .context("failed to set up HTTP clients")?
        .load()
        .await?;

    let now = args.now.unwrap_or_else(|| SystemClock.now());
    let next = next_event(loaded.timings.fajr, loaded.timings.maghrib, now);
    Display::show_next(next, time_remaining(next.at, now), config.language);
    Ok(())
}

/// Loads today's timings and runs the live countdown until Ctrl-C.
async fn run_countdown(config: &AppConfig) -> Result<()> {
    let service = build_service(config).context("failed to set up HTTP clients")?;
    let mut gate =
        PermissionGate::new(SystemNotifier::detect(config.notifications), config.language);

    Display::show_status(&LoadStatus::Loading);

    let (permission, result) = tokio::join!(gate.initialize(), service.load());
    debug!("Notification permission after start-up: {}", permission.as_str());

    // A load error is reported with its status by `main`.
    let loaded = result?;
    Display::show_status(&LoadStatus::Ready);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let engine = CountdownEngine::new(&loaded.timings, SystemClock, event_tx);
    let handle = CountdownHandle::spawn(engine);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = event_rx.recv() => match event {
                Some(CountdownEvent::Started { next } | CountdownEvent::Retargeted { next }) => {
                    Display::show_target(next, config.language);
                }
                Some(CountdownEvent::Tick { remaining, next }) => {
                    Display::show_countdown_tick(remaining, next, config.language);
                }
                Some(CountdownEvent::Expired { kind }) => {
                    Display::show_expired(kind, config.language);
                    match gate.notify_boundary(kind).await {
                        Err(e) if e.is_permission_error() => debug!("Notification refused: {}", e),
                        Err(e) => warn!("{} ({})", e, e.suggestion()),
                        Ok(_) => {}
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                handle.cancel();
                Display::show_stopped();
                break;
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use iftar::cli::LocationArgs;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["iftar"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_times() {
        let cli = Cli::parse_from(["iftar", "times"]);
        assert!(matches!(cli.command, Some(Commands::Times(_))));
    }

    #[test]
    fn test_build_service_with_country_override() {
        let mut config = AppConfig::default();
        LocationArgs {
            country: Some("TR".to_string()),
            ..LocationArgs::default()
        }
        .apply(&mut config)
        .unwrap();
        assert!(build_service(&config).is_ok());
    }
}
