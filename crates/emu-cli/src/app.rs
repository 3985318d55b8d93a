use crate::cli::Cli;
use crate::commands::Commands;
use crate::console;
use crate::error::{CliError, CliResult};
use crate::logging;
use crate::render::{self, Report};

use emu_config::Config;
use emu_core::{
    DockerCheck, HttpGateway, HttpProbe, LifecycleController, LifecycleState, Notification,
    PollerSettings, StatusView,
};

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

/// Load config, set up logging and run one command to completion.
///
/// Exits with failure when the emulator ends up in the error state.
pub async fn run(cli: Cli) -> ExitCode {
    match execute(cli).await {
        Ok(LifecycleState::Error { .. }) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> CliResult<LifecycleState> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => Config::config_dir()?,
    };
    let config = load_config(&config_dir, cli.server.as_deref())?;

    logging::setup_logging(
        &config.log_dir(&config_dir),
        config.logging.level,
        cli.verbose,
    )?;
    info!("emu {} ({:?})", env!("CARGO_PKG_VERSION"), cli.command);
    config.log_summary();

    let ctl = build_controller(&config)?;
    let mut notifications = ctl.notifications();

    // Same order as the web page: docker check, then reconcile
    let docker = match ctl.check_docker().await {
        Ok(check) => Some(check),
        Err(e) => {
            warn!("Docker check failed: {e}");
            None
        }
    };
    if let Err(e) = ctl.query_status().await {
        debug!("Initial status query failed: {e}");
    }

    match cli.command {
        Commands::Status | Commands::CheckDocker => {}
        Commands::Start { no_wait } => {
            let mut states = ctl.subscribe();
            let started = ctl.start().await.is_ok();
            if started && !no_wait && matches!(ctl.state(), LifecycleState::Booting { .. }) {
                follow_boot(&ctl, &mut states, &mut notifications, cli.json).await;
            }
        }
        Commands::Stop => {
            if let Err(e) = ctl.stop().await {
                debug!("Stop failed: {e}");
            }
        }
        Commands::Console => {
            drop(notifications);
            console::run(&ctl).await;
            return Ok(ctl.state());
        }
    }

    if !cli.json {
        while let Ok(notification) = notifications.try_recv() {
            eprintln!("{}", render::notification_line(&notification));
        }
    }

    let state = ctl.state();
    print_outcome(&ctl, &state, docker.as_ref(), &cli)?;
    Ok(state)
}

pub(crate) fn load_config(config_dir: &Path, server: Option<&str>) -> CliResult<Config> {
    let mut config = Config::load_from(config_dir)?;
    if let Some(server) = server {
        config.api.base_url = server.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn build_controller(config: &Config) -> CliResult<LifecycleController> {
    let gateway = HttpGateway::new(
        &config.api.base_url,
        Duration::from_secs(config.api.request_timeout_secs),
    )?;
    let probe = HttpProbe::new(Duration::from_millis(config.poller.probe_timeout_ms))
        .map_err(|e| CliError::setup(format!("readiness probe: {e}")))?;

    Ok(LifecycleController::new(
        Arc::new(gateway),
        Arc::new(probe),
        PollerSettings::from(&config.poller),
        Duration::from_millis(config.notifications.display_ms),
    ))
}

/// Print boot progress and notifications until the boot ends.
async fn follow_boot(
    ctl: &LifecycleController,
    states: &mut UnboundedReceiver<LifecycleState>,
    notifications: &mut UnboundedReceiver<Notification>,
    quiet: bool,
) {
    let max_attempts = ctl.settings().max_attempts;

    loop {
        tokio::select! {
            Some(notification) = notifications.recv() => {
                if !quiet {
                    eprintln!("{}", render::notification_line(&notification));
                }
            }

            state = states.recv() => match state {
                Some(LifecycleState::Starting) => {}
                Some(state @ LifecycleState::Booting { .. }) => {
                    if !quiet {
                        let view = StatusView::with_budget(&state, max_attempts);
                        eprintln!("{}", render::status_line(&view));
                    }
                }
                _ => break,
            },
        }
    }
}

fn print_outcome(
    ctl: &LifecycleController,
    state: &LifecycleState,
    docker: Option<&DockerCheck>,
    cli: &Cli,
) -> CliResult<()> {
    let view = ctl.view();
    let remote = ctl.last_remote_status();

    if cli.json {
        let report = Report {
            state,
            view: &view,
            remote: remote.as_ref(),
            docker,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::output(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    if cli.command == Commands::CheckDocker {
        match docker {
            Some(check) => println!("{}", render::docker_line(check)),
            None => println!("Docker check failed"),
        }
    }

    println!("{}", render::status_line(&view));
    if let Some(line) = remote.as_ref().and_then(render::remote_line) {
        println!("{line}");
    }
    Ok(())
}
