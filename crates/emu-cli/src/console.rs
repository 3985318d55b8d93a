//! Interactive session mirroring the browser page.

use crate::render;

use emu_core::{LifecycleController, LifecycleState, StatusView};

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const HELP: &str = "commands: start, stop, status, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "status" | "refresh" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}' ({HELP})")),
        }
    }
}

/// Read commands from stdin until `quit` or EOF, printing every state
/// change and notification as it happens.
///
/// Commands run as their own tasks so boot progress keeps rendering while
/// a request is outstanding.
pub async fn run(ctl: &LifecycleController) {
    let mut states = ctl.subscribe();
    let mut notifications = ctl.notifications();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let max_attempts = ctl.settings().max_attempts;

    println!("{}", render::status_line(&ctl.view()));
    println!("{HELP}");

    loop {
        tokio::select! {
            Some(state) = states.recv() => {
                print_state(&state, max_attempts);
            }

            Some(notification) = notifications.recv() => {
                println!("{}", render::notification_line(&notification));
            }

            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read stdin: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Help) => println!("{HELP}"),
                    Ok(command) => dispatch(ctl, command),
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
}

fn dispatch(ctl: &LifecycleController, command: ConsoleCommand) {
    let ctl = ctl.clone();
    tokio::spawn(async move {
        // Failures already surface as state changes and notifications
        let result = match command {
            ConsoleCommand::Start => ctl.start().await,
            ConsoleCommand::Stop => ctl.stop().await,
            ConsoleCommand::Status => ctl.query_status().await.map(|_| {
                println!("{}", render::status_line(&ctl.view()));
            }),
            ConsoleCommand::Help | ConsoleCommand::Quit => Ok(()),
        };
        if let Err(e) = result {
            debug!("{command:?} failed: {e}");
        }
    });
}

fn print_state(state: &LifecycleState, max_attempts: u32) {
    let view = StatusView::with_budget(state, max_attempts);
    println!("{}", render::status_line(&view));
}
