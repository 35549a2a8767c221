//! Line-oriented terminal front end.

pub mod bell;
pub mod commands;
pub mod render;

pub use bell::TerminalBell;
pub use commands::{dispatch, LabCommand, HELP};
pub use render::render;

use anyhow::{Context, Result};
use log::warn;
use std::io::{stdout, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::events::LabEvent;
use crate::session::{Screen, SessionController};

fn show(text: &str) -> Result<()> {
    let mut out = stdout();
    out.write_all(text.as_bytes())?;
    out.write_all(b"> ")?;
    out.flush()?;
    Ok(())
}

pub async fn run_terminal(controller: SessionController) -> Result<()> {
    let mut events = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    show(&render(&controller.snapshot().await))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    show("")?;
                    continue;
                }
                match line.parse::<LabCommand>() {
                    Ok(LabCommand::Quit) => break,
                    Ok(LabCommand::Help) => show(&format!("{HELP}\n"))?,
                    Ok(command) => {
                        if let Err(err) = dispatch(&controller, command).await {
                            println!("! {err}");
                        }
                        show(&render(&controller.snapshot().await))?;
                    }
                    Err(err) => show(&format!("! {err}\n"))?,
                }
            }
            event = events.recv() => {
                match event {
                    // The only transition not caused by typed input.
                    Ok(LabEvent::ScreenChanged { screen: Screen::Exercise }) => {
                        println!();
                        show(&render(&controller.snapshot().await))?;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Terminal fell behind by {skipped} events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}
