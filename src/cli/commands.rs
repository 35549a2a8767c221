use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Error, Result};

use crate::catalog::Theme;
use crate::session::{NoteField, SessionController};
use crate::trials::TILE_COUNT;

pub const HELP: &str = "\
commands:
  start              begin the perception exercise
  rv                 begin a remote viewing session
  1 | 2 | 3 | 4      choose a tile
  pass               skip this trial
  conf <0..1>        set your confidence (e.g. conf 0.7)
  next               continue after feedback
  advance            next remote viewing phase
  note sensory|sounds|aol <text>
  sound on|off       alpha-wave soundscape
  drift on|off       drifting tiles
  theme clinical|warm
  home               return to the lab
  restart            start over from the summary
  help | quit";

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum LabCommand {
    Start,
    RemoteViewing,
    Select(usize),
    Pass,
    Confidence(f64),
    Next,
    Advance,
    Note(NoteField, String),
    Sound(bool),
    Drift(bool),
    Theme(Theme),
    Home,
    Restart,
    Help,
    Quit,
}

fn parse_switch(value: Option<&str>) -> Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("on") | Some("1") | Some("true") => Ok(true),
        Some("off") | Some("0") | Some("false") => Ok(false),
        _ => bail!("expected 'on' or 'off'"),
    }
}

impl FromStr for LabCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        let command = match word.to_ascii_lowercase().as_str() {
            "start" | "s" => LabCommand::Start,
            "rv" => LabCommand::RemoteViewing,
            "pass" | "p" => LabCommand::Pass,
            "next" | "n" | "continue" => LabCommand::Next,
            "advance" | "a" => LabCommand::Advance,
            "home" | "back" => LabCommand::Home,
            "restart" => LabCommand::Restart,
            "help" | "?" => LabCommand::Help,
            "quit" | "q" | "exit" => LabCommand::Quit,
            "conf" | "c" => {
                let raw = arg.ok_or_else(|| anyhow!("conf needs a value between 0 and 1"))?;
                let value: f64 = raw
                    .parse()
                    .with_context(|| format!("'{raw}' is not a number"))?;
                if !(0.0..=1.0).contains(&value) {
                    bail!("confidence must be between 0 and 1");
                }
                LabCommand::Confidence(value)
            }
            "sound" => LabCommand::Sound(parse_switch(arg)?),
            "drift" => LabCommand::Drift(parse_switch(arg)?),
            "theme" => LabCommand::Theme(
                arg.ok_or_else(|| anyhow!("theme needs clinical or warm"))?
                    .parse()?,
            ),
            "note" => {
                let (field, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, text)| (field, text.trim()))
                    .unwrap_or((rest, ""));
                let field = match field.to_ascii_lowercase().as_str() {
                    "sensory" | "colors" => NoteField::Sensory,
                    "sounds" | "smells" => NoteField::Sounds,
                    "aol" | "overlay" => NoteField::Overlay,
                    other => bail!("unknown note field '{other}' (sensory, sounds or aol)"),
                };
                LabCommand::Note(field, text.to_string())
            }
            tile => match tile.parse::<usize>() {
                Ok(n) if (1..=TILE_COUNT).contains(&n) => LabCommand::Select(n - 1),
                Ok(_) => bail!("tiles are numbered 1 to {TILE_COUNT}"),
                Err(_) => bail!("unknown command '{line}' (type 'help')"),
            },
        };
        Ok(command)
    }
}

/// Applies a command to the controller. `Help` and `Quit` are handled by the caller.
pub async fn dispatch(controller: &SessionController, command: LabCommand) -> Result<()> {
    match command {
        LabCommand::Start => controller.start_exercise().await,
        LabCommand::RemoteViewing => controller.start_remote_viewing().await,
        LabCommand::Select(index) => controller.select_tile(index).await.map(|_| ()),
        LabCommand::Pass => controller.pass().await,
        LabCommand::Confidence(value) => controller.set_confidence(value).await,
        LabCommand::Next => controller.next_trial().await,
        LabCommand::Advance => controller.advance_remote_viewing_step().await.map(|_| ()),
        LabCommand::Note(field, text) => controller.set_remote_notes(field, text).await,
        LabCommand::Sound(on) => {
            controller.toggle_soundscape(on).await;
            Ok(())
        }
        LabCommand::Drift(on) => {
            controller.toggle_drift(on).await;
            Ok(())
        }
        LabCommand::Theme(theme) => {
            controller.set_theme(theme).await;
            Ok(())
        }
        LabCommand::Home => controller.return_to_lab().await,
        LabCommand::Restart => controller.restart().await,
        LabCommand::Help | LabCommand::Quit => Ok(()),
    }
}
