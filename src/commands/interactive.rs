use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use keycrafter::configtool::Config;
use keycrafter::setclip::DetachedClipboard;
use keycrafter::{Action, ApplicationState, CharClass, KeycrafterError};

use super::styled_rating;

const HELP: &str = "\
Commands:
  g          generate a password
  c          copy the current password
  c N        copy history entry N
  x          clear the current password
  l N        set the password length
  u n s w    toggle capital letters, numbers, special characters, lower letters
  h          show this help
  q          quit";

/// Checkbox order on screen.
const CLASS_ORDER: [CharClass; 4] = [
    CharClass::Uppercase,
    CharClass::Digits,
    CharClass::Special,
    CharClass::Lowercase,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    Help,
    Quit,
}

enum Notice {
    Info(String),
    Warning(String),
}

fn class_key(class: CharClass) -> char {
    match class {
        CharClass::Uppercase => 'u',
        CharClass::Digits => 'n',
        CharClass::Special => 's',
        CharClass::Lowercase => 'w',
    }
}

fn parse_number(arg: Option<&str>, what: &str) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| format!("Missing {}", what))?;
    arg.parse()
        .map_err(|_| format!("Invalid {}: {}", what, arg))
}

/// Parse one line of session input. History positions are 1-based.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err("Empty command".to_string());
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments: {}", line.trim()));
    }

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("g" | "generate", None) => Command::Dispatch(Action::Generate),
        ("c" | "copy", None) => Command::Dispatch(Action::CopyCurrent),
        ("c" | "copy", position) => match parse_number(position, "history position")? {
            0 => return Err("History positions start at 1".to_string()),
            n => Command::Dispatch(Action::CopyHistoryItem(n - 1)),
        },
        ("x" | "clear", None) => Command::Dispatch(Action::Clear),
        ("l" | "length", length) => {
            Command::Dispatch(Action::SetLength(parse_number(length, "length")?))
        }
        ("h" | "help" | "?", None) => Command::Help,
        ("q" | "quit" | "exit", None) => Command::Quit,
        (key, None) => match CharClass::ALL
            .into_iter()
            .find(|class| key.len() == 1 && key.starts_with(class_key(*class)))
        {
            Some(class) => Command::Dispatch(Action::Toggle(class)),
            None => return Err(format!("Unknown command: {}", verb)),
        },
        _ => return Err(format!("Unknown command: {}", line.trim())),
    };
    Ok(command)
}

fn render<W: Write>(
    out: &mut W,
    state: &ApplicationState,
    notice: Option<&Notice>,
    clear_screen: bool,
) -> io::Result<()> {
    if clear_screen {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    writeln!(out, "{}", "KeyCrafter".bold())?;
    writeln!(out, "Create Powerful and One-of-a-Kind Passwords")?;
    writeln!(out)?;

    let options = state.options();
    let bounds = state.bounds();
    writeln!(
        out,
        "Choose Password Length: {}  ({}-{})",
        options.length, bounds.min, bounds.max
    )?;
    for class in CLASS_ORDER {
        let mark = if options.includes(class) { 'x' } else { ' ' };
        writeln!(out, "  [{}] {:<20} ({})", mark, class.label(), class_key(class))?;
    }
    writeln!(out)?;

    writeln!(out, "Password: {}", state.displayed_password())?;
    writeln!(out, "{}", styled_rating(state.rating()))?;
    writeln!(out)?;

    writeln!(out, "Previously Generated Keys")?;
    let visible = state.visible_history();
    if visible.is_empty() {
        writeln!(out, "  (none yet)")?;
    }
    for (i, entry) in visible.iter().enumerate() {
        writeln!(
            out,
            "  {}. {:<30} {:<7} {}",
            i + 1,
            entry.password,
            entry.rating().as_str(),
            entry.created_at.format("%H:%M:%S").to_string().dark_grey()
        )?;
    }
    writeln!(out)?;

    match notice {
        Some(Notice::Info(text)) => writeln!(out, "{}", text.as_str().green())?,
        Some(Notice::Warning(text)) => writeln!(out, "{}", text.as_str().yellow())?,
        None => {}
    }
    write!(out, "[g]enerate [c]opy [x] clear [l N] length [h]elp [q]uit > ")?;
    out.flush()
}

fn describe_error(err: &KeycrafterError) -> String {
    match err {
        KeycrafterError::NoCharacterClassSelected => format!("Selection Missing: {}", err),
        _ => err.to_string(),
    }
}

/// Run the interactive session on stdin/stdout until quit or end of input.
pub fn run(config: &Config) -> Result<()> {
    let mut state = ApplicationState::from_config(config);
    let mut clipboard = DetachedClipboard::new();
    let mut rng = rand::thread_rng();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let clear_screen = stdout.is_terminal();
    let mut out = stdout.lock();
    let mut notice: Option<Notice> = None;

    let mut lines = stdin.lock().lines();

    loop {
        render(&mut out, &state, notice.as_ref(), clear_screen).context("Failed to draw screen")?;
        notice = None;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(input = line.trim(), "session command");

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => notice = Some(Notice::Info(HELP.to_string())),
            Ok(Command::Dispatch(action)) => {
                match state.try_dispatch(action, &mut rng, &mut clipboard) {
                    Ok(outcome) => notice = outcome.message().map(Notice::Info),
                    Err(e) => notice = Some(Notice::Warning(describe_error(&e))),
                }
            }
            Err(e) => notice = Some(Notice::Warning(e)),
        }
    }
    writeln!(out).context("Failed to draw screen")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions() {
        assert_eq!(parse_command("g"), Ok(Command::Dispatch(Action::Generate)));
        assert_eq!(parse_command(" copy "), Ok(Command::Dispatch(Action::CopyCurrent)));
        assert_eq!(parse_command("c 3"), Ok(Command::Dispatch(Action::CopyHistoryItem(2))));
        assert_eq!(parse_command("x"), Ok(Command::Dispatch(Action::Clear)));
        assert_eq!(parse_command("l 20"), Ok(Command::Dispatch(Action::SetLength(20))));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("H"), Ok(Command::Help));
    }

    #[test]
    fn parses_toggles() {
        assert_eq!(
            parse_command("u"),
            Ok(Command::Dispatch(Action::Toggle(CharClass::Uppercase)))
        );
        assert_eq!(
            parse_command("n"),
            Ok(Command::Dispatch(Action::Toggle(CharClass::Digits)))
        );
        assert_eq!(
            parse_command("s"),
            Ok(Command::Dispatch(Action::Toggle(CharClass::Special)))
        );
        assert_eq!(
            parse_command("w"),
            Ok(Command::Dispatch(Action::Toggle(CharClass::Lowercase)))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("c 0").is_err());
        assert!(parse_command("c two").is_err());
        assert!(parse_command("l").is_err());
        assert!(parse_command("g now").is_err());
        assert!(parse_command("z").is_err());
        assert!(parse_command("l 12 13").is_err());
    }

    #[test]
    fn screen_shows_password_and_history() {
        let mut state = ApplicationState::default();
        let options = *state.options();
        state.record("Abc123!?xyzQ".into(), options);
        let mut buf = Vec::new();
        render(
            &mut buf,
            &state,
            Some(&Notice::Info("Password copied to clipboard!".to_string())),
            false,
        )
        .unwrap();
        let screen = String::from_utf8(buf).unwrap();
        assert!(!screen.contains("\x1b[2J"));
        assert!(screen.contains("Password: Abc123!?xyzQ"));
        assert!(screen.contains("Previously Generated Keys"));
        assert!(screen.contains("1. Abc123!?xyzQ"));
        assert!(screen.contains("MEDIUM "));
        assert!(screen.contains("Security: MEDIUM"));
        assert!(screen.contains("Password copied to clipboard!"));
    }

    #[test]
    fn screen_clear_is_caller_controlled() {
        let state = ApplicationState::default();
        let mut buf = Vec::new();
        render(&mut buf, &state, None, true).unwrap();
        let screen = String::from_utf8(buf).unwrap();
        assert!(screen.starts_with("\x1b[2J"));
        assert!(screen.contains("(none yet)"));
    }
}
