//  _  __               ____                __  _
// | |/ /  ___  _   _  / ___| _ __   __ _  / _|| |_   ___  _ __
// | ' /  / _ \| | | || |    | '__| / _` || |_ | __| / _ \| '__|
// | . \ |  __/| |_| || |___ | |   | (_| ||  _|| |_ |  __/| |
// |_|\_\ \___| \__, | \____||_|    \__,_||_|   \__| \___||_|
//              |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Clipboard handler

use std::io::{BufRead, Read, Write};

use arboard::Clipboard;
use tracing::{debug, warn};

use crate::error::{KeycrafterError, Result};

/// Hidden subcommand that runs [`hold_clipboard`] in a background process.
pub const HOLD_COMMAND: &str = "hold-clipboard";

/// Write-only destination for copied passwords.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

fn unavailable(e: impl std::fmt::Display) -> KeycrafterError {
    KeycrafterError::ClipboardUnavailable(e.to_string())
}

/// System clipboard, opened on first use and owned by this process.
#[derive(Default)]
pub struct SystemClipboard {
    ctx: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&mut Clipboard> {
        if self.ctx.is_none() {
            let ctx = Clipboard::new().map_err(|e| {
                warn!(error = %e, "clipboard initialisation failed");
                unavailable(e)
            })?;
            self.ctx = Some(ctx);
        }
        self.ctx
            .as_mut()
            .ok_or_else(|| unavailable("not initialised"))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let ctx = self.context()?;
        ctx.set_text(text).map_err(|e| {
            warn!(error = %e, "clipboard write failed");
            unavailable(e)
        })?;
        debug!(chars = text.chars().count(), "copied to clipboard");
        Ok(())
    }
}

/// Clipboard whose contents outlive this process.
///
/// On Linux the X11/Wayland selection disappears with its owner, so the text
/// is handed to a background copy of this executable that keeps serving it
/// until another application takes the clipboard. Elsewhere the system
/// clipboard keeps the text after we exit.
#[derive(Default)]
pub struct DetachedClipboard {
    #[cfg(not(target_os = "linux"))]
    inner: SystemClipboard,
}

impl DetachedClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for DetachedClipboard {
    #[cfg(target_os = "linux")]
    fn set_text(&mut self, text: &str) -> Result<()> {
        spawn_holder(text)
    }

    #[cfg(not(target_os = "linux"))]
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)
    }
}

#[cfg(target_os = "linux")]
fn spawn_holder(text: &str) -> Result<()> {
    use std::io::BufReader;
    use std::os::unix::process::CommandExt;
    use std::process::{self, Stdio};
    use std::env;

    let exe_path = env::current_exe().map_err(unavailable)?;
    let mut cmd = process::Command::new(exe_path);
    cmd.arg(HOLD_COMMAND)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .process_group(0);
    let mut child = cmd.spawn().map_err(unavailable)?;

    // The secret travels over the pipe, never through argv or the environment.
    let mut stdin = child.stdin.take().ok_or_else(|| unavailable("holder stdin closed"))?;
    stdin.write_all(text.as_bytes()).map_err(unavailable)?;
    drop(stdin);

    let stdout = child.stdout.take().ok_or_else(|| unavailable("holder stdout closed"))?;
    read_handoff(BufReader::new(stdout))?;
    debug!(pid = child.id(), "clipboard handed to background holder");
    Ok(())
}

/// Interpret the holder's one-line status report.
pub fn read_handoff<R: BufRead>(mut reader: R) -> Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(unavailable)?;
    match line.trim_end() {
        "ok" => Ok(()),
        "" => Err(unavailable("clipboard holder exited before taking the clipboard")),
        other => {
            let reason = other.strip_prefix("error: ").unwrap_or(other);
            warn!(reason, "clipboard holder failed");
            Err(unavailable(reason))
        }
    }
}

/// Body of the background holder: read the text, take the clipboard, report
/// `ok` (or `error: ...`) on `status`, then keep serving until replaced.
pub fn hold_clipboard<R: Read, W: Write>(mut input: R, mut status: W) -> Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(unavailable)?;

    let ctx = match Clipboard::new().and_then(|mut ctx| ctx.set_text(text.as_str()).map(|_| ctx)) {
        Ok(ctx) => ctx,
        Err(e) => {
            let _ = writeln!(status, "error: {}", e);
            return Err(unavailable(e));
        }
    };
    writeln!(status, "ok").map_err(unavailable)?;
    status.flush().map_err(unavailable)?;
    drop(status);

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        let mut ctx = ctx;
        ctx.set().wait().text(text).map_err(unavailable)?;
    }
    #[cfg(not(target_os = "linux"))]
    drop(ctx);
    Ok(())
}

pub fn copy_to_clipboard(secret: &str) -> Result<()> {
    DetachedClipboard::new().set_text(secret)
}
