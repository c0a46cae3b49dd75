use std::io::{self, IsTerminal, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use devwrap_core::ShareMessage;
use devwrap_session::{ShareError, ShareSink};

// ── Native target ──

/// Hands the message to a user-configured program (`share_command`), one
/// field per line on stdin: title, text, url.
pub struct CommandShare {
    command: Option<String>,
}

impl CommandShare {
    pub fn new(command: Option<String>) -> Self {
        let command = command.filter(|c| !c.trim().is_empty());
        Self { command }
    }
}

impl ShareSink for CommandShare {
    fn name(&self) -> &'static str {
        "share command"
    }

    fn deliver(&self, message: &ShareMessage) -> Result<(), ShareError> {
        let Some(command) = &self.command else {
            return Err(ShareError::Unavailable(self.name()));
        };
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(ShareError::Unavailable(self.name()));
        };
        let failed = |reason: String| ShareError::Failed {
            target: "share command",
            reason,
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(format!("{program}: {e}")))?;

        let input = format!("{}\n{}\n{}\n", message.title, message.text, message.url);
        let (written, status) = feed(&mut child, &input);
        let status = status.map_err(|e| failed(e.to_string()))?;
        written.map_err(|e| failed(e.to_string()))?;
        if !status.success() {
            return Err(failed(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

/// Write `input` to the child's stdin, close it, then wait. The child is
/// reaped even when the write fails, e.g. on a broken pipe.
fn feed(child: &mut Child, input: &str) -> (io::Result<()>, io::Result<ExitStatus>) {
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };
    (written, child.wait())
}

// ── Clipboard ──

/// Copies through the terminal with an OSC 52 escape sequence.
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl ShareSink for Osc52Clipboard {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn deliver(&self, message: &ShareMessage) -> Result<(), ShareError> {
        let mut out = std::io::stdout();
        if !out.is_terminal() {
            return Err(ShareError::Unavailable(self.name()));
        }
        out.write_all(Self::sequence(&message.clipboard_text()).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| ShareError::Failed {
                target: "clipboard",
                reason: e.to_string(),
            })
    }
}
