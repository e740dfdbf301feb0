use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Result, bail};
use base64::Engine;

/// How copied text left the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClipboardRoute {
	Osc52,
	Tool(&'static str),
}

/// Copy through a native clipboard tool when one is installed, otherwise
/// through an OSC 52 escape sequence, which also works over ssh and in tmux.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<ClipboardRoute> {
	if let Some(tool) = copy_with_tool(text) {
		return Ok(ClipboardRoute::Tool(tool));
	}
	if write_osc52(text) {
		return Ok(ClipboardRoute::Osc52);
	}
	bail!("no clipboard tool available and the terminal rejected OSC 52")
}

pub(crate) fn osc52_sequence(text: &str, in_tmux: bool) -> String {
	let encoded = base64::engine::general_purpose::STANDARD.encode(text);
	if in_tmux {
		format!("\x1bPtmux;\x1b\x1b]52;c;{encoded}\x07\x1b\\")
	} else {
		format!("\x1b]52;c;{encoded}\x07")
	}
}

fn write_osc52(text: &str) -> bool {
	let sequence = osc52_sequence(text, env::var_os("TMUX").is_some());
	let mut stdout = std::io::stdout().lock();
	stdout.write_all(sequence.as_bytes()).is_ok() && stdout.flush().is_ok()
}

fn copy_with_tool(text: &str) -> Option<&'static str> {
	let run = |program: &str, args: &[&str]| -> bool {
		let Ok(mut child) = Command::new(program)
			.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
		else {
			return false;
		};
		let written = child
			.stdin
			.take()
			.is_some_and(|mut stdin| stdin.write_all(text.as_bytes()).is_ok());
		child.wait().is_ok_and(|status| written && status.success())
	};

	if env::var_os("WAYLAND_DISPLAY").is_some() && run("wl-copy", &[]) {
		return Some("wl-copy");
	}
	if env::var_os("DISPLAY").is_some() {
		if run("xclip", &["-selection", "clipboard"]) {
			return Some("xclip");
		}
		if run("xsel", &["--clipboard", "--input"]) {
			return Some("xsel");
		}
	}
	if cfg!(target_os = "macos") && run("pbcopy", &[]) {
		return Some("pbcopy");
	}
	None
}
