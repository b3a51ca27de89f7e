//! Console abstraction for interactive prompts.
//!
//! The rating collector and the CLI prompt loops talk to the operator
//! through the Console trait rather than stdin/stdout directly, so the
//! whole interaction can be driven from tests with a scripted console.

use crate::error::Result;
use std::io::{BufRead, Write};

/// Seam between the session logic and the terminal.
pub trait Console {
    /// Print `text`, then block until the operator replies with one line.
    ///
    /// The returned line is trimmed of surrounding whitespace.
    fn prompt(&mut self, text: &str) -> Result<String>;

    /// Print a line of output without waiting for a reply.
    fn say(&mut self, text: &str);
}

/// Console backed by the process stdin/stdout.
pub struct StdConsole;

/// Read one trimmed reply line.
///
/// A zero-byte read means the input is closed; that becomes an
/// `UnexpectedEof` error rather than an empty string, which the
/// re-prompt loops would otherwise retry forever.
fn read_reply(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed while waiting for a reply",
        )
        .into());
    }
    Ok(line.trim().to_string())
}

impl Console for StdConsole {
    fn prompt(&mut self, text: &str) -> Result<String> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write!(out, "{} ", text)?;
        out.flush()?;

        let stdin = std::io::stdin();
        let mut lock = stdin.lock();
        read_reply(&mut lock)
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Console that replays a fixed script of operator replies.
///
/// Used by tests; records every prompt it was shown.
pub struct ScriptedConsole {
    replies: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, text: &str) -> Result<String> {
        self.prompts.push(text.to_string());
        Ok(self.replies.pop_front().unwrap_or_default())
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
