//! Where `print` writes and `input` reads.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// The next line of input without its line terminator; empty at end of input.
    fn read_line(&mut self) -> io::Result<String>;
}

/// Scripted input and captured output, for hosts that run programs off-screen.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        Ok(self.input.pop_front().unwrap_or_default())
    }
}

/// The process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioConsole;

impl Console for StdioConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
