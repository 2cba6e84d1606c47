//! Terminal console for the interactive loop

use std::io::{self, BufRead};

use crate::cli::output;
use crate::infrastructure::traits::Console;

/// Console reading lines from stdin and printing through [`output`].
pub struct TerminalConsole<R> {
    input: R,
}

impl TerminalConsole<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> TerminalConsole<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Console for TerminalConsole<R> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        output::prompt(prompt);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // keep the shell prompt off the dangling prompt line
            println!();
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn info(&mut self, msg: &str) {
        output::info(msg);
    }

    fn success(&mut self, msg: &str) {
        output::success(msg);
    }

    fn warning(&mut self, msg: &str) {
        output::warning(msg);
    }

    fn error(&mut self, msg: &str) {
        output::error(msg);
    }
}
