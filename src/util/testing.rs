use std::collections::VecDeque;
use std::env;
use std::io;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::Console;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["rusqlite"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Console fed from a fixed list of input lines, recording everything shown.
///
/// Reading past the last line behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    /// Transcript: prompts as `> prompt`, messages tagged by kind
    pub transcript: Vec<String>,
    /// Number of lines read so far
    pub reads: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// How many transcript entries equal `entry`.
    pub fn count(&self, entry: &str) -> usize {
        self.transcript.iter().filter(|e| *e == entry).count()
    }

    /// Whether any transcript entry contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.transcript.iter().any(|e| e.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(format!("> {prompt}"));
        let line = self.inputs.pop_front();
        if line.is_some() {
            self.reads += 1;
        }
        Ok(line)
    }

    fn info(&mut self, msg: &str) {
        self.transcript.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.transcript.push(format!("ok: {msg}"));
    }

    fn warning(&mut self, msg: &str) {
        self.transcript.push(format!("warning: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.transcript.push(format!("error: {msg}"));
    }
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_exhausted_script_when_reading_then_returns_end_of_input() {
        let mut console = ScriptedConsole::new(["only"]);
        assert_eq!(console.read_line("a").unwrap(), Some("only".to_string()));
        assert_eq!(console.read_line("b").unwrap(), None);
        assert_eq!(console.reads, 1);
        assert_eq!(console.count("> b"), 1);
    }
}
