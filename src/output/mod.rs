//! Output channel for the run
//!
//! Everything the user sees goes through [`Console`]. Long text is split into
//! fixed-size chunks so chat-style frontends with message limits can relay it.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub mod summary;

pub use summary::{CHUNK_SIZE, chunks, summarize};

/// Human-readable output channel
pub trait Console: Send + Sync {
    /// Print one message
    fn print(&self, message: &str);

    /// Show a spinner until [`Console::spinner_stop`]
    fn spinner_start(&self, message: &str);

    /// Stop the spinner, leaving `message` in its place
    fn spinner_stop(&self, message: &str);

    /// Print `text` as a sequence of [`CHUNK_SIZE`] byte messages
    fn print_big(&self, text: &str) {
        for chunk in chunks(text, CHUNK_SIZE) {
            self.print(chunk);
        }
    }
}

/// Print the interesting tail of scanner output
pub fn print_scanner_output(console: &dyn Console, output: &[u8]) {
    let text = String::from_utf8_lossy(output);
    console.print_big(&summarize(&text));
}

/// Terminal console with an indicatif spinner
#[derive(Default)]
pub struct Terminal {
    spinner: Mutex<Option<ProgressBar>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for Terminal {
    fn print(&self, message: &str) {
        match self.spinner.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(spinner) => spinner.println(message),
                None => println!("{}", message),
            },
            Err(_) => println!("{}", message),
        }
    }

    fn spinner_start(&self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(previous) = guard.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn spinner_stop(&self, message: &str) {
        let previous = self.spinner.lock().ok().and_then(|mut guard| guard.take());
        match previous {
            Some(spinner) => spinner.finish_with_message(message.to_string()),
            None => println!("{}", message),
        }
    }
}
