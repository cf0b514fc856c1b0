//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::TimerEvent;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown")]
#[command(about = "Run a countdown timer and report its events")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Countdown duration in seconds
    #[arg(short, long, default_value = "60")]
    pub duration: u64,

    /// Comma separated events to report (start, interval, pause, reset, stop, toggle)
    #[arg(short, long, value_delimiter = ',')]
    pub events: Vec<TimerEvent>,

    /// Report events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Events to report, every event when none were selected
    pub fn reported_events(&self) -> Vec<TimerEvent> {
        if self.events.is_empty() {
            TimerEvent::ALL.to_vec()
        } else {
            let mut events = Vec::with_capacity(self.events.len());
            for event in &self.events {
                if !events.contains(event) {
                    events.push(*event);
                }
            }
            events
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
