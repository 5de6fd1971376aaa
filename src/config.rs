//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::Mode;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server for an ADHD-friendly Pomodoro timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Timer mode at startup (moderate, severe, neurotypical, custom)
    #[arg(short, long, default_value = "moderate")]
    pub mode: Mode,

    /// How often the message store is polled, in milliseconds
    #[arg(long, default_value = "5000")]
    pub poll_interval_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Message poll cadence; zero is bumped to 1ms so the interval stays valid
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_startup() {
        let config = Config::try_parse_from(["pomodoro-server"]).unwrap();
        assert_eq!(config.mode, Mode::Moderate);
        assert_eq!(config.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn mode_and_verbosity_flags() {
        let config = Config::try_parse_from(["pomodoro-server", "-m", "severe", "-v", "--poll-interval-ms", "0"]).unwrap();
        assert_eq!(config.mode, Mode::Severe);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
        assert!(Config::try_parse_from(["pomodoro-server", "--mode", "turbo"]).is_err());
    }
}
