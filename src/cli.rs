// src/cli.rs
use std::time::Duration;

use clap::{Parser, Subcommand};
use url::Url;

use crate::config::consts::{BASE_URL, DEFAULT_SHAPER_DOWN_PCT, DEFAULT_SHAPER_UP_PCT, ENV_BASE_URL};
use crate::config::options::{Mode, RunOptions, ShaperRequest};

/// Launtel Speed Info and Change CLI
#[derive(Parser, Debug)]
#[command(name = "launtel", version, about, long_about = None)]
pub struct Cli {
    /// Launtel speed PSID to switch to (prompted when omitted)
    #[arg(short, long)]
    pub psid: Option<String>,

    /// Commit to Launtel. Without it nothing is changed.
    #[arg(short, long, global = true)]
    pub commit: bool,

    /// Use the latest-pricing offers instead of the standard ones
    #[arg(short, long, global = true)]
    pub latest: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Portal base URL
    #[arg(long, env = ENV_BASE_URL, default_value = BASE_URL, global = true)]
    pub base_url: Url,

    /// Per-request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the traffic shaper and set caps as a percentage of the plan speed
    Shaper {
        /// Upload cap, percent of the rated upload speed
        #[arg(long, default_value_t = DEFAULT_SHAPER_UP_PCT, value_parser = clap::value_parser!(u32).range(1..=1000))]
        up: u32,

        /// Download cap, percent of the rated download speed
        #[arg(long, default_value_t = DEFAULT_SHAPER_DOWN_PCT, value_parser = clap::value_parser!(u32).range(1..=1000))]
        down: u32,
    },
}

impl Cli {
    pub fn into_options(self) -> RunOptions {
        let mode = match self.command {
            Some(Command::Shaper { up, down }) => Mode::Shaper(ShaperRequest { up_pct: up, down_pct: down }),
            None => Mode::Plan,
        };
        RunOptions {
            base_url: self.base_url,
            psid: self.psid,
            commit: self.commit,
            latest: self.latest,
            timeout: self.timeout.map(Duration::from_secs),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_flags() {
        let cli = Cli::try_parse_from(["launtel", "-p", "123", "-c", "-l"]).unwrap();
        let opts = cli.into_options();
        assert_eq!(opts.psid.as_deref(), Some("123"));
        assert!(opts.commit && opts.latest);
        assert_eq!(opts.mode, Mode::Plan);
        assert_eq!(opts.base_url.as_str(), "https://residential.launtel.net.au/");
    }

    #[test]
    fn shaper_defaults_and_global_commit() {
        let cli = Cli::try_parse_from(["launtel", "shaper", "--commit"]).unwrap();
        let opts = cli.into_options();
        assert!(opts.commit);
        assert_eq!(opts.mode, Mode::Shaper(ShaperRequest { up_pct: 95, down_pct: 108 }));
    }

    #[test]
    fn shaper_percentages() {
        let cli = Cli::try_parse_from(["launtel", "shaper", "--up", "90", "--down", "100"]).unwrap();
        assert_eq!(cli.command, Some(Command::Shaper { up: 90, down: 100 }));
        assert!(Cli::try_parse_from(["launtel", "shaper", "--up", "0"]).is_err());
    }
}
