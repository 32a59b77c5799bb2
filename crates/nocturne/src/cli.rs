//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use nocturne_config::Config;

/// A drifting starfield for your terminal.
#[derive(Debug, Parser)]
#[command(name = "nocturne", version, about)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible sky.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the default config file and exit.
    #[arg(long)]
    pub write_default_config: bool,
}

impl Cli {
    /// Override config values with the ones given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.sky.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.display.frame_interval_ms = (1000 / fps as u64).max(1);
        }
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["nocturne", "--seed", "5", "--fps", "30", "--log-file", "sky.log"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.sky.seed, Some(5));
        assert_eq!(config.display.frame_interval_ms, 33);
        assert_eq!(config.log.file, Some(PathBuf::from("sky.log")));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["nocturne"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_fps_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["nocturne", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["nocturne", "--fps", "1000"]).is_err());
    }
}
