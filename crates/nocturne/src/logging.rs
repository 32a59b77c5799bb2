//! File logging. The terminal belongs to the sky, so logs never go there.

use std::fs::{self, OpenOptions};

use env_logger::{Builder, Env, Target};
use nocturne_config::Config;

/// Install a logger writing to the configured log file.
///
/// `RUST_LOG` takes precedence over the configured level. If the file cannot
/// be opened, logging stays disabled.
pub fn init(config: &Config) {
    let Some(path) = config.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let env = Env::default().default_filter_or(config.log.level.as_str());
    let _ = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}
