// Conditional logging macros - only active in debug builds

use chrono::Local;
use env_logger::{Env, Target};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        if false {
            log::debug!($($arg)*);
        }
    }};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        if false {
            log::info!($($arg)*);
        }
    }};
}

const APP_DIR: &str = "wheel-of-fortune";

/// Directory for log files written while the terminal UI owns the screen.
#[must_use]
pub fn get_log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR))
}

fn open_log_file() -> io::Result<(File, PathBuf)> {
    let dir = get_log_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no cache directory"))?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("wof-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    Ok((File::create(&path)?, path))
}

/// Installs the global logger.
///
/// `RUST_LOG` wins over the default level. With `to_file` set, records go to
/// a timestamped file instead of stderr and its path is returned.
pub fn init_logging(verbose: bool, to_file: bool) -> Option<PathBuf> {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let mut log_path = None;
    if to_file {
        match open_log_file() {
            Ok((file, path)) => {
                builder.target(Target::Pipe(Box::new(file)));
                log_path = Some(path);
            }
            // Nowhere safe to write while the TUI is up.
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    if builder.try_init().is_err() {
        return None;
    }
    log_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_app_specific() {
        if let Some(dir) = get_log_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }

    #[test]
    fn test_macros_expand_in_expression_position() {
        let value = 3;
        debug_log!("value is {}", value);
        info_log!("value is {}", value);
    }
}
