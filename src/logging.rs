//! File logger. The terminal belongs to the game, so logs only go to a file.

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

/// Best effort: write and flush errors are dropped, since there is nowhere left to report them.
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
    start: Instant,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed();
        if let Ok(mut f) = self.file.lock() {
            let _ = writeln!(
                f,
                "[{:>5}.{:03}] {:<5} {}: {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut f) = self.file.lock() {
            let _ = f.flush();
        }
    }
}

/// Append log records at or above `level` to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
        start: Instant::now(),
    }))
    .context("installing logger")?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    fn temp_log(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("hanafuda-pon-{}-{name}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn logger_at(path: &Path, level: LevelFilter) -> FileLogger {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        FileLogger {
            file: Mutex::new(file),
            level,
            start: Instant::now(),
        }
    }

    #[test]
    fn writes_enabled_records_and_skips_the_rest() {
        let path = temp_log("levels");
        let logger = logger_at(&path, LevelFilter::Info);
        logger.log(
            &Record::builder()
                .args(format_args!("round over: grid full, score 500"))
                .level(Level::Info)
                .target("hanafuda_pon::game")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("toggle (0, 0): Selected"))
                .level(Level::Debug)
                .target("hanafuda_pon::game")
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO  hanafuda_pon::game: round over: grid full, score 500"));
        assert!(!text.contains("toggle"));
        assert_eq!(text.lines().count(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn appends_to_existing_file() {
        let path = temp_log("append");
        std::fs::write(&path, "earlier\n").unwrap();
        let logger = logger_at(&path, LevelFilter::Warn);
        logger.log(
            &Record::builder()
                .args(format_args!("theme not loaded"))
                .level(Level::Warn)
                .target("hanafuda_pon")
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("earlier\n"));
        assert!(text.lines().nth(1).is_some_and(|l| l.ends_with("theme not loaded")));
        let _ = std::fs::remove_file(&path);
    }
}
