// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use time::macros::format_description;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "clarity-console", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.clone())
}

/// Level filter: `RUST_LOG`, then `CLARITY_CONSOLE_LOGLEVEL`, then info for this crate.
fn log_level() -> String {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.clone()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Initializes file-based logging using the tracing subscriber.
///
/// The terminal belongs to the UI, so nothing is written to stdout; the file
/// is truncated on every start and shown in the log panel.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(log_path())?;

    let timer = LocalTime::new(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"));
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_timer(timer)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(log_level()));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// How far from the end of the log file the panel starts reading.
const TAIL_WINDOW_BYTES: u64 = 64 * 1024;

/// The last `lines` lines of the log file. Empty when nothing was logged yet.
pub fn read_log_tail(lines: usize) -> Vec<String> {
    read_tail_of(&log_path(), lines).unwrap_or_default()
}

/// Reads at most the last [`TAIL_WINDOW_BYTES`] of `path`. A line cut by the
/// window start is skipped.
fn read_tail_of(path: &Path, lines: usize) -> std::io::Result<Vec<String>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let start = len.saturating_sub(TAIL_WINDOW_BYTES);
    file.seek(SeekFrom::Start(start))?;

    let mut bytes = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    let content: &str = if start > 0 {
        text.split_once('\n').map_or("", |(_, rest)| rest)
    } else {
        &text
    };
    Ok(tail(content, lines))
}

fn tail(content: &str, lines: usize) -> Vec<String> {
    let all: Vec<&str> = content.lines().collect();
    all[all.len().saturating_sub(lines)..].iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_last_lines() {
        assert_eq!(tail("a\nb\nc\n", 2), vec!["b", "c"]);
        assert_eq!(tail("a", 5), vec!["a"]);
        assert!(tail("", 5).is_empty());
    }

    #[test]
    fn tail_of_large_file_reads_only_the_end() {
        let path = std::env::temp_dir().join(format!("clarity-console-tail-{}.log", std::process::id()));
        let content: String = (0..5000).map(|i| format!("line {i:05} {}\n", "x".repeat(40))).collect();
        std::fs::write(&path, &content).expect("write log");

        let lines = read_tail_of(&path, 3).expect("read tail");
        std::fs::remove_file(&path).ok();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("line 04997"));
        assert!(lines[2].starts_with("line 04999"));
    }

    #[test]
    fn missing_log_reads_as_error() {
        assert!(read_tail_of(Path::new("/nonexistent/clarity-console.log"), 5).is_err());
    }

    #[test]
    fn env_names_follow_crate_name() {
        assert_eq!(LOG_ENV.as_str(), "CLARITY_CONSOLE_LOGLEVEL");
        assert_eq!(LOG_FILE.as_str(), "clarity-console.log");
    }
}
