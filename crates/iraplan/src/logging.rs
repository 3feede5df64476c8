use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Trim the log to its newest KEEP_SIZE bytes once it grows past MAX_LOG_SIZE.
/// Returns the size before trimming when a rotation happened.
fn rotate_log_if_needed(log_path: &Path) -> io::Result<Option<u64>> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if size <= MAX_LOG_SIZE {
        return Ok(None);
    }

    let mut tail = Vec::with_capacity(KEEP_SIZE as usize);
    {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(size.saturating_sub(KEEP_SIZE)))?;
        file.read_to_end(&mut tail)?;
    }

    // Drop the partial first line
    let first_full_line = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    writeln!(file, "--- Log rotated at {size} bytes (older entries removed) ---")?;
    file.write_all(&tail[first_full_line..])?;

    Ok(Some(size))
}

/// Produces writers that share one appended log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

impl LogWriterFactory {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut *file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("iraplan={level},iraplan_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize logging.
///
/// Without a log file, events go to stderr so stdout carries only results.
/// With a log file, events are appended to it with size-based rotation: when
/// the file exceeds 5MB, older entries are removed keeping only the last 1MB.
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = env_filter(level);

    let Some(log_path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .init();
        return Ok(());
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let rotation = rotate_log_if_needed(log_path);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(LogWriterFactory::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(
        "iraplan logging initialized (log_path={})",
        log_path.display()
    );
    match rotation {
        Ok(Some(size)) => {
            tracing::info!(previous_bytes = size, kept_bytes = KEEP_SIZE, "rotated log file")
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to rotate log file: {e}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_is_not_rotated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iraplan.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        assert_eq!(rotate_log_if_needed(&path).unwrap(), None);

        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_missing_log_is_ignored() {
        let dir = tempdir().unwrap();
        assert_eq!(rotate_log_if_needed(&dir.path().join("absent.log")).unwrap(), None);
    }

    #[test]
    fn test_large_log_keeps_recent_whole_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iraplan.log");

        let line = "x".repeat(99) + "\n";
        let lines = (MAX_LOG_SIZE / 100 + 10) as usize;
        let original = line.repeat(lines) + "newest entry\n";
        fs::write(&path, &original).unwrap();

        let rotated = rotate_log_if_needed(&path).unwrap();
        assert_eq!(rotated, Some(original.len() as u64));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&format!(
            "--- Log rotated at {} bytes (older entries removed) ---\n",
            original.len()
        )));
        assert!(content.ends_with("newest entry\n"));
        assert!(content.len() as u64 <= KEEP_SIZE + 64);

        // Every kept line is complete
        for kept in content.lines().skip(1) {
            assert!(kept == "newest entry" || kept.len() == 99, "partial line {kept:?}");
        }
    }

    #[test]
    fn test_log_writer_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iraplan.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        let factory = LogWriterFactory::new(file);
        factory.make_writer().write_all(b"first\n").unwrap();
        factory.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
