//! Diagnostic log file sink.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Creates a non-blocking writer appending to `path`.
///
/// The returned guard must be kept alive for as long as logging should reach
/// the file; dropping it flushes and stops the background writer.
pub fn create_log_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Log path {} has no file name", path.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file_appender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_creates_nested_log_file() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let path = tmp.path().join("deep").join("nested").join("app.log");

        let (mut writer, guard) = create_log_writer(&path).expect("Should create log writer");
        writer.write_all(b"hello\n").unwrap();
        drop(writer);
        drop(guard);

        let contents = std::fs::read_to_string(&path).expect("log file should exist");
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let path = tmp.path().join("..");
        assert!(create_log_writer(&path).is_err());
    }
}
