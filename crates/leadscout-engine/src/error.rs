use thiserror::Error;

/// Errors refusing a discovery run before it starts. Per-item failures
/// during a run are never errors — they are logged skips.
#[derive(Debug, Error)]
pub enum AreaError {
    #[error("postal-code list is unavailable or empty; all-areas search cannot start")]
    ZipListUnavailable,

    #[error("no areas selected for {mode} search")]
    EmptySelection { mode: &'static str },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
