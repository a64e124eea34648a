use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid header: {message}")]
    Header { message: String },
    #[error("line {line}: {message}")]
    Row { line: usize, message: String },
}
