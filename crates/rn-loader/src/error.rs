use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("link parse error at line {line}: {message}")]
    Parse { line: u64, message: String },
}

pub type LoaderResult<T> = Result<T, LoaderError>;
