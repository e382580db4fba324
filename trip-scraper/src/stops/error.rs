//! Stop directory loading errors.

/// Errors that can occur when loading the stop directory.
#[derive(Debug, thiserror::Error)]
pub enum StopDirectoryError {
    /// Reading the file failed
    #[error("failed to read stop directory: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid stop list
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A record failed validation
    #[error("invalid stop record {index}: {message}")]
    Invalid { index: usize, message: String },
}
