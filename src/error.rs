use thiserror::Error;

/// Failures talking to the support service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode response: {message}")]
    Decode { message: String },
}

/// Prediction form input that cannot be sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("name is required")]
    MissingName,

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StressError {
    #[error("question index {0} is out of range (expected 0-4)")]
    BadIndex(usize),

    #[error("answer {0} is out of range (expected 1-10)")]
    BadValue(u8),
}
