use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopsisError {
    #[error("File {path} not found")]
    InputNotFound { path: String },

    #[error(
        "Number of weights ({weights}), impacts ({impacts}) and criteria columns ({columns}) must be the same"
    )]
    ParameterMismatch {
        weights: usize,
        impacts: usize,
        columns: usize,
    },

    #[error("Invalid weight '{value}': {reason}")]
    InvalidWeight { value: String, reason: String },

    #[error("Non-numeric value '{value}' in row {row}, column '{column}'")]
    NonNumericData {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid impact '{symbol}': impacts must be either '+' or '-'")]
    InvalidImpact { symbol: String },

    #[error("Computation error: {message}")]
    ComputationError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputNotFound,
    ParameterMismatch,
    NonNumericData,
    InvalidImpact,
    Computation,
    Configuration,
}

impl TopsisError {
    pub fn computation(message: impl Into<String>) -> Self {
        Self::ComputationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputNotFound { .. } => ErrorCategory::InputNotFound,
            Self::ParameterMismatch { .. } | Self::InvalidWeight { .. } => {
                ErrorCategory::ParameterMismatch
            }
            Self::NonNumericData { .. } => ErrorCategory::NonNumericData,
            Self::InvalidImpact { .. } => ErrorCategory::InvalidImpact,
            Self::ComputationError { .. } | Self::CsvError(_) | Self::IoError(_) => {
                ErrorCategory::Computation
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// One-line message shown on the console.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CsvError(e) => format!("Could not read the input table: {}", e),
            Self::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InputNotFound => "Check the input path and that the file is readable",
            ErrorCategory::ParameterMismatch => {
                "Pass one positive weight and one impact per criteria column, comma-separated"
            }
            ErrorCategory::NonNumericData => {
                "Every column after the first must contain numbers only"
            }
            ErrorCategory::InvalidImpact => "Use '+' for benefit criteria and '-' for cost criteria",
            ErrorCategory::Computation => {
                "Check that the table has at least two rows and no all-zero or constant criteria"
            }
            ErrorCategory::Configuration => "Fix the settings file or command-line option",
        }
    }
}

pub type Result<T> = std::result::Result<T, TopsisError>;
