use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pairlab_core::ValidationError),

    #[error("instrument '{symbol}' not found in {path}")]
    MissingInstrument { symbol: String, path: PathBuf },

    #[error("no usable observations in {path}")]
    EmptyData { path: PathBuf },

    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingInstrument { .. } => 3,
            Self::EmptyData { .. } => 3,
            Self::Config { .. } => 2,
            Self::Csv { .. } => 10,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) => 4,
            Self::Timestamp(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_separate_user_and_environment_failures() {
        let validation = CliError::from(pairlab_core::ValidationError::InvalidWindow);
        assert_eq!(validation.exit_code(), 2);

        let strict = CliError::StrictModeViolation {
            warning_count: 1,
            error_count: 0,
        };
        assert_eq!(strict.exit_code(), 5);

        let io = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 10);
    }

    #[test]
    fn missing_instrument_names_symbol_and_file() {
        let error = CliError::MissingInstrument {
            symbol: String::from("TQQQ"),
            path: PathBuf::from("closes.csv"),
        };
        assert_eq!(error.to_string(), "instrument 'TQQQ' not found in closes.csv");
    }
}
