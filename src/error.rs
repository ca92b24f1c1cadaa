//! Error types for the cloud-base-analysis crate.
use crate::keys::ModelInput;
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum AnalysisError {
    /// Bad or invalid input, the model cannot produce a finite value from it.
    #[error("Invalid input: {0}.")]
    InvalidInput(ModelInput),
    /// The ascent reached the top of the search without the air becoming saturated.
    #[error("No saturated level found below the search limit.")]
    NoConvergence,
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_messages_name_the_input() {
        let err = AnalysisError::InvalidInput(ModelInput::Pressure);
        assert_eq!(err.to_string(), "Invalid input: pressure.");

        let err = AnalysisError::InvalidInput(ModelInput::Temperature);
        assert_eq!(err.to_string(), "Invalid input: temperature.");

        assert_eq!(
            AnalysisError::NoConvergence.to_string(),
            "No saturated level found below the search limit."
        );
    }

    #[test]
    fn test_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(AnalysisError::NoConvergence);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), AnalysisError::NoConvergence.to_string());
    }
}
