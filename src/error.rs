/*!
 * Error Handling for the qsig Cryptography Library
 *
 * Provides error types with error codes and helper constructors for the
 * Dilithium signature operations and their supporting machinery.
 */

use thiserror::Error;

/// Error type for all cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Dilithium operation failed: {operation} - {cause}")]
    DilithiumError {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("Invalid parameter: {parameter} - expected {expected}, got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },
}

/// Result alias used throughout the crate
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Error code constants for different error categories
///
/// Key generation is infallible once a parameter set validates, and
/// verification collapses every failure into a plain boolean, so neither
/// operation carries a code here.
pub mod error_codes {
    // Dilithium errors: 2000-2999
    pub const DILITHIUM_SIGNING_FAILED: u32 = 2002;
    pub const DILITHIUM_INVALID_KEY_SIZE: u32 = 2005;

    // Parameter errors: 2500-2599
    pub const PARAMS_INVALID_TUPLE: u32 = 2501;

    // RNG errors: 7000-7099
    pub const RNG_SOURCE_FAILED: u32 = 7002;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::DilithiumError { error_code, .. } => *error_code,
            CryptoError::InvalidParameter { error_code, .. } => *error_code,
            CryptoError::SerializationError(_) => 9001,
            CryptoError::RandomGenerationError { error_code, .. } => *error_code,
        }
    }

    /// Helper for creating Dilithium errors
    pub fn dilithium_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::DilithiumError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    /// Helper for creating parameter validation errors
    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str) -> Self {
        CryptoError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code: error_codes::PARAMS_INVALID_TUPLE,
        }
    }
}
