//! Error types for the example-customers crate.

use thiserror::Error;

/// Errors that can occur during customer generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid customer name after maximum retries.
    #[error("failed to generate valid customer name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// More customers were requested than the generator will produce.
    #[error("requested {requested} customers, at most {max} can be generated")]
    TooManyCustomers {
        /// Number of customers requested.
        requested: usize,
        /// Upper bound accepted by the generator.
        max: usize,
    },
}
