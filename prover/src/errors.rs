//! Error definitions for witness parsing, constraint evaluation and proving.
//!
//! Witness problems are reported before any constraint is looked at. A
//! violated relation names the equation that failed, never a generic
//! "proof failed".

use ark_relations::r1cs::SynthesisError;
use ark_serialize::SerializationError;
use thiserror::Error;

/// A supplied signal is missing or cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    #[error("Missing signal: {0}")]
    MissingSignal(String),

    #[error("Signal {signal} is not a field element: {value:?}")]
    InvalidFieldElement { signal: String, value: String },

    #[error("Signal {0} is not a point on the curve")]
    InvalidPoint(String),

    #[error("Signal {0} is the point at infinity")]
    IdentityPoint(String),

    #[error("Signal {0} is not in the prime-order subgroup")]
    NotInSubgroup(String),

    #[error("Malformed witness document: {0}")]
    Malformed(String),
}

/// The relation a witness failed to satisfy. Indices are 1-based, matching signal names.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("Nullifier {index} does not equal Hash(rho, spending_key)")]
    NullifierMismatch { index: usize },

    #[error("Commitment {index} does not equal Hash(value, pk, rho, randomness)")]
    CommitmentMismatch { index: usize },

    #[error("Input values do not sum to output values")]
    BalanceMismatch,

    #[error("Public key of spent note {index} does not equal Hash(spending_key)")]
    PublicKeyMismatch { index: usize },

    #[error("Rho of new note {index} is not derived from the spent nullifiers")]
    RhoMismatch { index: usize },

    #[error("Signature pairing product is not the identity")]
    SignatureMismatch,
}

/// Errors that can occur while compiling, proving or verifying
#[derive(Error, Debug)]
pub enum ProverError {
    #[error(transparent)]
    Witness(#[from] WitnessError),

    #[error("Constraint violated: {0}")]
    Constraint(#[from] ConstraintViolation),

    #[error("Constraint synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Key does not match the compiled circuit: {0}")]
    KeyMismatch(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for prover operations
pub type Result<T> = std::result::Result<T, ProverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConstraintViolation::NullifierMismatch { index: 2 };
        assert_eq!(
            err.to_string(),
            "Nullifier 2 does not equal Hash(rho, spending_key)"
        );

        let err = WitnessError::MissingSignal("input1.sk".into());
        assert_eq!(err.to_string(), "Missing signal: input1.sk");

        let err = ProverError::from(ConstraintViolation::BalanceMismatch);
        assert_eq!(
            err.to_string(),
            "Constraint violated: Input values do not sum to output values"
        );
    }

    #[test]
    fn test_violation_kinds_are_distinct() {
        assert_ne!(
            ConstraintViolation::CommitmentMismatch { index: 1 },
            ConstraintViolation::CommitmentMismatch { index: 2 }
        );
        assert_ne!(
            ConstraintViolation::NullifierMismatch { index: 1 },
            ConstraintViolation::PublicKeyMismatch { index: 1 }
        );
    }
}
