//! Shroud transfer prover
//!
//! Groth16 circuit (over BW6-761) proving a confidential transfer: two notes
//! are spent, two notes are created, values balance, the spender knows the
//! spending keys, and the transfer carries a valid pairing-based signature
//! over BLS12-377.

pub mod constants;
pub mod errors;

pub mod authorization;
pub mod note;

pub mod prover_inputs;
pub mod witness;
pub mod witness_builder;

pub mod backend;
pub mod circuit;

/// Native field of the proof system. Equal to the BLS12-377 base field, so
/// signature-group coordinates are single circuit elements.
pub type ConstraintF = ark_bw6_761::Fr;

// Re-export key types for external usage
pub use authorization::{Signature, VerificationKey};
pub use backend::{CompiledCircuit, TransferProver};
pub use circuit::{CircuitOptions, TransferCircuit};
pub use errors::{ConstraintViolation, ProverError, WitnessError};
pub use note::{Note, SpendingKey};
pub use prover_inputs::PublicInputs;
pub use witness::{PrivateWitness, SpentNote};
pub use witness_builder::SignalMap;
