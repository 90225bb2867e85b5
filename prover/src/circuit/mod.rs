//! Constraint gadgets and the transfer circuit assembled from them.

pub mod balance;
pub mod hash;
pub mod keys;
pub mod note;
pub mod poseidon;
pub mod signature;
pub mod transfer;

pub use transfer::{CircuitOptions, TransferCircuit};
