//! Private witness and native constraint evaluation
//!
//! `evaluate` checks the same relations the circuit enforces, in a fixed
//! order, and names the first one that fails. Proving refuses to start on a
//! witness that does not evaluate cleanly.

use crate::ConstraintF;
use crate::authorization::{self, Signature, VerificationKey};
use crate::circuit::CircuitOptions;
use crate::constants::{NUM_INPUTS, NUM_OUTPUTS};
use crate::errors::ConstraintViolation;
use crate::note::{Note, SpendingKey, derive_output_rho};
use crate::prover_inputs::PublicInputs;

/// A note being spent together with the key that owns it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpentNote {
    pub note: Note,
    pub spending_key: SpendingKey,
}

/// Everything the prover knows but the verifier does not
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateWitness<const N: usize = { NUM_INPUTS }, const M: usize = { NUM_OUTPUTS }> {
    pub spent: [SpentNote; N],
    pub created: [Note; M],
    /// Signed message M
    pub message: ConstraintF,
    pub signature: Signature,
}

impl<const N: usize, const M: usize> PrivateWitness<N, M> {
    /// Public inputs implied by this witness under `vk`
    pub fn public_inputs(&self, vk: VerificationKey) -> PublicInputs<N, M> {
        PublicInputs {
            vk,
            nullifiers: self.spent.map(|s| s.note.nullifier(&s.spending_key)),
            commitments: self.created.map(|n| n.commitment()),
        }
    }
}

/// Check every relation of the transfer circuit against a concrete witness
pub fn evaluate<const N: usize, const M: usize>(
    public: &PublicInputs<N, M>,
    private: &PrivateWitness<N, M>,
    options: CircuitOptions,
) -> Result<(), ConstraintViolation> {
    for (i, (spent, nullifier)) in private.spent.iter().zip(&public.nullifiers).enumerate() {
        if spent.note.nullifier(&spent.spending_key) != *nullifier {
            return Err(ConstraintViolation::NullifierMismatch { index: i + 1 });
        }
    }

    for (i, (note, commitment)) in private.created.iter().zip(&public.commitments).enumerate() {
        if note.commitment() != *commitment {
            return Err(ConstraintViolation::CommitmentMismatch { index: i + 1 });
        }
    }

    let total_in: ConstraintF = private.spent.iter().map(|s| s.note.value).sum();
    let total_out: ConstraintF = private.created.iter().map(|n| n.value).sum();
    if total_in != total_out {
        return Err(ConstraintViolation::BalanceMismatch);
    }

    for (i, spent) in private.spent.iter().enumerate() {
        if spent.spending_key.public_key() != spent.note.owner_pk {
            return Err(ConstraintViolation::PublicKeyMismatch { index: i + 1 });
        }
    }

    if options.bind_output_rho {
        for (i, note) in private.created.iter().enumerate() {
            if note.rho != derive_output_rho(&public.nullifiers, i + 1) {
                return Err(ConstraintViolation::RhoMismatch { index: i + 1 });
            }
        }
    }

    if !authorization::verify_signature(&public.vk, private.message, &private.signature) {
        return Err(ConstraintViolation::SignatureMismatch);
    }

    Ok(())
}
