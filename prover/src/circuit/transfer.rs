//! Transfer Circuit
//!
//! ZK proof that a confidential transfer is valid:
//! 1. Each spent note's nullifier is Hash(rho, spending_key)
//! 2. Each new note's commitment is Hash(value, pk, rho, randomness)
//! 3. Balance is preserved: sum(inputs) = sum(outputs)
//! 4. Each spending key matches its note's owner: pk = Hash(spending_key)
//! 5. The transfer is signed: e(G, Sigma2) · e(X + M·Y, Sigma1) = 1
//!
//! ```text
//! Public Inputs (order matters for the verifier):
//!   - G, X, Y: signature verification triple, affine (x, y) each
//!   - nullifiers[N]: nullifiers of spent notes
//!   - commitments[M]: commitments of new notes
//!
//! Private Witness:
//!   - spent notes (value, pk, rho, randomness) and their spending keys
//!   - new notes (value, pk, rho, randomness)
//!   - message M, signature (Sigma1, Sigma2)
//! ```
//!
//! N and M are const parameters: the constraint topology is fixed per instance.

use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use shroud_config::CircuitConfig;

use super::balance::enforce_balance;
use super::keys::enforce_key_derivation;
use super::note::{NoteVar, derive_output_rho, enforce_commitment, enforce_nullifier};
use super::signature::{SignatureVar, VerificationKeyVar, enforce_signature};
use crate::ConstraintF;
use crate::constants::{NUM_INPUTS, NUM_OUTPUTS};
use crate::prover_inputs::PublicInputs;
use crate::witness::PrivateWitness;

/// Shape options. Each combination yields a different constraint system
/// and therefore different keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitOptions {
    /// Enforce rho_new_i = Hash(nullifier_1, .., nullifier_N, i)
    pub bind_output_rho: bool,
}

impl From<&CircuitConfig> for CircuitOptions {
    fn from(config: &CircuitConfig) -> Self {
        Self {
            bind_output_rho: config.bind_output_rho,
        }
    }
}

/// Confidential transfer circuit spending N notes and creating M notes
#[derive(Clone, Debug)]
pub struct TransferCircuit<const N: usize = { NUM_INPUTS }, const M: usize = { NUM_OUTPUTS }> {
    // --- Public Inputs ---
    pub public: Option<PublicInputs<N, M>>,

    // --- Private Witness ---
    pub private: Option<PrivateWitness<N, M>>,

    // --- Circuit config ---
    pub options: CircuitOptions,
}

impl<const N: usize, const M: usize> TransferCircuit<N, M> {
    /// Circuit with no assignment, for setup and constraint counting
    pub fn blank(options: CircuitOptions) -> Self {
        Self {
            public: None,
            private: None,
            options,
        }
    }

    /// Circuit with a full assignment, for proving
    pub fn new(
        public: PublicInputs<N, M>,
        private: PrivateWitness<N, M>,
        options: CircuitOptions,
    ) -> Self {
        Self {
            public: Some(public),
            private: Some(private),
            options,
        }
    }
}

impl<const N: usize, const M: usize> ConstraintSynthesizer<ConstraintF> for TransferCircuit<N, M> {
    fn generate_constraints(
        self,
        cs: ConstraintSystemRef<ConstraintF>,
    ) -> Result<(), SynthesisError> {
        let public = self.public.as_ref();
        let private = self.private.as_ref();

        // === Allocate Public Inputs (ORDER MATTERS - must match verifier) ===

        let vk = VerificationKeyVar::new_public(cs.clone(), public.map(|p| p.vk))?;

        let nullifiers = (0..N)
            .map(|i| {
                FpVar::new_input(cs.clone(), || {
                    public
                        .map(|p| p.nullifiers[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let commitments = (0..M)
            .map(|j| {
                FpVar::new_input(cs.clone(), || {
                    public
                        .map(|p| p.commitments[j])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // === Allocate Private Witness ===

        let mut spent = Vec::with_capacity(N);
        let mut spending_keys = Vec::with_capacity(N);
        for i in 0..N {
            spent.push(NoteVar::new_witness(cs.clone(), || {
                private
                    .map(|w| w.spent[i].note)
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
            spending_keys.push(FpVar::new_witness(cs.clone(), || {
                private
                    .map(|w| w.spent[i].spending_key.0)
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        let created = (0..M)
            .map(|j| {
                NoteVar::new_witness(cs.clone(), || {
                    private
                        .map(|w| w.created[j])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let message = FpVar::new_witness(cs.clone(), || {
            private
                .map(|w| w.message)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let signature = SignatureVar::new_witness(cs.clone(), || {
            private
                .map(|w| w.signature)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        // === Spent notes: nullifiers ===
        for ((note, key), nullifier) in spent.iter().zip(&spending_keys).zip(&nullifiers) {
            enforce_nullifier(cs.clone(), &note.rho, key, nullifier)?;
        }

        // === New notes: commitments ===
        for (note, commitment) in created.iter().zip(&commitments) {
            enforce_commitment(cs.clone(), note, commitment)?;
        }

        // === Balance ===
        enforce_balance(
            spent.iter().map(|n| &n.value),
            created.iter().map(|n| &n.value),
        )?;

        // === Spend authority ===
        for (note, key) in spent.iter().zip(&spending_keys) {
            enforce_key_derivation(cs.clone(), key, &note.owner_pk)?;
        }

        // === Output rho binding ===
        if self.options.bind_output_rho {
            for (j, note) in created.iter().enumerate() {
                derive_output_rho(cs.clone(), &nullifiers, j + 1)?.enforce_equal(&note.rho)?;
            }
        }

        // === Transfer authorization ===
        enforce_signature(&vk, &message, &signature)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::{ConstraintSystem, SynthesisMode};

    fn blank_shape<const N: usize, const M: usize>(
        options: CircuitOptions,
    ) -> ConstraintSystemRef<ConstraintF> {
        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        cs.set_mode(SynthesisMode::Setup);
        TransferCircuit::<N, M>::blank(options)
            .generate_constraints(cs.clone())
            .unwrap();
        cs
    }

    #[test]
    fn test_public_input_count() {
        let cs = blank_shape::<2, 2>(CircuitOptions::default());

        // 1 constant + 6 vk coordinates + 2 nullifiers + 2 commitments
        assert_eq!(cs.num_instance_variables(), 11);
        assert_eq!(cs.num_instance_variables() - 1, PublicInputs::<2, 2>::LEN);
    }

    #[test]
    fn test_arity_changes_shape() {
        let cs = blank_shape::<1, 3>(CircuitOptions::default());
        assert_eq!(cs.num_instance_variables(), 1 + 6 + 1 + 3);
    }

    #[test]
    fn test_rho_binding_adds_constraints() {
        let plain = blank_shape::<2, 2>(CircuitOptions::default());
        let bound = blank_shape::<2, 2>(CircuitOptions {
            bind_output_rho: true,
        });

        assert!(bound.num_constraints() > plain.num_constraints());
        assert_eq!(bound.num_instance_variables(), plain.num_instance_variables());
    }

    #[test]
    fn test_options_from_config() {
        let config = CircuitConfig {
            bind_output_rho: true,
        };
        assert!(CircuitOptions::from(&config).bind_output_rho);
    }
}
