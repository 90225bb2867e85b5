//! Note commitment and nullifier gadgets
//!
//! ```text
//! nullifier  = Hash(rho, spending_key)                 == public nullifier
//! commitment = Hash(value, owner_pk, rho, randomness)  == public commitment
//! ```

use std::borrow::Borrow;

use ark_r1cs_std::{
    alloc::{AllocVar, AllocationMode},
    eq::EqGadget,
    fields::fp::FpVar,
};
use ark_relations::r1cs::{ConstraintSystemRef, Namespace, SynthesisError};

use super::hash::{HashGadget, hash_gadget};
use crate::ConstraintF;
use crate::note::Note;

/// Allocated note fields
#[derive(Clone, Debug)]
pub struct NoteVar {
    pub value: FpVar<ConstraintF>,
    pub owner_pk: FpVar<ConstraintF>,
    pub rho: FpVar<ConstraintF>,
    pub randomness: FpVar<ConstraintF>,
}

impl AllocVar<Note, ConstraintF> for NoteVar {
    fn new_variable<T: Borrow<Note>>(
        cs: impl Into<Namespace<ConstraintF>>,
        f: impl FnOnce() -> Result<T, SynthesisError>,
        mode: AllocationMode,
    ) -> Result<Self, SynthesisError> {
        let ns = cs.into();
        let cs = ns.cs();
        let note = f().map(|n| *n.borrow()).ok();
        let field = |get: fn(&Note) -> ConstraintF| {
            FpVar::new_variable(
                cs.clone(),
                || note.as_ref().map(get).ok_or(SynthesisError::AssignmentMissing),
                mode,
            )
        };

        Ok(Self {
            value: field(|n| n.value)?,
            owner_pk: field(|n| n.owner_pk)?,
            rho: field(|n| n.rho)?,
            randomness: field(|n| n.randomness)?,
        })
    }
}

/// Hash(rho, spending_key) inside the circuit
pub fn derive_nullifier(
    cs: ConstraintSystemRef<ConstraintF>,
    rho: &FpVar<ConstraintF>,
    spending_key: &FpVar<ConstraintF>,
) -> Result<FpVar<ConstraintF>, SynthesisError> {
    hash_gadget(cs, &[rho, spending_key])
}

/// Hash(value, owner_pk, rho, randomness) inside the circuit
pub fn derive_commitment(
    cs: ConstraintSystemRef<ConstraintF>,
    note: &NoteVar,
) -> Result<FpVar<ConstraintF>, SynthesisError> {
    hash_gadget(
        cs,
        &[&note.value, &note.owner_pk, &note.rho, &note.randomness],
    )
}

/// Hash(nullifier_1, .., nullifier_n, index) inside the circuit
pub fn derive_output_rho(
    cs: ConstraintSystemRef<ConstraintF>,
    nullifiers: &[FpVar<ConstraintF>],
    index: usize,
) -> Result<FpVar<ConstraintF>, SynthesisError> {
    let mut hasher = HashGadget::new(cs);
    for nf in nullifiers {
        hasher.write(nf);
    }
    hasher
        .write(&FpVar::Constant(ConstraintF::from(index as u64)))
        .sum()
}

/// Enforce that `nullifier` was derived from the spent note's rho and key
pub fn enforce_nullifier(
    cs: ConstraintSystemRef<ConstraintF>,
    rho: &FpVar<ConstraintF>,
    spending_key: &FpVar<ConstraintF>,
    nullifier: &FpVar<ConstraintF>,
) -> Result<(), SynthesisError> {
    derive_nullifier(cs, rho, spending_key)?.enforce_equal(nullifier)
}

/// Enforce that `commitment` opens to `note`
pub fn enforce_commitment(
    cs: ConstraintSystemRef<ConstraintF>,
    note: &NoteVar,
    commitment: &FpVar<ConstraintF>,
) -> Result<(), SynthesisError> {
    derive_commitment(cs, note)?.enforce_equal(commitment)
}
