use ark_r1cs_std::{eq::EqGadget, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::hash::hash_gadget;
use crate::ConstraintF;

/// Hash(spending_key) inside the circuit
pub fn derive_public_key(
    cs: ConstraintSystemRef<ConstraintF>,
    spending_key: &FpVar<ConstraintF>,
) -> Result<FpVar<ConstraintF>, SynthesisError> {
    hash_gadget(cs, &[spending_key])
}

/// Enforce owner_pk == Hash(spending_key) for a spent note
pub fn enforce_key_derivation(
    cs: ConstraintSystemRef<ConstraintF>,
    spending_key: &FpVar<ConstraintF>,
    owner_pk: &FpVar<ConstraintF>,
) -> Result<(), SynthesisError> {
    derive_public_key(cs, spending_key)?.enforce_equal(owner_pk)
}
