//! Write/sum hashing over field elements.
//!
//! `NoteHasher` (native) and `HashGadget` (in-circuit) accumulate an ordered
//! tuple and digest it with the same Poseidon sponge. The tuple length is
//! absorbed first so tuples of different arity never collide.

use ark_crypto_primitives::sponge::{
    CryptographicSponge,
    constraints::CryptographicSpongeVar,
    poseidon::{PoseidonSponge, constraints::PoseidonSpongeVar},
};
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::poseidon::poseidon_config;
use crate::ConstraintF;

/// Native hasher
#[derive(Clone, Debug, Default)]
pub struct NoteHasher {
    inputs: Vec<ConstraintF>,
}

impl NoteHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one element to the tuple
    pub fn write(&mut self, elem: ConstraintF) -> &mut Self {
        self.inputs.push(elem);
        self
    }

    /// Digest of everything written so far. Does not reset the hasher.
    pub fn sum(&self) -> ConstraintF {
        let mut sponge = PoseidonSponge::<ConstraintF>::new(poseidon_config());
        sponge.absorb(&ConstraintF::from(self.inputs.len() as u64));
        for input in &self.inputs {
            sponge.absorb(input);
        }
        sponge.squeeze_field_elements::<ConstraintF>(1)[0]
    }
}

/// Hash an ordered tuple in one call
pub fn hash(elems: &[ConstraintF]) -> ConstraintF {
    let mut hasher = NoteHasher::new();
    for elem in elems {
        hasher.write(*elem);
    }
    hasher.sum()
}

/// In-circuit hasher, same digest as [`NoteHasher`]
pub struct HashGadget {
    cs: ConstraintSystemRef<ConstraintF>,
    inputs: Vec<FpVar<ConstraintF>>,
}

impl HashGadget {
    pub fn new(cs: ConstraintSystemRef<ConstraintF>) -> Self {
        Self {
            cs,
            inputs: Vec::new(),
        }
    }

    pub fn write(&mut self, elem: &FpVar<ConstraintF>) -> &mut Self {
        self.inputs.push(elem.clone());
        self
    }

    pub fn sum(&self) -> Result<FpVar<ConstraintF>, SynthesisError> {
        let mut sponge = PoseidonSpongeVar::new(self.cs.clone(), poseidon_config());
        let arity = FpVar::Constant(ConstraintF::from(self.inputs.len() as u64));
        sponge.absorb(&arity)?;
        for input in &self.inputs {
            sponge.absorb(input)?;
        }
        let mut result = sponge.squeeze_field_elements(1)?;
        Ok(result.remove(0))
    }
}

/// Hash an ordered tuple of variables in one call
pub fn hash_gadget(
    cs: ConstraintSystemRef<ConstraintF>,
    elems: &[&FpVar<ConstraintF>],
) -> Result<FpVar<ConstraintF>, SynthesisError> {
    let mut hasher = HashGadget::new(cs);
    for elem in elems {
        hasher.write(elem);
    }
    hasher.sum()
}
