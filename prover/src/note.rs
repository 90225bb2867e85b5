//! Notes and their derived values
//!
//! ```text
//! Note = {
//!     value,       // amount, a field element
//!     owner_pk,    // Hash(spending_key) of the owner
//!     rho,         // per-note nullifier seed
//!     randomness,  // commitment blinding
//! }
//!
//! commitment = Hash(value, owner_pk, rho, randomness)
//! nullifier  = Hash(rho, spending_key)
//! owner_pk   = Hash(spending_key)
//! ```

use crate::ConstraintF;
use crate::circuit::hash::{NoteHasher, hash};

/// A private record of an owned amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub value: ConstraintF,
    pub owner_pk: ConstraintF,
    pub rho: ConstraintF,
    pub randomness: ConstraintF,
}

impl Note {
    pub fn new(
        value: impl Into<ConstraintF>,
        owner_pk: ConstraintF,
        rho: ConstraintF,
        randomness: ConstraintF,
    ) -> Self {
        Self {
            value: value.into(),
            owner_pk,
            rho,
            randomness,
        }
    }

    /// Binding, hiding digest of the note contents
    pub fn commitment(&self) -> ConstraintF {
        derive_commitment(self.value, self.owner_pk, self.rho, self.randomness)
    }

    /// Nullifier published when this note is spent with `key`
    pub fn nullifier(&self, key: &SpendingKey) -> ConstraintF {
        derive_nullifier(self.rho, key.0)
    }
}

/// Secret that authorizes spending notes owned by `Hash(key)`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SpendingKey(pub ConstraintF);

impl SpendingKey {
    pub fn public_key(&self) -> ConstraintF {
        derive_public_key(self.0)
    }
}

impl std::fmt::Debug for SpendingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SpendingKey(..)")
    }
}

impl From<ConstraintF> for SpendingKey {
    fn from(value: ConstraintF) -> Self {
        Self(value)
    }
}

/// owner_pk = Hash(spending_key)
pub fn derive_public_key(spending_key: ConstraintF) -> ConstraintF {
    hash(&[spending_key])
}

/// nullifier = Hash(rho, spending_key)
pub fn derive_nullifier(rho: ConstraintF, spending_key: ConstraintF) -> ConstraintF {
    hash(&[rho, spending_key])
}

/// commitment = Hash(value, owner_pk, rho, randomness)
pub fn derive_commitment(
    value: ConstraintF,
    owner_pk: ConstraintF,
    rho: ConstraintF,
    randomness: ConstraintF,
) -> ConstraintF {
    hash(&[value, owner_pk, rho, randomness])
}

/// rho for the `index`-th (1-based) new note of a transfer spending `nullifiers`
///
/// rho_new_i = Hash(nullifier_1, .., nullifier_n, i)
pub fn derive_output_rho(nullifiers: &[ConstraintF], index: usize) -> ConstraintF {
    let mut hasher = NoteHasher::new();
    for nf in nullifiers {
        hasher.write(*nf);
    }
    hasher.write(ConstraintF::from(index as u64)).sum()
}
