use std::sync::LazyLock;

use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, find_poseidon_ark_and_mds};
use ark_ff::PrimeField;

use crate::ConstraintF;
use crate::constants::{
    POSEIDON_ALPHA, POSEIDON_CAPACITY, POSEIDON_FULL_ROUNDS, POSEIDON_PARTIAL_ROUNDS,
    POSEIDON_RATE,
};

static POSEIDON_CONFIG: LazyLock<PoseidonConfig<ConstraintF>> = LazyLock::new(|| {
    let (ark, mds) = find_poseidon_ark_and_mds::<ConstraintF>(
        ConstraintF::MODULUS_BIT_SIZE as u64,
        POSEIDON_RATE,
        POSEIDON_FULL_ROUNDS as u64,
        POSEIDON_PARTIAL_ROUNDS as u64,
        0,
    );

    PoseidonConfig::new(
        POSEIDON_FULL_ROUNDS,
        POSEIDON_PARTIAL_ROUNDS,
        POSEIDON_ALPHA,
        mds,
        ark,
        POSEIDON_RATE,
        POSEIDON_CAPACITY,
    )
});

/// Poseidon configuration shared by the native hasher and the hash gadget
///
/// Field: BW6-761 Fr (377 bits)
/// Rate: 2
/// Capacity: 1
/// S-box: x^17
pub fn poseidon_config() -> &'static PoseidonConfig<ConstraintF> {
    &POSEIDON_CONFIG
}
