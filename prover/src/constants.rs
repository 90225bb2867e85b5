/// Notes spent per transfer.
pub const NUM_INPUTS: usize = 2;

/// Notes created per transfer.
pub const NUM_OUTPUTS: usize = 2;

/// Field elements contributed by the signature verification key (G, X, Y as affine pairs).
pub const VK_PUBLIC_ELEMENTS: usize = 6;

// Poseidon over the BW6-761 scalar field
pub const POSEIDON_RATE: usize = 2;
pub const POSEIDON_CAPACITY: usize = 1;
pub const POSEIDON_FULL_ROUNDS: usize = 8;
pub const POSEIDON_PARTIAL_ROUNDS: usize = 31;
pub const POSEIDON_ALPHA: u64 = 17;
