#![allow(dead_code)]

use ark_bls12_377::{Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, PrimeGroup};
use ark_std::UniformRand;
use ark_std::rand::{SeedableRng, rngs::StdRng};
use shroud_prover::{
    CircuitOptions, ConstraintF, Note, PrivateWitness, PublicInputs, Signature, SpendingKey,
    SpentNote, VerificationKey, note::derive_output_rho,
};

pub const MESSAGE: u64 = 5;

pub fn f(value: u64) -> ConstraintF {
    ConstraintF::from(value)
}

/// Signing triple (G, X = xG, Y = yG) and a signature on `message`
pub fn signed(message: u64) -> (VerificationKey, Signature) {
    let mut rng = StdRng::seed_from_u64(42);
    let (x, y) = (Fr::rand(&mut rng), Fr::rand(&mut rng));
    let g = G1Projective::generator();
    let vk = VerificationKey {
        g: g.into_affine(),
        x: (g * x).into_affine(),
        y: (g * y).into_affine(),
    };

    let h = G2Projective::rand(&mut rng);
    let signature = Signature {
        sigma1: h.into_affine(),
        sigma2: (-(h * (x + y * Fr::from(message)))).into_affine(),
    };
    (vk, signature)
}

pub fn senders() -> [SpendingKey; 2] {
    [SpendingKey(f(24)), SpendingKey(f(25))]
}

pub fn recipients() -> [ConstraintF; 2] {
    [SpendingKey(f(31)).public_key(), SpendingKey(f(32)).public_key()]
}

/// Consistent witness spending `inputs` into `outputs`
pub fn transfer_with(
    inputs: [ConstraintF; 2],
    outputs: [ConstraintF; 2],
    options: CircuitOptions,
) -> (PublicInputs, PrivateWitness) {
    let keys = senders();
    let spent = [
        SpentNote {
            note: Note::new(inputs[0], keys[0].public_key(), f(6), f(7)),
            spending_key: keys[0],
        },
        SpentNote {
            note: Note::new(inputs[1], keys[1].public_key(), f(9), f(10)),
            spending_key: keys[1],
        },
    ];
    let nullifiers = spent.map(|s| s.note.nullifier(&s.spending_key));

    let rho = |j: usize, fallback: u64| {
        if options.bind_output_rho {
            derive_output_rho(&nullifiers, j)
        } else {
            f(fallback)
        }
    };
    let owners = recipients();
    let created = [
        Note::new(outputs[0], owners[0], rho(1, 11), f(12)),
        Note::new(outputs[1], owners[1], rho(2, 13), f(14)),
    ];

    let (vk, signature) = signed(MESSAGE);
    let private = PrivateWitness {
        spent,
        created,
        message: f(MESSAGE),
        signature,
    };
    (private.public_inputs(vk), private)
}

/// Values 1, 1 -> 1, 1
pub fn transfer() -> (PublicInputs, PrivateWitness) {
    transfer_with([f(1), f(1)], [f(1), f(1)], CircuitOptions::default())
}

pub fn bound_options() -> CircuitOptions {
    CircuitOptions {
        bind_output_rho: true,
    }
}

pub fn bound_transfer() -> (PublicInputs, PrivateWitness) {
    transfer_with([f(1), f(1)], [f(1), f(1)], bound_options())
}

/// The field element p - 1
pub fn minus_one() -> ConstraintF {
    -f(1)
}
