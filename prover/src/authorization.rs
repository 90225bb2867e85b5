//! Pairing-based transfer authorization (native side)
//!
//! A transfer is authorized by a signature (Sigma1, Sigma2) in G2 on a scalar
//! message M under a verification triple (G, X, Y) in G1 of BLS12-377:
//!
//! ```text
//! T = X + M·Y
//! e(G, Sigma2) · e(T, Sigma1) == 1
//! ```
//!
//! Only (G, X, Y) are public. M, Sigma1 and Sigma2 stay in the witness.

use ark_bls12_377::{Bls12_377, G1Affine, G2Affine};
use ark_ec::{
    AffineRepr,
    pairing::{Pairing, PairingOutput},
};
use ark_ff::{One, PrimeField};

use crate::ConstraintF;
use crate::constants::VK_PUBLIC_ELEMENTS;

/// Public verification triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationKey {
    pub g: G1Affine,
    pub x: G1Affine,
    pub y: G1Affine,
}

impl VerificationKey {
    /// Affine coordinates in public-input order: G.x, G.y, X.x, X.y, Y.x, Y.y
    pub fn to_field_elements(&self) -> [ConstraintF; VK_PUBLIC_ELEMENTS] {
        [
            self.g.x, self.g.y, self.x.x, self.x.y, self.y.x, self.y.y,
        ]
    }
}

/// Signature components, both in G2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub sigma1: G2Affine,
    pub sigma2: G2Affine,
}

/// T = X + M·Y, with M read as an integer
pub fn message_point(vk: &VerificationKey, message: ConstraintF) -> G1Affine {
    let mut t = vk.y.mul_bigint(message.into_bigint());
    t += vk.x;
    t.into()
}

/// e(G, Sigma2) · e(X + M·Y, Sigma1)
pub fn pairing_product(
    vk: &VerificationKey,
    message: ConstraintF,
    signature: &Signature,
) -> PairingOutput<Bls12_377> {
    let t = message_point(vk, message);
    Bls12_377::multi_pairing([vk.g, t], [signature.sigma2, signature.sigma1])
}

/// Whether the pairing product is the target-group identity. Both
/// components at infinity satisfy the equation for every message, so
/// neither may be the identity.
pub fn verify_signature(vk: &VerificationKey, message: ConstraintF, signature: &Signature) -> bool {
    !signature.sigma1.is_zero()
        && !signature.sigma2.is_zero()
        && pairing_product(vk, message, signature).0.is_one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_std::UniformRand;
    use ark_std::rand::{SeedableRng, rngs::StdRng};

    fn keyed(message: u64) -> (VerificationKey, ConstraintF, Signature) {
        let mut rng = StdRng::seed_from_u64(7);
        let (x, y) = (Fr::rand(&mut rng), Fr::rand(&mut rng));
        let g = G1Projective::generator();
        let vk = VerificationKey {
            g: g.into_affine(),
            x: (g * x).into_affine(),
            y: (g * y).into_affine(),
        };

        let h = G2Projective::rand(&mut rng);
        let exponent = x + y * Fr::from(message);
        let signature = Signature {
            sigma1: h.into_affine(),
            sigma2: (-(h * exponent)).into_affine(),
        };
        (vk, ConstraintF::from(message), signature)
    }

    #[test]
    fn test_valid_signature_verifies() {
        let (vk, m, sig) = keyed(42);
        assert!(verify_signature(&vk, m, &sig));
    }

    #[test]
    fn test_wrong_message_fails() {
        let (vk, m, sig) = keyed(42);
        assert!(!verify_signature(&vk, m + ConstraintF::from(1u64), &sig));
    }

    #[test]
    fn test_perturbed_sigma1_breaks_identity() {
        let (vk, m, mut sig) = keyed(42);
        let mut x = sig.sigma1.x;
        x.c0 += ConstraintF::from(1u64);
        sig.sigma1 = G2Affine::new_unchecked(x, sig.sigma1.y);

        assert!(!pairing_product(&vk, m, &sig).0.is_one());
    }

    #[test]
    fn test_trivial_signature_rejected() {
        let (vk, m, _) = keyed(42);
        let trivial = Signature {
            sigma1: G2Affine::zero(),
            sigma2: G2Affine::zero(),
        };
        assert!(pairing_product(&vk, m, &trivial).0.is_one());
        assert!(!verify_signature(&vk, m, &trivial));
    }

    #[test]
    fn test_sigma2_at_infinity_rejected() {
        let (vk, m, mut sig) = keyed(42);
        sig.sigma2 = G2Affine::zero();
        assert!(!verify_signature(&vk, m, &sig));
    }

    #[test]
    fn test_message_point_zero_message() {
        let (vk, _, _) = keyed(1);
        assert_eq!(message_point(&vk, ConstraintF::from(0u64)), vk.x);
    }

    #[test]
    fn test_public_element_order() {
        let (vk, _, _) = keyed(1);
        let elems = vk.to_field_elements();
        assert_eq!(elems[0], vk.g.x);
        assert_eq!(elems[3], vk.x.y);
        assert_eq!(elems[4], vk.y.x);
    }
}
