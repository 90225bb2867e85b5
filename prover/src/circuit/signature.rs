//! Signature verification gadget
//!
//! Computes T = X + M·Y in G1 and the pairing product
//! e(G, Sigma2) · e(T, Sigma1) over BLS12-377, inside the BW6-761 circuit.

use std::borrow::Borrow;

use ark_bls12_377::{
    Bls12_377, G1Affine,
    constraints::{Fq12Var, G1Var, G2Var, PairingVar as Bls12PairingVar},
};
use ark_ec::AffineRepr;
use ark_r1cs_std::{
    alloc::{AllocVar, AllocationMode},
    boolean::Boolean,
    convert::ToBitsGadget,
    eq::EqGadget,
    fields::{FieldVar, fp::FpVar},
    groups::CurveVar,
    pairing::PairingVar,
};
use ark_relations::r1cs::{ConstraintSystemRef, Namespace, SynthesisError};

use crate::ConstraintF;
use crate::authorization::{Signature, VerificationKey};

/// Public verification triple
#[derive(Clone, Debug)]
pub struct VerificationKeyVar {
    pub g: G1Var,
    pub x: G1Var,
    pub y: G1Var,
}

impl VerificationKeyVar {
    /// Allocate (G, X, Y) so that the public input vector carries exactly
    /// G.x, G.y, X.x, X.y, Y.x, Y.y in that order.
    pub fn new_public(
        cs: ConstraintSystemRef<ConstraintF>,
        vk: Option<VerificationKey>,
    ) -> Result<Self, SynthesisError> {
        Ok(Self {
            g: new_public_g1(cs.clone(), vk.map(|k| k.g))?,
            x: new_public_g1(cs.clone(), vk.map(|k| k.x))?,
            y: new_public_g1(cs, vk.map(|k| k.y))?,
        })
    }
}

/// Public affine coordinates bound to a curve-checked witness point
fn new_public_g1(
    cs: ConstraintSystemRef<ConstraintF>,
    point: Option<G1Affine>,
) -> Result<G1Var, SynthesisError> {
    let x = FpVar::new_input(cs.clone(), || {
        point.map(|p| p.x).ok_or(SynthesisError::AssignmentMissing)
    })?;
    let y = FpVar::new_input(cs.clone(), || {
        point.map(|p| p.y).ok_or(SynthesisError::AssignmentMissing)
    })?;

    let var = G1Var::new_witness(cs, || {
        point
            .map(|p| p.into_group())
            .ok_or(SynthesisError::AssignmentMissing)
    })?;

    let affine = var.to_affine()?;
    affine.x.enforce_equal(&x)?;
    affine.y.enforce_equal(&y)?;
    affine.infinity.enforce_equal(&Boolean::constant(false))?;

    Ok(var)
}

/// Private signature components
#[derive(Clone, Debug)]
pub struct SignatureVar {
    pub sigma1: G2Var,
    pub sigma2: G2Var,
}

impl AllocVar<Signature, ConstraintF> for SignatureVar {
    fn new_variable<T: Borrow<Signature>>(
        cs: impl Into<Namespace<ConstraintF>>,
        f: impl FnOnce() -> Result<T, SynthesisError>,
        mode: AllocationMode,
    ) -> Result<Self, SynthesisError> {
        let ns = cs.into();
        let cs = ns.cs();
        let signature = f().map(|s| *s.borrow()).ok();

        let sigma1 = G2Var::new_variable(
            cs.clone(),
            || {
                signature
                    .map(|s| s.sigma1.into_group())
                    .ok_or(SynthesisError::AssignmentMissing)
            },
            mode,
        )?;
        let sigma2 = G2Var::new_variable(
            cs,
            || {
                signature
                    .map(|s| s.sigma2.into_group())
                    .ok_or(SynthesisError::AssignmentMissing)
            },
            mode,
        )?;

        Ok(Self { sigma1, sigma2 })
    }
}

/// T = X + M·Y, with M decomposed into little-endian bits
pub fn message_point(
    vk: &VerificationKeyVar,
    message: &FpVar<ConstraintF>,
) -> Result<G1Var, SynthesisError> {
    let bits = message.to_bits_le()?;
    let y_m = vk.y.scalar_mul_le(bits.iter())?;
    Ok(y_m + &vk.x)
}

/// e(G, Sigma2) · e(X + M·Y, Sigma1)
pub fn pairing_product(
    vk: &VerificationKeyVar,
    message: &FpVar<ConstraintF>,
    signature: &SignatureVar,
) -> Result<Fq12Var, SynthesisError> {
    let t = message_point(vk, message)?;

    let g1 = [
        <Bls12PairingVar as PairingVar<Bls12_377>>::prepare_g1(&vk.g)?,
        <Bls12PairingVar as PairingVar<Bls12_377>>::prepare_g1(&t)?,
    ];
    let g2 = [
        <Bls12PairingVar as PairingVar<Bls12_377>>::prepare_g2(&signature.sigma2)?,
        <Bls12PairingVar as PairingVar<Bls12_377>>::prepare_g2(&signature.sigma1)?,
    ];

    <Bls12PairingVar as PairingVar<Bls12_377>>::product_of_pairings(&g1, &g2)
}

/// Enforce that the pairing product is the target-group identity and that
/// neither signature component is the point at infinity
pub fn enforce_signature(
    vk: &VerificationKeyVar,
    message: &FpVar<ConstraintF>,
    signature: &SignatureVar,
) -> Result<(), SynthesisError> {
    for sigma in [&signature.sigma1, &signature.sigma2] {
        sigma
            .to_affine()?
            .infinity
            .enforce_equal(&Boolean::constant(false))?;
    }
    pairing_product(vk, message, signature)?.enforce_equal(&Fq12Var::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization;
    use ark_bls12_377::{Fr, G1Projective, G2Affine, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_ff::One;
    use ark_r1cs_std::R1CSVar;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_std::UniformRand;
    use ark_std::rand::{SeedableRng, rngs::StdRng};

    fn keyed() -> (VerificationKey, ConstraintF, Signature) {
        let mut rng = StdRng::seed_from_u64(11);
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
            sigma2: (-(h * (x + y * Fr::from(5u64)))).into_affine(),
        };
        (vk, ConstraintF::from(5u64), signature)
    }

    fn synthesize(
        vk: VerificationKey,
        m: ConstraintF,
        signature: Signature,
    ) -> (ConstraintSystemRef<ConstraintF>, Fq12Var) {
        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        let vk_var = VerificationKeyVar::new_public(cs.clone(), Some(vk)).unwrap();
        let m_var = FpVar::new_witness(cs.clone(), || Ok(m)).unwrap();
        let sig_var = SignatureVar::new_witness(cs.clone(), || Ok(signature)).unwrap();

        let product = pairing_product(&vk_var, &m_var, &sig_var).unwrap();
        product.enforce_equal(&Fq12Var::one()).unwrap();
        (cs, product)
    }

    #[test]
    fn test_valid_signature_is_accepted() {
        let (vk, m, sig) = keyed();
        let (cs, product) = synthesize(vk, m, sig);

        assert!(product.value().unwrap().is_one());
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_message_point_matches_native() {
        let (vk, m, _) = keyed();
        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        let vk_var = VerificationKeyVar::new_public(cs.clone(), Some(vk)).unwrap();
        let m_var = FpVar::new_witness(cs.clone(), || Ok(m)).unwrap();

        let t = message_point(&vk_var, &m_var).unwrap();
        assert_eq!(
            t.value().unwrap().into_affine(),
            authorization::message_point(&vk, m)
        );
    }

    #[test]
    fn test_public_inputs_are_affine_coordinates() {
        let (vk, _, _) = keyed();
        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        VerificationKeyVar::new_public(cs.clone(), Some(vk)).unwrap();

        // constant one + six coordinates
        assert_eq!(cs.num_instance_variables(), 7);
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_wrong_message_is_rejected() {
        let (vk, m, sig) = keyed();
        let (cs, product) = synthesize(vk, m + ConstraintF::from(1u64), sig);

        assert!(!product.value().unwrap().is_one());
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_perturbed_sigma1_is_rejected() {
        let (vk, m, mut sig) = keyed();
        let mut y = sig.sigma1.y;
        y.c1 += ConstraintF::from(1u64);
        sig.sigma1 = G2Affine::new_unchecked(sig.sigma1.x, y);

        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        let vk_var = VerificationKeyVar::new_public(cs.clone(), Some(vk)).unwrap();
        let m_var = FpVar::new_witness(cs.clone(), || Ok(m)).unwrap();
        let sig_var = SignatureVar::new_witness(cs.clone(), || Ok(sig)).unwrap();
        enforce_signature(&vk_var, &m_var, &sig_var).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_sigma2_at_infinity_is_rejected() {
        let (vk, m, mut sig) = keyed();
        sig.sigma2 = G2Affine::zero();

        let cs = ConstraintSystem::<ConstraintF>::new_ref();
        let vk_var = VerificationKeyVar::new_public(cs.clone(), Some(vk)).unwrap();
        let m_var = FpVar::new_witness(cs.clone(), || Ok(m)).unwrap();
        let sig_var = SignatureVar::new_witness(cs.clone(), || Ok(sig)).unwrap();

        // Preparing the identity may already fail during synthesis
        let synthesized = enforce_signature(&vk_var, &m_var, &sig_var);
        assert!(synthesized.is_err() || !cs.is_satisfied().unwrap());
    }
}
