use crate::ConstraintF;
use crate::authorization::VerificationKey;
use crate::constants::{NUM_INPUTS, NUM_OUTPUTS, VK_PUBLIC_ELEMENTS};

/// Public inputs fed to the Groth16 verifier
///
/// Field-element order (matches the circuit's allocation order):
/// G.x, G.y, X.x, X.y, Y.x, Y.y, nullifier_1..N, commitment_1..M
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicInputs<const N: usize = { NUM_INPUTS }, const M: usize = { NUM_OUTPUTS }> {
    /// Signature verification triple (G, X, Y)
    pub vk: VerificationKey,
    /// Nullifiers of the spent notes
    pub nullifiers: [ConstraintF; N],
    /// Commitments of the new notes
    pub commitments: [ConstraintF; M],
}

impl<const N: usize, const M: usize> PublicInputs<N, M> {
    /// Number of field elements handed to the verifier
    pub const LEN: usize = VK_PUBLIC_ELEMENTS + N + M;

    pub fn to_field_elements(&self) -> Vec<ConstraintF> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.vk.to_field_elements());
        out.extend_from_slice(&self.nullifiers);
        out.extend_from_slice(&self.commitments);
        out
    }
}
