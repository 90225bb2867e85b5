use ark_r1cs_std::{eq::EqGadget, fields::FieldVar, fields::fp::FpVar};
use ark_relations::r1cs::SynthesisError;

use crate::ConstraintF;

/// Enforce sum(inputs) == sum(outputs) over the field.
///
/// Values are not range-checked: sums that differ by a multiple of the
/// modulus are accepted.
pub fn enforce_balance<'a>(
    inputs: impl IntoIterator<Item = &'a FpVar<ConstraintF>>,
    outputs: impl IntoIterator<Item = &'a FpVar<ConstraintF>>,
) -> Result<(), SynthesisError> {
    let total_in = inputs.into_iter().fold(FpVar::zero(), |acc, v| acc + v);
    let total_out = outputs.into_iter().fold(FpVar::zero(), |acc, v| acc + v);
    total_in.enforce_equal(&total_out)
}
