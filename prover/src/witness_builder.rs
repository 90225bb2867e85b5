//! Named-signal witness schema
//!
//! A witness arrives as a flat map from signal name to field element, each
//! value either a JSON integer or a canonical decimal string:
//!
//! ```text
//! g.x g.y  x.x x.y  y.x y.y                      public verification triple
//! nullifier1..N  commitment1..M                  public note values
//! input{i}.value .pk .rho .r .sk                 spent notes, i = 1..N
//! output{j}.value .pk .rho .r                    new notes, j = 1..M
//! m                                              signed message
//! sigma1.x.c0 .x.c1 .y.c0 .y.c1  (and sigma2)    signature in G2
//! ```
//!
//! Every problem with the map is a `WitnessError`, raised before any
//! relation is evaluated.

use std::collections::BTreeMap;
use std::str::FromStr;

use ark_bls12_377::{Fq2, G1Affine, G2Affine};
use ark_ff::{PrimeField, Zero};
use serde::{Deserialize, Serialize};

use crate::ConstraintF;
use crate::authorization::{Signature, VerificationKey};
use crate::errors::WitnessError;
use crate::note::{Note, SpendingKey};
use crate::prover_inputs::PublicInputs;
use crate::witness::{PrivateWitness, SpentNote};

type Result<T> = std::result::Result<T, WitnessError>;

/// A single signal assignment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Integer(u64),
    Decimal(String),
}

impl From<u64> for SignalValue {
    fn from(value: u64) -> Self {
        SignalValue::Integer(value)
    }
}

impl From<ConstraintF> for SignalValue {
    fn from(value: ConstraintF) -> Self {
        SignalValue::Decimal(value.into_bigint().to_string())
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        SignalValue::Decimal(value.to_string())
    }
}

/// Signal name to value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalMap(BTreeMap<String, SignalValue>);

impl SignalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WitnessError::Malformed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| WitnessError::Malformed(e.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SignalValue>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<SignalValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode a typed witness under the signal names above
    pub fn from_witness<const N: usize, const M: usize>(
        public: &PublicInputs<N, M>,
        private: &PrivateWitness<N, M>,
    ) -> Self {
        let mut map = Self::new();

        map.insert_g1("g", &public.vk.g)
            .insert_g1("x", &public.vk.x)
            .insert_g1("y", &public.vk.y);
        for (i, nf) in public.nullifiers.iter().enumerate() {
            map.insert(format!("nullifier{}", i + 1), *nf);
        }
        for (j, cm) in public.commitments.iter().enumerate() {
            map.insert(format!("commitment{}", j + 1), *cm);
        }

        for (i, spent) in private.spent.iter().enumerate() {
            let prefix = format!("input{}", i + 1);
            map.insert_note(&prefix, &spent.note)
                .insert(format!("{prefix}.sk"), spent.spending_key.0);
        }
        for (j, note) in private.created.iter().enumerate() {
            map.insert_note(&format!("output{}", j + 1), note);
        }

        map.insert("m", private.message)
            .insert_g2("sigma1", &private.signature.sigma1)
            .insert_g2("sigma2", &private.signature.sigma2);
        map
    }

    fn insert_g1(&mut self, name: &str, point: &G1Affine) -> &mut Self {
        self.insert(format!("{name}.x"), point.x)
            .insert(format!("{name}.y"), point.y)
    }

    fn insert_g2(&mut self, name: &str, point: &G2Affine) -> &mut Self {
        self.insert(format!("{name}.x.c0"), point.x.c0)
            .insert(format!("{name}.x.c1"), point.x.c1)
            .insert(format!("{name}.y.c0"), point.y.c0)
            .insert(format!("{name}.y.c1"), point.y.c1)
    }

    fn insert_note(&mut self, prefix: &str, note: &Note) -> &mut Self {
        self.insert(format!("{prefix}.value"), note.value)
            .insert(format!("{prefix}.pk"), note.owner_pk)
            .insert(format!("{prefix}.rho"), note.rho)
            .insert(format!("{prefix}.r"), note.randomness)
    }

    /// Field element assigned to `name`
    pub fn field(&self, name: &str) -> Result<ConstraintF> {
        let value = self
            .get(name)
            .ok_or_else(|| WitnessError::MissingSignal(name.to_string()))?;
        parse_field(name, value)
    }

    /// Affine G1 point from `{name}.x`, `{name}.y`
    pub fn g1(&self, name: &str) -> Result<G1Affine> {
        let x = self.field(&format!("{name}.x"))?;
        let y = self.field(&format!("{name}.y"))?;
        if x.is_zero() && y.is_zero() {
            return Err(WitnessError::IdentityPoint(name.to_string()));
        }

        let point = G1Affine::new_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(WitnessError::InvalidPoint(name.to_string()));
        }
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(WitnessError::NotInSubgroup(name.to_string()));
        }
        Ok(point)
    }

    /// Affine G2 point from `{name}.x.c0` .. `{name}.y.c1`
    pub fn g2(&self, name: &str) -> Result<G2Affine> {
        let x = Fq2::new(
            self.field(&format!("{name}.x.c0"))?,
            self.field(&format!("{name}.x.c1"))?,
        );
        let y = Fq2::new(
            self.field(&format!("{name}.y.c0"))?,
            self.field(&format!("{name}.y.c1"))?,
        );
        if x.is_zero() && y.is_zero() {
            return Err(WitnessError::IdentityPoint(name.to_string()));
        }

        let point = G2Affine::new_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(WitnessError::InvalidPoint(name.to_string()));
        }
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(WitnessError::NotInSubgroup(name.to_string()));
        }
        Ok(point)
    }

    fn note(&self, prefix: &str) -> Result<Note> {
        Ok(Note {
            value: self.field(&format!("{prefix}.value"))?,
            owner_pk: self.field(&format!("{prefix}.pk"))?,
            rho: self.field(&format!("{prefix}.rho"))?,
            randomness: self.field(&format!("{prefix}.r"))?,
        })
    }

    pub fn public_inputs<const N: usize, const M: usize>(&self) -> Result<PublicInputs<N, M>> {
        let vk = VerificationKey {
            g: self.g1("g")?,
            x: self.g1("x")?,
            y: self.g1("y")?,
        };
        let nullifiers = collect_array((1..=N).map(|i| self.field(&format!("nullifier{i}"))))?;
        let commitments =
            collect_array((1..=M).map(|j| self.field(&format!("commitment{j}"))))?;

        Ok(PublicInputs {
            vk,
            nullifiers,
            commitments,
        })
    }

    pub fn private_witness<const N: usize, const M: usize>(
        &self,
    ) -> Result<PrivateWitness<N, M>> {
        let spent = collect_array((1..=N).map(|i| {
            let prefix = format!("input{i}");
            Ok(SpentNote {
                note: self.note(&prefix)?,
                spending_key: SpendingKey(self.field(&format!("{prefix}.sk"))?),
            })
        }))?;
        let created = collect_array((1..=M).map(|j| self.note(&format!("output{j}"))))?;

        Ok(PrivateWitness {
            spent,
            created,
            message: self.field("m")?,
            signature: Signature {
                sigma1: self.g2("sigma1")?,
                sigma2: self.g2("sigma2")?,
            },
        })
    }

    /// Split into public inputs and private witness, public side first
    pub fn parse<const N: usize, const M: usize>(
        &self,
    ) -> Result<(PublicInputs<N, M>, PrivateWitness<N, M>)> {
        Ok((self.public_inputs()?, self.private_witness()?))
    }
}

/// Integers are taken as is. Strings must be the canonical decimal form of
/// a value below the field modulus.
fn parse_field(signal: &str, value: &SignalValue) -> Result<ConstraintF> {
    match value {
        SignalValue::Integer(v) => Ok(ConstraintF::from(*v)),
        SignalValue::Decimal(s) => {
            let invalid = || WitnessError::InvalidFieldElement {
                signal: signal.to_string(),
                value: s.clone(),
            };
            let digits = s.trim();
            let parsed = ConstraintF::from_str(digits).map_err(|_| invalid())?;
            // from_str reduces mod p; reject anything that does not round-trip
            if parsed.into_bigint().to_string() != digits {
                return Err(invalid());
            }
            Ok(parsed)
        }
    }
}

fn collect_array<T, const K: usize>(items: impl Iterator<Item = Result<T>>) -> Result<[T; K]> {
    let items = items.collect::<Result<Vec<_>>>()?;
    items.try_into().map_err(|items: Vec<T>| {
        WitnessError::Malformed(format!("expected {} signals, found {}", K, items.len()))
    })
}
