//! Groth16 backend for the transfer circuit
//!
//! ```text
//! compile(options)            -> CompiledCircuit   (shape + statistics)
//! setup(compiled, rng)        -> (ProvingKey, VerifyingKey)
//! prove(compiled, pk, pub, w) -> Proof              (refuses unsatisfied witnesses)
//! verify(vk, pub, proof)      -> bool
//! ```
//!
//! Proofs live on BW6-761, whose scalar field is the BLS12-377 base field
//! the signature gadget works in.

use std::path::Path;
use std::time::Instant;

use ark_bw6_761::BW6_761;
use ark_ec::AffineRepr;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, OptimizationGoal, SynthesisMode,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};
use log::{debug, info, warn};
use shroud_config::ShroudConfig;

use crate::ConstraintF;
use crate::authorization::VerificationKey;
use crate::circuit::{CircuitOptions, TransferCircuit};
use crate::constants::{NUM_INPUTS, NUM_OUTPUTS};
use crate::errors::{ProverError, Result, WitnessError};
use crate::prover_inputs::PublicInputs;
use crate::witness::{PrivateWitness, evaluate};

/// Shape of a synthesized transfer circuit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompiledCircuit<const N: usize = { NUM_INPUTS }, const M: usize = { NUM_OUTPUTS }> {
    pub options: CircuitOptions,
    pub num_constraints: usize,
    /// Public inputs, not counting the constant one
    pub num_public_inputs: usize,
    pub num_witness_variables: usize,
}

impl<const N: usize, const M: usize> CompiledCircuit<N, M> {
    /// Unassigned instance of this shape
    pub fn blank(&self) -> TransferCircuit<N, M> {
        TransferCircuit::blank(self.options)
    }
}

/// Synthesize the blank circuit once and record its shape
pub fn compile<const N: usize, const M: usize>(
    options: CircuitOptions,
) -> Result<CompiledCircuit<N, M>> {
    let start = Instant::now();

    let cs = ConstraintSystem::<ConstraintF>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    cs.set_mode(SynthesisMode::Setup);
    TransferCircuit::<N, M>::blank(options).generate_constraints(cs.clone())?;

    let compiled = CompiledCircuit {
        options,
        num_constraints: cs.num_constraints(),
        num_public_inputs: cs.num_instance_variables() - 1,
        num_witness_variables: cs.num_witness_variables(),
    };

    info!(
        "Compiled {}-in/{}-out transfer circuit: {} constraints, {} public inputs, {} witnesses ({:?})",
        N,
        M,
        compiled.num_constraints,
        compiled.num_public_inputs,
        compiled.num_witness_variables,
        start.elapsed()
    );
    Ok(compiled)
}

/// Circuit-specific trusted setup
pub fn setup<const N: usize, const M: usize, R: RngCore + CryptoRng>(
    compiled: &CompiledCircuit<N, M>,
    rng: &mut R,
) -> Result<(ProvingKey<BW6_761>, VerifyingKey<BW6_761>)> {
    let start = Instant::now();
    let keys = Groth16::<BW6_761>::circuit_specific_setup(compiled.blank(), rng)?;
    info!("Groth16 setup complete in {:?}", start.elapsed());
    Ok(keys)
}

/// Prove a transfer. The witness is evaluated natively first, so an
/// unsatisfied relation is reported by kind and no proof is produced.
pub fn prove<const N: usize, const M: usize, R: RngCore + CryptoRng>(
    compiled: &CompiledCircuit<N, M>,
    proving_key: &ProvingKey<BW6_761>,
    public: &PublicInputs<N, M>,
    private: &PrivateWitness<N, M>,
    rng: &mut R,
) -> Result<Proof<BW6_761>> {
    check_public_points(&public.vk)?;
    if let Err(violation) = evaluate(public, private, compiled.options) {
        warn!("Refusing to prove: {}", violation);
        return Err(violation.into());
    }

    let start = Instant::now();
    let circuit = TransferCircuit::new(public.clone(), private.clone(), compiled.options);
    let proof = Groth16::<BW6_761>::prove(proving_key, circuit, rng)?;
    debug!("Generated transfer proof in {:?}", start.elapsed());

    Ok(proof)
}

/// Verify a proof against public inputs
pub fn verify<const N: usize, const M: usize>(
    verifying_key: &VerifyingKey<BW6_761>,
    public: &PublicInputs<N, M>,
    proof: &Proof<BW6_761>,
) -> Result<bool> {
    let inputs = public.to_field_elements();
    Ok(Groth16::<BW6_761>::verify(verifying_key, &inputs, proof)?)
}

/// G, X and Y must be on-curve, in the prime-order subgroup and not the
/// point at infinity, or the circuit cannot bind them to its public inputs
fn check_public_points(vk: &VerificationKey) -> Result<()> {
    for (name, point) in [("g", vk.g), ("x", vk.x), ("y", vk.y)] {
        let name = name.to_string();
        if point.is_zero() {
            return Err(WitnessError::IdentityPoint(name).into());
        }
        if !point.is_on_curve() {
            return Err(WitnessError::InvalidPoint(name).into());
        }
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(WitnessError::NotInSubgroup(name).into());
        }
    }
    Ok(())
}

/// Transfer prover holding keys for one circuit shape
pub struct TransferProver<const N: usize = { NUM_INPUTS }, const M: usize = { NUM_OUTPUTS }> {
    compiled: CompiledCircuit<N, M>,
    /// The proving key (loaded from file or generated)
    proving_key: ProvingKey<BW6_761>,
    /// The verifying key
    verifying_key: VerifyingKey<BW6_761>,
    prepared_vk: PreparedVerifyingKey<BW6_761>,
    /// Hash of the verifying key
    vk_hash: [u8; 32],
}

impl<const N: usize, const M: usize> TransferProver<N, M> {
    /// Wrap an existing key pair, checking it belongs to `compiled`
    pub fn new(
        compiled: CompiledCircuit<N, M>,
        proving_key: ProvingKey<BW6_761>,
        verifying_key: VerifyingKey<BW6_761>,
    ) -> Result<Self> {
        if proving_key.vk != verifying_key {
            return Err(ProverError::KeyMismatch(
                "proving key was generated with a different verifying key".into(),
            ));
        }
        let expected = compiled.num_public_inputs + 1;
        if verifying_key.gamma_abc_g1.len() != expected {
            return Err(ProverError::KeyMismatch(format!(
                "verifying key expects {} public inputs, circuit has {}",
                verifying_key.gamma_abc_g1.len().saturating_sub(1),
                compiled.num_public_inputs
            )));
        }
        // one query element per variable, so a different option set shows up here
        let variables = compiled.num_public_inputs + 1 + compiled.num_witness_variables;
        if proving_key.a_query.len() != variables {
            return Err(ProverError::KeyMismatch(format!(
                "proving key covers {} variables, circuit has {}",
                proving_key.a_query.len(),
                variables
            )));
        }

        let prepared_vk = Groth16::<BW6_761>::process_vk(&verifying_key)?;
        let vk_hash = Self::compute_vk_hash(&verifying_key)?;

        Ok(Self {
            compiled,
            proving_key,
            verifying_key,
            prepared_vk,
            vk_hash,
        })
    }

    /// Compile and run a fresh setup
    pub fn generate<R: RngCore + CryptoRng>(options: CircuitOptions, rng: &mut R) -> Result<Self> {
        let compiled = compile(options)?;
        let (proving_key, verifying_key) = setup(&compiled, rng)?;
        Self::new(compiled, proving_key, verifying_key)
    }

    /// Create a new prover from serialized keys
    pub fn from_bytes(options: CircuitOptions, pk_bytes: &[u8], vk_bytes: &[u8]) -> Result<Self> {
        let start = Instant::now();
        let proving_key = ProvingKey::<BW6_761>::deserialize_compressed(pk_bytes)?;
        let verifying_key = VerifyingKey::<BW6_761>::deserialize_compressed(vk_bytes)?;
        debug!("Deserialized transfer keys in {:?}", start.elapsed());

        Self::new(compile(options)?, proving_key, verifying_key)
    }

    /// Load prover from files
    pub fn from_files(
        options: CircuitOptions,
        pk_path: impl AsRef<Path>,
        vk_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let pk_bytes = std::fs::read(pk_path.as_ref())?;
        let vk_bytes = std::fs::read(vk_path.as_ref())?;
        info!(
            "Loaded transfer keys from {} and {}",
            pk_path.as_ref().display(),
            vk_path.as_ref().display()
        );
        Self::from_bytes(options, &pk_bytes, &vk_bytes)
    }

    /// Load the keys named by `[keys]` for the shape named by `[circuit]`
    pub fn from_config(config: &ShroudConfig) -> Result<Self> {
        Self::from_files(
            CircuitOptions::from(&config.circuit),
            &config.keys.proving_key_path,
            &config.keys.verifying_key_path,
        )
    }

    /// Write both keys, compressed, creating parent directories as needed
    pub fn write_keys(&self, pk_path: impl AsRef<Path>, vk_path: impl AsRef<Path>) -> Result<()> {
        for (path, bytes) in [
            (pk_path.as_ref(), self.proving_key_bytes()?),
            (vk_path.as_ref(), self.verifying_key_bytes()?),
        ] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &bytes)?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        Ok(())
    }

    /// Compute hash of verifying key
    pub fn compute_vk_hash(vk: &VerifyingKey<BW6_761>) -> Result<[u8; 32]> {
        let mut vk_bytes = Vec::new();
        vk.serialize_compressed(&mut vk_bytes)?;
        Ok(*blake3::hash(&vk_bytes).as_bytes())
    }

    pub fn verification_key_hash(&self) -> [u8; 32] {
        self.vk_hash
    }

    pub fn proving_key(&self) -> &ProvingKey<BW6_761> {
        &self.proving_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey<BW6_761> {
        &self.verifying_key
    }

    pub fn compiled(&self) -> &CompiledCircuit<N, M> {
        &self.compiled
    }

    pub fn proving_key_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.proving_key.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    pub fn verifying_key_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.verifying_key.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        public: &PublicInputs<N, M>,
        private: &PrivateWitness<N, M>,
        rng: &mut R,
    ) -> Result<Proof<BW6_761>> {
        prove(&self.compiled, &self.proving_key, public, private, rng)
    }

    /// Verify against the prepared verifying key
    pub fn verify(&self, public: &PublicInputs<N, M>, proof: &Proof<BW6_761>) -> Result<bool> {
        let inputs = public.to_field_elements();
        Ok(Groth16::<BW6_761>::verify_with_processed_vk(
            &self.prepared_vk,
            &inputs,
            proof,
        )?)
    }

    /// Compressed proof encoding
    pub fn proof_to_bytes(proof: &Proof<BW6_761>) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        proof.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    pub fn proof_from_bytes(bytes: &[u8]) -> Result<Proof<BW6_761>> {
        Ok(Proof::<BW6_761>::deserialize_compressed(bytes)?)
    }
}

impl<const N: usize, const M: usize> std::fmt::Debug for TransferProver<N, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferProver")
            .field("compiled", &self.compiled)
            .field("vk_hash", &hex::encode(self.vk_hash))
            .finish_non_exhaustive()
    }
}
