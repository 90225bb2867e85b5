//! Key Generation CLI for the shroud transfer prover
//!
//! Runs the Groth16 circuit-specific setup for the transfer circuit and writes
//! the compressed proving and verifying keys.
//!
//! Usage:
//!   cargo run --package shroud-prover --bin keygen -- --pk-out ./keys/transfer.pk --vk-out ./keys/transfer.vk
//!
//! Defaults come from shroud.toml (`[keys]`, `[circuit]`). Keys must be
//! regenerated whenever the circuit shape changes.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use ark_std::rand::{SeedableRng, rngs::StdRng};
use log::warn;
use shroud_config::ShroudConfig;
use shroud_prover::{CircuitOptions, TransferProver};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(i) = args.iter().position(|a| a == "--config") {
        let path = args.get(i + 1).context("--config needs a path")?;
        let config = ShroudConfig::load_from(Path::new(path))?;
        ShroudConfig::set_global(config).map_err(|_| anyhow!("Config already loaded"))?;
    }

    let config = ShroudConfig::global();
    let mut pk_path = config.keys.proving_key_path.clone();
    let mut vk_path = config.keys.verifying_key_path.clone();
    let mut seed = config.keys.setup_seed;
    let mut options = CircuitOptions::from(&config.circuit);
    let mut force = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                args.next();
            }
            "--pk-out" => pk_path = args.next().context("--pk-out needs a path")?,
            "--vk-out" => vk_path = args.next().context("--vk-out needs a path")?,
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--bind-output-rho" => options.bind_output_rho = true,
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    if !force && Path::new(&pk_path).exists() && Path::new(&vk_path).exists() {
        println!("Keys already exist at:");
        println!("  Proving key:   {}", pk_path);
        println!("  Verifying key: {}", vk_path);
        println!("\nUse --force to regenerate keys.");
        return Ok(());
    }

    println!("Shroud Transfer Key Generation");
    println!("==============================");
    println!();
    println!("  Circuit: 2-in/2-out transfer, bind_output_rho = {}", options.bind_output_rho);
    println!("  Public inputs: G, X, Y (affine x, y each), nullifier1, nullifier2,");
    println!("                 commitment1, commitment2");
    println!();

    let seed = seed.unwrap_or_else(|| {
        warn!("No setup seed configured, using 0. Keys are reproducible by anyone.");
        0
    });
    let mut rng = StdRng::seed_from_u64(seed);

    println!("Performing Groth16 circuit-specific setup...");
    println!("This may take a few minutes...");
    let start = std::time::Instant::now();
    let prover = TransferProver::<2, 2>::generate(options, &mut rng)
        .context("Failed to perform circuit setup")?;
    println!("Setup complete in {:?}", start.elapsed());

    let compiled = prover.compiled();
    println!(
        "  Constraints: {}  Witness variables: {}",
        compiled.num_constraints, compiled.num_witness_variables
    );
    println!();

    prover
        .write_keys(&pk_path, &vk_path)
        .context("Failed to write keys")?;
    println!("Saved proving key to {}", pk_path);
    println!("Saved verifying key to {}", vk_path);

    println!();
    println!("Verification key hash (blake3):");
    println!("  {}", hex::encode(prover.verification_key_hash()));

    println!();
    println!("Key generation complete!");
    println!();
    println!("To use these keys, set in shroud.toml or the environment:");
    println!("  export SHROUD_PROVING_KEY={}", pk_path);
    println!("  export SHROUD_VERIFYING_KEY={}", vk_path);
    if options.bind_output_rho {
        println!("  export SHROUD_BIND_OUTPUT_RHO=true");
    }

    Ok(())
}

fn print_help() {
    println!("Shroud Transfer Key Generation Tool");
    println!();
    println!("USAGE:");
    println!("    keygen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <PATH>      Read this shroud.toml instead of the usual lookup");
    println!("    --pk-out <PATH>      Path for proving key output (default: [keys].proving_key_path)");
    println!("    --vk-out <PATH>      Path for verifying key output (default: [keys].verifying_key_path)");
    println!("    --seed <N>           Deterministic setup seed (default: [keys].setup_seed or 0)");
    println!("    --bind-output-rho    Also bind new-note rho to the spent nullifiers");
    println!("    --force, -f          Overwrite existing keys");
    println!("    --help, -h           Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    keygen --pk-out ./keys/transfer.pk --vk-out ./keys/transfer.vk");
    println!("    keygen -f  # Force regeneration of keys");
}
