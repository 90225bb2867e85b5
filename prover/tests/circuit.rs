//! Constraint-system satisfaction of the assembled transfer circuit

mod common;

use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef};
use common::*;
use shroud_prover::{
    CircuitOptions, ConstraintF, PrivateWitness, PublicInputs, TransferCircuit,
};

fn synthesize(
    public: PublicInputs,
    private: PrivateWitness,
    options: CircuitOptions,
) -> ConstraintSystemRef<ConstraintF> {
    let cs = ConstraintSystem::<ConstraintF>::new_ref();
    TransferCircuit::new(public, private, options)
        .generate_constraints(cs.clone())
        .unwrap();
    cs
}

fn satisfied(public: PublicInputs, private: PrivateWitness, options: CircuitOptions) -> bool {
    synthesize(public, private, options).is_satisfied().unwrap()
}

#[test]
fn test_valid_transfer_satisfies() {
    let (public, private) = transfer();
    let cs = synthesize(public, private, CircuitOptions::default());

    assert!(cs.is_satisfied().unwrap());
    // constant one + G, X, Y + two nullifiers + two commitments
    assert_eq!(cs.num_instance_variables(), 1 + 6 + 2 + 2);
}

#[test]
fn test_instance_assignment_matches_public_inputs() {
    let (public, private) = transfer();
    let cs = synthesize(public.clone(), private, CircuitOptions::default());

    let assigned = cs.borrow().unwrap().instance_assignment.clone();
    assert_eq!(&assigned[1..], public.to_field_elements().as_slice());
}

#[test]
fn test_public_commitment_plus_one_unsatisfied() {
    let (mut public, private) = transfer();
    public.commitments[0] += f(1);
    assert!(!satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_public_nullifier_plus_one_unsatisfied() {
    let (mut public, private) = transfer();
    public.nullifiers[1] += f(1);
    assert!(!satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_unbalanced_unsatisfied() {
    let (public, private) = transfer_with([f(1), f(1)], [f(2), f(1)], CircuitOptions::default());
    assert!(!satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_wraparound_balance_satisfies() {
    let (public, private) =
        transfer_with([minus_one(), f(2)], [f(1), f(0)], CircuitOptions::default());
    assert!(satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_wrong_owner_unsatisfied() {
    let (public, mut private) = transfer();
    private.spent[1].note.owner_pk = recipients()[1];
    assert!(!satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_wrong_message_unsatisfied() {
    let (public, mut private) = transfer();
    private.message = f(MESSAGE + 1);
    assert!(!satisfied(public, private, CircuitOptions::default()));
}

#[test]
fn test_rho_binding() {
    let (public, private) = transfer();
    assert!(!satisfied(public, private, bound_options()));

    let (public, private) = bound_transfer();
    assert!(satisfied(public, private, bound_options()));
}
