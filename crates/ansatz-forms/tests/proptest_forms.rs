//! Property tests for the ansatz generators.

use std::collections::HashSet;
use std::sync::Arc;

use ansatz_forms::{AnsatzBuilder, AnsatzError, CrAnsatz, Hva, PulseAnsatz, Rvb};
use ansatz_hal::SimulatorBackend;
use proptest::prelude::*;

fn cr_ansatz(n: u32, reps: usize) -> CrAnsatz {
    let builder = AnsatzBuilder::new(Arc::new(SimulatorBackend::new(n)), (0..n).collect::<Vec<_>>());
    CrAnsatz::new(n, builder).with_reps(reps)
}

proptest! {
    #[test]
    fn even_widths_build(half in 0u32..8, reps in 0usize..4) {
        let n = 2 * half;
        let rvb = Rvb::new(n).with_reps(reps).circuit().unwrap();
        prop_assert_eq!(rvb.num_qubits(), n);
        let hva = Hva::new(n).with_reps(reps).circuit().unwrap();
        prop_assert_eq!(hva.num_qubits(), n);
    }

    #[test]
    fn odd_widths_fail(half in 0u32..8) {
        let n = 2 * half + 1;
        prop_assert!(matches!(Rvb::new(n).circuit(), Err(AnsatzError::OddQubitCount(_))));
        prop_assert!(matches!(Hva::new(n).circuit(), Err(AnsatzError::OddQubitCount(_))));
    }

    #[test]
    fn parameter_names_are_unique_and_ordered(half in 1u32..6, reps in 1usize..4) {
        let mut rvb = Rvb::new(2 * half).with_reps(reps);
        let circuit = rvb.circuit().unwrap();
        let names: Vec<_> = rvb.params().iter().map(|p| p.name().to_string()).collect();
        let distinct: HashSet<_> = names.iter().collect();
        prop_assert_eq!(distinct.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(name, &format!("phi{i}"));
        }
        prop_assert_eq!(circuit.num_parameters(), names.len());
    }

    #[test]
    fn rvb_uses_two_params_per_block(half in 1u32..8, reps in 1usize..4) {
        let n = 2 * half;
        let circuit = Rvb::new(n).with_reps(reps).circuit().unwrap();
        let blocks = circuit.count_ops().get("eSWAP").copied().unwrap_or(0);
        prop_assert_eq!(blocks, n as usize * reps);
        prop_assert_eq!(circuit.num_parameters(), 2 * blocks);
    }

    #[test]
    fn hva_uses_three_params_per_bond(half in 1u32..8, reps in 1usize..4) {
        let n = 2 * half;
        let circuit = Hva::new(n).with_reps(reps).circuit().unwrap();
        prop_assert_eq!(circuit.num_parameters(), 3 * n as usize * reps);
    }

    #[test]
    fn interleaved_cr_count(n in 1u32..12) {
        let circuit = cr_ansatz(n, 1).layer().unwrap();
        let count = circuit.count_ops().get("cr").copied().unwrap_or(0);
        prop_assert_eq!(count, (n / 2 + (n - 1) / 2) as usize);
    }

    #[test]
    fn wrapper_keys_match_circuit_positions(n in 1u32..6, reps in 1usize..3) {
        let mut ansatz = cr_ansatz(n, reps);
        let circuit = ansatz.scheduled_circuit().unwrap();
        let params = circuit.parameters();
        prop_assert_eq!(ansatz.wrapper_config().len(), params.len());
        for (index, entry) in ansatz.wrapper_config().iter() {
            let expected_suffix = format!("[{}]", params[index].name());
            prop_assert!(entry.label.ends_with(&expected_suffix));
        }
    }
}
