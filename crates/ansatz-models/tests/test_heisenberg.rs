//! Heisenberg model properties.

use ansatz_models::{Boundary, HeisenbergModel, Lattice, LatticeModel, SpinAxis};
use num_complex::Complex64;
use proptest::prelude::*;

fn weight() -> impl Strategy<Value = Complex64> {
    (-5.0f64..5.0, -5.0f64..5.0)
        .prop_filter("nonzero", |(re, im)| *re != 0.0 || *im != 0.0)
        .prop_map(|(re, im)| Complex64::new(re, im))
}

#[test]
fn periodic_chain_term_count() {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let op = HeisenbergModel::new(Lattice::line(6, one, zero, Boundary::Periodic)).second_q_ops();
    assert_eq!(op.len(), 6 * 3);
    assert_eq!(op.register_length(), 6);
    assert!(op.to_list().iter().any(|(label, _)| label == "Z_0 Z_5"));
}

#[test]
fn spin_op_serializes() {
    let one = Complex64::new(1.0, 0.0);
    let lattice = Lattice::from_weighted_edges(1, [(0, 0, one)]).unwrap();
    let op = HeisenbergModel::new(lattice).second_q_ops();
    let json = serde_json::to_value(&op).unwrap();
    assert_eq!(json["register_length"], 1);
    assert_eq!(json["terms"][0]["ops"][0][1], "X");
}

proptest! {
    #[test]
    fn self_loop_yields_single_x(n in 1usize..6, site_seed in 0usize..100, w in weight()) {
        let site = site_seed % n;
        let lattice = Lattice::from_weighted_edges(n, [(site, site, w)]).unwrap();
        let op = HeisenbergModel::new(lattice).second_q_ops();
        prop_assert_eq!(op.len(), 1);
        prop_assert_eq!(&op.terms()[0].ops, &vec![(site as u32, SpinAxis::X)]);
        prop_assert_eq!(op.terms()[0].coeff, w);
    }

    #[test]
    fn cross_edge_yields_three_terms(a in 0usize..5, b in 0usize..5, w in weight()) {
        prop_assume!(a != b);
        let lattice = Lattice::from_weighted_edges(5, [(a, b, w)]).unwrap();
        let op = HeisenbergModel::new(lattice).second_q_ops();
        prop_assert_eq!(op.len(), 3);
        let axes: Vec<_> = op.terms().iter().map(|t| t.ops[0].1).collect();
        prop_assert_eq!(axes, vec![SpinAxis::X, SpinAxis::Y, SpinAxis::Z]);
        let expected = if a < b { w } else { w.conj() };
        prop_assert!(op.terms().iter().all(|t| t.coeff == expected && t.ops.len() == 2));
    }

    #[test]
    fn interaction_matrix_round_trips(n in 1usize..6, edges in prop::collection::vec((0usize..6, 0usize..6, weight()), 0..10)) {
        let edges: Vec<_> = edges
            .into_iter()
            .filter(|(a, b, _)| *a < n && *b < n)
            .map(|(a, b, w)| if a == b { (a, b, Complex64::new(w.re, 0.0)) } else { (a, b, w) })
            .filter(|(_, _, w)| *w != Complex64::new(0.0, 0.0))
            .collect();
        let model = HeisenbergModel::new(Lattice::from_weighted_edges(n, edges).unwrap());
        let m = model.interaction_matrix();
        let rebuilt = HeisenbergModel::from_parameters(&m).unwrap();
        prop_assert_eq!(rebuilt.lattice(), model.lattice());
    }
}
