//! Property-based tests for the state vector kernels and arithmetic circuits.

use proptest::prelude::*;
use qarith::prelude::*;
use qarith::rand::rngs::StdRng;
use qarith::rand::SeedableRng;

const N: usize = 4;

fn gate_strategy() -> impl Strategy<Value = Gate<f64>> {
    let qubits = (1..=N).collect::<Vec<_>>();
    prop_oneof![
        (1..=N).prop_map(Gate::<f64>::h),
        (1..=N).prop_map(Gate::<f64>::x),
        (1..=N).prop_map(Gate::<f64>::t),
        (1..=N, -3.0f64..3.0).prop_map(|(q, theta)| Gate::phase(q, theta)),
        (1..=N, -3.0f64..3.0).prop_map(|(q, theta)| Gate::rz(q, theta)),
        prop::sample::subsequence(qubits.clone(), 2).prop_map(|q| Gate::<f64>::cnot(q[0], q[1])),
        prop::sample::subsequence(qubits.clone(), 3)
            .prop_map(|q| Gate::<f64>::toffoli(q[2], q[0], q[1])),
        prop::sample::subsequence(qubits.clone(), 2).prop_map(|q| Gate::<f64>::swap(q[1], q[0])),
        prop::sample::subsequence(qubits.clone(), 3)
            .prop_map(|q| Gate::<f64>::cswap(q[1], q[0], q[2])),
        prop::sample::subsequence(qubits, 1..=N).prop_map(|q| Gate::<f64>::qft(&q)),
    ]
}

fn prepared_state(index: usize) -> QuantumState<f64> {
    let mut state = QuantumState::from_basis(N, index).unwrap();
    for q in 1..=N {
        state.apply(&Gate::h(q)).unwrap();
        state.apply(&Gate::phase(q, 0.3 * q as f64)).unwrap();
    }
    state
}

proptest! {
    /// Property: every gate keeps the state normalized.
    #[test]
    fn norm_preserved(
        index in 0usize..(1 << N),
        gates in prop::collection::vec(gate_strategy(), 1..24)
    ) {
        let mut state = QuantumState::<f64>::from_basis(N, index).unwrap();
        for gate in &gates {
            state.apply(gate).unwrap();
            prop_assert!(
                (state.norm_sqr() - 1.0).abs() < 1e-9,
                "Norm drifted to {} after {:?}",
                state.norm_sqr(),
                gate
            );
        }
    }

    /// Property: a sequence followed by its reversed inverses is the identity.
    #[test]
    fn inverse_sequence_restores(
        index in 0usize..(1 << N),
        gates in prop::collection::vec(gate_strategy(), 1..16)
    ) {
        let original = prepared_state(index);
        let mut state = original.clone();
        state.apply_all(&gates).unwrap();
        let inverses = gates.iter().rev().map(Gate::inverse).collect::<Vec<_>>();
        state.apply_all(&inverses).unwrap();
        for (a, b) in state.amplitudes().iter().zip(original.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    /// Property: x applied twice is exactly the identity.
    #[test]
    fn double_x_exact(index in 0usize..(1 << N), q in 1..=N) {
        let original = prepared_state(index);
        let mut state = original.clone();
        state.apply(&Gate::x(q)).unwrap();
        state.apply(&Gate::x(q)).unwrap();
        prop_assert_eq!(state.amplitudes(), original.amplitudes());
    }

    /// Property: qft followed by the inverse qft restores the state.
    #[test]
    fn qft_round_trip(
        index in 0usize..(1 << N),
        register in prop::sample::subsequence((1..=N).collect::<Vec<_>>(), 1..=N).prop_shuffle()
    ) {
        let original = prepared_state(index);
        let mut state = original.clone();
        qft(&mut state, &register, false).unwrap();
        qft(&mut state, &register, true).unwrap();
        for (a, b) in state.amplitudes().iter().zip(original.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    /// Property: measurement reports the pre-measurement probability and renormalizes.
    #[test]
    fn measurement_collapses(index in 0usize..(1 << N), q in 1..=N, seed in any::<u64>()) {
        let mut state = prepared_state(index);
        state.apply(&Gate::cnot(1 + (q % N), q)).unwrap();
        let p1 = state.qubit_probability(q).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let (outcome, p) = state.measure_qubit(q, &mut rng).unwrap();
        let expected = if outcome == 1 { p1 } else { 1.0 - p1 };
        prop_assert!((p - expected).abs() < 1e-12);
        prop_assert!((state.norm_sqr() - 1.0).abs() < 1e-9);
        prop_assert!((state.qubit_probability(q).unwrap() - f64::from(outcome)).abs() < 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: adding y then 2^n - y under the same control is the identity.
    #[test]
    fn cadd_round_trip(x in 0u64..16, y in 0u64..16, control in 0u64..2) {
        let register = [2, 3, 4, 5];
        let mut state =
            QuantumState::<f64>::from_registers(5, &[(&[1], control), (&register, x)]).unwrap();
        let before = state.amplitudes().to_vec();
        cadd(&mut state, 1, &register, y).unwrap();
        cadd(&mut state, 1, &register, 16 - y).unwrap();
        for (a, b) in state.amplitudes().iter().zip(before.iter()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    /// Property: add-mod-N is correct for every modulus that fits the register.
    #[test]
    fn add_mod_matches_classical(
        modulus in 1u64..=8,
        x in 0u64..8,
        y in 0u64..16
    ) {
        let register = [2, 3, 4];
        let ancillas = [5, 6, 7];
        let mut state =
            QuantumState::<f64>::from_registers(7, &[(&[1], 1), (&register, x)]).unwrap();
        cadd_mod_n(&mut state, 1, &register, ancillas.into(), y, modulus).unwrap();

        let expected = if x < modulus { (x + y) % modulus } else { x };
        let (value, p) = state.most_likely_register_value(&register).unwrap();
        prop_assert_eq!(value, expected);
        prop_assert!((p - 1.0).abs() < 1e-9);
        for q in ancillas {
            prop_assert!(state.qubit_probability(q).unwrap() < 1e-9);
        }
    }

    /// Property: the comparator flips its indicator exactly when x < y.
    #[test]
    fn comparator_matches_classical(x in 0u64..8, y in 0u64..=8, initial in 0u64..2) {
        let register = [1, 2, 3];
        let mut state =
            QuantumState::<f64>::from_registers(5, &[(&register, x), (&[5], initial)]).unwrap();
        compare_less_than(&mut state, &[], &register, 4, 5, y).unwrap();
        let expected = initial ^ u64::from(x < y);
        prop_assert!((state.qubit_probability(5).unwrap() - expected as f64).abs() < 1e-9);
        prop_assert!(state.qubit_probability(4).unwrap() < 1e-9);
    }
}
