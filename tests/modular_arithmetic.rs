use qarith::prelude::*;

fn register_value(state: &QuantumState<f64>, register: &[Qubit]) -> u64 {
    let (value, p) = state.most_likely_register_value(register).unwrap();
    assert!((p - 1.0).abs() < 1e-9, "register is not in a basis state: {}", p);
    value
}

fn assert_zeroed(state: &QuantumState<f64>, qubits: &[Qubit]) {
    for q in qubits {
        let p = state.qubit_probability(*q).unwrap();
        assert!(p < 1e-9, "qubit {} is not |0>: {}", q, p);
    }
}

#[test]
fn test_cadd_round_trip() -> Result<(), CircuitError> {
    let register = [2, 3, 4, 5];
    for control in 0..2 {
        for x in [0, 3, 9, 15] {
            for y in [0, 1, 7, 12] {
                let mut state =
                    QuantumState::<f64>::from_registers(5, &[(&[1], control), (&register, x)])?;
                state.apply(&Gate::h(1))?;
                let before = state.amplitudes().to_vec();

                cadd(&mut state, 1, &register, y)?;
                cadd(&mut state, 1, &register, 16 - y)?;

                for (a, b) in state.amplitudes().iter().zip(before.iter()) {
                    assert!((a - b).norm() < 1e-9);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_add_mod_sequence() -> Result<(), CircuitError> {
    // control 1, register 2..=4, ancillas 5..=7
    let (control, register, ancillas) = (1, [2, 3, 4], [5, 6, 7]);
    let mut state = QuantumState::<f64>::from_registers(7, &[(&[control], 1)])?;

    cadd_mod_n(&mut state, control, &register, ancillas.into(), 3, 5)?;
    assert_eq!(register_value(&state, &register), 3);
    cadd_mod_n(&mut state, control, &register, ancillas.into(), 1, 5)?;
    assert_eq!(register_value(&state, &register), 4);
    cadd_mod_n(&mut state, control, &register, ancillas.into(), 6, 5)?;
    assert_eq!(register_value(&state, &register), 0);

    assert_zeroed(&state, &ancillas);
    Ok(())
}

#[test]
fn test_add_mod_out_of_range_unchanged() -> Result<(), CircuitError> {
    let (control, register, ancillas) = (1, [2, 3, 4], [5, 6, 7]);
    for x in 5..8 {
        let mut state =
            QuantumState::<f64>::from_registers(7, &[(&[control], 1), (&register, x)])?;
        cadd_mod_n(&mut state, control, &register, ancillas.into(), 2, 5)?;
        assert_eq!(register_value(&state, &register), x);
        assert_zeroed(&state, &ancillas);
    }
    Ok(())
}

#[test]
fn test_add_mod_superposition() -> Result<(), CircuitError> {
    // Register in (|1> + |4>)/sqrt(2); adding 2 mod 5 gives (|3> + |1>)/sqrt(2).
    let (control, register, ancillas) = (1, [2, 3, 4], [5, 6, 7]);
    let mut state = QuantumState::<f64>::from_registers(7, &[(&[control], 1), (&register, 1)])?;
    // |001> + |100>: entangle the low and high bits.
    state.apply(&Gate::h(4))?;
    state.apply(&Gate::cnot(4, 2))?;

    cadd_mod_n(&mut state, control, &register, ancillas.into(), 2, 5)?;
    let dist = state.register_distribution(&register)?;
    assert!((dist[3] - 0.5).abs() < 1e-9);
    assert!((dist[1] - 0.5).abs() < 1e-9);
    assert_zeroed(&state, &ancillas);
    Ok(())
}

// control 1, reg1 2..=4, reg2 5..=7, ancillas 8..=11
const CONTROL: Qubit = 1;
const REG1: [Qubit; 3] = [2, 3, 4];
const REG2: [Qubit; 3] = [5, 6, 7];
const ANCILLAS: [Qubit; 4] = [8, 9, 10, 11];

#[test]
fn test_mult_mod_sequence() -> Result<(), CircuitError> {
    let mut state = QuantumState::<f64>::from_registers(11, &[(&[CONTROL], 1), (&REG1, 2)])?;
    cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 3, 5)?;
    assert_eq!(register_value(&state, &REG1), 1);
    assert_eq!(register_value(&state, &REG2), 0);

    cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 3, 5)?;
    assert_eq!(register_value(&state, &REG1), 3);
    cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 3, 5)?;
    assert_eq!(register_value(&state, &REG1), 4);

    assert_eq!(register_value(&state, &REG2), 0);
    assert_zeroed(&state, &ANCILLAS);
    Ok(())
}

#[test]
fn test_mult_mod_superposed_control() -> Result<(), CircuitError> {
    let mut state = QuantumState::<f64>::from_registers(11, &[(&REG1, 4)])?;
    state.apply(&Gate::h(CONTROL))?;
    cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 2, 7)?;

    let mut joint = vec![CONTROL];
    joint.extend_from_slice(&REG1);
    let dist = state.register_distribution(&joint)?;
    // control 0 keeps 4, control 1 gives 4 * 2 mod 7 = 1
    assert!((dist[4 << 1] - 0.5).abs() < 1e-9);
    assert!((dist[(1 << 1) | 1] - 0.5).abs() < 1e-9);
    assert_zeroed(&state, &REG2);
    assert_zeroed(&state, &ANCILLAS);
    Ok(())
}

#[test]
fn test_expo_mod() -> Result<(), CircuitError> {
    for exponent in 0..9 {
        let mut state = QuantumState::<f64>::from_registers(11, &[(&[CONTROL], 1), (&REG1, 1)])?;
        cexpo_mod_n(
            &mut state,
            CONTROL,
            &REG1,
            &REG2,
            ANCILLAS.into(),
            3,
            exponent,
            7,
            ExponentiationStrategy::default(),
        )?;
        assert_eq!(register_value(&state, &REG1), mod_pow(3, exponent, 7));
        assert_zeroed(&state, &REG2);
    }
    Ok(())
}

#[test]
fn test_modular_inverse() {
    for (a, n) in [(3, 5), (7, 15), (10, 21), (1, 2), (123_456_789, 1_000_000_007)] {
        let inverse = modular_inverse(a, n).unwrap();
        assert_eq!((a as u128 * inverse as u128) % n as u128, 1);
    }
    assert_eq!(
        modular_inverse(6, 15),
        Err(CircuitError::ModularInverseUndefined {
            value: 6,
            modulus: 15
        })
    );
}

#[test]
fn test_precondition_errors_leave_state_untouched() -> Result<(), CircuitError> {
    let mut state = QuantumState::<f64>::from_registers(11, &[(&[CONTROL], 1), (&REG1, 2)])?;
    let before = state.amplitudes().to_vec();

    assert_eq!(
        cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 5, 15),
        Err(CircuitError::InvalidModulus {
            modulus: 15,
            width: 3
        })
    );
    assert_eq!(
        cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, ANCILLAS.into(), 2, 6),
        Err(CircuitError::ModularInverseUndefined {
            value: 2,
            modulus: 6
        })
    );
    assert_eq!(
        cmult_mod_n(&mut state, CONTROL, &REG1, &REG2[..2], ANCILLAS.into(), 3, 5),
        Err(CircuitError::RegisterWidthMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, [8, 9, 10, 8].into(), 3, 5),
        Err(CircuitError::AncillaReuseError {
            qubit: 8,
            first: "lt_modulus",
            second: "combined_control"
        })
    );
    assert_eq!(
        cmult_mod_n(&mut state, CONTROL, &REG1, &REG2, [8, 9, 10, 12].into(), 3, 5),
        Err(CircuitError::InvalidQubitIndex { index: 12, n: 11 })
    );
    assert_eq!(
        cadd(&mut state, 2, &REG1, 1),
        Err(CircuitError::AncillaReuseError {
            qubit: 2,
            first: "control",
            second: "register"
        })
    );

    assert_eq!(state.amplitudes(), before.as_slice());
    Ok(())
}
