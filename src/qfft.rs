use crate::errors::{CircuitError, CircuitResult};
use crate::gates::Gate;
use crate::state::QuantumState;
use crate::types::{Precision, Qubit};
use num_rational::Rational64;
use tracing::debug;

/// The elementary gates of the Fourier transform over `qubits` (least significant first):
/// `|x> -> 2^(-k/2) sum_j e^(2 pi i x j / 2^k) |j>`.
///
/// Starting from the most significant qubit, each qubit gets a hadamard followed by controlled
/// phases of `pi / 2^d` from every less significant qubit at distance `d`; a final layer of swaps
/// restores little-endian order. The inverse is the reversed, conjugated sequence.
pub fn qft_gates<P: Precision>(qubits: &[Qubit], inverse: bool) -> Vec<Gate<P>> {
    let m = qubits.len();
    let mut gates = Vec::with_capacity(m * (m + 1) / 2 + m / 2);
    for i in (0..m).rev() {
        gates.push(Gate::h(qubits[i]));
        for j in (0..i).rev() {
            let d = i - j;
            gates.push(Gate::cphase_pi(
                qubits[j],
                qubits[i],
                Rational64::new(1, 1i64 << d.min(62)),
            ));
        }
    }
    for i in 0..m / 2 {
        gates.push(Gate::swap(qubits[i], qubits[m - 1 - i]));
    }
    if inverse {
        gates.iter().rev().map(Gate::inverse).collect()
    } else {
        gates
    }
}

/// Applies a quantum fourier transform (or its inverse) to `qubits`, least significant first.
pub fn qft<P: Precision>(
    state: &mut QuantumState<P>,
    qubits: &[Qubit],
    inverse: bool,
) -> CircuitResult<()> {
    debug!(?qubits, inverse, "qft");
    state.apply(&Gate::Qft {
        qubits: qubits.to_vec(),
        inverse,
    })
}

/// Applies a fourier transform to `qubits` conditioned on `control`. Every elementary gate of the
/// decomposition is controlled individually.
pub fn controlled_qft<P: Precision>(
    control: Qubit,
    state: &mut QuantumState<P>,
    qubits: &[Qubit],
    inverse: bool,
) -> CircuitResult<()> {
    debug!(control, ?qubits, inverse, "controlled qft");
    qft_with_controls(state, &[control], qubits, inverse)
}

pub(crate) fn qft_with_controls<P: Precision>(
    state: &mut QuantumState<P>,
    controls: &[Qubit],
    qubits: &[Qubit],
    inverse: bool,
) -> CircuitResult<()> {
    if qubits.is_empty() {
        return Err(CircuitError::EmptyRegister("qft"));
    }
    let gates = qft_gates::<P>(qubits, inverse)
        .into_iter()
        .map(|g| Gate::controlled(controls.iter().cloned(), g))
        .collect::<Vec<_>>();
    // Validate the whole sequence first so a bad operand leaves the state untouched.
    gates.iter().try_for_each(|g| g.validate(state.n()))?;
    state.apply_all(&gates)
}

#[cfg(test)]
mod qft_tests {
    use super::*;
    use crate::Complex;

    fn assert_close(a: &[Complex<f64>], b: &[Complex<f64>]) {
        a.iter()
            .zip(b.iter())
            .for_each(|(a, b)| assert!((a - b).norm() < 1e-10, "{:?} vs {:?}", a, b));
    }

    /// The dense DFT, used only to check the decomposition.
    fn dft(x: usize, k: usize) -> Vec<Complex<f64>> {
        let m = 1 << k;
        let scale = 1.0 / (m as f64).sqrt();
        (0..m)
            .map(|j| {
                let theta = 2.0 * std::f64::consts::PI * (x * j) as f64 / m as f64;
                Complex::from_polar(scale, theta)
            })
            .collect()
    }

    #[test]
    fn test_qft_matches_dft() {
        for x in 0..8 {
            let mut state = QuantumState::<f64>::from_basis(3, x).unwrap();
            qft(&mut state, &[1, 2, 3], false).unwrap();
            assert_close(state.amplitudes(), &dft(x, 3));
        }
    }

    #[test]
    fn test_qft_on_subregister() {
        // Fourier transform of qubits 2 and 3 leaves qubit 1 alone.
        let mut state = QuantumState::<f64>::from_basis(3, 0b011).unwrap();
        qft(&mut state, &[2, 3], false).unwrap();
        let expected = dft(1, 2);
        for (j, amp) in expected.iter().enumerate() {
            assert!((state.amplitudes()[(j << 1) | 1] - amp).norm() < 1e-10);
        }
        assert!((state.qubit_probability(1).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_gate_count() {
        let gates = qft_gates::<f64>(&[1, 2, 3, 4], false);
        // 4 hadamards, 6 controlled phases, 2 swaps.
        assert_eq!(gates.len(), 12);
        assert_eq!(qft_gates::<f64>(&[1, 2, 3, 4], true).len(), 12);
    }

    #[test]
    fn test_controlled_qft_off_is_identity() {
        let mut state = QuantumState::<f64>::from_basis(3, 0b010).unwrap();
        controlled_qft(1, &mut state, &[2, 3], false).unwrap();
        assert!((state.amplitudes()[0b010].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_controlled_qft_rejects_overlap() {
        let mut state = QuantumState::<f64>::new(3);
        assert!(controlled_qft(2, &mut state, &[2, 3], false).is_err());
        assert!((state.amplitudes()[0].re - 1.0).abs() < 1e-12);
    }
}
