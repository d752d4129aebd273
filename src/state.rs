use crate::arithmetic::CircuitFrame;
use crate::config::SimulatorConfig;
use crate::errors::{CircuitError, CircuitResult};
use crate::gates::{Controls, Gate};
use crate::state_ops::matrix_ops::{apply_single, apply_swap, Matrix2};
use crate::state_ops::measurement_ops::{
    measure_prob, measure_state, prob_magnitude, register_probs,
};
use crate::types::{Precision, Qubit, Representation};
use crate::utils::{deposit_bits, flip_bits, qubits_mask};
use crate::Complex;
use num_traits::{One, Zero};

/// One entry of a state's history, recorded when `SimulatorConfig::record_history` is set.
/// Composite gates are recorded as the elementary gates they expand to.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitEvent<P: Precision> {
    /// An elementary (single qubit, controlled or swap) gate.
    Gate(Gate<P>),
    /// A single qubit measurement.
    Measurement {
        /// Measured qubit.
        qubit: Qubit,
        /// Observed value.
        outcome: u8,
        /// Probability of observing `outcome`.
        probability: P,
    },
}

/// A dense state vector of `n` qubits stored locally, plus an arena of equal size to work in.
/// Basis index bit `q - 1` holds the value of qubit `q`.
#[derive(Debug, Clone)]
pub struct QuantumState<P: Precision> {
    n: usize,
    state: Vec<Complex<P>>,
    arena: Vec<Complex<P>>,
    config: SimulatorConfig,
    history: Vec<CircuitEvent<P>>,
}

impl<P: Precision> QuantumState<P> {
    /// Make the state |0...0> on `n` qubits.
    pub fn new(n: usize) -> Self {
        Self::with_config(n, SimulatorConfig::default())
    }

    /// Make the state |0...0> on `n` qubits with the given options.
    pub fn with_config(n: usize, config: SimulatorConfig) -> Self {
        let mut state = vec![Complex::zero(); 1 << n];
        state[0] = Complex::one();
        let arena = state.clone();
        Self {
            n,
            state,
            arena,
            config,
            history: vec![],
        }
    }

    /// Make the basis state `|index>`.
    pub fn from_basis(n: usize, index: usize) -> CircuitResult<Self> {
        if index >= 1 << n {
            return Err(CircuitError::InvalidAmplitudes(format!(
                "Basis index {} does not exist for {} qubits",
                index, n
            )));
        }
        let mut s = Self::new(n);
        s.state.swap(0, index);
        Ok(s)
    }

    /// Make the basis state in which each register holds its little-endian value, every other
    /// qubit being |0>. Registers must not share qubits.
    ///
    /// ```
    /// use qarith::prelude::*;
    ///
    /// # fn main() -> CircuitResult<()> {
    /// let state = QuantumState::<f64>::from_registers(5, &[(&[1, 2, 3], 5), (&[4, 5], 2)])?;
    /// assert_eq!(state.most_likely_register_value(&[1, 2, 3])?.0, 5);
    /// assert_eq!(state.most_likely_register_value(&[4, 5])?.0, 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_registers(n: usize, registers: &[(&[Qubit], u64)]) -> CircuitResult<Self> {
        let mut frame = CircuitFrame::new("from_registers", n);
        for (register, _) in registers {
            frame.claim("register", register)?;
        }
        let mut index = 0;
        for (register, value) in registers {
            if register.len() < 64 && *value >> register.len() != 0 {
                return Err(CircuitError::ConstantOutOfRange {
                    value: *value,
                    width: register.len(),
                });
            }
            index = deposit_bits(index, register, *value as usize);
        }
        Self::from_basis(n, index)
    }

    /// Wrap a full amplitude vector, indexed little-endian. The length must be a power of two and
    /// the norm must be 1 within the default tolerance.
    pub fn from_amplitudes(amplitudes: Vec<Complex<P>>) -> CircuitResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(CircuitError::InvalidAmplitudes(format!(
                "Length {} is not a power of two",
                len
            )));
        }
        let config = SimulatorConfig::default();
        let norm = prob_magnitude(&amplitudes).as_f64();
        if (norm - 1.0).abs() > config.tolerance.max(P::epsilon().as_f64() * len as f64) {
            return Err(CircuitError::InvalidAmplitudes(format!(
                "Squared norm is {} rather than 1",
                norm
            )));
        }
        let arena = amplitudes.clone();
        Ok(Self {
            n: len.trailing_zeros() as usize,
            state: amplitudes,
            arena,
            config,
            history: vec![],
        })
    }

    /// Number of qubits.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Options in effect for this state.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Replace the options of this state.
    pub fn set_config(&mut self, config: SimulatorConfig) {
        self.config = config;
    }

    /// The amplitudes, indexed little-endian.
    pub fn amplitudes(&self) -> &[Complex<P>] {
        &self.state
    }

    /// Consume the state and return the amplitudes in the requested qubit order.
    pub fn into_amplitudes(self, order: Representation) -> Vec<Complex<P>> {
        match order {
            Representation::LittleEndian => self.state,
            Representation::BigEndian => {
                let n = self.n;
                let mut state = self.arena;
                self.state
                    .into_iter()
                    .enumerate()
                    .for_each(|(i, amp)| state[flip_bits(n, i)] = amp);
                state
            }
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<P> {
        self.state.iter().map(Complex::norm_sqr).collect()
    }

    /// Sum of squared magnitudes; 1 up to floating point drift.
    pub fn norm_sqr(&self) -> P {
        prob_magnitude(&self.state)
    }

    /// Probability that qubit `q` would be measured as 1.
    pub fn qubit_probability(&self, q: Qubit) -> CircuitResult<P> {
        self.check_qubit(q)?;
        Ok(measure_prob(q, 1, &self.state))
    }

    /// Probabilities of every little-endian value of `register`, without collapsing the state.
    pub fn register_distribution(&self, register: &[Qubit]) -> CircuitResult<Vec<P>> {
        check_qubits(self.n, register)?;
        Ok(register_probs(register, &self.state))
    }

    /// The most probable value of `register` together with its probability.
    pub fn most_likely_register_value(&self, register: &[Qubit]) -> CircuitResult<(u64, P)> {
        let probs = self.register_distribution(register)?;
        let (value, p) = probs
            .into_iter()
            .enumerate()
            .fold((0, P::zero()), |(bv, bp), (v, p)| {
                if p > bp {
                    (v, p)
                } else {
                    (bv, bp)
                }
            });
        Ok((value as u64, p))
    }

    /// Total probability of basis states whose `mask` bits equal `pattern`.
    pub fn pattern_probability(&self, mask: usize, pattern: usize) -> P {
        self.state
            .iter()
            .enumerate()
            .filter(|(row, _)| row & mask == pattern)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// The recorded history, oldest first. Empty unless `record_history` is set.
    pub fn history(&self) -> &[CircuitEvent<P>] {
        &self.history
    }

    /// Drain the recorded history.
    pub fn take_history(&mut self) -> Vec<CircuitEvent<P>> {
        std::mem::take(&mut self.history)
    }

    /// Apply any gate. Validates every operand before touching the amplitudes.
    pub fn apply(&mut self, gate: &Gate<P>) -> CircuitResult<()> {
        gate.validate(self.n)?;
        gate.check_unitary(self.config.tolerance)?;
        let mut controls = Controls::new();
        gate.execute(self, &mut controls);
        Ok(())
    }

    /// Apply a sequence of gates in order, stopping at the first invalid one.
    pub fn apply_all<'a, It>(&mut self, gates: It) -> CircuitResult<()>
    where
        P: 'a,
        It: IntoIterator<Item = &'a Gate<P>>,
    {
        gates.into_iter().try_for_each(|g| self.apply(g))
    }

    /// Apply a single qubit gate.
    pub fn apply_single(&mut self, gate: &Gate<P>) -> CircuitResult<()> {
        match gate {
            Gate::SingleQubit { .. } => self.apply(gate),
            _ => Err(CircuitError::gate(format!(
                "Expected a single qubit gate, found {}",
                gate.name()
            ))),
        }
    }

    /// Apply `inner` on the subspace where every qubit in `controls` is |1>.
    pub fn apply_controlled(&mut self, controls: &[Qubit], inner: &Gate<P>) -> CircuitResult<()> {
        self.apply(&Gate::controlled(controls.iter().cloned(), inner.clone()))
    }

    /// Swap qubits `a` and `b`.
    pub fn apply_swap(&mut self, a: Qubit, b: Qubit) -> CircuitResult<()> {
        self.apply(&Gate::swap(a, b))
    }

    pub(crate) fn check_qubit(&self, q: Qubit) -> CircuitResult<()> {
        check_qubits(self.n, &[q])
    }

    pub(crate) fn transform_single(&mut self, target: Qubit, controls: &[Qubit], mat: &Matrix2<P>) {
        apply_single(
            target,
            qubits_mask(controls),
            mat,
            &self.state,
            &mut self.arena,
        );
        std::mem::swap(&mut self.state, &mut self.arena);
    }

    pub(crate) fn transform_swap(&mut self, a: Qubit, b: Qubit, controls: &[Qubit]) {
        apply_swap(a, b, qubits_mask(controls), &self.state, &mut self.arena);
        std::mem::swap(&mut self.state, &mut self.arena);
    }

    /// Zero out amplitudes inconsistent with `outcome` on `q` and renormalize by `probability`.
    pub(crate) fn collapse(&mut self, q: Qubit, outcome: u8, probability: P) {
        measure_state(q, (outcome, probability), &self.state, &mut self.arena);
        std::mem::swap(&mut self.state, &mut self.arena);
        if self.config.record_history {
            self.history.push(CircuitEvent::Measurement {
                qubit: q,
                outcome,
                probability,
            });
        }
    }

    pub(crate) fn record_gate<F>(&mut self, f: F)
    where
        F: FnOnce() -> Gate<P>,
    {
        if self.config.record_history {
            self.history.push(CircuitEvent::Gate(f()));
        }
    }
}

/// Check every qubit lies in `[1, n]`.
pub(crate) fn check_qubits(n: usize, qubits: &[Qubit]) -> CircuitResult<()> {
    match qubits.iter().find(|q| **q == 0 || **q > n) {
        Some(index) => Err(CircuitError::InvalidQubitIndex { index: *index, n }),
        None => Ok(()),
    }
}
