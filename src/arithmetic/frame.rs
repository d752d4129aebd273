use crate::errors::{CircuitError, CircuitResult};
use crate::gates::Controls;
use crate::state::QuantumState;
use crate::state_ops::measurement_ops::{all_zero_prob, measure_prob};
use crate::types::{Precision, Qubit};
use tracing::warn;

/// Scratch qubits of `cadd_mod_n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddModAncillas {
    /// Indicator `c1`, set while the register is below the modulus.
    pub lt_modulus: Qubit,
    /// Indicator `c2`, set while the register is below `N - y`.
    pub lt_complement: Qubit,
    /// Ancilla `a`: extra top bit for comparisons and branch selector for the additions.
    pub scratch: Qubit,
}

impl From<[Qubit; 3]> for AddModAncillas {
    fn from([lt_modulus, lt_complement, scratch]: [Qubit; 3]) -> Self {
        Self {
            lt_modulus,
            lt_complement,
            scratch,
        }
    }
}

/// Scratch qubits of `cmult_mod_n` and `cexpo_mod_n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulModAncillas {
    /// Reused by every modular addition.
    pub add: AddModAncillas,
    /// Holds `control AND x_i` while the `i`th summand is added.
    pub combined_control: Qubit,
}

impl From<[Qubit; 4]> for MulModAncillas {
    fn from([c1, c2, a, combined_control]: [Qubit; 4]) -> Self {
        Self {
            add: [c1, c2, a].into(),
            combined_control,
        }
    }
}

/// The qubit roles of one composite circuit invocation. Claims are checked as they are made, so a
/// frame that builds successfully has every index in range and no qubit in two roles. Qubits
/// claimed with `claim_zeroed` must be |0> on entry and are expected to be |0> on exit.
#[derive(Debug)]
pub struct CircuitFrame {
    circuit: &'static str,
    n: usize,
    claims: Vec<(Qubit, &'static str)>,
    zeroed: Controls,
}

impl CircuitFrame {
    /// Start a frame for `circuit` on a state of `n` qubits.
    pub fn new(circuit: &'static str, n: usize) -> Self {
        Self {
            circuit,
            n,
            claims: vec![],
            zeroed: Controls::new(),
        }
    }

    /// Assign `role` to `qubits`.
    pub fn claim(&mut self, role: &'static str, qubits: &[Qubit]) -> CircuitResult<&mut Self> {
        for q in qubits {
            if *q == 0 || *q > self.n {
                return Err(CircuitError::InvalidQubitIndex {
                    index: *q,
                    n: self.n,
                });
            }
            if let Some((_, first)) = self.claims.iter().find(|(c, _)| c == q) {
                return Err(CircuitError::AncillaReuseError {
                    qubit: *q,
                    first,
                    second: role,
                });
            }
            self.claims.push((*q, role));
        }
        Ok(self)
    }

    /// Assign `role` to `qubits`, which must start and end in |0>.
    pub fn claim_zeroed(
        &mut self,
        role: &'static str,
        qubits: &[Qubit],
    ) -> CircuitResult<&mut Self> {
        self.claim(role, qubits)?;
        self.zeroed.extend(qubits.iter().cloned());
        Ok(self)
    }

    /// Qubits which must be |0> around the circuit.
    pub fn zeroed(&self) -> &[Qubit] {
        &self.zeroed
    }

    /// Role assigned to `q`, if any.
    pub fn role_of(&self, q: Qubit) -> Option<&'static str> {
        self.claims
            .iter()
            .find(|(c, _)| *c == q)
            .map(|(_, role)| *role)
    }

    /// Fail with `AncillaNotZeroed` if any zeroed qubit may be measured as |1>. Skipped when the
    /// state's `verify_ancillas` option is off.
    pub fn check_entry<P: Precision>(&self, state: &QuantumState<P>) -> CircuitResult<()> {
        match self.dirty_qubit(state) {
            Some((qubit, probability)) => Err(CircuitError::AncillaNotZeroed {
                qubit,
                probability,
            }),
            None => Ok(()),
        }
    }

    /// Returns false, and logs a warning, if a zeroed qubit was left dirty. Norm drift beyond the
    /// tolerance is logged as well.
    pub fn check_exit<P: Precision>(&self, state: &QuantumState<P>) -> bool {
        let drift = (state.norm_sqr().as_f64() - 1.0).abs();
        if drift > state.config().tolerance {
            warn!(circuit = self.circuit, drift, "state norm drifted");
        }
        match self.dirty_qubit(state) {
            Some((qubit, probability)) => {
                warn!(
                    circuit = self.circuit,
                    qubit,
                    role = self.role_of(qubit).unwrap_or("?"),
                    probability,
                    "ancilla not returned to |0>"
                );
                false
            }
            None => true,
        }
    }

    fn dirty_qubit<P: Precision>(&self, state: &QuantumState<P>) -> Option<(Qubit, f64)> {
        if !state.config().verify_ancillas {
            return None;
        }
        let tolerance = state.config().tolerance;
        if all_zero_prob(&self.zeroed, state.amplitudes()).as_f64() >= 1.0 - tolerance {
            return None;
        }
        self.zeroed
            .iter()
            .map(|q| (*q, measure_prob(*q, 1, state.amplitudes()).as_f64()))
            .find(|(_, p)| *p > tolerance)
    }
}
