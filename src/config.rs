/// Tolerance used for unitarity, norm and ancilla checks unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Runtime options carried by a `QuantumState`.
///
/// ```
/// use qarith::prelude::*;
///
/// let config = SimulatorConfig::default().with_history(true).with_tolerance(1e-6);
/// let state = QuantumState::<f64>::with_config(3, config);
/// assert!(state.config().record_history);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatorConfig {
    /// Tolerance for norm drift, unitarity and "ancilla is |0>" checks.
    pub tolerance: f64,
    /// Record every elementary gate and measurement into the state's history.
    pub record_history: bool,
    /// Check declared ancillas are |0> on entry to (error) and exit from (warning) each
    /// arithmetic circuit.
    pub verify_ancillas: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            record_history: false,
            verify_ancillas: true,
        }
    }
}

impl SimulatorConfig {
    /// Set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Turn history recording on or off.
    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    /// Turn ancilla verification on or off.
    pub fn with_ancilla_checks(mut self, verify_ancillas: bool) -> Self {
        self.verify_ancillas = verify_ancillas;
        self
    }
}
