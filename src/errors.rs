use crate::types::Qubit;
use thiserror::Error;

/// An error raised while validating a gate or circuit. Every variant is a precondition failure:
/// it is returned before any amplitude of the state has been touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// A qubit index outside `[1, n]`.
    #[error("Qubit index {index} is outside of [1, {n}]")]
    InvalidQubitIndex {
        /// The offending index.
        index: Qubit,
        /// Number of qubits in the state.
        n: usize,
    },
    /// A malformed gate (wrong matrix size, non-unitary matrix, overlapping operands...).
    #[error("Invalid gate: {0}")]
    InvalidGateSpec(String),
    /// Two registers which must have equal width do not.
    #[error("Register width mismatch: expected {expected} qubits, found {found}")]
    RegisterWidthMismatch {
        /// Width of the reference register.
        expected: usize,
        /// Width of the other register.
        found: usize,
    },
    /// The same qubit was claimed by two roles of a single circuit invocation.
    #[error("Qubit {qubit} used as both {first} and {second}")]
    AncillaReuseError {
        /// The qubit claimed twice.
        qubit: Qubit,
        /// Role of the first claim.
        first: &'static str,
        /// Role of the second claim.
        second: &'static str,
    },
    /// `value` has no inverse modulo `modulus`.
    #[error("{value} has no inverse modulo {modulus}")]
    ModularInverseUndefined {
        /// The value to invert.
        value: u64,
        /// The modulus.
        modulus: u64,
    },
    /// A register with no qubits was supplied.
    #[error("Register `{0}` must contain at least one qubit")]
    EmptyRegister(&'static str),
    /// The modulus is zero or does not fit in the register.
    #[error("Modulus {modulus} is not representable in a {width}-qubit register")]
    InvalidModulus {
        /// The modulus.
        modulus: u64,
        /// Register width in qubits.
        width: usize,
    },
    /// A classical constant is too large for the register it is compared against.
    #[error("Constant {value} is out of range for a {width}-qubit register")]
    ConstantOutOfRange {
        /// The constant.
        value: u64,
        /// Register width in qubits.
        width: usize,
    },
    /// A declared ancilla was not in |0> when a circuit started.
    #[error("Ancilla qubit {qubit} is not |0> (p(|1>) = {probability})")]
    AncillaNotZeroed {
        /// The dirty ancilla.
        qubit: Qubit,
        /// Probability of measuring it as |1>.
        probability: f64,
    },
    /// A supplied amplitude vector cannot be a quantum state.
    #[error("Invalid amplitudes: {0}")]
    InvalidAmplitudes(String),
}

impl CircuitError {
    /// Construct a new gate specification error.
    pub fn gate<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidGateSpec(msg.into())
    }
}

/// A result which may contain a circuit error.
pub type CircuitResult<T> = Result<T, CircuitError>;
