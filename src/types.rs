use num_traits::{Float, FloatConst, NumAssign};
use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};

/// The float precision of the simulation.
pub trait Precision:
    Default + NumAssign + Float + FloatConst + Sum + Send + Sync + Display + Product + Debug
{
    /// Convert an `f64` constant into this precision.
    fn from_f64(x: f64) -> Self;

    /// Widen to `f64` for tolerance comparisons and logging.
    fn as_f64(self) -> f64;
}

impl Precision for f64 {
    fn from_f64(x: f64) -> Self {
        x
    }

    fn as_f64(self) -> f64 {
        self
    }
}

impl Precision for f32 {
    fn from_f64(x: f64) -> Self {
        x as f32
    }

    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

/// A qubit index. Qubit `1` is the least significant bit of a basis-state index, qubit `n` the
/// most significant.
pub type Qubit = usize;

/// Order of qubits returned by `QuantumState::into_amplitudes`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Representation {
    /// Qubit 1 is the least significant index bit.
    LittleEndian,
    /// Qubit 1 is the most significant index bit.
    BigEndian,
}
