#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    missing_docs
)]

//! Dense state vector simulation of small quantum circuits, and a library of reversible modular
//! arithmetic circuits (Fourier adders, comparators, add, multiply and exponentiate modulo `N`)
//! built on top of it for phase estimation and order finding.
//!
//! Qubits are numbered from 1, and qubit `q` is bit `q - 1` of a basis-state index. Registers
//! are slices of qubits, least significant first. Gates are applied straight onto the `2^n`
//! amplitudes without building any operator larger than 2x2.
//!
//! # Example (controlled modular multiplication)
//! ```
//! use qarith::prelude::*;
//!
//! # fn main() -> CircuitResult<()> {
//! // Qubit 1 controls, 2..=4 hold x, 5..=7 are the zeroed co-register, 8..=11 are scratch.
//! let (control, x, zeros) = (1, [2, 3, 4], [5, 6, 7]);
//! let mut state = QuantumState::<f64>::from_registers(11, &[(&[control], 1), (&x, 2)])?;
//!
//! cmult_mod_n(&mut state, control, &x, &zeros, [8, 9, 10, 11].into(), 3, 5)?;
//!
//! // 2 * 3 mod 5
//! assert_eq!(state.most_likely_register_value(&x)?.0, 1);
//! assert_eq!(state.most_likely_register_value(&zeros)?.0, 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Measurement
//! Measurements draw from a caller supplied `rand::Rng`, so seeded or scripted sources give
//! reproducible runs.
//! ```
//! use qarith::prelude::*;
//! use qarith::rand::rngs::StdRng;
//! use qarith::rand::SeedableRng;
//!
//! # fn main() -> CircuitResult<()> {
//! let mut state = QuantumState::<f64>::new(2);
//! state.apply(&Gate::h(1))?;
//! state.apply(&Gate::cnot(1, 2))?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (value, _) = measure_register(&mut state, &[1, 2], &mut rng)?;
//! assert!(value == 0b00 || value == 0b11);
//! # Ok(())
//! # }
//! ```

/// Reversible arithmetic circuits on qubit registers.
pub mod arithmetic;
/// Runtime options of a simulation.
pub mod config;
/// Circuit error types.
pub mod errors;
/// Gate definitions.
pub mod gates;
/// Sampling measurements.
pub mod measurement;
/// Classical number theory for circuit constants.
pub mod number_theory;
/// Standard quantum fourier transform implementation.
pub mod qfft;
mod rayon_helper;
/// The state vector.
pub mod state;
/// Lower-level state operations.
pub mod state_ops;
/// Reusable types.
pub mod types;
/// Utility functions for bit and index manipulation
pub mod utils;

pub use num_complex::Complex;
pub use rand;
pub use types::*;

pub use config::SimulatorConfig;

/// Commonly used types and functions.
/// ```
/// use qarith::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::arithmetic::*;
    pub use crate::errors::*;
    pub use crate::gates::{Gate, GateLabel, Rotation};
    pub use crate::measurement::{measure, measure_register, MeasurementResult};
    pub use crate::number_theory::{extended_gcd, gcd, mod_pow, modular_inverse};
    pub use crate::qfft::{controlled_qft, qft, qft_gates};
    pub use crate::state::{CircuitEvent, QuantumState};
}
