//! Reversible arithmetic on little-endian qubit registers, worked out in the Fourier basis after
//! Draper, "Addition on a Quantum Computer" (2000) and Beauregard, "Circuit for Shor's algorithm
//! using 2n+3 qubits" (2003).
//!
//! Each composite circuit takes its qubits by role and builds a [`CircuitFrame`] before touching
//! the state: operands must be in range and pairwise distinct, and scratch qubits must be |0>.
//! Scratch qubits are handed back in |0>.

mod adder;
mod frame;
mod modular;

pub use adder::{add_constant, cadd, compare_less_than};
pub use frame::{AddModAncillas, CircuitFrame, MulModAncillas};
pub use modular::{cadd_mod_n, cexpo_mod_n, cmult_mod_n, ExponentiationStrategy};
