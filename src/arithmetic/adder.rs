use crate::arithmetic::frame::CircuitFrame;
use crate::errors::{CircuitError, CircuitResult};
use crate::gates::Gate;
use crate::qfft::qft_with_controls;
use crate::state::QuantumState;
use crate::types::{Precision, Qubit};
use num_rational::Rational64;
use tracing::debug;

/// The phase, as a multiple of pi, which adding `y` applies to each qubit of an `m` qubit register
/// in the Fourier basis. Position `k` (from 1) turns by `2 pi y / 2^(m-k+1)`; the ratio is kept
/// reduced modulo 2 and zero turns are dropped.
fn fourier_phases(m: usize, y: u64) -> impl Iterator<Item = (usize, Rational64)> {
    (0..m).filter_map(move |k| {
        let j = (m - k) as u32;
        let numer = u128::from(y) & ((1u128 << j) - 1);
        if numer == 0 {
            None
        } else {
            Some((k, Rational64::new(numer as i64, 1i64 << (j - 1))))
        }
    })
}

/// Adds `y` modulo `2^m` to `register` on the subspace where all of `controls` are |1>. Every
/// elementary gate of the transform, the phases, and the inverse transform carries the controls.
/// Operands are assumed to have been checked by the caller's frame.
pub(crate) fn fourier_add<P: Precision>(
    state: &mut QuantumState<P>,
    controls: &[Qubit],
    register: &[Qubit],
    y: u64,
) -> CircuitResult<()> {
    qft_with_controls(state, controls, register, false)?;
    let phases = fourier_phases(register.len(), y)
        .map(|(k, r)| Gate::controlled(controls.iter().cloned(), Gate::phase_pi(register[k], r)))
        .collect::<Vec<_>>();
    state.apply_all(&phases)?;
    qft_with_controls(state, controls, register, true)
}

/// Adds the constant `y` to the little-endian integer held in `register`, wrapping modulo
/// `2^register.len()`.
///
/// ```
/// use qarith::prelude::*;
///
/// # fn main() -> CircuitResult<()> {
/// let mut state = QuantumState::<f64>::from_registers(3, &[(&[1, 2, 3], 6)])?;
/// add_constant(&mut state, &[1, 2, 3], 3)?;
/// assert_eq!(state.most_likely_register_value(&[1, 2, 3])?.0, 1);
/// # Ok(())
/// # }
/// ```
pub fn add_constant<P: Precision>(
    state: &mut QuantumState<P>,
    register: &[Qubit],
    y: u64,
) -> CircuitResult<()> {
    if register.is_empty() {
        return Err(CircuitError::EmptyRegister("add_constant"));
    }
    CircuitFrame::new("add_constant", state.n()).claim("register", register)?;
    debug!(?register, y, "add_constant");
    fourier_add(state, &[], register, y)
}

/// Adds the constant `y` modulo `2^register.len()` to `register` when `control` is |1>. Uses no
/// ancillas; subtracting is adding `2^n - y`.
pub fn cadd<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    register: &[Qubit],
    y: u64,
) -> CircuitResult<()> {
    if register.is_empty() {
        return Err(CircuitError::EmptyRegister("cadd"));
    }
    CircuitFrame::new("cadd", state.n())
        .claim("control", &[control])?
        .claim("register", register)?;
    debug!(control, ?register, y, "cadd");
    fourier_add(state, &[control], register, y)
}

/// Flips `indicator` iff every qubit of `controls` is |1> and `register` holds a value below `y`.
///
/// `carry` must be |0>. It is appended to the register as a new top bit, `2^(n+1) - y` is added to
/// the extended register so that the top bit reads `x < y`, the top bit is copied out, and `y` is
/// added back. Register and carry are returned unchanged. Requires `y <= 2^n`.
pub fn compare_less_than<P: Precision>(
    state: &mut QuantumState<P>,
    controls: &[Qubit],
    register: &[Qubit],
    carry: Qubit,
    indicator: Qubit,
    y: u64,
) -> CircuitResult<()> {
    if register.is_empty() {
        return Err(CircuitError::EmptyRegister("compare_less_than"));
    }
    check_constant(y, register.len())?;
    let mut frame = CircuitFrame::new("compare_less_than", state.n());
    frame
        .claim("control", controls)?
        .claim("register", register)?
        .claim("indicator", &[indicator])?
        .claim_zeroed("carry", &[carry])?;
    frame.check_entry(state)?;
    debug!(?controls, ?register, carry, indicator, y, "compare_less_than");
    compare_unchecked(state, controls, register, carry, indicator, y)?;
    frame.check_exit(state);
    Ok(())
}

pub(crate) fn compare_unchecked<P: Precision>(
    state: &mut QuantumState<P>,
    controls: &[Qubit],
    register: &[Qubit],
    carry: Qubit,
    indicator: Qubit,
    y: u64,
) -> CircuitResult<()> {
    let extended = register
        .iter()
        .cloned()
        .chain(Some(carry))
        .collect::<Vec<_>>();
    let width = extended.len() as u32;
    let offset = (1u128 << width) - u128::from(y);
    // Only the low `width` bits matter, so the truncation is exact modulo 2^width.
    let offset = (offset & ((1u128 << width) - 1)) as u64;

    let copy_controls = controls
        .iter()
        .cloned()
        .chain(Some(carry))
        .collect::<Vec<_>>();

    fourier_add(state, &[], &extended, offset)?;
    state.apply(&Gate::mcx(&copy_controls, indicator))?;
    fourier_add(state, &[], &extended, y)
}

/// `y` must be representable as a comparison bound of a `width` qubit register: `y <= 2^width`.
fn check_constant(y: u64, width: usize) -> CircuitResult<()> {
    if width < 64 && u128::from(y) > 1u128 << width {
        Err(CircuitError::ConstantOutOfRange { value: y, width })
    } else {
        Ok(())
    }
}
