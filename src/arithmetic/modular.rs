use crate::arithmetic::adder::{compare_unchecked, fourier_add};
use crate::arithmetic::frame::{AddModAncillas, CircuitFrame, MulModAncillas};
use crate::errors::{CircuitError, CircuitResult};
use crate::gates::Gate;
use crate::number_theory::modular_inverse;
use crate::state::QuantumState;
use crate::types::{Precision, Qubit};
use crate::utils::qubit_mask;
use tracing::debug;

/// How `cexpo_mod_n` decomposes `y^a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentiationStrategy {
    /// Multiply by `y` once per unit of the exponent.
    Repeated,
    /// Multiply by `y^(2^k) mod N` for every set bit `k` of the exponent.
    SquareAndMultiply,
}

impl Default for ExponentiationStrategy {
    fn default() -> Self {
        Self::SquareAndMultiply
    }
}

/// `0 < modulus <= 2^width`.
fn check_modulus(modulus: u64, width: usize) -> CircuitResult<()> {
    let fits = width >= 64 || u128::from(modulus) <= 1u128 << width;
    if modulus == 0 || !fits {
        Err(CircuitError::InvalidModulus { modulus, width })
    } else {
        Ok(())
    }
}

/// Computes `register <- (register + y) mod N` when `control` is |1> and the register holds a
/// value below `N`. Values at or above `N` are left as they are.
///
/// The three ancillas must be |0> and are returned to |0>. `y` is reduced modulo `N` first.
///
/// ```
/// use qarith::prelude::*;
///
/// # fn main() -> CircuitResult<()> {
/// // control 1, register 2..=4, ancillas 5..=7
/// let register = [2, 3, 4];
/// let mut state = QuantumState::<f64>::from_registers(7, &[(&[1], 1), (&register, 4)])?;
/// cadd_mod_n(&mut state, 1, &register, [5, 6, 7].into(), 6, 5)?;
/// assert_eq!(state.most_likely_register_value(&register)?.0, 0);
/// # Ok(())
/// # }
/// ```
pub fn cadd_mod_n<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    register: &[Qubit],
    ancillas: AddModAncillas,
    y: u64,
    modulus: u64,
) -> CircuitResult<()> {
    if register.is_empty() {
        return Err(CircuitError::EmptyRegister("cadd_mod_n"));
    }
    check_modulus(modulus, register.len())?;
    let mut frame = CircuitFrame::new("cadd_mod_n", state.n());
    frame
        .claim("control", &[control])?
        .claim("register", register)?
        .claim_zeroed("lt_modulus", &[ancillas.lt_modulus])?
        .claim_zeroed("lt_complement", &[ancillas.lt_complement])?
        .claim_zeroed("scratch", &[ancillas.scratch])?;
    frame.check_entry(state)?;
    let y = y % modulus;
    debug!(control, ?register, y, modulus, "cadd_mod_n");
    add_mod_unchecked(state, control, register, ancillas, y, modulus)?;
    frame.check_exit(state);
    Ok(())
}

/// `y` must already be reduced below `modulus`.
fn add_mod_unchecked<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    register: &[Qubit],
    ancillas: AddModAncillas,
    y: u64,
    modulus: u64,
) -> CircuitResult<()> {
    let AddModAncillas {
        lt_modulus: c1,
        lt_complement: c2,
        scratch: a,
    } = ancillas;
    let width = register.len() as u32;
    // y - N modulo 2^n
    let wrapped = ((u128::from(y) + (1u128 << width) - u128::from(modulus))
        & ((1u128 << width) - 1)) as u64;

    // c1 = [x < N], c2 = [x < N - y]
    compare_unchecked(state, &[control], register, a, c1, modulus)?;
    compare_unchecked(state, &[control], register, a, c2, modulus - y)?;
    debug_assert!(
        state.pattern_probability(qubit_mask(c1) | qubit_mask(c2), qubit_mask(c2))
            <= P::from_f64(state.config().tolerance),
        "lt_complement set while lt_modulus is clear"
    );

    // c1 and not c2: the sum wraps past N.
    state.apply(&Gate::x(c2))?;
    state.apply(&Gate::toffoli(c1, c2, a))?;
    fourier_add(state, &[a], register, wrapped)?;
    state.apply(&Gate::toffoli(c1, c2, a))?;
    state.apply(&Gate::x(c2))?;

    // c1 and c2: the sum stays below N.
    state.apply(&Gate::toffoli(c1, c2, a))?;
    fourier_add(state, &[a], register, y)?;
    state.apply(&Gate::toffoli(c1, c2, a))?;

    // With x' the new value, c2 == [x' >= y] on the active branch, so comparing against y sets
    // it, the cnot clears it, and x' < N clears c1.
    compare_unchecked(state, &[control], register, a, c2, y)?;
    state.apply(&Gate::cnot(c1, c2))?;
    compare_unchecked(state, &[control], register, a, c1, modulus)
}

/// Computes `|x>|0> -> |x y mod N>|0>` when `control` is |1>, for `x < N`.
///
/// `reg2` has the width of `reg1` and must start at |0>. The shifted summands `2^i y mod N` are
/// accumulated into `reg2` for each set bit of `reg1`, the registers are swapped, and `reg2` is
/// cleared by accumulating `-y^(-1) mod N` times the product. Fails with `ModularInverseUndefined`
/// when `y` and `N` share a factor. For `x >= N` the product lands in `reg1` but `reg2` keeps `x`.
pub fn cmult_mod_n<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    reg1: &[Qubit],
    reg2: &[Qubit],
    ancillas: MulModAncillas,
    y: u64,
    modulus: u64,
) -> CircuitResult<()> {
    let frame = multiplier_frame("cmult_mod_n", state, control, reg1, reg2, ancillas, modulus)?;
    let y = y % modulus;
    let inverse = modular_inverse(y, modulus)?;
    frame.check_entry(state)?;
    debug!(control, ?reg1, ?reg2, y, modulus, "cmult_mod_n");
    mult_mod_unchecked(state, control, reg1, reg2, ancillas, y, inverse, modulus)?;
    frame.check_exit(state);
    Ok(())
}

/// Computes `|x>|0> -> |x y^exponent mod N>|0>` when `control` is |1>, for `x < N`. Operands follow
/// `cmult_mod_n`.
#[allow(clippy::too_many_arguments)]
pub fn cexpo_mod_n<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    reg1: &[Qubit],
    reg2: &[Qubit],
    ancillas: MulModAncillas,
    y: u64,
    exponent: u64,
    modulus: u64,
    strategy: ExponentiationStrategy,
) -> CircuitResult<()> {
    let frame = multiplier_frame("cexpo_mod_n", state, control, reg1, reg2, ancillas, modulus)?;
    let y = y % modulus;
    let inverse = modular_inverse(y, modulus)?;
    frame.check_entry(state)?;
    debug!(control, ?reg1, ?reg2, y, exponent, modulus, ?strategy, "cexpo_mod_n");

    match strategy {
        ExponentiationStrategy::Repeated => {
            for _ in 0..exponent {
                mult_mod_unchecked(state, control, reg1, reg2, ancillas, y, inverse, modulus)?;
            }
        }
        ExponentiationStrategy::SquareAndMultiply => {
            let m = u128::from(modulus);
            let (mut base, mut base_inverse) = (y, inverse);
            let mut exponent = exponent;
            while exponent > 0 {
                if exponent & 1 == 1 {
                    mult_mod_unchecked(
                        state,
                        control,
                        reg1,
                        reg2,
                        ancillas,
                        base,
                        base_inverse,
                        modulus,
                    )?;
                }
                exponent >>= 1;
                if exponent > 0 {
                    base = (u128::from(base) * u128::from(base) % m) as u64;
                    base_inverse =
                        (u128::from(base_inverse) * u128::from(base_inverse) % m) as u64;
                }
            }
        }
    }
    frame.check_exit(state);
    Ok(())
}

fn multiplier_frame<P: Precision>(
    circuit: &'static str,
    state: &QuantumState<P>,
    control: Qubit,
    reg1: &[Qubit],
    reg2: &[Qubit],
    ancillas: MulModAncillas,
    modulus: u64,
) -> CircuitResult<CircuitFrame> {
    if reg1.is_empty() {
        return Err(CircuitError::EmptyRegister(circuit));
    }
    if reg1.len() != reg2.len() {
        return Err(CircuitError::RegisterWidthMismatch {
            expected: reg1.len(),
            found: reg2.len(),
        });
    }
    check_modulus(modulus, reg1.len())?;
    let add = ancillas.add;
    let mut frame = CircuitFrame::new(circuit, state.n());
    frame
        .claim("control", &[control])?
        .claim("reg1", reg1)?
        .claim_zeroed("reg2", reg2)?
        .claim_zeroed("lt_modulus", &[add.lt_modulus])?
        .claim_zeroed("lt_complement", &[add.lt_complement])?
        .claim_zeroed("scratch", &[add.scratch])?
        .claim_zeroed("combined_control", &[ancillas.combined_control])?;
    Ok(frame)
}

/// `y` and `inverse` must be reduced below `modulus` and inverse to each other.
#[allow(clippy::too_many_arguments)]
fn mult_mod_unchecked<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    reg1: &[Qubit],
    reg2: &[Qubit],
    ancillas: MulModAncillas,
    y: u64,
    inverse: u64,
    modulus: u64,
) -> CircuitResult<()> {
    accumulate_product(state, control, reg1, reg2, ancillas, y, modulus)?;
    reg1.iter()
        .zip(reg2.iter())
        .try_for_each(|(a, b)| state.apply(&Gate::cswap(control, *a, *b)))?;
    // reg2 holds x and reg1 holds xy: adding -y^(-1) xy clears reg2.
    let negated_inverse = (modulus - inverse) % modulus;
    accumulate_product(state, control, reg1, reg2, ancillas, negated_inverse, modulus)
}

/// `dst += src * y mod N`, one controlled modular addition per qubit of `src`.
fn accumulate_product<P: Precision>(
    state: &mut QuantumState<P>,
    control: Qubit,
    src: &[Qubit],
    dst: &[Qubit],
    ancillas: MulModAncillas,
    y: u64,
    modulus: u64,
) -> CircuitResult<()> {
    let combined = ancillas.combined_control;
    let m = u128::from(modulus);
    let mut summand = u128::from(y) % m;
    for q in src {
        state.apply(&Gate::toffoli(control, *q, combined))?;
        add_mod_unchecked(state, combined, dst, ancillas.add, summand as u64, modulus)?;
        state.apply(&Gate::toffoli(control, *q, combined))?;
        summand = (summand << 1) % m;
    }
    Ok(())
}
