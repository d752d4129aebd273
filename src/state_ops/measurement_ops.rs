#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::types::{Precision, Qubit};
use crate::utils::{extract_bits, qubit_mask};
use crate::{chunks, iter_mut, Complex};

/// Rows per partial sum in `chunked_sum`.
pub const SUM_CHUNK: usize = 1 << 12;

/// Sum `f(row, amplitude)` over `input`. Each chunk of `SUM_CHUNK` rows is summed sequentially and
/// the partial sums are added in row order, so the rounding is the same with or without the
/// `parallel` feature.
pub fn chunked_sum<P, F>(input: &[Complex<P>], f: F) -> P
where
    P: Precision,
    F: Fn(usize, &Complex<P>) -> P + Sync + Send,
{
    let partials: Vec<P> = chunks!(input, SUM_CHUNK)
        .enumerate()
        .map(|(i, chunk)| {
            let offset = i * SUM_CHUNK;
            chunk
                .iter()
                .enumerate()
                .fold(P::zero(), |acc, (j, amp)| acc + f(offset + j, amp))
        })
        .collect();
    partials.into_iter().fold(P::zero(), |acc, p| acc + p)
}

/// Get total magnitude of state.
pub fn prob_magnitude<P: Precision>(input: &[Complex<P>]) -> P {
    chunked_sum(input, |_, amp| amp.norm_sqr())
}

/// Calculate the probability that qubit `q` reads `measured` (0 or 1) on state `input`.
///
/// # Examples
/// ```
/// use qarith::state_ops::matrix_ops::from_reals;
/// use qarith::state_ops::measurement_ops::measure_prob;
///
/// // Make the state |q2 q1> = |01>
/// let input = from_reals(&[0.0, 1.0, 0.0, 0.0]);
///
/// assert_eq!(measure_prob(1, 1, &input), 1.0);
/// assert_eq!(measure_prob(2, 1, &input), 0.0);
/// assert_eq!(measure_prob(2, 0, &input), 1.0);
/// ```
pub fn measure_prob<P: Precision>(q: Qubit, measured: u8, input: &[Complex<P>]) -> P {
    let mask = qubit_mask(q);
    let want = if measured == 0 { 0 } else { mask };
    chunked_sum(input, |row, amp| {
        if row & mask == want {
            amp.norm_sqr()
        } else {
            P::zero()
        }
    })
}

/// Get the probability of each integer value of `register` (little-endian) on `input`.
/// The result has `2^register.len()` entries.
pub fn register_probs<P: Precision>(register: &[Qubit], input: &[Complex<P>]) -> Vec<P> {
    let mut probs = vec![P::zero(); 1 << register.len()];
    input.iter().enumerate().for_each(|(row, amp)| {
        let p = amp.norm_sqr();
        if !p.is_zero() {
            probs[extract_bits(row, register)] += p;
        }
    });
    probs
}

/// Probability that every qubit in `qubits` is |0>.
pub fn all_zero_prob<P: Precision>(qubits: &[Qubit], input: &[Complex<P>]) -> P {
    let mask = crate::utils::qubits_mask(qubits);
    chunked_sum(input, |row, amp| {
        if row & mask == 0 {
            amp.norm_sqr()
        } else {
            P::zero()
        }
    })
}

/// Normalize the output state such that it matches only states which produce the `measured`
/// result on qubit `q`. This is done by zeroing out the states which cannot give `measured`, and
/// multiplying the remaining by `1/sqrt(p)` for `p = measured_prob`.
pub fn measure_state<P: Precision>(
    q: Qubit,
    measured: (u8, P),
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let (measured, measured_prob) = measured;
    let mask = qubit_mask(q);
    let want = if measured == 0 { 0 } else { mask };
    let p_mult = if measured_prob.is_zero() {
        P::zero()
    } else {
        P::one() / measured_prob.sqrt()
    };

    let f = |(row, output): (usize, &mut Complex<P>)| {
        if row & mask != want {
            // This is not a valid measurement, zero out the entry.
            *output = Complex::default();
        } else {
            *output = input[row] * p_mult;
        }
    };
    iter_mut!(output).enumerate().for_each(f);
}
