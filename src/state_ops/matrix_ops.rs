//! Slice-level gate kernels. Each kernel reads `input` and writes every entry of `output`, so a
//! gate costs one pass over the 2^n amplitudes and no operator matrix larger than 2x2 is ever
//! built.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::types::{Precision, Qubit};
use crate::utils::qubit_mask;
use crate::{iter_mut, Complex};
use num_traits::{One, Zero};

/// A row-major 2x2 complex matrix `[m00, m01, m10, m11]`.
pub type Matrix2<P> = [Complex<P>; 4];

/// Apply `mat` to qubit `target` on every basis row whose `control_mask` bits are all set; other
/// rows are copied unchanged.
///
/// # Example
/// ```
/// use qarith::state_ops::matrix_ops::{apply_single, from_reals};
///
/// // X on qubit 2 of |01>
/// let v = from_reals(&[0.0, 1.0, 1.0, 0.0]);
/// let x = [v[0], v[1], v[2], v[3]];
/// let input = from_reals(&[0.0, 1.0, 0.0, 0.0]);
/// let mut output = input.clone();
/// apply_single(2, 0, &x, &input, &mut output);
/// assert_eq!(output, from_reals(&[0.0, 0.0, 0.0, 1.0]));
/// ```
pub fn apply_single<P: Precision>(
    target: Qubit,
    control_mask: usize,
    mat: &Matrix2<P>,
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let t = qubit_mask(target);
    let row_fn = |(row, out): (usize, &mut Complex<P>)| {
        if row & control_mask != control_mask {
            *out = input[row];
        } else {
            // Row 0 or row 1 of the 2x2 matrix, depending on the target bit.
            let r = if row & t == 0 { 0 } else { 2 };
            *out = mat[r] * input[row & !t] + mat[r + 1] * input[row | t];
        }
    };
    iter_mut!(output).enumerate().for_each(row_fn);
}

/// Exchange amplitudes whose indices differ only in the bits of qubits `a` and `b`, restricted to
/// rows whose `control_mask` bits are all set.
pub fn apply_swap<P: Precision>(
    a: Qubit,
    b: Qubit,
    control_mask: usize,
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let ma = qubit_mask(a);
    let mb = qubit_mask(b);
    let row_fn = |(row, out): (usize, &mut Complex<P>)| {
        let differ = ((row & ma) == 0) != ((row & mb) == 0);
        if differ && row & control_mask == control_mask {
            *out = input[row ^ (ma | mb)];
        } else {
            *out = input[row];
        }
    };
    iter_mut!(output).enumerate().for_each(row_fn);
}

/// Conjugate transpose of a 2x2 matrix.
pub fn dagger<P: Precision>(mat: &Matrix2<P>) -> Matrix2<P> {
    [
        mat[0].conj(),
        mat[2].conj(),
        mat[1].conj(),
        mat[3].conj(),
    ]
}

/// Product `a * b` of two 2x2 matrices.
pub fn mat_mul<P: Precision>(a: &Matrix2<P>, b: &Matrix2<P>) -> Matrix2<P> {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
    ]
}

/// Checks `mat * mat^dagger == 1` within `tolerance`.
pub fn is_unitary<P: Precision>(mat: &Matrix2<P>, tolerance: f64) -> bool {
    let prod = mat_mul(mat, &dagger(mat));
    let identity = [
        Complex::<P>::one(),
        Complex::zero(),
        Complex::zero(),
        Complex::one(),
    ];
    prod.iter()
        .zip(identity.iter())
        .all(|(a, b)| (*a - *b).norm().as_f64() <= tolerance)
}

/// Make a vector of complex numbers whose reals are given by `data`
pub fn from_reals<P: Precision>(data: &[P]) -> Vec<Complex<P>> {
    data.iter()
        .map(|x| Complex::<P> {
            re: *x,
            im: P::zero(),
        })
        .collect()
}

/// Make a vector of complex numbers whose reals are given by the first tuple entry in `data` and
/// whose imaginaries are from the second.
pub fn from_tuples<P: Precision>(data: &[(P, P)]) -> Vec<Complex<P>> {
    data.iter()
        .map(|(r, i)| Complex::<P> { re: *r, im: *i })
        .collect()
}
