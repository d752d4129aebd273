use crate::types::Qubit;

/// Mask selecting the basis-index bit of qubit `q` (1-based, qubit 1 is the lowest bit).
///
/// # Example
/// ```
/// use qarith::utils::qubit_mask;
///
/// assert_eq!(qubit_mask(1), 0b001);
/// assert_eq!(qubit_mask(3), 0b100);
/// ```
#[inline]
pub fn qubit_mask(q: Qubit) -> usize {
    1 << (q - 1)
}

/// Union of the masks of all `qubits`.
#[inline]
pub fn qubits_mask(qubits: &[Qubit]) -> usize {
    qubits.iter().fold(0, |acc, q| acc | qubit_mask(*q))
}

/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qarith::utils::get_bit;
/// assert!(get_bit(2, 1));
/// assert!(!get_bit(2, 0));
/// ```
#[inline]
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Set the `bit_index` bit in `num` to `value`.
///
/// # Example
/// ```
/// use qarith::utils::set_bit;
/// assert_eq!(set_bit(0, 1, true), 2);
/// assert_eq!(set_bit(3, 0, false), 2);
/// ```
#[inline]
pub fn set_bit(num: usize, bit_index: usize, value: bool) -> usize {
    let v = 1 << bit_index;
    if value {
        num | v
    } else {
        num & !v
    }
}

/// Read the little-endian integer held by `register` out of basis index `index`: the first
/// qubit of `register` gives bit 0 of the result.
///
/// # Example
///
/// ```
/// use qarith::utils::extract_bits;
///
/// // Qubits 4 and 1 hold 1 and 0 in basis index 0b1010.
/// assert_eq!(extract_bits(0b1010, &[4, 1]), 0b01);
/// assert_eq!(extract_bits(0b1010, &[2, 3, 4]), 0b101);
/// ```
#[inline]
pub fn extract_bits(index: usize, register: &[Qubit]) -> usize {
    register.iter().enumerate().fold(0, |acc, (i, q)| {
        let bit = (index >> (q - 1)) & 1;
        acc | (bit << i)
    })
}

/// Write the little-endian `value` into the bits of `register` within basis index `base`.
///
/// # Example
///
/// ```
/// use qarith::utils::deposit_bits;
///
/// assert_eq!(deposit_bits(0b0000, &[2, 4], 0b11), 0b1010);
/// assert_eq!(deposit_bits(0b1111, &[1, 2], 0b10), 0b1110);
/// ```
#[inline]
pub fn deposit_bits(base: usize, register: &[Qubit], value: usize) -> usize {
    register.iter().enumerate().fold(base, |acc, (i, q)| {
        set_bit(acc, q - 1, get_bit(value, i))
    })
}

/// Reverse the lowest `n` bits of `num`.
///
/// # Example
///
/// ```
/// use qarith::utils::flip_bits;
///
/// assert_eq!(flip_bits(3, 0b100), 0b001);
/// assert_eq!(flip_bits(4, 0b1010), 0b0101);
/// ```
#[inline]
pub fn flip_bits(n: usize, num: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let leading_zeros = usize::BITS as usize - n;
    num.reverse_bits() >> leading_zeros
}
