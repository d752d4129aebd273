/// Slice-level gate kernels.
pub mod matrix_ops;
/// Slice-level measurement probabilities and collapse.
pub mod measurement_ops;
