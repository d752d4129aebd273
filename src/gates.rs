use crate::config::DEFAULT_TOLERANCE;
use crate::errors::{CircuitError, CircuitResult};
use crate::qfft::qft_gates;
use crate::state::QuantumState;
use crate::state_ops::matrix_ops::{dagger, is_unitary, Matrix2};
use crate::types::{Precision, Qubit};
use crate::Complex;
use num_rational::Rational64;
use num_traits::{One, ToPrimitive, Zero};
use smallvec::SmallVec;
use std::ops::Neg;

/// Control qubits of a gate. Most gates in the arithmetic circuits carry at most three.
pub type Controls = SmallVec<[Qubit; 4]>;

/// Represents phase angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation<P: Precision> {
    /// A rotation represented by a floating point precision, in radians.
    Floating(P),
    /// A rotation represented by a fixed ratio times pi.
    PiRational(Rational64),
}

impl<P: Precision> Rotation<P> {
    /// The angle in radians.
    pub fn radians(&self) -> P {
        match self {
            Rotation::Floating(p) => *p,
            Rotation::PiRational(r) => {
                let r = r.numer().to_f64().unwrap_or_default() / r.denom().to_f64().unwrap_or(1.0);
                P::from_f64(r * std::f64::consts::PI)
            }
        }
    }
}

impl<P: Precision> Neg for Rotation<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Rotation::Floating(f) => Self::Floating(-f),
            Rotation::PiRational(r) => Self::PiRational(-r),
        }
    }
}

/// The name of a single qubit gate, kept next to its matrix so exporters and circuit drawers do
/// not need to recognise matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateLabel<P: Precision> {
    /// A pauli X gate.
    X,
    /// A pauli Y gate.
    Y,
    /// A pauli Z gate.
    Z,
    /// A hadamard gate.
    H,
    /// A phase gate by pi/2.
    S,
    /// A phase gate by pi/4.
    T,
    /// `diag(1, e^{i theta})`.
    Phase(Rotation<P>),
    /// `diag(e^{-i theta/2}, e^{i theta/2})`.
    Rz(Rotation<P>),
    /// A user supplied unitary.
    Matrix,
}

/// A quantum gate. Gates are immutable values; applying one to a `QuantumState` transforms the
/// state in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate<P: Precision> {
    /// A 2x2 unitary acting on `target`.
    SingleQubit {
        /// Target qubit.
        target: Qubit,
        /// Row-major matrix.
        matrix: Matrix2<P>,
        /// Name of the matrix.
        label: GateLabel<P>,
    },
    /// `inner` applied only on basis states where every control is |1>.
    Controlled {
        /// Control qubits.
        controls: Controls,
        /// The controlled gate, never itself `Controlled`.
        inner: Box<Gate<P>>,
    },
    /// Exchange of two qubits.
    Swap(Qubit, Qubit),
    /// Fourier transform of the little-endian integer held in `qubits`.
    Qft {
        /// Register, least significant qubit first.
        qubits: Vec<Qubit>,
        /// Apply the inverse transform.
        inverse: bool,
    },
}

fn label_matrix<P: Precision>(label: &GateLabel<P>) -> Matrix2<P> {
    let l = Complex::<P>::one();
    let o = Complex::<P>::zero();
    let i = Complex::<P>::i();
    match label {
        GateLabel::X => [o, l, l, o],
        GateLabel::Y => [o, -i, i, o],
        GateLabel::Z => [l, o, o, -l],
        GateLabel::H => {
            let h = l * P::FRAC_1_SQRT_2();
            [h, h, h, -h]
        }
        GateLabel::S => [l, o, o, i],
        GateLabel::T => [l, o, o, Complex::from_polar(P::one(), P::FRAC_PI_4())],
        GateLabel::Phase(r) => [l, o, o, Complex::from_polar(P::one(), r.radians())],
        GateLabel::Rz(r) => {
            let half = r.radians() / P::from_f64(2.0);
            [
                Complex::from_polar(P::one(), -half),
                o,
                o,
                Complex::from_polar(P::one(), half),
            ]
        }
        // Only reachable through `Gate::matrix`, which stores its own data.
        GateLabel::Matrix => [l, o, o, l],
    }
}

impl<P: Precision> Gate<P> {
    fn named(target: Qubit, label: GateLabel<P>) -> Self {
        Gate::SingleQubit {
            target,
            matrix: label_matrix(&label),
            label,
        }
    }

    /// Pauli X.
    pub fn x(target: Qubit) -> Self {
        Self::named(target, GateLabel::X)
    }

    /// Pauli Y.
    pub fn y(target: Qubit) -> Self {
        Self::named(target, GateLabel::Y)
    }

    /// Pauli Z.
    pub fn z(target: Qubit) -> Self {
        Self::named(target, GateLabel::Z)
    }

    /// Hadamard.
    pub fn h(target: Qubit) -> Self {
        Self::named(target, GateLabel::H)
    }

    /// Phase by pi/2.
    pub fn s(target: Qubit) -> Self {
        Self::named(target, GateLabel::S)
    }

    /// Phase by pi/4.
    pub fn t(target: Qubit) -> Self {
        Self::named(target, GateLabel::T)
    }

    /// `diag(1, e^{i theta})`.
    pub fn phase(target: Qubit, theta: P) -> Self {
        Self::named(target, GateLabel::Phase(Rotation::Floating(theta)))
    }

    /// `diag(1, e^{i pi r})`, keeping the exact ratio for exporters.
    pub fn phase_pi(target: Qubit, r: Rational64) -> Self {
        Self::named(target, GateLabel::Phase(Rotation::PiRational(r)))
    }

    /// Rotation about Z by `theta`.
    pub fn rz(target: Qubit, theta: P) -> Self {
        Self::named(target, GateLabel::Rz(Rotation::Floating(theta)))
    }

    /// An arbitrary single qubit unitary given as 4 row-major entries.
    pub fn matrix(target: Qubit, data: Vec<Complex<P>>) -> CircuitResult<Self> {
        let matrix: Matrix2<P> = data.try_into().map_err(|data: Vec<Complex<P>>| {
            CircuitError::gate(format!(
                "Matrix data has {} entries versus expected 4",
                data.len()
            ))
        })?;
        if !is_unitary(&matrix, DEFAULT_TOLERANCE) {
            return Err(CircuitError::gate(format!(
                "Matrix {:?} is not unitary",
                matrix
            )));
        }
        Ok(Gate::SingleQubit {
            target,
            matrix,
            label: GateLabel::Matrix,
        })
    }

    /// Wrap `inner` with additional `controls`. Nested controls are flattened so the result is
    /// at most one `Controlled` layer deep.
    pub fn controlled<It>(controls: It, inner: Gate<P>) -> Self
    where
        It: IntoIterator<Item = Qubit>,
    {
        let mut controls: Controls = controls.into_iter().collect();
        match inner {
            Gate::Controlled {
                controls: inner_controls,
                inner,
            } => {
                controls.extend(inner_controls);
                Gate::Controlled { controls, inner }
            }
            inner if controls.is_empty() => inner,
            inner => Gate::Controlled {
                controls,
                inner: Box::new(inner),
            },
        }
    }

    /// Controlled not, `control` flips `target`.
    pub fn cnot(control: Qubit, target: Qubit) -> Self {
        Self::controlled([control], Self::x(target))
    }

    /// Doubly controlled not.
    pub fn toffoli(c1: Qubit, c2: Qubit, target: Qubit) -> Self {
        Self::controlled([c1, c2], Self::x(target))
    }

    /// Not on `target` controlled by every qubit of `controls`.
    pub fn mcx(controls: &[Qubit], target: Qubit) -> Self {
        Self::controlled(controls.iter().cloned(), Self::x(target))
    }

    /// Controlled phase by `theta`.
    pub fn cphase(control: Qubit, target: Qubit, theta: P) -> Self {
        Self::controlled([control], Self::phase(target, theta))
    }

    /// Controlled phase by `pi * r`. The gate is symmetric in its two qubits.
    pub fn cphase_pi(control: Qubit, target: Qubit, r: Rational64) -> Self {
        Self::controlled([control], Self::phase_pi(target, r))
    }

    /// Swap two qubits.
    pub fn swap(a: Qubit, b: Qubit) -> Self {
        Gate::Swap(a, b)
    }

    /// Fredkin gate.
    pub fn cswap(control: Qubit, a: Qubit, b: Qubit) -> Self {
        Self::controlled([control], Gate::Swap(a, b))
    }

    /// Forward Fourier transform over `qubits` (least significant first).
    pub fn qft(qubits: &[Qubit]) -> Self {
        Gate::Qft {
            qubits: qubits.to_vec(),
            inverse: false,
        }
    }

    /// Inverse Fourier transform over `qubits` (least significant first).
    pub fn inverse_qft(qubits: &[Qubit]) -> Self {
        Gate::Qft {
            qubits: qubits.to_vec(),
            inverse: true,
        }
    }

    /// Every qubit the gate touches, controls first.
    pub fn qubits(&self) -> Vec<Qubit> {
        match self {
            Gate::SingleQubit { target, .. } => vec![*target],
            Gate::Controlled { controls, inner } => {
                let mut qs = controls.to_vec();
                qs.extend(inner.qubits());
                qs
            }
            Gate::Swap(a, b) => vec![*a, *b],
            Gate::Qft { qubits, .. } => qubits.clone(),
        }
    }

    /// Short lowercase mnemonic, for drawing and export.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::SingleQubit { label, .. } => match label {
                GateLabel::X => "x",
                GateLabel::Y => "y",
                GateLabel::Z => "z",
                GateLabel::H => "h",
                GateLabel::S => "s",
                GateLabel::T => "t",
                GateLabel::Phase(_) => "p",
                GateLabel::Rz(_) => "rz",
                GateLabel::Matrix => "u",
            },
            Gate::Controlled { inner, .. } => inner.name(),
            Gate::Swap(..) => "swap",
            Gate::Qft { inverse: false, .. } => "qft",
            Gate::Qft { inverse: true, .. } => "iqft",
        }
    }

    /// The conjugate transpose of this gate.
    pub fn inverse(&self) -> Self {
        match self {
            Gate::SingleQubit {
                target,
                matrix,
                label,
            } => {
                let label = match label {
                    GateLabel::X | GateLabel::Y | GateLabel::Z | GateLabel::H => *label,
                    GateLabel::S => GateLabel::Phase(Rotation::PiRational(Rational64::new(-1, 2))),
                    GateLabel::T => GateLabel::Phase(Rotation::PiRational(Rational64::new(-1, 4))),
                    GateLabel::Phase(r) => GateLabel::Phase(-*r),
                    GateLabel::Rz(r) => GateLabel::Rz(-*r),
                    GateLabel::Matrix => GateLabel::Matrix,
                };
                Gate::SingleQubit {
                    target: *target,
                    matrix: dagger(matrix),
                    label,
                }
            }
            Gate::Controlled { controls, inner } => Gate::Controlled {
                controls: controls.clone(),
                inner: Box::new(inner.inverse()),
            },
            Gate::Swap(a, b) => Gate::Swap(*a, *b),
            Gate::Qft { qubits, inverse } => Gate::Qft {
                qubits: qubits.clone(),
                inverse: !inverse,
            },
        }
    }

    /// Check every operand lies in `[1, n]` and no qubit is used twice.
    pub fn validate(&self, n: usize) -> CircuitResult<()> {
        if self.has_empty_qft() {
            return Err(CircuitError::EmptyRegister("qft"));
        }
        let mut qubits = self.qubits();
        if let Some(index) = qubits.iter().cloned().find(|q| *q == 0 || *q > n) {
            return Err(CircuitError::InvalidQubitIndex { index, n });
        }
        qubits.sort_unstable();
        match qubits.windows(2).find(|w| w[0] == w[1]) {
            Some(w) => Err(CircuitError::gate(format!(
                "{} gate uses qubit {} more than once",
                self.name(),
                w[0]
            ))),
            None => Ok(()),
        }
    }

    fn has_empty_qft(&self) -> bool {
        match self {
            Gate::Qft { qubits, .. } => qubits.is_empty(),
            Gate::Controlled { inner, .. } => inner.has_empty_qft(),
            _ => false,
        }
    }

    /// Check user supplied matrices are unitary within `tolerance`. Named gates are exact.
    pub(crate) fn check_unitary(&self, tolerance: f64) -> CircuitResult<()> {
        match self {
            Gate::SingleQubit {
                matrix,
                label: GateLabel::Matrix,
                ..
            } if !is_unitary(matrix, tolerance) => Err(CircuitError::gate(format!(
                "Matrix {:?} is not unitary within {}",
                matrix, tolerance
            ))),
            Gate::Controlled { inner, .. } => inner.check_unitary(tolerance),
            _ => Ok(()),
        }
    }

    /// Apply this gate to `state`. Shorthand for `state.apply(self)`.
    pub fn apply(&self, state: &mut QuantumState<P>) -> CircuitResult<()> {
        state.apply(self)
    }

    /// Run the gate under the additional `controls` without validation. Fourier transforms are
    /// expanded here, so every one of their elementary gates picks up `controls` individually.
    pub(crate) fn execute(&self, state: &mut QuantumState<P>, controls: &mut Controls) {
        match self {
            Gate::SingleQubit { target, matrix, .. } => {
                state.transform_single(*target, controls, matrix);
                state.record_gate(|| Gate::controlled(controls.iter().cloned(), self.clone()));
            }
            Gate::Swap(a, b) => {
                state.transform_swap(*a, *b, controls);
                state.record_gate(|| Gate::controlled(controls.iter().cloned(), self.clone()));
            }
            Gate::Controlled {
                controls: extra,
                inner,
            } => {
                let before = controls.len();
                controls.extend(extra.iter().cloned());
                inner.execute(state, controls);
                controls.truncate(before);
            }
            Gate::Qft { qubits, inverse } => qft_gates::<P>(qubits, *inverse)
                .iter()
                .for_each(|g| g.execute(state, controls)),
        }
    }
}
