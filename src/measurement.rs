use crate::errors::CircuitResult;
use crate::state::QuantumState;
use crate::state_ops::measurement_ops::measure_prob;
use crate::types::{Precision, Qubit};
use rand::Rng;
use tracing::trace;

/// Outcome of measuring one qubit: the observed bit, the collapsed state, and the probability with
/// which that bit was observed.
#[derive(Debug, Clone)]
pub struct MeasurementResult<P: Precision> {
    /// Observed value, 0 or 1.
    pub outcome: u8,
    /// The state after collapse, renormalized.
    pub state: QuantumState<P>,
    /// Probability of `outcome` before collapse.
    pub probability: P,
}

/// Measure `qubit` of `state`, consuming it and returning the collapsed state.
///
/// ```
/// use qarith::prelude::*;
/// use qarith::rand::rngs::mock::StepRng;
///
/// # fn main() -> CircuitResult<()> {
/// let mut state = QuantumState::<f64>::new(2);
/// state.apply(&Gate::h(1))?;
/// // A source which always draws 0 forces the |1> branch whenever it is possible.
/// let mut rng = StepRng::new(0, 0);
/// let result = measure(state, 1, &mut rng)?;
/// assert_eq!(result.outcome, 1);
/// assert!((result.probability - 0.5).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn measure<P, R>(
    mut state: QuantumState<P>,
    qubit: Qubit,
    rng: &mut R,
) -> CircuitResult<MeasurementResult<P>>
where
    P: Precision,
    R: Rng + ?Sized,
{
    let (outcome, probability) = state.measure_qubit(qubit, rng)?;
    Ok(MeasurementResult {
        outcome,
        state,
        probability,
    })
}

/// Measure every qubit of `register` in order and assemble the little-endian value: the first
/// qubit gives bit 0. Returns the value and its joint probability.
pub fn measure_register<P, R>(
    state: &mut QuantumState<P>,
    register: &[Qubit],
    rng: &mut R,
) -> CircuitResult<(u64, P)>
where
    P: Precision,
    R: Rng + ?Sized,
{
    crate::state::check_qubits(state.n(), register)?;
    register
        .iter()
        .enumerate()
        .try_fold((0u64, P::one()), |(value, p), (i, q)| {
            let (bit, pb) = state.measure_qubit(*q, rng)?;
            Ok((value | (u64::from(bit) << i), p * pb))
        })
}

impl<P: Precision> QuantumState<P> {
    /// Measure qubit `q` in place, drawing the outcome from `rng`. Returns the observed bit and
    /// its probability.
    pub fn measure_qubit<R: Rng + ?Sized>(&mut self, q: Qubit, rng: &mut R) -> CircuitResult<(u8, P)> {
        self.check_qubit(q)?;
        let p1 = measure_prob(q, 1, self.amplitudes());
        let p1_f = p1.as_f64().clamp(0.0, 1.0);
        let outcome = u8::from(rng.gen_bool(p1_f));
        let p = if outcome == 1 { p1 } else { P::one() - p1 };
        trace!(qubit = q, outcome, probability = p.as_f64(), "measured");
        self.collapse(q, outcome, p);
        Ok((outcome, p))
    }
}
