//! Shared machinery for the adaptive tiers of every predicate.

use crate::expansion::Expansion;
use std::fmt;

/// Precision level a predicate escalates to once its floating-point filter
/// cannot prove the sign. These are the levels reported in `trace!` events
/// under the `tracing` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Leading products kept exactly, summed once and estimated.
    Coarse,
    /// First-order correction from the rounding tails of the differences.
    TailCorrected,
    /// Full expansion arithmetic; always decides the sign.
    Exact,
}

impl Tier {
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Coarse => "coarse",
            Tier::TailCorrected => "tail-corrected",
            Tier::Exact => "exact",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True when `det` is far enough from zero for `bound` to certify its sign.
///
/// `bound` is an error-bound constant from [`bounds`](crate::bounds) times the
/// permanent of the determinant, so a hand-written predicate can reuse the
/// same filter test.
#[inline(always)]
pub fn settles(det: f64, bound: f64) -> bool {
    det >= bound || -det >= bound
}

/// Records that `predicate` could not settle and is moving on to `tier`.
#[inline(always)]
pub(crate) fn escalate(predicate: &'static str, tier: Tier) {
    #[cfg(feature = "tracing")]
    tracing::trace!(predicate, tier = tier.name(), "escalating");
    #[cfg(not(feature = "tracing"))]
    let _ = (predicate, tier);
    #[cfg(test)]
    if tier == Tier::Exact {
        EXACT_ESCALATIONS.with(|count| count.set(count.get() + 1));
    }
}

#[cfg(test)]
thread_local! {
    static EXACT_ESCALATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of times this thread has escalated to [`Tier::Exact`].
#[cfg(test)]
pub(crate) fn exact_escalations() -> usize {
    EXACT_ESCALATIONS.with(|count| count.get())
}

/// Running expansion sum over two owned buffers.
///
/// Each `add` merges the current value with a new term into the idle buffer
/// and then flips which buffer is current. The caller sizes `N` for the worst
/// case of everything it will add.
pub(crate) struct Accumulator<const N: usize> {
    buffers: [Expansion<N>; 2],
    current: usize,
}

impl<const N: usize> Accumulator<N> {
    pub(crate) fn new<const M: usize>(initial: &Expansion<M>) -> Self {
        const { assert!(M <= N, "initial value exceeds accumulator capacity") };
        let mut first = Expansion::zero();
        first.assign_slice(initial.components());
        Self {
            buffers: [first, Expansion::zero()],
            current: 0,
        }
    }

    pub(crate) fn add(&mut self, term: &[f64]) {
        let [first, second] = &mut self.buffers;
        let (now, other) = if self.current == 0 {
            (first, second)
        } else {
            (second, first)
        };
        debug_assert!(
            now.len() + term.len() <= N,
            "accumulator overflow: {} + {} > {}",
            now.len(),
            term.len(),
            N
        );
        other.assign_sum(now.components(), term);
        self.current ^= 1;
    }

    #[cfg(test)]
    pub(crate) fn value(&self) -> &Expansion<N> {
        &self.buffers[self.current]
    }

    pub(crate) fn most_significant(&self) -> f64 {
        self.buffers[self.current].most_significant()
    }
}
