//! Setup Conditions
//!
//! A [`Condition`] is what gets attached to a setup: a pure readiness
//! check plus an action run once the setup is chosen to answer a call.
//! Sequence ordering is expressed through the [`Gate`] trait:
//!
//! - [`SequencePart`] ties one registered position to one sequence.
//! - [`SequenceGate`] joins several parts. It opens only when every
//!   part is ready, and firing it advances every sequence exactly once.

use crate::result::MockResult;
use crate::sequence::MockSequence;
use std::fmt;

/// A readiness check paired with the state change it guards
pub trait Gate {
    /// Check whether the guarded setup may match now (no side effects)
    fn is_ready(&self) -> bool;

    /// Check that [`advance`](Gate::advance) would succeed
    fn check_advance(&self) -> MockResult<()> {
        Ok(())
    }

    /// Record that the guarded setup matched
    fn advance(&self) -> MockResult<()>;

    /// Human-readable state, used in mismatch reports
    fn describe(&self) -> String;
}

/// One position registered on one sequence
#[derive(Debug, Clone)]
pub struct SequencePart {
    position: usize,
    sequence: MockSequence,
}

impl SequencePart {
    /// Register a new step on `sequence`
    #[must_use]
    pub fn register(sequence: &MockSequence) -> Self {
        Self {
            position: sequence.register(),
            sequence: sequence.clone(),
        }
    }

    /// Position assigned at registration
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Sequence the position belongs to
    #[must_use]
    pub fn sequence(&self) -> &MockSequence {
        &self.sequence
    }
}

impl Gate for SequencePart {
    fn is_ready(&self) -> bool {
        self.sequence.is_ready(self.position)
    }

    fn check_advance(&self) -> MockResult<()> {
        self.sequence.check_advance()
    }

    fn advance(&self) -> MockResult<()> {
        self.sequence.advance()
    }

    fn describe(&self) -> String {
        format!(
            "{} at {}, expects {}",
            self.sequence.name(),
            self.sequence.cursor(),
            self.position
        )
    }
}

/// Rendezvous of several sequences for one setup
#[derive(Debug, Clone)]
pub struct SequenceGate {
    parts: Vec<SequencePart>,
}

impl SequenceGate {
    /// Build a gate from parts that are already registered
    #[must_use]
    pub fn new(parts: Vec<SequencePart>) -> Self {
        Self { parts }
    }

    /// Register one step on each sequence, in order
    ///
    /// Callers validate the list first; see
    /// [`InSequence::in_sequences`](crate::InSequence::in_sequences).
    #[must_use]
    pub fn register(sequences: &[&MockSequence]) -> Self {
        Self::new(sequences.iter().map(|s| SequencePart::register(s)).collect())
    }

    /// The registered parts, in registration order
    #[must_use]
    pub fn parts(&self) -> &[SequencePart] {
        &self.parts
    }
}

impl Gate for SequenceGate {
    fn is_ready(&self) -> bool {
        self.parts.iter().all(Gate::is_ready)
    }

    fn check_advance(&self) -> MockResult<()> {
        // A sequence listed more than once must have room for every entry.
        self.parts.iter().enumerate().try_for_each(|(i, part)| {
            let earlier = &self.parts[..i];
            if earlier.iter().any(|p| p.sequence.same_as(&part.sequence)) {
                return Ok(());
            }
            let steps = self.parts[i..]
                .iter()
                .filter(|p| p.sequence.same_as(&part.sequence))
                .count();
            part.sequence.check_advance_by(steps)
        })
    }

    fn advance(&self) -> MockResult<()> {
        // All parts are checked before any cursor moves.
        self.check_advance()?;
        self.parts.iter().try_for_each(Gate::advance)
    }

    fn describe(&self) -> String {
        self.parts
            .iter()
            .map(Gate::describe)
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

struct FnGate<G, S> {
    guard: G,
    success: S,
}

impl<G, S> Gate for FnGate<G, S>
where
    G: Fn() -> bool,
    S: Fn() -> MockResult<()>,
{
    fn is_ready(&self) -> bool {
        (self.guard)()
    }

    fn advance(&self) -> MockResult<()> {
        (self.success)()
    }

    fn describe(&self) -> String {
        format!("condition {}", if self.is_ready() { "open" } else { "closed" })
    }
}

/// Guard plus success action attached to a setup
pub struct Condition {
    gate: Box<dyn Gate>,
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("gate", &self.gate.describe())
            .finish()
    }
}

impl Condition {
    /// Build a condition from a guard closure and a success closure
    pub fn new<G, S>(guard: G, success: S) -> Self
    where
        G: Fn() -> bool + 'static,
        S: Fn() -> MockResult<()> + 'static,
    {
        Self::from_gate(FnGate { guard, success })
    }

    /// Build a condition from any gate
    pub fn from_gate(gate: impl Gate + 'static) -> Self {
        Self {
            gate: Box::new(gate),
        }
    }

    /// Check whether the guarded setup may match now
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let ready = self.gate.is_ready();
        tracing::trace!(ready, gate = %self.gate.describe(), "condition evaluated");
        ready
    }

    /// Run the success action
    pub fn fire(&self) -> MockResult<()> {
        self.gate.advance()
    }

    /// Describe the gate's current state
    #[must_use]
    pub fn describe(&self) -> String {
        self.gate.describe()
    }
}
