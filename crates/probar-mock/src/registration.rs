//! Sequence Registration
//!
//! [`Conditional`] is the attachment point a stub engine exposes: it takes a
//! [`Condition`] and hands back whatever builder the engine uses to finish
//! the setup. Anything implementing it gets the [`InSequence`] methods for
//! free.
//!
//! ```rust,ignore
//! let (s1, s2) = (MockSequence::new(), MockSequence::new());
//! a.in_sequences(&[&s1, &s2])?.setup_eq(100).returns(101);
//! ```

use crate::condition::{Condition, SequenceGate, SequencePart};
use crate::result::{MockError, MockResult};
use crate::sequence::MockSequence;

/// Attachment point for guarded setups
pub trait Conditional {
    /// Builder returned to continue configuring the guarded setup
    type Setup<'a>
    where
        Self: 'a;

    /// Guard the next setup with `condition`
    fn when(&self, condition: Condition) -> Self::Setup<'_>;
}

/// Ordering registration for any [`Conditional`] engine
pub trait InSequence: Conditional {
    /// Make the next setup the next step of `sequence`
    fn in_sequence(&self, sequence: &MockSequence) -> Self::Setup<'_> {
        self.when(Condition::from_gate(SequencePart::register(sequence)))
    }

    /// Single-sequence form for a sequence that may be absent
    fn try_in_sequence(&self, sequence: Option<&MockSequence>) -> MockResult<Self::Setup<'_>> {
        let sequence = sequence.ok_or(MockError::MissingSequence { index: 0 })?;
        Ok(self.in_sequence(sequence))
    }

    /// Make the next setup the next step of every sequence at once
    ///
    /// The setup matches only while it is next in all of them, and
    /// matching advances all of them. Fails without registering anything
    /// when the list is empty or names a sequence twice.
    fn in_sequences(&self, sequences: &[&MockSequence]) -> MockResult<Self::Setup<'_>> {
        validate_sequences(sequences.iter().copied().map(Some))?;
        Ok(self.when(Condition::from_gate(SequenceGate::register(sequences))))
    }

    /// Joint form for lists assembled at runtime
    ///
    /// An absent entry fails with its index before anything is registered.
    fn in_optional_sequences(
        &self,
        sequences: &[Option<&MockSequence>],
    ) -> MockResult<Self::Setup<'_>> {
        let sequences = validate_sequences(sequences.iter().copied())?;
        Ok(self.when(Condition::from_gate(SequenceGate::register(&sequences))))
    }
}

impl<T: Conditional + ?Sized> InSequence for T {}

/// Check a joint registration list, returning the present sequences
///
/// Rejects an empty list, an absent entry (by index), and a sequence named
/// twice (by both indices).
pub fn validate_sequences<'s, I>(sequences: I) -> MockResult<Vec<&'s MockSequence>>
where
    I: IntoIterator<Item = Option<&'s MockSequence>>,
{
    let mut checked: Vec<&MockSequence> = Vec::new();
    for (index, sequence) in sequences.into_iter().enumerate() {
        let sequence = sequence.ok_or(MockError::MissingSequence { index })?;
        if let Some(first) = checked.iter().position(|seen| seen.same_as(sequence)) {
            return Err(MockError::DuplicateSequence {
                first,
                second: index,
            });
        }
        checked.push(sequence);
    }
    if checked.is_empty() {
        return Err(MockError::EmptySequenceList);
    }
    Ok(checked)
}
