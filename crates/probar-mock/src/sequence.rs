//! Mock Sequences
//!
//! A [`MockSequence`] is an ordering track shared by every expectation
//! registered on it. Each registration receives the next position
//! (0, 1, 2, ... in registration order); the sequence's cursor names the
//! position allowed to match next.
//!
//! ```rust,ignore
//! let seq = MockSequence::new();
//! a.in_sequence(&seq).setup_eq(100).returns(101);
//! b.in_sequence(&seq).setup_eq(200).returns(201);
//!
//! a.call(100)?; // position 0
//! b.call(200)?; // position 1
//! ```
//!
//! Setting [`MockSequence::set_cyclic`] lets the cursor wrap back to
//! position 0 after the last step, so the whole trace may repeat.

use crate::result::{MockError, MockResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SEQUENCE_ID: AtomicUsize = AtomicUsize::new(1);

/// Serializable copy of a sequence's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSnapshot {
    /// Sequence name
    pub name: String,
    /// Position allowed to match next
    pub cursor: usize,
    /// Number of registered steps
    pub length: usize,
    /// Whether the cursor wraps after the last step
    pub cyclic: bool,
}

impl fmt::Display for SequenceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}/{}", self.name, self.cursor, self.length)?;
        if self.cyclic {
            write!(f, " (cyclic)")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct SequenceState {
    name: String,
    cursor: usize,
    length: usize,
    cyclic: bool,
}

/// Ordering track for expectations spread across one or more mocks
///
/// Cloning yields another handle to the same track.
#[derive(Clone)]
pub struct MockSequence {
    state: Rc<RefCell<SequenceState>>,
}

impl Default for MockSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockSequence")
            .field("name", &state.name)
            .field("cursor", &state.cursor)
            .field("length", &state.length)
            .field("cyclic", &state.cyclic)
            .finish()
    }
}

impl MockSequence {
    /// Create an empty, non-cyclic sequence with a generated name
    #[must_use]
    pub fn new() -> Self {
        let id = NEXT_SEQUENCE_ID.fetch_add(1, Ordering::Relaxed);
        Self::named(format!("sequence-{id}"))
    }

    /// Create an empty, non-cyclic sequence
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SequenceState {
                name: name.into(),
                cursor: 0,
                length: 0,
                cyclic: false,
            })),
        }
    }

    /// Create an empty sequence that repeats once every step has run
    #[must_use]
    pub fn cyclic() -> Self {
        Self::new().with_cyclic(true)
    }

    /// Set the cyclic flag (builder form)
    #[must_use]
    pub fn with_cyclic(self, cyclic: bool) -> Self {
        self.set_cyclic(cyclic);
        self
    }

    /// Set the cyclic flag
    ///
    /// Turning it on for a sequence whose steps have all run rewinds the
    /// cursor to the first step.
    pub fn set_cyclic(&self, cyclic: bool) {
        let mut state = self.state.borrow_mut();
        state.cyclic = cyclic;
        if cyclic && state.length > 0 {
            state.cursor %= state.length;
        }
    }

    /// Check whether the cursor wraps after the last step
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.state.borrow().cyclic
    }

    /// Sequence name
    #[must_use]
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Position allowed to match next
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.state.borrow().cursor
    }

    /// Number of registered steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().length
    }

    /// Check if no step has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register one more step and return its position
    pub fn register(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let position = state.length;
        state.length += 1;
        tracing::debug!(sequence = %state.name, position, "registered sequence step");
        position
    }

    /// Check whether `position` is the step allowed to match now
    #[must_use]
    pub fn is_ready(&self, position: usize) -> bool {
        self.state.borrow().cursor == position
    }

    /// Check that [`advance`](Self::advance) would succeed, without
    /// touching the cursor
    pub fn check_advance(&self) -> MockResult<()> {
        self.check_advance_by(1)
    }

    /// Check that `steps` consecutive advances would all succeed
    pub fn check_advance_by(&self, steps: usize) -> MockResult<()> {
        let state = self.state.borrow();
        if state.length == 0 {
            return Err(MockError::EmptySequence {
                sequence: state.name.clone(),
            });
        }
        if !state.cyclic && state.cursor.saturating_add(steps) > state.length {
            return Err(MockError::SequenceExhausted {
                sequence: state.name.clone(),
                length: state.length,
            });
        }
        Ok(())
    }

    /// Move the cursor to the next step, wrapping when cyclic
    pub fn advance(&self) -> MockResult<()> {
        self.check_advance()?;
        let mut state = self.state.borrow_mut();
        state.cursor += 1;
        if state.cyclic {
            state.cursor %= state.length;
        }
        tracing::trace!(sequence = %state.name, cursor = state.cursor, "sequence advanced");
        Ok(())
    }

    /// Steps still expected before a non-cyclic sequence is done
    ///
    /// Cyclic sequences report the steps left in the current round.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let state = self.state.borrow();
        state.length.saturating_sub(state.cursor)
    }

    /// Check whether every step has run
    ///
    /// A cyclic sequence is complete whenever it sits at the start of a
    /// round.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let state = self.state.borrow();
        if state.cyclic {
            state.cursor == 0
        } else {
            state.cursor == state.length
        }
    }

    /// Fail if steps are still pending
    pub fn verify_complete(&self) -> MockResult<()> {
        if self.is_complete() {
            return Ok(());
        }
        let state = self.state.borrow();
        Err(MockError::SequenceIncomplete {
            sequence: state.name.clone(),
            cursor: state.cursor,
            length: state.length,
        })
    }

    /// Rewind the cursor to the first step, keeping registrations
    pub fn reset(&self) {
        self.state.borrow_mut().cursor = 0;
    }

    /// Copy the current state
    #[must_use]
    pub fn snapshot(&self) -> SequenceSnapshot {
        let state = self.state.borrow();
        SequenceSnapshot {
            name: state.name.clone(),
            cursor: state.cursor,
            length: state.length,
            cyclic: state.cyclic,
        }
    }

    /// Check whether both handles point at the same track
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
