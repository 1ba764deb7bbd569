//! Result and error types for Probar Mock.

use thiserror::Error;

/// Result type for mock and sequence operations
pub type MockResult<T> = Result<T, MockError>;

/// Errors that can occur while configuring or invoking mocks
#[derive(Debug, Error)]
pub enum MockError {
    /// A sequence slot was empty at registration time
    #[error("sequences contains no sequence at position {index}")]
    MissingSequence {
        /// Position of the empty slot in the supplied list
        index: usize,
    },

    /// A joint registration was given no sequences at all
    #[error("sequence list is empty: an expectation must join at least one sequence")]
    EmptySequenceList,

    /// The same sequence appears twice in one joint registration
    #[error("sequences contains repeated entry at position {second} and {first}")]
    DuplicateSequence {
        /// Position of the first occurrence
        first: usize,
        /// Position of the repeated occurrence
        second: usize,
    },

    /// Advance requested on a sequence with no registered steps
    #[error("cannot advance sequence '{sequence}': no steps are registered")]
    EmptySequence {
        /// Sequence name
        sequence: String,
    },

    /// Advance requested on a non-cyclic sequence that already ran every step
    #[error("cannot advance sequence '{sequence}': all {length} steps already ran")]
    SequenceExhausted {
        /// Sequence name
        sequence: String,
        /// Registered step count
        length: usize,
    },

    /// Verification found steps that were never reached
    #[error("sequence '{sequence}' incomplete: stopped at step {cursor} of {length}")]
    SequenceIncomplete {
        /// Sequence name
        sequence: String,
        /// Current cursor
        cursor: usize,
        /// Registered step count
        length: usize,
    },

    /// No setup accepted the call (includes ordering violations)
    #[error("{mock}({args}): no setup matched the call{}", format_rejected(.rejected))]
    NoMatchingSetup {
        /// Mock name
        mock: String,
        /// Debug rendering of the call arguments
        args: String,
        /// Setups whose matcher accepted the call but whose gate was closed
        rejected: Vec<String>,
    },

    /// Verification found setups that were never hit
    #[error("{mock}: {} setup(s) never matched: {}", .setups.len(), .setups.join(", "))]
    UnmatchedSetups {
        /// Mock name
        mock: String,
        /// Descriptions of the unmatched setups
        setups: Vec<String>,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_rejected(rejected: &[String]) -> String {
    if rejected.is_empty() {
        String::new()
    } else {
        format!("; out of order: {}", rejected.join("; "))
    }
}

impl MockError {
    /// Whether this error was raised while configuring a test (as opposed
    /// to while the code under test was calling a mock)
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSequence { .. }
                | Self::EmptySequenceList
                | Self::DuplicateSequence { .. }
                | Self::EmptySequence { .. }
                | Self::Json(_)
        )
    }

    /// Whether this error reports a call that arrived out of order
    #[must_use]
    pub fn is_ordering_violation(&self) -> bool {
        matches!(self, Self::NoMatchingSetup { rejected, .. } if !rejected.is_empty())
    }
}
