//! Probar Mock: Call-Order Expectations Across Mocks
//!
//! Register expected calls, possibly on different mocks, against one or
//! more [`MockSequence`]s and assert they happen in that relative order,
//! optionally repeating.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │   ┌──────────────┐   register   ┌──────────────────────┐     │
//! │   │ MockSequence │◄─────────────│ SequencePart / Gate  │     │
//! │   │ cursor,length│   is_ready   │ (position, sequence) │     │
//! │   │ cyclic       │◄─────────────│                      │     │
//! │   └──────────────┘   advance    └──────────┬───────────┘     │
//! │                                            │ Condition       │
//! │                                            ▼                 │
//! │   ┌──────────────┐   call(args) ┌──────────────────────┐     │
//! │   │ code under   │─────────────►│ Mock: setups scanned │     │
//! │   │ test         │◄─────────────│ latest-first         │     │
//! │   └──────────────┘   response   └──────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use probar_mock::prelude::*;
//!
//! # fn main() -> MockResult<()> {
//! let a: Mock<i32, i32> = Mock::strict("a");
//! let b: Mock<i32, i32> = Mock::strict("b");
//! let c: Mock<i32, i32> = Mock::strict("c");
//! let (s1, s2, s3) = (MockSequence::new(), MockSequence::new(), MockSequence::new());
//!
//! a.in_sequences(&[&s1, &s2])?.setup_eq(100).returns(101);
//! b.in_sequences(&[&s2, &s3])?.setup_eq(200).returns(201);
//! c.in_sequences(&[&s1, &s3])?.setup_eq(300).returns(301);
//!
//! assert_eq!(a.call(100)?, 101);
//! assert!(c.call(300).is_err()); // b has not run yet
//! assert_eq!(b.call(200)?, 201);
//! assert_eq!(c.call(300)?, 301);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Guards and gates attached to setups
pub mod condition;

/// Mock configuration
pub mod config;

/// Stub engine: mocks, setups, and call matching
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod mock;

/// Attaching setups to sequences
pub mod registration;

mod result;

/// Ordering tracks
pub mod sequence;

pub use condition::{Condition, Gate, SequenceGate, SequencePart};
pub use config::{MockBehavior, MockConfig, DEFAULT_MAX_RECORDED_INVOCATIONS};
pub use mock::{ConditionalSetup, Invocation, Mock, SetupBuilder, SetupId};
pub use registration::{validate_sequences, Conditional, InSequence};
pub use result::{MockError, MockResult};
pub use sequence::{MockSequence, SequenceSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::condition::*;
    pub use super::config::*;
    pub use super::mock::{ConditionalSetup, Invocation, Mock, SetupBuilder, SetupId};
    pub use super::registration::*;
    pub use super::result::*;
    pub use super::sequence::*;
}
