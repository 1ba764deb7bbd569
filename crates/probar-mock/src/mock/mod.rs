//! Mock Objects for Call-Order Testing
//!
//! A small stub engine: setups pair an argument matcher with a canned
//! response, and may carry a [`Condition`](crate::Condition) that gates
//! when they are allowed to answer. Sequences attach through that gate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use probar_mock::prelude::*;
//!
//! let a: Mock<i32, i32> = Mock::strict("a");
//! let b: Mock<i32, i32> = Mock::strict("b");
//! let seq = MockSequence::new();
//! a.in_sequence(&seq).setup_eq(100).returns(101);
//! b.in_sequence(&seq).setup_eq(200).returns(201);
//!
//! assert!(b.call(200).is_err()); // a must go first
//! assert_eq!(a.call(100)?, 101);
//! assert_eq!(b.call(200)?, 201);
//! ```

pub mod setup;
#[cfg(feature = "proptest")]
pub mod strategies;
pub mod stub;

pub use setup::{ConditionalSetup, SetupBuilder, SetupId};
#[cfg(feature = "proptest")]
pub use strategies::{any_trace, cyclic_trace, sequence_length, shuffled_trace};
pub use stub::{Invocation, Mock};
