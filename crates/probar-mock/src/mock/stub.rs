//! Mock Objects
//!
//! A [`Mock`] stands in for one callable: calls go through
//! [`Mock::call`], which picks the setup that answers them.
//!
//! ## Matching
//!
//! Setups are scanned latest-first. A setup is a candidate when its
//! matcher accepts the arguments and its condition (if any) is ready.
//! The first candidate fires its condition exactly once and then
//! answers. Scanning never changes any state, so a rejected call leaves
//! every sequence where it was.

use super::setup::{ConditionalSetup, Matcher, Responder, Setup, SetupBuilder, SetupId};
use crate::condition::Condition;
use crate::config::{MockBehavior, MockConfig};
use crate::registration::Conditional;
use crate::result::{MockError, MockResult};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::rc::Rc;

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Debug rendering of the arguments
    pub args: String,
    /// Setup that answered, if any
    pub setup: Option<SetupId>,
}

/// Mock of a callable taking `A` and returning `R`
///
/// Cloning yields another handle to the same setups and call log.
pub struct Mock<A, R> {
    config: MockConfig,
    fallback: Option<Responder<A, R>>,
    setups: Rc<RefCell<Vec<Setup<A, R>>>>,
    invocations: Rc<RefCell<VecDeque<Invocation>>>,
    calls: Rc<Cell<usize>>,
}

impl<A, R> Clone for Mock<A, R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            fallback: self.fallback.clone(),
            setups: Rc::clone(&self.setups),
            invocations: Rc::clone(&self.invocations),
            calls: Rc::clone(&self.calls),
        }
    }
}

impl<A, R> Debug for Mock<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("config", &self.config)
            .field("has_fallback", &self.fallback.is_some())
            .field("setups", &self.setups.borrow())
            .field("calls", &self.calls.get())
            .finish()
    }
}

impl<A, R> Mock<A, R> {
    /// Mock name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Mock configuration
    #[must_use]
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Number of registered setups
    #[must_use]
    pub fn setup_count(&self) -> usize {
        self.setups.borrow().len()
    }

    /// Number of times `id` answered a call
    #[must_use]
    pub fn hits(&self, id: SetupId) -> usize {
        self.setups
            .borrow()
            .get(id.index())
            .map_or(0, |setup| setup.hits.get())
    }

    /// Total calls made, answered or not
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    /// Recorded calls, oldest first
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().iter().cloned().collect()
    }

    /// Forget recorded calls and hit counts, keeping setups
    pub fn reset_invocations(&self) {
        self.invocations.borrow_mut().clear();
        self.calls.set(0);
        for setup in self.setups.borrow().iter() {
            setup.hits.set(0);
        }
    }

    /// Fail if any setup never answered a call
    pub fn verify_all(&self) -> MockResult<()> {
        let unmatched: Vec<String> = self
            .setups
            .borrow()
            .iter()
            .filter(|setup| setup.hits.get() == 0)
            .map(|setup| setup.description.clone())
            .collect();
        if unmatched.is_empty() {
            Ok(())
        } else {
            Err(MockError::UnmatchedSetups {
                mock: self.config.name.clone(),
                setups: unmatched,
            })
        }
    }

    fn record(&self, args: String, setup: Option<SetupId>) {
        if !self.config.record_invocations || self.config.max_recorded_invocations == 0 {
            return;
        }
        let mut invocations = self.invocations.borrow_mut();
        while invocations.len() >= self.config.max_recorded_invocations {
            invocations.pop_front();
        }
        invocations.push_back(Invocation { args, setup });
    }
}

impl<A: Debug + 'static, R: 'static> Mock<A, R> {
    /// Create a strict mock: unmatched calls are errors
    #[must_use]
    pub fn strict(name: impl Into<String>) -> Self {
        Self::with_config(MockConfig::new(name))
    }

    /// Create a loose mock: unmatched calls return `R::default()`
    #[must_use]
    pub fn loose(name: impl Into<String>) -> Self
    where
        R: Default,
    {
        Self::with_config(MockConfig::new(name).with_behavior(MockBehavior::Loose))
            .with_fallback(|_| R::default())
    }

    /// Create a mock from a configuration
    ///
    /// A loose configuration needs [`with_fallback`](Self::with_fallback)
    /// to answer unmatched calls; until one is set the mock fails them.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            fallback: None,
            setups: Rc::new(RefCell::new(Vec::new())),
            invocations: Rc::new(RefCell::new(VecDeque::new())),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Set the answer for unmatched calls of a loose mock
    #[must_use]
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&A) -> R + 'static,
    {
        self.fallback = Some(Rc::new(fallback));
        self
    }

    /// Start a setup for calls accepted by `matcher`
    pub fn setup<F>(&self, matcher: F) -> SetupBuilder<'_, A, R>
    where
        F: Fn(&A) -> bool + 'static,
    {
        let description = format!("{}(<matcher #{}>)", self.config.name, self.setup_count());
        SetupBuilder::new(self, Box::new(matcher), description)
    }

    /// Start a setup for calls whose arguments equal `expected`
    pub fn setup_eq(&self, expected: A) -> SetupBuilder<'_, A, R>
    where
        A: PartialEq,
    {
        let description = format!("{}({:?})", self.config.name, expected);
        SetupBuilder::new(self, Box::new(move |args| *args == expected), description)
    }

    pub(crate) fn add_setup(
        &self,
        description: String,
        matcher: Matcher<A>,
        condition: Option<Rc<Condition>>,
        responder: Responder<A, R>,
    ) -> SetupId {
        let mut setups = self.setups.borrow_mut();
        let id = SetupId(setups.len());
        tracing::debug!(
            mock = %self.config.name,
            setup = %description,
            guarded = condition.is_some(),
            "setup added"
        );
        setups.push(Setup {
            id,
            description,
            matcher,
            condition,
            responder,
            hits: Cell::new(0),
        });
        id
    }

    /// Invoke the mock
    ///
    /// Returns the answer of the latest setup whose matcher accepts
    /// `args` and whose condition is ready. Fails with
    /// [`MockError::NoMatchingSetup`] when there is none (unless a loose
    /// mock's fallback answers); the error lists the setups that matched
    /// the arguments but were gated out, which is how out-of-order calls
    /// show up.
    pub fn call(&self, args: A) -> MockResult<R> {
        self.calls.set(self.calls.get() + 1);
        let rendered = format!("{args:?}");

        // Select with the setups borrowed, answer with no borrows held.
        let (selected, rejected) = {
            let setups = self.setups.borrow();
            let mut rejected = Vec::new();
            let mut selected = None;
            for setup in setups.iter().rev() {
                if !(setup.matcher)(&args) {
                    continue;
                }
                if let Some(condition) = &setup.condition {
                    if !condition.is_ready() {
                        rejected.push(setup.describe());
                        continue;
                    }
                }
                selected = Some((
                    setup.id,
                    setup.condition.clone(),
                    Rc::clone(&setup.responder),
                ));
                break;
            }
            (selected, rejected)
        };

        if let Some((id, condition, responder)) = selected {
            if let Some(condition) = condition {
                if let Err(err) = condition.fire() {
                    tracing::debug!(
                        mock = %self.config.name,
                        args = %rendered,
                        error = %err,
                        "condition failed to fire"
                    );
                    self.record(rendered, None);
                    return Err(err);
                }
            }
            if let Some(setup) = self.setups.borrow().get(id.index()) {
                setup.hits.set(setup.hits.get() + 1);
            }
            tracing::trace!(mock = %self.config.name, args = %rendered, setup = id.index(), "call matched");
            self.record(rendered, Some(id));
            return Ok(responder(&args));
        }

        self.record(rendered.clone(), None);
        if self.config.behavior == MockBehavior::Loose {
            if let Some(fallback) = self.fallback.clone() {
                tracing::trace!(mock = %self.config.name, args = %rendered, "call answered by fallback");
                return Ok(fallback(&args));
            }
        }

        tracing::debug!(
            mock = %self.config.name,
            args = %rendered,
            gated = rejected.len(),
            "no setup matched"
        );
        Err(MockError::NoMatchingSetup {
            mock: self.config.name.clone(),
            args: rendered,
            rejected,
        })
    }
}

impl<A: Debug + 'static, R: 'static> Conditional for Mock<A, R> {
    type Setup<'a> = ConditionalSetup<'a, A, R> where Self: 'a;

    fn when(&self, condition: Condition) -> ConditionalSetup<'_, A, R> {
        ConditionalSetup::new(self, condition)
    }
}
