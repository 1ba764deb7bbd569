//! Setup entries and the builders that create them.

use super::stub::Mock;
use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::rc::Rc;

/// Handle to a setup registered on a [`Mock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SetupId(pub(crate) usize);

impl SetupId {
    /// Registration index of the setup within its mock
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

pub(crate) type Matcher<A> = Box<dyn Fn(&A) -> bool>;
pub(crate) type Responder<A, R> = Rc<dyn Fn(&A) -> R>;

/// A registered call pattern with its canned response
pub(crate) struct Setup<A, R> {
    pub(crate) id: SetupId,
    pub(crate) description: String,
    pub(crate) matcher: Matcher<A>,
    pub(crate) condition: Option<Rc<Condition>>,
    pub(crate) responder: Responder<A, R>,
    pub(crate) hits: Cell<usize>,
}

impl<A, R> Setup<A, R> {
    /// Description including the current gate state, for reports
    pub(crate) fn describe(&self) -> String {
        match &self.condition {
            Some(condition) => format!("{} [{}]", self.description, condition.describe()),
            None => self.description.clone(),
        }
    }
}

impl<A, R> Debug for Setup<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("condition", &self.condition)
            .field("hits", &self.hits.get())
            .finish()
    }
}

/// Setup guard returned by [`Conditional::when`](crate::Conditional::when)
///
/// Continue with [`setup`](Self::setup) or [`setup_eq`](Self::setup_eq).
/// Dropping it without finishing the setup leaves any sequence step it
/// registered unreachable.
#[must_use = "the guarded setup is only added once a response is configured"]
pub struct ConditionalSetup<'m, A, R> {
    mock: &'m Mock<A, R>,
    condition: Condition,
}

impl<A, R> Debug for ConditionalSetup<'_, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalSetup")
            .field("mock", &self.mock.name())
            .field("condition", &self.condition)
            .finish()
    }
}

impl<'m, A: Debug + 'static, R: 'static> ConditionalSetup<'m, A, R> {
    pub(crate) fn new(mock: &'m Mock<A, R>, condition: Condition) -> Self {
        Self { mock, condition }
    }

    /// Match calls accepted by `matcher`
    pub fn setup<F>(self, matcher: F) -> SetupBuilder<'m, A, R>
    where
        F: Fn(&A) -> bool + 'static,
    {
        self.mock.setup(matcher).with_condition(self.condition)
    }

    /// Match calls whose arguments equal `expected`
    pub fn setup_eq(self, expected: A) -> SetupBuilder<'m, A, R>
    where
        A: PartialEq,
    {
        self.mock.setup_eq(expected).with_condition(self.condition)
    }
}

/// Builder for a setup; finished by [`returns`](Self::returns) or
/// [`returns_with`](Self::returns_with)
#[must_use = "the setup is only added once a response is configured"]
pub struct SetupBuilder<'m, A, R> {
    mock: &'m Mock<A, R>,
    matcher: Matcher<A>,
    description: String,
    condition: Option<Condition>,
}

impl<A, R> Debug for SetupBuilder<'_, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupBuilder")
            .field("mock", &self.mock.name())
            .field("description", &self.description)
            .field("condition", &self.condition)
            .finish()
    }
}

impl<'m, A: Debug + 'static, R: 'static> SetupBuilder<'m, A, R> {
    pub(crate) fn new(mock: &'m Mock<A, R>, matcher: Matcher<A>, description: String) -> Self {
        Self {
            mock,
            matcher,
            description,
            condition: None,
        }
    }

    fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Replace the text shown for this setup in reports
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Answer matching calls with a clone of `value`
    pub fn returns(self, value: R) -> SetupId
    where
        R: Clone,
    {
        self.returns_with(move |_| value.clone())
    }

    /// Answer matching calls by running `responder` on the arguments
    pub fn returns_with<F>(self, responder: F) -> SetupId
    where
        F: Fn(&A) -> R + 'static,
    {
        self.mock.add_setup(
            self.description,
            self.matcher,
            self.condition.map(Rc::new),
            Rc::new(responder),
        )
    }
}
