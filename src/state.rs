//! Well-formedness tracking for the structural call sequence.
//!
//! The emitter only ever sits in one of eight [`State`]s. Every structural or
//! scalar call first asserts that the current state belongs to the legal set
//! for that call category, then advances along a fixed transition table.
//! Entering a container pushes the current state onto a stack; leaving one
//! pops it back. The stack depth doubles as the indentation depth for
//! multi-line output.
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{State, StateMachine};
//!
//! let mut sm = StateMachine::new();
//! assert_eq!(sm.state(), State::Root);
//!
//! sm.expect_value().unwrap();
//! sm.push(State::ObjectFirstKey);
//! assert_eq!(sm.depth(), 1);
//!
//! sm.pop().unwrap();
//! assert_eq!(sm.state(), State::Root);
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// The legal grammar positions of an in-flight document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Before the single top-level value.
    #[default]
    Root,
    /// Inside an object, before the first key.
    ObjectFirstKey,
    /// Inside an object, before a subsequent key.
    ObjectNextKey,
    /// Inside an object, before the value of the first key.
    ObjectFirstValue,
    /// Inside an object, before the value of a subsequent key.
    ObjectNextValue,
    /// Inside an array, before the first element.
    ArrayFirstValue,
    /// Inside an array, before a subsequent element.
    ArrayNextValue,
    /// After the top-level value; only document close is legal.
    End,
}

/// States in which a key call is legal.
pub(crate) const KEY_STATES: &[State] = &[State::ObjectFirstKey, State::ObjectNextKey];

/// States in which a scalar or container-start call is legal.
pub(crate) const VALUE_STATES: &[State] = &[
    State::Root,
    State::ObjectFirstValue,
    State::ObjectNextValue,
    State::ArrayFirstValue,
    State::ArrayNextValue,
];

/// States in which a container-end call for an array is legal.
pub(crate) const ARRAY_STATES: &[State] = &[State::ArrayFirstValue, State::ArrayNextValue];

/// States in which the document may begin.
pub(crate) const ROOT_STATES: &[State] = &[State::Root];

/// States in which the document may end.
pub(crate) const END_STATES: &[State] = &[State::End];

impl State {
    /// Returns the short name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            State::Root => "root",
            State::ObjectFirstKey => "objectFirstKey",
            State::ObjectNextKey => "objectNextKey",
            State::ObjectFirstValue => "objectFirstValue",
            State::ObjectNextValue => "objectNextValue",
            State::ArrayFirstValue => "arrayFirstValue",
            State::ArrayNextValue => "arrayNextValue",
            State::End => "end",
        }
    }

    /// Advances along the fixed transition table after a key or value has
    /// been produced in this state. Returns `None` for states with no
    /// successor (a value was never legal there in the first place).
    #[must_use]
    pub const fn next(self) -> Option<State> {
        match self {
            State::Root => Some(State::End),
            State::ObjectFirstKey => Some(State::ObjectFirstValue),
            State::ObjectNextKey => Some(State::ObjectNextValue),
            State::ObjectFirstValue | State::ObjectNextValue => Some(State::ObjectNextKey),
            State::ArrayFirstValue | State::ArrayNextValue => Some(State::ArrayNextValue),
            State::End => None,
        }
    }

    /// Returns `true` if `self` is one of the given states.
    #[must_use]
    pub fn is_in(self, one_of: &[State]) -> bool {
        one_of.contains(&self)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the legal next structural event given nesting context.
///
/// One entry is pushed onto the stack per container entered; the stack length
/// is the current nesting depth. All mutation goes through [`push`], [`pop`],
/// and [`next`]; the `expect_*` methods assert legality without mutating.
///
/// [`push`]: StateMachine::push
/// [`pop`]: StateMachine::pop
/// [`next`]: StateMachine::next
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: State,
    stack: Vec<State>,
}

/// Nesting depth most documents stay within; the stack grows past it freely.
const STACK_CAPACITY: usize = 16;

impl StateMachine {
    /// Creates a machine positioned at [`State::Root`].
    #[must_use]
    pub fn new() -> Self {
        StateMachine {
            state: State::Root,
            stack: Vec::with_capacity(STACK_CAPACITY),
        }
    }

    /// Returns the machine to [`State::Root`] with an empty stack.
    pub fn reset(&mut self) {
        self.state = State::Root;
        self.stack.clear();
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Current nesting depth. Used for indentation only.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Saves the current state and switches to `next`. Used when entering a
    /// container.
    pub fn push(&mut self, next: State) {
        self.stack.push(self.state);
        self.state = next;
    }

    /// Restores the saved ancestor state. Used when leaving a container.
    ///
    /// # Errors
    ///
    /// [`Error::UnmatchedEnd`] if no container is open; the caller emitted an
    /// end without a matching start.
    pub fn pop(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => Err(Error::UnmatchedEnd),
        }
    }

    /// Advances the current state along the transition table.
    ///
    /// # Errors
    ///
    /// Protocol violation if the current state has no successor. Unreachable
    /// when every call runs its `expect_*` assertion first.
    pub fn next(&mut self) -> Result<()> {
        match self.state.next() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => Err(Error::unexpected_state(self.state, VALUE_STATES)),
        }
    }

    /// Asserts the current state is one of `one_of`.
    ///
    /// # Errors
    ///
    /// [`Error::Protocol`] naming the current state and the legal set.
    pub fn expect(&self, one_of: &'static [State]) -> Result<()> {
        if self.state.is_in(one_of) {
            Ok(())
        } else {
            Err(Error::unexpected_state(self.state, one_of))
        }
    }

    /// Asserts an object key may be emitted now.
    pub fn expect_key(&self) -> Result<()> {
        self.expect(KEY_STATES)
    }

    /// Asserts a value or container start may be emitted now.
    pub fn expect_value(&self) -> Result<()> {
        self.expect(VALUE_STATES)
    }

    /// Asserts an array end may be emitted now.
    pub fn expect_array(&self) -> Result<()> {
        self.expect(ARRAY_STATES)
    }

    /// Asserts the document has not started yet.
    pub fn expect_root(&self) -> Result<()> {
        self.expect(ROOT_STATES)
    }

    /// Asserts the document is complete.
    pub fn expect_end(&self) -> Result<()> {
        self.expect(END_STATES)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
