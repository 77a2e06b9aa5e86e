//! Error types for JSON emission.
//!
//! Two disjoint failure classes exist, and they are deliberately kept apart:
//!
//! - **Protocol violations**: the caller sequenced structural calls
//!   incorrectly (for example two [`end_object`] calls in a row, or a key
//!   emitted while a value was expected). These indicate a bug in the calling
//!   code, not bad data. They are non-recoverable: the emitter refuses all
//!   further work once one occurs.
//! - **Sink write failures**: the underlying byte sink rejected a write. The
//!   first such failure is remembered ("sticky") and surfaced on the next
//!   [`flush`] or [`close`]; no partial-success mode exists.
//!
//! [`end_object`]: crate::Emitter::end_object
//! [`flush`]: crate::Emitter::flush
//! [`close`]: crate::Emitter::close
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{Emitter, JsonGenerator, JsonOptions};
//!
//! let mut out = Vec::new();
//! let mut e = Emitter::new(&mut out, JsonGenerator::new(JsonOptions::new()));
//!
//! // Closing an object that was never opened is a protocol violation.
//! let err = e.end_object().unwrap_err();
//! assert!(err.is_protocol());
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

use crate::state::State;

/// All errors that can occur while emitting a document.
///
/// The error is `Clone` so the emitter can remember the first failure and
/// hand out copies on every subsequent completion call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Structural calls arrived in an order the grammar forbids.
    #[error("protocol violation: unexpected state {state}; expected one of {expected:?}")]
    Protocol {
        /// The state the machine was in when the illegal call arrived.
        state: State,
        /// The states in which the call would have been legal.
        expected: &'static [State],
    },

    /// A container end call arrived with no matching start.
    #[error("protocol violation: container end without matching start")]
    UnmatchedEnd,

    /// The byte sink failed to accept a write.
    #[error("IO error: {0}")]
    Io(String),

    /// A scalar kind the emitter does not support.
    #[error("unsupported value kind: {0}")]
    Unsupported(String),

    /// Generic message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a protocol violation error for an out-of-order call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonemit::{Error, State};
    ///
    /// let err = Error::unexpected_state(State::Root, &[State::ObjectFirstKey]);
    /// assert!(err.is_protocol());
    /// assert!(err.to_string().contains("unexpected state root"));
    /// ```
    pub fn unexpected_state(state: State, expected: &'static [State]) -> Self {
        Error::Protocol { state, expected }
    }

    /// Creates an error from a failed sink write.
    pub fn io(err: &io::Error) -> Self {
        Error::Io(err.to_string())
    }

    /// Creates an unsupported-value-kind error.
    pub fn unsupported(kind: &str) -> Self {
        Error::Unsupported(kind.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Returns `true` if this error is a protocol violation (caller bug)
    /// rather than a sink failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonemit::Error;
    ///
    /// assert!(Error::UnmatchedEnd.is_protocol());
    /// assert!(!Error::Io("disk full".to_string()).is_protocol());
    /// ```
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol { .. } | Error::UnmatchedEnd)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
