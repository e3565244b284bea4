// Copyright 2016 The Fancy Regex Authors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Error types for pattern construction and matching.

use std::fmt;

/// Result type for this crate with a defaulted error.
pub type Result<T> = ::std::result::Result<T, Error>;

/// An error that can occur when building or running a pattern.
#[derive(Clone, Debug)]
pub enum Error {
    /// The pattern could not be compiled
    CompileError(CompileError),
    /// An error occurred during matching
    RuntimeError(RuntimeError),
    /// A token predicate failed while it was being evaluated
    PredicateError(PredicateError),
}

/// An error building a pattern.
#[derive(Clone, Debug)]
pub enum CompileError {
    /// A repetition was constructed with a minimum count above its maximum
    InvalidRepeat {
        /// Minimum number of matches
        lo: usize,
        /// Maximum number of matches
        hi: usize,
    },
    /// The same capture identity was used for more than one group
    DuplicateGroup(usize),
    /// The text regex for a token matcher could not be compiled
    InnerRegex(regex::Error),
}

/// An error running a compiled pattern against a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeError {
    /// Max limit for backtracking steps reached, execution aborted
    StepLimitExceeded,
    /// Max limit for backtracking stack height reached, execution aborted
    StackOverflow,
    /// A delimiter pattern matched zero tokens while splitting, which cannot
    /// make progress
    EmptyDelimiter {
        /// Offset of the zero-width delimiter match
        pos: usize,
    },
    /// A token was not covered by any match during a strict substitution
    UnmatchedToken {
        /// Offset of the uncovered token
        pos: usize,
    },
}

/// A failure raised by a caller-supplied token predicate.
///
/// Predicate failures abort the whole match attempt; they are never treated
/// as "no match".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    /// Create a predicate failure carrying a message for the caller.
    pub fn new(message: impl Into<String>) -> PredicateError {
        PredicateError {
            message: message.into(),
        }
    }

    /// The message this failure was created with.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match self {
            Error::CompileError(CompileError::InnerRegex(e)) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileError(e) => e.fmt(f),
            Error::RuntimeError(e) => e.fmt(f),
            Error::PredicateError(e) => e.fmt(f),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::InvalidRepeat { lo, hi } => {
                write!(f, "Invalid repeat: min {} greater than max {}", lo, hi)
            }
            CompileError::DuplicateGroup(id) => {
                write!(f, "Capture identity {} used more than once", id)
            }
            CompileError::InnerRegex(e) => write!(f, "Token regex error: {}", e),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StepLimitExceeded => write!(f, "Max step limit exceeded"),
            RuntimeError::StackOverflow => write!(f, "Max stack size exceeded"),
            RuntimeError::EmptyDelimiter { pos } => {
                write!(f, "Delimiter matched zero tokens at offset {}", pos)
            }
            RuntimeError::UnmatchedToken { pos } => {
                write!(f, "Token at offset {} not covered by any match", pos)
            }
        }
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token predicate failed: {}", self.message)
    }
}

impl From<CompileError> for Error {
    fn from(e: CompileError) -> Error {
        Error::CompileError(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Error {
        Error::RuntimeError(e)
    }
}

impl From<PredicateError> for Error {
    fn from(e: PredicateError) -> Error {
        Error::PredicateError(e)
    }
}
