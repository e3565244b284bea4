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

//! Per-token matchers used as pattern leaves.
//!
//! Matching the text of a single token is delegated to the [regex] crate;
//! this crate never implements character-level matching of its own.
//!
//! [regex]: https://crates.io/crates/regex

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::error::{CompileError, PredicateError};
use crate::Error;
use crate::Result;

/// Decides whether a single token is accepted by a pattern leaf.
///
/// A matcher reads the token's text and never mutates it. All variants are
/// cheap to clone and safe to share across threads.
#[derive(Clone)]
pub enum Matcher {
    /// Accept a token whose text is exactly the given string
    Text(String),
    /// Accept a token whose text matches the given regex
    ///
    /// The regex is evaluated with `is_match`, i.e. it may match anywhere in
    /// the token's text. Use `^` and `$` to anchor it to the whole line.
    Regex(Regex),
    /// Accept a token for which the predicate returns `Ok(true)`
    ///
    /// A predicate returning an error aborts the match attempt that reached
    /// it; the error surfaces to the caller unchanged.
    Pred(Arc<PredFn>),
}

/// The function type behind [`Matcher::Pred`].
pub type PredFn =
    dyn Fn(&str) -> ::std::result::Result<bool, PredicateError> + Send + Sync + 'static;

impl Matcher {
    /// Matcher for an exact line of text.
    pub fn text(text: impl Into<String>) -> Matcher {
        Matcher::Text(text.into())
    }

    /// Matcher testing the token's text against a regex.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError::InnerRegex`] if the regex fails to compile.
    pub fn regex(pattern: &str) -> Result<Matcher> {
        Regex::new(pattern)
            .map(Matcher::Regex)
            .map_err(|e| Error::CompileError(CompileError::InnerRegex(e)))
    }

    /// Matcher calling an arbitrary predicate on the token's text.
    pub fn pred<F>(f: F) -> Matcher
    where
        F: Fn(&str) -> ::std::result::Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Matcher::Pred(Arc::new(f))
    }

    /// Test a single token's text against this matcher.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::PredicateError`] if a predicate matcher fails.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        match self {
            Matcher::Text(t) => Ok(t == text),
            Matcher::Regex(re) => Ok(re.is_match(text)),
            Matcher::Pred(f) => f(text).map_err(Error::PredicateError),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Matcher::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Matcher::Pred(_) => f.write_str("Pred(..)"),
        }
    }
}
