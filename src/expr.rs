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

//! The pattern expression tree and the combinators that build it.
//!
//! There is no textual pattern syntax: callers assemble an [`Expr`] directly
//! and compile it into a [`Pattern`](crate::Pattern). Trees are pure data,
//! built once and reusable across any number of compilations and sequences.

use crate::error::{CompileError, PredicateError};
use crate::Error;
use crate::Matcher;
use crate::Result;

/// A pattern over a sequence of tokens.
///
/// `Expr` trees carry no matching behavior of their own; the engine
/// interprets them after compilation.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Matches zero tokens
    Empty,
    /// Matches any single token
    Any,
    /// Matches a single token accepted by the matcher
    Token(Matcher),
    /// Concatenation of patterns, each starting where the previous ended
    Concat(Vec<Expr>),
    /// Alternative of patterns, tried strictly in order
    ///
    /// The first alternative whose full continuation succeeds wins, even if
    /// a later alternative would have matched more tokens.
    Alt(Vec<Expr>),
    /// Capture group: records the sub-range matched by the child
    Group {
        /// Capture identity, unique within one pattern
        id: usize,
        /// The captured pattern
        child: Box<Expr>,
    },
    /// Repetition of a pattern
    Repeat {
        /// The repeated pattern
        child: Box<Expr>,
        /// Minimum number of matches
        lo: usize,
        /// Maximum number of matches (`usize::MAX` for unbounded)
        hi: usize,
        /// Greedy (match as many as possible first)
        greedy: bool,
    },
    /// Zero-width assertion
    Assertion(Assertion),
}

/// A zero-width assertion on the current offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assertion {
    /// Offset 0, the start of the sequence
    Start,
    /// Offset `len`, the end of the sequence
    End,
}

impl Expr {
    /// A leaf matching one token with exactly the given text.
    pub fn text(text: impl Into<String>) -> Expr {
        Expr::Token(Matcher::text(text))
    }

    /// A leaf matching one token whose text matches the regex.
    ///
    /// The regex is unanchored; write `^…$` to require the whole line.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError::InnerRegex`] if the regex fails to compile.
    pub fn regex(pattern: &str) -> Result<Expr> {
        Ok(Expr::Token(Matcher::regex(pattern)?))
    }

    /// A leaf matching one token accepted by an arbitrary predicate.
    pub fn pred<F>(f: F) -> Expr
    where
        F: Fn(&str) -> ::std::result::Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Expr::Token(Matcher::pred(f))
    }

    /// A leaf matching any single token.
    pub fn any() -> Expr {
        Expr::Any
    }

    /// A pattern matching zero tokens.
    pub fn empty() -> Expr {
        Expr::Empty
    }

    /// Assert the start of the sequence (offset 0).
    pub fn start() -> Expr {
        Expr::Assertion(Assertion::Start)
    }

    /// Assert the end of the sequence.
    pub fn end() -> Expr {
        Expr::Assertion(Assertion::End)
    }

    /// Concatenation of the given patterns.
    ///
    /// Nested concatenations are flattened into one.
    pub fn concat(children: impl IntoIterator<Item = Expr>) -> Expr {
        let mut contents = Vec::new();
        for child in children {
            match child {
                Expr::Concat(inner) => contents.extend(inner),
                other => contents.push(other),
            }
        }
        Expr::Concat(contents)
    }

    /// Alternative of the given patterns, tried in order.
    ///
    /// Nested alternatives are flattened into one. An alternative with no
    /// children never matches.
    pub fn alt(children: impl IntoIterator<Item = Expr>) -> Expr {
        let mut contents = Vec::new();
        for child in children {
            match child {
                Expr::Alt(inner) => contents.extend(inner),
                other => contents.push(other),
            }
        }
        Expr::Alt(contents)
    }

    /// Capture the sub-range matched by `child` under the identity `id`.
    ///
    /// If the group is re-entered by an enclosing repetition, the last
    /// successful occurrence wins.
    pub fn group(id: usize, child: Expr) -> Expr {
        Expr::Group {
            id,
            child: Box::new(child),
        }
    }

    /// Repeat `child` between `lo` and `hi` times; `None` means unbounded.
    ///
    /// A greedy repetition prefers the largest count, a lazy one the
    /// smallest; both back off count by count when the continuation fails.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError::InvalidRepeat`] if `lo` exceeds `hi`.
    pub fn repeat(child: Expr, lo: usize, hi: Option<usize>, greedy: bool) -> Result<Expr> {
        let hi = hi.unwrap_or(usize::MAX);
        if lo > hi {
            return Err(Error::CompileError(CompileError::InvalidRepeat { lo, hi }));
        }
        Ok(Expr::Repeat {
            child: Box::new(child),
            lo,
            hi,
            greedy,
        })
    }

    /// Greedily repeat `child` zero or more times.
    pub fn star(child: Expr) -> Expr {
        Expr::Repeat {
            child: Box::new(child),
            lo: 0,
            hi: usize::MAX,
            greedy: true,
        }
    }

    /// Greedily repeat `child` one or more times.
    pub fn plus(child: Expr) -> Expr {
        Expr::Repeat {
            child: Box::new(child),
            lo: 1,
            hi: usize::MAX,
            greedy: true,
        }
    }

    /// Greedily match `child` zero or one time.
    pub fn opt(child: Expr) -> Expr {
        Expr::Repeat {
            child: Box::new(child),
            lo: 0,
            hi: 1,
            greedy: true,
        }
    }

    /// Match `child` exactly `n` times.
    pub fn times(child: Expr, n: usize) -> Expr {
        Expr::Repeat {
            child: Box::new(child),
            lo: n,
            hi: n,
            greedy: true,
        }
    }

    /// Chain: `self` followed by `other`.
    #[must_use]
    pub fn then(self, other: Expr) -> Expr {
        Expr::concat(vec![self, other])
    }

    /// Chain: `self`, or `other` if `self`'s continuation fails.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::alt(vec![self, other])
    }
}
