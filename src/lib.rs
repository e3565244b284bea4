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

/*!
Regex-style pattern matching over sequences of lines.

Where a textual regex engine matches a pattern against a sequence of
characters, this crate matches a pattern against a sequence of tokens,
typically the lines printed by a command-line tool. Patterns are built
directly as values with combinators; there is no textual pattern syntax to
parse. Matching the text of a single token is delegated to the excellent
[regex] crate; everything across tokens (concatenation, alternation,
repetition with greedy and lazy quantifiers, capture groups, anchors) is
handled by a backtracking engine. Like any backtracking engine, it can take
exponential time on pathological patterns; the step limit below bounds that.

# Example: matching a header and its value

```rust
use linepat::{Expr, Pattern};

let expr = Expr::concat(vec![
    Expr::regex(r"^Name: ").unwrap(),
    Expr::group(0, Expr::regex(r"^Age: ").unwrap()),
]);
let pattern = Pattern::new(&expr).unwrap();

let lines = ["Name: Alice", "Age: 30"];
let m = pattern.find(&lines).unwrap().unwrap();
assert_eq!(m.range(), 0..2);
assert_eq!(m.group(0), Some(&lines[1..2]));
```

# Example: dropping comment lines with `gsub`

```rust
use linepat::{Expr, Pattern, Tokens};

let comment = Pattern::new(&Expr::regex(r"^#").unwrap()).unwrap();
let lines = vec![
    "#comment".to_string(),
    "keep".to_string(),
    "#comment2".to_string(),
];
assert_eq!(comment.gsub(&lines, Tokens(Vec::new())).unwrap(), ["keep"]);
```

# Example: splitting records on a delimiter line

```rust
use linepat::{Expr, Pattern};

let delimiter = Pattern::new(&Expr::regex(r"^---$").unwrap()).unwrap();
let lines = ["a", "---", "b", "c", "---", "d"];
let segments = delimiter
    .split(&lines)
    .collect::<Result<Vec<_>, _>>()
    .unwrap();
assert_eq!(segments, [&["a"][..], &["b", "c"][..], &["d"][..]]);
```

# Matching semantics

Alternatives are tried strictly in declaration order and the first arm whose
full continuation succeeds wins, even when a later arm would match more
tokens. Greedy repetitions prefer the largest repetition count and back off
one count at a time; lazy repetitions prefer the smallest. Capture groups
record the sub-range their child matched; a group inside a repetition keeps
the range of its last successful iteration. Anchors assert the start and end
of the whole sequence, not of the searched range.

Absence of a match is an ordinary `Ok(None)` outcome. Errors are reserved
for a pattern that cannot be built ([`CompileError`]), a token predicate
that fails while being evaluated ([`PredicateError`]), and an execution that
exhausts its configured budget ([`RuntimeError`]).

[regex]: https://crates.io/crates/regex
*/

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_else)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]

use std::ops::Range;
use std::sync::Arc;

mod analyze;
mod compile;
mod error;
mod expr;
mod gsub;
mod matcher;
mod split;
mod vm;

use crate::compile::compile;
use crate::vm::{group_slot, Prog, DEFAULT_MAX_STACK, DEFAULT_STEP_LIMIT};

pub use crate::error::{CompileError, Error, PredicateError, Result, RuntimeError};
pub use crate::expr::{Assertion, Expr};
pub use crate::gsub::{Replacer, Tokens, Unmatched};
pub use crate::matcher::{Matcher, PredFn};
pub use crate::split::Split;

// the public API

/// A compiled pattern over token sequences.
///
/// Compiled once from an [`Expr`] tree and reusable for any number of
/// sequences; cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Pattern {
    prog: Arc<Prog>,
    step_limit: usize,
    max_stack: usize,
}

impl Pattern {
    /// Compile an expression tree with default options, see
    /// [`PatternBuilder`].
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression cannot be compiled.
    #[inline]
    pub fn new(expr: &Expr) -> Result<Pattern> {
        PatternBuilder::new().build(expr)
    }

    /// Check whether the pattern matches anywhere in the sequence.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate or an exhausted execution
    /// budget.
    #[inline]
    pub fn is_match<S: AsRef<str>>(&self, seq: &[S]) -> Result<bool> {
        Ok(self.find(seq)?.is_some())
    }

    /// Find the leftmost match in the sequence.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate or an exhausted execution
    /// budget.
    #[inline]
    pub fn find<'s, S: AsRef<str>>(&self, seq: &'s [S]) -> Result<Option<Match<'s, S>>> {
        self.find_from(seq, 0)
    }

    /// Find the leftmost match starting at offset `from` or later.
    ///
    /// Offsets are scanned one token at a time; the first offset with a
    /// match wins and the match itself never begins before `from`.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate or an exhausted execution
    /// budget.
    ///
    /// # Panics
    ///
    /// Panics if `from` is greater than the sequence length.
    pub fn find_from<'s, S: AsRef<str>>(
        &self,
        seq: &'s [S],
        from: usize,
    ) -> Result<Option<Match<'s, S>>> {
        assert!(from <= seq.len(), "start offset out of bounds");
        for pos in from..=seq.len() {
            if seq.len() - pos < self.prog.min_width {
                break;
            }
            if let Some(m) = self.run_at(seq, pos)? {
                return Ok(Some(m));
            }
        }
        Ok(None)
    }

    /// Match the pattern anchored at exactly offset `at`, without scanning.
    ///
    /// Returns the single best match beginning at `at`, or `None` if the
    /// pattern does not match there, even if it would match at a later
    /// offset.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate or an exhausted execution
    /// budget.
    ///
    /// # Panics
    ///
    /// Panics if `at` is greater than the sequence length.
    pub fn find_at<'s, S: AsRef<str>>(
        &self,
        seq: &'s [S],
        at: usize,
    ) -> Result<Option<Match<'s, S>>> {
        assert!(at <= seq.len(), "start offset out of bounds");
        self.run_at(seq, at)
    }

    /// Returns an iterator for each successive non-overlapping match in
    /// `seq`.
    ///
    /// An empty match directly following a previous match is skipped, the
    /// same way textual regex iterators behave.
    #[must_use]
    #[inline]
    pub fn find_iter<'p, 's, S: AsRef<str>>(&'p self, seq: &'s [S]) -> Matches<'p, 's, S> {
        Matches {
            pattern: self,
            seq,
            last_end: 0,
            last_match: None,
        }
    }

    /// Replace every non-overlapping match in `seq`, returning a new
    /// sequence.
    ///
    /// Tokens not covered by any match are copied through unchanged. The
    /// replacer can be a closure from the match to replacement tokens, or
    /// [`Tokens`] for a fixed replacement:
    ///
    /// ```rust
    /// use linepat::{Expr, Match, Pattern};
    ///
    /// let kv = Pattern::new(&Expr::regex(r"^\w+: ").unwrap()).unwrap();
    /// let lines = vec!["Name: Alice".to_string(), "...".to_string()];
    /// let upper = kv
    ///     .gsub(&lines, |m: &Match<String>| {
    ///         m.tokens().iter().map(|t| t.to_uppercase()).collect()
    ///     })
    ///     .unwrap();
    /// assert_eq!(upper, ["NAME: ALICE", "..."]);
    /// ```
    ///
    /// A zero-width match produces its replacement, and the scan then moves
    /// one token forward, re-emitting the token it skipped, so the
    /// substitution always terminates.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate or an exhausted execution
    /// budget.
    #[inline]
    pub fn gsub<S, R>(&self, seq: &[S], rep: R) -> Result<Vec<S>>
    where
        S: AsRef<str> + Clone,
        R: Replacer<S>,
    {
        gsub::gsub(self, seq, rep, Unmatched::Keep)
    }

    /// Like [`Pattern::gsub`], with an explicit policy for tokens not
    /// covered by any match.
    ///
    /// [`Unmatched::Drop`] leaves uncovered tokens out of the output, which
    /// turns a substitution into an extraction; [`Unmatched::Fail`] makes
    /// any uncovered token an error, for input that is expected to parse
    /// completely.
    ///
    /// # Errors
    ///
    /// Returns an error on a failing predicate, an exhausted execution
    /// budget, or, with [`Unmatched::Fail`], an uncovered token.
    #[inline]
    pub fn gsub_with<S, R>(&self, seq: &[S], rep: R, unmatched: Unmatched) -> Result<Vec<S>>
    where
        S: AsRef<str> + Clone,
        R: Replacer<S>,
    {
        gsub::gsub(self, seq, rep, unmatched)
    }

    /// Split the sequence on matches of this pattern.
    ///
    /// Returns a lazy iterator over the runs of tokens between delimiter
    /// matches; see [`Split`] for the exact segment rules.
    #[must_use]
    #[inline]
    pub fn split<'p, 's, S: AsRef<str>>(&'p self, seq: &'s [S]) -> Split<'p, 's, S> {
        split::split(self, seq, false)
    }

    /// Like [`Pattern::split`], additionally yielding each matched
    /// delimiter run between the segments around it.
    #[must_use]
    #[inline]
    pub fn split_keep<'p, 's, S: AsRef<str>>(&'p self, seq: &'s [S]) -> Split<'p, 's, S> {
        split::split(self, seq, true)
    }

    fn run_at<'s, S: AsRef<str>>(&self, seq: &'s [S], at: usize) -> Result<Option<Match<'s, S>>> {
        let result = vm::run(&self.prog, seq, at, self.step_limit, self.max_stack)?;
        Ok(result.map(|saves| Match { seq, saves }))
    }
}

#[derive(Copy, Clone, Debug)]
struct PatternOptions {
    step_limit: usize,
    max_stack: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        PatternOptions {
            step_limit: DEFAULT_STEP_LIMIT,
            max_stack: DEFAULT_MAX_STACK,
        }
    }
}

/// A builder for a `Pattern` to allow configuring options.
#[derive(Debug, Copy, Clone, Default)]
pub struct PatternBuilder(PatternOptions);

impl PatternBuilder {
    /// Create a new pattern builder with default options.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the expression cannot be compiled.
    #[inline]
    pub fn build(&self, expr: &Expr) -> Result<Pattern> {
        let prog = compile(expr)?;
        Ok(Pattern {
            prog: Arc::new(prog),
            step_limit: self.0.step_limit,
            max_stack: self.0.max_stack,
        })
    }

    /// Limit for how many backtracking steps a single execution may take.
    /// If this limit is exceeded, execution returns an [`Error::RuntimeError`]
    /// with [`RuntimeError::StepLimitExceeded`]. This is for preventing a
    /// pattern with catastrophic backtracking from running for too long.
    ///
    /// Default is `1_000_000` (1 million).
    ///
    /// ```rust
    /// use linepat::{Error, Expr, PatternBuilder, RuntimeError};
    ///
    /// let expr = Expr::star(Expr::star(Expr::any())).then(Expr::text("!"));
    /// let pattern = PatternBuilder::new().step_limit(100).build(&expr).unwrap();
    /// let lines = vec!["x"; 50];
    /// assert!(matches!(
    ///     pattern.find(&lines),
    ///     Err(Error::RuntimeError(RuntimeError::StepLimitExceeded))
    /// ));
    /// ```
    #[inline]
    pub fn step_limit(&mut self, limit: usize) -> &mut Self {
        self.0.step_limit = limit;
        self
    }

    /// Limit the height of the backtrack stack. If this limit is exceeded,
    /// execution returns an [`Error::RuntimeError`] with
    /// [`RuntimeError::StackOverflow`]. This is for preventing a pattern
    /// with catastrophic backtracking from consuming too much memory.
    ///
    /// Default is `1_000_000` (1 million).
    #[inline]
    pub fn max_stack(&mut self, limit: usize) -> &mut Self {
        self.0.max_stack = limit;
        self
    }
}

/// A single match of a pattern in a sequence, with its captures.
#[derive(Clone, Debug)]
pub struct Match<'s, S> {
    seq: &'s [S],
    saves: Vec<usize>,
}

impl<'s, S> Match<'s, S> {
    /// Returns the offset of the first token of the match.
    #[must_use]
    #[inline]
    pub fn start(&self) -> usize {
        self.saves[0]
    }

    /// Returns the offset one past the last token of the match.
    #[must_use]
    #[inline]
    pub fn end(&self) -> usize {
        self.saves[1]
    }

    /// Returns the range of token offsets the match consumed.
    #[must_use]
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Returns the number of tokens the match consumed.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    /// Returns true if and only if this match consumed zero tokens.
    ///
    /// Note that an empty match can only occur when the pattern itself can
    /// match zero tokens.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range().is_empty()
    }

    /// Returns the matched tokens.
    #[must_use]
    #[inline]
    pub fn tokens(&self) -> &'s [S] {
        &self.seq[self.range()]
    }

    /// Returns the range captured by the group with identity `id`.
    ///
    /// `None` means the group was not reached by the match, which is
    /// distinct from a group that matched zero tokens and reports an empty
    /// range.
    #[must_use]
    pub fn group_range(&self, id: usize) -> Option<Range<usize>> {
        let slots = group_slot(id);
        if slots.end > self.saves.len() {
            return None;
        }
        let lo = self.saves[slots.start];
        if lo == usize::MAX {
            return None;
        }
        Some(lo..self.saves[slots.start + 1])
    }

    /// Returns the tokens captured by the group with identity `id`, or
    /// `None` if the group was not reached.
    #[must_use]
    #[inline]
    pub fn group(&self, id: usize) -> Option<&'s [S]> {
        self.group_range(id).map(|r| &self.seq[r])
    }

    /// Iterate over the captured groups, in order of capture identity.
    #[must_use]
    #[inline]
    pub fn groups(&self) -> Groups<'_> {
        Groups {
            saves: &self.saves,
            id: 0,
        }
    }
}

/// Iterator over the `(identity, range)` pairs of the groups a match
/// captured. Groups that were not reached are skipped.
#[derive(Debug)]
pub struct Groups<'m> {
    saves: &'m [usize],
    id: usize,
}

impl<'m> Iterator for Groups<'m> {
    type Item = (usize, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slots = group_slot(self.id);
            if slots.end > self.saves.len() {
                return None;
            }
            let id = self.id;
            self.id += 1;
            let lo = self.saves[slots.start];
            if lo != usize::MAX {
                return Some((id, lo..self.saves[slots.start + 1]));
            }
        }
    }
}

/// An iterator over all non-overlapping matches for a particular sequence.
///
/// The iterator yields a `Result<Match>`. The iterator stops when no more
/// matches can be found.
///
/// `'p` is the lifetime of the compiled pattern and `'s` is the lifetime of
/// the matched sequence.
#[derive(Debug)]
pub struct Matches<'p, 's, S> {
    pattern: &'p Pattern,
    seq: &'s [S],
    last_end: usize,
    last_match: Option<usize>,
}

impl<'p, 's, S> Matches<'p, 's, S> {
    /// Return the sequence being searched.
    #[must_use]
    #[inline]
    pub fn seq(&self) -> &'s [S] {
        self.seq
    }

    /// Return the underlying pattern.
    #[must_use]
    #[inline]
    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }
}

impl<'p, 's, S: AsRef<str>> Iterator for Matches<'p, 's, S> {
    type Item = Result<Match<'s, S>>;

    /// Calls `find_from` repeatedly. Ignores empty matches immediately
    /// after a match.
    fn next(&mut self) -> Option<Self::Item> {
        if self.last_end > self.seq.len() {
            return None;
        }

        let m = match self.pattern.find_from(self.seq, self.last_end) {
            Err(error) => return Some(Err(error)),
            Ok(None) => return None,
            Ok(Some(m)) => m,
        };

        if m.is_empty() {
            // This is an empty match. To ensure we make progress, start
            // the next search one token past it.
            self.last_end = m.end() + 1;
            // Don't accept empty matches immediately following a match.
            // Just move on to the next match.
            if Some(m.end()) == self.last_match {
                return self.next();
            }
        } else {
            self.last_end = m.end();
        }

        self.last_match = Some(m.end());

        Some(Ok(m))
    }
}
