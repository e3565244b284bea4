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

//! Global substitution over token sequences.

use std::ops::Range;

use crate::error::RuntimeError;
use crate::Match;
use crate::Pattern;
use crate::Result;

/// Produces replacement tokens for one match during substitution.
///
/// Implemented for closures taking the match and returning the replacement
/// tokens, and for [`Tokens`] as a fixed replacement.
pub trait Replacer<S> {
    /// Append the replacement for `m` to `dst`.
    fn replace_append(&mut self, m: &Match<'_, S>, dst: &mut Vec<S>);
}

impl<S, F> Replacer<S> for F
where
    F: FnMut(&Match<'_, S>) -> Vec<S>,
{
    fn replace_append(&mut self, m: &Match<'_, S>, dst: &mut Vec<S>) {
        dst.extend((*self)(m));
    }
}

/// A fixed replacement: every match is replaced by the same tokens.
///
/// An empty list deletes each matched region.
#[derive(Clone, Debug)]
pub struct Tokens<S>(pub Vec<S>);

impl<S: Clone> Replacer<S> for Tokens<S> {
    fn replace_append(&mut self, _m: &Match<'_, S>, dst: &mut Vec<S>) {
        dst.extend(self.0.iter().cloned());
    }
}

/// What to do with tokens that are not covered by any match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unmatched {
    /// Copy them to the output unchanged
    Keep,
    /// Leave them out of the output
    Drop,
    /// Fail the substitution with [`RuntimeError::UnmatchedToken`]
    Fail,
}

fn emit<S: Clone>(
    out: &mut Vec<S>,
    seq: &[S],
    range: Range<usize>,
    unmatched: Unmatched,
) -> Result<()> {
    match unmatched {
        Unmatched::Keep => out.extend(seq[range].iter().cloned()),
        Unmatched::Drop => {}
        Unmatched::Fail => {
            if !range.is_empty() {
                return Err(RuntimeError::UnmatchedToken { pos: range.start }.into());
            }
        }
    }
    Ok(())
}

/// Scan `seq` left to right, replacing every non-overlapping match.
///
/// A zero-width match still produces a replacement; the token it was found
/// in front of is then treated as unmatched and the scan resumes one token
/// further, so the substitution always makes progress.
pub(crate) fn gsub<S, R>(
    pattern: &Pattern,
    seq: &[S],
    mut rep: R,
    unmatched: Unmatched,
) -> Result<Vec<S>>
where
    S: AsRef<str> + Clone,
    R: Replacer<S>,
{
    let mut out = Vec::with_capacity(seq.len());
    let mut last = 0;
    let mut pos = 0;
    while pos <= seq.len() {
        let m = match pattern.find_from(seq, pos)? {
            Some(m) => m,
            None => break,
        };
        emit(&mut out, seq, last..m.start(), unmatched)?;
        rep.replace_append(&m, &mut out);
        if m.is_empty() {
            let skipped = m.start()..seq.len().min(m.start() + 1);
            emit(&mut out, seq, skipped, unmatched)?;
            pos = m.start() + 1;
        } else {
            pos = m.end();
        }
        last = pos.min(seq.len());
    }
    emit(&mut out, seq, last..seq.len(), unmatched)?;
    Ok(out)
}
