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

//! Splitting token sequences on a delimiter pattern.

use std::iter::FusedIterator;

use crate::error::RuntimeError;
use crate::Pattern;
use crate::Result;

/// Iterator over the segments between delimiter matches.
///
/// Yields the runs of tokens strictly between matches of the delimiter
/// pattern, as sub-slices of the backing sequence:
///
/// - a delimiter at the very start yields an empty leading segment;
/// - a delimiter ending at the end of input yields an empty trailing
///   segment;
/// - consecutive delimiters yield empty segments between them;
/// - without any delimiter match the whole sequence is one segment.
///
/// The iterator is a single left-to-right pass over the backing sequence;
/// to iterate again, call [`Pattern::split`] again.
#[derive(Debug)]
pub struct Split<'p, 's, S> {
    pattern: &'p Pattern,
    seq: &'s [S],
    pos: usize,
    keep: bool,
    pending_delimiter: Option<&'s [S]>,
    done: bool,
}

pub(crate) fn split<'p, 's, S>(pattern: &'p Pattern, seq: &'s [S], keep: bool) -> Split<'p, 's, S> {
    Split {
        pattern,
        seq,
        pos: 0,
        keep,
        pending_delimiter: None,
        done: false,
    }
}

impl<'p, 's, S: AsRef<str>> Iterator for Split<'p, 's, S> {
    type Item = Result<&'s [S]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(delimiter) = self.pending_delimiter.take() {
            return Some(Ok(delimiter));
        }
        let found = match self.pattern.find_from(self.seq, self.pos) {
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
            // a delimiter must start on an existing token
            Ok(Some(m)) if m.start() < self.seq.len() => m,
            Ok(_) => {
                self.done = true;
                return Some(Ok(&self.seq[self.pos..]));
            }
        };
        if found.is_empty() {
            self.done = true;
            return Some(Err(RuntimeError::EmptyDelimiter { pos: found.start() }.into()));
        }
        let segment = &self.seq[self.pos..found.start()];
        if self.keep {
            self.pending_delimiter = Some(found.tokens());
        }
        self.pos = found.end();
        Some(Ok(segment))
    }
}

impl<'p, 's, S: AsRef<str>> FusedIterator for Split<'p, 's, S> {}
