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

//! Analysis of pattern expressions before compilation.

use bit_set::BitSet;
use std::cmp::min;

use crate::error::CompileError;
use crate::Error;
use crate::Expr;
use crate::Result;

/// Per-node facts gathered in one pass over the tree.
///
/// `min_width` is the smallest number of tokens the node can consume; a node
/// that can never match reports `usize::MAX`. The compiler uses a zero
/// `min_width` to pick the repeat encoding that cannot loop on empty
/// iterations, and the search loop uses the root's `min_width` to stop
/// scanning offsets that cannot fit a match.
#[derive(Debug)]
pub(crate) struct Info<'a> {
    pub(crate) min_width: usize,
    pub(crate) expr: &'a Expr,
    pub(crate) children: Vec<Info<'a>>,
}

#[derive(Debug)]
pub(crate) struct Analysis<'a> {
    pub(crate) info: Info<'a>,
    /// Save slots reserved for the overall match and capture groups; scratch
    /// slots for repetition counters are allocated after these.
    pub(crate) n_group_slots: usize,
}

struct Analyzer {
    groups: BitSet,
    max_group: Option<usize>,
}

impl Analyzer {
    fn visit<'a>(&mut self, expr: &'a Expr) -> Result<Info<'a>> {
        let mut children = Vec::new();
        let min_width = match *expr {
            Expr::Empty | Expr::Assertion(_) => 0,
            Expr::Any | Expr::Token(_) => 1,
            Expr::Concat(ref v) => {
                let mut width = 0usize;
                for child in v {
                    let child_info = self.visit(child)?;
                    width = width.saturating_add(child_info.min_width);
                    children.push(child_info);
                }
                width
            }
            Expr::Alt(ref v) => {
                // an empty alternative can never match
                let mut width = usize::MAX;
                for child in v {
                    let child_info = self.visit(child)?;
                    width = min(width, child_info.min_width);
                    children.push(child_info);
                }
                width
            }
            Expr::Group { id, ref child } => {
                if !self.groups.insert(id) {
                    return Err(Error::CompileError(CompileError::DuplicateGroup(id)));
                }
                self.max_group = Some(self.max_group.map_or(id, |g| g.max(id)));
                let child_info = self.visit(child)?;
                let width = child_info.min_width;
                children.push(child_info);
                width
            }
            Expr::Repeat { ref child, lo, .. } => {
                let child_info = self.visit(child)?;
                let width = child_info.min_width.saturating_mul(lo);
                children.push(child_info);
                width
            }
        };
        Ok(Info {
            min_width,
            expr,
            children,
        })
    }
}

/// Walk the tree, checking capture identities and sizing the save slots.
pub(crate) fn analyze(expr: &Expr) -> Result<Analysis<'_>> {
    let mut analyzer = Analyzer {
        groups: BitSet::new(),
        max_group: None,
    };
    let info = analyzer.visit(expr)?;
    // slots 0 and 1 hold the overall match; group id g owns 2*(g+1), 2*(g+1)+1
    let n_group_slots = 2 * analyzer.max_group.map_or(1, |g| g + 2);
    Ok(Analysis {
        info,
        n_group_slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn min_width_of_concat() {
        let e = Expr::concat(vec![
            Expr::any(),
            Expr::star(Expr::any()),
            Expr::times(Expr::any(), 2),
        ]);
        let analysis = analyze(&e).unwrap();
        assert_eq!(analysis.info.min_width, 3);
    }

    #[test]
    fn min_width_of_alt_is_smallest_arm() {
        let e = Expr::alt(vec![Expr::times(Expr::any(), 3), Expr::any()]);
        assert_eq!(analyze(&e).unwrap().info.min_width, 1);
    }

    #[test]
    fn empty_alt_never_matches() {
        let e = Expr::alt(Vec::new());
        assert_eq!(analyze(&e).unwrap().info.min_width, usize::MAX);
    }

    #[test]
    fn duplicate_group_rejected() {
        let e = Expr::group(1, Expr::any()).then(Expr::group(1, Expr::any()));
        assert_matches!(
            analyze(&e),
            Err(Error::CompileError(CompileError::DuplicateGroup(1)))
        );
    }

    #[test]
    fn group_slots_cover_highest_id() {
        let e = Expr::group(0, Expr::any()).then(Expr::group(3, Expr::any()));
        assert_eq!(analyze(&e).unwrap().n_group_slots, 10);
        let e = Expr::any();
        assert_eq!(analyze(&e).unwrap().n_group_slots, 2);
    }
}
