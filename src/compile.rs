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

//! Compilation of a pattern expression into a VM program.

use crate::analyze::{analyze, Info};
use crate::vm::{group_slot, Insn, Prog};
use crate::Expr;
use crate::Result;

/// Compile an expression tree into a runnable program.
pub(crate) fn compile(expr: &Expr) -> Result<Prog> {
    let analysis = analyze(expr)?;
    let mut c = Compiler {
        body: Vec::new(),
        next_slot: analysis.n_group_slots,
    };
    c.body.push(Insn::Save(0));
    c.visit(&analysis.info);
    c.body.push(Insn::Save(1));
    c.body.push(Insn::End);
    Ok(Prog::new(
        c.body,
        c.next_slot,
        analysis.n_group_slots,
        analysis.info.min_width,
    ))
}

struct Compiler {
    body: Vec<Insn>,
    next_slot: usize,
}

impl Compiler {
    fn pc(&self) -> usize {
        self.body.len()
    }

    fn new_slot(&mut self) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    fn set_split_second(&mut self, pc: usize, target: usize) {
        if let Insn::Split(_, ref mut second) = self.body[pc] {
            *second = target;
        }
    }

    fn set_jmp(&mut self, pc: usize, target: usize) {
        if let Insn::Jmp(ref mut t) = self.body[pc] {
            *t = target;
        }
    }

    fn set_repeat_next(&mut self, pc: usize, target: usize) {
        match self.body[pc] {
            Insn::Repeat { ref mut next, .. } | Insn::RepeatEpsilon { ref mut next, .. } => {
                *next = target;
            }
            _ => {}
        }
    }

    fn visit(&mut self, info: &Info<'_>) {
        match *info.expr {
            Expr::Empty => {}
            Expr::Any => self.body.push(Insn::Any),
            Expr::Token(ref matcher) => self.body.push(Insn::Token(matcher.clone())),
            Expr::Assertion(assertion) => self.body.push(Insn::Assertion(assertion)),
            Expr::Concat(_) => {
                for child in &info.children {
                    self.visit(child);
                }
            }
            Expr::Alt(_) => self.visit_alt(info),
            Expr::Group { id, .. } => {
                let slots = group_slot(id);
                self.body.push(Insn::Save(slots.start));
                self.visit(&info.children[0]);
                self.body.push(Insn::Save(slots.start + 1));
            }
            Expr::Repeat { lo, hi, greedy, .. } => self.visit_repeat(info, lo, hi, greedy),
        }
    }

    fn visit_alt(&mut self, info: &Info<'_>) {
        let count = info.children.len();
        if count == 0 {
            self.body.push(Insn::Fail);
            return;
        }
        if count == 1 {
            self.visit(&info.children[0]);
            return;
        }
        let mut jmps = Vec::with_capacity(count - 1);
        for child in &info.children[..count - 1] {
            let split_pc = self.pc();
            self.body.push(Insn::Split(split_pc + 1, usize::MAX));
            self.visit(child);
            jmps.push(self.pc());
            self.body.push(Insn::Jmp(usize::MAX));
            let next = self.pc();
            self.set_split_second(split_pc, next);
        }
        self.visit(&info.children[count - 1]);
        let end = self.pc();
        for jmp_pc in jmps {
            self.set_jmp(jmp_pc, end);
        }
    }

    fn visit_repeat(&mut self, info: &Info<'_>, lo: usize, hi: usize, greedy: bool) {
        let child = &info.children[0];
        if hi == 0 {
            // repeat(_, 0, 0): matches zero tokens, the child is unreachable
            return;
        }
        if lo == 0 && hi == 1 {
            let split_pc = self.pc();
            self.body.push(Insn::Split(usize::MAX, usize::MAX));
            let body = self.pc();
            self.visit(child);
            let next = self.pc();
            self.body[split_pc] = if greedy {
                Insn::Split(body, next)
            } else {
                Insn::Split(next, body)
            };
            return;
        }
        let repeat = self.new_slot();
        self.body.push(Insn::Save0(repeat));
        let repeat_pc = self.pc();
        if hi == usize::MAX && child.min_width == 0 {
            // the child can match empty, guard against a zero-width loop
            let check = self.new_slot();
            self.body.push(Insn::RepeatEpsilon {
                lo,
                next: usize::MAX,
                repeat,
                check,
                greedy,
            });
        } else {
            self.body.push(Insn::Repeat {
                lo,
                hi,
                next: usize::MAX,
                repeat,
                greedy,
            });
        }
        self.visit(child);
        self.body.push(Insn::Jmp(repeat_pc));
        let next = self.pc();
        self.set_repeat_next(repeat_pc, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insn_names(prog: &Prog) -> Vec<&'static str> {
        prog.body
            .iter()
            .map(|insn| match insn {
                Insn::End => "End",
                Insn::Any => "Any",
                Insn::Token(_) => "Token",
                Insn::Assertion(_) => "Assertion",
                Insn::Fail => "Fail",
                Insn::Split(..) => "Split",
                Insn::Jmp(_) => "Jmp",
                Insn::Save(_) => "Save",
                Insn::Save0(_) => "Save0",
                Insn::Repeat { .. } => "Repeat",
                Insn::RepeatEpsilon { .. } => "RepeatEpsilon",
            })
            .collect()
    }

    #[test]
    fn compile_alt_shape() {
        let prog = compile(&Expr::text("a").or(Expr::text("b"))).unwrap();
        assert_eq!(
            insn_names(&prog),
            ["Save", "Split", "Token", "Jmp", "Token", "Save", "End"]
        );
    }

    #[test]
    fn compile_star_of_token_uses_plain_repeat() {
        let prog = compile(&Expr::star(Expr::any())).unwrap();
        assert_eq!(
            insn_names(&prog),
            ["Save", "Save0", "Repeat", "Any", "Jmp", "Save", "End"]
        );
    }

    #[test]
    fn compile_star_of_nullable_guards_empty_loop() {
        let prog = compile(&Expr::star(Expr::opt(Expr::any()))).unwrap();
        assert!(insn_names(&prog).contains(&"RepeatEpsilon"));
    }

    #[test]
    fn compile_empty_alt_always_fails() {
        let prog = compile(&Expr::alt(Vec::new())).unwrap();
        assert!(insn_names(&prog).contains(&"Fail"));
        assert_eq!(prog.min_width, usize::MAX);
    }

    #[test]
    fn group_slots_follow_identity() {
        let prog = compile(&Expr::group(2, Expr::any())).unwrap();
        let saves: Vec<usize> = prog
            .body
            .iter()
            .filter_map(|insn| match insn {
                Insn::Save(slot) => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(saves, [0, 6, 7, 1]);
        assert_eq!(prog.n_group_slots, 8);
    }
}
