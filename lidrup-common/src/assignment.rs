//! Abstractions for the partial assignment and the literal marks

use crate::{
    config,
    literal::{Literal, Variable},
    memory::{Array, HeapSpace, Vector},
};
use std::{fmt, fmt::Display};

/// The current partial assignment, with the trail of assigned literals.
///
/// Values are `-1` (falsified), `0` (unassigned) or `+1` (satisfied),
/// indexed by literal, so `value(l) == -value(-l)` holds at all times.
/// The trail records assignment order for backtracking.
#[derive(Debug, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Array<Literal, i8>,
    trail: Vector<Literal>,
}

impl Assignment {
    pub fn new(maxvar: Variable) -> Assignment {
        Assignment {
            values: Array::new(0, maxvar.array_size_for_literals()),
            trail: Vector::new(),
        }
    }
    /// Reallocate the value array after importing a bigger variable.
    pub fn grow(&mut self, maxvar: Variable) {
        if maxvar.array_size_for_literals() > self.values.size() {
            self.values.grow(0, maxvar.array_size_for_literals());
        }
    }
    pub fn value(&self, literal: Literal) -> i8 {
        self.values[literal]
    }
    /// Assign a literal, making it satisfied and its negation falsified.
    pub fn assign(&mut self, literal: Literal) {
        requires!(self.values[literal] == 0);
        requires!(self.values[-literal] == 0);
        self.trail.push(literal);
        self.values[-literal] = -1;
        self.values[literal] = 1;
    }
    /// Unassign everything, truncating the trail to empty.
    pub fn backtrack(&mut self) {
        for i in 0..self.trail.len() {
            let literal = self.trail[i];
            invariant!(self.values[literal] > 0);
            invariant!(self.values[-literal] < 0);
            self.values[literal] = 0;
            self.values[-literal] = 0;
        }
        self.trail.clear();
    }
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Assignment: {{ ")?;
        for literal in &self.trail {
            write!(f, "{} ", literal)?;
        }
        write!(f, "}}")
    }
}

impl HeapSpace for Assignment {
    fn heap_space(&self) -> usize {
        self.values.heap_space() + self.trail.heap_space()
    }
}

/// A shared scratch array of literal marks, supporting set semantics on
/// the small literal sequences of parsed lines.
///
/// Every operation leaves all marks false on return, including failure
/// paths, so the single array can be shared by all line checks.
#[derive(Debug, Default)]
pub struct Marks {
    marks: Array<Literal, bool>,
}

impl Marks {
    pub fn new(maxvar: Variable) -> Marks {
        Marks {
            marks: Array::new(false, maxvar.array_size_for_literals()),
        }
    }
    /// Reallocate the mark array after importing a bigger variable.
    pub fn grow(&mut self, maxvar: Variable) {
        if maxvar.array_size_for_literals() > self.marks.size() {
            self.marks.grow(false, maxvar.array_size_for_literals());
        }
    }
    fn mark_all(&mut self, literals: &[Literal]) {
        for &literal in literals {
            self.marks[literal] = true;
        }
    }
    fn unmark_all(&mut self, literals: &[Literal]) {
        for &literal in literals {
            self.marks[literal] = false;
        }
    }
    /// Sanity check that an operation left no mark behind.
    fn check_clean(&self) {
        if config::CHECK_TRAIL_INVARIANTS {
            invariant!(self.marks.iter().all(|&marked| !marked));
        }
    }
    /// Return whether every literal of `a` also occurs in `b`.
    pub fn subset(&mut self, a: &[Literal], b: &[Literal]) -> bool {
        self.mark_all(b);
        let result = a.iter().all(|&literal| self.marks[literal]);
        self.unmark_all(b);
        self.check_clean();
        result
    }
    /// Return whether `a` and `b` contain the same set of literals.
    pub fn matches(&mut self, a: &[Literal], b: &[Literal]) -> bool {
        self.subset(a, b) && self.subset(b, a)
    }
    /// Return whether some variable occurs in both polarities.
    pub fn tautological(&mut self, literals: &[Literal]) -> bool {
        let mut result = false;
        for &literal in literals {
            if !self.marks[literal] {
                if self.marks[-literal] {
                    result = true;
                }
                self.marks[literal] = true;
            }
        }
        self.unmark_all(literals);
        self.check_clean();
        result
    }
    /// Find a literal whose negation occurs earlier in the sequence.
    ///
    /// Returns `None` for consistent lines (`m`, `u`, `v` and `f`
    /// conclusions must be consistent).
    pub fn find_clashing_pair(&mut self, literals: &[Literal]) -> Option<Literal> {
        let mut result = None;
        for &literal in literals {
            if self.marks[-literal] {
                result = Some(literal);
                break;
            }
            self.marks[literal] = true;
        }
        self.unmark_all(literals);
        self.check_clean();
        result
    }
    /// Find a literal of `other` whose negation occurs in `literals`.
    pub fn find_clash_with(&mut self, literals: &[Literal], other: &[Literal]) -> Option<Literal> {
        self.mark_all(literals);
        let mut result = None;
        for &literal in other {
            if self.marks[-literal] {
                result = Some(literal);
                break;
            }
        }
        self.unmark_all(literals);
        self.check_clean();
        result
    }
    /// Find a literal of `literals` that does not occur in `within`.
    ///
    /// Returns `None` when `literals` is a subset of `within`; the
    /// offending literal otherwise, for the error message.
    pub fn find_missing_literal(
        &mut self,
        literals: &[Literal],
        within: &[Literal],
    ) -> Option<Literal> {
        self.mark_all(within);
        let mut result = None;
        for &literal in literals {
            if !self.marks[literal] {
                result = Some(literal);
                break;
            }
        }
        self.unmark_all(within);
        self.check_clean();
        result
    }
    /// Find a literal of `literals` whose variable does not occur in
    /// `within`, in either polarity.
    pub fn find_missing_variable(
        &mut self,
        literals: &[Literal],
        within: &[Literal],
    ) -> Option<Literal> {
        self.mark_all(within);
        let mut result = None;
        for &literal in literals {
            if !self.marks[literal] && !self.marks[-literal] {
                result = Some(literal);
                break;
            }
        }
        self.unmark_all(within);
        self.check_clean();
        result
    }
    /// Run `check` on each clause with the literals of `literals` marked.
    ///
    /// This powers the model check: the callback reports the first clause
    /// not satisfied by the marked assignment.
    pub fn with_marked<R>(
        &mut self,
        literals: &[Literal],
        check: impl FnOnce(&Array<Literal, bool>) -> R,
    ) -> R {
        self.mark_all(literals);
        let result = check(&self.marks);
        self.unmark_all(literals);
        self.check_clean();
        result
    }
}

impl HeapSpace for Marks {
    fn heap_space(&self) -> usize {
        self.marks.heap_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(values: &[i32]) -> Vec<Literal> {
        values.iter().map(|&value| Literal::new(value)).collect()
    }

    #[test]
    fn values_are_antisymmetric() {
        let mut assignment = Assignment::new(Variable::new(4));
        assignment.assign(Literal::new(3));
        assignment.assign(Literal::new(-2));
        for &value in &[3, -3, 2, -2] {
            let literal = Literal::new(value);
            assert_eq!(assignment.value(literal), -assignment.value(-literal));
        }
        assert_eq!(assignment.value(Literal::new(3)), 1);
        assert_eq!(assignment.value(Literal::new(2)), -1);
        assert_eq!(assignment.value(Literal::new(4)), 0);
    }

    #[test]
    fn backtrack_unassigns_everything() {
        let mut assignment = Assignment::new(Variable::new(3));
        assignment.assign(Literal::new(1));
        assignment.assign(Literal::new(-3));
        assert!(!assignment.is_empty());
        assignment.backtrack();
        assert!(assignment.is_empty());
        for &value in &[1, -1, 3, -3] {
            assert_eq!(assignment.value(Literal::new(value)), 0);
        }
    }

    #[test]
    fn subset_and_matches() {
        let mut marks = Marks::new(Variable::new(5));
        assert!(marks.subset(&lits(&[1, -3]), &lits(&[-3, 5, 1])));
        assert!(!marks.subset(&lits(&[1, 3]), &lits(&[-3, 5, 1])));
        assert!(marks.matches(&lits(&[2, -4]), &lits(&[-4, 2])));
        assert!(!marks.matches(&lits(&[2, -4]), &lits(&[-4, 2, 1])));
        assert!(marks.subset(&[], &lits(&[1])));
    }

    #[test]
    fn tautology_and_consistency() {
        let mut marks = Marks::new(Variable::new(5));
        assert!(marks.tautological(&lits(&[1, -2, -1])));
        assert!(!marks.tautological(&lits(&[1, -2, 1])));
        assert_eq!(
            marks.find_clashing_pair(&lits(&[1, -2, 2])),
            Some(Literal::new(2))
        );
        assert_eq!(marks.find_clashing_pair(&lits(&[1, -2, 1])), None);
        assert_eq!(
            marks.find_clash_with(&lits(&[1, -2]), &lits(&[3, 2])),
            Some(Literal::new(2))
        );
        assert_eq!(marks.find_clash_with(&lits(&[1, -2]), &lits(&[3, -2])), None);
    }

    #[test]
    fn subset_queries_report_the_offender() {
        let mut marks = Marks::new(Variable::new(5));
        assert_eq!(
            marks.find_missing_literal(&lits(&[1, 4]), &lits(&[1, 2])),
            Some(Literal::new(4))
        );
        assert_eq!(marks.find_missing_literal(&lits(&[1]), &lits(&[1, 2])), None);
        assert_eq!(
            marks.find_missing_variable(&lits(&[-1, 3]), &lits(&[1, 2])),
            Some(Literal::new(3))
        );
        assert_eq!(
            marks.find_missing_variable(&lits(&[-1, -2]), &lits(&[1, 2])),
            None
        );
    }
}
