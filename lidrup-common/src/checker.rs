//! The checker state machine driving all other components
//!
//! One line is read per transition, from the stream the current state
//! selects. Interaction lines are saved and matched against the proof,
//! clause lifecycle lines mutate the identifier tables, and conclusions
//! run the RUP propagator and the model checks.

use crate::{
    assignment::{Assignment, Marks},
    clause::{puts_clause_with_id, Clause},
    clausedatabase::ClauseDatabase,
    hashtable::{BitTable, IdentifierTable},
    literal::{Literal, Variable},
    memory::{format_memory_usage, Array, HeapSpace, Offset, Vector},
    output::{print_key_value, unreachable, Error, Result},
    parser::{File, Format, Line, Parsed, Status, Type},
};
use std::{fmt, time::Instant};

/// The three checking modes.
///
/// Strict is the default; pedantic additionally requires the headers.
/// Relaxed is accepted and currently behaves like strict, which is what
/// the format describes as tolerating missing proof conclusions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Strict,
    Relaxed,
    Pedantic,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Mode::Strict => "strict",
                Mode::Relaxed => "relaxed",
                Mode::Pedantic => "pedantic",
            }
        )
    }
}

/// Run-time options of the checker.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub mode: Mode,
    /// Forbid reusing clause identifiers ever.
    pub no_reuse: bool,
    /// -1 = quiet, 0 = default, positive = verbose.
    pub verbosity: i32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            mode: Mode::Strict,
            no_reuse: false,
            verbosity: 0,
        }
    }
}

/// Counters reported at the end of the run.
#[derive(Debug, Default)]
pub struct Statistics {
    pub added: usize,
    pub checks: usize,
    pub conclusions: usize,
    pub cores: usize,
    pub deleted: usize,
    pub inputs: usize,
    pub imported: usize,
    pub lemmas: usize,
    pub models: usize,
    pub queries: usize,
    pub resolutions: usize,
    pub restored: usize,
    pub weakened: usize,
}

/// Which stream to read the next line from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Source {
    Interactions,
    Proof,
}

/// The states of the checker state machine.
///
/// Every transition reads one line; an impossible fall-through raises a
/// fatal error instead of transitioning.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum State {
    InteractionHeader,
    ProofHeader,
    InteractionInput,
    ProofInput,
    ProofQuery,
    ProofCheck,
    InteractionPropagate,
    InteractionSatisfiable,
    InteractionUnsatisfiable,
    InteractionUnknown,
    InteractionSatisfied,
    InteractionUnsatisfied,
    ProofModel,
    ProofCore,
    Done,
}

/// The checker, owning both streams and all checking state.
pub struct Checker<'a> {
    interactions: Option<File<'a>>,
    proof: File<'a>,
    mode: Mode,
    no_reuse: bool,
    verbosity: i32,
    /// The stream the most recent line was read from, for error messages.
    current: Source,
    /// The integers of the most recent line.
    line: Line,
    /// Copy of the last interaction line used for cross-stream matching.
    saved: Vector<Literal>,
    saved_type: Option<Type>,
    start_of_saved: usize,
    /// The assumptions of the current query.
    query: Vector<Literal>,
    start_of_query: usize,
    querying: bool,
    query_start: Option<Instant>,
    /// Set once an empty lemma has been derived.
    inconsistent: bool,
    max_var: Variable,
    /// Allocated variable capacity (>= `max_var`).
    allocated: usize,
    imported: Array<Variable, bool>,
    assignment: Assignment,
    marks: Marks,
    clause_db: ClauseDatabase,
    /// Maps identifiers of active clauses to clauses.
    active: IdentifierTable,
    /// Maps identifiers of weakened clauses to clauses.
    inactive: IdentifierTable,
    /// Every identifier ever introduced, under `--no-reuse`.
    used: BitTable,
    /// Input clauses in introduction order, for the model check.
    input_clauses: Vector<Clause>,
    pub statistics: Statistics,
}

impl<'a> Checker<'a> {
    pub fn new(
        interactions: Option<File<'a>>,
        proof: File<'a>,
        options: Options,
    ) -> Checker<'a> {
        let mut interactions = interactions;
        let mut proof = proof;
        let quiet = options.verbosity < 0;
        if let Some(file) = interactions.as_mut() {
            file.quiet = quiet;
        }
        proof.quiet = quiet;
        Checker {
            interactions,
            proof,
            mode: options.mode,
            no_reuse: options.no_reuse,
            verbosity: options.verbosity,
            current: Source::Proof,
            line: Line::new(),
            saved: Vector::new(),
            saved_type: None,
            start_of_saved: 0,
            query: Vector::new(),
            start_of_query: 0,
            querying: false,
            query_start: None,
            inconsistent: false,
            max_var: Variable::new(0),
            allocated: 0,
            imported: Array::default(),
            assignment: Assignment::default(),
            marks: Marks::default(),
            clause_db: ClauseDatabase::new(),
            active: IdentifierTable::new(),
            inactive: IdentifierTable::new(),
            used: BitTable::new(),
            input_clauses: Vector::new(),
            statistics: Statistics::default(),
        }
    }

    /// Run the checker to completion.
    pub fn check(&mut self) -> Result<()> {
        if self.interactions.is_some() {
            self.check_interactions_and_proof()
        } else {
            self.check_proof_only()
        }
    }

    /*----------------------------------------------------------------*/

    fn file(&self, source: Source) -> &File<'a> {
        match source {
            Source::Interactions => match self.interactions.as_ref() {
                Some(file) => file,
                None => unreachable(),
            },
            Source::Proof => &self.proof,
        }
    }

    fn other_file_name(&self) -> &str {
        match self.current {
            Source::Interactions => self.proof.name(),
            Source::Proof => match self.interactions.as_ref() {
                Some(file) => file.name(),
                None => self.proof.name(),
            },
        }
    }

    /// The file the query came from, for conclusion error messages.
    fn query_file_name(&self) -> &str {
        match self.interactions.as_ref() {
            Some(file) => file.name(),
            None => self.proof.name(),
        }
    }

    /// Read one line from the selected stream and import its variables.
    fn next_line(&mut self, source: Source, default_type: Option<Type>) -> Result<Parsed> {
        self.current = source;
        let file = match source {
            Source::Interactions => match self.interactions.as_mut() {
                Some(file) => file,
                None => unreachable(),
            },
            Source::Proof => &mut self.proof,
        };
        let parsed = file.next_line(default_type, &mut self.line)?;
        for i in 0..self.line.lits.len() {
            let variable = self.line.lits[i].variable();
            self.import_variable(variable);
        }
        Ok(parsed)
    }

    /// Import a variable at its first mention, growing the value, mark and
    /// imported arrays geometrically.
    fn import_variable(&mut self, variable: Variable) {
        if variable > self.max_var {
            if variable.as_offset() >= self.allocated {
                let mut new_allocated = if self.allocated == 0 {
                    1
                } else {
                    2 * self.allocated
                };
                while variable.as_offset() >= new_allocated {
                    new_allocated *= 2;
                }
                let capacity = Variable::new(new_allocated as u32);
                self.imported
                    .grow(false, capacity.array_size_for_variables());
                self.assignment.grow(capacity);
                self.marks.grow(capacity);
                self.allocated = new_allocated;
            }
            self.max_var = variable;
        }
        if !self.imported[variable] {
            self.imported[variable] = true;
            self.statistics.imported += 1;
        }
    }

    /*----------------------------------------------------------------*/

    /// Raise a parse error for a line type the current state does not
    /// expect (or a premature end-of-file).
    fn unexpected_line<T>(&self, parsed: Parsed, expected: &str) -> Result<T> {
        let message = match parsed {
            Parsed::EndOfFile => format!("unexpected end-of-file (expected {} line)", expected),
            Parsed::Header(_) => format!("unexpected 'p' line (expected {} line)", expected),
            Parsed::Status(_) => format!("unexpected 's' line (expected {} line)", expected),
            Parsed::Line(line_type) => format!(
                "unexpected '{}' line (expected {} line)",
                line_type, expected
            ),
        };
        self.file(self.current).parse_error(message)
    }

    /// Raise a check error at the current line.
    fn check_error<T>(&self, message: String) -> Result<T> {
        self.file(self.current).check_error(message)
    }

    /// Raise a line error, echoing the offending line.
    fn line_error<T>(&self, line_type: Type, message: String) -> Result<T> {
        let mut context = String::new();
        context.push(line_type.letter());
        if line_type.has_id() && self.line.id != 0 {
            context += &format!(" {}", self.line.id);
        }
        if line_type.has_lits() {
            for &literal in &self.line.lits {
                context += &format!(" {}", literal);
            }
            context += " 0";
        }
        if line_type.has_ids() {
            for &id in &self.line.ids {
                context += &format!(" {}", id);
            }
            context += " 0";
        }
        let file = self.file(self.current);
        Err(Error::Line {
            file: file.name().to_string(),
            line: file.start_of_line(),
            message,
            context,
        })
    }

    fn fatal_error<T>(&self, message: &str) -> Result<T> {
        Err(Error::Fatal(message.to_string()))
    }

    /*----------------------------------------------------------------*/

    /// Save the current line for matching against the other stream.
    fn save_line(&mut self, line_type: Type) {
        self.saved.clear();
        for &literal in &self.line.lits {
            self.saved.push(literal);
        }
        self.saved_type = Some(line_type);
        self.start_of_saved = self.file(self.current).start_of_line();
    }

    /// Save the current line as the assumptions of a new query.
    fn save_query(&mut self) {
        self.query.clear();
        for &literal in &self.line.lits {
            self.query.push(literal);
        }
        self.start_of_query = self.file(self.current).start_of_line();
        self.statistics.queries += 1;
    }

    /// Check that the current line equals the saved line as a set.
    fn match_saved(&mut self, line_type: Type, type_str: &str) -> Result<()> {
        if !self.marks.matches(&self.line.lits, &self.saved) {
            let saved_type = match self.saved_type {
                Some(saved_type) => saved_type,
                None => unreachable(),
            };
            return self.check_error(format!(
                "{} '{}' line does not match '{}' line {} in '{}'",
                type_str,
                line_type,
                saved_type,
                self.start_of_saved,
                self.other_file_name()
            ));
        }
        Ok(())
    }

    /// Accept a header if it is the first line of its file and names the
    /// expected format.
    fn match_header(&mut self, source: Source, format: Format, expected: Format) -> Result<bool> {
        if self.file(source).lines() > 1 {
            return Ok(false);
        }
        if format != expected {
            return self.file(source).parse_error(format!(
                "expected '{}' header and not 'p {}' (input files swapped?)",
                expected, format
            ));
        }
        if self.verbosity > 0 {
            comment!("found '{}' header in '{}'", format, self.file(source).name());
        }
        Ok(true)
    }

    /*----------------------------------------------------------------*/

    fn start_query(&mut self) -> Result<()> {
        if self.querying {
            return self.fatal_error("query already started");
        }
        if self.verbosity > 0 {
            self.query_start = Some(Instant::now());
        }
        self.querying = true;
        Ok(())
    }

    fn conclude_query(&mut self, result: i32) -> Result<()> {
        if !self.querying {
            return self.fatal_error("query already concluded");
        }
        if self.verbosity > 0 {
            let seconds = self
                .query_start
                .map_or(0.0, |start| start.elapsed().as_secs_f64());
            comment!(
                "concluded query {} with {} in {:.2} seconds",
                self.statistics.queries,
                result,
                seconds
            );
        }
        self.querying = false;
        Ok(())
    }

    /*----------------------------------------------------------------*/

    /// Make sure the identifier of the current line can introduce a
    /// clause under the reuse policy.
    fn check_unused(&mut self, line_type: Type) -> Result<()> {
        let id = self.line.id;
        requires!(id > 0);
        if self.no_reuse {
            if self.used.contains(id) {
                return self.line_error(
                    line_type,
                    format!("clause identifier {} already used", id),
                );
            }
            self.used.insert(id);
        } else {
            if self.active.find(&self.clause_db, id).is_some() {
                return self.line_error(
                    line_type,
                    format!("clause identifier {} actively in use", id),
                );
            }
            if self.inactive.find(&self.clause_db, id).is_some() {
                return self.line_error(
                    line_type,
                    format!("clause identifier {} inactive but in use", id),
                );
            }
        }
        Ok(())
    }

    /// Copy the current line into the clause store.
    fn allocate_clause(&mut self, input: bool) -> Clause {
        let tautological = self.marks.tautological(&self.line.lits);
        let lineno = self.file(self.current).start_of_line();
        let clause = self.clause_db.add_clause(
            self.line.id,
            lineno,
            &self.line.lits,
            input,
            tautological,
        );
        if input {
            self.input_clauses.push(clause);
        }
        if self.verbosity > 1 {
            puts!("c added {} clause ", if input { "input" } else { "lemma" });
            puts_clause_with_id(self.line.id, &self.line.lits);
            puts!("\n");
        }
        self.statistics.added += 1;
        clause
    }

    fn add_input_clause(&mut self, line_type: Type) -> Result<()> {
        self.check_unused(line_type)?;
        let clause = self.allocate_clause(true);
        self.active.insert(&self.clause_db, clause);
        self.statistics.inputs += 1;
        Ok(())
    }

    fn check_then_add_lemma(&mut self, line_type: Type) -> Result<()> {
        self.check_unused(line_type)?;
        self.check_implied(line_type, "lemma", 1)?;
        let clause = self.allocate_clause(false);
        self.active.insert(&self.clause_db, clause);
        self.statistics.lemmas += 1;
        if self.line.lits.is_empty() {
            self.inconsistent = true;
        }
        Ok(())
    }

    fn find_then_delete_clauses(&mut self, line_type: Type) -> Result<()> {
        for i in 0..self.line.ids.len() {
            let id = self.line.ids[i];
            match self.active.find(&self.clause_db, id) {
                Some(clause) => {
                    invariant!(!self.clause_db.is_weakened(clause));
                    self.active.remove(&self.clause_db, clause);
                    self.statistics.deleted += 1;
                }
                None => {
                    return self.line_error(
                        line_type,
                        format!("could not find and delete clause {}", id),
                    )
                }
            }
        }
        Ok(())
    }

    fn find_then_weaken_clauses(&mut self, line_type: Type) -> Result<()> {
        for i in 0..self.line.ids.len() {
            let id = self.line.ids[i];
            match self.active.find(&self.clause_db, id) {
                Some(clause) => {
                    invariant!(!self.clause_db.is_weakened(clause));
                    self.clause_db.set_weakened(clause, true);
                    self.active.remove(&self.clause_db, clause);
                    self.inactive.insert(&self.clause_db, clause);
                    self.statistics.weakened += 1;
                }
                None => {
                    return self.line_error(
                        line_type,
                        format!("could not find and weaken clause {}", id),
                    )
                }
            }
        }
        Ok(())
    }

    fn find_then_restore_clauses(&mut self, line_type: Type) -> Result<()> {
        for i in 0..self.line.ids.len() {
            let id = self.line.ids[i];
            match self.inactive.find(&self.clause_db, id) {
                Some(clause) => {
                    invariant!(self.clause_db.is_weakened(clause));
                    self.inactive.remove(&self.clause_db, clause);
                    self.active.insert(&self.clause_db, clause);
                    self.clause_db.set_weakened(clause, false);
                    self.statistics.restored += 1;
                }
                None => {
                    return self.line_error(
                        line_type,
                        format!("could not find and restore weakened clause {}", id),
                    )
                }
            }
        }
        Ok(())
    }

    fn is_input_learn_delete_restore_or_weaken(line_type: Type) -> bool {
        matches!(
            line_type,
            Type::Input | Type::Lemma | Type::Delete | Type::Restore | Type::Weaken
        )
    }

    fn learn_delete_restore_or_weaken(&mut self, line_type: Type) -> Result<()> {
        match line_type {
            Type::Lemma => self.check_then_add_lemma(line_type),
            Type::Delete => self.find_then_delete_clauses(line_type),
            Type::Restore => self.find_then_restore_clauses(line_type),
            Type::Input => self.add_input_clause(line_type),
            Type::Weaken => self.find_then_weaken_clauses(line_type),
            _ => unreachable(),
        }
    }

    /*----------------------------------------------------------------*/

    /// The essential checking function: verify that the current line is
    /// implied by reverse unit propagation over its antecedents.
    ///
    /// With `sign = 1` the literals of the line are assumed negatively
    /// (lemma check); with `sign = -1` they are assigned positively
    /// (unsatisfiable core check). The antecedents are resolved in listed
    /// order and must produce a conflict.
    fn check_implied(&mut self, line_type: Type, type_str: &str, sign: i32) -> Result<()> {
        invariant!(sign == 1 || sign == -1);
        if self.inconsistent {
            return Ok(());
        }
        self.statistics.checks += 1;
        let implied = self.propagate_antecedents(line_type, sign);
        self.assignment.backtrack();
        match implied {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.line_error(line_type, format!("{} resolution check failed:", type_str))
            }
            Err(err) => Err(err),
        }
    }

    /// Returns true if a conflict was derived, false if the antecedent
    /// list was exhausted without one.
    fn propagate_antecedents(&mut self, line_type: Type, sign: i32) -> Result<bool> {
        for i in 0..self.line.lits.len() {
            let literal = self.line.lits[i];
            let signed_literal = if sign < 0 { -literal } else { literal };
            let value = self.assignment.value(signed_literal);
            if value < 0 {
                // Duplicated literal, already assigned.
                continue;
            }
            if value > 0 {
                // The line is tautological and thus trivially implied.
                return Ok(true);
            }
            self.assignment.assign(-signed_literal);
        }

        for i in 0..self.line.ids.len() {
            let id = self.line.ids[i];
            if id < 0 {
                return self
                    .line_error(line_type, format!("negative antecedent {} unsupported", id));
            }
            let clause = match self.active.find(&self.clause_db, id) {
                Some(clause) => clause,
                None => {
                    if self.inactive.find(&self.clause_db, id).is_some() {
                        return self.line_error(line_type, format!("antecedent {} weakened", id));
                    }
                    return self
                        .line_error(line_type, format!("could not find antecedent {}", id));
                }
            };
            self.statistics.resolutions += 1;
            // The antecedent must simplify to a unit (which gets assigned)
            // or be fully falsified (the conflict that closes the check).
            let mut unit: Option<Literal> = None;
            let mut not_resolvable = false;
            {
                let clause_db = &self.clause_db;
                let assignment = &mut self.assignment;
                for &literal in clause_db.clause(clause) {
                    let value = assignment.value(literal);
                    if value < 0 {
                        continue;
                    }
                    if let Some(unit_literal) = unit {
                        if unit_literal != literal {
                            not_resolvable = true;
                            break;
                        }
                    }
                    unit = Some(literal);
                    if value == 0 {
                        assignment.assign(literal);
                    }
                }
            }
            if not_resolvable {
                return self.line_error(line_type, format!("antecedent {} not resolvable", id));
            }
            if unit.is_none() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /*----------------------------------------------------------------*/

    /// Check that there are no clashing literals in the current line.
    fn check_line_consistency(&mut self, line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_clashing_pair(&self.line.lits) {
            return self.check_error(format!(
                "inconsistent '{}' line with literals {} and {}",
                line_type, -literal, literal
            ));
        }
        Ok(())
    }

    /// Check that no literal of the current line clashes with a literal
    /// of the saved line.
    fn check_line_consistent_with_saved(&mut self, line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_clash_with(&self.line.lits, &self.saved) {
            return self.check_error(format!(
                "inconsistent '{}' line on literal {} with line {} in '{}'",
                line_type,
                literal,
                self.start_of_saved,
                self.other_file_name()
            ));
        }
        Ok(())
    }

    /// Check that every assumption of the query appears in the line.
    fn check_line_satisfies_query(&mut self, _line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_missing_literal(&self.query, &self.line.lits) {
            return self.check_error(format!(
                "model does not satisfy query literal {} at line {} in '{}'",
                literal,
                self.start_of_query,
                self.query_file_name()
            ));
        }
        Ok(())
    }

    /// Check that the core is a subset of the query assumptions.
    fn check_core_subset_of_query(&mut self, _line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_missing_literal(&self.line.lits, &self.query) {
            return self.check_error(format!(
                "core literal {} not in query at line {} in '{}'",
                literal,
                self.start_of_query,
                self.query_file_name()
            ));
        }
        Ok(())
    }

    /// Check that every variable of the line occurs in the query.
    fn check_line_variables_subset_of_query(&mut self, _line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_missing_variable(&self.line.lits, &self.query) {
            return self.check_error(format!(
                "literal {} nor {} in query at line {} in '{}'",
                literal,
                -literal,
                self.start_of_query,
                self.query_file_name()
            ));
        }
        Ok(())
    }

    /// Check that no literal of the proof core occurs negated in the
    /// saved failed-assumption line.
    fn check_saved_failed_literals_match_core(&mut self, _line_type: Type) -> Result<()> {
        if let Some(literal) = self.marks.find_clash_with(&self.line.lits, &self.saved) {
            return self.check_error(format!(
                "literal '{}' in this unsatisfiable core 'u' line of the proof \
                 is claimed not to be a failed literal in the 'f' line {} \
                 of the interaction file '{}' (as it occurs negated as '{}' there)",
                -literal,
                self.start_of_saved,
                self.other_file_name(),
                literal
            ));
        }
        Ok(())
    }

    /// Check that the line satisfies every non-tautological input clause.
    fn check_line_satisfies_input_clauses(&mut self, _line_type: Type) -> Result<()> {
        let Checker {
            marks,
            clause_db,
            input_clauses,
            line,
            ..
        } = self;
        let unsatisfied = marks.with_marked(&line.lits, |marked| {
            input_clauses
                .iter()
                .find(|&&clause| {
                    !clause_db.is_tautological(clause)
                        && !clause_db
                            .clause(clause)
                            .iter()
                            .any(|&literal| marked[literal])
                })
                .copied()
        });
        if let Some(clause) = unsatisfied {
            let letter = if self.clause_db.is_input(clause) { 'i' } else { 'l' };
            let mut echo = String::new();
            echo.push(letter);
            for &literal in self.clause_db.clause(clause) {
                echo += &format!(" {}", literal);
            }
            echo += " 0";
            return self.check_error(format!(
                "model does not satisfy {} clause:\n{}",
                if self.clause_db.is_input(clause) {
                    "input"
                } else {
                    "derived"
                },
                echo
            ));
        }
        Ok(())
    }

    /*----------------------------------------------------------------*/

    /// Discharge a satisfiable query against the proof's model line.
    fn conclude_satisfiable_query_with_model(&mut self, line_type: Type) -> Result<()> {
        invariant!(!self.inconsistent);
        self.check_line_consistency(line_type)?;
        self.check_line_satisfies_query(line_type)?;
        self.check_line_satisfies_input_clauses(line_type)?;
        if self.interactions.is_some() {
            self.check_line_consistent_with_saved(line_type)?;
        }
        self.statistics.conclusions += 1;
        self.statistics.models += 1;
        self.conclude_query(10)
    }

    /// Discharge an unsatisfiable query against the proof's core line.
    fn conclude_unsatisfiable_query_with_core(&mut self, line_type: Type) -> Result<()> {
        self.check_core_subset_of_query(line_type)?;
        if self.interactions.is_some() {
            match self.saved_type {
                Some(Type::Core) => self.match_saved(line_type, "unsatisfiable core")?,
                Some(Type::Failed) => self.check_saved_failed_literals_match_core(line_type)?,
                _ => unreachable(),
            }
        }
        self.check_implied(line_type, "unsatisfiable core", -1)?;
        self.statistics.conclusions += 1;
        self.statistics.cores += 1;
        self.conclude_query(20)
    }

    /*----------------------------------------------------------------*/

    /// The parallel interaction and proof checking state machine.
    fn check_interactions_and_proof(&mut self) -> Result<()> {
        if self.verbosity >= 0 {
            comment!(
                "parallel interaction and proof checking in {} mode",
                self.mode
            );
        }
        let mut state = State::InteractionHeader;
        loop {
            state = match state {
                State::InteractionHeader => self.interaction_header()?,
                State::ProofHeader => self.proof_header()?,
                State::InteractionInput => self.interaction_input()?,
                State::ProofInput => self.proof_input()?,
                State::ProofQuery => self.proof_query()?,
                State::ProofCheck => self.proof_check()?,
                State::InteractionPropagate => self.interaction_propagate()?,
                State::InteractionSatisfiable => {
                    self.interaction_status(Status::Satisfiable, State::InteractionSatisfied)?
                }
                State::InteractionUnsatisfiable => {
                    self.interaction_status(Status::Unsatisfiable, State::InteractionUnsatisfied)?
                }
                State::InteractionUnknown => self.interaction_unknown()?,
                State::InteractionSatisfied => self.interaction_satisfied()?,
                State::InteractionUnsatisfied => self.interaction_unsatisfied()?,
                State::ProofModel => self.proof_model()?,
                State::ProofCore => self.proof_core()?,
                State::Done => {
                    if self.verbosity > 0 {
                        comment!("successfully reached end-of-checking");
                    }
                    return Ok(());
                }
            };
        }
    }

    fn interaction_header(&mut self) -> Result<State> {
        if self.mode != Mode::Pedantic {
            return Ok(State::ProofHeader);
        }
        let parsed = self.next_line(Source::Interactions, None)?;
        if let Parsed::Header(format) = parsed {
            if self.match_header(Source::Interactions, format, Format::Icnf)? {
                return Ok(State::ProofHeader);
            }
        }
        self.unexpected_line(parsed, "in pedantic mode 'p icnf' header")
    }

    fn proof_header(&mut self) -> Result<State> {
        if self.mode != Mode::Pedantic {
            return Ok(State::InteractionInput);
        }
        let parsed = self.next_line(Source::Proof, None)?;
        if let Parsed::Header(format) = parsed {
            if self.match_header(Source::Proof, format, Format::Lidrup)? {
                return Ok(State::InteractionInput);
            }
        }
        self.unexpected_line(parsed, "in pedantic mode 'p lidrup' header")
    }

    fn interaction_input(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, Some(Type::Input))?;
        match parsed {
            Parsed::Line(Type::Input) => {
                self.save_line(Type::Input);
                Ok(State::ProofInput)
            }
            Parsed::Line(Type::Query) => {
                self.start_query()?;
                self.save_line(Type::Query);
                self.save_query();
                Ok(State::ProofQuery)
            }
            Parsed::EndOfFile => Ok(State::Done),
            Parsed::Header(format) => {
                if self.match_header(Source::Interactions, format, Format::Icnf)? {
                    Ok(State::InteractionInput)
                } else {
                    self.unexpected_line(parsed, "'i' or 'q'")
                }
            }
            _ => self.unexpected_line(parsed, "'i' or 'q'"),
        }
    }

    fn proof_input(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, Some(Type::Input))?;
        match parsed {
            Parsed::Line(Type::Input) => {
                self.match_saved(Type::Input, "input")?;
                self.add_input_clause(Type::Input)?;
                Ok(State::InteractionInput)
            }
            Parsed::Header(format) => {
                if self.match_header(Source::Proof, format, Format::Lidrup)? {
                    Ok(State::ProofInput)
                } else {
                    self.unexpected_line(parsed, "'i', 'l', 'd', 'w' or 'r'")
                }
            }
            Parsed::Line(line_type)
                if Checker::is_input_learn_delete_restore_or_weaken(line_type) =>
            {
                self.learn_delete_restore_or_weaken(line_type)?;
                Ok(State::ProofInput)
            }
            _ => self.unexpected_line(parsed, "'i', 'l', 'd', 'w' or 'r'"),
        }
    }

    fn proof_query(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, None)?;
        match parsed {
            Parsed::Line(Type::Query) => {
                self.match_saved(Type::Query, "query")?;
                Ok(State::ProofCheck)
            }
            Parsed::Header(format) => {
                if self.match_header(Source::Proof, format, Format::Lidrup)? {
                    Ok(State::ProofQuery)
                } else {
                    self.unexpected_line(parsed, "'q', 'l', 'd', 'w' or 'r'")
                }
            }
            Parsed::Line(line_type)
                if Checker::is_input_learn_delete_restore_or_weaken(line_type) =>
            {
                self.learn_delete_restore_or_weaken(line_type)?;
                Ok(State::ProofQuery)
            }
            _ => self.unexpected_line(parsed, "'q', 'l', 'd', 'w' or 'r'"),
        }
    }

    fn proof_check(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, Some(Type::Lemma))?;
        match parsed {
            Parsed::Line(Type::Input) => {
                self.save_line(Type::Input);
                self.add_input_clause(Type::Input)?;
                Ok(State::InteractionPropagate)
            }
            Parsed::Line(line_type)
                if Checker::is_input_learn_delete_restore_or_weaken(line_type) =>
            {
                self.learn_delete_restore_or_weaken(line_type)?;
                Ok(State::ProofCheck)
            }
            Parsed::Status(Status::Satisfiable) => Ok(State::InteractionSatisfiable),
            Parsed::Status(Status::Unsatisfiable) => Ok(State::InteractionUnsatisfiable),
            Parsed::Status(Status::Unknown) => Ok(State::InteractionUnknown),
            _ => self.unexpected_line(parsed, "'s', 'i', 'l', 'd', 'w' or 'r'"),
        }
    }

    fn interaction_propagate(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, Some(Type::Lemma))?;
        match parsed {
            Parsed::Line(Type::Input) => {
                self.match_saved(Type::Input, "input")?;
                Ok(State::ProofCheck)
            }
            _ => self.unexpected_line(parsed, "'i'"),
        }
    }

    /// The interaction file must repeat the status the proof declared.
    fn interaction_status(&mut self, expected: Status, next: State) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, None)?;
        match parsed {
            Parsed::Status(status) if status == expected => Ok(next),
            Parsed::Status(status) => self.file(self.current).parse_error(format!(
                "unexpected 's {}' line (expected 's {}')",
                status, expected
            )),
            _ => self.unexpected_line(parsed, &format!("'s {}'", expected)),
        }
    }

    fn interaction_unknown(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, None)?;
        match parsed {
            Parsed::Status(Status::Unknown) => {
                self.conclude_query(0)?;
                Ok(State::InteractionInput)
            }
            Parsed::Status(status) => self.file(self.current).parse_error(format!(
                "unexpected 's {}' line (expected 's UNKNOWN')",
                status
            )),
            _ => self.unexpected_line(parsed, "'s UNKNOWN'"),
        }
    }

    fn interaction_satisfied(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, None)?;
        match parsed {
            Parsed::Line(Type::Values) => {
                self.check_line_consistency(Type::Values)?;
                self.save_line(Type::Values);
                Ok(State::ProofModel)
            }
            Parsed::Line(Type::Model) => {
                self.check_line_consistency(Type::Model)?;
                self.check_line_satisfies_query(Type::Model)?;
                self.check_line_satisfies_input_clauses(Type::Model)?;
                self.save_line(Type::Model);
                Ok(State::ProofModel)
            }
            _ => self.unexpected_line(parsed, "'v' or 'm'"),
        }
    }

    fn interaction_unsatisfied(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Interactions, None)?;
        match parsed {
            Parsed::Line(Type::Failed) => {
                self.check_line_consistency(Type::Failed)?;
                self.check_line_variables_subset_of_query(Type::Failed)?;
                self.save_line(Type::Failed);
                Ok(State::ProofCore)
            }
            Parsed::Line(Type::Core) => {
                self.check_line_consistency(Type::Core)?;
                self.check_core_subset_of_query(Type::Core)?;
                self.save_line(Type::Core);
                Ok(State::ProofCore)
            }
            _ => self.unexpected_line(parsed, "'f' or 'u'"),
        }
    }

    fn proof_model(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, None)?;
        match parsed {
            Parsed::Line(Type::Model) => {
                self.match_saved_model()?;
                self.conclude_satisfiable_query_with_model(Type::Model)?;
                Ok(State::InteractionInput)
            }
            _ => self.unexpected_line(parsed, "'m'"),
        }
    }

    /// The proof model must equal a saved interaction 'm' line by set
    /// equality; a saved 'v' line only has to be consistent with it.
    fn match_saved_model(&mut self) -> Result<()> {
        match self.saved_type {
            Some(Type::Model) => self.match_saved(Type::Model, "model"),
            Some(Type::Values) => Ok(()),
            _ => unreachable(),
        }
    }

    fn proof_core(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, None)?;
        match parsed {
            Parsed::Line(Type::Core) => {
                self.conclude_unsatisfiable_query_with_core(Type::Core)?;
                Ok(State::InteractionInput)
            }
            _ => self.unexpected_line(parsed, "'u'"),
        }
    }

    /*----------------------------------------------------------------*/

    /// The sequential state machine when only the proof file is given.
    ///
    /// The proof's own 'i' and 'q' lines are trusted as the user's inputs;
    /// all lemma, RUP and conclusion checks still run.
    fn check_proof_only(&mut self) -> Result<()> {
        if self.verbosity >= 0 {
            comment!("sequential checking only proof in {} mode", self.mode);
        }
        let mut state = State::ProofHeader;
        loop {
            state = match state {
                State::ProofHeader => self.proof_only_header()?,
                State::ProofInput => self.proof_only_input()?,
                State::ProofCheck => self.proof_only_check()?,
                State::ProofModel => self.proof_only_model()?,
                State::ProofCore => self.proof_only_core()?,
                State::Done => {
                    if self.verbosity > 0 {
                        comment!("successfully reached end-of-checking");
                    }
                    return Ok(());
                }
                _ => return self.fatal_error("invalid parser state reached"),
            };
        }
    }

    fn proof_only_header(&mut self) -> Result<State> {
        if self.mode != Mode::Pedantic {
            return Ok(State::ProofInput);
        }
        let parsed = self.next_line(Source::Proof, None)?;
        if let Parsed::Header(format) = parsed {
            if self.match_header(Source::Proof, format, Format::Icnf)? {
                return Ok(State::ProofInput);
            }
        }
        self.unexpected_line(parsed, "in pedantic mode 'p icnf' header")
    }

    fn proof_only_input(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, Some(Type::Input))?;
        match parsed {
            Parsed::Line(Type::Input) => {
                self.add_input_clause(Type::Input)?;
                Ok(State::ProofInput)
            }
            Parsed::Header(format) => {
                if self.match_header(Source::Proof, format, Format::Lidrup)? {
                    Ok(State::ProofInput)
                } else {
                    self.unexpected_line(parsed, "'q', 'i', 'l', 'd', 'w' or 'r'")
                }
            }
            Parsed::Line(Type::Query) => {
                self.start_query()?;
                self.save_query();
                Ok(State::ProofCheck)
            }
            Parsed::EndOfFile => Ok(State::Done),
            Parsed::Line(line_type)
                if Checker::is_input_learn_delete_restore_or_weaken(line_type) =>
            {
                self.learn_delete_restore_or_weaken(line_type)?;
                Ok(State::ProofInput)
            }
            _ => self.unexpected_line(parsed, "'q', 'i', 'l', 'd', 'w' or 'r'"),
        }
    }

    fn proof_only_check(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, Some(Type::Lemma))?;
        match parsed {
            Parsed::Line(line_type)
                if Checker::is_input_learn_delete_restore_or_weaken(line_type) =>
            {
                self.learn_delete_restore_or_weaken(line_type)?;
                Ok(State::ProofCheck)
            }
            Parsed::Status(Status::Satisfiable) => Ok(State::ProofModel),
            Parsed::Status(Status::Unsatisfiable) => Ok(State::ProofCore),
            Parsed::Status(Status::Unknown) => {
                self.conclude_query(0)?;
                Ok(State::ProofInput)
            }
            _ => self.unexpected_line(parsed, "'s', 'i', 'l', 'd', 'w' or 'r'"),
        }
    }

    fn proof_only_model(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, None)?;
        match parsed {
            Parsed::Line(Type::Model) => {
                self.save_line(Type::Model);
                self.conclude_satisfiable_query_with_model(Type::Model)?;
                Ok(State::ProofInput)
            }
            _ => self.unexpected_line(parsed, "'m'"),
        }
    }

    fn proof_only_core(&mut self) -> Result<State> {
        let parsed = self.next_line(Source::Proof, None)?;
        match parsed {
            Parsed::Line(Type::Core) => {
                self.save_line(Type::Core);
                self.conclude_unsatisfiable_query_with_core(Type::Core)?;
                Ok(State::ProofInput)
            }
            _ => self.unexpected_line(parsed, "'u'"),
        }
    }

    /*----------------------------------------------------------------*/

    /// Write the statistics block as comment lines.
    pub fn print_statistics(&self) {
        print_key_value("added clauses", self.statistics.added);
        print_key_value("input clauses", self.statistics.inputs);
        print_key_value("lemmas", self.statistics.lemmas);
        print_key_value("deleted clauses", self.statistics.deleted);
        print_key_value("weakened clauses", self.statistics.weakened);
        print_key_value("restored clauses", self.statistics.restored);
        print_key_value("imported variables", self.statistics.imported);
        print_key_value("queries", self.statistics.queries);
        print_key_value("conclusions", self.statistics.conclusions);
        print_key_value("models", self.statistics.models);
        print_key_value("cores", self.statistics.cores);
        print_key_value("implication checks", self.statistics.checks);
        print_key_value("resolutions", self.statistics.resolutions);
    }

    /// Write a memory usage breakdown as comment lines.
    pub fn print_memory_usage(&self) {
        let usages = vec![
            ("db", self.clause_db.heap_space()),
            ("active-table", self.active.heap_space()),
            ("inactive-table", self.inactive.heap_space()),
            ("assignment", self.assignment.heap_space() + self.marks.heap_space()),
            (
                "rest",
                self.imported.heap_space()
                    + self.input_clauses.heap_space()
                    + self.used.heap_space(),
            ),
        ];
        let total = usages.iter().map(|pair| pair.1).sum();
        print_key_value("checker memory (MB)", format_memory_usage(total));
        for (name, usage) in usages {
            print_key_value(&format!("memory-{}", name), format_memory_usage(usage));
        }
    }

    /// Report how much of each file was read.
    pub fn print_close_messages(&self) {
        if let Some(file) = self.interactions.as_ref() {
            comment!(
                "closing '{}' after reading {} lines ({} bytes)",
                file.name(),
                file.lineno() - 1,
                file.charno()
            );
        }
        comment!(
            "closing '{}' after reading {} lines ({} bytes)",
            self.proof.name(),
            self.proof.lineno() - 1,
            self.proof.charno()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options {
            mode: Mode::Strict,
            no_reuse: false,
            verbosity: -1,
        }
    }

    fn run_with(icnf: &[u8], lidrup: &[u8], options: Options) -> Result<()> {
        let interactions = File::from_bytes("interactions.icnf", icnf, false);
        let proof = File::from_bytes("proof.lidrup", lidrup, true);
        Checker::new(Some(interactions), proof, options).check()
    }

    fn run(icnf: &[u8], lidrup: &[u8]) -> Result<()> {
        run_with(icnf, lidrup, options())
    }

    fn run_proof_with(lidrup: &[u8], options: Options) -> Result<()> {
        let proof = File::from_bytes("proof.lidrup", lidrup, true);
        Checker::new(None, proof, options).check()
    }

    fn run_proof(lidrup: &[u8]) -> Result<()> {
        run_proof_with(lidrup, options())
    }

    fn line_error_message(result: Result<()>) -> String {
        match result {
            Err(Error::Line { message, .. }) => message,
            other => panic!("expected line error, got {:?}", other),
        }
    }

    #[test]
    fn empty_files_verify() {
        assert_eq!(run(b"", b""), Ok(()));
        assert_eq!(run_proof(b""), Ok(()));
    }

    #[test]
    fn inputs_are_matched_across_streams() {
        assert_eq!(run(b"i 1 2 0\n", b"i 1 1 2 0\n"), Ok(()));
        // Set equality, not sequence equality.
        assert_eq!(run(b"i 1 2 0\n", b"i 1 2 1 0\n"), Ok(()));
        assert!(matches!(
            run(b"i 1 2 0\n", b"i 1 1 -2 0\n"),
            Err(Error::Check { .. })
        ));
    }

    #[test]
    fn lemma_must_be_resolvable_in_listed_order() {
        // The only antecedent propagates a unit but never conflicts, so
        // the replay runs dry.
        let result = run_proof(b"i 1 1 2 0\nl 2 1 0 1 0\n");
        assert_eq!(line_error_message(result), "lemma resolution check failed:");
    }

    #[test]
    fn lemma_accepted_by_unit_conflict() {
        assert_eq!(run_proof(b"i 1 1 0\ni 2 -1 2 0\nl 3 2 0 1 2 0\n"), Ok(()));
    }

    #[test]
    fn antecedent_with_two_free_literals_is_not_resolvable() {
        let result = run_proof(b"i 1 1 2 0\nl 2 3 0 1 0\n");
        assert_eq!(
            line_error_message(result),
            "antecedent 1 not resolvable"
        );
    }

    #[test]
    fn missing_and_weakened_antecedents_are_line_errors() {
        let result = run_proof(b"i 1 1 0\nl 2 0 5 0\n");
        assert_eq!(line_error_message(result), "could not find antecedent 5");
        let result = run_proof(b"i 1 1 0\nw 1 0\nl 2 0 1 0\n");
        assert_eq!(line_error_message(result), "antecedent 1 weakened");
    }

    #[test]
    fn negative_antecedent_is_reserved() {
        let result = run_proof(b"i 1 1 0\nl 2 0 -1 0\n");
        assert_eq!(
            line_error_message(result),
            "negative antecedent -1 unsupported"
        );
    }

    #[test]
    fn empty_lemma_requires_conflict() {
        let result = run_proof(b"i 1 1 0\nl 2 0 0\n");
        assert_eq!(line_error_message(result), "lemma resolution check failed:");
        assert_eq!(run_proof(b"i 1 1 0\ni 2 -1 0\nl 3 0 1 2 0\n"), Ok(()));
    }

    #[test]
    fn empty_lemma_makes_formula_inconsistent() {
        // The second empty lemma needs no antecedents once the formula is
        // inconsistent.
        assert_eq!(
            run_proof(b"i 1 1 0\ni 2 -1 0\nl 3 0 1 2 0\nl 4 0 0\n"),
            Ok(())
        );
    }

    #[test]
    fn tautological_lemma_needs_no_antecedents() {
        assert_eq!(run_proof(b"i 1 1 0\nl 2 2 -2 0 0\n"), Ok(()));
    }

    #[test]
    fn duplicated_lemma_literals_are_skipped() {
        assert_eq!(run_proof(b"i 1 1 0\ni 2 -1 0\nl 3 2 2 0 1 2 0\n"), Ok(()));
    }

    #[test]
    fn delete_weaken_restore_lifecycle() {
        assert_eq!(run_proof(b"i 1 1 0\nw 1 0\nr 1 0\nd 1 0\n"), Ok(()));
        let result = run_proof(b"d 5 0\n");
        assert_eq!(
            line_error_message(result),
            "could not find and delete clause 5"
        );
        let result = run_proof(b"i 1 1 0\nr 1 0\n");
        assert_eq!(
            line_error_message(result),
            "could not find and restore weakened clause 1"
        );
        let result = run_proof(b"i 1 1 0\nw 1 0\nw 1 0\n");
        assert_eq!(
            line_error_message(result),
            "could not find and weaken clause 1"
        );
    }

    #[test]
    fn restored_clause_keeps_its_literals() {
        assert_eq!(run_proof(b"i 1 1 0\nw 1 0\nr 1 0\nl 2 1 0 1 0\n"), Ok(()));
    }

    #[test]
    fn identifier_reuse_policy() {
        // Without --no-reuse an identifier can be reused once deleted.
        assert_eq!(run_proof(b"i 7 1 0\nd 7 0\ni 7 2 0\n"), Ok(()));
        // But not while the clause is in either table.
        let result = run_proof(b"i 7 1 0\ni 7 2 0\n");
        assert_eq!(
            line_error_message(result),
            "clause identifier 7 actively in use"
        );
        let result = run_proof(b"i 7 1 0\nw 7 0\ni 7 2 0\n");
        assert_eq!(
            line_error_message(result),
            "clause identifier 7 inactive but in use"
        );
    }

    #[test]
    fn no_reuse_forbids_reuse_forever() {
        let no_reuse = Options {
            no_reuse: true,
            ..options()
        };
        let result = run_proof_with(b"i 7 1 0\nd 7 0\ni 7 2 0\n", no_reuse);
        assert_eq!(
            line_error_message(result),
            "clause identifier 7 already used"
        );
        assert_eq!(run_proof_with(b"i 7 1 0\nd 7 0\ni 8 1 0\n", no_reuse), Ok(()));
    }

    #[test]
    fn identifier_extremes() {
        assert_eq!(
            run_proof(b"i 1 1 0\ni 9223372036854775807 2 0\nd 9223372036854775807 0\n"),
            Ok(())
        );
    }

    #[test]
    fn satisfiable_query_with_model() {
        assert_eq!(
            run_proof(b"i 1 1 2 0\ni 2 -1 2 0\nq 1 0\ns SATISFIABLE\nm 1 2 0\n"),
            Ok(())
        );
    }

    #[test]
    fn model_must_satisfy_every_input_clause() {
        let result = run_proof(b"i 1 1 2 0\ni 2 -1 2 0\nq 1 0\ns SATISFIABLE\nm 1 -2 0\n");
        assert!(matches!(result, Err(Error::Check { .. })));
    }

    #[test]
    fn model_must_satisfy_the_query() {
        let result = run_proof(b"i 1 1 2 0\nq -1 0\ns SATISFIABLE\nm 1 2 0\n");
        match result {
            Err(Error::Check { message, .. }) => {
                assert!(message.starts_with("model does not satisfy query literal -1"))
            }
            other => panic!("expected check error, got {:?}", other),
        }
    }

    #[test]
    fn inconsistent_model_is_rejected() {
        let result = run_proof(b"i 1 1 0\nq 0\ns SATISFIABLE\nm 1 -1 0\n");
        match result {
            Err(Error::Check { message, .. }) => {
                assert_eq!(message, "inconsistent 'm' line with literals 1 and -1")
            }
            other => panic!("expected check error, got {:?}", other),
        }
    }

    #[test]
    fn core_must_be_subset_of_query() {
        let result = run_proof(b"i 1 1 2 0\ni 2 -1 0\nq 2 0\ns UNSATISFIABLE\nu 1 0 2 1 0\n");
        match result {
            Err(Error::Check { message, .. }) => {
                assert!(message.starts_with("core literal 1 not in query"))
            }
            other => panic!("expected check error, got {:?}", other),
        }
    }

    #[test]
    fn unsatisfiable_query_with_core() {
        assert_eq!(
            run_proof(b"i 1 1 0\ni 2 -1 0\nq 1 0\ns UNSATISFIABLE\nu 1 0 2 0\n"),
            Ok(())
        );
    }

    #[test]
    fn unknown_verdict_concludes_without_checks() {
        assert_eq!(run_proof(b"i 1 1 0\nq -1 0\ns UNKNOWN\n"), Ok(()));
        assert_eq!(
            run(b"q 0\ns UNKNOWN\n", b"q 0\ns UNKNOWN\n"),
            Ok(())
        );
    }

    #[test]
    fn interaction_status_must_repeat_proof_status() {
        let result = run(
            b"i 1 0\nq 0\ns UNSATISFIABLE\n",
            b"i 1 1 0\nq 0\ns SATISFIABLE\nm 1 0\n",
        );
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn proof_model_must_match_interaction_model() {
        let result = run(
            b"i 1 2 0\nq 0\ns SATISFIABLE\nm 1 2 0\n",
            b"i 1 1 2 0\nq 0\ns SATISFIABLE\nm 1 -2 0\n",
        );
        assert!(matches!(result, Err(Error::Check { .. })));
    }

    #[test]
    fn partial_values_only_need_consistency_with_proof_model() {
        assert_eq!(
            run(
                b"i 1 2 0\nq 0\ns SATISFIABLE\nv 2 0\n",
                b"i 1 1 2 0\nq 0\ns SATISFIABLE\nm 1 2 0\n",
            ),
            Ok(())
        );
        let result = run(
            b"i 1 2 0\nq 0\ns SATISFIABLE\nv -1 0\n",
            b"i 1 1 2 0\nq 0\ns SATISFIABLE\nm 1 2 0\n",
        );
        assert!(matches!(result, Err(Error::Check { .. })));
    }

    #[test]
    fn failed_literals_must_match_core() {
        let icnf = b"i 1 0\ni -1 0\nq 1 0\ns UNSATISFIABLE\nf 1 0\n";
        let lidrup = b"i 1 1 0\ni 2 -1 0\nq 1 0\ns UNSATISFIABLE\nu 1 0 2 0\n";
        assert_eq!(run(icnf, lidrup), Ok(()));
        // The 'f' line claims literal -1 failed, the core says 1 did.
        let icnf = b"i 1 0\ni -1 0\nq 1 0\ns UNSATISFIABLE\nf -1 0\n";
        assert!(matches!(run(icnf, lidrup), Err(Error::Check { .. })));
    }

    #[test]
    fn failed_literal_variables_must_be_in_query() {
        let icnf = b"i 1 0\ni -1 0\nq 1 0\ns UNSATISFIABLE\nf 2 0\n";
        let lidrup = b"i 1 1 0\ni 2 -1 0\nq 1 0\ns UNSATISFIABLE\nu 1 0 2 0\n";
        let result = run(icnf, lidrup);
        match result {
            Err(Error::Check { message, .. }) => {
                assert!(message.starts_with("literal 2 nor -2 in query"))
            }
            other => panic!("expected check error, got {:?}", other),
        }
    }

    #[test]
    fn pedantic_mode_requires_headers() {
        let pedantic = Options {
            mode: Mode::Pedantic,
            ..options()
        };
        assert_eq!(
            run_with(b"p icnf\ni 1 0\n", b"p lidrup\ni 1 1 0\n", pedantic),
            Ok(())
        );
        assert!(matches!(
            run_with(b"i 1 0\n", b"p lidrup\ni 1 1 0\n", pedantic),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn headers_on_the_wrong_file_are_rejected() {
        let pedantic = Options {
            mode: Mode::Pedantic,
            ..options()
        };
        let result = run_with(b"p lidrup\ni 1 0\n", b"p lidrup\ni 1 1 0\n", pedantic);
        match result {
            Err(Error::Parse { message, .. }) => {
                assert_eq!(
                    message,
                    "expected 'icnf' header and not 'p lidrup' (input files swapped?)"
                )
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn headers_are_optional_in_strict_mode() {
        assert_eq!(run(b"p icnf\ni 1 0\n", b"p lidrup\ni 1 1 0\n"), Ok(()));
        assert_eq!(run(b"i 1 0\n", b"i 1 1 0\n"), Ok(()));
    }

    #[test]
    fn queries_track_statistics() {
        let proof = File::from_bytes(
            "proof.lidrup",
            b"i 1 1 0\nq 1 0\ns SATISFIABLE\nm 1 0\nq -1 0\ns UNSATISFIABLE\nu -1 0 1 0\n",
            true,
        );
        let mut checker = Checker::new(None, proof, options());
        assert_eq!(checker.check(), Ok(()));
        assert_eq!(checker.statistics.queries, 2);
        assert_eq!(checker.statistics.conclusions, 2);
        assert_eq!(checker.statistics.models, 1);
        assert_eq!(checker.statistics.cores, 1);
        assert_eq!(checker.statistics.inputs, 1);
        assert!(checker.assignment.is_empty());
    }

    #[test]
    fn trail_is_empty_after_every_check() {
        let proof = File::from_bytes(
            "proof.lidrup",
            b"i 1 1 0\ni 2 -1 2 0\nl 3 2 0 1 2 0\n",
            true,
        );
        let mut checker = Checker::new(None, proof, options());
        assert_eq!(checker.check(), Ok(()));
        assert!(checker.assignment.is_empty());
    }
}
