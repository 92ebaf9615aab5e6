//! Clause handles and per-clause metadata

use crate::{literal::Literal, memory::Offset};
use bitfield::bitfield;
use std::{fmt, mem::size_of};

use static_assertions::const_assert;

/// An index uniquely identifying a stored clause during the lifetime of
/// the program.
///
/// This is not the identifier the proof producer chose for the clause;
/// that one is a [ClauseId](type.ClauseId.html) and lives in the clause
/// database, keyed by the identifier tables.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct Clause {
    pub index: u32,
}

/// A clause identifier as chosen by the proof producer.
///
/// Positive on the wire; antecedent lists are parsed as signed values
/// because negative antecedents are reserved for future extensions.
pub type ClauseId = i64;

impl Clause {
    pub fn new(index: u32) -> Clause {
        Clause { index }
    }
    pub fn from_usize(index: usize) -> Clause {
        requires!(index < u32::max_value() as usize);
        Clause::new(index as u32)
    }
}

impl Offset for Clause {
    fn as_offset(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

bitfield! {
    /// The data to store for each clause in the metadata of the
    /// [ClauseDatabase](../clausedatabase/struct.ClauseDatabase.html).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ClauseFields(u32);
    impl Debug;
    /// Whether the clause was introduced by the interaction as a formula
    /// clause (input clauses are retained until teardown).
    pub is_input, set_is_input: 0;
    /// Whether the clause is currently weakened (lives in the inactive
    /// identifier table).
    pub is_weakened, set_is_weakened: 1;
    /// Whether the clause contains some variable in both polarities.
    /// Computed once at allocation, never changes.
    pub is_tautological, set_is_tautological: 2;
}

impl ClauseFields {
    pub fn new() -> ClauseFields {
        ClauseFields(0)
    }
}

impl Default for ClauseFields {
    fn default() -> ClauseFields {
        ClauseFields::new()
    }
}

/// State the sizes of data types.
#[allow(dead_code)]
fn assert_primitive_sizes() {
    const_assert!(size_of::<Literal>() == 4);
    const_assert!(size_of::<Clause>() == 4);
    const_assert!(size_of::<ClauseFields>() == 4);
}

/// Write the some literals in LIDRUP format to stdout.
pub fn puts_clause<'a, T>(clause: T)
where
    T: IntoIterator<Item = &'a Literal>,
{
    for &literal in clause.into_iter() {
        puts!("{} ", literal);
    }
    puts!("0")
}

/// Write the clause ID and literals to stdout, like [<ID>] <literals> 0.
pub fn puts_clause_with_id<'a, T>(id: ClauseId, literals: T)
where
    T: IntoIterator<Item = &'a Literal>,
{
    puts!("[{}] ", id);
    puts_clause(literals);
}
