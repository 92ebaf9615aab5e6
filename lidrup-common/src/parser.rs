//! LIDRUP lexer and line parser
//!
//! The checker reads interleaved from up to two files; each file is
//! wrapped in a [File](struct.File.html) which tracks positions for error
//! messages and knows whether it is the proof stream (only the proof
//! carries clause identifiers and antecedent lists on the wire).

use crate::{
    clause::ClauseId,
    literal::Literal,
    memory::Vector,
    output::{Error, Result},
};
use std::{
    fmt,
    fs,
    io::{BufReader, Read},
};

/// The letter tag of a data line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Type {
    /// `i`: introduce an input clause
    Input,
    /// `l`: learn a lemma, justified by antecedents
    Lemma,
    /// `q`: begin a query under assumptions (`a` is a legacy alias)
    Query,
    /// `d`: delete clauses by identifier
    Delete,
    /// `w`: weaken clauses by identifier
    Weaken,
    /// `r`: restore weakened clauses by identifier
    Restore,
    /// `m`: a full model
    Model,
    /// `u`: an unsatisfiable core, justified by antecedents in the proof
    Core,
    /// `v`: partial values (interaction only)
    Values,
    /// `f`: failed assumptions (interaction only)
    Failed,
}

impl Type {
    /// The letter this line type carries on the wire.
    pub fn letter(self) -> char {
        match self {
            Type::Input => 'i',
            Type::Lemma => 'l',
            Type::Query => 'q',
            Type::Delete => 'd',
            Type::Weaken => 'w',
            Type::Restore => 'r',
            Type::Model => 'm',
            Type::Core => 'u',
            Type::Values => 'v',
            Type::Failed => 'f',
        }
    }
    /// Whether this line carries a clause identifier (proof stream only).
    pub fn has_id(self) -> bool {
        self == Type::Input || self == Type::Lemma
    }
    /// Whether this line carries a literal sequence.
    pub fn has_lits(self) -> bool {
        match self {
            Type::Input
            | Type::Lemma
            | Type::Query
            | Type::Model
            | Type::Core
            | Type::Values
            | Type::Failed => true,
            Type::Delete | Type::Weaken | Type::Restore => false,
        }
    }
    /// Whether this line carries a (trailing) identifier sequence.
    pub fn has_ids(self) -> bool {
        match self {
            Type::Lemma | Type::Delete | Type::Weaken | Type::Restore | Type::Core => true,
            Type::Input | Type::Query | Type::Model | Type::Values | Type::Failed => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The verdict of a status (`s`) line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Status::Satisfiable => "SATISFIABLE",
                Status::Unsatisfiable => "UNSATISFIABLE",
                Status::Unknown => "UNKNOWN",
            }
        )
    }
}

/// The format named in a `p` header line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Format {
    Icnf,
    Lidrup,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Format::Icnf => "icnf",
                Format::Lidrup => "lidrup",
            }
        )
    }
}

/// The result of reading one logical line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Parsed {
    EndOfFile,
    Header(Format),
    Status(Status),
    Line(Type),
}

/// The integers of the current data line.
///
/// The same buffers are reused for every line; the checker copies what it
/// needs to keep (the saved line and the query).
#[derive(Debug, Default)]
pub struct Line {
    /// The clause identifier, 0 when the line carries none.
    pub id: ClauseId,
    /// The literal sequence.
    pub lits: Vector<Literal>,
    /// The antecedent identifier sequence, signed as parsed.
    pub ids: Vector<ClauseId>,
}

impl Line {
    pub fn new() -> Line {
        Line::default()
    }
}

/// Open a file for reading.
/// # Panics
/// Panics on error.
pub fn open_file(filename: &str) -> fs::File {
    fs::File::open(filename).unwrap_or_else(|err| die!("cannot open file '{}': {}", filename, err))
}

/// Unwraps a result, panicking on error.
fn panic_on_error<T>(result: std::io::Result<T>) -> T {
    result.unwrap_or_else(|error| die!("{}", error))
}

/// File extension of Zstandard archives.
const ZSTD: &str = ".zst";
/// File extension of Gzip archives.
const GZIP: &str = ".gz";
/// File extension of Bzip2 archives.
const BZIP2: &str = ".bz2";
/// File extension of XZ archives.
const XZ: &str = ".xz";
/// File extension of LZ4 archives.
const LZ4: &str = ".lz4";

/// Determine the compression format from the file extension.
fn compression_format_by_extension(filename: &str) -> &str {
    for extension in &[ZSTD, GZIP, BZIP2, XZ, LZ4] {
        if filename.ends_with(extension) {
            return extension;
        }
    }
    ""
}

/// Return an iterator over the bytes of a possibly compressed file.
///
/// If the file is compressed it is transparently uncompressed.
fn read_from_compressed_file(file: fs::File, filename: &str) -> Box<dyn Iterator<Item = u8>> {
    match compression_format_by_extension(filename) {
        "" => Box::new(BufReader::new(file).bytes().map(panic_on_error)),
        ZSTD => {
            let de = zstd::stream::read::Decoder::new(file)
                .unwrap_or_else(|err| die!("failed to decompress ZST archive: {}", err));
            Box::new(de.bytes().map(panic_on_error))
        }
        GZIP => {
            let de = flate2::read::GzDecoder::new(file);
            Box::new(de.bytes().map(panic_on_error))
        }
        BZIP2 => {
            let de = bzip2::read::BzDecoder::new(file);
            Box::new(de.bytes().map(panic_on_error))
        }
        XZ => {
            let de = xz2::read::XzDecoder::new(file);
            Box::new(de.bytes().map(panic_on_error))
        }
        LZ4 => {
            let de = lz4::Decoder::new(file)
                .unwrap_or_else(|err| die!("failed to decode LZ4 archive: {}", err));
            Box::new(de.bytes().map(panic_on_error))
        }
        _ => crate::output::unreachable(),
    }
}

/// A byte source for one of the two streams, tracking position
/// information for error messages.
pub struct File<'a> {
    /// The source of the input data
    source: Box<dyn Iterator<Item = u8> + 'a>,
    /// Actual path to this file (or a pseudo-name for in-memory sources).
    name: String,
    /// Whether this is the proof stream. Only the proof carries clause
    /// identifiers on `i`/`l` lines and trailing antecedent lists.
    proof: bool,
    /// Suppress the blank-line warning under `--quiet`.
    pub quiet: bool,
    /// Data lines parsed from this file.
    lines: usize,
    /// Line number of lines parsed so far.
    lineno: usize,
    /// Number of characters parsed in the current line.
    colno: usize,
    /// Number of bytes parsed.
    charno: usize,
    /// Line number of the current logical line.
    start_of_line: usize,
    /// Saved last character for bumping `lineno`.
    last_char: u8,
}

impl<'a> File<'a> {
    /// Open a (possibly compressed) file from disk.
    pub fn from_path(filename: &str, proof: bool) -> File<'static> {
        let file = open_file(filename);
        File::from_source(filename, read_from_compressed_file(file, filename), proof)
    }
    /// Read from an in-memory buffer, mainly for tests.
    pub fn from_bytes(name: &str, bytes: &'a [u8], proof: bool) -> File<'a> {
        File::from_source(name, Box::new(bytes.iter().cloned()), proof)
    }
    fn from_source(
        name: &str,
        source: Box<dyn Iterator<Item = u8> + 'a>,
        proof: bool,
    ) -> File<'a> {
        File {
            source,
            name: name.to_string(),
            proof,
            quiet: false,
            lines: 0,
            lineno: 1,
            colno: 0,
            charno: 0,
            start_of_line: 1,
            last_char: 0,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The line the current logical line began at.
    pub fn start_of_line(&self) -> usize {
        self.start_of_line
    }
    /// The number of data lines parsed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
    /// The number of (newline-terminated) lines read so far.
    pub fn lineno(&self) -> usize {
        self.lineno
    }
    /// The number of bytes read so far.
    pub fn charno(&self) -> usize {
        self.charno
    }
    /// Build a parse error at the current position.
    pub fn parse_error<T>(&self, message: String) -> Result<T> {
        Err(Error::Parse {
            file: self.name.clone(),
            line: self.start_of_line,
            column: self.colno,
            message,
        })
    }
    /// Build a check error at the current line.
    pub fn check_error<T>(&self, message: String) -> Result<T> {
        Err(Error::Check {
            file: self.name.clone(),
            line: self.start_of_line,
            message,
        })
    }

    /// Read one byte; carriage return must be followed by newline.
    fn next_char(&mut self) -> Result<Option<u8>> {
        let mut ch = self.source.next();
        if ch == Some(b'\r') {
            self.charno += 1;
            ch = self.source.next();
            if ch != Some(b'\n') {
                return self.parse_error("expected new-line after carriage return".to_string());
            }
        }
        if self.last_char == b'\n' {
            self.lineno += 1;
        }
        self.last_char = ch.unwrap_or(0);
        if ch.is_some() {
            self.charno += 1;
            self.colno += 1;
        }
        Ok(ch)
    }

    /// Skip comments and blank lines, returning the first byte of content
    /// or `None` at end-of-file.
    fn skip_to_content(&mut self) -> Result<Option<u8>> {
        loop {
            self.colno = 0;
            let ch = self.next_char()?;
            self.start_of_line = self.lineno;
            match ch {
                Some(b'c') => loop {
                    match self.next_char()? {
                        Some(b'\n') => break,
                        Some(_) => (),
                        None => {
                            return self.parse_error("end-of-file in comment".to_string());
                        }
                    }
                },
                Some(b'\n') => {
                    if !self.quiet {
                        comment!(
                            "skipping empty line {} in '{}'",
                            self.start_of_line,
                            self.name
                        );
                    }
                }
                other => return Ok(other),
            }
        }
    }

    /// Consume an exact character sequence, for headers and status words.
    fn expect_word(&mut self, word: &str, message: &str) -> Result<()> {
        for &expected in word.as_bytes() {
            if self.next_char()? != Some(expected) {
                return self.parse_error(message.to_string());
            }
        }
        Ok(())
    }

    /// Parse the remainder of a `p` header line.
    fn parse_header(&mut self) -> Result<Parsed> {
        const INVALID: &str = "invalid 'p' header line";
        if self.next_char()? != Some(b' ') {
            return self.parse_error(INVALID.to_string());
        }
        let format = match self.next_char()? {
            Some(b'i') => {
                self.expect_word("cnf", INVALID)?;
                Format::Icnf
            }
            Some(b'l') => {
                self.expect_word("idrup", INVALID)?;
                Format::Lidrup
            }
            _ => return self.parse_error(INVALID.to_string()),
        };
        if self.next_char()? != Some(b'\n') {
            return self.parse_error(format!("expected new line after '{}' header", format));
        }
        Ok(Parsed::Header(format))
    }

    /// Parse the remainder of an `s` status line.
    fn parse_status(&mut self) -> Result<Parsed> {
        const INVALID: &str = "invalid status line";
        let status = match self.next_char()? {
            Some(b'S') => {
                self.expect_word("ATISFIABLE", INVALID)?;
                Status::Satisfiable
            }
            Some(b'U') => {
                if self.next_char()? != Some(b'N') {
                    return self.parse_error(INVALID.to_string());
                }
                match self.next_char()? {
                    Some(b'S') => {
                        self.expect_word("ATISFIABLE", INVALID)?;
                        Status::Unsatisfiable
                    }
                    Some(b'K') => {
                        self.expect_word("NOWN", INVALID)?;
                        Status::Unknown
                    }
                    _ => return self.parse_error(INVALID.to_string()),
                }
            }
            _ => return self.parse_error(INVALID.to_string()),
        };
        if self.next_char()? != Some(b'\n') {
            return self.parse_error("expected new-line after status".to_string());
        }
        Ok(Parsed::Status(status))
    }

    /// Parse the clause identifier of an `i` or `l` proof line, with the
    /// space that follows it. Returns the next byte after the space.
    fn parse_clause_id(&mut self, first: Option<u8>, line: &mut Line) -> Result<Option<u8>> {
        let mut ch = first;
        if ch == Some(b'-') {
            return self.parse_error(
                "expected non-negative clause identifier (non-linear '.idrup' file?)".to_string(),
            );
        }
        if !is_digit(ch) {
            return self.parse_error("expected clause identifier".to_string());
        }
        if ch == Some(b'0') {
            return self.parse_error("expected non-zero clause identifier".to_string());
        }
        let mut id = i64::from(ch.unwrap() - b'0');
        loop {
            ch = self.next_char()?;
            if !is_digit(ch) {
                break;
            }
            let digit = i64::from(ch.unwrap() - b'0');
            if i64::max_value() / 10 < id || i64::max_value() - digit < id * 10 {
                return self.parse_error("clause identifier too large".to_string());
            }
            id = 10 * id + digit;
        }
        if ch != Some(b' ') {
            return self.parse_error(format!("expected space after '{}'", id));
        }
        line.id = id;
        self.next_char()
    }

    /// Parse the zero-terminated literal sequence of a data line.
    ///
    /// When an identifier sequence follows on this line the terminating
    /// zero is trailed by a space and the next byte is returned;
    /// otherwise the zero ends the line and `None` is returned.
    fn parse_literals(
        &mut self,
        first: Option<u8>,
        line: &mut Line,
        ids_follow: bool,
    ) -> Result<Option<u8>> {
        let mut ch = first;
        loop {
            let sign = if ch == Some(b'-') {
                ch = self.next_char()?;
                if ch == Some(b'0') {
                    return self.parse_error("expected non-zero digit after '-'".to_string());
                }
                if !is_digit(ch) {
                    return self.parse_error("expected digit after '-'".to_string());
                }
                -1
            } else {
                if !is_digit(ch) {
                    return self.parse_error("expected digit or '-'".to_string());
                }
                1
            };
            let mut idx = i32::from(ch.unwrap() - b'0');
            loop {
                ch = self.next_char()?;
                if !is_digit(ch) {
                    break;
                }
                if idx == 0 {
                    return self.parse_error("invalid leading '0' digit".to_string());
                }
                let digit = i32::from(ch.unwrap() - b'0');
                if i32::max_value() / 10 < idx || i32::max_value() - digit < idx * 10 {
                    return self.parse_error("variable index too large".to_string());
                }
                idx = 10 * idx + digit;
            }
            if idx == i32::max_value() {
                return self.parse_error("can not handle INT_MAX variables".to_string());
            }
            let lit = sign * idx;
            if ids_follow {
                if ch != Some(b' ') {
                    return self.parse_error(format!("expected space after '{}'", lit));
                }
                if lit == 0 {
                    return self.next_char();
                }
            } else {
                if lit == 0 && ch != Some(b'\n') {
                    return self.parse_error("expected new-line after '0'".to_string());
                }
                if lit != 0 && ch != Some(b' ') {
                    return self.parse_error(format!("expected space after '{}'", lit));
                }
                if lit == 0 {
                    return Ok(None);
                }
            }
            line.lits.push(Literal::new(lit));
            ch = self.next_char()?;
        }
    }

    /// Parse the zero-terminated identifier sequence ending a data line.
    fn parse_antecedents(&mut self, first: Option<u8>, line: &mut Line) -> Result<()> {
        let mut ch = first;
        loop {
            let sign: i64 = if ch == Some(b'-') {
                ch = self.next_char()?;
                if ch == Some(b'0') {
                    return self.parse_error("expected non-zero digit after '-'".to_string());
                }
                if !is_digit(ch) {
                    return self.parse_error("expected digit after '-'".to_string());
                }
                -1
            } else {
                if !is_digit(ch) {
                    return self.parse_error("expected digit or '-'".to_string());
                }
                1
            };
            let mut id = i64::from(ch.unwrap() - b'0');
            loop {
                ch = self.next_char()?;
                if !is_digit(ch) {
                    break;
                }
                if id == 0 {
                    return self.parse_error("invalid leading '0' digit".to_string());
                }
                let digit = i64::from(ch.unwrap() - b'0');
                if i64::max_value() / 10 < id || i64::max_value() - digit < id * 10 {
                    return self
                        .parse_error("antecedent clause identifier too large".to_string());
                }
                id = 10 * id + digit;
            }
            if id != 0 {
                let id = sign * id;
                if ch != Some(b' ') {
                    return self.parse_error(format!("expected space after '{}'", id));
                }
                line.ids.push(id);
                ch = self.next_char()?;
            } else if ch != Some(b'\n') {
                return self.parse_error("expected new-line after '0'".to_string());
            } else {
                return Ok(());
            }
        }
    }

    /// Read the next logical line into `line`.
    ///
    /// In contexts where a line may start directly with a number the
    /// `default_type` applies (input-clause context uses `i`, lemma
    /// context uses `l`, like the DIMACS and original DRUP formats).
    pub fn next_line(&mut self, default_type: Option<Type>, line: &mut Line) -> Result<Parsed> {
        let first = match self.skip_to_content()? {
            Some(ch) => ch,
            None => return Ok(Parsed::EndOfFile),
        };

        line.id = 0;
        line.lits.clear();
        line.ids.clear();
        self.lines += 1;

        if first == b'p' {
            return self.parse_header();
        }

        let actual_type;
        let mut ch;
        if first.is_ascii_lowercase() {
            if self.next_char()? != Some(b' ') {
                return self.parse_error(format!("expected space after '{}'", first as char));
            }
            if first == b's' {
                return self.parse_status();
            }
            actual_type = match first {
                b'i' => Type::Input,
                b'l' => Type::Lemma,
                // 'a' is a legacy alias for 'q'.
                b'a' | b'q' => Type::Query,
                b'd' => Type::Delete,
                b'w' => Type::Weaken,
                b'r' => Type::Restore,
                b'm' => Type::Model,
                b'u' => Type::Core,
                b'v' => Type::Values,
                b'f' => Type::Failed,
                other => {
                    return self.parse_error(format!("unexpected character '{}'", other as char))
                }
            };
            ch = self.next_char()?;
        } else if is_digit(Some(first)) || first == b'-' {
            match default_type {
                Some(default) => {
                    actual_type = default;
                    ch = Some(first);
                }
                None => return self.unexpected_character(first),
            }
        } else {
            return self.unexpected_character(first);
        }

        if self.proof && actual_type.has_id() {
            ch = self.parse_clause_id(ch, line)?;
        }

        if actual_type.has_lits() {
            let ids_follow = self.proof && actual_type.has_ids();
            ch = self.parse_literals(ch, line, ids_follow)?;
            if !ids_follow {
                return Ok(Parsed::Line(actual_type));
            }
        }

        invariant!(actual_type.has_ids());
        self.parse_antecedents(ch, line)?;
        Ok(Parsed::Line(actual_type))
    }

    fn unexpected_character(&self, ch: u8) -> Result<Parsed> {
        if ch.is_ascii_graphic() || ch == b' ' {
            self.parse_error(format!("unexpected character '{}'", ch as char))
        } else {
            self.parse_error(format!("unexpected character code {:02x}", ch))
        }
    }
}

/// Check if a character is a decimal digit.
fn is_digit(ch: Option<u8>) -> bool {
    matches!(ch, Some(b'0'..=b'9'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proof_file(bytes: &[u8]) -> File {
        File::from_bytes("<proof>", bytes, true)
    }

    fn interaction_file(bytes: &[u8]) -> File {
        File::from_bytes("<icnf>", bytes, false)
    }

    fn lits(line: &Line) -> Vec<i32> {
        line.lits.iter().map(|literal| literal.decode()).collect()
    }

    #[test]
    fn parses_proof_input_line_with_id() {
        let mut file = proof_file(b"i 42 1 -2 0\n");
        let mut line = Line::new();
        let parsed = file.next_line(None, &mut line).unwrap();
        assert_eq!(parsed, Parsed::Line(Type::Input));
        assert_eq!(line.id, 42);
        assert_eq!(lits(&line), vec![1, -2]);
        assert!(line.ids.is_empty());
    }

    #[test]
    fn parses_interaction_input_line_without_id() {
        let mut file = interaction_file(b"i 1 -2 0\n");
        let mut line = Line::new();
        let parsed = file.next_line(None, &mut line).unwrap();
        assert_eq!(parsed, Parsed::Line(Type::Input));
        assert_eq!(line.id, 0);
        assert_eq!(lits(&line), vec![1, -2]);
    }

    #[test]
    fn parses_lemma_with_antecedents() {
        let mut file = proof_file(b"l 3 -1 0 1 2 0\n");
        let mut line = Line::new();
        let parsed = file.next_line(None, &mut line).unwrap();
        assert_eq!(parsed, Parsed::Line(Type::Lemma));
        assert_eq!(line.id, 3);
        assert_eq!(lits(&line), vec![-1]);
        assert_eq!(line.ids.into_vec(), vec![1, 2]);
    }

    #[test]
    fn default_type_applies_to_bare_numbers() {
        let mut file = interaction_file(b"1 2 0\n");
        let mut line = Line::new();
        let parsed = file.next_line(Some(Type::Input), &mut line).unwrap();
        assert_eq!(parsed, Parsed::Line(Type::Input));
        assert_eq!(lits(&line), vec![1, 2]);
    }

    #[test]
    fn legacy_assumption_alias_is_normalized() {
        let mut file = interaction_file(b"a -3 0\n");
        let mut line = Line::new();
        let parsed = file.next_line(None, &mut line).unwrap();
        assert_eq!(parsed, Parsed::Line(Type::Query));
        assert_eq!(lits(&line), vec![-3]);
    }

    #[test]
    fn parses_headers_and_statuses() {
        let mut file = interaction_file(b"p icnf\ns SATISFIABLE\ns UNSATISFIABLE\ns UNKNOWN\n");
        let mut line = Line::new();
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Header(Format::Icnf)
        );
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Status(Status::Satisfiable)
        );
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Status(Status::Unsatisfiable)
        );
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Status(Status::Unknown)
        );
        assert_eq!(file.next_line(None, &mut line).unwrap(), Parsed::EndOfFile);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut file = proof_file(b"c a comment\n\nq 0\n");
        let mut line = Line::new();
        file.quiet = true;
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Line(Type::Query)
        );
        assert_eq!(file.start_of_line(), 3);
    }

    #[test]
    fn carriage_return_requires_newline() {
        let mut file = proof_file(b"q 0\r0");
        let mut line = Line::new();
        let result = file.next_line(None, &mut line);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn rejects_truncated_status() {
        let mut file = interaction_file(b"s SATISFIABL\n");
        let mut line = Line::new();
        assert!(matches!(
            file.next_line(None, &mut line),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn rejects_oversized_variable_index() {
        let mut file = proof_file(b"q 2147483647 0\n");
        let mut line = Line::new();
        let result = file.next_line(None, &mut line);
        match result {
            Err(Error::Parse { message, .. }) => {
                assert_eq!(message, "can not handle INT_MAX variables")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_identifier_overflow() {
        let mut file = proof_file(b"i 92233720368547758070 1 0\n");
        let mut line = Line::new();
        match file.next_line(None, &mut line) {
            Err(Error::Parse { message, .. }) => {
                assert_eq!(message, "clause identifier too large")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_leading_zero() {
        let mut file = proof_file(b"q 01 0\n");
        let mut line = Line::new();
        match file.next_line(None, &mut line) {
            Err(Error::Parse { message, .. }) => {
                assert_eq!(message, "invalid leading '0' digit")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn negative_antecedents_are_parsed_as_signed() {
        let mut file = proof_file(b"d -7 0\n");
        let mut line = Line::new();
        assert_eq!(
            file.next_line(None, &mut line).unwrap(),
            Parsed::Line(Type::Delete)
        );
        assert_eq!(line.ids.into_vec(), vec![-7]);
    }

    #[test]
    fn tracks_line_numbers_for_errors() {
        let mut file = proof_file(b"q 0\nq x\n");
        let mut line = Line::new();
        assert!(file.next_line(None, &mut line).is_ok());
        match file.next_line(None, &mut line) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
