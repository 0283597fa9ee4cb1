//! Textual grid encodings: S81, CSV-of-candidates, GVC, the bordered grid
//! block, and the Simple-Sudoku clipboard layout.
//!
//! Ingestion auto-detects the shape of the input and validates the expected
//! regular structure; malformed input is rejected with a typed
//! [`ParseGridError`]. Encoding is canonical (candidate groups in ascending
//! digit order), so decode→encode round-trips byte-for-byte within each
//! format.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Cell, Digit, DigitSet, Grid, error::ParseGridError, render};

/// A grid encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 81 characters, `[1-9]` given, `.` or `0` empty.
    S81,
    /// 81 comma-separated candidate groups; a 1-digit group is a given.
    Csv,
    /// 81 concatenated `g<d>` / `v<d>` / `c<ds>` tokens.
    Gvc,
    /// The bordered multi-line dump with candidates.
    Block,
    /// The Simple-Sudoku clipboard layout (28 or 43 lines).
    SsClipboard,
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::S81 => "s81",
            Self::Csv => "csv",
            Self::Gvc => "gvc",
            Self::Block => "grid block",
            Self::SsClipboard => "ss clipboard",
        };
        f.write_str(name)
    }
}

/// Guesses the encoding of an input string.
///
/// Returns `None` when the input matches no known shape.
#[must_use]
pub fn detect(input: &str) -> Option<Format> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('\n') {
        let lines = trimmed.lines().count();
        if lines == 28 || lines == 43 {
            return Some(Format::SsClipboard);
        }
        if trimmed.contains('+') || trimmed.contains('|') {
            return Some(Format::Block);
        }
        return None;
    }
    if trimmed.contains(',') {
        return Some(Format::Csv);
    }
    if trimmed.starts_with(['g', 'v', 'c'])
        && trimmed.chars().all(|c| matches!(c, 'g' | 'v' | 'c' | '1'..='9'))
    {
        return Some(Format::Gvc);
    }
    if trimmed.len() == 81 && trimmed.chars().all(|c| matches!(c, '.' | '0'..='9')) {
        return Some(Format::S81);
    }
    None
}

impl Grid {
    /// Parses a grid from any supported encoding, auto-detecting the format.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] when the input matches no known shape or
    /// breaks the grammar of the detected format.
    pub fn parse(input: &str) -> Result<Self, ParseGridError> {
        let mut grid = Self::new();
        grid.load(input)?;
        Ok(grid)
    }

    /// Resets the grid and loads `input`, auto-detecting the format.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] when the input matches no known shape or
    /// breaks the grammar of the detected format.
    pub fn load(&mut self, input: &str) -> Result<(), ParseGridError> {
        let format = detect(input).ok_or(ParseGridError::UnknownFormat)?;
        self.load_as(format, input)
    }

    /// Resets the grid and loads `input` as `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] when the input breaks the format's grammar.
    pub fn load_as(&mut self, format: Format, input: &str) -> Result<(), ParseGridError> {
        self.reset();
        let result = match format {
            Format::S81 => load_s81(self, input),
            Format::Csv => load_csv(self, input),
            Format::Gvc => load_gvc(self, input),
            Format::Block => load_block(self, input),
            Format::SsClipboard => load_ss_clipboard(self, input),
        };
        if result.is_err() {
            self.reset();
        }
        result
    }

    /// Encodes the grid in the requested format.
    #[must_use]
    pub fn encode(&self, format: Format) -> String {
        match format {
            Format::S81 => self.encode_s81(),
            Format::Csv => encode_csv(self),
            Format::Gvc => encode_gvc(self),
            Format::Block => render::dump(self),
            Format::SsClipboard => encode_ss_clipboard(self),
        }
    }

    /// Encodes the grid as 81 characters, `.` for unsolved cells.
    #[must_use]
    pub fn encode_s81(&self) -> String {
        Cell::ALL
            .iter()
            .map(|&cell| self.value(cell).map_or('.', Digit::to_char))
            .collect()
    }

    /// Compares the grid against a reference encoding.
    ///
    /// An S81 reference compares values only; the richer formats also
    /// compare candidate sets. Unparseable references never match.
    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        let Some(format) = detect(reference) else {
            return false;
        };
        let Ok(other) = Self::parse(reference) else {
            return false;
        };
        match format {
            Format::S81 | Format::SsClipboard => {
                Cell::ALL.iter().all(|&c| self.value(c) == other.value(c))
            }
            _ => Cell::ALL
                .iter()
                .all(|&c| self.value(c) == other.value(c) && self.candidates(c) == other.candidates(c)),
        }
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_s81())
    }
}

fn load_s81(grid: &mut Grid, input: &str) -> Result<(), ParseGridError> {
    let trimmed = input.trim();
    if trimmed.len() != 81 {
        return Err(ParseGridError::BadLength {
            format: Format::S81,
            expected: 81,
            actual: trimmed.len(),
        });
    }
    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '.' | '0' => {}
            _ => {
                let digit = Digit::from_char(c).ok_or(ParseGridError::BadFormat {
                    format: Format::S81,
                    position: i,
                })?;
                grid.place_given(Cell::new(u8::try_from(i).unwrap_or(0)), digit);
            }
        }
    }
    Ok(())
}

/// Parses one candidate group: 1-9 strictly ascending digits.
fn parse_group(format: Format, position: usize, group: &str) -> Result<DigitSet, ParseGridError> {
    let bad = ParseGridError::BadFormat { format, position };
    if group.is_empty() || group.len() > 9 {
        return Err(bad);
    }
    let mut set = DigitSet::EMPTY;
    let mut last = 0u8;
    for c in group.chars() {
        let digit = Digit::from_char(c).ok_or(bad)?;
        if digit.value() <= last {
            return Err(bad);
        }
        last = digit.value();
        set.insert(digit);
    }
    Ok(set)
}

fn load_csv(grid: &mut Grid, input: &str) -> Result<(), ParseGridError> {
    let groups: Vec<&str> = input.trim().split(',').collect();
    if groups.len() != 81 {
        return Err(ParseGridError::BadLength {
            format: Format::Csv,
            expected: 81,
            actual: groups.len(),
        });
    }
    let mut sets = [DigitSet::EMPTY; 81];
    for (i, group) in groups.iter().enumerate() {
        sets[i] = parse_group(Format::Csv, i, group)?;
    }
    apply_groups(grid, &sets);
    Ok(())
}

/// Applies 81 candidate groups: singletons become givens first, then the
/// remaining groups overwrite candidate sets.
fn apply_groups(grid: &mut Grid, sets: &[DigitSet; 81]) {
    for (i, set) in sets.iter().enumerate() {
        if let Some(digit) = set.as_single() {
            grid.place_given(Cell::new(u8::try_from(i).unwrap_or(0)), digit);
        }
    }
    for (i, set) in sets.iter().enumerate() {
        if set.as_single().is_none() {
            grid.set_candidates(Cell::new(u8::try_from(i).unwrap_or(0)), *set);
        }
    }
}

fn load_gvc(grid: &mut Grid, input: &str) -> Result<(), ParseGridError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let mut tokens = Vec::with_capacity(81);
    let mut i = 0;
    while i < bytes.len() {
        let tag = bytes[i] as char;
        if !matches!(tag, 'g' | 'v' | 'c') {
            return Err(ParseGridError::BadFormat {
                format: Format::Gvc,
                position: i,
            });
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == start {
            return Err(ParseGridError::BadFormat {
                format: Format::Gvc,
                position: start,
            });
        }
        tokens.push((tag, start, &trimmed[start..end]));
        i = end;
    }
    if tokens.len() != 81 {
        return Err(ParseGridError::BadLength {
            format: Format::Gvc,
            expected: 81,
            actual: tokens.len(),
        });
    }

    // values first so candidate groups are applied on settled peers
    for (index, &(tag, position, digits)) in tokens.iter().enumerate() {
        let cell = Cell::new(u8::try_from(index).unwrap_or(0));
        match tag {
            'g' | 'v' => {
                if digits.len() != 1 {
                    return Err(ParseGridError::BadFormat {
                        format: Format::Gvc,
                        position,
                    });
                }
                let digit = Digit::from_char(digits.chars().next().unwrap_or('0')).ok_or(
                    ParseGridError::BadFormat {
                        format: Format::Gvc,
                        position,
                    },
                )?;
                if tag == 'g' {
                    grid.place_given(cell, digit);
                } else {
                    grid.place_value(cell, digit);
                }
            }
            _ => {}
        }
    }
    for (index, &(tag, position, digits)) in tokens.iter().enumerate() {
        if tag == 'c' {
            let set = parse_group(Format::Gvc, position, digits)?;
            grid.set_candidates(Cell::new(u8::try_from(index).unwrap_or(0)), set);
        }
    }
    Ok(())
}

fn encode_csv(grid: &Grid) -> String {
    let groups: Vec<String> = Cell::ALL
        .iter()
        .map(|&cell| match grid.value(cell) {
            Some(digit) => digit.to_string(),
            None => grid.candidates(cell).to_string(),
        })
        .collect();
    groups.join(",")
}

fn encode_gvc(grid: &Grid) -> String {
    let mut out = String::new();
    for cell in Cell::ALL {
        match grid.value(cell) {
            Some(digit) => {
                out.push(if grid.is_given(cell) { 'g' } else { 'v' });
                out.push(digit.to_char());
            }
            None => {
                out.push('c');
                out.push_str(&grid.candidates(cell).to_string());
            }
        }
    }
    out
}

fn load_block(grid: &mut Grid, input: &str) -> Result<(), ParseGridError> {
    let mut tokens = Vec::with_capacity(81);
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('+') || line.starts_with('*') || line.starts_with("|-") {
            continue;
        }
        for token in line.split(['|', ' ']).filter(|t| !t.is_empty()) {
            tokens.push(token);
        }
    }
    if tokens.len() != 81 {
        return Err(ParseGridError::BadLength {
            format: Format::Block,
            expected: 81,
            actual: tokens.len(),
        });
    }
    let mut sets = [DigitSet::EMPTY; 81];
    for (i, token) in tokens.iter().enumerate() {
        sets[i] = parse_group(Format::Block, i, token)?;
    }
    apply_groups(grid, &sets);
    Ok(())
}

fn load_ss_clipboard(grid: &mut Grid, input: &str) -> Result<(), ParseGridError> {
    let lines: Vec<&str> = input.trim_end().lines().collect();
    match lines.len() {
        28 => {
            let values = join_value_lines(&lines, [1..4, 5..8, 9..12]);
            apply_ss_values(grid, &values)
        }
        43 => {
            let values = join_value_lines(&lines, [16..19, 20..23, 24..27]);
            apply_ss_values(grid, &values)?;

            let mut runs = Vec::with_capacity(81);
            for range in [31..34, 35..38, 39..42] {
                for index in range {
                    let line_runs = digit_runs(lines[index]);
                    if line_runs.len() != 9 {
                        return Err(ParseGridError::BadFormat {
                            format: Format::SsClipboard,
                            position: index,
                        });
                    }
                    runs.extend(line_runs);
                }
            }
            for (i, run) in runs.iter().enumerate() {
                let cell = Cell::new(u8::try_from(i).unwrap_or(0));
                if grid.value(cell).is_none() {
                    let set = parse_group(Format::SsClipboard, i, run)?;
                    grid.set_candidates(cell, set);
                }
            }
            Ok(())
        }
        actual => Err(ParseGridError::BadLength {
            format: Format::SsClipboard,
            expected: 28,
            actual,
        }),
    }
}

fn join_value_lines(lines: &[&str], ranges: [std::ops::Range<usize>; 3]) -> String {
    let mut joined = String::new();
    for range in ranges {
        for index in range {
            joined.push_str(lines[index]);
        }
    }
    joined.retain(|c| c != '|' && c != ' ');
    joined
}

fn apply_ss_values(grid: &mut Grid, values: &str) -> Result<(), ParseGridError> {
    if values.chars().count() != 81 {
        return Err(ParseGridError::BadLength {
            format: Format::SsClipboard,
            expected: 81,
            actual: values.chars().count(),
        });
    }
    for (i, c) in values.chars().enumerate() {
        match c {
            '.' | '0' => {}
            _ => {
                let digit = Digit::from_char(c).ok_or(ParseGridError::BadFormat {
                    format: Format::SsClipboard,
                    position: i,
                })?;
                grid.place_given(Cell::new(u8::try_from(i).unwrap_or(0)), digit);
            }
        }
    }
    Ok(())
}

/// Splits a cell line into maximal digit runs, the way the clipboard's
/// candidate rows tokenise.
fn digit_runs(line: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            runs.push(&line[start..i]);
        } else {
            i += 1;
        }
    }
    runs
}

fn encode_ss_clipboard(grid: &Grid) -> String {
    let mut lines = Vec::with_capacity(28);
    lines.push("*-----------*".to_string());
    for band in 0..3 {
        for row in (band * 3)..(band * 3 + 3) {
            let mut line = String::from("|");
            for col in 0..9 {
                let cell = Cell::at(row, col);
                line.push(grid.value(cell).map_or('.', Digit::to_char));
                if col % 3 == 2 {
                    line.push('|');
                }
            }
            lines.push(line);
        }
        lines.push(if band == 2 {
            "*-----------*".to_string()
        } else {
            "|---+---+---|".to_string()
        });
    }
    while lines.len() < 28 {
        lines.push(String::new());
    }
    lines.join("\n")
}
