//! Multi-line grid printout with per-candidate decoration.
//!
//! The layout follows the classic bordered dump: one 9-wide field per cell,
//! `|` separators every three columns, a dashed rule every three rows.
//! Solved cells show their value, unsolved cells their candidate string, and
//! a decoration spec can mark individual candidates (defining cells of a
//! technique, removed candidates, colouring clusters).

use std::fmt::Write as _;

use crate::{Cell, CellSet, DigitSet, Grid, history::RemovedMap};

/// How the dump renders candidate decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecorMode {
    /// No decoration, plain candidate strings.
    #[default]
    Plain,
    /// Decorated candidates carry a marker character prefix.
    Marker,
    /// Decorated candidates are wrapped in ANSI colour escapes.
    Color,
}

/// The role a candidate plays in a rendered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decor {
    /// Not involved in the move.
    #[default]
    Default,
    /// Part of the defining pattern.
    Defining,
    /// About to be (or just) removed.
    Removed,
    /// First colouring cluster colour.
    Color1,
    /// Second colouring cluster colour.
    Color2,
    /// Third colouring cluster colour.
    Color3,
    /// Fourth colouring cluster colour.
    Color4,
    /// A placed value.
    Value,
    /// A given value.
    Given,
}

impl Decor {
    fn ansi(self) -> &'static str {
        match self {
            Self::Default => "\x1b[36m",  // cyan
            Self::Defining => "\x1b[32m", // green
            Self::Removed => "\x1b[31m",  // red
            Self::Color1 => "\x1b[33m",   // yellow
            Self::Color2 => "\x1b[34m",   // blue
            Self::Color3 => "\x1b[35m",   // magenta
            Self::Color4 => "\x1b[37m",   // white
            Self::Value => "\x1b[0m",
            Self::Given => "\x1b[1m",
        }
    }

    fn marker(self) -> Option<char> {
        match self {
            Self::Default | Self::Value | Self::Given => None,
            Self::Defining => Some('*'),
            Self::Removed => Some('-'),
            Self::Color1 => Some('+'),
            Self::Color2 => Some('~'),
            Self::Color3 => Some('^'),
            Self::Color4 => Some('='),
        }
    }
}

const RESET: &str = "\x1b[0m";

/// One decoration rule: the candidates of `candidates` in the cells of
/// `cells` render with `decor`.
///
/// Rules are applied in order; when several rules target the same
/// `(cell, candidate)` pair, the last one wins.
#[derive(Debug, Clone, Copy)]
pub struct Tint {
    /// The cells the rule applies to.
    pub cells: CellSet,
    /// The candidates the rule applies to within those cells.
    pub candidates: DigitSet,
    /// The decoration to apply.
    pub decor: Decor,
}

impl Tint {
    /// Creates a decoration rule.
    #[must_use]
    pub fn new(cells: CellSet, candidates: DigitSet, decor: Decor) -> Self {
        Self {
            cells,
            candidates,
            decor,
        }
    }
}

/// Renders the grid without decoration.
#[must_use]
pub fn dump(grid: &Grid) -> String {
    dump_decorated(grid, &[])
}

/// Renders the grid, decorating candidates per `tints` in the grid's
/// [`DecorMode`].
#[must_use]
pub fn dump_decorated(grid: &Grid, tints: &[Tint]) -> String {
    render(grid, tints, |_, candidates| candidates)
}

/// Renders the grid as it looked before the eliminations of `removed`:
/// every removed candidate is restored for display, so a `Removed` tint can
/// point at it.
#[must_use]
pub fn dump_restored(grid: &Grid, removed: &RemovedMap, tints: &[Tint]) -> String {
    render(grid, tints, |cell, candidates| {
        let mut shown = candidates;
        for (digit, cells) in removed.iter() {
            if cells.contains(cell) {
                shown.insert(digit);
            }
        }
        shown
    })
}

fn render(
    grid: &Grid,
    tints: &[Tint],
    shown_candidates: impl Fn(Cell, DigitSet) -> DigitSet,
) -> String {
    let hborder: String = {
        let mut line = String::new();
        for _ in 0..3 {
            line.push('+');
            line.push_str(&"-".repeat(29));
        }
        line.push('+');
        line
    };

    let mut out = String::new();
    for row in 0..9 {
        if row % 3 == 0 {
            out.push_str(&hborder);
            out.push('\n');
        }
        for col in 0..9 {
            let cell = Cell::at(row, col);
            out.push(if col % 3 == 0 { '|' } else { ' ' });
            let field = match grid.value(cell) {
                Some(digit) => (digit.to_string(), 1),
                None => {
                    let shown = shown_candidates(cell, grid.candidates(cell));
                    decorate(grid, cell, shown, tints)
                }
            };
            out.push_str(&field.0);
            // manual padding: escape sequences fool format padding
            for _ in field.1..9 {
                out.push(' ');
            }
        }
        out.push_str("|\n");
    }
    out.push_str(&hborder);
    out.push('\n');
    out
}

/// Renders one cell's candidate string, returning the text and its visible
/// width.
fn decorate(grid: &Grid, cell: Cell, shown: DigitSet, tints: &[Tint]) -> (String, usize) {
    let mode = grid.decoration();
    if tints.is_empty() || mode == DecorMode::Plain {
        let text = shown.to_string();
        let width = text.len();
        return (text, width);
    }

    let mut out = String::new();
    let mut width = 0;
    for digit in shown {
        let mut decor = Decor::Default;
        for tint in tints {
            if tint.cells.contains(cell) && tint.candidates.contains(digit) {
                decor = tint.decor;
            }
        }
        match mode {
            DecorMode::Plain => unreachable!(),
            DecorMode::Marker => {
                if let Some(marker) = decor.marker() {
                    out.push(marker);
                    width += 1;
                }
                let _ = write!(out, "{digit}");
                width += 1;
            }
            DecorMode::Color => {
                let _ = write!(out, "{}{digit}{RESET}", decor.ansi());
                width += 1;
            }
        }
    }
    (out, width)
}
