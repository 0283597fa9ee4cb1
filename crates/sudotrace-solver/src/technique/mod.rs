//! The technique catalogue.
//!
//! Each named deduction implements the [`Technique`] trait: *find one
//! application in the current grid*. A found application is returned as a
//! [`Deduction`] — the prospective mutation plus its explanation payload —
//! and committed through the grid's journaled mutation primitives by the
//! solver loop. A technique that finds nothing returns `None` and leaves no
//! trace, so running it twice on an unchanged grid is free and reproducible.
//!
//! Iteration order is fixed everywhere: rows before columns before boxes,
//! digits ascending, subsets lexicographic. Two runs over equal grids find
//! the same application.

use std::fmt::Debug;
use std::str::FromStr;

use sudotrace_core::{Cell, CellSet, Digit, Grid, Tint};

use crate::error::StrategyError;

pub use self::{
    avoidable::AvoidableRectangle,
    basic_fish::BasicFish,
    bug::BugPlusOne,
    coloring::{ColorTrap, ColorWrap},
    empty_rectangle::EmptyRectangle,
    finned_fish::FinnedFish,
    hidden_sets::HiddenSubset,
    locked_candidates::{Claiming, Pointing},
    locked_sets::{LockedPair, LockedTriple},
    multi_coloring::{MultiColorType1, MultiColorType2},
    naked_sets::NakedSubset,
    remote_pair::RemotePair,
    single_digit_patterns::{Skyscraper, TurbotFish, TwoStringKite},
    singles::{FullHouse, HiddenSingle, NakedSingle},
    sue_de_coq::SueDeCoq,
    uniqueness::{HiddenRectangle, UniqueRectangle},
    wings::{WWing, XyWing, XyzWing},
    x_chain::XChain,
    xy_chain::XyChain,
};

mod avoidable;
mod basic_fish;
mod bug;
mod coloring;
mod empty_rectangle;
mod finned_fish;
mod hidden_sets;
mod locked_candidates;
mod locked_sets;
mod multi_coloring;
mod naked_sets;
mod remote_pair;
mod single_digit_patterns;
mod singles;
mod sue_de_coq;
mod support;
mod uniqueness;
mod wings;
mod x_chain;
mod xy_chain;

/// Identifier of a technique in the catalogue.
///
/// The short codes (`n1`, `lc2`, `bf3`, …) are what strategy strings are
/// written in; the captions are what history entries and explanations carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "variants mirror the catalogue table")]
pub enum TechniqueId {
    FullHouse,
    NakedSingle,
    HiddenSingle,
    LockedPair,
    LockedTriple,
    Pointing,
    Claiming,
    NakedPair,
    NakedTriple,
    NakedQuad,
    HiddenPair,
    HiddenTriple,
    HiddenQuad,
    XWing,
    Swordfish,
    Jellyfish,
    FinnedXWing,
    SashimiXWing,
    FinnedSwordfish,
    SashimiSwordfish,
    FinnedJellyfish,
    SashimiJellyfish,
    Skyscraper,
    TwoStringKite,
    TurbotFish,
    EmptyRectangle,
    ColorTrap,
    ColorWrap,
    MultiColor1,
    MultiColor2,
    XyWing,
    XyzWing,
    WWing,
    XChain,
    RemotePair,
    XyChain,
    Unique1,
    Unique2,
    Unique3,
    Unique4,
    Unique5,
    Unique6,
    HiddenRectangle,
    Avoidable1,
    Avoidable2,
    BugPlus1,
    SueDeCoq,
}

impl TechniqueId {
    /// The whole catalogue, ordered from easiest to hardest. This is what
    /// the `all` strategy macro expands to.
    pub const ALL: [Self; 47] = [
        Self::FullHouse,
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::LockedPair,
        Self::LockedTriple,
        Self::Pointing,
        Self::Claiming,
        Self::NakedPair,
        Self::NakedTriple,
        Self::NakedQuad,
        Self::HiddenPair,
        Self::HiddenTriple,
        Self::HiddenQuad,
        Self::XWing,
        Self::Swordfish,
        Self::Jellyfish,
        Self::FinnedXWing,
        Self::SashimiXWing,
        Self::FinnedSwordfish,
        Self::SashimiSwordfish,
        Self::FinnedJellyfish,
        Self::SashimiJellyfish,
        Self::Skyscraper,
        Self::TwoStringKite,
        Self::TurbotFish,
        Self::EmptyRectangle,
        Self::ColorTrap,
        Self::ColorWrap,
        Self::MultiColor1,
        Self::MultiColor2,
        Self::XyWing,
        Self::XyzWing,
        Self::WWing,
        Self::XChain,
        Self::RemotePair,
        Self::XyChain,
        Self::Unique1,
        Self::Unique2,
        Self::Unique3,
        Self::Unique4,
        Self::Unique5,
        Self::Unique6,
        Self::HiddenRectangle,
        Self::Avoidable1,
        Self::Avoidable2,
        Self::BugPlus1,
        Self::SueDeCoq,
    ];

    /// Returns the short strategy-string code of the technique.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FullHouse => "fh",
            Self::NakedSingle => "n1",
            Self::HiddenSingle => "h1",
            Self::LockedPair => "l2",
            Self::LockedTriple => "l3",
            Self::Pointing => "lc1",
            Self::Claiming => "lc2",
            Self::NakedPair => "n2",
            Self::NakedTriple => "n3",
            Self::NakedQuad => "n4",
            Self::HiddenPair => "h2",
            Self::HiddenTriple => "h3",
            Self::HiddenQuad => "h4",
            Self::XWing => "bf2",
            Self::Swordfish => "bf3",
            Self::Jellyfish => "bf4",
            Self::FinnedXWing => "fbf2",
            Self::SashimiXWing => "sbf2",
            Self::FinnedSwordfish => "fbf3",
            Self::SashimiSwordfish => "sbf3",
            Self::FinnedJellyfish => "fbf4",
            Self::SashimiJellyfish => "sbf4",
            Self::Skyscraper => "sk",
            Self::TwoStringKite => "2sk",
            Self::TurbotFish => "tf",
            Self::EmptyRectangle => "er",
            Self::ColorTrap => "sc1",
            Self::ColorWrap => "sc2",
            Self::MultiColor1 => "mc1",
            Self::MultiColor2 => "mc2",
            Self::XyWing => "xy",
            Self::XyzWing => "xyz",
            Self::WWing => "w",
            Self::XChain => "x",
            Self::RemotePair => "rp",
            Self::XyChain => "xyc",
            Self::Unique1 => "u1",
            Self::Unique2 => "u2",
            Self::Unique3 => "u3",
            Self::Unique4 => "u4",
            Self::Unique5 => "u5",
            Self::Unique6 => "u6",
            Self::HiddenRectangle => "hr",
            Self::Avoidable1 => "ar1",
            Self::Avoidable2 => "ar2",
            Self::BugPlus1 => "bug1",
            Self::SueDeCoq => "sdc",
        }
    }

    /// Returns the caption used in history entries and explanations.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::FullHouse => "Full house",
            Self::NakedSingle => "Naked single",
            Self::HiddenSingle => "Hidden single",
            Self::LockedPair => "Locked pair",
            Self::LockedTriple => "Locked triple",
            Self::Pointing => "Pointing",
            Self::Claiming => "Claiming",
            Self::NakedPair => "Naked pair",
            Self::NakedTriple => "Naked triple",
            Self::NakedQuad => "Naked quadruple",
            Self::HiddenPair => "Hidden pair",
            Self::HiddenTriple => "Hidden triple",
            Self::HiddenQuad => "Hidden quadruple",
            Self::XWing => "X-wing",
            Self::Swordfish => "Swordfish",
            Self::Jellyfish => "Jellyfish",
            Self::FinnedXWing => "Finned X-wing",
            Self::SashimiXWing => "Sashimi X-wing",
            Self::FinnedSwordfish => "Finned Swordfish",
            Self::SashimiSwordfish => "Sashimi Swordfish",
            Self::FinnedJellyfish => "Finned Jellyfish",
            Self::SashimiJellyfish => "Sashimi Jellyfish",
            Self::Skyscraper => "Skyscraper",
            Self::TwoStringKite => "2-string kite",
            Self::TurbotFish => "Turbot fish",
            Self::EmptyRectangle => "Empty rectangle",
            Self::ColorTrap => "Color trap",
            Self::ColorWrap => "Color wrap",
            Self::MultiColor1 => "Multi color type 1",
            Self::MultiColor2 => "Multi color type 2",
            Self::XyWing => "XY-wing",
            Self::XyzWing => "XYZ-wing",
            Self::WWing => "W-wing",
            Self::XChain => "X-chain",
            Self::RemotePair => "Remote pair",
            Self::XyChain => "XY-chain",
            Self::Unique1 => "Uniqueness test 1",
            Self::Unique2 => "Uniqueness test 2",
            Self::Unique3 => "Uniqueness test 3",
            Self::Unique4 => "Uniqueness test 4",
            Self::Unique5 => "Uniqueness test 5",
            Self::Unique6 => "Uniqueness test 6",
            Self::HiddenRectangle => "Hidden rectangle",
            Self::Avoidable1 => "Avoidable rectangle type 1",
            Self::Avoidable2 => "Avoidable rectangle type 2",
            Self::BugPlus1 => "BUG+1",
            Self::SueDeCoq => "Sue de Coq",
        }
    }
}

impl FromStr for TechniqueId {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.code() == s)
            .ok_or_else(|| StrategyError::UnknownTechnique {
                id: s.to_string(),
            })
    }
}

/// The prospective mutation of a found technique application.
#[derive(Debug, Clone)]
pub enum Action {
    /// Place a digit in a cell.
    Place {
        /// The cell to solve.
        cell: Cell,
        /// The digit to place.
        digit: Digit,
    },
    /// Remove candidates from cells.
    Eliminate {
        /// `(digit, cells)` pairs to discard, in ascending digit order.
        targets: Vec<(Digit, CellSet)>,
    },
}

/// One found application: the mutation to commit plus the explanation
/// payload (the defining part of the one-line description and the snapshot
/// decoration).
///
/// The deduction is built *before* anything is mutated; the solver loop
/// commits it through [`Grid::place`] / [`Grid::eliminate`], which is what
/// journals the move. A technique therefore never leaves a partial mutation
/// behind.
#[derive(Debug, Clone)]
pub struct Deduction {
    /// The mutation to commit.
    pub action: Action,
    /// The defining cells/candidates part of the description, e.g.
    /// `4,7 in r4c89`.
    pub subject: String,
    /// Decoration of the defining and removed candidates for snapshots.
    pub tints: Vec<Tint>,
}

impl Deduction {
    /// Creates a placement deduction.
    #[must_use]
    pub fn place(cell: Cell, digit: Digit, subject: impl Into<String>) -> Self {
        Self {
            action: Action::Place { cell, digit },
            subject: subject.into(),
            tints: Vec::new(),
        }
    }

    /// Creates an elimination deduction for a single digit.
    #[must_use]
    pub fn discard(digit: Digit, cells: CellSet, subject: impl Into<String>) -> Self {
        Self::eliminate(vec![(digit, cells)], subject)
    }

    /// Creates an elimination deduction.
    #[must_use]
    pub fn eliminate(targets: Vec<(Digit, CellSet)>, subject: impl Into<String>) -> Self {
        Self {
            action: Action::Eliminate { targets },
            subject: subject.into(),
            tints: Vec::new(),
        }
    }

    /// Attaches snapshot decoration.
    #[must_use]
    pub fn with_tints(mut self, tints: Vec<Tint>) -> Self {
        self.tints = tints;
        self
    }
}

/// A named deduction over the grid.
///
/// `find` must be single-step deterministic: called twice on an unchanged
/// grid it returns the same application, and it only returns `Some` when
/// committing the deduction would actually change the grid.
pub trait Technique: Debug {
    /// Returns the catalogue id of this technique.
    fn id(&self) -> TechniqueId;

    /// Finds one application in the current grid without mutating it.
    fn find(&self, grid: &Grid) -> Option<Deduction>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

/// Builds the technique implementing `id`.
#[must_use]
pub fn technique(id: TechniqueId) -> BoxedTechnique {
    match id {
        TechniqueId::FullHouse => Box::new(FullHouse::new()),
        TechniqueId::NakedSingle => Box::new(NakedSingle::new()),
        TechniqueId::HiddenSingle => Box::new(HiddenSingle::new()),
        TechniqueId::LockedPair => Box::new(LockedPair::new()),
        TechniqueId::LockedTriple => Box::new(LockedTriple::new()),
        TechniqueId::Pointing => Box::new(Pointing::new()),
        TechniqueId::Claiming => Box::new(Claiming::new()),
        TechniqueId::NakedPair => Box::new(NakedSubset::pair()),
        TechniqueId::NakedTriple => Box::new(NakedSubset::triple()),
        TechniqueId::NakedQuad => Box::new(NakedSubset::quad()),
        TechniqueId::HiddenPair => Box::new(HiddenSubset::pair()),
        TechniqueId::HiddenTriple => Box::new(HiddenSubset::triple()),
        TechniqueId::HiddenQuad => Box::new(HiddenSubset::quad()),
        TechniqueId::XWing => Box::new(BasicFish::x_wing()),
        TechniqueId::Swordfish => Box::new(BasicFish::swordfish()),
        TechniqueId::Jellyfish => Box::new(BasicFish::jellyfish()),
        TechniqueId::FinnedXWing => Box::new(FinnedFish::finned(2)),
        TechniqueId::SashimiXWing => Box::new(FinnedFish::sashimi(2)),
        TechniqueId::FinnedSwordfish => Box::new(FinnedFish::finned(3)),
        TechniqueId::SashimiSwordfish => Box::new(FinnedFish::sashimi(3)),
        TechniqueId::FinnedJellyfish => Box::new(FinnedFish::finned(4)),
        TechniqueId::SashimiJellyfish => Box::new(FinnedFish::sashimi(4)),
        TechniqueId::Skyscraper => Box::new(Skyscraper::new()),
        TechniqueId::TwoStringKite => Box::new(TwoStringKite::new()),
        TechniqueId::TurbotFish => Box::new(TurbotFish::new()),
        TechniqueId::EmptyRectangle => Box::new(EmptyRectangle::new()),
        TechniqueId::ColorTrap => Box::new(ColorTrap::new()),
        TechniqueId::ColorWrap => Box::new(ColorWrap::new()),
        TechniqueId::MultiColor1 => Box::new(MultiColorType1::new()),
        TechniqueId::MultiColor2 => Box::new(MultiColorType2::new()),
        TechniqueId::XyWing => Box::new(XyWing::new()),
        TechniqueId::XyzWing => Box::new(XyzWing::new()),
        TechniqueId::WWing => Box::new(WWing::new()),
        TechniqueId::XChain => Box::new(XChain::new()),
        TechniqueId::RemotePair => Box::new(RemotePair::new()),
        TechniqueId::XyChain => Box::new(XyChain::new()),
        TechniqueId::Unique1 => Box::new(UniqueRectangle::test1()),
        TechniqueId::Unique2 => Box::new(UniqueRectangle::test2()),
        TechniqueId::Unique3 => Box::new(UniqueRectangle::test3()),
        TechniqueId::Unique4 => Box::new(UniqueRectangle::test4()),
        TechniqueId::Unique5 => Box::new(UniqueRectangle::test5()),
        TechniqueId::Unique6 => Box::new(UniqueRectangle::test6()),
        TechniqueId::HiddenRectangle => Box::new(HiddenRectangle::new()),
        TechniqueId::Avoidable1 => Box::new(AvoidableRectangle::type1()),
        TechniqueId::Avoidable2 => Box::new(AvoidableRectangle::type2()),
        TechniqueId::BugPlus1 => Box::new(BugPlusOne::new()),
        TechniqueId::SueDeCoq => Box::new(SueDeCoq::new()),
    }
}

/// Builds the whole catalogue, ordered from easiest to hardest.
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    TechniqueId::ALL.into_iter().map(technique).collect()
}

/// Commits a found deduction through the grid's journaled primitives,
/// returning the number of changes.
///
/// Placements count as one change plus their implied eliminations, so a
/// productive application always reports non-zero.
pub fn commit(grid: &mut Grid, id: TechniqueId, deduction: &Deduction) -> usize {
    match &deduction.action {
        Action::Place { cell, digit } => grid.place(id.caption(), *cell, *digit, false),
        Action::Eliminate { targets } => grid.eliminate(id.caption(), targets),
    }
}
