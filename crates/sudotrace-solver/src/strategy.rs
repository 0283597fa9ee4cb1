//! Strategy expressions: comma-separated technique ids with expansion
//! macros and a set-difference operator.
//!
//! ```text
//! strategy := term ('-' term)?
//! term     := id (',' id)*
//! id       := technique code | 'ssts' | 'all' | 'hodoku_easy'
//!           | 'hodoku_medium' | 'hodoku_hard' | 'hodoku_unfair'
//! ```
//!
//! Macros expand textually before ids are parsed, so `ssts-xy` means "the
//! SSTS list without XY-wing". Expansion is idempotent; unknown ids are a
//! parse error.

use crate::{error::StrategyError, technique::TechniqueId};

/// The Simple-Sudoku technique set, in its documented order.
///
/// Source: <http://sudopedia.enjoysudoku.com/SSTS.html>
pub const STRATEGY_SSTS: &str = "n1,h1,n2,lc1,lc2,n3,n4,h2,bf2,bf3,sc1,sc2,mc1,mc2,h3,xy,h4";

/// Techniques allowed in hodoku "easy" grids.
pub const STRATEGY_HODOKU_EASY: &str = "n1,h1";

/// Techniques allowed in hodoku "medium" grids.
pub const STRATEGY_HODOKU_MEDIUM: &str = "n1,h1,l2,l3,lc1,lc2,n2,n3,h2,h3";

/// Techniques allowed in hodoku "hard" grids.
pub const STRATEGY_HODOKU_HARD: &str = "n1,h1,l2,l3,lc1,lc2,n2,n3,h2,h3,n4,h4,bf2,bf3,bf4,\
rp,bug1,sk,2sk,tf,er,w,xy,xyz,u1,u2,u3,u4,u5,u6,hr,ar1,ar2,fbf2,sbf2,sc1,sc2,mc1,mc2";

/// Techniques allowed in hodoku "unfair" grids.
pub const STRATEGY_HODOKU_UNFAIR: &str =
    "n1,h1,n2,lc1,lc2,n3,n4,h2,bf2,bf3,sc1,sc2,mc1,mc2,h3,xy,h4,xyc";

fn expand_macros(term: &str) -> String {
    let all = TechniqueId::ALL
        .iter()
        .map(|id| id.code())
        .collect::<Vec<_>>()
        .join(",");
    term.split(',')
        .map(|id| match id.trim() {
            "ssts" => STRATEGY_SSTS.to_string(),
            "all" => all.clone(),
            "hodoku_easy" => STRATEGY_HODOKU_EASY.to_string(),
            "hodoku_medium" => STRATEGY_HODOKU_MEDIUM.to_string(),
            "hodoku_hard" => STRATEGY_HODOKU_HARD.to_string(),
            "hodoku_unfair" => STRATEGY_HODOKU_UNFAIR.to_string(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_term(term: &str) -> Result<Vec<TechniqueId>, StrategyError> {
    expand_macros(term)
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::parse)
        .collect()
}

/// Resolves a strategy expression into the effective technique priority
/// list.
///
/// # Errors
///
/// Returns [`StrategyError`] when the expression references an unknown id,
/// subtracts more than once, or resolves to an empty list.
///
/// # Examples
///
/// ```
/// use sudotrace_solver::strategy::resolve;
/// use sudotrace_solver::technique::TechniqueId;
///
/// let list = resolve("n1,h1").unwrap();
/// assert_eq!(list, vec![TechniqueId::NakedSingle, TechniqueId::HiddenSingle]);
///
/// // the SSTS macro minus XY-wing
/// let list = resolve("ssts-xy").unwrap();
/// assert!(!list.contains(&TechniqueId::XyWing));
/// ```
pub fn resolve(strategy: &str) -> Result<Vec<TechniqueId>, StrategyError> {
    let mut parts = strategy.split('-');
    let base = parts.next().ok_or(StrategyError::Empty)?;
    let minus = parts.next();
    if parts.next().is_some() {
        return Err(StrategyError::ExtraDifference);
    }

    let mut list = parse_term(base)?;
    if let Some(minus) = minus {
        let subtract = parse_term(minus)?;
        list.retain(|id| !subtract.contains(id));
    }
    if list.is_empty() {
        return Err(StrategyError::Empty);
    }
    Ok(list)
}
