//! An LALR(1) parser table generator.
//!
//! The pipeline is split into one module per stage:
//!
//! 1. [`grammar`] — the symbol and production model, built through
//!    [`Grammar::define`] and checked by [`Grammar::validate`].
//! 2. [`lr0`] — the canonical LR(0) collection, with structurally
//!    identical states merged.
//! 3. [`lalr`] — the DeRemer–Pennello look-ahead sets, solved with the
//!    digraph traversal in [`digraph`].
//! 4. [`table`] — the conflict-resolved action/goto table.
//!
//! [`generate`] runs the stages in order and returns everything they
//! produced, so a caller can render the table, print the automaton, or
//! report the conflicts as it sees fit.

pub mod digraph;
pub mod grammar;
pub mod lalr;
pub mod lr0;
pub mod table;

mod types;
mod util;

use crate::{
    grammar::{Grammar, GrammarError},
    lalr::Lookaheads,
    lr0::LR0Automaton,
    table::{Conflict, ParseTable},
};

/// The artifacts of one generation run.
#[derive(Debug)]
#[non_exhaustive]
pub struct Generated {
    pub automaton: LR0Automaton,
    pub lookaheads: Lookaheads,
    pub table: ParseTable,
    /// Conflicts the table builder resolved, in discovery order. An empty
    /// list means the grammar is LALR(1) under the declared precedences.
    pub conflicts: Vec<Conflict>,
}

/// Validate the grammar and derive its parse table.
///
/// Only validity violations are errors; conflicts are resolved by a fixed
/// policy and reported in [`Generated::conflicts`].
#[tracing::instrument(skip_all)]
pub fn generate(g: &Grammar) -> Result<Generated, GrammarError> {
    g.validate()?;
    let automaton = lr0::automaton(g);
    let lookaheads = lalr::lookaheads(g, &automaton);
    let (table, conflicts) = table::build(g, &automaton, &lookaheads);
    Ok(Generated {
        automaton,
        lookaheads,
        table,
        conflicts,
    })
}
