//! Parse table construction and conflict resolution.

use crate::{
    grammar::{Assoc, Grammar, NonterminalID, ProductionID, TerminalID},
    lalr::{Lookaheads, Reduce},
    lr0::{LR0Automaton, StateID},
    types::Map,
    util::display_fn,
};
use std::{cmp::Ordering, fmt};

/// The action a shift-reduce parser performs in a state on a particular
/// lookahead terminal. A terminal with no entry at all means syntax error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Consume the lookahead symbol and transition to the specified state.
    Shift(StateID),

    /// Reduce by the specified production rule.
    Reduce(ProductionID),

    /// The input was recognized.
    Accept,
}

#[derive(Debug)]
pub struct ParseTableRow {
    pub actions: Map<TerminalID, Action>,
    pub gotos: Map<NonterminalID, StateID>,
}

impl ParseTableRow {
    /// The compacted form of this row: `Some(action)` when every terminal
    /// maps to one identical non-shift action, so a consumer may store a
    /// single default action instead of the whole row. Purely an
    /// optimization; the expanded row stays available either way.
    pub fn default_action(&self) -> Option<Action> {
        let mut actions = self.actions.values();
        let first = *actions.next()?;
        if matches!(first, Action::Shift(..)) {
            return None;
        }
        actions.all(|&a| a == first).then_some(first)
    }
}

#[derive(Debug)]
pub struct ParseTable {
    pub states: Map<StateID, ParseTableRow>,
}

impl ParseTable {
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            for (i, (id, row)) in self.states.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                writeln!(f, "#### {:?}", id)?;
                writeln!(f, "## actions")?;
                for (token, action) in &row.actions {
                    let token = &g.terminals[token].name;
                    match action {
                        Action::Shift(n) => writeln!(f, "- {} => shift({:?})", token, n)?,
                        Action::Reduce(p) => {
                            writeln!(f, "- {} => reduce({})", token, g.production(*p).display(g))?
                        }
                        Action::Accept => writeln!(f, "- {} => accept", token)?,
                    }
                }
                if let Some(action) = row.default_action() {
                    writeln!(f, "## default: {:?}", action)?;
                }
                if !row.gotos.is_empty() {
                    writeln!(f, "## gotos")?;
                    for (symbol, goto) in &row.gotos {
                        writeln!(f, "- {} => goto({:?})", g.nonterminals[symbol], goto)?;
                    }
                }
            }
            Ok(())
        })
    }
}

/// A resolved table conflict, reported as a diagnostic. Conflicts never
/// abort table construction; the table always contains the action the
/// policy settled on.
#[derive(Debug)]
pub struct Conflict {
    pub state: StateID,
    pub terminal: TerminalID,
    pub kind: ConflictKind,
}

#[derive(Debug)]
pub enum ConflictKind {
    /// Neither the shift terminal nor the reducing production carried
    /// enough precedence information; the shift was kept.
    ShiftReduce {
        shift: StateID,
        reduce: ProductionID,
    },

    /// Multiple reductions competed for the cell; the production with the
    /// lowest declaration index was kept.
    ReduceReduce {
        chosen: ProductionID,
        rejected: Vec<ProductionID>,
    },
}

impl Conflict {
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            let token = &g.terminals[&self.terminal].name;
            match &self.kind {
                ConflictKind::ShiftReduce { shift, reduce } => write!(
                    f,
                    "shift/reduce conflict in {:?} on {}: shift({:?}) vs reduce({}); resolved as shift",
                    self.state,
                    token,
                    shift,
                    g.production(*reduce).display(g),
                ),
                ConflictKind::ReduceReduce { chosen, rejected } => {
                    write!(
                        f,
                        "reduce/reduce conflict in {:?} on {}: kept reduce({})",
                        self.state,
                        token,
                        g.production(*chosen).display(g),
                    )?;
                    for p in rejected {
                        write!(f, ", dropped reduce({})", g.production(*p).display(g))?;
                    }
                    Ok(())
                }
            }
        })
    }
}

#[derive(Default)]
struct PendingAction {
    shift: Option<StateID>,
    reduces: Vec<ProductionID>,
}

/// Merge the shift edges and the reduction lookaheads into one resolved
/// action per (state, terminal) cell. Conflicts are resolved by the policy
/// below and collected as diagnostics; a usable table is always produced.
#[tracing::instrument(skip_all)]
pub fn build(g: &Grammar, lr0: &LR0Automaton, la: &Lookaheads) -> (ParseTable, Vec<Conflict>) {
    let mut states = Map::default();
    let mut conflicts = Vec::new();

    for (&id, lr0_state) in &lr0.states {
        let mut pending = Map::<TerminalID, PendingAction>::default();
        for (&t, &next) in &lr0_state.shifts {
            pending.entry(t).or_default().shift = Some(next);
        }
        let mut accept = false;
        for &production in &lr0_state.reduces {
            if production == ProductionID::ACCEPT {
                accept = true;
                continue;
            }
            let key = Reduce {
                state: id,
                production,
            };
            for t in la.lookaheads[&key].iter() {
                pending.entry(t).or_default().reduces.push(production);
            }
        }

        let mut actions = Map::default();
        for (terminal, action) in pending {
            let resolved = resolve(g, id, terminal, action, &mut conflicts);
            actions.insert(terminal, resolved);
        }
        if accept {
            // The augmented production's reduction is always Accept on
            // end-of-input, never an ordinary reduce.
            actions.insert(TerminalID::EOI, Action::Accept);
        }

        let mut gotos = Map::default();
        for (&n, &next) in &lr0_state.gotos {
            gotos.insert(n, next);
        }

        states.insert(id, ParseTableRow { actions, gotos });
    }

    tracing::debug!(num_conflicts = conflicts.len());
    (ParseTable { states }, conflicts)
}

/// The deterministic conflict policy, applied per cell:
///
/// - reduce/reduce: the earliest-declared production wins, reported once
///   per cell.
/// - shift/reduce: when both sides carry a declared precedence, reduce
///   wins if its precedence is higher, or equal and left-associative;
///   otherwise shift wins. Resolution by declared precedence is silent.
///   When either side lacks a precedence, shift wins and the conflict is
///   reported.
fn resolve(
    g: &Grammar,
    state: StateID,
    terminal: TerminalID,
    pending: PendingAction,
    conflicts: &mut Vec<Conflict>,
) -> Action {
    let PendingAction { shift, mut reduces } = pending;

    let reduce = match reduces.len() {
        0 => None,
        1 => Some(reduces[0]),
        _ => {
            reduces.sort_unstable();
            let chosen = reduces[0];
            conflicts.push(Conflict {
                state,
                terminal,
                kind: ConflictKind::ReduceReduce {
                    chosen,
                    rejected: reduces.split_off(1),
                },
            });
            Some(chosen)
        }
    };

    match (shift, reduce) {
        (Some(next), None) => Action::Shift(next),
        (None, Some(production)) => Action::Reduce(production),
        (Some(next), Some(production)) => {
            let shift_prec = g.terminals[&terminal].precedence;
            let reduce_prec = g.production(production).precedence(g);
            match (shift_prec, reduce_prec) {
                (Some(sp), Some(rp)) => match Ord::cmp(&rp.priority, &sp.priority) {
                    Ordering::Greater => Action::Reduce(production),
                    Ordering::Less => Action::Shift(next),
                    Ordering::Equal if rp.assoc == Assoc::Left => Action::Reduce(production),
                    Ordering::Equal => Action::Shift(next),
                },
                _ => {
                    conflicts.push(Conflict {
                        state,
                        terminal,
                        kind: ConflictKind::ShiftReduce {
                            shift: next,
                            reduce: production,
                        },
                    });
                    Action::Shift(next)
                }
            }
        }
        (None, None) => unreachable!("a pending cell always holds an action"),
    }
}
