//! Construction of the canonical LR(0) collection.

use crate::{
    grammar::{Grammar, NonterminalID, ProductionID, SymbolID, TerminalID},
    types::{Map, Set},
    util::display_fn,
};
use std::{collections::VecDeque, fmt};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateID(u16);

impl StateID {
    /// The initial state, seeded with the augmented production at dot zero.
    pub const INITIAL: Self = Self(0);
}

impl fmt::Debug for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S#{:03}", self.0)
    }
}

/// An LR(0) item: a production with a dot position in `0..=right.len()`.
/// The dot at `right.len()` makes it a reduction item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LR0Item {
    pub production: ProductionID,
    pub index: u16,
}

impl LR0Item {
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            let production = g.production(self.production);
            write!(f, "{} -> [", g.nonterminals[&production.left])?;
            for (i, r) in production.right.iter().enumerate() {
                if i == self.index as usize {
                    f.write_str(" .")?;
                }
                match r {
                    SymbolID::N(n) => write!(f, " {}", g.nonterminals[n])?,
                    SymbolID::T(t) => write!(f, " {}", g.terminals[t].name)?,
                }
            }
            if production.right.len() == self.index as usize {
                f.write_str(" .")?;
            }
            f.write_str(" ]")
        })
    }
}

#[derive(Debug)]
pub struct LR0State {
    /// The kernel items identifying this state, in canonical (sorted) order.
    pub kernels: Vec<LR0Item>,
    /// The full closure item set; the kernel items come first.
    pub items: Vec<LR0Item>,
    pub shifts: Map<TerminalID, StateID>,
    pub gotos: Map<NonterminalID, StateID>,
    /// Reduction items of this state, sorted by declaration index.
    pub reduces: Vec<ProductionID>,
}

impl LR0State {
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            writeln!(f, "## items:")?;
            for item in &self.items {
                writeln!(f, "- {}", item.display(g))?;
            }
            if !self.shifts.is_empty() {
                writeln!(f, "## shifts:")?;
                for (t, to) in &self.shifts {
                    writeln!(f, "- {} => {:?}", g.terminals[t].name, to)?;
                }
            }
            if !self.gotos.is_empty() {
                writeln!(f, "## gotos:")?;
                for (n, to) in &self.gotos {
                    writeln!(f, "- {} => {:?}", g.nonterminals[n], to)?;
                }
            }
            if !self.reduces.is_empty() {
                writeln!(f, "## reduces:")?;
                for reduce in &self.reduces {
                    writeln!(f, "- {}", g.production(*reduce).display(g))?;
                }
            }
            Ok(())
        })
    }
}

#[derive(Debug)]
pub struct LR0Automaton {
    pub states: Map<StateID, LR0State>,
}

impl LR0Automaton {
    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            for (id, state) in &self.states {
                writeln!(f, "#### {:?}", id)?;
                write!(f, "{}", state.display(g))?;
            }
            Ok(())
        })
    }
}

/// Compute the canonical collection of LR(0) item sets for the grammar.
///
/// States are numbered in discovery order, so the numbering depends only on
/// the declaration order of the grammar.
#[tracing::instrument(skip_all)]
pub fn automaton(g: &Grammar) -> LR0Automaton {
    let nonkernels = nonkernels(g);

    let mut states = Map::<StateID, LR0State>::default();
    let mut next_state_id = 0u16;
    let mut state_id = move || {
        let id = StateID(next_state_id);
        next_state_id += 1;
        id
    };

    let mut pending_states = VecDeque::<(StateID, Vec<LR0Item>)>::new();
    pending_states.push_back((
        state_id(),
        vec![LR0Item {
            production: ProductionID::ACCEPT,
            index: 0,
        }],
    ));

    let mut items = Set::<LR0Item>::default();
    let mut new_kernels = Map::<SymbolID, Set<LR0Item>>::default();
    let mut isocores = Map::<Vec<LR0Item>, StateID>::default();
    while let Some((current, kernels)) = pending_states.pop_front() {
        // closure: kernel items first, then the nonkernel items of every
        // nonterminal right after a dot. The per-nonterminal sets are
        // already transitively closed.
        items.clear();
        for kernel in &kernels {
            items.insert(*kernel);
            let production = g.production(kernel.production);
            if let Some(SymbolID::N(n)) = production.right.get::<usize>(kernel.index.into()) {
                items.extend(nonkernels[n].iter().copied());
            }
        }

        let state_items: Vec<LR0Item> = items.iter().copied().collect();

        let mut reduces = Vec::new();
        new_kernels.clear();
        for item in items.drain(..) {
            let production = g.production(item.production);
            match production.right.get::<usize>(item.index.into()) {
                Some(sym) => {
                    new_kernels.entry(*sym).or_default().insert(LR0Item {
                        index: item.index + 1,
                        ..item
                    });
                }
                None => reduces.push(item.production),
            }
        }
        reduces.sort_unstable();

        let mut shifts = Map::default();
        let mut gotos = Map::default();
        for (sym, new_kernel) in new_kernels.drain(..) {
            // canonical kernel key: sorted (production, dot) pairs, so that
            // structurally identical candidates merge regardless of the
            // order their items were produced in.
            let mut new_kernel: Vec<_> = new_kernel.into_iter().collect();
            new_kernel.sort_unstable();
            let next = match isocores.get(&new_kernel) {
                Some(&id) => id,
                None => {
                    let id = state_id();
                    isocores.insert(new_kernel.clone(), id);
                    pending_states.push_back((id, new_kernel));
                    id
                }
            };
            match sym {
                SymbolID::T(t) => {
                    shifts.insert(t, next);
                }
                SymbolID::N(n) => {
                    gotos.insert(n, next);
                }
            }
        }

        states.insert(
            current,
            LR0State {
                kernels,
                items: state_items,
                shifts,
                gotos,
                reduces,
            },
        );
    }

    tracing::debug!(num_states = states.len());
    LR0Automaton { states }
}

/// The transitively closed set of dot-zero items for each nonterminal.
fn nonkernels(g: &Grammar) -> Map<NonterminalID, Set<LR0Item>> {
    let mut seeds = Map::<NonterminalID, Set<LR0Item>>::default();
    for &n in g.nonterminals.keys() {
        seeds.insert(n, Set::default());
    }
    for (&id, p) in &g.productions {
        seeds[&p.left].insert(LR0Item {
            production: id,
            index: 0,
        });
    }

    let mut nonkernels = Map::default();
    for &n in g.nonterminals.keys() {
        let mut items = seeds[&n].clone();
        loop {
            let mut added = Set::default();
            for item in &items {
                if let Some(SymbolID::N(m)) = g.production(item.production).right.first() {
                    added.extend(seeds[m].iter().copied());
                }
            }
            let changed = added
                .drain(..)
                .fold(false, |changed, item| changed | items.insert(item));
            if !changed {
                break;
            }
        }
        nonkernels.insert(n, items);
    }
    nonkernels
}
