//! LALR(1) look-ahead sets computation.
//!
//! The algorithm is DeRemer and Pennello's method\[1\]: the DR, Reads,
//! Includes and Lookback relations are derived from the LR(0) automaton,
//! and the Read/Follow sets are solved with the shared digraph traversal.
//!
//! \[1\]: DeRemer and Pennello, Efficient Computation of LALR(1) Look-Ahead
//!       Sets <https://dl.acm.org/doi/10.1145/69622.357187>

use crate::{
    digraph,
    grammar::{Grammar, NonterminalID, ProductionID, SymbolID, TerminalID, TerminalSet},
    lr0::{LR0Automaton, StateID},
    types::Map,
};
use std::{fmt, ops};

/// A goto transition `(p, A)`: the edge leaving state `p` on nonterminal
/// `A`. The pair uniquely identifies the edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateID,
    pub symbol: NonterminalID,
    pub to: StateID,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?})->{:?}", self.from, self.symbol, self.to)
    }
}

/// Dense arena of goto transitions. The fixed-point algorithms address
/// transitions by index into this arena, so the per-transition sets and
/// traversal markers are plain index-sized vectors.
#[derive(Debug, Default)]
pub struct Transitions {
    arena: Vec<Transition>,
    index: Map<(StateID, NonterminalID), usize>,
}

impl Transitions {
    fn push(&mut self, t: Transition) -> usize {
        let x = self.arena.len();
        self.arena.push(t);
        self.index.insert((t.from, t.symbol), x);
        x
    }

    pub fn get(&self, from: StateID, symbol: NonterminalID) -> Option<usize> {
        self.index.get(&(from, symbol)).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Transition)> + '_ {
        self.arena.iter().enumerate()
    }
}

impl ops::Index<usize> for Transitions {
    type Output = Transition;

    fn index(&self, x: usize) -> &Self::Output {
        &self.arena[x]
    }
}

/// A reduction item `(q, A -> ω)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Reduce {
    pub state: StateID,
    pub production: ProductionID,
}

impl fmt::Debug for Reduce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?})", self.state, self.production)
    }
}

#[derive(Debug)]
pub struct Lookaheads {
    pub transitions: Transitions,
    /// `DR(p,A)`: terminals with a shift transition out of `goto(p,A)`.
    pub direct_reads: Vec<TerminalSet>,
    /// `Read(p,A) = DR(p,A) ∪ ⋃ { Read(r,C) | (p,A) reads (r,C) }`.
    pub reads: Vec<TerminalSet>,
    /// `Follow(p,A) = Read(p,A) ∪ ⋃ { Follow(q,B) | (p,A) includes (q,B) }`.
    pub follows: Vec<TerminalSet>,
    /// `LA(q, A -> ω) = ⋃ { Follow(p,A) | (q, A -> ω) lookback (p,A) }`,
    /// for every reduction item of the automaton except the augmented one.
    pub lookaheads: Map<Reduce, TerminalSet>,
}

/// Compute the look-ahead sets for every reduction in the automaton.
#[tracing::instrument(skip_all)]
pub fn lookaheads(g: &Grammar, lr0: &LR0Automaton) -> Lookaheads {
    let mut transitions = Transitions::default();
    for (&from, state) in &lr0.states {
        for (&symbol, &to) in &state.gotos {
            transitions.push(Transition { from, symbol, to });
        }
    }
    tracing::debug!(num_transitions = transitions.len());

    // DR(p,A) := { t | goto(p,A) --(t)--> }
    let mut direct_reads: Vec<TerminalSet> = transitions
        .iter()
        .map(|(_, t)| lr0.states[&t.to].shifts.keys().copied().collect())
        .collect();

    // No state shifts the end-of-input marker; it becomes readable the
    // moment the start symbol is complete. Seeding it into the initial
    // start transition lets it flow into every reduction that can end
    // the input, through the Follow computation.
    if let Some(x) = transitions.get(StateID::INITIAL, g.start_symbol) {
        direct_reads[x].insert(TerminalID::EOI);
    }

    // (p,A) reads (r,C) <==> r = goto(p,A), r --(C)--> and C =>* ε
    let mut reads_edges = vec![Vec::new(); transitions.len()];
    for x in 0..transitions.len() {
        let t = transitions[x];
        for &c in lr0.states[&t.to].gotos.keys() {
            if !g.nullables.contains(&c) {
                continue;
            }
            if let Some(y) = transitions.get(t.to, c) {
                reads_edges[x].push(y);
            }
        }
    }

    // (p,A) includes (q,B) <==> B -> β A γ, γ =>* ε, q --(β)--> p
    //
    // Found by walking the goto path of each production of B out of q and
    // then scanning the right-hand side backwards while the trailing
    // suffix stays nullable.
    let mut includes_edges = vec![Vec::new(); transitions.len()];
    let mut path = Vec::new();
    for (y, t) in transitions.iter() {
        for (_, p) in g.productions_of(t.symbol) {
            // path[i] is the state in front of right[i].
            path.clear();
            let mut current = t.from;
            let mut complete = true;
            for sym in &p.right {
                path.push(current);
                let next = match sym {
                    SymbolID::T(tid) => lr0.states[&current].shifts.get(tid),
                    SymbolID::N(n) => lr0.states[&current].gotos.get(n),
                };
                match next {
                    Some(&next) => current = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if !complete {
                continue;
            }

            for (i, sym) in p.right.iter().enumerate().rev() {
                let SymbolID::N(a) = sym else { break };
                if let Some(x) = transitions.get(path[i], *a) {
                    if !includes_edges[x].contains(&y) {
                        includes_edges[x].push(y);
                    }
                }
                if !g.nullables.contains(a) {
                    break;
                }
            }
        }
    }

    let mut reads = direct_reads.clone();
    digraph::propagate(&mut reads, &reads_edges);

    let mut follows = reads.clone();
    digraph::propagate(&mut follows, &includes_edges);

    // (q, A -> ω) lookback (p,A) <==> p --(ω)--> q
    //
    // Rather than materializing the relation, walk every production from
    // every state and fold the Follow sets into the LA sets directly.
    let mut lookaheads = Map::<Reduce, TerminalSet>::default();
    for (&state, lr0_state) in &lr0.states {
        for &production in &lr0_state.reduces {
            if production != ProductionID::ACCEPT {
                lookaheads.entry(Reduce { state, production }).or_default();
            }
        }
    }
    for &from in lr0.states.keys() {
        for (&pid, p) in &g.productions {
            if pid == ProductionID::ACCEPT {
                continue;
            }
            let mut current = from;
            let mut complete = true;
            for sym in &p.right {
                let next = match sym {
                    SymbolID::T(tid) => lr0.states[&current].shifts.get(tid),
                    SymbolID::N(n) => lr0.states[&current].gotos.get(n),
                };
                match next {
                    Some(&next) => current = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if !complete {
                continue;
            }
            let Some(x) = transitions.get(from, p.left) else {
                continue;
            };
            let key = Reduce {
                state: current,
                production: pid,
            };
            if let Some(la) = lookaheads.get_mut(&key) {
                la.union_with(&follows[x]);
            }
        }
    }

    Lookaheads {
        transitions,
        direct_reads,
        reads,
        follows,
        lookaheads,
    }
}
