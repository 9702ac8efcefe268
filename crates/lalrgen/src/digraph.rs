//! The cycle-collapsing digraph traversal of DeRemer and Pennello.
//!
//! Both the Read and the Follow computations are instances of the same
//! problem: given seed sets `F0(x)` and an edge relation `x -> y`, compute
//! the smallest `F` with `F(x) = F0(x) ∪ ⋃{ F(y) | x -> y }`. The traversal
//! below solves it once; the callers differ only in the edge lists and the
//! seed sets they pass in.

use crate::grammar::TerminalSet;
use std::cmp;

/// Solve the relation in place: `sets[x]` holds `F0(x)` on entry and `F(x)`
/// on return. `edges[x]` lists the successors of `x`.
///
/// Strongly connected components are collapsed into one shared set (their
/// members are marked as visited "at infinity"), so the traversal
/// terminates on cyclic relations and runs in time linear in the number of
/// vertices and edges.
pub fn propagate(sets: &mut [TerminalSet], edges: &[Vec<usize>]) {
    debug_assert_eq!(sets.len(), edges.len());
    Traversal {
        sets,
        edges,
        n: vec![0; edges.len()],
        stack: vec![],
    }
    .run()
}

struct Traversal<'a> {
    sets: &'a mut [TerminalSet],
    edges: &'a [Vec<usize>],
    n: Vec<usize>,
    stack: Vec<usize>,
}

impl Traversal<'_> {
    fn run(&mut self) {
        for x in 0..self.edges.len() {
            if self.n[x] == 0 {
                self.traverse(x);
            }
        }
    }

    fn traverse(&mut self, x: usize) {
        self.stack.push(x);
        let d = self.stack.len();
        self.n[x] = d;

        for i in 0..self.edges[x].len() {
            let y = self.edges[x][i];
            if self.n[y] == 0 {
                self.traverse(y);
            }
            self.n[x] = cmp::min(self.n[x], self.n[y]);

            if x != y {
                // F(x) <- F(x) ∪ F(y)
                let (dst, src) = get_two_mut(self.sets, x, y);
                dst.union_with(src);
            }
        }

        if self.n[x] != d {
            return;
        }

        while let Some(s) = self.stack.pop() {
            self.n[s] = usize::MAX;
            if s == x {
                break;
            }
            // F(s) <- F(x)
            let (dst, src) = get_two_mut(self.sets, s, x);
            dst.union_with(src);
        }
    }
}

fn get_two_mut<T>(slice: &mut [T], x: usize, y: usize) -> (&mut T, &mut T) {
    assert!(
        x != y && cmp::max(x, y) < slice.len(),
        "index condition not satisfied"
    );
    if x < y {
        let (a, b) = slice.split_at_mut(y);
        (&mut a[x], &mut b[0])
    } else {
        let (a, b) = slice.split_at_mut(x);
        (&mut b[0], &mut a[y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Grammar, TerminalID, TerminalSet};

    fn terminals(n: usize) -> Vec<TerminalID> {
        let mut ids = vec![];
        Grammar::define(|g| {
            for i in 0..n {
                ids.push(g.terminal(&format!("t{}", i), None)?);
            }
            g.nonterminal("s")?;
            Ok(())
        })
        .unwrap();
        ids
    }

    fn set(ts: &[TerminalID]) -> TerminalSet {
        ts.iter().copied().collect()
    }

    #[test]
    fn acyclic_propagation() {
        let t = terminals(3);
        // 0 -> 1 -> 2
        let mut sets = vec![set(&[t[0]]), set(&[t[1]]), set(&[t[2]])];
        propagate(&mut sets, &[vec![1], vec![2], vec![]]);
        assert_eq!(sets[0].iter().collect::<Vec<_>>(), vec![t[0], t[1], t[2]]);
        assert_eq!(sets[1].iter().collect::<Vec<_>>(), vec![t[1], t[2]]);
        assert_eq!(sets[2].iter().collect::<Vec<_>>(), vec![t[2]]);
    }

    #[test]
    fn cycle_members_share_one_set() {
        let t = terminals(3);
        // 0 <-> 1, both -> 2
        let mut sets = vec![set(&[t[0]]), set(&[t[1]]), set(&[t[2]])];
        propagate(&mut sets, &[vec![1], vec![0, 2], vec![]]);
        let expected = vec![t[0], t[1], t[2]];
        assert_eq!(sets[0].iter().collect::<Vec<_>>(), expected);
        assert_eq!(sets[1].iter().collect::<Vec<_>>(), expected);
        assert_eq!(sets[2].iter().collect::<Vec<_>>(), vec![t[2]]);
    }

    #[test]
    fn self_loop_terminates() {
        let t = terminals(2);
        let mut sets = vec![set(&[t[0]]), set(&[t[1]])];
        propagate(&mut sets, &[vec![0, 1], vec![]]);
        assert_eq!(sets[0].iter().collect::<Vec<_>>(), vec![t[0], t[1]]);
    }
}
