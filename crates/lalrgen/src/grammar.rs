//! Grammar types.
//!
//! A [`Grammar`] is built once through [`Grammar::define`] by whatever front
//! end parses the grammar description, and is immutable afterwards. All of
//! the derived structures (the LR(0) automaton, the look-ahead sets and the
//! parse table) borrow it for the duration of one generation run.

use crate::{
    types::{Map, Queue, Set},
    util::display_fn,
};
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalID(u16);

impl TerminalID {
    /// Reserved terminal symbol that marks the end of input.
    pub const EOI: Self = Self(0);

    const OFFSET: u16 = 1;
}

impl fmt::Debug for TerminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            &Self::EOI => write!(f, "T#End"),
            _ => write!(f, "T#{:03}", self.0),
        }
    }
}

/// A set of terminal symbols, backed by a bit set.
#[derive(Debug, Default, Clone)]
pub struct TerminalSet {
    inner: bit_set::BitSet,
}

impl TerminalSet {
    pub fn contains(&self, id: TerminalID) -> bool {
        self.inner.contains(id.0.into())
    }

    pub fn insert(&mut self, id: TerminalID) -> bool {
        self.inner.insert(id.0.into())
    }

    pub fn union_with(&mut self, other: &Self) {
        self.inner.union_with(&other.inner)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterate the members in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = TerminalID> + '_ {
        self.inner.iter().map(|raw| TerminalID(raw as u16))
    }
}

impl FromIterator<TerminalID> for TerminalSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = TerminalID>,
    {
        Self {
            inner: iter.into_iter().map(|t| t.0.into()).collect(),
        }
    }
}

#[derive(Debug)]
pub struct TerminalData {
    pub name: String,
    pub precedence: Option<Precedence>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NonterminalID(u16);

impl NonterminalID {
    /// The synthesized root nonterminal of the augmented production.
    pub const START: Self = Self(0);

    const OFFSET: u16 = 1;
}

impl fmt::Debug for NonterminalID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            &Self::START => write!(f, "N#Start"),
            _ => write!(f, "N#{:03}", self.0),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum SymbolID {
    T(TerminalID),
    N(NonterminalID),
}

impl fmt::Debug for SymbolID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(t) => write!(f, "{:?}", t),
            Self::N(n) => write!(f, "{:?}", n),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionID(u16);

impl ProductionID {
    /// The augmented production `#Start -> start`. Its reduction is always
    /// the accept action, never an ordinary reduce.
    pub const ACCEPT: Self = Self(u16::MAX);
}

impl fmt::Debug for ProductionID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            &Self::ACCEPT => write!(f, "P#Accept"),
            _ => write!(f, "P#{:03}", self.0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub priority: u16,
    pub assoc: Assoc,
}

impl Precedence {
    pub const fn new(priority: u16, assoc: Assoc) -> Self {
        Self { priority, assoc }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    Nonassoc,
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Nonassoc => write!(f, "nonassoc"),
        }
    }
}

/// A production rule in the grammar.
#[derive(Debug)]
pub struct Production {
    pub left: NonterminalID,
    pub right: Vec<SymbolID>,
    pub precedence: Option<Precedence>,
}

impl Production {
    /// The effective precedence of this production: the explicit override
    /// if one was declared, otherwise the precedence of the rightmost
    /// terminal symbol on the right-hand side.
    pub fn precedence(&self, g: &Grammar) -> Option<Precedence> {
        match self.precedence {
            Some(prec) => Some(prec),
            None => {
                for symbol in self.right.iter().rev() {
                    if let SymbolID::T(t) = symbol {
                        return g.terminals[t].precedence;
                    }
                }
                None
            }
        }
    }

    pub fn display<'g>(&'g self, g: &'g Grammar) -> impl fmt::Display + 'g {
        display_fn(|f| {
            write!(f, "{} -> ", g.nonterminals[&self.left])?;
            if self.right.is_empty() {
                f.write_str("ε")?;
            } else {
                for (i, r) in self.right.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match r {
                        SymbolID::N(n) => f.write_str(&g.nonterminals[n])?,
                        SymbolID::T(t) => f.write_str(&g.terminals[t].name)?,
                    }
                }
            }
            Ok(())
        })
    }
}

/// The grammar definition used to derive the parser tables.
#[derive(Debug)]
#[non_exhaustive]
pub struct Grammar {
    pub terminals: Map<TerminalID, TerminalData>,
    pub nonterminals: Map<NonterminalID, String>,
    pub productions: Map<ProductionID, Production>,
    pub start_symbol: NonterminalID,
    pub nullables: Set<NonterminalID>,
}

impl Grammar {
    /// Define a grammar using the specified function.
    pub fn define<F>(f: F) -> Result<Self, GrammarDefError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarDefError>,
    {
        let mut def = GrammarDef {
            terminals: Map::default(),
            nonterminals: Map::default(),
            productions: Map::default(),
            start_symbol: None,
            next_terminal: TerminalID::OFFSET,
            next_nonterminal: NonterminalID::OFFSET,
            next_production: 0,
        };

        def.terminals.insert(
            TerminalID::EOI,
            TerminalData {
                name: "#EOI".into(),
                precedence: None,
            },
        );
        def.nonterminals
            .insert(NonterminalID::START, "#Start".into());

        f(&mut def)?;

        def.end()
    }

    pub fn production(&self, id: ProductionID) -> &Production {
        &self.productions[&id]
    }

    /// Iterate the productions whose left-hand side is `left`, in
    /// declaration order.
    pub fn productions_of(
        &self,
        left: NonterminalID,
    ) -> impl Iterator<Item = (ProductionID, &Production)> + '_ {
        self.productions
            .iter()
            .filter(move |(_, p)| p.left == left)
            .map(|(&id, p)| (id, p))
    }

    /// Check the validity conditions that must hold before any table
    /// construction starts. Violations are fatal; conflicts are not
    /// (those are reported by the table builder instead).
    pub fn validate(&self) -> Result<(), GrammarError> {
        let mut defined = Set::default();
        for p in self.productions.values() {
            defined.insert(p.left);
        }

        // A nonterminal that occurs on some right-hand side (or is the start
        // symbol) but owns no production can never be expanded.
        let mut used: Set<NonterminalID> = Set::default();
        used.insert(self.start_symbol);
        for p in self.productions.values() {
            for s in &p.right {
                if let SymbolID::N(n) = s {
                    used.insert(*n);
                }
            }
        }
        for n in &used {
            if !defined.contains(n) {
                return Err(GrammarError::UndefinedNonterminal {
                    name: self.nonterminals[n].clone(),
                });
            }
        }

        let mut reachable = Set::default();
        let mut queue: Queue<NonterminalID> = Some(self.start_symbol).into_iter().collect();
        while let Some(n) = queue.pop() {
            reachable.insert(n);
            for (_, p) in self.productions_of(n) {
                for s in &p.right {
                    if let SymbolID::N(m) = s {
                        queue.push(*m);
                    }
                }
            }
        }
        for (&n, name) in &self.nonterminals {
            if n != NonterminalID::START && !reachable.contains(&n) {
                return Err(GrammarError::UnreachableNonterminal { name: name.clone() });
            }
        }

        // Fixed point of "derives some finite terminal string".
        let mut terminating = Set::default();
        loop {
            let mut changed = false;
            for p in self.productions.values() {
                let ok = p.right.iter().all(|s| match s {
                    SymbolID::T(..) => true,
                    SymbolID::N(n) => terminating.contains(n),
                });
                if ok {
                    changed |= terminating.insert(p.left);
                }
            }
            if !changed {
                break;
            }
        }
        for (&n, name) in &self.nonterminals {
            if n != NonterminalID::START && !terminating.contains(&n) {
                return Err(GrammarError::NonterminatingNonterminal { name: name.clone() });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#### terminals: ")?;
        for (i, t) in self.terminals.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", t.name)?;
            if let Some(prec) = t.precedence {
                write!(f, " (priority={}, assoc={})", prec.priority, prec.assoc)?;
            }
        }
        write!(f, "\n#### nonterminals: ")?;
        for (i, n) in self.nonterminals.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", n)?;
        }
        writeln!(f, "\n#### productions:")?;
        for p in self.productions.values() {
            writeln!(f, "- {}", p.display(self))?;
        }
        Ok(())
    }
}

/// The contextual values for building a [`Grammar`].
#[derive(Debug)]
pub struct GrammarDef {
    terminals: Map<TerminalID, TerminalData>,
    nonterminals: Map<NonterminalID, String>,
    productions: Map<ProductionID, Production>,
    start_symbol: Option<NonterminalID>,
    next_terminal: u16,
    next_nonterminal: u16,
    next_production: u16,
}

impl GrammarDef {
    /// Declare a terminal symbol used in this grammar.
    pub fn terminal(
        &mut self,
        name: &str,
        precedence: Option<Precedence>,
    ) -> Result<TerminalID, GrammarDefError> {
        self.verify_name(name)?;

        let id = TerminalID(self.next_terminal);
        self.next_terminal += 1;
        self.terminals.insert(
            id,
            TerminalData {
                name: name.to_owned(),
                precedence,
            },
        );
        Ok(id)
    }

    /// Declare a nonterminal symbol used in this grammar.
    pub fn nonterminal(&mut self, name: &str) -> Result<NonterminalID, GrammarDefError> {
        self.verify_name(name)?;

        let id = NonterminalID(self.next_nonterminal);
        self.next_nonterminal += 1;
        self.nonterminals.insert(id, name.to_owned());
        Ok(id)
    }

    /// Add a production rule to this grammar.
    ///
    /// The returned ID doubles as the declaration index used to break
    /// reduce/reduce ties: the production declared first wins.
    pub fn production<I>(
        &mut self,
        precedence: Option<Precedence>,
        left: NonterminalID,
        right: I,
    ) -> Result<ProductionID, GrammarDefError>
    where
        I: IntoIterator<Item = SymbolID>,
    {
        let right: Vec<_> = right.into_iter().collect();
        for p in self.productions.values() {
            if p.left == left && p.right == right {
                return Err(GrammarDefError::DuplicateRule {
                    name: self.nonterminals[&left].clone(),
                });
            }
        }

        let id = ProductionID(self.next_production);
        self.next_production += 1;
        self.productions.insert(
            id,
            Production {
                left,
                right,
                precedence,
            },
        );
        Ok(id)
    }

    /// Specify the start symbol for this grammar.
    pub fn start_symbol(&mut self, symbol: NonterminalID) {
        self.start_symbol.replace(symbol);
    }

    fn verify_name(&self, name: &str) -> Result<(), GrammarDefError> {
        if !verify_ident(name) {
            return Err(GrammarDefError::InvalidName { name: name.into() });
        }
        let taken = self.terminals.values().any(|t| t.name == name)
            || self.nonterminals.values().any(|n| n == name);
        if taken {
            return Err(GrammarDefError::DuplicateName { name: name.into() });
        }
        Ok(())
    }

    fn end(mut self) -> Result<Grammar, GrammarDefError> {
        // If no start symbol is specified, the first declared nonterminal
        // is used.
        let start_symbol = match self.start_symbol.take() {
            Some(start) => start,
            None => self
                .nonterminals
                .keys()
                .find(|&&id| id != NonterminalID::START)
                .copied()
                .ok_or(GrammarDefError::EmptyGrammar)?,
        };

        self.productions.insert(
            ProductionID::ACCEPT,
            Production {
                left: NonterminalID::START,
                right: vec![SymbolID::N(start_symbol)],
                precedence: None,
            },
        );

        let mut nullables = Set::default();
        loop {
            let mut changed = false;
            for p in self.productions.values() {
                if p.right
                    .iter()
                    .all(|s| matches!(s, SymbolID::N(n) if nullables.contains(n)))
                {
                    changed |= nullables.insert(p.left);
                }
            }
            if !changed {
                break;
            }
        }

        Ok(Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            productions: self.productions,
            start_symbol,
            nullables,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarDefError {
    #[error("`{name}' is not a valid symbol name")]
    InvalidName { name: String },

    #[error("the symbol name `{name}' is already in use")]
    DuplicateName { name: String },

    #[error("duplicate production rule for `{name}'")]
    DuplicateRule { name: String },

    #[error("the grammar has no nonterminal symbols")]
    EmptyGrammar,
}

/// A violation of the grammar validity conditions. Unlike conflicts, these
/// abort generation before any table construction starts.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("nonterminal `{name}' is used but never defined")]
    UndefinedNonterminal { name: String },

    #[error("nonterminal `{name}' is unreachable from the start symbol")]
    UnreachableNonterminal { name: String },

    #[error("nonterminal `{name}' cannot derive any terminal string")]
    NonterminatingNonterminal { name: String },
}

fn verify_ident(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut chars = s.chars();
    let first = chars.next().expect("nonempty");
    if !(first == '_' || unicode_ident::is_xid_start(first)) {
        return false;
    }
    chars.all(unicode_ident::is_xid_continue)
}

pub mod examples {
    //! Grammar definitions shared by the tests and benches.

    use super::*;
    use SymbolID::*;

    /// Unambiguous layered arithmetic expressions.
    pub fn arithmetic(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let lparen = g.terminal("LPAREN", None)?;
        let rparen = g.terminal("RPAREN", None)?;
        let plus = g.terminal("PLUS", None)?;
        let minus = g.terminal("MINUS", None)?;
        let star = g.terminal("STAR", None)?;
        let slash = g.terminal("SLASH", None)?;
        let num = g.terminal("NUM", None)?;

        let expr = g.nonterminal("expr")?;
        let term = g.nonterminal("term")?;
        let factor = g.nonterminal("factor")?;
        let atom = g.nonterminal("atom")?;

        g.start_symbol(expr);

        g.production(None, expr, [N(expr), T(plus), N(term)])?;
        g.production(None, expr, [N(expr), T(minus), N(term)])?;
        g.production(None, expr, [N(term)])?;

        g.production(None, term, [N(term), T(star), N(factor)])?;
        g.production(None, term, [N(term), T(slash), N(factor)])?;
        g.production(None, term, [N(factor)])?;

        g.production(None, factor, [T(minus), N(factor)])?;
        g.production(None, factor, [N(atom)])?;

        g.production(None, atom, [T(num)])?;
        g.production(None, atom, [T(lparen), N(expr), T(rparen)])?;

        Ok(())
    }

    /// Ambiguous arithmetic expressions, disambiguated by precedence
    /// declarations and a `%prec`-style override on unary minus.
    pub fn arithmetic_prec(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let prec_add = Some(Precedence::new(0, Assoc::Left));
        let prec_mul = Some(Precedence::new(1, Assoc::Left));
        let prec_neg = Some(Precedence::new(2, Assoc::Right));

        let lparen = g.terminal("LPAREN", None)?;
        let rparen = g.terminal("RPAREN", None)?;
        let plus = g.terminal("PLUS", prec_add)?;
        let minus = g.terminal("MINUS", prec_add)?;
        let star = g.terminal("STAR", prec_mul)?;
        let slash = g.terminal("SLASH", prec_mul)?;
        let num = g.terminal("NUM", None)?;

        let expr = g.nonterminal("expr")?;

        g.start_symbol(expr);

        g.production(None, expr, [N(expr), T(plus), N(expr)])?;
        g.production(None, expr, [N(expr), T(minus), N(expr)])?;
        g.production(None, expr, [N(expr), T(star), N(expr)])?;
        g.production(None, expr, [N(expr), T(slash), N(expr)])?;
        g.production(prec_neg, expr, [T(minus), N(expr)])?;
        g.production(None, expr, [T(num)])?;
        g.production(None, expr, [T(lparen), N(expr), T(rparen)])?;

        Ok(())
    }

    /// The classic two-operator expression grammar:
    /// `E -> E + E | E * E | ( E ) | id` with `+` declared before `*`,
    /// both left-associative.
    pub fn expr_prec(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let prec_add = Some(Precedence::new(0, Assoc::Left));
        let prec_mul = Some(Precedence::new(1, Assoc::Left));

        let plus = g.terminal("PLUS", prec_add)?;
        let star = g.terminal("STAR", prec_mul)?;
        let lparen = g.terminal("LPAREN", None)?;
        let rparen = g.terminal("RPAREN", None)?;
        let ident = g.terminal("ID", None)?;

        let expr = g.nonterminal("expr")?;

        g.start_symbol(expr);

        g.production(None, expr, [N(expr), T(plus), N(expr)])?;
        g.production(None, expr, [N(expr), T(star), N(expr)])?;
        g.production(None, expr, [T(lparen), N(expr), T(rparen)])?;
        g.production(None, expr, [T(ident)])?;

        Ok(())
    }

    /// A grammar with a nullable nonterminal woven through the productions,
    /// exercising the Reads relation.
    pub fn with_nullable(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        // E → E + T n | T
        // T → a | ( E n ) | n a
        // n → ϵ | num

        let lparen = g.terminal("LPAREN", None)?;
        let rparen = g.terminal("RPAREN", None)?;
        let plus = g.terminal("PLUS", None)?;
        let a = g.terminal("A", None)?;
        let num = g.terminal("NUM", None)?;

        let expr = g.nonterminal("expr")?;
        let term = g.nonterminal("term")?;
        let nullable = g.nonterminal("nullable")?;

        g.start_symbol(expr);

        g.production(None, expr, [N(expr), T(plus), N(term), N(nullable)])?;
        g.production(None, expr, [N(term)])?;

        g.production(None, term, [T(a)])?;
        g.production(None, term, [T(lparen), N(expr), N(nullable), T(rparen)])?;
        g.production(None, term, [N(nullable), T(a)])?;

        g.production(None, nullable, [])?;
        g.production(None, nullable, [T(num)])?;

        Ok(())
    }

    /// Repeated substructure sharing one nonterminal; the automaton stays
    /// small only if structurally identical kernels are merged.
    pub fn repeated(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let a = g.terminal("A", None)?;
        let s = g.nonterminal("s")?;
        let item = g.nonterminal("item")?;

        g.start_symbol(s);

        g.production(None, s, [N(item), N(item), N(item), N(item)])?;
        g.production(None, item, [T(a)])?;

        Ok(())
    }

    /// Two productions reducible in the same state under the same
    /// lookahead, forcing a reduce/reduce conflict.
    pub fn reduce_reduce(g: &mut GrammarDef) -> Result<(), GrammarDefError> {
        let a = g.terminal("A", None)?;
        let s = g.nonterminal("s")?;
        let x = g.nonterminal("x")?;
        let y = g.nonterminal("y")?;

        g.start_symbol(s);

        g.production(None, s, [N(x)])?;
        g.production(None, s, [N(y)])?;
        g.production(None, x, [T(a)])?;
        g.production(None, y, [T(a)])?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SymbolID::*;

    #[test]
    fn nullable_set() {
        let g = Grammar::define(examples::with_nullable).unwrap();
        let nullable = g
            .nonterminals
            .iter()
            .find_map(|(id, name)| (name == "nullable").then_some(*id))
            .unwrap();
        let expr = g
            .nonterminals
            .iter()
            .find_map(|(id, name)| (name == "expr").then_some(*id))
            .unwrap();
        assert!(g.nullables.contains(&nullable));
        assert!(!g.nullables.contains(&expr));
    }

    #[test]
    fn production_precedence_falls_back_to_rightmost_terminal() {
        let mut captured = None;
        let g = Grammar::define(|g| {
            let plus = g.terminal("PLUS", Some(Precedence::new(0, Assoc::Left)))?;
            let num = g.terminal("NUM", None)?;
            let expr = g.nonterminal("expr")?;
            g.start_symbol(expr);
            let p_add = g.production(None, expr, [N(expr), T(plus), N(expr)])?;
            let p_neg = g.production(
                Some(Precedence::new(5, Assoc::Right)),
                expr,
                [T(plus), N(expr)],
            )?;
            g.production(None, expr, [T(num)])?;
            captured = Some((p_add, p_neg));
            Ok(())
        })
        .unwrap();
        let (p_add, p_neg) = captured.unwrap();

        let add_prec = g.production(p_add).precedence(&g).unwrap();
        assert_eq!(add_prec.priority, 0);
        assert_eq!(add_prec.assoc, Assoc::Left);

        // The explicit override takes priority over the rightmost terminal.
        let neg_prec = g.production(p_neg).precedence(&g).unwrap();
        assert_eq!(neg_prec.priority, 5);
    }

    #[test]
    fn rejects_duplicate_rule() {
        let err = Grammar::define(|g| {
            let a = g.terminal("A", None)?;
            let s = g.nonterminal("s")?;
            g.production(None, s, [T(a)])?;
            g.production(None, s, [T(a)])?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, GrammarDefError::DuplicateRule { .. }));
    }

    #[test]
    fn rejects_bogus_symbol_name() {
        let err = Grammar::define(|g| {
            g.terminal("0name", None)?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, GrammarDefError::InvalidName { .. }));
    }

    #[test]
    fn rejects_reused_symbol_name() {
        let err = Grammar::define(|g| {
            g.terminal("sym", None)?;
            g.nonterminal("sym")?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, GrammarDefError::DuplicateName { .. }));
    }

    #[test]
    fn validate_undefined_nonterminal() {
        let g = Grammar::define(|g| {
            let a = g.terminal("A", None)?;
            let s = g.nonterminal("s")?;
            let missing = g.nonterminal("missing")?;
            g.start_symbol(s);
            g.production(None, s, [N(missing), T(a)])?;
            Ok(())
        })
        .unwrap();
        let err = g.validate().unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UndefinedNonterminal { name } if name == "missing"
        ));
    }

    #[test]
    fn validate_unreachable_nonterminal() {
        let g = Grammar::define(|g| {
            let a = g.terminal("A", None)?;
            let s = g.nonterminal("s")?;
            let orphan = g.nonterminal("orphan")?;
            g.start_symbol(s);
            g.production(None, s, [T(a)])?;
            g.production(None, orphan, [T(a)])?;
            Ok(())
        })
        .unwrap();
        let err = g.validate().unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UnreachableNonterminal { name } if name == "orphan"
        ));
    }

    #[test]
    fn validate_nonterminating_nonterminal() {
        let g = Grammar::define(|g| {
            let a = g.terminal("A", None)?;
            let s = g.nonterminal("s")?;
            g.start_symbol(s);
            g.production(None, s, [N(s), T(a)])?;
            Ok(())
        })
        .unwrap();
        let err = g.validate().unwrap_err();
        assert!(matches!(
            err,
            GrammarError::NonterminatingNonterminal { name } if name == "s"
        ));
    }

    #[test]
    fn validate_accepts_examples() {
        for f in [
            examples::arithmetic,
            examples::arithmetic_prec,
            examples::expr_prec,
            examples::with_nullable,
            examples::repeated,
            examples::reduce_reduce,
        ] {
            let g = Grammar::define(f).unwrap();
            g.validate().unwrap();
        }
    }
}
