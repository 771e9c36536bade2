use std::fmt::Display;

use itertools::Itertools;

use crate::{
    math::{OrderedMap, OrderedSet},
    Error, Show, Symbol,
};

mod builder;
pub use builder::GrammarBuilder;

mod classification;
pub use classification::ChomskyType;

mod conversion;

mod generation;
pub use generation::DEFAULT_EXPANSION_BUDGET;

/// The body of a production, i.e. the sequence of symbols a non-terminal may be replaced with.
/// An empty body stands for the empty word ε.
pub type Production = Vec<Symbol>;

/// A formal grammar `G = (VN, VT, P, S)` consisting of non-terminals, terminals, productions
/// and a start symbol. Every production has a single non-terminal on its left-hand side, the
/// alternatives for one non-terminal are kept in the order in which they were given.
///
/// Instances are immutable once constructed and all invariants are checked upfront:
/// - terminals and non-terminals are disjoint,
/// - the start symbol is a non-terminal,
/// - every production is keyed by a non-terminal,
/// - every symbol in a body is either a terminal or a non-terminal.
///
/// # Example
/// ```
/// use chomsky::prelude::*;
///
/// let grammar = Grammar::builder()
///     .with_non_terminals(['S', 'A'])
///     .with_terminals(['a', 'b'])
///     .with_rules([('S', "aA"), ('A', "b")])
///     .with_start('S')
///     .build()
///     .unwrap();
/// assert_eq!(grammar.classify(), ChomskyType::Regular);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    non_terminals: OrderedSet<Symbol>,
    terminals: OrderedSet<Symbol>,
    productions: OrderedMap<Symbol, Vec<Production>>,
    start: Symbol,
}

impl Grammar {
    /// Creates a new grammar after verifying that the given parts fit together, returns
    /// [`Error::MalformedStructure`] if they do not.
    pub fn new(
        non_terminals: OrderedSet<Symbol>,
        terminals: OrderedSet<Symbol>,
        productions: OrderedMap<Symbol, Vec<Production>>,
        start: Symbol,
    ) -> Result<Self, Error> {
        if let Some(sym) = non_terminals.intersection(&terminals).next() {
            return Err(Error::malformed(format!(
                "`{sym}` is both a terminal and a non-terminal"
            )));
        }
        if !non_terminals.contains(&start) {
            return Err(Error::malformed(format!(
                "start symbol `{start}` is not a non-terminal"
            )));
        }
        for (lhs, bodies) in &productions {
            if !non_terminals.contains(lhs) {
                return Err(Error::malformed(format!(
                    "production for `{lhs}`, which is not a non-terminal"
                )));
            }
            for body in bodies {
                if let Some(sym) = body
                    .iter()
                    .find(|sym| !non_terminals.contains(*sym) && !terminals.contains(*sym))
                {
                    return Err(Error::malformed(format!(
                        "production `{lhs} → {}` uses undeclared symbol `{sym}`",
                        show_body(body)
                    )));
                }
            }
        }
        Ok(Self::assemble(non_terminals, terminals, productions, start))
    }

    /// Creates a grammar without checking anything, callers must uphold the invariants.
    pub(crate) fn assemble(
        non_terminals: OrderedSet<Symbol>,
        terminals: OrderedSet<Symbol>,
        productions: OrderedMap<Symbol, Vec<Production>>,
        start: Symbol,
    ) -> Self {
        Self {
            non_terminals,
            terminals,
            productions,
            start,
        }
    }

    /// Returns a [`GrammarBuilder`], which is the most convenient way of writing down a grammar.
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// The set of non-terminals VN.
    pub fn non_terminals(&self) -> &OrderedSet<Symbol> {
        &self.non_terminals
    }

    /// The set of terminals VT.
    pub fn terminals(&self) -> &OrderedSet<Symbol> {
        &self.terminals
    }

    /// The start symbol.
    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// All productions, grouped by their left-hand side.
    pub fn productions(&self) -> &OrderedMap<Symbol, Vec<Production>> {
        &self.productions
    }

    /// Returns the alternatives for `non_terminal`, which is empty if there are none.
    pub fn alternatives(&self, non_terminal: &Symbol) -> &[Production] {
        self.productions
            .get(non_terminal)
            .map(|bodies| bodies.as_slice())
            .unwrap_or_default()
    }

    /// Iterates over all productions as pairs of left-hand side and body.
    pub fn rules(&self) -> impl Iterator<Item = (&Symbol, &Production)> + '_ {
        self.productions
            .iter()
            .flat_map(|(lhs, bodies)| bodies.iter().map(move |body| (lhs, body)))
    }

    /// Counts the productions, each alternative counts separately.
    pub fn rule_count(&self) -> usize {
        self.productions.values().map(|bodies| bodies.len()).sum()
    }

    /// Returns true if `symbol` is a terminal of this grammar.
    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    /// Returns true if `symbol` is a non-terminal of this grammar.
    pub fn is_non_terminal(&self, symbol: &Symbol) -> bool {
        self.non_terminals.contains(symbol)
    }

    /// Produces a symbol based on `base` that is neither a terminal nor a non-terminal.
    pub(crate) fn fresh_symbol(&self, base: &str) -> Symbol {
        let mut candidate = Symbol::from(base);
        while self.is_terminal(&candidate) || self.is_non_terminal(&candidate) {
            candidate = candidate.primed();
        }
        candidate
    }
}

pub(crate) fn show_body(body: &[Symbol]) -> String {
    if body.is_empty() {
        "ε".to_string()
    } else {
        Symbol::show_collection(body)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VN = {}", self.non_terminals.iter().join(", "))?;
        writeln!(f, "VT = {}", self.terminals.iter().join(", "))?;
        writeln!(f, "S  = {}", self.start)?;
        for (lhs, bodies) in &self.productions {
            writeln!(
                f,
                "{lhs} → {}",
                bodies.iter().map(|body| show_body(body)).join(" | ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::prelude::*;

    /// The grammar `S → dA, A → aB | b, B → bC | d, C → cB | aA`.
    pub fn lab_grammar() -> Grammar {
        Grammar::builder()
            .with_non_terminals(['S', 'A', 'B', 'C'])
            .with_terminals(['a', 'b', 'c', 'd'])
            .with_rules([
                ('S', "dA"),
                ('A', "aB"),
                ('A', "b"),
                ('B', "bC"),
                ('B', "d"),
                ('C', "cB"),
                ('C', "aA"),
            ])
            .with_start('S')
            .build()
            .unwrap()
    }

    #[test]
    fn accessors() {
        let g = lab_grammar();
        assert_eq!(g.start(), &Symbol::from('S'));
        assert_eq!(g.rule_count(), 7);
        assert_eq!(g.alternatives(&'A'.into()).len(), 2);
        assert!(g.alternatives(&'a'.into()).is_empty());
        assert!(g.is_terminal(&'d'.into()));
        assert!(g.is_non_terminal(&'C'.into()));
        assert!(!g.is_terminal(&'C'.into()));
        assert_eq!(g.fresh_symbol("F"), Symbol::from('F'));
        assert_eq!(g.fresh_symbol("S"), Symbol::from("S'"));
    }

    #[test]
    fn display() {
        let shown = lab_grammar().to_string();
        assert!(shown.contains("A → aB | b"));
        assert!(shown.contains("S  = S"));
    }

    #[test]
    fn rejects_malformed() {
        let overlapping = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['S', 'a'])
            .with_start('S')
            .build();
        assert!(matches!(overlapping, Err(Error::MalformedStructure(_))));

        let bad_start = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .with_start('a')
            .build();
        assert!(matches!(bad_start, Err(Error::MalformedStructure(_))));

        let undeclared = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .with_rules([('S', "aX")])
            .with_start('S')
            .build();
        assert!(matches!(undeclared, Err(Error::MalformedStructure(_))));

        let bad_lhs = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .with_rules([('a', "a")])
            .with_start('S')
            .build();
        assert!(matches!(bad_lhs, Err(Error::MalformedStructure(_))));
    }
}
