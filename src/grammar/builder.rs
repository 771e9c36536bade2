use crate::{
    math::{OrderedMap, OrderedSet},
    symbol::symbols_of,
    Error, Grammar, Symbol,
};

use super::Production;

/// Helper struct for the construction of a [`Grammar`]. It collects non-terminals, terminals,
/// productions and the start symbol, and validates everything once [`GrammarBuilder::build`]
/// is called.
///
/// # Example
///
/// The grammar with productions `S → aS | b` can be written down as follows. Bodies given
/// through [`GrammarBuilder::with_rules`] are split into single characters, whereas
/// [`GrammarBuilder::with_production`] takes the symbols of a body explicitly, which allows
/// for symbols with longer names.
/// ```
/// use chomsky::prelude::*;
///
/// let grammar = Grammar::builder()
///     .with_non_terminals(['S'])
///     .with_terminals(['a', 'b'])
///     .with_rules([('S', "aS")])
///     .with_production('S', ["b"])
///     .with_start('S')
///     .build()
///     .unwrap();
/// assert_eq!(grammar.rule_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    non_terminals: OrderedSet<Symbol>,
    terminals: OrderedSet<Symbol>,
    productions: OrderedMap<Symbol, Vec<Production>>,
    start: Option<Symbol>,
}

impl GrammarBuilder {
    /// Adds the given symbols to the set of non-terminals.
    pub fn with_non_terminals<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.non_terminals.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds the given symbols to the set of terminals.
    pub fn with_terminals<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.terminals.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds a production `lhs → body`, where `body` is given as a sequence of symbols.
    /// Alternatives for the same left-hand side are kept in insertion order.
    pub fn with_production<L, I, S>(mut self, lhs: L, body: I) -> Self
    where
        L: Into<Symbol>,
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.productions
            .entry(lhs.into())
            .or_default()
            .push(body.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a list of productions whose bodies are strings, each character of such a string
    /// is one symbol. The empty string gives an ε-production.
    pub fn with_rules<I, L>(self, rules: I) -> Self
    where
        I: IntoIterator<Item = (L, &'static str)>,
        L: Into<Symbol>,
    {
        rules.into_iter().fold(self, |acc, (lhs, body)| {
            acc.with_production(lhs, symbols_of(body))
        })
    }

    /// Sets the start symbol.
    pub fn with_start<S: Into<Symbol>>(mut self, start: S) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Consumes the builder and creates the [`Grammar`], failing with
    /// [`Error::MalformedStructure`] if no start symbol was given or if the parts do not fit
    /// together.
    pub fn build(self) -> Result<Grammar, Error> {
        let start = self
            .start
            .ok_or_else(|| Error::malformed("no start symbol given"))?;
        Grammar::new(self.non_terminals, self.terminals, self.productions, start)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn missing_start() {
        let res = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .build();
        assert_eq!(
            res,
            Err(Error::MalformedStructure("no start symbol given".into()))
        );
    }

    #[test]
    fn identifiers_and_epsilon() {
        let g = Grammar::builder()
            .with_non_terminals(["expr", "term"])
            .with_terminals(["num", "+"])
            .with_production("expr", ["term", "+", "expr"])
            .with_production("expr", ["term"])
            .with_production("term", ["num"])
            .with_rules([("term", "")])
            .with_start("expr")
            .build()
            .unwrap();
        assert_eq!(g.alternatives(&"expr".into()).len(), 2);
        assert_eq!(g.alternatives(&"term".into())[1], Vec::<Symbol>::new());
    }
}
