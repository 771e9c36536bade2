use tracing::debug;

use crate::{
    grammar::Production,
    math::{Bijection, OrderedMap, OrderedSet},
    prelude::*,
};

/// The right-regular grammar obtained from a [`FiniteAutomaton`] by
/// [`FiniteAutomaton::to_regular_grammar`], together with the information how states were
/// turned into non-terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularGrammar<Q: State> {
    /// The reconstructed grammar.
    pub grammar: Grammar,
    /// Associates each state with the non-terminal that represents it.
    pub naming: Bijection<Q, Symbol>,
    /// Whether the automaton accepts the empty word. Productions of the form `A → a` and
    /// `A → aB` cannot derive it, so this is recorded here instead.
    pub accepts_empty: bool,
}

impl<Q: State> FiniteAutomaton<Q> {
    /// Assigns a non-terminal to every state. The name of a state is what [`Show`] gives
    /// for it, primed as often as needed to avoid clashes with terminals and other states.
    fn state_naming(&self) -> Bijection<Q, Symbol> {
        let mut naming = Bijection::new();
        for q in self.states() {
            let mut name = Symbol::new(q.show());
            while self.alphabet().contains(&name) || naming.contains_right(&name) {
                name = name.primed();
            }
            naming.insert(q.clone(), name);
        }
        naming
    }

    /// Reconstructs a right-regular grammar generating the language of `self`. Every state
    /// becomes a non-terminal, the alphabet becomes the set of terminals and the start state
    /// becomes the start symbol. A transition `(p, a, q)` gives the production `p → a q`, and
    /// if `q` is accepting also `p → a`; the former is left out when `q` is accepting but has no
    /// outgoing transitions, as it could never be completed to a word.
    ///
    /// On a non-deterministic automaton this yields one production per target, which is fine
    /// but usually not the smallest possible grammar.
    pub fn to_regular_grammar(&self) -> RegularGrammar<Q> {
        let naming = self.state_naming();
        // every state is named by `state_naming`, the fallback is never taken
        let name = |q: &Q| -> Symbol {
            naming
                .get_by_left(q)
                .cloned()
                .unwrap_or_else(|| Symbol::new(q.show()))
        };

        let mut productions: OrderedMap<Symbol, Vec<Production>> = OrderedMap::new();
        for (source, symbol, target) in self.transitions() {
            let mut bodies = vec![];
            if self.is_accepting(target) {
                bodies.push(vec![symbol.clone()]);
            }
            if !self.is_accepting(target) || self.has_outgoing(target) {
                bodies.push(vec![symbol.clone(), name(target)]);
            }

            let alternatives = productions.entry(name(source)).or_default();
            for body in bodies {
                if !alternatives.contains(&body) {
                    alternatives.push(body);
                }
            }
        }

        let non_terminals: OrderedSet<Symbol> = naming.right_values().cloned().collect();
        let grammar = Grammar::assemble(
            non_terminals,
            self.alphabet().clone(),
            productions,
            name(self.start()),
        );
        debug!(
            "reconstructed grammar with {} productions from automaton with {} states",
            grammar.rule_count(),
            self.size()
        );

        RegularGrammar {
            grammar,
            accepts_empty: self.is_accepting(self.start()),
            naming,
        }
    }

    /// Shorthand for [`FiniteAutomaton::to_regular_grammar`] that only keeps the grammar.
    pub fn to_grammar(&self) -> Grammar {
        self.to_regular_grammar().grammar
    }
}

impl<Q: State> RegularGrammar<Q> {
    /// Works as [`Grammar::to_finite_automaton`], but also makes the start state accepting if
    /// the original automaton accepts the empty word. Every other word that ends in the start
    /// state already ends in an accepting state of the original, so nothing else is added.
    pub fn to_finite_automaton(&self) -> Result<FiniteAutomaton<Symbol>, Error> {
        let fa = self.grammar.to_finite_automaton()?;
        if !self.accepts_empty {
            return Ok(fa);
        }

        let mut accepting = fa.accepting().clone();
        accepting.insert(fa.start().clone());
        Ok(FiniteAutomaton::assemble(
            fa.states().clone(),
            fa.alphabet().clone(),
            fa.transitions()
                .map(|(source, symbol, target)| (source.clone(), symbol.clone(), target.clone())),
            fa.start().clone(),
            accepting,
        ))
    }
}
