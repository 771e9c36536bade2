use tracing::debug;

use crate::{math::OrderedSet, prelude::*};

impl Grammar {
    /// Builds a finite automaton that accepts the language of this (regular) grammar. The states
    /// are the non-terminals plus a fresh final state `F` (primed if that name is already
    /// taken), which is the only accepting state. A production `A → a` becomes a transition
    /// from `A` to `F` on `a`, and `A → aB` becomes a transition from `A` to `B` on `a`.
    ///
    /// Productions of any other shape cannot be represented and lead to
    /// [`Error::UnsupportedProductionShape`]. Several productions for the same non-terminal and
    /// terminal are all kept, in which case the automaton is non-deterministic and should be
    /// converted with [`FiniteAutomaton::convert_ndfa_to_dfa`] before testing membership.
    ///
    /// # Example
    /// ```
    /// use chomsky::prelude::*;
    ///
    /// let grammar = Grammar::builder()
    ///     .with_non_terminals(['S'])
    ///     .with_terminals(['a', 'b'])
    ///     .with_rules([('S', "aS"), ('S', "a"), ('S', "b")])
    ///     .with_start('S')
    ///     .build()
    ///     .unwrap();
    /// let fa = grammar.to_finite_automaton().unwrap();
    /// assert!(!fa.is_deterministic());
    /// assert!(fa.convert_ndfa_to_dfa().accepts("aab"));
    /// ```
    pub fn to_finite_automaton(&self) -> Result<FiniteAutomaton<Symbol>, Error> {
        let final_state = self.fresh_symbol("F");

        let transitions = self
            .rules()
            .map(|(lhs, body)| {
                let (symbol, target) = match body.as_slice() {
                    [a] if self.is_terminal(a) => (a, &final_state),
                    [a, b] if self.is_terminal(a) && self.is_non_terminal(b) => (a, b),
                    _ => {
                        return Err(Error::UnsupportedProductionShape {
                            lhs: lhs.clone(),
                            body: body.clone(),
                        })
                    }
                };
                Ok((lhs.clone(), symbol.clone(), target.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut states: OrderedSet<Symbol> = self.non_terminals().clone();
        states.insert(final_state.clone());
        debug!(
            "turning {} productions into transitions between {} states",
            transitions.len(),
            states.len()
        );

        FiniteAutomaton::new(
            states,
            self.terminals().clone(),
            transitions,
            self.start().clone(),
            OrderedSet::from([final_state]),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{grammar::tests::lab_grammar, prelude::*};

    #[test_log::test]
    fn lab_grammar_to_automaton() {
        let fa = lab_grammar().to_finite_automaton().unwrap();
        assert_eq!(fa.size(), 5);
        assert_eq!(fa.start(), &Symbol::from('S'));
        assert_eq!(fa.accepting().len(), 1);
        assert!(fa.is_accepting(&'F'.into()));
        assert_eq!(fa.transitions().count(), 7);
        assert!(fa.is_deterministic());

        let dfa = fa.into_dfa().unwrap();
        assert!(dfa.accepts("db"));
        assert!(dfa.accepts("dabcd"));
        assert!(dfa.accepts("dabab"));
        assert!(dfa.accepts("dad"));
        assert!(!dfa.accepts("d"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("dab"));
        assert!(!dfa.accepts("invalid"));
    }

    #[test]
    fn final_state_avoids_existing_names() {
        let g = Grammar::builder()
            .with_non_terminals(['F'])
            .with_terminals(['a'])
            .with_rules([('F', "aF"), ('F', "a")])
            .with_start('F')
            .build()
            .unwrap();
        let fa = g.to_finite_automaton().unwrap();
        assert!(fa.is_accepting(&"F'".into()));
        assert!(!fa.is_accepting(&'F'.into()));
    }

    #[test]
    fn duplicate_keys_accumulate() {
        let g = Grammar::builder()
            .with_non_terminals(['S', 'A'])
            .with_terminals(['a'])
            .with_rules([('S', "aA"), ('S', "aS"), ('A', "a")])
            .with_start('S')
            .build()
            .unwrap();
        let fa = g.to_finite_automaton().unwrap();
        assert!(!fa.is_deterministic());
        assert_eq!(fa.successors(&'S'.into(), &'a'.into()).unwrap().len(), 2);
        assert!(matches!(
            fa.into_dfa(),
            Err(Error::Nondeterministic { .. })
        ));
    }

    #[test]
    fn unsupported_shapes() {
        for body in ["aSa", "", "S", "Sa", "aa"] {
            let g = Grammar::builder()
                .with_non_terminals(['S'])
                .with_terminals(['a'])
                .with_rules([('S', "a"), ('S', body)])
                .with_start('S')
                .build()
                .unwrap();
            assert_eq!(
                g.to_finite_automaton(),
                Err(Error::UnsupportedProductionShape {
                    lhs: 'S'.into(),
                    body: symbols_of(body)
                }),
                "body {body:?} should be rejected"
            );
        }
    }
}
