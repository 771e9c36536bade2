use crate::{math::OrderedSet, Error, Symbol};

use super::{FiniteAutomaton, State};

/// Helper struct for the construction of a [`FiniteAutomaton`]. It collects states, alphabet
/// symbols, transitions, the start state and the accepting states; everything is checked once
/// [`AutomatonBuilder::build`] is called.
///
/// # Example
///
/// An automaton with two states `0` and `1` over the alphabet `{a, b}` that accepts all
/// words with an odd number of `a`s.
/// ```
/// use chomsky::prelude::*;
///
/// let fa = FiniteAutomaton::builder()
///     .with_states([0, 1])
///     .with_alphabet(['a', 'b'])
///     .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
///     .with_start(0)
///     .with_accepting([1])
///     .build()
///     .unwrap();
/// assert!(fa.is_deterministic());
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<Q: State> {
    states: OrderedSet<Q>,
    alphabet: OrderedSet<Symbol>,
    transitions: Vec<(Q, Symbol, Q)>,
    start: Option<Q>,
    accepting: OrderedSet<Q>,
}

impl<Q: State> Default for AutomatonBuilder<Q> {
    fn default() -> Self {
        Self {
            states: OrderedSet::new(),
            alphabet: OrderedSet::new(),
            transitions: vec![],
            start: None,
            accepting: OrderedSet::new(),
        }
    }
}

impl<Q: State> AutomatonBuilder<Q> {
    /// Declares the given states.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Adds the given symbols to the alphabet.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds a list of transitions given as `(source, symbol, target)`. Adding two transitions
    /// with the same source and symbol but different targets makes the automaton non-deterministic.
    pub fn with_transitions<I, S>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (Q, S, Q)>,
        S: Into<Symbol>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(source, symbol, target)| (source, symbol.into(), target)),
        );
        self
    }

    /// Adds a transition from `source` to each of the given `targets` on `symbol`.
    pub fn with_nondeterministic_transition<I, S>(
        mut self,
        source: Q,
        symbol: S,
        targets: I,
    ) -> Self
    where
        I: IntoIterator<Item = Q>,
        S: Into<Symbol>,
    {
        let symbol = symbol.into();
        self.transitions.extend(
            targets
                .into_iter()
                .map(|target| (source.clone(), symbol.clone(), target)),
        );
        self
    }

    /// Sets the start state.
    pub fn with_start(mut self, start: Q) -> Self {
        self.start = Some(start);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, accepting: I) -> Self {
        self.accepting.extend(accepting);
        self
    }

    /// Consumes the builder and creates the [`FiniteAutomaton`]. Returns
    /// [`Error::MalformedStructure`] if no start state was given or if the parts do not fit
    /// together.
    pub fn build(self) -> Result<FiniteAutomaton<Q>, Error> {
        let start = self
            .start
            .ok_or_else(|| Error::malformed("no start state given"))?;
        FiniteAutomaton::new(
            self.states,
            self.alphabet,
            self.transitions,
            start,
            self.accepting,
        )
    }
}
