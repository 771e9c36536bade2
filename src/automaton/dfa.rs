use std::{borrow::Borrow, collections::VecDeque, ops::Deref};

use tracing::trace;

use crate::{error::RunError, math::Set, prelude::*};

/// A deterministic finite automaton, that is a [`FiniteAutomaton`] in which every state has
/// at most one successor on every symbol. A missing transition means that the word is rejected,
/// there is no need for an explicit sink state.
///
/// Values of this type can only be obtained by checking determinism, either through
/// [`FiniteAutomaton::into_dfa`] (or the equivalent `TryFrom` implementation) or through
/// [`FiniteAutomaton::convert_ndfa_to_dfa`]. All read-only methods of [`FiniteAutomaton`] are
/// available through `Deref`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Dfa<Q: State = Symbol>(FiniteAutomaton<Q>);

/// The sequence of states visited while reading a word with a [`Dfa`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Run<Q> {
    states: Vec<Q>,
    accepting: bool,
}

impl<Q> Run<Q> {
    /// All visited states, beginning with the start state. For a word of length `n` this
    /// contains `n + 1` states.
    pub fn states(&self) -> &[Q] {
        &self.states
    }

    /// The state that is reached after reading the whole word.
    pub fn reached(&self) -> &Q {
        // a run always contains at least the start state
        &self.states[self.states.len() - 1]
    }

    /// Whether the reached state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

impl<Q: State> FiniteAutomaton<Q> {
    /// Checks that `self` is deterministic and if so wraps it in a [`Dfa`]. Otherwise
    /// [`Error::Nondeterministic`] names a state and symbol with multiple successors.
    pub fn into_dfa(self) -> Result<Dfa<Q>, Error> {
        if let Some((state, symbol)) = self.nondeterminism() {
            return Err(Error::Nondeterministic {
                state: state.show(),
                symbol: symbol.clone(),
            });
        }
        Ok(Dfa(self))
    }
}

impl<Q: State> TryFrom<FiniteAutomaton<Q>> for Dfa<Q> {
    type Error = Error;

    fn try_from(value: FiniteAutomaton<Q>) -> Result<Self, Self::Error> {
        value.into_dfa()
    }
}

impl<Q: State> Deref for Dfa<Q> {
    type Target = FiniteAutomaton<Q>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<Q: State> Dfa<Q> {
    pub(crate) fn assemble(fa: FiniteAutomaton<Q>) -> Self {
        debug_assert!(fa.is_deterministic());
        Self(fa)
    }

    /// Gives back the underlying automaton.
    pub fn into_inner(self) -> FiniteAutomaton<Q> {
        self.0
    }

    /// Returns the unique successor of `state` on `symbol`, if it exists.
    pub fn successor(&self, state: &Q, symbol: &Symbol) -> Option<&Q> {
        self.successors(state, symbol)?.first()
    }

    /// Reads `word` starting in the start state. The run fails if it encounters a symbol
    /// that is not part of the alphabet or a state without transition on the next symbol.
    ///
    /// # Example
    /// ```
    /// use chomsky::prelude::*;
    ///
    /// let dfa = FiniteAutomaton::builder()
    ///     .with_states(["even", "odd"])
    ///     .with_alphabet(['a'])
    ///     .with_transitions([("even", 'a', "odd"), ("odd", 'a', "even")])
    ///     .with_start("even")
    ///     .with_accepting(["odd"])
    ///     .build()
    ///     .and_then(FiniteAutomaton::into_dfa)
    ///     .unwrap();
    /// let run = dfa.run(symbols_of("aaa")).unwrap();
    /// assert_eq!(run.states(), &["even", "odd", "even", "odd"]);
    /// assert!(run.is_accepting());
    /// assert!(dfa.run(symbols_of("ab")).is_err());
    /// ```
    pub fn run<W, S>(&self, word: W) -> Result<Run<Q>, RunError<Q>>
    where
        W: IntoIterator<Item = S>,
        S: Borrow<Symbol>,
    {
        let mut current = self.start();
        let mut states = vec![current.clone()];

        for (position, symbol) in word.into_iter().enumerate() {
            let symbol = symbol.borrow();
            if !self.alphabet().contains(symbol) {
                trace!("rejecting, {symbol} at position {position} is not in the alphabet");
                return Err(RunError::InvalidSymbol {
                    position,
                    symbol: symbol.clone(),
                });
            }
            current = self
                .successor(current, symbol)
                .ok_or_else(|| RunError::NoTransition {
                    position,
                    state: current.clone(),
                    symbol: symbol.clone(),
                })?;
            states.push(current.clone());
        }

        Ok(Run {
            accepting: self.is_accepting(current),
            states,
        })
    }

    /// Decides whether `word` belongs to the accepted language. Words containing symbols
    /// outside of the alphabet are simply rejected.
    pub fn accepts_word(&self, word: &[Symbol]) -> bool {
        self.run(word).is_ok_and(|run| run.is_accepting())
    }

    /// Works as [`Dfa::accepts_word`], but takes the word as a string that is split into symbols
    /// of the alphabet. For an alphabet of single characters every `char` is one symbol. With
    /// longer symbols a string may be split in more than one way, and it is accepted if one of
    /// these splits is. A string that cannot be split at all is rejected.
    ///
    /// # Example
    /// ```
    /// use chomsky::prelude::*;
    ///
    /// let dfa = FiniteAutomaton::builder()
    ///     .with_states([0, 1])
    ///     .with_alphabet(['a', 'b'])
    ///     .with_transitions([(0, 'a', 1), (1, 'b', 0)])
    ///     .with_start(0)
    ///     .with_accepting([1])
    ///     .build()
    ///     .and_then(FiniteAutomaton::into_dfa)
    ///     .unwrap();
    /// assert!(dfa.accepts("aba"));
    /// assert!(!dfa.accepts("ab"));
    /// assert!(!dfa.accepts("axa"));
    /// ```
    pub fn accepts(&self, input: &str) -> bool {
        // reached[i] holds the states in which some split of input[..i] ends
        let mut reached: Vec<Set<&Q>> = vec![Set::default(); input.len() + 1];
        reached[0].insert(self.start());

        for position in 0..input.len() {
            let states = std::mem::take(&mut reached[position]);
            if states.is_empty() {
                continue;
            }
            let rest = &input[position..];
            for symbol in self
                .alphabet()
                .iter()
                .filter(|symbol| !symbol.as_str().is_empty())
                .filter(|symbol| rest.starts_with(symbol.as_str()))
            {
                let next = position + symbol.as_str().len();
                for q in &states {
                    if let Some(p) = self.successor(q, symbol) {
                        reached[next].insert(p);
                    }
                }
            }
        }

        let accepted = reached[input.len()].iter().any(|q| self.is_accepting(q));
        trace!("{input:?} is {}", if accepted { "accepted" } else { "rejected" });
        accepted
    }

    /// Searches for a word on which `self` and `other` disagree, i.e. a word that is accepted by
    /// exactly one of the two. The product of both automata is explored breadth-first, so the
    /// returned word is a shortest one. Missing transitions, as well as symbols that only one
    /// of the two alphabets contains, lead into an implicit rejecting sink.
    pub fn separate<P: State>(&self, other: &Dfa<P>) -> Option<Vec<Symbol>> {
        let symbols: Vec<&Symbol> = self.alphabet().union(other.alphabet()).collect();
        let origin = (Some(self.start()), Some(other.start()));

        let mut seen = Set::from_iter([origin]);
        let mut queue = VecDeque::from([(origin, vec![])]);

        while let Some(((left, right), word)) = queue.pop_front() {
            let left_accepts = left.is_some_and(|q| self.is_accepting(q));
            let right_accepts = right.is_some_and(|p| other.is_accepting(p));
            if left_accepts != right_accepts {
                trace!("found separating word {}", word.show());
                return Some(word);
            }
            if left.is_none() && right.is_none() {
                continue;
            }

            for &symbol in &symbols {
                let next = (
                    left.and_then(|q| self.successor(q, symbol)),
                    right.and_then(|p| other.successor(p, symbol)),
                );
                if seen.insert(next) {
                    let mut extended = word.clone();
                    extended.push(symbol.clone());
                    queue.push_back((next, extended));
                }
            }
        }
        None
    }

    /// Returns true if `self` and `other` accept precisely the same words.
    pub fn equivalent<P: State>(&self, other: &Dfa<P>) -> bool {
        self.separate(other).is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::{automaton::tests::lab_nfa, error::RunError, prelude::*};

    fn ends_with_b() -> Dfa<usize> {
        FiniteAutomaton::builder()
            .with_states([0, 1])
            .with_alphabet(['a', 'b'])
            .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 0), (1, 'b', 1)])
            .with_start(0)
            .with_accepting([1])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap()
    }

    #[test]
    fn requires_determinism() {
        assert_eq!(
            lab_nfa().into_dfa(),
            Err(Error::Nondeterministic {
                state: "q0".into(),
                symbol: 'a'.into()
            })
        );
        assert!(Dfa::try_from(ends_with_b().into_inner()).is_ok());
    }

    #[test_log::test]
    fn runs() {
        let dfa = ends_with_b();
        let run = dfa.run(symbols_of("abb")).unwrap();
        assert_eq!(run.states(), &[0, 0, 1, 1]);
        assert_eq!(run.reached(), &1);
        assert!(run.is_accepting());

        assert_eq!(
            dfa.run(symbols_of("abc")),
            Err(RunError::InvalidSymbol {
                position: 2,
                symbol: 'c'.into()
            })
        );

        let empty = dfa.run(Vec::<Symbol>::new()).unwrap();
        assert_eq!(empty.states(), &[0]);
        assert!(!empty.is_accepting());
    }

    #[test]
    fn missing_transition_rejects() {
        let partial = FiniteAutomaton::builder()
            .with_states(["s", "t"])
            .with_alphabet(['x', 'y'])
            .with_transitions([("s", 'x', "t")])
            .with_start("s")
            .with_accepting(["t"])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert!(partial.accepts("x"));
        assert_eq!(
            partial.run(symbols_of("xy")),
            Err(RunError::NoTransition {
                position: 1,
                state: "t",
                symbol: 'y'.into()
            })
        );
        assert!(!partial.accepts("xy"));
        assert!(!partial.accepts("invalid"));
    }

    #[test]
    fn empty_word_depends_on_start() {
        let dfa = ends_with_b();
        assert!(!dfa.accepts(""));
        let flipped = FiniteAutomaton::builder()
            .with_states([0usize])
            .with_alphabet(['a'])
            .with_start(0)
            .with_accepting([0])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert!(flipped.accepts(""));
    }

    #[test_log::test]
    fn equivalence() {
        let dfa = ends_with_b();
        // same language, but with a redundant copy of the accepting state
        let bloated = FiniteAutomaton::builder()
            .with_states(['x', 'y', 'z'])
            .with_alphabet(['a', 'b'])
            .with_transitions([
                ('x', 'a', 'x'),
                ('x', 'b', 'y'),
                ('y', 'a', 'x'),
                ('y', 'b', 'z'),
                ('z', 'a', 'x'),
                ('z', 'b', 'y'),
            ])
            .with_start('x')
            .with_accepting(['y', 'z'])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert!(dfa.equivalent(&bloated));
        assert!(bloated.equivalent(&dfa));

        let ends_with_a = FiniteAutomaton::builder()
            .with_states([0usize, 1])
            .with_alphabet(['a', 'b'])
            .with_transitions([(0, 'b', 0), (0, 'a', 1), (1, 'b', 0), (1, 'a', 1)])
            .with_start(0)
            .with_accepting([1])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert_eq!(dfa.separate(&ends_with_a), Some(symbols_of("a")));
    }

    #[test]
    fn separation_over_different_alphabets() {
        let dfa = ends_with_b();
        let nfa = lab_nfa().convert_ndfa_to_dfa();
        let witness = dfa.separate(&nfa).unwrap();
        assert_ne!(dfa.accepts_word(&witness), nfa.accepts_word(&witness));
        assert_eq!(witness, symbols_of("b"));
    }

    #[test_log::test]
    fn strings_over_identifier_symbols() {
        let dfa = FiniteAutomaton::builder()
            .with_states(["s", "t"])
            .with_alphabet(["num", "plus"])
            .with_transitions([("s", "num", "s"), ("s", "plus", "t")])
            .with_start("s")
            .with_accepting(["t"])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert!(dfa.accepts("plus"));
        assert!(dfa.accepts("numnumplus"));
        assert!(!dfa.accepts("num"));
        assert!(!dfa.accepts("numplu"));
        assert!(!dfa.accepts("p"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn strings_with_several_splits() {
        // "abc" splits into a|bc, whereas taking the longest prefix ab first gets stuck
        let dfa = FiniteAutomaton::builder()
            .with_states([0usize, 1, 2, 3])
            .with_alphabet(["a", "ab", "bc"])
            .with_transitions([(0, "a", 1), (1, "bc", 2), (0, "ab", 3)])
            .with_start(0)
            .with_accepting([2])
            .build()
            .unwrap()
            .into_dfa()
            .unwrap();
        assert!(dfa.accepts("abc"));
        assert!(!dfa.accepts("ab"));
        assert!(!dfa.accepts("abcc"));
    }
}
