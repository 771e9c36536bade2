use std::{collections::VecDeque, fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::{
    math::{OrderedMap, OrderedSet, Set},
    Error, Show, Symbol,
};

mod builder;
pub use builder::AutomatonBuilder;

mod dfa;
pub use dfa::{Dfa, Run};

mod subset;
pub use subset::StateSet;

mod reconstruction;
pub use reconstruction::RegularGrammar;

mod table;

/// Anything that can be used to identify the states of a [`FiniteAutomaton`]. This is
/// implemented automatically, so symbols, strings, integers and [`StateSet`]s all qualify.
pub trait State: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> State for T {}

/// A finite automaton `(Q, Σ, δ, q0, F)` over an alphabet of [`Symbol`]s. The transition
/// function maps every pair of state and symbol to a *set* of successors, so the automaton
/// may be non-deterministic. It is deterministic precisely if none of these sets contains
/// more than one state, see [`FiniteAutomaton::is_deterministic`] and [`Dfa`].
///
/// Instances are immutable; [`FiniteAutomaton::new`] verifies that the start state and all
/// accepting states exist and that every transition connects existing states through a symbol
/// of the alphabet.
#[derive(Clone, PartialEq, Eq)]
pub struct FiniteAutomaton<Q: State = Symbol> {
    states: OrderedSet<Q>,
    alphabet: OrderedSet<Symbol>,
    transitions: OrderedMap<Q, OrderedMap<Symbol, OrderedSet<Q>>>,
    start: Q,
    accepting: OrderedSet<Q>,
}

impl<Q: State> FiniteAutomaton<Q> {
    /// Creates a new automaton from its components. Transitions are given as triples
    /// `(source, symbol, target)`; triples that share source and symbol make the automaton
    /// non-deterministic. Fails with [`Error::MalformedStructure`] if a state or symbol is used
    /// that is not declared.
    pub fn new<T>(
        states: OrderedSet<Q>,
        alphabet: OrderedSet<Symbol>,
        transitions: T,
        start: Q,
        accepting: OrderedSet<Q>,
    ) -> Result<Self, Error>
    where
        T: IntoIterator<Item = (Q, Symbol, Q)>,
    {
        if !states.contains(&start) {
            return Err(Error::malformed(format!(
                "start state {} is not a state",
                start.show()
            )));
        }
        if let Some(q) = accepting.iter().find(|q| !states.contains(*q)) {
            return Err(Error::malformed(format!(
                "accepting state {} is not a state",
                q.show()
            )));
        }

        let transitions = transitions.into_iter().collect_vec();
        for (source, symbol, target) in &transitions {
            if !alphabet.contains(symbol) {
                return Err(Error::malformed(format!(
                    "transition ({}, {symbol}, {}) uses a symbol outside of the alphabet",
                    source.show(),
                    target.show()
                )));
            }
            if let Some(q) = [source, target].into_iter().find(|q| !states.contains(*q)) {
                return Err(Error::malformed(format!(
                    "transition ({}, {symbol}, {}) mentions unknown state {}",
                    source.show(),
                    target.show(),
                    q.show()
                )));
            }
        }

        Ok(Self::assemble(states, alphabet, transitions, start, accepting))
    }

    /// Puts the parts together without validating them, used by conversions which uphold
    /// the invariants by construction.
    pub(crate) fn assemble<T>(
        states: OrderedSet<Q>,
        alphabet: OrderedSet<Symbol>,
        transitions: T,
        start: Q,
        accepting: OrderedSet<Q>,
    ) -> Self
    where
        T: IntoIterator<Item = (Q, Symbol, Q)>,
    {
        let mut delta: OrderedMap<Q, OrderedMap<Symbol, OrderedSet<Q>>> = OrderedMap::new();
        for (source, symbol, target) in transitions {
            delta
                .entry(source)
                .or_default()
                .entry(symbol)
                .or_default()
                .insert(target);
        }
        Self {
            states,
            alphabet,
            transitions: delta,
            start,
            accepting,
        }
    }

    /// Returns an [`AutomatonBuilder`] for conveniently writing down automata.
    pub fn builder() -> AutomatonBuilder<Q> {
        AutomatonBuilder::default()
    }

    /// The set of states.
    pub fn states(&self) -> &OrderedSet<Q> {
        &self.states
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &OrderedSet<Symbol> {
        &self.alphabet
    }

    /// The start state.
    pub fn start(&self) -> &Q {
        &self.start
    }

    /// The set of accepting states.
    pub fn accepting(&self) -> &OrderedSet<Q> {
        &self.accepting
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the set of states that can be reached from `state` by reading `symbol`, or
    /// `None` if there is no such transition.
    pub fn successors(&self, state: &Q, symbol: &Symbol) -> Option<&OrderedSet<Q>> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Returns true if at least one transition leaves `state`.
    pub fn has_outgoing(&self, state: &Q) -> bool {
        self.transitions
            .get(state)
            .is_some_and(|out| out.values().any(|targets| !targets.is_empty()))
    }

    /// Iterates over all transitions as `(source, symbol, target)` triples. A
    /// non-deterministic transition yields one triple per target.
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, &Symbol, &Q)> + '_ {
        self.transitions.iter().flat_map(|(source, out)| {
            out.iter().flat_map(move |(symbol, targets)| {
                targets.iter().map(move |target| (source, symbol, target))
            })
        })
    }

    /// Returns true if every state has at most one successor on every symbol.
    pub fn is_deterministic(&self) -> bool {
        self.nondeterminism().is_none()
    }

    /// Finds the first pair of state and symbol which has more than one successor.
    pub(crate) fn nondeterminism(&self) -> Option<(&Q, &Symbol)> {
        self.transitions.iter().find_map(|(source, out)| {
            out.iter()
                .find(|(_, targets)| targets.len() > 1)
                .map(|(symbol, _)| (source, symbol))
        })
    }

    /// Collects the states that are reachable from the start state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<&Q> {
        let mut seen = Set::from_iter([&self.start]);
        let mut queue = VecDeque::from([&self.start]);
        let mut order = vec![];
        while let Some(q) = queue.pop_front() {
            order.push(q);
            for targets in self.transitions.get(q).into_iter().flat_map(|out| out.values()) {
                for p in targets {
                    if seen.insert(p) {
                        queue.push_back(p);
                    }
                }
            }
        }
        order
    }
}

impl<Q: State> Debug for FiniteAutomaton<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FA(states: {}, alphabet: {}, start: {}, accepting: {}, transitions: [{}])",
            Q::show_collection(&self.states),
            self.alphabet.iter().join(""),
            self.start.show(),
            Q::show_collection(&self.accepting),
            self.transitions()
                .map(|(p, a, q)| format!("({}, {a}, {})", p.show(), q.show()))
                .join(", ")
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::prelude::*;

    /// The automaton with `δ(q0, a) = {q0, q1}`, `δ(q1, b) = {q1}`, `δ(q1, a) = {q2}`,
    /// `δ(q2, c) = {q3}` and `δ(q3, c) = {q3}`, in which `q3` is accepting.
    pub fn lab_nfa() -> FiniteAutomaton<&'static str> {
        FiniteAutomaton::builder()
            .with_states(["q0", "q1", "q2", "q3"])
            .with_alphabet(['a', 'b', 'c'])
            .with_transitions([
                ("q0", 'a', "q0"),
                ("q0", 'a', "q1"),
                ("q1", 'b', "q1"),
                ("q1", 'a', "q2"),
                ("q2", 'c', "q3"),
                ("q3", 'c', "q3"),
            ])
            .with_start("q0")
            .with_accepting(["q3"])
            .build()
            .unwrap()
    }

    #[test]
    fn determinism() {
        let nfa = lab_nfa();
        assert!(!nfa.is_deterministic());
        assert_eq!(nfa.nondeterminism(), Some((&"q0", &Symbol::from('a'))));

        let targets = nfa.successors(&"q0", &'a'.into()).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(nfa.successors(&"q0", &'b'.into()).is_none());

        let det = FiniteAutomaton::builder()
            .with_states([0usize, 1])
            .with_alphabet(['a'])
            .with_transitions([(0, 'a', 1), (1, 'a', 0)])
            .with_start(0)
            .with_accepting([1])
            .build()
            .unwrap();
        assert!(det.is_deterministic());
    }

    #[test]
    fn transitions_and_reachability() {
        let nfa = lab_nfa();
        assert_eq!(nfa.transitions().count(), 6);
        assert_eq!(nfa.reachable_states(), vec![&"q0", &"q1", &"q2", &"q3"]);
        assert!(nfa.has_outgoing(&"q3"));

        let with_island = FiniteAutomaton::builder()
            .with_states([0usize, 1, 2])
            .with_alphabet(['a'])
            .with_transitions([(0, 'a', 0), (2, 'a', 1)])
            .with_start(0)
            .build()
            .unwrap();
        assert_eq!(with_island.reachable_states(), vec![&0]);
        assert!(!with_island.has_outgoing(&1));
    }

    #[test]
    fn rejects_malformed() {
        let unknown_target = FiniteAutomaton::builder()
            .with_states(["p"])
            .with_alphabet(['a'])
            .with_transitions([("p", 'a', "r")])
            .with_start("p")
            .build();
        assert!(matches!(unknown_target, Err(Error::MalformedStructure(_))));

        let unknown_symbol = FiniteAutomaton::builder()
            .with_states(["p"])
            .with_alphabet(['a'])
            .with_transitions([("p", 'z', "p")])
            .with_start("p")
            .build();
        assert!(matches!(unknown_symbol, Err(Error::MalformedStructure(_))));

        let bad_accepting = FiniteAutomaton::builder()
            .with_states(["p"])
            .with_alphabet(['a'])
            .with_start("p")
            .with_accepting(["x"])
            .build();
        assert!(matches!(bad_accepting, Err(Error::MalformedStructure(_))));

        let bad_start = FiniteAutomaton::builder()
            .with_states(["p"])
            .with_alphabet(['a'])
            .with_start("x")
            .build();
        assert!(matches!(bad_start, Err(Error::MalformedStructure(_))));
    }
}
