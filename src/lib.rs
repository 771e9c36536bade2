//! Library for working with formal grammars and finite automata in Rust.
//!
//! The two central types are [`Grammar`], a grammar `G = (VN, VT, P, S)` whose productions
//! have a single non-terminal on their left-hand side, and [`FiniteAutomaton`], a possibly
//! non-deterministic finite automaton whose transition function maps every state and symbol to
//! a *set* of successors. Both are immutable once constructed; their builders check all
//! structural invariants upfront.
//!
//! A grammar can generate random words through leftmost derivations (see
//! [`Grammar::generate_string`]), it can be placed in the Chomsky hierarchy (see
//! [`Grammar::classify`]) and, if it is regular, it can be turned into an automaton (see
//! [`Grammar::to_finite_automaton`]). An automaton can be made deterministic through the subset
//! construction (see [`FiniteAutomaton::convert_ndfa_to_dfa`]) and be turned back into a
//! right-regular grammar (see [`FiniteAutomaton::to_regular_grammar`]).
//! Membership is decided by a [`Dfa`], the deterministic restriction of [`FiniteAutomaton`].
//!
//! ```
//! use chomsky::prelude::*;
//!
//! let grammar = Grammar::builder()
//!     .with_non_terminals(['S', 'A', 'B', 'C'])
//!     .with_terminals(['a', 'b', 'c', 'd'])
//!     .with_rules([
//!         ('S', "dA"),
//!         ('A', "aB"),
//!         ('A', "b"),
//!         ('B', "bC"),
//!         ('B', "d"),
//!         ('C', "cB"),
//!         ('C', "aA"),
//!     ])
//!     .with_start('S')
//!     .build()
//!     .unwrap();
//! assert_eq!(grammar.classify(), ChomskyType::Regular);
//!
//! let dfa = grammar.to_finite_automaton().unwrap().convert_ndfa_to_dfa();
//! let mut rng = fastrand::Rng::with_seed(26);
//! let word = grammar.generate_string(&mut rng, DEFAULT_EXPANSION_BUDGET).unwrap();
//! assert!(dfa.accepts(&word));
//! assert!(dfa.accepts("db"));
//! assert!(!dfa.accepts("invalid"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use chomsky::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{
            AutomatonBuilder, Dfa, FiniteAutomaton, RegularGrammar, Run, State, StateSet,
        },
        dot::Dottable,
        error::{Error, RunError},
        grammar::{
            ChomskyType, Grammar, GrammarBuilder, Production, DEFAULT_EXPANSION_BUDGET,
        },
        math,
        symbol::{symbols_of, Symbol},
        Show,
    };
}

/// This module contains type aliases for the collections that are used throughout the crate.
pub mod math;

mod show;
pub use show::Show;

/// Defines [`Symbol`], the building block of words, grammars and automata.
pub mod symbol;
pub use symbol::Symbol;

/// Error types.
pub mod error;
pub use error::{Error, RunError};

/// Grammars, their classification, string generation and the conversion into automata.
pub mod grammar;
pub use grammar::{ChomskyType, Grammar};

/// Finite automata, determinization, membership and the conversion into grammars.
pub mod automaton;
pub use automaton::{Dfa, FiniteAutomaton};

/// Output of automata in the DOT format of graphviz.
pub mod dot;
