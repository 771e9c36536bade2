use thiserror::Error;

use crate::{Show, Symbol};

/// Errors that can occur when building grammars and automata or when converting between them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grammar or automaton violates one of its structural invariants, for example a
    /// production mentions an undeclared symbol or a transition leaves a state that does not exist.
    #[error("malformed structure: {0}")]
    MalformedStructure(String),
    /// Only productions of the form `A → a` and `A → aB` can be turned into transitions.
    #[error("production `{lhs} → {}` is not of the form `A → a` or `A → aB`", .body.show())]
    UnsupportedProductionShape {
        /// The left-hand side of the offending production.
        lhs: Symbol,
        /// The offending body.
        body: Vec<Symbol>,
    },
    /// Expanding the start symbol did not reach a word within the given number of steps.
    #[error("derivation did not terminate within {budget} expansion steps")]
    NonTerminating {
        /// The number of expansion steps that were allowed.
        budget: usize,
    },
    /// The derivation reached a non-terminal without any production, so it can never terminate.
    /// This is the dead-end case of [`Error::NonTerminating`], reported with the symbol that got
    /// stuck. Use [`Error::is_non_terminating`] to match both.
    #[error("non-terminal `{symbol}` has no productions")]
    NoProductions {
        /// The non-terminal that cannot be expanded.
        symbol: Symbol,
    },
    /// The automaton has more than one successor for the given state and symbol.
    #[error("state {state} has multiple successors on `{symbol}`")]
    Nondeterministic {
        /// Rendering of the state, obtained through [`Show`].
        state: String,
        /// The symbol with multiple successors.
        symbol: Symbol,
    },
}

impl Error {
    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedStructure(msg.into())
    }

    /// Returns true if a derivation failed to produce a word, either because it ran out of
    /// expansion steps or because it reached a non-terminal without productions.
    pub fn is_non_terminating(&self) -> bool {
        matches!(self, Error::NonTerminating { .. } | Error::NoProductions { .. })
    }
}

/// The ways in which running a word through a deterministic automaton can fail. These
/// are not really errors, a failed run simply means that the word is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError<Q: Show + std::fmt::Debug> {
    /// The symbol at `position` does not belong to the alphabet.
    #[error("symbol `{symbol}` at position {position} is not in the alphabet")]
    InvalidSymbol {
        /// Position of the symbol in the word.
        position: usize,
        /// The unknown symbol.
        symbol: Symbol,
    },
    /// The run got stuck because `state` has no transition on `symbol`.
    #[error("no transition from {} on `{symbol}` at position {position}", .state.show())]
    NoTransition {
        /// Position of the symbol in the word.
        position: usize,
        /// The state in which the run got stuck.
        state: Q,
        /// The symbol for which no transition exists.
        symbol: Symbol,
    },
}
