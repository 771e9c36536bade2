use std::fmt::Display;

use tracing::debug;

use crate::prelude::*;

/// The four levels of the Chomsky hierarchy. The variants are ordered by how restrictive
/// they are, so `ChomskyType::Regular > ChomskyType::ContextFree` holds and the
/// strongest applicable type of a grammar is simply the maximum of the types it satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChomskyType {
    /// Type 0, no restrictions on the productions.
    Unrestricted,
    /// Type 1, productions are non-contracting.
    ContextSensitive,
    /// Type 2, every left-hand side is a single non-terminal.
    ContextFree,
    /// Type 3, every production is of the form `A → a` or `A → aB`.
    Regular,
}

impl ChomskyType {
    /// The number of the type in the hierarchy, `0` for unrestricted up to `3` for regular.
    pub fn level(&self) -> u8 {
        match self {
            ChomskyType::Unrestricted => 0,
            ChomskyType::ContextSensitive => 1,
            ChomskyType::ContextFree => 2,
            ChomskyType::Regular => 3,
        }
    }

    /// Human readable name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ChomskyType::Unrestricted => "Unrestricted",
            ChomskyType::ContextSensitive => "Context-Sensitive",
            ChomskyType::ContextFree => "Context-Free",
            ChomskyType::Regular => "Regular",
        }
    }
}

impl Display for ChomskyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type {} ({})", self.level(), self.name())
    }
}

impl Grammar {
    /// Determines the most restrictive type of the Chomsky hierarchy that this grammar
    /// belongs to. All productions are considered jointly, a grammar without any productions
    /// is regular.
    pub fn classify(&self) -> ChomskyType {
        let class = if self.is_regular() {
            ChomskyType::Regular
        } else if self.is_context_free() {
            ChomskyType::ContextFree
        } else if self.is_context_sensitive() {
            ChomskyType::ContextSensitive
        } else {
            ChomskyType::Unrestricted
        };
        debug!("grammar with {} productions is {class}", self.rule_count());
        class
    }

    /// Checks whether every production is strictly right-linear, i.e. its body is either a
    /// single terminal or a terminal followed by a non-terminal.
    pub fn is_regular(&self) -> bool {
        self.rules().all(|(_, body)| self.is_right_linear(body))
    }

    /// Checks whether every left-hand side is a single non-terminal.
    pub fn is_context_free(&self) -> bool {
        self.rules().all(|(lhs, _)| self.is_non_terminal(lhs))
    }

    /// Checks whether no production shrinks the sentential form. As left-hand sides consist
    /// of exactly one symbol, this rules out ε-bodies.
    pub fn is_context_sensitive(&self) -> bool {
        self.rules().all(|(_, body)| !body.is_empty())
    }

    pub(crate) fn is_right_linear(&self, body: &[Symbol]) -> bool {
        match body {
            [a] => self.is_terminal(a),
            [a, b] => self.is_terminal(a) && self.is_non_terminal(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{grammar::tests::lab_grammar, prelude::*};

    #[test_log::test]
    fn lab_grammar_is_regular() {
        let g = lab_grammar();
        assert_eq!(g.classify(), ChomskyType::Regular);
        assert_eq!(g.classify().to_string(), "Type 3 (Regular)");
    }

    #[test]
    fn empty_grammar_is_regular() {
        let g = Grammar::builder()
            .with_non_terminals(['S'])
            .with_start('S')
            .build()
            .unwrap();
        assert_eq!(g.classify(), ChomskyType::Regular);
    }

    #[test]
    fn context_free_grammars() {
        let balanced = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['(', ')'])
            .with_rules([('S', "(S)"), ('S', "SS"), ('S', "()")])
            .with_start('S')
            .build()
            .unwrap();
        assert!(!balanced.is_regular());
        assert!(balanced.is_context_sensitive());
        assert_eq!(balanced.classify(), ChomskyType::ContextFree);

        // left-linear is not accepted as regular here
        let left_linear = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .with_rules([('S', "Sa"), ('S', "a")])
            .with_start('S')
            .build()
            .unwrap();
        assert_eq!(left_linear.classify(), ChomskyType::ContextFree);

        let with_epsilon = Grammar::builder()
            .with_non_terminals(['S'])
            .with_terminals(['a'])
            .with_rules([('S', "aS"), ('S', "")])
            .with_start('S')
            .build()
            .unwrap();
        assert!(!with_epsilon.is_context_sensitive());
        assert_eq!(with_epsilon.classify(), ChomskyType::ContextFree);
    }

    #[test]
    fn hierarchy_is_monotonic() {
        let g = lab_grammar();
        assert!(g.is_regular() && g.is_context_free() && g.is_context_sensitive());
        assert!(ChomskyType::Regular > ChomskyType::ContextFree);
        assert!(ChomskyType::ContextFree > ChomskyType::ContextSensitive);
        assert!(ChomskyType::ContextSensitive > ChomskyType::Unrestricted);
        assert_eq!(ChomskyType::Unrestricted.to_string(), "Type 0 (Unrestricted)");
    }
}
