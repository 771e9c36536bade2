use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

impl<Q: State> FiniteAutomaton<Q> {
    /// Builds a table with one row per state and one column per symbol, in which every cell
    /// lists the successors. The start state is marked with `->`, accepting states with `*`.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet().iter().map(|s| s.show())),
        );

        for q in self.states() {
            let marker = match (q == self.start(), self.is_accepting(q)) {
                (true, true) => "->*",
                (true, false) => "->",
                (false, true) => "*",
                (false, false) => "",
            };
            let mut row = vec![format!("{marker}{}", q.show())];
            for symbol in self.alphabet() {
                row.push(match self.successors(q, symbol) {
                    Some(targets) if targets.len() == 1 => {
                        targets.iter().map(|p| p.show()).join("")
                    }
                    Some(targets) => {
                        format!("{{{}}}", targets.iter().map(|p| p.show()).join(", "))
                    }
                    None => "-".to_string(),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<Q: State> Display for FiniteAutomaton<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table())
    }
}

impl<Q: State> Display for Dfa<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::{automaton::tests::lab_nfa, prelude::*};

    #[test]
    fn table_marks_states() {
        let table = lab_nfa().to_string();
        assert!(table.contains("->q0"));
        assert!(table.contains("*q3"));
        assert!(table.contains("{q0, q1}"));
        assert!(table.contains("State"));

        let dfa_table = lab_nfa().convert_ndfa_to_dfa().to_string();
        assert!(dfa_table.contains("->{q0}"));
        assert!(dfa_table.contains("*{q3}"));
    }
}
