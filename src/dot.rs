use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

fn quote_dot_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Enum that abstracts attributes of a node in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label={}", quote_dot_ident(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

/// Implemented by everything that can be turned into a graphviz diagram. The only input a
/// diagram needs are the states, the accepting states and the transitions.
pub trait Dottable {
    /// The type of states of the rendered automaton.
    type StateId: State;

    /// Gives access to the automaton that should be rendered.
    fn automaton(&self) -> &FiniteAutomaton<Self::StateId>;

    /// The name of the graph.
    fn dot_name(&self) -> String {
        "FA".to_string()
    }

    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    /// Accepting states are drawn as double circles and an invisible node points to the start
    /// state.
    fn dot_representation(&self) -> String {
        let fa = self.automaton();
        let header = [
            format!("digraph {} {{", self.dot_name()),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none]".to_string(),
        ];

        let states = fa.states().iter().map(|q| {
            let shape = if fa.is_accepting(q) {
                "doublecircle"
            } else {
                "circle"
            };
            let attributes = [
                DotStateAttribute::Shape(shape.into()),
                DotStateAttribute::Label(q.show()),
            ];
            format!(
                "{} [{}]",
                quote_dot_ident(&q.show()),
                attributes.iter().join(", ")
            )
        });

        let initial = std::iter::once(format!("init -> {}", quote_dot_ident(&fa.start().show())));

        let transitions = fa.transitions().map(|(source, symbol, target)| {
            format!(
                "{} -> {} [label={}]",
                quote_dot_ident(&source.show()),
                quote_dot_ident(&target.show()),
                quote_dot_ident(symbol.as_str())
            )
        });

        header
            .into_iter()
            .chain(states)
            .chain(initial)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Renders the object visually (as PNG) and returns a vec of bytes encoding the rendered
    /// image. This needs the `dot` executable and is only available on the `graphviz` crate
    /// feature.
    #[cfg(feature = "graphviz")]
    fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        use std::{io::Write, process::Stdio};
        use tracing::trace;

        let dot = self.dot_representation();
        trace!("rendering dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::error!("could not render, dot reported\n{}", stderr);
            return Err(std::io::Error::other(stderr));
        }
        Ok(output.stdout)
    }

    /// Renders the object to a PNG file with the given name. The DOT source is handed to the
    /// `dot` executable through a temporary file. Only available on the `graphviz` crate feature.
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &str) -> Result<(), std::io::Error> {
        use std::io::Write;
        use tracing::trace;

        trace!("outputting dot and rendering to {filename}");
        let mut tempfile = tempfile::NamedTempFile::new()?;
        tempfile.write_all(self.dot_representation().as_bytes())?;

        let status = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(tempfile.path())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "dot process exited with status: {status}"
            )))
        }
    }
}

impl<Q: State> Dottable for FiniteAutomaton<Q> {
    type StateId = Q;

    fn automaton(&self) -> &FiniteAutomaton<Q> {
        self
    }
}

impl<Q: State> Dottable for Dfa<Q> {
    type StateId = Q;

    fn automaton(&self) -> &FiniteAutomaton<Q> {
        self
    }

    fn dot_name(&self) -> String {
        "DFA".to_string()
    }
}
