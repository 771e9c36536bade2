use tracing::{debug, trace};

use crate::prelude::*;

/// The number of expansion steps used by callers that have no particular budget in mind.
pub const DEFAULT_EXPANSION_BUDGET: usize = 10_000;

impl Grammar {
    /// Derives a random word of the language by repeatedly replacing the leftmost non-terminal
    /// with one of its alternatives, chosen uniformly at random using `rng`. Every replacement
    /// counts as one expansion step; if the sentential form still contains a non-terminal after
    /// `max_steps` steps, [`Error::NonTerminating`] is returned. Reaching a non-terminal that has
    /// no alternatives at all gives [`Error::NoProductions`].
    ///
    /// # Example
    /// ```
    /// use chomsky::prelude::*;
    ///
    /// let grammar = Grammar::builder()
    ///     .with_non_terminals(['S'])
    ///     .with_terminals(['a', 'b'])
    ///     .with_rules([('S', "aS"), ('S', "b")])
    ///     .with_start('S')
    ///     .build()
    ///     .unwrap();
    /// let mut rng = fastrand::Rng::with_seed(7);
    /// let word = grammar.generate_word(&mut rng, DEFAULT_EXPANSION_BUDGET).unwrap();
    /// assert_eq!(word.last(), Some(&Symbol::from('b')));
    /// ```
    pub fn generate_word(
        &self,
        rng: &mut fastrand::Rng,
        max_steps: usize,
    ) -> Result<Vec<Symbol>, Error> {
        let mut current = vec![self.start().clone()];
        let mut steps = 0;

        while let Some(position) = current.iter().position(|sym| self.is_non_terminal(sym)) {
            if steps >= max_steps {
                debug!("giving up derivation after {steps} steps");
                return Err(Error::NonTerminating { budget: max_steps });
            }

            let alternatives = self.alternatives(&current[position]);
            if alternatives.is_empty() {
                return Err(Error::NoProductions {
                    symbol: current[position].clone(),
                });
            }
            let body = &alternatives[rng.usize(..alternatives.len())];
            trace!(
                "expanding {} at position {position} with {}",
                current[position],
                super::show_body(body)
            );

            current.splice(position..=position, body.iter().cloned());
            steps += 1;
        }

        trace!("derived {} in {steps} steps", current.show());
        Ok(current)
    }

    /// Works as [`Grammar::generate_word`] but concatenates the symbols of the derived word.
    pub fn generate_string(
        &self,
        rng: &mut fastrand::Rng,
        max_steps: usize,
    ) -> Result<String, Error> {
        self.generate_word(rng, max_steps)
            .map(|word| word.iter().map(|sym| sym.as_str()).collect())
    }

    /// Generates `count` strings one after the other, stopping at the first failed derivation.
    pub fn generate_strings(
        &self,
        rng: &mut fastrand::Rng,
        max_steps: usize,
        count: usize,
    ) -> Result<Vec<String>, Error> {
        (0..count)
            .map(|_| self.generate_string(rng, max_steps))
            .collect()
    }
}
