use std::collections::{BTreeMap, BTreeSet};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;

/// Sets whose iteration order is canonical. Everything that is part of a grammar or an
/// automaton is stored in one of these, so that printing, iterating and comparing two
/// structures never depends on hashing.
pub type OrderedSet<S> = BTreeSet<S>;
/// Maps with canonical iteration order, see [`OrderedSet`].
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;
