//! Fluent construction of [`TableHmm`] models.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::model::TableHmm;

/// Builder for [`TableHmm`].
///
/// Collects states and probability entries one at a time and assembles the
/// nested tables on [`build`](Self::build). Construction never validates
/// probability mass; a forgotten entry shows up as a lookup error the first
/// time decoding needs it.
pub struct TableHmmBuilder<S, O> {
    states: Vec<S>,
    start: HashMap<S, f64>,
    transitions: HashMap<S, HashMap<S, f64>>,
    emissions: HashMap<S, HashMap<O, f64>>,
}

impl<S, O> TableHmmBuilder<S, O>
where
    S: Clone + Eq + Hash + Display,
    O: Eq + Hash + Display,
{
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            start: HashMap::new(),
            transitions: HashMap::new(),
            emissions: HashMap::new(),
        }
    }

    /// Append states to the enumeration.
    ///
    /// Order is significant: exact-probability ties during decoding resolve
    /// to the earliest declared state.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Append a single state to the enumeration.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Set the start probability of `state`.
    pub fn start(mut self, state: S, p: f64) -> Self {
        self.start.insert(state, p);
        self
    }

    /// Set the probability of transitioning from `from` to `to`.
    pub fn transition(mut self, from: S, to: S, p: f64) -> Self {
        self.transitions.entry(from).or_default().insert(to, p);
        self
    }

    /// Set the probability of emitting `symbol` from `state`.
    pub fn emission(mut self, state: S, symbol: O, p: f64) -> Self {
        self.emissions.entry(state).or_default().insert(symbol, p);
        self
    }

    pub fn build(self) -> TableHmm<S, O> {
        TableHmm::new(self.states, self.start, self.transitions, self.emissions)
    }
}

impl<S, O> Default for TableHmmBuilder<S, O>
where
    S: Clone + Eq + Hash + Display,
    O: Eq + Hash + Display,
{
    fn default() -> Self {
        Self::new()
    }
}
