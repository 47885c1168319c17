//! Model definitions: the [`HmmModel`] lookup seam and the table-backed
//! [`TableHmm`] implementation.
//!
//! The decoder only ever sees a model through [`HmmModel`]: an ordered state
//! enumeration plus fallible probability lookups. [`TableHmm`] backs those
//! lookups with the nested associative tables of the classic formulation.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::DecodeError;

/// Probability lookups for a discrete HMM.
///
/// Semantics:
/// - `states()` fixes the enumeration order. It is part of the contract:
///   whenever two candidates score exactly equal during decoding, the one
///   whose state appears first in this slice wins.
/// - Every lookup is fallible. A missing entry means the model definition is
///   malformed, and the decoder propagates the error without recovery.
pub trait HmmModel {
    /// Hidden-state label. Identity and equality only; no structure assumed.
    type State: Clone + PartialEq;

    /// Observable symbol label.
    type Obs;

    /// States in the caller-defined enumeration order.
    fn states(&self) -> &[Self::State];

    /// Probability of starting in `state`.
    fn start(&self, state: &Self::State) -> Result<f64, DecodeError>;

    /// Probability of moving from `from` to `to` between consecutive steps.
    fn transition(&self, from: &Self::State, to: &Self::State) -> Result<f64, DecodeError>;

    /// Probability of observing `symbol` while in `state`.
    fn emission(&self, state: &Self::State, symbol: &Self::Obs) -> Result<f64, DecodeError>;
}

/// Discrete HMM backed by nested hash tables.
///
/// This is the mapping-of-mappings representation: one map for the start
/// distribution, one map per source state for transitions, one map per state
/// for emissions. Probability values are taken as given: nothing checks
/// that they lie in `[0, 1]` or that rows sum to one. Entries missing for a
/// lookup performed during decoding surface there as [`DecodeError`]s.
#[derive(Clone, Debug)]
pub struct TableHmm<S, O> {
    states: Vec<S>,
    start: HashMap<S, f64>,
    transitions: HashMap<S, HashMap<S, f64>>,
    emissions: HashMap<S, HashMap<O, f64>>,
}

impl<S, O> TableHmm<S, O>
where
    S: Clone + Eq + Hash + Display,
    O: Eq + Hash + Display,
{
    /// Build a model directly from probability tables.
    ///
    /// `states` fixes the enumeration order used for tie-breaking; see
    /// [`HmmModel::states`].
    pub fn new(
        states: Vec<S>,
        start: HashMap<S, f64>,
        transitions: HashMap<S, HashMap<S, f64>>,
        emissions: HashMap<S, HashMap<O, f64>>,
    ) -> Self {
        Self {
            states,
            start,
            transitions,
            emissions,
        }
    }

    /// Number of declared states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }
}

impl<S, O> HmmModel for TableHmm<S, O>
where
    S: Clone + Eq + Hash + Display,
    O: Eq + Hash + Display,
{
    type State = S;
    type Obs = O;

    fn states(&self) -> &[S] {
        &self.states
    }

    fn start(&self, state: &S) -> Result<f64, DecodeError> {
        self.start
            .get(state)
            .copied()
            .ok_or_else(|| DecodeError::MissingStart {
                state: state.to_string(),
            })
    }

    fn transition(&self, from: &S, to: &S) -> Result<f64, DecodeError> {
        self.transitions
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .ok_or_else(|| DecodeError::MissingTransition {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    fn emission(&self, state: &S, symbol: &O) -> Result<f64, DecodeError> {
        self.emissions
            .get(state)
            .and_then(|row| row.get(symbol))
            .copied()
            .ok_or_else(|| DecodeError::MissingEmission {
                state: state.to_string(),
                symbol: symbol.to_string(),
            })
    }
}
