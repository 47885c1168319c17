//! Error taxonomy for decoding.
//!
//! A missing table entry indicates a malformed model definition, so lookup
//! failures abort the whole call immediately; there are no retries and no
//! partial results.

use thiserror::Error;

/// Reasons a decode call can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The observation sequence has length zero; the initialization step is
    /// undefined. Rejected before any table access.
    #[error("observation sequence is empty")]
    EmptyObservations,

    /// The model declares no states.
    #[error("model declares no states")]
    EmptyStates,

    /// The start distribution has no entry for a declared state.
    #[error("no start probability for state `{state}`")]
    MissingStart { state: String },

    /// The transition table has no entry for a (from, to) state pair.
    #[error("no transition probability from `{from}` to `{to}`")]
    MissingTransition { from: String, to: String },

    /// The emission table has no entry for a (state, symbol) pair.
    #[error("no emission probability for symbol `{symbol}` in state `{state}`")]
    MissingEmission { state: String, symbol: String },
}
