//! Exact Viterbi decoding for discrete hidden Markov models.
//!
//! Given an HMM (a finite state set with start, transition, and emission
//! probability tables) and an observation sequence, this crate computes the
//! single most probable hidden-state sequence together with its joint
//! probability.
//!
//! ## Core idea
//! 1. Describe your model as an implementation of [`HmmModel`], or build a
//!    [`TableHmm`] straight from probability tables.
//! 2. Hand it to a [`Decoder`] together with the observation sequence.
//! 3. Get back the maximum-probability path, and optionally the full DP
//!    trellis for inspection.
//!
//! The decoder runs a single forward pass in O(T·n²) time for T observations
//! and n states. Probabilities are multiplied directly rather than summed in
//! log space, so the crate is intended for toy-sized models with explicitly
//! given tables; long sequences will underflow towards zero.
//!
//! ## Quick start
//! ```
//! use trellis_hmm::{Decoder, TableHmmBuilder};
//!
//! let hmm = TableHmmBuilder::new()
//!     .states(["Rainy", "Sunny"])
//!     .start("Rainy", 0.6)
//!     .start("Sunny", 0.4)
//!     .transition("Rainy", "Rainy", 0.7)
//!     .transition("Rainy", "Sunny", 0.3)
//!     .transition("Sunny", "Rainy", 0.4)
//!     .transition("Sunny", "Sunny", 0.6)
//!     .emission("Rainy", "walk", 0.1)
//!     .emission("Rainy", "shop", 0.4)
//!     .emission("Rainy", "clean", 0.5)
//!     .emission("Sunny", "walk", 0.6)
//!     .emission("Sunny", "shop", 0.3)
//!     .emission("Sunny", "clean", 0.1)
//!     .build();
//!
//! let decoding = Decoder::new(hmm).decode(&["walk", "shop", "clean"]).unwrap();
//! assert_eq!(decoding.path, vec!["Sunny", "Rainy", "Rainy"]);
//! ```
//!
//! Distributions are taken as given: values are not checked against `[0, 1]`
//! and rows are not checked to sum to one. The max-product computation stays
//! well defined either way; only the probabilistic reading of the result
//! depends on well-formed tables.

pub mod builder;
pub mod decoder;
pub mod error;
pub mod model;
pub mod trellis;

pub use crate::builder::TableHmmBuilder;
pub use crate::decoder::{Decoder, Decoding};
pub use crate::error::DecodeError;
pub use crate::model::{HmmModel, TableHmm};
pub use crate::trellis::Trellis;
