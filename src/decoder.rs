//! The Viterbi forward pass.
//!
//! [`Decoder`] runs the classic dynamic program over any [`HmmModel`]:
//! initialization from the start distribution, a max-product recurrence over
//! consecutive observations, and termination by maximizing over the final
//! trellis column. One call, T sequential steps, no retries.

use crate::error::DecodeError;
use crate::model::HmmModel;
use crate::trellis::Trellis;

/// Result of a decode: the winning path and its joint probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoding<S> {
    /// Joint probability of `path` together with the observation sequence.
    pub probability: f64,
    /// Most probable hidden-state sequence, one state per observation.
    pub path: Vec<S>,
}

/// Viterbi decoder over a fixed model.
///
/// Typical usage:
/// ```
/// use trellis_hmm::{Decoder, TableHmmBuilder};
///
/// let hmm = TableHmmBuilder::new()
///     .states(["Hot", "Cold"])
///     .start("Hot", 0.5)
///     .start("Cold", 0.5)
///     .transition("Hot", "Hot", 0.8)
///     .transition("Hot", "Cold", 0.2)
///     .transition("Cold", "Hot", 0.3)
///     .transition("Cold", "Cold", 0.7)
///     .emission("Hot", 3u8, 0.6)
///     .emission("Hot", 1u8, 0.4)
///     .emission("Cold", 3u8, 0.1)
///     .emission("Cold", 1u8, 0.9)
///     .build();
///
/// let decoder = Decoder::new(hmm);
/// let decoding = decoder.decode(&[3, 3, 1]).unwrap();
/// assert_eq!(decoding.path.len(), 3);
/// ```
pub struct Decoder<M> {
    model: M,
}

impl<M: HmmModel> Decoder<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Immutable access to the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Decode `observations` into the most probable hidden-state sequence.
    ///
    /// The returned path has the same length as `observations`. When several
    /// candidates score exactly equal, the earliest state in the model's
    /// enumeration order wins, so repeated calls with identical inputs are
    /// fully deterministic.
    ///
    /// # Errors
    /// [`DecodeError::EmptyObservations`] for a zero-length sequence,
    /// [`DecodeError::EmptyStates`] for a model without states, and the
    /// missing-key variants whenever a required table entry is absent.
    pub fn decode(&self, observations: &[M::Obs]) -> Result<Decoding<M::State>, DecodeError> {
        let (decoding, _) = self.run(observations, false)?;
        Ok(decoding)
    }

    /// Decode and additionally return the full DP trellis for inspection.
    ///
    /// The trellis has one column per observation and one entry per state;
    /// the returned probability always equals the final-column entry of the
    /// path's last state. Plain [`decode`](Self::decode) skips recording and
    /// keeps only the current column alive.
    pub fn decode_traced(
        &self,
        observations: &[M::Obs],
    ) -> Result<(Decoding<M::State>, Trellis<M::State>), DecodeError> {
        let (decoding, columns) = self.run(observations, true)?;
        let mut trellis = Trellis::new(self.model.states().to_vec());
        for column in columns {
            trellis.push_column(column);
        }
        Ok((decoding, trellis))
    }

    fn run(
        &self,
        observations: &[M::Obs],
        record: bool,
    ) -> Result<(Decoding<M::State>, Vec<Vec<f64>>), DecodeError> {
        if observations.is_empty() {
            return Err(DecodeError::EmptyObservations);
        }
        let states = self.model.states();
        let n = states.len();
        if n == 0 {
            return Err(DecodeError::EmptyStates);
        }

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("viterbi_decode", steps = observations.len(), states = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut recorded = Vec::new();

        // t = 0: start distribution times first emission; every state opens
        // its own single-element path.
        let first = &observations[0];
        let mut frontier = Vec::with_capacity(n);
        for state in states {
            frontier.push(self.model.start(state)? * self.model.emission(state, first)?);
        }
        let mut paths: Vec<Vec<usize>> = (0..n).map(|q| vec![q]).collect();
        if record {
            recorded.push(frontier.clone());
        }

        for t in 1..observations.len() {
            #[cfg(feature = "tracing")]
            let step_span = tracing::trace_span!("recurrence_step", t);
            #[cfg(feature = "tracing")]
            let _step = step_span.enter();

            let symbol = &observations[t];
            let mut next = Vec::with_capacity(n);
            let mut next_paths = Vec::with_capacity(n);
            for (q, to) in states.iter().enumerate() {
                let emit = self.model.emission(to, symbol)?;
                let mut best = f64::NEG_INFINITY;
                let mut arg = 0usize;
                for (p, from) in states.iter().enumerate() {
                    let score = frontier[p] * self.model.transition(from, to)? * emit;
                    // strict `>` keeps the earliest state on exact ties
                    if score > best {
                        best = score;
                        arg = p;
                    }
                }
                next.push(best);
                let mut path = paths[arg].clone();
                path.push(q);
                next_paths.push(path);
            }
            // the previous step's buffers are superseded wholesale; all
            // states at step t read only step t-1 data
            frontier = next;
            paths = next_paths;
            if record {
                recorded.push(frontier.clone());
            }
        }

        let mut best = f64::NEG_INFINITY;
        let mut arg = 0usize;
        for (q, &probability) in frontier.iter().enumerate() {
            if probability > best {
                best = probability;
                arg = q;
            }
        }
        let path = paths
            .swap_remove(arg)
            .into_iter()
            .map(|q| states[q].clone())
            .collect();

        Ok((
            Decoding {
                probability: best,
                path,
            },
            recorded,
        ))
    }
}
