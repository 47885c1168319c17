//! DP-table data structures used by the decoder.
//!
//! A [`Trellis`] holds, per time step, the probability of the best path
//! ending in each state at that step. Columns are appended left to right as
//! the recurrence advances and are never rewritten afterwards.

use std::fmt;

/// Best-path probability table: one column per time step, one entry per
/// state in each column.
#[derive(Debug, Clone)]
pub struct Trellis<S> {
    states: Vec<S>,
    columns: Vec<Vec<f64>>,
}

impl<S: PartialEq> Trellis<S> {
    pub(crate) fn new(states: Vec<S>) -> Self {
        Self {
            states,
            columns: Vec::new(),
        }
    }

    pub(crate) fn push_column(&mut self, column: Vec<f64>) {
        debug_assert_eq!(column.len(), self.states.len());
        self.columns.push(column);
    }

    /// Number of time steps recorded.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column has been recorded.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// State labels, in enumeration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Probability of the best path ending in `state` at step `t`.
    pub fn prob(&self, t: usize, state: &S) -> Option<f64> {
        let idx = self.states.iter().position(|s| s == state)?;
        self.columns.get(t).map(|column| column[idx])
    }

    /// All per-state probabilities at step `t`, in enumeration order.
    pub fn column(&self, t: usize) -> Option<&[f64]> {
        self.columns.get(t).map(Vec::as_slice)
    }
}

/// Human-readable rendering: rows are states, columns are time steps, each
/// cell a probability at fixed precision. For inspection only; the layout
/// is not a contract to parse.
impl<S: PartialEq + fmt::Display> fmt::Display for Trellis<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in 0..self.columns.len() {
            write!(f, "{t:>8}")?;
        }
        writeln!(f)?;
        for (idx, state) in self.states.iter().enumerate() {
            write!(f, "{state}:")?;
            for column in &self.columns {
                write!(f, " {:.5}", column[idx])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
