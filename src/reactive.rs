//! Refetch gating for reactive inputs.
//!
//! The original page re-ran a data fetch whenever one of its declared
//! inputs changed. [`InputMemo`] reproduces that explicitly: it remembers
//! the most recent input tuple and reports whether a new tuple differs, so
//! a coordinator re-invokes a fetch only on genuine input changes.

/// Memoizes the most recent input tuple for one fetch.
#[derive(Clone, Debug, Default)]
pub struct InputMemo<I> {
    last: Option<I>,
}

impl<I: Clone + PartialEq> InputMemo<I> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record `input` and report whether it differs from the previous one.
    ///
    /// The first call always reports a change.
    pub fn changed(&mut self, input: I) -> bool {
        if self.last.as_ref() == Some(&input) {
            return false;
        }
        self.last = Some(input);
        true
    }

    /// Forget the memoized input; the next `changed` call reports a change.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
