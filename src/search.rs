//! Search control: free-text input, forwarded to the listing pipeline on
//! explicit submission only. No debounce, no per-keystroke fetch.

use crate::listing::ListingPipeline;
use crate::Sarvam;

/// Single-line search input and its last submitted query
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    input: String,
    submitted: String,
}

impl SearchControl {
    /// Create an empty search control
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the input as the user types; nothing is fetched yet
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// The current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Snapshot the input as the submitted query and return it.
    /// Submitting an empty input re-fetches the unfiltered set.
    pub fn submit(&mut self) -> &str {
        self.submitted = self.input.clone();
        &self.submitted
    }

    /// The last submitted query
    pub fn query(&self) -> &str {
        &self.submitted
    }

    /// Submit the current input and drive a pipeline refresh with it
    pub async fn submit_to(&mut self, pipeline: &mut ListingPipeline, client: &Sarvam) {
        self.submit();
        pipeline.refresh(client, &self.submitted).await;
    }
}
