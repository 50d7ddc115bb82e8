use crate::model::SignatureInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    Processing,
}

/// Signatures that appeared since the last reported one, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactions {
    pub signatures: Vec<SignatureInfo>,
    /// The known signature was not inside the polled window, older unseen ones may exist.
    pub gap_possible: bool,
}

impl NewTransactions {
    pub fn newest(&self) -> Option<&SignatureInfo> {
        self.signatures.last()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// Tracks the newest reported signature and diffs each poll against it.
#[derive(Debug, Clone)]
pub struct LiveUpdateDetector {
    last_signature: Option<String>,
    state: DetectorState,
}

impl Default for LiveUpdateDetector {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LiveUpdateDetector {
    pub fn new(last_signature: Option<String>) -> Self {
        Self {
            last_signature,
            state: DetectorState::Idle,
        }
    }

    /// Seeds the detector from a newest-first listing without reporting anything.
    pub fn initialize(
        &mut self,
        newest_first: &[SignatureInfo],
    ) {
        self.last_signature = newest_first.first().map(|info| info.signature.clone());
        self.state = DetectorState::Idle;
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn last_signature(&self) -> Option<&str> {
        self.last_signature.as_deref()
    }

    /// Walks a newest-first listing down to the last known signature (exclusive).
    ///
    /// Moves to `Processing` and returns the new signatures in chronological order,
    /// or stays `Idle` and returns `None` when nothing is new.
    pub fn detect(
        &mut self,
        newest_first: &[SignatureInfo],
    ) -> Option<NewTransactions> {
        let mut reached_known = false;
        let mut fresh = Vec::new();

        for info in newest_first {
            if self.last_signature.as_deref() == Some(info.signature.as_str()) {
                reached_known = true;
                break;
            }
            fresh.push(info.clone());
        }

        if fresh.is_empty() {
            self.state = DetectorState::Idle;
            return None;
        }

        fresh.reverse();
        self.state = DetectorState::Processing;

        Some(NewTransactions {
            signatures: fresh,
            gap_possible: self.last_signature.is_some() && !reached_known,
        })
    }

    /// Records the batch as reported and returns to `Idle`.
    pub fn complete(
        &mut self,
        batch: &NewTransactions,
    ) {
        if let Some(newest) = batch.newest() {
            self.last_signature = Some(newest.signature.clone());
        }
        self.state = DetectorState::Idle;
    }
}
