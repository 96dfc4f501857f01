use std::sync::mpsc::Sender;

/// Coarse progress checkpoints, in the order a run reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Checkpoint {
    Segmenting,
    Isolating,
    FillingHoles,
    Outlining,
    Done,
}

impl Checkpoint {
    pub fn percent(self) -> u8 {
        match self {
            Checkpoint::Segmenting => 10,
            Checkpoint::Isolating => 30,
            Checkpoint::FillingHoles => 50,
            Checkpoint::Outlining => 70,
            Checkpoint::Done => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Checkpoint::Segmenting => "Looking for someone",
            Checkpoint::Isolating => "Removing the garbage",
            Checkpoint::FillingHoles => "Filling the holes",
            Checkpoint::Outlining => "Creating the sticker",
            Checkpoint::Done => "Done",
        }
    }
}

/// Receiver of progress reports
///
/// Reports are fire-and-forget; a sink must never influence the run.
pub trait ProgressSink {
    fn report(&self, checkpoint: Checkpoint);
}

/// Discards every report
impl ProgressSink for () {
    fn report(&self, _checkpoint: Checkpoint) {}
}

impl ProgressSink for Sender<Checkpoint> {
    fn report(&self, checkpoint: Checkpoint) {
        // The observer may already have gone away
        let _ = self.send(checkpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_percentages_are_monotonic() {
        let all = [
            Checkpoint::Segmenting,
            Checkpoint::Isolating,
            Checkpoint::FillingHoles,
            Checkpoint::Outlining,
            Checkpoint::Done,
        ];
        let percents: Vec<u8> = all.iter().map(|c| c.percent()).collect();
        assert_eq!(percents, vec![10, 30, 50, 70, 100]);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sender_tolerates_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        tx.report(Checkpoint::Done);
    }
}
