use std::fmt;

/// Where a run is, from argument check to the final write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    Reading,
    Fetching,
    Merging,
    Writing,
    Done,
    Aborted,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Start => "start",
            RunStage::Reading => "reading",
            RunStage::Fetching => "fetching",
            RunStage::Merging => "merging",
            RunStage::Writing => "writing",
            RunStage::Done => "done",
            RunStage::Aborted => "aborted",
        }
    }

    pub(crate) fn enter(self) -> Self {
        tracing::debug!("stage: {}", self);
        self
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
