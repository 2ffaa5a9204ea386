use std::fmt;

/// The synchronization points every ucef federate passes through.
///
/// Each point carries the label used on the wire. Points are totally ordered
/// by [`SyncPoint::rank`], which is also the order a federate reaches them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncPoint {
    ReadyToPopulate,
    ReadyToRun,
    ReadyToResign,
}

impl SyncPoint {
    pub const ALL: [SyncPoint; 3] = [
        SyncPoint::ReadyToPopulate,
        SyncPoint::ReadyToRun,
        SyncPoint::ReadyToResign,
    ];

    pub fn rank(self) -> u8 {
        match self {
            SyncPoint::ReadyToPopulate => 0,
            SyncPoint::ReadyToRun => 1,
            SyncPoint::ReadyToResign => 2,
        }
    }

    /// Label registered with the RTI for this point
    pub fn label(self) -> &'static str {
        match self {
            SyncPoint::ReadyToPopulate => "READY_TO_POPULATE",
            SyncPoint::ReadyToRun => "READY_TO_RUN",
            SyncPoint::ReadyToResign => "READY_TO_RESIGN",
        }
    }

    /// Maps a wire label back to a known point. Labels registered by other
    /// parties that ucef does not gate on return `None`.
    pub fn from_label(label: &str) -> Option<SyncPoint> {
        SyncPoint::ALL
            .into_iter()
            .find(|point| point.label() == label)
    }

    pub fn is_before(self, other: SyncPoint) -> bool {
        self.rank() < other.rank()
    }

    pub fn is_after(self, other: SyncPoint) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for SyncPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
