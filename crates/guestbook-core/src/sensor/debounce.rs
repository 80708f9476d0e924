use std::time::Duration;

/// Shortest settle time the hook switch contacts are given.
pub const MIN_SETTLE: Duration = Duration::from_millis(40);

/// Transition of the debounced handset level observed by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// No accepted level change on this poll.
    #[default]
    None,
    /// Handset was picked up.
    Lifted,
    /// Handset was put back on the hook.
    Replaced,
}

/// Stable-interval debouncer for a single binary contact.
///
/// A raw level change is only accepted after the contact has held the new
/// level for the whole settle time. The resulting edge is reported by the
/// poll that accepted it and cleared by the next one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    settle: Duration,
    stable: bool,
    raw: bool,
    raw_since: Duration,
    edge: Edge,
}

impl Debouncer {
    /// Create a debouncer that starts from `initial_lifted` with no edge.
    ///
    /// `settle` is raised to [`MIN_SETTLE`] when shorter.
    pub fn new(settle: Duration, initial_lifted: bool, now: Duration) -> Self {
        Self {
            settle: settle.max(MIN_SETTLE),
            stable: initial_lifted,
            raw: initial_lifted,
            raw_since: now,
            edge: Edge::None,
        }
    }

    /// Feed one raw sample taken at `now` and return the edge it produced.
    pub fn update(&mut self, raw_lifted: bool, now: Duration) -> Edge {
        self.edge = Edge::None;

        if raw_lifted != self.raw {
            self.raw = raw_lifted;
            self.raw_since = now;
        } else if raw_lifted != self.stable
            && now.saturating_sub(self.raw_since) >= self.settle
        {
            self.stable = raw_lifted;
            self.edge = if raw_lifted {
                Edge::Lifted
            } else {
                Edge::Replaced
            };
        }

        self.edge
    }

    /// Debounced level.
    pub fn is_lifted(&self) -> bool {
        self.stable
    }

    /// Edge produced by the most recent [`Debouncer::update`].
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Effective settle time.
    pub fn settle(&self) -> Duration {
        self.settle
    }
}
