/// Coalesces bursts of preview refresh requests into a single pending run.
///
/// Editors fire change events per keystroke; the host schedules one refresh
/// and ignores further requests until that refresh is taken. The scheduler
/// only tracks the pending flag, leaving the actual deferral mechanism
/// (timer, frame callback) to the host.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    pending: bool,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a refresh. Returns `true` when this call scheduled a new run,
    /// `false` when one was already pending and the request coalesced.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending flag. Returns `true` when a refresh should run
    /// now; subsequent requests will schedule again.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
