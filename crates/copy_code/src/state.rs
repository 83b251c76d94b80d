/// Display state of one copy control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CopyState {
    /// Showing the copy affordance.
    #[default]
    Idle,
    /// Showing the success content until the revert timer fires.
    Copied,
    /// Showing the failure indication until the revert timer fires.
    Failed,
}

impl CopyState {
    /// State after a clipboard write settles.
    ///
    /// A write can settle while the control still shows an earlier result; the
    /// newer result replaces it and the revert timer restarts.
    pub fn settle(self, succeeded: bool) -> CopyState {
        if succeeded {
            CopyState::Copied
        } else {
            CopyState::Failed
        }
    }

    /// State after the revert timer fires.
    pub fn revert(self) -> CopyState {
        CopyState::Idle
    }

    pub fn is_idle(self) -> bool {
        self == CopyState::Idle
    }
}
