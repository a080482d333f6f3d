use super::payload::StockDataPayload;

/// Lifecycle of the client-side working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for the initial fetch.
    Loading,
    /// The initial fetch failed; the working copy is the empty default.
    LoadFailed,
    /// Editable.
    Ready,
    /// A commit is in flight.
    Submitting,
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowState::Loading => write!(f, "Loading"),
            FlowState::LoadFailed => write!(f, "LoadFailed"),
            FlowState::Ready => write!(f, "Ready"),
            FlowState::Submitting => write!(f, "Submitting"),
        }
    }
}

/// Why the commit action is currently disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitBlock {
    /// Data has not been loaded (Loading or LoadFailed).
    NotReady,
    /// A submission is already in flight.
    InFlight,
    /// An item is mid-edit; save or cancel the edit first.
    EditInProgress,
    /// Nothing changed since the last successful sync.
    Unchanged,
}

impl std::fmt::Display for CommitBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitBlock::NotReady => write!(f, "data has not been loaded"),
            CommitBlock::InFlight => write!(f, "a submission is already in progress"),
            CommitBlock::EditInProgress => write!(f, "an item is being edited"),
            CommitBlock::Unchanged => write!(f, "there are no unsaved changes"),
        }
    }
}

/// Category of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loaded,
    LoadFailed,
    ItemAdded,
    Saved,
    SaveFailed,
}

impl NoticeKind {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, NoticeKind::LoadFailed | NoticeKind::SaveFailed)
    }
}

/// A message for the user about the outcome of the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The exact payload handed to the server for one commit.
///
/// Returned by `begin_submit` and given back to `complete_submit`; on
/// success it becomes the new synced snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SubmitTicket {
    pub payload: StockDataPayload,
}

/// Result of `StockFlow::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the payload; carries its message.
    Submitted(String),
    /// The commit action was disabled; nothing was sent.
    Blocked(CommitBlock),
}
