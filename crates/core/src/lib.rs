pub mod errors;
pub mod models;
pub mod remote;
pub mod services;
pub mod storage;

use models::{
    flow::{CommitBlock, FlowState, Notice, NoticeKind, SubmitOutcome, SubmitTicket},
    payload::StockDataPayload,
    settings::MarketSettings,
    stock::{StockDraft, StockId, StockItem},
};
use remote::traits::StockApi;
use services::{inventory_service::InventoryService, validation_service::ValidationService};

use errors::CoreError;

/// Client-side submission flow for StockFlow.
///
/// Holds the working copy the user edits and the last snapshot known to
/// match the server. Every mutation recomputes the dirty flag by comparing
/// the two; only a confirmed successful submit moves the snapshot.
#[must_use]
pub struct StockFlow {
    state: FlowState,
    working: StockDataPayload,
    synced: StockDataPayload,
    /// Item currently open in the edit form, if any.
    editing: Option<StockId>,
    dirty: bool,
    notice: Option<Notice>,
    validation: ValidationService,
    inventory: InventoryService,
}

impl std::fmt::Debug for StockFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockFlow")
            .field("state", &self.state)
            .field("stocks", &self.working.stocks.len())
            .field("market_settings", &self.working.market_settings)
            .field("editing", &self.editing)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl StockFlow {
    /// A flow in the `Loading` state with an empty working copy.
    pub fn new() -> Self {
        Self {
            state: FlowState::Loading,
            working: StockDataPayload::default(),
            synced: StockDataPayload::default(),
            editing: None,
            dirty: false,
            notice: None,
            validation: ValidationService::new(),
            inventory: InventoryService::new(),
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch the document once and enter `Ready` (or `LoadFailed`).
    ///
    /// Only valid while `Loading` or after a failed load.
    pub async fn load(&mut self, api: &dyn StockApi) -> Result<(), CoreError> {
        self.ensure_loadable()?;
        self.state = FlowState::Loading;
        let result = api.fetch_all().await;
        self.complete_load(result)
    }

    /// Apply the result of a fetch issued by the caller.
    pub fn complete_load(
        &mut self,
        result: Result<StockDataPayload, CoreError>,
    ) -> Result<(), CoreError> {
        self.ensure_loadable()?;
        self.editing = None;
        match result {
            Ok(payload) => {
                tracing::info!(stocks = payload.stocks.len(), "stock data loaded");
                self.notice = Some(Notice::new(
                    NoticeKind::Loaded,
                    format!("Loaded {} stock items.", payload.stocks.len()),
                ));
                self.working = payload.clone();
                self.synced = payload;
                self.dirty = false;
                self.state = FlowState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load stock data");
                self.notice = Some(Notice::new(
                    NoticeKind::LoadFailed,
                    format!("Could not load stock data: {e}"),
                ));
                self.working = StockDataPayload::default();
                self.synced = StockDataPayload::default();
                self.dirty = false;
                self.state = FlowState::LoadFailed;
                Err(e)
            }
        }
    }

    // ── Item Management ─────────────────────────────────────────────

    /// Validate a new item, give it a fresh id and put it first in the list.
    pub fn add_item(&mut self, draft: &StockDraft) -> Result<StockId, CoreError> {
        self.ensure_ready()?;
        let fields = self.validation.validate_draft(draft)?;
        let name = fields.name.clone();
        let id = self.inventory.add_item(&mut self.working, fields);
        self.recompute_dirty();
        self.notice = Some(Notice::new(
            NoticeKind::ItemAdded,
            format!("{name} has been added to your inventory."),
        ));
        Ok(id)
    }

    /// Open an item for editing. Returns the form prefilled from the item.
    ///
    /// While an edit is open, commit is disabled.
    pub fn begin_edit(&mut self, id: &StockId) -> Result<StockDraft, CoreError> {
        self.ensure_ready()?;
        let item = self
            .working
            .find(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        let draft = StockDraft::from(item);
        self.editing = Some(id.clone());
        Ok(draft)
    }

    /// Finish the open edit: validate and replace the item in place.
    pub fn save_edit(&mut self, draft: &StockDraft) -> Result<StockId, CoreError> {
        self.ensure_ready()?;
        let id = self
            .editing
            .clone()
            .ok_or_else(|| CoreError::InvalidState("no item is being edited".into()))?;
        let fields = self.validation.validate_draft(draft)?;
        self.inventory.replace_item(&mut self.working, &id, fields)?;
        self.editing = None;
        self.recompute_dirty();
        Ok(id)
    }

    /// Drop the open edit without changing anything. Returns whether one was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Replace an item in place without going through the edit form.
    pub fn update_item(&mut self, id: &StockId, draft: &StockDraft) -> Result<(), CoreError> {
        self.ensure_ready()?;
        let fields = self.validation.validate_draft(draft)?;
        self.inventory.replace_item(&mut self.working, id, fields)?;
        self.recompute_dirty();
        Ok(())
    }

    /// Remove an item. An unknown id is not an error; returns whether anything was removed.
    pub fn remove_item(&mut self, id: &StockId) -> Result<bool, CoreError> {
        self.ensure_ready()?;
        let removed = self.inventory.remove_item(&mut self.working, id);
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
        self.recompute_dirty();
        Ok(removed)
    }

    // ── Market Settings ─────────────────────────────────────────────

    /// Validate and stage new market settings. Nothing is sent until commit.
    pub fn update_market_settings(&mut self, settings: MarketSettings) -> Result<(), CoreError> {
        self.ensure_ready()?;
        self.validation.validate_settings(&settings)?;
        self.inventory.set_market_settings(&mut self.working, settings);
        self.recompute_dirty();
        Ok(())
    }

    // ── Commit ──────────────────────────────────────────────────────

    /// Why commit is disabled right now, or `None` if it is enabled.
    #[must_use]
    pub fn commit_block(&self) -> Option<CommitBlock> {
        match self.state {
            FlowState::Loading | FlowState::LoadFailed => Some(CommitBlock::NotReady),
            FlowState::Submitting => Some(CommitBlock::InFlight),
            FlowState::Ready if self.editing.is_some() => Some(CommitBlock::EditInProgress),
            FlowState::Ready if !self.dirty => Some(CommitBlock::Unchanged),
            FlowState::Ready => None,
        }
    }

    #[must_use]
    pub fn can_commit(&self) -> bool {
        self.commit_block().is_none()
    }

    /// Start a commit: validate the whole working copy and enter `Submitting`.
    ///
    /// Returns `Ok(None)` (a no-op) when commit is disabled. A validation
    /// failure leaves the flow in `Ready` and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitTicket>, CoreError> {
        Ok(self.start_submit()?.ok())
    }

    /// Finish a commit started with `begin_submit`.
    ///
    /// On success the submitted payload becomes the synced snapshot. On
    /// failure the working copy is kept as is and stays dirty; there is no retry.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<String, CoreError>,
    ) -> Result<String, CoreError> {
        if self.state != FlowState::Submitting {
            return Err(CoreError::InvalidState(format!(
                "no submission in flight (state: {})",
                self.state
            )));
        }
        self.state = FlowState::Ready;

        match result {
            Ok(message) => {
                self.synced = ticket.payload;
                self.recompute_dirty();
                tracing::info!(stocks = self.synced.stocks.len(), "stock data saved");
                self.notice = Some(Notice::new(NoticeKind::Saved, message.clone()));
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save stock data");
                self.notice = Some(Notice::new(
                    NoticeKind::SaveFailed,
                    format!("Could not save stock data: {e}"),
                ));
                Err(e)
            }
        }
    }

    /// Commit the working copy through `api` in one step.
    pub async fn submit(&mut self, api: &dyn StockApi) -> Result<SubmitOutcome, CoreError> {
        let ticket = match self.start_submit()? {
            Ok(ticket) => ticket,
            Err(block) => return Ok(SubmitOutcome::Blocked(block)),
        };
        let result = api.replace_all(&ticket.payload).await;
        self.complete_submit(ticket, result)
            .map(SubmitOutcome::Submitted)
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Items of the working copy, newest first.
    #[must_use]
    pub fn stocks(&self) -> &[StockItem] {
        &self.working.stocks
    }

    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.working.stocks.len()
    }

    #[must_use]
    pub fn get_item(&self, id: &StockId) -> Option<&StockItem> {
        self.working.find(id)
    }

    #[must_use]
    pub fn market_settings(&self) -> &MarketSettings {
        &self.working.market_settings
    }

    #[must_use]
    pub fn working_copy(&self) -> &StockDataPayload {
        &self.working
    }

    #[must_use]
    pub fn synced_snapshot(&self) -> &StockDataPayload {
        &self.synced
    }

    /// `true` when the working copy differs from the synced snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn editing(&self) -> Option<&StockId> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the pending notice so it is shown only once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// The working copy as pretty JSON (same layout as the data file).
    pub fn to_json(&self) -> Result<String, CoreError> {
        storage::format::write_document(&self.working)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn start_submit(&mut self) -> Result<Result<SubmitTicket, CommitBlock>, CoreError> {
        if let Some(block) = self.commit_block() {
            tracing::debug!(reason = %block, "commit ignored");
            return Ok(Err(block));
        }
        self.validation.validate_payload(&self.working)?;
        self.state = FlowState::Submitting;
        Ok(Ok(SubmitTicket {
            payload: self.working.clone(),
        }))
    }

    fn recompute_dirty(&mut self) {
        self.dirty = self.working != self.synced;
    }

    fn ensure_ready(&self) -> Result<(), CoreError> {
        if self.state == FlowState::Ready {
            Ok(())
        } else {
            Err(CoreError::InvalidState(format!(
                "stock data cannot be changed while {}",
                self.state
            )))
        }
    }

    fn ensure_loadable(&self) -> Result<(), CoreError> {
        match self.state {
            FlowState::Loading | FlowState::LoadFailed => Ok(()),
            other => Err(CoreError::InvalidState(format!(
                "stock data is already loaded (state: {other})"
            ))),
        }
    }
}

impl Default for StockFlow {
    fn default() -> Self {
        Self::new()
    }
}
