use tracing::{debug, warn};

use crate::api::HubApi;
use crate::error::{ApiError, ApiResult};
use crate::models::Hub;

pub const EMPTY_HUBS_MESSAGE: &str = "No hubs found. Create one to get started!";

/// Result of a create-hub attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Backend accepted the hub; the listing must now be re-fetched
    Created { name: String, message: Option<String> },
    Failed { name: String },
}

/// Landing screen state: the last fetched hub listing plus the create form.
#[derive(Debug, Default)]
pub struct HubListState {
    hubs: Vec<Hub>,
    loaded: bool,
    loading: bool,
    creating: bool,
    new_hub_name: String,
    /// Bumped per listing fetch; only the newest fetch may apply its result
    generation: u64,
}

impl HubListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// A fetch has completed and returned no hubs
    pub fn shows_empty_state(&self) -> bool {
        self.loaded && self.hubs.is_empty()
    }

    pub fn new_hub_name(&self) -> &str {
        &self.new_hub_name
    }

    pub fn set_new_hub_name(&mut self, name: impl Into<String>) {
        self.new_hub_name = name.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.new_hub_name.push(c);
    }

    pub fn backspace(&mut self) {
        self.new_hub_name.pop();
    }

    /// Mark a listing fetch as started. The returned generation must be
    /// handed back to [`finish_refresh`](Self::finish_refresh).
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Replace the listing with the fetched set. On failure the previous
    /// listing stays on screen and the error is handed back for surfacing.
    ///
    /// Results from a fetch older than the latest [`begin_refresh`](Self::begin_refresh)
    /// are discarded, so a slow listing can never overwrite a newer one.
    pub fn finish_refresh(&mut self, generation: u64, result: ApiResult<Vec<Hub>>) -> Option<ApiError> {
        if generation < self.generation {
            debug!(generation, latest = self.generation, "dropping superseded hub listing");
            return None;
        }
        self.loading = false;
        match result {
            Ok(hubs) => {
                debug!(count = hubs.len(), "hub listing refreshed");
                self.hubs = hubs;
                self.loaded = true;
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch hubs");
                Some(e)
            }
        }
    }

    /// Validate the form and enter the creating state. Returns the name to send.
    pub fn begin_create(&mut self) -> Option<String> {
        if self.creating {
            return None;
        }
        let name = self.new_hub_name.trim();
        if name.is_empty() {
            return None;
        }
        self.creating = true;
        Some(name.to_string())
    }

    /// Apply the create result. On success the form is cleared; the caller
    /// re-fetches the listing rather than inserting locally.
    pub fn finish_create(&mut self, name: String, result: ApiResult<Option<String>>) -> CreateOutcome {
        self.creating = false;
        match result {
            Ok(message) => {
                self.new_hub_name.clear();
                CreateOutcome::Created { name, message }
            }
            Err(e) => {
                warn!(hub = %name, error = %e, "failed to create hub");
                CreateOutcome::Failed { name }
            }
        }
    }

    /// Fetch the full listing inline.
    pub async fn refresh(&mut self, api: &dyn HubApi) -> Option<ApiError> {
        let generation = self.begin_refresh();
        let result = api.list_hubs().await;
        self.finish_refresh(generation, result)
    }

    /// Create then re-fetch. `None` means nothing was sent.
    pub async fn create(&mut self, api: &dyn HubApi) -> Option<CreateOutcome> {
        let name = self.begin_create()?;
        let result = api.create_hub(&name).await;
        let outcome = self.finish_create(name, result);
        if matches!(outcome, CreateOutcome::Created { .. }) {
            self.refresh(api).await;
        }
        Some(outcome)
    }
}
