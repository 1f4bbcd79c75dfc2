use crate::api::PriceBackend;
use crate::error::PriceWatchError;
use crate::model::{AlertRequest, PriceHistory};
use crate::ui::core::alerts::{AlertForm, SubmitBlocked};
use log::{debug, info, warn};

pub const INVALID_TARGET_MESSAGE: &str = "Target price must be a number";

/// A history request that has been admitted and must be completed with
/// [`TrackerState::finish_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertTicket {
    pub seq: u64,
    pub request: AlertRequest,
}

/// All state behind the price view: the URL input, the fetch status, the
/// shared error region, the displayed history and the alert form.
#[derive(Debug, Default)]
pub struct TrackerState {
    pub url: String,
    pub loading: bool,
    pub error: Option<String>,
    pub history: Option<PriceHistory>,
    pub alert: AlertForm,
    fetch_seq: u64,
    alert_seq: u64,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub fn can_fetch(&self) -> bool {
        !self.loading && !self.url.trim().is_empty()
    }

    /// Admits a history fetch, or returns `None` when the trigger is disabled.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.can_fetch() {
            debug!(
                "Fetch ignored (loading: {}, empty url: {})",
                self.loading,
                self.url.trim().is_empty()
            );
            return None;
        }

        self.loading = true;
        self.error = None;
        self.fetch_seq += 1;

        Some(FetchTicket {
            seq: self.fetch_seq,
            url: self.url.trim().to_string(),
        })
    }

    /// Applies the outcome of fetch `seq`. Completions of superseded fetches are
    /// dropped and `false` is returned.
    pub fn finish_fetch(
        &mut self,
        seq: u64,
        result: Result<PriceHistory, PriceWatchError>,
    ) -> bool {
        if seq != self.fetch_seq {
            warn!(
                "Dropping stale history response #{} (current #{})",
                seq, self.fetch_seq
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(history) => {
                info!("Showing {} points for {}", history.history.len(), history.asin);
                self.history = Some(history);
                self.error = None;
                self.alert.close();
            }
            Err(e) => {
                warn!("History fetch failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Opens the alert form for the displayed product. No-op without history.
    pub fn show_alert_form(&mut self) -> bool {
        match &self.history {
            Some(history) => self.alert.show(history.identifier()),
            None => false,
        }
    }

    pub fn edit_alert_email(&mut self, email: &str) -> bool {
        self.alert.edit_email(email)
    }

    pub fn edit_alert_target(&mut self, input: &str) -> bool {
        self.alert.edit_target_price(input)
    }

    pub fn cancel_alert(&mut self) -> bool {
        self.alert.cancel()
    }

    pub fn can_submit_alert(&self) -> bool {
        match (&self.history, self.alert.draft()) {
            (Some(history), Some(draft)) => {
                !draft.submitting && draft.has_valid_target() && draft.asin == history.asin
            }
            _ => false,
        }
    }

    /// Admits an alert submission for the product captured when the form opened.
    pub fn begin_alert_submit(&mut self) -> Option<AlertTicket> {
        let current = self.history.as_ref()?.asin.clone();
        let bound = self.alert.draft()?.asin.clone();
        if bound != current {
            warn!("Alert draft for {} no longer matches displayed {}", bound, current);
            self.alert.close();
            return None;
        }

        let seq = self.alert_seq + 1;
        match self.alert.begin_submit(seq) {
            Ok(request) => {
                self.alert_seq = seq;
                self.error = None;
                Some(AlertTicket { seq, request })
            }
            Err(SubmitBlocked::InvalidTarget) => {
                self.error = Some(INVALID_TARGET_MESSAGE.to_string());
                None
            }
            Err(reason) => {
                debug!("Alert submit ignored: {:?}", reason);
                None
            }
        }
    }

    pub fn finish_alert_submit(&mut self, seq: u64, result: Result<(), PriceWatchError>) {
        let succeeded = result.is_ok();
        let applied = self.alert.finish_submit(seq, succeeded);

        match result {
            Ok(()) => info!("Alert #{} created", seq),
            Err(e) => {
                warn!("Alert #{} failed: {}", seq, e);
                self.error = Some(e.user_message());
            }
        }

        if !applied {
            debug!("Alert #{} completed after its form was closed", seq);
        }
    }
}

/// Runs one history fetch to completion. Returns whether a request was issued.
pub async fn fetch_history(state: &mut TrackerState, backend: &dyn PriceBackend) -> bool {
    let Some(ticket) = state.begin_fetch() else {
        return false;
    };
    let result = backend.fetch_history(&ticket.url).await;
    state.finish_fetch(ticket.seq, result);
    true
}

/// Runs one alert submission to completion. Returns whether a request was issued.
pub async fn submit_alert(state: &mut TrackerState, backend: &dyn PriceBackend) -> bool {
    let Some(ticket) = state.begin_alert_submit() else {
        return false;
    };
    let result = backend.create_alert(&ticket.request).await;
    state.finish_alert_submit(ticket.seq, result);
    true
}
