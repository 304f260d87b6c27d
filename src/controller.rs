//! Request/response lifecycle for one summary submission, bound to the
//! status and result slots of a [`SummaryView`].

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use crate::client::SummaryClient;
use crate::config::Config;
use crate::view::{Status, SummaryView};

/// Which completion gets to write the slots when submissions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Every completion writes; the one that resolves last wins.
    #[default]
    LastResolved,
    /// Only the most recently issued submission may write its completion.
    LatestIssued,
}

/// What a submission did to the view once its response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(Status),
    /// A newer submission was issued meanwhile; the slots were left alone.
    Discarded,
}

impl Completion {
    pub fn status(self) -> Option<Status> {
        match self {
            Completion::Applied(status) => Some(status),
            Completion::Discarded => None,
        }
    }
}

pub struct SummaryRequestController<V> {
    view: V,
    client: SummaryClient,
    ordering: ResponseOrdering,
    issued: AtomicU64,
}

impl<V: SummaryView> SummaryRequestController<V> {
    pub fn new(view: V, client: SummaryClient, ordering: ResponseOrdering) -> Self {
        Self {
            view,
            client,
            ordering,
            issued: AtomicU64::new(0),
        }
    }

    pub fn from_config(view: V, config: &Config) -> Self {
        Self::new(view, SummaryClient::new(&config.endpoint), config.ordering)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Reads the input slot, trims it and submits it.
    pub async fn submit_from_input(&self) -> Completion {
        let input = self.view.input_value();
        self.submit(input.trim()).await
    }

    /// Runs one request/response cycle for `url`.
    ///
    /// The status slot is set to pending and the result slot cleared before
    /// the request goes out. Errors never escape: they end up as
    /// [`Status::Failure`] with an empty result.
    pub async fn submit(&self, url: &str) -> Completion {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        self.view.set_status(Status::Pending);
        self.view.set_result("");
        info!(ticket, url, "submitting for summary");

        let outcome = self.client.summarize(url).await;

        if self.ordering == ResponseOrdering::LatestIssued {
            let latest = self.issued.load(Ordering::SeqCst);
            if ticket != latest {
                debug!(ticket, latest, "discarding stale completion");
                return Completion::Discarded;
            }
        }

        match outcome {
            Ok(summary) => {
                info!(ticket, chars = summary.len(), "summary received");
                self.view.set_status(Status::Success);
                self.view.set_result(&summary);
                Completion::Applied(Status::Success)
            }
            Err(err) => {
                if err.is_transport_or_status() {
                    warn!(ticket, error = %err, "summary request failed");
                } else {
                    warn!(ticket, error = %err, "summary response unusable");
                }
                self.view.set_status(Status::Failure);
                self.view.set_result("");
                Completion::Applied(Status::Failure)
            }
        }
    }
}
