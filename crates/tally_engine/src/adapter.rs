use std::sync::Arc;

use chrono::Datelike;
use serde_json::Value;
use tally_logging::{tally_debug, tally_warn};

use tally_core::{
    build_request_url, parse_engagement, reconcile, validate_submission, AuthNotice, ClientTrigger,
    EngagementOutcome, GraphTarget, ReconcileDecision,
};

use crate::fetch::CountFetcher;
use crate::store::{
    read_count, MetaStore, StoreError, TokenStore, FIELD_FACEBOOK_SHARES, FIELD_TOTAL_SHARES,
    NETWORK_COUNT_FIELDS, NETWORK_FACEBOOK,
};

/// What happened to the stored count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Updated { previous: u64, stored: u64 },
    Rejected { previous: u64, proposed: u64 },
}

/// Result of the page-render refresh path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No usable token; the page must run the client-side fetch path and
    /// submit the result back through the submission endpoint.
    ClientFetch(ClientTrigger),
    /// A server-side fetch ran and was reconciled against the store.
    Reconciled(ReconcileOutcome),
}

/// Plain-text answer for the inbound submission endpoint. The boundary layer
/// writes `body` and terminates the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub updated: bool,
    pub body: String,
}

/// The share-count adapter: wires the fetcher and the two stores to the core
/// policy. Request-scoped; holds no mutable state of its own.
pub struct ShareCountAdapter {
    target: GraphTarget,
    fetcher: Arc<dyn CountFetcher>,
    tokens: Arc<dyn TokenStore>,
    meta: Arc<dyn MetaStore>,
}

impl ShareCountAdapter {
    pub fn new(
        target: GraphTarget,
        fetcher: Arc<dyn CountFetcher>,
        tokens: Arc<dyn TokenStore>,
        meta: Arc<dyn MetaStore>,
    ) -> Self {
        Self {
            target,
            fetcher,
            tokens,
            meta,
        }
    }

    /// Page-render path: fetch the engagement count server-side when a token
    /// exists, otherwise hand the page a client-side fetch trigger.
    ///
    /// Transport failures and unrecognized payloads degrade to a zero count;
    /// an upstream token-invalidated error marks the token expired and also
    /// degrades to zero. Only store failures propagate.
    pub async fn refresh_count(
        &self,
        post_id: u64,
        canonical_url: &str,
        recovery_url: Option<&str>,
    ) -> Result<RefreshOutcome, StoreError> {
        tally_logging::set_current_post(post_id);
        let token = self.tokens.access_token(NETWORK_FACEBOOK).await;

        if let Some(trigger) =
            ClientTrigger::when_unusable(&token, post_id, canonical_url, recovery_url)
        {
            tally_debug!(
                "No usable token; deferring post {} to the client-side fetch path",
                post_id
            );
            return Ok(RefreshOutcome::ClientFetch(trigger));
        }

        let request = match build_request_url(&self.target, canonical_url, &token) {
            Some(request) => request,
            None => {
                // Malformed graph target; fall back the same way as a
                // missing token.
                tally_warn!(
                    "Could not build an engagement request for {:?}; deferring to client-side fetch",
                    self.target
                );
                return Ok(RefreshOutcome::ClientFetch(ClientTrigger {
                    post_id,
                    canonical_url: canonical_url.to_string(),
                    recovery_url: recovery_url.map(ToOwned::to_owned),
                }));
            }
        };

        let body = match self.fetcher.fetch_engagement(&request).await {
            Ok(body) => body,
            Err(err) => {
                tally_warn!("Engagement fetch failed for post {}: {}", post_id, err);
                Value::Null
            }
        };

        let count = match parse_engagement(&body) {
            EngagementOutcome::Counted(count) => count,
            EngagementOutcome::Unauthorized => {
                tally_warn!("Upstream invalidated the access token; marking it expired");
                self.tokens.mark_expired(NETWORK_FACEBOOK).await;
                0
            }
        };

        let outcome = self.store_count(post_id, count).await?;
        Ok(RefreshOutcome::Reconciled(outcome))
    }

    /// Inbound submission endpoint: two numeric string fields, a plain-text
    /// status answer. Malformed input is rejected before any store access.
    pub async fn handle_submission(
        &self,
        post_id: &str,
        share_counts: &str,
    ) -> Result<SubmissionResponse, StoreError> {
        let submission = match validate_submission(post_id, share_counts) {
            Ok(submission) => submission,
            Err(err) => {
                tally_debug!(
                    "Rejected submission (post_id={:?}, share_counts={:?})",
                    post_id,
                    share_counts
                );
                return Ok(SubmissionResponse {
                    updated: false,
                    body: err.to_string(),
                });
            }
        };

        tally_logging::set_current_post(submission.post_id);
        let response = match self
            .store_count(submission.post_id, submission.share_counts)
            .await?
        {
            ReconcileOutcome::Updated { stored, .. } => SubmissionResponse {
                updated: true,
                body: format!(
                    "Facebook share count for post {} is now {}",
                    submission.post_id, stored
                ),
            },
            ReconcileOutcome::Rejected { previous, proposed } => SubmissionResponse {
                updated: false,
                body: format!(
                    "Ignored stale count {} for post {}; stored count is {}",
                    proposed, submission.post_id, previous
                ),
            },
        };
        Ok(response)
    }

    /// Operator notice for the current token state, dated with the current
    /// month so a dismissed expiry notice returns the following month.
    pub async fn auth_notice(&self) -> Option<AuthNotice> {
        let token = self.tokens.access_token(NETWORK_FACEBOOK).await;
        let now = chrono::Utc::now();
        tally_core::auth_notice(&token, now.year(), now.month())
    }

    /// Reconcile a proposed count against the store and, when accepted,
    /// replace the stored value and recount the post's network total.
    async fn store_count(
        &self,
        post_id: u64,
        proposed: u64,
    ) -> Result<ReconcileOutcome, StoreError> {
        let previous = read_count(self.meta.as_ref(), post_id, FIELD_FACEBOOK_SHARES).await?;
        match reconcile(previous, proposed) {
            ReconcileDecision::Store => {
                self.meta
                    .replace(post_id, FIELD_FACEBOOK_SHARES, &proposed.to_string())
                    .await?;
                let total = self.recount_total(post_id).await?;
                tally_debug!(
                    "Stored count {} for post {} (total across networks {})",
                    proposed,
                    post_id,
                    total
                );
                Ok(ReconcileOutcome::Updated {
                    previous: previous.unwrap_or(0),
                    stored: proposed,
                })
            }
            ReconcileDecision::Reject { previous } => {
                tally_debug!(
                    "Rejected stale count {} for post {} (stored {})",
                    proposed,
                    post_id,
                    previous
                );
                Ok(ReconcileOutcome::Rejected { previous, proposed })
            }
        }
    }

    async fn recount_total(&self, post_id: u64) -> Result<u64, StoreError> {
        let mut total: u64 = 0;
        for field in NETWORK_COUNT_FIELDS {
            total += read_count(self.meta.as_ref(), post_id, field)
                .await?
                .unwrap_or(0);
        }
        self.meta
            .replace(post_id, FIELD_TOTAL_SHARES, &total.to_string())
            .await?;
        Ok(total)
    }
}
