//! Sharetally core: pure share-count policy, no IO.
//!
//! Request building, payload parsing, count reconciliation, submission
//! validation and notice policy. The IO seams (HTTP, token and metadata
//! stores) live in `tally_engine`.
mod notice;
mod parse;
mod reconcile;
mod request;
mod submission;
mod token;
mod trigger;

pub use notice::{auth_notice, AuthNotice};
pub use parse::{parse_engagement, EngagementOutcome, TOKEN_INVALIDATED_CODE};
pub use reconcile::{reconcile, ReconcileDecision};
pub use request::{build_request_url, GraphTarget};
pub use submission::{validate_submission, InvalidSubmission, Submission};
pub use token::{AccessToken, EXPIRED_SENTINEL};
pub use trigger::ClientTrigger;
