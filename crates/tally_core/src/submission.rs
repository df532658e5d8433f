use thiserror::Error;

/// A validated browser-triggered count submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub post_id: u64,
    pub share_counts: u64,
}

/// Fixed rejection for malformed submission input. The text is user-visible
/// and must not leak which field was bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid data")]
pub struct InvalidSubmission;

/// Validate the two required submission fields.
///
/// Both must be non-negative numeric strings; anything else is rejected
/// before any state is touched.
pub fn validate_submission(
    post_id: &str,
    share_counts: &str,
) -> Result<Submission, InvalidSubmission> {
    let post_id = post_id.trim().parse::<u64>().map_err(|_| InvalidSubmission)?;
    let share_counts = share_counts
        .trim()
        .parse::<u64>()
        .map_err(|_| InvalidSubmission)?;
    Ok(Submission {
        post_id,
        share_counts,
    })
}
