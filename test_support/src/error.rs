//! Error formatting helpers for stable, deterministic test assertions.

use std::error::Error;

/// Messages of an error and each of its sources, outermost first.
///
/// ```
/// use test_support::error_messages;
///
/// let err = std::io::Error::other("pipe closed");
/// assert_eq!(error_messages(&err), ["pipe closed"]);
/// ```
#[must_use]
pub fn error_messages(err: &(dyn Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(err), |&current| current.source())
        .map(ToString::to_string)
        .collect()
}
