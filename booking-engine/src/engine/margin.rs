//! Margin heuristic for candidates with unknown travel time.
//!
//! When the oracle cannot answer, feasibility cannot be confirmed. Instead of
//! dropping the candidate, the engine estimates a confidence tier from the
//! slack between the candidate and its busy neighbors: the wider the idle
//! time on the tighter side, the more likely the unknown commute still fits.
//! Better to show an uncertain slot than none.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{BusyInterval, MarginTier};

/// Classify a candidate's confidence tier from neighbor slack alone.
///
/// Slack before is measured from the preceding booking's buffered end to the
/// candidate start; slack after from the candidate end to the following
/// booking's start less the buffer. A side without a neighbor is unbounded.
pub(crate) fn classify(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    prev: Option<&BusyInterval>,
    next: Option<&BusyInterval>,
    buffer: Duration,
) -> MarginTier {
    let slack_before = prev.map(|p| start - (p.end + buffer));
    let slack_after = next.map(|n| (n.start - buffer) - end);

    match (slack_before, slack_after) {
        (None, None) => MarginTier::Blue,
        (Some(m), None) | (None, Some(m)) => MarginTier::classify(m),
        (Some(before), Some(after)) => MarginTier::classify(before.min(after)),
    }
}
