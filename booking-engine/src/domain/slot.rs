//! Output slot types and the timezone formatter.
//!
//! A slot is a feasible, bookable time window. Each slot carries a certainty
//! marker: `Green` when travel times were confirmed by the oracle, or a
//! margin tier when feasibility was inferred from slack alone.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Confidence tier assigned when travel time could not be obtained.
///
/// Estimated from the slack between a candidate and its busy neighbors:
/// the more idle time around the candidate, the more likely the unknown
/// travel still fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarginTier {
    /// At least an hour of slack on the tighter side.
    Blue,
    /// 30-60 minutes of slack.
    Yellow,
    /// 15-30 minutes of slack.
    Orange,
    /// Under 15 minutes of slack.
    Red,
}

impl MarginTier {
    /// Classify a slack margin into a tier.
    pub fn classify(margin: Duration) -> Self {
        if margin >= Duration::minutes(60) {
            MarginTier::Blue
        } else if margin >= Duration::minutes(30) {
            MarginTier::Yellow
        } else if margin >= Duration::minutes(15) {
            MarginTier::Orange
        } else {
            MarginTier::Red
        }
    }

    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginTier::Blue => "BLUE",
            MarginTier::Yellow => "YELLOW",
            MarginTier::Orange => "ORANGE",
            MarginTier::Red => "RED",
        }
    }
}

/// How confident the engine is that a slot is actually reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Certainty {
    /// Travel time was confirmed feasible by the oracle.
    Green,

    /// Travel time was unavailable; feasibility inferred from slack.
    Margin(MarginTier),
}

impl Certainty {
    /// Wire name of the certainty marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Certainty::Green => "GREEN",
            Certainty::Margin(tier) => tier.as_str(),
        }
    }

    /// Whether travel was confirmed rather than estimated.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Certainty::Green)
    }
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Certainty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Certainty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "GREEN" => Ok(Certainty::Green),
            "BLUE" => Ok(Certainty::Margin(MarginTier::Blue)),
            "YELLOW" => Ok(Certainty::Margin(MarginTier::Yellow)),
            "ORANGE" => Ok(Certainty::Margin(MarginTier::Orange)),
            "RED" => Ok(Certainty::Margin(MarginTier::Red)),
            other => Err(serde::de::Error::custom(format!(
                "unknown certainty marker: {other}"
            ))),
        }
    }
}

/// A feasible, bookable time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Canonical start instant (UTC), used for booking/persistence.
    pub start: DateTime<Utc>,

    /// Canonical end instant (UTC).
    pub end: DateTime<Utc>,

    /// Confidence marker for the slot.
    pub certainty: Certainty,
}

impl Slot {
    /// Format the slot for display in the owner's timezone.
    ///
    /// The canonical UTC instants are retained alongside the formatted
    /// strings; only the UTC values should ever be persisted.
    pub fn localize(&self, tz: Tz) -> LocalizedSlot {
        LocalizedSlot {
            start_utc: self.start,
            end_utc: self.end,
            start_local: format_local(self.start, tz),
            end_local: format_local(self.end, tz),
            certainty: self.certainty,
        }
    }
}

/// A slot with display-timezone renderings attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedSlot {
    /// Canonical start instant (UTC).
    pub start_utc: DateTime<Utc>,

    /// Canonical end instant (UTC).
    pub end_utc: DateTime<Utc>,

    /// Start formatted in the display timezone.
    pub start_local: String,

    /// End formatted in the display timezone.
    pub end_local: String,

    /// Confidence marker carried over from the slot.
    pub certainty: Certainty,
}

fn format_local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
