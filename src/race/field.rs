//! Racer identities and track positions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Opaque racer identifier (`"griffin"`, `"hydra"`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RacerId(pub String);

impl RacerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RacerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RacerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Racer {
    pub id: RacerId,
    /// Display name.
    pub name: String,
}

impl Racer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RacerId::new(id),
            name: name.into(),
        }
    }
}

/// One racer's position on the track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub racer: RacerId,
    pub position: f64,
}

/// All lanes, in roster order.
///
/// SmallVec keeps the usual five lanes inline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RacerField {
    lanes: SmallVec<[Lane; 8]>,
}

impl RacerField {
    /// Place every racer at `start`.
    #[must_use]
    pub fn new(racers: &[Racer], start: f64) -> Self {
        Self {
            lanes: racers
                .iter()
                .map(|r| Lane {
                    racer: r.id.clone(),
                    position: start,
                })
                .collect(),
        }
    }

    /// Move every racer back to `start`.
    pub fn reset(&mut self, start: f64) {
        for lane in &mut self.lanes {
            lane.position = start;
        }
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, racer: &RacerId) -> bool {
        self.lanes.iter().any(|l| &l.racer == racer)
    }

    #[must_use]
    pub fn position(&self, racer: &RacerId) -> Option<f64> {
        self.lanes.iter().find(|l| &l.racer == racer).map(|l| l.position)
    }
}
