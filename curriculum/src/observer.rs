//! Diagnostic hook for matcher and pipeline decisions.
//!
//! Observers receive events at decision points. They never feed back into
//! scoring: swapping the observer must not change any result.

use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

/// The matching stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    GlobalSearch,
    Unit,
    Object,
    Skill,
    UnitAnyGrade,
    Pipeline,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GlobalSearch => "global_search",
            Self::Unit => "unit",
            Self::Object => "object",
            Self::Skill => "skill",
            Self::UnitAnyGrade => "unit_any_grade",
            Self::Pipeline => "pipeline",
        };
        f.write_str(name)
    }
}

/// A decision-point record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A stage started on a query.
    Attempted {
        stage: Stage,
        query: String,
        variants: usize,
    },

    /// A candidate became the new best.
    Candidate {
        stage: Stage,
        candidate: String,
        score: f32,
    },

    /// The best score was compared against the stage threshold.
    ThresholdCompared {
        stage: Stage,
        score: f32,
        threshold: f32,
        accepted: bool,
    },

    /// The lexical path failed and a fallback is being tried.
    FallbackEntered { stage: Stage, reason: String },

    /// A field received a value.
    Resolved {
        field: String,
        value: String,
        confidence: f32,
    },
}

/// Receives match events.
pub trait MatchObserver: Send + Sync {
    /// Handle one event.
    fn observe(&self, event: &MatchEvent);
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn observe(&self, event: &MatchEvent) {
        match event {
            MatchEvent::Attempted {
                stage,
                query,
                variants,
            } => debug!(%stage, query = %query, variants, "Match attempted"),
            MatchEvent::Candidate {
                stage,
                candidate,
                score,
            } => debug!(%stage, candidate = %candidate, score, "New best candidate"),
            MatchEvent::ThresholdCompared {
                stage,
                score,
                threshold,
                accepted,
            } => debug!(%stage, score, threshold, accepted, "Threshold compared"),
            MatchEvent::FallbackEntered { stage, reason } => {
                debug!(%stage, reason = %reason, "Fallback entered")
            }
            MatchEvent::Resolved {
                field,
                value,
                confidence,
            } => debug!(field = %field, value = %value, confidence, "Field resolved"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {
    fn observe(&self, _event: &MatchEvent) {}
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<MatchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<MatchEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Drop recorded events.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl MatchObserver for RecordingObserver {
    fn observe(&self, event: &MatchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
