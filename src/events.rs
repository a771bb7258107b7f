//! Events handed to external collaborators (UI overlay, voice, persistence).

use crate::{
    detector::{Direction, ExerciseKind},
    feedback::Feedback,
    monitor::MonitoringUpdate,
};
use serde::Serialize;

/// A credited repetition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepetitionEvent {
    pub exercise: ExerciseKind,
    pub direction: Option<Direction>,
    /// Smoothed signal when the repetition was credited
    pub signal: f64,
    pub rep_count: u32,
    pub reward_points: u32,
}

/// Finished rep set, handed over for persistence and celebration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRecord {
    pub exercise: ExerciseKind,
    pub rep_count: u32,
    pub reward_points: u32,
    pub completed_at_ms: u64,
    /// Ended by the user before reaching the goal
    pub forced: bool,
}

/// Everything the core reports outward
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CoachEvent {
    /// Status text changed; `speak` is the rate-limited voice decision
    Feedback { exercise: ExerciseKind, feedback: Feedback },
    /// Baseline measurement in progress
    Calibrating {
        exercise: ExerciseKind,
        observed: usize,
        required: usize,
    },
    /// Shrug tension, 0-100
    Tension { exercise: ExerciseKind, level: f64 },
    Repetition(RepetitionEvent),
    SessionComplete(CompletionRecord),
    Monitoring(MonitoringUpdate),
}

/// Consumer of coach events
pub trait EventSink {
    fn handle(&mut self, event: &CoachEvent);
}

impl<F: FnMut(&CoachEvent)> EventSink for F {
    fn handle(&mut self, event: &CoachEvent) {
        self(event);
    }
}

/// Sink that keeps every event, mostly for tests and replay summaries
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<CoachEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repetition events seen so far
    pub fn repetitions(&self) -> impl Iterator<Item = &RepetitionEvent> {
        self.events.iter().filter_map(|e| match e {
            CoachEvent::Repetition(rep) => Some(rep),
            _ => None,
        })
    }

    /// Completion records seen so far
    pub fn completions(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.events.iter().filter_map(|e| match e {
            CoachEvent::SessionComplete(record) => Some(record),
            _ => None,
        })
    }

    /// Spoken feedback texts, in order
    pub fn spoken(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            CoachEvent::Feedback { feedback, .. } if feedback.speak => Some(feedback.text.as_str()),
            _ => None,
        })
    }
}

impl EventSink for EventLog {
    fn handle(&mut self, event: &CoachEvent) {
        self.events.push(event.clone());
    }
}
