//! Exercise sessions: repetition counting toward a goal, wired to a detector
//! and a feedback emitter.

use crate::{
    config::Config,
    detector::{Direction, ExerciseKind, FrameOutcome, GestureDetector, GestureProfile, Transition, TransitionKind},
    events::{CoachEvent, CompletionRecord, RepetitionEvent},
    feedback::{Feedback, FeedbackEmitter},
    landmarks::LandmarkFrame,
    Error, Result,
};
use log::{debug, info};

/// Lifecycle of a session counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Completion record emitted; frozen
    Complete,
    /// Ended without a record
    Discarded,
}

/// Result of crediting one repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditOutcome {
    Counted,
    /// This credit reached the goal
    Completed(CompletionRecord),
    /// Session no longer active
    Ignored,
}

/// Running repetition count and reward toward a goal
#[derive(Debug, Clone)]
pub struct SessionCounter {
    exercise: ExerciseKind,
    goal: u32,
    rep_count: u32,
    reward_points: u32,
    state: SessionState,
}

impl SessionCounter {
    pub fn new(exercise: ExerciseKind, goal: u32) -> Result<Self> {
        if goal == 0 {
            return Err(Error::InvalidInput(format!("{exercise}: goal must be greater than 0")));
        }
        Ok(Self {
            exercise,
            goal,
            rep_count: 0,
            reward_points: 0,
            state: SessionState::Active,
        })
    }

    /// Credit one repetition worth `reward_delta` points
    pub fn credit(&mut self, reward_delta: u32, now_ms: u64) -> CreditOutcome {
        if self.state != SessionState::Active {
            return CreditOutcome::Ignored;
        }
        self.rep_count += 1;
        self.reward_points = self.reward_points.saturating_add(reward_delta);
        if self.rep_count >= self.goal {
            CreditOutcome::Completed(self.complete(now_ms, false))
        } else {
            CreditOutcome::Counted
        }
    }

    /// End the session early but keep the result
    ///
    /// Returns `None` if a record was already emitted or the session was discarded.
    pub fn finish(&mut self, now_ms: u64) -> Option<CompletionRecord> {
        (self.state == SessionState::Active).then(|| self.complete(now_ms, true))
    }

    /// End the session without a record
    pub fn discard(&mut self) {
        if self.state == SessionState::Active {
            self.state = SessionState::Discarded;
        }
    }

    fn complete(&mut self, now_ms: u64, forced: bool) -> CompletionRecord {
        self.state = SessionState::Complete;
        info!(
            "{} session complete: {} reps, {} points{}",
            self.exercise,
            self.rep_count,
            self.reward_points,
            if forced { " (ended early)" } else { "" }
        );
        CompletionRecord {
            exercise: self.exercise,
            rep_count: self.rep_count,
            reward_points: self.reward_points,
            completed_at_ms: now_ms,
            forced,
        }
    }

    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    #[must_use]
    pub const fn reward_points(&self) -> u32 {
        self.reward_points
    }

    #[must_use]
    pub const fn goal(&self) -> u32 {
        self.goal
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Fraction of the goal reached, capped at 1.0
    #[must_use]
    pub fn progress(&self) -> f64 {
        (f64::from(self.rep_count) / f64::from(self.goal)).min(1.0)
    }
}

/// Coaching lines for one exercise
#[derive(Debug)]
pub struct Script {
    pub initial: &'static str,
    pub calibrating: &'static str,
    pub engage_left: &'static str,
    pub engage_right: &'static str,
    pub engage: &'static str,
    pub release: &'static str,
    pub speak_on_release: bool,
    pub start: &'static str,
    pub completion: &'static str,
}

pub static NECK_TILT_SCRIPT: Script = Script {
    initial: "Align your head in the center.",
    calibrating: "Hold still, finding your neutral position...",
    engage_left: "Tilted left. Keep going!",
    engage_right: "Tilted right. Good stretch!",
    engage: "Good stretch!",
    release: "Back to center. Get ready for the next one.",
    speak_on_release: false,
    start: "Ready? Let's begin the Neck Tilt Flow.",
    completion: "Great job! Your neck flexibility is improving.",
};

pub static HEAD_ROTATION_SCRIPT: Script = Script {
    initial: "Calibrating face...",
    calibrating: "Calibrating face...",
    engage_left: "Turned left. Excellent range.",
    engage_right: "Turned right. Keep it smooth.",
    engage: "Excellent range.",
    release: "Center reached.",
    speak_on_release: false,
    start: "Let's begin. Turn your head slowly to each side.",
    completion: "Smooth rotations. Your mobility is much better now.",
};

pub static SHOULDER_SHRUG_SCRIPT: Script = Script {
    initial: "Initializing sensors...",
    calibrating: "Calibrating sensors...",
    engage_left: "Hold that tension. Now drop slowly.",
    engage_right: "Hold that tension. Now drop slowly.",
    engage: "Hold that tension. Now drop slowly.",
    release: "Perfect release.",
    speak_on_release: true,
    start: "Lift your shoulders toward your ears, then let them drop.",
    completion: "Shoulders released. Session complete.",
};

impl Script {
    #[must_use]
    pub fn for_exercise(exercise: ExerciseKind) -> &'static Self {
        match exercise {
            ExerciseKind::NeckTilt => &NECK_TILT_SCRIPT,
            ExerciseKind::HeadRotation => &HEAD_ROTATION_SCRIPT,
            ExerciseKind::ShoulderShrug => &SHOULDER_SHRUG_SCRIPT,
        }
    }

    fn engage_line(&self, direction: Option<Direction>) -> &'static str {
        match direction {
            Some(Direction::Left) => self.engage_left,
            Some(Direction::Right) => self.engage_right,
            None => self.engage,
        }
    }
}

/// One running exercise: detector, counter and feedback, owned together
///
/// Build a fresh session per exercise; nothing carries over between sessions.
pub struct ExerciseSession {
    detector: GestureDetector,
    counter: SessionCounter,
    feedback: FeedbackEmitter,
    script: &'static Script,
    calibration_announced: bool,
    last_timestamp_ms: u64,
    closed: bool,
}

impl ExerciseSession {
    /// Create a session from a detector profile
    pub fn new(profile: GestureProfile, goal: u32, vocal_cooldown_ms: u64) -> Result<Self> {
        let exercise = profile.exercise;
        let script = Script::for_exercise(exercise);
        let session = Self {
            detector: GestureDetector::new(profile)?,
            counter: SessionCounter::new(exercise, goal)?,
            feedback: FeedbackEmitter::new(vocal_cooldown_ms, script.initial),
            script,
            calibration_announced: false,
            last_timestamp_ms: 0,
            closed: false,
        };
        info!("Starting {exercise} session, goal {goal}");
        Ok(session)
    }

    /// Create a session using configured thresholds, goal and cooldown
    pub fn from_config(config: &Config, exercise: ExerciseKind) -> Result<Self> {
        Self::new(
            config.profile(exercise),
            config.goal(exercise),
            config.vocal_cooldown_ms(exercise),
        )
    }

    /// Spoken prompt when the user starts the workout
    pub fn start(&mut self) -> Vec<CoachEvent> {
        if self.closed {
            return Vec::new();
        }
        let feedback = self.feedback.announce(self.script.start);
        vec![self.feedback_event(feedback)]
    }

    /// Process one landmark frame
    ///
    /// Frames must arrive in capture order. A closed or completed session
    /// ignores late frames.
    pub fn process(&mut self, frame: &LandmarkFrame) -> Vec<CoachEvent> {
        if self.closed || self.counter.state() != SessionState::Active {
            return Vec::new();
        }
        self.last_timestamp_ms = frame.timestamp_ms;
        let exercise = self.exercise();
        let now_ms = frame.timestamp_ms;
        let mut events = Vec::new();

        match self.detector.process_frame(frame) {
            FrameOutcome::Skipped => {}
            FrameOutcome::Calibrating { observed, required } => {
                if !self.calibration_announced {
                    self.calibration_announced = true;
                    let feedback = self.feedback.notify(self.script.calibrating, false, now_ms);
                    events.push(self.feedback_event(feedback));
                }
                events.push(CoachEvent::Calibrating {
                    exercise,
                    observed,
                    required,
                });
            }
            FrameOutcome::Evaluated {
                tension, transition, ..
            } => {
                if let Some(level) = tension {
                    events.push(CoachEvent::Tension { exercise, level });
                }
                if let Some(transition) = transition {
                    self.handle_transition(transition, now_ms, &mut events);
                }
            }
        }
        events
    }

    fn handle_transition(&mut self, transition: Transition, now_ms: u64, events: &mut Vec<CoachEvent>) {
        let feedback = match transition.kind {
            TransitionKind::Engage => {
                self.feedback
                    .notify(self.script.engage_line(transition.direction), true, now_ms)
            }
            TransitionKind::Release => self
                .feedback
                .notify(self.script.release, self.script.speak_on_release, now_ms),
        };
        events.push(self.feedback_event(feedback));

        if !transition.credited {
            return;
        }
        let outcome = self
            .counter
            .credit(self.detector.profile().reward_per_rep, now_ms);
        if outcome == CreditOutcome::Ignored {
            return;
        }
        events.push(CoachEvent::Repetition(RepetitionEvent {
            exercise: self.exercise(),
            direction: transition.direction,
            signal: transition.signal,
            rep_count: self.counter.rep_count(),
            reward_points: self.counter.reward_points(),
        }));
        if let CreditOutcome::Completed(record) = outcome {
            let feedback = self.feedback.announce(self.script.completion);
            events.push(self.feedback_event(feedback));
            events.push(CoachEvent::SessionComplete(record));
        }
    }

    /// User ended the session and wants the result kept
    pub fn finish(&mut self) -> Vec<CoachEvent> {
        if self.closed {
            return Vec::new();
        }
        let now_ms = self.last_timestamp_ms;
        let mut events = Vec::new();
        if let Some(record) = self.counter.finish(now_ms) {
            let feedback = self.feedback.announce(self.script.completion);
            events.push(self.feedback_event(feedback));
            events.push(CoachEvent::SessionComplete(record));
        }
        self.closed = true;
        events
    }

    /// User exited; no record is produced
    pub fn cancel(&mut self) {
        debug!("{} session cancelled at {} reps", self.exercise(), self.counter.rep_count());
        self.counter.discard();
        self.closed = true;
    }

    /// Stop accepting frames without touching the counter
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn feedback_event(&self, feedback: Feedback) -> CoachEvent {
        CoachEvent::Feedback {
            exercise: self.exercise(),
            feedback,
        }
    }

    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.counter.exercise
    }

    #[must_use]
    pub const fn counter(&self) -> &SessionCounter {
        &self.counter
    }

    #[must_use]
    pub const fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    /// Currently visible coaching text
    #[must_use]
    pub fn status(&self) -> &str {
        self.feedback.status()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_goal_rejected() {
        assert!(SessionCounter::new(ExerciseKind::NeckTilt, 0).is_err());
    }

    #[test]
    fn test_counter_completes_once() {
        let mut counter = SessionCounter::new(ExerciseKind::NeckTilt, 2).unwrap();
        assert_eq!(counter.credit(10, 100), CreditOutcome::Counted);
        let CreditOutcome::Completed(record) = counter.credit(10, 200) else {
            panic!("expected completion");
        };
        assert_eq!(record.rep_count, 2);
        assert_eq!(record.reward_points, 20);
        assert_eq!(record.completed_at_ms, 200);
        assert!(!record.forced);

        assert_eq!(counter.credit(10, 300), CreditOutcome::Ignored);
        assert_eq!(counter.rep_count(), 2);
        assert_eq!(counter.reward_points(), 20);
        assert!(counter.finish(400).is_none());
        assert_eq!(counter.state(), SessionState::Complete);
    }

    #[test]
    fn test_forced_finish_keeps_partial_result() {
        let mut counter = SessionCounter::new(ExerciseKind::ShoulderShrug, 20).unwrap();
        counter.credit(15, 10);
        let record = counter.finish(50).unwrap();
        assert!(record.forced);
        assert_eq!(record.rep_count, 1);
        assert_eq!(record.reward_points, 15);
        assert!((counter.progress() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_discard_produces_no_record() {
        let mut counter = SessionCounter::new(ExerciseKind::HeadRotation, 10).unwrap();
        counter.credit(15, 10);
        counter.discard();
        assert_eq!(counter.state(), SessionState::Discarded);
        assert!(counter.finish(20).is_none());
        assert_eq!(counter.credit(15, 30), CreditOutcome::Ignored);
    }

    #[test]
    fn test_session_initial_status() {
        let session = ExerciseSession::new(GestureProfile::neck_tilt(), 10, 2_500).unwrap();
        assert_eq!(session.status(), NECK_TILT_SCRIPT.initial);
        assert!(!session.is_closed());
    }

    #[test]
    fn test_closed_session_ignores_frames() {
        let mut session = ExerciseSession::new(GestureProfile::neck_tilt(), 10, 2_500).unwrap();
        session.close();
        assert!(session.process(&LandmarkFrame::new(0)).is_empty());
        assert!(session.start().is_empty());
        assert!(session.finish().is_empty());
    }
}
