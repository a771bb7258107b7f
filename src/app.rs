//! Trace replay application.
//!
//! Reads landmark frames as JSON lines (one [`LandmarkFrame`] per line),
//! feeds them in order to an exercise session and, optionally, the wellbeing
//! monitor, and hands every resulting event to a sink.

use crate::{
    config::Config,
    detector::ExerciseKind,
    events::{CoachEvent, EventSink},
    landmarks::LandmarkFrame,
    monitor::WellbeingMonitor,
    session::{ExerciseSession, SessionState},
    Error, Result,
};
use log::{info, warn};
use std::io::BufRead;

/// Replay configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Exercise to run
    pub exercise: ExerciseKind,
    /// Library configuration
    pub config: Config,
    /// Override the configured repetition goal
    pub goal: Option<u32>,
    /// Run the blink / strain monitor alongside
    pub monitor: bool,
    /// Keep the partial result if the trace ends before the goal
    pub finish_at_end: bool,
}

impl AppConfig {
    #[must_use]
    pub fn new(exercise: ExerciseKind) -> Self {
        Self {
            exercise,
            config: Config::default(),
            goal: None,
            monitor: false,
            finish_at_end: false,
        }
    }
}

/// Totals after a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub out_of_order: usize,
    pub rep_count: u32,
    pub reward_points: u32,
    pub completed: bool,
    pub session_blinks: u64,
}

/// Main application struct
pub struct CoachApp {
    session: ExerciseSession,
    monitor: Option<WellbeingMonitor>,
    finish_at_end: bool,
    last_timestamp_ms: Option<u64>,
    frames: usize,
    out_of_order: usize,
}

impl CoachApp {
    /// Create a replay application
    pub fn new(app_config: AppConfig) -> Result<Self> {
        let AppConfig {
            exercise,
            config,
            goal,
            monitor,
            finish_at_end,
        } = app_config;
        config.validate()?;

        let goal = goal.unwrap_or_else(|| config.goal(exercise));
        let session = ExerciseSession::new(config.profile(exercise), goal, config.vocal_cooldown_ms(exercise))?;
        let monitor = if monitor {
            info!("Wellbeing monitor enabled");
            Some(WellbeingMonitor::new(config.monitor_settings())?)
        } else {
            None
        };

        Ok(Self {
            session,
            monitor,
            finish_at_end,
            last_timestamp_ms: None,
            frames: 0,
            out_of_order: 0,
        })
    }

    /// Process one frame through the session and monitor
    ///
    /// Frames older than the previous one are dropped.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Vec<CoachEvent> {
        if self.last_timestamp_ms.is_some_and(|last| frame.timestamp_ms < last) {
            warn!("Dropping out-of-order frame at {} ms", frame.timestamp_ms);
            self.out_of_order += 1;
            return Vec::new();
        }
        self.last_timestamp_ms = Some(frame.timestamp_ms);
        self.frames += 1;

        let mut events = self.session.process(frame);
        if let Some(update) = self.monitor.as_mut().and_then(|m| m.process(frame)) {
            events.push(CoachEvent::Monitoring(update));
        }
        events
    }

    /// Replay a JSON-lines trace into `sink`
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn run<R: BufRead, S: EventSink>(&mut self, reader: R, sink: &mut S) -> Result<ReplaySummary> {
        for event in self.session.start() {
            sink.handle(&event);
        }

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let frame: LandmarkFrame = serde_json::from_str(line)
                .map_err(|e| Error::TraceError(format!("line {}: {e}", index + 1)))?;
            for event in self.process_frame(&frame) {
                sink.handle(&event);
            }
            if self.session.counter().state() != SessionState::Active && self.monitor.is_none() {
                break;
            }
        }

        if self.session.counter().state() == SessionState::Active {
            if self.finish_at_end {
                for event in self.session.finish() {
                    sink.handle(&event);
                }
            } else {
                info!("Trace ended before the goal; discarding session");
                self.session.cancel();
            }
        }
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.close();
        }

        Ok(self.summary())
    }

    /// Current totals
    #[must_use]
    pub fn summary(&self) -> ReplaySummary {
        let counter = self.session.counter();
        ReplaySummary {
            frames: self.frames,
            out_of_order: self.out_of_order,
            rep_count: counter.rep_count(),
            reward_points: counter.reward_points(),
            completed: counter.state() == SessionState::Complete,
            session_blinks: self.monitor.as_ref().map_or(0, WellbeingMonitor::session_blinks),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &ExerciseSession {
        &self.session
    }
}
