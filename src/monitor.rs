//! Background eye-strain and mood monitoring from face mesh landmarks.
//!
//! A blink is counted when the mean eye aspect ratio drops below a fixed
//! threshold, at most once per refractory period. Blink timestamps are kept
//! for one rate window, so the number retained is the blink rate per minute.
//! Strain is flagged only when the rate is low *and* the last blink is stale.

use crate::{
    constants::{
        BLINK_EAR_THRESHOLD, BLINK_RATE_WINDOW_MS, BLINK_REFRACTORY_MS, HAPPY_LIP_CURVATURE, MONITOR_REPORT_INTERVAL,
        STRAIN_MIN_BLINKS, STRAIN_STALE_MS, STRESSED_BROW_DISTANCE,
    },
    landmarks::LandmarkFrame,
    signals::{brow_nose_distance, eye_aspect_ratio, lip_curvature},
    utils::safe_cast::f64_to_u32_clamp,
    Error, Result,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Coarse mood estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Stressed,
    #[default]
    Neutral,
}

/// Monitoring thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Eye aspect ratio below which the eyes count as closed
    pub ear_threshold: f64,

    /// Minimum gap between two counted blinks (ms)
    pub refractory_ms: u64,

    /// Rolling window for the blink rate (ms)
    pub rate_window_ms: u64,

    /// Strain needs fewer blinks than this in the window
    pub strain_min_blinks: usize,

    /// Strain needs at least this long since the last blink (ms)
    pub strain_stale_ms: u64,

    /// Processed frames between two monitoring updates
    pub report_interval_frames: usize,

    /// Brow-to-nose distance below which the user looks stressed
    pub stressed_brow_distance: f64,

    /// Lip curvature below which the user looks happy
    pub happy_lip_curvature: f64,

    /// Landmarks below this visibility count as missing
    pub min_visibility: f64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            ear_threshold: BLINK_EAR_THRESHOLD,
            refractory_ms: BLINK_REFRACTORY_MS,
            rate_window_ms: BLINK_RATE_WINDOW_MS,
            strain_min_blinks: STRAIN_MIN_BLINKS,
            strain_stale_ms: STRAIN_STALE_MS,
            report_interval_frames: MONITOR_REPORT_INTERVAL,
            stressed_brow_distance: STRESSED_BROW_DISTANCE,
            happy_lip_curvature: HAPPY_LIP_CURVATURE,
            min_visibility: 0.0,
        }
    }
}

impl MonitorSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.ear_threshold > 0.0 && self.ear_threshold.is_finite()) {
            return Err(Error::ConfigError("Blink EAR threshold must be positive".to_string()));
        }
        if self.rate_window_ms == 0 {
            return Err(Error::ConfigError("Blink rate window must be greater than 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(Error::ConfigError(
                "Monitor minimum visibility must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.report_interval_frames == 0 {
            return Err(Error::ConfigError(
                "Monitor report interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Snapshot reported to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringUpdate {
    pub timestamp_ms: u64,
    pub mood: Mood,
    /// Blinks in the last rate window (per minute with the default window)
    pub blink_rate: usize,
    pub is_strained: bool,
    pub last_blink_ms: Option<u64>,
    pub session_blinks: u64,
    /// Latest eye aspect ratio × 100, rounded
    pub eye_closure_score: u32,
}

/// Blink, strain and mood tracker for one monitoring session
#[derive(Debug)]
pub struct WellbeingMonitor {
    settings: MonitorSettings,
    started_ms: Option<u64>,
    last_blink_ms: Option<u64>,
    eyes_closed: bool,
    recent_blinks: VecDeque<u64>,
    total_blinks: u64,
    frames_since_report: usize,
    last_ear: f64,
    mood: Mood,
    closed: bool,
}

impl WellbeingMonitor {
    pub fn new(settings: MonitorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            started_ms: None,
            last_blink_ms: None,
            eyes_closed: false,
            recent_blinks: VecDeque::new(),
            total_blinks: 0,
            frames_since_report: 0,
            last_ear: 0.0,
            mood: Mood::Neutral,
            closed: false,
        })
    }

    /// Process one frame; returns an update every `report_interval_frames` processed frames
    ///
    /// Frames without a usable face are skipped and do not count toward the interval.
    pub fn process(&mut self, frame: &LandmarkFrame) -> Option<MonitoringUpdate> {
        if self.closed {
            return None;
        }
        let Some(ear) = eye_aspect_ratio(frame, self.settings.min_visibility) else {
            trace!("Monitor: frame {} has no usable face", frame.timestamp_ms);
            return None;
        };
        let now_ms = frame.timestamp_ms;
        self.record_ear(ear, now_ms);

        self.frames_since_report += 1;
        if self.frames_since_report < self.settings.report_interval_frames {
            return None;
        }
        self.frames_since_report = 0;
        self.update_mood(frame);
        Some(self.status(now_ms))
    }

    /// Feed an eye aspect ratio directly; returns whether a blink was counted
    pub fn record_ear(&mut self, ear: f64, now_ms: u64) -> bool {
        if self.closed || !ear.is_finite() {
            return false;
        }
        self.started_ms.get_or_insert(now_ms);
        self.last_ear = ear;

        let closed_now = ear < self.settings.ear_threshold;
        let crossing = closed_now && !self.eyes_closed;
        self.eyes_closed = closed_now;

        let refractory_over = self
            .last_blink_ms
            .map_or(true, |last| now_ms.saturating_sub(last) > self.settings.refractory_ms);
        let counted = crossing && refractory_over;
        if counted {
            self.total_blinks += 1;
            self.last_blink_ms = Some(now_ms);
            self.recent_blinks.push_back(now_ms);
            debug!("Blink #{} at {now_ms}", self.total_blinks);
        }
        self.prune(now_ms);
        counted
    }

    fn prune(&mut self, now_ms: u64) {
        while let Some(&oldest) = self.recent_blinks.front() {
            if now_ms.saturating_sub(oldest) < self.settings.rate_window_ms {
                break;
            }
            self.recent_blinks.pop_front();
        }
    }

    fn update_mood(&mut self, frame: &LandmarkFrame) {
        let visibility = self.settings.min_visibility;
        let brow = brow_nose_distance(frame, visibility);
        let lip = lip_curvature(frame, visibility);
        if brow.is_none() && lip.is_none() {
            return;
        }
        self.mood = if brow.is_some_and(|d| d < self.settings.stressed_brow_distance) {
            Mood::Stressed
        } else if lip.is_some_and(|c| c < self.settings.happy_lip_curvature) {
            Mood::Happy
        } else {
            Mood::Neutral
        };
    }

    /// Blinks within the rate window ending at `now_ms`
    #[must_use]
    pub fn blink_rate(&self, now_ms: u64) -> usize {
        self.recent_blinks
            .iter()
            .filter(|&&t| now_ms.saturating_sub(t) < self.settings.rate_window_ms)
            .count()
    }

    /// Low blink rate and no blink for too long
    #[must_use]
    pub fn is_strained(&self, now_ms: u64) -> bool {
        let Some(reference) = self.last_blink_ms.or(self.started_ms) else {
            return false;
        };
        self.blink_rate(now_ms) < self.settings.strain_min_blinks
            && now_ms.saturating_sub(reference) > self.settings.strain_stale_ms
    }

    /// Current snapshot
    #[must_use]
    pub fn status(&self, now_ms: u64) -> MonitoringUpdate {
        MonitoringUpdate {
            timestamp_ms: now_ms,
            mood: self.mood,
            blink_rate: self.blink_rate(now_ms),
            is_strained: self.is_strained(now_ms),
            last_blink_ms: self.last_blink_ms,
            session_blinks: self.total_blinks,
            eye_closure_score: f64_to_u32_clamp((self.last_ear * 100.0).round(), 0, u32::MAX),
        }
    }

    /// Stop monitoring; later frames are ignored
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub const fn session_blinks(&self) -> u64 {
        self.total_blinks
    }

    #[must_use]
    pub const fn mood(&self) -> Mood {
        self.mood
    }
}
