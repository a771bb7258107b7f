//! Repetition counting and eye-strain monitoring over streamed landmarks.
//!
//! An external pose / face-mesh detector produces one [`landmarks::LandmarkFrame`]
//! per camera frame. This library turns that noisy stream into discrete,
//! de-duplicated repetitions, session progress and coaching feedback:
//!
//! 1. A scalar signal is derived from the frame (ear-line angle, nose
//!    position, shoulder elevation, eye aspect ratio)
//! 2. The signal is smoothed over a short window
//! 3. Optionally, a personal baseline is measured during the first frames
//! 4. A two-state machine with hysteresis decides when a gesture engages and
//!    releases, crediting one repetition per cycle
//! 5. A session counter accumulates repetitions toward a goal and a feedback
//!    emitter decides what to show and when to speak
//!
//! Frames with missing landmarks are skipped silently; nothing in the
//! per-frame path returns an error.
//!
//! # Examples
//!
//! ## Counting neck tilts from raw angles
//!
//! ```
//! use motion_coach::detector::{GestureDetector, GestureProfile};
//!
//! # fn main() -> motion_coach::Result<()> {
//! let mut detector = GestureDetector::new(GestureProfile::neck_tilt())?;
//! for angle in [0.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0, 25.0] {
//!     detector.process_signal(angle);
//! }
//! assert_eq!(detector.credited(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Running a session on landmark frames
//!
//! ```no_run
//! use motion_coach::{
//!     detector::ExerciseKind,
//!     events::CoachEvent,
//!     landmarks::LandmarkFrame,
//!     session::ExerciseSession,
//!     config::Config,
//! };
//!
//! # fn next_frame() -> Option<LandmarkFrame> { None }
//! # fn main() -> motion_coach::Result<()> {
//! let config = Config::default();
//! let mut session = ExerciseSession::from_config(&config, ExerciseKind::ShoulderShrug)?;
//!
//! while let Some(frame) = next_frame() {
//!     for event in session.process(&frame) {
//!         match event {
//!             CoachEvent::Feedback { feedback, .. } if feedback.speak => println!("say: {}", feedback.text),
//!             CoachEvent::SessionComplete(record) => println!("done: {} reps", record.rep_count),
//!             _ => {}
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Landmark frames from the external detector
pub mod landmarks;

/// Scalar signal derivation from landmarks
pub mod signals;

/// Signal smoothing filters
pub mod filters;

/// Personal baseline calibration
pub mod calibration;

/// Gesture state machine and per-gesture profiles
pub mod detector;

/// Rate-limited coaching feedback
pub mod feedback;

/// Session counting and exercise orchestration
pub mod session;

/// Blink, eye-strain and mood monitoring
pub mod monitor;

/// Events for external collaborators
pub mod events;

/// Trace replay application
pub mod app;

/// Numeric helpers
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
