//! Coaching feedback with a rate-limited voice trigger.
//!
//! The emitter never synthesizes speech. It decides whether a message should
//! be spoken now; overlapping speech requests garble audio, so a spoken
//! prompt suppresses further ones from the same emitter for a cooldown.

use log::debug;
use serde::Serialize;

/// A status message and the decision whether to speak it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub text: String,
    pub speak: bool,
}

/// Per-detector feedback state
#[derive(Debug, Clone)]
pub struct FeedbackEmitter {
    cooldown_ms: u64,
    last_spoken_ms: Option<u64>,
    status: String,
}

impl FeedbackEmitter {
    /// Create an emitter showing `initial_status`
    #[must_use]
    pub fn new(cooldown_ms: u64, initial_status: impl Into<String>) -> Self {
        Self {
            cooldown_ms,
            last_spoken_ms: None,
            status: initial_status.into(),
        }
    }

    /// Update the visible status; speak only if asked and the cooldown has passed
    pub fn notify(&mut self, message: &str, vocalize: bool, now_ms: u64) -> Feedback {
        self.status = message.to_string();
        let speak = vocalize && self.cooldown_elapsed(now_ms);
        if speak {
            self.last_spoken_ms = Some(now_ms);
        } else if vocalize {
            debug!("Voice prompt suppressed by cooldown: {message}");
        }
        Feedback {
            text: self.status.clone(),
            speak,
        }
    }

    /// Update the status and always speak; neither checks nor restarts the cooldown
    pub fn announce(&mut self, message: &str) -> Feedback {
        self.status = message.to_string();
        Feedback {
            text: self.status.clone(),
            speak: true,
        }
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        self.last_spoken_ms
            .map_or(true, |last| now_ms.saturating_sub(last) > self.cooldown_ms)
    }

    /// Currently visible status text
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_prompt_is_spoken() {
        let mut emitter = FeedbackEmitter::new(2_500, "Align your head");
        assert_eq!(emitter.status(), "Align your head");
        let feedback = emitter.notify("Tilted right", true, 0);
        assert!(feedback.speak);
        assert_eq!(emitter.status(), "Tilted right");
    }

    #[test]
    fn test_cooldown_suppresses_voice_not_text() {
        let mut emitter = FeedbackEmitter::new(2_500, "");
        assert!(emitter.notify("one", true, 1_000).speak);
        let second = emitter.notify("two", true, 3_000);
        assert!(!second.speak);
        assert_eq!(second.text, "two");
        assert_eq!(emitter.status(), "two");
        assert!(emitter.notify("three", true, 3_501).speak);
    }

    #[test]
    fn test_silent_messages_do_not_reset_cooldown() {
        let mut emitter = FeedbackEmitter::new(2_500, "");
        assert!(emitter.notify("spoken", true, 0).speak);
        assert!(!emitter.notify("quiet", false, 2_000).speak);
        assert!(emitter.notify("spoken again", true, 2_600).speak);
    }

    #[test]
    fn test_announce_bypasses_cooldown() {
        let mut emitter = FeedbackEmitter::new(2_500, "");
        emitter.notify("spoken", true, 0);
        assert!(emitter.announce("Great job!").speak);
        assert_eq!(emitter.status(), "Great job!");
        assert!(!emitter.notify("after", true, 200).speak);
    }

    #[test]
    fn test_announce_does_not_start_cooldown() {
        let mut emitter = FeedbackEmitter::new(2_500, "");
        emitter.announce("Ready? Let's begin.");
        assert!(emitter.notify("Tilted left", true, 500).speak);
    }
}
