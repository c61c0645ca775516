use bevy::prelude::*;

use super::engine::{
    NotificationKind, SpeechError, SpeechNotification, SpeechSynth, Utterance, UtteranceId,
    choose_voice,
};
use crate::config::{RESUME_TEXT, SPEECH_PITCH, SPEECH_RATE};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    #[default]
    Idle,
    Speaking,
}

/// What a button press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// No engine on this platform; nothing changed.
    Unsupported,
    /// A new utterance was enqueued; the state flips once it starts.
    Requested(UtteranceId),
    /// Playback (or a pending request) was cancelled.
    Stopped,
}

/// Play/stop toggle for the biography utterance.
///
/// `current` is the utterance this widget owns, from the moment it is
/// enqueued until it ends, errors, or is cancelled. Notifications for any
/// other id are stale.
#[derive(Resource, Debug, Default)]
pub struct SpeechToggle {
    state: SpeechState,
    current: Option<UtteranceId>,
    next_id: u64,
}

impl SpeechToggle {
    pub fn state(&self) -> SpeechState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state == SpeechState::Speaking
    }

    pub fn current(&self) -> Option<UtteranceId> {
        self.current
    }

    pub fn press(&mut self, synth: &mut SpeechSynth) -> Result<PressOutcome, SpeechError> {
        let Some(engine) = synth.engine.as_mut() else {
            return Ok(PressOutcome::Unsupported);
        };

        // a failed cancel leaves the state as it was, so the next press retries the stop
        if self.is_speaking() || self.current.is_some() {
            engine.cancel()?;
            self.reset();
            return Ok(PressOutcome::Stopped);
        }

        engine.cancel()?;
        let voices = engine.voices();
        let id = UtteranceId(self.next_id);
        self.next_id += 1;
        let utterance = Utterance {
            id,
            text: RESUME_TEXT.to_string(),
            voice: choose_voice(&voices).cloned(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        };
        engine.speak(&utterance)?;
        self.current = Some(id);
        Ok(PressOutcome::Requested(id))
    }

    /// Apply an engine notification. Returns true if the state changed.
    pub fn notify(&mut self, n: SpeechNotification) -> bool {
        if self.current != Some(n.utterance) {
            return false;
        }
        match n.kind {
            NotificationKind::Started => {
                let changed = !self.is_speaking();
                self.state = SpeechState::Speaking;
                changed
            }
            NotificationKind::Ended | NotificationKind::Errored => {
                let changed = self.is_speaking();
                self.reset();
                changed
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = SpeechState::Idle;
        self.current = None;
    }
}
