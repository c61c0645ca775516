//! Text-to-speech engine seam.
//!
//! The widget only talks to a [`SpeechEngine`]. Backends queue their
//! start/end/error notifications and the widget drains them once per frame,
//! so delivery is always synchronous on the main schedule.

use bevy::prelude::*;
use thiserror::Error;

use crate::config::PREFERRED_VOICES;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech backend error: {0}")]
    Backend(String),
}

/// A voice offered by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Backend-specific handle used to select the voice again.
    pub id: String,
    pub name: String,
    /// BCP 47-ish language tag, e.g. `en-US`.
    pub lang: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

/// One request to vocalize a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    /// `None` leaves the engine default.
    pub voice: Option<VoiceInfo>,
    /// Multiplier on the engine's normal rate.
    pub rate: f32,
    /// Multiplier on the engine's normal pitch.
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Started,
    Ended,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechNotification {
    pub utterance: UtteranceId,
    pub kind: NotificationKind,
}

pub trait SpeechEngine: Send + Sync + 'static {
    fn voices(&self) -> Vec<VoiceInfo>;
    /// Enqueue `utterance`. Progress arrives through `drain_notifications`.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
    /// Stop whatever is playing and drop anything queued.
    fn cancel(&mut self) -> Result<(), SpeechError>;
    fn drain_notifications(&mut self) -> Vec<SpeechNotification>;
}

/// The platform engine, if there is one.
#[derive(Resource, Default)]
pub struct SpeechSynth {
    pub engine: Option<Box<dyn SpeechEngine>>,
}

impl SpeechSynth {
    pub fn new(engine: impl SpeechEngine) -> Self {
        Self {
            engine: Some(Box::new(engine)),
        }
    }

    pub fn unsupported() -> Self {
        Self { engine: None }
    }

    pub fn is_supported(&self) -> bool {
        self.engine.is_some()
    }

    /// Whatever this build and platform provide.
    pub fn detect() -> Self {
        #[cfg(feature = "native-tts")]
        {
            match super::native::NativeSpeech::new() {
                Ok(engine) => return Self::new(engine),
                Err(e) => tracing::warn!(error = %e, "native speech engine unavailable"),
            }
        }
        Self::unsupported()
    }
}

fn is_us_english(lang: &str) -> bool {
    let lang = lang.replace('_', "-");
    lang.starts_with("en-US") || lang.starts_with("en-us")
}

/// Best-effort voice: each preferred name in order, then any US English
/// voice, else `None` (engine default).
pub fn choose_voice(voices: &[VoiceInfo]) -> Option<&VoiceInfo> {
    PREFERRED_VOICES
        .iter()
        .find_map(|name| voices.iter().find(|v| v.name.contains(name)))
        .or_else(|| voices.iter().find(|v| is_us_english(&v.lang)))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Speak(Utterance),
        Cancel,
    }

    /// Test double: records calls, lets the test queue notifications, and
    /// tracks whether anything is still "playing".
    #[derive(Default, Clone)]
    pub struct RecordingEngine {
        pub voices: Vec<VoiceInfo>,
        pub calls: Arc<Mutex<Vec<Call>>>,
        pub pending: Arc<Mutex<Vec<SpeechNotification>>>,
        pub playing: Arc<Mutex<Option<UtteranceId>>>,
        pub fail_speak: bool,
        pub fail_cancel: Arc<AtomicBool>,
    }

    impl RecordingEngine {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        pub fn playing(&self) -> Option<UtteranceId> {
            self.playing.lock().ok().and_then(|p| *p)
        }

        pub fn set_fail_cancel(&self, fail: bool) {
            self.fail_cancel.store(fail, Ordering::SeqCst);
        }

        pub fn push(&self, utterance: UtteranceId, kind: NotificationKind) {
            if let Ok(mut q) = self.pending.lock() {
                q.push(SpeechNotification { utterance, kind });
            }
        }
    }

    impl SpeechEngine for RecordingEngine {
        fn voices(&self) -> Vec<VoiceInfo> {
            self.voices.clone()
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
            if self.fail_speak {
                return Err(SpeechError::Backend("refused".into()));
            }
            if let Ok(mut c) = self.calls.lock() {
                c.push(Call::Speak(utterance.clone()));
            }
            if let Ok(mut p) = self.playing.lock() {
                *p = Some(utterance.id);
            }
            Ok(())
        }

        fn cancel(&mut self) -> Result<(), SpeechError> {
            if self.fail_cancel.load(Ordering::SeqCst) {
                return Err(SpeechError::Backend("cancel refused".into()));
            }
            if let Ok(mut c) = self.calls.lock() {
                c.push(Call::Cancel);
            }
            if let Ok(mut p) = self.playing.lock() {
                *p = None;
            }
            Ok(())
        }

        fn drain_notifications(&mut self) -> Vec<SpeechNotification> {
            self.pending
                .lock()
                .map(|mut q| std::mem::take(&mut *q))
                .unwrap_or_default()
        }
    }

    pub fn voice(name: &str, lang: &str) -> VoiceInfo {
        VoiceInfo {
            id: name.to_lowercase(),
            name: name.into(),
            lang: lang.into(),
        }
    }
}
