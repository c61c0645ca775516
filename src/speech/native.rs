//! OS speech backend via the `tts` crate (`native-tts` feature).

use std::sync::{Arc, Mutex};

use tts::{Tts, Voice};

use super::engine::{
    NotificationKind, SpeechEngine, SpeechError, SpeechNotification, Utterance, UtteranceId,
    VoiceInfo,
};
use super::utterance_map::UtteranceMap;

impl From<tts::Error> for SpeechError {
    fn from(e: tts::Error) -> Self {
        SpeechError::Backend(e.to_string())
    }
}

/// State shared with the backend's callback threads.
#[derive(Default)]
struct Shared {
    ids: UtteranceMap<tts::UtteranceId>,
    queue: Vec<SpeechNotification>,
}

type SharedRef = Arc<Mutex<Shared>>;

fn on_event(shared: &SharedRef, key: tts::UtteranceId, kind: NotificationKind) {
    if let Ok(mut s) = shared.lock() {
        if let Some(n) = s.ids.resolve(key, kind) {
            s.queue.push(n);
        }
    }
}

pub struct NativeSpeech {
    tts: Tts,
    shared: SharedRef,
    callbacks: bool,
    /// Poll fallback when the backend has no utterance callbacks (or no handle).
    polling: Option<UtteranceId>,
}

impl NativeSpeech {
    pub fn new() -> Result<Self, SpeechError> {
        let tts = Tts::default()?;
        let shared: SharedRef = Arc::default();
        let callbacks = tts.supported_features().utterance_callbacks;

        if callbacks {
            let s = shared.clone();
            tts.on_utterance_begin(Some(Box::new(move |key| {
                on_event(&s, key, NotificationKind::Started)
            })))?;
            let s = shared.clone();
            tts.on_utterance_end(Some(Box::new(move |key| {
                on_event(&s, key, NotificationKind::Ended)
            })))?;
            let s = shared.clone();
            tts.on_utterance_stop(Some(Box::new(move |key| {
                on_event(&s, key, NotificationKind::Ended)
            })))?;
        }
        tracing::info!(callbacks, "native speech engine ready");

        Ok(Self {
            tts,
            shared,
            callbacks,
            polling: None,
        })
    }

    fn find_voice(&self, wanted: &VoiceInfo) -> Option<Voice> {
        self.tts
            .voices()
            .ok()?
            .into_iter()
            .find(|v| v.id() == wanted.id)
    }

    fn queue(&self, n: SpeechNotification) {
        if let Ok(mut s) = self.shared.lock() {
            s.queue.push(n);
        }
    }
}

impl SpeechEngine for NativeSpeech {
    fn voices(&self) -> Vec<VoiceInfo> {
        match self.tts.voices() {
            Ok(voices) => voices
                .into_iter()
                .map(|v| VoiceInfo {
                    id: v.id(),
                    name: v.name(),
                    lang: v.language().to_string(),
                })
                .collect(),
            Err(e) => {
                tracing::debug!(error = %e, "voice listing failed");
                Vec::new()
            }
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let features = self.tts.supported_features();
        if features.voice {
            if let Some(voice) = utterance.voice.as_ref().and_then(|v| self.find_voice(v)) {
                self.tts.set_voice(&voice)?;
            }
        }
        if features.rate {
            let rate = (self.tts.normal_rate() * utterance.rate)
                .clamp(self.tts.min_rate(), self.tts.max_rate());
            self.tts.set_rate(rate)?;
        }
        if features.pitch {
            let pitch = (self.tts.normal_pitch() * utterance.pitch)
                .clamp(self.tts.min_pitch(), self.tts.max_pitch());
            self.tts.set_pitch(pitch)?;
        }

        let key = self.tts.speak(utterance.text.as_str(), true)?;

        match key {
            Some(key) if self.callbacks => {
                if let Ok(mut s) = self.shared.lock() {
                    let early = s.ids.bind(key, utterance.id);
                    s.queue.extend(early);
                }
            }
            _ => {
                // nothing to match callbacks against: started on acceptance, ended by polling
                self.queue(SpeechNotification {
                    utterance: utterance.id,
                    kind: NotificationKind::Started,
                });
                self.polling = Some(utterance.id);
            }
        }
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        self.polling = None;
        self.tts.stop()?;
        Ok(())
    }

    fn drain_notifications(&mut self) -> Vec<SpeechNotification> {
        if let Some(id) = self.polling {
            if !self.tts.is_speaking().unwrap_or(false) {
                self.polling = None;
                self.queue(SpeechNotification {
                    utterance: id,
                    kind: NotificationKind::Ended,
                });
            }
        }
        self.shared
            .lock()
            .map(|mut s| std::mem::take(&mut s.queue))
            .unwrap_or_default()
    }
}
