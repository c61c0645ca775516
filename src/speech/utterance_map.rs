//! Maps backend utterance handles to our `UtteranceId`s.
//!
//! Backend callbacks can fire on another thread before `speak` has returned
//! the handle, so events for an unknown handle are parked until it is bound.

#![cfg_attr(not(feature = "native-tts"), allow(dead_code))]

use super::engine::{NotificationKind, SpeechNotification, UtteranceId};

#[derive(Debug)]
pub struct UtteranceMap<K> {
    bound: Vec<(K, UtteranceId)>,
    parked: Vec<(K, NotificationKind)>,
}

impl<K> Default for UtteranceMap<K> {
    fn default() -> Self {
        Self {
            bound: Vec::new(),
            parked: Vec::new(),
        }
    }
}

impl<K: PartialEq + Copy> UtteranceMap<K> {
    /// Record that backend handle `key` is our `id`. Returns any events that
    /// arrived for `key` before it was known. Parked events for other keys
    /// belong to handles that will never be bound and are dropped.
    pub fn bind(&mut self, key: K, id: UtteranceId) -> Vec<SpeechNotification> {
        self.bound.retain(|(k, _)| *k != key);
        let early: Vec<SpeechNotification> = self
            .parked
            .drain(..)
            .filter(|(k, _)| *k == key)
            .map(|(_, kind)| SpeechNotification {
                utterance: id,
                kind,
            })
            .collect();
        if !early.iter().any(|n| n.kind != NotificationKind::Started) {
            self.bound.push((key, id));
        }
        early
    }

    /// Translate a backend event. Terminal events release the handle.
    pub fn resolve(&mut self, key: K, kind: NotificationKind) -> Option<SpeechNotification> {
        let Some(pos) = self.bound.iter().position(|(k, _)| *k == key) else {
            self.parked.push((key, kind));
            return None;
        };
        let utterance = self.bound[pos].1;
        if kind != NotificationKind::Started {
            self.bound.remove(pos);
        }
        Some(SpeechNotification { utterance, kind })
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty() && self.parked.is_empty()
    }
}
