use bevy::prelude::*;

pub mod engine;
#[cfg(feature = "native-tts")]
pub mod native;
pub mod toggle;
mod utterance_map;
pub mod widget;

use engine::SpeechSynth;
use toggle::SpeechToggle;
use widget::{
    SpeechButton, dismiss_notice, handle_speech_button, pump_speech_notifications,
    spawn_speech_button, sync_speech_button,
};

/// "Talk to my resume" toggle. Uses whatever engine `SpeechSynth::detect` finds.
pub struct SpeechPlugin;

impl Plugin for SpeechPlugin {
    fn build(&self, app: &mut App) {
        let synth = SpeechSynth::detect();
        tracing::info!(supported = synth.is_supported(), "speech engine detected");
        app.insert_resource(synth)
            .init_resource::<SpeechToggle>()
            .add_systems(Startup, spawn_speech_button)
            .add_systems(
                Update,
                (
                    dismiss_notice,
                    handle_speech_button,
                    pump_speech_notifications,
                    sync_speech_button.run_if(resource_changed::<SpeechToggle>),
                )
                    .chain()
                    .run_if(any_with_component::<SpeechButton>),
            );
    }
}
