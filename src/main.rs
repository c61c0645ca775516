use bevy::prelude::*;
mod config;
mod field;
mod speech;
mod theme;

use config::WINDOW_TITLE;
use field::FieldPlugin;
use speech::SpeechPlugin;
use theme::ThemePlugin;

fn main() {
    App::new()
        // Bevy's core engine features
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                ..default()
            }),
            ..default()
        }))
        // Background theme (clear colour + network stroke)
        .add_plugins(ThemePlugin)
        // Particle network backdrop
        .add_plugins(FieldPlugin)
        // "Talk to my resume" voice toggle
        .add_plugins(SpeechPlugin)
        .add_systems(Update, exit_on_esc_or_q_if_native)
        .run();
}

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
fn exit_on_esc_or_q_if_native(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if cfg!(not(target_arch = "wasm32")) && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ])
    {
        exit.write(AppExit::Success);
    }
}
