use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::engine::SpeechSynth;
use super::toggle::{PressOutcome, SpeechState, SpeechToggle};
use crate::config::UNSUPPORTED_NOTICE;

/// The floating "talk to my resume" button.
#[derive(Component)]
pub struct SpeechButton;

#[derive(Component)]
pub struct SpeechIcon;

/// Tooltip-style label next to the icon.
#[derive(Component)]
pub struct SpeechLabel;

/// Modal shown when there is no speech engine. Blocks the toggle until clicked away.
#[derive(Component)]
pub struct SpeechNotice;

const BUTTON_IDLE: Color = Color::srgb(1.0, 0.851, 0.239);
const BUTTON_PLAYING: Color = Color::srgb(1.0, 0.475, 0.776);
const INK: Color = Color::srgb(0.0, 0.0, 0.0);
const NOTICE_SCRIM: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);
const NOTICE_CARD: Color = Color::srgb(1.0, 1.0, 1.0);

/// How the button looks in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFace {
    pub icon: &'static str,
    pub label: &'static str,
    pub playing: bool,
}

impl ButtonFace {
    pub fn for_state(state: SpeechState) -> Self {
        match state {
            SpeechState::Idle => Self {
                icon: "AI",
                label: "Talk to my Resume",
                playing: false,
            },
            SpeechState::Speaking => Self {
                icon: "STOP",
                label: "Stop AI Voice",
                playing: true,
            },
        }
    }

    fn background(&self) -> Color {
        if self.playing { BUTTON_PLAYING } else { BUTTON_IDLE }
    }
}

/// Spawn the button (and its hidden notice). No window, no widget.
pub fn spawn_speech_button(mut commands: Commands, windows: Query<(), With<PrimaryWindow>>) {
    if windows.single().is_err() {
        tracing::debug!("no primary window; speech widget stays inert");
        return;
    }
    let face = ButtonFace::for_state(SpeechState::Idle);

    commands
        .spawn((
            SpeechButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(24.0),
                bottom: Val::Px(24.0),
                padding: UiRect::axes(Val::Px(14.0), Val::Px(10.0)),
                column_gap: Val::Px(10.0),
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(face.background()),
        ))
        .with_children(|button| {
            button.spawn((
                SpeechIcon,
                Text::new(face.icon),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(INK),
            ));
            button.spawn((
                SpeechLabel,
                Text::new(face.label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(INK),
            ));
        });

    commands
        .spawn((
            SpeechNotice,
            Button,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(NOTICE_SCRIM),
            Visibility::Hidden,
        ))
        .with_children(|scrim| {
            scrim
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(20.0)),
                        ..default()
                    },
                    BackgroundColor(NOTICE_CARD),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(UNSUPPORTED_NOTICE),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(INK),
                    ));
                });
        });
}

fn notice_open(notice: &Query<&mut Visibility, With<SpeechNotice>>) -> bool {
    notice.iter().any(|v| *v != Visibility::Hidden)
}

/// Button press → toggle. While the notice is up the button does nothing.
pub fn handle_speech_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<SpeechButton>)>,
    mut toggle: ResMut<SpeechToggle>,
    mut synth: ResMut<SpeechSynth>,
    mut notice: Query<&mut Visibility, With<SpeechNotice>>,
) {
    let pressed = interactions.iter().any(|i| *i == Interaction::Pressed);
    if !pressed || notice_open(&notice) {
        return;
    }
    match toggle.press(&mut synth) {
        Ok(PressOutcome::Unsupported) => {
            tracing::warn!("text to speech unsupported on this platform");
            for mut v in &mut notice {
                *v = Visibility::Visible;
            }
        }
        Ok(PressOutcome::Requested(id)) => tracing::info!(utterance = id.0, "speech requested"),
        Ok(PressOutcome::Stopped) => tracing::info!("speech stopped"),
        Err(e) => tracing::warn!(error = %e, state = ?toggle.state(), "speech engine failed"),
    }
}

/// Clicking anywhere on the notice closes it.
pub fn dismiss_notice(
    mut q: Query<(&Interaction, &mut Visibility), (Changed<Interaction>, With<SpeechNotice>)>,
) {
    for (interaction, mut v) in &mut q {
        if *interaction == Interaction::Pressed {
            *v = Visibility::Hidden;
        }
    }
}

/// Feed engine start/end/error into the toggle.
pub fn pump_speech_notifications(mut synth: ResMut<SpeechSynth>, mut toggle: ResMut<SpeechToggle>) {
    let Some(engine) = synth.engine.as_mut() else {
        return;
    };
    for n in engine.drain_notifications() {
        if toggle.notify(n) {
            tracing::info!(utterance = n.utterance.0, kind = ?n.kind, state = ?toggle.state(), "speech state");
        } else {
            tracing::debug!(
                utterance = n.utterance.0,
                current = ?toggle.current().map(|c| c.0),
                kind = ?n.kind,
                "stale speech notification"
            );
        }
    }
}

/// Repaint icon, label and background from the toggle state.
pub fn sync_speech_button(
    toggle: Res<SpeechToggle>,
    mut button: Query<&mut BackgroundColor, With<SpeechButton>>,
    mut icon: Query<&mut Text, (With<SpeechIcon>, Without<SpeechLabel>)>,
    mut label: Query<&mut Text, (With<SpeechLabel>, Without<SpeechIcon>)>,
) {
    let face = ButtonFace::for_state(toggle.state());
    for mut bg in &mut button {
        bg.set_if_neq(BackgroundColor(face.background()));
    }
    for mut t in &mut icon {
        if t.0 != face.icon {
            t.0 = face.icon.to_string();
        }
    }
    for mut t in &mut label {
        if t.0 != face.label {
            t.0 = face.label.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::engine::testing::{Call, RecordingEngine};
    use crate::speech::engine::{NotificationKind, UtteranceId};

    #[test]
    fn faces_match_states() {
        let idle = ButtonFace::for_state(SpeechState::Idle);
        assert_eq!(idle.label, "Talk to my Resume");
        assert!(!idle.playing);
        let speaking = ButtonFace::for_state(SpeechState::Speaking);
        assert_eq!(speaking.label, "Stop AI Voice");
        assert!(speaking.playing);
        assert_ne!(idle.icon, speaking.icon);
    }

    fn widget_app(synth: SpeechSynth) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(synth)
            .init_resource::<SpeechToggle>()
            .add_systems(
                Update,
                (
                    handle_speech_button,
                    pump_speech_notifications,
                    sync_speech_button.run_if(resource_changed::<SpeechToggle>),
                )
                    .chain(),
            );
        app.world_mut().spawn((SpeechButton, Interaction::None, BackgroundColor(BUTTON_IDLE)));
        app.world_mut().spawn((SpeechLabel, Text::new("Talk to my Resume")));
        app.world_mut().spawn((SpeechNotice, Visibility::Hidden));
        app
    }

    fn press(app: &mut App) {
        let mut q = app
            .world_mut()
            .query_filtered::<&mut Interaction, With<SpeechButton>>();
        for mut i in q.iter_mut(app.world_mut()) {
            *i = Interaction::Pressed;
        }
        app.update();
        let mut q = app
            .world_mut()
            .query_filtered::<&mut Interaction, With<SpeechButton>>();
        for mut i in q.iter_mut(app.world_mut()) {
            *i = Interaction::None;
        }
    }

    fn label(app: &mut App) -> String {
        let mut q = app.world_mut().query_filtered::<&Text, With<SpeechLabel>>();
        q.iter(app.world()).map(|t| t.0.clone()).collect()
    }

    fn notice_visible(app: &mut App) -> bool {
        let mut q = app
            .world_mut()
            .query_filtered::<&Visibility, With<SpeechNotice>>();
        q.iter(app.world()).any(|v| *v == Visibility::Visible)
    }

    #[test]
    fn no_window_spawns_no_widget() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(crate::speech::SpeechPlugin);
        app.update();
        app.update();
        let mut q = app.world_mut().query_filtered::<Entity, With<SpeechButton>>();
        assert_eq!(q.iter(app.world()).count(), 0);
        let mut q = app.world_mut().query_filtered::<Entity, With<SpeechNotice>>();
        assert_eq!(q.iter(app.world()).count(), 0);
        assert_eq!(app.world().resource::<SpeechToggle>().state(), SpeechState::Idle);
    }

    #[test]
    fn label_repaints_only_when_the_toggle_changes() {
        let engine = RecordingEngine::default();
        let mut app = widget_app(SpeechSynth::new(engine.clone()));
        app.update();

        // a stray edit is left alone while the toggle is unchanged
        let mut q = app.world_mut().query_filtered::<&mut Text, With<SpeechLabel>>();
        for mut t in q.iter_mut(app.world_mut()) {
            t.0 = "edited".to_string();
        }
        app.update();
        assert_eq!(label(&mut app), "edited");

        press(&mut app);
        engine.push(UtteranceId(0), NotificationKind::Started);
        app.update();
        assert_eq!(label(&mut app), "Stop AI Voice");
    }

    #[test]
    fn unsupported_press_opens_notice() {
        let mut app = widget_app(SpeechSynth::unsupported());
        app.update();
        press(&mut app);
        assert!(notice_visible(&mut app));
        assert_eq!(app.world().resource::<SpeechToggle>().state(), SpeechState::Idle);
        assert_eq!(label(&mut app), "Talk to my Resume");
    }

    #[test]
    fn started_notification_flips_the_label() {
        let engine = RecordingEngine::default();
        let mut app = widget_app(SpeechSynth::new(engine.clone()));
        app.update();
        press(&mut app);
        assert_eq!(label(&mut app), "Talk to my Resume");

        engine.push(UtteranceId(0), NotificationKind::Started);
        app.update();
        assert_eq!(label(&mut app), "Stop AI Voice");

        engine.push(UtteranceId(0), NotificationKind::Ended);
        app.update();
        assert_eq!(label(&mut app), "Talk to my Resume");
    }

    #[test]
    fn press_press_stops_engine() {
        let engine = RecordingEngine::default();
        let mut app = widget_app(SpeechSynth::new(engine.clone()));
        app.update();
        press(&mut app);
        engine.push(UtteranceId(0), NotificationKind::Started);
        app.update();
        press(&mut app);
        assert_eq!(label(&mut app), "Talk to my Resume");
        assert_eq!(engine.calls().last(), Some(&Call::Cancel));
        assert!(engine.playing().is_none());
    }
}
