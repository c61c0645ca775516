use bevy::prelude::*;

/// Light/dark page theme. Read by the network renderer and the clear colour.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stroke colour for a network line. Opacity outside [0, 1] is clamped,
    /// so far pairs with a negative fade draw fully transparent.
    pub fn link_color(self, opacity: f32) -> Color {
        let alpha = opacity.clamp(0.0, 1.0);
        match self {
            Theme::Dark => Color::srgba(1.0, 1.0, 1.0, alpha),
            Theme::Light => Color::srgba(0.0, 0.0, 0.0, alpha),
        }
    }

    pub fn background(self) -> Color {
        match self {
            Theme::Dark => Color::srgb(0.07, 0.07, 0.09),
            Theme::Light => Color::srgb(0.98, 0.97, 0.94),
        }
    }
}

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Theme>()
            .insert_resource(ClearColor(Theme::default().background()))
            .add_systems(
                Update,
                (
                    toggle_theme_on_key,
                    apply_clear_color.run_if(resource_changed::<Theme>),
                )
                    .chain(),
            );
    }
}

/// `T` flips between light and dark.
pub fn toggle_theme_on_key(keys: Res<ButtonInput<KeyCode>>, mut theme: ResMut<Theme>) {
    if keys.just_pressed(KeyCode::KeyT) {
        *theme = theme.toggled();
        tracing::info!(theme = ?*theme, "theme switched");
    }
}

pub fn apply_clear_color(theme: Res<Theme>, mut clear: ResMut<ClearColor>) {
    clear.0 = theme.background();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_color_follows_theme() {
        assert_eq!(Theme::Dark.link_color(1.0), Color::srgba(1.0, 1.0, 1.0, 1.0));
        assert_eq!(Theme::Light.link_color(0.5), Color::srgba(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn negative_opacity_is_transparent() {
        assert_eq!(Theme::Light.link_color(-3.2).alpha(), 0.0);
    }

    #[test]
    fn toggled_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
