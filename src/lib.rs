#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
use bevy::{
    color::Mix,
    prelude::{
        default, App, AssetServer, Camera2d, Color, Commands, DefaultPlugins,
        IntoScheduleConfigs, PluginGroup, Query, Res, Sprite, Startup, Transform, Update,
        Vec2, Window, WindowPlugin,
    },
};
use serde::Deserialize;
use std::path::Path;

pub mod components;
pub mod day_night_plugin;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;

pub use day_night_plugin::{DayNightPlugin, DayNightSystems};

use components::{PaletteSwapper, PaletteTransitionMode, PaletteUniforms, TimeState};
use resources::{DayNightSettings, TransitionConfig};

#[derive(Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub starting_state: TimeState,
    pub toggle_key: String,
    pub transition_to_night: f32,
    /// Omit to reuse `transition_to_night`.
    pub transition_to_day: Option<f32>,
}

impl TimeConfig {
    pub fn transition(&self) -> TransitionConfig {
        TransitionConfig {
            to_night: self.transition_to_night,
            to_day: self.transition_to_day,
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            starting_state: TimeState::Day,
            toggle_key: "Tab".into(),
            transition_to_night: 0.0,
            transition_to_day: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct SpriteConfig {
    pub image: String,
    pub day_palette: Option<String>,
    pub night_palette: Option<String>,
    pub use_sprite_swap: bool,
    pub night_sprite: Option<String>,
    pub transition_mode: PaletteTransitionMode,
    pub edge_softness: f32,
    pub row_steps: u32,
    pub position: [f32; 2],
}

impl Default for SpriteConfig {
    fn default() -> Self {
        let swapper = PaletteSwapper::default();
        Self {
            image: String::new(),
            day_palette: None,
            night_palette: None,
            use_sprite_swap: swapper.use_sprite_swap,
            night_sprite: None,
            transition_mode: swapper.transition_mode,
            edge_softness: swapper.edge_softness,
            row_steps: swapper.row_steps,
            position: [0.0, 0.0],
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub time: TimeConfig,
    pub graphics: GraphicsConfig,
    pub sprites: Vec<SpriteConfig>,
}

pub fn load_config(path: &Path) -> Config {
    let toml_str = match std::fs::read_to_string(path) {
        Ok(toml_str) => toml_str,
        Err(error) => {
            println!(
                "Failed to load configuration from {} with error: {}",
                path.to_string_lossy(),
                error
            );
            return Config::default();
        }
    };

    match toml::from_str(&toml_str) {
        Ok(config) => {
            println!("Read configuration from {}", path.to_string_lossy());
            config
        }
        Err(error) => {
            println!(
                "Failed to load configuration from {} with error: {}",
                path.to_string_lossy(),
                error
            );
            Config::default()
        }
    }
}

/// Opens a window showing the configured sprites and runs the day/night controller.
pub fn run_viewer(config: &Config) {
    let settings = DayNightSettings::from_config(&config.time).unwrap_or_else(|error| {
        let fallback = DayNightSettings {
            starting_state: config.time.starting_state,
            ..default()
        };
        log::warn!(
            "Invalid [time] settings: {}, falling back to {:?} with an instant swap",
            error,
            fallback.toggle_key
        );
        fallback
    });

    let sprites = config.sprites.clone();
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Day/Night Palette".into(),
                    resolution: (config.graphics.width as u32, config.graphics.height as u32)
                        .into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: "wgpu=error,naga=warn".to_string(),
                ..default()
            }),
    )
    .add_plugins(DayNightPlugin::new(settings))
    .add_systems(
        Startup,
        move |mut commands: Commands, asset_server: Res<AssetServer>| {
            spawn_viewer_scene(&mut commands, &asset_server, &sprites)
        },
    )
    .add_systems(Update, viewer_tint_system.after(DayNightSystems::Listeners));

    app.run();
}

fn spawn_viewer_scene(commands: &mut Commands, asset_server: &AssetServer, sprites: &[SpriteConfig]) {
    commands.spawn(Camera2d);

    for sprite in sprites {
        let swapper = PaletteSwapper {
            day_palette: sprite
                .day_palette
                .as_ref()
                .map(|path| asset_server.load(path.clone())),
            night_palette: sprite
                .night_palette
                .as_ref()
                .map(|path| asset_server.load(path.clone())),
            use_sprite_swap: sprite.use_sprite_swap,
            night_sprite: sprite
                .night_sprite
                .as_ref()
                .map(|path| asset_server.load(path.clone())),
            transition_mode: sprite.transition_mode,
            edge_softness: sprite.edge_softness,
            row_steps: sprite.row_steps,
        };

        commands.spawn((
            Sprite::from_image(asset_server.load(sprite.image.clone())),
            Transform::from_translation(Vec2::from(sprite.position).extend(0.0)),
            swapper,
        ));
    }

    log::info!("Spawned {} palette sprites", sprites.len());
}

const VIEWER_DAY_TINT: Color = Color::WHITE;
const VIEWER_NIGHT_TINT: Color = Color::srgb(0.25, 0.3, 0.55);

/// Stand-in for the palette material: tints sprites by their night weight.
fn viewer_tint_system(mut query: Query<(&PaletteUniforms, &mut Sprite)>) {
    for (uniforms, mut sprite) in query.iter_mut() {
        sprite.color = VIEWER_DAY_TINT.mix(&VIEWER_NIGHT_TINT, uniforms.is_night);
    }
}
