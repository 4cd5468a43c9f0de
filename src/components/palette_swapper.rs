use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::{DayNightError, PaletteSlot};

/// How the night palette sweeps across the sprite while blending.
///
/// The discriminant is the index passed to the palette shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteTransitionMode {
    #[default]
    Blend = 0,
    LeftToRight = 1,
    RightToLeft = 2,
    TopToBottom = 3,
    BottomToTop = 4,
    RowByRow = 5,
    CenterHorizontal = 6,
    CenterVertical = 7,
    CenterOutward = 8,
}

impl PaletteTransitionMode {
    pub fn shader_index(self) -> u32 {
        self as u32
    }
}

pub const MAX_EDGE_SOFTNESS: f32 = 0.5;
pub const MAX_ROW_STEPS: u32 = 64;

/// Per-sprite palette swap configuration.
///
/// Spawn this on a sprite entity; once both palettes are loaded the entity is
/// given a [`PaletteListener`] and [`PaletteUniforms`] that follow the time
/// controller.
#[derive(Component, Clone, Debug)]
pub struct PaletteSwapper {
    /// Required.
    pub day_palette: Option<Handle<Image>>,
    /// Required.
    pub night_palette: Option<Handle<Image>>,
    /// Sample `night_sprite` instead of the base sprite at night.
    pub use_sprite_swap: bool,
    pub night_sprite: Option<Handle<Image>>,
    pub transition_mode: PaletteTransitionMode,
    /// Width of the blend edge for wipe modes, 0.0 - 0.5.
    pub edge_softness: f32,
    /// Number of rows for [`PaletteTransitionMode::RowByRow`], 1 - 64.
    pub row_steps: u32,
}

impl Default for PaletteSwapper {
    fn default() -> Self {
        Self {
            day_palette: None,
            night_palette: None,
            use_sprite_swap: false,
            night_sprite: None,
            transition_mode: PaletteTransitionMode::Blend,
            edge_softness: 0.05,
            row_steps: 8,
        }
    }
}

impl PaletteSwapper {
    pub fn new(day_palette: Handle<Image>, night_palette: Handle<Image>) -> Self {
        Self {
            day_palette: Some(day_palette),
            night_palette: Some(night_palette),
            ..default()
        }
    }

    pub fn with_night_sprite(mut self, night_sprite: Handle<Image>) -> Self {
        self.use_sprite_swap = true;
        self.night_sprite = Some(night_sprite);
        self
    }

    pub fn with_transition_mode(mut self, transition_mode: PaletteTransitionMode) -> Self {
        self.transition_mode = transition_mode;
        self
    }

    fn palettes(&self) -> [(PaletteSlot, Option<&Handle<Image>>); 2] {
        [
            (PaletteSlot::Day, self.day_palette.as_ref()),
            (PaletteSlot::Night, self.night_palette.as_ref()),
        ]
    }

    /// Fails if `load_failed` reports either assigned palette as unloadable.
    pub fn check_palette_loads(
        &self,
        load_failed: impl Fn(&Handle<Image>) -> bool,
    ) -> Result<(), DayNightError> {
        for (slot, palette) in self.palettes() {
            if palette.is_some_and(|handle| load_failed(handle)) {
                return Err(DayNightError::PaletteLoadFailed(slot));
            }
        }
        Ok(())
    }

    /// Builds the shader parameters for this swapper.
    ///
    /// Fails if either palette is unassigned. Returns `Ok(None)` until both
    /// palette images have finished loading.
    pub fn resolve(&self, images: &Assets<Image>) -> Result<Option<PaletteUniforms>, DayNightError> {
        let day_palette = self
            .day_palette
            .as_ref()
            .ok_or(DayNightError::MissingPalette(PaletteSlot::Day))?;
        let night_palette = self
            .night_palette
            .as_ref()
            .ok_or(DayNightError::MissingPalette(PaletteSlot::Night))?;

        let (Some(day_image), Some(_)) = (images.get(day_palette), images.get(night_palette))
        else {
            return Ok(None);
        };

        Ok(Some(PaletteUniforms {
            is_night: 0.0,
            palette_size: day_image.width() as f32,
            transition_mode: self.transition_mode.shader_index(),
            edge_softness: self.edge_softness.clamp(0.0, MAX_EDGE_SOFTNESS),
            row_steps: self.row_steps.clamp(1, MAX_ROW_STEPS) as f32,
            sprite_swap: self.use_sprite_swap && self.night_sprite.is_some(),
        }))
    }
}

/// Parameters consumed by the palette swap material.
#[derive(Component, Reflect, Clone, Debug, PartialEq)]
#[reflect(Component)]
pub struct PaletteUniforms {
    /// Night weight: 0.0 = full day palette, 1.0 = full night palette.
    pub is_night: f32,
    pub palette_size: f32,
    pub transition_mode: u32,
    pub edge_softness: f32,
    pub row_steps: f32,
    pub sprite_swap: bool,
}

/// Night weight shared between a listener entity and its controller callbacks.
#[derive(Clone, Debug, Default)]
pub struct NightWeight(Arc<AtomicU32>);

impl NightWeight {
    pub fn new(weight: f32) -> Self {
        Self(Arc::new(AtomicU32::new(weight.to_bits())))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, weight: f32) {
        self.0.store(weight.to_bits(), Ordering::Relaxed);
    }
}

/// Attached once a [`PaletteSwapper`] has subscribed to the time controller.
#[derive(Component, Clone, Debug)]
pub struct PaletteListener {
    pub weight: NightWeight,
}

/// Marks a [`PaletteSwapper`] whose configuration was rejected.
#[derive(Component, Clone, Debug)]
pub struct InvalidPaletteSwapper(pub DayNightError);
