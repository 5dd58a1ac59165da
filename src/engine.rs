//! Animation buffer computation.

use crate::color::{BLACK, Rgbw, fill_linear};
use crate::command::EffectColorSlot;
use crate::geometry::Geometry;
use crate::mode::DisplayMode;
use crate::store::ColorStore;

/// Renders the animation buffer from the stored colors
///
/// The engine owns the shadow copy of the buffer. It is only ever touched
/// from the main loop; interrupt contexts see it after
/// [`crate::MainContext::publish`].
#[derive(Debug, Clone)]
pub struct ColorEngine<const PANELS: usize, const BUFFER_LEN: usize> {
    shadow: [Rgbw; BUFFER_LEN],
}

impl<const PANELS: usize, const BUFFER_LEN: usize> Default for ColorEngine<PANELS, BUFFER_LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const PANELS: usize, const BUFFER_LEN: usize> ColorEngine<PANELS, BUFFER_LEN> {
    pub const fn new() -> Self {
        let () = Geometry::<PANELS, 1, BUFFER_LEN>::CHECK;
        Self {
            shadow: [BLACK; BUFFER_LEN],
        }
    }

    /// Last rendered buffer
    pub const fn buffer(&self) -> &[Rgbw; BUFFER_LEN] {
        &self.shadow
    }

    /// Recompute the whole buffer for the store's current mode
    ///
    /// Modes that only light the first `PANELS` entries leave the tail
    /// untouched; it is never read while such a mode is active.
    pub fn render(&mut self, store: &ColorStore<PANELS>) -> &[Rgbw; BUFFER_LEN] {
        let start = store.effect(EffectColorSlot::RampStart);
        let end = store.effect(EffectColorSlot::RampEnd);

        match store.mode() {
            DisplayMode::Off => self.shadow.fill(BLACK),
            DisplayMode::PerPanelColor => {
                self.shadow[..PANELS].copy_from_slice(store.panels());
            }
            DisplayMode::SingleColor => {
                self.shadow[..PANELS].fill(store.effect(EffectColorSlot::Single));
            }
            DisplayMode::TwoColorFade => {
                fill_linear(&mut self.shadow, start, end, BUFFER_LEN);
            }
            DisplayMode::TwoColorGradient => {
                // A single panel has no span; it shows the start color.
                fill_linear(&mut self.shadow[..PANELS], start, end, PANELS - 1);
            }
        }

        &self.shadow
    }
}
