use crate::color::{BLACK, Rgbw, rgbw};
use crate::command::EFFECT_COLORS;
use crate::engine::ColorEngine;
use crate::mode::DisplayMode;
use crate::receiver::{CommandReceiver, ReceiverState};
use crate::shared::{MainContext, SharedState};
use crate::store::{Changes, ColorStore};
use crate::transmitter::SweepError;
use crate::{BoosterPort, ByteSource};

/// Panel color preset of the reference installation: dim white
pub const PRESET_PANEL_COLOR: Rgbw = rgbw(0, 0, 0, 50);

/// Effect color presets of the reference installation, in slot order
pub const PRESET_EFFECT_COLORS: [Rgbw; EFFECT_COLORS] = [
    rgbw(10, 0, 10, 0),
    rgbw(0, 0, 10, 0),
    rgbw(0, 10, 0, 0),
];

/// Configuration for the controller
///
/// The default starts dark; [`ControllerConfig::preset`] starts with the
/// colors the reference installation ships with.
#[derive(Debug, Clone)]
pub struct ControllerConfig<const PANELS: usize> {
    /// Mode shown after startup
    pub mode: DisplayMode,
    /// Panel colors before the first command sets them
    pub panel_colors: [Rgbw; PANELS],
    /// Effect colors before the first command sets them
    pub effect_colors: [Rgbw; EFFECT_COLORS],
}

impl<const PANELS: usize> ControllerConfig<PANELS> {
    pub const fn preset() -> Self {
        Self {
            mode: DisplayMode::Off,
            panel_colors: [PRESET_PANEL_COLOR; PANELS],
            effect_colors: PRESET_EFFECT_COLORS,
        }
    }
}

impl<const PANELS: usize> Default for ControllerConfig<PANELS> {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Off,
            panel_colors: [BLACK; PANELS],
            effect_colors: [BLACK; EFFECT_COLORS],
        }
    }
}

/// What one [`Controller::poll`] step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Change flags consumed by this step
    pub changes: Changes,
    /// A sweep was started from the main loop
    pub sweep_started: bool,
}

/// Main loop orchestrator
///
/// Decodes the control stream, keeps the color store, re-renders the
/// animation buffer on change and decides how the result reaches the panels:
/// static modes start one sweep directly, the fade mode hands over to the
/// animation clock.
pub struct Controller<
    'a,
    P: BoosterPort,
    const PANELS: usize,
    const LEDS_PER_PANEL: usize,
    const BUFFER_LEN: usize,
> {
    // External dependencies
    shared: MainContext<'a, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>,

    // Internal state
    receiver: CommandReceiver<PANELS>,
    store: ColorStore<PANELS>,
    engine: ColorEngine<PANELS, BUFFER_LEN>,
    sweep_pending: bool,
}

impl<'a, P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    Controller<'a, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    pub fn new(
        shared: &'a SharedState<P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>,
        config: &ControllerConfig<PANELS>,
    ) -> Self {
        Self {
            shared: shared.main(),
            receiver: CommandReceiver::new(),
            store: ColorStore::new(config.mode, config.panel_colors, config.effect_colors),
            engine: ColorEngine::new(),
            sweep_pending: false,
        }
    }

    /// One main loop iteration
    ///
    /// Consumes at most one byte from `source`. Call this continuously.
    pub fn poll<S: ByteSource>(&mut self, source: &mut S) -> PollOutcome {
        if let Some(command) = self.receiver.poll(source) {
            self.store.apply(command);
        }

        let changes = self.store.take_changes();
        if changes.any() {
            self.refresh();
        }

        PollOutcome {
            changes,
            sweep_started: self.process_pending_sweep(),
        }
    }

    /// Render, publish and route the new buffer
    fn refresh(&mut self) {
        let frame = self.engine.render(&self.store);
        self.shared.publish(frame);

        let animated = self.store.mode().is_animated();
        if !animated {
            self.shared.reset_offset();
        }
        self.shared.set_clock_enabled(animated);
        self.sweep_pending = !animated;
    }

    /// Start the requested static sweep once the transmitter is idle
    ///
    /// Returns if a sweep was started.
    fn process_pending_sweep(&mut self) -> bool {
        if !self.sweep_pending {
            return false;
        }
        match self.shared.kickoff_at_origin() {
            Ok(()) => {
                self.sweep_pending = false;
                true
            }
            Err(SweepError::Busy) => false,
        }
    }

    pub const fn store(&self) -> &ColorStore<PANELS> {
        &self.store
    }

    pub const fn mode(&self) -> DisplayMode {
        self.store.mode()
    }

    pub const fn receiver_state(&self) -> ReceiverState {
        self.receiver.state()
    }

    /// Returns if a static sweep is waiting for the transmitter
    pub const fn is_sweep_pending(&self) -> bool {
        self.sweep_pending
    }

    pub const fn buffer(&self) -> &[Rgbw; BUFFER_LEN] {
        self.engine.buffer()
    }
}
