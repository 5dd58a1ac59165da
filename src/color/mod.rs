mod gradient;

pub use gradient::{fill_linear, lerp_channel};
use smart_leds::{RGBW, White};

/// Drive intensities of the four LED dies in a panel
pub type Rgbw = RGBW<u8>;

/// All channels off
pub const BLACK: Rgbw = rgbw(0, 0, 0, 0);

/// Build a color from its four channel values
pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Rgbw {
    Rgbw { r, g, b, a: White(w) }
}

/// A single color channel as seen by the LED driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Green,
    Red,
    Blue,
    White,
}

/// Order in which the booster expects the channels of one LED
pub const TRANSMIT_ORDER: [ColorChannel; 4] = [
    ColorChannel::Green,
    ColorChannel::Red,
    ColorChannel::Blue,
    ColorChannel::White,
];

impl ColorChannel {
    /// Read this channel out of a color
    pub const fn of(self, color: Rgbw) -> u8 {
        match self {
            Self::Green => color.g,
            Self::Red => color.r,
            Self::Blue => color.b,
            Self::White => color.a.0,
        }
    }

    /// Channel transmitted after this one
    ///
    /// Wraps from white back to green.
    pub const fn next(self) -> Self {
        match self {
            Self::Green => Self::Red,
            Self::Red => Self::Blue,
            Self::Blue => Self::White,
            Self::White => Self::Green,
        }
    }
}
