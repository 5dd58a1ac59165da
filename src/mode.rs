//! Display modes selectable over the command stream

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_PER_PANEL: &str = "per_panel";
const MODE_NAME_SINGLE_COLOR: &str = "single_color";
const MODE_NAME_TWO_COLOR_FADE: &str = "two_color_fade";
const MODE_NAME_TWO_COLOR_GRADIENT: &str = "two_color_gradient";

const MODE_ID_OFF: u8 = 0;
const MODE_ID_PER_PANEL: u8 = 1;
const MODE_ID_SINGLE_COLOR: u8 = 2;
const MODE_ID_TWO_COLOR_FADE: u8 = 3;
const MODE_ID_TWO_COLOR_GRADIENT: u8 = 4;

/// Number of selectable modes
pub const MODE_COUNT: u8 = 5;

/// How the animation buffer is derived from the stored colors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayMode {
    /// Every panel dark
    #[default]
    Off = MODE_ID_OFF,
    /// Each panel shows its own color
    PerPanelColor = MODE_ID_PER_PANEL,
    /// All panels show effect color 0
    SingleColor = MODE_ID_SINGLE_COLOR,
    /// Panels slide back and forth over a ramp between effect colors 1 and 2
    TwoColorFade = MODE_ID_TWO_COLOR_FADE,
    /// Static ramp from effect color 1 on the first panel to 2 on the last
    TwoColorGradient = MODE_ID_TWO_COLOR_GRADIENT,
}

impl DisplayMode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_OFF => Self::Off,
            MODE_ID_PER_PANEL => Self::PerPanelColor,
            MODE_ID_SINGLE_COLOR => Self::SingleColor,
            MODE_ID_TWO_COLOR_FADE => Self::TwoColorFade,
            MODE_ID_TWO_COLOR_GRADIENT => Self::TwoColorGradient,
            _ => return None,
        })
    }

    /// Like [`DisplayMode::from_raw`], but unknown values fall back to `Off`
    pub fn from_raw_or_off(value: u8) -> Self {
        Self::from_raw(value).unwrap_or(Self::Off)
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::PerPanelColor => MODE_NAME_PER_PANEL,
            Self::SingleColor => MODE_NAME_SINGLE_COLOR,
            Self::TwoColorFade => MODE_NAME_TWO_COLOR_FADE,
            Self::TwoColorGradient => MODE_NAME_TWO_COLOR_GRADIENT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_OFF => Some(Self::Off),
            MODE_NAME_PER_PANEL => Some(Self::PerPanelColor),
            MODE_NAME_SINGLE_COLOR => Some(Self::SingleColor),
            MODE_NAME_TWO_COLOR_FADE => Some(Self::TwoColorFade),
            MODE_NAME_TWO_COLOR_GRADIENT => Some(Self::TwoColorGradient),
            _ => None,
        }
    }

    /// Returns if the mode is animated by the clock
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::TwoColorFade)
    }
}
