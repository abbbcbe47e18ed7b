//! Logical inputs.
//!
//! [`Input`] is the closed set of symbolic emulator controls a physical key or
//! axis can be bound to. The declaration order is the canonical order: it is
//! the order [`AssignmentManager::query`](crate::manager::AssignmentManager::query)
//! returns and the order a settings screen lists them in.
//!
//! ## Identifiers
//! Each input has a stable `SCREAMING_SNAKE_CASE` identifier (`"FAST_FORWARD"`)
//! used for persistence and by [`Display`](std::fmt::Display)/[`FromStr`].
//! Parsing is ASCII case-insensitive so hand-edited profiles still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A symbolic emulator control, independent of any physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Input {
    A,
    B,
    X,
    Y,
    Left,
    Right,
    Up,
    Down,
    L,
    R,
    Start,
    Select,
    /// Console lid open/close.
    Hinge,
    Pause,
    FastForward,
    Microphone,
    Reset,
    SwapScreens,
    QuickSave,
    QuickLoad,
    Rewind,
}

impl Input {
    /// Every logical input, in canonical order.
    pub const ALL: &'static [Input] = &[
        Input::A,
        Input::B,
        Input::X,
        Input::Y,
        Input::Left,
        Input::Right,
        Input::Up,
        Input::Down,
        Input::L,
        Input::R,
        Input::Start,
        Input::Select,
        Input::Hinge,
        Input::Pause,
        Input::FastForward,
        Input::Microphone,
        Input::Reset,
        Input::SwapScreens,
        Input::QuickSave,
        Input::QuickLoad,
        Input::Rewind,
    ];

    /// Number of logical inputs.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this input in [`Input::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable persistence identifier (e.g. `"QUICK_SAVE"`).
    pub fn id(self) -> &'static str {
        match self {
            Input::A => "A",
            Input::B => "B",
            Input::X => "X",
            Input::Y => "Y",
            Input::Left => "LEFT",
            Input::Right => "RIGHT",
            Input::Up => "UP",
            Input::Down => "DOWN",
            Input::L => "L",
            Input::R => "R",
            Input::Start => "START",
            Input::Select => "SELECT",
            Input::Hinge => "HINGE",
            Input::Pause => "PAUSE",
            Input::FastForward => "FAST_FORWARD",
            Input::Microphone => "MICROPHONE",
            Input::Reset => "RESET",
            Input::SwapScreens => "SWAP_SCREENS",
            Input::QuickSave => "QUICK_SAVE",
            Input::QuickLoad => "QUICK_LOAD",
            Input::Rewind => "REWIND",
        }
    }

    /// Human-friendly label for UIs.
    pub fn display_name(self) -> &'static str {
        match self {
            Input::A => "A",
            Input::B => "B",
            Input::X => "X",
            Input::Y => "Y",
            Input::Left => "Left",
            Input::Right => "Right",
            Input::Up => "Up",
            Input::Down => "Down",
            Input::L => "L",
            Input::R => "R",
            Input::Start => "Start",
            Input::Select => "Select",
            Input::Hinge => "Lid",
            Input::Pause => "Pause",
            Input::FastForward => "Fast Forward",
            Input::Microphone => "Microphone",
            Input::Reset => "Reset",
            Input::SwapScreens => "Swap Screens",
            Input::QuickSave => "Quick Save",
            Input::QuickLoad => "Quick Load",
            Input::Rewind => "Rewind",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string is not a known [`Input`] identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown input identifier: \"{0}\"")]
pub struct UnknownInput(pub String);

impl FromStr for Input {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Input::ALL
            .iter()
            .copied()
            .find(|input| input.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInput(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, input) in Input::ALL.iter().enumerate() {
            assert_eq!(input.index(), i, "{input} out of order");
        }
        assert_eq!(Input::COUNT, 21);
    }

    #[test]
    fn test_id_matches_serde_name() {
        for &input in Input::ALL {
            let json = serde_json::to_string(&input).unwrap();
            assert_eq!(json, format!("\"{}\"", input.id()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("fast_forward".parse::<Input>(), Ok(Input::FastForward));
        assert_eq!(" SWAP_SCREENS ".parse::<Input>(), Ok(Input::SwapScreens));
        assert_eq!(
            "TOUCHSCREEN".parse::<Input>(),
            Err(UnknownInput("TOUCHSCREEN".to_string()))
        );
        let err = "TOUCHSCREEN".parse::<Input>().unwrap_err();
        assert_eq!(err.to_string(), "unknown input identifier: \"TOUCHSCREEN\"");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Input::Hinge.display_name(), "Lid");
        assert_eq!(Input::QuickLoad.display_name(), "Quick Load");
    }
}
