use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// The closed set of known video input codes.
///
/// Codes outside the set stay representable through `Unknown`, just
/// without a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum InputSource {
    #[strum(to_string = "DisplayPort")]
    DisplayPort = 0x0F,
    #[strum(to_string = "HDMI")]
    Hdmi = 0x11,
    #[strum(to_string = "USB-C")]
    UsbC = 0x1B,
    #[strum(to_string = "unknown input")]
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// What an input switch actually did.
///
/// A switch to the already-active source performs no write at all:
/// redundant input writes can glitch the video link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SwitchOutcome {
    #[strum(to_string = "changed")]
    Changed,
    #[strum(to_string = "no change")]
    NoChange,
}
