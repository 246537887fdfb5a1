use strum_macros::Display;
use thiserror::Error;

/// Which transport primitive a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransportOp {
    #[strum(to_string = "read")]
    Read,
    #[strum(to_string = "write")]
    Write,
}

/// The primary error type for the `ddcci-rs` library.
///
/// Nothing here is fatal to the process: every variant is a recoverable
/// result the caller can log, retry at a higher level, or surface to a
/// user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdcError {
    /// The underlying I2C transport returned a nonzero status. The raw
    /// platform status code is surfaced verbatim.
    #[error("I2C {op} failed with status {status}")]
    Transport { op: TransportOp, status: i32 },

    /// The display explicitly reported that it does not implement the
    /// requested VCP feature. An expected failure mode, not a transport
    /// error.
    #[error("display does not support VCP feature {code:#04x}")]
    FeatureUnsupported { code: u8 },

    /// The display answered with a result code outside the known set.
    #[error("unrecognized VCP reply result code {code:#04x}")]
    UnrecognizedReply { code: u8 },

    /// A reply was shorter than the fixed offsets the decoder expects.
    #[error("reply too short: expected at least {expected} bytes, got {actual}")]
    ShortBuffer { expected: usize, actual: usize },
}
