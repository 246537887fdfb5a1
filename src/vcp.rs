use crate::constants::{DDC_DEFAULT_ADDRESS, VCP_REPLY_RESULT_OFFSET, VCP_REPLY_USED, VCP_RESULT_OK, VCP_RESULT_UNSUPPORTED};
use crate::error::DdcError;
use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// The fixed catalog of known VCP feature codes.
///
/// Codes outside the catalog decode to `Unknown` carrying the raw byte,
/// so no reply is ever silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum FeatureCode {
    #[strum(to_string = "brightness")]
    Brightness = 0x10,
    #[strum(to_string = "contrast")]
    Contrast = 0x12,
    #[strum(to_string = "input select")]
    InputSelect = 0x60,
    #[strum(to_string = "audio volume")]
    AudioVolume = 0x62,
    #[strum(to_string = "audio mute")]
    AudioMute = 0x8D,
    #[strum(to_string = "power mode")]
    PowerMode = 0xD6,
    #[strum(to_string = "unknown feature")]
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A controllable display attribute: a feature code plus the protocol
/// address it is exchanged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VcpFeature {
    pub code: FeatureCode,
    pub address: u8,
}

impl VcpFeature {
    /// A feature at the default protocol address.
    pub fn new(code: FeatureCode) -> Self {
        Self {
            code,
            address: DDC_DEFAULT_ADDRESS,
        }
    }

    pub fn with_address(code: FeatureCode, address: u8) -> Self {
        Self { code, address }
    }

    /// Resolve a raw (code, address) pair against the catalog. Unknown
    /// codes come back as `FeatureCode::Unknown(code)`.
    pub fn resolve(code: u8, address: u8) -> Self {
        Self {
            code: FeatureCode::from_primitive(code),
            address,
        }
    }
}

/// Value-type tag carried in a VCP feature reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum VcpValueType {
    #[strum(to_string = "continuous")]
    Continuous = 0x00,
    #[strum(to_string = "momentary")]
    Momentary = 0x01,
    #[strum(to_string = "table")]
    Table = 0x02,
    #[strum(to_string = "unknown type")]
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// The decoded reply to a VCP feature query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VcpValue {
    pub feature: VcpFeature,
    pub value_type: VcpValueType,
    pub max_high: u8,
    pub max_low: u8,
    pub current_high: u8,
    pub current_low: u8,
}

impl VcpValue {
    /// Decode a raw feature reply read at `address`.
    ///
    /// The feature is re-resolved from the reply's own code byte rather
    /// than trusted from the caller's request, so a reply answering a
    /// different attribute than asked still decodes faithfully.
    pub fn decode(reply: &[u8], address: u8) -> Result<Self, DdcError> {
        if reply.len() < VCP_REPLY_USED {
            return Err(DdcError::ShortBuffer {
                expected: VCP_REPLY_USED,
                actual: reply.len(),
            });
        }
        match reply[VCP_REPLY_RESULT_OFFSET] {
            VCP_RESULT_OK => {}
            VCP_RESULT_UNSUPPORTED => {
                return Err(DdcError::FeatureUnsupported { code: reply[4] });
            }
            code => return Err(DdcError::UnrecognizedReply { code }),
        }
        Ok(Self {
            feature: VcpFeature::resolve(reply[4], address),
            value_type: VcpValueType::from_primitive(reply[5]),
            max_high: reply[6],
            max_low: reply[7],
            current_high: reply[8],
            current_low: reply[9],
        })
    }

    /// Build a value for a set operation. Only the feature and the
    /// current bytes are transmitted; type and maximum are placeholders.
    pub fn request(feature: VcpFeature, value: u16) -> Self {
        Self {
            feature,
            value_type: VcpValueType::Unknown(0),
            max_high: 0,
            max_low: 0,
            current_high: (value >> 8) as u8,
            current_low: (value & 0xFF) as u8,
        }
    }

    pub fn maximum(&self) -> u16 {
        u16::from_be_bytes([self.max_high, self.max_low])
    }

    pub fn current(&self) -> u16 {
        u16::from_be_bytes([self.current_high, self.current_low])
    }
}
