// Protocol constants for DDC/CI

use std::time::Duration;

/// I2C chip address of the display's DDC/CI controller
pub const DDC_CHIP_ADDRESS: u32 = 0x37;

/// Default per-command protocol address (host to display)
pub const DDC_DEFAULT_ADDRESS: u8 = 0x51;

/// Seed byte folded into every frame checksum
pub const DDC_CHECKSUM_SEED: u8 = 0x6E;

/// VCP opcode: request the value of a feature
pub const OP_VCP_REQUEST: u8 = 0x01;

/// VCP opcode: set the value of a feature
pub const OP_VCP_SET: u8 = 0x03;

/// Opcode: request a capability string chunk at an offset
pub const OP_CAPABILITIES_REQUEST: u8 = 0xF3;

/// Size of a VCP feature reply read (bytes)
pub const VCP_REPLY_SIZE: usize = 12;

/// Offset of the result code in a VCP feature reply
pub const VCP_REPLY_RESULT_OFFSET: usize = 3;

/// Offset of the (code, type, max, current) fields in a VCP feature reply
pub const VCP_REPLY_DATA_OFFSET: usize = 4;

/// Bytes of a VCP feature reply the decoder actually indexes
pub const VCP_REPLY_USED: usize = 10;

/// VCP result code: success
pub const VCP_RESULT_OK: u8 = 0x00;

/// VCP result code: feature not supported by the display
pub const VCP_RESULT_UNSUPPORTED: u8 = 0x01;

/// Size of a capability reply read (bytes)
pub const CAP_REPLY_SIZE: usize = 38;

/// Offset of the embedded length field in a capability reply
pub const CAP_REPLY_LENGTH_OFFSET: usize = 1;

/// Protocol bytes counted by the capability length field but not part of the chunk
pub const CAP_REPLY_OVERHEAD: usize = 3;

/// Offset of the first chunk byte in a capability reply
pub const CAP_REPLY_DATA_OFFSET: usize = 3;

/// Hard ceiling on accumulated capability bytes, in case a controller
/// never signals completion
pub const CAP_MAX_BYTES: usize = 512;

/// Default settling delay before a transport read
pub const DEFAULT_READ_DELAY: Duration = Duration::from_millis(50);

/// Default settling delay before each transport write attempt
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_millis(50);

/// Default write attempt budget. Controllers intermittently NACK writes;
/// a repeat after the settling delay is the documented mitigation.
pub const DEFAULT_WRITE_RETRIES: u32 = 2;
