use crate::constants::{
    CAP_MAX_BYTES, CAP_REPLY_DATA_OFFSET, CAP_REPLY_LENGTH_OFFSET, CAP_REPLY_OVERHEAD, CAP_REPLY_SIZE, DDC_CHIP_ADDRESS,
    DDC_DEFAULT_ADDRESS, DEFAULT_READ_DELAY, DEFAULT_WRITE_DELAY, DEFAULT_WRITE_RETRIES, OP_CAPABILITIES_REQUEST,
    OP_VCP_REQUEST, OP_VCP_SET, VCP_REPLY_SIZE,
};
use crate::error::{DdcError, TransportOp};
use crate::input::{InputSource, SwitchOutcome};
use crate::packet::{self, Packet};
use crate::transport::Transport;
use crate::vcp::{FeatureCode, VcpFeature, VcpValue};
use bytes::Bytes;
use num_enum::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Per-channel transaction parameters.
///
/// These are configuration, not protocol state, but they are
/// load-bearing: controllers silently drop frames issued faster than
/// their internal poll rate, so the delays must be tunable per display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// I2C chip address of the control-channel controller.
    pub chip_address: u32,
    /// Settling delay before every transport read.
    pub read_delay: Duration,
    /// Settling delay before every transport write attempt.
    pub write_delay: Duration,
    /// Total write attempt budget.
    pub write_retries: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            chip_address: DDC_CHIP_ADDRESS,
            read_delay: DEFAULT_READ_DELAY,
            write_delay: DEFAULT_WRITE_DELAY,
            write_retries: DEFAULT_WRITE_RETRIES,
        }
    }
}

/// The control channel of one physical display.
///
/// All operations take `&mut self`: the controller has no transaction
/// IDs, so two interleaved transactions on one channel would corrupt its
/// state. One channel per display; channels over disjoint transports may
/// run concurrently.
///
/// Every transport call is preceded by a mandatory settling delay. The
/// delay always elapses; there is no cancellation once a transaction has
/// started.
pub struct DdcChannel<T: Transport> {
    transport: T,
    config: ChannelConfig,
}

impl<T: Transport> DdcChannel<T> {
    /// A channel with the protocol-default timing parameters.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ChannelConfig::default())
    }

    /// A channel with per-display timing overrides, for controllers with
    /// different timing tolerances.
    pub fn with_config(transport: T, config: ChannelConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Read `len` reply bytes from the register `address`.
    ///
    /// Waits the read settling delay unconditionally, then issues one
    /// transport read. A failed read is never retried; the caller sees
    /// it immediately.
    pub async fn read(&mut self, address: u8, len: usize) -> Result<Bytes, DdcError> {
        tokio::time::sleep(self.config.read_delay).await;
        let mut buf = vec![0u8; len];
        let status = self
            .transport
            .read_block(self.config.chip_address, address as u32, &mut buf);
        if status != 0 {
            return Err(DdcError::Transport {
                op: TransportOp::Read,
                status,
            });
        }
        trace!(register = address, len, "read reply");
        Ok(Bytes::from(buf))
    }

    /// Write one frame, retrying within the configured budget.
    ///
    /// Each attempt is preceded by the write settling delay. Controllers
    /// intermittently NACK writes; the busy state clears on a fixed
    /// schedule, so the mitigation is a plain repeat, not backoff. The
    /// last status is surfaced if every attempt fails.
    pub async fn write(&mut self, frame: &Packet) -> Result<(), DdcError> {
        let raw = frame.to_bytes();
        let register = frame.address() as u32;
        let attempts = self.config.write_retries.max(1);
        let mut last_status = -1;
        for attempt in 1..=attempts {
            tokio::time::sleep(self.config.write_delay).await;
            let status = self
                .transport
                .write_block(self.config.chip_address, register, &raw);
            if status == 0 {
                trace!(register, len = raw.len(), attempt, "wrote frame");
                return Ok(());
            }
            warn!(register, status, attempt, "I2C write failed");
            last_status = status;
        }
        Err(DdcError::Transport {
            op: TransportOp::Write,
            status: last_status,
        })
    }

    /// Reassemble the display's capability string.
    ///
    /// Chunks are requested at the offset of the bytes accumulated so
    /// far; a reply carrying zero useful bytes terminates the loop.
    /// Stray non-UTF-8 bytes never fail the whole read.
    pub async fn read_capabilities(&mut self) -> Result<String, DdcError> {
        let mut acc: Vec<u8> = Vec::new();
        loop {
            let offset = acc.len();
            let request = Packet::encode(
                DDC_DEFAULT_ADDRESS,
                &[OP_CAPABILITIES_REQUEST, (offset >> 8) as u8, offset as u8],
                true,
            );
            self.write(&request).await?;
            let reply = self.read(DDC_DEFAULT_ADDRESS, CAP_REPLY_SIZE).await?;
            let total = packet::decode_length(&reply, CAP_REPLY_LENGTH_OFFSET)?;
            let useful = total.saturating_sub(CAP_REPLY_OVERHEAD);
            if useful == 0 {
                break;
            }
            let end = (CAP_REPLY_DATA_OFFSET + useful).min(reply.len());
            acc.extend_from_slice(&reply[CAP_REPLY_DATA_OFFSET..end]);
            if acc.len() >= CAP_MAX_BYTES {
                // Safety bound against a controller that never signals
                // completion.
                warn!(len = acc.len(), "capability read hit the ceiling");
                break;
            }
        }
        info!(len = acc.len(), "capability string assembled");
        Ok(String::from_utf8_lossy(&acc).into_owned())
    }

    /// Query one VCP feature.
    pub async fn get_vcp(&mut self, feature: VcpFeature) -> Result<VcpValue, DdcError> {
        let request = Packet::encode(
            feature.address,
            &[OP_VCP_REQUEST, u8::from(feature.code)],
            true,
        );
        self.write(&request).await?;
        let reply = self.read(feature.address, VCP_REPLY_SIZE).await?;
        let value = VcpValue::decode(&reply, feature.address)?;
        debug!(
            feature = %value.feature.code,
            current = value.current(),
            max = value.maximum(),
            "VCP read"
        );
        Ok(value)
    }

    /// Set one VCP feature. Fire-and-forget: the protocol's set
    /// operation has no reply, so only write-transport failure is
    /// reported.
    pub async fn set_vcp(&mut self, value: &VcpValue) -> Result<(), DdcError> {
        let request = Packet::encode(
            value.feature.address,
            &[
                OP_VCP_SET,
                u8::from(value.feature.code),
                value.current_high,
                value.current_low,
            ],
            true,
        );
        debug!(feature = %value.feature.code, value = value.current(), "VCP set");
        self.write(&request).await
    }

    /// The currently active video input, from the low current byte of
    /// the input-select feature.
    pub async fn current_input_source(&mut self) -> Result<InputSource, DdcError> {
        let value = self.get_vcp(VcpFeature::new(FeatureCode::InputSelect)).await?;
        Ok(InputSource::from_primitive(value.current_low))
    }

    /// Switch the active video input.
    ///
    /// Reads the current source first and skips the write when the
    /// target is already active.
    pub async fn set_input_source(&mut self, target: InputSource) -> Result<SwitchOutcome, DdcError> {
        let current = self.current_input_source().await?;
        if current == target {
            debug!(input = %target, "input already active");
            return Ok(SwitchOutcome::NoChange);
        }
        let feature = VcpFeature::new(FeatureCode::InputSelect);
        let value = VcpValue::request(feature, u8::from(target) as u16);
        self.set_vcp(&value).await?;
        info!(from = %current, to = %target, "input switched");
        Ok(SwitchOutcome::Changed)
    }
}
