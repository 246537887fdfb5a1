use crate::constants::DDC_CHECKSUM_SEED;
use crate::error::DdcError;
use bytes::Bytes;
use modular_bitfield::prelude::*;

/// The DDC length/flag byte: a 7-bit length with the high marker bit that
/// tags the frame as DDC/CI. The length counts the whole wire buffer
/// (length byte, payload and checksum when present).
#[bitfield(bytes = 1)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthByte {
    pub length: B7,
    pub marker: bool,
}

/// XOR-fold checksum over the addressed frame: seed, protocol address,
/// length byte, then every payload byte.
pub fn checksum(address: u8, length_byte: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(DDC_CHECKSUM_SEED ^ address ^ length_byte, |acc, b| acc ^ b)
}

/// A single DDC/CI frame: destination protocol address, payload, and an
/// optional trailing checksum.
///
/// Packets are immutable once built; the checksum is computed and
/// appended exactly once, at construction. They live for one transaction
/// and are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    address: u8,
    payload: Bytes,
    checksum: Option<u8>,
}

impl Packet {
    /// Build an outgoing frame for `address` around `payload`.
    pub fn encode(address: u8, payload: &[u8], with_checksum: bool) -> Self {
        let payload = Bytes::copy_from_slice(payload);
        let checksum = with_checksum.then(|| {
            let length_byte = Self::length_byte_for(payload.len(), true);
            checksum(address, length_byte, &payload)
        });
        Self {
            address,
            payload,
            checksum,
        }
    }

    /// Parse the wire form produced by [`Packet::encode`], verifying the
    /// trailing checksum.
    pub fn parse(address: u8, raw: &[u8]) -> Result<Self, DdcError> {
        if raw.is_empty() {
            return Err(DdcError::ShortBuffer {
                expected: 1,
                actual: 0,
            });
        }
        let total = decode_length(raw, 0)?;
        if raw.len() < total || total < 2 {
            return Err(DdcError::ShortBuffer {
                expected: total.max(2),
                actual: raw.len(),
            });
        }
        let payload = Bytes::copy_from_slice(&raw[1..total - 1]);
        let expected = checksum(address, raw[0], &payload);
        let found = raw[total - 1];
        if found != expected {
            // A corrupted frame is indistinguishable from an unknown
            // reply; surface the byte we could not account for.
            return Err(DdcError::UnrecognizedReply { code: found });
        }
        Ok(Self {
            address,
            payload,
            checksum: Some(found),
        })
    }

    fn length_byte_for(payload_len: usize, with_checksum: bool) -> u8 {
        let total = 1 + payload_len + usize::from(with_checksum);
        LengthByte::new()
            .with_length(total as u8)
            .with_marker(true)
            .into_bytes()[0]
    }

    /// Destination protocol address. Carried next to the frame, not
    /// inside it: the transaction engine uses it as the register offset.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }

    pub fn length_byte(&self) -> u8 {
        Self::length_byte_for(self.payload.len(), self.checksum.is_some())
    }

    pub fn checksum(&self) -> Option<u8> {
        self.checksum
    }

    /// Wire form handed to the transport: length byte, payload, checksum.
    pub fn to_bytes(&self) -> Bytes {
        let mut raw = Vec::with_capacity(2 + self.payload.len());
        raw.push(self.length_byte());
        raw.extend_from_slice(&self.payload);
        if let Some(sum) = self.checksum {
            raw.push(sum);
        }
        Bytes::from(raw)
    }
}

/// Extract a masked length field at `offset` in a raw reply buffer.
///
/// The protocol embeds a second length field inside VCP and capability
/// replies; both carry the same high marker bit as outgoing frames.
pub fn decode_length(raw: &[u8], offset: usize) -> Result<usize, DdcError> {
    let byte = *raw.get(offset).ok_or(DdcError::ShortBuffer {
        expected: offset + 1,
        actual: raw.len(),
    })?;
    Ok(LengthByte::from_bytes([byte]).length() as usize)
}
