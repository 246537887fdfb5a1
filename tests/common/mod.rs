//! Shared transport stubs for integration tests

// Allow dead code since this module is shared across multiple test
// files and not every helper is used in every file
#![allow(dead_code)]

use ddcci_rs::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Everything a scripted transport records and serves, behind a handle
/// the test keeps after the transport moves into the channel.
#[derive(Debug, Default)]
pub struct MockState {
    /// Every write issued: (register, frame bytes)
    pub writes: Vec<(u32, Vec<u8>)>,
    /// Every read issued: (register, requested length)
    pub reads: Vec<(u32, usize)>,
    /// Replies served to reads, front first
    pub read_queue: VecDeque<Vec<u8>>,
    /// Fail this many leading write calls with `write_fail_status`
    pub write_failures: u32,
    pub write_fail_status: i32,
    /// Nonzero fails every read with this status
    pub read_status: i32,
}

impl MockState {
    /// Frames whose opcode byte matches `op` (the byte after the length
    /// byte).
    pub fn frames_with_opcode(&self, op: u8) -> Vec<&Vec<u8>> {
        self.writes
            .iter()
            .map(|(_, frame)| frame)
            .filter(|frame| frame.get(1) == Some(&op))
            .collect()
    }
}

pub struct ScriptedTransport {
    state: Arc<Mutex<MockState>>,
}

impl ScriptedTransport {
    pub fn new() -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Transport for ScriptedTransport {
    fn read_block(&mut self, _chip_address: u32, register: u32, buf: &mut [u8]) -> i32 {
        let mut state = self.state.lock().unwrap();
        state.reads.push((register, buf.len()));
        if state.read_status != 0 {
            return state.read_status;
        }
        if let Some(reply) = state.read_queue.pop_front() {
            let n = reply.len().min(buf.len());
            buf[..n].copy_from_slice(&reply[..n]);
        }
        0
    }

    fn write_block(&mut self, _chip_address: u32, register: u32, data: &[u8]) -> i32 {
        let mut state = self.state.lock().unwrap();
        state.writes.push((register, data.to_vec()));
        if state.write_failures > 0 {
            state.write_failures -= 1;
            return state.write_fail_status;
        }
        0
    }
}

/// A stub display that serves a capability string in protocol-shaped
/// chunks, driven by the offset embedded in each request frame.
#[derive(Debug, Default)]
pub struct CapabilityState {
    pub capabilities: Vec<u8>,
    /// Never signal completion; serve filler chunks forever
    pub endless: bool,
    pub requests: Vec<usize>,
    offset: usize,
}

pub struct CapabilityTransport {
    state: Arc<Mutex<CapabilityState>>,
}

impl CapabilityTransport {
    pub fn new(capabilities: &[u8], endless: bool) -> (Self, Arc<Mutex<CapabilityState>>) {
        let state = Arc::new(Mutex::new(CapabilityState {
            capabilities: capabilities.to_vec(),
            endless,
            ..Default::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Transport for CapabilityTransport {
    fn read_block(&mut self, _chip_address: u32, _register: u32, buf: &mut [u8]) -> i32 {
        let state = self.state.lock().unwrap();
        let chunk = if state.endless {
            35
        } else {
            state
                .capabilities
                .len()
                .saturating_sub(state.offset)
                .min(35)
        };
        buf.fill(0);
        buf[0] = 0x6E;
        buf[1] = ((3 + chunk) as u8) | 0x80;
        if state.endless {
            buf[3..3 + chunk].fill(b'x');
        } else {
            buf[3..3 + chunk]
                .copy_from_slice(&state.capabilities[state.offset..state.offset + chunk]);
        }
        0
    }

    fn write_block(&mut self, _chip_address: u32, _register: u32, data: &[u8]) -> i32 {
        // Request frame: [length, 0xF3, offset hi, offset lo, checksum]
        let mut state = self.state.lock().unwrap();
        let offset = ((data[2] as usize) << 8) | data[3] as usize;
        state.requests.push(offset);
        state.offset = offset;
        0
    }
}

/// A well-formed 12-byte VCP feature reply.
pub fn vcp_reply(result: u8, code: u8, value_type: u8, max: u16, current: u16) -> Vec<u8> {
    vec![
        0x6E,
        0x88,
        0x02,
        result,
        code,
        value_type,
        (max >> 8) as u8,
        (max & 0xFF) as u8,
        (current >> 8) as u8,
        (current & 0xFF) as u8,
        0x00,
        0x00,
    ]
}
