/// Raw I2C-style block access to one display's control-channel
/// controller, supplied by the host platform.
///
/// The engine treats the transport as failable, slow (it inserts
/// settling delays before every call) and occasionally faulty (writes
/// are retried). Implementations return the platform status code
/// verbatim: zero means success, anything else is opaque and is carried
/// into [`DdcError::Transport`](crate::error::DdcError) unchanged.
///
/// One transport instance corresponds to one physical display. Calls are
/// issued strictly sequentially by the owning channel.
pub trait Transport {
    /// Read `buf.len()` bytes from `register` on `chip_address`.
    fn read_block(&mut self, chip_address: u32, register: u32, buf: &mut [u8]) -> i32;

    /// Write `data` to `register` on `chip_address`.
    fn write_block(&mut self, chip_address: u32, register: u32, data: &[u8]) -> i32;
}
