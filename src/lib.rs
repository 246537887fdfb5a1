pub mod channel;
pub mod constants;
pub mod error;
pub mod input;
pub mod packet;
pub mod transport;
pub mod vcp;


// Re-export the channel and the types most callers need
pub use channel::{ChannelConfig, DdcChannel};
pub use error::{DdcError, TransportOp};
pub use input::{InputSource, SwitchOutcome};
pub use packet::Packet;
pub use transport::Transport;
pub use vcp::{FeatureCode, VcpFeature, VcpValue, VcpValueType};
