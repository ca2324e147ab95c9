pub mod protocol;

pub use protocol::{FramePacket, ProtocolLayout};
