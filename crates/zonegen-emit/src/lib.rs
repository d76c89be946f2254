//! Multi-stream emitter (component F): walks a resolved [`zonegen_core::Model`]
//! and produces the four C++ output streams (header, proxy, stub, stub
//! header).

pub mod emit;
pub mod error;
pub mod protocol;
pub mod render;
pub mod slot;
pub mod writer;

pub use emit::{EmitOptions, emit_model};
pub use error::EmitError;
pub use protocol::{Encoding, ProtocolVersion};
pub use slot::Slot;
pub use writer::{Stream, Streams, Writer};
