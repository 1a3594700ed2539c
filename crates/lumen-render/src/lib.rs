//! GPU mirroring for CPU-side settings
//!
//! Fixed-layout constant buffers: 4-byte field encodings ([`Bool32`] for
//! flags), a generic uniform [`ConstantBuffer`] visible to graphics and
//! compute, and plain buffer helpers.

pub mod buffer;
pub mod constants;

pub use buffer::{create_uniform_buffer, update_uniform_buffer};
pub use constants::{Bool32, ConstantBuffer};
