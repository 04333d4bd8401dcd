//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating and reconfiguring the Surface on resize
//! - acquiring frames and mapping surface errors to host actions

mod error;
mod frame;
mod gpu;
mod init;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
