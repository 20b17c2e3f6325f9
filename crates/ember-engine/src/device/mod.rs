//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//!
//! `Gpu` is the explicit context handle the rest of the engine passes around;
//! nothing in the crate relies on ambient "current context" state.

mod gpu;
mod init;
mod surface;

pub use gpu::{describe_adapter, Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
