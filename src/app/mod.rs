//! Application layer: wires the kernel to its persistence adapter.

mod workspace;

pub use workspace::Workspace;
