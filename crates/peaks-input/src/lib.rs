//! Pointer input handling for the peaks renderer.

mod orbit;

pub use orbit::OrbitController;
