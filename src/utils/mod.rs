//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller for interactive viewing
//! - [`Timer`]: frame timing from animation frame timestamps
//! - [`logging`]: console logger setup on `wasm32`

pub mod logging;
pub mod orbit_control;
pub mod time;

pub use orbit_control::OrbitControls;
pub use time::Timer;
