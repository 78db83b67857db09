//! Host capability surface for kptile.
//!
//! The tiling engine owns no windows, timers or input of its own. Everything
//! it needs from the window manager it is plugged into is expressed as a small
//! set of traits here, so that the engine can be driven by a real compositor
//! or by the in-memory [`mock::MockHost`] used in tests and the simulator.
#![warn(missing_docs)]

mod error;
mod ids;
mod ops;
mod window;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{Error, Result};
pub use ids::WindowId;
pub use ops::{AnimationPrefs, KeyBinder, ModalChooser, WindowHost};
pub use window::{MaxFlags, WindowState};
