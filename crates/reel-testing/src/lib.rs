//! Testing utilities for Reel

pub mod assertions;
pub mod binder;
pub mod driver;
pub mod robot;

pub use assertions::*;
pub use binder::{BindLog, Binding, CountingFactory, RecordingBinder};
pub use driver::MockScrollDriver;
pub use robot::{ScrollRobot, DRAG_FRAME_TIME};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::binder::{BindLog, Binding, CountingFactory, RecordingBinder};
    pub use crate::driver::MockScrollDriver;
    pub use crate::robot::{ScrollRobot, DRAG_FRAME_TIME};
}
