//! Window/recycling engine for virtualized lists.

mod config;
mod item;
mod loop_policy;
mod viewport;
mod window;

pub use config::{ItemTemplate, LayoutConfig, DEFAULT_OVERSCAN_MULTIPLE};
pub use item::{ItemBinder, LayoutItem, LayoutStats};
pub use loop_policy::LoopPolicy;
pub use viewport::{ViewportGeometry, DEFAULT_ITEM_SIZE_ESTIMATE};
pub use window::{RecyclerLayout, ScrollDirection};
