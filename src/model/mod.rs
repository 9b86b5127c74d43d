pub mod category;
pub mod config;
pub mod item;

pub use category::*;
pub use config::*;
pub use item::*;
