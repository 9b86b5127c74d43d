pub mod trigger;

pub use trigger::{InputState, TriggerParser};
