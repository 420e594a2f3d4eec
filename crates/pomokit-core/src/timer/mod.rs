mod engine;
mod mode;

pub use engine::{format_mmss, next_mode, Tick, TimerEngine, TimerState};
pub use mode::Mode;
