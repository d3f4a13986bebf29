mod alarm;
mod engine;
mod format;
mod keypad;
mod stopwatch;

pub use alarm::{AlarmEngine, AlarmTime, ALARM_CHECK_PERIOD_MS};
pub use engine::{TimerEngine, TimerState, TIMER_TICK_PERIOD_MS};
pub use format::{format_centis, format_hms};
pub use keypad::{Keypad, TimeUnit, MAX_UNIT_DIGITS};
pub use stopwatch::{Stopwatch, STOPWATCH_TICK_PERIOD_MS};
