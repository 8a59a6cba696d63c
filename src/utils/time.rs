use chrono::{DateTime, Local};

/// Minute-precision stamp shown in the "Loaded N rules at ..." status line.
pub fn load_stamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
