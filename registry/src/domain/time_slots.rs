//! Default appointment slot grid.

use chrono::NaiveTime;

const OPENING_HOUR: u32 = 9;
const CLOSING_HOUR: u32 = 17;
const LUNCH_HOUR: u32 = 12;
const SLOT_MINUTES: u32 = 30;
const SLOTS_PER_HOUR: u32 = 2;

/// The default half-hour slot grid for a working day: 09:00 inclusive to
/// 17:00 exclusive, with the 12:00–13:00 lunch hour removed.
pub fn default_time_slots() -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    for hour in OPENING_HOUR..CLOSING_HOUR {
        if hour == LUNCH_HOUR {
            continue;
        }
        for step in 0..SLOTS_PER_HOUR {
            if let Some(slot) = NaiveTime::from_hms_opt(hour, step * SLOT_MINUTES, 0) {
                slots.push(slot);
            }
        }
    }
    slots
}
