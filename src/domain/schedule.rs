use chrono::{DateTime, Days, FixedOffset, NaiveTime, Offset, TimeZone, Timelike, Utc};

pub const DEFAULT_SLOT_HOURS: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];
pub const TIMESTAMP_KEY_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Local forecast slots of a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSchedule {
    offset: FixedOffset,
    slot_hours: Vec<u32>,
}

impl ForecastSchedule {
    /// `slot_hours` must be non-empty and within `0..24`; they are sorted and deduplicated.
    pub fn new(offset: FixedOffset, mut slot_hours: Vec<u32>) -> Self {
        slot_hours.sort_unstable();
        slot_hours.dedup();
        Self { offset, slot_hours }
    }

    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// First slot strictly after the current local hour, or the earliest slot of the next day.
    pub fn next_slot(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let local = self.local_time(now);
        let hour = local.hour();
        let first = self.slot_hours.first().copied().unwrap_or(0);

        let (date, target_hour) = match self.slot_hours.iter().find(|&&slot| slot > hour) {
            Some(&slot) => (local.date_naive(), slot),
            None => (
                local
                    .date_naive()
                    .checked_add_days(Days::new(1))
                    .unwrap_or(local.date_naive()),
                first,
            ),
        };

        let time = NaiveTime::from_hms_opt(target_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        // A fixed offset has exactly one mapping for every local time.
        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .unwrap_or(local)
    }

    pub fn next_slot_key(&self, now: DateTime<Utc>) -> String {
        self.next_slot(now).format(TIMESTAMP_KEY_FORMAT).to_string()
    }
}

impl Default for ForecastSchedule {
    fn default() -> Self {
        Self::new(jakarta_offset(), DEFAULT_SLOT_HOURS.to_vec())
    }
}

/// UTC+07:00, Western Indonesian Time.
pub fn jakarta_offset() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| Utc.fix())
}
