//! Time-of-day snapshot delivered by the clock source.

/// Seconds in a day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Wall-clock reading consumed by one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeReading {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeReading {
    /// Midnight.
    pub const MIDNIGHT: Self = Self { hours: 0, minutes: 0, seconds: 0 };

    /// Create a reading.
    ///
    /// # Panics
    /// If any field is out of range. Clock sources hand over validated values,
    /// so a bad reading is a programming error.
    pub const fn new(
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Self {
        assert!(hours < 24, "hours out of range");
        assert!(minutes < 60, "minutes out of range");
        assert!(seconds < 60, "seconds out of range");
        Self { hours, minutes, seconds }
    }

    /// Build a reading from seconds since midnight (wraps past one day).
    pub const fn from_seconds_of_day(total: u32) -> Self {
        let total = total % SECONDS_PER_DAY;
        Self {
            hours: (total / 3600) as u8,
            minutes: (total / 60 % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Seconds since midnight.
    pub const fn seconds_of_day(self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// The reading `seconds` later, wrapping at midnight.
    pub const fn advanced_by(
        self,
        seconds: u32,
    ) -> Self {
        Self::from_seconds_of_day(self.seconds_of_day() + seconds % SECONDS_PER_DAY)
    }

    /// Units that differ from `previous`, as the tick service reports them.
    pub fn units_changed(
        self,
        previous: Self,
    ) -> TimeUnits {
        let mut units = TimeUnits::NONE;
        if self.seconds != previous.seconds {
            units = units | TimeUnits::SECOND;
        }
        if self.minutes != previous.minutes {
            units = units | TimeUnits::MINUTE;
        }
        if self.hours != previous.hours {
            units = units | TimeUnits::HOUR;
        }
        units
    }
}

/// Bitmask of time units that changed between two ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);

    /// Check whether all units in `other` are set.
    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }
}

impl core::ops::BitOr for TimeUnits {
    type Output = Self;

    fn bitor(
        self,
        rhs: Self,
    ) -> Self {
        Self(self.0 | rhs.0)
    }
}
