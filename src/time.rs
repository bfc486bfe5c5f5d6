/// A broken-down local time as recorded by the engine: eight little-endian
/// `u16` fields in file order.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WinSystemTime {
    pub year: u16,
    pub month: u16,
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub millisecond: u16,
}

impl WinSystemTime {
    /// Converts to seconds since the Unix epoch via the platform's own
    /// `mktime`, i.e. interpreted as local time.
    ///
    /// Whether the engine actually means local time or UTC here is not
    /// documented; this preserves that ambiguity rather than guessing.
    pub(crate) fn to_epoch_seconds(self) -> u32 {
        let mut tm = libc::tm {
            tm_sec: i32::from(self.second),
            tm_min: i32::from(self.minute),
            tm_hour: i32::from(self.hour),
            tm_mday: i32::from(self.day),
            tm_mon: i32::from(self.month) - 1,
            tm_year: i32::from(self.year) - 1900,
            tm_wday: i32::from(self.day_of_week),
            tm_yday: 0,
            tm_isdst: -1,
            #[cfg(not(target_env = "msvc"))]
            tm_gmtoff: 0,
            #[cfg(not(target_env = "msvc"))]
            tm_zone: std::ptr::null(),
        };
        let seconds = unsafe { libc::mktime(&mut tm) };
        seconds as u32
    }
}

/// Converts 100ns ticks since 1601-01-01T00:00:00Z (a Windows `FILETIME`)
/// to seconds since the Unix epoch, truncating toward zero.
pub(crate) fn filetime_to_epoch_seconds(ticks: u64) -> u32 {
    const EPOCH_DELTA_SECONDS: i64 = 11_644_473_600;
    let seconds = (ticks / 10_000_000) as i64 - EPOCH_DELTA_SECONDS;
    seconds as u32
}
