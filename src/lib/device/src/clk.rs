use crate::ErrorType;

/// Operations a clock provider exposes to clock consumers.
///
/// Rates are in Hz. Providers whose rate is fixed by an out-of-band
/// configuration step keep the default no-op `set_rate`, `prepare` and
/// `unprepare`.
pub trait ClkOps: ErrorType {
    /// Name the clock is registered under.
    fn name(&self) -> &'static str;

    /// Closest rate the clock can produce for a `rate` request.
    fn round_rate(&self, rate: u64, parent_rate: u64) -> u64;

    /// Current output rate.
    fn recalc_rate(&self, parent_rate: u64) -> u64;

    fn set_rate(&self, _rate: u64, _parent_rate: u64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn prepare(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn unprepare(&self) {}
}
