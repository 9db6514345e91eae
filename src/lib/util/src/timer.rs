use embedded_hal::delay::DelayNs;

/// Bounded busy-wait on a device status word.
///
/// Reads the status up to `max_reads` times, spinning `interval_us` after
/// every read that does not satisfy the condition. Never yields, so it is
/// usable from contexts that must not sleep; the worst case blocks the
/// caller for `max_reads * interval_us` microseconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpinPoll {
    max_reads: u32,
    interval_us: u32,
}

/// The condition was still false after the last permitted read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollTimeout {
    /// Value returned by the final read
    pub last: u32,
    /// Number of reads performed
    pub reads: u32,
}

impl SpinPoll {
    pub const fn new(max_reads: u32, interval_us: u32) -> Self {
        Self {
            max_reads,
            interval_us,
        }
    }

    pub const fn max_reads(&self) -> u32 {
        self.max_reads
    }

    pub const fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Worst-case time spent in [`SpinPoll::wait`].
    pub const fn budget_us(&self) -> u64 {
        self.max_reads as u64 * self.interval_us as u64
    }

    /// Poll `read` until `cond` holds for the value it returns.
    ///
    /// Returns the first satisfying value.
    pub fn wait<D, R, C>(&self, delay: &mut D, mut read: R, cond: C) -> Result<u32, PollTimeout>
    where
        D: DelayNs,
        R: FnMut() -> u32,
        C: Fn(u32) -> bool,
    {
        let mut last = 0;
        for reads in 1..=self.max_reads {
            last = read();
            if cond(last) {
                return Ok(last);
            }
            delay.delay_us(self.interval_us);
            if reads == self.max_reads {
                return Err(PollTimeout { last, reads });
            }
        }

        Err(PollTimeout { last, reads: 0 })
    }
}
