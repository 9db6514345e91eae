/**
 * Linux error numbers
 *
 * Status codes handed back across the C-facing driver surface. All error
 * values are negative, zero is success, following the kernel convention of
 * returning `-EINVAL` and friends from driver callbacks.
 */
#[allow(clippy::upper_case_acronyms)]
#[repr(i32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Errno {
    /// Call completed successfully
    Success = 0,
    /// Resource already exists
    EEXIST = -17,
    /// Invalid argument
    EINVAL = -22,
    /// Operation timed out
    ETIMEDOUT = -110,
    /// Operation is not supported
    ENOTSUPP = -524,
}

impl Errno {
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn is_err(self) -> bool {
        (self as i32) < 0
    }
}

impl From<Errno> for i32 {
    fn from(e: Errno) -> Self {
        e.as_i32()
    }
}

impl core::fmt::Display for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}
