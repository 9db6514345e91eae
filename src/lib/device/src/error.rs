use core::fmt::Debug;
use util::errno::Errno;

pub trait Error: Debug {
    fn kind(&self) -> ErrorKind;
}

/// Device error kind that can be used across SoC implementations
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The function is unimplemented
    Unimplemented,
    /// A caller-supplied argument or resource is invalid
    InvalidArgument,
    /// The hardware revision or requested mode is not supported
    NotSupported,
    /// The hardware was found in a configuration the driver cannot use
    Configuration,
    /// The hardware did not reach the expected state in time
    Timeout,
    /// The resource is already claimed
    AlreadyExists,
}

impl Error for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

impl Error for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unimplemented => write!(f, "The function is unimplemented"),
            Self::InvalidArgument => write!(f, "Invalid argument"),
            Self::NotSupported => write!(f, "Not supported"),
            Self::Configuration => write!(f, "Unusable hardware configuration"),
            Self::Timeout => write!(f, "Timed out waiting for hardware"),
            Self::AlreadyExists => write!(f, "Resource already exists"),
        }
    }
}

impl From<ErrorKind> for Errno {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Unimplemented | ErrorKind::NotSupported => Errno::ENOTSUPP,
            ErrorKind::InvalidArgument | ErrorKind::Configuration => Errno::EINVAL,
            ErrorKind::Timeout => Errno::ETIMEDOUT,
            ErrorKind::AlreadyExists => Errno::EEXIST,
        }
    }
}

pub trait ErrorType {
    /// Error type
    type Error: Error;
}

impl<T: ErrorType> ErrorType for &mut T {
    type Error = T::Error;
}

impl<T: ErrorType> ErrorType for &T {
    type Error = T::Error;
}
