#![no_std]

#[cfg(feature = "qualcomm")]
pub mod qualcomm;
