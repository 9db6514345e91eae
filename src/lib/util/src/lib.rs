#![no_std]

pub mod errno;
pub mod timer;
