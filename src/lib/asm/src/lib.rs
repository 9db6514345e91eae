#![no_std]

pub mod io;
