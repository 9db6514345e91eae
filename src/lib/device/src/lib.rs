#![no_std]

mod clk;
mod error;
mod regmap;

pub use self::{
    clk::ClkOps,
    error::{Error, ErrorKind, ErrorType},
    regmap::{Mmio, RegisterBank},
};
