#![allow(non_upper_case_globals)]

#[cfg(feature = "qualcomm_dsi_14nm")]
pub mod dsi;

pub const MHz: u64 = 1_000_000;
