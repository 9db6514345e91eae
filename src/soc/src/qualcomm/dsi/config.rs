//! Fixed DSI PLL parameters and the board-supplied SSC configuration.

use crate::qualcomm::MHz;

/// PLL reference clock (CXO)
pub const VCO_REF_CLK_RATE: u64 = 19_200_000;
/// Lowest VCO rate the 14nm PLL is characterised for
pub const VCO_MIN_RATE: u64 = 600 * MHz;
/// Settling delay after a VCO rate change
pub const VCO_DELAY_USEC: u32 = 1;

/// Status reads per lock poll
pub const DSI_PLL_POLL_MAX_READS: u32 = 15;
/// Spin delay between two lock status reads
pub const DSI_PLL_POLL_TIMEOUT_US: u32 = 1000;
/// PLL software reset pulse width
pub const PLL_SW_RESET_DELAY_US: u32 = 10;

/// Hardware recommended SSC modulation frequency in Hz
pub const SSC_FREQ_DEFAULT: u32 = 31_500;
/// Hardware recommended SSC spread in ppm
pub const SSC_PPM_DEFAULT: u32 = 5_000;
/// Lowest SSC modulation frequency the period calculation accepts
pub const SSC_FREQ_MIN: u32 = 500;

/// Spread-spectrum settings read once from the board description.
///
/// A zero `freq` or `ppm` means "not set"; the hardware defaults are filled
/// in at registration when SSC is enabled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SscConfig {
    pub enabled: bool,
    /// Modulation frequency in Hz
    pub freq: u32,
    /// Spread in parts per million
    pub ppm: u32,
    /// Center spread instead of down spread
    pub center: bool,
}

impl SscConfig {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            freq: 0,
            ppm: 0,
            center: false,
        }
    }

    pub const fn new(freq: u32, ppm: u32) -> Self {
        Self {
            enabled: true,
            freq,
            ppm,
            center: false,
        }
    }

    pub const fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Fill unset values with the hardware defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.enabled {
            if self.freq == 0 {
                self.freq = SSC_FREQ_DEFAULT;
            }
            if self.ppm == 0 {
                self.ppm = SSC_PPM_DEFAULT;
            }
        }
        self
    }

    /// Spread in units of 1/1000, as consumed by the step size calculation.
    pub const fn spread(&self) -> u32 {
        self.ppm / 1000
    }
}
