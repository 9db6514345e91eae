//! DSI 14nm PHY PLL.
//!
//! One [`DsiPll14nm`] per physical PLL owns the register banks of the PLL and
//! of the PHY common block. Bring-up is two steps driven by the display
//! driver through [`PllRegistry`]: `configure` resolves the dividers for the
//! panel link and programs the VCO, `toggle` starts the PLL and waits for
//! lock, or stops it.

macro_rules! pll_dbg {
    ($rsc:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(concat!("[dsi_pll{}] ", $fmt), $rsc.index().index() $(, $arg)*)
    };
}

macro_rules! pll_info {
    ($rsc:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        log::info!(concat!("[dsi_pll{}] ", $fmt), $rsc.index().index() $(, $arg)*)
    };
}

macro_rules! pll_err {
    ($rsc:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        log::error!(concat!("[dsi_pll{}] ", $fmt), $rsc.index().index() $(, $arg)*)
    };
}

pub mod calc;
pub mod clk;
mod commit;
pub mod divider;
pub mod lock;
pub mod regs;
mod registry;
pub mod topology;

pub use self::{
    calc::{Dividers, PllInput, PllOutput},
    clk::{ByteClk, DsiClk, PixelClk},
    lock::LockState,
    registry::{PllRegistry, DSI_PLL_NUM_CLKS},
    topology::{SourceSetup, Topology},
};

use super::config::{SscConfig, VCO_DELAY_USEC, VCO_MIN_RATE, VCO_REF_CLK_RATE};
use super::{PllId, PllRevision};
use device::{ErrorKind, RegisterBank};
use embedded_hal::delay::DelayNs;
use util::errno::Errno;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// PLL or PHY register block not mapped
    InvalidParams,
    IndexOutOfRange(usize),
    NotRegistered(PllId),
    AlreadyRegistered(PllId),
    UnsupportedRevision(PllRevision),
    /// SSC modulation frequency below the supported minimum
    InvalidSscFreq(u32),
    UnknownTopology {
        clk_buf_en: u32,
        glbl_test_ctrl: u32,
    },
    /// No divider table row covers the bit clock rate
    UnsupportedBitClk(u64),
    InvalidPclkDiv {
        bpp: u32,
        lanes: u32,
    },
    VcoRateTooLow(u64),
    /// PLL_READY never asserted
    NotReady {
        status: u32,
    },
    /// PLL_LOCKED never asserted
    NotLocked {
        status: u32,
    },
}

impl Error {
    /// Negative errno for C-style status returns.
    pub fn errno(&self) -> Errno {
        device::Error::kind(self).into()
    }
}

impl device::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams
            | Self::IndexOutOfRange(_)
            | Self::NotRegistered(_)
            | Self::InvalidSscFreq(_)
            | Self::InvalidPclkDiv { .. }
            | Self::VcoRateTooLow(_) => ErrorKind::InvalidArgument,
            Self::UnsupportedRevision(_) | Self::UnsupportedBitClk(_) => ErrorKind::NotSupported,
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyExists,
            Self::UnknownTopology { .. } => ErrorKind::Configuration,
            Self::NotReady { .. } | Self::NotLocked { .. } => ErrorKind::Timeout,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidParams => write!(f, "PLL or PHY registers not mapped"),
            Self::IndexOutOfRange(i) => write!(f, "PLL index {i} out of range"),
            Self::NotRegistered(id) => write!(f, "{id:?} not registered"),
            Self::AlreadyRegistered(id) => write!(f, "{id:?} already registered"),
            Self::UnsupportedRevision(rev) => write!(f, "unsupported PLL revision {rev:?}"),
            Self::InvalidSscFreq(freq) => write!(f, "SSC frequency {freq} Hz too low"),
            Self::UnknownTopology {
                clk_buf_en,
                glbl_test_ctrl,
            } => write!(
                f,
                "unknown PLL source, clk_buf_en={clk_buf_en:#x} glbl_test_ctrl={glbl_test_ctrl:#x}"
            ),
            Self::UnsupportedBitClk(rate) => write!(f, "no divider for bit clock {rate} Hz"),
            Self::InvalidPclkDiv { bpp, lanes } => {
                write!(f, "no pixel divider for bpp {bpp} on {lanes} lanes")
            }
            Self::VcoRateTooLow(rate) => write!(f, "VCO rate {rate} Hz below minimum"),
            Self::NotReady { status } => write!(f, "PLL not ready, status={status:#x}"),
            Self::NotLocked { status } => write!(f, "PLL failed to lock, status={status:#x}"),
        }
    }
}

/// Panel link parameters supplied by the display driver.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LinkParams {
    /// Byte clock in Hz, bit clock / 8
    pub byteclk_rate: u64,
    /// Bits per pixel
    pub bpp: u32,
    /// Active data lanes
    pub lanes: u32,
}

/// Per-instance PLL state.
#[derive(Debug)]
pub struct PllResource<B> {
    pub(crate) index: PllId,
    pub(crate) revision: PllRevision,
    pub(crate) pll_base: B,
    pub(crate) phy_base: B,

    pub(crate) vco_ref_clk_rate: u64,
    pub(crate) vco_min_rate: u64,
    pub(crate) vco_delay_us: u32,
    /// Requested VCO rate
    pub(crate) vco_rate: u64,
    /// Rate last programmed into the hardware
    pub(crate) vco_current_rate: u64,

    pub(crate) ssc: SscConfig,

    pub(crate) byteclk_rate: u64,
    pub(crate) pclk_rate: u64,
    pub(crate) bpp: u32,
    pub(crate) lanes: u32,

    pub(crate) slave: Option<PllId>,
}

impl<B: RegisterBank> PllResource<B> {
    pub fn new(index: PllId, pll_base: B, phy_base: B) -> Self {
        Self {
            index,
            revision: PllRevision::Dsi14nm,
            pll_base,
            phy_base,
            vco_ref_clk_rate: VCO_REF_CLK_RATE,
            vco_min_rate: VCO_MIN_RATE,
            vco_delay_us: VCO_DELAY_USEC,
            vco_rate: 0,
            vco_current_rate: 0,
            ssc: SscConfig::disabled(),
            byteclk_rate: 0,
            pclk_rate: 0,
            bpp: 0,
            lanes: 0,
            slave: None,
        }
    }

    pub fn with_revision(mut self, revision: PllRevision) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_ssc(mut self, ssc: SscConfig) -> Self {
        self.ssc = ssc;
        self
    }

    pub fn with_link(mut self, link: LinkParams) -> Self {
        self.set_link(link);
        self
    }

    pub(crate) fn set_link(&mut self, link: LinkParams) {
        self.byteclk_rate = link.byteclk_rate;
        self.bpp = link.bpp;
        self.lanes = link.lanes;
    }

    pub fn index(&self) -> PllId {
        self.index
    }

    pub fn revision(&self) -> PllRevision {
        self.revision
    }

    pub fn pll_base(&self) -> &B {
        &self.pll_base
    }

    pub fn phy_base(&self) -> &B {
        &self.phy_base
    }

    pub fn vco_ref_clk_rate(&self) -> u64 {
        self.vco_ref_clk_rate
    }

    pub fn vco_min_rate(&self) -> u64 {
        self.vco_min_rate
    }

    pub fn vco_rate(&self) -> u64 {
        self.vco_rate
    }

    pub fn vco_current_rate(&self) -> u64 {
        self.vco_current_rate
    }

    pub fn ssc(&self) -> &SscConfig {
        &self.ssc
    }

    pub fn byteclk_rate(&self) -> u64 {
        self.byteclk_rate
    }

    pub fn pclk_rate(&self) -> u64 {
        self.pclk_rate
    }

    pub fn link(&self) -> LinkParams {
        LinkParams {
            byteclk_rate: self.byteclk_rate,
            bpp: self.bpp,
            lanes: self.lanes,
        }
    }

    /// PLL driven by this one when it is the master of a dual-DSI pair.
    pub fn slave(&self) -> Option<PllId> {
        self.slave
    }
}

/// A registered 14nm PLL.
#[derive(Debug)]
pub struct DsiPll14nm<B> {
    pub(crate) rsc: PllResource<B>,
    pub(crate) input: PllInput,
    pub(crate) output: PllOutput,
    pub(crate) dividers: Dividers,
    pub(crate) source: SourceSetup,
    pub(crate) state: LockState,
}

impl<B: RegisterBank> DsiPll14nm<B> {
    pub(crate) fn new(rsc: PllResource<B>) -> Self {
        let input = PllInput::from_resource(&rsc);
        Self {
            rsc,
            input,
            output: PllOutput::default(),
            dividers: Dividers::default(),
            source: SourceSetup::Unclassified,
            state: LockState::Stopped,
        }
    }

    pub fn resource(&self) -> &PllResource<B> {
        &self.rsc
    }

    pub fn input(&self) -> &PllInput {
        &self.input
    }

    pub fn output(&self) -> &PllOutput {
        &self.output
    }

    pub fn dividers(&self) -> Dividers {
        self.dividers
    }

    pub fn source(&self) -> SourceSetup {
        self.source
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// Bring the PLL to the rate the link parameters ask for.
    ///
    /// Without `commit` only the topology and the byte clock divider are
    /// resolved. `pll1_present` tells whether a master may link PLL1.
    pub fn configure<D: DelayNs>(
        &mut self,
        commit: bool,
        pll1_present: bool,
        delay: &mut D,
    ) -> Result<(), Error> {
        self.source_setup(pll1_present)?;
        self.set_byteclk_div(commit)?;

        if commit {
            self.set_pclk_div(commit)?;
            self.vco_set_rate(delay)?;
        }

        Ok(())
    }

    /// Program the hardware for the requested VCO rate.
    ///
    /// The calculated values are regenerated from scratch before anything
    /// is written.
    pub fn vco_set_rate<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        let rate = self.rsc.vco_rate;
        if rate < self.rsc.vco_min_rate {
            pll_err!(self.rsc, "vco rate {} below minimum {}", rate, self.rsc.vco_min_rate);
            return Err(Error::VcoRateTooLow(rate));
        }

        pll_dbg!(self.rsc, "rate={}", rate);

        self.rsc.vco_current_rate = rate;
        self.input = PllInput::from_resource(&self.rsc);
        self.output = PllOutput::compute(&self.input, rate, self.dividers);

        pll_dbg!(
            self.rsc,
            "dec_start:{:#x} div_frac_start:{:#x} plllock_cmp:{:#x}",
            self.output.dec_start,
            self.output.div_frac_start,
            self.output.plllock_cmp
        );
        if self.input.ssc_en {
            pll_dbg!(
                self.rsc,
                "ssc period:{} step_size:{}",
                self.output.ssc_period,
                self.output.ssc_step_size
            );
        }

        self.commit(delay);
        delay.delay_us(self.rsc.vco_delay_us);

        Ok(())
    }

    /// Start the PLL and wait for lock, or stop it.
    pub fn toggle<D: DelayNs>(&mut self, prepare: bool, delay: &mut D) -> Result<(), Error> {
        if prepare {
            self.enable(delay).map_err(|e| {
                pll_err!(self.rsc, "enable failed: {}", e.errno().as_i32());
                e
            })
        } else {
            self.disable();
            Ok(())
        }
    }
}
