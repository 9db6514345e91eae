//! Byte and pixel clocks exported to the display controller.
//!
//! Both rates are fixed by `configure`; the clock operations only report
//! them back.

use super::{DsiPll14nm, Error};
use crate::qualcomm::dsi::PllId;
use device::{ClkOps, ErrorType, RegisterBank};
use spin::RwLock;

pub(crate) type PllSlot<B> = RwLock<Option<DsiPll14nm<B>>>;

const BYTECLK_NAMES: [&str; 2] = ["dsi0_phy_pll_out_byteclk", "dsi1_phy_pll_out_byteclk"];
const DSICLK_NAMES: [&str; 2] = ["dsi0_phy_pll_out_dsiclk", "dsi1_phy_pll_out_dsiclk"];

fn slot_rate<B: RegisterBank>(slot: &PllSlot<B>, f: impl Fn(&DsiPll14nm<B>) -> u64) -> u64 {
    slot.read().as_ref().map(f).unwrap_or(0)
}

/// Byte clock of one PLL, the bit clock divided by 8.
pub struct ByteClk<'a, B> {
    id: PllId,
    slot: &'a PllSlot<B>,
}

impl<'a, B: RegisterBank> ByteClk<'a, B> {
    pub(crate) fn new(id: PllId, slot: &'a PllSlot<B>) -> Self {
        Self { id, slot }
    }

    pub fn id(&self) -> PllId {
        self.id
    }
}

impl<B: RegisterBank> ErrorType for ByteClk<'_, B> {
    type Error = Error;
}

impl<B: RegisterBank> ClkOps for ByteClk<'_, B> {
    fn name(&self) -> &'static str {
        BYTECLK_NAMES[self.id.index()]
    }

    fn round_rate(&self, _rate: u64, _parent_rate: u64) -> u64 {
        slot_rate(self.slot, |pll| pll.rsc.byteclk_rate)
    }

    fn recalc_rate(&self, _parent_rate: u64) -> u64 {
        slot_rate(self.slot, |pll| pll.rsc.byteclk_rate)
    }
}

/// Pixel clock of one PLL, after the N2 divider.
pub struct PixelClk<'a, B> {
    id: PllId,
    slot: &'a PllSlot<B>,
}

impl<'a, B: RegisterBank> PixelClk<'a, B> {
    pub(crate) fn new(id: PllId, slot: &'a PllSlot<B>) -> Self {
        Self { id, slot }
    }

    pub fn id(&self) -> PllId {
        self.id
    }
}

impl<B: RegisterBank> ErrorType for PixelClk<'_, B> {
    type Error = Error;
}

impl<B: RegisterBank> ClkOps for PixelClk<'_, B> {
    fn name(&self) -> &'static str {
        DSICLK_NAMES[self.id.index()]
    }

    fn round_rate(&self, _rate: u64, _parent_rate: u64) -> u64 {
        slot_rate(self.slot, |pll| pll.rsc.pclk_rate)
    }

    fn recalc_rate(&self, _parent_rate: u64) -> u64 {
        slot_rate(self.slot, |pll| pll.rsc.pclk_rate)
    }
}

/// One of the four provider clocks, as handed out by onecell index.
pub enum DsiClk<'a, B> {
    Byte(ByteClk<'a, B>),
    Pixel(PixelClk<'a, B>),
}

impl<B: RegisterBank> ErrorType for DsiClk<'_, B> {
    type Error = Error;
}

impl<B: RegisterBank> ClkOps for DsiClk<'_, B> {
    fn name(&self) -> &'static str {
        match self {
            Self::Byte(c) => c.name(),
            Self::Pixel(c) => c.name(),
        }
    }

    fn round_rate(&self, rate: u64, parent_rate: u64) -> u64 {
        match self {
            Self::Byte(c) => c.round_rate(rate, parent_rate),
            Self::Pixel(c) => c.round_rate(rate, parent_rate),
        }
    }

    fn recalc_rate(&self, parent_rate: u64) -> u64 {
        match self {
            Self::Byte(c) => c.recalc_rate(parent_rate),
            Self::Pixel(c) => c.recalc_rate(parent_rate),
        }
    }
}
