//! Byte clock and pixel clock divider resolution.
//!
//! ```text
//!                      +-> N1 (pll_post_div) --> bit clock --> /8 --> byte clock
//!   VCO --> tx band ---+
//!                      +-> N1 --> /2 (DSICLK_SEL) --> N2 (pclk_div) --> pixel clock
//! ```

use super::regs::{
    field_mask, fields, CLK_CFG0, CLK_CFG1, DSIPHY_CMN_CLK_CFG0, DSIPHY_CMN_CLK_CFG1,
};
use super::{DsiPll14nm, Error};
use device::RegisterBank;
use tock_registers::LocalRegisterCopy;

/// One bit clock range and the dividers that keep the VCO in band for it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DividerTableEntry {
    pub min_hz: u64,
    pub max_hz: u64,
    pub pll_div: u32,
    /// Unused by the 14nm PHY, always zero
    pub phy_div: u32,
}

impl DividerTableEntry {
    const fn new(min_hz: u64, max_hz: u64, pll_div: u32) -> Self {
        Self {
            min_hz,
            max_hz,
            pll_div,
            phy_div: 0,
        }
    }

    pub const fn contains(&self, bitclk_rate: u64) -> bool {
        self.min_hz <= bitclk_rate && bitclk_rate <= self.max_hz
    }
}

/// Bit clock ranges for the D-PHY, keeping the VCO within 1.3 - 2.6 GHz.
pub const PLL_14NM_DPHY: [DividerTableEntry; 15] = [
    DividerTableEntry::new(86_666_667, 92_857_142, 15),
    DividerTableEntry::new(92_857_143, 99_999_999, 14),
    DividerTableEntry::new(100_000_000, 108_333_333, 13),
    DividerTableEntry::new(108_333_334, 118_181_818, 12),
    DividerTableEntry::new(118_181_819, 129_999_999, 11),
    DividerTableEntry::new(130_000_000, 144_444_444, 10),
    DividerTableEntry::new(144_444_445, 162_499_999, 9),
    DividerTableEntry::new(162_500_000, 185_714_285, 8),
    DividerTableEntry::new(185_714_286, 216_666_666, 7),
    DividerTableEntry::new(216_666_667, 259_999_999, 6),
    DividerTableEntry::new(260_000_000, 324_999_999, 5),
    DividerTableEntry::new(325_000_000, 433_333_333, 4),
    DividerTableEntry::new(433_333_334, 649_999_999, 3),
    DividerTableEntry::new(650_000_000, 1_299_999_999, 2),
    DividerTableEntry::new(1_300_000_000, 2_500_000_000, 1),
];

/// First table row whose range holds `bitclk_rate`.
pub fn lookup_post_div(bitclk_rate: u64) -> Option<&'static DividerTableEntry> {
    PLL_14NM_DPHY.iter().find(|e| e.contains(bitclk_rate))
}

/// M and N of the MND trio for a pixel format and lane count.
pub const fn mnd_trio(bpp: u32, lanes: u32) -> (u32, u32) {
    match (bpp, lanes) {
        // RGB666 packed
        (18, 1) | (18, 2) => (2, 9),
        (18, 4) => (4, 9),
        // RGB565
        (16, 3) => (3, 8),
        _ => (1, 1),
    }
}

/// Pixel clock divider, assuming DSICLK_SEL doubles N2.
///
/// Zero when no divider exists for the format.
pub const fn calc_dphy_pclk_div(bpp: u32, lanes: u32) -> u32 {
    if lanes == 0 {
        return 0;
    }
    let (m, n) = mnd_trio(bpp, lanes);
    bpp * m / n / 2 / lanes
}

type ClkCfg0 = LocalRegisterCopy<u32, CLK_CFG0::Register>;
type ClkCfg1 = LocalRegisterCopy<u32, CLK_CFG1::Register>;

pub fn set_pll_post_div<B: RegisterBank>(phy: &B, pll_post_div: u32) {
    phy.update_bits(
        DSIPHY_CMN_CLK_CFG0,
        field_mask(CLK_CFG0::N1_DIV),
        fields(CLK_CFG0::N1_DIV.val(pll_post_div)),
    );
    phy.barrier();
}

pub fn get_pll_post_div<B: RegisterBank>(phy: &B) -> u32 {
    ClkCfg0::new(phy.read(DSIPHY_CMN_CLK_CFG0)).read(CLK_CFG0::N1_DIV)
}

pub fn set_pclk_div<B: RegisterBank>(phy: &B, pclk_div: u32) {
    phy.update_bits(
        DSIPHY_CMN_CLK_CFG0,
        field_mask(CLK_CFG0::N2_DIV),
        fields(CLK_CFG0::N2_DIV.val(pclk_div)),
    );
    phy.barrier();
}

pub fn get_pclk_div<B: RegisterBank>(phy: &B) -> u32 {
    ClkCfg0::new(phy.read(DSIPHY_CMN_CLK_CFG0)).read(CLK_CFG0::N2_DIV)
}

/// Set DSICLK_SEL. The bit is only ever set here; a PHY reset clears it.
pub fn set_dsi_clk<B: RegisterBank>(phy: &B, dsiclk_sel: u32) {
    let mask = if dsiclk_sel & 1 != 0 {
        field_mask(CLK_CFG1::DSICLK_SEL)
    } else {
        0
    };
    phy.update_bits(DSIPHY_CMN_CLK_CFG1, mask, fields(CLK_CFG1::DSICLK_SEL::SET));
    phy.barrier();
}

pub fn get_dsi_clk<B: RegisterBank>(phy: &B) -> u32 {
    ClkCfg1::new(phy.read(DSIPHY_CMN_CLK_CFG1)).read(CLK_CFG1::DSICLK_SEL)
}

impl<B: RegisterBank> DsiPll14nm<B> {
    /// Pick the PLL post divider for the byte clock and derive the VCO rate.
    ///
    /// On a lookup miss the post divider is left at zero and the VCO rate
    /// is not touched.
    pub(crate) fn set_byteclk_div(&mut self, commit: bool) -> Result<(), Error> {
        let bitclk_rate = self.rsc.byteclk_rate * 8;

        let entry = match lookup_post_div(bitclk_rate) {
            Some(entry) => entry,
            None => {
                self.dividers.n1div = 0;
                pll_err!(self.rsc, "no post divider for bitclk {}", bitclk_rate);
                return Err(Error::UnsupportedBitClk(bitclk_rate));
            }
        };

        pll_dbg!(
            self.rsc,
            "pll_post_div:{} phy_post_div:{}",
            entry.pll_div,
            entry.phy_div
        );

        if commit {
            set_pll_post_div(&self.rsc.phy_base, entry.pll_div);
        }

        self.dividers.n1div = entry.pll_div;
        self.rsc.vco_rate = bitclk_rate * entry.pll_div as u64;
        pll_dbg!(
            self.rsc,
            "vco_rate:{} n1div:{:#x}",
            self.rsc.vco_rate,
            self.dividers.n1div
        );

        Ok(())
    }

    /// Derive the pixel clock divider from the programmed post divider.
    pub(crate) fn set_pclk_div(&mut self, commit: bool) -> Result<(), Error> {
        let pll_post_div = get_pll_post_div(&self.rsc.phy_base);
        if pll_post_div == 0 {
            pll_err!(self.rsc, "PLL post divider not programmed");
            return Err(Error::UnsupportedBitClk(self.rsc.byteclk_rate * 8));
        }

        // DSICLK_SEL=1 doubles N2
        let dsiclk_sel = 1;
        let pclk_src_rate = self.rsc.vco_rate / pll_post_div as u64 / 2;

        // N2 is a 4-bit field
        let pclk_div = calc_dphy_pclk_div(self.rsc.bpp, self.rsc.lanes);
        if pclk_div == 0 || pclk_div > CLK_CFG0::N2_DIV.mask {
            pll_err!(
                self.rsc,
                "no pixel divider for bpp:{} lanes:{}",
                self.rsc.bpp,
                self.rsc.lanes
            );
            return Err(Error::InvalidPclkDiv {
                bpp: self.rsc.bpp,
                lanes: self.rsc.lanes,
            });
        }

        self.dividers.n2div = pclk_div;
        self.rsc.pclk_rate = pclk_src_rate / pclk_div as u64;

        pll_dbg!(
            self.rsc,
            "pclk rate:{} dsi_clk:{} pclk_div:{}",
            self.rsc.pclk_rate,
            dsiclk_sel,
            pclk_div
        );

        if commit {
            set_dsi_clk(&self.rsc.phy_base, dsiclk_sel);
            set_pclk_div(&self.rsc.phy_base, pclk_div);
        }

        Ok(())
    }
}
