//! Ordered register commit of a calculated parameter set.

use super::regs::*;
use super::DsiPll14nm;
use crate::qualcomm::dsi::config::PLL_SW_RESET_DELAY_US;
use device::RegisterBank;
use embedded_hal::delay::DelayNs;

/// Write the low, middle and high parts of a value split across consecutive
/// registers, `widths` bits each.
fn write_split<B: RegisterBank>(bank: &B, offsets: &[usize], widths: &[u32], val: u32) {
    let mut shift = 0;
    for (&offset, &width) in offsets.iter().zip(widths) {
        bank.write(offset, (val >> shift) & ((1 << width) - 1));
        shift += 8;
    }
}

impl<B: RegisterBank> DsiPll14nm<B> {
    /// Frequency independent PLL setup.
    fn commit_common(&self) {
        let pll = &self.rsc.pll_base;
        let pin = &self.input;
        let pout = &self.output;

        pll.write(PLL_SYSCLK_EN_RESET, 0);
        // CLKBUFLR_EN belongs to the PHY setup
        pll.write(PLL_TXCLK_EN, pout.pll_txclk_en);

        pll.write(PLL_RESETSM_CNTRL, pout.pll_resetsm_cntrl);
        pll.write(PLL_RESETSM_CNTRL2, pout.pll_resetsm_cntrl2);
        pll.write(PLL_RESETSM_CNTRL5, pout.pll_resetsm_cntrl5);

        write_split(
            pll,
            &[PLL_VCO_DIV_REF1, PLL_VCO_DIV_REF2],
            &[8, 2],
            pout.pll_vco_div_ref,
        );
        write_split(
            pll,
            &[PLL_KVCO_DIV_REF1, PLL_KVCO_DIV_REF2],
            &[8, 2],
            pout.pll_kvco_div_ref,
        );

        pll.write(PLL_PLL_MISC1, pout.pll_misc1);
        pll.write(PLL_IE_TRIM, pin.pll_ie_trim);
        pll.write(PLL_IP_TRIM, pin.pll_ip_trim);

        pll.write(
            PLL_CP_SET_CUR,
            (pin.pll_cpmset_cur << 3) | pin.pll_cpcset_cur,
        );
        pll.write(
            PLL_PLL_ICPCSET,
            (pin.pll_icpcset_p << 3) | pin.pll_icpcset_m,
        );
        pll.write(
            PLL_PLL_ICPMSET,
            (pin.pll_icpmset_p << 3) | pin.pll_icpmset_m,
        );
        pll.write(PLL_PLL_ICP_SET, (pin.pll_icpmset << 3) | pin.pll_icpcset);
        pll.write(PLL_PLL_LPF1, (pin.pll_lpf_cap2 << 4) | pin.pll_lpf_cap1);
        pll.write(PLL_IPTAT_TRIM, pin.pll_iptat_trim);
        pll.write(PLL_PLL_CRCTRL, pin.pll_c3ctrl | (pin.pll_r3ctrl << 4));
        pll.barrier();
    }

    /// Spread spectrum registers, SSC enable last.
    fn commit_ssc(&self) {
        let pll = &self.rsc.pll_base;
        let pin = &self.input;
        let pout = &self.output;

        write_split(
            pll,
            &[PLL_SSC_ADJ_PER1, PLL_SSC_ADJ_PER2],
            &[8, 2],
            pin.ssc_adj_period,
        );
        write_split(
            pll,
            &[PLL_SSC_PER1, PLL_SSC_PER2],
            &[8, 8],
            pout.ssc_period,
        );
        write_split(
            pll,
            &[PLL_SSC_STEP_SIZE1, PLL_SSC_STEP_SIZE2],
            &[8, 8],
            pout.ssc_step_size,
        );

        let center = if pin.ssc_center {
            SSC_EN_CENTER::SSC_CENTER::SET
        } else {
            SSC_EN_CENTER::SSC_CENTER::CLEAR
        };
        pll.write(
            PLL_SSC_EN_CENTER,
            fields(SSC_EN_CENTER::SSC_EN::SET + center),
        );
        pll.barrier();
    }

    /// Program the current output set.
    ///
    /// The PLL is stopped and held in software reset while the common
    /// registers are replaced. Nothing is rolled back; a bad set only shows
    /// up as a lock failure on the next enable.
    pub(crate) fn commit<D: DelayNs>(&self, delay: &mut D) {
        let pll = &self.rsc.pll_base;
        let phy = &self.rsc.phy_base;
        let pin = &self.input;
        let pout = &self.output;

        phy.write(DSIPHY_CMN_LDO_CNTRL, pout.cmn_ldo_cntrl);
        phy.barrier();

        self.commit_common();

        phy.write(DSIPHY_CMN_PLL_CNTRL, 0);
        phy.write(DSIPHY_CMN_CTRL_1, fields(CMN_CTRL_1::PLL_SW_RESET::SET));
        phy.barrier();
        delay.delay_us(PLL_SW_RESET_DELAY_US);
        phy.write(DSIPHY_CMN_CTRL_1, 0);
        phy.barrier();

        phy.write(
            DSIPHY_CMN_CLK_CFG1,
            fields(CLK_CFG1::DSICLK_SEL.val(pin.dsiclk_sel)),
        );
        phy.write(DSIPHY_CMN_CTRL_0, CMN_CTRL_0_NORMAL);
        phy.barrier();

        pll.write(PLL_DEC_START, pout.dec_start);
        write_split(
            pll,
            &[PLL_DIV_FRAC_START1, PLL_DIV_FRAC_START2, PLL_DIV_FRAC_START3],
            &[8, 8, 4],
            pout.div_frac_start,
        );
        write_split(
            pll,
            &[PLL_PLLLOCK_CMP1, PLL_PLLLOCK_CMP2, PLL_PLLLOCK_CMP3],
            &[8, 8, 2],
            pout.plllock_cmp,
        );
        pll.write(
            PLL_PLLLOCK_CMP_EN,
            fields(
                PLLLOCK_CMP_EN::PLLLOCK_CNT.val(pin.plllock_cnt)
                    + PLLLOCK_CMP_EN::PLLLOCK_RNG.val(pin.plllock_rng),
            ),
        );
        write_split(
            pll,
            &[PLL_VCO_COUNT1, PLL_VCO_COUNT2],
            &[8, 8],
            pout.pll_vco_count,
        );
        write_split(
            pll,
            &[PLL_KVCO_COUNT1, PLL_KVCO_COUNT2],
            &[8, 2],
            pout.pll_kvco_count,
        );

        // tx band 0..3 divides the VCO by 1, 2, 4 or 8
        pll.write(
            PLL_PLL_LPF2_POSTDIV,
            fields(
                LPF2_POSTDIV::TX_BAND.val(pout.pll_postdiv - 1)
                    + LPF2_POSTDIV::LPF_RES1.val(pin.pll_lpf_res1),
            ),
        );
        phy.write(
            DSIPHY_CMN_CLK_CFG0,
            fields(CLK_CFG0::N1_DIV.val(pout.pll_n1div) + CLK_CFG0::N2_DIV.val(pout.pll_n2div)),
        );
        pll.barrier();
        phy.barrier();

        if pin.ssc_en {
            self.commit_ssc();
        }
    }
}
