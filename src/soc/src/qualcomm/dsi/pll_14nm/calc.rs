//! Fractional-N parameter calculation.
//!
//! Everything here is pure integer arithmetic. Divisions truncate, exactly as
//! the hardware interprets the programmed codes, and intermediates are 64-bit
//! signed so multi-GHz VCO rates scaled by 2^20 cannot overflow.

use super::PllResource;
use crate::qualcomm::dsi::config::SscConfig;
use crate::qualcomm::MHz;
use device::RegisterBank;

/// Width of the fractional part of the feedback divider
pub const FRAC_BITS: u32 = 20;

const SSC_ADJ_PERIOD: u32 = 37;

/// Fixed, rate-independent PLL inputs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PllInput {
    /// Reference clock in Hz
    pub fref: u64,
    pub dsiclk_sel: u32,
    pub ssc_en: bool,
    pub ldo_en: u32,

    pub vco_measure_time: u32,
    pub kvco_measure_time: u32,
    pub bandgap_timer: u32,
    pub pll_wakeup_timer: u32,
    pub plllock_cnt: u32,
    pub plllock_rng: u32,
    pub ssc_center: bool,
    pub ssc_adj_period: u32,
    /// Spread in units of 1/1000
    pub ssc_spread: u32,
    pub ssc_freq: u32,
    pub pll_ie_trim: u32,
    pub pll_ip_trim: u32,
    pub pll_iptat_trim: u32,
    pub pll_cpcset_cur: u32,
    pub pll_cpmset_cur: u32,
    pub pll_icpmset: u32,
    pub pll_icpcset: u32,
    pub pll_icpmset_p: u32,
    pub pll_icpmset_m: u32,
    pub pll_icpcset_p: u32,
    pub pll_icpcset_m: u32,
    pub pll_lpf_res1: u32,
    pub pll_lpf_cap1: u32,
    pub pll_lpf_cap2: u32,
    pub pll_c3ctrl: u32,
    pub pll_r3ctrl: u32,
}

impl PllInput {
    pub fn new(fref: u64, ssc: &SscConfig) -> Self {
        Self {
            fref,
            dsiclk_sel: 1,
            ssc_en: ssc.enabled,
            ldo_en: 0,

            vco_measure_time: 5,
            kvco_measure_time: 5,
            bandgap_timer: 4,
            pll_wakeup_timer: 5,
            plllock_cnt: 1,
            plllock_rng: 0,
            ssc_center: ssc.center,
            ssc_adj_period: SSC_ADJ_PERIOD,
            ssc_spread: ssc.spread(),
            ssc_freq: ssc.freq,
            pll_ie_trim: 4,
            pll_ip_trim: 4,
            pll_iptat_trim: 7,
            pll_cpcset_cur: 1,
            pll_cpmset_cur: 1,
            pll_icpmset: 7,
            pll_icpcset: 7,
            pll_icpmset_p: 0,
            pll_icpmset_m: 0,
            pll_icpcset_p: 0,
            pll_icpcset_m: 0,
            pll_lpf_res1: 3,
            pll_lpf_cap1: 11,
            pll_lpf_cap2: 1,
            pll_c3ctrl: 2,
            pll_r3ctrl: 1,
        }
    }

    pub(crate) fn from_resource<B: RegisterBank>(rsc: &PllResource<B>) -> Self {
        Self::new(rsc.vco_ref_clk_rate(), rsc.ssc())
    }
}

/// Register-ready values for one VCO rate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PllOutput {
    pub pll_txclk_en: u32,
    pub dec_start: u32,
    pub div_frac_start: u32,
    pub ssc_period: u32,
    pub ssc_step_size: u32,
    pub plllock_cmp: u32,
    pub pll_vco_div_ref: u32,
    pub pll_vco_count: u32,
    pub pll_kvco_div_ref: u32,
    pub pll_kvco_count: u32,
    pub pll_misc1: u32,
    pub pll_resetsm_cntrl: u32,
    pub pll_resetsm_cntrl2: u32,
    pub pll_resetsm_cntrl5: u32,
    pub cmn_ldo_cntrl: u32,

    /// VCO tx band divider, 1 for every supported rate
    pub pll_postdiv: u32,
    /// PLL post divider (byte clock path)
    pub pll_n1div: u32,
    /// Pixel clock divider
    pub pll_n2div: u32,
}

/// Post dividers resolved for the current link configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Dividers {
    pub n1div: u32,
    pub n2div: u32,
}

impl PllOutput {
    /// Calculate the full output set for `vco_clk_rate`.
    ///
    /// Nothing is carried over from a previous rate except the dividers
    /// passed in.
    pub fn compute(input: &PllInput, vco_clk_rate: u64, dividers: Dividers) -> Self {
        let fref = input.fref;
        let dec_frac = calc_dec_frac(vco_clk_rate, fref, input.plllock_cnt);
        let cal = calc_vco_count(input, vco_clk_rate, fref);

        let mut out = Self {
            pll_txclk_en: 1,
            dec_start: dec_frac.dec_start,
            div_frac_start: dec_frac.div_frac_start,
            plllock_cmp: dec_frac.plllock_cmp,
            pll_vco_div_ref: cal.vco_div_ref,
            pll_vco_count: cal.vco_count,
            pll_kvco_div_ref: cal.kvco_div_ref,
            pll_kvco_count: cal.kvco_count,
            pll_misc1: 16,
            pll_resetsm_cntrl: 48,
            pll_resetsm_cntrl2: input.bandgap_timer << 3,
            pll_resetsm_cntrl5: input.pll_wakeup_timer,
            cmn_ldo_cntrl: input.ldo_en,
            pll_postdiv: 1,
            pll_n1div: dividers.n1div,
            pll_n2div: dividers.n2div,
            ..Self::default()
        };

        if input.ssc_en {
            let ssc = calc_ssc(
                vco_clk_rate,
                fref,
                input.ssc_freq,
                input.ssc_spread,
                input.ssc_adj_period,
            );
            out.ssc_period = ssc.period;
            out.ssc_step_size = ssc.step_size;
        }

        out
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecFrac {
    /// `vco / fref` in 44.20 fixed point
    pub dec_start_multiple: i64,
    pub dec_start: u32,
    /// 20-bit fractional part of the feedback divider
    pub div_frac_start: u32,
    pub plllock_cmp: u32,
}

/// Lock detector count window for a PLLLOCK_CNT setting.
pub const fn plllock_duration(plllock_cnt: u32) -> i64 {
    match plllock_cnt {
        0 => 1024,
        1 => 256,
        2 => 128,
        _ => 32,
    }
}

/// Split `vco_clk_rate / fref` into the decimal and fractional start codes.
///
/// `fref` must be non-zero.
pub fn calc_dec_frac(vco_clk_rate: u64, fref: u64, plllock_cnt: u32) -> DecFrac {
    let multiplier: i64 = 1 << FRAC_BITS;
    let vco_clk_rate = vco_clk_rate as i64;
    let fref = fref as i64;

    let dec_start_multiple = vco_clk_rate * multiplier / fref;
    let div_frac_start = dec_start_multiple % multiplier;
    let dec_start = dec_start_multiple / multiplier;

    let duration = plllock_duration(plllock_cnt);
    let plllock_cmp = duration * dec_start_multiple / multiplier / 10;

    DecFrac {
        dec_start_multiple,
        dec_start: dec_start as u32,
        div_frac_start: div_frac_start as u32,
        plllock_cmp: plllock_cmp as u32,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ssc {
    pub period: u32,
    /// 16-bit step size
    pub step_size: u32,
}

const fn ceil_div(x: u32, y: u32) -> u32 {
    (x + (y - 1)) / y
}

/// SSC modulation period and frequency step.
///
/// `ssc_freq` must be at least 500 Hz and `fref` at least 1 kHz.
pub fn calc_ssc(
    vco_clk_rate: u64,
    fref: u64,
    ssc_freq: u32,
    ssc_spread: u32,
    ssc_adj_period: u32,
) -> Ssc {
    let period = (fref / 1000) as u32;
    let period = ceil_div(period, ssc_freq / 500) - 1;

    let mut step_size = (vco_clk_rate as u32) as i64;
    let ref_khz = (fref / 1000) as i64;
    step_size /= ref_khz;
    step_size <<= FRAC_BITS;
    step_size /= 1000;
    step_size *= ssc_spread as i64;
    step_size /= 1000;
    step_size *= (ssc_adj_period + 1) as i64;

    let div = (period + 1) as i64;
    let rem = step_size % div;
    step_size /= div;
    if rem != 0 {
        step_size += 1;
    }

    Ssc {
        period,
        step_size: (step_size & 0xffff) as u32,
    }
}

/// KVCO slope in MHz/V for the band `vrate` falls in.
pub fn kvco_slop(vrate: u64) -> u32 {
    if vrate > 1300 * MHz && vrate <= 1800 * MHz {
        600
    } else if vrate > 1800 * MHz && vrate < 2300 * MHz {
        400
    } else if vrate > 2300 * MHz && vrate < 2600 * MHz {
        280
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VcoCal {
    pub vco_div_ref: u32,
    pub vco_count: u32,
    pub kvco_div_ref: u32,
    pub kvco_count: u32,
}

/// VCO and KVCO calibration reference dividers and target counts.
pub fn calc_vco_count(input: &PllInput, vco_clk_rate: u64, fref: u64) -> VcoCal {
    // 10-bit reference dividers
    let div_ref = |measure_time: u32| (fref * measure_time as u64 / MHz) & 0x03ff;

    let vco_div_ref = div_ref(input.vco_measure_time).wrapping_sub(2) as u32;
    let vco_count = (vco_clk_rate / MHz * input.vco_measure_time as u64 / 10) as u32;

    let kvco_div_ref = div_ref(input.kvco_measure_time).wrapping_sub(1) as u32;
    let kvco_count = kvco_slop(vco_clk_rate) * 2 / 100 * input.kvco_measure_time;

    VcoCal {
        vco_div_ref,
        vco_count,
        kvco_div_ref,
        kvco_count,
    }
}
