mod common;

use common::*;
use msm_soc::qualcomm::dsi::config::SscConfig;
use msm_soc::qualcomm::dsi::pll_14nm::regs::*;
use msm_soc::qualcomm::dsi::pll_14nm::{Error, PllRegistry};
use msm_soc::qualcomm::dsi::PllId;

fn configure(soc: &Soc, ssc: SscConfig) -> Result<(), Error> {
    init_logger();
    soc.standalone();
    let registry = PllRegistry::new();
    registry.register(
        soc.resource(PllId::Pll0)
            .with_link(LINK_800M_4L)
            .with_ssc(ssc),
    )?;
    let mut delay = soc.delay();
    registry.configure(PllId::Pll0, true, &mut delay)
}

fn position(effects: &[Access], access: Access) -> usize {
    effects
        .iter()
        .position(|a| *a == access)
        .unwrap_or_else(|| panic!("{:?} missing", access))
}

#[test]
fn frequency_registers_1600m() -> Result<(), Error> {
    let soc = Soc::new(PllId::Pll0);
    configure(&soc, SscConfig::disabled())?;

    let pll = &soc.pll;
    assert_eq!(pll.get(PLL_DEC_START), 83);
    assert_eq!(pll.get(PLL_DIV_FRAC_START1), 0x55);
    assert_eq!(pll.get(PLL_DIV_FRAC_START2), 0x55);
    assert_eq!(pll.get(PLL_DIV_FRAC_START3), 0x5);
    // 2133
    assert_eq!(pll.get(PLL_PLLLOCK_CMP1), 0x55);
    assert_eq!(pll.get(PLL_PLLLOCK_CMP2), 0x08);
    assert_eq!(pll.get(PLL_PLLLOCK_CMP3), 0x00);
    assert_eq!(pll.get(PLL_PLLLOCK_CMP_EN), 1 << 1);
    // 800
    assert_eq!(pll.get(PLL_VCO_COUNT1), 0x20);
    assert_eq!(pll.get(PLL_VCO_COUNT2), 0x03);
    assert_eq!(pll.get(PLL_KVCO_COUNT1), 60);
    assert_eq!(pll.get(PLL_KVCO_COUNT2), 0);
    assert_eq!(pll.get(PLL_PLL_LPF2_POSTDIV), 3);
    assert_eq!(soc.phy.get(DSIPHY_CMN_CLK_CFG0), 0x32);

    Ok(())
}

#[test]
fn common_registers() -> Result<(), Error> {
    let soc = Soc::new(PllId::Pll0);
    configure(&soc, SscConfig::disabled())?;

    let pll = &soc.pll;
    assert_eq!(pll.get(PLL_TXCLK_EN), 1);
    assert_eq!(pll.get(PLL_RESETSM_CNTRL), 48);
    assert_eq!(pll.get(PLL_RESETSM_CNTRL2), 32);
    assert_eq!(pll.get(PLL_RESETSM_CNTRL5), 5);
    assert_eq!(pll.get(PLL_VCO_DIV_REF1), 94);
    assert_eq!(pll.get(PLL_VCO_DIV_REF2), 0);
    assert_eq!(pll.get(PLL_KVCO_DIV_REF1), 95);
    assert_eq!(pll.get(PLL_KVCO_DIV_REF2), 0);
    assert_eq!(pll.get(PLL_PLL_MISC1), 16);
    assert_eq!(pll.get(PLL_IE_TRIM), 4);
    assert_eq!(pll.get(PLL_IP_TRIM), 4);
    assert_eq!(pll.get(PLL_IPTAT_TRIM), 7);
    assert_eq!(pll.get(PLL_CP_SET_CUR), 0x9);
    assert_eq!(pll.get(PLL_PLL_ICPCSET), 0);
    assert_eq!(pll.get(PLL_PLL_ICPMSET), 0);
    assert_eq!(pll.get(PLL_PLL_ICP_SET), 0x3f);
    assert_eq!(pll.get(PLL_PLL_LPF1), 0x1b);
    assert_eq!(pll.get(PLL_PLL_CRCTRL), 0x12);
    assert_eq!(soc.phy.get(DSIPHY_CMN_CTRL_0), 0xff);
    assert_eq!(soc.phy.get(DSIPHY_CMN_CLK_CFG1), 1);

    Ok(())
}

#[test]
fn write_order() -> Result<(), Error> {
    let soc = Soc::new(PllId::Pll0);
    configure(&soc, SscConfig::new(0, 0))?;
    let effects = soc.effects();

    // the dividers are resolved and written ahead of the commit proper
    let ldo = position(&effects, Access::Write(Bank::Phy, DSIPHY_CMN_LDO_CNTRL, 0));
    assert_eq!(effects[ldo + 1], Access::Barrier(Bank::Phy));

    let sysclk = position(&effects, Access::Write(Bank::Pll, PLL_SYSCLK_EN_RESET, 0));
    let crctrl = position(&effects, Access::Write(Bank::Pll, PLL_PLL_CRCTRL, 0x12));
    assert_eq!(effects[crctrl + 1], Access::Barrier(Bank::Pll));

    let stop = position(&effects, Access::Write(Bank::Phy, DSIPHY_CMN_PLL_CNTRL, 0));
    let reset = position(&effects, Access::Write(Bank::Phy, DSIPHY_CMN_CTRL_1, 0x20));
    assert_eq!(
        effects[reset + 1..reset + 4],
        [
            Access::Barrier(Bank::Phy),
            Access::DelayUs(10),
            Access::Write(Bank::Phy, DSIPHY_CMN_CTRL_1, 0),
        ]
    );
    assert_eq!(effects[reset + 4], Access::Barrier(Bank::Phy));

    let ctrl0 = position(&effects, Access::Write(Bank::Phy, DSIPHY_CMN_CTRL_0, 0xff));
    let dec = position(&effects, Access::Write(Bank::Pll, PLL_DEC_START, 83));
    let cfg0 = effects
        .iter()
        .rposition(|a| *a == Access::Write(Bank::Phy, DSIPHY_CMN_CLK_CFG0, 0x32))
        .unwrap();
    let ssc_en = position(&effects, Access::Write(Bank::Pll, PLL_SSC_EN_CENTER, 1));

    assert!(ldo < sysclk);
    assert!(sysclk < crctrl);
    assert!(crctrl < stop);
    assert!(stop < reset);
    assert!(reset < ctrl0);
    assert!(ctrl0 < dec);
    assert!(dec < cfg0);
    assert!(cfg0 < ssc_en);

    // SSC enable is the last register write, followed by its barrier
    let last_write = effects
        .iter()
        .rposition(|a| matches!(a, Access::Write(..)))
        .unwrap();
    assert_eq!(last_write, ssc_en);
    assert_eq!(effects[ssc_en + 1], Access::Barrier(Bank::Pll));

    Ok(())
}

#[test]
fn ssc_registers() -> Result<(), Error> {
    let soc = Soc::new(PllId::Pll0);
    configure(&soc, SscConfig::new(0, 0).with_center(true))?;

    let pll = &soc.pll;
    assert_eq!(pll.get(PLL_SSC_ADJ_PER1), 37);
    assert_eq!(pll.get(PLL_SSC_ADJ_PER2), 0);
    // period 304
    assert_eq!(pll.get(PLL_SSC_PER1), 0x30);
    assert_eq!(pll.get(PLL_SSC_PER2), 0x01);
    // step 54434
    assert_eq!(pll.get(PLL_SSC_STEP_SIZE1), 0xa2);
    assert_eq!(pll.get(PLL_SSC_STEP_SIZE2), 0xd4);
    assert_eq!(pll.get(PLL_SSC_EN_CENTER), 0b11);

    Ok(())
}

#[test]
fn no_ssc_writes_when_disabled() -> Result<(), Error> {
    let soc = Soc::new(PllId::Pll0);
    configure(&soc, SscConfig::disabled())?;

    let ssc_regs = [
        PLL_SSC_EN_CENTER,
        PLL_SSC_ADJ_PER1,
        PLL_SSC_ADJ_PER2,
        PLL_SSC_PER1,
        PLL_SSC_PER2,
        PLL_SSC_STEP_SIZE1,
        PLL_SSC_STEP_SIZE2,
    ];
    assert!(!soc.effects().iter().any(|a| matches!(
        a,
        Access::Write(Bank::Pll, offset, _) if ssc_regs.contains(offset)
    )));

    Ok(())
}

#[test]
fn rate_change_recommits_everything() -> Result<(), Error> {
    init_logger();
    let soc = Soc::new(PllId::Pll0);
    soc.standalone();
    let registry = PllRegistry::new();
    registry.register(soc.resource(PllId::Pll0).with_link(LINK_800M_4L))?;
    let mut delay = soc.delay();

    registry.configure(PllId::Pll0, true, &mut delay)?;
    let first = registry.with_pll(PllId::Pll0, |pll| *pll.output())?;

    // 150 MHz byte clock: 1.2 GHz bit clock, post divider 2, VCO 2.4 GHz
    let mut link = LINK_800M_4L;
    link.byteclk_rate = 150_000_000;
    registry.set_link_params(PllId::Pll0, link)?;
    soc.clear_trace();
    registry.configure(PllId::Pll0, true, &mut delay)?;

    let second = registry.with_pll(PllId::Pll0, |pll| {
        assert_eq!(pll.resource().vco_current_rate(), 2_400_000_000);
        *pll.output()
    })?;
    assert_ne!(first, second);
    assert_eq!(second.dec_start, 125);
    assert_eq!(second.pll_kvco_count, 25);
    assert_eq!(soc.pll.get(PLL_DEC_START), 125);
    assert_eq!(soc.pll.get(PLL_KVCO_COUNT1), 25);

    Ok(())
}
