//! Master/slave discovery for dual-DSI configurations.
//!
//! The PHY configuration step leaves the bit clock source select in
//! GLBL_TEST_CTRL and the clock buffer outputs in CLKBUFLR_EN. Together they
//! tell whether this PLL runs alone, drives the other PHY or is driven by it.

use super::regs::{CLKBUFLR_EN, DSIPHY_CMN_GLBL_TEST_CTRL, GLBL_TEST_CTRL, PLL_CLKBUFLR_EN};
use super::{DsiPll14nm, Error};
use crate::qualcomm::dsi::PllId;
use device::RegisterBank;
use tock_registers::LocalRegisterCopy;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Topology {
    Standalone,
    Master,
    Slave,
    Unknown,
}

/// Classification latch, written once on the first configure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceSetup {
    Unclassified,
    Classified {
        topology: Topology,
        slave: Option<PllId>,
        clk_buf_en: u32,
        glbl_test_ctrl: u32,
    },
}

impl SourceSetup {
    pub fn topology(&self) -> Option<Topology> {
        match self {
            Self::Unclassified => None,
            Self::Classified { topology, .. } => Some(*topology),
        }
    }
}

/// Classify from the raw register values.
pub fn classify(clk_buf_en: u32, glbl_test_ctrl: u32) -> Topology {
    use CLKBUFLR_EN::OUTPUT::Value as Output;
    use GLBL_TEST_CTRL::BITCLK_HS_SEL::Value as Source;

    let src = LocalRegisterCopy::<u32, GLBL_TEST_CTRL::Register>::new(glbl_test_ctrl);
    let out = LocalRegisterCopy::<u32, CLKBUFLR_EN::Register>::new(clk_buf_en);

    match (
        src.read_as_enum(GLBL_TEST_CTRL::BITCLK_HS_SEL),
        out.read_as_enum(CLKBUFLR_EN::OUTPUT),
    ) {
        (Some(Source::FromLeft), Some(Output::Both)) => Topology::Master,
        (Some(Source::FromRight), Some(Output::Off)) => Topology::Slave,
        (Some(Source::FromLeft), Some(Output::Right)) => Topology::Standalone,
        _ => Topology::Unknown,
    }
}

impl<B: RegisterBank> DsiPll14nm<B> {
    /// Classify this PLL once and link the slave of a master.
    ///
    /// Later calls return the latched result without touching the hardware.
    pub(crate) fn source_setup(&mut self, pll1_present: bool) -> Result<Topology, Error> {
        if let SourceSetup::Classified {
            topology,
            clk_buf_en,
            glbl_test_ctrl,
            ..
        } = self.source
        {
            return match topology {
                Topology::Unknown => Err(Error::UnknownTopology {
                    clk_buf_en,
                    glbl_test_ctrl,
                }),
                t => Ok(t),
            };
        }

        let glbl_test_ctrl = self.rsc.phy_base.read(DSIPHY_CMN_GLBL_TEST_CTRL);
        let clk_buf_en = self.rsc.pll_base.read(PLL_CLKBUFLR_EN);
        let topology = classify(clk_buf_en, glbl_test_ctrl);

        let slave = match topology {
            Topology::Master if pll1_present && self.rsc.index != PllId::Pll1 => {
                Some(PllId::Pll1)
            }
            _ => None,
        };
        self.rsc.slave = slave;
        self.source = SourceSetup::Classified {
            topology,
            slave,
            clk_buf_en,
            glbl_test_ctrl,
        };

        match topology {
            Topology::Unknown => {
                pll_err!(
                    self.rsc,
                    "pll source finding failed, clk_buf_en={:#x} glbl_test_ctrl={:#x}",
                    clk_buf_en,
                    glbl_test_ctrl
                );
                Err(Error::UnknownTopology {
                    clk_buf_en,
                    glbl_test_ctrl,
                })
            }
            Topology::Master => {
                pll_dbg!(
                    self.rsc,
                    "Slave PLL {}",
                    if slave.is_some() { "configured" } else { "absent" }
                );
                Ok(topology)
            }
            t => Ok(t),
        }
    }

    /// Drop the slave link when `id` leaves the registry.
    pub(crate) fn unlink_slave(&mut self, id: PllId) {
        if self.rsc.slave == Some(id) {
            self.rsc.slave = None;
            if let SourceSetup::Classified { slave, .. } = &mut self.source {
                *slave = None;
            }
        }
    }
}
