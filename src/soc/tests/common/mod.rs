#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use device::RegisterBank;
use embedded_hal::delay::DelayNs;
use msm_soc::qualcomm::dsi::pll_14nm::regs::*;
use msm_soc::qualcomm::dsi::pll_14nm::{LinkParams, PllResource};
use msm_soc::qualcomm::dsi::PllId;

pub const PLL0_BASE: usize = 0x0099_4400;
pub const PHY0_BASE: usize = 0x0099_4000;
pub const PLL1_BASE: usize = 0x0099_6400;
pub const PHY1_BASE: usize = 0x0099_6000;

pub const STATUS_READY_LOCKED: u32 = (1 << 5) | 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bank {
    Pll,
    Phy,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    Read(Bank, usize),
    Write(Bank, usize, u32),
    Barrier(Bank),
    DelayUs(u32),
}

pub type Trace = Rc<RefCell<Vec<Access>>>;

/// Register block backed by a map, recording every access.
#[derive(Debug)]
pub struct SimBank {
    bank: Bank,
    base: usize,
    regs: RefCell<BTreeMap<usize, u32>>,
    script: RefCell<BTreeMap<usize, VecDeque<u32>>>,
    trace: Trace,
}

impl SimBank {
    pub fn new(bank: Bank, base: usize, trace: Trace) -> Self {
        Self {
            bank,
            base,
            regs: RefCell::new(BTreeMap::new()),
            script: RefCell::new(BTreeMap::new()),
            trace,
        }
    }

    /// Preset a register without tracing.
    pub fn set(&self, offset: usize, val: u32) {
        self.regs.borrow_mut().insert(offset, val);
    }

    pub fn get(&self, offset: usize) -> u32 {
        self.regs.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Values returned by the next reads of `offset`, before the register
    /// value takes over again.
    pub fn script(&self, offset: usize, values: impl IntoIterator<Item = u32>) {
        self.script
            .borrow_mut()
            .entry(offset)
            .or_default()
            .extend(values);
    }
}

impl RegisterBank for SimBank {
    fn base(&self) -> usize {
        self.base
    }

    fn read(&self, offset: usize) -> u32 {
        self.trace.borrow_mut().push(Access::Read(self.bank, offset));
        if let Some(v) = self
            .script
            .borrow_mut()
            .get_mut(&offset)
            .and_then(|q| q.pop_front())
        {
            return v;
        }
        self.get(offset)
    }

    fn write(&self, offset: usize, val: u32) {
        self.trace
            .borrow_mut()
            .push(Access::Write(self.bank, offset, val));
        self.set(offset, val);
    }

    fn barrier(&self) {
        self.trace.borrow_mut().push(Access::Barrier(self.bank));
    }
}

/// Delay provider that only accounts for the time it was asked to spin.
pub struct SimDelay {
    trace: Trace,
    pub total_ns: u64,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Access::DelayUs(us));
        self.total_ns += us as u64 * 1000;
    }
}

/// PLL and PHY blocks of one DSI instance sharing a trace.
pub struct Soc {
    pub trace: Trace,
    pub pll: SimBank,
    pub phy: SimBank,
}

impl Soc {
    pub fn new(id: PllId) -> Self {
        let (pll_base, phy_base) = match id {
            PllId::Pll0 => (PLL0_BASE, PHY0_BASE),
            PllId::Pll1 => (PLL1_BASE, PHY1_BASE),
        };
        Self::with_bases(pll_base, phy_base)
    }

    pub fn with_bases(pll_base: usize, phy_base: usize) -> Self {
        let trace = Trace::default();
        Self {
            pll: SimBank::new(Bank::Pll, pll_base, trace.clone()),
            phy: SimBank::new(Bank::Phy, phy_base, trace.clone()),
            trace,
        }
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            trace: self.trace.clone(),
            total_ns: 0,
        }
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.trace.borrow().clone()
    }

    /// Everything but reads, in issue order.
    pub fn effects(&self) -> Vec<Access> {
        self.trace
            .borrow()
            .iter()
            .copied()
            .filter(|a| !matches!(a, Access::Read(..)))
            .collect()
    }

    pub fn reads_of(&self, bank: Bank, offset: usize) -> usize {
        self.trace
            .borrow()
            .iter()
            .filter(|a| **a == Access::Read(bank, offset))
            .count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.trace
            .borrow()
            .iter()
            .filter_map(|a| match a {
                Access::DelayUs(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    pub fn clear_trace(&self) {
        self.trace.borrow_mut().clear();
    }

    pub fn standalone(&self) {
        self.phy.set(DSIPHY_CMN_GLBL_TEST_CTRL, 0);
        self.pll.set(PLL_CLKBUFLR_EN, 0b01);
    }

    pub fn master(&self) {
        self.phy.set(DSIPHY_CMN_GLBL_TEST_CTRL, 0);
        self.pll.set(PLL_CLKBUFLR_EN, 0b11);
    }

    pub fn slave(&self) {
        self.phy.set(DSIPHY_CMN_GLBL_TEST_CTRL, 1 << 2);
        self.pll.set(PLL_CLKBUFLR_EN, 0b00);
    }

    /// PLL reports ready and locked on the `n`th status read.
    pub fn lock_after(&self, n: usize) {
        self.pll
            .script(PLL_RESET_SM_READY_STATUS, std::iter::repeat(0).take(n - 1));
        self.pll.set(PLL_RESET_SM_READY_STATUS, STATUS_READY_LOCKED);
    }

    pub fn resource(&self, id: PllId) -> PllResource<&SimBank> {
        PllResource::new(id, &self.pll, &self.phy)
    }
}

/// 100 MHz byte clock, RGB888 over four lanes.
pub const LINK_800M_4L: LinkParams = LinkParams {
    byteclk_rate: 100_000_000,
    bpp: 24,
    lanes: 4,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
