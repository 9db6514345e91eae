//! PLL start, stop and lock detection.

use super::regs::{
    fields, CMN_PLL_CNTRL, DSIPHY_CMN_PLL_CNTRL, PLL_RESET_SM_READY_STATUS, PLL_VREF_CFG1,
    RESET_SM_READY_STATUS, VREF_CFG1_START,
};
use super::{DsiPll14nm, Error};
use crate::qualcomm::dsi::config::{DSI_PLL_POLL_MAX_READS, DSI_PLL_POLL_TIMEOUT_US};
use device::RegisterBank;
use embedded_hal::delay::DelayNs;
use tock_registers::fields::Field;
use tock_registers::LocalRegisterCopy;
use util::timer::SpinPoll;

/// Enable state of the oscillator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockState {
    Stopped,
    /// Started, waiting for ready and lock
    Starting,
    Locked,
    Failed,
}

/// Lock status poll: 15 reads, 1 ms apart.
pub const LOCK_POLL: SpinPoll = SpinPoll::new(DSI_PLL_POLL_MAX_READS, DSI_PLL_POLL_TIMEOUT_US);

fn status_bit(field: Field<u32, RESET_SM_READY_STATUS::Register>) -> impl Fn(u32) -> bool {
    move |status| LocalRegisterCopy::<u32, RESET_SM_READY_STATUS::Register>::new(status).is_set(field)
}

impl<B: RegisterBank> DsiPll14nm<B> {
    fn start(&mut self) {
        self.rsc.pll_base.write(PLL_VREF_CFG1, VREF_CFG1_START);
        self.rsc
            .phy_base
            .write(DSIPHY_CMN_PLL_CNTRL, fields(CMN_PLL_CNTRL::PLL_START::SET));
        self.state = LockState::Starting;
    }

    fn stop(&mut self) {
        self.rsc.phy_base.write(DSIPHY_CMN_PLL_CNTRL, 0);
    }

    /// Wait for the reset state machine to report ready, then locked.
    fn lock_status<D: DelayNs>(&self, delay: &mut D) -> Result<u32, Error> {
        let pll = &self.rsc.pll_base;
        let read = || pll.read(PLL_RESET_SM_READY_STATUS);

        LOCK_POLL
            .wait(delay, read, status_bit(RESET_SM_READY_STATUS::PLL_READY))
            .map_err(|t| {
                pll_dbg!(self.rsc, "status={:#x} PLL not ready", t.last);
                Error::NotReady { status: t.last }
            })?;

        LOCK_POLL
            .wait(delay, read, status_bit(RESET_SM_READY_STATUS::PLL_LOCKED))
            .map_err(|t| {
                pll_dbg!(self.rsc, "status={:#x} failed to lock", t.last);
                Error::NotLocked { status: t.last }
            })
    }

    /// Start the PLL and wait for lock.
    pub fn enable<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.start();

        match self.lock_status(delay) {
            Ok(status) => {
                self.state = LockState::Locked;
                pll_dbg!(self.rsc, "Lock success, status={:#x}", status);
                Ok(())
            }
            Err(e) => {
                self.state = LockState::Failed;
                pll_err!(self.rsc, "lock failed: {}", e);
                Err(e)
            }
        }
    }

    /// Stop the PLL. No lock check.
    pub fn disable(&mut self) {
        pll_dbg!(self.rsc, "stop PLL");
        self.stop();
        self.rsc.phy_base.barrier();
        self.state = LockState::Stopped;
    }
}
