//! Table of the registered PLLs and the clock provider on top of it.

use super::clk::{ByteClk, DsiClk, PixelClk, PllSlot};
use super::{DsiPll14nm, Error, LinkParams, PllResource};
use crate::qualcomm::dsi::config::SSC_FREQ_MIN;
use crate::qualcomm::dsi::{PllId, PllRevision, DSI_PLL_MAX};
use device::RegisterBank;
use embedded_hal::delay::DelayNs;
use spin::rwlock::RwLock;

/// Number of clocks the provider exports, a byte and a pixel clock per PLL
pub const DSI_PLL_NUM_CLKS: usize = 2 * DSI_PLL_MAX;

/// Fixed table of the DSI PLLs, indexed by [`PllId`].
///
/// Usable as a `static`; each slot is locked independently so the two PLLs
/// can be driven from different CPUs.
pub struct PllRegistry<B> {
    slots: [PllSlot<B>; DSI_PLL_MAX],
}

impl<B> PllRegistry<B> {
    pub const fn new() -> Self {
        Self {
            slots: [RwLock::new(None), RwLock::new(None)],
        }
    }
}

impl<B> Default for PllRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RegisterBank> PllRegistry<B> {
    fn slot(&self, id: PllId) -> &PllSlot<B> {
        &self.slots[id.index()]
    }

    /// Take ownership of a PLL and make its clocks available.
    pub fn register(&self, mut rsc: PllResource<B>) -> Result<PllId, Error> {
        if !rsc.pll_base.is_mapped() || !rsc.phy_base.is_mapped() {
            pll_err!(rsc, "Invalid params");
            return Err(Error::InvalidParams);
        }
        if rsc.revision != PllRevision::Dsi14nm {
            pll_err!(rsc, "revision {:?} not supported", rsc.revision);
            return Err(Error::UnsupportedRevision(rsc.revision));
        }

        rsc.ssc = rsc.ssc.with_defaults();
        if rsc.ssc.enabled && rsc.ssc.freq < SSC_FREQ_MIN {
            pll_err!(rsc, "ssc freq {} below {}", rsc.ssc.freq, SSC_FREQ_MIN);
            return Err(Error::InvalidSscFreq(rsc.ssc.freq));
        }

        let id = rsc.index;
        let mut slot = self.slot(id).write();
        if slot.is_some() {
            pll_err!(rsc, "already registered");
            return Err(Error::AlreadyRegistered(id));
        }

        pll_info!(rsc, "Registered clocks successfully");
        *slot = Some(DsiPll14nm::new(rsc));

        Ok(id)
    }

    /// Release a PLL and hand its resource back.
    ///
    /// A master linked to it loses the slave link.
    pub fn unregister(&self, id: PllId) -> Result<PllResource<B>, Error> {
        let pll = self
            .slot(id)
            .write()
            .take()
            .ok_or(Error::NotRegistered(id))?;

        for other in PllId::ALL.iter().filter(|&&o| o != id) {
            if let Some(master) = self.slot(*other).write().as_mut() {
                master.unlink_slave(id);
            }
        }

        Ok(pll.rsc)
    }

    pub fn is_registered(&self, id: PllId) -> bool {
        self.slot(id).read().is_some()
    }

    /// Run `f` on a registered PLL.
    pub fn with_pll<R>(
        &self,
        id: PllId,
        f: impl FnOnce(&mut DsiPll14nm<B>) -> R,
    ) -> Result<R, Error> {
        let mut slot = self.slot(id).write();
        let pll = slot.as_mut().ok_or(Error::NotRegistered(id))?;
        Ok(f(pll))
    }

    pub fn set_link_params(&self, id: PllId, link: LinkParams) -> Result<(), Error> {
        self.with_pll(id, |pll| pll.rsc.set_link(link))
    }

    /// See [`DsiPll14nm::configure`].
    pub fn configure<D: DelayNs>(
        &self,
        id: PllId,
        commit: bool,
        delay: &mut D,
    ) -> Result<(), Error> {
        self.with_pll(id, |pll| {
            // PLL1 is looked up under this slot's lock; unregister(Pll1)
            // unlinks after taking the same lock
            let pll1_present = id == PllId::Pll1 || self.is_registered(PllId::Pll1);
            pll.configure(commit, pll1_present, delay)
        })?
    }

    /// See [`DsiPll14nm::toggle`].
    pub fn toggle<D: DelayNs>(&self, id: PllId, prepare: bool, delay: &mut D) -> Result<(), Error> {
        self.with_pll(id, |pll| pll.toggle(prepare, delay))?
    }

    pub fn byte_clk(&self, id: PllId) -> ByteClk<'_, B> {
        ByteClk::new(id, self.slot(id))
    }

    pub fn pixel_clk(&self, id: PllId) -> PixelClk<'_, B> {
        PixelClk::new(id, self.slot(id))
    }

    /// Provider lookup: byte and pixel clock of PLL0, then of PLL1.
    pub fn clk_get(&self, index: usize) -> Result<DsiClk<'_, B>, Error> {
        if index >= DSI_PLL_NUM_CLKS {
            return Err(Error::IndexOutOfRange(index));
        }
        let id = PllId::from_index(index / 2).ok_or(Error::IndexOutOfRange(index))?;
        if !self.is_registered(id) {
            return Err(Error::NotRegistered(id));
        }

        Ok(if index % 2 == 0 {
            DsiClk::Byte(self.byte_clk(id))
        } else {
            DsiClk::Pixel(self.pixel_clk(id))
        })
    }
}
