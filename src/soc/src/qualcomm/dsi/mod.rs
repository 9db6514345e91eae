pub mod config;
pub mod pll_14nm;

/// Number of DSI PLL instances on the SoC
pub const DSI_PLL_MAX: usize = 2;

/// Physical DSI PLL instance.
#[repr(usize)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PllId {
    Pll0 = 0,
    Pll1 = 1,
}

impl PllId {
    pub const ALL: [PllId; DSI_PLL_MAX] = [PllId::Pll0, PllId::Pll1];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Pll0),
            1 => Some(Self::Pll1),
            _ => None,
        }
    }
}

/// PHY generation the PLL block belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PllRevision {
    Dsi28nm,
    Dsi14nm,
    Dsi10nm,
    Dsi7nm,
}
