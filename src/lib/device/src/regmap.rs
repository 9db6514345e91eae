use msm_asm::io::{readl, wmb, writel};

/// A block of 32-bit device registers addressed by byte offset.
///
/// Writes are not ordered against each other by the device until
/// [`RegisterBank::barrier`] is issued; callers group their writes and
/// close each group with a barrier.
pub trait RegisterBank {
    /// Physical base address of the block, zero when the block is not mapped.
    fn base(&self) -> usize;

    fn read(&self, offset: usize) -> u32;

    fn write(&self, offset: usize, val: u32);

    /// Make every write issued so far visible to the device.
    fn barrier(&self) {
        wmb();
    }

    fn is_mapped(&self) -> bool {
        self.base() != 0
    }

    /// Read-modify-write of the bits selected by `mask`.
    fn update_bits(&self, offset: usize, mask: u32, val: u32) {
        let current = self.read(offset);
        let new = (current & !mask) | (val & mask);
        self.write(offset, new);
    }
}

impl<T: RegisterBank + ?Sized> RegisterBank for &T {
    fn base(&self) -> usize {
        (**self).base()
    }

    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&self, offset: usize, val: u32) {
        (**self).write(offset, val)
    }

    fn barrier(&self) {
        (**self).barrier()
    }
}

/// Memory-mapped register block.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mmio(usize);

impl Mmio {
    /// Wrap the register block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be zero or the address of a device register block that
    /// stays mapped for the lifetime of the returned value, and no other
    /// code may access the block concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self(base)
    }

    pub const fn unmapped() -> Self {
        Self(0)
    }
}

impl RegisterBank for Mmio {
    fn base(&self) -> usize {
        self.0
    }

    fn read(&self, offset: usize) -> u32 {
        readl(self.0 + offset)
    }

    fn write(&self, offset: usize, val: u32) {
        writel(val, self.0 + offset);
    }
}
