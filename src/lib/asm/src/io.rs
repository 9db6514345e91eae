use core::ptr::{read_volatile, write_volatile};
use core::sync::atomic::{compiler_fence, fence, Ordering};

///! MMIO accessors modelled on the Linux <asm/io.h> helpers.
///!
///! Register blocks on the display PHY are little-endian 32-bit words.

fn _raw_readl(a: usize) -> u32 {
    unsafe { read_volatile::<u32>(a as *const u32) }
}

fn _raw_writel(v: u32, a: usize) {
    unsafe { write_volatile::<u32>(a as *mut u32, v) }
}

fn readl_relaxed(c: usize) -> u32 {
    u32::from_le(_raw_readl(c))
}

fn writel_relaxed(v: u32, c: usize) {
    _raw_writel(v.to_le(), c);
}

/// Write memory barrier.
///
/// Every write issued before the barrier is visible to the device before
/// any write issued after it.
#[inline(always)]
pub fn wmb() {
    #[cfg(target_arch = "aarch64")]
    unsafe {
        core::arch::asm!("dsb st", options(nostack, preserves_flags));
    }
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!("dsb st", options(nostack, preserves_flags));
    }
    #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
    fence(Ordering::SeqCst);

    compiler_fence(Ordering::SeqCst);
}

/// Read memory barrier.
#[inline(always)]
pub fn rmb() {
    #[cfg(target_arch = "aarch64")]
    unsafe {
        core::arch::asm!("dsb ld", options(nostack, preserves_flags));
    }
    #[cfg(not(target_arch = "aarch64"))]
    fence(Ordering::Acquire);

    compiler_fence(Ordering::SeqCst);
}

pub fn readl(c: usize) -> u32 {
    let v = readl_relaxed(c);
    rmb();
    v
}

pub fn writel(v: u32, c: usize) {
    writel_relaxed(v, c);
}
