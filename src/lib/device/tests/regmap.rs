use std::cell::RefCell;

use device::{ErrorKind, Mmio, RegisterBank};
use util::errno::Errno;

struct Regs {
    base: usize,
    words: RefCell<[u32; 4]>,
    barriers: RefCell<usize>,
}

impl Regs {
    fn new(base: usize) -> Self {
        Self {
            base,
            words: RefCell::new([0; 4]),
            barriers: RefCell::new(0),
        }
    }
}

impl RegisterBank for Regs {
    fn base(&self) -> usize {
        self.base
    }

    fn read(&self, offset: usize) -> u32 {
        self.words.borrow()[offset / 4]
    }

    fn write(&self, offset: usize, val: u32) {
        self.words.borrow_mut()[offset / 4] = val;
    }

    fn barrier(&self) {
        *self.barriers.borrow_mut() += 1;
    }
}

#[test]
fn update_bits_keeps_unmasked_bits() {
    let regs = Regs::new(0x1000);
    regs.write(0x4, 0xa5);

    regs.update_bits(0x4, 0x0f, 0x3c);

    assert_eq!(regs.read(0x4), 0xac);
    assert_eq!(regs.read(0x0), 0);
}

#[test]
fn mapping_follows_base() {
    assert!(Regs::new(0x1000).is_mapped());
    assert!(!Regs::new(0).is_mapped());
    assert!(!Mmio::unmapped().is_mapped());
}

#[test]
fn references_forward_to_the_bank() {
    let regs = Regs::new(0x2000);
    let by_ref = &regs;

    by_ref.write(0x8, 7);
    by_ref.barrier();

    assert_eq!(by_ref.base(), 0x2000);
    assert_eq!(regs.read(0x8), 7);
    assert_eq!(*regs.barriers.borrow(), 1);
}

#[test]
fn error_kind_errno() {
    assert_eq!(Errno::from(ErrorKind::InvalidArgument), Errno::EINVAL);
    assert_eq!(Errno::from(ErrorKind::Configuration), Errno::EINVAL);
    assert_eq!(Errno::from(ErrorKind::Timeout), Errno::ETIMEDOUT);
    assert_eq!(Errno::from(ErrorKind::NotSupported), Errno::ENOTSUPP);
    assert_eq!(Errno::from(ErrorKind::Unimplemented), Errno::ENOTSUPP);
    assert_eq!(Errno::from(ErrorKind::AlreadyExists), Errno::EEXIST);
}
