//! DSI 14nm PHY and PLL register map.
//!
//! Offsets are byte offsets from the start of the respective block. Each
//! register is 32 bits wide with only the low byte implemented unless a
//! field description says otherwise.

use tock_registers::fields::{Field, FieldValue};
use tock_registers::{register_bitfields, LocalRegisterCopy, RegisterLongName};

/* PLL block */
pub const PLL_IE_TRIM: usize = 0x0000;
pub const PLL_IP_TRIM: usize = 0x0004;
pub const PLL_IPTAT_TRIM: usize = 0x0010;
pub const PLL_CLKBUFLR_EN: usize = 0x001c;
pub const PLL_SYSCLK_EN_RESET: usize = 0x0028;
pub const PLL_RESETSM_CNTRL: usize = 0x002c;
pub const PLL_RESETSM_CNTRL2: usize = 0x0030;
pub const PLL_RESETSM_CNTRL5: usize = 0x003c;
pub const PLL_KVCO_DIV_REF1: usize = 0x0040;
pub const PLL_KVCO_DIV_REF2: usize = 0x0044;
pub const PLL_KVCO_COUNT1: usize = 0x0048;
pub const PLL_KVCO_COUNT2: usize = 0x004c;
pub const PLL_KVCO_CODE: usize = 0x0058;
pub const PLL_VREF_CFG1: usize = 0x0068;
pub const PLL_VCO_DIV_REF1: usize = 0x006c;
pub const PLL_VCO_DIV_REF2: usize = 0x0070;
pub const PLL_VCO_COUNT1: usize = 0x0074;
pub const PLL_VCO_COUNT2: usize = 0x0078;
pub const PLL_PLLLOCK_CMP1: usize = 0x007c;
pub const PLL_PLLLOCK_CMP2: usize = 0x0080;
pub const PLL_PLLLOCK_CMP3: usize = 0x0084;
pub const PLL_PLLLOCK_CMP_EN: usize = 0x0088;
pub const PLL_DEC_START: usize = 0x0090;
pub const PLL_SSC_EN_CENTER: usize = 0x0094;
pub const PLL_SSC_ADJ_PER1: usize = 0x0098;
pub const PLL_SSC_ADJ_PER2: usize = 0x009c;
pub const PLL_SSC_PER1: usize = 0x00a0;
pub const PLL_SSC_PER2: usize = 0x00a4;
pub const PLL_SSC_STEP_SIZE1: usize = 0x00a8;
pub const PLL_SSC_STEP_SIZE2: usize = 0x00ac;
pub const PLL_DIV_FRAC_START1: usize = 0x00b4;
pub const PLL_DIV_FRAC_START2: usize = 0x00b8;
pub const PLL_DIV_FRAC_START3: usize = 0x00bc;
pub const PLL_TXCLK_EN: usize = 0x00c0;
pub const PLL_PLL_CRCTRL: usize = 0x00c4;
pub const PLL_RESET_SM_READY_STATUS: usize = 0x00cc;
pub const PLL_PLL_MISC1: usize = 0x00e8;
pub const PLL_CP_SET_CUR: usize = 0x00f0;
pub const PLL_PLL_ICPMSET: usize = 0x00f4;
pub const PLL_PLL_ICPCSET: usize = 0x00f8;
pub const PLL_PLL_ICP_SET: usize = 0x00fc;
pub const PLL_PLL_LPF1: usize = 0x0100;
pub const PLL_PLL_LPF2_POSTDIV: usize = 0x0104;

/* PHY common block */
pub const DSIPHY_CMN_CLK_CFG0: usize = 0x0010;
pub const DSIPHY_CMN_CLK_CFG1: usize = 0x0014;
pub const DSIPHY_CMN_GLBL_TEST_CTRL: usize = 0x0018;
pub const DSIPHY_CMN_CTRL_0: usize = 0x001c;
pub const DSIPHY_CMN_CTRL_1: usize = 0x0020;
pub const DSIPHY_CMN_PLL_CNTRL: usize = 0x0048;
pub const DSIPHY_CMN_LDO_CNTRL: usize = 0x004c;

/// CTRL_0 value enabling the data lanes, clock lane and PLL for normal operation
pub const CMN_CTRL_0_NORMAL: u32 = 0xff;
/// VREF_CFG1 value programmed ahead of a PLL start
pub const VREF_CFG1_START: u32 = 0x10;

register_bitfields![u32,
    pub CLK_CFG0 [
        /// PLL post divider (N1)
        N1_DIV OFFSET(0) NUMBITS(4) [],
        /// Pixel clock divider (N2)
        N2_DIV OFFSET(4) NUMBITS(4) []
    ],
    pub CLK_CFG1 [
        /// Doubles the N2 divider on the pixel clock path
        DSICLK_SEL OFFSET(0) NUMBITS(1) []
    ],
    pub GLBL_TEST_CTRL [
        BITCLK_HS_SEL OFFSET(2) NUMBITS(1) [
            FromLeft = 0,
            FromRight = 1
        ]
    ],
    pub CLKBUFLR_EN [
        OUTPUT OFFSET(0) NUMBITS(2) [
            Off = 0,
            Right = 1,
            Left = 2,
            Both = 3
        ]
    ],
    pub CMN_CTRL_1 [
        PLL_SW_RESET OFFSET(5) NUMBITS(1) []
    ],
    pub CMN_PLL_CNTRL [
        PLL_START OFFSET(0) NUMBITS(1) []
    ],
    pub RESET_SM_READY_STATUS [
        PLL_LOCKED OFFSET(0) NUMBITS(1) [],
        PLL_READY OFFSET(5) NUMBITS(1) []
    ],
    pub PLLLOCK_CMP_EN [
        PLLLOCK_CNT OFFSET(1) NUMBITS(2) [],
        PLLLOCK_RNG OFFSET(3) NUMBITS(2) []
    ],
    pub SSC_EN_CENTER [
        SSC_EN OFFSET(0) NUMBITS(1) [],
        SSC_CENTER OFFSET(1) NUMBITS(1) []
    ],
    pub LPF2_POSTDIV [
        LPF_RES1 OFFSET(0) NUMBITS(4) [],
        TX_BAND OFFSET(4) NUMBITS(2) []
    ]
];

/// Register value holding only the given fields, everything else zero.
pub fn fields<R: RegisterLongName>(value: FieldValue<u32, R>) -> u32 {
    let mut reg = LocalRegisterCopy::<u32, R>::new(0);
    reg.modify(value);
    reg.get()
}

/// In-place mask of `field`, for read-modify-write through the bank.
pub fn field_mask<R: RegisterLongName>(field: Field<u32, R>) -> u32 {
    field.mask << field.shift
}
