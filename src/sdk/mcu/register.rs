use bitflags::bitflags;
use crate::{BIT, BIT_RNG};

// Every register access in the crate funnels through these two primitives so
// that tests can intercept them and substitute a simulated register file.

#[inline(always)]
#[cfg_attr(test, mry::mry)]
pub fn read_reg32(addr: u32) -> u32 {
    unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
}

#[inline(always)]
#[cfg_attr(test, mry::mry)]
pub fn write_reg32(addr: u32, value: u32) {
    unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
}

/// Register at a fixed address.
macro_rules! regrw {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[inline(always)]
            pub fn [<read_ $x>]() -> u32 {
                read_reg32($a)
            }

            #[inline(always)]
            pub fn [<write_ $x>](value: u32) {
                write_reg32($a, value)
            }
        }
    };
}

/// Register at `$a + i`, where `i` is the base address of the owning block
/// (GPIO ports) or the byte offset of one register in an array (EXTICR, NVIC).
macro_rules! regrw_idx {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[inline(always)]
            pub fn [<read_ $x>](i: u32) -> u32 {
                read_reg32($a + i)
            }

            #[inline(always)]
            pub fn [<write_ $x>](value: u32, i: u32) {
                write_reg32($a + i, value)
            }
        }
    };
}

/****************************************************
 gpio regs struct: one block per port, begin 0x40020000
 *****************************************************/
pub const GPIO_BASE_ADDR: u32 = 0x4002_0000;
pub const GPIO_PORT_STRIDE: u32 = 0x400;
pub const GPIO_PORT_COUNT: u8 = 9;

pub const GPIO_MODER: u32 = 0x00;
pub const GPIO_OTYPER: u32 = 0x04;
pub const GPIO_OSPEEDR: u32 = 0x08;
pub const GPIO_PUPDR: u32 = 0x0c;
pub const GPIO_IDR: u32 = 0x10;
pub const GPIO_ODR: u32 = 0x14;
pub const GPIO_BSRR: u32 = 0x18;
pub const GPIO_AFRL: u32 = 0x20;
pub const GPIO_AFRH: u32 = 0x24;

regrw_idx!(reg_gpio_moder, GPIO_MODER);
regrw_idx!(reg_gpio_otyper, GPIO_OTYPER);
regrw_idx!(reg_gpio_ospeedr, GPIO_OSPEEDR);
regrw_idx!(reg_gpio_pupdr, GPIO_PUPDR);
regrw_idx!(reg_gpio_idr, GPIO_IDR);
regrw_idx!(reg_gpio_odr, GPIO_ODR);
regrw_idx!(reg_gpio_bsrr, GPIO_BSRR);
regrw_idx!(reg_gpio_afrl, GPIO_AFRL);
regrw_idx!(reg_gpio_afrh, GPIO_AFRH);

// Field widths, in bits per pin
pub const GPIO_MODER_WIDTH: u32 = 2;
pub const GPIO_OTYPER_WIDTH: u32 = 1;
pub const GPIO_OSPEEDR_WIDTH: u32 = 2;
pub const GPIO_PUPDR_WIDTH: u32 = 2;
pub const GPIO_DATA_WIDTH: u32 = 1;
pub const GPIO_AFR_WIDTH: u32 = 4;
// 16 pins x 4 bits does not fit one register: AFRL holds pins 0-7, AFRH pins 8-15
pub const GPIO_AFR_PINS_PER_REG: u8 = 8;

bitflags! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FLD_GPIO_BSRR: u32 {
        const BS = BIT_RNG!(0, 15);
        const BR = BIT_RNG!(16, 31);
    }
}

pub const GPIO_BSRR_RESET_SHIFT: u32 = 16;

#[inline(always)]
pub const fn gpio_port_base(index: u8) -> u32 {
    GPIO_BASE_ADDR + GPIO_PORT_STRIDE * index as u32
}

/****************************************************
 rcc regs struct: begin 0x40023800
 *****************************************************/
pub const RCC_BASE_ADDR: u32 = 0x4002_3800;

regrw!(reg_rcc_ahb1enr, RCC_BASE_ADDR + 0x30);
regrw!(reg_rcc_apb2enr, RCC_BASE_ADDR + 0x44);

bitflags! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FLD_RCC_AHB1ENR: u32 {
        const GPIOA_EN = BIT!(0);
        const GPIOB_EN = BIT!(1);
        const GPIOC_EN = BIT!(2);
        const GPIOD_EN = BIT!(3);
        const GPIOE_EN = BIT!(4);
        const GPIOF_EN = BIT!(5);
        const GPIOG_EN = BIT!(6);
        const GPIOH_EN = BIT!(7);
        const GPIOI_EN = BIT!(8);
    }
}

bitflags! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FLD_RCC_APB2ENR: u32 {
        const SYSCFG_EN = BIT!(14);
    }
}

/****************************************************
 syscfg regs struct: begin 0x40013800
 *****************************************************/
pub const SYSCFG_BASE_ADDR: u32 = 0x4001_3800;

// EXTICR1..4, indexed by byte offset (4 * register number)
regrw_idx!(reg_syscfg_exticr, SYSCFG_BASE_ADDR + 0x08);

pub const SYSCFG_EXTICR_WIDTH: u32 = 4;
pub const SYSCFG_EXTICR_LINES_PER_REG: u8 = 4;

/****************************************************
 exti regs struct: begin 0x40013c00
 *****************************************************/
pub const EXTI_BASE_ADDR: u32 = 0x4001_3c00;

pub const EXTI_IMR: u32 = EXTI_BASE_ADDR + 0x00;
pub const EXTI_RTSR: u32 = EXTI_BASE_ADDR + 0x08;
pub const EXTI_FTSR: u32 = EXTI_BASE_ADDR + 0x0c;
pub const EXTI_SWIER: u32 = EXTI_BASE_ADDR + 0x10;
// Write 1 to clear, writing 0 has no effect
pub const EXTI_PR: u32 = EXTI_BASE_ADDR + 0x14;

regrw!(reg_exti_imr, EXTI_IMR);
regrw!(reg_exti_rtsr, EXTI_RTSR);
regrw!(reg_exti_ftsr, EXTI_FTSR);
regrw!(reg_exti_swier, EXTI_SWIER);
regrw!(reg_exti_pr, EXTI_PR);

pub const EXTI_LINE_WIDTH: u32 = 1;

/****************************************************
 nvic regs struct: begin 0xe000e100
 *****************************************************/
// Each array is write 1 to act, one bit per interrupt number, word n / 32
pub const NVIC_ISER: u32 = 0xe000_e100;
pub const NVIC_ICER: u32 = 0xe000_e180;
pub const NVIC_ICPR: u32 = 0xe000_e280;

regrw_idx!(reg_nvic_iser, NVIC_ISER);
regrw_idx!(reg_nvic_icer, NVIC_ICER);
regrw_idx!(reg_nvic_icpr, NVIC_ICPR);
