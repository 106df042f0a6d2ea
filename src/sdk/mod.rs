pub mod common;
pub mod mcu;
