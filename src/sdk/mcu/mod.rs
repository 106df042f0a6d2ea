pub mod clock;
pub mod exti;
pub mod gpio;
pub mod irq_i;
pub mod peripherals;
pub mod pin;
pub mod register;

#[cfg(test)]
pub(crate) mod sim;
