#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod device;
pub mod dispatch;
pub mod handler;
pub mod kapi;
pub mod logger;
pub mod subsystem;

mod driver;
pub use driver::*;

#[cfg(test)]
mod testing;

pub use kmon_driver_shared as shared;
