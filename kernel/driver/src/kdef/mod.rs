//! Low level kernel definitions.
#![allow(non_camel_case_types, non_snake_case, dead_code)]

mod general;
pub use general::*;

mod string;
pub use string::*;

mod debug;
pub use debug::*;

mod pool;
pub use pool::*;

mod driver;
pub use driver::*;

mod device;
pub use device::*;

mod irp;
pub use irp::*;

mod guarded;
pub use guarded::*;
