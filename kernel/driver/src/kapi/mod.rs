mod string;
pub use string::*;

mod device;
pub use device::*;

mod irp;
pub use irp::*;

mod host;
pub use host::*;

mod allocator;
