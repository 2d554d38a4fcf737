mod status;
pub use status::*;

mod irp;
pub use irp::*;

mod host;
pub use host::*;

mod guarded;
pub use guarded::*;
