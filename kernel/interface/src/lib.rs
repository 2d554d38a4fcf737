mod com;
pub use com::*;

mod error;
pub use error::*;

mod kinterface;
pub use kinterface::*;

pub use kmon_driver_shared::requests::{
    KmonInit,
    KmonRelease,
    KmonScreenshot,
    OpenDesktop,
    OpenWinsta,
};
