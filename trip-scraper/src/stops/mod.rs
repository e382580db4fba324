//! Stop directory loading.
//!
//! The directory is produced ahead of time by geocoding the vendor's stop
//! pages; here it is read once at startup and shared read-only.

mod error;
mod load;

pub use error::StopDirectoryError;
pub use load::{StopRecord, build_directory, load_directory, parse_directory};
