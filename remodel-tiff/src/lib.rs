//! Reading TIFF based containers
//!
//! Only the parts needed to find and rewrite single tags in place are
//! covered: the 8 byte header, IFD entry tables and locating tag values.
//! Panasonic RW2 files are accepted as well since they only differ in the
//! magic number.

mod error;
mod header;
mod ifd;
mod raw;
mod type_;

pub use error::*;
pub use header::*;
pub use ifd::*;
pub use raw::*;
pub use type_::*;
