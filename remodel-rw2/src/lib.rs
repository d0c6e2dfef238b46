//! Changing the camera model of Lumix S9 raw files
//!
//! Some raw converters only accept files from cameras they know. The S9 shares
//! its sensor with the S5, so rewriting the Model tag (`0x0110`) in IFD0 from
//! `DC-S9` to `DC-S5` makes those converters accept the files.
//!
//! The work is split into three steps that each open their own stream:
//!
//! 1. [`analyze`] locates the Model tag and decides whether the file needs a
//!    change.
//! 2. [`write`] overwrites the tag's value with [`TARGET_MODEL`], padded with
//!    NUL bytes to the original length. The file size never changes.
//! 3. [`check`] reads the header and the written value back.
//!
//! None of the steps make backups. Callers have to keep a copy of the file
//! around before calling [`write`] and restore it if any later step fails.
//!
//! ```
//! # use std::io::Cursor;
//! let mut data = Vec::new();
//! data.extend_from_slice(b"II*\0");
//! data.extend_from_slice(&8_u32.to_le_bytes());
//! data.extend_from_slice(&1_u16.to_le_bytes());
//! data.extend_from_slice(&0x0110_u16.to_le_bytes());
//! data.extend_from_slice(&2_u16.to_le_bytes());
//! data.extend_from_slice(&6_u32.to_le_bytes());
//! data.extend_from_slice(&22_u32.to_le_bytes());
//! data.extend_from_slice(b"DC-S9\0");
//!
//! let mut file = Cursor::new(data);
//! let remodel_rw2::Analysis::Convert(field) = remodel_rw2::analyze(&mut file).unwrap() else {
//!     panic!("expected conversion");
//! };
//! assert_eq!(field.offset, 22);
//!
//! remodel_rw2::write(&mut file, field.offset, field.length).unwrap();
//! remodel_rw2::check(&mut file, field.offset).unwrap();
//! assert!(file.get_ref().ends_with(b"DC-S5\0"));
//! ```

mod analyze;
mod error;
mod patch;
mod validate;

pub use analyze::*;
pub use error::*;
pub use patch::*;
pub use validate::*;

pub use remodel_tiff::ByteOrder;

/// Model that is written into the files
pub const TARGET_MODEL: &str = "DC-S5";
/// Part of the model name that identifies files that can be converted
pub const SOURCE_MARKER: &str = "S9";
