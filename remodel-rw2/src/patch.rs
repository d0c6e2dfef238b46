use std::io::{Seek, Write};

use remodel_common::math::*;
use remodel_tiff::Raw;

use crate::analyze::fits_target;
use crate::error::{Error, Result};
use crate::TARGET_MODEL;

/// Target model followed by NUL bytes up to `length`
///
/// ```
/// assert_eq!(remodel_rw2::replacement(8).unwrap(), b"DC-S5\0\0\0");
/// ```
pub fn replacement(length: u32) -> Result<Vec<u8>> {
    if !fits_target(length) {
        return Err(Error::FieldTooShort { field_len: length });
    }

    let mut bytes = TARGET_MODEL.as_bytes().to_vec();
    bytes.resize(length.usize()?, 0);

    Ok(bytes)
}

/// Overwrites the `length` bytes at `offset` with the target model
///
/// Only bytes inside the field are touched. The data is written with a single
/// call and flushed before returning.
pub fn write<W: Write + Seek>(writer: W, offset: u32, length: u32) -> Result<()> {
    let bytes = replacement(length)?;
    let mut raw = Raw::new(writer);

    raw.seek_start(offset.into())?;
    raw.write_all(&bytes)?;
    raw.flush()?;

    tracing::debug!("Wrote {} at byte {offset}", hex::encode(&bytes));

    Ok(())
}
