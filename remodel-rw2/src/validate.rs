use std::io::{Read, Seek};

use remodel_common::math::*;
use remodel_tiff::{Raw, TiffHeader};

use crate::error::{Error, Result};
use crate::TARGET_MODEL;

/// Confirms that a write landed where it should
///
/// The header is decoded again to make sure it was not overwritten, then the
/// bytes at `offset` are compared with the target model. The comparison is on
/// raw bytes, NUL bytes are not stripped.
pub fn check<R: Read + Seek>(reader: R, offset: u32) -> Result<()> {
    let mut raw = Raw::new(reader);

    TiffHeader::decode(&mut raw).map_err(Error::HeaderDamaged)?;

    raw.seek_start(offset.into())?;
    let expected = TARGET_MODEL.as_bytes();
    let found = raw.read_vec(expected.len().u64()?)?;

    if found != expected {
        return Err(Error::ModelMismatch {
            found: String::from_utf8_lossy(&found).into_owned(),
        });
    }

    tracing::debug!("Model at byte {offset} verified");

    Ok(())
}

/// Compares the file size after writing with the size before
pub fn check_size(before: u64, after: u64) -> Result<()> {
    if before == after {
        Ok(())
    } else {
        Err(Error::SizeChanged { before, after })
    }
}

/// Ensures that no more than `allowed` bytes differ between both streams
///
/// Bytes that only exist in one of the streams count as changed.
pub fn check_changed_bytes<A: Read, B: Read>(before: A, after: B, allowed: u32) -> Result<()> {
    let changed = count_changed_bytes(before, after)?;

    if changed > u64::from(allowed) {
        Err(Error::TooManyBytesChanged { changed, allowed })
    } else {
        Ok(())
    }
}

/// Number of positions at which the streams differ
pub fn count_changed_bytes<A: Read, B: Read>(mut before: A, mut after: B) -> Result<u64> {
    const CHUNK: usize = 65_536;

    let mut buf_before = vec![0; CHUNK];
    let mut buf_after = vec![0; CHUNK];
    let mut changed = 0_u64;

    loop {
        let n_before = fill(&mut before, &mut buf_before)?;
        let n_after = fill(&mut after, &mut buf_after)?;

        let common = n_before.min(n_after);
        let differing = buf_before
            .iter()
            .zip(&buf_after)
            .take(common)
            .filter(|(a, b)| a != b)
            .count();
        let extra = n_before.max(n_after).safe_sub(common)?;

        changed = changed.safe_add(differing.u64()?)?.safe_add(extra.u64()?)?;

        if n_before < CHUNK || n_after < CHUNK {
            // One stream ended, everything left in the other counts as changed
            changed = changed
                .safe_add(remaining(&mut before)?)?
                .safe_add(remaining(&mut after)?)?;
            return Ok(changed);
        }
    }
}

/// Reads until `buf` is full or the stream ends
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while let Some(rest) = buf.get_mut(filled..) {
        if rest.is_empty() {
            break;
        }
        match reader.read(rest) {
            Ok(0) => break,
            Ok(n) => filled = n.saturating_add(filled),
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

fn remaining<R: Read>(reader: &mut R) -> Result<u64> {
    Ok(std::io::copy(reader, &mut std::io::sink())?)
}
