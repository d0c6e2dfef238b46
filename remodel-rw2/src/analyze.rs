use std::io::{Read, Seek};

use remodel_tiff::{ByteOrder, Ifd, IfdEntry, Raw, Tag, TiffHeader, Type};

use crate::error::{Error, Result};
use crate::{SOURCE_MARKER, TARGET_MODEL};

/// Where the model string is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLocation {
    /// Absolute position of the string's first byte
    pub offset: u32,
    /// Declared length of the field including NUL bytes
    pub length: u32,
    /// The string is stored inside the IFD entry
    pub inline: bool,
}

impl ModelLocation {
    /// Strings of up to four bytes are stored in the entry's value slot,
    /// longer ones at the offset stored in that slot
    pub fn resolve(entry: &IfdEntry) -> Result<Self> {
        if entry.data_type != Type::Ascii {
            return Err(Error::UnexpectedType(entry.data_type));
        }

        Ok(Self {
            offset: entry.value_position()?,
            length: entry.count,
            inline: entry.value_offset.is_inline(),
        })
    }
}

/// Model tag as found in IFD0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTag {
    pub header: TiffHeader,
    pub location: ModelLocation,
    /// Decoded value up to the first NUL byte
    pub model: String,
}

/// Field that has to be rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelField {
    pub offset: u32,
    pub length: u32,
    pub byte_order: ByteOrder,
}

impl ModelField {
    pub fn is_little_endian(&self) -> bool {
        self.byte_order.is_little_endian()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// The model has to be replaced
    Convert(ModelField),
    /// The file already carries the target model
    Skip,
}

/// Finds the Model tag in IFD0 and reads its value
pub fn read_model<R: Read + Seek>(reader: R) -> Result<ModelTag> {
    let mut raw = Raw::new(reader);

    let header = TiffHeader::decode(&mut raw)?;
    let ifd = Ifd::read(&mut raw, header.ifd0_offset)?;

    let entry = ifd.entry(Tag::MODEL).ok_or(Error::ModelTagNotFound)?;
    let location = ModelLocation::resolve(entry)?;

    let bytes = entry.read_value(&mut raw)?;
    let model = decode_ascii(&bytes);

    tracing::debug!(
        "Model {model:?} at byte {} with {} bytes (inline: {})",
        location.offset,
        location.length,
        location.inline
    );

    Ok(ModelTag {
        header,
        location,
        model,
    })
}

/// Decides if and where the model has to be replaced
pub fn analyze<R: Read + Seek>(reader: R) -> Result<Analysis> {
    let tag = read_model(reader)?;
    let analysis = decide(&tag)?;

    match analysis {
        Analysis::Skip => tracing::info!("Model is already {TARGET_MODEL:?}"),
        Analysis::Convert(field) => tracing::info!(
            "Model {:?} will be replaced at byte {}",
            tag.model,
            field.offset
        ),
    }

    Ok(analysis)
}

fn decide(tag: &ModelTag) -> Result<Analysis> {
    if tag.model == TARGET_MODEL {
        return Ok(Analysis::Skip);
    }

    if !tag.model.contains(SOURCE_MARKER) {
        return Err(Error::NotSourceModel(tag.model.clone()));
    }

    if !fits_target(tag.location.length) {
        return Err(Error::FieldTooShort {
            field_len: tag.location.length,
        });
    }

    Ok(Analysis::Convert(ModelField {
        offset: tag.location.offset,
        length: tag.location.length,
        byte_order: tag.header.byte_order,
    }))
}

/// Whether the target model and its NUL terminator fit into `length` bytes
pub(crate) fn fits_target(length: u32) -> bool {
    u32::try_from(TARGET_MODEL.len()).is_ok_and(|len| len < length)
}

/// ASCII value up to the first NUL byte
fn decode_ascii(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|x| *x == 0).unwrap_or(bytes.len());
    let value = bytes.get(..end).unwrap_or_default();
    String::from_utf8_lossy(value).into_owned()
}
