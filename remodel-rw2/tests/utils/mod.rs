#![allow(dead_code)]

pub use remodel_rw2::*;

/// Builds a minimal TIFF file with a single IFD0
///
/// IFD0 sits directly behind the header. The Make tag comes first, the Model
/// tag second. Values longer than four bytes are stored behind the IFD.
pub fn tiff(big_endian: bool, magic: u16, model_type: u16, model: &[u8]) -> Vec<u8> {
    let u16b = |x: u16| {
        if big_endian {
            x.to_be_bytes()
        } else {
            x.to_le_bytes()
        }
    };
    let u32b = |x: u32| {
        if big_endian {
            x.to_be_bytes()
        } else {
            x.to_le_bytes()
        }
    };

    let mut data = Vec::new();

    // Byte order
    data.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    // Magic bytes
    data.extend_from_slice(&u16b(magic));
    // Offset
    data.extend_from_slice(&u32b(8));
    // Number entries
    data.extend_from_slice(&u16b(2));

    // Make, inline
    data.extend_from_slice(&u16b(0x010F));
    data.extend_from_slice(&u16b(2));
    data.extend_from_slice(&u32b(4));
    data.extend_from_slice(b"Pan\0");

    // Model
    data.extend_from_slice(&u16b(0x0110));
    data.extend_from_slice(&u16b(model_type));
    data.extend_from_slice(&u32b(model.len() as u32));
    if model.len() <= 4 {
        let mut inline = [0; 4];
        inline[..model.len()].copy_from_slice(model);
        data.extend_from_slice(&inline);
    } else {
        data.extend_from_slice(&u32b(MODEL_DATA_OFFSET));
    }

    // Next IFD offset
    data.extend_from_slice(&[0, 0, 0, 0]);

    assert_eq!(data.len(), MODEL_DATA_OFFSET as usize);
    if model.len() > 4 {
        data.extend_from_slice(model);
    }

    // Some image data
    data.extend_from_slice(&[0xAB; 32]);

    data
}

/// Position of the Model entry's value slot
pub const MODEL_INLINE_OFFSET: u32 = 8 + 2 + 12 + 8;
/// Position of values stored outside of IFD0
pub const MODEL_DATA_OFFSET: u32 = 8 + 2 + 2 * 12 + 4;

pub fn le(model: &[u8]) -> Vec<u8> {
    tiff(false, 42, 2, model)
}

pub fn be(model: &[u8]) -> Vec<u8> {
    tiff(true, 42, 2, model)
}
