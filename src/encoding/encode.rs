use super::decode::CP1252_HIGH;

pub fn utf16(text: &str, big_endian: bool) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|unit| {
            if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            }
        })
        .collect()
}

pub fn utf32(text: &str, big_endian: bool) -> Vec<u8> {
    text.chars()
        .flat_map(|c| {
            let value = u32::from(c);
            if big_endian {
                value.to_be_bytes()
            } else {
                value.to_le_bytes()
            }
        })
        .collect()
}

/// `None` when a character falls outside U+0000..=U+00FF.
pub fn latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// `None` when a character has no windows-1252 byte.
pub fn windows1252(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x80..=0x9F => None,
            value @ 0..=0xFF => u8::try_from(value).ok(),
            _ => CP1252_HIGH
                .iter()
                .position(|mapped| *mapped == Some(c))
                .and_then(|index| u8::try_from(0x80 + index).ok()),
        })
        .collect()
}

pub fn ascii(text: &str) -> Option<Vec<u8>> {
    text.is_ascii().then(|| text.as_bytes().to_vec())
}
