//! Bitstring status list decoding.
//!
//! An encoded list is the multibase `u` prefix followed by the unpadded
//! Base64URL encoding of a gzip-compressed bitstring. Index 0 is the most
//! significant bit of the first byte.
//!
//! Concatenated gzip members are inflated in order. Bytes after the last
//! member that do not start a new member are ignored. The inflated list is
//! capped at [`MAX_BITSTRING_BYTES`].
//!
//! # Multi-bit entries
//!
//! For `status_size > 1` the entry starts at bit `index * status_size`, but
//! only that first bit is read and only the byte holding it is range checked.
//! A field running past the end of the list is not reported, and multi-bit
//! status values are not assembled.

use std::io::Read;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::bufread::GzDecoder;
use tracing::error;

use crate::error::{EncodingErrorKind, StatusError, StatusResult};

/// Multibase prefix for unpadded Base64URL.
pub const MULTIBASE_BASE64URL_PREFIX: char = 'u';

/// Largest inflated bitstring accepted: 16 MiB, about 134 million one-bit entries.
pub const MAX_BITSTRING_BYTES: usize = 16 * 1024 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Standard alphabet, padding optional, non-canonical trailing bits tolerated.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Return whether the status bit for `index` is set.
///
/// # Arguments
///
/// * `encoded` - `encodedList` value, including the `u` prefix
/// * `index` - `statusListIndex` of the entry
/// * `status_size` - bits per entry
pub fn decode_status_list(encoded: &str, index: u64, status_size: u32) -> StatusResult<bool> {
    let bitstring = expand(encoded)?;

    let offset = index.checked_mul(u64::from(status_size)).ok_or_else(|| {
        error!(index, status_size, "status bit offset overflows");
        StatusError::Range {
            offset: u64::MAX,
            length: bitstring.len(),
        }
    })?;

    bit_at(&bitstring, offset)
}

/// Decode and decompress an encoded list into raw bitstring bytes.
pub fn expand(encoded: &str) -> StatusResult<Vec<u8>> {
    let payload = strip_marker(encoded)?;

    if !is_base64url(payload) {
        error!("encoded list is not valid Base64URL");
        return Err(StatusError::encoding(EncodingErrorKind::InvalidBase64Url));
    }

    let compressed = decode_base64url(payload)?;
    decompress(&compressed)
}

/// Read the bit at absolute `offset`, most significant bit first.
pub fn bit_at(bytes: &[u8], offset: u64) -> StatusResult<bool> {
    let out_of_range = || {
        error!(offset, len = bytes.len(), "bit offset out of range");
        StatusError::Range {
            offset,
            length: bytes.len(),
        }
    };

    let byte_index = usize::try_from(offset / 8).map_err(|_| out_of_range())?;
    let bit_position = (offset % 8) as u32;
    let byte = bytes.get(byte_index).ok_or_else(out_of_range)?;

    Ok((*byte & (0x80_u8 >> bit_position)) != 0)
}

fn strip_marker(encoded: &str) -> StatusResult<&str> {
    if encoded.is_empty() {
        error!("encoded list is empty");
        return Err(StatusError::encoding(EncodingErrorKind::Empty));
    }

    encoded
        .strip_prefix(MULTIBASE_BASE64URL_PREFIX)
        .ok_or_else(|| {
            error!("encoded list does not start with 'u'");
            StatusError::encoding(EncodingErrorKind::MissingMarker)
        })
}

/// `^[A-Za-z0-9_-]+$`; padding is not part of the alphabet.
fn is_base64url(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_base64url_byte)
}

fn is_base64url_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn decode_base64url(payload: &str) -> StatusResult<Vec<u8>> {
    let standard = payload.replace('-', "+").replace('_', "/");

    BASE64_LENIENT.decode(standard).map_err(|e| {
        error!(error = %e, "encoded list is not decodable Base64");
        StatusError::encoding(EncodingErrorKind::InvalidBase64)
    })
}

fn decompress(compressed: &[u8]) -> StatusResult<Vec<u8>> {
    let mut bitstring = Vec::new();
    let mut rest = compressed;

    loop {
        let budget = (MAX_BITSTRING_BYTES + 1 - bitstring.len()) as u64;
        let mut member = GzDecoder::new(rest).take(budget);

        member.read_to_end(&mut bitstring).map_err(|e| {
            error!(error = %e, "failed to decompress encoded list");
            StatusError::Decompression {
                message: e.to_string(),
            }
        })?;

        if bitstring.len() > MAX_BITSTRING_BYTES {
            error!(limit = MAX_BITSTRING_BYTES, "status list too large");
            return Err(StatusError::Decompression {
                message: format!("status list larger than {} bytes", MAX_BITSTRING_BYTES),
            });
        }

        rest = member.into_inner().into_inner();
        if !rest.starts_with(&GZIP_MAGIC) {
            return Ok(bitstring);
        }
    }
}
