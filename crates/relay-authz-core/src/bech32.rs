//! Bech32 encoding (BIP-173).
//!
//! A bech32 string is `hrp || '1' || data || checksum`:
//! - `hrp` is the human-readable part, printable ASCII
//! - `data` is a sequence of 5-bit symbols from [`CHARSET`]
//! - `checksum` is 6 symbols of a BCH code over the expanded hrp and data
//!
//! The checksum detects any error affecting up to four characters, so a
//! single substituted character never yields a valid string.
//!
//! This module is the syntactic layer only. It knows nothing about what
//! the payload means; see [`crate::nip19`] for that.

use crate::error::Bech32Error;

/// The 32-symbol data alphabet, indexed by 5-bit value.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the human-readable part and the data.
pub const SEPARATOR: char = '1';

/// Number of checksum symbols.
pub const CHECKSUM_LEN: usize = 6;

/// Minimum and maximum string length.
pub const MIN_LEN: usize = 8;
pub const MAX_LEN: usize = 90;

const GENERATORS: [u32; 5] = [
    0x3b6a_57b2,
    0x2650_8e6d,
    0x1ea1_19fa,
    0x3d42_33dd,
    0x2a14_62b3,
];

/// Reverse lookup for [`CHARSET`]; -1 marks characters outside the alphabet.
const CHARSET_REV: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// Expand the hrp for checksum computation: high bits, a zero, low bits.
fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(hrp.len() * 2 + 1);
    out.extend(hrp.iter().map(|c| c >> 5));
    out.push(0);
    out.extend(hrp.iter().map(|c| c & 0x1f));
    out
}

fn verify_checksum(hrp: &[u8], data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == 1
}

fn create_checksum(hrp: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);
    let pm = polymod(&values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((pm >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

/// Decode a bech32 string into its (lowercased) hrp and 5-bit data symbols.
///
/// The returned data excludes the checksum. Uppercase input is accepted;
/// mixed case is not.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let mut has_lower = false;
    let mut has_upper = false;
    for c in s.chars() {
        if !(c.is_ascii() && (33..=126).contains(&(c as u32))) {
            return Err(Bech32Error::InvalidChar(c));
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }

    // All characters are ASCII from here on, so byte length == char count.
    if s.len() < MIN_LEN || s.len() > MAX_LEN {
        return Err(Bech32Error::InvalidLength(s.len()));
    }
    if has_lower && has_upper {
        return Err(Bech32Error::MixedCase);
    }

    let lowered = s.to_ascii_lowercase();
    let sep = lowered.rfind(SEPARATOR).ok_or(Bech32Error::MissingSeparator)?;
    if sep == 0 {
        return Err(Bech32Error::EmptyHrp);
    }

    let (hrp, rest) = lowered.split_at(sep);
    let encoded = &rest[1..];
    if encoded.len() < CHECKSUM_LEN {
        return Err(Bech32Error::MissingChecksum);
    }

    let mut data = Vec::with_capacity(encoded.len());
    for c in encoded.chars() {
        match CHARSET_REV[c as usize] {
            -1 => return Err(Bech32Error::InvalidChar(c)),
            value => data.push(value as u8),
        }
    }

    if !verify_checksum(hrp.as_bytes(), &data) {
        return Err(Bech32Error::InvalidChecksum);
    }

    data.truncate(data.len() - CHECKSUM_LEN);
    Ok((hrp.to_string(), data))
}

/// Encode 8-bit payload bytes under `hrp`.
///
/// The hrp must be non-empty printable ASCII without uppercase letters;
/// the result must fit in [`MAX_LEN`] characters.
pub fn encode(hrp: &str, payload: &[u8]) -> Result<String, Bech32Error> {
    let valid_hrp = !hrp.is_empty()
        && hrp
            .bytes()
            .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase());
    if !valid_hrp {
        return Err(Bech32Error::InvalidHrp(hrp.to_string()));
    }

    let total = hrp.len() + 1 + (payload.len() * 8).div_ceil(5) + CHECKSUM_LEN;
    if total > MAX_LEN {
        return Err(Bech32Error::InvalidLength(total));
    }

    Ok(encode_unchecked(hrp, payload))
}

/// Encode without validating the hrp or the output length.
pub(crate) fn encode_unchecked(hrp: &str, payload: &[u8]) -> String {
    let data = to_base32(payload);
    let checksum = create_checksum(hrp.as_bytes(), &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(hrp);
    out.push(SEPARATOR);
    for &symbol in data.iter().chain(checksum.iter()) {
        out.push(CHARSET[symbol as usize] as char);
    }
    out
}

/// 8-to-5 regrouping with zero padding; cannot fail for byte input.
fn to_base32(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity((payload.len() * 8).div_ceil(5));
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in payload {
        acc = ((acc << 8) | u32::from(byte)) & 0xfff;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Regroup a sequence of `from`-bit values into `to`-bit values.
///
/// With `pad`, trailing bits are zero-padded into a final group. Without
/// it, leftover bits must be fewer than `from` and all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Bech32Error> {
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        if u32::from(value) >> from != 0 {
            return Err(Bech32Error::InvalidData(value));
        }
        acc = ((acc << from) | u32::from(value)) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Bech32Error::InvalidPadding);
    }

    Ok(out)
}
