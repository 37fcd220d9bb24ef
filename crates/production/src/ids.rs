//! Deterministic production-day identifiers.
//!
//! Every device that records a sample for the same shift must land on the
//! same id without coordinating, so the id is a pure function of the
//! shift date and number.

use chrono::NaiveDate;
use uuid::Uuid;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-16 code units of `input`, with the offset
/// basis xored by `seed`.
pub fn fnv1a32(input: &str, seed: u32) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS ^ seed, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Version-4-shaped UUID for a shift, built from four seeded hashes of
/// `"{date}|{shift}"`.
pub fn production_day_uuid(shift_date: NaiveDate, shift_number: u32) -> Uuid {
    let key = format!("{}|{}", shift_date.format("%Y-%m-%d"), shift_number);
    let mut bits = (1..=4u32).fold(0u128, |acc, seed| (acc << 32) | u128::from(fnv1a32(&key, seed)));

    // Hex digit 12 is the version, digit 16 the variant.
    bits = (bits & !(0xf << 76)) | (0x4 << 76);
    let variant = ((bits >> 60) & 0xf) % 4;
    bits = (bits & !(0xf << 60)) | ((0x8 + variant) << 60);

    Uuid::from_u128(bits)
}
