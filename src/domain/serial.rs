// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Serial Numbers
//!
//! Every resource is identified by a fixed-width decimal serial. Generated
//! serials are [`GENERATED_WIDTH`] digits, zero padded. Shorter legacy
//! serials down to [`MIN_WIDTH`] digits are still accepted.

use uuid::Uuid;

/// Width of freshly generated serials
pub const GENERATED_WIDTH: usize = 16;

/// Shortest accepted serial
pub const MIN_WIDTH: usize = 8;

/// Longest accepted serial
pub const MAX_WIDTH: usize = GENERATED_WIDTH;

const MODULUS: u128 = 10_u128.pow(GENERATED_WIDTH as u32);

/// Generate a new random serial
///
/// Draws from the random bits of a v4 UUID, so concurrent generators need no
/// coordination.
pub fn generate() -> String {
    loop {
        let value = Uuid::new_v4().as_u128() % MODULUS;
        if value != 0 {
            return format!("{value:0width$}", width = GENERATED_WIDTH);
        }
    }
}

/// Check whether `id` is a well-formed serial
///
/// # Rules
/// - [`MIN_WIDTH`] to [`MAX_WIDTH`] ASCII digits
/// - Not all zeros
pub fn is_serial(id: &str) -> bool {
    (MIN_WIDTH..=MAX_WIDTH).contains(&id.len())
        && id.bytes().all(|b| b.is_ascii_digit())
        && id.bytes().any(|b| b != b'0')
}
