//! The Set predicate (component B): decide whether three cards form a
//! Set. Kept in three numerically-identical forms — `reference` is the
//! obviously-correct oracle, `bitwise` is the additive trick the rest of
//! the crate actually calls, and `simd` is a branchless rewrite of
//! `bitwise` that the compiler can auto-vectorize.

use crate::card::Card;

/// The four values a 6-bit attribute field can take when three cards'
/// ids are summed: all-same-value-one (`0b00_00_11`), all-same-value-two
/// (`0b00_11_00`), all-same-value-three (`0b11_00_00`), or all-different
/// (`0b01_01_01`).
const SET_FIELD_VALUES: [u32; 4] = [0b000011, 0b001100, 0b110000, 0b010101];

const SHIFTS: [u32; 4] = [8, 14, 20, 26];
const FIELD_MASK: u32 = 0b111111;

/// The predicate used throughout the rest of the crate.
pub fn is_set(a: &Card, b: &Card, c: &Card) -> bool {
    is_set_bitwise(a, b, c)
}

/// Obviously-correct oracle: for each attribute, all three cards agree or
/// all three differ.
pub fn is_set_reference(a: &Card, b: &Card, c: &Card) -> bool {
    fn all_same_or_all_different<T: PartialEq>(x: T, y: T, z: T) -> bool {
        (x == y && y == z) || (x != y && y != z && x != z)
    }
    all_same_or_all_different(a.shape(), b.shape(), c.shape())
        && all_same_or_all_different(a.count(), b.count(), c.count())
        && all_same_or_all_different(a.color(), b.color(), c.color())
        && all_same_or_all_different(a.shading(), b.shading(), c.shading())
}

/// Adds the three ids together and checks each attribute field of the
/// sum against the four values a Set can produce. The index field (low 8
/// bits) never interferes: three distinct indices in `[0, 80]` sum to at
/// most 240, well clear of the shape field starting at bit 8.
pub fn is_set_bitwise(a: &Card, b: &Card, c: &Card) -> bool {
    let sum = a.id().wrapping_add(b.id()).wrapping_add(c.id());
    field_is_set_value(sum, SHIFTS[0])
        && field_is_set_value(sum, SHIFTS[1])
        && field_is_set_value(sum, SHIFTS[2])
        && field_is_set_value(sum, SHIFTS[3])
}

#[inline]
const fn field_is_set_value(sum: u32, shift: u32) -> bool {
    let field = (sum >> shift) & FIELD_MASK;
    field == SET_FIELD_VALUES[0]
        || field == SET_FIELD_VALUES[1]
        || field == SET_FIELD_VALUES[2]
        || field == SET_FIELD_VALUES[3]
}

/// Branchless rewrite of [`is_set_bitwise`]: extracts all four attribute
/// fields into an array up front and tests them in one pass, instead of
/// short-circuiting field by field. Same semantics, friendlier to
/// auto-vectorization. `core::simd` is nightly-only, so this stays on
/// stable and leans on the optimizer rather than explicit SIMD types.
pub fn is_set_simd(a: &Card, b: &Card, c: &Card) -> bool {
    let sum = a.id().wrapping_add(b.id()).wrapping_add(c.id());
    let fields = SHIFTS.map(|shift| (sum >> shift) & FIELD_MASK);
    fields
        .iter()
        .all(|field| SET_FIELD_VALUES.contains(field))
}
