//! Bit-packed card encoding (component A).
//!
//! A [`Card`] is a single `u32`: the low 8 bits are the card's index into
//! the canonical 81-card pack, and the remaining four 6-bit fields each
//! hold a one-hot value for one attribute. The layout is load-bearing —
//! [`crate::set_predicate`] depends on these exact bit positions.

use crate::error::SetChallengeError;
use std::fmt;

/// Number of cards in a full pack.
pub const PACK_SIZE: usize = 81;

macro_rules! attribute {
    ($name:ident { $($variant:ident = $bits:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn bits(self) -> u32 {
                match self {
                    $(Self::$variant => $bits),+
                }
            }

            pub const fn from_bits(bits: u32) -> Option<Self> {
                match bits {
                    $($bits => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

attribute!(Shape {
    Diamond = 0b000001,
    Squiggle = 0b000100,
    Oval = 0b010000,
});

attribute!(Count {
    One = 0b000001,
    Two = 0b000100,
    Three = 0b010000,
});

attribute!(Color {
    Purple = 0b000001,
    Green = 0b000100,
    Red = 0b010000,
});

attribute!(Shading {
    Open = 0b000001,
    Solid = 0b000100,
    Striped = 0b010000,
});

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shape::Diamond => "Diamond",
            Shape::Squiggle => "Squiggle",
            Shape::Oval => "Oval",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Count::One => "One",
            Count::Two => "Two",
            Count::Three => "Three",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Purple => "Purple",
            Color::Green => "Green",
            Color::Red => "Red",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Shading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shading::Open => "Open",
            Shading::Solid => "Solid",
            Shading::Striped => "Striped",
        };
        write!(f, "{s}")
    }
}

const SHAPE_SHIFT: u32 = 8;
const COUNT_SHIFT: u32 = 14;
const COLOR_SHIFT: u32 = 20;
const SHADING_SHIFT: u32 = 26;
const FIELD_MASK: u32 = 0b111111;

/// A single Set-game card, bit-packed into a `u32`.
///
/// A zero id is the "default / invalid" sentinel — no real card encodes
/// to zero, since every card has a non-zero shape field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u32);

impl Card {
    /// Builds a card id from its parts without validating `index`. Used
    /// only to build the compile-time [`PACK`] table, where the index is
    /// known by construction to be in range.
    const fn build(shape: Shape, count: Count, color: Color, shading: Shading, index: u8) -> Card {
        Card(
            index as u32
                | (shape.bits() << SHAPE_SHIFT)
                | (count.bits() << COUNT_SHIFT)
                | (color.bits() << COLOR_SHIFT)
                | (shading.bits() << SHADING_SHIFT),
        )
    }

    /// Builds a card, validating that `index` is in `[0, 81)`. The
    /// attribute values are always in range since they're typed enums.
    pub fn new(
        shape: Shape,
        count: Count,
        color: Color,
        shading: Shading,
        index: u8,
    ) -> Result<Card, SetChallengeError> {
        if index as usize >= PACK_SIZE {
            return Err(SetChallengeError::InvalidArgument(format!(
                "card index {index} is out of range [0, {PACK_SIZE})"
            )));
        }
        Ok(Self::build(shape, count, color, shading, index))
    }

    /// Reconstructs a card from a raw id, accepting it only if its
    /// attribute fields and index are a self-consistent encoding. This is
    /// the inverse of [`Card::id`] and is total: any `u32` either decodes
    /// to exactly one valid card or none.
    pub fn from_id(id: u32) -> Option<Card> {
        let index = (id & 0xFF) as u8;
        if index as usize >= PACK_SIZE {
            return None;
        }
        let shape = Shape::from_bits((id >> SHAPE_SHIFT) & FIELD_MASK)?;
        let count = Count::from_bits((id >> COUNT_SHIFT) & FIELD_MASK)?;
        let color = Color::from_bits((id >> COLOR_SHIFT) & FIELD_MASK)?;
        let shading = Shading::from_bits((id >> SHADING_SHIFT) & FIELD_MASK)?;
        let candidate = Self::build(shape, count, color, shading, index);
        (candidate.0 == id).then_some(candidate)
    }

    pub const fn id(&self) -> u32 {
        self.0
    }

    pub const fn index(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn shape(&self) -> Shape {
        Shape::from_bits((self.0 >> SHAPE_SHIFT) & FIELD_MASK).expect("card has invalid shape field")
    }

    pub fn count(&self) -> Count {
        Count::from_bits((self.0 >> COUNT_SHIFT) & FIELD_MASK).expect("card has invalid count field")
    }

    pub fn color(&self) -> Color {
        Color::from_bits((self.0 >> COLOR_SHIFT) & FIELD_MASK).expect("card has invalid color field")
    }

    pub fn shading(&self) -> Shading {
        Shading::from_bits((self.0 >> SHADING_SHIFT) & FIELD_MASK)
            .expect("card has invalid shading field")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.shape(),
            self.count(),
            self.color(),
            self.shading()
        )
    }
}

const SHAPES: [Shape; 3] = [Shape::Diamond, Shape::Squiggle, Shape::Oval];
const COUNTS: [Count; 3] = [Count::One, Count::Two, Count::Three];
const COLORS: [Color; 3] = [Color::Purple, Color::Green, Color::Red];
const SHADINGS: [Shading; 3] = [Shading::Open, Shading::Solid, Shading::Striped];

const fn build_pack() -> [Card; PACK_SIZE] {
    let mut pack = [Card(0); PACK_SIZE];
    let mut si = 0;
    while si < 3 {
        let mut ci = 0;
        while ci < 3 {
            let mut coi = 0;
            while coi < 3 {
                let mut shi = 0;
                while shi < 3 {
                    let index = si * 27 + ci * 9 + coi * 3 + shi;
                    pack[index] =
                        Card::build(SHAPES[si], COUNTS[ci], COLORS[coi], SHADINGS[shi], index as u8);
                    shi += 1;
                }
                coi += 1;
            }
            ci += 1;
        }
        si += 1;
    }
    pack
}

/// The 81-card pack, in canonical shape → count → color → shading order.
/// Computed once, at compile time.
pub static PACK: [Card; PACK_SIZE] = build_pack();

/// Returns the canonical 81-card pack.
pub fn pack() -> &'static [Card; PACK_SIZE] {
    &PACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn pack_has_81_distinct_cards() {
        let pack = pack();
        assert_eq!(pack.len(), 81);
        let mut seen = std::collections::HashSet::new();
        for card in pack {
            assert!(seen.insert(card.id()), "duplicate card id {}", card.id());
        }
    }

    #[test]
    fn pack_indices_are_0_to_80_in_order() {
        for (i, card) in pack().iter().enumerate() {
            assert_eq!(card.index() as usize, i);
        }
    }

    #[test]
    fn card_from_id_roundtrips_every_pack_card() {
        for card in pack() {
            assert_eq!(Card::from_id(card.id()), Some(*card));
        }
    }

    #[test]
    fn zero_id_is_not_a_valid_card() {
        assert_eq!(Card::from_id(0), None);
        assert_eq!(Card::default().id(), 0);
    }

    #[rstest]
    #[case(300)]
    #[case(81)]
    #[case(255)]
    fn new_rejects_out_of_range_index(#[case] index: u16) {
        let err = Card::new(Shape::Diamond, Count::One, Color::Purple, Shading::Open, index as u8);
        assert!(err.is_err());
    }

    #[test]
    fn new_matches_build_pack_entry() {
        let card = Card::new(Shape::Oval, Count::Three, Color::Red, Shading::Striped, 80).unwrap();
        assert_eq!(card, pack()[80]);
    }

    #[test]
    fn from_id_rejects_garbage_attribute_bits() {
        // A valid index but a shape field with two bits set, not a
        // one-hot value.
        let garbage = 5u32 | (0b000011 << SHAPE_SHIFT);
        assert_eq!(Card::from_id(garbage), None);
    }
}
