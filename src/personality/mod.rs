//! Personality vocabulary - the fixed MBTI, zodiac, and enneagram-wing token
//! sets that comment votes are validated against.

pub mod types;

pub use types::{EnneagramWing, Mbti, Personality, PersonalityKind, ZodiacSign};

/// True iff `code` is exactly one of the sixteen MBTI types.
pub fn is_valid_mbti(code: &str) -> bool {
    code.parse::<Mbti>().is_ok()
}

/// True iff `name` is exactly one of the twelve zodiac sign names.
pub fn is_valid_zodiac(name: &str) -> bool {
    name.parse::<ZodiacSign>().is_ok()
}

/// True iff `code` is exactly one of the eighteen `<type>w<wing>` codes.
pub fn is_valid_enneagram_wing(code: &str) -> bool {
    code.parse::<EnneagramWing>().is_ok()
}
