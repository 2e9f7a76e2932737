//! Personality vocabularies.
//!
//! Each vocabulary is a closed set of exact, case-sensitive tokens. Parsing
//! never folds case or trims whitespace: `"intj"` and `" INTJ"` are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares a closed vocabulary enum with its exact wire tokens.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every member, in canonical order.
            pub fn all() -> &'static [$name] {
                &[ $( $name::$variant, )+ ]
            }

            /// The exact wire token.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $token => Ok($name::$variant), )+
                    _ => Err(format!("Unknown {} '{}'", $label, s)),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────
// Vocabularies
// ─────────────────────────────────────────────────────────────────

vocabulary! {
    /// The sixteen Myers-Briggs four-letter types.
    Mbti, "MBTI type" {
        Istj => "ISTJ",
        Isfj => "ISFJ",
        Infj => "INFJ",
        Intj => "INTJ",
        Istp => "ISTP",
        Isfp => "ISFP",
        Infp => "INFP",
        Intp => "INTP",
        Estp => "ESTP",
        Esfp => "ESFP",
        Enfp => "ENFP",
        Entp => "ENTP",
        Estj => "ESTJ",
        Esfj => "ESFJ",
        Enfj => "ENFJ",
        Entj => "ENTJ",
    }
}

vocabulary! {
    /// The twelve western zodiac signs.
    ZodiacSign, "zodiac sign" {
        Aries => "Aries",
        Taurus => "Taurus",
        Gemini => "Gemini",
        Cancer => "Cancer",
        Leo => "Leo",
        Virgo => "Virgo",
        Libra => "Libra",
        Scorpio => "Scorpio",
        Sagittarius => "Sagittarius",
        Capricorn => "Capricorn",
        Aquarius => "Aquarius",
        Pisces => "Pisces",
    }
}

vocabulary! {
    /// Enneagram core type paired with one of its two adjacent wings.
    EnneagramWing, "enneagram wing" {
        OneWingTwo => "1w2",
        OneWingNine => "1w9",
        TwoWingOne => "2w1",
        TwoWingThree => "2w3",
        ThreeWingTwo => "3w2",
        ThreeWingFour => "3w4",
        FourWingThree => "4w3",
        FourWingFive => "4w5",
        FiveWingFour => "5w4",
        FiveWingSix => "5w6",
        SixWingFive => "6w5",
        SixWingSeven => "6w7",
        SevenWingSix => "7w6",
        SevenWingEight => "7w8",
        EightWingSeven => "8w7",
        EightWingNine => "8w9",
        NineWingEight => "9w8",
        NineWingOne => "9w1",
    }
}

// ─────────────────────────────────────────────────────────────────
// Personality vote
// ─────────────────────────────────────────────────────────────────

/// One axis of a personality vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityKind {
    Mbti,
    Zodiac,
    Enneagram,
}

impl PersonalityKind {
    /// JSON key of this axis inside a personality object.
    pub fn key(&self) -> &'static str {
        match self {
            PersonalityKind::Mbti => "mbti",
            PersonalityKind::Zodiac => "zodiac",
            PersonalityKind::Enneagram => "enneagram",
        }
    }
}

impl fmt::Display for PersonalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PersonalityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mbti" => Ok(PersonalityKind::Mbti),
            "zodiac" => Ok(PersonalityKind::Zodiac),
            "enneagram" => Ok(PersonalityKind::Enneagram),
            _ => Err(format!("Unknown personality kind '{}'", s)),
        }
    }
}

/// A personality vote attached to a comment. Every axis is optional and
/// serializes as `null` when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(default)]
    pub mbti: Option<Mbti>,
    #[serde(default)]
    pub zodiac: Option<ZodiacSign>,
    #[serde(default)]
    pub enneagram: Option<EnneagramWing>,
}

impl Personality {
    /// Whether the vote carries a value on the given axis.
    pub fn has(&self, kind: PersonalityKind) -> bool {
        match kind {
            PersonalityKind::Mbti => self.mbti.is_some(),
            PersonalityKind::Zodiac => self.zodiac.is_some(),
            PersonalityKind::Enneagram => self.enneagram.is_some(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
