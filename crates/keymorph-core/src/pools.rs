//! Fixed ASCII character pools and the four policy character classes.
//!
//! Pool order is part of the output contract: remapping and repair index
//! into these slices, so reordering any of them changes every generated
//! password.

use serde::{Deserialize, Serialize};

use crate::locale::Language;

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

/// Lowercase letters `a-z`.
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Uppercase letters `A-Z`.
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digits `0-9`.
pub const DIGITS: &[u8] = b"0123456789";

/// Punctuation pool used for remapping, risk repair, and class repair.
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Symbols that satisfy the repair loop's symbol requirement.
pub const REQUIRED_SYMBOLS: &[u8] = b"!@#$%^&*";

/// Symbols the policy validator accepts as "special characters".
pub const VALIDATOR_SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// [`LOWERCASE`] followed by [`UPPERCASE`]: the remap pool for letters.
pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// [`DIGITS`] followed by [`SYMBOLS`]: the remap pool for everything else.
pub const DIGITS_AND_SYMBOLS: &[u8] = b"0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// [`SYMBOLS`] followed by [`DIGITS`]: replacement pool for risky positions.
pub const SYMBOLS_AND_DIGITS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?0123456789";

/// Union of all four pools, in lowercase, uppercase, digit, symbol order.
pub const ALL: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// A character class the password policy requires at least one of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharClass {
    /// `A-Z`
    Uppercase,
    /// `a-z`
    Lowercase,
    /// `0-9`
    Digit,
    /// Punctuation; which set counts depends on the caller.
    Symbol,
}

impl CharClass {
    /// Every class, in the fixed check order.
    pub const ALL: [Self; 4] = [Self::Uppercase, Self::Lowercase, Self::Digit, Self::Symbol];

    /// Pool that class repair draws replacement characters from.
    #[must_use]
    pub const fn pool(self) -> &'static [u8] {
        match self {
            Self::Uppercase => UPPERCASE,
            Self::Lowercase => LOWERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }

    /// Whether `c` belongs to this class, with `symbols` deciding the
    /// membership of [`CharClass::Symbol`].
    #[must_use]
    pub fn matches(self, c: char, symbols: &[u8]) -> bool {
        match self {
            Self::Uppercase => c.is_ascii_uppercase(),
            Self::Lowercase => c.is_ascii_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Symbol => u8::try_from(c).is_ok_and(|b| symbols.contains(&b)),
        }
    }

    /// Localized class name used in "missing" messages.
    #[must_use]
    pub const fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Uppercase, Language::En) => "uppercase",
            (Self::Lowercase, Language::En) => "lowercase",
            (Self::Digit, Language::En) => "digit",
            (Self::Symbol, Language::En) => "symbol",
            (Self::Uppercase, Language::Zh) => "大写",
            (Self::Lowercase, Language::Zh) => "小写",
            (Self::Digit, Language::Zh) => "数字",
            (Self::Symbol, Language::Zh) => "特殊字符",
        }
    }
}

/// Classes with no representative in `chars`, in [`CharClass::ALL`] order.
#[must_use]
pub fn missing_classes(chars: &[char], symbols: &[u8]) -> Vec<CharClass> {
    CharClass::ALL
        .into_iter()
        .filter(|class| !chars.iter().any(|&c| class.matches(c, symbols)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
