//! Weak-substring detection: triple repeats and 3-character runs.

use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Width of every scanned window.
pub const RISK_WINDOW: usize = 3;

const DIGIT_RUN: &[u8] = b"0123456789";
const DIGIT_RUN_REVERSED: &[u8] = b"9876543210";
const LETTER_RUN: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LETTER_RUN_REVERSED: &[u8] = b"zyxwvutsrqponmlkjihgfedcba";

/// Kind of weak pattern found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskKind {
    /// Three identical consecutive characters (case-sensitive).
    Repeat,
    /// Ascending or descending digit run such as `123` or `987`.
    DigitSequence,
    /// Ascending or descending letter run such as `abc` or `ZYX`.
    LetterSequence,
}

impl RiskKind {
    /// Coarse type: `"repeat"` or `"sequence"`.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::Repeat => "repeat",
            Self::DigitSequence | Self::LetterSequence => "sequence",
        }
    }

    /// Human-readable category.
    #[must_use]
    pub const fn message(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Repeat, Language::En) => "repeated characters (e.g. aaa)",
            (Self::DigitSequence, Language::En) => "digit sequence (e.g. 123)",
            (Self::LetterSequence, Language::En) => "letter sequence (e.g. abc)",
            (Self::Repeat, Language::Zh) => "重复字符 (如 aaa)",
            (Self::DigitSequence, Language::Zh) => "连续数字 (如 123)",
            (Self::LetterSequence, Language::Zh) => "连续字母 (如 abc)",
        }
    }
}

/// One weak substring, located by character index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// What was found.
    pub kind: RiskKind,
    /// Character index where the window starts.
    pub index: usize,
    /// Window length, always [`RISK_WINDOW`].
    pub len: usize,
}

/// Scan `s` for weak substrings.
///
/// Returns at most one repeat (the first) followed by every sequence window,
/// overlapping windows included, in index order. Windows are `char`s and
/// sequence matching folds ASCII case only.
#[must_use]
pub fn find_risks(s: &str) -> Vec<Risk> {
    let chars: Vec<char> = s.chars().collect();
    scan(&chars)
}

/// [`find_risks`] over an already-split character buffer.
#[must_use]
pub fn scan(chars: &[char]) -> Vec<Risk> {
    let mut risks = Vec::new();
    if chars.len() < RISK_WINDOW {
        return risks;
    }

    if let Some(index) = chars.windows(RISK_WINDOW).position(is_repeat) {
        risks.push(Risk {
            kind: RiskKind::Repeat,
            index,
            len: RISK_WINDOW,
        });
    }

    for (index, window) in chars.windows(RISK_WINDOW).enumerate() {
        if let Some(kind) = sequence_kind(window) {
            risks.push(Risk {
                kind,
                index,
                len: RISK_WINDOW,
            });
        }
    }
    risks
}

/// Line terminators never count as a repeated character.
const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_repeat(window: &[char]) -> bool {
    match window {
        [a, b, c] => !is_line_terminator(*a) && a == b && b == c,
        _ => false,
    }
}

fn sequence_kind(window: &[char]) -> Option<RiskKind> {
    let mut lowered = [0u8; RISK_WINDOW];
    for (slot, c) in lowered.iter_mut().zip(window) {
        *slot = u8::try_from(c.to_ascii_lowercase()).ok()?;
    }

    if contains_window(DIGIT_RUN, &lowered) || contains_window(DIGIT_RUN_REVERSED, &lowered) {
        Some(RiskKind::DigitSequence)
    } else if contains_window(LETTER_RUN, &lowered)
        || contains_window(LETTER_RUN_REVERSED, &lowered)
    {
        Some(RiskKind::LetterSequence)
    } else {
        None
    }
}

fn contains_window(run: &[u8], needle: &[u8]) -> bool {
    run.windows(needle.len()).any(|w| w == needle)
}
