//! Bounded scan-and-fix loop enforcing the generation policy.
//!
//! Each attempt re-scans the candidate, overwrites risky or class-deficient
//! positions with further draws from the run's generator, and pads short
//! candidates. Repairs are order-dependent and may clobber one another
//! (two missing classes on a one-character candidate land on the same
//! slot, a class fix can create a new run). That behavior is part of the
//! output contract and is reproduced as-is.

use zeroize::Zeroize;

use super::{Generation, MAX_REPAIR_ATTEMPTS, MIN_PASSWORD_LENGTH};
use crate::pools::{missing_classes, ALL, REQUIRED_SYMBOLS, SYMBOLS_AND_DIGITS};
use crate::risk;
use crate::sequence::Mulberry32;

/// Repair `mapped` until it passes the policy or attempts run out.
///
/// Never fails: on exhaustion the last candidate is returned with
/// [`Generation::settled`] set to `false`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn repair(mapped: &str, rng: Mulberry32) -> (Generation, Mulberry32) {
    let mut rng = rng;
    let mut buf: Vec<char> = mapped.chars().collect();
    let mut attempts = 0u32;
    let mut settled = false;

    while attempts < MAX_REPAIR_ATTEMPTS {
        let risks = risk::scan(&buf);
        let missing = missing_classes(&buf, REQUIRED_SYMBOLS);

        if risks.is_empty() && missing.is_empty() && buf.len() >= MIN_PASSWORD_LENGTH {
            settled = true;
            break;
        }

        // Break runs and repeats. A risk implies at least three characters.
        for found in &risks {
            let target = (found.index + 1).min(buf.len().saturating_sub(1));
            let (c, next) = rng.pick(SYMBOLS_AND_DIGITS);
            rng = next;
            buf[target] = c;
        }

        // Class repair only runs on a risk-free candidate.
        if risks.is_empty() {
            for (offset, class) in missing.iter().enumerate() {
                let (c, next) = rng.pick(class.pool());
                rng = next;
                if let Some(target) = class_target(buf.len(), offset) {
                    buf[target] = c;
                }
            }
        }

        while buf.len() < MIN_PASSWORD_LENGTH {
            let (c, next) = rng.pick(ALL);
            rng = next;
            buf.push(c);
        }

        attempts += 1;
    }

    let password: String = buf.iter().collect();
    buf.zeroize();

    if settled {
        tracing::debug!(attempts, "repair loop settled");
    } else {
        tracing::warn!(
            attempts,
            "repair attempts exhausted; returning best-effort candidate"
        );
    }

    (
        Generation {
            password,
            attempts,
            settled,
        },
        rng,
    )
}

/// Slot overwritten for the `offset`-th missing class: counting back from
/// the end, wrapping modulo `len`. `None` for an empty candidate, whose draw
/// is still consumed.
fn class_target(len: usize, offset: usize) -> Option<usize> {
    let len = isize::try_from(len).ok().filter(|&l| l > 0)?;
    let offset = isize::try_from(offset).ok()?;
    let slot = len.wrapping_sub(1).wrapping_sub(offset).rem_euclid(len);
    usize::try_from(slot).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::CharClass;

    fn policy_holds(pw: &str) -> bool {
        let chars: Vec<char> = pw.chars().collect();
        risk::scan(&chars).is_empty()
            && missing_classes(&chars, REQUIRED_SYMBOLS).is_empty()
            && chars.len() >= MIN_PASSWORD_LENGTH
    }

    #[test]
    fn compliant_input_is_untouched() {
        let rng = Mulberry32::new(1);
        let (out, after) = repair("Xy7!Qw9#", rng);
        assert_eq!(out.password, "Xy7!Qw9#");
        assert_eq!(out.attempts, 0);
        assert!(out.settled);
        assert_eq!(after, rng, "no draws on an already compliant candidate");
    }

    #[test]
    fn risks_are_broken_at_next_position() {
        // Repeat at 0 and digit run at 3 overwrite positions 1 and 4.
        let (out, _) = repair("aaa123xY!", Mulberry32::new(1));
        assert_eq!(out.password, "a.a1!3xY!");
        assert_eq!(out.attempts, 1);
        assert!(out.settled);
    }

    #[test]
    fn overlapping_runs() {
        let (out, _) = repair("abcd", Mulberry32::new(3));
        assert_eq!(out.password, "a?@dOg^4");
        assert_eq!(out.attempts, 2);
        assert!(policy_holds(&out.password));
    }

    #[test]
    fn single_char_candidate() {
        let (out, _) = repair("c", Mulberry32::new(9));
        assert_eq!(out.password, "$_@8x|lS");
        assert_eq!(out.attempts, 2);
    }

    #[test]
    fn empty_candidate_is_padded() {
        let (out, after) = repair("", Mulberry32::new(1));
        assert_eq!(out.password, "<y1@L?OR");
        assert_eq!(out.attempts, 1);
        // Four discarded class draws plus eight padding draws.
        let mut expected = Mulberry32::new(1);
        for _ in 0..12 {
            expected = expected.draw().1;
        }
        assert_eq!(after, expected);
    }

    #[test]
    fn symbol_repair_can_miss_the_required_set() {
        // Class repair draws from the full symbol pool, so it may need
        // several attempts to land on one of `!@#$%^&*`.
        let (out, _) = repair("Kf7(inoo", Mulberry32::new(5));
        assert_eq!(out.password, "Kf7(ino^");
        assert_eq!(out.attempts, 3);
        assert!(out.settled);
    }

    #[test]
    fn exhaustion_returns_last_candidate() {
        // Digit and symbol repairs both target the last slot and keep
        // clobbering each other for all ten attempts.
        let rng = Mulberry32::new(crate::seed::derive_seed("2025"));
        let (mapped, rng) = super::super::remap("password", rng);
        let (out, _) = repair(&mapped, rng);
        assert_eq!(out.password, "yjEBCw<,");
        assert_eq!(out.attempts, MAX_REPAIR_ATTEMPTS);
        assert!(!out.settled);
        assert!(!policy_holds(&out.password));
    }

    #[test]
    fn class_target_counts_back_from_end() {
        assert_eq!(class_target(8, 0), Some(7));
        assert_eq!(class_target(8, 3), Some(4));
        assert_eq!(class_target(2, 3), Some(0));
        assert_eq!(class_target(1, 3), Some(0));
        assert_eq!(class_target(0, 0), None);
    }

    #[test]
    fn class_pools_cover_their_class() {
        for class in CharClass::ALL {
            let symbols = crate::pools::SYMBOLS;
            assert!(class
                .pool()
                .iter()
                .all(|&b| class.matches(char::from(b), symbols)));
        }
    }
}
