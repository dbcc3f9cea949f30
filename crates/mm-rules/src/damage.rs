//! Damage-expression rewriting.
//!
//! Damage is a free-form expression such as `@str+d8` or `2d6+1`. Only die
//! terms (`d` followed by digits) and ability placeholders (`@` followed by
//! letters) are touched; everything else is copied through.

use std::iter::Peekable;
use std::str::Chars;

use mm_core::DieStep;

/// Step every die term up once: `d12 → d12+1`, otherwise `dN → d(N+2)`.
pub fn escalate(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 4);
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        if c != 'd' || !chars.peek().is_some_and(char::is_ascii_digit) {
            out.push(c);
            continue;
        }
        let digits = take_while(&mut chars, |c| c.is_ascii_digit());
        match digits.parse::<u32>() {
            Ok(sides) => out.push_str(&DieStep::new(sides).step_up().to_string()),
            Err(_) => {
                out.push('d');
                out.push_str(&digits);
            }
        }
    }
    out
}

/// Render ability placeholders as capitalized words: `@str+d8 → Str+d8`.
pub fn render_placeholders(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '@' || !chars.peek().is_some_and(char::is_ascii_alphabetic) {
            out.push(c);
            continue;
        }
        let word = take_while(&mut chars, |c| c.is_ascii_alphabetic());
        let mut letters = word.chars();
        if let Some(first) = letters.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(letters);
        }
    }
    out
}

fn take_while(chars: &mut Peekable<Chars<'_>>, pred: impl Fn(&char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(c) = chars.next_if(&pred) {
        taken.push(c);
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escalates_each_die_term() {
        assert_eq!(escalate("@str+d8"), "@str+d10");
        assert_eq!(escalate("2d6+1"), "2d8+1");
        assert_eq!(escalate("d4+d6"), "d6+d8");
    }

    #[test]
    fn d12_gains_flat_bonus() {
        assert_eq!(escalate("@str+d12"), "@str+d12+1");
        assert_eq!(escalate("3d12"), "3d12+1");
    }

    #[test]
    fn text_without_dice_is_untouched() {
        assert_eq!(escalate("@str"), "@str");
        assert_eq!(escalate("special"), "special");
        assert_eq!(escalate("d"), "d");
        assert_eq!(escalate(""), "");
    }

    #[test]
    fn uppercase_d_is_not_a_term() {
        assert_eq!(escalate("D6"), "D6");
    }

    #[test]
    fn placeholders_capitalized() {
        assert_eq!(render_placeholders("@str+d10"), "Str+d10");
        assert_eq!(render_placeholders("@agi+@str"), "Agi+Str");
        assert_eq!(render_placeholders("2d6"), "2d6");
        assert_eq!(render_placeholders("a@"), "a@");
    }

    proptest! {
        #[test]
        fn single_term_steps_by_two_below_d12(half in 2u32..6) {
            let sides = half * 2;
            prop_assert_eq!(escalate(&format!("d{sides}")), format!("d{}", sides + 2));
        }

        #[test]
        fn non_dice_text_passes_through(s in "[a-ce-z@+ ]{0,16}") {
            prop_assert_eq!(escalate(&s), s);
        }
    }
}
