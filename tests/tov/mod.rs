//! Property tests for the tone-of-voice validator.

use proptest::prelude::*;
use reco_engine_rs::{CTA_VERBS, enforce_tov};

fn has_cta(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CTA_VERBS.iter().any(|verb| lowered.contains(verb))
}

/// Mixed Russian/ASCII fragments with currency glyphs, spaces and shouting.
fn message_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("Оформите карту".to_string()),
        Just("вы потратили 9 600 ₸".to_string()),
        Just("кешбэк 5000 ₸ ₸".to_string()),
        Just("   ".to_string()),
        Just("СРОЧНО".to_string()),
        Just("деньги!!!".to_string()),
        Just("свободные средства".to_string()),
        "[a-zA-Zа-яё ]{0,24}",
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn validator_is_idempotent(message in message_strategy()) {
        let once = enforce_tov(&message);
        let twice = enforce_tov(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_length_is_inside_the_window(message in message_strategy()) {
        let out = enforce_tov(&message);
        let length = out.chars().count();
        prop_assert!((50..=220).contains(&length), "length {} for {:?}", length, out);
    }

    #[test]
    fn at_most_one_exclamation_mark(message in message_strategy()) {
        let out = enforce_tov(&message);
        prop_assert!(out.matches('!').count() <= 1);
    }

    #[test]
    fn output_is_never_all_uppercase(message in message_strategy()) {
        let out = enforce_tov(&message);
        let letters: Vec<char> = out.chars().filter(|ch| ch.is_alphabetic()).collect();
        prop_assert!(
            letters.len() <= 1 || !letters.iter().skip(1).all(|ch| ch.is_uppercase())
        );
    }

    #[test]
    fn no_ascii_space_runs_survive(message in message_strategy()) {
        let out = enforce_tov(&message);
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn currency_glyph_never_doubles(message in message_strategy()) {
        let out = enforce_tov(&message);
        prop_assert!(!out.contains("₸₸"));
        prop_assert!(!out.contains("₸\u{a0}₸"), "nbsp-separated glyph pair found in {:?}", out);
        prop_assert!(!out.contains("₸ ₸"));
    }

    #[test]
    fn call_to_action_is_always_present(message in message_strategy()) {
        let out = enforce_tov(&message);
        prop_assert!(has_cta(&out), "no call to action in {:?}", out);
    }

    #[test]
    fn digits_touching_the_glyph_are_separated_by_nbsp(message in message_strategy()) {
        let out = enforce_tov(&message);
        let chars: Vec<char> = out.chars().collect();
        for window in chars.windows(2) {
            prop_assert!(
                !(window[0].is_ascii_digit() && window[1] == '₸'),
                "digit directly against the glyph in {:?}",
                out
            );
        }
    }
}

#[test]
fn truncation_reserves_room_for_the_call_to_action() {
    let long = "свободные средства на счету без дела лежат очень долго ".repeat(8);
    let out = enforce_tov(&long);

    assert_eq!(out.chars().count(), 220);
    assert!(out.ends_with("Узнать подробнее?"));
    assert!(has_cta(&out));
    assert_eq!(enforce_tov(&out), out);
}
