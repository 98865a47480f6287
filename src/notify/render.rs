//! Template resolution, placeholder substitution, and enforcement of the
//! tone-of-voice contract over the final message.

use crate::engine::Scored;
use crate::notify::templates::{
    self, GENERIC_TEXT, NBSP, Template, format_count, format_kzt, format_percent, month_locative,
};
use crate::scenario::{Fact, Facts};

const MIN_LEN: usize = 50;
const MAX_LEN: usize = 220;
const FOLLOW_UP: &str = " Узнать подробнее?";

/// Closed set of call-to-action verbs; every validated message contains at
/// least one of them, matched case-insensitively.
pub const CTA_VERBS: &[&str] = &[
    "открыть",
    "настроить",
    "посмотреть",
    "оформить",
    "узнать",
    "попробовать",
    "проверить",
    "подключить",
    "начать",
];

/// Renders push notifications for one pipeline run. Holds the month label so
/// the whole run shares a single clock reading.
pub(crate) struct Renderer {
    month: &'static str,
}

impl Renderer {
    pub(crate) fn new(month: u32) -> Self {
        Self {
            month: month_locative(month),
        }
    }

    pub(crate) fn for_current_month() -> Self {
        use chrono::Datelike;
        Self::new(chrono::Local::now().month())
    }

    /// Resolves the product's template, fills the placeholders from the
    /// scenario's facts and pushes the result through the validator. An
    /// unregistered product falls back to the generic text.
    pub(crate) fn render(&self, scored: &Scored, customer_name: &str) -> String {
        let Some(template) = templates::template_for(scored.template_key) else {
            tracing::warn!(
                product = scored.product,
                "no template registered, using the generic fallback"
            );
            return enforce_tov(GENERIC_TEXT);
        };

        let text = self.pick_variant(template, &scored.result.facts);
        let filled = substitute(text, |key| {
            self.placeholder_value(key, &scored.result.facts, customer_name)
        });
        enforce_tov(&filled)
    }

    /// The with-amount variant is used only when the facts cover every
    /// placeholder it needs; otherwise the primary text with defaults.
    fn pick_variant(&self, template: &'static Template, facts: &Facts) -> &'static str {
        match &template.with_amount {
            Some(variant) if variant.required.iter().all(|key| facts.contains_key(key)) => {
                variant.text
            }
            _ => template.text,
        }
    }

    fn placeholder_value(&self, key: &str, facts: &Facts, customer_name: &str) -> String {
        match key {
            "name" => customer_name.to_string(),
            "month" => self.month.to_string(),
            _ => match facts.get(key) {
                Some(Fact::Money(amount)) => format_kzt(*amount),
                Some(Fact::Count(count)) => format_count(*count),
                Some(Fact::Percent(value)) => format_percent(*value),
                Some(Fact::Text(text)) => text.clone(),
                None => default_placeholder(key),
            },
        }
    }
}

/// Static defaults backing the primary templates when a fact is absent.
fn default_placeholder(key: &str) -> String {
    match key {
        "amount" => format_kzt(rust_decimal_macros::dec!(50_000)),
        "cashback" => format_kzt(rust_decimal_macros::dec!(2_000)),
        "balance" => format_kzt(rust_decimal_macros::dec!(1_000_000)),
        "profit" => format_kzt(rust_decimal_macros::dec!(150_000)),
        "savings" => format_kzt(rust_decimal_macros::dec!(5_000)),
        "limit" => format_kzt(rust_decimal_macros::dec!(2_000_000)),
        "fx_curr" => "USD".to_string(),
        "cat1" => "онлайн-покупки".to_string(),
        "cat2" => "доставка".to_string(),
        "cat3" => "развлечения".to_string(),
        _ => String::new(),
    }
}

/// Replaces `{key}` markers via the resolver. Unterminated braces are copied
/// through verbatim.
fn substitute(text: &str, mut resolve: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(&resolve(&after[..close]));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Applies the tone-of-voice rules. The function is idempotent: applying it
/// to its own output yields the same string.
pub fn enforce_tov(message: &str) -> String {
    let mut text = cap_exclamations(message.trim());
    text = demote_shouting(&text);
    text = collapse_spaces(&text);
    text = normalize_currency(&text);
    text = clamp_length(text);
    if !has_call_to_action(&text) {
        // Shorten first so the appended follow-up fits the length window
        // intact; otherwise the re-clamp would cut the verb right back off.
        let reserve = MAX_LEN - FOLLOW_UP.chars().count();
        if text.chars().count() > reserve {
            text = text.chars().take(reserve - 1).collect();
            text.push('…');
        }
        text.push_str(FOLLOW_UP);
        text = clamp_length(text);
    }
    text
}

/// Pads short messages with the follow-up question and truncates long ones at
/// 217 characters plus an ellipsis. Lengths are in characters, not bytes.
fn clamp_length(mut text: String) -> String {
    while text.chars().count() < MIN_LEN {
        if text.is_empty() {
            text.push_str(FOLLOW_UP.trim_start());
        } else {
            text.push_str(FOLLOW_UP);
        }
    }
    let length = text.chars().count();
    if length > MAX_LEN {
        text = text.chars().take(MAX_LEN - 3).collect();
        text.push('…');
    }
    text
}

/// Keeps only the leftmost exclamation mark.
fn cap_exclamations(text: &str) -> String {
    let mut seen = false;
    text.chars()
        .filter(|ch| {
            if *ch != '!' {
                return true;
            }
            if seen {
                false
            } else {
                seen = true;
                true
            }
        })
        .collect()
}

/// An all-caps message keeps only its leading capital.
fn demote_shouting(text: &str) -> String {
    let mut letters = text.chars().filter(|ch| ch.is_alphabetic()).peekable();
    if letters.peek().is_none() {
        return text.to_string();
    }
    if !text
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .all(char::is_uppercase)
    {
        return text.to_string();
    }
    text.chars()
        .enumerate()
        .flat_map(|(index, ch)| {
            if index == 0 {
                vec![ch]
            } else {
                ch.to_lowercase().collect()
            }
        })
        .collect()
}

/// Collapses runs of ASCII spaces; non-breaking spaces are left alone.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_space = false;
    for ch in text.chars() {
        if ch == ' ' {
            if !previous_space {
                out.push(ch);
            }
            previous_space = true;
        } else {
            previous_space = false;
            out.push(ch);
        }
    }
    out
}

/// Deduplicates "₸" runs and pins exactly one NBSP between a digit and the
/// glyph.
fn normalize_currency(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];
        if ch != '₸' {
            out.push(ch);
            index += 1;
            continue;
        }

        // Swallow any further glyphs separated only by whitespace.
        let mut lookahead = index + 1;
        loop {
            let mut probe = lookahead;
            while probe < chars.len() && (chars[probe] == ' ' || chars[probe] == NBSP) {
                probe += 1;
            }
            if probe < chars.len() && chars[probe] == '₸' {
                lookahead = probe + 1;
            } else {
                break;
            }
        }

        // Rewrite the whitespace between a preceding digit and the glyph.
        while matches!(out.last(), Some(&' ') | Some(&NBSP)) {
            out.pop();
        }
        if matches!(out.last(), Some(last) if last.is_ascii_digit()) {
            out.push(NBSP);
        } else if !out.is_empty() {
            out.push(NBSP);
        }
        out.push('₸');
        index = lookahead;
    }

    out.into_iter().collect()
}

fn has_call_to_action(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CTA_VERBS.iter().any(|verb| lowered.contains(verb))
}
