//! Closed registry of push-notification templates and the KZT display
//! formatters. The money formatter emits the currency glyph itself, so the
//! template texts never carry a literal "₸" next to a placeholder.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::Money;

/// Non-breaking space, mandated between digit groups and before "₸".
pub(crate) const NBSP: char = '\u{a0}';

/// Fallback text used when a product has no registered template.
pub(crate) const GENERIC_TEXT: &str = "Доступен новый продукт. Узнать подробнее?";

pub(crate) struct Template {
    pub(crate) id: &'static str,
    /// Primary text; placeholders outside `{name}`/`{month}` fall back to
    /// static defaults when the facts lack them.
    pub(crate) text: &'static str,
    /// Variant used when every listed fact is available.
    pub(crate) with_amount: Option<WithAmount>,
}

pub(crate) struct WithAmount {
    pub(crate) text: &'static str,
    /// Fact keys that must be present for this variant.
    pub(crate) required: &'static [&'static str],
}

pub(crate) const TEMPLATES: &[Template] = &[
    Template {
        id: "travel_card",
        text: "{name}, в {month} у вас много поездок и такси. С тревел-картой часть расходов вернулась бы кешбэком. Оформить карту?",
        with_amount: Some(WithAmount {
            text: "{name}, в {month} вы потратили {amount} на такси и поездки. С тревел-картой получили бы {cashback} кешбэка. Оформить карту?",
            required: &["amount", "cashback"],
        }),
    },
    Template {
        id: "premium_card",
        text: "{name}, у вас стабильно крупный остаток и траты в ресторанах. Премиальная карта даст повышенный кешбэк и бесплатные снятия. Оформить сейчас.",
        with_amount: Some(WithAmount {
            text: "{name}, с остатком {balance} премиальная карта даст до {cashback} кешбэка в месяц. Оформить карту?",
            required: &["balance", "cashback"],
        }),
    },
    Template {
        id: "credit_card",
        text: "{name}, ваши топ-категории — {cat1}, {cat2}, {cat3}. Кредитная карта даёт до 10% в любимых категориях и на онлайн-сервисы. Оформить карту.",
        with_amount: Some(WithAmount {
            text: "{name}, ваши топ-категории — {cat1}, {cat2}, {cat3}. Кредитная карта вернула бы {cashback} кешбэка с онлайн-сервисов. Оформить карту?",
            required: &["cat1", "cat2", "cat3", "cashback"],
        }),
    },
    Template {
        id: "currency_exchange",
        text: "{name}, вы часто платите в {fx_curr}. В приложении выгодный обмен и авто-покупка по целевому курсу. Настроить обмен.",
        with_amount: Some(WithAmount {
            text: "{name}, в {month} вы обменяли {amount}. С выгодным курсом в приложении сэкономили бы {savings}. Настроить обмен?",
            required: &["amount", "savings"],
        }),
    },
    Template {
        id: "savings_deposit",
        text: "{name}, у вас остаются свободные средства. Разместите их на сберегательном вкладе — максимальный доход при защите KDIF. Открыть вклад.",
        with_amount: Some(WithAmount {
            text: "{name}, с {amount} на сберегательном вкладе получите около {profit} в год. Открыть вклад?",
            required: &["amount", "profit"],
        }),
    },
    Template {
        id: "accumulation_deposit",
        text: "{name}, у вас остаются свободные средства. Разместите их на накопительном вкладе — удобно копить и получать вознаграждение. Открыть вклад.",
        with_amount: Some(WithAmount {
            text: "{name}, с {amount} на накопительном вкладе получите около {profit} в год. Открыть вклад?",
            required: &["amount", "profit"],
        }),
    },
    Template {
        id: "multi_currency_deposit",
        text: "{name}, у вас остаются свободные средства. Разместите их на мультивалютном вкладе — удобно копить и получать вознаграждение. Открыть вклад.",
        with_amount: Some(WithAmount {
            text: "{name}, с {amount} на мультивалютном вкладе получите около {profit} в год. Открыть вклад?",
            required: &["amount", "profit"],
        }),
    },
    Template {
        id: "investments",
        text: "{name}, попробуйте инвестиции с низким порогом входа и без комиссий на старт. Открыть счёт.",
        with_amount: Some(WithAmount {
            text: "{name}, с {amount} можно начать инвестировать. Без комиссий в первый год. Открыть счёт?",
            required: &["amount"],
        }),
    },
    Template {
        id: "gold_bars",
        text: "{name}, для диверсификации портфеля рассмотрите золотые слитки 999,9 пробы. Хранение в сейфовых ячейках банка. Узнать подробнее.",
        with_amount: Some(WithAmount {
            text: "{name}, с {amount} можно купить золотые слитки для долгосрочного сохранения стоимости. Узнать подробнее?",
            required: &["amount"],
        }),
    },
    Template {
        id: "cash_credit",
        text: "{name}, если нужен запас на крупные траты — можно оформить кредит наличными с гибкими выплатами. Узнать доступный лимит.",
        with_amount: Some(WithAmount {
            text: "{name}, вам доступен кредит до {limit} наличными. Гибкие выплаты без штрафов. Узнать лимит?",
            required: &["limit"],
        }),
    },
];

pub(crate) fn template_for(key: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == key)
}

/// Formats a KZT amount per the tone-of-voice contract: NBSP thousands
/// groups, no fraction for integer amounts, millions as "X,Y млн ₸" with a
/// decimal comma, and a single NBSP before the glyph.
pub fn format_kzt(amount: Money) -> String {
    let amount = amount.round_dp(2);
    if amount >= dec!(1_000_000) {
        let millions = (amount / dec!(1_000_000)).round_dp(1);
        let mut digits = millions.to_string();
        if !digits.contains('.') {
            digits.push_str(".0");
        }
        return format!("{} млн{NBSP}₸", digits.replace('.', ","));
    }

    let integer = amount.trunc();
    let fraction = amount - integer;
    let mut out = group_thousands(&integer.normalize().to_string());
    if !fraction.is_zero() {
        use rust_decimal::prelude::ToPrimitive;

        // Tiyn-level amounts keep two digits behind a decimal comma.
        let cents = (fraction * dec!(100)).round().to_i64().unwrap_or(0);
        out.push(',');
        out.push_str(&format!("{cents:02}"));
    }
    out.push(NBSP);
    out.push('₸');
    out
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (index, ch) in chars.iter().enumerate() {
        if index > 0 && (chars.len() - index) % 3 == 0 && ch.is_ascii_digit() {
            grouped.push(NBSP);
        }
        grouped.push(*ch);
    }
    grouped
}

/// Russian month names in the locative case, as used after "в".
pub(crate) fn month_locative(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "январе",
        "феврале",
        "марте",
        "апреле",
        "мае",
        "июне",
        "июле",
        "августе",
        "сентябре",
        "октябре",
        "ноябре",
        "декабре",
    ];
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

pub(crate) fn format_percent(value: u32) -> String {
    format!("{value}%")
}

/// The decimal representation of a count fact.
pub(crate) fn format_count(value: u64) -> String {
    value.to_string()
}
