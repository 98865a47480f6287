//! Controlled vocabulary of transaction categories. Labels arrive normalized
//! from the upstream system; matching is exact string equality.

pub const TAXI: &str = "Такси";
pub const HOTELS: &str = "Отели";
pub const TRAVEL: &str = "Путешествия";
pub const RESTAURANTS: &str = "Кафе и рестораны";
pub const GROCERIES: &str = "Продукты питания";
pub const CLOTHES: &str = "Одежда и обувь";
pub const ENTERTAINMENT: &str = "Развлечения";
pub const CINEMA: &str = "Кино";
pub const GAMING: &str = "Играем дома";
pub const STREAMING: &str = "Смотрим дома";
pub const COSMETICS: &str = "Косметика и Парфюмерия";
pub const SPORT: &str = "Спорт";
pub const MEDICINE: &str = "Медицина";
pub const AUTO: &str = "Авто";
pub const FUEL: &str = "АЗС";
pub const GIFTS: &str = "Подарки";
pub const JEWELRY: &str = "Ювелирные украшения";

/// Bucket for categories outside the controlled list. Such rows still count
/// toward grand totals.
pub const OTHER: &str = "Other";

pub const CONTROLLED: &[&str] = &[
    TAXI,
    HOTELS,
    TRAVEL,
    RESTAURANTS,
    GROCERIES,
    CLOTHES,
    ENTERTAINMENT,
    CINEMA,
    GAMING,
    STREAMING,
    COSMETICS,
    SPORT,
    MEDICINE,
    AUTO,
    FUEL,
    GIFTS,
    JEWELRY,
];

/// Categories the travel card rewards.
pub(crate) const TRAVEL_SET: &[&str] = &[TAXI, HOTELS, TRAVEL];

/// Premium-cashback categories.
pub(crate) const PREMIUM_SET: &[&str] = &[RESTAURANTS, COSMETICS, GIFTS, JEWELRY];

/// Online services rewarded by the credit card.
pub(crate) const ONLINE_SET: &[&str] = &[CINEMA, GAMING, STREAMING];

/// Big-ticket categories signalling a financing need.
pub(crate) const HIGH_VALUE_SET: &[&str] = &[MEDICINE, AUTO, TRAVEL, JEWELRY, GIFTS];

pub(crate) fn normalize(category: &str) -> &'static str {
    CONTROLLED
        .iter()
        .find(|known| **known == category)
        .copied()
        .unwrap_or(OTHER)
}
