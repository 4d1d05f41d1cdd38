use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use super::entities::{
    Category, Condition, DEFAULT_LOCATION, DEFAULT_MIN_BID_INCREMENT_CENTS, DEFAULT_PHOTO,
    MAX_AUCTION_DAYS,
};
use crate::shared::money::dollars_to_cents;
use crate::shared::validation::{FieldError, Violations};

pub const MAX_SEARCH_LEN: usize = 100;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static SEARCH_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));
static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("static regex")
});

/// Strips markup from free text and trims it.
pub fn sanitize_text(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, "");
    without_tags.replace(['<', '>'], "").trim().to_string()
}

/// Keeps word characters, whitespace and hyphens; `None` when nothing is left.
pub fn clean_search(query: &str) -> Option<String> {
    let cleaned: String = SEARCH_DISALLOWED
        .replace_all(query, "")
        .trim()
        .chars()
        .take(MAX_SEARCH_LEN)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL.is_match(value)
}

/// Raw listing fields as received; every field optional so create and update share it.
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starting_price: Option<f64>,
    pub category: Option<String>,
    pub auction_end_date: Option<String>,
    pub photo: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub min_bid_increment: Option<f64>,
}

impl ItemInput {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.starting_price.is_none()
            && self.category.is_none()
            && self.auction_end_date.is_none()
            && self.photo.is_none()
            && self.condition.is_none()
            && self.location.is_none()
            && self.min_bid_increment.is_none()
    }
}

/// A validated new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub starting_price_cents: i64,
    pub auction_end_date: DateTime<Utc>,
    pub photo: String,
    pub condition: Condition,
    pub location: String,
    pub min_bid_increment_cents: i64,
}

impl ItemDraft {
    pub fn parse(input: ItemInput, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut v = Violations::new();

        let name = required(&mut v, "name", "Item name must be between 1 and 100 characters", input.name)
            .and_then(|raw| check_name(&mut v, &raw));
        let description = required(
            &mut v,
            "description",
            "Description must be between 10 and 500 characters",
            input.description,
        )
        .and_then(|raw| check_description(&mut v, &raw));
        let starting_price_cents = required(
            &mut v,
            "startingPrice",
            "Starting price must be between $0.01 and $100,000",
            input.starting_price,
        )
        .and_then(|raw| check_starting_price(&mut v, raw));
        let category = required(&mut v, "category", "Please select a valid category", input.category)
            .and_then(|raw| check_category(&mut v, &raw));
        let auction_end_date = required(
            &mut v,
            "auctionEndDate",
            "Please provide a valid end date",
            input.auction_end_date,
        )
        .and_then(|raw| check_end_date(&mut v, &raw, now));
        let photo = input.photo.and_then(|raw| check_photo(&mut v, &raw));
        let condition = input.condition.and_then(|raw| check_condition(&mut v, &raw));
        let location = input.location.and_then(|raw| check_location(&mut v, &raw));
        let min_bid_increment_cents = input
            .min_bid_increment
            .and_then(|raw| check_increment(&mut v, raw));

        match (name, description, starting_price_cents, category, auction_end_date) {
            (
                Some(name),
                Some(description),
                Some(starting_price_cents),
                Some(category),
                Some(auction_end_date),
            ) if v.is_empty() => Ok(ItemDraft {
                name,
                description,
                category,
                starting_price_cents,
                auction_end_date,
                photo: photo.unwrap_or_else(|| DEFAULT_PHOTO.to_string()),
                condition: condition.unwrap_or(Condition::Good),
                location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                min_bid_increment_cents: min_bid_increment_cents
                    .unwrap_or(DEFAULT_MIN_BID_INCREMENT_CENTS),
            }),
            _ => Err(v.into_errors()),
        }
    }
}

/// Validated partial update. At least one field is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    /// Also becomes the new current bid.
    pub starting_price_cents: Option<i64>,
    pub auction_end_date: Option<DateTime<Utc>>,
    pub photo: Option<String>,
    pub condition: Option<Condition>,
    pub location: Option<String>,
    pub min_bid_increment_cents: Option<i64>,
}

impl ItemChanges {
    pub fn parse(input: ItemInput, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        if input.is_empty() {
            return Err(vec![FieldError::new(
                "body",
                "At least one field must be provided",
            )]);
        }

        let mut v = Violations::new();
        let changes = ItemChanges {
            name: input.name.and_then(|raw| check_name(&mut v, &raw)),
            description: input.description.and_then(|raw| check_description(&mut v, &raw)),
            category: input.category.and_then(|raw| check_category(&mut v, &raw)),
            starting_price_cents: input
                .starting_price
                .and_then(|raw| check_starting_price(&mut v, raw)),
            auction_end_date: input
                .auction_end_date
                .and_then(|raw| check_end_date(&mut v, &raw, now)),
            photo: input.photo.and_then(|raw| check_photo(&mut v, &raw)),
            condition: input.condition.and_then(|raw| check_condition(&mut v, &raw)),
            location: input.location.and_then(|raw| check_location(&mut v, &raw)),
            min_bid_increment_cents: input
                .min_bid_increment
                .and_then(|raw| check_increment(&mut v, raw)),
        };
        v.finish(changes)
    }
}

fn required<T>(v: &mut Violations, field: &str, message: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        v.push(field, message);
    }
    value
}

fn check_name(v: &mut Violations, raw: &str) -> Option<String> {
    let name = sanitize_text(raw);
    if (1..=100).contains(&name.chars().count()) {
        Some(name)
    } else {
        v.push_with_value("name", "Item name must be between 1 and 100 characters", raw);
        None
    }
}

fn check_description(v: &mut Violations, raw: &str) -> Option<String> {
    let description = sanitize_text(raw);
    if (10..=500).contains(&description.chars().count()) {
        Some(description)
    } else {
        v.push_with_value(
            "description",
            "Description must be between 10 and 500 characters",
            raw,
        );
        None
    }
}

fn check_starting_price(v: &mut Violations, raw: f64) -> Option<i64> {
    match dollars_to_cents(raw) {
        Some(cents) if (1..=10_000_000).contains(&cents) => Some(cents),
        _ => {
            v.push_with_value(
                "startingPrice",
                "Starting price must be between $0.01 and $100,000",
                raw,
            );
            None
        }
    }
}

fn check_increment(v: &mut Violations, raw: f64) -> Option<i64> {
    match dollars_to_cents(raw) {
        Some(cents) if (1..=100_000).contains(&cents) => Some(cents),
        _ => {
            v.push_with_value(
                "minBidIncrement",
                "Minimum bid increment must be between $0.01 and $1,000",
                raw,
            );
            None
        }
    }
}

fn check_category(v: &mut Violations, raw: &str) -> Option<Category> {
    match raw.trim().parse::<Category>() {
        Ok(category) => Some(category),
        Err(_) => {
            v.push_with_value("category", "Please select a valid category", raw);
            None
        }
    }
}

fn check_condition(v: &mut Violations, raw: &str) -> Option<Condition> {
    match raw.trim().parse::<Condition>() {
        Ok(condition) => Some(condition),
        Err(_) => {
            v.push_with_value("condition", "Please select a valid condition", raw);
            None
        }
    }
}

fn check_photo(v: &mut Violations, raw: &str) -> Option<String> {
    let photo = raw.trim();
    if is_http_url(photo) {
        Some(photo.to_string())
    } else {
        v.push_with_value("photo", "Photo must be a valid URL", raw);
        None
    }
}

fn check_location(v: &mut Violations, raw: &str) -> Option<String> {
    let location = sanitize_text(raw);
    if location.chars().count() <= 100 {
        Some(if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location
        })
    } else {
        v.push("location", "Location cannot exceed 100 characters");
        None
    }
}

fn check_end_date(v: &mut Violations, raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let Some(end) = parse_date(raw.trim()) else {
        v.push_with_value("auctionEndDate", "Please provide a valid end date", raw);
        return None;
    };

    if end <= now {
        v.push_with_value("auctionEndDate", "Auction end date must be in the future", raw);
        None
    } else if end > now + Duration::days(MAX_AUCTION_DAYS) {
        v.push_with_value("auctionEndDate", "Auction cannot run for more than 30 days", raw);
        None
    } else {
        Some(end)
    }
}

/// RFC 3339, a naive date-time taken as UTC, or a bare date at midnight UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}
