use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::{DomainError, DomainResult};

pub fn parse_iso_date(raw: &str) -> DomainResult<Date> {
    let trimmed = raw.trim();
    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|_| {
        DomainError::InvalidDate {
            value: trimmed.to_owned(),
        }
    })
}

pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| {
            format!("{}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
        })
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
