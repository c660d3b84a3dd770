use crate::errors::*;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// How the season index spells a date: "Saturday, September 24, 2022"
pub const DATE_LABEL_FORMAT: &'static str = "%A, %B %d, %Y";

/// Friday, Saturday and Sunday of the first weekend whose Friday is on or after `day`.
pub fn weekend_of(day: NaiveDate) -> [NaiveDate; 3]
{
    let friday = Weekday::Fri.num_days_from_monday() as i64;
    let today = day.weekday().num_days_from_monday() as i64;
    let offset = (friday - today + 7) % 7;

    let friday = day + Duration::days(offset);
    [friday, friday + Duration::days(1), friday + Duration::days(2)]
}

pub fn parse_date_label(label: &str) -> Result<NaiveDate>
{
    let label = label.split_whitespace().collect::<Vec<&str>>().join(" ");

    NaiveDate::parse_from_str(&label, DATE_LABEL_FORMAT)
        .chain_err(|| format!("'{}' is not a season date", label))
}

pub fn date_label(date: NaiveDate) -> String
{
    date.format("%A, %B %-d, %Y").to_string()
}

/// Index of the first label that is not before `today`. Labels that are not dates are skipped.
pub fn first_upcoming(labels: &[String], today: NaiveDate) -> Option<usize>
{
    labels.iter()
        .position(|label| match parse_date_label(label)
        {
            Ok(date) => date >= today,
            Err(_) => false,
        })
}
