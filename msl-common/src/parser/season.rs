use crate::errors::*;
use crate::parser::{forms, text};

use select::document::Document;
use select::predicate::{And, Attr, Class, Name};

/// The first two links of the date box are the "future dates" / "all dates" switches.
const NAVIGATION_LINKS: usize = 2;

/// Reads the date labels ("Saturday, September 24, 2022") of the season index in page order.
pub fn parse_season_dates(html: &str) -> Result<Vec<String>>
{
    if forms::is_login_page(html)
    {
        bail!(ErrorKind::SessionExpired);
    }

    let document = Document::from(html);

    let date_box = document.find(And(Name("td"), And(Class("tblborderforms"), Attr("align", "center"))))
        .next()
        .ok_or_else(|| ErrorKind::Parse(0, String::from("season date box not found")))?;

    let labels: Vec<String> = date_box.find(Name("a"))
        .skip(NAVIGATION_LINKS)
        .map(|anchor| text::clean(&anchor.text()))
        .filter(|label| !label.is_empty())
        .collect();

    debug!("Season index lists {} dates", labels.len());
    Ok(labels)
}
