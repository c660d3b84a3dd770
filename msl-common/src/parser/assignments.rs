use crate::errors::*;
use crate::parser::{cells, data_rows, forms, rejection_reason, require_columns, text};
use crate::schedule::{GameRecord, RawName};

use chrono::NaiveDate;

use regex::Regex;

use select::document::Document;

/*
    <tr class="trstyle1">
    <td align="center">748590<br/><font color="green"></font></td>
    <td><a href="javascript:directWindow('Ken Lawrence #2','No directions available','No comments')">Ken Lawrence #2</a></td>
    <td>8:00 AM</td>
    <td>U12G House</td>
    <td>U-12</td>
    <td>Girls</td>
    <td>Rec</td>
    <td>Bill Chappell</td>
    <td>Katie Cohen</td>
    <td align="left">Danika Pfleghardt</td>
    <td align="left">Mitra Tafreshi</td>
    <td align="left">Kate Curby</td>
    </tr>
*/
const GAME_ID: usize = 0;
const VENUE: usize = 1;
const TIME: usize = 2;
const LEVEL: usize = 3;
const AGE_GROUP: usize = 4;
const CENTER: usize = 9;
const ASSISTANT1: usize = 10;
const ASSISTANT2: usize = 11;

pub const ASSIGNMENT_COLUMNS: usize = ASSISTANT2 + 1;

lazy_static! {
    static ref GAME_ID_REGEX: Regex = Regex::new(r"^\s*(?P<id>\d+)").unwrap();
}

/// A row the parser refused, 1-based among the data rows of the page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RejectedRow
{
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignmentPage
{
    pub games: Vec<GameRecord>,
    pub rejected: Vec<RejectedRow>,
}

/// Parses one `ViewRefAssignments.jsp` page. Rows come back in page order; malformed rows end
/// up in `rejected` instead of failing the page.
pub fn parse_assignments(html: &str, date: NaiveDate) -> Result<AssignmentPage>
{
    if forms::is_login_page(html)
    {
        bail!(ErrorKind::SessionExpired);
    }

    let document = Document::from(html);
    let mut page = AssignmentPage::default();

    for (index, row) in data_rows(&document).enumerate()
    {
        let row_number = index + 1;

        match parse_row(row_number, &cells(&row), date)
        {
            Ok(game) => page.games.push(game),
            Err(error) =>
            {
                warn!("Skipping row {} of {}: {}", row_number, date, error);
                page.rejected.push(RejectedRow::new(row_number, rejection_reason(&error)));
            },
        }
    }

    debug!("Parsed {} games and rejected {} rows for {}", page.games.len(), page.rejected.len(), date);
    Ok(page)
}

pub fn parse_row(row: usize, cells: &[String], date: NaiveDate) -> Result<GameRecord>
{
    require_columns(row, cells, ASSIGNMENT_COLUMNS)?;

    let game_id = parse_game_id(&cells[GAME_ID])
        .ok_or_else(|| ErrorKind::Parse(row, format!("no game id in '{}'", text::clean(&cells[GAME_ID]))))?;

    let venue = text::clean(&cells[VENUE]);
    if venue.is_empty()
    {
        bail!(ErrorKind::Parse(row, String::from("empty venue")));
    }

    Ok(GameRecord::new(
        game_id,
        venue,
        date,
        text::clean(&cells[TIME]),
        text::clean(&cells[AGE_GROUP]),
        text::clean(&cells[LEVEL]),
        RawName::from_site(&cells[CENTER]),
        RawName::from_site(&cells[ASSISTANT1]),
        RawName::from_site(&cells[ASSISTANT2]),
    ))
}

/// The id cell may carry status text after the number ("(confirmed)", "VENUE CONFLICT").
pub fn parse_game_id(cell: &str) -> Option<String>
{
    let cleaned = text::clean(cell);

    if let Some(captures) = GAME_ID_REGEX.captures(&cleaned)
    {
        return captures.name("id").map(|id| id.as_str().to_string());
    }

    let stripped = text::clean(&cleaned.replace("VENUE CONFLICT", ""));
    if stripped.is_empty()
    {
        None
    } else {
        Some(stripped)
    }
}
