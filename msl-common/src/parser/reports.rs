use crate::errors::*;
use crate::parser::{assignments, cells, data_rows, forms, rejection_reason, require_columns, text, RejectedRow};
use crate::schedule::RawName;

use select::document::Document;

/*
     0 <td>9/8/2023 - 9:30 PM</td>
     1 <td>764395 (confirmed)</td>
     2 <td><a href="javascript:directWindow('Oakton HS 3 - both sides','No directions available','No comments')">Oakton HS 3 Full field</a></td>
     3 <td>O-30</td>
     4 <td>Co-ed</td>
     5 <td>Rec</td>
     6 <td align="center">Team 4</td>
     7 <td align="center">Team 3</td>
     8 <td align="center">Jaime Villamarin</td>
     9 <td align="center">Martin Cooley</td>
    10 <td align="center">Jason Allen</td>
*/
const PLAYED: usize = 0;
const GAME_ID: usize = 1;
const VENUE: usize = 2;
const AGE_GROUP: usize = 3;
const CENTER: usize = 8;
const ASSISTANT1: usize = 9;
const ASSISTANT2: usize = 10;

/// One played game of `ShowGameReports.jsp`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct GameReportRow
{
    pub played: String,
    pub game_id: String,
    pub venue: String,
    pub age_group: String,
    pub center: RawName,
    pub assistant1: RawName,
    pub assistant2: RawName,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameReportPage
{
    pub games: Vec<GameReportRow>,
    pub rejected: Vec<RejectedRow>,
}

pub fn parse_game_reports(html: &str) -> Result<GameReportPage>
{
    if forms::is_login_page(html)
    {
        bail!(ErrorKind::SessionExpired);
    }

    let document = Document::from(html);
    let mut page = GameReportPage::default();

    for (index, row) in data_rows(&document).enumerate()
    {
        let row_number = index + 1;

        match parse_row(row_number, &cells(&row))
        {
            Ok(game) => page.games.push(game),
            Err(error) => page.rejected.push(RejectedRow::new(row_number, rejection_reason(&error))),
        }
    }

    debug!("Game reports list {} games", page.games.len());
    Ok(page)
}

fn parse_row(row: usize, cells: &[String]) -> Result<GameReportRow>
{
    require_columns(row, cells, ASSISTANT2 + 1)?;

    let game_id = assignments::parse_game_id(&cells[GAME_ID])
        .ok_or_else(|| ErrorKind::Parse(row, String::from("no game id")))?;

    Ok(GameReportRow::new(
        text::clean(&cells[PLAYED]),
        game_id,
        text::clean(&cells[VENUE]),
        text::clean(&cells[AGE_GROUP]),
        RawName::from_site(&cells[CENTER]),
        RawName::from_site(&cells[ASSISTANT1]),
        RawName::from_site(&cells[ASSISTANT2]),
    ))
}
