pub mod assignments;
pub mod forms;
pub mod reports;
pub mod roster;
pub mod season;
pub mod text;

pub use self::assignments::{parse_assignments, AssignmentPage, RejectedRow, ASSIGNMENT_COLUMNS};
pub use self::forms::{extract_session_key, first_form, is_login_page, HtmlForm};
pub use self::reports::{parse_game_reports, GameReportPage, GameReportRow};
pub use self::roster::{parse_roster, RosterPage, RosterRow};
pub use self::season::parse_season_dates;

use crate::errors::*;

use select::document::Document;
use select::node::Node;
use select::predicate::{And, Class, Name, Or};

/// The site never puts a class on its tables; data rows alternate between two row styles.
pub fn data_rows<'a>(document: &'a Document) -> impl Iterator<Item = Node<'a>> + 'a
{
    document.find(And(Name("tr"), Or(Class("trstyle1"), Class("trstyle2"))))
}

/// Text of every `<td>` in `row`.
pub fn cells(row: &Node) -> Vec<String>
{
    row.find(Name("td"))
        .map(|td| td.text())
        .collect()
}

/// Rejects rows with fewer than `required` cells.
pub fn require_columns(row: usize, cells: &[String], required: usize) -> Result<()>
{
    if cells.len() < required
    {
        bail!(ErrorKind::Parse(row, format!("expected at least {} columns, found {}", required, cells.len())));
    }

    Ok(())
}

/// Reason part of a row-level parse error, the whole message for anything else.
pub fn rejection_reason(error: &Error) -> String
{
    match error.kind()
    {
        ErrorKind::Parse(_, reason) => reason.clone(),
        other => other.to_string(),
    }
}
