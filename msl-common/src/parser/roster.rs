use crate::errors::*;
use crate::parser::{cells, data_rows, forms, rejection_reason, require_columns, text, RejectedRow};
use crate::schedule::RawName;

use select::document::Document;

const FULL_NAME: usize = 4;
const EMAIL: usize = 7;

/// One referee of the `AddRef.jsp` roster.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RosterRow
{
    pub name: RawName,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterPage
{
    pub referees: Vec<RosterRow>,
    pub rejected: Vec<RejectedRow>,
}

pub fn parse_roster(html: &str) -> Result<RosterPage>
{
    if forms::is_login_page(html)
    {
        bail!(ErrorKind::SessionExpired);
    }

    let document = Document::from(html);
    let mut page = RosterPage::default();

    for (index, row) in data_rows(&document).enumerate()
    {
        let row_number = index + 1;
        let columns = cells(&row);

        match require_columns(row_number, &columns, EMAIL + 1)
        {
            Err(error) => page.rejected.push(RejectedRow::new(row_number, rejection_reason(&error))),
            Ok(_) =>
            {
                let name = RawName::from_site(&columns[FULL_NAME]);
                if !name.is_person()
                {
                    page.rejected.push(RejectedRow::new(row_number, String::from("no referee name")));
                    continue;
                }

                page.referees.push(RosterRow::new(name, text::clean(&columns[EMAIL])));
            },
        }
    }

    debug!("Roster lists {} referees", page.referees.len());
    Ok(page)
}
