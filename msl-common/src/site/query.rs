use crate::config::SiteConfig;
use crate::errors::*;

use chrono::{Datelike, NaiveDate};

use reqwest::Url;

pub const LOGIN_PAGE: &'static str = "YSLmobile.jsp";
pub const ASSIGNMENTS_PAGE: &'static str = "ViewRefAssignments.jsp";
pub const ROSTER_PAGE: &'static str = "AddRef.jsp";
pub const GAME_REPORTS_PAGE: &'static str = "GamesReportChoice.jsp";

/// Query parameter carrying the site's session key on every link.
pub const SESSION_KEY_PARAM: &'static str = "YSLkey";

/// Which date list the assignments page draws the requested date from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateMode
{
    FutureDates,
    AllDates,
}

impl DateMode
{
    fn as_param(&self) -> &'static str
    {
        match self
        {
            DateMode::FutureDates => "futureDates",
            DateMode::AllDates => "allDates",
        }
    }
}

/// The pages this crate knows how to ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Query
{
    /// Assignments of every venue on one date
    Assignments { date: NaiveDate, mode: DateMode },
    /// Assignments page without a date, its date box lists the season
    SeasonIndex,
    RefereeRoster,
    /// Game reports of the whole season, reached through the report filter form
    GameReports,
}

/// What actually goes over the wire for a `Query`.
#[derive(Debug, Clone, PartialEq)]
pub enum Request
{
    Get(Url),
    /// GET `page`, take its first form, override `fields` and submit it
    Form { page: Url, fields: Vec<(String, String)> },
}

impl Query
{
    pub fn request(&self, base: &Url, config: &SiteConfig, key: &str) -> Result<Request>
    {
        let request = match self
        {
            Query::Assignments { date, mode } =>
            {
                let mut url = page_url(base, ASSIGNMENTS_PAGE)?;
                url.query_pairs_mut()
                    .append_pair(SESSION_KEY_PARAM, key)
                    .append_pair("seasonId", &config.season_id.to_string())
                    .append_pair("leagueId", &config.league_id.to_string())
                    .append_pair("dateMode", mode.as_param())
                    .append_pair("date", &site_date(*date));
                Request::Get(url)
            },
            Query::SeasonIndex =>
            {
                let mut url = page_url(base, ASSIGNMENTS_PAGE)?;
                url.query_pairs_mut()
                    .append_pair(SESSION_KEY_PARAM, key)
                    .append_pair("seasonId", &config.season_id.to_string())
                    .append_pair("leagueId", &config.league_id.to_string())
                    .append_pair("dateMode", DateMode::AllDates.as_param());
                Request::Get(url)
            },
            Query::RefereeRoster =>
            {
                let mut url = page_url(base, ROSTER_PAGE)?;
                url.query_pairs_mut()
                    .append_pair(SESSION_KEY_PARAM, key)
                    .append_pair("actionName", "Referees")
                    .append_pair("showAll", "true");
                Request::Get(url)
            },
            Query::GameReports =>
            {
                let mut page = page_url(base, GAME_REPORTS_PAGE)?;
                page.query_pairs_mut()
                    .append_pair(SESSION_KEY_PARAM, key)
                    .append_pair("actionName", "Game Reports");
                Request::Form {
                    page,
                    fields: vec!(
                        (String::from(SESSION_KEY_PARAM), key.to_string()),
                        (String::from("returnJsp"), String::from("ShowGameReports.jsp")),
                        (String::from("dateMode"), String::from("allDates")),
                    ),
                }
            },
        };

        Ok(request)
    }
}

pub fn page_url(base: &Url, page: &str) -> Result<Url>
{
    base.join(page)
        .chain_err(|| format!("Cannot build url for {} from {}", page, base))
}

/// The site's date parameter: month/day/year without padding, e.g. `9/24/2022`.
pub fn site_date(date: NaiveDate) -> String
{
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
