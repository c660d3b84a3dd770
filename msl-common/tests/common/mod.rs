#![allow(dead_code)]

use msl_common::config::SiteConfig;
use msl_common::errors::*;
use msl_common::site::Transport;

use reqwest::Url;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

pub const BASE_URL: &str = "http://msl.test/";

pub const LOGIN_PAGE: &str = include_str!("../../resources/login.html");

/// Site settings pointing at nothing, with no pause between retries.
pub fn test_config() -> SiteConfig
{
    SiteConfig {
        base_url: String::from(BASE_URL),
        retry_attempts: 3,
        retry_delay: Duration::from_secs(0),
        ..SiteConfig::default()
    }
}

/// What the landing page after a login looks like, `key` in every link.
pub fn menu_page(key: &str) -> String
{
    format!(r#"<html><body>
<a href="YSLhome.jsp">Home</a>
<a href="ViewRefAssignments.jsp?YSLkey={key}&leagueId=91">Referee Assignments</a>
<a href="AddRef.jsp?YSLkey={key}&actionName=Referees">Referees</a>
</body></html>"#, key = key)
}

/// An assignments page, one row per `(game id, venue, time, center, ar1, ar2)`.
pub fn assignments_page(rows: &[(&str, &str, &str, &str, &str, &str)]) -> String
{
    let mut html = String::from("<html><body><table>\n");

    for (index, (game_id, venue, time, center, ar1, ar2)) in rows.iter().enumerate()
    {
        let style = if index % 2 == 0 { "trstyle1" } else { "trstyle2" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>U12G House</td><td>U-12</td><td>Girls</td><td>Rec</td>\
             <td>Home</td><td>Away</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            style, game_id, venue, time, center, ar1, ar2));
    }

    html.push_str("</table></body></html>");
    html
}

#[derive(Debug, Clone)]
pub enum Reply
{
    Page(String),
    Fail(&'static str),
}

pub fn page<S>(html: S) -> Reply
    where S: Into<String>
{
    Reply::Page(html.into())
}

/// Answers requests from canned replies.
///
/// A request is matched against the routes in the order they were added, by substring of
/// `"METHOD /path?decoded=query"`. Each route plays its replies in order and keeps repeating
/// the last one.
pub struct ScriptedTransport
{
    routes: RefCell<Vec<(String, VecDeque<Reply>)>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport
{
    pub fn new() -> ScriptedTransport
    {
        ScriptedTransport {
            routes: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Login form on GET, `keys` handed out one per successful POST.
    pub fn with_login(self, keys: &[&str]) -> ScriptedTransport
    {
        let replies = keys.iter()
            .map(|key| page(menu_page(key)))
            .collect();

        self.route("GET /YSLmobile.jsp", vec!(page(LOGIN_PAGE)))
            .route("POST /YSLlogin.jsp", replies)
    }

    pub fn route<S>(self, pattern: S, replies: Vec<Reply>) -> ScriptedTransport
        where S: Into<String>
    {
        self.routes.borrow_mut().push((pattern.into(), replies.into_iter().collect()));
        self
    }

    pub fn requests(&self) -> Vec<String>
    {
        self.requests.borrow().clone()
    }

    pub fn count(&self, pattern: &str) -> usize
    {
        self.requests.borrow()
            .iter()
            .filter(|request| request.contains(pattern))
            .count()
    }

    fn reply(&self, request: String) -> Result<String>
    {
        self.requests.borrow_mut().push(request.clone());

        let mut routes = self.routes.borrow_mut();
        let replies = match routes.iter_mut().find(|(pattern, _)| request.contains(pattern.as_str()))
        {
            None => return Err(ErrorKind::Fetch(format!("no route for {}", request)).into()),
            Some((_, replies)) => replies,
        };

        let reply = if replies.len() > 1
        {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };

        match reply
        {
            Some(Reply::Page(html)) => Ok(html),
            Some(Reply::Fail(cause)) => Err(ErrorKind::Fetch(cause.to_string()).into()),
            None => Err(ErrorKind::Fetch(format!("no replies left for {}", request)).into()),
        }
    }
}

fn describe(method: &str, url: &Url, fields: &[(String, String)]) -> String
{
    let pairs: Vec<String> = url.query_pairs()
        .map(|(name, value)| format!("{}={}", name, value))
        .chain(fields.iter().map(|(name, value)| format!("{}={}", name, value)))
        .collect();

    format!("{} {}?{}", method, url.path(), pairs.join("&"))
}

impl Transport for ScriptedTransport
{
    fn get(&self, url: &Url) -> Result<String>
    {
        self.reply(describe("GET", url, &[]))
    }

    fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Result<String>
    {
        self.reply(describe("POST", url, fields))
    }
}
