use crate::errors::*;

use reqwest::Url;

use select::document::Document;
use select::node::Node;
use select::predicate::{Attr, Name};

/// A `<form>` as a browser would submit it before the user types anything.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlForm
{
    pub action: Option<String>,
    pub method: String,
    pub fields: Vec<(String, String)>,
}

impl HtmlForm
{
    /// Replaces the first field called `name`, or appends it.
    pub fn set<S1, S2>(&mut self, name: S1, value: S2)
        where S1: Into<String>, S2: Into<String>
    {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(key, _)| *key == name)
        {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str>
    {
        self.fields.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Where the form posts to; a form without an action posts back to its own page.
    pub fn target(&self, page: &Url) -> Result<Url>
    {
        match &self.action
        {
            None => Ok(page.clone()),
            Some(action) => page.join(action)
                .chain_err(|| format!("Bad form action: '{}'", action)),
        }
    }
}

pub fn first_form(html: &str) -> Result<HtmlForm>
{
    let document = Document::from(html);

    let form = document.find(Name("form"))
        .next()
        .ok_or("No <form> on the page")?;

    let mut fields = Vec::new();
    let mut submit_taken = false;

    for input in form.find(Name("input"))
    {
        let name = match input.attr("name")
        {
            None => continue,
            Some(name) => name,
        };
        let value = input.attr("value").unwrap_or("");

        match input.attr("type").unwrap_or("text").to_lowercase().as_str()
        {
            "checkbox" | "radio" =>
            {
                if input.attr("checked").is_some()
                {
                    fields.push((name.to_string(), value.to_string()));
                }
            },
            "submit" =>
            {
                if !submit_taken
                {
                    submit_taken = true;
                    fields.push((name.to_string(), value.to_string()));
                }
            },
            "button" | "image" | "reset" | "file" => {},
            _ => fields.push((name.to_string(), value.to_string())),
        }
    }

    for dropdown in form.find(Name("select"))
    {
        if let Some(name) = dropdown.attr("name")
        {
            if let Some(value) = selected_option(&dropdown)
            {
                fields.push((name.to_string(), value));
            }
        }
    }

    Ok(HtmlForm {
        action: form.attr("action").map(String::from),
        method: form.attr("method").unwrap_or("get").to_lowercase(),
        fields,
    })
}

fn selected_option(dropdown: &Node) -> Option<String>
{
    let option = dropdown.find(Name("option"))
        .find(|option| option.attr("selected").is_some())
        .or_else(|| dropdown.find(Name("option")).next())?;

    Some(option.attr("value")
        .map(String::from)
        .unwrap_or_else(|| option.text().trim().to_string()))
}

/// The site answers an expired session with its login form instead of an error status.
pub fn is_login_page(html: &str) -> bool
{
    let document = Document::from(html);
    let found = document.find(Attr("type", "password")).next().is_some()
        || document.find(Attr("name", "password")).next().is_some();
    found
}

/// Finds the first link whose query string carries `param` and returns its value.
pub fn extract_session_key(html: &str, page: &Url, param: &str) -> Option<String>
{
    let document = Document::from(html);

    for anchor in document.find(Name("a"))
    {
        let href = match anchor.attr("href")
        {
            None => continue,
            Some(href) => href,
        };

        let url = match page.join(href)
        {
            Err(_) => continue,
            Ok(url) => url,
        };

        let key = url.query_pairs()
            .find(|(name, value)| name == param && !value.is_empty())
            .map(|(_, value)| value.into_owned());

        if key.is_some()
        {
            trace!("Session key found in link: {}", href);
            return key;
        }
    }

    None
}
