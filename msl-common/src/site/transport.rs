use crate::config::SiteConfig;
use crate::errors::*;

use reqwest::Url;
use reqwest::blocking::{Client, Response};

/// Raw page access. Implementations keep cookies between calls, that is what ties the requests
/// of one run to one site session.
pub trait Transport
{
    fn get(&self, url: &Url) -> Result<String>;

    fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Result<String>;
}

/// reqwest-backed transport with a cookie jar, one per run.
pub struct HttpTransport
{
    client: Client,
}

impl HttpTransport
{
    pub fn new(config: &SiteConfig) -> Result<HttpTransport>
    {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(HttpTransport {
            client,
        })
    }

    fn read_body(method: &str, url: &Url, response: ::std::result::Result<Response, ::reqwest::Error>) -> Result<String>
    {
        let response = response
            .map_err(|error| ErrorKind::Fetch(format!("{} {}: {}", method, url, error)))?;

        if !response.status().is_success()
        {
            bail!(ErrorKind::Fetch(format!("{} {}: bad status {}", method, url, response.status())));
        }

        let body = response.text()
            .map_err(|error| ErrorKind::Fetch(format!("{} {}: unreadable body: {}", method, url, error)))?;

        trace!("{} {} returned {} bytes", method, url, body.len());
        Ok(body)
    }
}

impl Transport for HttpTransport
{
    fn get(&self, url: &Url) -> Result<String>
    {
        HttpTransport::read_body("GET", url, self.client.get(url.clone()).send())
    }

    fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Result<String>
    {
        HttpTransport::read_body("POST", url, self.client.post(url.clone()).form(fields).send())
    }
}

impl<'a, T> Transport for &'a T
    where T: Transport
{
    fn get(&self, url: &Url) -> Result<String>
    {
        (**self).get(url)
    }

    fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Result<String>
    {
        (**self).post_form(url, fields)
    }
}
