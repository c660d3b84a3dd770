use crate::config::{Credentials, SiteConfig};
use crate::errors::*;
use crate::parser::forms;
use crate::retry::RetryPolicy;
use crate::site::query::{self, Query, Request, LOGIN_PAGE, SESSION_KEY_PARAM};
use crate::site::transport::Transport;

use chrono::{DateTime, Utc};

use reqwest::Url;

/// A logged-in site session. The key goes on every data request; the cookies that belong to it
/// live in the client's transport.
#[derive(Debug, Clone)]
pub struct Session
{
    key: String,
    credentials: Credentials,
    opened_at: DateTime<Utc>,
    renewals: u32,
}

impl Session
{
    pub fn key(&self) -> &str
    {
        &self.key
    }

    pub fn opened_at(&self) -> DateTime<Utc>
    {
        self.opened_at
    }

    /// How many times the session had to be re-established since `open`.
    pub fn renewals(&self) -> u32
    {
        self.renewals
    }
}

/// Owns the connection to the assignment site. One client and one `Session` per run; fetches
/// through it are meant to be issued one at a time.
pub struct SessionClient<T>
    where T: Transport
{
    transport: T,
    config: SiteConfig,
    base: Url,
    login_policy: RetryPolicy,
}

impl<T> SessionClient<T>
    where T: Transport
{
    pub fn new(transport: T, config: SiteConfig) -> Result<SessionClient<T>>
    {
        let base = Url::parse(&config.base_url)
            .chain_err(|| ErrorKind::Config(format!("Bad base url: '{}'", config.base_url)))?;
        let login_policy = RetryPolicy::new(config.retry_attempts, config.retry_delay);

        Ok(SessionClient {
            transport,
            config,
            base,
            login_policy,
        })
    }

    pub fn config(&self) -> &SiteConfig
    {
        &self.config
    }

    /// Logs in, retrying any transport or page-layout failure. Running out of attempts is an
    /// `Authentication` error.
    pub fn open(&self, credentials: &Credentials) -> Result<Session>
    {
        let key = self.login(credentials)?;
        info!("Logged in as {}", credentials.username);

        Ok(Session {
            key,
            credentials: credentials.clone(),
            opened_at: Utc::now(),
            renewals: 0,
        })
    }

    /// Throws away the current key and logs in again with the same credentials.
    pub fn renew(&self, session: &mut Session) -> Result<()>
    {
        info!("Renewing session for {}", session.credentials.username);

        session.key = self.login(&session.credentials)?;
        session.opened_at = Utc::now();
        session.renewals = session.renewals + 1;

        Ok(())
    }

    /// One request, no retry. Failures come back as `Fetch` errors.
    pub fn fetch(&self, session: &Session, query: &Query) -> Result<String>
    {
        debug!("Fetching {:?}", query);

        match query.request(&self.base, &self.config, session.key())?
        {
            Request::Get(url) => self.transport.get(&url),
            Request::Form { page, fields } => self.submit_form(&page, &fields),
        }
    }

    fn login(&self, credentials: &Credentials) -> Result<String>
    {
        let attempts = self.login_policy.attempts;

        self.login_policy.run("login", |attempt| {
            trace!("Login attempt {} for {}", attempt, credentials.username);
            self.login_once(credentials)
        })
        .map_err(|error| {
            let reason = format!("gave up after {} attempts: {}", attempts, error);
            Error::with_chain(error, ErrorKind::Authentication(reason))
        })
    }

    fn login_once(&self, credentials: &Credentials) -> Result<String>
    {
        let login_page = query::page_url(&self.base, LOGIN_PAGE)?;

        let fields = vec!(
            (String::from("userName"), credentials.username.clone()),
            (String::from("password"), credentials.password.clone()),
        );

        let (landing, response) = self.submit_form_with_target(&login_page, &fields)?;

        match forms::extract_session_key(&response, &landing, SESSION_KEY_PARAM)
        {
            Some(key) => Ok(key),
            None =>
            {
                let reason = if forms::is_login_page(&response)
                {
                    "the site answered with the login form again"
                } else {
                    "no session key on the page after login"
                };
                bail!(ErrorKind::Authentication(String::from(reason)));
            },
        }
    }

    fn submit_form(&self, page: &Url, fields: &[(String, String)]) -> Result<String>
    {
        self.submit_form_with_target(page, fields)
            .map(|(_, body)| body)
    }

    /// GETs `page`, fills its first form with `fields` and submits it the way the form asks.
    fn submit_form_with_target(&self, page: &Url, fields: &[(String, String)]) -> Result<(Url, String)>
    {
        let html = self.transport.get(page)?;
        let mut form = forms::first_form(&html)
            .chain_err(|| ErrorKind::Fetch(format!("{} has no usable form", page)))?;

        for (name, value) in fields
        {
            form.set(name.as_str(), value.as_str());
        }

        let target = form.target(page)?;
        trace!("Submitting form of {} to {} ({})", page, target, form.method);

        let body = if form.method == "post"
        {
            self.transport.post_form(&target, &form.fields)?
        } else {
            let mut url = target.clone();
            url.query_pairs_mut().extend_pairs(form.fields.iter());
            self.transport.get(&url)?
        };

        Ok((target, body))
    }
}
