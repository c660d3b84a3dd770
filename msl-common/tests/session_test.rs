extern crate msl_common;
extern crate reqwest;
extern crate chrono;

mod common;

use common::{page, test_config, Reply, ScriptedTransport, BASE_URL, LOGIN_PAGE};

use msl_common::config::{Credentials, SiteConfig};
use msl_common::errors::*;
use msl_common::retry::RetryPolicy;
use msl_common::site::{DateMode, Query, Request, SessionClient};

use chrono::NaiveDate;

use reqwest::Url;

use std::cell::Cell;
use std::time::Duration;

fn credentials() -> Credentials
{
    Credentials::new(String::from("kcurby"), String::from("hunter2"))
}

fn is_authentication(error: &Error) -> bool
{
    match error.kind()
    {
        ErrorKind::Authentication(_) => true,
        _ => false,
    }
}

#[test]
fn test_open_session_reads_key_from_landing_page()
{
    let transport = ScriptedTransport::new()
        .with_login(&["abc123"]);
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let session = client.open(&credentials()).unwrap();

    assert_eq!(session.key(), "abc123");
    assert_eq!(session.renewals(), 0);
}

#[test]
fn test_login_submits_form_with_credentials()
{
    let transport = ScriptedTransport::new()
        .with_login(&["abc123"]);
    let client = SessionClient::new(&transport, test_config()).unwrap();

    client.open(&credentials()).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /YSLmobile.jsp"));

    let post = &requests[1];
    assert!(post.starts_with("POST /YSLlogin.jsp"));
    assert!(post.contains("leagueId=91"));
    assert!(post.contains("userName=kcurby"));
    assert!(post.contains("password=hunter2"));
    assert!(post.contains("submit=Login"));
    assert!(!post.contains("remember"));
    assert!(!post.contains("cancel"));
}

#[test]
fn test_login_succeeds_after_two_failures()
{
    let transport = ScriptedTransport::new()
        .route("GET /YSLmobile.jsp", vec!(page(LOGIN_PAGE)))
        .route("POST /YSLlogin.jsp", vec!(
            Reply::Fail("connection reset"),
            Reply::Fail("connection reset"),
            page(common::menu_page("third-time")),
        ));
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let session = client.open(&credentials()).unwrap();

    assert_eq!(session.key(), "third-time");
    assert_eq!(transport.count("POST /YSLlogin.jsp"), 3);
}

#[test]
fn test_login_gives_up_after_three_failures()
{
    let transport = ScriptedTransport::new()
        .route("GET /YSLmobile.jsp", vec!(page(LOGIN_PAGE)))
        .route("POST /YSLlogin.jsp", vec!(Reply::Fail("connection reset")));
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let error = client.open(&credentials()).unwrap_err();

    assert!(is_authentication(&error), "unexpected error: {}", error);
    assert_eq!(transport.count("POST /YSLlogin.jsp"), 3);
}

#[test]
fn test_rejected_credentials_are_an_authentication_error()
{
    let transport = ScriptedTransport::new()
        .route("GET /YSLmobile.jsp", vec!(page(LOGIN_PAGE)))
        .route("POST /YSLlogin.jsp", vec!(page(LOGIN_PAGE)));
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let error = client.open(&credentials()).unwrap_err();

    assert!(is_authentication(&error));
}

#[test]
fn test_renew_replaces_key()
{
    let transport = ScriptedTransport::new()
        .with_login(&["first", "second"]);
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let mut session = client.open(&credentials()).unwrap();
    client.renew(&mut session).unwrap();

    assert_eq!(session.key(), "second");
    assert_eq!(session.renewals(), 1);
}

#[test]
fn test_fetch_puts_session_key_on_request()
{
    let transport = ScriptedTransport::new()
        .with_login(&["abc123"])
        .route("GET /ViewRefAssignments.jsp", vec!(page("<html></html>")));
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let session = client.open(&credentials()).unwrap();
    let date = NaiveDate::from_ymd_opt(2022, 9, 24).unwrap();
    client.fetch(&session, &Query::Assignments { date, mode: DateMode::FutureDates }).unwrap();

    let requests = transport.requests();
    let fetch = requests.last().unwrap();
    assert!(fetch.contains("YSLkey=abc123"));
    assert!(fetch.contains("date=9/24/2022"));
    assert!(fetch.contains("dateMode=futureDates"));
}

#[test]
fn test_fetch_failure_is_not_retried()
{
    let transport = ScriptedTransport::new()
        .with_login(&["abc123"])
        .route("GET /AddRef.jsp", vec!(Reply::Fail("timed out")));
    let client = SessionClient::new(&transport, test_config()).unwrap();

    let session = client.open(&credentials()).unwrap();
    let error = client.fetch(&session, &Query::RefereeRoster).unwrap_err();

    match error.kind()
    {
        ErrorKind::Fetch(cause) => assert_eq!(cause, "timed out"),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(transport.count("GET /AddRef.jsp"), 1);
}

#[test]
fn test_bad_base_url_is_a_config_error()
{
    let config = SiteConfig {
        base_url: String::from("not a url"),
        ..test_config()
    };

    let error = SessionClient::new(ScriptedTransport::new(), config).err().unwrap();

    match error.kind()
    {
        ErrorKind::Config(_) => {},
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_assignment_request_url()
{
    let base = Url::parse(BASE_URL).unwrap();
    let query = Query::Assignments { date: NaiveDate::from_ymd_opt(2022, 10, 1).unwrap(), mode: DateMode::AllDates };

    let url = match query.request(&base, &test_config(), "abc123").unwrap()
    {
        Request::Get(url) => url,
        other => panic!("unexpected request: {:?}", other),
    };

    assert_eq!(url.path(), "/ViewRefAssignments.jsp");

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&(String::from("YSLkey"), String::from("abc123"))));
    assert!(pairs.contains(&(String::from("date"), String::from("10/1/2022"))));
    assert!(pairs.contains(&(String::from("dateMode"), String::from("allDates"))));
    assert!(pairs.contains(&(String::from("leagueId"), String::from("91"))));
}

#[test]
fn test_credentials_debug_hides_password()
{
    let shown = format!("{:?}", credentials());

    assert!(shown.contains("kcurby"));
    assert!(!shown.contains("hunter2"));
}

#[test]
fn test_retry_policy_counts_attempts()
{
    let policy = RetryPolicy::new(3, Duration::from_secs(0));
    let calls = Cell::new(0);

    let value = policy.run("flaky", |attempt| {
        calls.set(calls.get() + 1);
        if attempt < 3
        {
            Err(ErrorKind::Fetch(String::from("not yet")).into())
        } else {
            Ok(attempt)
        }
    }).unwrap();

    assert_eq!(value, 3);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_retry_policy_stops_on_fatal_error()
{
    let policy = RetryPolicy::new(3, Duration::from_secs(0));
    let calls = Cell::new(0);

    let result: Result<()> = policy.run_unless("login", is_authentication, |_| {
        calls.set(calls.get() + 1);
        Err(ErrorKind::Authentication(String::from("bad password")).into())
    });

    assert!(is_authentication(&result.unwrap_err()));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_retry_policy_fatal_error_is_returned_at_once()
{
    let policy = RetryPolicy::new(3, Duration::from_secs(0));
    let calls = Cell::new(0);

    let result: Result<u32> = policy.run_unless("fetch", is_authentication, |attempt| {
        calls.set(calls.get() + 1);
        if attempt == 1
        {
            Err(ErrorKind::Fetch(String::from("timed out")).into())
        } else {
            Err(ErrorKind::Authentication(String::from("renewal refused")).into())
        }
    });

    match result.unwrap_err().kind()
    {
        ErrorKind::Authentication(reason) => assert_eq!(reason, "renewal refused"),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_retry_policy_returns_last_error()
{
    let policy = RetryPolicy::new(2, Duration::from_secs(0));

    let result: Result<()> = policy.run("flaky", |attempt| {
        Err(ErrorKind::Fetch(format!("attempt {}", attempt)).into())
    });

    match result.unwrap_err().kind()
    {
        ErrorKind::Fetch(cause) => assert_eq!(cause, "attempt 2"),
        other => panic!("unexpected error: {}", other),
    }
}
