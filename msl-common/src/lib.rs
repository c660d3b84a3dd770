// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate derive_new;

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

extern crate chrono;
extern crate regex;
extern crate reqwest;
extern crate select;
extern crate serde;
extern crate serde_json;

pub mod config;
pub mod diagnostics;
pub mod names;
pub mod parser;
pub mod retry;
pub mod schedule;
pub mod site;
pub mod store;
pub mod workload;

/*
    Common error_chain for all of lib to use so the ? operator passes things around real well.

    Add `use crate::errors::*;` to the sub-modules to gain access to it.

    The domain kinds mirror how a run degrades: Authentication stops everything, Fetch and Parse
    are contained per date / per row, NameAmbiguity only drops one slot.
*/
pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain!{
        foreign_links {
            Io(::std::io::Error);
            Json(::serde_json::Error);
            ParseInt(::std::num::ParseIntError);
            ParseDate(::chrono::ParseError);
            Reqwest(::reqwest::Error);
        }

        errors {
            Authentication(reason: String) {
                description("login to the assignment site failed")
                display("Authentication failed: {}", reason)
            }
            Fetch(cause: String) {
                description("page fetch failed")
                display("Fetch failed: {}", cause)
            }
            SessionExpired {
                description("site answered with the login form")
                display("Session expired, the site answered with the login form")
            }
            Parse(row: usize, reason: String) {
                description("row could not be parsed")
                display("Parse error in row {}: {}", row, reason)
            }
            NameAmbiguity(raw: String) {
                description("referee name could not be normalized")
                display("Ambiguous referee name: '{}'", raw)
            }
            Config(reason: String) {
                description("bad configuration")
                display("Configuration error: {}", reason)
            }
            Store(reason: String) {
                description("referee store failure")
                display("Store error: {}", reason)
            }
        }
    }
}
