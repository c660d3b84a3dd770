extern crate msl_common;
extern crate chrono;
extern crate serde_json;

use msl_common::diagnostics::{RunLog, Warning};
use msl_common::names::{NameNormalizer, RefereeIdentity};
use msl_common::parser;
use msl_common::schedule::{GameRecord, Position, RawName, Schedule};
use msl_common::workload::{unknown_referees, ArMentoringPolicy, MentoredPositions, Roster, SeasonMetrics, WorkloadCorrelator};

use chrono::NaiveDate;

use std::collections::HashSet;

fn saturday() -> NaiveDate
{
    NaiveDate::from_ymd_opt(2022, 9, 24).unwrap()
}

fn slot(raw: &str) -> RawName
{
    RawName::from_site(raw)
}

fn game(game_id: &str, venue: &str, center: &str, ar1: &str, ar2: &str) -> GameRecord
{
    GameRecord::new(
        String::from(game_id),
        String::from(venue),
        saturday(),
        String::from("8:00 AM"),
        String::from("U-12"),
        String::from("U12G House"),
        slot(center),
        slot(ar1),
        slot(ar2),
    )
}

fn referees(names: &[(&str, &str)]) -> HashSet<RefereeIdentity>
{
    names.iter()
        .map(|(first, last)| RefereeIdentity::new(first, last))
        .collect()
}

fn kate() -> RefereeIdentity
{
    RefereeIdentity::new("kate", "curby")
}

fn schedule(games: Vec<GameRecord>) -> Schedule
{
    let mut schedule = Schedule::new();
    schedule.merge(games);
    schedule
}

#[test]
fn test_new_referee_at_risk_and_not_yet_mentored()
{
    let schedule = schedule(vec!(game("1", "Oakton HS 3", "Curby, Kate", "Not Used", "Not Used")));
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby")]),
        &MentoredPositions::new(),
        &referees(&[("kate", "curby")]),
        &mut log,
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].slots.len(), 1);

    let center = entries[0].slot(Position::Center).unwrap();
    assert_eq!(center.referee, kate());
    assert!(!center.already_mentored);
    assert!(center.needs_follow_up);
    assert!(log.is_empty());
}

#[test]
fn test_games_without_new_referees_are_left_out()
{
    let schedule = schedule(vec!(
        game("1", "Oakton HS 3", "Tom Jones", "", ""),
        game("2", "Ken Lawrence #2", "Tom Jones", "Kate Curby", "(requested)"),
        game("3", "Ken Lawrence #2", "", "", ""),
    ));
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby")]),
        &MentoredPositions::new(),
        &HashSet::new(),
        &mut log,
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].game.game_id, "2");
    assert_eq!(entries[0].slots[0].position, Position::Ar1);
    assert!(!entries[0].slots[0].needs_follow_up);
}

#[test]
fn test_entries_follow_schedule_order()
{
    let schedule = schedule(vec!(
        game("7", "Oakton HS 3", "Kate Curby", "", ""),
        game("5", "Ken Lawrence #2", "", "Kate Curby", ""),
        game("6", "Ken Lawrence #2", "", "", "Curby, Kate"),
    ));
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby")]),
        &MentoredPositions::new(),
        &HashSet::new(),
        &mut log,
    );

    let ids: Vec<&str> = entries.iter().map(|entry| entry.game.game_id.as_str()).collect();
    assert_eq!(ids, vec!("5", "6", "7"));
}

#[test]
fn test_assistant_positions_are_interchangeable_by_default()
{
    let schedule = schedule(vec!(game("1", "Oakton HS 3", "Kate Curby", "Tom Jones", "Kate Curby")));
    let mut mentored = MentoredPositions::new();
    mentored.insert(kate(), vec!(Position::Ar1).into_iter().collect());
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby")]),
        &mentored,
        &HashSet::new(),
        &mut log,
    );

    let entry = &entries[0];
    assert!(!entry.slot(Position::Center).unwrap().already_mentored);
    assert!(entry.slot(Position::Ar2).unwrap().already_mentored);
    assert!(entry.slot(Position::Ar1).is_none());
}

#[test]
fn test_strict_policy_needs_the_exact_position()
{
    let correlator = WorkloadCorrelator::new(NameNormalizer::default(), ArMentoringPolicy::Strict);
    let mut mentored = MentoredPositions::new();
    mentored.insert(kate(), vec!(Position::Ar1, Position::Center).into_iter().collect());

    assert!(correlator.already_mentored(&mentored, &kate(), Position::Ar1));
    assert!(correlator.already_mentored(&mentored, &kate(), Position::Center));
    assert!(!correlator.already_mentored(&mentored, &kate(), Position::Ar2));
    assert!(!correlator.already_mentored(&mentored, &RefereeIdentity::new("tom", "jones"), Position::Center));
}

#[test]
fn test_ambiguous_name_drops_only_that_slot()
{
    let schedule = schedule(vec!(game("1", "Oakton HS 3", "Michael Aguilera Smith", "Kate Curby", "")));
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby"), ("michael", "aguilera smith")]),
        &MentoredPositions::new(),
        &HashSet::new(),
        &mut log,
    );

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].slots.len(), 1);
    assert_eq!(entries[0].slots[0].position, Position::Ar1);

    assert_eq!(log.len(), 1);
    match &log.warnings()[0]
    {
        Warning::NameAmbiguity { raw, context } =>
        {
            assert_eq!(raw, "Michael Aguilera Smith");
            assert!(context.contains("Oakton HS 3"));
        },
        other => panic!("unexpected warning: {:?}", other),
    }
}

#[test]
fn test_workload_entry_json()
{
    let schedule = schedule(vec!(game("1", "Oakton HS 3", "Curby, Kate", "", "")));
    let mut log = RunLog::new();

    let entries = WorkloadCorrelator::default().correlate(
        &schedule,
        &referees(&[("kate", "curby")]),
        &MentoredPositions::new(),
        &HashSet::new(),
        &mut log,
    );

    let json = serde_json::to_value(&entries).unwrap();
    assert_eq!(json[0]["slots"][0]["position"], "Center");
    assert_eq!(json[0]["slots"][0]["referee"]["last"], "curby");
    assert_eq!(json[0]["game"]["date"], "2022-09-24");
}

#[test]
fn test_ar_policy_from_str()
{
    assert_eq!("strict".parse::<ArMentoringPolicy>().unwrap(), ArMentoringPolicy::Strict);
    assert_eq!("Interchangeable".parse::<ArMentoringPolicy>().unwrap(), ArMentoringPolicy::Interchangeable);
    assert!("sometimes".parse::<ArMentoringPolicy>().is_err());
}

#[test]
fn test_season_metrics()
{
    let page = parser::parse_game_reports(include_str!("../resources/game_reports.html")).unwrap();

    let metrics = SeasonMetrics::from_reports(&page.games);

    assert_eq!(metrics, SeasonMetrics {
        games_played: 3,
        total_ref_assignments: 7,
        refs_assigned: 6,
        refs_missing: 1,
        missing_centers: 0,
        missing_ars: 1,
    });
}

#[test]
fn test_season_metrics_missing_center_on_small_sided_game()
{
    let page = parser::parse_game_reports(include_str!("../resources/game_reports.html")).unwrap();
    let mut u9 = page.games[1].clone();
    u9.center = RawName::Unassigned;

    let metrics = SeasonMetrics::from_reports(&[u9]);

    assert_eq!(metrics.total_ref_assignments, 1);
    assert_eq!(metrics.refs_missing, 1);
    assert_eq!(metrics.missing_centers, 1);
    assert_eq!(metrics.missing_ars, 0);
}

#[test]
fn test_roster_and_unknown_referees()
{
    let page = parser::parse_roster(include_str!("../resources/roster.html")).unwrap();
    let mut log = RunLog::new();

    let roster = Roster::from_rows(&page.referees, &NameNormalizer::default(), &mut log);

    assert_eq!(roster.len(), 2);
    assert!(roster.contains(&kate()));
    assert_eq!(roster.email(&RefereeIdentity::new("michael", "aguilera jr")), Some("maguilera@example.com"));

    let new_referees = referees(&[("kate", "curby"), ("tom", "jones"), ("mary kate", "smith")]);
    assert_eq!(unknown_referees(&new_referees, &roster), vec!(
        RefereeIdentity::new("mary kate", "smith"),
        RefereeIdentity::new("tom", "jones"),
    ));
}
