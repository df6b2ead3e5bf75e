//! Integration tests: end-to-end grid building, JSON input/output, properties, and the CLI.

use chrono::{Locale, NaiveDate};

use calgrid::calendar::{build_grids, read_months};
use calgrid::selection::Calendar;
use calgrid::types::{DayRecord, LeadingPolicy, MonthBlock, MonthGrid};
use calgrid::weekday::{monday_index, parse_date};

fn run_of_days(start: &str, count: usize, current: bool) -> Vec<DayRecord> {
    parse_date(start)
        .unwrap()
        .iter_days()
        .take(count)
        .map(|d| DayRecord::new(d.format("%Y-%m-%d").to_string(), current, false))
        .collect()
}

/// January 2022 as a month view shows it: 5 December days, 31 January days
/// (12th is today), 6 February days.
fn january_fixture() -> MonthBlock {
    let mut days = run_of_days("2021-12-27", 5, false);
    days.extend(run_of_days("2022-01-01", 31, true));
    days.extend(run_of_days("2022-02-01", 6, false));
    days[5 + 11].is_today = true;
    MonthBlock {
        name: "January".to_string(),
        days,
    }
}

mod end_to_end {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixture_has_expected_shape() {
        let month = january_fixture();
        assert_eq!(month.days.len(), 42);
        assert_eq!(month.days.iter().filter(|d| d.is_current_month).count(), 31);
    }

    #[test]
    fn offset_and_supplied_leading_are_independent_quantities() {
        let grid = MonthGrid::new(&january_fixture()).unwrap();

        // Both equal 5 in this fixture; they come from different sources.
        assert_eq!(grid.offset, monday_index("2022-01-01").unwrap() as usize);
        assert_eq!(grid.offset, 5);
        assert_eq!(grid.supplied_leading, 5);
    }

    #[test]
    fn reconcile_lays_out_supplied_weeks_as_is() {
        let grid = MonthGrid::build(&january_fixture(), LeadingPolicy::Reconcile).unwrap();

        assert_eq!(grid.leading_filler, 0);
        assert_eq!(grid.trailing_filler, 0);
        assert_eq!(grid.cells.len(), 42);
        assert!(grid.cells.iter().all(|c| !c.is_filler()));

        let anchor = grid.anchor().unwrap();
        assert_eq!(anchor.index, 5);
        assert_eq!(anchor.column, 5);

        assert!(grid.cells[0].corners.top_left);
        assert!(grid.cells[6].corners.top_right);
        assert!(grid.cells[35].corners.bottom_left);
        assert!(grid.cells[41].corners.bottom_right);
    }

    #[test]
    fn verbatim_reproduces_offset_before_all_supplied_days() {
        let grid = MonthGrid::build(&january_fixture(), LeadingPolicy::Verbatim).unwrap();

        assert_eq!(grid.leading_filler, 5);
        // 5 + 42 = 47, padded to 49
        assert_eq!(grid.trailing_filler, 2);
        assert_eq!(grid.cells.len(), 49);
        assert_eq!(grid.cells[5].record().unwrap().date, "2021-12-27");
        assert_eq!(grid.anchor().unwrap().column, 3);
    }

    #[test]
    fn matches_generated_month() {
        let today = NaiveDate::from_ymd_opt(2022, 1, 12).unwrap();
        let generated =
            MonthBlock::for_month_localized(2022, 1, today, true, Locale::en_US).unwrap();
        assert_eq!(generated, january_fixture());
    }

    #[test]
    fn selecting_every_cell_reports_each_date_once() {
        let month = january_fixture();
        let mut selected = Vec::new();
        {
            let mut calendar =
                Calendar::new(std::slice::from_ref(&month), LeadingPolicy::Verbatim, |d: &str| {
                    selected.push(d.to_string())
                })
                .unwrap();
            let fillers = (0..49).filter(|&i| !calendar.press(0, i)).count();
            assert_eq!(fillers, 7);
        }

        let expected: Vec<String> = month.days.into_iter().map(|d| d.date).collect();
        assert_eq!(selected, expected);
    }
}

mod json {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_camel_case_months_with_optional_flags() {
        let input = r#"[
            {
                "name": "January",
                "days": [
                    { "date": "2021-12-31" },
                    { "date": "2022-01-01", "isCurrentMonth": true },
                    { "date": "2022-01-02", "isCurrentMonth": true, "isToday": true }
                ]
            }
        ]"#;
        let months = read_months(input.as_bytes()).unwrap();

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].days[0], DayRecord::adjacent("2021-12-31"));
        assert_eq!(months[0].days[1], DayRecord::current("2022-01-01"));
        assert!(months[0].days[2].is_today);

        let grids = build_grids(&months, LeadingPolicy::Reconcile).unwrap();
        assert_eq!(grids[0].leading_filler, 4);
        assert_eq!(grids[0].cells.len(), 7);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(read_months(r#"[{ "name": "January" }]"#.as_bytes()).is_err());
        assert!(read_months("not json".as_bytes()).is_err());
    }

    #[test]
    fn serializes_grid_for_renderers() {
        let grid = MonthGrid::new(&january_fixture()).unwrap();
        let value = serde_json::to_value(&grid).unwrap();

        assert_eq!(value["name"], "January");
        assert_eq!(value["offset"], 5);
        assert_eq!(value["suppliedLeading"], 5);
        assert_eq!(value["leadingFiller"], 0);
        assert_eq!(value["cells"].as_array().unwrap().len(), 42);

        let cell = &value["cells"][16];
        assert_eq!(cell["kind"]["type"], "day");
        assert_eq!(cell["kind"]["day"], 12);
        assert_eq!(cell["kind"]["record"]["date"], "2022-01-12");
        assert_eq!(cell["kind"]["record"]["isToday"], true);
        assert_eq!(cell["corners"]["topLeft"], false);
    }

    #[test]
    fn serializes_filler_cells() {
        let month = MonthBlock {
            name: "January".to_string(),
            days: run_of_days("2022-01-01", 31, true),
        };
        let value = serde_json::to_value(MonthGrid::new(&month).unwrap()).unwrap();

        assert_eq!(value["cells"][0]["kind"]["type"], "filler");
        assert_eq!(value["trailingFiller"], 6);
    }
}

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn generated(year: i32, month: u32, adjacent: bool) -> MonthBlock {
        let today = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        MonthBlock::for_month_localized(year, month, today, adjacent, Locale::en_US).unwrap()
    }

    proptest! {
        #[test]
        fn cell_count_is_whole_weeks(
            year in 1900i32..2100,
            month in 1u32..=12,
            adjacent in any::<bool>(),
        ) {
            let block = generated(year, month, adjacent);
            for policy in [LeadingPolicy::Reconcile, LeadingPolicy::Verbatim] {
                let grid = MonthGrid::build(&block, policy).unwrap();
                prop_assert_eq!(grid.cells.len() % 7, 0);
                prop_assert!(grid.trailing_filler < 7);
                prop_assert_eq!(grid.day_count(), block.days.len());
            }
        }

        #[test]
        fn first_current_day_sits_in_its_weekday_column(
            year in 1900i32..2100,
            month in 1u32..=12,
            adjacent in any::<bool>(),
        ) {
            let block = generated(year, month, adjacent);
            let grid = MonthGrid::new(&block).unwrap();
            let anchor = grid.anchor().unwrap();
            let date = &anchor.record().unwrap().date;

            prop_assert_eq!(anchor.column, monday_index(date).unwrap() as usize);
            prop_assert_eq!(grid.leading_filler + grid.supplied_leading, grid.offset);
        }

        #[test]
        fn building_is_idempotent(
            year in 1900i32..2100,
            month in 1u32..=12,
            adjacent in any::<bool>(),
        ) {
            let block = generated(year, month, adjacent);
            prop_assert_eq!(MonthGrid::new(&block).unwrap(), MonthGrid::new(&block).unwrap());
        }

        #[test]
        fn supplied_leading_days_accepted_up_to_offset(
            year in 1900i32..2100,
            month in 1u32..=12,
            leading in 0usize..7,
        ) {
            let mut block = generated(year, month, false);
            let first = parse_date(&block.days[0].date).unwrap();
            let start = first - chrono::Days::new(leading as u64);
            let mut days: Vec<DayRecord> = start
                .iter_days()
                .take(leading)
                .map(|d| DayRecord::adjacent(d.format("%Y-%m-%d").to_string()))
                .collect();
            days.append(&mut block.days);
            block.days = days;

            let offset = monday_index_of_first(&block);
            let reconciled = MonthGrid::build(&block, LeadingPolicy::Reconcile);
            prop_assert_eq!(reconciled.is_ok(), leading <= offset);

            let verbatim = MonthGrid::build(&block, LeadingPolicy::Verbatim).unwrap();
            prop_assert_eq!(verbatim.leading_filler, offset);
            prop_assert_eq!(verbatim.cells.len() % 7, 0);
        }
    }

    fn monday_index_of_first(block: &MonthBlock) -> usize {
        let first = block.days.iter().find(|d| d.is_current_month).unwrap();
        monday_index(&first.date).unwrap() as usize
    }
}

mod cli {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn calgrid() -> Command {
        let mut cmd = Command::cargo_bin("calgrid").unwrap();
        cmd.env("CALGRID_TEST_TIME", "2022-01-12")
            .env("LC_ALL", "en_US.UTF-8")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn prints_requested_month() {
        calgrid()
            .args(["--no-color", "1", "2022"])
            .assert()
            .success()
            .stdout(predicate::str::contains("January 2022"))
            .stdout(predicate::str::contains("Mo Tu We Th Fr Sa Su"))
            .stdout(predicate::str::contains("31"));
    }

    #[test]
    fn frames_the_grid() {
        calgrid()
            .args(["--no-color", "-f", "2", "2021"])
            .assert()
            .success()
            .stdout(predicate::str::contains("╭"))
            .stdout(predicate::str::contains("╯"));
    }

    #[test]
    fn select_reports_date() {
        calgrid()
            .args(["--select", "2022-01-12", "1", "2022"])
            .assert()
            .success()
            .stdout("selected 2022-01-12\n");
    }

    #[test]
    fn select_of_missing_date_fails() {
        calgrid()
            .args(["--select", "2022-03-01", "1", "2022"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("calgrid:"));
    }

    #[test]
    fn select_with_json_is_rejected() {
        calgrid()
            .args(["--select", "2022-01-12", "--json", "1", "2022"])
            .assert()
            .failure()
            .stdout("");
    }

    #[test]
    fn huge_month_count_fails() {
        calgrid()
            .args(["-n", "3000000000", "1", "2022"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("calgrid:"));
    }

    #[test]
    fn json_output_holds_cells() {
        let output = calgrid()
            .args(["--json", "-a", "1", "2022"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let grids = value.as_array().unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0]["offset"], 5);
        assert_eq!(grids[0]["cells"].as_array().unwrap().len(), 42);
    }

    #[test]
    fn year_prints_twelve_months() {
        calgrid()
            .args(["--no-color", "-y", "2022"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2022"))
            .stdout(predicate::str::contains("January"))
            .stdout(predicate::str::contains("December"));
    }

    #[test]
    fn reads_months_from_stdin() {
        let input = r#"[{ "name": "Sprint", "days": [
            { "date": "2024-01-01", "isCurrentMonth": true },
            { "date": "2024-01-02", "isCurrentMonth": true }
        ] }]"#;
        calgrid()
            .args(["--no-color", "-i", "-"])
            .write_stdin(input)
            .assert()
            .success()
            .stdout(predicate::str::contains("Sprint"))
            .stdout(predicate::str::contains(" 1  2"));
    }

    #[test]
    fn bad_date_in_input_fails_with_chain() {
        let input = r#"[{ "name": "Broken", "days": [{ "date": "2022-02-30" }] }]"#;
        calgrid()
            .args(["-i", "-"])
            .write_stdin(input)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("cannot build month \"Broken\""))
            .stderr(predicate::str::contains("invalid date \"2022-02-30\""));
    }

    #[test]
    fn missing_input_file_fails() {
        calgrid()
            .args(["-i", "/nonexistent/months.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot open"));
    }

    #[test]
    fn conflicting_modes_fail() {
        calgrid()
            .args(["-y", "-n", "2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("mutually exclusive"));
    }
}
