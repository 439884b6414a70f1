//! Date solution operations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use serde_json::Value;

use crate::core::operation::{ArgumentSchema, OperationDescriptor, ParamSpec, ParamType};
use crate::ops::types::{decode_args, ArgumentMapping, Operation, OperationError};

/// Counts how often a weekday occurs in an inclusive date range.
pub struct CountWeekdayOp;

#[derive(Debug, Deserialize)]
struct CountWeekdayArgs {
    start_date: String,
    end_date: String,
    weekday: String,
}

impl Operation for CountWeekdayOp {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "count_weekday_occurrences".into(),
            description: "Count how many times a given weekday occurs between two dates, inclusive of both endpoints.".into(),
            schema: ArgumentSchema::new(vec![
                ParamSpec::required("start_date", ParamType::String, "Range start in YYYY-MM-DD format"),
                ParamSpec::required("end_date", ParamType::String, "Range end in YYYY-MM-DD format"),
                ParamSpec::required("weekday", ParamType::String, "Weekday name, e.g. Wednesday"),
            ]),
        }
    }

    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError> {
        let args: CountWeekdayArgs = decode_args(args)?;
        let start = parse_date(&args.start_date)?;
        let end = parse_date(&args.end_date)?;
        if end < start {
            return Err(OperationError::Execution(format!(
                "end date {} precedes start date {}",
                args.end_date, args.start_date
            )));
        }
        let weekday: Weekday = args
            .weekday
            .trim()
            .parse()
            .map_err(|_| OperationError::Execution(format!("unknown weekday: {}", args.weekday)))?;

        // Days from the range start until the first occurrence of the target
        // weekday, then one hit per full week after that.
        let offset = (weekday.num_days_from_monday() + 7 - start.weekday().num_days_from_monday()) % 7;
        let span = (end - start).num_days();
        let count = if i64::from(offset) > span {
            0
        } else {
            (span - i64::from(offset)) / 7 + 1
        };
        Ok(Value::from(count))
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, OperationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| OperationError::Execution(format!("invalid date '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: &str, end: &str, weekday: &str) -> Result<Value, OperationError> {
        let mut map = ArgumentMapping::new();
        map.insert("start_date".into(), Value::String(start.into()));
        map.insert("end_date".into(), Value::String(end.into()));
        map.insert("weekday".into(), Value::String(weekday.into()));
        CountWeekdayOp.invoke(&map)
    }

    #[test]
    fn test_single_week_contains_each_weekday_once() {
        // 2024-01-01 is a Monday.
        for day in ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"] {
            assert_eq!(run("2024-01-01", "2024-01-07", day).unwrap(), Value::from(1));
        }
    }

    #[test]
    fn test_wednesdays_in_january_2024() {
        // Jan 2024 Wednesdays: 3, 10, 17, 24, 31.
        assert_eq!(run("2024-01-01", "2024-01-31", "Wednesday").unwrap(), Value::from(5));
    }

    #[test]
    fn test_endpoints_inclusive() {
        assert_eq!(run("2024-01-03", "2024-01-03", "Wednesday").unwrap(), Value::from(1));
    }

    #[test]
    fn test_reversed_range_fails() {
        let err = run("2024-02-01", "2024-01-01", "Monday").unwrap_err();
        assert!(matches!(err, OperationError::Execution(_)));
    }

    #[test]
    fn test_unknown_weekday_fails() {
        let err = run("2024-01-01", "2024-01-31", "Caturday").unwrap_err();
        assert!(matches!(err, OperationError::Execution(_)));
    }
}
