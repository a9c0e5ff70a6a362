//! Parser for the national daily case feed.
//!
//! Expected header (extra columns are ignored):
//! `data,confirmados,recuperados,obitos,suspeitos,lab,...`
//!
//! - `data` is a `DD-MM-YYYY` date (ISO dates are accepted too)
//! - the first [`CaseFeedOptions::skip_rows`] data rows are dropped; the feed's
//!   earliest rows predate consistent reporting
//! - blank numeric cells read as 0
//! - missing calendar days are forward-filled from the previous day so every
//!   metric is a contiguous daily series; a gap longer than
//!   [`CaseFeedOptions::max_fill_days`] is an error
//!
//! Two columns are derived from the raw ones:
//! - `Non-Confirmed Cases = suspeitos - confirmados - lab`
//! - `Active Cases = confirmados - obitos - recuperados`

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use csv::StringRecord;
use tracing::{debug, warn};
use trend_engine::{
    labels::{ACTIVE_CASES, CONFIRMED_CASES, NON_CONFIRMED_CASES, RECOVERED_CASES, REPORTED_DEATHS, SUSPECT_CASES},
    models::{series::Series, table::MetricTable},
};

use crate::errors::{IngestError, IngestResult};

const COL_DATE: &str = "data";
const COL_CONFIRMED: &str = "confirmados";
const COL_RECOVERED: &str = "recuperados";
const COL_DEATHS: &str = "obitos";
const COL_SUSPECT: &str = "suspeitos";
const COL_LAB: &str = "lab";

const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Knobs for [`parse_case_feed_with`].
#[derive(Debug, Clone)]
pub struct CaseFeedOptions {
    /// Leading data rows to discard.
    pub skip_rows: usize,
    /// Longest run of missing days that is forward-filled.
    pub max_fill_days: usize,
}

impl Default for CaseFeedOptions {
    fn default() -> Self {
        Self {
            skip_rows: 4,
            max_fill_days: 31,
        }
    }
}

/// One parsed day of the feed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CaseRow {
    confirmed: f64,
    recovered: f64,
    deaths: f64,
    suspect: f64,
    lab: f64,
}

/// Parse the feed with default options.
pub fn parse_case_feed(text: &str) -> IngestResult<MetricTable> {
    parse_case_feed_with(text, &CaseFeedOptions::default())
}

/// Parse the feed into a [`MetricTable`] keyed by the labels in
/// [`trend_engine::labels`].
pub fn parse_case_feed_with(text: &str, opts: &CaseFeedOptions) -> IngestResult<MetricTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    for col in [COL_DATE, COL_CONFIRMED, COL_RECOVERED, COL_DEATHS, COL_SUSPECT, COL_LAB] {
        if !header_map.contains_key(col) {
            return Err(IngestError::MissingColumn(col.to_string()));
        }
    }

    let mut rows: BTreeMap<NaiveDate, CaseRow> = BTreeMap::new();
    for (idx, result) in reader.records().enumerate().skip(opts.skip_rows) {
        // records() starts after the header, and CSV lines are 1-based
        let line = idx + 2;
        let record = result?;

        let raw_date = cell(&record, &header_map, COL_DATE);
        let date = parse_date(raw_date).ok_or_else(|| IngestError::Date {
            line,
            value: raw_date.to_string(),
        })?;

        let row = CaseRow {
            confirmed: number(&record, &header_map, COL_CONFIRMED, line)?,
            recovered: number(&record, &header_map, COL_RECOVERED, line)?,
            deaths: number(&record, &header_map, COL_DEATHS, line)?,
            suspect: number(&record, &header_map, COL_SUSPECT, line)?,
            lab: number(&record, &header_map, COL_LAB, line)?,
        };
        if rows.insert(date, row).is_some() {
            warn!(%date, line, "duplicate date in case feed, keeping the later row");
        }
    }

    let days = fill_missing_days(rows, opts.max_fill_days)?;
    let start = days[0].0;
    debug!(%start, days = days.len(), "parsed case feed");

    let column = |f: fn(&CaseRow) -> f64| -> IngestResult<Series> {
        Ok(Series::from_values(start, days.iter().map(|(_, r)| f(r)))?)
    };

    let table = MetricTable::new()
        .with(CONFIRMED_CASES, column(|r| r.confirmed)?)?
        .with(RECOVERED_CASES, column(|r| r.recovered)?)?
        .with(REPORTED_DEATHS, column(|r| r.deaths)?)?
        .with(SUSPECT_CASES, column(|r| r.suspect)?)?
        .with(NON_CONFIRMED_CASES, column(|r| r.suspect - r.confirmed - r.lab)?)?
        .with(ACTIVE_CASES, column(|r| r.confirmed - r.deaths - r.recovered)?)?;
    Ok(table)
}

fn fill_missing_days(
    rows: BTreeMap<NaiveDate, CaseRow>,
    max_fill_days: usize,
) -> IngestResult<Vec<(NaiveDate, CaseRow)>> {
    let mut out: Vec<(NaiveDate, CaseRow)> = Vec::with_capacity(rows.len());
    let mut filled = 0usize;
    for (date, row) in rows {
        if let Some(&(last_date, last_row)) = out.last() {
            let missing = (date - last_date).num_days() - 1;
            if missing > max_fill_days as i64 {
                return Err(IngestError::GapTooLong {
                    previous: last_date,
                    current: date,
                    missing,
                    limit: max_fill_days,
                });
            }
            let mut next = last_date + Duration::days(1);
            while next < date {
                out.push((next, last_row));
                filled += 1;
                next += Duration::days(1);
            }
        }
        out.push((date, row));
    }
    if out.is_empty() {
        return Err(IngestError::Empty);
    }
    if filled > 0 {
        warn!(filled, "forward-filled missing days in case feed");
    }
    Ok(out)
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

fn cell<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> &'a str {
    header_map
        .get(name)
        .and_then(|i| record.get(*i))
        .map(str::trim)
        .unwrap_or("")
}

fn number(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str, line: usize) -> IngestResult<f64> {
    let raw = cell(record, header_map, name);
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IngestError::Value {
            line,
            column: name.to_string(),
            value: raw.to_string(),
        })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "data,confirmados,recuperados,obitos,suspeitos,lab,extra\n";

    fn feed(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    fn no_skip() -> CaseFeedOptions {
        CaseFeedOptions {
            skip_rows: 0,
            ..Default::default()
        }
    }

    #[test]
    fn derives_columns() {
        let text = feed(&["03-03-2020,10,1,2,50,5,x", "04-03-2020,12,2,3,60,6,y"]);
        let table = parse_case_feed_with(&text, &no_skip()).unwrap();

        assert_eq!(table.labels().count(), 6);
        let non_confirmed: Vec<f64> = table.get(NON_CONFIRMED_CASES).unwrap().values().collect();
        assert_eq!(non_confirmed, vec![35.0, 42.0]);
        let active: Vec<f64> = table.get(ACTIVE_CASES).unwrap().values().collect();
        assert_eq!(active, vec![7.0, 7.0]);
        assert_eq!(
            table.get(CONFIRMED_CASES).unwrap().first_date(),
            NaiveDate::from_ymd_opt(2020, 3, 3).unwrap()
        );
    }

    #[test]
    fn skips_leading_rows_by_default() {
        let rows: Vec<String> = (1..=6).map(|d| format!("0{d}-03-2020,{d},0,0,0,0,")).collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let table = parse_case_feed(&feed(&refs)).unwrap();

        let confirmed = table.get(CONFIRMED_CASES).unwrap();
        assert_eq!(confirmed.values().collect::<Vec<_>>(), vec![5.0, 6.0]);
    }

    #[test]
    fn blanks_are_zero_and_gaps_forward_fill() {
        let text = feed(&["01-03-2020,1,,,,,", "04-03-2020,4,1,0,9,2,"]);
        let table = parse_case_feed_with(&text, &no_skip()).unwrap();

        let confirmed: Vec<f64> = table.get(CONFIRMED_CASES).unwrap().values().collect();
        assert_eq!(confirmed, vec![1.0, 1.0, 1.0, 4.0]);
        assert_eq!(table.days(), 4);
    }

    #[test]
    fn mistyped_year_is_not_filled() {
        let text = feed(&["28-02-2020,1,0,0,0,0,", "01-03-2202,2,0,0,0,0,"]);
        let err = parse_case_feed_with(&text, &no_skip()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::GapTooLong { previous, limit: 31, .. }
                if previous == NaiveDate::from_ymd_opt(2020, 2, 28).unwrap()
        ));

        // a gap at the limit is still filled
        let text = feed(&["01-03-2020,1,0,0,0,0,", "02-04-2020,2,0,0,0,0,"]);
        let table = parse_case_feed_with(&text, &no_skip()).unwrap();
        assert_eq!(table.days(), 33);
    }

    #[test]
    fn out_of_order_rows_are_sorted() {
        let text = feed(&["2020-03-02,2,0,0,0,0,", "2020-03-01,1,0,0,0,0,"]);
        let table = parse_case_feed_with(&text, &no_skip()).unwrap();
        let confirmed: Vec<f64> = table.get(CONFIRMED_CASES).unwrap().values().collect();
        assert_eq!(confirmed, vec![1.0, 2.0]);
    }

    #[test]
    fn reports_bad_cells() {
        let err = parse_case_feed_with(&feed(&["31-02-2020,1,0,0,0,0,"]), &no_skip()).unwrap_err();
        assert!(matches!(err, IngestError::Date { line: 2, .. }));

        let err = parse_case_feed_with(&feed(&["01-03-2020,many,0,0,0,0,"]), &no_skip()).unwrap_err();
        assert!(matches!(err, IngestError::Value { ref column, .. } if column == COL_CONFIRMED));

        let err = parse_case_feed_with("data,confirmados\n01-03-2020,1\n", &no_skip()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(ref c) if c == COL_RECOVERED));

        assert!(matches!(
            parse_case_feed(&feed(&["01-03-2020,1,0,0,0,0,"])),
            Err(IngestError::Empty)
        ));
    }
}
