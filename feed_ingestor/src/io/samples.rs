//! Parser for the tested-samples feed: only the most recent `amostras` value
//! is used.

use crate::{
    errors::{IngestError, IngestResult},
    io::cases::build_header_map,
};

const COL_SAMPLES: &str = "amostras";

/// Last non-blank `amostras` value, or `None` if the column is empty.
pub fn parse_samples_feed(text: &str) -> IngestResult<Option<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header_map = build_header_map(reader.headers()?);
    let col = *header_map
        .get(COL_SAMPLES)
        .ok_or_else(|| IngestError::MissingColumn(COL_SAMPLES.to_string()))?;

    let mut latest = None;
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let raw = record.get(col).unwrap_or("").trim();
        if raw.is_empty() {
            continue;
        }
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| IngestError::Value {
                line: idx + 2,
                column: COL_SAMPLES.to_string(),
                value: raw.to_string(),
            })?;
        latest = Some(value);
    }
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_last_non_blank() {
        let text = "data,amostras,novas\n01-03-2020,100,1\n02-03-2020,250,2\n03-03-2020,,3\n";
        assert_eq!(parse_samples_feed(text).unwrap(), Some(250.0));
    }

    #[test]
    fn empty_and_missing() {
        assert_eq!(parse_samples_feed("data,amostras\n").unwrap(), None);
        assert!(matches!(
            parse_samples_feed("data,other\n01-03-2020,1\n"),
            Err(IngestError::MissingColumn(_))
        ));
    }

    #[test]
    fn rejects_non_finite_counts() {
        for bad in ["NaN", "inf", "-inf"] {
            let text = format!("data,amostras\n01-03-2020,10\n02-03-2020,{bad}\n");
            assert!(matches!(
                parse_samples_feed(&text),
                Err(IngestError::Value { line: 3, ref value, .. }) if value == bad
            ));
        }
    }
}
