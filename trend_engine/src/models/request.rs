use serde::{Deserialize, Serialize};

use crate::models::{cadence::Cadence, window::Window};

/// Which view of a metric is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// New values over each cadence period.
    #[default]
    Delta,
    /// Deltas divided by the number of days in the period.
    PerDayAverage,
    /// Raw cumulative levels.
    Cumulative,
    /// Deltas paired with the same day's total.
    Trajectory,
}

/// Everything needed to produce one derived series. No hidden state: two
/// equal requests against the same table give equal output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivationRequest {
    /// Metric label as it appears in the [`MetricTable`](crate::models::table::MetricTable).
    pub metric: String,
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default)]
    pub window: Window,
}

impl DerivationRequest {
    pub fn new(metric: impl Into<String>, cadence: Cadence, window: Window) -> Self {
        Self {
            metric: metric.into(),
            cadence,
            window,
        }
    }

    /// Chart caption for `measure` of this request.
    pub fn caption(&self, measure: Measure) -> String {
        let (metric, noun, window) = (&self.metric, self.cadence.period_noun(), self.window);
        match measure {
            Measure::PerDayAverage if self.cadence == Cadence::Weekly => {
                format!("Average number of new {metric} per day in the previous week ({window})")
            }
            // a daily delta is already a per-day figure
            Measure::Delta | Measure::PerDayAverage => format!("New {metric} (in the past {noun}) ({window})"),
            Measure::Cumulative => format!("Cumulative {metric} ({window})"),
            Measure::Trajectory => {
                format!("New {metric} (in the past {noun}) against total {metric} ({window})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions_follow_measure() {
        let weekly = DerivationRequest::new("Confirmed Cases", Cadence::Weekly, Window::LastNDays(30));
        assert_eq!(
            weekly.caption(Measure::PerDayAverage),
            "Average number of new Confirmed Cases per day in the previous week (Last 30 days)"
        );
        assert_eq!(
            weekly.caption(Measure::Delta),
            "New Confirmed Cases (in the past week) (Last 30 days)"
        );
        assert_eq!(weekly.caption(Measure::Cumulative), "Cumulative Confirmed Cases (Last 30 days)");
        assert_eq!(
            weekly.caption(Measure::Trajectory),
            "New Confirmed Cases (in the past week) against total Confirmed Cases (Last 30 days)"
        );

        let daily = DerivationRequest::new("Reported Deaths", Cadence::Daily, Window::AllData);
        assert_eq!(daily.caption(Measure::Delta), "New Reported Deaths (in the past day) (All Data)");
        assert_eq!(daily.caption(Measure::PerDayAverage), daily.caption(Measure::Delta));
        assert_eq!(daily.caption(Measure::Cumulative), "Cumulative Reported Deaths (All Data)");
    }

    #[test]
    fn defaults_from_json() {
        let r: DerivationRequest = serde_json::from_str(r#"{"metric":"Active Cases"}"#).unwrap();
        assert_eq!(r.cadence, Cadence::Weekly);
        assert_eq!(r.window, Window::AllData);
    }
}
