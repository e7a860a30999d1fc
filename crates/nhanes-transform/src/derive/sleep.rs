//! Sleep variables from the SLQ table.

use polars::prelude::DataFrame;
use tracing::debug;

use nhanes_ingest::polars::column_f64;
use nhanes_model::IndicatorPolicy;
use nhanes_model::variables::{
    AVG_SLEEP, HIGH_SLEEPINESS, HIGH_SLEEPINESS_THRESHOLD, LOW_SLEEP_HOURS,
    LOW_SLEEP_THRESHOLD_HOURS, POOR_SLEEP, POOR_SLEEP_DIAGNOSIS, SLD012, SLD013,
    SLEEP_DIAGNOSIS_YES, SLEEP_DIFF, SLQ050, SLQ120,
};

use super::{DeriveStage, any_of, indicator, put_f64};
use crate::error::Result;

/// Append `SLEEP_DIFF`, `AVG_SLEEP`, the three poor-sleep indicators and the
/// composite `POOR_SLEEP`.
///
/// `SLEEP_DIFF` is weekend minus weekday hours and may be negative. Both it
/// and `AVG_SLEEP` are missing when either input is missing.
pub fn derive_sleep(df: &DataFrame, policy: IndicatorPolicy) -> Result<DataFrame> {
    DeriveStage::Sleep.check_inputs(df)?;

    let weekday = column_f64(df, SLD012)?;
    let weekend = column_f64(df, SLD013)?;
    let told_doctor = column_f64(df, SLQ050)?;
    let sleepiness = column_f64(df, SLQ120)?;

    let rows = df.height();
    let mut diff = Vec::with_capacity(rows);
    let mut average = Vec::with_capacity(rows);
    let mut diagnosis = Vec::with_capacity(rows);
    let mut low_hours = Vec::with_capacity(rows);
    let mut high_sleepiness = Vec::with_capacity(rows);
    let mut poor_sleep = Vec::with_capacity(rows);

    for row in 0..rows {
        let both = weekday[row].zip(weekend[row]);
        let avg = both.map(|(wd, we)| (wd + we) / 2.0);

        let flags = [
            indicator(told_doctor[row], |v| v == SLEEP_DIAGNOSIS_YES, policy),
            indicator(avg, |v| v < LOW_SLEEP_THRESHOLD_HOURS, policy),
            indicator(sleepiness[row], |v| v >= HIGH_SLEEPINESS_THRESHOLD, policy),
        ];

        diff.push(both.map(|(wd, we)| we - wd));
        average.push(avg);
        diagnosis.push(flags[0]);
        low_hours.push(flags[1]);
        high_sleepiness.push(flags[2]);
        poor_sleep.push(any_of(&flags, policy));
    }

    let poor_count = poor_sleep.iter().filter(|v| **v == Some(1.0)).count();

    let mut out = df.clone();
    put_f64(&mut out, SLEEP_DIFF, diff)?;
    put_f64(&mut out, AVG_SLEEP, average)?;
    put_f64(&mut out, POOR_SLEEP_DIAGNOSIS, diagnosis)?;
    put_f64(&mut out, LOW_SLEEP_HOURS, low_hours)?;
    put_f64(&mut out, HIGH_SLEEPINESS, high_sleepiness)?;
    put_f64(&mut out, POOR_SLEEP, poor_sleep)?;

    debug!(rows, poor_sleep = poor_count, policy = %policy, "derived sleep variables");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn sleep_frame(
        weekday: Vec<Option<f64>>,
        weekend: Vec<Option<f64>>,
        told: Vec<Option<f64>>,
        sleepy: Vec<Option<f64>>,
    ) -> DataFrame {
        DataFrame::new(vec![
            Series::new(SLD012.into(), weekday).into(),
            Series::new(SLD013.into(), weekend).into(),
            Series::new(SLQ050.into(), told).into(),
            Series::new(SLQ120.into(), sleepy).into(),
        ])
        .unwrap()
    }

    #[test]
    fn arithmetic_columns_propagate_missing() {
        let df = sleep_frame(
            vec![Some(7.0), Some(8.0), None],
            vec![Some(9.0), Some(6.0), Some(9.0)],
            vec![Some(2.0); 3],
            vec![Some(1.0); 3],
        );
        let out = derive_sleep(&df, IndicatorPolicy::Coerce).unwrap();

        assert_eq!(column_f64(&out, SLEEP_DIFF).unwrap(), vec![Some(2.0), Some(-2.0), None]);
        assert_eq!(column_f64(&out, AVG_SLEEP).unwrap(), vec![Some(8.0), Some(7.0), None]);
    }

    #[test]
    fn composite_is_or_of_indicators() {
        let df = sleep_frame(
            vec![Some(7.0), Some(5.0), Some(8.0), Some(8.0), Some(8.0)],
            vec![Some(7.0), Some(5.5), Some(8.0), Some(8.0), Some(8.0)],
            vec![Some(2.0), Some(2.0), Some(1.0), Some(2.0), Some(2.0)],
            vec![Some(0.0), Some(0.0), Some(0.0), Some(3.0), Some(2.0)],
        );
        let out = derive_sleep(&df, IndicatorPolicy::Coerce).unwrap();

        assert_eq!(
            column_f64(&out, LOW_SLEEP_HOURS).unwrap(),
            vec![Some(0.0), Some(1.0), Some(0.0), Some(0.0), Some(0.0)]
        );
        assert_eq!(
            column_f64(&out, POOR_SLEEP_DIAGNOSIS).unwrap(),
            vec![Some(0.0), Some(0.0), Some(1.0), Some(0.0), Some(0.0)]
        );
        assert_eq!(
            column_f64(&out, HIGH_SLEEPINESS).unwrap(),
            vec![Some(0.0), Some(0.0), Some(0.0), Some(1.0), Some(0.0)]
        );
        assert_eq!(
            column_f64(&out, POOR_SLEEP).unwrap(),
            vec![Some(0.0), Some(1.0), Some(1.0), Some(1.0), Some(0.0)]
        );
    }

    #[test]
    fn six_hours_average_is_not_low() {
        let df = sleep_frame(vec![Some(5.0)], vec![Some(7.0)], vec![None], vec![None]);
        let out = derive_sleep(&df, IndicatorPolicy::Coerce).unwrap();
        assert_eq!(column_f64(&out, LOW_SLEEP_HOURS).unwrap(), vec![Some(0.0)]);
    }

    #[test]
    fn coerce_reads_unknown_sleep_as_good_sleep() {
        let df = sleep_frame(vec![None], vec![None], vec![None], vec![None]);

        let coerced = derive_sleep(&df, IndicatorPolicy::Coerce).unwrap();
        assert_eq!(column_f64(&coerced, POOR_SLEEP).unwrap(), vec![Some(0.0)]);

        let kleene = derive_sleep(&df, IndicatorPolicy::ThreeValued).unwrap();
        assert_eq!(column_f64(&kleene, POOR_SLEEP).unwrap(), vec![None]);
        assert_eq!(column_f64(&kleene, LOW_SLEEP_HOURS).unwrap(), vec![None]);
    }

    #[test]
    fn three_valued_true_dominates_unknown() {
        let df = sleep_frame(vec![None], vec![None], vec![Some(1.0)], vec![None]);
        let out = derive_sleep(&df, IndicatorPolicy::ThreeValued).unwrap();
        assert_eq!(column_f64(&out, POOR_SLEEP).unwrap(), vec![Some(1.0)]);
    }

    #[test]
    fn missing_input_column_is_a_schema_error() {
        let df = DataFrame::new(vec![Series::new(SLD012.into(), vec![7.0]).into()]).unwrap();
        let err = derive_sleep(&df, IndicatorPolicy::Coerce).unwrap_err();
        assert!(err.to_string().contains(SLD013), "{err}");
    }
}
