//! Alcohol variables from the ALQ table.

use polars::prelude::DataFrame;
use tracing::debug;

use nhanes_ingest::polars::column_f64;
use nhanes_model::codes::ANSWER_NO;
use nhanes_model::variables::{
    ALCOHOL_STATUS, ALQ111, ALQ130, ALQ151, AVG_DRINKS_DAY, BINGE_DRINKER, BINGE_THRESHOLD,
    HEAVY_DRINKER,
};
use nhanes_model::{AlcoholStatus, IndicatorPolicy};

use super::{DeriveStage, flag, indicator, put_f64};
use crate::error::Result;

/// Drinking status from the never-drinker flag (`ALQ111`) and the average
/// drinks per day (`ALQ130`).
///
/// The never-drinker flag is checked first and short-circuits, so banding can
/// never overwrite it. Otherwise `(0, 2]` is Light, `(2, 4]` Moderate and
/// above 4 Heavy; zero, negative or missing averages stay unclassified.
pub fn alcohol_status(ever_drank: Option<f64>, avg_drinks: Option<f64>) -> Option<AlcoholStatus> {
    if ever_drank == Some(ANSWER_NO) {
        return Some(AlcoholStatus::Never);
    }
    avg_drinks.and_then(AlcoholStatus::band)
}

/// Append `ALCOHOL_STATUS`, `AVG_DRINKS_DAY`, `HEAVY_DRINKER` and `BINGE_DRINKER`.
///
/// `AVG_DRINKS_DAY` is zero for never-drinkers and the raw `ALQ130` otherwise,
/// missing included.
pub fn derive_alcohol(df: &DataFrame, policy: IndicatorPolicy) -> Result<DataFrame> {
    DeriveStage::Alcohol.check_inputs(df)?;

    let ever = column_f64(df, ALQ111)?;
    let avg = column_f64(df, ALQ130)?;
    let binge = column_f64(df, ALQ151)?;

    let rows = df.height();
    let mut status_codes = Vec::with_capacity(rows);
    let mut drinks = Vec::with_capacity(rows);
    let mut heavy = Vec::with_capacity(rows);
    let mut binge_flags = Vec::with_capacity(rows);

    for row in 0..rows {
        let status = alcohol_status(ever[row], avg[row]);

        status_codes.push(status.map(AlcoholStatus::code));
        drinks.push(match status {
            Some(AlcoholStatus::Never) => Some(0.0),
            _ => avg[row],
        });
        heavy.push(match (status, policy) {
            (None, IndicatorPolicy::ThreeValued) => None,
            (status, _) => Some(flag(status == Some(AlcoholStatus::Heavy))),
        });
        binge_flags.push(indicator(binge[row], |v| v >= BINGE_THRESHOLD, policy));
    }

    let unclassified = status_codes.iter().filter(|code| code.is_none()).count();

    let mut out = df.clone();
    put_f64(&mut out, ALCOHOL_STATUS, status_codes)?;
    put_f64(&mut out, AVG_DRINKS_DAY, drinks)?;
    put_f64(&mut out, HEAVY_DRINKER, heavy)?;
    put_f64(&mut out, BINGE_DRINKER, binge_flags)?;

    debug!(rows, unclassified, "derived alcohol variables");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn banding_boundaries() {
        let yes = Some(1.0);
        assert_eq!(alcohol_status(yes, Some(2.0)), Some(AlcoholStatus::Light));
        assert_eq!(alcohol_status(yes, Some(2.01)), Some(AlcoholStatus::Moderate));
        assert_eq!(alcohol_status(yes, Some(4.0)), Some(AlcoholStatus::Moderate));
        assert_eq!(alcohol_status(yes, Some(4.01)), Some(AlcoholStatus::Heavy));
        assert_eq!(alcohol_status(yes, Some(0.0)), None);
        assert_eq!(alcohol_status(yes, None), None);
        assert_eq!(alcohol_status(None, Some(1.0)), Some(AlcoholStatus::Light));
    }

    #[test]
    fn never_drinker_overrides_banding() {
        assert_eq!(alcohol_status(Some(2.0), Some(12.0)), Some(AlcoholStatus::Never));
        assert_eq!(alcohol_status(Some(2.0), None), Some(AlcoholStatus::Never));
    }

    fn alcohol_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(ALQ111.into(), vec![Some(2.0), Some(1.0), Some(1.0), Some(1.0)]).into(),
            Series::new(ALQ130.into(), vec![Some(6.0), Some(1.5), Some(5.0), None]).into(),
            Series::new(ALQ151.into(), vec![None, Some(2.0), Some(1.0), None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn derived_columns() {
        let out = derive_alcohol(&alcohol_frame(), IndicatorPolicy::Coerce).unwrap();

        assert_eq!(
            column_f64(&out, ALCOHOL_STATUS).unwrap(),
            vec![Some(0.0), Some(1.0), Some(3.0), None]
        );
        // Zero-filled for the never-drinker only.
        assert_eq!(
            column_f64(&out, AVG_DRINKS_DAY).unwrap(),
            vec![Some(0.0), Some(1.5), Some(5.0), None]
        );
        assert_eq!(
            column_f64(&out, HEAVY_DRINKER).unwrap(),
            vec![Some(0.0), Some(0.0), Some(1.0), Some(0.0)]
        );
        assert_eq!(
            column_f64(&out, BINGE_DRINKER).unwrap(),
            vec![Some(0.0), Some(1.0), Some(0.0), Some(0.0)]
        );
    }

    #[test]
    fn three_valued_indicators() {
        let out = derive_alcohol(&alcohol_frame(), IndicatorPolicy::ThreeValued).unwrap();
        assert_eq!(
            column_f64(&out, HEAVY_DRINKER).unwrap(),
            vec![Some(0.0), Some(0.0), Some(1.0), None]
        );
        assert_eq!(
            column_f64(&out, BINGE_DRINKER).unwrap(),
            vec![None, Some(1.0), Some(0.0), None]
        );
    }
}
