//! Smoking variables from the SMQ table.

use polars::prelude::DataFrame;
use tracing::debug;

use nhanes_ingest::polars::column_f64;
use nhanes_model::codes::{
    ANSWER_NO, ANSWER_YES, SMOKES_EVERY_DAY, SMOKES_NOT_AT_ALL, SMOKES_SOME_DAYS,
};
use nhanes_model::variables::{
    CIGARETTES_PER_DAY, CURRENT_SMOKER, SMD641, SMOKING_STATUS, SMQ020, SMQ040,
};
use nhanes_model::{IndicatorPolicy, SmokingStatus};

use super::{DeriveStage, flag, put_f64};
use crate::error::Result;

/// The two raw answers that decide smoking status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokingAnswers {
    /// `SMQ020`: smoked at least 100 cigarettes in life.
    pub ever_smoked_100: Option<f64>,
    /// `SMQ040`: smokes now.
    pub smokes_now: Option<f64>,
}

struct StatusRule {
    status: SmokingStatus,
    matches: fn(&SmokingAnswers) -> bool,
}

fn never_smoked_100(answers: &SmokingAnswers) -> bool {
    answers.ever_smoked_100 == Some(ANSWER_NO)
}

fn quit_smoking(answers: &SmokingAnswers) -> bool {
    answers.ever_smoked_100 == Some(ANSWER_YES) && answers.smokes_now == Some(SMOKES_NOT_AT_ALL)
}

fn still_smoking(answers: &SmokingAnswers) -> bool {
    answers.ever_smoked_100 == Some(ANSWER_YES)
        && matches!(answers.smokes_now, Some(code) if code == SMOKES_EVERY_DAY || code == SMOKES_SOME_DAYS)
}

/// Evaluated top-down; the first matching rule decides.
///
/// "Never" comes first, so a respondent who has not smoked 100 cigarettes is
/// Never whatever `SMQ040` holds. Former is checked before Current.
const STATUS_RULES: [StatusRule; 3] = [
    StatusRule {
        status: SmokingStatus::Never,
        matches: never_smoked_100,
    },
    StatusRule {
        status: SmokingStatus::Former,
        matches: quit_smoking,
    },
    StatusRule {
        status: SmokingStatus::Current,
        matches: still_smoking,
    },
];

/// Smoking status for one respondent; `None` when no rule matches.
pub fn smoking_status(answers: &SmokingAnswers) -> Option<SmokingStatus> {
    STATUS_RULES
        .iter()
        .find(|rule| (rule.matches)(answers))
        .map(|rule| rule.status)
}

/// Append `SMOKING_STATUS`, `CURRENT_SMOKER` and `CIGARETTES_PER_DAY`.
///
/// `CIGARETTES_PER_DAY` is the raw `SMD641` with missing read as zero, then
/// forced to zero for former and never smokers whatever the raw value.
pub fn derive_smoking(df: &DataFrame, policy: IndicatorPolicy) -> Result<DataFrame> {
    DeriveStage::Smoking.check_inputs(df)?;

    let ever = column_f64(df, SMQ020)?;
    let now = column_f64(df, SMQ040)?;
    let per_day = column_f64(df, SMD641)?;

    let rows = df.height();
    let mut status_codes = Vec::with_capacity(rows);
    let mut current = Vec::with_capacity(rows);
    let mut cigarettes = Vec::with_capacity(rows);

    for row in 0..rows {
        let status = smoking_status(&SmokingAnswers {
            ever_smoked_100: ever[row],
            smokes_now: now[row],
        });

        status_codes.push(status.map(SmokingStatus::code));
        current.push(match (status, policy) {
            (None, IndicatorPolicy::ThreeValued) => None,
            (status, _) => Some(flag(status == Some(SmokingStatus::Current))),
        });
        cigarettes.push(Some(match status {
            Some(SmokingStatus::Former | SmokingStatus::Never) => 0.0,
            _ => per_day[row].unwrap_or(0.0),
        }));
    }

    let unclassified = status_codes.iter().filter(|code| code.is_none()).count();

    let mut out = df.clone();
    put_f64(&mut out, SMOKING_STATUS, status_codes)?;
    put_f64(&mut out, CURRENT_SMOKER, current)?;
    put_f64(&mut out, CIGARETTES_PER_DAY, cigarettes)?;

    debug!(rows, unclassified, "derived smoking variables");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn answers(ever: Option<f64>, now: Option<f64>) -> SmokingAnswers {
        SmokingAnswers {
            ever_smoked_100: ever,
            smokes_now: now,
        }
    }

    #[test]
    fn status_precedence() {
        // "No" to 100 cigarettes wins over any current-smoking answer.
        assert_eq!(smoking_status(&answers(Some(2.0), Some(1.0))), Some(SmokingStatus::Never));
        assert_eq!(smoking_status(&answers(Some(2.0), None)), Some(SmokingStatus::Never));
        assert_eq!(smoking_status(&answers(Some(1.0), Some(3.0))), Some(SmokingStatus::Former));
        assert_eq!(smoking_status(&answers(Some(1.0), Some(1.0))), Some(SmokingStatus::Current));
        assert_eq!(smoking_status(&answers(Some(1.0), Some(2.0))), Some(SmokingStatus::Current));
        assert_eq!(smoking_status(&answers(Some(1.0), None)), None);
        assert_eq!(smoking_status(&answers(None, Some(1.0))), None);
    }

    fn smoking_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(SMQ020.into(), vec![Some(1.0), Some(1.0), Some(2.0), Some(1.0), None])
                .into(),
            Series::new(SMQ040.into(), vec![Some(1.0), Some(3.0), None, None, None]).into(),
            Series::new(SMD641.into(), vec![Some(15.0), Some(20.0), Some(5.0), None, Some(4.0)])
                .into(),
        ])
        .unwrap()
    }

    #[test]
    fn cigarettes_zeroed_for_former_and_never() {
        let out = derive_smoking(&smoking_frame(), IndicatorPolicy::Coerce).unwrap();

        assert_eq!(
            column_f64(&out, SMOKING_STATUS).unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0), None, None]
        );
        assert_eq!(
            column_f64(&out, CIGARETTES_PER_DAY).unwrap(),
            vec![Some(15.0), Some(0.0), Some(0.0), Some(0.0), Some(4.0)]
        );
        assert_eq!(
            column_f64(&out, CURRENT_SMOKER).unwrap(),
            vec![Some(1.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0)]
        );
    }

    #[test]
    fn three_valued_leaves_unknown_smokers_missing() {
        let out = derive_smoking(&smoking_frame(), IndicatorPolicy::ThreeValued).unwrap();
        assert_eq!(
            column_f64(&out, CURRENT_SMOKER).unwrap(),
            vec![Some(1.0), Some(0.0), Some(0.0), None, None]
        );
    }

    #[test]
    fn raw_columns_are_kept() {
        let out = derive_smoking(&smoking_frame(), IndicatorPolicy::Coerce).unwrap();
        assert_eq!(out.width(), 6);
        assert_eq!(column_f64(&out, SMD641).unwrap()[1], Some(20.0));
    }
}
