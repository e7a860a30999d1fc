//! Raw NHANES variable codes and derived variable names.

/// Respondent sequence number; the join key across all topic tables.
pub const SEQN: &str = "SEQN";

// Sleep (SLQ_J)
/// Usual sleep hours on weekdays or workdays.
pub const SLD012: &str = "SLD012";
/// Usual sleep hours on weekends.
pub const SLD013: &str = "SLD013";
/// How often do you snore.
pub const SLQ030: &str = "SLQ030";
/// Ever told a doctor you had trouble sleeping (1 = Yes).
pub const SLQ050: &str = "SLQ050";
/// How often feel overly sleepy during the day (0 = never .. 4 = almost always).
pub const SLQ120: &str = "SLQ120";

// Smoking (SMQ_J)
/// Smoked at least 100 cigarettes in life (1 = Yes, 2 = No).
pub const SMQ020: &str = "SMQ020";
/// Do you now smoke cigarettes (1 = Every day, 2 = Some days, 3 = Not at all).
pub const SMQ040: &str = "SMQ040";
/// Average cigarettes per day reported for the past 30 days.
pub const SMD641: &str = "SMD641";

// Alcohol (ALQ_J)
/// Ever had a drink of any kind of alcohol (1 = Yes, 2 = No).
pub const ALQ111: &str = "ALQ111";
/// Average number of alcoholic drinks per day, past 12 months.
pub const ALQ130: &str = "ALQ130";
/// Ever had 4/5 or more drinks every day.
pub const ALQ151: &str = "ALQ151";

// Demographics (DEMO_J)
pub const RIAGENDR: &str = "RIAGENDR";
pub const RIDAGEYR: &str = "RIDAGEYR";
pub const RIDRETH1: &str = "RIDRETH1";
pub const DMDEDUC2: &str = "DMDEDUC2";
pub const INDFMPIR: &str = "INDFMPIR";
pub const DMDHHSIZ: &str = "DMDHHSIZ";

// Derived: sleep
pub const SLEEP_DIFF: &str = "SLEEP_DIFF";
pub const AVG_SLEEP: &str = "AVG_SLEEP";
pub const POOR_SLEEP_DIAGNOSIS: &str = "POOR_SLEEP_DIAGNOSIS";
pub const LOW_SLEEP_HOURS: &str = "LOW_SLEEP_HOURS";
pub const HIGH_SLEEPINESS: &str = "HIGH_SLEEPINESS";
pub const POOR_SLEEP: &str = "POOR_SLEEP";

// Derived: smoking
pub const SMOKING_STATUS: &str = "SMOKING_STATUS";
pub const CURRENT_SMOKER: &str = "CURRENT_SMOKER";
pub const CIGARETTES_PER_DAY: &str = "CIGARETTES_PER_DAY";

// Derived: alcohol
pub const ALCOHOL_STATUS: &str = "ALCOHOL_STATUS";
pub const AVG_DRINKS_DAY: &str = "AVG_DRINKS_DAY";
pub const HEAVY_DRINKER: &str = "HEAVY_DRINKER";
pub const BINGE_DRINKER: &str = "BINGE_DRINKER";

// Derived: demographic
pub const AGE_GROUP: &str = "AGE_GROUP";
pub const LOW_INCOME: &str = "LOW_INCOME";
pub const GENDER: &str = "GENDER";

/// Average sleep below this many hours counts as low sleep.
pub const LOW_SLEEP_THRESHOLD_HOURS: f64 = 6.0;

/// Daytime sleepiness at or above this ordinal level counts as high.
pub const HIGH_SLEEPINESS_THRESHOLD: f64 = 3.0;

/// `SLQ050` code meaning a doctor was told about trouble sleeping.
pub const SLEEP_DIAGNOSIS_YES: f64 = 1.0;

/// Income-to-poverty ratio below this is low income (130% of poverty line).
pub const LOW_INCOME_RATIO: f64 = 1.3;

/// `ALQ151` at or above this code marks a binge drinker.
pub const BINGE_THRESHOLD: f64 = 2.0;
