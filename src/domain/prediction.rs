//! Prediction request/response wire types.
//!
//! The request is derived from a [`FormInput`] by coercing the numeric fields;
//! categorical fields pass through unchanged. A numeric field that fails to
//! parse becomes `None` and is serialized as JSON `null`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::form::{FormField, FormInput};

/// Coerced request body for `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Age")]
    pub age: Option<i64>,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: String,
    #[serde(rename = "RestingBP")]
    pub resting_bp: Option<i64>,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: Option<i64>,
    #[serde(rename = "FastingBS")]
    pub fasting_bs: Option<i64>,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: String,
    #[serde(rename = "MaxHR")]
    pub max_hr: Option<i64>,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: String,
    #[serde(rename = "Oldpeak")]
    pub oldpeak: Option<f64>,
    #[serde(rename = "ST_Slope")]
    pub st_slope: String,
}

impl PredictionRequest {
    /// Build a request from raw form values.
    ///
    /// Does not check for empty fields; callers validate first.
    #[must_use]
    pub fn from_form(form: &FormInput) -> Self {
        let text = |field| form.get(field).to_string();
        let int = |field| parse_int_prefix(form.get(field));

        Self {
            age: int(FormField::Age),
            sex: text(FormField::Sex),
            chest_pain_type: text(FormField::ChestPainType),
            resting_bp: int(FormField::RestingBp),
            cholesterol: int(FormField::Cholesterol),
            fasting_bs: int(FormField::FastingBs),
            resting_ecg: text(FormField::RestingEcg),
            max_hr: int(FormField::MaxHr),
            exercise_angina: text(FormField::ExerciseAngina),
            oldpeak: parse_decimal_prefix(form.get(FormField::Oldpeak)),
            st_slope: text(FormField::StSlope),
        }
    }

    /// Numeric fields whose value could not be parsed.
    #[must_use]
    pub fn coercion_failures(&self) -> Vec<FormField> {
        let mut failed = Vec::new();
        let ints = [
            (FormField::Age, self.age),
            (FormField::RestingBp, self.resting_bp),
            (FormField::Cholesterol, self.cholesterol),
            (FormField::FastingBs, self.fasting_bs),
            (FormField::MaxHr, self.max_hr),
        ];
        for (field, value) in ints {
            if value.is_none() {
                failed.push(field);
            }
        }
        if self.oldpeak.is_none() {
            failed.push(FormField::Oldpeak);
        }
        failed.sort();
        failed
    }
}

/// Split off an optional sign and the leading run of ASCII digits.
fn sign_and_digits(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (&s[..sign_len], &s[sign_len..sign_len + digits])
}

/// Parse the leading integer of `raw`, ignoring leading whitespace and any
/// trailing text (`"45.9"` → 45, `"12abc"` → 12).
pub(crate) fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = sign_and_digits(s);
    if digits.is_empty() {
        return None;
    }
    s[..sign.len() + digits.len()].parse().ok()
}

/// Parse the leading decimal of `raw` (`"1.5x"` → 1.5, `".5"` → 0.5).
///
/// Non-finite results are treated as parse failures.
pub(crate) fn parse_decimal_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let (sign, int_digits) = sign_and_digits(s);
    let mut end = sign.len() + int_digits.len();
    let mut mantissa_digits = int_digits.len();

    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac > 0 || mantissa_digits > 0 {
            end += 1 + frac;
            mantissa_digits += frac;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let (exp_sign, exp_digits) = sign_and_digits(&s[end + 1..]);
        if !exp_digits.is_empty() {
            end += 1 + exp_sign.len() + exp_digits.len();
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Class probabilities reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub no_disease: f64,
    pub heart_disease: f64,
}

/// Successful body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Binary prediction (0 = no disease, 1 = disease)
    pub prediction: u8,
    pub prediction_text: String,
    /// Probability of the predicted class (0.0 to 1.0)
    pub confidence: f64,
    pub probability: Probability,
}

impl PredictionResponse {
    #[must_use]
    pub fn classification(&self) -> Classification {
        if self.prediction == 1 {
            Classification::HeartDisease
        } else {
            Classification::NoDisease
        }
    }
}

/// Binary outcome of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoDisease,
    HeartDisease,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDisease => write!(f, "NO DISEASE"),
            Self::HeartDisease => write!(f, "HEART DISEASE"),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Format a 0..1 fraction as a percentage with one decimal.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
