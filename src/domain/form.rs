//! Assessment form fields and the raw, string-typed input record.
//!
//! Values are kept exactly as entered. Numeric coercion happens only when a
//! [`PredictionRequest`](super::PredictionRequest) is built at submit time.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use super::prediction::{parse_decimal_prefix, parse_int_prefix};
use super::AssessmentError;

/// A selectable value for a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    /// Value sent to the service
    pub value: &'static str,
    /// Human-readable label
    pub label: &'static str,
}

/// How a field is entered and how it is coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole number with advisory bounds
    Integer { min: i64, max: i64 },
    /// Decimal number with advisory bounds
    Decimal { min: f64, max: f64 },
    /// One of a fixed set of string values
    Choice(&'static [FieldOption]),
}

impl FieldKind {
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Choice(_))
    }
}

const SEX_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "M", label: "Male" },
    FieldOption { value: "F", label: "Female" },
];

const CHEST_PAIN_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "ATA", label: "Atypical Angina" },
    FieldOption { value: "NAP", label: "Non-Anginal Pain" },
    FieldOption { value: "ASY", label: "Asymptomatic" },
    FieldOption { value: "TA", label: "Typical Angina" },
];

const FASTING_BS_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "1", label: "Yes (>120 mg/dL)" },
    FieldOption { value: "0", label: "No (<=120 mg/dL)" },
];

const RESTING_ECG_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "Normal", label: "Normal" },
    FieldOption { value: "ST", label: "ST-T Wave Abnormality" },
    FieldOption { value: "LVH", label: "Left Ventricular Hypertrophy" },
];

const EXERCISE_ANGINA_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "Y", label: "Yes" },
    FieldOption { value: "N", label: "No" },
];

const ST_SLOPE_OPTIONS: &[FieldOption] = &[
    FieldOption { value: "Up", label: "Upsloping" },
    FieldOption { value: "Flat", label: "Flat" },
    FieldOption { value: "Down", label: "Downsloping" },
];

/// The eleven clinical inputs, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
}

impl FormField {
    /// Number of fields on the form.
    pub const COUNT: usize = 11;

    /// All fields in the order they are validated and serialized.
    pub const ALL: [FormField; Self::COUNT] = [
        Self::Age,
        Self::Sex,
        Self::ChestPainType,
        Self::RestingBp,
        Self::Cholesterol,
        Self::FastingBs,
        Self::RestingEcg,
        Self::MaxHr,
        Self::ExerciseAngina,
        Self::Oldpeak,
        Self::StSlope,
    ];

    /// Position of this field in [`FormField::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used on the wire and in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::RestingEcg => "RestingECG",
            Self::MaxHr => "MaxHR",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST_Slope",
        }
    }

    /// Label shown next to the input.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::RestingBp => "Resting Blood Pressure",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "Fasting Blood Sugar",
            Self::RestingEcg => "Resting ECG",
            Self::MaxHr => "Max Heart Rate",
            Self::ExerciseAngina => "Exercise Angina",
            Self::Oldpeak => "Oldpeak (ST Depression)",
            Self::StSlope => "ST Slope",
        }
    }

    /// Short hint shown while the field is empty.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Age => "years (1-120)",
            Self::RestingBp => "mmHg (80-200)",
            Self::Cholesterol => "mg/dL (100-500)",
            Self::MaxHr => "bpm (60-220)",
            Self::Oldpeak => "-3.0 to 7.0, step 0.1",
            Self::Sex
            | Self::ChestPainType
            | Self::FastingBs
            | Self::RestingEcg
            | Self::ExerciseAngina
            | Self::StSlope => "select with ←/→",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Integer { min: 1, max: 120 },
            Self::RestingBp => FieldKind::Integer { min: 80, max: 200 },
            Self::Cholesterol => FieldKind::Integer { min: 100, max: 500 },
            Self::MaxHr => FieldKind::Integer { min: 60, max: 220 },
            Self::Oldpeak => FieldKind::Decimal {
                min: -3.0,
                max: 7.0,
            },
            Self::Sex => FieldKind::Choice(SEX_OPTIONS),
            Self::ChestPainType => FieldKind::Choice(CHEST_PAIN_OPTIONS),
            Self::FastingBs => FieldKind::Choice(FASTING_BS_OPTIONS),
            Self::RestingEcg => FieldKind::Choice(RESTING_ECG_OPTIONS),
            Self::ExerciseAngina => FieldKind::Choice(EXERCISE_ANGINA_OPTIONS),
            Self::StSlope => FieldKind::Choice(ST_SLOPE_OPTIONS),
        }
    }

    /// Label for a categorical value, if the value is one of the known options.
    #[must_use]
    pub fn option_label(self, value: &str) -> Option<&'static str> {
        match self.kind() {
            FieldKind::Choice(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| AssessmentError::UnknownField(s.to_string()))
    }
}

/// A numeric value that parsed but sits outside the widget bounds.
///
/// Bounds are advisory: such values are still submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryWarning {
    pub field: FormField,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is outside the usual range {}..{}",
            self.field, self.value, self.min, self.max
        )
    }
}

/// Raw form input: one string per field, all initially empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: [String; FormField::COUNT],
}

impl FormInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Replace one field's value, leaving the others untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = &mut self.values[field.index()];
        slot.zeroize();
        *slot = value.into();
    }

    /// Fields whose value is the empty string, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    /// Wipe every buffer and return all fields to empty.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.zeroize();
        }
    }

    /// Numeric fields whose parsed value falls outside the advisory bounds.
    #[must_use]
    pub fn advisory_warnings(&self) -> Vec<AdvisoryWarning> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| {
                let raw = self.get(field);
                let (value, min, max) = match field.kind() {
                    FieldKind::Integer { min, max } => {
                        (parse_int_prefix(raw)? as f64, min as f64, max as f64)
                    }
                    FieldKind::Decimal { min, max } => (parse_decimal_prefix(raw)?, min, max),
                    FieldKind::Choice(_) => return None,
                };
                (value < min || value > max).then_some(AdvisoryWarning {
                    field,
                    value,
                    min,
                    max,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>(), Ok(field));
        }
        assert_eq!(
            "Smoking".parse::<FormField>(),
            Err(AssessmentError::UnknownField("Smoking".to_string()))
        );
    }

    #[test]
    fn test_index_matches_order() {
        for (i, field) in FormField::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = FormInput::new();
        assert!(form.is_blank());
        assert_eq!(form.missing_fields(), FormField::ALL.to_vec());
    }

    #[test]
    fn test_set_only_touches_one_field() {
        let mut form = FormInput::new();
        form.set(FormField::Cholesterol, "200");
        assert_eq!(form.get(FormField::Cholesterol), "200");
        for field in FormField::ALL {
            if field != FormField::Cholesterol {
                assert_eq!(form.get(field), "");
            }
        }
    }

    #[test]
    fn test_zero_and_whitespace_are_present() {
        let mut form = FormInput::new();
        form.set(FormField::FastingBs, "0");
        form.set(FormField::Oldpeak, " ");
        let missing = form.missing_fields();
        assert!(!missing.contains(&FormField::FastingBs));
        assert!(!missing.contains(&FormField::Oldpeak));
        assert_eq!(missing.len(), 9);
    }

    #[test]
    fn test_clear() {
        let mut form = FormInput::new();
        form.set(FormField::Age, "45");
        form.set(FormField::Sex, "F");
        form.clear();
        assert_eq!(form, FormInput::new());
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(
            FormField::ChestPainType.option_label("ATA"),
            Some("Atypical Angina")
        );
        assert_eq!(
            FormField::FastingBs.option_label("1"),
            Some("Yes (>120 mg/dL)")
        );
        assert_eq!(FormField::Sex.option_label("X"), None);
        assert_eq!(FormField::Age.option_label("45"), None);
    }

    #[test]
    fn test_advisory_warnings() {
        let mut form = FormInput::new();
        form.set(FormField::Age, "45");
        form.set(FormField::RestingBp, "250");
        form.set(FormField::Oldpeak, "-4.5");
        form.set(FormField::MaxHr, "fast");

        let warnings = form.advisory_warnings();
        let fields: Vec<FormField> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(fields, vec![FormField::RestingBp, FormField::Oldpeak]);
        assert!(warnings[0].to_string().contains("RestingBP 250"));
    }
}
