//! Filter configuration: modes, defaults, and total validation.
//!
//! Configuration values are tuned live by an operator while the filters run at
//! sensor rate, so validation never fails. Every numeric field is clamped into
//! its domain, non-finite values fall back to the field default, and an
//! unknown mode name selects [`FilterMode::None`].

use core::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Default filter intensity.
pub const DEFAULT_AMOUNT: f32 = 0.2;
/// Default lower bound of the smoothing factor (1/s).
pub const DEFAULT_SMOOTH_MIN: f32 = 11.0;
/// Default lower bound of the prediction factor.
pub const DEFAULT_PREDICT_MIN: f32 = 10.0;
/// Default multiplier turning `amount` into a prediction factor.
pub const DEFAULT_PREDICT_MULTIPLIER: f32 = 15.0;
/// Default number of past samples kept for prediction.
pub const DEFAULT_PREDICT_BUFFER: usize = 6;

/// Valid `amount` range.
pub const AMOUNT_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid `smoothMin` range.
pub const SMOOTH_MIN_RANGE: (f32, f32) = (0.01, 1000.0);
/// Valid `predictMin` range.
pub const PREDICT_MIN_RANGE: (f32, f32) = (0.0, 100.0);
/// Valid `predictMultiplier` range.
pub const PREDICT_MULTIPLIER_RANGE: (f32, f32) = (0.0, 100.0);
/// Valid `predictBuffer` range. A one-sample buffer never extrapolates.
pub const PREDICT_BUFFER_RANGE: (usize, usize) = (1, 64);

/// Floor of `1 - amount` in the smoothing factor, so `amount = 1` stays finite.
pub const SMOOTHING_EPSILON: f32 = 1e-3;

/// Filtering algorithm applied to a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Raw passthrough.
    #[default]
    None,
    /// Exponential smoothing on the rotation manifold.
    Smoothing,
    /// Short-horizon angular extrapolation.
    Prediction,
}

impl FilterMode {
    /// All modes, in configuration order.
    pub const ALL: [FilterMode; 3] = [FilterMode::None, FilterMode::Smoothing, FilterMode::Prediction];

    /// Parse a persisted mode name. Unknown names select [`FilterMode::None`].
    ///
    /// ```
    /// use openmotion_filters::FilterMode;
    ///
    /// assert_eq!(FilterMode::from_name(" Prediction "), FilterMode::Prediction);
    /// assert_eq!(FilterMode::from_name("kalman"), FilterMode::None);
    /// ```
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
    }

    /// Persisted name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::Smoothing => "smoothing",
            FilterMode::Prediction => "prediction",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated configuration as it arrives from storage or an RPC.
///
/// Every field is optional and loosely typed; [`FilterConfig::validate`]
/// turns it into something safe to run.
///
/// A numeric field accepts a number or a numeric string. Any other value is
/// read as NaN, so validation falls back to the field default and reports it.
/// A mode that is not a string is kept as its text and reported as unknown.
/// `null` counts as absent. Input the JSON reader itself rejects, such as a
/// literal outside the `f64` range, is still a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFilterConfig {
    /// Mode name (`none`, `smoothing`, `prediction`)
    #[serde(rename = "type", alias = "mode", deserialize_with = "lenient_text")]
    pub mode: Option<String>,
    /// Filter intensity
    #[serde(deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    /// Smoothing-only lower bound of the smoothing factor
    #[serde(deserialize_with = "lenient_number")]
    pub smooth_min: Option<f64>,
    /// Prediction-only lower bound of the prediction factor
    #[serde(deserialize_with = "lenient_number")]
    pub predict_min: Option<f64>,
    /// Prediction-only multiplier applied to `amount`
    #[serde(deserialize_with = "lenient_number")]
    pub predict_multiplier: Option<f64>,
    /// Prediction-only history length
    #[serde(deserialize_with = "lenient_number")]
    pub predict_buffer: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientText)
}

/// Drain a sequence so the surrounding document keeps parsing.
fn skip_seq<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

fn skip_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.trim().parse().unwrap_or(f64::NAN)))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(Some(f64::NAN))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        skip_seq(seq)?;
        Ok(Some(f64::NAN))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        skip_map(map)?;
        Ok(Some(f64::NAN))
    }
}

struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mode name")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        skip_seq(seq)?;
        Ok(Some("[...]".to_owned()))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        skip_map(map)?;
        Ok(Some("{...}".to_owned()))
    }
}

/// A field that validation had to change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigAdjustment {
    /// Persisted field name
    pub field: &'static str,
    /// Value as supplied
    pub requested: String,
    /// Value actually stored
    pub applied: String,
}

impl fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.requested, self.applied)
    }
}

/// Validated, immutable filter parameters.
///
/// Fields are only reachable through validation, so a `FilterConfig` always
/// holds in-domain values. It is `Copy` and replaced wholesale on
/// reconfiguration.
///
/// # Example
///
/// ```
/// use openmotion_filters::{FilterConfig, FilterMode, RawFilterConfig};
///
/// let config = FilterConfig::validate(RawFilterConfig {
///     mode: Some("smoothing".into()),
///     amount: Some(50.0),
///     predict_buffer: Some(0.0),
///     ..RawFilterConfig::default()
/// });
///
/// assert_eq!(config.mode(), FilterMode::Smoothing);
/// assert!(config.amount() <= 1.0);
/// assert_eq!(config.predict_buffer(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFilterConfig")]
pub struct FilterConfig {
    #[serde(rename = "type")]
    mode: FilterMode,
    amount: f32,
    smooth_min: f32,
    predict_min: f32,
    predict_multiplier: f32,
    predict_buffer: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::Prediction,
            amount: DEFAULT_AMOUNT,
            smooth_min: DEFAULT_SMOOTH_MIN,
            predict_min: DEFAULT_PREDICT_MIN,
            predict_multiplier: DEFAULT_PREDICT_MULTIPLIER,
            predict_buffer: DEFAULT_PREDICT_BUFFER,
        }
    }
}

impl From<RawFilterConfig> for FilterConfig {
    fn from(raw: RawFilterConfig) -> Self {
        Self::validate(raw)
    }
}

impl FilterConfig {
    /// Passthrough configuration with default tunables.
    pub fn disabled() -> Self {
        Self {
            mode: FilterMode::None,
            ..Self::default()
        }
    }

    /// Sanitize `raw` into a runnable configuration.
    ///
    /// Missing numeric fields take their defaults; a missing or unknown mode
    /// selects [`FilterMode::None`]. This never fails.
    pub fn validate(raw: RawFilterConfig) -> Self {
        Self::validate_with_report(raw).0
    }

    /// Like [`FilterConfig::validate`], also listing every field that had to be
    /// clamped or replaced.
    pub fn validate_with_report(raw: RawFilterConfig) -> (Self, Vec<ConfigAdjustment>) {
        let mut report = Vec::new();

        let mode = match raw.mode.as_deref() {
            None => FilterMode::None,
            Some(name) => match FilterMode::parse(name) {
                Some(mode) => mode,
                None => {
                    report.push(ConfigAdjustment {
                        field: "type",
                        requested: format!("{name:?}"),
                        applied: FilterMode::None.to_string(),
                    });
                    FilterMode::None
                }
            },
        };

        let config = Self {
            mode,
            amount: sanitize_f32("amount", raw.amount, DEFAULT_AMOUNT, AMOUNT_RANGE, &mut report),
            smooth_min: sanitize_f32(
                "smoothMin",
                raw.smooth_min,
                DEFAULT_SMOOTH_MIN,
                SMOOTH_MIN_RANGE,
                &mut report,
            ),
            predict_min: sanitize_f32(
                "predictMin",
                raw.predict_min,
                DEFAULT_PREDICT_MIN,
                PREDICT_MIN_RANGE,
                &mut report,
            ),
            predict_multiplier: sanitize_f32(
                "predictMultiplier",
                raw.predict_multiplier,
                DEFAULT_PREDICT_MULTIPLIER,
                PREDICT_MULTIPLIER_RANGE,
                &mut report,
            ),
            predict_buffer: sanitize_count(
                "predictBuffer",
                raw.predict_buffer,
                DEFAULT_PREDICT_BUFFER,
                PREDICT_BUFFER_RANGE,
                &mut report,
            ),
        };

        (config, report)
    }

    /// Back to the loosely typed form, e.g. to patch one field.
    pub fn to_raw(&self) -> RawFilterConfig {
        RawFilterConfig {
            mode: Some(self.mode.as_str().to_owned()),
            amount: Some(f64::from(self.amount)),
            smooth_min: Some(f64::from(self.smooth_min)),
            predict_min: Some(f64::from(self.predict_min)),
            predict_multiplier: Some(f64::from(self.predict_multiplier)),
            predict_buffer: Some(self.predict_buffer as f64),
        }
    }

    /// Copy with a different mode.
    #[must_use]
    pub fn with_mode(self, mode: FilterMode) -> Self {
        Self { mode, ..self }
    }

    /// Copy with a different `amount` (clamped).
    #[must_use]
    pub fn with_amount(self, amount: f32) -> Self {
        Self::validate(RawFilterConfig {
            amount: Some(f64::from(amount)),
            ..self.to_raw()
        })
    }

    /// Copy with a different `smoothMin` (clamped).
    #[must_use]
    pub fn with_smooth_min(self, smooth_min: f32) -> Self {
        Self::validate(RawFilterConfig {
            smooth_min: Some(f64::from(smooth_min)),
            ..self.to_raw()
        })
    }

    /// Copy with a different `predictMin` (clamped).
    #[must_use]
    pub fn with_predict_min(self, predict_min: f32) -> Self {
        Self::validate(RawFilterConfig {
            predict_min: Some(f64::from(predict_min)),
            ..self.to_raw()
        })
    }

    /// Copy with a different `predictMultiplier` (clamped).
    #[must_use]
    pub fn with_predict_multiplier(self, predict_multiplier: f32) -> Self {
        Self::validate(RawFilterConfig {
            predict_multiplier: Some(f64::from(predict_multiplier)),
            ..self.to_raw()
        })
    }

    /// Copy with a different `predictBuffer` (clamped).
    #[must_use]
    pub fn with_predict_buffer(self, predict_buffer: usize) -> Self {
        Self::validate(RawFilterConfig {
            predict_buffer: Some(predict_buffer as f64),
            ..self.to_raw()
        })
    }

    /// Selected filter mode.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Filter intensity in `[0, 1]`.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Lower bound of the smoothing factor.
    pub fn smooth_min(&self) -> f32 {
        self.smooth_min
    }

    /// Lower bound of the prediction factor.
    pub fn predict_min(&self) -> f32 {
        self.predict_min
    }

    /// Multiplier applied to `amount` for prediction.
    pub fn predict_multiplier(&self) -> f32 {
        self.predict_multiplier
    }

    /// Number of past samples kept for prediction.
    pub fn predict_buffer(&self) -> usize {
        self.predict_buffer
    }

    /// Effective smoothing factor, a response rate in 1/s.
    ///
    /// `smoothMin / max(1 - amount, ε)`: never below `smoothMin`, strictly
    /// increasing in `amount`, so a larger amount means less damping.
    pub fn smoothing_factor(&self) -> f32 {
        self.smooth_min / (1.0 - self.amount).max(SMOOTHING_EPSILON)
    }

    /// Effective prediction factor: `max(predictMin, amount * predictMultiplier)`.
    pub fn prediction_factor(&self) -> f32 {
        self.predict_min.max(self.amount * self.predict_multiplier)
    }
}

fn sanitize_f32(
    field: &'static str,
    value: Option<f64>,
    default: f32,
    (min, max): (f32, f32),
    report: &mut Vec<ConfigAdjustment>,
) -> f32 {
    let Some(requested) = value else {
        return default;
    };
    if !requested.is_finite() {
        report.push(ConfigAdjustment {
            field,
            requested: requested.to_string(),
            applied: default.to_string(),
        });
        return default;
    }

    let applied = requested.clamp(f64::from(min), f64::from(max)) as f32;
    if requested < f64::from(min) || requested > f64::from(max) {
        report.push(ConfigAdjustment {
            field,
            requested: requested.to_string(),
            applied: applied.to_string(),
        });
    }
    applied
}

fn sanitize_count(
    field: &'static str,
    value: Option<f64>,
    default: usize,
    (min, max): (usize, usize),
    report: &mut Vec<ConfigAdjustment>,
) -> usize {
    let Some(requested) = value else {
        return default;
    };
    if !requested.is_finite() {
        report.push(ConfigAdjustment {
            field,
            requested: requested.to_string(),
            applied: default.to_string(),
        });
        return default;
    }

    let rounded = requested.round();
    let applied = (min..=max)
        .find(|&count| rounded <= count as f64)
        .unwrap_or(max);
    if rounded < min as f64 || rounded > max as f64 {
        report.push(ConfigAdjustment {
            field,
            requested: requested.to_string(),
            applied: applied.to_string(),
        });
    }
    applied
}
