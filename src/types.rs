use serde::{Deserialize, Deserializer, Serialize};

/// Verdict labels the classification service is known to emit.
pub const VERDICT_TRUSTED_DOMAIN: &str = "TRUSTED_DOMAIN";
pub const VERDICT_HIGH_RISK_PHISHING: &str = "HIGH_RISK_PHISHING";
pub const VERDICT_SUSPICIOUS: &str = "SUSPICIOUS";

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRequest<'a> {
    pub url: &'a str,
}

/// Response payload of `POST /predict`.
///
/// The live service also returns `url` and `features` fields; the client
/// never reads them, so they are left to serde's unknown-field handling.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationResponse {
    pub verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient_risk_score")]
    pub risk_score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

fn lenient_risk_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_risk_score(&value))
}

/// Numbers pass through, numeric strings parse, anything else counts as 0.
fn coerce_risk_score(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(0.0),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
