//! Verdict presentation: response-to-report mapping and terminal rendering.

use serde::Serialize;

use crate::types::{
    ClassificationResponse, VERDICT_HIGH_RISK_PHISHING, VERDICT_SUSPICIOUS, VERDICT_TRUSTED_DOMAIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Warn,
    Bad,
}

impl Tone {
    fn ansi_code(self) -> &'static str {
        match self {
            Self::Good => "32",
            Self::Warn => "33",
            Self::Bad => "31",
        }
    }
}

/// Maps a server verdict to its displayed label and tone.
///
/// Total over the input: unrecognized and missing verdicts fall back to the
/// "Likely Legit" presentation.
pub fn verdict_presentation(verdict: Option<&str>) -> (&'static str, Tone) {
    match verdict {
        Some(VERDICT_TRUSTED_DOMAIN) => ("Trusted Domain", Tone::Good),
        Some(VERDICT_HIGH_RISK_PHISHING) => ("High Risk Phishing", Tone::Bad),
        Some(VERDICT_SUSPICIOUS) => ("Suspicious (Review)", Tone::Warn),
        _ => ("Likely Legit", Tone::Good),
    }
}

/// Risk scores always display with exactly four decimal digits.
pub fn format_risk_score(score: f64) -> String {
    format!("{score:.4}")
}

/// Presentation state for one classification attempt.
///
/// Built once per attempt and handed whole to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictReport {
    pub url: String,
    pub label: String,
    pub tone: Tone,
    pub score: String,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl VerdictReport {
    pub fn from_response(url: &str, response: &ClassificationResponse) -> Self {
        let (label, tone) = verdict_presentation(response.verdict.as_deref());
        Self {
            url: url.to_string(),
            label: label.to_string(),
            tone,
            score: format_risk_score(response.risk_score),
            reasons: response.reasons.clone(),
            note: None,
        }
    }

    /// The uniform error state: same shape for network failures, non-success
    /// statuses, and unparseable bodies.
    pub fn failure(url: &str, endpoint: &str) -> Self {
        Self {
            url: url.to_string(),
            label: "Error".to_string(),
            tone: Tone::Warn,
            score: "-".to_string(),
            reasons: Vec::new(),
            note: Some(format!(
                "Make sure the classification service is running at {endpoint}"
            )),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.note.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub flagged: usize,
    pub failed: usize,
    pub entries: Vec<VerdictReport>,
}

/// Renders one report in a terminal-friendly format.
pub fn render_report(report: &VerdictReport, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!("url: {}", report.url));
    lines.push(format!(
        "verdict: {}",
        style(&report.label, report.tone.ansi_code(), use_color)
    ));
    lines.push(format!("risk score: {}", report.score));

    let reasons = render_reasons(&report.reasons);
    if !reasons.is_empty() {
        lines.push("reasons:".to_string());
        lines.push(reasons);
    }

    if let Some(note) = &report.note {
        lines.push(note.clone());
    }

    lines.join("\n")
}

/// Bulleted reasons in given order; the empty string when there are none.
pub fn render_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        return String::new();
    }

    reasons
        .iter()
        .map(|reason| format!("  • {reason}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_batch_report(report: &BatchReport, use_color: bool) -> String {
    let summary = format!(
        "checked {} urls: {} flagged, {} failed",
        report.total, report.flagged, report.failed
    );

    let mut lines = vec![style(&summary, "1;36", use_color)];
    for entry in &report.entries {
        lines.push(String::new());
        lines.push(render_report(entry, use_color));
    }

    lines.join("\n")
}

fn style(value: &str, ansi_code: &str, use_color: bool) -> String {
    if use_color {
        return format!("\x1b[{ansi_code}m{value}\x1b[0m");
    }

    value.to_string()
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
