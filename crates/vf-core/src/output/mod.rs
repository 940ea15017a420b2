//! Response rendering.
//!
//! JSON is the machine default; text is a short human report. Both go to
//! stdout and nothing else does — logs live on stderr.

use std::fmt::Write as _;
use vf_common::{AnalysisResponse, GameState, OutputFormat};

/// How many ranked recommendations the text report prints.
const TEXT_TOP_N: usize = 5;

/// Render a response in the requested format.
pub fn render_response(
    response: &AnalysisResponse,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(response),
        OutputFormat::Json => serde_json::to_string(response),
        OutputFormat::Text => Ok(render_text(response)),
    }
}

fn render_text(response: &AnalysisResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "state: {}  mode: {}  quit recommended: {}",
        response.game_state, response.mode, response.quit_recommended
    );
    let _ = writeln!(out, "{}", response.explanation);

    if response.game_state != GameState::Active {
        return out;
    }

    if !response.guaranteed_safe.is_empty() {
        let cells: Vec<String> = response
            .guaranteed_safe
            .iter()
            .map(|p| p.to_string())
            .collect();
        let _ = writeln!(out, "guaranteed safe: {}", cells.join(" "));
    }
    if !response.guaranteed_voltorb.is_empty() {
        let cells: Vec<String> = response
            .guaranteed_voltorb
            .iter()
            .map(|p| p.to_string())
            .collect();
        let _ = writeln!(out, "guaranteed voltorb: {}", cells.join(" "));
    }
    if !response.forced_values.is_empty() {
        let cells: Vec<String> = response
            .forced_values
            .iter()
            .map(|f| format!("({}, {})={}", f.row, f.col, f.value))
            .collect();
        let _ = writeln!(out, "forced values: {}", cells.join(" "));
    }

    for (rank, rec) in response.recommendations.iter().take(TEXT_TOP_N).enumerate() {
        let _ = writeln!(
            out,
            "{}. {}  p(voltorb) {:5.1}%  E[value] {:.2}  risk {}",
            rank + 1,
            rec.position,
            rec.p_voltorb * 100.0,
            rec.expected_value,
            rec.risk_tier
        );
    }
    if response.recommendations.len() > TEXT_TOP_N {
        let _ = writeln!(
            out,
            "... and {} more candidates",
            response.recommendations.len() - TEXT_TOP_N
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_common::{
        EstimateMethod, EstimatorReport, Mode, Position, Recommendation, RiskTier, SCHEMA_VERSION,
    };

    fn active_response() -> AnalysisResponse {
        AnalysisResponse {
            schema_version: SCHEMA_VERSION.to_string(),
            mode: Mode::Level,
            game_state: GameState::Active,
            guaranteed_safe: vec![Position(1, 2)],
            guaranteed_voltorb: vec![Position(4, 0)],
            forced_values: vec![],
            recommendations: vec![Recommendation {
                position: Position(1, 2),
                p_voltorb: 0.0,
                expected_value: 1.5,
                risk_tier: RiskTier::Safe,
                distribution: [0.0, 0.5, 0.5, 0.0],
            }],
            quit_recommended: false,
            explanation: "level mode: flip (1, 2)".to_string(),
            estimator: EstimatorReport {
                method: EstimateMethod::Sampled,
                accepted: 1200,
                attempted: 4000,
                low_confidence: false,
            },
        }
    }

    #[test]
    fn json_is_parseable_and_compact() {
        let rendered = render_response(&active_response(), OutputFormat::Json, false).unwrap();
        assert!(!rendered.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["game_state"], "active");
    }

    #[test]
    fn text_lists_guarantees_and_ranking() {
        let rendered = render_response(&active_response(), OutputFormat::Text, false).unwrap();
        assert!(rendered.contains("guaranteed safe: (1, 2)"));
        assert!(rendered.contains("guaranteed voltorb: (4, 0)"));
        assert!(rendered.contains("1. (1, 2)"));
        assert!(rendered.contains("risk safe"));
    }

    #[test]
    fn settled_round_prints_only_the_summary() {
        let mut response = active_response();
        response.game_state = GameState::Lost;
        response.recommendations.clear();
        let rendered = render_response(&response, OutputFormat::Text, false).unwrap();
        assert!(rendered.contains("state: lost"));
        assert!(!rendered.contains("guaranteed safe"));
    }
}
