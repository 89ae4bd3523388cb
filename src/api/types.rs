//! Request/response types for the analysis API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Belief analysis ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeliefAnalysisRequest {
    pub belief: String,
    /// How strongly the belief is held, 1-10.
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeliefAnalysis {
    pub category: String,
    pub root_cause: String,
    pub impact: String,
    pub recommended_protocols: Vec<RecommendedProtocol>,
}

/// A canned 0-100 suitability score attached to a recommended protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedProtocol {
    pub id: String,
    pub name: String,
    pub suitability: u8,
    pub description: String,
}

// ── Protocol guidance ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolGuidanceRequest {
    pub protocol_id: String,
    /// 0-based step index.
    pub step: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolGuidance {
    pub instruction: String,
    pub example: String,
    pub next_step: usize,
    /// True iff `step >= total_steps - 1` for the protocol's script.
    pub is_complete: bool,
}

// ── Power assessment ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerAssessmentRequest {
    /// Self-rated scores keyed by dimension id.
    pub answers: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerAssessment {
    pub overall_score: f32,
    pub dimensions: Vec<PowerDimension>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerDimension {
    pub id: String,
    pub name: String,
    pub score: f32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_request_serde() {
        let req = BeliefAnalysisRequest {
            belief: "I'm not good enough".to_string(),
            intensity: 7,
            context: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("context"));
        let parsed: BeliefAnalysisRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.intensity, 7);
    }

    #[test]
    fn guidance_serde_roundtrip() {
        let guidance = ProtocolGuidance {
            instruction: "Access your timeline".to_string(),
            example: "For example...".to_string(),
            next_step: 1,
            is_complete: false,
        };
        let json = serde_json::to_string(&guidance).unwrap();
        let parsed: ProtocolGuidance = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.next_step, 1);
        assert!(!parsed.is_complete);
    }
}
