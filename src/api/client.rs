//! Simulated analysis client.
//!
//! Stands in for the real Straico-style HTTP client: every call checks for a
//! stored credential first (missing key fails immediately, without the
//! delay), then sleeps the artificial "thinking" delay and returns a
//! deterministic canned payload. No real network I/O exists in this build.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::credentials::CredentialStore;
use crate::error::ApiError;
use crate::scripts::ScriptLibrary;

use super::types::*;

/// The remote analysis surface: belief analysis, protocol guidance, and the
/// power assessment. Kept as a trait so tests can substitute their own stub.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze_belief(
        &self,
        request: &BeliefAnalysisRequest,
    ) -> Result<BeliefAnalysis, ApiError>;

    async fn protocol_guidance(
        &self,
        request: &ProtocolGuidanceRequest,
    ) -> Result<ProtocolGuidance, ApiError>;

    async fn power_assessment(
        &self,
        request: &PowerAssessmentRequest,
    ) -> Result<PowerAssessment, ApiError>;
}

/// Delayed-canned-response client.
pub struct SimulatedClient {
    credentials: Arc<dyn CredentialStore>,
    library: &'static ScriptLibrary,
    delay: Duration,
}

impl SimulatedClient {
    pub fn new(credentials: Arc<dyn CredentialStore>, delay: Duration) -> Self {
        Self {
            credentials,
            library: ScriptLibrary::builtin(),
            delay,
        }
    }

    /// Fail fast when no credential is stored. Storage errors degrade to
    /// "no key" rather than surfacing as a separate failure mode.
    fn require_key(&self) -> Result<(), ApiError> {
        let key = match self.credentials.get() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Credential store read failed: {e}");
                None
            }
        };
        match key {
            Some(_) => Ok(()),
            None => Err(ApiError::MissingApiKey),
        }
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl AnalysisApi for SimulatedClient {
    async fn analyze_belief(
        &self,
        request: &BeliefAnalysisRequest,
    ) -> Result<BeliefAnalysis, ApiError> {
        self.require_key()?;
        if request.belief.trim().is_empty() {
            return Err(ApiError::InvalidRequest("belief must not be empty".into()));
        }
        self.simulate_latency().await;
        tracing::debug!(intensity = request.intensity, "Simulated belief analysis");
        Ok(canned_belief_analysis())
    }

    async fn protocol_guidance(
        &self,
        request: &ProtocolGuidanceRequest,
    ) -> Result<ProtocolGuidance, ApiError> {
        self.require_key()?;
        self.simulate_latency().await;

        let summaries = guidance_summaries(&request.protocol_id);
        let total = summaries.len();
        let instruction = summaries
            .get(request.step)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Complete the protocol steps".to_string());

        // Keep is_complete consistent with the script's own length when the
        // protocol is known; unknown ids have no steps and are always done.
        let total = self
            .library
            .get(&request.protocol_id)
            .map(|s| s.total_steps())
            .unwrap_or(total);

        Ok(ProtocolGuidance {
            instruction,
            example: "For example, if your limiting belief is \"I'm not good enough,\" notice \
                      where you see this belief in your mind, how large it appears, its color, \
                      brightness, etc."
                .to_string(),
            next_step: request.step + 1,
            is_complete: total == 0 || request.step >= total - 1,
        })
    }

    async fn power_assessment(
        &self,
        request: &PowerAssessmentRequest,
    ) -> Result<PowerAssessment, ApiError> {
        self.require_key()?;
        if request.answers.is_empty() {
            return Err(ApiError::InvalidRequest("answers must not be empty".into()));
        }
        self.simulate_latency().await;
        Ok(canned_power_assessment())
    }
}

fn canned_belief_analysis() -> BeliefAnalysis {
    BeliefAnalysis {
        category: "self-worth".to_string(),
        root_cause: "Early childhood experiences of criticism".to_string(),
        impact: "Affects confidence in professional settings and relationships".to_string(),
        recommended_protocols: vec![
            RecommendedProtocol {
                id: "submodality".to_string(),
                name: "Submodality Belief Change".to_string(),
                suitability: 85,
                description: "Change how you represent beliefs in your mind".to_string(),
            },
            RecommendedProtocol {
                id: "timeline".to_string(),
                name: "Timeline Reimprinting".to_string(),
                suitability: 78,
                description: "Address the root causes of limiting beliefs".to_string(),
            },
            RecommendedProtocol {
                id: "walking".to_string(),
                name: "The Walking Belief Change Pattern".to_string(),
                suitability: 72,
                description: "Use physical movement to anchor new beliefs".to_string(),
            },
        ],
    }
}

/// Per-protocol one-line guidance summaries (distinct from the full step
/// instructions in the script catalog).
fn guidance_summaries(protocol_id: &str) -> &'static [&'static str] {
    match protocol_id {
        "submodality" => &[
            "Identify how you represent the limiting belief in your mind",
            "Find a belief you know is not true and notice its submodalities",
            "Create a new empowering belief to replace the limiting one",
            "Change the submodalities of the limiting belief",
            "Install the new belief with powerful submodalities",
            "Test the change and future pace",
        ],
        "timeline" => &[
            "Access your timeline and notice how you represent time",
            "Identify the origin of the limiting belief",
            "Gather resources you have now that you didn't have then",
            "Reimprint the memory with new resources",
            "Create a new empowering belief",
            "Bring the resources forward to the present",
        ],
        "walking" => &[
            "Set up your space for the walking pattern",
            "Identify your current state and limiting belief",
            "Define your desired state and new belief",
            "Walk the line, transforming the belief with each step",
            "Fully embody the new belief at the end point",
            "Anchor the new state and test the change",
        ],
        _ => &[],
    }
}

fn canned_power_assessment() -> PowerAssessment {
    PowerAssessment {
        overall_score: 6.8,
        dimensions: vec![
            PowerDimension {
                id: "self-awareness".to_string(),
                name: "Self-Awareness".to_string(),
                score: 7.5,
                description: "Your ability to recognize your patterns, emotions, and triggers"
                    .to_string(),
            },
            PowerDimension {
                id: "vision".to_string(),
                name: "Vision & Purpose".to_string(),
                score: 6.2,
                description: "Your clarity about your direction and meaningful goals".to_string(),
            },
            PowerDimension {
                id: "communication".to_string(),
                name: "Communication & Influence".to_string(),
                score: 8.1,
                description: "Your ability to express yourself and impact others".to_string(),
            },
            PowerDimension {
                id: "resilience".to_string(),
                name: "Resilience".to_string(),
                score: 5.4,
                description: "Your capacity to bounce back from setbacks".to_string(),
            },
        ],
        recommendations: vec![
            "Focus on developing a clearer vision for your future".to_string(),
            "Practice resilience techniques to strengthen this dimension".to_string(),
            "Continue leveraging your strong communication skills".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::credentials::InMemoryCredentialStore;

    fn client_with_key() -> SimulatedClient {
        SimulatedClient::new(
            Arc::new(InMemoryCredentialStore::with_key("sk-test")),
            Duration::ZERO,
        )
    }

    fn client_without_key() -> SimulatedClient {
        SimulatedClient::new(Arc::new(InMemoryCredentialStore::new()), Duration::ZERO)
    }

    fn analysis_request() -> BeliefAnalysisRequest {
        BeliefAnalysisRequest {
            belief: "I'm not good enough".to_string(),
            intensity: 7,
            context: None,
        }
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling() {
        let client = client_without_key();
        let err = client.analyze_belief(&analysis_request()).await;
        assert!(matches!(err, Err(ApiError::MissingApiKey)));
    }

    #[tokio::test]
    async fn analysis_returns_three_ranked_protocols() {
        let client = client_with_key();
        let analysis = client.analyze_belief(&analysis_request()).await.unwrap();
        assert_eq!(analysis.category, "self-worth");
        assert_eq!(analysis.recommended_protocols.len(), 3);
        // Suitability scores descend in the canned payload
        let scores: Vec<u8> = analysis
            .recommended_protocols
            .iter()
            .map(|p| p.suitability)
            .collect();
        assert_eq!(scores, vec![85, 78, 72]);
        assert!(scores.iter().all(|s| *s <= 100));
    }

    #[tokio::test]
    async fn empty_belief_is_rejected() {
        let client = client_with_key();
        let req = BeliefAnalysisRequest {
            belief: "  ".to_string(),
            intensity: 5,
            context: None,
        };
        assert!(matches!(
            client.analyze_belief(&req).await,
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn guidance_is_complete_only_on_last_step() {
        let client = client_with_key();
        for step in 0..6 {
            let guidance = client
                .protocol_guidance(&ProtocolGuidanceRequest {
                    protocol_id: "timeline".to_string(),
                    step,
                })
                .await
                .unwrap();
            assert_eq!(guidance.next_step, step + 1);
            assert_eq!(guidance.is_complete, step >= 5, "step {step}");
        }
    }

    #[tokio::test]
    async fn guidance_unknown_protocol_degrades() {
        let client = client_with_key();
        let guidance = client
            .protocol_guidance(&ProtocolGuidanceRequest {
                protocol_id: "mystery".to_string(),
                step: 0,
            })
            .await
            .unwrap();
        assert_eq!(guidance.instruction, "Complete the protocol steps");
        assert!(guidance.is_complete);
    }

    #[tokio::test]
    async fn assessment_returns_four_dimensions() {
        let client = client_with_key();
        let req = PowerAssessmentRequest {
            answers: [("self-awareness".to_string(), 7.0)].into_iter().collect(),
        };
        let assessment = client.power_assessment(&req).await.unwrap();
        assert_eq!(assessment.dimensions.len(), 4);
        assert_eq!(assessment.overall_score, 6.8);
        assert_eq!(assessment.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn assessment_requires_answers() {
        let client = client_with_key();
        let req = PowerAssessmentRequest {
            answers: BTreeMap::new(),
        };
        assert!(matches!(
            client.power_assessment(&req).await,
            Err(ApiError::InvalidRequest(_))
        ));
    }
}
