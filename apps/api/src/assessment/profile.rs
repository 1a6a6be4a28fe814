//! Applicant profile text: the free-text form of an applicant the matcher sees.

use crate::assessment::models::ApplicantAssessments;

/// Builds the profile text from assessments.
///
/// First line: `Technical:<score> <traits...> Communication:<clarity+coherence>`,
/// with 0 for missing scores. The narrative assessments follow, one per line.
pub fn build_profile(assessments: &ApplicantAssessments) -> String {
    let technical_score = assessments.technical.as_ref().map_or(0, |t| t.score);
    let traits = assessments
        .personality
        .as_ref()
        .map(|p| p.traits.join(" "))
        .unwrap_or_default();
    let communication_score = assessments
        .communication
        .as_ref()
        .map_or(0, |c| c.clarity + c.coherence);

    let mut lines = vec![format!(
        "Technical:{technical_score} {traits} Communication:{communication_score}"
    )];

    if let Some(technical) = &assessments.technical {
        lines.push(format!(
            "Technical assessment ({}): {}",
            technical.language, technical.assessment
        ));
    }
    if let Some(personality) = &assessments.personality {
        lines.push(format!("Personality: {}", personality.assessment));
    }
    if let Some(communication) = &assessments.communication {
        lines.push(format!("Communication: {}", communication.assessment));
    }

    lines.join("\n")
}

/// Folds a new assessment run into the stored one. A run without a code
/// submission keeps the previous technical assessment.
pub fn merge_assessments(
    previous: Option<ApplicantAssessments>,
    latest: ApplicantAssessments,
) -> ApplicantAssessments {
    let previous = previous.unwrap_or_default();
    ApplicantAssessments {
        technical: latest.technical.or(previous.technical),
        personality: latest.personality.or(previous.personality),
        communication: latest.communication.or(previous.communication),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::{
        CommunicationAssessment, PersonalityAssessment, TechnicalAssessment,
    };

    fn technical(score: i64) -> TechnicalAssessment {
        TechnicalAssessment {
            language: "python".to_string(),
            score,
            assessment: "Handles edge cases.".to_string(),
        }
    }

    fn full() -> ApplicantAssessments {
        ApplicantAssessments {
            technical: Some(technical(8)),
            personality: Some(PersonalityAssessment {
                traits: vec!["curious".to_string(), "direct".to_string()],
                assessment: "Engaged.".to_string(),
            }),
            communication: Some(CommunicationAssessment {
                clarity: 7,
                coherence: 6,
                assessment: "Clear.".to_string(),
            }),
        }
    }

    #[test]
    fn test_profile_header_line() {
        let profile = build_profile(&full());
        let header = profile.lines().next().unwrap();
        assert_eq!(header, "Technical:8 curious direct Communication:13");
    }

    #[test]
    fn test_profile_includes_narratives() {
        let profile = build_profile(&full());
        assert!(profile.contains("Technical assessment (python): Handles edge cases."));
        assert!(profile.contains("Personality: Engaged."));
        assert!(profile.contains("Communication: Clear."));
    }

    #[test]
    fn test_profile_defaults_when_empty() {
        let profile = build_profile(&ApplicantAssessments::default());
        assert_eq!(profile, "Technical:0  Communication:0");
    }

    #[test]
    fn test_merge_keeps_previous_technical() {
        let latest = ApplicantAssessments {
            technical: None,
            ..full()
        };
        let merged = merge_assessments(Some(full()), latest);
        assert_eq!(merged.technical, Some(technical(8)));
    }

    #[test]
    fn test_merge_prefers_latest_technical() {
        let latest = ApplicantAssessments {
            technical: Some(technical(3)),
            ..full()
        };
        let merged = merge_assessments(Some(full()), latest);
        assert_eq!(merged.technical.unwrap().score, 3);
    }
}
