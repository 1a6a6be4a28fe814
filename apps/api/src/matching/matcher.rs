//! Job Matcher: composite job/applicant scoring, similar-job discovery and
//! recommendations.
//!
//! composite score = (compatibility + skill_similarity) / 2
//!
//! Every outbound judge call is awaited in turn. A failing call fails the
//! whole operation; nothing is retried and no partial result is returned.
//! Rankings are stable: equal scores keep their input order.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::matching::judge::{Compatibility, JudgeError, TextJudge};
use crate::matching::parser::parse_job_id;
use crate::matching::similarity::skill_similarity;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("external service error: {0}")]
    ExternalService(#[from] JudgeError),
}

/// A job as seen by the matcher. Built fresh per request from caller data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl Job {
    /// Text the judge and the similarity scorer see for this job.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    fn listing_line(&self) -> String {
        format!(
            "Job ID: {}, Title: {}, Description: {}",
            self.id,
            self.title,
            self.description.split_whitespace().collect::<Vec<_>>().join(" ")
        )
    }
}

/// An applicant as seen by the matcher: an id and a free-text profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i64,
    pub profile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Mean of `compatibility` and `skill_similarity`.
    pub score: f64,
    /// Judge output, not clamped.
    pub compatibility: f64,
    /// 0.0 – 1.0 by construction.
    pub skill_similarity: f64,
    pub reasoning: String,
}

impl MatchResult {
    pub fn new(compatibility: Compatibility, skill_similarity: f64) -> Self {
        Self {
            score: (compatibility.score + skill_similarity) / 2.0,
            compatibility: compatibility.score,
            skill_similarity,
            reasoning: compatibility.reasoning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub job: Job,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Scores jobs against applicants through an injected `TextJudge`.
#[derive(Clone)]
pub struct JobMatcher {
    judge: Arc<dyn TextJudge>,
}

impl JobMatcher {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    /// Scores one job against one applicant.
    ///
    /// Skills are extracted from both texts by the judge and compared with
    /// TF-IDF similarity; compatibility comes from the judge directly.
    pub async fn match_job(
        &self,
        job: &Job,
        applicant: &Applicant,
    ) -> Result<MatchResult, MatchError> {
        let job_text = job.text();

        let job_skills = self.judge.extract_skills(&job_text).await?;
        let applicant_skills = self.judge.extract_skills(&applicant.profile).await?;
        let similarity = skill_similarity(&job_skills.join(", "), &applicant_skills.join(", "));

        let compatibility = self
            .judge
            .score_compatibility(&job_text, &applicant.profile)
            .await?;

        let result = MatchResult::new(compatibility, similarity);
        debug!(
            "Matched job {} / applicant {}: score={:.3} compat={:.3} skills={:.3}",
            job.id, applicant.id, result.score, result.compatibility, result.skill_similarity
        );
        Ok(result)
    }

    /// Finds jobs among `candidates` similar to `target` that suit the applicant.
    ///
    /// The judge proposes candidates as free text. Lines without a usable job
    /// id, ids not in `candidates`, the target itself and repeats are skipped
    /// without error. Every recovered job is re-scored with `match_job`.
    pub async fn find_similar_jobs(
        &self,
        target: &Job,
        applicant: &Applicant,
        candidates: &[Job],
    ) -> Result<Vec<RankedMatch>, MatchError> {
        let others: Vec<&Job> = candidates.iter().filter(|j| j.id != target.id).collect();
        if others.is_empty() {
            return Ok(Vec::new());
        }

        let listing = others
            .iter()
            .map(|j| j.listing_line())
            .collect::<Vec<_>>()
            .join("\n");

        let proposals = self
            .judge
            .propose_similar(&target.text(), &applicant.profile, &listing)
            .await?;

        let mut seen = HashSet::new();
        let mut recovered = Vec::new();
        for line in &proposals {
            let id = match parse_job_id(line) {
                Ok(id) => id,
                Err(err) => {
                    debug!("Skipping similar-job proposal: {err}");
                    continue;
                }
            };
            let Some(job) = others.iter().find(|j| j.id == id) else {
                debug!("Skipping similar-job proposal for unknown job {id}");
                continue;
            };
            if seen.insert(id) {
                recovered.push(*job);
            }
        }

        info!(
            "Similar jobs for job {}: {} proposed, {} recovered",
            target.id,
            proposals.len(),
            recovered.len()
        );

        let mut ranked = Vec::with_capacity(recovered.len());
        for job in recovered {
            let result = self.match_job(job, applicant).await?;
            ranked.push(RankedMatch {
                job: job.clone(),
                result,
            });
        }
        rank(&mut ranked);
        Ok(ranked)
    }

    /// Scores every job for the applicant and returns the best `top_n`.
    pub async fn get_job_recommendations(
        &self,
        applicant: &Applicant,
        jobs: &[Job],
        top_n: usize,
    ) -> Result<Vec<RankedMatch>, MatchError> {
        let mut ranked = Vec::with_capacity(jobs.len());
        for job in jobs {
            let result = self.match_job(job, applicant).await?;
            ranked.push(RankedMatch {
                job: job.clone(),
                result,
            });
        }
        rank(&mut ranked);
        ranked.truncate(top_n);
        Ok(ranked)
    }
}

/// Stable sort, highest composite score first.
pub fn rank(matches: &mut [RankedMatch]) {
    matches.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));
}
