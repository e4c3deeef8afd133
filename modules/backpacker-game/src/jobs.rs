use std::sync::Arc;

use ai_client::AiError;
use futures::future::join_all;
use tracing::{debug, info};

use backpacker_common::{Job, Location};

use crate::rules::{JOBS_PER_ATTEMPT, MAX_JOB_ATTEMPTS, TARGET_JOB_COUNT};
use crate::traits::{ContentGenerator, Encyclopedia};

/// Finds jobs whose search term resolves to a real encyclopedia article.
pub struct JobFinder {
    generator: Arc<dyn ContentGenerator>,
    encyclopedia: Arc<dyn Encyclopedia>,
}

impl JobFinder {
    pub fn new(generator: Arc<dyn ContentGenerator>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            generator,
            encyclopedia,
        }
    }

    /// Up to [`TARGET_JOB_COUNT`] validated jobs with distinct titles.
    ///
    /// Each attempt generates a fresh batch and checks every candidate
    /// concurrently. Stops once enough jobs are found or after
    /// [`MAX_JOB_ATTEMPTS`] attempts, whichever comes first. A generation
    /// error aborts the search.
    pub async fn find_jobs(&self, location: &Location) -> Result<Vec<Job>, AiError> {
        let mut valid: Vec<Job> = Vec::new();
        let mut attempts = 0;

        while valid.len() < TARGET_JOB_COUNT && attempts < MAX_JOB_ATTEMPTS {
            attempts += 1;

            let candidates = self.generator.jobs(location, JOBS_PER_ATTEMPT).await?;
            let checks = candidates
                .into_iter()
                .take(JOBS_PER_ATTEMPT)
                .map(|job| async move {
                    let text = self
                        .encyclopedia
                        .article_text(&job.wikipedia_search_term)
                        .await;
                    (job, !text.is_empty())
                });

            for (job, has_article) in join_all(checks).await {
                if !has_article {
                    debug!(title = %job.title, term = %job.wikipedia_search_term, "Job rejected: no article");
                    continue;
                }
                if valid.len() >= TARGET_JOB_COUNT {
                    break;
                }
                if valid.iter().any(|existing| existing.title == job.title) {
                    continue;
                }
                valid.push(job);
            }

            debug!(location = %location, attempt = attempts, valid = valid.len(), "Job search attempt finished");
        }

        info!(location = %location, attempts, jobs = valid.len(), "Job search complete");
        Ok(valid)
    }
}
