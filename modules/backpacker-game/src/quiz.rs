use std::collections::HashSet;
use std::sync::Arc;

use ai_client::AiError;
use tracing::{debug, info};

use backpacker_common::{Job, Location, QuestionDraft, QuizQuestion};

use crate::rules::{QUIZ_QUESTION_COUNT, REWARD_PER_CORRECT_ANSWER};
use crate::traits::{ContentGenerator, Encyclopedia};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Keep only well-formed questions, in order. Nothing is repaired.
///
/// A question survives when its text is non-blank, it has at least two
/// distinct options, and its answer is one of them.
pub fn validate_questions(drafts: Vec<QuestionDraft>) -> Vec<QuizQuestion> {
    let total = drafts.len();
    let valid: Vec<QuizQuestion> = drafts.into_iter().filter_map(validate).collect();
    if valid.len() < total {
        debug!(dropped = total - valid.len(), kept = valid.len(), "Dropped malformed quiz questions");
    }
    valid
}

fn validate(draft: QuestionDraft) -> Option<QuizQuestion> {
    let question = draft.question.filter(|q| !q.trim().is_empty())?;
    let options = draft.options.filter(|o| o.len() > 1)?;
    let answer = draft.answer.filter(|a| !a.is_empty())?;

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() || !distinct.contains(answer.as_str()) {
        return None;
    }

    Some(QuizQuestion {
        question,
        options,
        answer,
    })
}

// ---------------------------------------------------------------------------
// Quiz session
// ---------------------------------------------------------------------------

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    /// True when that was the last question.
    pub finished: bool,
    /// Money earned by the whole quiz, set on the last answer.
    pub earnings: Option<i64>,
}

/// An in-progress quiz. Questions are answered strictly in order.
#[derive(Debug, Clone)]
pub struct Quiz {
    title: String,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: u32,
    finished: bool,
}

impl Quiz {
    pub fn new(title: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            title: title.into(),
            finished: questions.is_empty(),
            questions,
            current_index: 0,
            score: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn earnings(&self) -> i64 {
        i64::from(self.score) * REWARD_PER_CORRECT_ANSWER
    }

    /// Score `answer` against the current question and advance.
    ///
    /// Returns `None` once the quiz is finished.
    pub fn answer(&mut self, answer: &str) -> Option<AnswerOutcome> {
        let question = self.current_question()?;
        let correct = question.is_correct(answer);
        let correct_answer = question.answer.clone();

        if correct {
            self.score += 1;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.finished = true;
        }

        Some(AnswerOutcome {
            correct,
            correct_answer,
            finished: self.finished,
            earnings: self.finished.then(|| self.earnings()),
        })
    }
}

// ---------------------------------------------------------------------------
// QuizGenerator
// ---------------------------------------------------------------------------

/// Builds quizzes grounded in encyclopedia articles.
pub struct QuizGenerator {
    generator: Arc<dyn ContentGenerator>,
    encyclopedia: Arc<dyn Encyclopedia>,
}

impl QuizGenerator {
    pub fn new(generator: Arc<dyn ContentGenerator>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            generator,
            encyclopedia,
        }
    }

    /// Questions about a city, looked up as "City, Country".
    pub async fn location_quiz(&self, location: &Location) -> Result<Vec<QuizQuestion>, AiError> {
        let topic = location.label();
        let context = self.encyclopedia.article_text(&topic).await;
        self.generate(&context, &topic).await
    }

    /// Questions about a job, grounded in the article for its search term.
    pub async fn job_quiz(&self, job: &Job) -> Result<Vec<QuizQuestion>, AiError> {
        let context = self
            .encyclopedia
            .article_text(&job.wikipedia_search_term)
            .await;
        self.generate(&context, &job.title).await
    }

    /// No article means no quiz; the model is not asked to improvise.
    async fn generate(&self, context: &str, topic: &str) -> Result<Vec<QuizQuestion>, AiError> {
        if context.is_empty() {
            info!(topic, "No article to ground a quiz on");
            return Ok(Vec::new());
        }

        let drafts = self
            .generator
            .quiz_questions(context, topic, QUIZ_QUESTION_COUNT)
            .await?;
        let questions = validate_questions(drafts);
        info!(topic, questions = questions.len(), "Quiz generated");
        Ok(questions)
    }
}
