use std::sync::Arc;

use tracing::{debug, info, warn};

use backpacker_common::{Job, Location, TravelOption};

use crate::error::GameError;
use crate::jobs::JobFinder;
use crate::journal::Journal;
use crate::map::{MapOverlay, ARRIVAL_ZOOM, CITY_ZOOM};
use crate::quiz::{AnswerOutcome, Quiz, QuizGenerator};
use crate::rules::{starting_cities, PITY_PAYMENT, STARTING_MONEY};
use crate::state::{GameState, PlayerAction};
use crate::traits::{ContentGenerator, Encyclopedia, NoopProgress, ProgressSink};
use crate::travel::TravelPlanner;

/// Summary shown above every screen once a journey has started.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub money: i64,
    pub location: String,
    pub degrees_travelled: f64,
    pub progress_percent: f64,
    pub status: &'static str,
}

/// One play session.
///
/// Player actions are only accepted in the state they belong to and leave
/// the session untouched when rejected. Every action that moves the game
/// forward settles into a state that waits for the player (or a final
/// state) before returning.
pub struct Game {
    state: GameState,
    journal: Option<Journal>,
    current_quiz: Option<Quiz>,
    selected_job: Option<Job>,
    job_options: Vec<Job>,
    travel_options: Vec<TravelOption>,
    map: MapOverlay,
    cities: Vec<Location>,
    starting_money: i64,

    travel: TravelPlanner,
    jobs: JobFinder,
    quizzes: QuizGenerator,
    progress: Arc<dyn ProgressSink>,
}

impl Game {
    pub fn new(generator: Arc<dyn ContentGenerator>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            state: GameState::SelectStartCity,
            journal: None,
            current_quiz: None,
            selected_job: None,
            job_options: Vec::new(),
            travel_options: Vec::new(),
            map: MapOverlay::default(),
            cities: starting_cities(),
            starting_money: STARTING_MONEY,
            travel: TravelPlanner::new(generator.clone()),
            jobs: JobFinder::new(generator.clone(), encyclopedia.clone()),
            quizzes: QuizGenerator::new(generator, encyclopedia),
            progress: Arc::new(NoopProgress),
        }
    }

    pub fn with_starting_money(mut self, money: i64) -> Self {
        self.starting_money = money;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    pub fn current_quiz(&self) -> Option<&Quiz> {
        self.current_quiz.as_ref()
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.selected_job.as_ref()
    }

    pub fn job_options(&self) -> &[Job] {
        &self.job_options
    }

    pub fn travel_options(&self) -> &[TravelOption] {
        &self.travel_options
    }

    pub fn map(&self) -> &MapOverlay {
        &self.map
    }

    pub fn starting_cities(&self) -> &[Location] {
        &self.cities
    }

    pub fn dashboard(&self) -> Option<Dashboard> {
        let journal = self.journal.as_ref()?;
        Some(Dashboard {
            money: journal.current_money(),
            location: journal.current_location().label(),
            degrees_travelled: journal.total_longitude_change(),
            progress_percent: journal.progress_percent(),
            status: self.state.label(),
        })
    }

    // =========================================================================
    // Player actions
    // =========================================================================

    /// Dispatch a player action. Answers report their outcome.
    pub async fn handle(&mut self, action: PlayerAction) -> Result<Option<AnswerOutcome>, GameError> {
        match action {
            PlayerAction::SelectCity(index) => self.select_city(index).await.map(|_| None),
            PlayerAction::AnswerQuiz(answer) => self.answer(&answer).await.map(Some),
            PlayerAction::SelectJob(index) => self.select_job(index).await.map(|_| None),
            PlayerAction::SelectDestination(index) => {
                self.select_destination(index).await.map(|_| None)
            }
            PlayerAction::Restart => self.restart().await.map(|_| None),
        }
    }

    pub async fn select_city(&mut self, index: usize) -> Result<(), GameError> {
        self.expect_state(GameState::SelectStartCity)?;
        let start = self
            .cities
            .get(index)
            .cloned()
            .ok_or_else(|| GameError::invalid(self.state, format!("no starting city #{index}")))?;

        info!(city = %start, money = self.starting_money, "Journey started");

        self.journal = Some(Journal::new(self.starting_money, start.clone()));
        self.map.add_marker(start.clone());
        self.map.fly_to(&start, CITY_ZOOM);

        self.transition(GameState::LocationQuiz).await;
        Ok(())
    }

    /// Answer the current quiz question. Finishing the quiz pays out and
    /// moves on: a city quiz leads to the job board, a job trial to travel.
    pub async fn answer(&mut self, answer: &str) -> Result<AnswerOutcome, GameError> {
        let state = self.state;
        if !state.is_quiz() {
            return Err(GameError::invalid(state, "no quiz in progress"));
        }
        let quiz = self
            .current_quiz
            .as_mut()
            .ok_or_else(|| GameError::invalid(state, "no quiz in progress"))?;
        let outcome = quiz
            .answer(answer)
            .ok_or_else(|| GameError::invalid(state, "quiz already finished"))?;

        debug!(quiz = %quiz.title(), correct = outcome.correct, "Question answered");

        let Some(earnings) = outcome.earnings else {
            return Ok(outcome);
        };
        let score = quiz.score();
        self.current_quiz = None;

        let journal = self.journal.as_mut().ok_or(GameError::NoJourney)?;
        journal.update_money(earnings);
        info!(state = %state, score, earnings, money = journal.current_money(), "Quiz finished");

        let next = if state == GameState::JobQuiz {
            if let Some(job) = self.selected_job.clone() {
                journal.record_job(job, earnings);
            }
            GameState::TravelPlanning
        } else {
            GameState::SelectJob
        };

        self.transition(next).await;
        Ok(outcome)
    }

    pub async fn select_job(&mut self, index: usize) -> Result<(), GameError> {
        self.expect_state(GameState::SelectJob)?;
        let job = self
            .job_options
            .get(index)
            .cloned()
            .ok_or_else(|| GameError::invalid(self.state, format!("no job #{index}")))?;

        info!(title = %job.title, "Job selected");
        self.selected_job = Some(job);

        self.transition(GameState::JobQuiz).await;
        Ok(())
    }

    /// Buy a ticket and travel. Checks for victory before bankruptcy.
    pub async fn select_destination(&mut self, index: usize) -> Result<(), GameError> {
        let state = self.state;
        self.expect_state(GameState::TravelPlanning)?;
        let option = self
            .travel_options
            .get(index)
            .cloned()
            .ok_or_else(|| GameError::invalid(state, format!("no destination #{index}")))?;

        let journal = self.journal.as_mut().ok_or(GameError::NoJourney)?;
        if !journal.can_afford(option.cost) {
            return Err(GameError::invalid(
                state,
                format!(
                    "cannot afford {} ({} needed, {} available)",
                    option.destination,
                    option.cost,
                    journal.current_money()
                ),
            ));
        }

        let from = journal.current_location().clone();
        let to = option.destination;

        journal.update_money(-option.cost);
        journal.update_location(to.clone(), &from);

        self.map.draw_path(from.clone(), to.clone());
        self.map.add_marker(to.clone());
        self.map.fly_to(&to, ARRIVAL_ZOOM);

        info!(
            from = %from,
            to = %to,
            mode = %option.mode,
            cost = option.cost,
            money = journal.current_money(),
            degrees = journal.total_longitude_change(),
            "Travelled"
        );

        let next = if journal.has_won() {
            GameState::Victory
        } else if journal.current_money() <= 0 {
            GameState::GameOver
        } else {
            GameState::LocationQuiz
        };

        self.transition(next).await;
        Ok(())
    }

    /// Abandon the current journey and return to city selection.
    pub async fn restart(&mut self) -> Result<(), GameError> {
        info!(from = %self.state, "Game restarted");

        self.journal = None;
        self.current_quiz = None;
        self.selected_job = None;
        self.job_options.clear();
        self.travel_options.clear();
        self.map.reset();

        self.transition(GameState::SelectStartCity).await;
        Ok(())
    }

    fn expect_state(&self, expected: GameState) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::invalid(
                self.state,
                format!("only allowed during {expected}"),
            ))
        }
    }

    // =========================================================================
    // State machine
    // =========================================================================

    /// Enter `target` and keep following automatic transitions until the
    /// game rests in a state that waits for the player.
    async fn transition(&mut self, target: GameState) {
        let mut next = Some(target);

        while let Some(state) = next {
            self.state = state;
            debug!(state = %state, "Entering state");

            next = match self.enter(state).await {
                Ok(follow_up) => follow_up,
                Err(e) => {
                    let fallback = state.fallback();
                    warn!(state = %state, fallback = %fallback, error = %e, "Error during state transition");
                    Some(fallback)
                }
            };
        }

        self.progress.done();
    }

    /// Prepare `state`. Returns the state to move on to, if any.
    async fn enter(&mut self, state: GameState) -> Result<Option<GameState>, GameError> {
        match state {
            GameState::LocationQuiz => {
                let location = self.current_location()?;
                self.progress
                    .loading(&format!("Generating quiz for {}...", location.city));

                let questions = self.quizzes.location_quiz(&location).await?;
                if questions.is_empty() {
                    info!(city = %location, "No usable city quiz, skipping to jobs");
                    return Ok(Some(GameState::SelectJob));
                }

                self.current_quiz = Some(Quiz::new(format!("Welcome to {}!", location.city), questions));
                Ok(None)
            }

            GameState::SelectJob => {
                let location = self.current_location()?;
                self.progress
                    .loading(&format!("Finding jobs in {}...", location.city));

                self.selected_job = None;
                self.job_options = self.jobs.find_jobs(&location).await?;
                if self.job_options.is_empty() {
                    info!(city = %location, "No jobs found, skipping to travel");
                    return Ok(Some(GameState::TravelPlanning));
                }
                Ok(None)
            }

            GameState::JobQuiz => {
                let job = self.selected_job.clone().ok_or(GameError::NoJobSelected)?;
                self.progress
                    .loading(&format!("Preparing your job trial for {}...", job.title));

                let questions = self.quizzes.job_quiz(&job).await?;
                if questions.is_empty() {
                    let journal = self.journal.as_mut().ok_or(GameError::NoJourney)?;
                    journal.update_money(PITY_PAYMENT);
                    journal.record_job(job.clone(), PITY_PAYMENT);
                    info!(title = %job.title, paid = PITY_PAYMENT, "No usable job trial, paying pity money");
                    return Ok(Some(GameState::TravelPlanning));
                }

                self.current_quiz = Some(Quiz::new(format!("Job Trial: {}", job.title), questions));
                Ok(None)
            }

            GameState::TravelPlanning => {
                let location = self.current_location()?;
                self.progress
                    .loading("Finding routes to your next destination...");

                self.travel_options = self.travel.travel_options(&location).await?;

                let money = self.journal.as_ref().map_or(0, Journal::current_money);
                if !self.travel_options.iter().any(|o| o.cost <= money) {
                    info!(money, options = self.travel_options.len(), "No affordable destination");
                    return Ok(Some(GameState::GameOver));
                }
                Ok(None)
            }

            GameState::SelectStartCity | GameState::GameOver | GameState::Victory => Ok(None),
        }
    }

    fn current_location(&self) -> Result<Location, GameError> {
        self.journal
            .as_ref()
            .map(|j| j.current_location().clone())
            .ok_or(GameError::NoJourney)
    }
}
