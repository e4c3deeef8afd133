use anyhow::Result;
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};

use backpacker_common::TravelOption;
use backpacker_game::{AnswerOutcome, Dashboard, Game, GameState};

const PROGRESS_WIDTH: usize = 20;

/// Drive the game until the player quits.
pub async fn run(game: &mut Game) -> Result<()> {
    let theme = ColorfulTheme::default();
    let term = Term::stdout();

    loop {
        println!();
        if let Some(dashboard) = game.dashboard() {
            print_dashboard(&dashboard);
        }
        print_header(game.state().label());

        let result = match game.state() {
            GameState::SelectStartCity => {
                let mut items: Vec<String> = game
                    .starting_cities()
                    .iter()
                    .map(|city| city.label())
                    .collect();
                items.push("Quit".to_string());

                let choice = Select::with_theme(&theme)
                    .with_prompt("Where does your journey begin?")
                    .items(&items)
                    .default(0)
                    .interact_on(&term)?;
                if choice == items.len() - 1 {
                    return Ok(());
                }
                game.select_city(choice).await
            }

            GameState::LocationQuiz | GameState::JobQuiz => {
                let Some(quiz) = game.current_quiz() else {
                    break;
                };
                let Some(question) = quiz.current_question().cloned() else {
                    break;
                };
                println!("{}", style(quiz.title()).bold());
                println!(
                    "{}",
                    style(format!(
                        "Question {} of {}  Score: {}",
                        quiz.current_index() + 1,
                        quiz.questions().len(),
                        quiz.score()
                    ))
                    .dim()
                );

                let choice = Select::with_theme(&theme)
                    .with_prompt(&question.question)
                    .items(&question.options)
                    .default(0)
                    .interact_on(&term)?;

                let outcome = game.answer(&question.options[choice]).await;
                if let Ok(outcome) = &outcome {
                    print_answer(outcome);
                    if let Some(earnings) = outcome.earnings {
                        println!(
                            "{} You earned ${earnings}.",
                            style("Quiz complete!").green().bold()
                        );
                    }
                }
                outcome.map(|_| ())
            }

            GameState::SelectJob => {
                let items: Vec<String> = game
                    .job_options()
                    .iter()
                    .map(|job| format!("{}: {}", job.title, job.description))
                    .collect();

                let choice = Select::with_theme(&theme)
                    .with_prompt("Pick a job to try out")
                    .items(&items)
                    .default(0)
                    .interact_on(&term)?;
                game.select_job(choice).await
            }

            GameState::TravelPlanning => {
                let money = game.journal().map_or(0, |j| j.current_money());
                let items: Vec<String> = game
                    .travel_options()
                    .iter()
                    .map(|option| format_travel_option(option, money))
                    .collect();

                let choice = Select::with_theme(&theme)
                    .with_prompt("Where to next?")
                    .items(&items)
                    .default(0)
                    .interact_on(&term)?;
                game.select_destination(choice).await
            }

            GameState::GameOver | GameState::Victory => {
                print_final(game);
                let again = Confirm::with_theme(&theme)
                    .with_prompt("Play again?")
                    .default(true)
                    .interact_on(&term)?;
                if !again {
                    return Ok(());
                }
                game.restart().await
            }
        };

        if let Err(e) = result {
            println!("{} {e}", style("!").yellow().bold());
        }
    }

    Ok(())
}

fn print_header(title: &str) {
    println!("{}", style(format!("== {title} ==")).cyan().bold());
}

fn print_dashboard(dashboard: &Dashboard) {
    println!(
        "{}  {}  {}  {}",
        style(format!("${}", dashboard.money)).green().bold(),
        style(&dashboard.location).bold(),
        progress_bar(dashboard.progress_percent),
        style(format!("{:.0}°/360°", dashboard.degrees_travelled.abs())).dim()
    );
}

fn print_answer(outcome: &AnswerOutcome) {
    if outcome.correct {
        println!("{}", style("Correct!").green().bold());
    } else {
        println!(
            "{} The answer was {}.",
            style("Wrong.").red().bold(),
            style(&outcome.correct_answer).bold()
        );
    }
}

fn print_final(game: &Game) {
    let Some(journal) = game.journal() else {
        return;
    };

    if game.state() == GameState::Victory {
        println!(
            "{}",
            style(format!(
                "You made it around the world and back to {}!",
                journal.start_location().city
            ))
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            style("You have run out of money for travel.").red().bold()
        );
    }

    let route: Vec<&str> = journal
        .visited_locations()
        .iter()
        .map(|l| l.city.as_str())
        .collect();
    println!("Route: {}", route.join(" -> "));
    println!(
        "Jobs done: {}  Money left: ${}  Circled: {:.0}%",
        journal.job_history().len(),
        journal.current_money(),
        journal.progress_percent()
    );
}

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

pub fn format_travel_option(option: &TravelOption, money: i64) -> String {
    let line = format!(
        "{:<5} to {}  {:.0} km  ${}",
        option.mode.to_string(),
        option.destination,
        option.distance_km,
        option.cost
    );
    if option.cost > money {
        format!("{line}  (can't afford)")
    } else {
        line
    }
}
