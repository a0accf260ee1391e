use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{mastery_badge, paint, Color};
use crate::OutputFormat;

/// Record an answer for a term. A study event also counts toward today's streak.
pub fn run_study(
    app: &mut App,
    query: &str,
    correct: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let term = app.find_term(query)?;
    let progress = app.stores.progress.update_progress(&term.id, correct);
    let new_day = app.stores.streak.record_study_session();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "progress": progress,
                "currentStreak": app.stores.streak.current_streak(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}: {} {}",
                term.term,
                if correct {
                    paint("correct", Color::GREEN, use_color)
                } else {
                    paint("incorrect", Color::RED, use_color)
                },
                mastery_badge(progress.mastery_level, use_color)
            );
            if new_day {
                println!("Streak: {} days", app.stores.streak.current_streak());
            }
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
pub enum Flag {
    Favorite,
    Bookmark,
}

/// Toggle the favorite or bookmark flag on a term
pub fn run_toggle(app: &mut App, query: &str, flag: Flag, format: &OutputFormat) -> Result<()> {
    let term = app.find_term(query)?;
    let (name, value) = match flag {
        Flag::Favorite => ("favorited", app.stores.progress.toggle_favorite(&term.id)),
        Flag::Bookmark => ("bookmarked", app.stores.progress.toggle_bookmark(&term.id)),
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "termId": term.id, name: value });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let state = if value { name.to_string() } else { format!("no longer {}", name) };
            println!("{} {}", term.term, state);
        }
    }

    Ok(())
}
