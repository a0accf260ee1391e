use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, week_strip, Color};
use crate::OutputFormat;

/// Show the streak, optionally recording today's session first
pub fn run(app: &mut App, record: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let streak = &mut app.stores.streak;
    let recorded = record && streak.record_study_session();

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(streak.snapshot())?;
            output["studiedToday"] = serde_json::Value::Bool(streak.has_studied_today());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if record {
                if recorded {
                    println!("Recorded today's session.");
                } else {
                    println!("Today was already recorded.");
                }
            }

            let current = format!("{} days", streak.current_streak());
            println!("Current streak: {}", paint(&current, Color::BOLD, use_color));
            println!("Longest streak: {} days", streak.longest_streak());
            println!("This week:      {}", week_strip(&streak.week_progress(), use_color));
            if !streak.has_studied_today() {
                println!("{}", paint("Not studied yet today", Color::YELLOW, use_color));
            }
        }
    }

    Ok(())
}
