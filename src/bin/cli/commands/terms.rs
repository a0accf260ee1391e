use anyhow::Result;

use medflash_lib::terms::{MasteryLevel, Term};

use crate::app::App;
use crate::render::terminal::{mastery_badge, paint, wrap_lines, Color};
use crate::OutputFormat;

/// List or search terms
pub fn run_list(
    app: &App,
    query: Option<&str>,
    category: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let progress = &app.stores.progress;
    let mut terms = progress.search_terms(query.unwrap_or(""));
    if let Some(category) = category {
        terms.retain(|t| t.category.eq_ignore_ascii_case(category));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = terms
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "term": t,
                        "progress": progress.get_progress(&t.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if terms.is_empty() {
                println!("No terms found.");
                return Ok(());
            }

            let max_len = terms.iter().map(|t| t.term.len()).max().unwrap_or(4).max(4);
            for term in &terms {
                let level = level_of(app, term);
                let star = match progress.get_progress(&term.id) {
                    Some(p) if p.is_favorited => "\u{2605}",
                    _ => " ",
                };
                println!(
                    "{:>4} {} {:<width$} {} {}",
                    term.id,
                    star,
                    term.term,
                    paint(&term.category, Color::DIM, use_color),
                    mastery_badge(level, use_color),
                    width = max_len
                );
            }
            println!("\n{} terms", terms.len());
        }
    }

    Ok(())
}

/// Show one term with its progress
pub fn run_show(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let term = app.find_term(query)?;
    let progress = app.stores.progress.get_progress(&term.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "term": term,
                "progress": progress,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&term.term, Color::BOLD, use_color));
            if let Some(pronunciation) = &term.pronunciation {
                println!("{}", paint(&format!("/{}/", pronunciation), Color::DIM, use_color));
            }
            println!("{}\n", term.category);
            for line in wrap_lines(&term.definition, "", 78) {
                println!("{}", line);
            }
            if let Some(etymology) = &term.etymology {
                println!("\nOrigin: {}", etymology);
            }
            if let Some(example) = &term.example {
                println!("Example: {}", example);
            }

            println!();
            match progress {
                Some(p) => {
                    println!(
                        "{} studied {}x, {} correct, {} incorrect ({:.0}%)",
                        mastery_badge(p.mastery_level, use_color),
                        p.times_studied,
                        p.times_correct,
                        p.times_incorrect,
                        p.accuracy() * 100.0
                    );
                    if let Some(last) = p.last_studied {
                        println!("Last studied {}", last.format("%Y-%m-%d %H:%M UTC"));
                    }
                    let flags: Vec<&str> = [(p.is_favorited, "favorite"), (p.is_bookmarked, "bookmarked")]
                        .iter()
                        .filter(|(on, _)| *on)
                        .map(|(_, name)| *name)
                        .collect();
                    if !flags.is_empty() {
                        println!("{}", flags.join(", "));
                    }
                }
                None => println!("{}", mastery_badge(MasteryLevel::New, use_color)),
            }
        }
    }

    Ok(())
}

/// Print per-level counts for the whole catalog
pub fn run_summary(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summary = app.stores.progress.mastery_summary();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            for level in MasteryLevel::ALL {
                println!("{:<12} {}", mastery_badge(level, use_color), summary.count(level));
            }
            println!("\n{} terms total", summary.total_terms);
        }
    }

    Ok(())
}

fn level_of(app: &App, term: &Term) -> MasteryLevel {
    app.stores
        .progress
        .get_progress(&term.id)
        .map(|p| p.mastery_level)
        .unwrap_or_default()
}
