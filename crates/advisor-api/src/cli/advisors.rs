//! `advisor advisors`: list the configured personas.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use advisor_infra::config::config_path;

use crate::state::AppState;

pub fn list_advisors(state: &AppState, json: bool) -> anyhow::Result<()> {
    let advisors = state.config.available_advisors();

    if json {
        println!("{}", serde_json::to_string_pretty(&advisors)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Slug").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Persona").fg(Color::White),
    ]);

    for advisor in &advisors {
        let desc = if advisor.description.chars().count() > 50 {
            let head: String = advisor.description.chars().take(47).collect();
            format!("{head}...")
        } else {
            advisor.description.clone()
        };
        let persona = if advisor.system_prompt.is_some() {
            Cell::new("custom").fg(Color::Green)
        } else {
            Cell::new("default").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            Cell::new(&advisor.name).fg(Color::Cyan),
            Cell::new(&advisor.slug).fg(Color::White),
            Cell::new(desc),
            persona,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} advisor{}  {}",
        style(advisors.len()).bold(),
        if advisors.len() == 1 { "" } else { "s" },
        style(format!("(from {})", config_path(&state.data_dir).display())).dim()
    );
    println!();

    Ok(())
}
