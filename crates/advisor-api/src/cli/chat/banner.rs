//! Welcome banner display for chat sessions.

use console::style;

use advisor_types::advisor::AdvisorProfile;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(advisor: &AdvisorProfile, model: Option<&str>, endpoint: &str) {
    println!();
    println!("  {} {}", "*", style(&advisor.name).cyan().bold());
    if !advisor.description.is_empty() {
        println!("  {}", style(&advisor.description).dim());
    }
    println!();
    println!(
        "  {}  {}",
        style("Model:").bold(),
        style(model.unwrap_or("service default")).dim()
    );
    println!("  {}  {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, end a line with \\ for a new line, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
