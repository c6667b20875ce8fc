//! Reply rendering for the terminal.
//!
//! A streamed reply is echoed raw through [`LiveReply`], which remembers what
//! it put on screen so a failed reply can be taken back. A finished reply can
//! be rendered as markdown with [`ReplyRenderer`]: prose goes through
//! termimad, fenced code through syntect.

use std::io::Write;
use std::time::Duration;

use console::{Term, style};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

const CODE_THEME: &str = "base16-ocean.dark";

/// A run of reply text between code fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(Vec<&'a str>),
    Code { lang: &'a str, lines: Vec<&'a str> },
}

/// Split markdown into prose and fenced code. An unclosed fence runs to the end.
pub fn segments(markdown: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut prose = Vec::new();
    let mut code: Option<(&str, Vec<&str>)> = None;

    for line in markdown.lines() {
        let fence = line.trim().strip_prefix("```");
        match (code.take(), fence) {
            (None, Some(lang)) => {
                if !prose.is_empty() {
                    out.push(Segment::Prose(std::mem::take(&mut prose)));
                }
                code = Some((lang.trim(), Vec::new()));
            }
            (Some((lang, lines)), Some(_)) => out.push(Segment::Code { lang, lines }),
            (Some((lang, mut lines)), None) => {
                lines.push(line);
                code = Some((lang, lines));
            }
            (None, None) => prose.push(line),
        }
    }

    if let Some((lang, lines)) = code {
        out.push(Segment::Code { lang, lines });
    } else if !prose.is_empty() {
        out.push(Segment::Prose(prose));
    }
    out
}

/// Markdown renderer for finished replies.
pub struct ReplyRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
}

impl Default for ReplyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: ThemeSet::load_defaults().themes.remove(CODE_THEME),
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        for segment in segments(markdown) {
            match segment {
                Segment::Prose(lines) => {
                    output.push_str(&self.skin.term_text(&lines.join("\n")).to_string());
                }
                Segment::Code { lang, lines } => {
                    output.push_str(&self.code_block(lang, &lines));
                    output.push('\n');
                }
            }
        }
        output
    }

    fn code_block(&self, lang: &str, lines: &[&str]) -> String {
        let mut output = format!("  {}\n", style(format!("--- {lang} ---")).dim());

        let Some(theme) = &self.theme else {
            for line in lines {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);
        for line in lines {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            output.push_str(&format!("  {}\x1b[0m\n", as_24_bit_terminal_escaped(&ranges, false)));
        }
        output
    }
}

/// A reply being echoed to stdout as it streams.
pub struct LiveReply {
    shown: String,
}

impl LiveReply {
    /// Print the speaker label and start echoing.
    pub fn start(label: &str) -> Self {
        let shown = format!("  {label} ");
        print!("\n  {} ", style(label).cyan().bold());
        let _ = std::io::stdout().flush();
        Self { shown }
    }

    pub fn push(&mut self, delta: &str) {
        print!("{delta}");
        let _ = std::io::stdout().flush();
        self.shown.push_str(delta);
    }

    /// Take the partial reply off the screen.
    ///
    /// On a terminal the echoed rows are erased. Anywhere else the text is
    /// already written, so it is marked as discarded instead.
    pub fn retract(self) {
        let term = Term::stdout();
        if !term.is_term() {
            println!("\n  {}", style("(partial reply discarded)").dim());
            return;
        }
        let (_, width) = term.size();
        let rows = rows_used(&self.shown, usize::from(width));
        let _ = term.clear_line();
        let _ = term.clear_last_lines(rows.saturating_sub(1));
    }
}

/// Terminal rows `text` occupies when wrapped at `width` columns.
fn rows_used(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| console::measure_text_width(line).div_ceil(width).max(1))
        .sum()
}

/// Print the stats line shown under a reply: `| {chars} chars . {secs}s . {advisor}`.
pub fn print_stats_footer(chars: usize, elapsed: Duration, advisor: &str) {
    let dot = style("\u{00b7}").dim();
    println!(
        "\n  {} {} {dot} {} {dot} {}",
        style("|").dim(),
        style(format!("{chars} chars")).dim(),
        style(format!("{:.1}s", elapsed.as_secs_f64())).dim(),
        style(advisor).dim(),
    );
}
