//! Colors of highlight classes, for plain terminals and for the TUI.
use autodoc_core::{HighlightClass, HighlightSpan};
use crossterm::style::{StyledContent, Stylize};
use ratatui::style::{Color, Modifier, Style};
use std::io::{self, Write};

/// Writes spans with ANSI colors, ending with a newline.
pub fn print_spans(out: &mut impl Write, spans: &[HighlightSpan]) -> io::Result<()> {
    for span in spans {
        write!(out, "{}", styled(span))?;
    }
    if !spans.last().is_some_and(|s| s.text.ends_with('\n')) {
        writeln!(out)?;
    }
    out.flush()
}

fn styled(span: &HighlightSpan) -> StyledContent<&str> {
    let text = span.text.as_str();
    match span.class {
        HighlightClass::Keyword => text.magenta().bold(),
        HighlightClass::Delimiter => text.blue().bold(),
        HighlightClass::Block | HighlightClass::Item => text.cyan(),
        HighlightClass::Argument => text.yellow(),
        HighlightClass::Italic => text.italic(),
        HighlightClass::Bold => text.bold(),
        HighlightClass::Code => text.green(),
        HighlightClass::Reference => text.blue().underlined(),
        HighlightClass::Xml => text.dark_yellow(),
        HighlightClass::Text => text.stylize(),
        HighlightClass::Invalid => text.red().underlined(),
    }
}

/// The TUI equivalent of the terminal colors.
pub fn tui_style(class: HighlightClass) -> Style {
    let style = Style::default();
    match class {
        HighlightClass::Keyword => style.fg(Color::Magenta).add_modifier(Modifier::BOLD),
        HighlightClass::Delimiter => style.fg(Color::Blue).add_modifier(Modifier::BOLD),
        HighlightClass::Block | HighlightClass::Item => style.fg(Color::Cyan),
        HighlightClass::Argument => style.fg(Color::Yellow),
        HighlightClass::Italic => style.add_modifier(Modifier::ITALIC),
        HighlightClass::Bold => style.add_modifier(Modifier::BOLD),
        HighlightClass::Code => style.fg(Color::Green),
        HighlightClass::Reference => style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        HighlightClass::Xml => style.fg(Color::LightYellow),
        HighlightClass::Text => style,
        HighlightClass::Invalid => style.fg(Color::Red).add_modifier(Modifier::UNDERLINED),
    }
}
