//! Terminal and JSON formatting for search results

use crate::index::format::SymbolKind;
use crate::query::MatchRecord;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Label color per symbol kind, following the documentation theme's
/// grouping: scope/type kinds, callables, values, content, filesystem.
fn kind_color(kind: SymbolKind) -> Color {
    match kind {
        SymbolKind::Namespace
        | SymbolKind::Class
        | SymbolKind::Struct
        | SymbolKind::Union
        | SymbolKind::Typedef
        | SymbolKind::Enum => Color::Cyan,
        SymbolKind::Function | SymbolKind::Define => Color::Blue,
        SymbolKind::Variable | SymbolKind::Enumerator => Color::White,
        SymbolKind::Group | SymbolKind::Page => Color::Green,
        SymbolKind::Directory | SymbolKind::File => Color::Yellow,
    }
}

/// Print matches, one per line: kind label, name (alias target if any),
/// deprecation markers, then the URL.
pub fn print_matches(matches: &[MatchRecord], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    for m in matches {
        stdout.set_color(ColorSpec::new().set_fg(Some(kind_color(m.kind))))?;
        write!(stdout, "{:>9} ", m.kind.label())?;
        stdout.reset()?;

        stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(stdout, "{}", m.name)?;
        stdout.reset()?;

        if let Some(alias_of) = &m.alias_of {
            stdout.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(stdout, ": {}", alias_of)?;
            stdout.reset()?;
        }

        if m.deprecated {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(stdout, " [deprecated]")?;
            stdout.reset()?;
        }
        if m.deleted {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(stdout, " [deleted]")?;
            stdout.reset()?;
        }

        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(stdout, "  {}", m.url)?;
        stdout.reset()?;
    }

    Ok(())
}

/// Print matches as a JSON array (for scripting)
pub fn print_matches_json(matches: &[MatchRecord]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), matches)?;
    println!();
    Ok(())
}
