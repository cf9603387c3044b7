//! Human-friendly CLI output formatters.
//!
//! Each `fmt_*` function formats one tool's output for terminal display.
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::error::ToolError;
use crate::tools::{ListDocsOutput, ReadDocOutput, SearchDocsOutput};
use owo_colors::OwoColorize;
use std::io::{self, Write};

// ── search ──────────────────────────────────────────────────────────────────

pub fn fmt_search(w: &mut impl Write, out: &SearchDocsOutput, color: bool) -> io::Result<()> {
    let SearchDocsOutput::Found { hits, .. } = out else {
        return fmt_notice(w, &out.to_string(), color);
    };

    for (i, doc) in hits.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        if color {
            writeln!(w, "{}", doc.path.as_str().bold())?;
        } else {
            writeln!(w, "{}", doc.path)?;
        }

        for m in &doc.matches {
            if color {
                writeln!(w, "  {}{}", format!("{:>5}│ ", m.line).green(), m.text.trim())?;
            } else {
                writeln!(w, "  {:>5}│ {}", m.line, m.text.trim())?;
            }
        }

        if doc.is_truncated() {
            let more = format!("... {} more matching lines", doc.total_matches - doc.matches.len());
            if color {
                writeln!(w, "  {}", more.dimmed())?;
            } else {
                writeln!(w, "  {more}")?;
            }
        }
    }

    Ok(())
}

// ── list ────────────────────────────────────────────────────────────────────

pub fn fmt_list(w: &mut impl Write, out: &ListDocsOutput, color: bool) -> io::Result<()> {
    match out {
        ListDocsOutput::Listed { paths } => {
            for path in paths {
                writeln!(w, "{path}")?;
            }
            Ok(())
        }
        ListDocsOutput::NoDocuments { .. } => fmt_notice(w, &out.to_string(), color),
    }
}

// ── read ────────────────────────────────────────────────────────────────────

pub fn fmt_read(w: &mut impl Write, out: &ReadDocOutput) -> io::Result<()> {
    w.write_all(out.content.as_bytes())?;
    if !out.content.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}

// ── errors ──────────────────────────────────────────────────────────────────

pub fn fmt_error(w: &mut impl Write, err: &ToolError, color: bool) -> io::Result<()> {
    if color {
        writeln!(w, "{}", err.to_string().red())
    } else {
        writeln!(w, "{err}")
    }
}

fn fmt_notice(w: &mut impl Write, text: &str, color: bool) -> io::Result<()> {
    if color {
        writeln!(w, "{}", text.dimmed())
    } else {
        writeln!(w, "{text}")
    }
}
