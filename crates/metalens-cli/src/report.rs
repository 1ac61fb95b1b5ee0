//! Plain-text rendering of a [`MetaReport`]

use std::fmt::Write as FmtWrite;

use metalens_core::score::ScoreStatus;
use metalens_core::{CheckStatus, DiagnosticStatus, Grade, MetaReport, MetadataRecord, Verdict};
use owo_colors::OwoColorize;

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;
const NAME_WIDTH: usize = 28;

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Warn,
    Bad,
    Muted,
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Bad => text.red().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

fn diagnostic_tone(status: DiagnosticStatus) -> Tone {
    match status {
        DiagnosticStatus::Green => Tone::Good,
        DiagnosticStatus::Yellow => Tone::Warn,
        DiagnosticStatus::Red => Tone::Bad,
    }
}

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

/// Render the full report. `source` is the URL or file name shown in the header.
pub fn render_text(report: &MetaReport, source: &str, color: bool) -> String {
    let mut buf = String::new();

    push_section_header(&mut buf, "🔎", &format!("Metadata for {source}"));
    render_tags(&mut buf, &report.tags);

    let _ = writeln!(buf);
    push_section_header(&mut buf, "🩺", "Diagnostics");
    render_diagnostics(&mut buf, report, color);

    let _ = writeln!(buf);
    push_section_header(&mut buf, "📊", "Score");
    render_score(&mut buf, report, color);

    let _ = writeln!(buf);
    push_section_header(&mut buf, "🤖", "AI Readiness");
    render_ai_readiness(&mut buf, report, color);

    buf
}

fn render_tags(buf: &mut String, tags: &MetadataRecord) {
    let og = &tags.open_graph;
    let rows = [
        ("Title", tags.title.as_deref()),
        ("Description", tags.description.as_deref()),
        ("Canonical", tags.canonical.as_deref()),
        ("Robots", tags.robots.as_deref()),
        ("Language", tags.html_lang.as_deref().or(tags.language.as_deref())),
        ("Author", tags.author.as_deref()),
        ("og:title", og.title.as_deref()),
        ("og:description", og.description.as_deref()),
        ("og:image", og.image.as_deref()),
        ("og:url", og.url.as_deref()),
        ("twitter:card", tags.twitter.card.as_deref()),
    ];

    let before = buf.len();
    for (label, value) in rows {
        push_key_value(buf, label, value);
    }
    if !tags.structured_data.is_empty() {
        push_key_value(
            buf,
            "JSON-LD blocks",
            Some(&tags.structured_data.len().to_string()),
        );
    }
    if buf.len() == before {
        let _ = writeln!(buf, "No metadata found");
    }
}

fn render_diagnostics(buf: &mut String, report: &MetaReport, color: bool) {
    for (category, result) in report.diagnostics.categories() {
        let tone = diagnostic_tone(result.status);
        let badge = format!("{:<6}", format!("{:?}", result.status).to_lowercase());
        let _ = writeln!(
            buf,
            "{} {:<width$} {}",
            paint(&badge, tone, color),
            category.label(),
            result.message,
            width = LABEL_WIDTH
        );
        if let Some(suggestion) = &result.suggestion {
            let _ = writeln!(buf, "       ↳ {}", paint(suggestion, Tone::Muted, color));
        }
    }

    let overall = &report.diagnostics.overall;
    let _ = writeln!(
        buf,
        "\nOverall: {}",
        paint(&overall.message, diagnostic_tone(overall.status), color)
    );
}

fn render_score(buf: &mut String, report: &MetaReport, color: bool) {
    let score = &report.score;
    let tone = match score.grade {
        Grade::A | Grade::B => Tone::Good,
        Grade::C | Grade::D => Tone::Warn,
        Grade::F => Tone::Bad,
    };
    let headline = format!("{}/100 (grade {})", score.overall, score.grade);
    let _ = writeln!(
        buf,
        "Score: {}, {} issue(s)\n",
        paint(&headline, tone, color),
        score.total_issues
    );

    for category in &score.categories {
        let tone = match category.status {
            ScoreStatus::Pass => Tone::Good,
            ScoreStatus::Warning => Tone::Warn,
            ScoreStatus::Fail => Tone::Bad,
        };
        let points = format!("{:>3}/{}", category.score, category.max_score);
        let _ = writeln!(
            buf,
            "• {:<width$} : {}  weight {:>2}%",
            category.name,
            paint(&points, tone, color),
            category.weight,
            width = LABEL_WIDTH
        );
    }
}

fn render_ai_readiness(buf: &mut String, report: &MetaReport, color: bool) {
    let ai = &report.ai_readiness;
    let (verdict, tone) = match ai.verdict {
        Verdict::Ready => ("ready", Tone::Good),
        Verdict::Partial => ("partial", Tone::Warn),
        Verdict::NotReady => ("not ready", Tone::Bad),
    };
    let _ = writeln!(buf, "Verdict: {}\n", paint(verdict, tone, color));

    for check in &ai.checks {
        let (icon, tone) = match check.status {
            CheckStatus::Pass => ("✓", Tone::Good),
            CheckStatus::Warn => ("⚠", Tone::Warn),
            CheckStatus::Fail => ("✗", Tone::Bad),
            CheckStatus::Na => ("–", Tone::Muted),
        };
        let _ = writeln!(
            buf,
            "{} {:<width$} {}",
            paint(icon, tone, color),
            check.label,
            check.message,
            width = NAME_WIDTH
        );
        if let Some(suggestion) = &check.suggestion {
            let _ = writeln!(buf, "  ↳ {}", paint(suggestion, Tone::Muted, color));
        }
    }
}
