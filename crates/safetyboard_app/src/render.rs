use std::fmt::Write as _;

use safetyboard_core::{AppViewModel, CardView, Renderer, SliceEmphasis, Status};

/// Which part of the dashboard the last interaction asked to bring into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Top,
    Results,
}

/// Plain-text dashboard for the terminal.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    pub focus: Focus,
}

impl Renderer for TerminalRenderer {
    type Output = String;

    fn render(&mut self, view: &AppViewModel) -> String {
        let mut out = String::new();
        if self.focus == Focus::Top {
            render_header(&mut out, view);
        }
        render_results(&mut out, view);
        out
    }
}

fn render_header(out: &mut String, view: &AppViewModel) {
    out.push_str("== Product Safety Dashboard ==\n");
    let tiles: Vec<String> = [
        Status::Pass,
        Status::NotHealthy,
        Status::Fail,
        Status::Pending,
    ]
    .into_iter()
    .map(|status| {
        format!(
            "{} {} ({:.1}%)",
            status.card_label(),
            view.stats.count(status),
            view.stats.percentage(status)
        )
    })
    .collect();
    let _ = writeln!(out, "Total {} | {}", view.stats.total, tiles.join(" | "));

    if !view.slices.is_empty() {
        let slices: Vec<String> = view
            .slices
            .iter()
            .map(|slice| {
                let marker = match slice.emphasis {
                    SliceEmphasis::Normal => "",
                    SliceEmphasis::Active => "*",
                    SliceEmphasis::Dimmed => "~",
                };
                format!(
                    "{marker}{} {:.0}-{:.0} deg",
                    slice.path.label, slice.path.start_angle, slice.path.end_angle
                )
            })
            .collect();
        let _ = writeln!(out, "Chart: {}", slices.join(", "));
    }
}

fn render_results(out: &mut String, view: &AppViewModel) {
    let _ = writeln!(
        out,
        "Filter: {} | Query: {:?}",
        view.active_filter, view.query
    );
    if let Some(message) = &view.message {
        let _ = writeln!(out, "{message}");
        return;
    }
    let _ = writeln!(out, "-- {} results --", view.cards.len());
    for card in &view.cards {
        render_card(out, card);
    }
}

fn render_card(out: &mut String, card: &CardView) {
    let _ = writeln!(
        out,
        "{:>4}. [{}] {} ({}) - {}",
        card.index + 1,
        card.status_label,
        marked_name(card),
        card.category,
        card.source
    );
    if !card.link.is_empty() {
        let _ = writeln!(out, "      {}: {}", card.action_label, card.link);
    }
}

/// Wraps search matches in `**`.
fn marked_name(card: &CardView) -> String {
    let mut marked = String::with_capacity(card.name.len());
    let mut cursor = 0;
    for range in &card.name_highlights {
        marked.push_str(&card.name[cursor..range.start]);
        marked.push_str("**");
        marked.push_str(&card.name[range.clone()]);
        marked.push_str("**");
        cursor = range.end;
    }
    marked.push_str(&card.name[cursor..]);
    marked
}
