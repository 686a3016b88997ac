//! Static HTML snapshot of the dashboard: stat tiles, the SVG donut and the
//! result cards for the current filter.

use std::fmt::Write as _;

use safetyboard_core::{
    AppViewModel, CardView, ChartGeometry, Renderer, SliceEmphasis, SliceView, Status,
};

const STYLE: &str = "\
body{background:#0b0f14;color:#e6edf3;font-family:system-ui,sans-serif;margin:0;padding:24px}\
h1{font-weight:600}\
.stats{display:flex;gap:16px;flex-wrap:wrap}\
.stat{background:#131a22;border-radius:8px;padding:12px 16px;min-width:120px}\
.stat strong{display:block;font-size:1.6em}\
.chart{position:relative;width:220px;height:220px;margin:24px 0}\
.chart-center{position:absolute;inset:0;display:flex;flex-direction:column;align-items:center;justify-content:center}\
.results{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px}\
.product-card{background:#131a22;border-radius:8px;padding:16px;border-left:4px solid #444}\
.status-pass{border-color:#00ffa3}.status-fail{border-color:#ff4d4d}\
.status-pending{border-color:#00d2ff}.status-not-healthy{border-color:#ffb700}\
.card-category{font-size:.8em;text-transform:uppercase;opacity:.7}\
.highlight{background:#ffb70055}\
.view-btn{color:#00d2ff}\
.loading-state{opacity:.8;padding:32px}";

/// Renders a self-contained HTML page.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub title: String,
    pub geometry: ChartGeometry,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            title: "Product Safety Dashboard".to_string(),
            geometry: ChartGeometry::default(),
        }
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&mut self, view: &AppViewModel) -> String {
        let mut html = String::new();
        let title = escape_html(&self.title);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
        );
        let _ = writeln!(
            html,
            "<p class=\"filter\">Filter: {} &middot; Query: {}</p>",
            escape_html(&view.active_filter.to_string()),
            escape_html(&view.query)
        );

        render_stats(&mut html, view);
        self.render_chart(&mut html, view);

        html.push_str("<section class=\"results\" id=\"resultsGrid\">\n");
        match &view.message {
            Some(message) => {
                let _ = writeln!(
                    html,
                    "<div class=\"loading-state\">{}</div>",
                    escape_html(message)
                );
            }
            None => {
                for card in &view.cards {
                    render_card(&mut html, card);
                }
            }
        }
        html.push_str("</section>\n</body>\n</html>\n");
        html
    }
}

impl HtmlRenderer {
    fn render_chart(&self, html: &mut String, view: &AppViewModel) {
        let size = self.geometry.view_box_size();
        let _ = writeln!(
            html,
            "<div class=\"chart\" id=\"statsChart\">\n<svg viewBox=\"0 0 {size} {size}\" \
             width=\"100%\" height=\"100%\">\n<g transform=\"rotate(-90 {} {})\">",
            self.geometry.center_x, self.geometry.center_y
        );
        for slice in &view.slices {
            render_slice(html, slice);
        }
        let _ = writeln!(
            html,
            "</g>\n</svg>\n<div class=\"chart-center\"><span id=\"totalProducts\">{}</span>\
             <small>Total</small></div>\n</div>",
            view.stats.total
        );
    }
}

fn render_stats(html: &mut String, view: &AppViewModel) {
    html.push_str("<section class=\"stats\">\n");
    for status in [
        Status::Pass,
        Status::NotHealthy,
        Status::Fail,
        Status::Pending,
    ] {
        let _ = writeln!(
            html,
            "<div class=\"stat {}\"><strong>{}</strong>{} ({:.1}%)</div>",
            status.css_class(),
            view.stats.count(status),
            status.card_label(),
            view.stats.percentage(status)
        );
    }
    html.push_str("</section>\n");
}

fn render_slice(html: &mut String, slice: &SliceView) {
    let (opacity, extra_class) = match slice.emphasis {
        SliceEmphasis::Normal => ("1", ""),
        SliceEmphasis::Active => ("1", " active"),
        SliceEmphasis::Dimmed => ("0.3", ""),
    };
    let _ = writeln!(
        html,
        "<path class=\"pie-segment{extra_class}\" data-status=\"{}\" d=\"{}\" fill=\"{}\" \
         opacity=\"{opacity}\"><title>{}</title></path>",
        slice.path.status,
        slice.path.to_svg_path(),
        escape_html(&slice.path.color),
        escape_html(&slice.path.label)
    );
}

fn render_card(html: &mut String, card: &CardView) {
    let _ = writeln!(
        html,
        "<div class=\"product-card {}\" style=\"animation-delay: {}ms\">\n\
         <div class=\"card-header\"><span class=\"card-category\">{}</span></div>\n\
         <h3 class=\"card-title\">{}</h3>\n\
         <div class=\"status-indicator\"><span class=\"status-dot\"></span> {}</div>\n\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"view-btn\">{}</a>\n</div>",
        card.css_class,
        card.animation_delay_ms,
        escape_html(&card.category),
        highlighted_name(card),
        card.status_label,
        escape_html(&card.link),
        card.action_label
    );
}

/// Card name with search matches wrapped in `<span class="highlight">`.
fn highlighted_name(card: &CardView) -> String {
    let mut out = String::new();
    let mut cursor = 0;
    for range in &card.name_highlights {
        out.push_str(&escape_html(&card.name[cursor..range.start]));
        out.push_str("<span class=\"highlight\">");
        out.push_str(&escape_html(&card.name[range.clone()]));
        out.push_str("</span>");
        cursor = range.end;
    }
    out.push_str(&escape_html(&card.name[cursor..]));
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
