use leaderboard::{DisplayRow, Layout, Page, RankLabel, StarState};

// Standard HTML shell loading the AoC stylesheet, same markup the site's
// private board uses so its CSS classes apply unchanged.
const HTML_HEADER: &str = r#"<html style="width: 100%; height: 100%; margin: 0px; padding: 0px; overflow-x: hidden;"><head><link href="//fonts.googleapis.com/css?family=Source+Code+Pro:300&amp;subset=latin,latin-ext" rel="stylesheet" type="text/css"><link href="https://adventofcode.com/static/style.css?30" rel="stylesheet" type="text/css"></head><body style="width: 100%; height: 100%; margin: 0px; padding: 0px; overflow-x: hidden;"><main><article><table><thead></thead><tbody>"#;
const HTML_FOOTER: &str = "</tbody></table></article></main></body></html>";

/// Renders every page of a layout to a self-contained HTML document.
pub fn render_pages(layout: &Layout, year: i32) -> Vec<String> {
    layout
        .pages
        .iter()
        .map(|page| render_page(page, layout.total_rows, year))
        .collect()
}

fn render_page(page: &Page, total_rows: usize, year: i32) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(HTML_HEADER);
    html.push_str(&day_header(year));
    for row in &page.rows {
        html.push_str(&render_row(row, total_rows));
    }
    html.push_str(HTML_FOOTER);
    html
}

/// 25-column header row linking each day's puzzle, two-digit days stacked
/// over two lines like the site does. The trailing invisible cell anchors
/// the width of the name column.
fn day_header(year: i32) -> String {
    let mut cells = String::new();
    for day in 1..=25 {
        let label = if day < 10 {
            format!("<br>{day}")
        } else {
            format!("{} <br> {}", day / 10, day % 10)
        };
        cells.push_str(&format!(
            r#" <td><a href="https://adventofcode.com/{year}/day/{day}">{label}</a></td>"#
        ));
    }
    format!(
        r#"<tr><div class="privboard-row"><td/><td/><span class="privboard-days">{cells}<td style="color: #0f0f23">anonymous user #1111111</td></tr>"#
    )
}

fn render_row(row: &DisplayRow, total_rows: usize) -> String {
    let position = match row.rank {
        RankLabel::Position(n) => format!("{n})"),
        // Invisible but as wide as the largest rank, so the column lines up.
        RankLabel::Hidden => {
            format!(r#"<span style="color: #0f0f23">{total_rows}) </span>"#)
        }
    };

    let mut star_cells = String::new();
    for state in &row.stars {
        let class = match state {
            StarState::Locked => "privboard-star-unlocked",
            StarState::FirstOnly => "privboard-star-firstonly",
            StarState::Both => "privboard-star-both",
        };
        star_cells.push_str(&format!(r#"<td><span class="{class}">*</span></td>"#));
    }

    let name = escape_html(&display_name(row));

    format!(
        r#"<tr><div class="privboard-row"><td><span class="privboard-position">{position}</span> </td><td style="text-align: right">{score}</td>{star_cells} <td><span class="privboard-name">{name}</span></td></div></tr>"#,
        score = row.score_text
    )
}

fn display_name(row: &DisplayRow) -> String {
    match &row.name {
        Some(name) => name.clone(),
        None => format!("anonymous user #{}", row.member_id),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
