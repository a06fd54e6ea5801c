use crate::models::{ChartPoint, WeekBucket, WeightSample};
use crate::window::TimeWindow;
use chrono::NaiveDate;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;
const CHART_PAD: f64 = 24.0;

pub fn render_index(
    today: NaiveDate,
    window: TimeWindow,
    buckets: &[WeekBucket],
    points: &[ChartPoint],
    recent: &[WeightSample],
) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{WINDOWS}}", &render_window_links(window))
        .replace("{{CHART}}", &render_chart(points))
        .replace("{{WEEKS}}", &render_weeks(buckets))
        .replace("{{RECENT}}", &render_recent(recent))
}

fn render_window_links(active: TimeWindow) -> String {
    [
        (TimeWindow::Month, "Last Month"),
        (TimeWindow::Quarter, "Last 3 Months"),
        (TimeWindow::Year, "Last Year"),
        (TimeWindow::All, "All Time"),
    ]
    .iter()
    .map(|(window, label)| {
        let class = if *window == active { "tab active" } else { "tab" };
        format!(r#"<a class="{class}" href="/?window={window}">{label}</a>"#)
    })
    .collect::<Vec<_>>()
    .join("")
}

/// Line chart as inline SVG. The y axis spans one kilogram beyond the data on each side.
pub fn render_chart(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return r#"<p class="empty">No weekly weight data available.</p>"#.to_string();
    }

    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min) - 1.0;
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max) + 1.0;
    let span_x = CHART_WIDTH - 2.0 * CHART_PAD;
    let span_y = CHART_HEIGHT - 2.0 * CHART_PAD;
    let step = if points.len() > 1 {
        span_x / (points.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if points.len() > 1 {
                CHART_PAD + step * i as f64
            } else {
                CHART_WIDTH / 2.0
            };
            let y = CHART_PAD + (max - point.value) / (max - min) * span_y;
            (x, y)
        })
        .collect();

    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let dots = coords
        .iter()
        .zip(points)
        .map(|((x, y), point)| {
            format!(
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="4"><title>{}: {:.1} kg</title></circle>"#,
                escape_html(&point.label),
                point.value
            )
        })
        .collect::<String>();

    format!(
        r##"<svg viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img" aria-label="Weekly average weight"><polyline fill="none" stroke="#8884d8" stroke-width="2" points="{polyline}"/>{dots}</svg>"##
    )
}

fn render_weeks(buckets: &[WeekBucket]) -> String {
    if buckets.is_empty() {
        return r#"<tr><td colspan="3" class="empty">No weeks in this range.</td></tr>"#.to_string();
    }
    buckets
        .iter()
        .rev()
        .map(|bucket| {
            format!(
                "<tr><td>{} - {}</td><td>{:.1} kg</td><td>{}</td></tr>",
                bucket.week_start, bucket.week_end, bucket.average, bucket.sample_count
            )
        })
        .collect()
}

fn render_recent(recent: &[WeightSample]) -> String {
    if recent.is_empty() {
        return r#"<p class="empty">No weight entries yet.</p>"#.to_string();
    }
    recent
        .iter()
        .map(|sample| {
            let notes = sample
                .notes
                .as_deref()
                .map(|notes| format!(r#"<p class="notes">{}</p>"#, escape_html(notes)))
                .unwrap_or_default();
            format!(
                r#"<div class="entry"><span>{}</span><strong>{} kg</strong>{notes}</div>"#,
                sample.date, sample.weight
            )
        })
        .collect()
}

fn escape_html(text: &str) -> String {
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

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weight Tracking</title>
  <style>
    body {
      margin: 0;
      background: #f4f6f8;
      color: #2b2a28;
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 24px;
    }

    .panel {
      background: white;
      border-radius: 16px;
      padding: 24px;
      box-shadow: 0 12px 32px rgba(47, 72, 88, 0.12);
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      margin-bottom: 16px;
    }

    .tab {
      padding: 6px 12px;
      border-radius: 999px;
      text-decoration: none;
      color: #6b645d;
    }

    .tab.active {
      background: #2f4858;
      color: white;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td {
      padding: 6px 0;
      border-bottom: 1px solid #eee;
    }

    .entry {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      padding: 10px 0;
      border-bottom: 1px solid #eee;
    }

    .notes {
      width: 100%;
      margin: 4px 0 0;
      color: #8b857d;
      font-size: 0.9rem;
    }

    .empty {
      color: #8b857d;
      text-align: center;
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="panel">
      <h1>Weight Tracking</h1>
      <form method="post" action="/weights">
        <label>Date <input type="date" name="date" value="{{TODAY}}" max="{{TODAY}}" required /></label>
        <label>Weight (kg) <input type="number" name="weight" min="0" step="0.1" required /></label>
        <label>Notes <input type="text" name="notes" placeholder="Optional notes" /></label>
        <button type="submit">Add Weight Entry</button>
      </form>
    </section>

    <section class="panel">
      <h2>Weight Progress</h2>
      <nav class="tabs">{{WINDOWS}}</nav>
      {{CHART}}
      <table>
        <tbody>{{WEEKS}}</tbody>
      </table>
    </section>

    <section class="panel">
      <h3>Recent Weight Entries</h3>
      {{RECENT}}
    </section>
  </main>
</body>
</html>
"#;
