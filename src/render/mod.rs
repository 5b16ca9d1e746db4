//! Plain-text rendering of the dashboard: filter controls, bar charts, record list.

use crate::client::DashboardSession;
use crate::models::record::{category_label, Record, RecordFields};
use crate::services::dashboard::{ChartSeries, DashboardView, FilterControl};

pub const HEADING: &str = "Data Visualization Dashboard";
pub const NO_DATA: &str = "No data found for selected filters.";
pub const LOADING: &str = "Loading...";

const BAR: char = '█';

/// Render the whole dashboard for a session.
pub fn render_dashboard(session: &DashboardSession, bar_width: usize) -> String {
    let view = session.view();
    let mut out = String::new();

    out.push_str(&format!("{HEADING}\n{}\n\n", "=".repeat(HEADING.len())));

    out.push_str(&render_filters(&view.controls));
    out.push('\n');

    for chart in &view.charts {
        out.push_str(&render_chart(chart, bar_width));
        out.push('\n');
    }

    if session.is_loading() {
        out.push_str(&format!("{LOADING}\n"));
    } else {
        out.push_str(&render_list(&view));
    }

    out
}

/// One line per filter field: label, then "All" and every option, selection in brackets.
pub fn render_filters(controls: &[FilterControl]) -> String {
    let mut out = String::new();
    for control in controls {
        let choices: Vec<String> = control
            .choices()
            .map(|(label, value)| {
                if value == control.selected {
                    format!("[{label}]")
                } else {
                    label.to_string()
                }
            })
            .collect();
        out.push_str(&format!("{}: {}\n", control.field.label(), choices.join(" | ")));
    }
    out
}

/// Horizontal bar chart scaled so the largest sum spans `bar_width` cells.
pub fn render_chart(chart: &ChartSeries, bar_width: usize) -> String {
    let mut out = format!("{}\n", chart.title);

    if chart.is_empty() {
        out.push_str(&format!("  {NO_DATA}\n"));
        return out;
    }

    let key_width = chart
        .points
        .iter()
        .map(|p| p.key.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.points.iter().map(|p| p.sum).fold(0.0_f64, f64::max);

    for point in &chart.points {
        let cells = if max > 0.0 && point.sum > 0.0 {
            ((point.sum / max) * bar_width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {:<key_width$} | {} {}\n",
            point.key,
            BAR.to_string().repeat(cells),
            point.sum
        ));
    }
    out
}

/// Every filtered record: its title, then all fields on one line.
pub fn render_list(view: &DashboardView<'_>) -> String {
    let mut out = format!("Records ({} of {})\n", view.filtered.len(), view.total);
    for record in &view.filtered {
        out.push_str(&render_record(record));
    }
    out
}

fn render_record(record: &Record) -> String {
    let title = record.fields.title.as_deref().unwrap_or_default();
    format!("- {title}\n  {}\n", describe_record(&record.fields))
}

/// All displayed fields concatenated into one descriptive line.
///
/// Missing values use the same "Unknown" label as filters and charts.
pub fn describe_record(fields: &RecordFields) -> String {
    let number = |value: Option<f64>| match value {
        Some(v) => v.to_string(),
        None => category_label(None).to_string(),
    };
    let text = |value: &Option<String>| category_label(value.as_deref()).to_string();

    [
        ("Topic", text(&fields.topic)),
        ("Sector", text(&fields.sector)),
        ("Region", text(&fields.region)),
        ("Country", text(&fields.country)),
        ("City", text(&fields.city)),
        ("End year", text(&fields.end_year)),
        ("Source", text(&fields.source)),
        ("Pest", text(&fields.pest)),
        ("Swot", text(&fields.swot)),
        ("Intensity", number(fields.intensity)),
        ("Likelihood", number(fields.likelihood)),
        ("Relevance", number(fields.relevance)),
    ]
    .iter()
    .map(|(label, value)| format!("{label}: {value}"))
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::FilterField;
    use crate::services::dashboard::{ChartPoint, Metric};

    fn series(points: Vec<(&str, f64)>) -> ChartSeries {
        ChartSeries {
            title: "Intensity by Region (Filtered)",
            group: FilterField::Region,
            metric: Metric::Intensity,
            points: points
                .into_iter()
                .map(|(key, sum)| ChartPoint { key: key.to_string(), sum })
                .collect(),
        }
    }

    #[test]
    fn empty_chart_shows_placeholder() {
        let out = render_chart(&series(vec![]), 10);
        assert!(out.contains("Intensity by Region (Filtered)"));
        assert!(out.contains(NO_DATA));
    }

    #[test]
    fn bars_scale_to_largest_sum() {
        let out = render_chart(&series(vec![("Asia", 8.0), ("Unknown", 2.0)]), 8);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  Asia    | ████████ 8");
        assert_eq!(lines[2], "  Unknown | ██ 2");
    }

    #[test]
    fn zero_sums_draw_no_bar() {
        let out = render_chart(&series(vec![("Asia", 0.0)]), 8);
        assert_eq!(out.lines().nth(1), Some("  Asia |  0"));
    }

    #[test]
    fn describe_record_uses_unknown_for_missing() {
        let fields = RecordFields {
            topic: Some("oil".to_string()),
            city: Some("N/A".to_string()),
            intensity: Some(6.0),
            ..Default::default()
        };
        let line = describe_record(&fields);
        assert!(line.starts_with("Topic: oil, Sector: Unknown,"));
        assert!(line.contains("City: Unknown"));
        assert!(line.contains("Intensity: 6"));
        assert!(line.ends_with("Relevance: Unknown"));
    }

    #[test]
    fn dashboard_starts_with_underlined_heading() {
        let out = render_dashboard(&DashboardSession::new(), 10);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(HEADING));
        assert_eq!(lines.next(), Some("=".repeat(HEADING.len()).as_str()));
        assert_eq!(lines.next(), Some(""));
        assert!(out.ends_with(&format!("{LOADING}\n")));
    }

    #[test]
    fn loading_session_shows_marker() {
        let session = DashboardSession::new();
        let out = render_dashboard(&session, 10);
        assert!(out.contains(LOADING));
        assert!(out.contains(NO_DATA));
    }

    #[test]
    fn loaded_session_lists_filtered_records() {
        let mut session = DashboardSession::new();
        let titled = |position, title: &str, region: &str| {
            Record::new(
                position,
                RecordFields {
                    title: Some(title.to_string()),
                    region: Some(region.to_string()),
                    ..Default::default()
                },
            )
        };
        session.settle(Ok(vec![
            titled(0, "Gas demand rises", "Asia"),
            titled(1, "Oil supply falls", "Europe"),
        ]));
        session.select(FilterField::Region, "Asia");

        let out = render_dashboard(&session, 10);
        assert!(!out.contains(LOADING));
        assert!(out.contains("Records (1 of 2)"));
        assert!(out.contains("- Gas demand rises"));
        assert!(!out.contains("Oil supply falls"));
        assert!(out.contains("Region: All | [Asia] | Europe"));
    }
}
