//! Dashboard projections: filtering, option lists, and group-by-sum charts.
//!
//! Everything here is pure and recomputed in full from the fetched records
//! and the current [`FilterSet`] whenever either changes.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::filter::{FilterField, FilterSet, ALL_OPTION};
use crate::models::record::{category_label, Record, RecordFields};

/// Numeric record field summed by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Intensity,
    Likelihood,
    Relevance,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Likelihood => "likelihood",
            Self::Relevance => "relevance",
        }
    }

    /// Value on a record, 0 when absent.
    pub fn value(&self, fields: &RecordFields) -> f64 {
        let value = match self {
            Self::Intensity => fields.intensity,
            Self::Likelihood => fields.likelihood,
            Self::Relevance => fields.relevance,
        };
        value.unwrap_or(0.0)
    }
}

/// A chart definition: which field to group by and which metric to sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub group: FilterField,
    pub metric: Metric,
}

/// The three dashboard charts, in display order.
pub const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        title: "Intensity by Region (Filtered)",
        group: FilterField::Region,
        metric: Metric::Intensity,
    },
    ChartSpec {
        title: "Likelihood by Country (Filtered)",
        group: FilterField::Country,
        metric: Metric::Likelihood,
    },
    ChartSpec {
        title: "Relevance by Topic (Filtered)",
        group: FilterField::Topic,
        metric: Metric::Relevance,
    },
];

/// One bar: a normalized group key and its summed metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub key: String,
    pub sum: f64,
}

/// A computed chart ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub group: FilterField,
    pub metric: Metric,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Selectable values for one filter field plus the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterControl {
    pub field: FilterField,
    /// Distinct normalized values, ascending. "All" is implicit.
    pub options: Vec<String>,
    /// Current selection, `""` for "All".
    pub selected: String,
}

impl FilterControl {
    /// `(label, value)` pairs in display order, starting with "All".
    pub fn choices(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once((ALL_OPTION, ""))
            .chain(self.options.iter().map(|o| (o.as_str(), o.as_str())))
    }
}

/// Records passing every active filter, in their original order.
pub fn filter<'a>(data: &'a [Record], filters: &FilterSet) -> Vec<&'a Record> {
    data.iter()
        .filter(|record| filters.matches(&record.fields))
        .collect()
}

/// Distinct normalized values of `field` across the whole dataset, sorted ascending.
pub fn options(data: &[Record], field: FilterField) -> Vec<String> {
    data.iter()
        .map(|record| field.category(&record.fields))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Filter controls for every field. Options always come from the unfiltered data.
pub fn filter_controls(data: &[Record], filters: &FilterSet) -> Vec<FilterControl> {
    FilterField::ALL
        .into_iter()
        .map(|field| FilterControl {
            field,
            options: options(data, field),
            selected: filters.get(field).to_string(),
        })
        .collect()
}

/// Group records by the normalized `group` field and sum `metric`.
///
/// Keys appear in the order they are first seen.
pub fn aggregate<'a, I>(records: I, group: FilterField, metric: Metric) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut points: Vec<ChartPoint> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let key = category_label(group.raw_value(&record.fields));
        let value = metric.value(&record.fields);
        match index.get(key) {
            Some(&i) => points[i].sum += value,
            None => {
                index.insert(key, points.len());
                points.push(ChartPoint {
                    key: key.to_string(),
                    sum: value,
                });
            }
        }
    }

    points
}

/// Build one chart from already-filtered records.
pub fn chart(records: &[&Record], spec: ChartSpec) -> ChartSeries {
    ChartSeries {
        title: spec.title,
        group: spec.group,
        metric: spec.metric,
        points: aggregate(records.iter().copied(), spec.group, spec.metric),
    }
}

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub controls: Vec<FilterControl>,
    pub charts: Vec<ChartSeries>,
    pub filtered: Vec<&'a Record>,
    pub total: usize,
}

impl<'a> DashboardView<'a> {
    pub fn build(data: &'a [Record], filters: &FilterSet) -> Self {
        let filtered = filter(data, filters);
        let charts = CHARTS.iter().map(|spec| chart(&filtered, *spec)).collect();
        Self {
            controls: filter_controls(data, filters),
            charts,
            filtered,
            total: data.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        region: Option<&str>,
        country: Option<&str>,
        topic: Option<&str>,
        intensity: Option<f64>,
    ) -> Record {
        Record::new(
            0,
            RecordFields {
                region: region.map(str::to_string),
                country: country.map(str::to_string),
                topic: topic.map(str::to_string),
                intensity,
                likelihood: intensity.map(|v| v + 1.0),
                relevance: Some(1.0),
                ..Default::default()
            },
        )
    }

    fn asia_scenario() -> Vec<Record> {
        vec![
            record(Some("Asia"), None, None, Some(5.0)),
            record(Some("Asia"), None, None, Some(3.0)),
            record(Some("N/A"), None, None, Some(2.0)),
        ]
    }

    fn sums(points: &[ChartPoint]) -> HashMap<String, f64> {
        points.iter().map(|p| (p.key.clone(), p.sum)).collect()
    }

    #[test]
    fn intensity_by_region_scenario() {
        let data = asia_scenario();
        let points = aggregate(&data, FilterField::Region, Metric::Intensity);
        assert_eq!(
            points,
            vec![
                ChartPoint { key: "Asia".to_string(), sum: 8.0 },
                ChartPoint { key: "Unknown".to_string(), sum: 2.0 },
            ]
        );
    }

    #[test]
    fn aggregate_keeps_first_seen_order() {
        let data = vec![
            record(Some("Europe"), None, None, Some(1.0)),
            record(Some("Asia"), None, None, Some(1.0)),
            record(Some("Europe"), None, None, Some(1.0)),
        ];
        let keys: Vec<String> = aggregate(&data, FilterField::Region, Metric::Intensity)
            .into_iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(keys, vec!["Europe", "Asia"]);
    }

    #[test]
    fn aggregate_sums_are_order_independent() {
        let mut data = vec![
            record(Some("Europe"), Some("France"), Some("oil"), Some(4.0)),
            record(Some("Asia"), Some("India"), Some("gas"), Some(7.0)),
            record(None, Some("France"), Some("oil"), None),
            record(Some("Europe"), None, Some("gas"), Some(2.0)),
        ];
        let before = sums(&aggregate(&data, FilterField::Region, Metric::Intensity));
        let before_country = sums(&aggregate(&data, FilterField::Country, Metric::Likelihood));
        data.reverse();
        let after = sums(&aggregate(&data, FilterField::Region, Metric::Intensity));
        let after_country = sums(&aggregate(&data, FilterField::Country, Metric::Likelihood));
        assert_eq!(before, after);
        assert_eq!(before_country, after_country);
        assert_eq!(after["Europe"], 6.0);
        assert_eq!(after["Unknown"], 0.0);
    }

    #[test]
    fn missing_metric_counts_as_zero() {
        let data = vec![record(Some("Asia"), None, None, None)];
        let points = aggregate(&data, FilterField::Region, Metric::Intensity);
        assert_eq!(points, vec![ChartPoint { key: "Asia".to_string(), sum: 0.0 }]);
    }

    #[test]
    fn empty_selection_yields_empty_charts() {
        let data = asia_scenario();
        let filters = FilterSet::new().with(FilterField::Region, "Africa");
        let view = DashboardView::build(&data, &filters);
        assert!(view.filtered.is_empty());
        assert_eq!(view.charts.len(), 3);
        assert!(view.charts.iter().all(ChartSeries::is_empty));
    }

    #[test]
    fn all_selection_keeps_every_record() {
        let data = asia_scenario();
        let filters = FilterSet::new().with(FilterField::Region, ALL_OPTION);
        let view = DashboardView::build(&data, &filters);
        assert_eq!(view.filtered.len(), 3);
        assert_eq!(view.charts[0].points.len(), 2);
    }

    #[test]
    fn filter_uses_normalized_values() {
        let data = asia_scenario();
        let filters = FilterSet::new().with(FilterField::Region, "Unknown");
        let filtered = filter(&data, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].fields.intensity, Some(2.0));
    }

    #[test]
    fn options_are_sorted_distinct_and_normalized() {
        let data = vec![
            record(Some("Europe"), None, None, None),
            record(Some("Asia"), None, None, None),
            record(Some("N/A"), None, None, None),
            record(None, None, None, None),
            record(Some("Asia"), None, None, None),
        ];
        assert_eq!(options(&data, FilterField::Region), vec!["Asia", "Europe", "Unknown"]);
    }

    #[test]
    fn options_do_not_shrink_under_filters() {
        let data = vec![
            record(Some("Asia"), Some("India"), None, None),
            record(Some("Europe"), Some("France"), None, None),
        ];
        let filters = FilterSet::new().with(FilterField::Region, "Asia");
        let view = DashboardView::build(&data, &filters);

        let country = view
            .controls
            .iter()
            .find(|c| c.field == FilterField::Country)
            .unwrap();
        assert_eq!(country.options, vec!["France", "India"]);
        assert_eq!(view.filtered.len(), 1);

        let region = view
            .controls
            .iter()
            .find(|c| c.field == FilterField::Region)
            .unwrap();
        assert_eq!(region.selected, "Asia");
    }

    #[test]
    fn choices_start_with_all() {
        let control = FilterControl {
            field: FilterField::Topic,
            options: vec!["gas".to_string(), "oil".to_string()],
            selected: String::new(),
        };
        let choices: Vec<_> = control.choices().collect();
        assert_eq!(choices, vec![("All", ""), ("gas", "gas"), ("oil", "oil")]);
    }

    #[test]
    fn view_charts_follow_chart_order() {
        let data = vec![record(Some("Asia"), Some("India"), Some("oil"), Some(2.0))];
        let view = DashboardView::build(&data, &FilterSet::new());
        let groups: Vec<FilterField> = view.charts.iter().map(|c| c.group).collect();
        assert_eq!(groups, vec![FilterField::Region, FilterField::Country, FilterField::Topic]);
        assert_eq!(view.charts[1].points[0].sum, 3.0);
        assert_eq!(view.charts[2].points[0].key, "oil");
    }
}
