use crate::feature::{
    DISTANCE_TO_NEAREST, POPULATION_DENSITY, PRIORITY_SCORE, Properties, TRAFFIC_SCORE,
    as_number, display_value,
};
use crate::tier::tier_class;
use crate::viewport::ViewportCommand;

pub const NOT_AVAILABLE: &str = "N/A";

/// Static notice that takes over the map container when embedding fails.
pub const MAP_ERROR_HTML: &str = r#"<div class="map-error"><h2>Unable to load map</h2><p>The hosted map could not be initialized. See the browser console for details.</p></div>"#;

/// Display-ready fields of the selected site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub tier: String,
    pub tier_class: &'static str,
    pub score: String,
    pub distance: String,
    pub population_density: String,
    pub traffic_score: String,
}

impl SelectionSummary {
    pub fn from_properties(props: &Properties) -> Self {
        let tier = props.tier_name();
        let tier_class = tier.as_deref().map(tier_class).unwrap_or("");
        Self {
            tier: tier.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            tier_class,
            score: text_or_na(props, PRIORITY_SCORE),
            distance: props
                .present(DISTANCE_TO_NEAREST)
                .and_then(as_number)
                .map(format_distance_km)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            population_density: text_or_na(props, POPULATION_DENSITY),
            traffic_score: text_or_na(props, TRAFFIC_SCORE),
        }
    }
}

fn text_or_na(props: &Properties, key: &str) -> String {
    props
        .present(key)
        .map(display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Meters to kilometers, one decimal place.
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

/// Info panel markup for a selected feature.
pub fn render_selection_panel(props: &Properties) -> String {
    let summary = SelectionSummary::from_properties(props);
    let metrics: [(&str, &str); 4] = [
        ("Priority Score", &summary.score),
        ("Distance to Nearest Charger", &summary.distance),
        ("Population Density", &summary.population_density),
        ("Traffic Score", &summary.traffic_score),
    ];

    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="info-header"><h3>Candidate Site</h3><span class="tier-badge {}">{}</span></div>"#,
        summary.tier_class,
        escape_html(&summary.tier),
    ));
    html.push_str(r#"<div class="info-metrics">"#);
    for (label, value) in metrics {
        html.push_str(&format!(
            r#"<div class="metric"><span class="metric-label">{label}</span><span class="metric-value">{}</span></div>"#,
            escape_html(value),
        ));
    }
    html.push_str("</div>");
    let zoom = ViewportCommand::ZoomToFeature;
    html.push_str(&format!(
        r#"<button class="info-action" data-command="{}">{}</button>"#,
        zoom.name(),
        zoom.label(),
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_props() -> Properties {
        Properties::from([
            ("priority_tier", json!("High Priority")),
            ("priority_score", json!(87.5)),
            ("distance_to_nearest", json!(2460)),
            ("population_density", json!(12000)),
            ("traffic_score", json!(0.82)),
        ])
    }

    #[test]
    fn formats_all_present_fields() {
        let summary = SelectionSummary::from_properties(&full_props());
        assert_eq!(
            summary,
            SelectionSummary {
                tier: "High Priority".to_string(),
                tier_class: "high",
                score: "87.5".to_string(),
                distance: "2.5 km".to_string(),
                population_density: "12000".to_string(),
                traffic_score: "0.82".to_string(),
            }
        );
    }

    #[test]
    fn substitutes_na_for_exactly_the_missing_fields() {
        let keys = [
            "priority_tier",
            "priority_score",
            "distance_to_nearest",
            "population_density",
            "traffic_score",
        ];
        let full = SelectionSummary::from_properties(&full_props());
        for missing in keys {
            let mut props = full_props();
            props.0.remove(missing);
            let summary = SelectionSummary::from_properties(&props);
            let fields = [
                ("priority_tier", &summary.tier, &full.tier),
                ("priority_score", &summary.score, &full.score),
                ("distance_to_nearest", &summary.distance, &full.distance),
                (
                    "population_density",
                    &summary.population_density,
                    &full.population_density,
                ),
                ("traffic_score", &summary.traffic_score, &full.traffic_score),
            ];
            for (key, got, present) in fields {
                if key == missing {
                    assert_eq!(got, NOT_AVAILABLE, "{key} should be N/A");
                } else {
                    assert_eq!(got, present, "{key} should be unchanged");
                }
            }
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        let props = Properties::from([
            ("priority_tier", json!("")),
            ("priority_score", json!(0)),
            ("distance_to_nearest", json!(null)),
            ("traffic_score", json!(false)),
        ]);
        let summary = SelectionSummary::from_properties(&props);
        assert_eq!(summary.tier, NOT_AVAILABLE);
        assert_eq!(summary.tier_class, "");
        assert_eq!(summary.score, NOT_AVAILABLE);
        assert_eq!(summary.distance, NOT_AVAILABLE);
        assert_eq!(summary.population_density, NOT_AVAILABLE);
        assert_eq!(summary.traffic_score, NOT_AVAILABLE);
    }

    #[test]
    fn distance_is_kilometers_with_one_decimal() {
        assert_eq!(format_distance_km(1000.0), "1.0 km");
        assert_eq!(format_distance_km(1549.0), "1.5 km");
        assert_eq!(format_distance_km(120.0), "0.1 km");
    }

    #[test]
    fn unknown_tier_gets_empty_class() {
        let props = Properties::from([("priority_tier", json!("Experimental"))]);
        let summary = SelectionSummary::from_properties(&props);
        assert_eq!(summary.tier, "Experimental");
        assert_eq!(summary.tier_class, "");
    }

    #[test]
    fn markup_escapes_values_and_offers_zoom() {
        let props = Properties::from([("priority_tier", json!("<b>Low</b>"))]);
        let html = render_selection_panel(&props);
        assert!(html.contains("&lt;b&gt;Low&lt;/b&gt;"));
        assert!(!html.contains("<b>Low"));
        assert!(html.contains(r#"data-command="zoom-to-feature""#));
    }

    #[test]
    fn markup_carries_tier_class() {
        let html = render_selection_panel(&full_props());
        assert!(html.contains(r#"class="tier-badge high""#));
        assert!(html.contains("2.5 km"));
    }
}
