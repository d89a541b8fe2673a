/// Human-readable labels for the form placements the landing page reports.
pub const SOURCE_LABELS: &[(&str, &str)] = &[
    ("hero_section", "Hero Section (Главный экран)"),
    ("final_cta_section", "Final CTA Section (Финальный призыв)"),
];

pub const UNKNOWN_SOURCE: &str = "unknown";

/// Known sources map to their label, anything else passes through, absent
/// sources become `unknown`.
pub fn source_label(source: Option<&str>) -> &str {
    match source {
        Some(source) => SOURCE_LABELS
            .iter()
            .find(|(key, _)| *key == source)
            .map(|(_, label)| *label)
            .unwrap_or(source),
        None => UNKNOWN_SOURCE,
    }
}
