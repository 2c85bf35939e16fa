use formpilot_common::WidgetType;
use formpilot_drivers::form_browser::page::FormElement;
use tracing::debug;

/// Marker sub-elements probed inside a question container, in priority
/// order. First present marker wins.
pub const MARKER_PROBES: &[(&str, WidgetType)] = &[
    ("div[role='radio']", WidgetType::Radio),
    ("div[role='checkbox']", WidgetType::Checkbox),
    ("input[type='date']", WidgetType::Date),
    ("div[role='listbox']", WidgetType::Dropdown),
    ("textarea", WidgetType::Textarea),
    ("input[type='text']", WidgetType::Text),
];

/// Classify a question container by the markers it contains.
///
/// Classification is structural, not semantic. Probe failures (detached
/// node, stale reference) degrade to `Text`; classification never aborts
/// the fill pass for one question.
pub async fn classify(container: &FormElement) -> WidgetType {
    for (selector, kind) in MARKER_PROBES {
        match container.find_elements(selector).await {
            Ok(found) if !found.is_empty() => return *kind,
            Ok(_) => {}
            Err(e) => {
                debug!(target: "widget", %selector, error = %e, "probe failed; defaulting to text");
                return WidgetType::Text;
            }
        }
    }
    WidgetType::Text
}
