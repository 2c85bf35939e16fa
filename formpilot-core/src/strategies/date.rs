use chrono::{Datelike, NaiveDate};
use formpilot_drivers::form_browser::page::{FormElement, FormPage};
use formpilot_drivers::Key;
use serde_json::json;
use tracing::{debug, warn};

/// Profile date values are written as `month/day/year`.
const PROFILE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a profile date value and render it the way a native date input
/// expects (`year-month-day`).
pub fn format_for_input(value: &str) -> Option<(NaiveDate, String)> {
    let date = NaiveDate::parse_from_str(value.trim(), PROFILE_DATE_FORMAT).ok()?;
    Some((date, date.format("%Y-%m-%d").to_string()))
}

/// Fill a native date input inside `container`.
///
/// Three techniques are attempted in order; each failure falls through to
/// the next, and only exhausting all three yields `false`:
/// 1. typed injection of the formatted string;
/// 2. click + segmented keyboard entry (year, TAB, month, TAB, day);
/// 3. direct value assignment through the scripting escape hatch.
pub async fn fill(page: &FormPage, container: &FormElement, value: &str) -> bool {
    let Some((date, formatted)) = format_for_input(value) else {
        warn!(target: "strategy.date", %value, "value is not a month/day/year date");
        return false;
    };

    let input = match container.find_element("input[type='date']").await {
        Ok(Some(input)) => input,
        Ok(None) => {
            warn!(target: "strategy.date", "container has no native date input");
            return false;
        }
        Err(e) => {
            warn!(target: "strategy.date", error = %e, "date input lookup failed");
            return false;
        }
    };

    if let Err(e) = input.clear().await {
        debug!(target: "strategy.date", error = %e, "clear failed; continuing");
    }

    // Technique 1: typed injection of the formatted string.
    match input.send_keys(&formatted).await {
        Ok(()) => return true,
        Err(e) => debug!(target: "strategy.date", error = %e, "direct injection failed"),
    }

    // Technique 2: focus the field and key in each segment.
    match segmented_entry(&input, date).await {
        Ok(()) => return true,
        Err(e) => debug!(target: "strategy.date", error = %e, "segmented entry failed"),
    }

    // Technique 3: scripting escape hatch.
    let script_args = input
        .to_script_arg()
        .map(|arg| vec![arg, json!(formatted)]);
    match script_args {
        Ok(args) => match page.execute("arguments[0].value = arguments[1];", args).await {
            Ok(_) => return true,
            Err(e) => debug!(target: "strategy.date", error = %e, "script assignment failed"),
        },
        Err(e) => debug!(target: "strategy.date", error = %e, "element not serializable"),
    }

    warn!(target: "strategy.date", %value, "could not set date using any technique");
    false
}

async fn segmented_entry(input: &FormElement, date: NaiveDate) -> anyhow::Result<()> {
    input.click().await?;
    input.pacing.settle().await;

    let tab = char::from(Key::Tab).to_string();
    input.send_keys(&date.year().to_string()).await?;
    input.send_keys(&tab).await?;
    input.send_keys(&format!("{:02}", date.month())).await?;
    input.send_keys(&tab).await?;
    input.send_keys(&format!("{:02}", date.day())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_for_native_input() {
        let (date, formatted) = format_for_input("03/07/2024").unwrap();
        assert_eq!(formatted, "2024-03-07");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 7);
    }

    #[test]
    fn handles_historic_dates() {
        let (_, formatted) = format_for_input("12/10/1815").unwrap();
        assert_eq!(formatted, "1815-12-10");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(format_for_input("2024-03-07").is_none());
        assert!(format_for_input("7 March 2024").is_none());
        assert!(format_for_input("13/32/2024").is_none());
    }
}
