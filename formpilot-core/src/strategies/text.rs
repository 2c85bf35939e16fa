use formpilot_drivers::form_browser::page::FormElement;
use tracing::{debug, warn};

/// Candidate input selectors, probed in order. The first probe that finds
/// an element wins.
pub const INPUT_PROBES: &[&str] = &["input[type='text']", "input", "textarea"];

/// Fill the first text-capable sub-element of `container`: clear it, then
/// type the value. Returns `false` only when none of the probes locate an
/// element.
///
/// Re-running the pass on an already-filled field simply overwrites it with
/// the same value.
pub async fn fill(container: &FormElement, value: &str) -> bool {
    for selector in INPUT_PROBES {
        let input = match container.find_element(selector).await {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                debug!(target: "strategy.text", %selector, error = %e, "probe failed");
                continue;
            }
        };

        if let Err(e) = input.clear().await {
            warn!(target: "strategy.text", %selector, error = %e, "clear failed");
            return false;
        }
        if let Err(e) = input.type_paced(value).await {
            warn!(target: "strategy.text", %selector, error = %e, "typing failed");
            return false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_specific_before_generic() {
        assert_eq!(INPUT_PROBES, &["input[type='text']", "input", "textarea"]);
    }
}
