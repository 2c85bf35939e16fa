use crate::{discover, matcher::FieldMatcher, strategies, widget, Thresholds};
use formpilot_common::WidgetType;
use formpilot_drivers::form_browser::page::FormPage;
use formpilot_embed::Embedder;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How long to wait for the first question marker after navigation.
const FORM_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened to one question during the pass. Reporting only; no retry
/// state carries across questions.
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    pub question: String,
    pub matched_field: Option<String>,
    pub widget: Option<WidgetType>,
    pub filled: bool,
    pub note: String,
}

impl QuestionOutcome {
    fn skipped(question: &str, note: impl Into<String>) -> Self {
        Self {
            question: question.to_string(),
            matched_field: None,
            widget: None,
            filled: false,
            note: note.into(),
        }
    }
}

/// Per-question outcomes for one fill pass.
#[derive(Debug, Default)]
pub struct FillReport {
    pub outcomes: Vec<QuestionOutcome>,
}

impl FillReport {
    pub fn filled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.filled).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.filled_count()
    }

    /// One line per question, for the operator's review.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.outcomes.len() + 1);
        for outcome in &self.outcomes {
            let status = if outcome.filled { "filled" } else { "failed" };
            let widget = outcome
                .widget
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string());
            let field = outcome.matched_field.as_deref().unwrap_or("-");
            lines.push(format!(
                "[{status}] {} (field: {field}, widget: {widget}) {}",
                outcome.question, outcome.note
            ));
        }
        lines.push(format!(
            "{} filled, {} failed of {} questions",
            self.filled_count(),
            self.failed_count(),
            self.outcomes.len()
        ));
        lines.join("\n")
    }
}

/// Drives one sequential fill pass over a loaded form.
///
/// Questions are processed strictly one at a time; the browser session has a
/// single logical focus context, and the operator reviews everything at the
/// end. No question's failure affects whether the pass continues.
pub struct FormFiller {
    matcher: FieldMatcher,
    embedder: Arc<dyn Embedder>,
    thresholds: Thresholds,
}

impl FormFiller {
    pub fn new(matcher: FieldMatcher, thresholds: Thresholds) -> Self {
        let embedder = matcher.embedder();
        Self {
            matcher,
            embedder,
            thresholds,
        }
    }

    /// Run the pass. Whole-pass failures are caught here: the report holds
    /// whatever was processed, and the caller still closes the session.
    pub async fn run(&self, page: &FormPage) -> FillReport {
        let mut report = FillReport::default();
        if let Err(e) = self.run_inner(page, &mut report).await {
            error!(target: "filler", error = %e, "fill pass aborted");
        }
        report
    }

    async fn run_inner(&self, page: &FormPage, report: &mut FillReport) -> anyhow::Result<()> {
        info!(target: "filler", "waiting for form to load");
        if let Err(e) = page
            .wait_for_element("span[class*='M7eMe']", FORM_LOAD_TIMEOUT)
            .await
        {
            // The scan below still runs; some forms render markers late.
            warn!(target: "filler", error = %e, "no question marker appeared in time");
        }

        let questions = discover::questions(page).await;
        info!(target: "filler", count = questions.len(), "questions discovered");

        for question in &questions {
            info!(target: "filler", %question, "processing question");
            let outcome = self.process_question(page, question).await;
            if outcome.filled {
                info!(target: "filler", %question, "filled");
            } else {
                warn!(target: "filler", %question, note = %outcome.note, "not filled");
            }
            report.outcomes.push(outcome);
        }

        info!(
            target: "filler",
            filled = report.filled_count(),
            failed = report.failed_count(),
            "fill pass completed"
        );
        Ok(())
    }

    async fn process_question(&self, page: &FormPage, question: &str) -> QuestionOutcome {
        let matched = match self
            .matcher
            .best_field(question, self.thresholds.field_match)
            .await
        {
            Ok(Some(matched)) => matched,
            Ok(None) => {
                return QuestionOutcome::skipped(question, "no matching profile field");
            }
            Err(e) => {
                return QuestionOutcome::skipped(question, format!("matcher failed: {e}"));
            }
        };

        let Some(value) = self.matcher.value_of(&matched.field) else {
            return QuestionOutcome::skipped(question, format!("no value for {}", matched.field));
        };
        let value = value.to_string();

        let Some(container) = discover::container_for(page, question).await else {
            return QuestionOutcome {
                question: question.to_string(),
                matched_field: Some(matched.field),
                widget: None,
                filled: false,
                note: "could not find input field".to_string(),
            };
        };

        let kind = widget::classify(&container).await;
        debug!(target: "filler", %question, widget = %kind, score = matched.score, "dispatching fill");

        if let Err(e) = page.scroll_into_view(&container).await {
            debug!(target: "filler", error = %e, "scroll into view failed");
        }

        let filled = match kind {
            WidgetType::Date => strategies::date::fill(page, &container, &value).await,
            WidgetType::Radio => {
                strategies::choice::fill_radio(
                    &container,
                    &value,
                    self.embedder.as_ref(),
                    self.thresholds,
                )
                .await
            }
            WidgetType::Dropdown => {
                strategies::choice::fill_dropdown(
                    page,
                    &container,
                    &value,
                    self.embedder.as_ref(),
                    self.thresholds,
                )
                .await
            }
            // The markup has no dedicated fill routine for checkboxes; they
            // fall through to the text probes like the plain text widgets.
            WidgetType::Checkbox | WidgetType::Textarea | WidgetType::Text => {
                strategies::text::fill(&container, &value).await
            }
        };

        container.pacing.settle().await;

        QuestionOutcome {
            question: question.to_string(),
            matched_field: Some(matched.field),
            widget: Some(kind),
            filled,
            note: if filled {
                format!("value: {value}")
            } else {
                format!("could not write value: {value}")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_renders_counts_and_status() {
        let report = FillReport {
            outcomes: vec![
                QuestionOutcome {
                    question: "What is your full name?".into(),
                    matched_field: Some("Full Name".into()),
                    widget: Some(WidgetType::Text),
                    filled: true,
                    note: "value: Ada Lovelace".into(),
                },
                QuestionOutcome::skipped("Unmatched question", "no matching profile field"),
            ],
        };

        assert_eq!(report.filled_count(), 1);
        assert_eq!(report.failed_count(), 1);

        let rendered = report.render();
        assert!(rendered.contains("[filled] What is your full name?"));
        assert!(rendered.contains("[failed] Unmatched question"));
        assert!(rendered.contains("1 filled, 1 failed of 2 questions"));
    }
}
