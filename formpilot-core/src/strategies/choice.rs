use crate::Thresholds;
use formpilot_drivers::form_browser::page::{FormElement, FormPage};
use formpilot_embed::{cosine_similarity, Embedder};
use tracing::{debug, warn};

/// Pick the option index for `value` out of `options`, or `None` when no
/// stage yields a selection.
///
/// Four stages, each checked exhaustively across ALL options before the
/// next begins, so an exact match is never skipped in favor of an
/// earlier-indexed partial match:
/// 1. case-insensitive exact equality;
/// 2. case-insensitive substring containment, either direction;
/// 3. semantic similarity, first option above `thresholds.option_high`;
/// 4. globally best-scoring option if above `thresholds.option_floor`.
pub async fn select_index(
    options: &[String],
    value: &str,
    embedder: &dyn Embedder,
    thresholds: Thresholds,
) -> Option<usize> {
    let wanted = value.trim().to_lowercase();

    // Stage 1: exact match.
    for (i, option) in options.iter().enumerate() {
        if option.trim().to_lowercase() == wanted {
            return Some(i);
        }
    }

    // Stage 2: partial match, either direction.
    for (i, option) in options.iter().enumerate() {
        let text = option.trim().to_lowercase();
        if !text.is_empty() && (text.contains(&wanted) || wanted.contains(&text)) {
            return Some(i);
        }
    }

    // Stages 3 and 4 need embeddings; an embedder failure here means "no
    // semantic selection", never an escalated error.
    let value_embedding = match embedder.embed(value).await {
        Ok(embedding) => embedding,
        Err(e) => {
            warn!(target: "strategy.choice", error = %e, "value embedding failed; skipping semantic stages");
            return None;
        }
    };

    let mut scores = Vec::with_capacity(options.len());
    for option in options {
        match embedder.embed(option.trim()).await {
            Ok(embedding) => scores.push(cosine_similarity(&value_embedding, &embedding)),
            Err(e) => {
                debug!(target: "strategy.choice", %option, error = %e, "option embedding failed");
                scores.push(0.0);
            }
        }
    }

    // Stage 3: first option over the high-confidence gate.
    for (i, score) in scores.iter().enumerate() {
        if *score > thresholds.option_high {
            return Some(i);
        }
    }

    // Stage 4: best available, if it clears the floor.
    let mut best: Option<(usize, f32)> = None;
    for (i, score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, top)| *score > top) {
            best = Some((i, *score));
        }
    }

    match best {
        Some((i, score)) if score > thresholds.option_floor => Some(i),
        _ => None,
    }
}

/// Fill a radio group: enumerate the container's radio options and click
/// the selected one.
pub async fn fill_radio(
    container: &FormElement,
    value: &str,
    embedder: &dyn Embedder,
    thresholds: Thresholds,
) -> bool {
    let options = match container.find_elements("div[role='radio']").await {
        Ok(options) => options,
        Err(e) => {
            warn!(target: "strategy.choice", error = %e, "radio option lookup failed");
            return false;
        }
    };

    click_selected(&options, value, embedder, thresholds).await
}

/// Fill a dropdown: click the listbox control open, then enumerate options
/// globally across the page (the option list renders outside the question
/// container).
pub async fn fill_dropdown(
    page: &FormPage,
    container: &FormElement,
    value: &str,
    embedder: &dyn Embedder,
    thresholds: Thresholds,
) -> bool {
    let listbox = match container.find_element("div[role='listbox']").await {
        Ok(Some(listbox)) => listbox,
        Ok(None) => {
            warn!(target: "strategy.choice", "container has no listbox control");
            return false;
        }
        Err(e) => {
            warn!(target: "strategy.choice", error = %e, "listbox lookup failed");
            return false;
        }
    };

    if let Err(e) = listbox.click().await {
        warn!(target: "strategy.choice", error = %e, "could not open dropdown");
        return false;
    }
    listbox.pacing.settle().await;

    let options = match page.find_elements("div[role='option']").await {
        Ok(options) => options,
        Err(e) => {
            warn!(target: "strategy.choice", error = %e, "dropdown option lookup failed");
            return false;
        }
    };

    click_selected(&options, value, embedder, thresholds).await
}

async fn click_selected(
    options: &[FormElement],
    value: &str,
    embedder: &dyn Embedder,
    thresholds: Thresholds,
) -> bool {
    let mut texts = Vec::with_capacity(options.len());
    for option in options {
        match option.text().await {
            Ok(text) => texts.push(text.trim().to_string()),
            Err(e) => {
                debug!(target: "strategy.choice", error = %e, "unreadable option label");
                texts.push(String::new());
            }
        }
    }

    let Some(index) = select_index(&texts, value, embedder, thresholds).await else {
        debug!(target: "strategy.choice", %value, options = texts.len(), "no stage yielded a selection");
        return false;
    };

    match options[index].click().await {
        Ok(()) => {
            debug!(target: "strategy.choice", %value, chosen = %texts[index], "option selected");
            true
        }
        Err(e) => {
            warn!(target: "strategy.choice", error = %e, "selected option could not be clicked");
            false
        }
    }
}
