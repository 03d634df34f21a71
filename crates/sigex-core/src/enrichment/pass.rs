//! Early `fs`/`data_path` candidates from an analyzed document.

use tracing::trace;

use super::Doc;
use crate::extraction::rules::patterns::{
    has_data_extension, strip_quotes, DATA_PATH, NUMBER_WITH_UNIT, SAMPLING_TOKENS,
};
use crate::extraction::units::freq_to_hz;
use crate::models::record::ExtractionRecord;

/// Lower-cased substrings that mark an entity window as sampling-related.
const WINDOW_KEYWORDS: [&str; 3] = ["fs", "sampling", "frequency"];

/// Populate `fs` and `data_path` candidates from `doc`.
///
/// Pattern matches run first, then entities, then a token proximity scan;
/// each writes into the same record, so the last hit of the pass wins.
/// A raw-text path scan fills `data_path` if nothing else did.
pub fn enrich_record(doc: &Doc, record: &mut ExtractionRecord) {
    apply_pattern_matches(doc, record);
    apply_entities(doc, record);
    apply_token_proximity(doc, record);

    if record.data_path.is_none() {
        if let Some(caps) = DATA_PATH.captures(doc.text()) {
            record.data_path = Some(strip_quotes(&caps["path"]).to_string());
            trace!("enrichment: data_path from raw text scan");
        }
    }
}

fn apply_pattern_matches(doc: &Doc, record: &mut ExtractionRecord) {
    for m in doc.matches() {
        let span = doc.span_text(m.start, m.end);

        if m.kind.is_frequency() {
            if let Ok(hz) = freq_to_hz(span) {
                trace!("enrichment: fs {} from pattern {:?}", hz, span);
                record.fs = Some(hz);
            }
        }

        if m.kind.is_path() && record.data_path.is_none() {
            record.data_path = Some(strip_quotes(span).to_string());
        }
    }
}

fn apply_entities(doc: &Doc, record: &mut ExtractionRecord) {
    for entity in doc.entities() {
        let entity_text = doc.entity_text(entity);
        if entity_text.is_empty() {
            continue;
        }

        if entity.label.is_numeric() {
            let window = doc
                .span_text(entity.start.saturating_sub(3), entity.end + 3)
                .to_lowercase();

            if WINDOW_KEYWORDS.iter().any(|k| window.contains(k)) {
                if let Some(caps) = NUMBER_WITH_UNIT.captures(&window) {
                    if let Ok(hz) = freq_to_hz(&caps[1]) {
                        trace!("enrichment: fs {} near entity {:?}", hz, entity_text);
                        record.fs = Some(hz);
                    }
                } else if record.fs.is_none() {
                    if let Ok(value) = entity_text.parse::<f64>() {
                        record.fs = Some(value);
                    }
                }
            }
        }

        if entity_text.contains('/') || entity_text.contains('\\') {
            let path = strip_quotes(entity_text);
            if has_data_extension(path) {
                record.data_path = Some(path.to_string());
            }
        }
    }
}

fn apply_token_proximity(doc: &Doc, record: &mut ExtractionRecord) {
    let tokens = doc.tokens();

    for i in 0..tokens.len().saturating_sub(1) {
        let token = &tokens[i];
        let next = &tokens[i + 1];

        if token.like_num && next.lower().starts_with("hz") {
            let left = &tokens[i.saturating_sub(4)..i];
            if left
                .iter()
                .any(|t| SAMPLING_TOKENS.contains(&t.lower().as_str()))
            {
                if let Some(value) = token.as_f64() {
                    record.fs = Some(value);
                }
            }
        }

        if token.lower() == "fs" && next.like_num {
            if let Some(value) = next.as_f64() {
                record.fs = Some(value);
            }
        }
    }
}
