//! Deterministic lexical enrichment: whitespace/punctuation tokenizer plus
//! rule-based entity and pattern tagging.

use super::{Entity, EntityLabel, EnrichmentSource, PatternKind, PatternMatch, Token};
use crate::error::EnrichmentError;
use crate::extraction::rules::patterns::{
    has_data_extension, ATTACHED_FREQUENCY, UNIX_PATH_TOKEN, WINDOWS_PATH_TOKEN,
};

const PREFIX_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '\u{201c}', '\u{2018}'];
const SUFFIX_PUNCT: &[char] = &[
    ')', ']', '}', '"', '\'', ',', ';', ':', '.', '!', '?', '%', '\u{201d}', '\u{2019}',
];
const FREQUENCY_UNITS: [&str; 3] = ["hz", "khz", "mhz"];
const NUMBER_WORDS: [&str; 12] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "hundred",
];

/// Rule-based tokenizer and entity tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalEnrichment;

impl LexicalEnrichment {
    pub fn new() -> Self {
        Self
    }
}

impl EnrichmentSource for LexicalEnrichment {
    fn name(&self) -> &str {
        "lexical"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Token>, EnrichmentError> {
        let mut tokens = Vec::new();
        let mut chunk_start = None;

        for (i, c) in text.char_indices() {
            match (c.is_whitespace(), chunk_start) {
                (true, Some(start)) => {
                    split_chunk(text, start, i, &mut tokens);
                    chunk_start = None;
                }
                (false, None) => chunk_start = Some(i),
                _ => {}
            }
        }
        if let Some(start) = chunk_start {
            split_chunk(text, start, text.len(), &mut tokens);
        }

        Ok(tokens)
    }

    fn entities(&self, _text: &str, tokens: &[Token]) -> Result<Vec<Entity>, EnrichmentError> {
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let next = tokens.get(i + 1).map(Token::lower);

            if token.like_num {
                let (label, end) = match next.as_deref() {
                    Some(unit) if FREQUENCY_UNITS.contains(&unit) => (EntityLabel::Quantity, i + 2),
                    Some("%") => (EntityLabel::Percent, i + 2),
                    _ => (EntityLabel::Cardinal, i + 1),
                };
                entities.push(Entity { label, start: i, end });
                i = end;
                continue;
            }

            if ATTACHED_FREQUENCY.is_match(&token.text) {
                entities.push(Entity {
                    label: EntityLabel::Quantity,
                    start: i,
                    end: i + 1,
                });
            } else if is_path_like(&token.text) {
                entities.push(Entity {
                    label: EntityLabel::Path,
                    start: i,
                    end: i + 1,
                });
            }
            i += 1;
        }

        Ok(entities)
    }

    fn match_patterns(
        &self,
        _text: &str,
        tokens: &[Token],
    ) -> Result<Vec<PatternMatch>, EnrichmentError> {
        let mut matches = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if token.like_num {
                if let Some(next) = tokens.get(i + 1) {
                    if FREQUENCY_UNITS.contains(&next.lower().as_str()) {
                        matches.push(PatternMatch {
                            kind: PatternKind::FrequencyUnit,
                            start: i,
                            end: i + 2,
                        });
                    }
                }
            }

            let kind = if ATTACHED_FREQUENCY.is_match(&token.text) {
                Some(PatternKind::AttachedFrequency)
            } else if WINDOWS_PATH_TOKEN.is_match(&token.text) {
                Some(PatternKind::WindowsPath)
            } else if UNIX_PATH_TOKEN.is_match(&token.text) {
                Some(PatternKind::UnixPath)
            } else {
                None
            };

            if let Some(kind) = kind {
                matches.push(PatternMatch {
                    kind,
                    start: i,
                    end: i + 1,
                });
            }
        }

        Ok(matches)
    }
}

/// Split one whitespace-free chunk `text[start..end]` into tokens.
fn split_chunk(text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
    let chunk = &text[start..end];

    // Paths keep their internal punctuation.
    if chunk.contains('/') || chunk.contains('\\') {
        peel(text, start, end, tokens);
        return;
    }

    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut piece_start = 0;

    for (k, &(offset, c)) in chars.iter().enumerate() {
        let prev_digit = k > 0 && chars[k - 1].1.is_ascii_digit();
        let next_digit = chars.get(k + 1).is_some_and(|(_, n)| n.is_ascii_digit());

        let infix = match c {
            '=' => true,
            ',' => !(prev_digit && next_digit),
            '-' | '\u{2013}' | '\u{2014}' => prev_digit && next_digit,
            _ => false,
        };

        if infix {
            peel(text, start + piece_start, start + offset, tokens);
            let c_end = start + offset + c.len_utf8();
            push_token(text, start + offset, c_end, tokens);
            piece_start = offset + c.len_utf8();
        }
    }

    peel(text, start + piece_start, end, tokens);
}

/// Emit leading punctuation, the core and trailing punctuation as tokens.
fn peel(text: &str, mut start: usize, mut end: usize, tokens: &mut Vec<Token>) {
    while let Some(c) = text[start..end].chars().next() {
        if !PREFIX_PUNCT.contains(&c) {
            break;
        }
        push_token(text, start, start + c.len_utf8(), tokens);
        start += c.len_utf8();
    }

    let mut suffixes = Vec::new();
    while let Some(c) = text[start..end].chars().next_back() {
        if !SUFFIX_PUNCT.contains(&c) {
            break;
        }
        suffixes.push((end - c.len_utf8(), end));
        end -= c.len_utf8();
    }

    push_token(text, start, end, tokens);
    for (s, e) in suffixes.into_iter().rev() {
        push_token(text, s, e, tokens);
    }
}

fn push_token(text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
    if start >= end {
        return;
    }
    let slice = &text[start..end];
    tokens.push(Token::new(slice, start, end, like_num(slice)));
}

/// Number-like check: digits with optional sign and `,`/`.` separators,
/// simple fractions, or a small set of number words.
fn like_num(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-', '~', '\u{b1}']);
    let digits: String = unsigned.chars().filter(|c| *c != ',' && *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if let Some((num, den)) = unsigned.split_once('/') {
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if all_digits(num) && all_digits(den) {
            return true;
        }
    }

    NUMBER_WORDS.contains(&text.to_lowercase().as_str())
}

fn is_path_like(text: &str) -> bool {
    (text.contains('/') || text.contains('\\')) && has_data_extension(text)
}
