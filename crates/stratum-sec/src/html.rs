//! Plain-text extraction from filing documents.

use html5gum::{
    Tokenizer,
    emitters::callback::{Callback, CallbackEmitter, CallbackEvent},
};

/// Maximum number of characters kept from a filing document.
pub const MAX_FILING_TEXT_CHARS: usize = 50_000;

/// Collects the character data of an HTML document, skipping the content of
/// `<script>` and `<style>` elements.
#[derive(Debug, Default)]
struct TextExtractor {
    text: String,
    /// Name of the element whose start tag is being read.
    current_element: String,
    /// Open `<script>`/`<style>` elements.
    hidden_stack: Vec<String>,
}

fn is_hidden_elem(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}

impl Callback<(), usize> for &mut TextExtractor {
    fn handle_event(
        &mut self,
        event: CallbackEvent<'_>,
        _span: html5gum::Span<usize>,
    ) -> Option<()> {
        match event {
            CallbackEvent::OpenStartTag { name } => {
                self.current_element = String::from_utf8_lossy(name).into_owned();
            }
            CallbackEvent::CloseStartTag { self_closing } => {
                if !self_closing && is_hidden_elem(&self.current_element) {
                    self.hidden_stack.push(self.current_element.clone());
                }
            }
            CallbackEvent::EndTag { name } => {
                let name = String::from_utf8_lossy(name);
                if self
                    .hidden_stack
                    .last()
                    .is_some_and(|open| open.eq_ignore_ascii_case(&name))
                {
                    self.hidden_stack.pop();
                }
            }
            CallbackEvent::String { value } => {
                if self.hidden_stack.is_empty() {
                    self.text.push_str(&String::from_utf8_lossy(value));
                }
            }
            CallbackEvent::AttributeName { .. }
            | CallbackEvent::AttributeValue { .. }
            | CallbackEvent::Comment { .. }
            | CallbackEvent::Doctype { .. }
            | CallbackEvent::Error(_) => {}
        }
        None
    }
}

/// Returns the visible text of an HTML document.
///
/// Every line is trimmed and split on runs of two spaces; each non-empty
/// chunk becomes its own line. The result is cut to
/// [`MAX_FILING_TEXT_CHARS`] characters.
#[must_use]
pub fn extract_text(html: &str) -> String {
    let mut extractor = TextExtractor::default();
    let mut emitter = CallbackEmitter::new(&mut extractor);
    // Read script and style bodies as raw text so a stray `<` cannot hide the
    // closing tag.
    emitter.naively_switch_states(true);
    Tokenizer::new_with_emitter(html, emitter).for_each(drop);

    let cleaned = extractor
        .text
        .lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    truncate_chars(cleaned, MAX_FILING_TEXT_CHARS)
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
    text
}
