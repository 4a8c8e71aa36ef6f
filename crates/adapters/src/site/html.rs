//! HTML extraction for generator pages
//!
//! Parsing stays in these synchronous helpers so `scraper::Html` (which is
//! not `Send`) is never held across an await point.

use scraper::{Html, Selector};
use shindan_toot_domain::FetchError;

/// Hidden form values the tokenized-form sites expect echoed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFields {
    pub token: String,
    pub hidden_name: String,
}

pub const TOKEN_FIELD: &str = "_token";
pub const HIDDEN_NAME_FIELD: &str = "hiddenName";

/// Extract `_token` and `hiddenName` from a form page
pub fn extract_hidden_fields(html: &str) -> Result<HiddenFields, FetchError> {
    let document = Html::parse_document(html);

    let token =
        input_value(&document, TOKEN_FIELD).ok_or(FetchError::MissingField(TOKEN_FIELD))?;
    let hidden_name = input_value(&document, HIDDEN_NAME_FIELD)
        .ok_or(FetchError::MissingField(HIDDEN_NAME_FIELD))?;

    Ok(HiddenFields { token, hidden_name })
}

/// Return the text of the first element id (in priority order) present in
/// the document, or `""` when none is
pub fn extract_result(html: &str, ids: &[&str]) -> String {
    let document = Html::parse_document(html);

    for id in ids {
        let Ok(selector) = Selector::parse(&format!("#{}", id)) else {
            tracing::debug!(id = %id, "Skipping unparsable result selector");
            continue;
        };

        let mut elements = document.select(&selector).peekable();
        if elements.peek().is_some() {
            return elements.flat_map(|element| element.text()).collect();
        }
    }

    String::new()
}

fn input_value(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, name)).ok()?;
    document
        .select(&selector)
        .find_map(|element| element.value().attr("value"))
        .map(String::from)
}
