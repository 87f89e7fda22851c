//! Preview model: turns arbitrary JSON into a read-only presentation tree
//!
//! Dispatch order matters:
//! - null, false, zero and the empty string render a "No data" placeholder
//! - arrays render as a bulleted list of compact items
//! - a books catalog object (only at the top level of the books file)
//!   renders as a heading plus one card per book
//! - everything else renders as a pretty-printed block

use serde_json::{Map, Value};

use super::document::{compact, pretty};
use super::fetch::LoadResult;

/// Path suffix of the file that gets the catalog layout
pub const BOOKS_SUFFIX: &str = "pages/books.json";

pub const NO_DATA: &str = "No data";
pub const FETCH_FAILED: &str = "Cannot preview: file fetch failed.";
const DEFAULT_CATALOG_HEADING: &str = "Books";

/// Rendered preview content
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewNode {
    /// Literal placeholder text
    Placeholder(String),
    /// Inline diagnostic for a failed fetch
    Warning(String),
    /// One bullet per array element
    List(Vec<String>),
    /// Specialized books layout
    Catalog { heading: String, cards: Vec<BookCard> },
    /// Generic pretty-printed JSON
    Block(String),
}

/// One book entry in the catalog layout
#[derive(Debug, Clone, PartialEq)]
pub struct BookCard {
    pub title: String,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub link: BookLink,
}

/// Target of a card's "Open" link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookLink {
    Url(String),
    /// No `pdfUrl`; rendered as a link that goes nowhere
    Dead,
}

impl Default for PreviewNode {
    fn default() -> Self {
        PreviewNode::Placeholder(NO_DATA.to_string())
    }
}

/// Render the result of loading `selection`
pub fn render_load(result: &LoadResult, selection: Option<&str>) -> PreviewNode {
    match result {
        LoadResult::Loaded(value) => render(value, selection),
        LoadResult::Failed => PreviewNode::Warning(FETCH_FAILED.to_string()),
    }
}

/// Render `value` as previewed while `selection` is the active file
pub fn render(value: &Value, selection: Option<&str>) -> PreviewNode {
    match value {
        _ if is_empty_value(value) => PreviewNode::Placeholder(NO_DATA.to_string()),
        Value::Array(items) => PreviewNode::List(items.iter().map(compact).collect()),
        Value::Object(obj) if is_books_file(selection) => {
            catalog(obj).unwrap_or_else(|| PreviewNode::Block(pretty(value)))
        }
        _ => PreviewNode::Block(pretty(value)),
    }
}

/// Values the preview treats as "no data"
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn is_books_file(selection: Option<&str>) -> bool {
    selection.is_some_and(|path| path.ends_with(BOOKS_SUFFIX))
}

/// Catalog layout, or `None` when `books` is missing or not an array
fn catalog(obj: &Map<String, Value>) -> Option<PreviewNode> {
    let books = obj.get("books")?.as_array()?;

    let heading = text_field(obj, "title").unwrap_or_else(|| DEFAULT_CATALOG_HEADING.to_string());
    let cards = books.iter().map(book_card).collect();

    Some(PreviewNode::Catalog { heading, cards })
}

fn book_card(book: &Value) -> BookCard {
    let empty = Map::new();
    let fields = book.as_object().unwrap_or(&empty);

    let link = match text_field(fields, "pdfUrl") {
        Some(url) if url != "#" => BookLink::Url(url),
        _ => BookLink::Dead,
    };

    BookCard {
        title: fields.get("title").map(title_text).unwrap_or_default(),
        tag: text_field(fields, "class"),
        description: text_field(fields, "description"),
        link,
    }
}

/// Card title; unlike the optional fields, falsy values are shown as-is
fn title_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => compact(other),
    }
}

/// Displayable text of a field; empty, null and false count as absent
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let value = obj.get(key)?;
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(compact(value)),
        _ => None,
    }
}

/// Resolve a catalog link against the site root; `None` if it cannot be parsed
pub fn resolve_link(site_root: &str, href: &str) -> Option<String> {
    let base = reqwest::Url::parse(site_root).ok()?;
    base.join(href).ok().map(String::from)
}
