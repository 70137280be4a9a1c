use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Book record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub available: u32,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price: Option<f64>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available > 0
    }

    pub fn borrowed(&self) -> u32 {
        self.total.saturating_sub(self.available)
    }
}

/// Body of `/search_books`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub data: Vec<T>,
    pub total: u32,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> SearchPage<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Response of `/book_detail`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookStats {
    pub available: i64,
    pub borrowed: i64,
    pub average_borrow_days: f64,
    pub earliest_due_days: i64,
}

/// Body of `/create_books`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// `{"id": ...}` returned by book creation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedBook {
    pub id: String,
}

/// Removes the separators people type or print inside an ISBN
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect()
}

/// ISBN-13 checksum: digits weighted 1,3,1,3... over the first twelve
pub fn validate_isbn13(isbn: &str) -> bool {
    if isbn.len() != 13 || !isbn.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = isbn.bytes().map(|b| u32::from(b - b'0')).collect();
    let total: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 1 { d * 3 } else { *d })
        .sum();
    let check = (10 - total % 10) % 10;

    check == digits[12]
}

// The backend keeps books in CSV: missing ISBNs arrive as "", and prices may
// come back as strings.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Value::Null => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "invalid price: {}",
            other
        ))),
    }
}
