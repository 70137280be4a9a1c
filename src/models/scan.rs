// ============================================================================
// SCAN - photo-based book registration
// ============================================================================
// A book is registered from three photos: the cover (title), the imprint
// page (author + ISBN) and the price page. The backend keeps the partial
// metadata under a temporary id between steps.
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::book::{normalize_isbn, validate_isbn13, NewBook};

pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Cover,
    Info,
    Price,
}

impl ScanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Cover => "cover",
            ScanKind::Info => "info",
            ScanKind::Price => "price",
        }
    }

    pub fn next(&self) -> Option<ScanKind> {
        match self {
            ScanKind::Cover => Some(ScanKind::Info),
            ScanKind::Info => Some(ScanKind::Price),
            ScanKind::Price => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScanKind::Cover => "Cover",
            ScanKind::Info => "Imprint page",
            ScanKind::Price => "Price",
        }
    }
}

/// Photo picked by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ScanImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ScanImage {
    pub fn is_supported(&self) -> bool {
        SUPPORTED_IMAGE_TYPES.contains(&self.content_type.as_str())
    }
}

/// Response of `/scan_book`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanResult {
    pub temp_id: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub next_step: Option<ScanKind>,
}

/// Editable metadata collected from the scan steps. Price and copies are
/// kept as typed so partial input ("39.") survives re-rendering; they are
/// parsed on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub total: String,
}

impl Default for BookDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            price: String::new(),
            total: "1".to_string(),
        }
    }
}

impl BookDraft {
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["title", "author", "isbn"];

    /// Overlay recognised fields onto the draft; unknown or null fields are
    /// left untouched.
    pub fn merge_metadata(&mut self, metadata: &Map<String, Value>) {
        if let Some(title) = metadata.get("title").and_then(Value::as_str) {
            self.title = title.to_string();
        }
        if let Some(author) = metadata.get("author").and_then(Value::as_str) {
            self.author = author.to_string();
        }
        if let Some(isbn) = metadata.get("isbn").and_then(Value::as_str) {
            self.isbn = isbn.to_string();
        }
        match metadata.get("price") {
            Some(Value::Number(n)) => self.price = n.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => self.price = s.trim().to_string(),
            _ => {}
        }
        if let Some(total) = metadata.get("total").and_then(Value::as_u64) {
            self.total = total.to_string();
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [&self.title, &self.author, &self.isbn];
        Self::REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn has_valid_isbn(&self) -> bool {
        validate_isbn13(&normalize_isbn(&self.isbn))
    }

    /// Empty means no price
    pub fn parsed_price(&self) -> Result<Option<f64>, String> {
        let raw = self.price.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
            _ => Err(format!("Invalid price: {}", raw)),
        }
    }

    /// Empty means one copy
    pub fn parsed_total(&self) -> Result<u32, String> {
        let raw = self.total.trim();
        if raw.is_empty() {
            return Ok(1);
        }
        raw.parse::<u32>()
            .map(|total| total.max(1))
            .map_err(|_| format!("Invalid number of copies: {}", raw))
    }

    /// Payload for `/finalize_book`
    pub fn to_metadata(&self) -> Result<Map<String, Value>, String> {
        let price = self.parsed_price()?;
        let mut map = Map::new();
        map.insert("title".into(), Value::from(self.title.trim()));
        map.insert("author".into(), Value::from(self.author.trim()));
        map.insert("isbn".into(), Value::from(normalize_isbn(&self.isbn)));
        map.insert("total".into(), Value::from(self.parsed_total()?));
        if let Some(price) = price {
            map.insert("price".into(), Value::from(price));
        }
        Ok(map)
    }

    /// Payload for `/create_books`, used when nothing was scanned
    pub fn to_new_book(&self) -> Result<NewBook, String> {
        let isbn = normalize_isbn(&self.isbn);
        Ok(NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            total: self.parsed_total()?,
            isbn: (!isbn.is_empty()).then_some(isbn),
            price: self.parsed_price()?,
        })
    }
}

/// Progress of one photo registration
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSession {
    /// `None` once every photo is taken or skipped (review)
    pub step: Option<ScanKind>,
    /// Backend id of the partial record, set by the first scan
    pub temp_id: Option<String>,
    pub draft: BookDraft,
    /// Photo picked for the current step, not uploaded yet
    pub image: Option<ScanImage>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self {
            step: Some(ScanKind::Cover),
            temp_id: None,
            draft: BookDraft::default(),
            image: None,
        }
    }
}

impl ScanSession {
    pub fn is_reviewing(&self) -> bool {
        self.step.is_none()
    }

    /// No photo reached the backend; saving creates the book directly
    pub fn is_manual(&self) -> bool {
        self.temp_id.is_none()
    }

    /// Record a recognised step and move to the one the backend asks for
    pub fn apply(&mut self, result: &ScanResult) {
        self.draft.merge_metadata(&result.metadata);
        self.temp_id = Some(result.temp_id.clone());
        self.step = result.next_step;
        self.image = None;
    }

    /// Move past the current photo without uploading it
    pub fn skip(&mut self) {
        self.step = self.step.and_then(|kind| kind.next());
        self.image = None;
    }

    pub fn review(&mut self) {
        self.step = None;
        self.image = None;
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn steps_follow_cover_info_price() {
        assert_eq!(ScanKind::Cover.next(), Some(ScanKind::Info));
        assert_eq!(ScanKind::Info.next(), Some(ScanKind::Price));
        assert_eq!(ScanKind::Price.next(), None);
    }

    #[test]
    fn scan_result_parses_next_step() {
        let result: ScanResult = serde_json::from_value(json!({
            "temp_id": "5f3a8b2c",
            "metadata": {"title": "Rust"},
            "next_step": "info"
        }))
        .unwrap();
        assert_eq!(result.next_step, Some(ScanKind::Info));

        let last: ScanResult = serde_json::from_value(json!({
            "temp_id": "5f3a8b2c",
            "metadata": {},
            "next_step": null
        }))
        .unwrap();
        assert_eq!(last.next_step, None);
    }

    #[test]
    fn draft_merges_and_reports_missing() {
        let mut draft = BookDraft::default();
        draft.merge_metadata(json!({"title": "Rust", "author": null}).as_object().unwrap());

        assert_eq!(draft.title, "Rust");
        assert_eq!(draft.missing_fields(), vec!["author", "isbn"]);

        draft.merge_metadata(
            json!({"author": "Klabnik", "isbn": "978-0-306-40615-7", "price": 39.5})
                .as_object()
                .unwrap(),
        );
        assert!(draft.missing_fields().is_empty());
        assert!(draft.has_valid_isbn());
        assert_eq!(draft.price, "39.5");
        assert_eq!(draft.parsed_price(), Ok(Some(39.5)));
    }

    #[test]
    fn typed_price_and_copies_keep_partial_input() {
        let mut draft = BookDraft::default();
        // Each keystroke appends to what the field currently shows
        for ch in "39.5".chars() {
            let shown = draft.price.clone();
            draft.price = format!("{}{}", shown, ch);
        }
        assert_eq!(draft.price, "39.5");
        assert_eq!(draft.parsed_price(), Ok(Some(39.5)));

        draft.total.clear();
        for ch in "5".chars() {
            let shown = draft.total.clone();
            draft.total = format!("{}{}", shown, ch);
        }
        assert_eq!(draft.parsed_total(), Ok(5));
    }

    #[test]
    fn bad_numbers_fail_on_submit() {
        let draft = BookDraft {
            title: "Rust".into(),
            author: "Klabnik".into(),
            isbn: "9780306406157".into(),
            price: "39,5".into(),
            total: "two".into(),
        };
        assert_eq!(draft.parsed_price(), Err("Invalid price: 39,5".to_string()));
        assert_eq!(draft.parsed_total(), Err("Invalid number of copies: two".to_string()));
        assert!(draft.to_metadata().is_err());
        assert!(draft.to_new_book().is_err());

        let empty = BookDraft {
            price: " ".into(),
            total: String::new(),
            ..draft
        };
        assert_eq!(empty.parsed_price(), Ok(None));
        assert_eq!(empty.parsed_total(), Ok(1));
    }

    #[test]
    fn manual_draft_becomes_new_book() {
        let draft = BookDraft {
            title: "Rust ".into(),
            author: "Klabnik".into(),
            isbn: "978-0-306-40615-7".into(),
            price: "59".into(),
            total: "3".into(),
        };
        assert_eq!(
            draft.to_new_book(),
            Ok(NewBook {
                title: "Rust".into(),
                author: "Klabnik".into(),
                total: 3,
                isbn: Some("9780306406157".into()),
                price: Some(59.0),
            })
        );
    }

    fn photo(content_type: &str) -> ScanImage {
        ScanImage {
            file_name: "page".into(),
            content_type: content_type.into(),
            bytes: vec![0xff, 0xd8],
        }
    }

    #[test]
    fn session_follows_backend_steps() {
        let mut session = ScanSession::default();
        assert!(session.is_manual());
        session.image = Some(photo("image/jpeg"));

        session.apply(&ScanResult {
            temp_id: "5f3a8b2c".into(),
            metadata: json!({"title": "Rust"}).as_object().unwrap().clone(),
            next_step: Some(ScanKind::Info),
        });

        assert_eq!(session.step, Some(ScanKind::Info));
        assert_eq!(session.temp_id.as_deref(), Some("5f3a8b2c"));
        assert_eq!(session.draft.title, "Rust");
        assert!(session.image.is_none());
        assert!(!session.is_manual());
    }

    #[test]
    fn skipping_walks_to_review() {
        let mut session = ScanSession::default();
        session.skip();
        assert_eq!(session.step, Some(ScanKind::Info));
        session.skip();
        session.skip();
        assert!(session.is_reviewing());
    }

    #[test]
    fn restart_drops_picked_photo() {
        let mut session = ScanSession::default();
        session.skip();
        session.temp_id = Some("5f3a8b2c".into());
        session.draft.title = "Rust".into();
        session.image = Some(photo("image/png"));

        session.restart();

        assert_eq!(session, ScanSession::default());
        assert!(session.image.is_none());
        assert_eq!(session.step, Some(ScanKind::Cover));
    }

    #[test]
    fn draft_metadata_defaults_total_to_one() {
        let draft = BookDraft {
            title: " Rust ".into(),
            author: "Klabnik".into(),
            isbn: "978-0-306-40615-7".into(),
            price: String::new(),
            total: "0".into(),
        };
        assert_eq!(
            Value::Object(draft.to_metadata().unwrap()),
            json!({"title": "Rust", "author": "Klabnik", "isbn": "9780306406157", "total": 1})
        );
    }

    #[test]
    fn only_jpeg_and_png_are_accepted() {
        let mut image = ScanImage {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, 0x50],
        };
        assert!(image.is_supported());
        image.content_type = "image/gif".into();
        assert!(!image.is_supported());
    }
}
