use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `/borrow`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub book_id: String,
    pub borrower_phone: String,
    pub borrower_name: String,
    pub borrower_college: String,
}

impl BorrowRequest {
    /// Names of the fields left blank
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("book_id", &self.book_id),
            ("borrower_phone", &self.borrower_phone),
            ("borrower_name", &self.borrower_name),
            ("borrower_college", &self.borrower_college),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Body of `/return_book`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub book_id: String,
    pub borrower_phone: String,
}

/// Response of `/borrower_loans`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LoanCount {
    pub borrowed_count: u32,
}

/// Response of `/borrower_info`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BorrowerInfo {
    pub name: String,
    pub college: String,
    pub total_borrowed: u32,
    #[serde(default)]
    pub books: Vec<Loan>,
}

/// An open loan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Loan {
    pub book_id: String,
    pub borrow_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
}

impl Loan {
    /// Whole days left before the due date (negative once overdue)
    pub fn days_until_due(&self, now: NaiveDateTime) -> i64 {
        (self.due_date - now).num_days()
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        now > self.due_date
    }
}

/// `{"message": ...}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn borrower_info_parses_iso_timestamps() {
        let info: BorrowerInfo = serde_json::from_value(json!({
            "name": "Li Lei",
            "college": "Computer Science",
            "total_borrowed": 1,
            "books": [{
                "book_id": "5f3a8b2c",
                "borrow_date": "2026-03-01T10:20:30.123456",
                "due_date": "2026-03-15T10:20:30.123456"
            }]
        }))
        .unwrap();

        let loan = &info.books[0];
        assert_eq!(loan.days_until_due(at("2026-03-05T10:20:30")), 10);
        assert!(!loan.is_overdue(at("2026-03-05T10:20:30")));
        assert!(loan.is_overdue(at("2026-03-16T00:00:00")));
    }

    #[test]
    fn borrow_request_blank_fields() {
        let request = BorrowRequest {
            book_id: "a1".into(),
            borrower_phone: " ".into(),
            borrower_name: "Li Lei".into(),
            borrower_college: String::new(),
        };
        assert_eq!(
            request.blank_fields(),
            vec!["borrower_phone", "borrower_college"]
        );
    }
}
