//! Book model and related request/response types

use std::borrow::Cow;

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Length of generated book ids
pub const BOOK_ID_LEN: usize = 16;

/// Query flag value selecting `true` for `reading` / `finished`
pub const FLAG_TRUE: &str = "1";

/// Book record as stored on the shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[schema(example = "Qbax5Oy7L8WKf74l")]
    pub id: String,
    pub name: String,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    /// Derived: `readPage == pageCount`
    pub finished: bool,
    pub reading: Option<bool>,
    /// Millisecond precision, e.g. `2026-10-19T14:34:36.858Z`
    #[serde(serialize_with = "iso_millis")]
    pub inserted_at: DateTime<Utc>,
    /// Millisecond precision; strictly later than the previous value on update
    #[serde(serialize_with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

fn iso_millis<S: serde::Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Current time truncated to the precision timestamps are exposed with
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl Book {
    /// Build a new record from an already validated payload
    pub fn new(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = is_finished(payload.page_count, payload.read_page);
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping `id` and `inserted_at`.
    ///
    /// `updated_at` always moves forward, even if the wall clock did not.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.finished = is_finished(self.page_count, self.read_page);
        self.updated_at = now.max(self.updated_at + Duration::milliseconds(1));
    }

    /// Finished state computed from the page counters
    pub fn is_finished(&self) -> bool {
        is_finished(self.page_count, self.read_page)
    }

    /// Full projection with `finished` recomputed from the page counters
    pub fn detail(&self) -> Book {
        Book {
            finished: self.is_finished(),
            ..self.clone()
        }
    }

    pub fn short(&self) -> BookShort {
        BookShort {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Short book representation for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Create / update book request.
///
/// Any field may be absent; `finished` is never accepted from clients.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_page_progress"))]
pub struct BookPayload {
    #[validate(
        required(message = "name required"),
        length(min = 1, message = "name required")
    )]
    #[schema(example = "Dunia Sophie")]
    pub name: Option<String>,
    pub year: Option<i64>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i64>,
    pub read_page: Option<i64>,
    pub reading: Option<bool>,
}

fn validate_page_progress(payload: &BookPayload) -> Result<(), ValidationError> {
    if read_page_within_page_count(payload.page_count, payload.read_page) {
        return Ok(());
    }
    let mut err = ValidationError::new("read_page_exceeds_page_count");
    err.message = Some(Cow::from("readPage exceeds pageCount"));
    Err(err)
}

/// Book list query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, any other value for the rest
    pub reading: Option<String>,
    /// `1` for finished books, any other value for the rest
    pub finished: Option<String>,
}

impl BookQuery {
    /// Build from raw query pairs; the first occurrence of a repeated key wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Decoded list filters; `None` means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Lowercased name fragment
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn matches_name(&self, book: &Book) -> bool {
        match &self.name {
            Some(fragment) => book.name.to_lowercase().contains(fragment.as_str()),
            None => true,
        }
    }

    /// Books with no declared reading status never match a reading filter
    pub fn matches_reading(&self, book: &Book) -> bool {
        match self.reading {
            Some(reading) => book.reading == Some(reading),
            None => true,
        }
    }

    pub fn matches_finished(&self, book: &Book) -> bool {
        match self.finished {
            Some(finished) => book.finished == finished,
            None => true,
        }
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        Self {
            name: query
                .name
                .filter(|name| !name.is_empty())
                .map(|name| name.to_lowercase()),
            reading: query.reading.as_deref().map(parse_flag),
            finished: query.finished.as_deref().map(parse_flag),
        }
    }
}

/// `"1"` selects true, anything else false
pub fn parse_flag(value: &str) -> bool {
    value == FLAG_TRUE
}

/// A book is finished when both counters agree, including both being absent
pub fn is_finished(page_count: Option<i64>, read_page: Option<i64>) -> bool {
    page_count == read_page
}

/// Only comparable when both counters are present
pub fn read_page_within_page_count(page_count: Option<i64>, read_page: Option<i64>) -> bool {
    match (page_count, read_page) {
        (Some(page_count), Some(read_page)) => read_page <= page_count,
        _ => true,
    }
}

/// Generate a random alphanumeric book id
pub fn generate_book_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOOK_ID_LEN)
        .map(char::from)
        .collect()
}
