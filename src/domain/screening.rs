use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::text_enum;
use crate::domain::types::ScreeningNote;

text_enum!(
    ScreeningKind {
        License => "license",
        Background => "background",
        Drug => "drug",
    }
);

text_enum!(
    ScreeningResult {
        Pending => "pending",
        Passed => "passed",
        Failed => "failed",
    }
);

/// Append-only driver screening log entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScreeningLog {
    pub id: i32,
    pub org_id: i32,
    pub driver_id: i32,
    pub kind: ScreeningKind,
    pub result: ScreeningResult,
    pub note: Option<String>,
    pub screened_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewScreeningLog {
    pub org_id: i32,
    pub driver_id: i32,
    pub kind: ScreeningKind,
    pub result: ScreeningResult,
    pub note: Option<String>,
    pub screened_at: NaiveDateTime,
}

impl NewScreeningLog {
    /// Notes arrive as free text from a form and are stored sanitized; an
    /// empty note (after sanitization) is stored as no note.
    #[must_use]
    pub fn new(
        org_id: i32,
        driver_id: i32,
        kind: ScreeningKind,
        result: ScreeningResult,
        note: Option<String>,
        screened_at: NaiveDateTime,
    ) -> Self {
        Self {
            org_id,
            driver_id,
            kind,
            result,
            note: note.and_then(|s| ScreeningNote::new(s).ok().map(ScreeningNote::into_inner)),
            screened_at,
        }
    }
}
