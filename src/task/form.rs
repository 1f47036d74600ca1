//! Raw task form submission.

use serde::{Deserialize, Serialize};

/// Values exactly as the browser submitted them.
///
/// Nothing is trimmed or normalized here: the same struct is echoed back as
/// `formData` when a form is re-rendered, so the user sees what they typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFormInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "dueDate-day")]
    pub due_day: String,
    #[serde(default, rename = "dueDate-month")]
    pub due_month: String,
    #[serde(default, rename = "dueDate-year")]
    pub due_year: String,
}
