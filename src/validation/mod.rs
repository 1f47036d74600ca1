//! Server-side validation of the task form.
//!
//! Every field is checked on every submission so the user sees all problems in
//! one round trip. Errors come back in check order: title, description, due
//! date, then status. Error summaries rely on that order.
//!
//! `assets/task-form.js` carries an independent copy of these rules for the
//! browser. The two are kept in line by `contract/form_validation.json`, which
//! the tests below replay against this module.

mod date_parts;

pub use date_parts::{
    local_today, parse_due_date, start_of_day, DateError, MAX_YEAR, MIN_YEAR,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{TaskFormInput, TaskPayload, TaskStatus};

pub const TITLE_ANCHOR: &str = "#title";
pub const DESCRIPTION_ANCHOR: &str = "#description";
pub const DUE_DATE_ANCHOR: &str = "#dueDate-day";
pub const STATUS_ANCHOR: &str = "#status";

/// Characters stripped from both ends of form values before checking.
///
/// The same set as the character class in `assets/task-form.js`. Listed
/// explicitly because `str::trim` and JavaScript's `trim` disagree on
/// U+FEFF and U+0085.
pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0b}'
            | '\u{0c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Trim [`is_form_whitespace`] characters from both ends.
pub fn trim_form(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

/// A validation failure tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    /// Fragment of the input the message belongs to, e.g. `#title`.
    pub anchor: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            anchor: anchor.into(),
        }
    }
}

/// Either the normalized write payload or a non-empty, ordered error list.
pub type ValidationOutcome = Result<TaskPayload, Vec<FieldError>>;

/// Which form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Missing status falls back to TODO.
    Create,
    /// Status must be supplied.
    Edit,
}

/// Validate a submitted form against `today` (local calendar date).
pub fn validate_task_form(
    input: &TaskFormInput,
    mode: FormMode,
    today: NaiveDate,
) -> ValidationOutcome {
    let mut errors = Vec::new();

    let title = trim_form(&input.title);
    if title.is_empty() {
        errors.push(FieldError::new("Title is required", TITLE_ANCHOR));
    }

    let description = trim_form(&input.description);
    if description.is_empty() {
        errors.push(FieldError::new(
            "Description is required",
            DESCRIPTION_ANCHOR,
        ));
    }

    let due_date = match parse_due_date(
        &input.due_day,
        &input.due_month,
        &input.due_year,
        today,
    ) {
        Ok(date) => date,
        Err(e) => {
            errors.push(FieldError::new(e.to_string(), DUE_DATE_ANCHOR));
            None
        }
    };

    let status = match (input.status.as_deref().map(trim_form), mode) {
        (Some(raw), _) if !raw.is_empty() => match raw.parse::<TaskStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FieldError::new(
                    "Please select a valid status",
                    STATUS_ANCHOR,
                ));
                None
            }
        },
        (_, FormMode::Create) => Some(TaskStatus::Todo),
        (_, FormMode::Edit) => {
            errors.push(FieldError::new("Status is required", STATUS_ANCHOR));
            None
        }
    };

    match status {
        Some(status) if errors.is_empty() => Ok(TaskPayload {
            title: title.to_string(),
            description: description.to_string(),
            status,
            due_date: due_date.map(start_of_day),
        }),
        _ => Err(errors),
    }
}

/// Validate a create-form submission against the current local date.
pub fn validate_create(input: &TaskFormInput) -> ValidationOutcome {
    validate_task_form(input, FormMode::Create, local_today())
}

/// Validate an edit-form submission against the current local date.
pub fn validate_edit(input: &TaskFormInput) -> ValidationOutcome {
    validate_task_form(input, FormMode::Edit, local_today())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = include_str!("../../contract/form_validation.json");
    const CLIENT_SCRIPT: &str = include_str!("../../assets/task-form.js");

    #[derive(Deserialize)]
    struct Contract {
        today: NaiveDate,
        cases: Vec<ContractCase>,
    }

    #[derive(Deserialize)]
    struct ContractCase {
        name: String,
        mode: FormMode,
        input: TaskFormInput,
        server: Vec<FieldError>,
        client: Vec<FieldError>,
    }

    fn contract() -> Contract {
        serde_json::from_str(CONTRACT).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn input(
        title: &str,
        description: &str,
        status: Option<&str>,
        d: &str,
        m: &str,
        y: &str,
    ) -> TaskFormInput {
        TaskFormInput {
            title: title.into(),
            description: description.into(),
            status: status.map(Into::into),
            due_day: d.into(),
            due_month: m.into(),
            due_year: y.into(),
        }
    }

    #[test]
    fn contract_vectors_hold_for_server_rules() {
        let contract = contract();
        assert!(!contract.cases.is_empty());
        for case in contract.cases {
            let outcome = validate_task_form(&case.input, case.mode, contract.today);
            let errors = outcome.err().unwrap_or_default();
            assert_eq!(errors, case.server, "case `{}`", case.name);
        }
    }

    /// Run `validateTaskForm` from the browser script in an embedded engine.
    fn run_client(input: &TaskFormInput, today: NaiveDate) -> Vec<FieldError> {
        use boa_engine::{Context, Source};
        use chrono::Datelike;

        let script = format!(
            "var module = {{ exports: {{}} }};\n{}\n\
             JSON.stringify(module.exports.validateTaskForm({}, new Date({}, {}, {})));",
            CLIENT_SCRIPT,
            serde_json::to_string(input).unwrap(),
            today.year(),
            today.month0(),
            today.day(),
        );
        let mut context = Context::default();
        let value = context
            .eval(Source::from_bytes(script.as_bytes()))
            .unwrap_or_else(|e| panic!("client script failed: {}", e));
        let json = value
            .as_string()
            .map(|s| s.to_std_string_escaped())
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn contract_vectors_hold_for_client_script() {
        let contract = contract();
        for case in contract.cases {
            let errors = run_client(&case.input, contract.today);
            assert_eq!(errors, case.client, "case `{}`", case.name);
        }
    }

    #[test]
    fn both_copies_agree_on_whitespace_padding() {
        // every character the server strips must also be stripped in the browser
        let padding = [
            '\t', '\n', '\u{0b}', '\u{0c}', '\r', ' ', '\u{a0}', '\u{1680}', '\u{2000}',
            '\u{200a}', '\u{2028}', '\u{2029}', '\u{202f}', '\u{205f}', '\u{3000}', '\u{feff}',
        ];
        for c in padding {
            assert!(is_form_whitespace(c), "{:?}", c);
            let pad = c.to_string();
            let form = input(&pad, "A long enough description", None, &pad, &pad, &pad);
            let expected = vec![FieldError::new("Title is required", TITLE_ANCHOR)];
            assert_eq!(
                validate_task_form(&form, FormMode::Create, today()).unwrap_err(),
                expected,
                "server, {:?}",
                c
            );
            assert_eq!(run_client(&form, today()), expected, "client, {:?}", c);
        }
        // NEL is not whitespace to either copy
        assert!(!is_form_whitespace('\u{85}'));
        let form = input("\u{85}", "A long enough description", None, "", "", "");
        assert!(validate_task_form(&form, FormMode::Create, today()).is_ok());
    }

    #[test]
    fn client_script_carries_every_contract_message() {
        for case in contract().cases {
            for error in case.server.iter().chain(case.client.iter()) {
                // the script validates status through the control, not text
                if error.anchor == STATUS_ANCHOR {
                    continue;
                }
                assert!(
                    CLIENT_SCRIPT.contains(&error.message),
                    "client script is missing `{}`",
                    error.message
                );
                assert!(CLIENT_SCRIPT.contains(&error.anchor));
            }
        }
    }

    #[test]
    fn client_rules_are_never_looser_than_server_rules() {
        // every input the browser accepts must also pass on the server
        let contract = contract();
        for case in contract.cases {
            if case.client.is_empty() {
                let server_text: Vec<_> = case
                    .server
                    .iter()
                    .filter(|e| e.anchor != STATUS_ANCHOR)
                    .collect();
                assert!(server_text.is_empty(), "case `{}`", case.name);
            }
        }
    }

    #[test]
    fn empty_title_is_reported_and_other_fields_still_checked() {
        let errors = validate_task_form(
            &input("", "Task description", Some("TODO"), "", "", ""),
            FormMode::Create,
            today(),
        )
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("Title is required", "#title")]);
    }

    #[test]
    fn all_errors_reported_in_field_order() {
        let errors = validate_task_form(
            &input("  ", "\t", Some("BOGUS"), "1", "1", "2001"),
            FormMode::Edit,
            today(),
        )
        .unwrap_err();
        let anchors: Vec<_> = errors.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["#title", "#description", "#dueDate-day", "#status"]);
    }

    #[test]
    fn success_trims_and_defaults_status_on_create() {
        let payload = validate_task_form(
            &input("  Buy milk ", " Two pints  ", None, "11", "3", "2026"),
            FormMode::Create,
            today(),
        )
        .unwrap();
        assert_eq!(payload.title, "Buy milk");
        assert_eq!(payload.description, "Two pints");
        assert_eq!(payload.status, TaskStatus::Todo);
        assert_eq!(
            payload.due_date,
            Some(start_of_day(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()))
        );
    }

    #[test]
    fn edit_requires_status() {
        let errors = validate_task_form(
            &input("Title", "Description", Some("  "), "", "", ""),
            FormMode::Edit,
            today(),
        )
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("Status is required", "#status")]);

        let payload = validate_task_form(
            &input("Title", "Description", Some("COMPLETED"), "", "", ""),
            FormMode::Edit,
            today(),
        )
        .unwrap();
        assert_eq!(payload.status, TaskStatus::Completed);
        assert_eq!(payload.due_date, None);
    }

    #[test]
    fn server_accepts_short_text_the_browser_would_nudge() {
        let form = input("Hi", "Short", None, "", "", "");
        assert!(validate_task_form(&form, FormMode::Create, today()).is_ok());
    }

    #[test]
    fn byte_order_mark_title_is_blank() {
        let errors = validate_task_form(
            &input("\u{feff}", "Description", None, "", "", ""),
            FormMode::Create,
            today(),
        )
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("Title is required", "#title")]);
    }

    #[test]
    fn trim_form_strips_byte_order_marks_and_no_break_spaces() {
        assert_eq!(trim_form("\u{feff}\u{a0} Buy milk\u{3000}"), "Buy milk");
        assert_eq!(trim_form("\u{feff}"), "");
        assert_eq!(trim_form("a\u{feff}b"), "a\u{feff}b");
    }

    #[test]
    fn incomplete_date_message() {
        let errors = validate_task_form(
            &input("Title", "Description", None, "15", "12", ""),
            FormMode::Create,
            today(),
        )
        .unwrap_err();
        assert_eq!(
            errors[0].message,
            "Please enter a complete due date or leave all fields blank."
        );
        assert_eq!(errors[0].anchor, "#dueDate-day");
    }
}
