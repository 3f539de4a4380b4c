//! Field validation.
//!
//! Validation is a pluggable capability: managers hold a `Box<dyn Validator>`
//! and run every incoming field through it before touching any data.
//! [`RegexValidator`] is the stock implementation.

use regex::Regex;
use std::sync::OnceLock;

/// Pure, stateless checks for the scalar fields of every entity.
///
/// Inputs are expected to be trimmed already.
pub trait Validator: Send + Sync {
    /// Checks a person's name.
    fn valid_name(&self, name: &str) -> bool;

    /// Checks a person's age.
    fn valid_age(&self, age: u32) -> bool;

    /// Checks an email address, returning a reason on failure.
    ///
    /// The reason may be empty when there is nothing more specific to say.
    fn check_email(&self, email: &str) -> Result<(), String>;

    /// Checks a student or instructor ID.
    fn valid_person_id(&self, id: &str) -> bool;

    /// Checks a course ID.
    fn valid_course_id(&self, course_id: &str) -> bool;

    /// Checks a course name.
    fn valid_course_name(&self, course_name: &str) -> bool;
}

/// Inclusive age bounds accepted by [`RegexValidator`].
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 0..=120;

const NAME_PATTERN: &str = r"^[\p{L}\p{M}' .-]+$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";
const PERSON_ID_PATTERN: &str = r"^[0-9]{9}$";
const COURSE_ID_PATTERN: &str = r"^[a-zA-Z]{4}[0-9]{3}[a-zA-Z]?$";
const COURSE_NAME_PATTERN: &str = r"^[a-zA-Z0-9 '.,:&()/-]+$";

/// Compiles `pattern` once and matches `value` against it.
///
/// A pattern that fails to compile is logged and treated as a non-match.
fn full_match(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    let regex = cell.get_or_init(|| match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(
                pattern = pattern,
                error = %e,
                "Invalid validation pattern, treating as non-match"
            );
            None
        }
    });
    regex.as_ref().is_some_and(|r| r.is_match(value))
}

/// The stock validator.
///
/// | field | rule |
/// |---|---|
/// | name | Unicode letters and marks, apostrophe, space, dot, hyphen |
/// | age | 0 to 120 inclusive |
/// | email | `local@domain.tld` with a conservative character set |
/// | person ID | exactly 9 digits, e.g. `202456789` |
/// | course ID | 4 letters, 3 digits, optional letter, e.g. `EECE435L` |
/// | course name | 4 to 100 characters of letters, digits, `'.,:&()/-` and space |
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexValidator;

impl RegexValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for RegexValidator {
    fn valid_name(&self, name: &str) -> bool {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        full_match(&RE, NAME_PATTERN, name)
    }

    fn valid_age(&self, age: u32) -> bool {
        AGE_RANGE.contains(&age)
    }

    fn check_email(&self, email: &str) -> Result<(), String> {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        if full_match(&RE, EMAIL_PATTERN, email) {
            return Ok(());
        }
        match email.matches('@').count() {
            0 => Err("the address must contain an @-sign".to_string()),
            1 => Err(String::new()),
            _ => Err("the address must contain exactly one @-sign".to_string()),
        }
    }

    fn valid_person_id(&self, id: &str) -> bool {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        full_match(&RE, PERSON_ID_PATTERN, id)
    }

    fn valid_course_id(&self, course_id: &str) -> bool {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        full_match(&RE, COURSE_ID_PATTERN, course_id)
    }

    fn valid_course_name(&self, course_name: &str) -> bool {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        let len = course_name.chars().count();
        (4..=100).contains(&len) && full_match(&RE, COURSE_NAME_PATTERN, course_name)
    }
}
