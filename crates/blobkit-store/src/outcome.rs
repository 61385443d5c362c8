//! Value-or-errors result used for expected failures.
//!
//! An [`Outcome`] collects user-facing error lines instead of stopping at the
//! first one. Recording an error always discards the value, so a failed outcome
//! can never be mistaken for a successful one.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    value: Option<T>,
    errors: Vec<String>,
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    /// Neither a value nor an error, e.g. an empty read.
    pub fn empty() -> Self {
        Self {
            value: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            value: None,
            errors: vec![error.into()],
        }
    }

    pub fn failures<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: None,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.has_value() && !self.has_errors()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// First recorded error.
    pub fn error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.value = None;
        self.errors.push(error.into());
    }

    pub fn extend_errors<I, S>(&mut self, errors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for error in errors {
            self.push_error(error);
        }
    }

    /// Moves `other`'s errors into `self`, after the ones already recorded.
    pub fn absorb<U>(&mut self, other: Outcome<U>) {
        self.extend_errors(other.errors);
    }

    /// Puts `header` in front of the errors of a failed outcome; successes pass through.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        if self.is_success() {
            return self;
        }
        self.errors.insert(0, header.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: self.value.map(f),
            errors: self.errors,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.value {
            Some(value) => {
                let mut next = f(value);
                let mut errors = self.errors;
                errors.append(&mut next.errors);
                if !errors.is_empty() {
                    next.value = None;
                }
                next.errors = errors;
                next
            }
            None => Outcome {
                value: None,
                errors: self.errors,
            },
        }
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// `Err` carries the error lines; empty when there was simply no value.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(self.errors),
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(err) => Outcome::failure(err.to_string()),
        }
    }
}

impl<T> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("has_value", &self.has_value())
            .field("errors", &self.errors)
            .finish()
    }
}
