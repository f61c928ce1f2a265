//! Request validation: presence and length rules on incoming DTOs.

use contactbook_core::{DomainError, DomainResult};

/// Something that can describe its own validation rules.
pub trait Validate {
    fn rules(&self, rules: &mut Rules);
}

/// Accumulates rule violations for one value.
#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<String>,
}

impl Rules {
    /// Non-blank and at most `max` characters.
    pub fn required(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.violations.push(format!("{field} is required"));
        } else {
            self.max_len(field, value, max);
        }
        self
    }

    /// At most `max` characters when present.
    pub fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            self.max_len(field, value, max);
        }
        self
    }

    /// Empty, or something shaped like `local@domain`.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() {
            let valid = value
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                self.violations.push(format!("{field} must be a valid email"));
            }
        }
        self
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.violations
                .push(format!("{field} must be at most {max} characters"));
        }
    }

    fn finish(self) -> DomainResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(self.violations.join("; ")))
        }
    }
}

/// Shared validator handed to every use case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn check<T: Validate>(&self, value: &T) -> DomainResult<()> {
        let mut rules = Rules::default();
        value.rules(&mut rules);
        rules.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Signup<'a> {
        name: &'a str,
        nickname: Option<&'a str>,
        email: &'a str,
    }

    impl Validate for Signup<'_> {
        fn rules(&self, rules: &mut Rules) {
            rules
                .required("name", self.name, 5)
                .optional("nickname", self.nickname, 3)
                .email("email", self.email);
        }
    }

    #[test]
    fn collects_every_violation() {
        let err = Validator::new()
            .check(&Signup {
                name: "  ",
                nickname: Some("toolong"),
                email: "nope",
            })
            .unwrap_err();

        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name is required"));
        assert!(msg.contains("nickname must be at most 3 characters"));
        assert!(msg.contains("email must be a valid email"));
    }

    #[test]
    fn blank_email_and_missing_optionals_pass() {
        let ok = Validator::new().check(&Signup {
            name: "alice",
            nickname: None,
            email: "",
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let ok = Validator::new().check(&Signup {
            name: "ééééé",
            nickname: None,
            email: "a@b.io",
        });
        assert!(ok.is_ok());
    }
}
