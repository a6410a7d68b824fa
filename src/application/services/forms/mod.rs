use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());

/// Per-field validation messages, in form order.
#[derive(Debug, Default, Clone)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// Length rules apply to the trimmed value, since that is what handlers
// persist.
fn check_len(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "This field is required");
    } else if char_len(value) < min || char_len(value) > max {
        errors.push(field, format!("Must be between {min} and {max} characters"));
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_len(&mut errors, "first_name", &self.first_name, 4, 25);
        check_len(&mut errors, "last_name", &self.last_name, 4, 25);
        check_len(&mut errors, "username", &self.username, 5, 25);
        if self.email.trim().is_empty() {
            errors.push("email", "This field is required");
        } else if !EMAIL_RE.is_match(self.email.trim()) {
            errors.push("email", "Invalid email address");
        }
        check_len(&mut errors, "password", &self.password, 8, 16);
        if errors.get("password").is_none() && self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.username.trim().is_empty() {
            errors.push("username", "This field is required");
        }
        if self.password.is_empty() {
            errors.push("password", "This field is required");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryForm {
    #[serde(default)]
    pub story_name: String,
    #[serde(default)]
    pub famous_name: String,
    #[serde(default)]
    pub show_name: String,
    #[serde(default)]
    pub url: String,
}

impl StoryForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_len(&mut errors, "story_name", &self.story_name, 5, 100);
        if self.famous_name.trim().is_empty() {
            errors.push("famous_name", "This field is required");
        } else if char_len(self.famous_name.trim()) < 3 {
            errors.push("famous_name", "Must be at least 3 characters");
        }
        if self.show_name.trim().is_empty() {
            errors.push("show_name", "This field is required");
        }
        if self.url.trim().is_empty() {
            errors.push("url", "This field is required");
        } else if !URL_RE.is_match(self.url.trim()) {
            errors.push("url", "Invalid URL");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterForm {
        RegisterForm {
            first_name: "Alice".into(),
            last_name: "Morgan".into(),
            username: "alicem".into(),
            email: "alice@example.com".into(),
            password: "hunter2hunter".into(),
            confirm_password: "hunter2hunter".into(),
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(valid_register().validate().is_empty());
    }

    #[test]
    fn rejects_short_username_and_bad_email() {
        let mut form = valid_register();
        form.username = "ab".into();
        form.email = "not-an-email".into();
        let errors = form.validate();
        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("first_name").is_none());
    }

    #[test]
    fn length_rules_ignore_surrounding_whitespace() {
        let mut form = valid_register();
        form.first_name = "  ab  ".into();
        form.username = "   abcd   ".into();
        let errors = form.validate();
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("username").is_some());

        // padding around an otherwise valid value is not held against it
        form.first_name = "  Alice  ".into();
        form.username = "  alicem  ".into();
        assert!(form.validate().is_empty());

        let story = StoryForm {
            story_name: "  abcd  ".into(),
            famous_name: "  ab  ".into(),
            show_name: "Tonight".into(),
            url: "https://example.com/clip".into(),
        };
        let errors = story.validate();
        assert!(errors.get("story_name").is_some());
        assert!(errors.get("famous_name").is_some());
    }

    #[test]
    fn rejects_password_mismatch() {
        let mut form = valid_register();
        form.confirm_password = "different1".into();
        let errors = form.validate();
        assert!(errors.get("confirm_password").is_some());
    }

    #[test]
    fn password_length_bounds() {
        let mut form = valid_register();
        form.password = "short".into();
        form.confirm_password = "short".into();
        assert!(form.validate().get("password").is_some());

        form.password = "a".repeat(17);
        form.confirm_password = form.password.clone();
        assert!(form.validate().get("password").is_some());
    }

    #[test]
    fn story_form_requires_absolute_http_url() {
        let mut form = StoryForm {
            story_name: "The interview".into(),
            famous_name: "Jon".into(),
            show_name: "Tonight".into(),
            url: "example.com/clip".into(),
        };
        assert!(form.validate().get("url").is_some());
        form.url = "https://example.com/clip".into();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn login_form_requires_both_fields() {
        let form = LoginForm::default();
        let errors = form.validate();
        assert!(errors.get("username").is_some());
        assert!(errors.get("password").is_some());
    }
}
