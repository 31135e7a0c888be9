use crate::models::{Choice, User, UserRole};
use crate::payloads::UserPayload;
use crate::validation::{optional_text, FieldErrors};

use super::{bool_value, parse_bool, parse_choice, FormState};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    /// Password fields only apply when creating an account.
    pub is_new: bool,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub password: String,
    pub confirm_password: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            is_new: true,
            username: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            role: UserRole::default().value().to_string(),
            is_approved: true,
            is_active: true,
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            is_new: false,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            role: user.role.value().to_string(),
            is_approved: user.is_approved,
            is_active: user.is_active,
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

impl FormState for UserForm {
    type Payload = UserPayload;

    fn value(&self, field: &str) -> String {
        match field {
            "username" => self.username.clone(),
            "email" => self.email.clone(),
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "phone" => self.phone.clone(),
            "role" => self.role.clone(),
            "is_approved" => bool_value(self.is_approved),
            "is_active" => bool_value(self.is_active),
            "password" => self.password.clone(),
            "confirm_password" => self.confirm_password.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "username" => self.username = value,
            "email" => self.email = value,
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "phone" => self.phone = value,
            "role" => self.role = value,
            "is_approved" => self.is_approved = parse_bool(&value),
            "is_active" => self.is_active = parse_bool(&value),
            "password" => self.password = value,
            "confirm_password" => self.confirm_password = value,
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("username", &self.username, "Username");
        if errors.require("email", &self.email, "Email") {
            errors.check_email("email", &self.email);
        }
        errors.require("first_name", &self.first_name, "First name");
        errors.require("last_name", &self.last_name, "Last name");
        errors.check_phone("phone", &self.phone);
        parse_choice::<UserRole>(&mut errors, "role", &self.role, "Role");

        if self.is_new {
            if errors.require("password", &self.password, "Password")
                && self.password.chars().count() < MIN_PASSWORD_LENGTH
            {
                errors.insert(
                    "password",
                    format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
                );
            }
            if self.password != self.confirm_password {
                errors.insert("confirm_password", "Passwords do not match");
            }
        }
        errors
    }

    fn to_payload(&self) -> Result<UserPayload, FieldErrors> {
        self.validate().into_result()?;
        Ok(UserPayload {
            username: optional_text(&self.username),
            email: optional_text(&self.email),
            first_name: optional_text(&self.first_name),
            last_name: optional_text(&self.last_name),
            phone: optional_text(&self.phone),
            role: UserRole::from_value(self.role.trim()),
            is_approved: Some(self.is_approved),
            is_active: Some(self.is_active),
            password: if self.is_new {
                Some(self.password.clone())
            } else {
                None
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::user;

    fn filled() -> UserForm {
        UserForm {
            username: "rmoyo".to_string(),
            email: "rudo@tavonga.org".to_string(),
            first_name: "Rudo".to_string(),
            last_name: "Moyo".to_string(),
            password: "s3cure-pass".to_string(),
            confirm_password: "s3cure-pass".to_string(),
            ..UserForm::default()
        }
    }

    #[test]
    fn test_required_fields_block_submission() {
        let errors = UserForm::default().validate();
        for field in ["username", "email", "first_name", "last_name", "password"] {
            assert!(errors.contains(field), "{field} should be required");
        }
        assert!(filled().validate().is_empty());
    }

    #[test]
    fn test_invalid_email_reported() {
        let mut form = filled();
        form.set("email", "rudo.tavonga.org".to_string());
        let errors = form.validate();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_password_rules_on_create() {
        let mut form = filled();
        form.set("password", "short".to_string());
        let errors = form.validate();
        assert!(errors.contains("password"));
        assert!(errors.contains("confirm_password"));
    }

    #[test]
    fn test_edit_without_password_omits_it() {
        let form = UserForm::from_user(&user(3, UserRole::Practitioner));
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.password, None);
        assert_eq!(payload.role, Some(UserRole::Practitioner));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_edit_ignores_password_fields() {
        let mut form = UserForm::from_user(&user(3, UserRole::Practitioner));
        form.set("password", "x".to_string());
        assert!(form.validate().is_empty());
        assert_eq!(form.to_payload().unwrap().password, None);
    }
}
