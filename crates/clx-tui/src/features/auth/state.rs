//! Auth view state: the login and register forms.

use crate::common::TextField;

/// Focusable fields on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: Option<LoginField>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
            focus: Some(LoginField::Email),
            submitting: false,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Some(LoginField::Email) => Some(&mut self.email),
            Some(LoginField::Password) => Some(&mut self.password),
            None => None,
        }
    }
}

/// Focusable fields on the register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

impl RegisterField {
    pub fn next(self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Name,
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub focus: Option<RegisterField>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            focus: Some(RegisterField::Name),
            submitting: false,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Some(RegisterField::Name) => Some(&mut self.name),
            Some(RegisterField::Email) => Some(&mut self.email),
            Some(RegisterField::Password) => Some(&mut self.password),
            None => None,
        }
    }
}

/// Combined state for the public views.
#[derive(Debug, Default)]
pub struct AuthState {
    pub login: LoginForm,
    pub register: RegisterForm,
    /// One-shot banner shown above the login form ("Logged out.",
    /// "Session expired...", "Account created...").
    pub notice: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            login: LoginForm::new(),
            register: RegisterForm::new(),
            notice: None,
        }
    }

    /// Clears both forms, keeping any pending notice.
    pub fn reset_forms(&mut self) {
        self.login = LoginForm::new();
        self.register = RegisterForm::new();
    }
}
