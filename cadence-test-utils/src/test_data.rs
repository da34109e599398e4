// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub const USER_LOGIN: &str = "userLogin";
pub const USER_LOGOUT: &str = "userLogout";

/// Error returned by fixtures that are meant to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("test failure: {0}")]
pub struct TestFailure(pub String);

impl TestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub fn user_alice() -> String {
    "Alice".to_string()
}

pub fn user_bob() -> String {
    "Bob".to_string()
}
