//! Data Transfer Objects - request/response types for the API.
//!
//! Request types use `#[serde(default)]` so that a missing field binds as an
//! empty value and is reported by validation, not by deserialization.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{FieldRules, Rules, code, required, rule};

const USERNAME_RULES: FieldRules = FieldRules {
    field: "username",
    constraints: &[
        rule(code::REQUIRED, "the username field is required"),
        rule(code::MAX_LENGTH, "the len of username must be less than 32"),
    ],
};

const PASSWORD_RULES: FieldRules = FieldRules {
    field: "password",
    constraints: &[rule(code::REQUIRED, "the password field is required")],
};

const PASSWORD1_RULES: FieldRules = FieldRules {
    field: "password1",
    constraints: &[rule(code::REQUIRED, "the password1 field is required")],
};

const PASSWORD2_RULES: FieldRules = FieldRules {
    field: "password2",
    constraints: &[
        rule(code::REQUIRED, "the password2 field is required"),
        rule(code::MUST_MATCH, "the two passwords do not match"),
    ],
};

const TITLE_RULES: FieldRules = FieldRules {
    field: "title",
    constraints: &[
        rule(code::REQUIRED, "the title field is required"),
        rule(code::MAX_LENGTH, "the len of title must be less than 64"),
    ],
};

const DESC_RULES: FieldRules = FieldRules {
    field: "desc",
    constraints: &[rule(code::MAX_LENGTH, "the len of desc must be less than 255")],
};

const PROFILE_RULES: [FieldRules; 3] = [
    FieldRules {
        field: "nickname",
        constraints: &[rule(code::MAX_LENGTH, "the len of nickname must be less than 32")],
    },
    FieldRules {
        field: "telephone",
        constraints: &[rule(code::MAX_LENGTH, "the len of telephone must be less than 20")],
    },
    FieldRules {
        field: "email",
        constraints: &[rule(code::EMAIL, "the email field is not a valid email address")],
    },
];

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom(function = "required"), length(max = 32, code = "max_length"))]
    pub username: String,
    #[validate(custom(function = "required"))]
    pub password: String,
}

impl Rules for LoginRequest {
    const FIELDS: &'static [FieldRules] = &[USERNAME_RULES, PASSWORD_RULES];
}

/// Request to create a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserCreateRequest {
    #[validate(custom(function = "required"), length(max = 32, code = "max_length"))]
    pub username: String,
    #[validate(custom(function = "required"))]
    pub password1: String,
    #[validate(
        custom(function = "required"),
        must_match(other = "password1", code = "must_match")
    )]
    pub password2: String,
    #[validate(length(max = 32, code = "max_length"))]
    pub nickname: Option<String>,
    #[validate(length(max = 20, code = "max_length"))]
    pub telephone: Option<String>,
    #[validate(email(code = "email"))]
    pub email: Option<String>,
    /// Role ids to assign.
    pub roles: Vec<i32>,
}

impl Rules for UserCreateRequest {
    const FIELDS: &'static [FieldRules] = &[
        USERNAME_RULES,
        PASSWORD1_RULES,
        PASSWORD2_RULES,
        PROFILE_RULES[0],
        PROFILE_RULES[1],
        PROFILE_RULES[2],
    ];
}

/// Request to partially update a user's profile and roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserPatchRequest {
    #[validate(length(max = 32, code = "max_length"))]
    pub nickname: Option<String>,
    #[validate(length(max = 20, code = "max_length"))]
    pub telephone: Option<String>,
    #[validate(email(code = "email"))]
    pub email: Option<String>,
    pub roles: Option<Vec<i32>>,
}

impl Rules for UserPatchRequest {
    const FIELDS: &'static [FieldRules] = &PROFILE_RULES;
}

/// Administrator request to set a user's password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordResetRequest {
    #[validate(custom(function = "required"))]
    pub password: String,
}

impl Rules for PasswordResetRequest {
    const FIELDS: &'static [FieldRules] = &[PASSWORD_RULES];
}

/// Request to change one's own password. `password` is the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordChangeRequest {
    #[validate(custom(function = "required"))]
    pub password: String,
    #[validate(custom(function = "required"))]
    pub password1: String,
    #[validate(
        custom(function = "required"),
        must_match(other = "password1", code = "must_match")
    )]
    pub password2: String,
}

impl Rules for PasswordChangeRequest {
    const FIELDS: &'static [FieldRules] = &[PASSWORD_RULES, PASSWORD1_RULES, PASSWORD2_RULES];
}

/// Request to create or fully replace a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RoleRequest {
    #[validate(custom(function = "required"), length(max = 64, code = "max_length"))]
    pub title: String,
    #[validate(length(max = 255, code = "max_length"))]
    pub desc: String,
}

impl Rules for RoleRequest {
    const FIELDS: &'static [FieldRules] = &[TITLE_RULES, DESC_RULES];
}

/// Request to partially update a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RolePatchRequest {
    #[validate(custom(function = "required"), length(max = 64, code = "max_length"))]
    pub title: Option<String>,
    #[validate(length(max = 255, code = "max_length"))]
    pub desc: Option<String>,
}

impl Rules for RolePatchRequest {
    const FIELDS: &'static [FieldRules] = &[TITLE_RULES, DESC_RULES];
}

/// Page/size query parameters plus an optional title filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub title: Option<String>,
}

/// Page/size query parameters plus an optional username filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub username: Option<String>,
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub page: u64,
    pub size: u64,
    pub results: Vec<T>,
    pub total: u64,
}

/// A role as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: i32,
    pub title: String,
    pub desc: String,
}

/// Body of single-role responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleData {
    pub role: RoleResponse,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub nickname: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<i32>,
    pub created_at: String,
}

/// Body of single-user responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user: UserResponse,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}
