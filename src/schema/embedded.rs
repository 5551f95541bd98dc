//! Embedded request schemas.
//!
//! Every schema the API uses is kept here as a static JSON document so the
//! registry can be built without touching the filesystem. Documents are parsed
//! into [`Schema`](super::Schema) values exactly once, at registry construction.

/// Schema names, `<resource>.<operation>`.
pub mod names {
    pub const TODO_CREATE: &str = "todo.create";
    pub const TODO_UPDATE: &str = "todo.update";
    pub const TODO_ID: &str = "todo.id";
    pub const TODO_LIST_QUERY: &str = "todo.list-query";
    pub const TODO_BULK_UPDATE: &str = "todo.bulk-update";

    pub const AUTH_REGISTER: &str = "auth.register";
    pub const AUTH_LOGIN: &str = "auth.login";
    pub const AUTH_FORGOT_PASSWORD: &str = "auth.forgot-password";
    pub const AUTH_RESET_PASSWORD: &str = "auth.reset-password";
    pub const AUTH_CHANGE_PASSWORD: &str = "auth.change-password";
    pub const AUTH_REFRESH_TOKEN: &str = "auth.refresh-token";
    pub const AUTH_UPDATE_PROFILE: &str = "auth.update-profile";
}

/// All embedded schema documents, in registration order.
pub fn all_schemas() -> [&'static str; 12] {
    [
        create_todo_schema(),
        update_todo_schema(),
        todo_id_schema(),
        list_todos_query_schema(),
        bulk_update_schema(),
        register_schema(),
        login_schema(),
        forgot_password_schema(),
        reset_password_schema(),
        change_password_schema(),
        refresh_token_schema(),
        update_profile_schema(),
    ]
}

/// New todo item. `title` and `description` are required; `priority` and
/// `completed` fall back to defaults.
pub fn create_todo_schema() -> &'static str {
    r#"{
  "name": "todo.create",
  "description": "Create a todo item",
  "fields": [
    {
      "name": "title",
      "type": "string",
      "required": true,
      "trim": true,
      "minLength": 1,
      "maxLength": 100,
      "pattern": "^[a-zA-Z0-9\\s\\-_.,!?]+$"
    },
    {
      "name": "description",
      "type": "string",
      "required": true,
      "trim": true,
      "minLength": 1,
      "maxLength": 500,
      "pattern": "^[a-zA-Z0-9\\s\\-_.,!?%\\n\\r]+$"
    },
    {
      "name": "priority",
      "type": "string",
      "enum": ["low", "medium", "high"],
      "default": "medium"
    },
    {
      "name": "dueDate",
      "type": "date-time"
    },
    {
      "name": "completed",
      "type": "boolean",
      "default": false
    }
  ]
}"#
}

/// Partial update: same field rules as create, none required individually.
pub fn update_todo_schema() -> &'static str {
    r#"{
  "name": "todo.update",
  "description": "Partially update a todo item",
  "minimumFieldsRequired": 1,
  "fields": [
    {
      "name": "title",
      "type": "string",
      "trim": true,
      "minLength": 1,
      "maxLength": 100,
      "pattern": "^[a-zA-Z0-9\\s\\-_.,!?]+$"
    },
    {
      "name": "description",
      "type": "string",
      "trim": true,
      "minLength": 1,
      "maxLength": 500,
      "pattern": "^[a-zA-Z0-9\\s\\-_.,!?%\\n\\r]+$"
    },
    {
      "name": "priority",
      "type": "string",
      "enum": ["low", "medium", "high"]
    },
    {
      "name": "dueDate",
      "type": "date-time"
    },
    {
      "name": "completed",
      "type": "boolean"
    }
  ]
}"#
}

/// Path parameters identifying one todo by its 24-hex-digit storage id.
pub fn todo_id_schema() -> &'static str {
    r#"{
  "name": "todo.id",
  "description": "Identify a todo item",
  "fields": [
    {
      "name": "id",
      "type": "string",
      "required": true,
      "pattern": "^[0-9a-fA-F]{24}$"
    }
  ]
}"#
}

/// Query string for listing todos. The `limit` maximum and default are
/// rewritten from [`GateConfig`](crate::GateConfig) when the registry is built.
pub fn list_todos_query_schema() -> &'static str {
    r#"{
  "name": "todo.list-query",
  "description": "List todos with filtering, sorting and pagination",
  "fields": [
    {
      "name": "page",
      "type": "integer",
      "minimum": 1,
      "maximum": 4294967295,
      "default": 1
    },
    {
      "name": "limit",
      "type": "integer",
      "minimum": 1,
      "maximum": 100,
      "default": 10
    },
    {
      "name": "completed",
      "type": "boolean"
    },
    {
      "name": "priority",
      "type": "string",
      "enum": ["low", "medium", "high"]
    },
    {
      "name": "sortBy",
      "type": "string",
      "enum": ["createdAt", "updatedAt", "dueDate", "priority", "title"],
      "default": "createdAt"
    },
    {
      "name": "sortOrder",
      "type": "string",
      "enum": ["asc", "desc"],
      "default": "desc"
    },
    {
      "name": "search",
      "type": "string",
      "minLength": 1,
      "maxLength": 100
    },
    {
      "name": "dueAfter",
      "type": "date-time"
    },
    {
      "name": "dueBefore",
      "type": "date-time"
    }
  ]
}"#
}

/// Apply one patch to up to 100 todos.
pub fn bulk_update_schema() -> &'static str {
    r#"{
  "name": "todo.bulk-update",
  "description": "Update several todo items at once",
  "fields": [
    {
      "name": "todoIds",
      "type": "array",
      "required": true,
      "minItems": 1,
      "maxItems": 100,
      "items": {
        "type": "string",
        "pattern": "^[0-9a-fA-F]{24}$"
      }
    },
    {
      "name": "updateData",
      "type": "object",
      "required": true,
      "minimumFieldsRequired": 1,
      "fields": [
        {
          "name": "completed",
          "type": "boolean"
        },
        {
          "name": "priority",
          "type": "string",
          "enum": ["low", "medium", "high"]
        }
      ]
    }
  ]
}"#
}

pub fn register_schema() -> &'static str {
    r#"{
  "name": "auth.register",
  "description": "Register a new user account",
  "fields": [
    { "name": "email", "type": "string", "required": true, "format": "email", "maxLength": 100 },
    { "name": "password", "type": "string", "required": true, "minLength": 8, "maxLength": 128, "format": "password" },
    { "name": "firstName", "type": "string", "required": true, "minLength": 1, "maxLength": 50, "pattern": "^[a-zA-Z\\s\\-']+$" },
    { "name": "lastName", "type": "string", "required": true, "minLength": 1, "maxLength": 50, "pattern": "^[a-zA-Z\\s\\-']+$" }
  ]
}"#
}

pub fn login_schema() -> &'static str {
    r#"{
  "name": "auth.login",
  "description": "Log in with email and password",
  "fields": [
    { "name": "email", "type": "string", "required": true, "format": "email", "maxLength": 100 },
    { "name": "password", "type": "string", "required": true, "minLength": 1, "maxLength": 128 }
  ]
}"#
}

pub fn forgot_password_schema() -> &'static str {
    r#"{
  "name": "auth.forgot-password",
  "description": "Request a password reset email",
  "fields": [
    { "name": "email", "type": "string", "required": true, "format": "email", "maxLength": 100 }
  ]
}"#
}

pub fn reset_password_schema() -> &'static str {
    r#"{
  "name": "auth.reset-password",
  "description": "Reset a password with a reset token",
  "fields": [
    { "name": "token", "type": "string", "required": true, "minLength": 1 },
    { "name": "password", "type": "string", "required": true, "minLength": 8, "maxLength": 128, "format": "password" }
  ]
}"#
}

pub fn change_password_schema() -> &'static str {
    r#"{
  "name": "auth.change-password",
  "description": "Change the current user's password",
  "fields": [
    { "name": "currentPassword", "type": "string", "required": true, "minLength": 1, "maxLength": 128 },
    { "name": "newPassword", "type": "string", "required": true, "minLength": 8, "maxLength": 128, "format": "password" }
  ]
}"#
}

pub fn refresh_token_schema() -> &'static str {
    r#"{
  "name": "auth.refresh-token",
  "description": "Exchange a refresh token",
  "fields": [
    { "name": "refreshToken", "type": "string", "required": true, "minLength": 1 }
  ]
}"#
}

pub fn update_profile_schema() -> &'static str {
    r#"{
  "name": "auth.update-profile",
  "description": "Update the current user's profile",
  "minimumFieldsRequired": 1,
  "fields": [
    { "name": "firstName", "type": "string", "minLength": 1, "maxLength": 50, "pattern": "^[a-zA-Z\\s\\-']+$" },
    { "name": "lastName", "type": "string", "minLength": 1, "maxLength": 50, "pattern": "^[a-zA-Z\\s\\-']+$" },
    { "name": "email", "type": "string", "format": "email", "maxLength": 100 }
  ]
}"#
}
