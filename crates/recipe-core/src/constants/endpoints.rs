// ABOUTME: Default base URLs for the recipe API and the identity providers
// ABOUTME: All of them can be overridden through environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

/// TheMealDB public API (free test key `1`)
pub const MEAL_DB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Recipe search path, query parameter `s`
pub const MEAL_DB_SEARCH_PATH: &str = "search.php";

/// Recipe lookup path, query parameter `i`
pub const MEAL_DB_LOOKUP_PATH: &str = "lookup.php";

/// Google Identity Toolkit (Firebase email/password auth)
pub const FIREBASE_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Google Secure Token service (Firebase token refresh)
pub const FIREBASE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Supabase GoTrue prefix, relative to the project URL
pub const SUPABASE_AUTH_PATH: &str = "auth/v1";

/// Supabase PostgREST prefix, relative to the project URL
pub const SUPABASE_REST_PATH: &str = "rest/v1";
