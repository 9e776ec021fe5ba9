//! Property-based test generators using proptest.

use crate::tokens::TokenBuilder;
use chrono::{Duration, Utc};
use proptest::prelude::*;

/// Strategy for usernames.
pub fn username_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9]{0,15}").expect("Invalid regex")
}

/// Strategy for language claims, including unsupported ones.
pub fn language_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["DE", "EN", "de", "en", "En", "FR", "it", ""])
        .prop_map(str::to_string)
}

/// Strategy for strings that never split into three segments.
pub fn malformed_token_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_.-]{0,64}")
        .expect("Invalid regex")
        .prop_filter("must not have exactly two delimiters", |s| {
            s.matches('.').count() != 2
        })
}

/// Strategy for unexpired tokens with a chosen username and language.
pub fn live_token_strategy() -> impl Strategy<Value = (String, String, String)> {
    (username_strategy(), language_strategy(), 60i64..86_400).prop_map(|(sub, language, secs)| {
        let token = TokenBuilder::new(&sub)
            .language(&language)
            .expires_at(Utc::now() + Duration::seconds(secs))
            .issue();
        (sub, language, token)
    })
}

/// Strategy for tokens that expired between one second and a year ago.
pub fn stale_token_strategy() -> impl Strategy<Value = String> {
    (username_strategy(), 1i64..31_536_000).prop_map(|(sub, secs)| {
        TokenBuilder::new(&sub)
            .expires_at(Utc::now() - Duration::seconds(secs))
            .issue()
    })
}
