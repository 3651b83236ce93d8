//  _  __               ____                __  _
// | |/ /  ___  _   _  / ___| _ __   __ _  / _|| |_   ___  _ __
// | ' /  / _ \| | | || |    | '__| / _` || |_ | __| / _ \| '__|
// | . \ |  __/| |_| || |___ | |   | (_| ||  _|| |_ |  __/| |
// |_|\_\ \___| \__, | \____||_|    \__,_||_|   \__| \___||_|
//              |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Security rating

use std::fmt;

use crate::passgen::GenerationOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecurityRating {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl SecurityRating {
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityRating::Low => "LOW",
            SecurityRating::Medium => "MEDIUM",
            SecurityRating::High => "HIGH",
            SecurityRating::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> String {
        format!("Security: {}", self.as_str())
    }
}

impl fmt::Display for SecurityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of strengthening factors met: length of at least 12, uppercase,
/// digits, special. Lowercase does not count.
pub fn strength_score(options: &GenerationOptions, password_length: usize) -> u8 {
    [
        password_length >= 12,
        options.include_upper,
        options.include_digits,
        options.include_special,
    ]
    .into_iter()
    .map(u8::from)
    .sum()
}

pub fn rating_for(options: &GenerationOptions, password_length: usize) -> SecurityRating {
    let score = strength_score(options, password_length);
    if score >= 4 && password_length >= 16 {
        SecurityRating::High
    } else if score >= 3 {
        SecurityRating::Medium
    } else {
        SecurityRating::Low
    }
}
