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
// Error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeycrafterError {
    #[error("Please select at least one character type.")]
    NoCharacterClassSelected,

    #[error("Password length {length} is outside the allowed range {min}-{max}")]
    LengthOutOfRange { length: usize, min: usize, max: usize },

    #[error("No history entry at position {index} (history shows {len})")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

pub type Result<T> = std::result::Result<T, KeycrafterError>;
