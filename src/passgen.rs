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
// Password generator

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::error::{KeycrafterError, Result};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
/// Printable ASCII punctuation in code-point order (32 characters).
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// One of the four fixed, mutually disjoint character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Special,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Special,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Special => PUNCTUATION,
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.chars().contains(c)
    }

    /// The class a character belongs to, if any.
    pub fn of(c: char) -> Option<CharClass> {
        Self::ALL.into_iter().find(|class| class.contains(c))
    }

    pub fn label(self) -> &'static str {
        match self {
            CharClass::Lowercase => "Lower Letters",
            CharClass::Uppercase => "Capital Letters",
            CharClass::Digits => "Numbers",
            CharClass::Special => "Special Characters",
        }
    }
}

/// Inclusive bounds for the password length selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 8, max: 24 }
    }
}

impl LengthBounds {
    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }

    pub fn check(&self, length: usize) -> Result<()> {
        if self.contains(length) {
            Ok(())
        } else {
            Err(KeycrafterError::LengthOutOfRange {
                length,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub length: usize,
    pub include_lower: bool,
    pub include_upper: bool,
    pub include_digits: bool,
    pub include_special: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: 12,
            include_lower: true,
            include_upper: true,
            include_digits: true,
            include_special: true,
        }
    }
}

impl GenerationOptions {
    pub fn includes(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lowercase => self.include_lower,
            CharClass::Uppercase => self.include_upper,
            CharClass::Digits => self.include_digits,
            CharClass::Special => self.include_special,
        }
    }

    pub fn set(&mut self, class: CharClass, enabled: bool) {
        let flag = match class {
            CharClass::Lowercase => &mut self.include_lower,
            CharClass::Uppercase => &mut self.include_upper,
            CharClass::Digits => &mut self.include_digits,
            CharClass::Special => &mut self.include_special,
        };
        *flag = enabled;
    }

    /// Flip a class and return its new state.
    pub fn toggle(&mut self, class: CharClass) -> bool {
        let enabled = !self.includes(class);
        self.set(class, enabled);
        enabled
    }

    pub fn enabled_classes(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL
            .into_iter()
            .filter(move |class| self.includes(*class))
    }

    pub fn has_any_class(&self) -> bool {
        self.enabled_classes().next().is_some()
    }

    /// Check the request before it reaches the generator or the rating.
    pub fn validate(&self, bounds: LengthBounds) -> Result<()> {
        if !self.has_any_class() {
            return Err(KeycrafterError::NoCharacterClassSelected);
        }
        bounds.check(self.length)
    }
}

/// The effective sampling domain for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    chars: Vec<char>,
}

impl CharacterPool {
    pub fn from_options(options: &GenerationOptions) -> Self {
        let chars = options
            .enabled_classes()
            .flat_map(|class| class.chars().chars())
            .collect();
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Draw `length` characters uniformly, with replacement.
    fn sample<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<String> {
        (0..length).map(|_| self.chars.choose(&mut *rng).copied()).collect()
    }
}

/// A generated password. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Generate one password from `options` using the supplied random source.
#[instrument(level = "debug", skip(options, rng), fields(length = options.length))]
pub fn generate<R: Rng + ?Sized>(
    options: &GenerationOptions,
    bounds: LengthBounds,
    rng: &mut R,
) -> Result<Password> {
    options.validate(bounds)?;
    let pool = CharacterPool::from_options(options);

    debug!(pool_size = pool.len(), "sampling password");
    pool.sample(options.length, rng)
        .map(Password)
        .ok_or(KeycrafterError::NoCharacterClassSelected)
}

/// Generate with the thread-local random source.
pub fn generate_password(options: &GenerationOptions, bounds: LengthBounds) -> Result<Password> {
    generate(options, bounds, &mut rand::thread_rng())
}
