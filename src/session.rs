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
// Application state and action dispatch

use rand::Rng;
use tracing::{debug, info, warn};

use crate::configtool::Config;
use crate::error::{KeycrafterError, Result};
use crate::history::{History, HistoryEntry};
use crate::passgen::{self, CharClass, GenerationOptions, LengthBounds, Password};
use crate::rating::{SecurityRating, rating_for};
use crate::setclip::ClipboardSink;

/// A user-triggered command against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    CopyCurrent,
    /// 0-based position in the visible history.
    CopyHistoryItem(usize),
    Clear,
    SetLength(usize),
    Toggle(CharClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated {
        password: Password,
        rating: SecurityRating,
    },
    CopiedCurrent,
    CopiedHistoryItem(Password),
    NothingToCopy,
    Cleared,
    LengthSet(usize),
    Toggled {
        class: CharClass,
        enabled: bool,
    },
}

impl Outcome {
    /// Confirmation text shown to the user, if the outcome warrants one.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::CopiedCurrent => Some("Password copied to clipboard!".to_string()),
            Outcome::CopiedHistoryItem(password) => Some(format!("Copied:\n{}", password)),
            Outcome::NothingToCopy => Some("Nothing to copy yet.".to_string()),
            _ => None,
        }
    }
}

/// Everything one session shows: option controls, the current password and
/// its rating, and the history.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    options: GenerationOptions,
    bounds: LengthBounds,
    current: Option<Password>,
    rating: SecurityRating,
    history: History,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ApplicationState {
    pub fn new(options: GenerationOptions, bounds: LengthBounds, display_limit: usize) -> Self {
        Self {
            options,
            bounds,
            current: None,
            rating: SecurityRating::Unknown,
            history: History::new(display_limit),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.initial_options(), config.bounds(), config.history_display)
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    pub fn current_password(&self) -> Option<&Password> {
        self.current.as_ref()
    }

    /// The password field contents; empty before the first generation and
    /// after a clear.
    pub fn displayed_password(&self) -> &str {
        self.current.as_ref().map_or("", Password::as_str)
    }

    pub fn rating(&self) -> SecurityRating {
        self.rating
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn visible_history(&self) -> &[HistoryEntry] {
        self.history.visible()
    }

    /// Make `password` current, rate it and push it onto the history.
    pub fn record(&mut self, password: Password, options: GenerationOptions) -> &Password {
        self.rating = rating_for(&options, password.len());
        self.history.record(password.clone(), options);
        debug!(rating = %self.rating, history = self.history.len(), "recorded password");
        self.current.insert(password)
    }

    /// Reset the displayed password and rating. History is kept.
    pub fn clear(&mut self) {
        self.current = None;
        self.rating = SecurityRating::Unknown;
    }

    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Password> {
        let options = self.options;
        let password = passgen::generate(&options, self.bounds, rng)?;
        Ok(self.record(password, options))
    }

    pub fn set_length(&mut self, length: usize) -> Result<()> {
        self.bounds.check(length)?;
        self.options.length = length;
        Ok(())
    }

    pub fn dispatch<R, C>(&mut self, action: Action, rng: &mut R, clipboard: &mut C) -> Result<Outcome>
    where
        R: Rng + ?Sized,
        C: ClipboardSink + ?Sized,
    {
        debug!(?action, "dispatch");
        let outcome = match action {
            Action::Generate => {
                let password = self.generate(rng)?.clone();
                Outcome::Generated {
                    password,
                    rating: self.rating,
                }
            }
            Action::CopyCurrent => match &self.current {
                Some(password) => {
                    clipboard.set_text(password.as_str())?;
                    Outcome::CopiedCurrent
                }
                None => Outcome::NothingToCopy,
            },
            Action::CopyHistoryItem(index) => {
                let entry = self.history.visible_entry(index).ok_or(
                    KeycrafterError::HistoryIndexOutOfRange {
                        index,
                        len: self.history.visible().len(),
                    },
                )?;
                clipboard.set_text(entry.password.as_str())?;
                Outcome::CopiedHistoryItem(entry.password.clone())
            }
            Action::Clear => {
                self.clear();
                Outcome::Cleared
            }
            Action::SetLength(length) => {
                self.set_length(length)?;
                Outcome::LengthSet(length)
            }
            Action::Toggle(class) => {
                let enabled = self.options.toggle(class);
                Outcome::Toggled { class, enabled }
            }
        };
        info!(?action, "action completed");
        Ok(outcome)
    }

    /// Like [`dispatch`](Self::dispatch), logging recoverable failures before
    /// handing them back to the presentation layer.
    pub fn try_dispatch<R, C>(&mut self, action: Action, rng: &mut R, clipboard: &mut C) -> Result<Outcome>
    where
        R: Rng + ?Sized,
        C: ClipboardSink + ?Sized,
    {
        self.dispatch(action, rng, clipboard)
            .inspect_err(|e| warn!(?action, error = %e, "action rejected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setclip::MockClipboardSink;
    use mockall::predicate::eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn copy_current_writes_displayed_password() {
        let mut state = ApplicationState::default();
        let mut rng = rng();
        let mut clipboard = MockClipboardSink::new();
        let Outcome::Generated { password, .. } = state
            .dispatch(Action::Generate, &mut rng, &mut clipboard)
            .unwrap()
        else {
            panic!("expected a generated password");
        };

        clipboard
            .expect_set_text()
            .with(eq(password.as_str().to_string()))
            .times(1)
            .returning(|_| Ok(()));
        let outcome = state.dispatch(Action::CopyCurrent, &mut rng, &mut clipboard).unwrap();
        assert_eq!(outcome, Outcome::CopiedCurrent);
        assert_eq!(outcome.message().as_deref(), Some("Password copied to clipboard!"));
    }

    #[test]
    fn copy_current_without_password_skips_clipboard() {
        let mut state = ApplicationState::default();
        let mut clipboard = MockClipboardSink::new();
        clipboard.expect_set_text().never();
        let outcome = state
            .dispatch(Action::CopyCurrent, &mut rng(), &mut clipboard)
            .unwrap();
        assert_eq!(outcome, Outcome::NothingToCopy);
    }

    #[test]
    fn copy_history_item_uses_visible_position() {
        let mut state = ApplicationState::default();
        state.record(Password::from("first-password"), GenerationOptions::default());
        state.record(Password::from("second-password"), GenerationOptions::default());

        let mut clipboard = MockClipboardSink::new();
        clipboard
            .expect_set_text()
            .with(eq("first-password"))
            .times(1)
            .returning(|_| Ok(()));
        let outcome = state
            .dispatch(Action::CopyHistoryItem(1), &mut rng(), &mut clipboard)
            .unwrap();
        assert_eq!(outcome, Outcome::CopiedHistoryItem(Password::from("first-password")));
        assert_eq!(outcome.message().as_deref(), Some("Copied:\nfirst-password"));
    }

    #[test]
    fn copy_history_item_out_of_range() {
        let mut state = ApplicationState::default();
        state.record(Password::from("only"), GenerationOptions::default());
        let mut clipboard = MockClipboardSink::new();
        clipboard.expect_set_text().never();
        let err = state
            .dispatch(Action::CopyHistoryItem(3), &mut rng(), &mut clipboard)
            .unwrap_err();
        assert!(matches!(
            err,
            KeycrafterError::HistoryIndexOutOfRange { index: 3, len: 1 }
        ));
    }

    #[test]
    fn clipboard_failure_is_reported_and_state_kept() {
        let mut state = ApplicationState::default();
        let mut rng = rng();
        let mut clipboard = MockClipboardSink::new();
        state.dispatch(Action::Generate, &mut rng, &mut clipboard).unwrap();
        let before = state.displayed_password().to_string();

        clipboard
            .expect_set_text()
            .returning(|_| Err(KeycrafterError::ClipboardUnavailable("no display".to_string())));
        let err = state
            .try_dispatch(Action::CopyCurrent, &mut rng, &mut clipboard)
            .unwrap_err();
        assert!(matches!(err, KeycrafterError::ClipboardUnavailable(_)));
        assert_eq!(state.displayed_password(), before);
        assert_eq!(state.history().len(), 1);
    }
}
