use anyhow::{Context, Result};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use keycrafter::configtool::Config;
use keycrafter::setclip::ClipboardSink;
use keycrafter::{ApplicationState, GenerationOptions};

use super::styled_rating;

/// Generate `count` passwords and, when a clipboard is given, copy the last one.
pub fn generate_random(
    config: &Config,
    options: GenerationOptions,
    count: u32,
    seed: Option<u64>,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> Result<()> {
    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let mut state = ApplicationState::new(options, config.bounds(), config.history_display);

    for _ in 0..count {
        let password = state
            .generate(rng.as_mut())
            .context("Failed to generate password")?;
        println!("Generated password: {}", password);
    }
    println!("{}", styled_rating(state.rating()));

    if let Some(clipboard) = clipboard {
        clipboard
            .set_text(state.displayed_password())
            .context("Failed to copy password")?;
        println!("Password copied to clipboard!");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycrafter::KeycrafterError;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Vec<String>,
        fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> keycrafter::Result<()> {
            if self.fail {
                return Err(KeycrafterError::ClipboardUnavailable("no display".to_string()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn last_of(seed: u64, count: u32) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = ApplicationState::default();
        for _ in 0..count {
            state.generate(&mut rng).unwrap();
        }
        state.displayed_password().to_string()
    }

    #[test]
    fn copies_last_generated_password() {
        let mut clipboard = RecordingClipboard::default();
        generate_random(
            &Config::default(),
            GenerationOptions::default(),
            3,
            Some(11),
            Some(&mut clipboard),
        )
        .unwrap();
        assert_eq!(clipboard.writes, [last_of(11, 3)]);
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let mut clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let result = generate_random(
            &Config::default(),
            GenerationOptions::default(),
            1,
            Some(1),
            Some(&mut clipboard),
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_options_fail_before_copying() {
        let mut clipboard = RecordingClipboard::default();
        let options = GenerationOptions {
            length: 30,
            ..Default::default()
        };
        let result = generate_random(&Config::default(), options, 1, None, Some(&mut clipboard));
        assert!(result.is_err());
        assert!(clipboard.writes.is_empty());
    }
}
