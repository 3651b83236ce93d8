use anyhow::{Context, Result};

use keycrafter::configtool::Config;
use keycrafter::rating::{rating_for, strength_score};
use keycrafter::{GenerationOptions, SecurityRating};

use super::styled_rating;

/// Rate a configuration that passes the same checks as generation.
pub fn checked_rating(
    config: &Config,
    options: &GenerationOptions,
) -> keycrafter::Result<(SecurityRating, u8)> {
    options.validate(config.bounds())?;
    Ok((
        rating_for(options, options.length),
        strength_score(options, options.length),
    ))
}

pub fn show_rating(config: &Config, options: &GenerationOptions) -> Result<()> {
    let (rating, score) = checked_rating(config, options).context("Cannot rate configuration")?;
    println!("{} (score: {}/4, length: {})", styled_rating(rating), score, options.length);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycrafter::KeycrafterError;

    #[test]
    fn rates_valid_configuration() {
        let options = GenerationOptions {
            length: 16,
            ..Default::default()
        };
        let (rating, score) = checked_rating(&Config::default(), &options).unwrap();
        assert_eq!(rating, SecurityRating::High);
        assert_eq!(score, 4);
    }

    #[test]
    fn rejects_configuration_without_classes() {
        let options = GenerationOptions {
            length: 12,
            include_lower: false,
            include_upper: false,
            include_digits: false,
            include_special: false,
        };
        let err = checked_rating(&Config::default(), &options).unwrap_err();
        assert!(matches!(err, KeycrafterError::NoCharacterClassSelected));
        assert!(show_rating(&Config::default(), &options).is_err());
    }

    #[test]
    fn rejects_length_outside_configured_range() {
        for length in [0, 7, 25, 500] {
            let options = GenerationOptions {
                length,
                ..Default::default()
            };
            let err = checked_rating(&Config::default(), &options).unwrap_err();
            assert!(matches!(
                err,
                KeycrafterError::LengthOutOfRange { min: 8, max: 24, .. }
            ));
        }
    }
}
