pub mod interactive;
pub mod password_gen;
pub mod rate;

use crossterm::style::{Color, StyledContent, Stylize};
use keycrafter::SecurityRating;

pub fn rating_color(rating: SecurityRating) -> Color {
    match rating {
        SecurityRating::High => Color::Green,
        SecurityRating::Medium => Color::Rgb { r: 255, g: 165, b: 0 },
        SecurityRating::Low => Color::Red,
        SecurityRating::Unknown => Color::White,
    }
}

pub fn styled_rating(rating: SecurityRating) -> StyledContent<String> {
    rating.label().with(rating_color(rating))
}
