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
// Create powerful and one-of-a-kind passwords.

pub mod configtool;
pub mod error;
pub mod history;
pub mod passgen;
pub mod rating;
pub mod session;
pub mod setclip;

pub use error::{KeycrafterError, Result};
pub use passgen::{CharClass, CharacterPool, GenerationOptions, LengthBounds, Password};
pub use rating::SecurityRating;
pub use session::{Action, ApplicationState, Outcome};
