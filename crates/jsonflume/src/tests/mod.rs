mod parse_bad;
mod parse_good;
pub mod util;
