mod finder;

pub use finder::{SearchEngine, SearchMatch, SearchOptions};
