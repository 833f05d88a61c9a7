pub mod listing;
pub mod utils;

pub use listing::write_feature_listing;
pub use utils::{truncate, write_ranked_table};
