pub mod fund_me;
pub mod utils;
