pub mod ascii_tree;
pub mod cli;
pub mod config;
pub mod filters;
pub mod formats;
pub mod test_case;
pub mod test_id;
pub mod test_result;
pub mod test_runner;
pub mod utils;
pub mod variant;
pub mod verdict;
