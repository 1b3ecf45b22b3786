pub mod test_with_server;
pub mod user_helpers;

#[allow(unused_imports)]
pub use user_helpers::*;
