pub mod auth;
pub mod board;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;
