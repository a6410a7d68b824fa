pub mod auth;
pub mod stories;

#[cfg(test)]
pub mod test_support;
