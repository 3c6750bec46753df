pub mod constants;
pub mod display;
pub mod format;
pub mod templates;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
