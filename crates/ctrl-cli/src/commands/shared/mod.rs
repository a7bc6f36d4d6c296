pub mod limit;
pub mod parse;
pub mod rate;

#[cfg(test)]
pub mod fixtures;
