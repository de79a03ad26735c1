pub mod cv;
pub mod review;

#[cfg(test)]
pub(crate) mod fixtures;
