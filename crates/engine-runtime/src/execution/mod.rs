pub mod context;
pub mod count;
pub mod executor;
pub mod join;
pub mod report;

mod phases;

#[cfg(test)]
pub(crate) mod fixtures;
