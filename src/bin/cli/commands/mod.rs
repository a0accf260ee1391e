pub mod streak;
pub mod study;
pub mod terms;
