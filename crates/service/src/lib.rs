//! Service layer providing the annotation store operations and the labeling client.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod image_label;
pub mod labeling;
#[cfg(test)]
pub mod test_support;
