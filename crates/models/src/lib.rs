pub mod errors;
pub mod db;
pub mod image_label;

#[cfg(test)]
mod tests;
