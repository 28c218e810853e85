pub mod errors;
pub mod db;
pub mod entry;

#[cfg(test)]
mod tests;
