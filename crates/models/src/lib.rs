pub mod errors;
pub mod db;
pub mod users;
pub mod review;
pub mod my_review;
pub mod rating_summary;
pub mod camping_summary;
pub mod bookmark;

#[cfg(test)]
mod tests;
