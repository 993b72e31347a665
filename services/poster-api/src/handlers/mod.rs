//! HTTP request handlers.

pub mod health;
pub mod landing;
pub mod poster;
