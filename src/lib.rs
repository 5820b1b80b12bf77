pub mod auth;
pub mod db;
pub mod draft;
pub mod error;
pub mod gallery;
pub mod handlers;
pub mod imaging;
pub mod locale;
pub mod migrate;
pub mod models;
pub mod sanitize;
pub mod storage;
pub mod upload;

pub use db::create_pool;
