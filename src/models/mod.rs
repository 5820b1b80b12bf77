pub mod images;
pub mod profiles;
