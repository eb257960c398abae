pub mod category;
pub mod course;
pub mod enrollment;
pub mod rating;
pub mod session;
pub mod user;
pub mod wishlist;
