//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod course_repo;
pub mod enrollment_repo;
pub mod rating_repo;
pub mod session_repo;
pub mod user_repo;
pub mod wishlist_repo;

pub use category_repo::CategoryRepo;
pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use rating_repo::RatingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use wishlist_repo::WishlistRepo;
