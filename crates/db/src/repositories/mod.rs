//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step writes (base
//! row plus translation upserts, default-language switches, batch
//! reorders) run inside a single transaction.

pub mod article_repo;
pub mod contact_repo;
pub mod expertise_repo;
pub mod language_repo;
pub mod profile_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use contact_repo::ContactRepo;
pub use expertise_repo::ExpertiseRepo;
pub use language_repo::LanguageRepo;
pub use profile_repo::ProfileRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
