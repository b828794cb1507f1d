//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assessment_repo;
pub mod exchange_repo;
pub mod message_repo;
pub mod question_repo;
pub mod skill_repo;
pub mod user_repo;

pub use assessment_repo::AssessmentRepo;
pub use exchange_repo::ExchangeRepo;
pub use message_repo::MessageRepo;
pub use question_repo::QuestionRepo;
pub use skill_repo::SkillRepo;
pub use user_repo::UserRepo;
