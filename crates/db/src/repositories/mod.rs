mod project_repo;
mod session_repo;
mod user_repo;

pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
