//! # Console Infrastructure
//! 
//! PostgreSQL adapters: connection pool, identity-binding policy store,
//! repository implementations, and the embedded schema migrations.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgApplicationRepository, PgMenuRepository, PgPolicyStore,
    PgProfileMenuRepository, PgProfileRepository, PgUserProfileRepository,
};
