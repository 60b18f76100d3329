//! Repository layer for database operations

pub mod analytics;
pub mod branches;
pub mod manufacturers;
pub mod prescriptions;
pub mod reports;
pub mod role_requests;
pub mod schedules;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub schedules: schedules::SchedulesRepository,
    pub branches: branches::BranchesRepository,
    pub manufacturers: manufacturers::ManufacturersRepository,
    pub role_requests: role_requests::RoleRequestsRepository,
    pub users: users::UsersRepository,
    pub analytics: analytics::AnalyticsRepository,
    pub reports: reports::ReportsRepository,
    pub prescriptions: prescriptions::PrescriptionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            branches: branches::BranchesRepository::new(pool.clone()),
            manufacturers: manufacturers::ManufacturersRepository::new(pool.clone()),
            role_requests: role_requests::RoleRequestsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            analytics: analytics::AnalyticsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            prescriptions: prescriptions::PrescriptionsRepository::new(pool.clone()),
            pool,
        }
    }
}
