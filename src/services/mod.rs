//! Business logic services

pub mod analytics;
pub mod availability;
pub mod branches;
pub mod eyewear;
pub mod manufacturers;
pub mod realtime;
pub mod render;
pub mod reports;
pub mod role_requests;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub analytics: analytics::AnalyticsService,
    pub branches: branches::BranchesService,
    pub manufacturers: manufacturers::ManufacturersService,
    pub role_requests: role_requests::RoleRequestsService,
    pub eyewear: eyewear::EyewearService,
    pub reports: reports::ReportsService,
    pub realtime: realtime::RealtimeService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, realtime: realtime::RealtimeService) -> Self {
        let analytics = analytics::AnalyticsService::new(repository.clone());
        Self {
            availability: availability::AvailabilityService::new(repository.clone()),
            analytics: analytics.clone(),
            branches: branches::BranchesService::new(repository.clone()),
            manufacturers: manufacturers::ManufacturersService::new(repository.clone()),
            role_requests: role_requests::RoleRequestsService::new(
                repository.clone(),
                realtime.clone(),
            ),
            eyewear: eyewear::EyewearService::new(repository.clone(), realtime.clone()),
            reports: reports::ReportsService::new(
                repository,
                analytics,
                Arc::new(render::PdfRenderer),
            ),
            realtime,
        }
    }
}
