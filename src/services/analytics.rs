//! Analytics aggregation over a rolling reporting window

use chrono::{Duration, Utc};

use crate::{
    error::AppResult,
    models::analytics::{
        AnalyticsData, AnalyticsQuery, AppointmentAnalytics, BranchPerformance,
        FeedbackAnalytics, RevenueAnalytics,
    },
    repository::Repository,
};

const DEFAULT_PERIOD_DAYS: i64 = 30;
const TOP_SERVICES_LIMIT: i64 = 5;
const RECENT_FEEDBACK_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate revenue, appointment, feedback and per-branch figures
    /// over the last `period` days
    pub async fn aggregate(&self, query: &AnalyticsQuery) -> AppResult<AnalyticsData> {
        let period = query.period.unwrap_or(DEFAULT_PERIOD_DAYS).max(1);
        let branch_id = query.branch_id;
        let end = Utc::now();
        let start = end - Duration::days(period);
        let start_date = start.date_naive();
        let end_date = end.date_naive();

        let reservations = self
            .repository
            .analytics
            .reservation_revenue(start, end, branch_id)
            .await?;
        let receipts = self
            .repository
            .analytics
            .receipt_revenue(start_date, end_date, branch_id)
            .await?;

        let counts = self
            .repository
            .analytics
            .appointment_counts(start_date, end_date, branch_id)
            .await?;
        let feedback = self
            .repository
            .analytics
            .feedback_aggregates(start, end, branch_id)
            .await?;

        let mut branch_performance = Vec::new();
        for branch in self.repository.analytics.active_branches().await? {
            if let Some(only) = branch_id {
                if branch.id != only {
                    continue;
                }
            }
            let appointments = self
                .repository
                .analytics
                .appointment_counts(start_date, end_date, Some(branch.id))
                .await?;
            let revenue = self
                .repository
                .analytics
                .reservation_revenue(start, end, Some(branch.id))
                .await?;
            let avg_rating = self
                .repository
                .analytics
                .branch_avg_rating(branch.id, start, end)
                .await?;
            branch_performance.push(BranchPerformance {
                name: branch.name,
                appointments: appointments.total,
                revenue,
                avg_rating: round2(avg_rating.unwrap_or(0.0)),
            });
        }

        let top_services = self
            .repository
            .analytics
            .top_services(start_date, end_date, TOP_SERVICES_LIMIT)
            .await?;
        let recent_feedback = self
            .repository
            .analytics
            .recent_feedback(start, end, RECENT_FEEDBACK_LIMIT)
            .await?;

        Ok(AnalyticsData {
            revenue: RevenueAnalytics {
                total: reservations + receipts,
                reservations,
                receipts,
            },
            appointments: AppointmentAnalytics {
                total: counts.total,
                completed: counts.completed,
                cancelled: counts.cancelled,
                completion_rate: percentage(counts.completed, counts.total),
            },
            feedback: FeedbackAnalytics {
                total: feedback.total,
                avg_rating: round2(feedback.avg_rating.unwrap_or(0.0)),
                unique_customers: feedback.unique_customers,
                response_rate: percentage(feedback.total, counts.total),
            },
            branch_performance,
            top_services,
            recent_feedback,
        })
    }
}

/// part / whole as a percentage rounded to 2 decimal places; zero when
/// the denominator is zero
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_two_places() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn percentage_is_zero_on_empty_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn response_rate_may_exceed_hundred() {
        // More feedback entries than appointments is legitimate
        assert_eq!(percentage(6, 4), 150.0);
    }

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(4.567), 4.57);
        assert_eq!(round2(0.0), 0.0);
    }
}
