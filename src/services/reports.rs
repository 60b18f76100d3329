//! Administrative reports: the downloadable analytics PDF and the
//! paginated log feeds

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{
        analytics::{
            AnalyticsQuery, CountByGroup, Page, ReportFilter, ReservationLogEntry,
            ReservationStats, RevenueReport, SystemStats, TotalOnly, UserActivityEntry,
        },
        appointment::AppointmentLogEntry,
    },
    repository::{reports::PAGE_SIZE, Repository},
};

use super::{
    analytics::AnalyticsService,
    render::{AnalyticsReportContext, ReportRenderer},
};

/// A rendered report ready to send as an attachment
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    analytics: AnalyticsService,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportsService {
    pub fn new(
        repository: Repository,
        analytics: AnalyticsService,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self { repository, analytics, renderer }
    }

    /// Render the analytics report for download
    pub async fn analytics_pdf(
        &self,
        query: &AnalyticsQuery,
        generated_by: &str,
    ) -> AppResult<RenderedReport> {
        let period_days = query.period.unwrap_or(30).max(1);
        let now = Utc::now();
        let context = AnalyticsReportContext {
            analytics: self.analytics.aggregate(query).await?,
            period_days,
            start_date: (now - Duration::days(period_days)).date_naive(),
            end_date: now.date_naive(),
            branch_id: query.branch_id,
            generated_at: now,
            generated_by: generated_by.to_string(),
        };
        let bytes = self.renderer.render_analytics(&context).await?;
        Ok(RenderedReport {
            filename: format!("analytics_report_{}.pdf", now.format("%Y-%m-%d_%H-%M-%S")),
            bytes,
        })
    }

    /// System-wide totals with per-group breakdowns
    pub async fn system_stats(&self) -> AppResult<SystemStats> {
        let (user_total, user_breakdown) = self.repository.reports.user_counts().await?;
        let (res_total, res_breakdown) = self.repository.reports.reservation_counts().await?;
        let (appt_total, appt_breakdown) = self.repository.reports.appointment_counts().await?;
        let total_revenue = self
            .repository
            .reports
            .completed_reservation_revenue()
            .await?;
        let prescriptions = self.repository.reports.prescription_count().await?;

        Ok(SystemStats {
            users: CountByGroup { total: user_total, breakdown: user_breakdown },
            reservations: ReservationStats {
                total: res_total,
                by_status: res_breakdown,
                total_revenue,
            },
            appointments: CountByGroup { total: appt_total, breakdown: appt_breakdown },
            prescriptions: TotalOnly { total: prescriptions },
        })
    }

    pub async fn reservation_logs(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Page<ReservationLogEntry>> {
        let page = filter.page.unwrap_or(1).max(1);
        let (rows, total) = self
            .repository
            .reports
            .reservation_logs(
                page,
                filter.start_date,
                filter.end_date,
                filter.status.as_deref(),
            )
            .await?;
        Ok(Page::new(rows, page, PAGE_SIZE, total))
    }

    pub async fn user_activity(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Page<UserActivityEntry>> {
        let page = filter.page.unwrap_or(1).max(1);
        let (rows, total) = self
            .repository
            .reports
            .user_activity(page, filter.role)
            .await?;
        Ok(Page::new(rows, page, PAGE_SIZE, total))
    }

    /// Daily completed-reservation revenue; defaults to the current month
    pub async fn revenue(&self, filter: &ReportFilter) -> AppResult<RevenueReport> {
        let today = Utc::now().date_naive();
        let start_date = filter
            .start_date
            .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
        let end_date = filter.end_date.unwrap_or_else(|| end_of_month(today));

        let daily = self
            .repository
            .reports
            .daily_revenue(start_date, end_date)
            .await?;

        let total_revenue: Decimal = daily.iter().map(|d| d.daily_revenue).sum();
        let total_reservations: i64 = daily.iter().map(|d| d.reservations_count).sum();
        let average = if total_reservations > 0 {
            total_revenue / Decimal::from(total_reservations)
        } else {
            Decimal::ZERO
        };

        Ok(RevenueReport {
            start_date,
            end_date,
            total_revenue,
            total_reservations,
            average_revenue_per_reservation: average,
            daily_breakdown: daily,
        })
    }

    pub async fn appointment_logs(
        &self,
        filter: &ReportFilter,
    ) -> AppResult<Page<AppointmentLogEntry>> {
        let page = filter.page.unwrap_or(1).max(1);
        let (rows, total) = self
            .repository
            .reports
            .appointment_logs(
                page,
                filter.start_date,
                filter.end_date,
                filter.status.as_deref(),
            )
            .await?;
        Ok(Page::new(rows, page, PAGE_SIZE, total))
    }
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_month_handles_december() {
        assert_eq!(
            end_of_month(NaiveDate::from_ymd_opt(2026, 12, 10).unwrap()),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
        assert_eq!(
            end_of_month(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }
}
