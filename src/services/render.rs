//! Report rendering seam and the built-in single-page PDF renderer

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::{error::AppResult, models::analytics::AnalyticsData};

/// Everything the renderer needs to lay out the analytics report
#[derive(Debug)]
pub struct AnalyticsReportContext {
    pub analytics: AnalyticsData,
    pub period_days: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub branch_id: Option<i32>,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
}

/// Rendering backend for downloadable reports. The default backend is
/// the built-in PDF writer; deployments can swap in an external engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render_analytics(&self, context: &AnalyticsReportContext) -> AppResult<Vec<u8>>;
}

/// Minimal PDF 1.4 writer producing a single text page. No external
/// engine required.
pub struct PdfRenderer;

#[async_trait]
impl ReportRenderer for PdfRenderer {
    async fn render_analytics(&self, context: &AnalyticsReportContext) -> AppResult<Vec<u8>> {
        Ok(build_pdf(&report_lines(context)))
    }
}

fn report_lines(ctx: &AnalyticsReportContext) -> Vec<String> {
    let a = &ctx.analytics;
    let mut lines = vec![
        "OptiCare Analytics Report".to_string(),
        String::new(),
        format!(
            "Period: last {} days ({} to {})",
            ctx.period_days, ctx.start_date, ctx.end_date
        ),
        match ctx.branch_id {
            Some(id) => format!("Branch: {}", id),
            None => "Branch: all branches".to_string(),
        },
        format!(
            "Generated: {} by {}",
            ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            ctx.generated_by
        ),
        String::new(),
        "Revenue".to_string(),
        format!("  Total: {}", a.revenue.total),
        format!("  Reservations: {}", a.revenue.reservations),
        format!("  Receipts: {}", a.revenue.receipts),
        String::new(),
        "Appointments".to_string(),
        format!("  Total: {}", a.appointments.total),
        format!("  Completed: {}", a.appointments.completed),
        format!("  Cancelled: {}", a.appointments.cancelled),
        format!("  Completion rate: {}%", a.appointments.completion_rate),
        String::new(),
        "Feedback".to_string(),
        format!("  Total: {}", a.feedback.total),
        format!("  Average rating: {}", a.feedback.avg_rating),
        format!("  Unique customers: {}", a.feedback.unique_customers),
        format!("  Response rate: {}%", a.feedback.response_rate),
        String::new(),
        "Branch performance".to_string(),
    ];
    for b in &a.branch_performance {
        lines.push(format!(
            "  {}: {} appointments, {} revenue, {} avg rating",
            b.name, b.appointments, b.revenue, b.avg_rating
        ));
    }
    lines.push(String::new());
    lines.push("Top services".to_string());
    for s in &a.top_services {
        lines.push(format!(
            "  {}: {}",
            s.r#type.as_deref().unwrap_or("unspecified"),
            s.count
        ));
    }
    lines
}

fn escape_pdf_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Assemble a one-page A4 PDF with the given text lines
fn build_pdf(lines: &[String]) -> Vec<u8> {
    let mut content = String::from("BT /F1 10 Tf 12 TL 50 800 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push_str("T*\n");
        }
        content.push_str(&format!("({}) Tj\n", escape_pdf_text(line)));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::{
        AnalyticsData, AppointmentAnalytics, FeedbackAnalytics, RevenueAnalytics,
    };
    use rust_decimal::Decimal;

    fn context() -> AnalyticsReportContext {
        AnalyticsReportContext {
            analytics: AnalyticsData {
                revenue: RevenueAnalytics {
                    total: Decimal::new(150000, 2),
                    reservations: Decimal::new(100000, 2),
                    receipts: Decimal::new(50000, 2),
                },
                appointments: AppointmentAnalytics {
                    total: 40,
                    completed: 30,
                    cancelled: 5,
                    completion_rate: 75.0,
                },
                feedback: FeedbackAnalytics {
                    total: 20,
                    avg_rating: 4.2,
                    unique_customers: 18,
                    response_rate: 50.0,
                },
                branch_performance: vec![],
                top_services: vec![],
                recent_feedback: vec![],
            },
            period_days: 30,
            start_date: NaiveDate::from_ymd_opt(2026, 7, 26).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            branch_id: None,
            generated_at: Utc::now(),
            generated_by: "Admin".to_string(),
        }
    }

    #[tokio::test]
    async fn builtin_renderer_produces_a_pdf() {
        let bytes = PdfRenderer.render_analytics(&context()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Completion rate: 75%"));
    }

    #[tokio::test]
    async fn renderer_seam_accepts_alternate_backends() {
        let mut mock = MockReportRenderer::new();
        mock.expect_render_analytics()
            .times(1)
            .returning(|_| Ok(b"rendered-elsewhere".to_vec()));
        let bytes = mock.render_analytics(&context()).await.unwrap();
        assert_eq!(bytes, b"rendered-elsewhere");
    }

    #[test]
    fn pdf_has_header_and_trailer() {
        let bytes = build_pdf(&["Hello".to_string()]);
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("startxref"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(escape_pdf_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = build_pdf(&["line one".to_string(), "line two".to_string()]);
        let text = String::from_utf8_lossy(&bytes);
        let xref = text.find("xref\n").unwrap();
        // Lines: "xref", "0 6", free entry, then the five object entries
        for (i, entry) in text[xref..].lines().skip(3).take(5).enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(text[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }
}
