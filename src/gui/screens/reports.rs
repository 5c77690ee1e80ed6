use maud::{Markup, html};

use crate::{
    core::db::{ReportKind, ReportRepository, month_name},
    gui::{
        message::{Feature, Message},
        router::View,
        screens::Screen,
        widgets::{RenderContext, empty_state},
    },
};

fn icon(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Monthly => "chart-line",
        ReportKind::Occupancy => "home",
        ReportKind::Payments => "dollar-sign",
        ReportKind::Tax => "receipt",
    }
}

pub struct ReportsScreen;

impl Screen for ReportsScreen {
    const VIEW: View = View::Reports;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let reports = ctx.db.reports();
        html! {
            h2.mobile-page-title { "Reportes" }
            div.mobile-report-kinds {
                @for kind in ReportKind::ALL {
                    div.mobile-card.mobile-report-kind data-report=(kind.as_str())
                        data-bind=(ctx.on_click(Message::GenerateReport(kind))) {
                        div.mobile-report-icon { i class={ "fas fa-" (icon(kind)) } {} }
                        div {
                            div.mobile-report-title { (kind.label()) }
                            div.mobile-report-description { (kind.description()) }
                        }
                        i.fas.fa-chevron-right {}
                    }
                }
            }
            div.mobile-card {
                div.mobile-card-header {
                    h3.mobile-card-title { "Reportes Recientes" }
                }
                @for report in reports.iter().rev() {
                    div.mobile-report-row {
                        div {
                            div.mobile-report-title { (report.title) }
                            div.mobile-report-description {
                                "Generado: " (report.generated_at.day()) " "
                                (&month_name(report.generated_at.month())[..3]) " "
                                (report.generated_at.year())
                            }
                        }
                        button.mobile-icon-btn aria-label="Descargar"
                            data-bind=(ctx.on_click(Message::Unavailable(Feature::DownloadReport))) {
                            i.fas.fa-download {}
                        }
                    }
                }
                @if reports.is_empty() {
                    (empty_state("No hay reportes generados"))
                }
            }
        }
    }
}
