use std::sync::OnceLock;

use axum::{extract::Query, response::Html};
use minijinja::{context, Environment};

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ListReportsQuery;
use crate::features::shifts::catalog;

const INDEX_TEMPLATE: &str = include_str!("../../../../templates/index.html");
const REPORTS_TEMPLATE: &str = include_str!("../../../../templates/reports.html");

static TEMPLATES: OnceLock<Environment<'static>> = OnceLock::new();

/// Template environment with the embedded page templates
fn environment() -> &'static Environment<'static> {
    TEMPLATES.get_or_init(|| {
        let mut env = Environment::new();
        for (name, source) in [
            ("index.html", INDEX_TEMPLATE),
            ("reports.html", REPORTS_TEMPLATE),
        ] {
            if let Err(e) = env.add_template(name, source) {
                tracing::warn!("Failed to load template {}: {}", name, e);
            }
        }
        env
    })
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    let template = environment()
        .get_template(name)
        .map_err(|_| AppError::Internal(format!("Template '{}' not found", name)))?;

    template.render(ctx).map_err(|e| {
        tracing::error!("Failed to render template {}: {}", name, e);
        AppError::Internal(format!("Failed to render page: {}", e))
    })
}

/// Submission page with shift and author selection
pub async fn index_page() -> Result<Html<String>> {
    let html = render("index.html", context! { shifts => catalog() })?;
    Ok(Html(html))
}

/// Timeline page, optionally pre-filtered to one shift
pub async fn reports_page(Query(query): Query<ListReportsQuery>) -> Result<Html<String>> {
    let initial_shift = query.shift.map(|s| s.to_string()).unwrap_or_default();
    let html = render(
        "reports.html",
        context! { shifts => catalog(), initial_shift },
    )?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use crate::features::pages::routes;

    fn test_server() -> TestServer {
        TestServer::new(routes::routes()).unwrap()
    }

    #[tokio::test]
    async fn index_page_renders_the_shift_catalog() {
        let server = test_server();

        let response = server.get("/").await;
        response.assert_status_ok();

        let html = response.text();
        assert!(html.contains("Shift 1"));
        assert!(html.contains("06:00 - 14:20"));
        assert!(html.contains("22:00 - 06:00"));
        assert!(html.contains("name=\"photos\""));
    }

    #[tokio::test]
    async fn reports_page_carries_the_shift_filter() {
        let server = test_server();

        let response = server.get("/reports").await;
        response.assert_status_ok();
        assert!(response.text().contains("data-initial-shift=\"\""));

        let response = server.get("/reports?shift=2").await;
        response.assert_status_ok();
        assert!(response.text().contains("data-initial-shift=\"2\""));
    }
}
