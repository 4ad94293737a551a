use axum::Json;

use crate::core::error::Result;
use crate::features::shifts::model::{catalog, Shift};
use crate::shared::types::ApiResponse;

/// List the known shifts
#[utoipa::path(
    get,
    path = "/api/shifts",
    responses(
        (status = 200, description = "Shift catalog", body = ApiResponse<Vec<Shift>>)
    ),
    tag = "shifts"
)]
pub async fn list_shifts() -> Result<Json<ApiResponse<Vec<Shift>>>> {
    Ok(Json(ApiResponse::success(Some(catalog()), None, None)))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use crate::features::shifts::model::Shift;
    use crate::features::shifts::routes;
    use crate::shared::types::ApiResponse;

    #[tokio::test]
    async fn shift_catalog_endpoint_returns_all_shifts() {
        let server = TestServer::new(routes::routes()).unwrap();

        let response = server.get("/api/shifts").await;
        response.assert_status_ok();

        let body: ApiResponse<Vec<Shift>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.unwrap().len(), 3);
    }
}
