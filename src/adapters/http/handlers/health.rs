use actix_web::HttpResponse;
use chrono::Utc;

use crate::adapters::http::dtos::HealthResponse;

/// Liveness probe
///
/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse {
    ok: true,
    ts: Utc::now(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{App, test, web};
  use serde_json::Value;

  #[actix_web::test]
  async fn test_health_reports_ok() {
    let app =
      test::init_service(App::new().route("/health", web::get().to(health_handler))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert!(body["ts"].is_string());
  }
}
