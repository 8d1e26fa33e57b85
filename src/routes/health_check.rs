use actix_web::HttpResponse;
use chrono::{
    SecondsFormat,
    Utc,
};
use serde_json::json;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Backend API running",
        "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
