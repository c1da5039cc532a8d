//! Dashboard page handler

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(INDEX_HTML)
}
