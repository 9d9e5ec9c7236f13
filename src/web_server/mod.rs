use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    routing::get,
    Router,
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "web/"]
struct WebAssets;

async fn serve_asset(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');

    let file_path = if path.is_empty() { "index.html" } else { path };

    if let Some(content) = WebAssets::get(file_path) {
        let mime = mime_guess::from_path(file_path).first_or_octet_stream();

        return Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime.as_ref())
            .body(Body::from(content.data.into_owned()))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            });
    }

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(
            r#"<!DOCTYPE html>
<html>
<head><title>404 Not Found</title></head>
<body>
<h1>404 - Not Found</h1>
<p><a href="/">Back to the task list</a></p>
</body>
</html>"#,
        ))
        .unwrap()
}

pub fn configure_web_routes() -> Router {
    Router::new().fallback(get(serve_asset))
}

pub fn has_embedded_ui() -> bool {
    WebAssets::get("index.html").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page_is_embedded() {
        assert!(has_embedded_ui());
    }

    #[test]
    fn test_assets_are_embedded() {
        assert!(WebAssets::get("js/app.js").is_some());
        assert!(WebAssets::get("css/style.css").is_some());
    }
}
