use crate::application::BlogService;
use crate::domain::post::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::domain::DomainError;
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use serde::de::DeserializeOwned;
use std::sync::Arc;

// Ответ со списком постов
#[derive(serde::Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
}

// Преобразование DomainError в HttpResponse
fn error_to_response(err: DomainError) -> HttpResponse {
    let status_code = err.to_status_code();
    let message = err.to_string();

    match status_code {
        400 => HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        404 => HttpResponse::NotFound().json(serde_json::json!({ "error": message })),
        _ => {
            tracing::error!("Request failed: {}", message);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Internal server error" }))
        }
    }
}

/// Request bodies must be JSON objects. Derived structs would otherwise also
/// accept arrays and fill fields by position.
fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, DomainError> {
    if !body.is_object() {
        return Err(DomainError::ValidationError(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(body).map_err(|e| DomainError::ValidationError(e.to_string()))
}

/// Malformed JSON, a missing body or a wrong content type all get a 400 with
/// the same `{"error": ...}` shape as validation failures.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    use actix_web::error::JsonPayloadError;

    let message = match &err {
        JsonPayloadError::ContentType => {
            "Request body must be JSON (Content-Type: application/json)".to_string()
        }
        _ => err.to_string(),
    };
    tracing::debug!("Rejected request body: {}", message);

    let resp = HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
    error::InternalError::from_response(err, resp).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/posts")
                .route("", web::get().to(list_posts))
                .route("", web::post().to(create_post))
                .route("/{id}", web::get().to(get_post))
                .route("/{id}", web::put().to(update_post))
                .route("/{id}", web::delete().to(delete_post)),
        );
}

// ============== Post Handlers ==============

pub async fn list_posts(blog_service: web::Data<Arc<BlogService>>) -> impl Responder {
    tracing::info!("Listing posts");

    match blog_service.list_posts().await {
        Ok(posts) => HttpResponse::Ok().json(PostsResponse { posts }),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_post(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> impl Responder {
    let post_id = path.into_inner();

    tracing::info!("Getting post with id={}", post_id);

    match blog_service.get_post(&post_id).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_post(
    blog_service: web::Data<Arc<BlogService>>,
    post_data: web::Json<serde_json::Value>,
) -> impl Responder {
    tracing::info!("Creating post");

    let req = match parse_body::<CreatePostRequest>(post_data.into_inner()) {
        Ok(req) => req,
        Err(err) => return error_to_response(err),
    };

    match blog_service.create_post(req).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn update_post(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
    post_data: web::Json<serde_json::Value>,
) -> impl Responder {
    let post_id = path.into_inner();

    tracing::info!("Updating post id={}", post_id);

    let req = match parse_body::<UpdatePostRequest>(post_data.into_inner()) {
        Ok(req) => req,
        Err(err) => return error_to_response(err),
    };

    match blog_service.update_post(&post_id, req).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_to_response(err),
    }
}

pub async fn delete_post(
    blog_service: web::Data<Arc<BlogService>>,
    path: web::Path<String>,
) -> impl Responder {
    let post_id = path.into_inner();

    tracing::info!("Deleting post id={}", post_id);

    match blog_service.delete_post(&post_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_to_response(err),
    }
}
