//! File download handler.
//!
//! ```text
//! GET /api/files/{id}
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};

use crate::domain::StoredFile;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn file_response(file: StoredFile) -> HttpResponse {
    let (filename, data) = file.into_parts();
    let mime = mime_guess::from_path(filename.as_ref()).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.essence_str().to_owned())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(filename.as_ref().to_owned())],
        })
        .body(data)
}

/// Stream a stored file's bytes back to the client.
///
/// `Content-Type` is guessed from the stored filename and falls back to
/// `application/octet-stream`.
#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(("id" = String, Path, description = "File identifier (UUID)")),
    responses(
        (
            status = 200,
            description = "File bytes",
            content_type = "application/octet-stream",
            body = Vec<u8>,
            headers(("Content-Disposition" = String, description = "inline; filename=\"<name>\""))
        ),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "File not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "getFile",
    security([])
)]
#[get("/files/{id}")]
pub async fn get_file(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let file = state.files_query.get_by_id(&path.into_inner()).await?;
    Ok(file_response(file))
}
