//! Sign-up body extraction from either JSON or `multipart/form-data`.
//!
//! ```text
//! POST /api/users  Content-Type: application/json
//! {"email":"ada@example.com","password":"hunter22"}
//!
//! POST /api/users  Content-Type: multipart/form-data
//! email=ada@example.com, password=hunter22, file=@avatar.png
//! ```
//!
//! Multipart parts other than `email`, `password` and `file` are drained and
//! ignored. The `file` part is buffered up to [`UploadLimit`] bytes.

use actix_multipart::{Field, Multipart};
use actix_web::dev::Payload;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::TryStreamExt;
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;

use crate::domain::{Error, FileUpload, Filename};

use super::validation::{
    EMAIL, FieldName, PASSWORD, malformed_field_error, payload_too_large_error,
};

const FILE: FieldName = FieldName::new("file");
const FALLBACK_FILENAME: &str = "upload";

/// Default ceiling for a single multipart part.
pub const DEFAULT_UPLOAD_LIMIT: usize = 8 * 1024 * 1024;

/// Maximum number of bytes buffered per multipart part.
///
/// Register with `App::app_data(UploadLimit(..))`; requests fall back to
/// [`DEFAULT_UPLOAD_LIMIT`] when none is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimit(pub usize);

impl Default for UploadLimit {
    fn default() -> Self {
        Self(DEFAULT_UPLOAD_LIMIT)
    }
}

/// JSON sign-up body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    /// Address used to sign in.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plaintext password, 6 to 32 characters.
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Raw sign-up input before domain validation.
///
/// `email` and `password` are `None` when the part or key was absent.
#[derive(Debug, Default)]
pub struct SignUpForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<FileUpload>,
}

impl From<SignUpBody> for SignUpForm {
    fn from(body: SignUpBody) -> Self {
        Self {
            email: Some(body.email),
            password: Some(body.password),
            avatar: None,
        }
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn read_field(field: &mut Field, name: FieldName, limit: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| malformed_field_error(name, err))?
    {
        if buffer.len().saturating_add(chunk.len()) > limit {
            return Err(payload_too_large_error(name, limit));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

async fn read_text(field: &mut Field, name: FieldName, limit: usize) -> Result<String, Error> {
    let bytes = read_field(field, name, limit).await?;
    String::from_utf8(bytes).map_err(|err| malformed_field_error(name, err))
}

/// Treat an empty file part without a name as "no file chosen".
fn to_upload(filename: Option<String>, data: Vec<u8>) -> Result<Option<FileUpload>, Error> {
    let filename = filename.filter(|name| !name.trim().is_empty());
    if filename.is_none() && data.is_empty() {
        return Ok(None);
    }
    let filename = Filename::new(filename.as_deref().unwrap_or(FALLBACK_FILENAME))
        .map_err(|err| malformed_field_error(FILE, err))?;
    Ok(Some(FileUpload { filename, data }))
}

async fn read_multipart(mut multipart: Multipart, limit: usize) -> Result<SignUpForm, Error> {
    let mut form = SignUpForm::default();
    while let Some(mut field) = multipart
        .try_next()
        .await
        .map_err(|err| malformed_field_error(FieldName::new("body"), err))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("email") => {
                form.email = Some(read_text(&mut field, EMAIL, limit).await?);
            }
            Some("password") => {
                form.password = Some(read_text(&mut field, PASSWORD, limit).await?);
            }
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|disposition| disposition.get_filename())
                    .map(str::to_owned);
                let data = read_field(&mut field, FILE, limit).await?;
                form.avatar = to_upload(filename, data)?;
            }
            _ => {
                read_field(&mut field, FieldName::new("body"), limit).await?;
            }
        }
    }
    Ok(form)
}

impl FromRequest for SignUpForm {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_multipart(req) {
            let limit = req
                .app_data::<UploadLimit>()
                .copied()
                .unwrap_or_default()
                .0;
            let multipart = Multipart::new(req.headers(), payload.take());
            Box::pin(async move { Ok(read_multipart(multipart, limit).await?) })
        } else {
            // Rejections keep the `JsonConfig` error handler's payload.
            let json = web::Json::<SignUpBody>::from_request(req, payload);
            Box::pin(async move { Ok(json.await?.into_inner().into()) })
        }
    }
}
