use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::error::Result;
use crate::features::images::services::{ImageKind, ImageService};
use crate::shared::images::sniff_content_type;

/// Stream stored picture bytes
#[utoipa::path(
    get,
    path = "/image/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "location, location-attraction, activity or accommodation"),
        ("id" = i64, Path, description = "Picture id, or activity id for activity images")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Image not found")
    ),
    tag = "images"
)]
pub async fn get_image(
    State(service): State<Arc<ImageService>>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Response> {
    let kind: ImageKind = kind.parse()?;
    let bytes = service.get_image(kind, id).await?;
    let content_type = sniff_content_type(&bytes);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
        .into_response())
}
