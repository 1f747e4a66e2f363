//! Text and PDF exports of the requested window.

use salvo::http::HeaderValue;
use salvo::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use salvo::prelude::Text;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::EXPORT_ROUTE_COMPONENT;
use crate::app::api::view::{ViewQuery, open_board};
use crate::error::{AppError, AppResult};

/// ## Summary
/// GET /api/export/text - The window as chat markup.
///
/// ## Errors
/// Returns HTTP 400 for bad query parameters, 503 if storage is unreachable.
#[handler]
#[tracing::instrument(skip_all, fields(query = %req.uri().query().unwrap_or_default()))]
async fn export_text(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = match ViewQuery::from_request(req) {
        Ok(query) => open_board(depot, query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(board) => res.render(Text::Plain(board.export_text())),
        Err(e) => e.render(res),
    }
}

async fn build_pdf(req: &Request, depot: &Depot) -> AppResult<escala_service::board::PdfExport> {
    let query = ViewQuery::from_request(req)?;
    let board = open_board(depot, query).await?;
    Ok(board.export_pdf()?)
}

/// ## Summary
/// GET /api/export/pdf - The window as an A4 PDF download.
///
/// ## Side Effects
/// Sets `Content-Disposition: attachment` with `escala-semanal-DD-MM-YYYY.pdf`
/// or `escala-pontual-DD-MM-YYYY.pdf`.
///
/// ## Errors
/// Returns HTTP 400 for bad query parameters, 500 if rendering fails, 503 if
/// storage is unreachable.
#[handler]
#[tracing::instrument(skip_all, fields(query = %req.uri().query().unwrap_or_default()))]
async fn export_pdf(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let pdf = match build_pdf(req, depot).await {
        Ok(pdf) => pdf,
        Err(e) => {
            e.render(res);
            return;
        }
    };

    let disposition = match HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        pdf.file_name
    )) {
        Ok(value) => value,
        Err(e) => {
            AppError::BadRequest(format!("unusable file name: {e}")).render(res);
            return;
        }
    };

    tracing::info!(file_name = %pdf.file_name, size = pdf.bytes.len(), "PDF exported");

    if res
        .add_header(CONTENT_TYPE, HeaderValue::from_static("application/pdf"), true)
        .is_err()
        || res.add_header(CONTENT_DISPOSITION, disposition, true).is_err()
    {
        tracing::warn!("Failed to set PDF response headers");
    }
    if let Err(e) = res.write_body(pdf.bytes) {
        tracing::error!(error = %e, "Failed to write PDF body");
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EXPORT_ROUTE_COMPONENT)
        .push(Router::with_path("text").get(export_text))
        .push(Router::with_path("pdf").get(export_pdf))
}
