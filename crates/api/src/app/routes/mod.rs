use axum::Router;

pub mod export_invoices;
pub mod packing_lists;
pub mod pages;
pub mod proforma_invoices;
pub mod system;

/// JSON endpoints, mounted under `/api`.
pub fn api_router() -> Router {
    Router::new()
        .nest("/packaging-list", packing_lists::router())
        .nest("/proforma-invoice", proforma_invoices::router())
        .nest("/zc-exporter", export_invoices::router())
}
