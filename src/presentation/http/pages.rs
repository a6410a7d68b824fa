use axum::{Router, extract::State, response::Response, routing::get};

use crate::bootstrap::app_context::AppContext;
use crate::presentation::html;
use crate::presentation::http::session::{IncomingFlash, SessionToken, render, resolve_user};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .with_state(ctx)
}

pub async fn index(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let user = resolve_user(&ctx, token.as_ref()).await;
    render(
        html::index_page(user.as_deref(), flash.0.as_ref()),
        &flash,
        ctx.cfg.secure_cookies(),
    )
}

pub async fn about(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let user = resolve_user(&ctx, token.as_ref()).await;
    render(
        html::about_page(user.as_deref(), flash.0.as_ref()),
        &flash,
        ctx.cfg.secure_cookies(),
    )
}
