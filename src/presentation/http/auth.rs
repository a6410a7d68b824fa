use axum::{
    Router,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use crate::application::services::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest};
use crate::application::use_cases::auth::logout::Logout as LogoutUc;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest,
};
use crate::application::use_cases::stories::list_user_stories::ListUserStories;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::html;
use crate::presentation::http::session::{
    Flash, IncomingFlash, SessionToken, clear_session_cookie, redirect_with_flash, render,
    require_user, session_cookie, set_cookie,
};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", get(register_form).post(register_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .with_state(ctx)
}

pub async fn register_form(State(ctx): State<AppContext>, flash: IncomingFlash) -> Response {
    render(
        html::register_page(flash.0.as_ref(), &RegisterForm::default(), &FieldErrors::default()),
        &flash,
        ctx.cfg.secure_cookies(),
    )
}

pub async fn register_submit(
    State(ctx): State<AppContext>,
    flash: IncomingFlash,
    Form(form): Form<RegisterForm>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let mut errors = form.validate();
    if !errors.is_empty() {
        return render(html::register_page(None, &form, &errors), &flash, secure);
    }

    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let req = RegisterRequest {
        username: form.username.trim().to_string(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };
    match uc.execute(&req).await {
        Ok(_) => redirect_with_flash(
            "/login",
            Flash::new("success", "You have successfully registered!"),
            secure,
        ),
        Err(RegisterError::UsernameTaken) => {
            errors.push("username", "This username is already taken");
            render(html::register_page(None, &form, &errors), &flash, secure)
        }
        Err(e) => {
            error!(error = ?e, "register_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn login_form(State(ctx): State<AppContext>, flash: IncomingFlash) -> Response {
    render(
        html::login_page(flash.0.as_ref(), &LoginForm::default(), &FieldErrors::default()),
        &flash,
        ctx.cfg.secure_cookies(),
    )
}

pub async fn login_submit(
    State(ctx): State<AppContext>,
    flash: IncomingFlash,
    Form(form): Form<LoginForm>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let errors = form.validate();
    if !errors.is_empty() {
        return render(html::login_page(None, &form, &errors), &flash, secure);
    }

    let users = ctx.user_repo();
    let sessions = ctx.session_repo();
    let uc = LoginUc {
        users: users.as_ref(),
        sessions: sessions.as_ref(),
    };
    let req = LoginRequest {
        username: form.username.trim().to_string(),
        password: form.password.clone(),
    };
    let ttl = chrono::Duration::seconds(ctx.cfg.session_ttl_secs);
    match uc.execute(&req, ttl).await {
        Ok(Some((user, session))) => {
            let mut resp = redirect_with_flash(
                "/",
                Flash::new(
                    "success",
                    format!("You have successfully logged in! Welcome {} :)", user.username),
                ),
                secure,
            );
            set_cookie(
                resp.headers_mut(),
                &session_cookie(&session.token, ctx.cfg.session_ttl_secs, secure),
            );
            resp
        }
        // Same notice for unknown user and wrong password.
        Ok(None) => redirect_with_flash(
            "/login",
            Flash::new("danger", "Invalid username or password!"),
            secure,
        ),
        Err(e) => {
            error!(error = ?e, "login_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn logout(State(ctx): State<AppContext>, token: Option<SessionToken>) -> Response {
    let secure = ctx.cfg.secure_cookies();
    if let Some(token) = &token {
        let sessions = ctx.session_repo();
        let uc = LogoutUc {
            sessions: sessions.as_ref(),
        };
        if let Err(e) = uc.execute(&token.0).await {
            error!(error = ?e, "logout_failed");
        }
    }
    let mut resp = redirect_with_flash(
        "/",
        Flash::new("info", "You have successfully logged out!"),
        secure,
    );
    set_cookie(resp.headers_mut(), &clear_session_cookie(secure));
    resp
}

pub async fn profile(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let repo = ctx.story_repo();
    let uc = ListUserStories {
        repo: repo.as_ref(),
    };
    match uc.execute(&username).await {
        Ok(stories) => render(
            html::profile_page(&username, flash.0.as_ref(), &stories),
            &flash,
            ctx.cfg.secure_cookies(),
        ),
        Err(e) => {
            error!(error = ?e, "profile_list_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
