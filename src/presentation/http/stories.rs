use axum::{
    Router,
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::application::ports::story_repository::NewStory;
use crate::application::services::forms::{FieldErrors, StoryForm};
use crate::application::use_cases::stories::create_story::CreateStory;
use crate::application::use_cases::stories::delete_story::DeleteStory;
use crate::application::use_cases::stories::get_story::GetStory;
use crate::application::use_cases::stories::list_stories::ListStories;
use crate::application::use_cases::stories::search_stories::SearchStories;
use crate::application::use_cases::stories::update_story::UpdateStory;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::html;
use crate::presentation::http::session::{
    Flash, IncomingFlash, SessionToken, redirect, redirect_with_flash, render, require_user,
    resolve_user,
};

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/stories", get(list_stories))
        .route("/story/:id", get(story_details))
        .route("/addstory", get(add_story_form).post(add_story_submit))
        .route("/update/:id", get(update_story_form).post(update_story_submit))
        .route("/delete/:id", get(delete_story))
        .route("/search", get(search_redirect).post(search))
        .with_state(ctx)
}

impl From<StoryForm> for NewStory {
    fn from(form: StoryForm) -> Self {
        NewStory {
            story_name: form.story_name.trim().to_string(),
            famous_name: form.famous_name.trim().to_string(),
            show_name: form.show_name.trim().to_string(),
            url: form.url.trim().to_string(),
        }
    }
}

pub async fn list_stories(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let user = resolve_user(&ctx, token.as_ref()).await;
    let repo = ctx.story_repo();
    let uc = ListStories {
        repo: repo.as_ref(),
    };
    match uc.execute().await {
        Ok(stories) => render(
            html::stories_page(user.as_deref(), flash.0.as_ref(), &stories, "All stories"),
            &flash,
            ctx.cfg.secure_cookies(),
        ),
        Err(e) => {
            error!(error = ?e, "list_stories_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn story_details(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let user = resolve_user(&ctx, token.as_ref()).await;
    let repo = ctx.story_repo();
    let uc = GetStory {
        repo: repo.as_ref(),
    };
    match uc.execute(id).await {
        Ok(story) => render(
            html::story_detail_page(user.as_deref(), flash.0.as_ref(), story.as_ref()),
            &flash,
            ctx.cfg.secure_cookies(),
        ),
        Err(e) => {
            error!(story_id = %id, error = ?e, "get_story_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn add_story_form(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    render(
        html::story_form_page(
            &username,
            flash.0.as_ref(),
            "Add story",
            "/addstory",
            &StoryForm::default(),
            &FieldErrors::default(),
        ),
        &flash,
        ctx.cfg.secure_cookies(),
    )
}

pub async fn add_story_submit(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
    Form(form): Form<StoryForm>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return render(
            html::story_form_page(&username, None, "Add story", "/addstory", &form, &errors),
            &flash,
            secure,
        );
    }

    let repo = ctx.story_repo();
    let uc = CreateStory {
        repo: repo.as_ref(),
    };
    match uc.execute(&username, &form.into()).await {
        Ok(_) => redirect_with_flash(
            "/profile",
            Flash::new("success", "Story has been successfully added!"),
            secure,
        ),
        Err(e) => {
            error!(error = ?e, "create_story_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn update_story_form(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let repo = ctx.story_repo();
    let uc = GetStory {
        repo: repo.as_ref(),
    };
    let story = match uc.execute(id).await {
        Ok(s) => s,
        Err(e) => {
            error!(story_id = %id, error = ?e, "get_story_failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    match story {
        Some(s) if s.username == username => {
            let form = StoryForm {
                story_name: s.story_name,
                famous_name: s.famous_name,
                show_name: s.show_name,
                url: s.url,
            };
            render(
                html::story_form_page(
                    &username,
                    flash.0.as_ref(),
                    "Update story",
                    &format!("/update/{id}"),
                    &form,
                    &FieldErrors::default(),
                ),
                &flash,
                secure,
            )
        }
        _ => redirect_with_flash(
            "/",
            Flash::new("warning", "There is no such story, or it is not yours to update!"),
            secure,
        ),
    }
}

pub async fn update_story_submit(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
    Form(form): Form<StoryForm>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let errors = form.validate();
    if !errors.is_empty() {
        return render(
            html::story_form_page(
                &username,
                None,
                "Update story",
                &format!("/update/{id}"),
                &form,
                &errors,
            ),
            &flash,
            secure,
        );
    }

    let repo = ctx.story_repo();
    let uc = UpdateStory {
        repo: repo.as_ref(),
    };
    match uc.execute(id, &username, &form.into()).await {
        Ok(Some(_)) => redirect_with_flash(
            "/profile",
            Flash::new("success", "Story has been successfully updated!"),
            secure,
        ),
        Ok(None) => redirect_with_flash(
            "/",
            Flash::new("warning", "There is no such story, or it is not yours to update!"),
            secure,
        ),
        Err(e) => {
            error!(story_id = %id, error = ?e, "update_story_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn delete_story(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    token: Option<SessionToken>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let username = match require_user(&ctx, token.as_ref()).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let repo = ctx.story_repo();
    let uc = DeleteStory {
        repo: repo.as_ref(),
    };
    match uc.execute(id, &username).await {
        Ok(true) => redirect("/profile"),
        Ok(false) => redirect_with_flash(
            "/",
            Flash::new("warning", "There is no such story, or it is not yours to delete!"),
            secure,
        ),
        Err(e) => {
            error!(story_id = %id, error = ?e, "delete_story_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub keyword: String,
}

// GET on /search just bounces back to the landing page.
pub async fn search_redirect() -> Response {
    redirect("/")
}

pub async fn search(
    State(ctx): State<AppContext>,
    token: Option<SessionToken>,
    flash: IncomingFlash,
    Form(form): Form<SearchForm>,
) -> Response {
    let secure = ctx.cfg.secure_cookies();
    let user = resolve_user(&ctx, token.as_ref()).await;
    let repo = ctx.story_repo();
    let uc = SearchStories {
        repo: repo.as_ref(),
    };
    match uc.execute(&form.keyword).await {
        Ok(stories) if stories.is_empty() => redirect_with_flash(
            "/stories",
            Flash::new("warning", "No story matches that keyword!"),
            secure,
        ),
        Ok(stories) => render(
            html::stories_page(user.as_deref(), flash.0.as_ref(), &stories, "Search results"),
            &flash,
            secure,
        ),
        Err(e) => {
            error!(error = ?e, "search_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
