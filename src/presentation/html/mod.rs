//! Server-rendered pages. Everything user-supplied goes through
//! `htmlescape::encode_minimal` before it reaches the markup.

use htmlescape::encode_minimal as escape_html;

use crate::application::services::forms::{FieldErrors, LoginForm, RegisterForm, StoryForm};
use crate::domain::stories::story::Story;
use crate::presentation::http::session::Flash;

fn nav(user: Option<&str>) -> String {
    let right = match user {
        Some(name) => format!(
            r#"<a href="/profile">{}</a> <a href="/addstory">Add story</a> <a href="/logout">Log out</a>"#,
            escape_html(name)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<nav><a href="/">Storyhub</a> <a href="/stories">Stories</a> <a href="/about">About</a><span class="right">{right}</span></nav>"#
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(f) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            escape_html(&f.category),
            escape_html(&f.message)
        ),
        None => String::new(),
    }
}

pub fn layout(title: &str, user: Option<&str>, flash: Option<&Flash>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<title>{title} - Storyhub</title>\n</head>\n<body>\n{nav}\n{flash}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
        nav = nav(user),
        flash = flash_banner(flash),
        body = body,
    )
}

pub fn index_page(user: Option<&str>, flash: Option<&Flash>) -> String {
    let body = "<h1>Storyhub</h1>\n<p>Share the stories behind your favourite shows. \
                Browse what others have posted, or sign up to add your own.</p>\n\
                <p><a href=\"/stories\">Browse stories</a></p>";
    layout("Home", user, flash, body)
}

pub fn about_page(user: Option<&str>, flash: Option<&Flash>) -> String {
    let body = "<h1>About</h1>\n<p>Storyhub collects stories about famous people and the \
                shows they appeared on, each with a link to the source.</p>";
    layout("About", user, flash, body)
}

fn story_row(story: &Story) -> String {
    format!(
        r#"<li><a href="/story/{id}">{name}</a> — {famous} on {show}, posted by {user}</li>"#,
        id = story.id,
        name = escape_html(&story.story_name),
        famous = escape_html(&story.famous_name),
        show = escape_html(&story.show_name),
        user = escape_html(&story.username),
    )
}

fn search_form() -> &'static str {
    r#"<form method="post" action="/search"><input type="text" name="keyword" placeholder="Search stories" /><button type="submit">Search</button></form>"#
}

pub fn stories_page(
    user: Option<&str>,
    flash: Option<&Flash>,
    stories: &[Story],
    heading: &str,
) -> String {
    let list = if stories.is_empty() {
        "<p>No stories yet.</p>".to_string()
    } else {
        format!(
            "<ul>\n{}\n</ul>",
            stories.iter().map(story_row).collect::<Vec<_>>().join("\n")
        )
    };
    let body = format!(
        "<h1>{}</h1>\n{}\n{}",
        escape_html(heading),
        search_form(),
        list
    );
    layout(heading, user, flash, &body)
}

pub fn story_detail_page(
    user: Option<&str>,
    flash: Option<&Flash>,
    story: Option<&Story>,
) -> String {
    let body = match story {
        Some(s) => {
            let mut b = format!(
                "<h1>{name}</h1>\n<p>{famous} on {show}</p>\n<p><a href=\"{url}\" rel=\"noopener noreferrer\">{url}</a></p>\n<p>Posted by {user} on {date}</p>",
                name = escape_html(&s.story_name),
                famous = escape_html(&s.famous_name),
                show = escape_html(&s.show_name),
                url = escape_html(&s.url),
                user = escape_html(&s.username),
                date = s.created_at.format("%Y-%m-%d"),
            );
            if user == Some(s.username.as_str()) {
                b.push_str(&format!(
                    "\n<p><a href=\"/update/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></p>",
                    id = s.id
                ));
            }
            b
        }
        None => "<h1>Story not found</h1>\n<p>There is no such story.</p>".to_string(),
    };
    layout("Story", user, flash, &body)
}

pub fn profile_page(username: &str, flash: Option<&Flash>, stories: &[Story]) -> String {
    let list = if stories.is_empty() {
        "<p>You have not posted any stories yet. <a href=\"/addstory\">Add one</a>.</p>"
            .to_string()
    } else {
        format!(
            "<ul>\n{}\n</ul>",
            stories.iter().map(story_row).collect::<Vec<_>>().join("\n")
        )
    };
    let body = format!(
        "<h1>Your stories</h1>\n{list}\n<p><a href=\"/addstory\">Add story</a></p>"
    );
    layout("Profile", Some(username), flash, &body)
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(msg) => format!(r#"<span class="error">{}</span>"#, escape_html(msg)),
        None => String::new(),
    }
}

fn text_input(label: &str, name: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{value}" />{err}</label>"#,
        label = label,
        name = name,
        value = escape_html(value),
        err = field_error(errors, name),
    )
}

fn password_input(label: &str, name: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<label>{label} <input type="password" name="{name}" />{err}</label>"#,
        label = label,
        name = name,
        err = field_error(errors, name),
    )
}

pub fn register_page(flash: Option<&Flash>, form: &RegisterForm, errors: &FieldErrors) -> String {
    let body = format!(
        "<h1>Register</h1>\n<form method=\"post\" action=\"/register\">\n{}\n{}\n{}\n{}\n{}\n{}\n<button type=\"submit\">Register</button>\n</form>",
        text_input("First name:", "first_name", &form.first_name, errors),
        text_input("Last name:", "last_name", &form.last_name, errors),
        text_input("Username:", "username", &form.username, errors),
        text_input("Email:", "email", &form.email, errors),
        password_input("Password:", "password", errors),
        password_input("Repeat password:", "confirm_password", errors),
    );
    layout("Register", None, flash, &body)
}

pub fn login_page(flash: Option<&Flash>, form: &LoginForm, errors: &FieldErrors) -> String {
    let body = format!(
        "<h1>Log in</h1>\n<form method=\"post\" action=\"/login\">\n{}\n{}\n<button type=\"submit\">Log in</button>\n</form>",
        text_input("Username:", "username", &form.username, errors),
        password_input("Password:", "password", errors),
    );
    layout("Log in", None, flash, &body)
}

pub fn story_form_page(
    username: &str,
    flash: Option<&Flash>,
    heading: &str,
    action: &str,
    form: &StoryForm,
    errors: &FieldErrors,
) -> String {
    let body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n{}\n{}\n{}\n{}\n<button type=\"submit\">Save</button>\n</form>",
        escape_html(heading),
        escape_html(action),
        text_input("Story name:", "story_name", &form.story_name, errors),
        text_input("Famous name:", "famous_name", &form.famous_name, errors),
        text_input("Show name:", "show_name", &form.show_name, errors),
        text_input("URL:", "url", &form.url, errors),
    );
    layout(heading, Some(username), flash, &body)
}
