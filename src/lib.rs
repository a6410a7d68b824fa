// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB adapters
// - presentation: HTTP handlers, routing and HTML rendering
// - application: use cases, ports and form validation
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
