use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the `bearer_auth` scheme referenced by `POST /api/notes`.
pub struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::core::http::handlers::health,
        crate::core::http::handlers::db_health,
        crate::notes::http::handlers::list_notes,
        crate::notes::http::handlers::get_note,
        crate::notes::http::handlers::create_note,
        crate::notes::http::handlers::delete_note,
        crate::notes::http::handlers::update_note,
        crate::users::http::handlers::create_user,
        crate::users::http::handlers::list_users,
        crate::auth::http::handlers::login
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::notes::http::CreateNoteRequest,
        crate::notes::http::UpdateNoteRequest,
        crate::notes::http::NoteDto,
        crate::notes::http::NoteListItemDto,
        crate::notes::http::NoteOwnerDto,
        crate::users::http::CreateUserRequest,
        crate::users::http::UserDto,
        crate::users::http::UserNoteDto,
        crate::auth::http::LoginRequest,
        crate::auth::http::LoginResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Core", description = "Liveness endpoints"),
        (name = "Notes", description = "Notes endpoints"),
        (name = "Users", description = "User accounts and their notes"),
        (name = "Auth", description = "Token issuing")
    )
)]
pub struct ApiDoc;
