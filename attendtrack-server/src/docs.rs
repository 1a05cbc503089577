use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{attendance, auth, courses, schemas, serialized};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::register,
        auth::logout,
        auth::user,
        courses::list_courses,
        courses::course,
        courses::create_course,
        courses::update_course,
        courses::delete_course,
        attendance::records,
        attendance::mark_attendance,
    ),
    components(schemas(
        schemas::LoginSchema,
        schemas::RegisterSchema,
        schemas::CourseSchema,
        schemas::UpdatedCourseSchema,
        schemas::ScheduleSchema,
        schemas::AttendanceSchema,
        schemas::RecordStatusSchema,
        serialized::User,
        serialized::LoginResult,
        serialized::Course,
        serialized::Schedule,
        serialized::AttendanceRecord,
    )),
    modifiers(&Security),
    info(
        description = "attendtrack-server exposes endpoints to track course attendance"
    )
)]
pub struct ApiDoc;

struct Security;

impl Modify for Security {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            let scheme = HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("Bearer <token>")
                .build();

            components.add_security_scheme("BearerAuth", SecurityScheme::Http(scheme))
        }
    }
}

pub async fn docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_every_route() {
        let api = ApiDoc::openapi();

        for path in [
            "/v1/auth/login",
            "/v1/user",
            "/v1/courses",
            "/v1/courses/{id}",
            "/v1/attendance/{course_id}",
        ] {
            assert!(api.paths.paths.contains_key(path), "{path} is documented");
        }

        let components = api.components.unwrap();
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
