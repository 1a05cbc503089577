use attendtrack_collab::NewCourse;
use axum::{
    extract::{Path, State},
    routing::get,
    Json,
};

use crate::{
    auth::Session,
    context::ServerContext,
    errors::ServerResult,
    schemas::{CourseSchema, UpdatedCourseSchema, ValidatedJson},
    serialized::{Course, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/v1/courses",
    tag = "courses",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<Course>)
    )
)]
pub async fn list_courses(
    session: Session,
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<Course>>> {
    let courses = context.tracker.courses.list(session.user())?;

    Ok(Json(courses.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/v1/courses/{id}",
    tag = "courses",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Course),
        (status = 404, description = "Course does not exist")
    )
)]
pub async fn course(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
) -> ServerResult<Json<Course>> {
    let course = context.tracker.courses.course_by_id(session.user(), &id)?;

    Ok(Json(course.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/courses",
    tag = "courses",
    request_body = CourseSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Course)
    )
)]
pub async fn create_course(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<CourseSchema>,
) -> ServerResult<Json<Course>> {
    let new_course = NewCourse::try_from(body)?;
    let course = context
        .tracker
        .courses
        .add_course(session.user(), new_course)?;

    Ok(Json(course.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/v1/courses/{id}",
    tag = "courses",
    request_body = UpdatedCourseSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Course),
        (status = 404, description = "Course does not exist")
    )
)]
pub async fn update_course(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatedCourseSchema>,
) -> ServerResult<Json<Course>> {
    let courses = &context.tracker.courses;
    let existing = courses.course_by_id(session.user(), &id)?;
    let updated = body.apply_to(existing)?;

    courses.update_course(session.user(), updated.clone())?;

    Ok(Json(updated.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/v1/courses/{id}",
    tag = "courses",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Course and its attendance records were deleted"),
        (status = 404, description = "Course does not exist")
    )
)]
pub async fn delete_course(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
) -> ServerResult<()> {
    let courses = &context.tracker.courses;

    courses.course_by_id(session.user(), &id)?;
    courses.delete_course(session.user(), &id)?;

    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(course).put(update_course).delete(delete_course),
        )
}
