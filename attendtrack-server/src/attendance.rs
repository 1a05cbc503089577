use axum::{
    extract::{Path, State},
    routing::get,
    Json,
};

use crate::{
    auth::Session,
    context::ServerContext,
    errors::ServerResult,
    schemas::{AttendanceSchema, ValidatedJson},
    serialized::{AttendanceRecord, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/v1/attendance/{course_id}",
    tag = "attendance",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<AttendanceRecord>)
    )
)]
pub async fn records(
    session: Session,
    State(context): State<ServerContext>,
    Path(course_id): Path<String>,
) -> ServerResult<Json<Vec<AttendanceRecord>>> {
    let records = context
        .tracker
        .courses
        .records_for_course(session.user(), &course_id)?;

    Ok(Json(records.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/attendance/{course_id}",
    tag = "attendance",
    request_body = AttendanceSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = AttendanceRecord),
        (status = 404, description = "Course does not exist"),
        (status = 409, description = "Attendance is already marked for that day")
    )
)]
pub async fn mark_attendance(
    session: Session,
    State(context): State<ServerContext>,
    Path(course_id): Path<String>,
    ValidatedJson(body): ValidatedJson<AttendanceSchema>,
) -> ServerResult<Json<AttendanceRecord>> {
    let courses = &context.tracker.courses;

    courses.course_by_id(session.user(), &course_id)?;
    let record =
        courses.mark_attendance(session.user(), &course_id, body.date, body.status.into())?;

    Ok(Json(record.to_serialized()))
}

pub fn router() -> Router {
    Router::new().route("/:course_id", get(records).post(mark_attendance))
}
