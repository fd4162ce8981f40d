use crate::actions;
use crate::db::DbPool;
use crate::display::{FixedFormPage, FixedResultsPage, FormPage, ResultsPage, View};
use crate::error::Error;
use crate::mode::Mode;
use crate::models::{FixedSubmission, Submission};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use diesel::sqlite::SqliteConnection;

pub const RESULTS_PATH: &str = "/results";

/// Route table of the survey served in `mode`.
pub fn for_mode(mode: Mode) -> fn(&mut web::ServiceConfig) {
    match mode {
        Mode::Questions => questionnaire,
        Mode::Fixed => fixed,
    }
}

pub fn questionnaire(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(form_page))
        .service(
            web::resource("/submit")
                .route(web::post().to(submit))
                .default_service(web::route().to(method_not_allowed)),
        )
        .route(RESULTS_PATH, web::get().to(results_page));
}

pub fn fixed(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(fixed_form_page))
        .service(
            web::resource("/submit")
                .route(web::post().to(fixed_submit))
                .default_service(web::route().to(method_not_allowed)),
        )
        .route(RESULTS_PATH, web::get().to(fixed_results_page));
}

/// Runs `f` with a pooled connection on the blocking thread pool.
async fn with_conn<F, T>(pool: web::Data<DbPool>, f: F) -> Result<T, Error>
where
    F: FnOnce(&SqliteConnection) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let result = web::block(move || -> Result<T, Error> {
        let conn = pool.get()?;
        f(&*conn)
    })
    .await?;
    Ok(result)
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_results() -> HttpResponse {
    HttpResponse::SeeOther()
        .header(header::LOCATION, RESULTS_PATH)
        .finish()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .header(header::ALLOW, "POST")
        .body("Method not allowed")
}

async fn form_page(pool: web::Data<DbPool>) -> Result<HttpResponse, Error> {
    let questions = with_conn(pool, |conn| Ok(actions::list_questions(conn)?)).await?;
    Ok(html(FormPage { questions: &questions }.render()?))
}

async fn submit(
    pool: web::Data<DbPool>,
    web::Form(fields): web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, Error> {
    let submission = Submission::from_fields(fields);
    let written = with_conn(pool, move |conn| actions::record_submission(conn, &submission)).await?;
    log::debug!("recorded {} answers", written);
    Ok(see_results())
}

async fn results_page(pool: web::Data<DbPool>) -> Result<HttpResponse, Error> {
    let rows = with_conn(pool, |conn| Ok(actions::load_results(conn)?)).await?;
    Ok(html(ResultsPage { rows: &rows }.render()?))
}

async fn fixed_form_page() -> Result<HttpResponse, Error> {
    Ok(html(FixedFormPage.render().map_err(Error::opaque)?))
}

async fn fixed_submit(
    pool: web::Data<DbPool>,
    web::Form(submission): web::Form<FixedSubmission>,
) -> Result<HttpResponse, Error> {
    let row = submission.to_row()?;
    with_conn(pool, move |conn| Ok(actions::insert_fixed(conn, &row)?))
        .await
        .map_err(Error::opaque)?;
    Ok(see_results())
}

async fn fixed_results_page(pool: web::Data<DbPool>) -> Result<HttpResponse, Error> {
    let rows = with_conn(pool, |conn| Ok(actions::load_fixed(conn)?))
        .await
        .map_err(Error::opaque)?;
    Ok(html(
        FixedResultsPage { rows: &rows }
            .render()
            .map_err(Error::opaque)?,
    ))
}
