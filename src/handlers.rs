use crate::errors::AppError;
use crate::models::{
    DayResponse, IndexQuery, Report, ReportForm, ReportRequest, SettingsForm, StatusDocument,
};
use crate::reports::{DEFAULT_DIFFICULTY, ReportOutcome, RuLocale, record_report};
use crate::settings::{SettingsOutcome, record_settings};
use crate::slider::DifficultySlider;
use crate::state::AppState;
use crate::status::render_status;
use crate::storage::{load_reference, load_reports, persist_data};
use crate::theme::{initialize_theme, toggle_theme};
use crate::tracker::{DayStatus, day_status_at, display_current_day};
use crate::ui::{Notice, Page, render_index};
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use tracing::error;

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let settings_open = query.settings.as_deref() == Some("open");
    let notice = query.notice.as_deref().and_then(Notice::from_code);
    let page = build_page(&state, settings_open, notice).await;
    Html(render_index(&page))
}

pub async fn submit_report(
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Result<Response, AppError> {
    let mut store = state.store.lock().await;
    match record_report(&mut *store, &form, &Local::now(), &RuLocale)? {
        ReportOutcome::Saved(_) => {
            persist_data(&state.data_path, &store).await?;
            Ok(redirect_with(Notice::ReportSaved))
        }
        ReportOutcome::Rejected => {
            drop(store);
            let mut page = build_page(&state, false, Some(Notice::FillAllFields)).await;
            page.notes_draft = form.notes;
            if let Ok(difficulty) = form.difficulty.trim().parse() {
                page.slider.input(difficulty);
            }
            Ok(rejected(&page))
        }
    }
}

pub async fn submit_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let mut store = state.store.lock().await;
    match record_settings(&mut *store, &form) {
        SettingsOutcome::Saved => {
            persist_data(&state.data_path, &store).await?;
            Ok(redirect_with(Notice::SettingsSaved))
        }
        SettingsOutcome::Rejected => {
            drop(store);
            let page = build_page(&state, true, Some(Notice::PickRelapseDate)).await;
            Ok(rejected(&page))
        }
    }
}

pub async fn theme_toggle(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    toggle_theme(&mut *store);
    persist_data(&state.data_path, &store).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_status(State(state): State<AppState>) -> Result<Json<StatusDocument>, AppError> {
    let document = state.status_source.fetch().await.inspect_err(|err| {
        error!("there was a problem loading the status document: {err}");
    })?;
    Ok(Json(document))
}

pub async fn get_day(State(state): State<AppState>) -> Json<DayResponse> {
    let store = state.store.lock().await;
    let status = day_status_at(load_reference(&*store).as_deref(), &Local::now());
    Json(to_day_response(status))
}

pub async fn get_reports(State(state): State<AppState>) -> Json<Vec<Report>> {
    let store = state.store.lock().await;
    Json(load_reports(&*store))
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<Report>, AppError> {
    let form = ReportForm::from(payload);
    let mut store = state.store.lock().await;
    match record_report(&mut *store, &form, &Local::now(), &RuLocale)? {
        ReportOutcome::Saved(report) => {
            persist_data(&state.data_path, &store).await?;
            Ok(Json(report))
        }
        ReportOutcome::Rejected => Err(AppError::bad_request(Notice::FillAllFields.message())),
    }
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsForm>,
) -> Result<Json<DayResponse>, AppError> {
    let mut store = state.store.lock().await;
    if record_settings(&mut *store, &payload) == SettingsOutcome::Rejected {
        return Err(AppError::bad_request(Notice::PickRelapseDate.message()));
    }
    persist_data(&state.data_path, &store).await?;

    let status = day_status_at(load_reference(&*store).as_deref(), &Local::now());
    Ok(Json(to_day_response(status)))
}

async fn build_page(state: &AppState, settings_open: bool, notice: Option<Notice>) -> Page {
    let mut page = Page::new(settings_open, DifficultySlider::new(DEFAULT_DIFFICULTY));
    {
        let store = state.store.lock().await;
        page.theme = initialize_theme(&mut page, &*store);
        display_current_day(&mut page, &*store, &Local::now());
        page.relapse_draft = load_reference(&*store).unwrap_or_default();
    }

    let status = state.status_source.fetch().await;
    render_status(&mut page, &status);

    if notice == Some(Notice::ReportSaved) {
        page.slider.reset(DEFAULT_DIFFICULTY);
    }
    page.notice = notice;
    page
}

fn redirect_with(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}

fn rejected(page: &Page) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(render_index(page))).into_response()
}

fn to_day_response(status: DayStatus) -> DayResponse {
    DayResponse {
        state: status.state().to_string(),
        day: match status {
            DayStatus::Day { number, .. } => Some(number),
            _ => None,
        },
        text: status.headline(),
        detail: status.detail(),
    }
}
