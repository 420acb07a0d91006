use crate::settings::SettingsPanel;
use crate::slider::{DifficultySlider, MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::status::{ParameterItem, StatusView};
use crate::theme::{ClassList, ThemeTarget};
use crate::tracker::DayView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ReportSaved,
    SettingsSaved,
    FillAllFields,
    PickRelapseDate,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::ReportSaved => "report_saved",
            Notice::SettingsSaved => "settings_saved",
            Notice::FillAllFields => "fill_all_fields",
            Notice::PickRelapseDate => "pick_relapse_date",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            Notice::ReportSaved,
            Notice::SettingsSaved,
            Notice::FillAllFields,
            Notice::PickRelapseDate,
        ]
        .into_iter()
        .find(|notice| notice.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::ReportSaved => "Отчет успешно отправлен!",
            Notice::SettingsSaved => "Настройки успешно сохранены!",
            Notice::FillAllFields => "Пожалуйста, заполните все поля.",
            Notice::PickRelapseDate => "Пожалуйста, выберите дату и время срыва.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Notice::FillAllFields | Notice::PickRelapseDate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPanel {
    pub general_text: String,
    pub progress_width: String,
    pub percentage_label: String,
    pub parameters: Vec<ParameterItem>,
    pub questions: Vec<String>,
    pub error: Option<String>,
}

/// Everything one render of the page shows.
#[derive(Debug, Clone)]
pub struct Page {
    pub theme: String,
    pub body: ClassList,
    pub container: ClassList,
    pub cards: Vec<ClassList>,
    pub buttons: Vec<ClassList>,
    pub settings: SettingsPanel,
    pub status: StatusPanel,
    pub day_headline: String,
    pub day_detail: Option<String>,
    pub slider: DifficultySlider,
    pub notice: Option<Notice>,
    pub notes_draft: String,
    pub relapse_draft: String,
}

const STATUS_CARD: usize = 0;
const DAY_CARD: usize = 1;
const REPORT_CARD: usize = 2;

const REPORT_BUTTON: usize = 0;
const SETTINGS_BUTTON: usize = 1;
const THEME_BUTTON: usize = 2;
const TOGGLE_BUTTON: usize = 3;

impl Page {
    pub fn new(settings_open: bool, slider: DifficultySlider) -> Self {
        Self {
            theme: String::new(),
            body: ClassList::default(),
            container: ClassList::new(["container"]),
            cards: vec![
                ClassList::new(["card", "status-card"]),
                ClassList::new(["card", "day-card"]),
                ClassList::new(["card", "report-card"]),
            ],
            buttons: vec![
                ClassList::new(["submit-button"]),
                ClassList::new(["submit-button"]),
                ClassList::new(["submit-button", "ghost"]),
                ClassList::new(["submit-button", "ghost"]),
            ],
            settings: SettingsPanel::new(settings_open),
            status: StatusPanel::default(),
            day_headline: String::new(),
            day_detail: None,
            slider,
            notice: None,
            notes_draft: String::new(),
            relapse_draft: String::new(),
        }
    }
}

impl ThemeTarget for Page {
    fn themeable(&mut self) -> Vec<&mut ClassList> {
        let mut lists = vec![&mut self.body, &mut self.container, &mut self.settings.classes];
        lists.extend(self.cards.iter_mut());
        lists.extend(self.buttons.iter_mut());
        lists
    }
}

impl StatusView for Page {
    fn set_general_text(&mut self, text: &str) {
        self.status.general_text = text.to_string();
    }

    fn set_percentage(&mut self, width: &str, label: &str) {
        self.status.progress_width = width.to_string();
        self.status.percentage_label = label.to_string();
    }

    fn set_parameters(&mut self, items: Vec<ParameterItem>) {
        self.status.parameters = items;
    }

    fn set_questions(&mut self, questions: Vec<String>) {
        self.status.questions = questions;
    }

    fn show_error(&mut self, message: &str) {
        self.status = StatusPanel {
            error: Some(message.to_string()),
            ..StatusPanel::default()
        };
    }
}

impl DayView for Page {
    fn set_day_text(&mut self, headline: String, detail: Option<String>) {
        self.day_headline = headline;
        self.day_detail = detail;
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_status(status: &StatusPanel) -> String {
    let parameters: String = status
        .parameters
        .iter()
        .map(|item| {
            format!(
                r#"<li class="{}">{}</li>"#,
                escape_html(&item.class),
                escape_html(&item.text)
            )
        })
        .collect();
    let questions: String = status
        .questions
        .iter()
        .map(|question| format!("<li>{}</li>", escape_html(question)))
        .collect();

    STATUS_HTML
        .replace("{{GENERAL_TEXT}}", &escape_html(&status.general_text))
        .replace("{{PROGRESS_WIDTH}}", &escape_html(&status.progress_width))
        .replace("{{PERCENTAGE}}", &escape_html(&status.percentage_label))
        .replace("{{PARAMETERS}}", &parameters)
        .replace("{{QUESTIONS}}", &questions)
}

fn render_notice(notice: Option<Notice>) -> String {
    let Some(notice) = notice else {
        return String::new();
    };
    let kind = if notice.is_error() { "error" } else { "ok" };
    let literal = serde_json::to_string(notice.message()).unwrap_or_default();
    format!(
        r#"<div class="notice" data-type="{kind}" role="alert">{}</div>
    <script>window.addEventListener('load', () => alert({literal}));</script>"#,
        escape_html(notice.message())
    )
}

pub fn render_index(page: &Page) -> String {
    let content = match &page.status.error {
        Some(message) => format!(r#"<p class="load-error">{}</p>"#, escape_html(message)),
        None => render_content(page),
    };

    INDEX_HTML
        .replace("{{THEME}}", &escape_html(&page.theme))
        .replace("{{BODY_CLASS}}", &escape_html(&page.body.as_attr()))
        .replace("{{CONTAINER_CLASS}}", &escape_html(&page.container.as_attr()))
        .replace("{{NOTICE}}", &render_notice(page.notice))
        .replace("{{CONTENT}}", &content)
}

fn render_content(page: &Page) -> String {
    let detail = page
        .day_detail
        .as_deref()
        .map(|detail| format!(r#"<p class="current-day-detail">{}</p>"#, escape_html(detail)))
        .unwrap_or_default();

    CONTENT_HTML
        .replace("{{STATUS_CARD_CLASS}}", &escape_html(&page.cards[STATUS_CARD].as_attr()))
        .replace("{{DAY_CARD_CLASS}}", &escape_html(&page.cards[DAY_CARD].as_attr()))
        .replace("{{REPORT_CARD_CLASS}}", &escape_html(&page.cards[REPORT_CARD].as_attr()))
        .replace("{{SETTINGS_CARD_CLASS}}", &escape_html(&page.settings.classes.as_attr()))
        .replace("{{REPORT_BUTTON_CLASS}}", &escape_html(&page.buttons[REPORT_BUTTON].as_attr()))
        .replace("{{SETTINGS_BUTTON_CLASS}}", &escape_html(&page.buttons[SETTINGS_BUTTON].as_attr()))
        .replace("{{THEME_BUTTON_CLASS}}", &escape_html(&page.buttons[THEME_BUTTON].as_attr()))
        .replace("{{TOGGLE_BUTTON_CLASS}}", &escape_html(&page.buttons[TOGGLE_BUTTON].as_attr()))
        .replace("{{SETTINGS_HREF}}", page.settings.toggle_href())
        .replace("{{DAY_TEXT}}", &escape_html(&page.day_headline))
        .replace("{{DAY_DETAIL}}", &detail)
        .replace("{{MIN_DIFFICULTY}}", &MIN_DIFFICULTY.to_string())
        .replace("{{MAX_DIFFICULTY}}", &MAX_DIFFICULTY.to_string())
        .replace("{{DIFFICULTY}}", &page.slider.value().to_string())
        .replace("{{DIFFICULTY_LABEL}}", &escape_html(page.slider.label()))
        .replace("{{NOTES}}", &escape_html(&page.notes_draft))
        .replace("{{LAST_RELAPSE}}", &escape_html(&page.relapse_draft))
        .replace("{{STATUS}}", &render_status(&page.status))
}

const CONTENT_HTML: &str = r#"<header>
      <h1>Восстановление</h1>
      <div class="toolbar">
        <form method="post" action="/theme/toggle">
          <button class="{{THEME_BUTTON_CLASS}}" type="submit">Тема</button>
        </form>
        <a id="toggle-settings" class="{{TOGGLE_BUTTON_CLASS}}" href="{{SETTINGS_HREF}}">Настройки</a>
      </div>
    </header>

    <section class="{{STATUS_CARD_CLASS}}">
      {{STATUS}}
    </section>

    <section class="{{DAY_CARD_CLASS}}">
      <div class="current-day-text">{{DAY_TEXT}}</div>
      {{DAY_DETAIL}}
    </section>

    <section class="{{REPORT_CARD_CLASS}}">
      <h2>Отчет за день</h2>
      <form id="submit-form" method="post" action="/report">
        <label for="notes">Заметки</label>
        <textarea id="notes" name="notes" rows="4">{{NOTES}}</textarea>
        <label for="difficulty">Сложность: <span id="difficulty-value">{{DIFFICULTY_LABEL}}</span></label>
        <input id="difficulty" name="difficulty" type="range" min="{{MIN_DIFFICULTY}}" max="{{MAX_DIFFICULTY}}" value="{{DIFFICULTY}}" />
        <button class="{{REPORT_BUTTON_CLASS}}" type="submit">Отправить</button>
      </form>
    </section>

    <section class="{{SETTINGS_CARD_CLASS}}">
      <h2>Настройки</h2>
      <form id="settings-form" method="post" action="/settings">
        <label for="last-relapse">Дата и время последнего срыва</label>
        <input id="last-relapse" name="last_relapse" type="datetime-local" value="{{LAST_RELAPSE}}" />
        <button class="{{SETTINGS_BUTTON_CLASS}}" type="submit">Сохранить</button>
      </form>
    </section>"#;

const STATUS_HTML: &str = r#"<h2>Общая информация</h2>
      <div class="general-text-content">{{GENERAL_TEXT}}</div>
      <h3>Процент восстановления</h3>
      <div class="progress">
        <div id="recovery-progress" class="progress-bar" style="width: {{PROGRESS_WIDTH}};"></div>
      </div>
      <span id="recovery-percentage-text">{{PERCENTAGE}}</span>
      <h3>Параметры</h3>
      <ul class="parameters-list">{{PARAMETERS}}</ul>
      <h3>Вопросы на сегодня</h3>
      <ol class="questions-list">{{QUESTIONS}}</ol>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Восстановление</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --ink: #2b2a28;
      --card: #ffffff;
      --accent: #3d7a5a;
      --muted: #7a746d;
      --error: #c63b2b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      font-family: "Trebuchet MS", sans-serif;
      background: var(--bg);
      color: var(--ink);
      padding: 32px 18px 48px;
    }

    body.dark {
      --bg: #1d1f22;
      --ink: #e8e6e1;
      --card: #2a2d31;
      --accent: #7cc49b;
      --muted: #a39e96;
    }

    .container {
      width: min(760px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    .toolbar {
      display: flex;
      gap: 8px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 22px;
      box-shadow: 0 12px 32px rgba(0, 0, 0, 0.08);
    }

    .hidden {
      display: none;
    }

    .progress {
      height: 14px;
      border-radius: 999px;
      background: rgba(0, 0, 0, 0.08);
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      background: var(--accent);
    }

    .parameters-list li.up {
      color: #2d7a4b;
    }

    .parameters-list li.down {
      color: var(--error);
    }

    .parameters-list li.stable {
      color: var(--muted);
    }

    .current-day-text {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .current-day-detail {
      margin: 6px 0 0;
      color: var(--muted);
    }

    form {
      display: grid;
      gap: 12px;
    }

    textarea,
    input[type="datetime-local"] {
      width: 100%;
      font: inherit;
      padding: 10px;
      border-radius: 10px;
      border: 1px solid rgba(0, 0, 0, 0.15);
    }

    .submit-button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
    }

    .submit-button.ghost {
      background: transparent;
      color: var(--ink);
      border: 1px solid rgba(0, 0, 0, 0.2);
    }

    .notice {
      padding: 12px 16px;
      border-radius: 12px;
    }

    .notice[data-type="error"],
    .load-error {
      color: var(--error);
      text-align: center;
    }

    .notice[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body class="{{BODY_CLASS}}">
  {{NOTICE}}
  <main class="{{CONTAINER_CLASS}}">
    {{CONTENT}}
  </main>

  <script>
    const difficultySlider = document.getElementById('difficulty');
    const difficultyValue = document.getElementById('difficulty-value');
    if (difficultySlider && difficultyValue) {
      difficultySlider.addEventListener('input', () => {
        difficultyValue.textContent = difficultySlider.value;
      });
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::LOAD_ERROR_MESSAGE;
    use crate::theme::apply_theme;

    fn page() -> Page {
        Page::new(false, DifficultySlider::new(3))
    }

    #[test]
    fn themes_every_themeable_element() {
        let mut page = page();
        apply_theme(&mut page, "dark");
        assert!(page.body.contains("dark"));
        assert!(page.container.contains("dark"));
        assert!(page.settings.classes.contains("dark"));
        assert!(page.cards.iter().all(|card| card.contains("dark")));
        assert!(page.buttons.iter().all(|button| button.contains("dark")));
    }

    #[test]
    fn status_text_is_escaped() {
        let mut page = page();
        page.set_general_text("<b>bold</b> & more");
        page.set_questions(vec!["1 < 2?".to_string()]);
        let html = render_index(&page);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(html.contains("<li>1 &lt; 2?</li>"));
    }

    #[test]
    fn status_error_replaces_status_content() {
        let mut page = page();
        page.set_general_text("stale");
        page.show_error(LOAD_ERROR_MESSAGE);
        let html = render_index(&page);
        assert!(html.contains(LOAD_ERROR_MESSAGE));
        assert!(!html.contains(r#"<ul class="parameters-list">"#));
        assert!(!html.contains(r#"id="submit-form""#));
        assert!(!html.contains("stale"));
    }

    #[test]
    fn settings_form_is_prefilled_with_stored_reset() {
        let mut page = Page::new(true, DifficultySlider::new(3));
        page.relapse_draft = "2026-10-12T22:15".to_string();
        let html = render_index(&page);
        assert!(html.contains(r#"type="datetime-local" value="2026-10-12T22:15""#));
    }

    #[test]
    fn slider_renders_value_and_label() {
        let mut page = page();
        page.slider.input(5);
        page.slider.reset(3);
        let html = render_index(&page);
        assert!(html.contains(r#"value="3" />"#));
        assert!(html.contains(r#"<span id="difficulty-value">3</span>"#));
    }

    #[test]
    fn hidden_settings_link_opens_panel() {
        let html = render_index(&page());
        assert!(html.contains(r#"href="/?settings=open""#));
        assert!(html.contains("settings-card hidden"));

        let open = render_index(&Page::new(true, DifficultySlider::new(3)));
        assert!(open.contains(r#"id="toggle-settings" class="submit-button ghost" href="/""#));
    }

    #[test]
    fn notice_codes_round_trip() {
        for notice in [
            Notice::ReportSaved,
            Notice::SettingsSaved,
            Notice::FillAllFields,
            Notice::PickRelapseDate,
        ] {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        assert_eq!(Notice::from_code("bogus"), None);
    }
}
