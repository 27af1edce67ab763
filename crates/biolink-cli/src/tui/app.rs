//! Application state and logic

use std::time::{Duration, Instant};

use tracing::{info, warn};

use biolink_core::ordering::{self, Direction};
use biolink_core::{LinkItem, LinkPatch, Settings};

use crate::api::{AdminApi, ClientError};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the link list
    Normal,
    /// Filling in the new-link form
    AddForm,
    /// Editing a local draft of the selected link
    EditDraft,
    /// Editing the page settings draft
    SettingsForm,
}

/// Whether a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// Work that needs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reload,
    SubmitAdd,
    SaveDraft,
    Move(Direction),
    ToggleHidden,
    Delete,
    SaveSettings,
}

/// Single-line text input; the cursor counts characters, not bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// A labelled input in a form
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub input: TextInput,
}

/// A set of fields with one focused
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    fn new(fields: Vec<(&'static str, String)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(label, value)| Field {
                    label,
                    input: TextInput::new(value),
                })
                .collect(),
            focus: 0,
        }
    }

    /// Title and URL fields
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(vec![("Title", title.into()), ("URL", url.into())])
    }

    /// All three settings fields, prefilled
    pub fn settings(settings: &Settings) -> Self {
        Self::new(vec![
            ("Title", settings.title.clone()),
            ("Subtitle", settings.subtitle.clone()),
            ("Profile image URL", settings.profile_image.clone()),
        ])
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.value())
            .unwrap_or("")
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focus).map(|f| &mut f.input)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.input.clear();
        }
        self.focus = 0;
    }

    fn to_settings(&self) -> Settings {
        Settings::new(self.value(0), self.value(1), self.value(2))
    }
}

/// Local edit of one link, saved explicitly
#[derive(Debug, Clone)]
pub struct Draft {
    pub original: LinkItem,
    pub form: Form,
}

impl Draft {
    fn new(original: LinkItem) -> Self {
        let form = Form::link(original.title.clone(), original.url.clone());
        Self { original, form }
    }

    /// The link as it would look with the draft applied
    pub fn edited(&self) -> LinkItem {
        let mut link = self.original.clone();
        link.title = self.form.value(0).to_string();
        link.url = self.form.value(1).to_string();
        link
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Idle or waiting on the server
    pub phase: Phase,
    /// Links as last fetched from the server
    pub links: Vec<LinkItem>,
    /// Currently selected link index
    pub link_index: usize,
    /// Settings as last saved or fetched
    pub settings: Settings,
    /// New-link form; kept across visits until a successful add
    pub add_form: Form,
    /// Edit in progress, if any
    pub draft: Option<Draft>,
    /// Settings draft
    pub settings_form: Form,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Confirmation that must be dismissed with a key press
    pub acknowledgement: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Where the public page is served
    pub public_url: String,
}

impl App {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            phase: Phase::Idle,
            links: Vec::new(),
            link_index: 0,
            settings: Settings::default(),
            add_form: Form::link("", ""),
            draft: None,
            settings_form: Form::settings(&Settings::default()),
            status_message: None,
            status_message_time: None,
            acknowledgement: None,
            show_help: false,
            public_url: public_url.into(),
        }
    }

    /// Set a status message (auto-dismissed after a few seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_acknowledgement(&mut self) {
        self.acknowledgement = None;
    }

    /// Get the currently selected link
    pub fn current_link(&self) -> Option<&LinkItem> {
        self.links.get(self.link_index)
    }

    pub fn hidden_count(&self) -> usize {
        self.links.iter().filter(|l| l.hidden).count()
    }

    pub fn select_up(&mut self) {
        self.link_index = self.link_index.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.link_index < self.links.len().saturating_sub(1) {
            self.link_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.link_index = 0;
    }

    pub fn select_last(&mut self) {
        self.link_index = self.links.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.links.is_empty() {
            self.link_index = 0;
        } else {
            self.link_index = self.link_index.min(self.links.len() - 1);
        }
    }

    pub fn enter_add_form(&mut self) {
        self.input_mode = InputMode::AddForm;
    }

    /// Start editing the selected link in a local draft
    pub fn begin_edit(&mut self) {
        match self.current_link().cloned() {
            Some(link) => {
                self.draft = Some(Draft::new(link));
                self.input_mode = InputMode::EditDraft;
            }
            None => self.set_status("No link selected"),
        }
    }

    pub fn enter_settings_form(&mut self) {
        self.input_mode = InputMode::SettingsForm;
    }

    /// Leave any form; an unsaved edit draft is discarded
    pub fn exit_input_mode(&mut self) {
        if self.input_mode == InputMode::EditDraft {
            self.draft = None;
        }
        self.input_mode = InputMode::Normal;
    }

    /// The form for the current input mode
    pub fn active_form(&self) -> Option<&Form> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::AddForm => Some(&self.add_form),
            InputMode::EditDraft => self.draft.as_ref().map(|d| &d.form),
            InputMode::SettingsForm => Some(&self.settings_form),
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::AddForm => Some(&mut self.add_form),
            InputMode::EditDraft => self.draft.as_mut().map(|d| &mut d.form),
            InputMode::SettingsForm => Some(&mut self.settings_form),
        }
    }

    fn with_focused(&mut self, f: impl FnOnce(&mut TextInput)) {
        if let Some(input) = self.active_form_mut().and_then(Form::focused_mut) {
            f(input);
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.with_focused(|input| input.insert_char(c));
    }

    pub fn delete_char(&mut self) {
        self.with_focused(TextInput::delete_char);
    }

    pub fn cursor_left(&mut self) {
        self.with_focused(TextInput::cursor_left);
    }

    pub fn cursor_right(&mut self) {
        self.with_focused(TextInput::cursor_right);
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.prev_field();
        }
    }

    fn report(&mut self, what: &str, err: &ClientError) {
        warn!("{}: {}", what, err);
        self.set_status(format!("{}: {}", what, err));
    }

    /// Report a failed write; a 404 means the list is stale, so re-fetch it
    async fn report_stale(&mut self, what: &str, err: &ClientError, api: &dyn AdminApi) {
        if err.status() == Some(404) {
            self.refresh(api).await;
        }
        self.report(what, err);
    }

    /// Run an action against the server
    pub async fn perform(&mut self, action: Action, api: &dyn AdminApi) {
        self.phase = Phase::Submitting;
        match action {
            Action::Reload => self.load(api).await,
            Action::SubmitAdd => self.submit_add(api).await,
            Action::SaveDraft => self.save_draft(api).await,
            Action::Move(direction) => self.move_current(api, direction).await,
            Action::ToggleHidden => self.toggle_current(api).await,
            Action::Delete => self.delete_current(api).await,
            Action::SaveSettings => self.save_settings(api).await,
        }
        self.phase = Phase::Idle;
    }

    /// Fetch settings and links; the settings draft is reset to the server copy
    pub async fn load(&mut self, api: &dyn AdminApi) {
        match api.get_settings().await {
            Ok(settings) => {
                self.settings_form = Form::settings(&settings);
                self.settings = settings;
            }
            Err(e) => self.report("Failed to load settings", &e),
        }
        self.refresh(api).await;
    }

    /// Re-fetch the full link list
    pub async fn refresh(&mut self, api: &dyn AdminApi) {
        match api.list_links().await {
            Ok(links) => {
                self.links = links;
                self.clamp_selection();
            }
            Err(e) => self.report("Failed to load links", &e),
        }
    }

    /// Create a link from the add form
    pub async fn submit_add(&mut self, api: &dyn AdminApi) {
        let title = self.add_form.value(0).to_string();
        let url = self.add_form.value(1).to_string();
        if title.trim().is_empty() || url.trim().is_empty() {
            self.set_status("Title and URL are required");
            return;
        }

        let link = LinkItem::new(title, url);
        match api.create_link(&link).await {
            Ok(created) => {
                info!("Added link {} ({})", created.id, created.url);
                self.add_form.clear();
                self.input_mode = InputMode::Normal;
                self.refresh(api).await;
                if let Some(index) = self.links.iter().position(|l| l.id == created.id) {
                    self.link_index = index;
                }
                self.set_status(format!("Added '{}'", created.title));
            }
            Err(e) => self.report("Failed to add link", &e),
        }
    }

    /// Send the changed fields of the edit draft
    pub async fn save_draft(&mut self, api: &dyn AdminApi) {
        let Some(draft) = self.draft.as_ref() else {
            self.input_mode = InputMode::Normal;
            return;
        };

        let id = draft.original.id.clone();
        let patch = LinkPatch::diff(&draft.original, &draft.edited());
        if patch.is_empty() {
            self.exit_input_mode();
            self.set_status("No changes");
            return;
        }

        match api.update_link(&id, &patch).await {
            Ok(updated) => {
                info!("Updated link {}", updated.id);
                self.exit_input_mode();
                self.refresh(api).await;
                self.set_status("Link updated");
            }
            Err(e) => self.report_stale("Failed to update link", &e, api).await,
        }
    }

    /// Move the selected link one step; the selection follows it
    pub async fn move_current(&mut self, api: &dyn AdminApi, direction: Direction) {
        let Some(reordered) = ordering::moved(&self.links, self.link_index, direction) else {
            return;
        };

        match api.replace_links(&reordered).await {
            Ok(_) => {
                self.link_index = match direction {
                    Direction::Up => self.link_index - 1,
                    Direction::Down => self.link_index + 1,
                };
                self.links = reordered;
            }
            Err(e) => self.report("Failed to reorder links", &e),
        }
    }

    /// Flip the selected link's visibility
    pub async fn toggle_current(&mut self, api: &dyn AdminApi) {
        let Some(link) = self.current_link().cloned() else {
            return;
        };

        match api
            .update_link(&link.id, &LinkPatch::hidden(!link.hidden))
            .await
        {
            Ok(updated) => {
                info!("Link {} hidden={}", updated.id, updated.hidden);
                self.refresh(api).await;
                let state = if updated.hidden { "hidden" } else { "visible" };
                self.set_status(format!("'{}' is now {}", updated.title, state));
            }
            Err(e) => self.report_stale("Failed to update link", &e, api).await,
        }
    }

    /// Delete the selected link immediately
    pub async fn delete_current(&mut self, api: &dyn AdminApi) {
        let Some(link) = self.current_link().cloned() else {
            return;
        };

        match api.delete_link(&link.id).await {
            Ok(_) => {
                info!("Deleted link {}", link.id);
                self.refresh(api).await;
                self.set_status(format!("Deleted '{}'", link.title));
            }
            Err(e) => self.report_stale("Failed to delete link", &e, api).await,
        }
    }

    /// Replace the settings with the draft
    ///
    /// On failure the draft is left as typed so it can be retried.
    pub async fn save_settings(&mut self, api: &dyn AdminApi) {
        let settings = self.settings_form.to_settings();
        match api.replace_settings(&settings).await {
            Ok(ack) => {
                info!("Settings updated");
                self.settings = settings;
                self.input_mode = InputMode::Normal;
                self.acknowledgement = Some(ack.message);
            }
            Err(e) => self.report("Failed to update settings", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{sample_links, FakeApi};

    async fn loaded(api: &FakeApi) -> App {
        let mut app = App::new("http://127.0.0.1:3000");
        app.load(api).await;
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    fn ids(links: &[LinkItem]) -> Vec<&str> {
        links.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("héllo");
        assert_eq!(input.cursor(), 5);

        input.cursor_left();
        input.cursor_left();
        input.cursor_left();
        input.delete_char();
        assert_eq!(input.value(), "hllo");
        input.insert_char('e');
        assert_eq!(input.value(), "hello");

        input.cursor_right();
        input.cursor_right();
        input.cursor_right();
        input.cursor_right();
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::settings(&Settings::default());
        form.prev_field();
        assert_eq!(form.focus, 2);
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[tokio::test]
    async fn test_load() {
        let api = FakeApi::new(sample_links(), Settings::new("T", "S", ""));
        let app = loaded(&api).await;

        assert_eq!(app.links, sample_links());
        assert_eq!(app.settings.title, "T");
        assert_eq!(app.settings_form.value(1), "S");
    }

    #[tokio::test]
    async fn test_add_requires_title_and_url() {
        let api = FakeApi::new(vec![], Settings::default());
        let mut app = loaded(&api).await;

        app.enter_add_form();
        type_text(&mut app, "Only a title");
        app.perform(Action::SubmitAdd, &api).await;

        assert!(api.writes().is_empty());
        assert_eq!(app.input_mode, InputMode::AddForm);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Title and URL are required")
        );
    }

    #[tokio::test]
    async fn test_add_appends_and_clears_form() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.enter_add_form();
        type_text(&mut app, "Docs");
        app.next_field();
        type_text(&mut app, "https://docs.example");
        app.perform(Action::SubmitAdd, &api).await;

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.links.len(), 4);
        assert_eq!(app.links[3].title, "Docs");
        assert!(!app.links[3].hidden);
        assert_eq!(app.link_index, 3);
        assert_eq!(app.add_form.value(0), "");
        assert_eq!(app.add_form.value(1), "");
        assert_eq!(api.links(), app.links);
    }

    #[tokio::test]
    async fn test_unchanged_draft_sends_nothing() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.begin_edit();
        assert_eq!(app.input_mode, InputMode::EditDraft);
        app.perform(Action::SaveDraft, &api).await;

        assert!(api.writes().is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.draft.is_none());
    }

    #[tokio::test]
    async fn test_draft_sends_one_update_on_save() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;
        app.select_down();

        app.begin_edit();
        app.next_field();
        for _ in 0.."https://b.example".len() {
            app.delete_char();
        }
        type_text(&mut app, "https://new.example");
        // Typing alone never reaches the server
        assert!(api.writes().is_empty());

        app.perform(Action::SaveDraft, &api).await;
        assert_eq!(api.writes(), vec!["PUT /links/2"]);
        assert_eq!(app.links[1].url, "https://new.example");
        assert_eq!(app.links[1].title, "B");
    }

    #[tokio::test]
    async fn test_cancelled_draft_is_discarded() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.begin_edit();
        type_text(&mut app, "!!!");
        app.exit_input_mode();

        assert!(app.draft.is_none());
        assert_eq!(app.links, sample_links());
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_move_down_and_up() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.perform(Action::Move(Direction::Down), &api).await;
        assert_eq!(ids(&app.links), vec!["2", "1", "3"]);
        assert_eq!(app.link_index, 1);
        assert_eq!(api.links(), app.links);

        app.perform(Action::Move(Direction::Up), &api).await;
        assert_eq!(ids(&app.links), vec!["1", "2", "3"]);
        assert_eq!(app.link_index, 0);
    }

    #[tokio::test]
    async fn test_move_at_boundaries_is_noop() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.perform(Action::Move(Direction::Up), &api).await;
        app.select_last();
        app.perform(Action::Move(Direction::Down), &api).await;

        assert!(api.writes().is_empty());
        assert_eq!(app.links, sample_links());
        assert_eq!(app.link_index, 2);
    }

    #[tokio::test]
    async fn test_failed_move_leaves_list() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;
        api.fail(true);

        app.perform(Action::Move(Direction::Down), &api).await;

        assert_eq!(app.links, sample_links());
        assert_eq!(app.link_index, 0);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Failed to reorder links"));
    }

    #[tokio::test]
    async fn test_toggle_hidden() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        app.perform(Action::ToggleHidden, &api).await;
        assert!(app.links[0].hidden);
        assert_eq!(app.hidden_count(), 1);

        app.perform(Action::ToggleHidden, &api).await;
        assert_eq!(app.links, sample_links());
    }

    #[tokio::test]
    async fn test_delete_last_clamps_selection() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;
        app.select_last();

        app.perform(Action::Delete, &api).await;

        assert_eq!(ids(&app.links), vec!["1", "2"]);
        assert_eq!(app.link_index, 1);
        assert_eq!(app.status_message.as_deref(), Some("Deleted 'C'"));
    }

    #[tokio::test]
    async fn test_stale_link_triggers_resync() {
        let api = FakeApi::new(sample_links(), Settings::default());
        let mut app = loaded(&api).await;

        // Removed behind the panel's back
        api.delete_link("1").await.unwrap();
        app.perform(Action::ToggleHidden, &api).await;

        assert_eq!(ids(&app.links), vec!["2", "3"]);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("Link not found"));
    }

    #[tokio::test]
    async fn test_delete_with_empty_list_does_nothing() {
        let api = FakeApi::new(vec![], Settings::default());
        let mut app = loaded(&api).await;

        app.perform(Action::Delete, &api).await;
        app.perform(Action::ToggleHidden, &api).await;
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_save_settings_shows_acknowledgement() {
        let api = FakeApi::new(vec![], Settings::new("Old", "", ""));
        let mut app = loaded(&api).await;

        app.enter_settings_form();
        for _ in 0..3 {
            app.delete_char();
        }
        type_text(&mut app, "New");
        app.perform(Action::SaveSettings, &api).await;

        assert_eq!(api.settings(), Settings::new("New", "", ""));
        assert_eq!(app.settings.title, "New");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.acknowledgement.as_deref(),
            Some("Settings updated successfully")
        );

        app.dismiss_acknowledgement();
        assert!(app.acknowledgement.is_none());
    }

    #[tokio::test]
    async fn test_failed_settings_save_keeps_draft() {
        let api = FakeApi::new(vec![], Settings::new("Old", "", ""));
        let mut app = loaded(&api).await;

        app.enter_settings_form();
        type_text(&mut app, "er");
        api.fail(true);
        app.perform(Action::SaveSettings, &api).await;

        assert_eq!(app.input_mode, InputMode::SettingsForm);
        assert_eq!(app.settings_form.value(0), "Older");
        assert_eq!(app.settings.title, "Old");
        assert!(app.acknowledgement.is_none());
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_failed_load_reports_status() {
        let api = FakeApi::new(sample_links(), Settings::default());
        api.fail(true);
        let app = loaded(&api).await;

        assert!(app.links.is_empty());
        assert!(app.status_message.is_some());
    }
}
