use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, Task};
use crate::session::{AuthMode, SessionManager};
use crate::tasklist::TaskList;
use crate::tui::widgets::input::Input;
use crate::{Config, utils};
use ratatui::widgets::TableState;
use std::time::Instant;

/// What the main pane is showing while authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Create,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub username: Input,
    pub password: Input,
    pub current_field: AuthField,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            username: Input::new(),
            password: Input::new(),
            current_field: AuthField::Username,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    pub fn active_input(&mut self) -> &mut Input {
        match self.current_field {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.current_field = AuthField::Username;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Description,
    StartDate,
    Deadline,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub description: Input,
    pub start_date: Input,
    pub deadline: Input,
    pub current_field: TaskField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            description: Input::new(),
            start_date: Input::from(utils::today_string()),
            deadline: Input::new(),
            current_field: TaskField::Description,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Description => TaskField::StartDate,
            TaskField::StartDate => TaskField::Deadline,
            TaskField::Deadline => TaskField::Description,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Description => TaskField::Deadline,
            TaskField::StartDate => TaskField::Description,
            TaskField::Deadline => TaskField::StartDate,
        };
    }

    pub fn active_input(&mut self) -> &mut Input {
        match self.current_field {
            TaskField::Description => &mut self.description,
            TaskField::StartDate => &mut self.start_date,
            TaskField::Deadline => &mut self.deadline,
        }
    }

    /// The submit action requires all three fields to be present. This is a
    /// presence check only; the server owns any further validation.
    pub fn is_complete(&self) -> bool {
        !self.description.trimmed().is_empty()
            && !self.start_date.trimmed().is_empty()
            && !self.deadline.trimmed().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub client: ApiClient,

    // Domain state
    pub session: SessionManager,
    pub tasks: TaskList,

    // UI state
    pub mode: Mode,
    pub auth_form: AuthForm,
    pub task_form: Option<TaskForm>,
    pub table_state: TableState,
    pub status: StatusState,
}

impl App {
    pub fn new(config: Config, client: ApiClient) -> Self {
        Self {
            config,
            client,
            session: SessionManager::new(),
            tasks: TaskList::new(),
            mode: Mode::List,
            auth_form: AuthForm::new(),
            task_form: None,
            table_state: TableState::default(),
            status: StatusState::default(),
        }
    }

    // --- Status line -------------------------------------------------------

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    // --- Authentication ----------------------------------------------------

    pub fn toggle_auth_mode(&mut self) {
        self.session.toggle_mode();
        self.auth_form.clear();
    }

    /// Submit the credential form. Every failure collapses to the generic
    /// "login failed" / "registration failed" notice on the form.
    pub fn submit_auth(&mut self) {
        let credentials = Credentials::new(
            self.auth_form.username.trimmed().to_string(),
            self.auth_form.password.value().to_string(),
        );
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return;
        }

        match self.session.auth_mode() {
            Some(AuthMode::Login) => match self.client.login(&credentials) {
                Ok(token) => {
                    self.session.login_succeeded(token);
                    self.auth_form.clear();
                    self.load_tasks();
                }
                Err(_) => self.session.login_failed(),
            },
            Some(AuthMode::Register) => match self.client.register(&credentials) {
                Ok(()) => {
                    self.session.register_succeeded();
                    self.auth_form.clear();
                }
                Err(_) => self.session.register_failed(),
            },
            None => {}
        }
    }

    // --- Task list ---------------------------------------------------------

    /// Fetch all tasks for the session and replace the visible list. Runs
    /// once on login and on explicit refresh.
    pub fn load_tasks(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };
        match self.client.list_tasks(&token) {
            Ok(tasks) => {
                self.tasks.replace_all(tasks);
                self.sync_selection();
            }
            Err(_) => self.set_status_message("Failed to load tasks".to_string()),
        }
    }

    pub fn open_task_form(&mut self) {
        self.task_form = Some(TaskForm::new());
        self.mode = Mode::Create;
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.mode = Mode::List;
    }

    /// Submit the add-task form. Ignored while any field is empty; on
    /// success the server's copy of the task is appended to the list and the
    /// form closes. On failure the list is left untouched.
    pub fn submit_task_form(&mut self) {
        let Some(form) = &self.task_form else {
            return;
        };
        if !form.is_complete() {
            self.set_status_message("All fields are required".to_string());
            return;
        }
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };

        let task = Task::new(
            form.description.trimmed().to_string(),
            form.start_date.trimmed().to_string(),
            form.deadline.trimmed().to_string(),
        );
        match self.client.create_task(&token, &task) {
            Ok(created) => {
                self.tasks.appended(created);
                self.task_form = None;
                self.mode = Mode::List;
                self.sync_selection();
                self.set_status_message("Task added".to_string());
            }
            Err(_) => self.set_status_message("Failed to add task".to_string()),
        }
    }

    /// Mark the selected task done. The removal request is keyed by the
    /// task's server id; positions only matter for the undo snapshot.
    pub fn complete_selected(&mut self) {
        let Some(index) = self.table_state.selected() else {
            return;
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };
        let Some(task) = self.tasks.get(index) else {
            return;
        };
        let result = match task.id {
            Some(id) => self.client.delete_task(&token, id),
            None => Err(ApiError::MissingId),
        };
        match result {
            Ok(()) => {
                if let Some(task) = self.tasks.completed(index) {
                    self.set_status_message(format!(
                        "Done: {} ({}: undo)",
                        task.description,
                        utils::format_key_binding_for_display(&self.config.key_bindings.undo)
                    ));
                }
                self.sync_selection();
            }
            Err(_) => self.set_status_message("Failed to complete task".to_string()),
        }
    }

    /// Restore the most recently completed task. No-op when the undo slot is
    /// empty. The task is re-created on the server, so it comes back with a
    /// new identity at its old position. A failed request keeps the slot
    /// populated so the user can try again.
    pub fn undo(&mut self) {
        let Some(pending) = self.tasks.pending_undo() else {
            self.set_status_message("Nothing to undo".to_string());
            return;
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };

        let body = Task {
            id: None,
            ..pending.task.clone()
        };
        match self.client.create_task(&token, &body) {
            Ok(created) => {
                let description = created.description.clone();
                self.tasks.undone(created);
                self.sync_selection();
                self.set_status_message(format!("Restored: {}", description));
            }
            Err(_) => self.set_status_message("Failed to undo".to_string()),
        }
    }

    // --- Selection ---------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let previous = self.table_state.selected().unwrap_or(0).saturating_sub(1);
        self.table_state.select(Some(previous));
    }

    /// Keep the table selection within bounds after the list changed.
    pub fn sync_selection(&mut self) {
        if self.tasks.is_empty() {
            self.table_state.select(None);
            return;
        }
        let index = self
            .table_state
            .selected()
            .unwrap_or(0)
            .min(self.tasks.len() - 1);
        self.table_state.select(Some(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        // Client construction performs no I/O; requests are never issued in
        // these tests.
        let config = Config::default();
        let client = ApiClient::new("http://localhost:9", 1).unwrap();
        App::new(config, client)
    }

    fn server_task(id: i64, description: &str) -> Task {
        Task {
            id: Some(id),
            ..Task::new(
                description.to_string(),
                "2024-01-01".to_string(),
                "2024-01-10".to_string(),
            )
        }
    }

    #[test]
    fn task_form_requires_all_three_fields() {
        let mut form = TaskForm::new();
        form.start_date = Input::from("2024-01-01".to_string());
        assert!(!form.is_complete());

        form.description = Input::from("buy milk".to_string());
        assert!(!form.is_complete());

        form.deadline = Input::from("   ".to_string());
        assert!(!form.is_complete());

        form.deadline = Input::from("2024-01-10".to_string());
        assert!(form.is_complete());
    }

    #[test]
    fn task_form_cycles_through_fields() {
        let mut form = TaskForm::new();
        assert_eq!(form.current_field, TaskField::Description);
        form.next_field();
        assert_eq!(form.current_field, TaskField::StartDate);
        form.next_field();
        assert_eq!(form.current_field, TaskField::Deadline);
        form.next_field();
        assert_eq!(form.current_field, TaskField::Description);
        form.previous_field();
        assert_eq!(form.current_field, TaskField::Deadline);
    }

    #[test]
    fn selection_follows_the_list_and_stays_in_bounds() {
        let mut app = app();
        app.tasks.appended(server_task(1, "a"));
        app.tasks.appended(server_task(2, "b"));
        app.sync_selection();
        assert_eq!(app.table_state.selected(), Some(0));

        app.select_next();
        assert_eq!(app.table_state.selected(), Some(1));
        app.select_next();
        assert_eq!(app.table_state.selected(), Some(1));

        app.tasks.completed(1);
        app.sync_selection();
        assert_eq!(app.table_state.selected(), Some(0));

        app.tasks.completed(0);
        app.sync_selection();
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn toggle_auth_mode_clears_the_form() {
        let mut app = app();
        app.auth_form.username = Input::from("alice".to_string());
        app.auth_form.next_field();
        app.toggle_auth_mode();
        assert!(app.auth_form.username.value().is_empty());
        assert_eq!(app.auth_form.current_field, AuthField::Username);
    }
}
