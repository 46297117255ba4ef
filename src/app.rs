//! Application state, routing, and feed dispatch.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, error};

use crate::auth::{AuthError, AuthService, SessionContext, SessionGuard};
use crate::data::{project, BinaryStatus, ChartSeries, MetricBuffer, Reading, SnapshotStore};
use crate::feed::{Channel, FeedEvent, FeedSource, SubscriptionSet};
use crate::ui::Theme;

/// The current screen.
///
/// Mirrors the two routes of the app: `/` (login) and `/app` (dashboard,
/// guarded by session presence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Which login field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

/// State of the login form.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Inline warning shown under the form; persists until the next submit.
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            error: None,
        }
    }
}

impl LoginForm {
    /// The field currently being edited.
    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn clear_secrets(&mut self) {
        self.password.clear();
    }
}

/// Dashboard state: the buffers and statuses fed by the live subscriber.
///
/// Created when the dashboard mounts (buffers restored from the snapshot
/// store) and dropped when it unmounts; the persisted snapshots survive.
#[derive(Debug)]
pub struct DashboardState {
    pub humidity: MetricBuffer,
    pub temperature: MetricBuffer,
    pub gas_warning: Option<BinaryStatus>,
    pub light_sensor: Option<BinaryStatus>,
}

impl DashboardState {
    fn restore(store: &dyn SnapshotStore) -> Self {
        Self {
            humidity: MetricBuffer::restore(Channel::Humidity.path(), store),
            temperature: MetricBuffer::restore(Channel::Temperature.path(), store),
            gas_warning: None,
            light_sensor: None,
        }
    }

    /// Chart-ready projection of one series channel.
    pub fn chart(&self, channel: Channel) -> ChartSeries {
        match channel {
            Channel::Humidity => project(self.humidity.series()),
            Channel::Temperature => project(self.temperature.series()),
            Channel::GasWarning | Channel::LightSensor => project(&Default::default()),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub route: Route,
    pub show_help: bool,
    pub show_logout_confirm: bool,

    // Collaborators
    source: Box<dyn FeedSource>,
    store: Box<dyn SnapshotStore>,
    auth: Box<dyn AuthService>,

    // Session
    pub session: SessionContext,
    pub login: LoginForm,

    // Dashboard
    subscriptions: SubscriptionSet,
    pub dashboard: Option<DashboardState>,
    pub feed_error: Option<String>,

    // UI
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given collaborators.
    ///
    /// Restores any persisted session before the first render so the
    /// route guard never evaluates an unresolved auth state, then routes
    /// accordingly.
    pub fn new(
        source: Box<dyn FeedSource>,
        store: Box<dyn SnapshotStore>,
        auth: Box<dyn AuthService>,
    ) -> Self {
        let mut session = SessionContext::new();
        session.restore(store.as_ref());
        session.observe(Box::new(|s| match s {
            Some(s) => debug!("Session active for {}", s.email),
            None => debug!("No active session"),
        }));

        let mut app = Self {
            running: true,
            route: Route::Login,
            show_help: false,
            show_logout_confirm: false,
            source,
            store,
            auth,
            session,
            login: LoginForm::default(),
            subscriptions: SubscriptionSet::new(),
            dashboard: None,
            feed_error: None,
            theme: Theme::auto_detect(),
            status_message: None,
        };

        if SessionGuard::allows(&app.session) {
            app.mount_dashboard();
        }
        app
    }

    /// Returns a description of the current feed source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    // ----- Routing -----

    /// Navigate to the route the guard allows.
    ///
    /// Mounting the dashboard restores both metric buffers and opens one
    /// subscription per channel; leaving it releases every subscription
    /// before the route changes.
    pub fn navigate(&mut self, route: Route) {
        let target = match route {
            Route::Dashboard if !SessionGuard::allows(&self.session) => Route::Login,
            other => other,
        };

        if target == self.route {
            return;
        }

        match target {
            Route::Dashboard => self.mount_dashboard(),
            Route::Login => self.unmount_dashboard(),
        }
        self.route = target;
    }

    fn mount_dashboard(&mut self) {
        self.dashboard = Some(DashboardState::restore(self.store.as_ref()));
        self.subscriptions.subscribe_all();
        self.route = Route::Dashboard;
    }

    fn unmount_dashboard(&mut self) {
        // Unsubscribe before navigating: from here on no delivered event
        // may touch a buffer.
        self.subscriptions.unsubscribe_all();
        self.dashboard = None;
    }

    // ----- Authentication -----

    /// Submit the login form.
    ///
    /// On success the session is persisted and the app navigates to the
    /// dashboard; on failure an inline warning is set and the form stays
    /// retryable.
    pub fn submit_login(&mut self) {
        self.login.error = None;

        match self.auth.sign_in(&self.login.email, &self.login.password) {
            Ok(session) => {
                self.session.set(Some(session));
                self.session.persist(self.store.as_mut());
                self.login.clear_secrets();
                self.navigate(Route::Dashboard);
            }
            Err(e @ AuthError::InvalidCredential) => {
                self.login.error = Some(e.to_string());
            }
            Err(AuthError::Unavailable(msg)) => {
                self.login.error = Some(format!("Cannot reach auth service: {}", msg));
            }
        }
    }

    /// Open the logout confirmation modal.
    pub fn request_logout(&mut self) {
        if self.route == Route::Dashboard {
            self.show_logout_confirm = true;
        }
    }

    /// Dismiss the logout confirmation without signing out.
    pub fn cancel_logout(&mut self) {
        self.show_logout_confirm = false;
    }

    /// Sign out and return to the login screen.
    ///
    /// A failed sign-out is logged and leaves the UI in its pre-logout
    /// state; nothing navigates on failure.
    pub fn confirm_logout(&mut self) {
        self.show_logout_confirm = false;

        let Some(session) = self.session.current().cloned() else {
            self.navigate(Route::Login);
            return;
        };

        match self.auth.sign_out(&session) {
            Ok(()) => {
                self.session.set(None);
                self.session.persist(self.store.as_mut());
                self.navigate(Route::Login);
            }
            Err(e) => {
                error!("Logout error: {}", e);
                self.set_status_message("Logout failed".to_string());
            }
        }
    }

    // ----- Feed dispatch -----

    /// Drain the feed source and dispatch delivered events.
    ///
    /// Returns Ok(true) if any buffer or status changed. Events for
    /// channels without an active subscription are dropped.
    pub fn poll_feed(&mut self) -> Result<bool> {
        if let Some(err) = self.source.error() {
            self.feed_error = Some(err.to_string());
        } else {
            self.feed_error = None;
        }

        let mut updated = false;
        while let Some(event) = self.source.poll() {
            updated |= self.dispatch(event);
        }
        Ok(updated)
    }

    /// Apply one delivered event to the data model.
    ///
    /// Series channels require a numeric payload; anything else is
    /// skipped so a malformed push cannot corrupt the buffer. Binary
    /// channels keep only the latest status.
    fn dispatch(&mut self, event: FeedEvent) -> bool {
        if !self.subscriptions.is_active(event.channel) {
            debug!("Dropping event for inactive channel '{}'", event.channel.path());
            return false;
        }
        let Some(dashboard) = self.dashboard.as_mut() else {
            return false;
        };

        match event.channel {
            Channel::Humidity | Channel::Temperature => {
                let Some(value) = event.payload.as_f64() else {
                    debug!(
                        "Skipping non-numeric payload on '{}': {}",
                        event.channel.path(),
                        event.payload
                    );
                    return false;
                };
                let reading = Reading::now(value);
                match event.channel {
                    Channel::Humidity => dashboard.humidity.append(reading, self.store.as_mut()),
                    Channel::Temperature => {
                        dashboard.temperature.append(reading, self.store.as_mut())
                    }
                    _ => unreachable!(),
                }
                true
            }
            Channel::GasWarning => {
                dashboard.gas_warning = Some(BinaryStatus::from_payload(&event.payload));
                true
            }
            Channel::LightSensor => {
                dashboard.light_sensor = Some(BinaryStatus::from_payload(&event.payload));
                true
            }
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }
}
