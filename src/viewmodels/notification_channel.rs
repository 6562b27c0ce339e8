// ============================================================================
// NOTIFICATION CHANNEL - Socket por sesión + dispatcher único
// ============================================================================
// El socket entrega todos los eventos a una cola; el dispatcher los aplica en
// orden de llegada. Las preferencias por categoría solo filtran lo que se
// muestra (escritorio, sonido, panel), nunca lo que se recibe.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;

use crate::models::{ChannelPreference, Notification, NotificationEvent, NotificationPreferences};
use crate::services::socket::socket_url;
use crate::services::{notification_service, ApiClient, NotificationPresenter, SocketConnection, SocketConnector, SocketMessage};
use crate::state::{AppState, ConnectionStatus, DesktopPermission};

/// Canales por los que se presenta una notificación nueva
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub desktop: bool,
    pub sound: bool,
}

pub fn delivery_for(preference: ChannelPreference, permission: DesktopPermission) -> Delivery {
    Delivery {
        desktop: preference.desktop && permission == DesktopPermission::Granted,
        sound: preference.sound,
    }
}

pub struct NotificationDispatcher {
    state: AppState,
    presenter: Rc<dyn NotificationPresenter>,
}

impl NotificationDispatcher {
    pub fn dispatch(&self, message: SocketMessage) {
        let notifications = &self.state.notifications;
        match message {
            SocketMessage::Opened => {
                log::info!("🔔 [NOTIFY] Socket conectado");
                notifications.set_connection(ConnectionStatus::Connected);
            }
            SocketMessage::Closed => {
                notifications.set_connection(ConnectionStatus::Disconnected);
            }
            SocketMessage::Event(event) => {
                if let Some(created) = notifications.apply(event) {
                    self.surface(&created);
                }
            }
        }
        self.state.notify_changes();
    }

    fn surface(&self, notification: &Notification) {
        let preference = self.state.notifications.get_preferences().for_category(notification.category);
        let delivery = delivery_for(preference, self.state.notifications.get_permission());
        if delivery.desktop {
            self.presenter.show_desktop(notification);
        }
        if delivery.sound {
            self.presenter.play_sound();
        }
    }

    /// Consume la cola hasta que el socket suelta su extremo
    pub async fn run(self, mut inbox: UnboundedReceiver<SocketMessage>) {
        while let Some(message) = inbox.next().await {
            self.dispatch(message);
        }
        log::info!("🔕 [NOTIFY] Cola de notificaciones cerrada");
    }
}

pub struct NotificationChannel {
    api: ApiClient,
    state: AppState,
    socket_base: String,
    connector: Rc<dyn SocketConnector>,
    presenter: Rc<dyn NotificationPresenter>,
    connection: RefCell<Option<Box<dyn SocketConnection>>>,
}

impl NotificationChannel {
    pub fn new(
        api: ApiClient,
        state: AppState,
        socket_base: String,
        connector: Rc<dyn SocketConnector>,
        presenter: Rc<dyn NotificationPresenter>,
    ) -> Self {
        Self {
            api,
            state,
            socket_base,
            connector,
            presenter,
            connection: RefCell::new(None),
        }
    }

    /// Abre el socket si hay sesión autenticada. Devuelve la cola que debe
    /// consumir un dispatcher, o None si ya estaba abierto o no hay sesión.
    pub fn open(&self) -> Option<UnboundedReceiver<SocketMessage>> {
        let notifications = &self.state.notifications;
        if self.connection.borrow().is_some() && notifications.get_connection() != ConnectionStatus::Disconnected {
            return None;
        }
        if !self.state.session.is_authenticated() {
            return None;
        }
        let token = self.state.session.get_token()?;

        // Conexión muerta del lado servidor: se reemplaza
        self.close();

        let (tx, rx) = mpsc::unbounded();
        match self.connector.connect(&socket_url(&self.socket_base, &token), tx) {
            Ok(connection) => {
                *self.connection.borrow_mut() = Some(connection);
                notifications.set_connection(ConnectionStatus::Connecting);
                notifications.set_permission(self.presenter.permission());
                Some(rx)
            }
            Err(e) => {
                log::error!("❌ [NOTIFY] No se pudo abrir el socket: {}", e);
                notifications.set_connection(ConnectionStatus::Disconnected);
                None
            }
        }
    }

    pub fn close(&self) {
        let connection = self.connection.borrow_mut().take();
        if let Some(connection) = connection {
            log::info!("🔌 [NOTIFY] Cerrando socket");
            connection.close();
            self.state.notifications.set_connection(ConnectionStatus::Disconnected);
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.borrow().is_some()
    }

    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher {
            state: self.state.clone(),
            presenter: self.presenter.clone(),
        }
    }

    /// Lista inicial + preferencias
    pub async fn load(&self) {
        let notifications = &self.state.notifications;
        notifications.set_loading(true);
        notifications.set_error(None);
        self.state.notify_changes();

        match notification_service::list_notifications(&self.api).await {
            Ok(items) => notifications.set_items(items),
            Err(e) if e.is_abort() => {}
            Err(e) => notifications.set_error(Some(e.user_message("Failed to load notifications"))),
        }
        match notification_service::fetch_preferences(&self.api).await {
            Ok(preferences) => notifications.set_preferences(preferences),
            // Sin preferencias se usan los defaults
            Err(e) => log::warn!("⚠️ [NOTIFY] Preferencias no disponibles: {}", e),
        }

        notifications.set_loading(false);
        self.state.notify_changes();
    }

    pub async fn mark_read(&self, id: &str) -> Result<(), String> {
        self.apply_local(NotificationEvent::Read { id: id.to_string() });
        let result = notification_service::mark_read(&self.api, id).await;
        self.rollback_on_error(result, NotificationEvent::Unread { id: id.to_string() }, "Failed to update notification")
    }

    pub async fn mark_unread(&self, id: &str) -> Result<(), String> {
        self.apply_local(NotificationEvent::Unread { id: id.to_string() });
        let result = notification_service::mark_unread(&self.api, id).await;
        self.rollback_on_error(result, NotificationEvent::Read { id: id.to_string() }, "Failed to update notification")
    }

    pub async fn mark_all_read(&self) -> Result<(), String> {
        // Solo se revierten las marcas; los eventos del socket recibidos entretanto se conservan
        let unread: Vec<String> = self
            .state
            .notifications
            .get_items()
            .into_iter()
            .filter(|n| !n.read)
            .map(|n| n.id)
            .collect();
        self.apply_local(NotificationEvent::AllRead);
        match notification_service::mark_all_read(&self.api).await {
            Ok(()) => Ok(()),
            Err(e) => {
                for id in unread {
                    self.state.notifications.apply(NotificationEvent::Unread { id });
                }
                Err(self.report(e.user_message("Failed to mark notifications as read")))
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), String> {
        let notifications = &self.state.notifications;
        let removed = notifications.find(id).zip(notifications.position(id));
        self.apply_local(NotificationEvent::Deleted { id: id.to_string() });
        match notification_service::delete_notification(&self.api, id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // El socket pudo haberla devuelto mientras tanto
                if let Some((notification, index)) = removed {
                    if notifications.position(id).is_none() {
                        notifications.restore(notification, index);
                    }
                }
                Err(self.report(e.user_message("Failed to delete notification")))
            }
        }
    }

    pub async fn save_preferences(&self, preferences: NotificationPreferences) -> Result<(), String> {
        let previous = self.state.notifications.get_preferences();
        self.state.notifications.set_preferences(preferences.clone());
        self.state.notify_changes();
        match notification_service::update_preferences(&self.api, &preferences).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state.notifications.set_preferences(previous);
                Err(self.report(e.user_message("Failed to save preferences")))
            }
        }
    }

    /// Solo desde un click del usuario
    pub async fn request_desktop_permission(&self) -> DesktopPermission {
        let permission = self.presenter.request_permission().await;
        log::info!("🔔 [NOTIFY] Permiso de escritorio: {:?}", permission);
        self.state.notifications.set_permission(permission);
        self.state.notify_changes();
        permission
    }

    fn apply_local(&self, event: NotificationEvent) {
        self.state.notifications.apply(event);
        self.state.notify_changes();
    }

    fn rollback_on_error(
        &self,
        result: Result<(), crate::services::ApiError>,
        undo: NotificationEvent,
        fallback: &str,
    ) -> Result<(), String> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                self.apply_local(undo);
                Err(self.report(e.user_message(fallback)))
            }
        }
    }

    fn report(&self, message: String) -> String {
        log::error!("❌ [NOTIFY] {}", message);
        self.state.notifications.set_error(Some(message.clone()));
        self.state.notify_changes();
        message
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;
    use futures::channel::mpsc::UnboundedSender;

    use crate::models::Notification;
    use crate::services::{NotificationPresenter, SocketConnection, SocketConnector, SocketMessage};
    use crate::state::DesktopPermission;

    #[derive(Default)]
    pub struct FakePresenter {
        pub permission: Cell<Option<DesktopPermission>>,
        pub requested: Cell<usize>,
        pub desktop: RefCell<Vec<String>>,
        pub sounds: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl NotificationPresenter for FakePresenter {
        fn permission(&self) -> DesktopPermission {
            self.permission.get().unwrap_or(DesktopPermission::Default)
        }

        async fn request_permission(&self) -> DesktopPermission {
            self.requested.set(self.requested.get() + 1);
            self.permission.set(Some(DesktopPermission::Granted));
            DesktopPermission::Granted
        }

        fn show_desktop(&self, notification: &Notification) {
            self.desktop.borrow_mut().push(notification.id.clone());
        }

        fn play_sound(&self) {
            self.sounds.set(self.sounds.get() + 1);
        }
    }

    pub struct FakeConnection {
        pub closed: Rc<Cell<bool>>,
    }

    impl SocketConnection for FakeConnection {
        fn close(&self) {
            self.closed.set(true);
        }
    }

    #[derive(Default)]
    pub struct FakeConnector {
        pub urls: RefCell<Vec<String>>,
        pub sinks: RefCell<Vec<UnboundedSender<SocketMessage>>>,
        pub closed: Rc<Cell<bool>>,
    }

    impl SocketConnector for FakeConnector {
        fn connect(&self, url: &str, sink: UnboundedSender<SocketMessage>) -> Result<Box<dyn SocketConnection>, String> {
            self.urls.borrow_mut().push(url.to_string());
            self.sinks.borrow_mut().push(sink);
            Ok(Box::new(FakeConnection { closed: self.closed.clone() }))
        }
    }
}
