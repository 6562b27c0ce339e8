// ============================================================================
// DESKTOP PRESENTER - Notificaciones de escritorio y sonido
// ============================================================================

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, NotificationOptions, NotificationPermission};

use crate::models::Notification;
use crate::state::DesktopPermission;

const NOTIFICATION_SOUND: &str = "/sounds/notification.mp3";

#[async_trait(?Send)]
pub trait NotificationPresenter {
    fn permission(&self) -> DesktopPermission;
    /// Solo se invoca desde una acción explícita del usuario
    async fn request_permission(&self) -> DesktopPermission;
    fn show_desktop(&self, notification: &Notification);
    fn play_sound(&self);
}

#[derive(Clone, Copy, Default)]
pub struct BrowserPresenter;

fn supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("Notification")).unwrap_or(false))
        .unwrap_or(false)
}

fn from_browser(permission: NotificationPermission) -> DesktopPermission {
    match permission {
        NotificationPermission::Granted => DesktopPermission::Granted,
        NotificationPermission::Denied => DesktopPermission::Denied,
        _ => DesktopPermission::Default,
    }
}

#[async_trait(?Send)]
impl NotificationPresenter for BrowserPresenter {
    fn permission(&self) -> DesktopPermission {
        if !supported() {
            return DesktopPermission::Unsupported;
        }
        from_browser(web_sys::Notification::permission())
    }

    async fn request_permission(&self) -> DesktopPermission {
        if !supported() {
            return DesktopPermission::Unsupported;
        }
        let promise = match web_sys::Notification::request_permission() {
            Ok(promise) => promise,
            Err(e) => {
                log::error!("❌ [DESKTOP] requestPermission falló: {:?}", e);
                return self.permission();
            }
        };
        match JsFuture::from(promise).await.ok().and_then(|v| v.as_string()).as_deref() {
            Some("granted") => DesktopPermission::Granted,
            Some("denied") => DesktopPermission::Denied,
            _ => DesktopPermission::Default,
        }
    }

    fn show_desktop(&self, notification: &Notification) {
        let options = NotificationOptions::new();
        options.set_body(&notification.message);
        options.set_tag(&notification.id);
        if let Err(e) = web_sys::Notification::new_with_options(&notification.title, &options) {
            log::warn!("⚠️ [DESKTOP] No se pudo mostrar la notificación: {:?}", e);
        }
    }

    fn play_sound(&self) {
        match HtmlAudioElement::new_with_src(NOTIFICATION_SOUND) {
            // play() devuelve una promesa; el autoplay bloqueado no es un error nuestro
            Ok(audio) => {
                let _ = audio.play();
            }
            Err(e) => log::warn!("⚠️ [DESKTOP] Audio no disponible: {:?}", e),
        }
    }
}
