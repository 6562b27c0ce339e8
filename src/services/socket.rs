// ============================================================================
// NOTIFICATION SOCKET - WebSocket → cola tipada de mensajes
// ============================================================================
// El socket no toca el estado: solo traduce frames a `SocketMessage` y los
// encola. Un único dispatcher consume la cola en orden.
// ============================================================================

use futures::channel::mpsc::UnboundedSender;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::models::NotificationEvent;

#[derive(Clone, Debug, PartialEq)]
pub enum SocketMessage {
    Opened,
    Event(NotificationEvent),
    Closed,
}

/// Conexión abierta; cerrarla corta la cola
pub trait SocketConnection {
    fn close(&self);
}

pub trait SocketConnector {
    fn connect(&self, url: &str, sink: UnboundedSender<SocketMessage>) -> Result<Box<dyn SocketConnection>, String>;
}

/// URL del socket con el token de sesión
pub fn socket_url(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base, separator, urlencoding::encode(token))
}

#[derive(Clone, Copy, Default)]
pub struct BrowserSocketConnector;

struct BrowserSocket {
    ws: WebSocket,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
}

impl SocketConnector for BrowserSocketConnector {
    fn connect(&self, url: &str, sink: UnboundedSender<SocketMessage>) -> Result<Box<dyn SocketConnection>, String> {
        let ws = WebSocket::new(url).map_err(|e| format!("WebSocket error: {:?}", e))?;

        let tx = sink.clone();
        let onopen = Closure::wrap(Box::new(move |_e: Event| {
            let _ = tx.unbounded_send(SocketMessage::Opened);
        }) as Box<dyn FnMut(Event)>);

        let tx = sink.clone();
        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(frame) = e.data().as_string() else {
                log::warn!("⚠️ [SOCKET] Frame no textual ignorado");
                return;
            };
            match NotificationEvent::decode(&frame) {
                Ok(event) => {
                    let _ = tx.unbounded_send(SocketMessage::Event(event));
                }
                Err(err) => log::warn!("⚠️ [SOCKET] Frame ilegible: {}", err),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let tx = sink;
        let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
            log::info!("🔌 [SOCKET] Cerrado (code {})", e.code());
            let _ = tx.unbounded_send(SocketMessage::Closed);
        }) as Box<dyn FnMut(CloseEvent)>);

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        Ok(Box::new(BrowserSocket {
            ws,
            _onopen: onopen,
            _onmessage: onmessage,
            _onclose: onclose,
        }))
    }
}

impl SocketConnection for BrowserSocket {
    fn close(&self) {
        // Desenganchar antes de soltar los closures
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        let _ = self.ws.close();
    }
}

impl Drop for BrowserSocket {
    fn drop(&mut self) {
        self.close();
    }
}
