//! Popup state and its controller.
//!
//! Exactly one popup exists per widget. `open` is fire-and-forget: the
//! reverse-geocode request runs on a detached worker and the gesture
//! handler returns immediately. Results arrive over a channel and are
//! applied in arrival order by `pump` on the event thread, so a slow
//! response can land after a later click or after `close` — last arrival
//! wins, and a write after close legally reopens the popup.

use crate::clients::geocode::ReverseGeocoder;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Popup contents and anchor. The anchor is the projected coordinate of
/// the originating click; `None` means the popup is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub title: String,
    pub content: String,
    pub anchor: Option<Point>,
}

impl PopupState {
    pub fn hidden() -> Self {
        Self {
            title: "Not found".to_string(),
            content: String::new(),
            anchor: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }
}

impl Default for PopupState {
    fn default() -> Self {
        Self::hidden()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PopupUpdate {
    title: String,
    content: String,
    anchor: Point,
}

pub struct PopupController<G> {
    geocoder: Arc<G>,
    state: PopupState,
    tx: Sender<PopupUpdate>,
    rx: Receiver<PopupUpdate>,
}

impl<G: ReverseGeocoder + 'static> PopupController<G> {
    pub fn new(geocoder: Arc<G>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            geocoder,
            state: PopupState::hidden(),
            tx,
            rx,
        }
    }

    /// Issues a reverse-geocode request for the clicked position. On
    /// success the popup will open anchored at the original pixel once the
    /// response is pumped; on failure the state is left untouched and the
    /// error goes to the log only.
    pub fn open(&self, pixel: Point, viewport: &Viewport) {
        let point = viewport.pixel_to_lat_lng(&pixel);
        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.tx.clone();

        thread::spawn(move || {
            log::debug!("reverse geocode at ({:.5}, {:.5})", point.lng, point.lat);
            match geocoder.reverse(&point) {
                Ok(info) => {
                    let _ = tx.send(PopupUpdate {
                        title: info.kind,
                        content: format!("Address: {}", info.formatted),
                        anchor: pixel,
                    });
                }
                Err(e) => log::warn!("reverse geocode failed: {}", e),
            }
        });
    }

    /// Applies arrived responses in arrival order. Returns whether any
    /// update was applied.
    pub fn pump(&mut self) -> bool {
        let mut applied = false;
        for update in self.rx.try_iter() {
            self.state.title = update.title;
            self.state.content = update.content;
            self.state.anchor = Some(update.anchor);
            applied = true;
        }
        applied
    }

    /// Hides the popup. Idempotent; pending responses are not cancelled.
    pub fn close(&mut self) {
        self.state.anchor = None;
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }
}
