//! Routes pointer gestures and UI commands to the popup and overlay
//! controllers.

use crate::clients::geocode::ReverseGeocoder;
use crate::clients::isoline::IsolineService;
use crate::core::config::WidgetConfig;
use crate::core::viewport::Viewport;
use crate::input::events::InputEvent;
use crate::layers::reachability::OverlayManager;
use crate::layers::registry::LayerRegistry;
use crate::layers::tile::{WmsLayer, THEMATIC_LAYER_ID};
use crate::ui::popup::{PopupController, PopupState};
use std::sync::Arc;

pub struct InteractionRouter<G, S> {
    popup: PopupController<G>,
    overlay: OverlayManager<S>,
    thematic_enabled: bool,
}

impl<G, S> InteractionRouter<G, S>
where
    G: ReverseGeocoder + 'static,
    S: IsolineService + 'static,
{
    pub fn new(geocoder: Arc<G>, service: Arc<S>, config: &WidgetConfig) -> Self {
        Self {
            popup: PopupController::new(geocoder),
            overlay: OverlayManager::new(
                service,
                config.palette,
                config.stroke_width,
                config.overlay_zoom,
            ),
            thematic_enabled: false,
        }
    }

    /// Dispatches a pointer gesture.
    ///
    /// A single click clears the overlay before opening the popup: the two
    /// are mutually exclusive visual modes and the ordering keeps them
    /// from ever appearing together. A double click refreshes the overlay
    /// with the configured thresholds; when the host has double-click zoom
    /// enabled the gesture zooms instead, so the two behaviors never fight
    /// over the zoom level.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        registry: &mut LayerRegistry,
        viewport: &mut Viewport,
        config: &WidgetConfig,
        double_click_zoom: bool,
    ) {
        match event {
            InputEvent::Click { position, .. } => {
                self.overlay.clear(registry);
                self.popup.open(position, viewport);
            }
            InputEvent::DoubleClick { position } => {
                if double_click_zoom {
                    viewport.set_zoom(viewport.zoom + 1.0);
                } else {
                    self.overlay.refresh(position, viewport, &config.thresholds);
                }
            }
        }
    }

    /// Flips the thematic raster's visibility. Turning it on also drops
    /// the viewport to the configured thematic zoom so the raster's full
    /// extent is visible; turning it off restores nothing.
    pub fn toggle_thematic(
        &mut self,
        registry: &mut LayerRegistry,
        viewport: &mut Viewport,
        config: &WidgetConfig,
    ) {
        if self.thematic_enabled {
            registry.remove_layer(THEMATIC_LAYER_ID);
        } else {
            registry.add_layer(Box::new(WmsLayer::new(
                THEMATIC_LAYER_ID.to_string(),
                "Land Surface Temperature".to_string(),
                config.thematic_wms_url.clone(),
                config.thematic_layer_name.clone(),
            )));
            viewport.set_zoom(config.thematic_zoom);
        }
        self.thematic_enabled = !self.thematic_enabled;
    }

    /// Hides the popup (the UI close command)
    pub fn close_popup(&mut self) {
        self.popup.close();
    }

    /// Applies all network responses that have arrived since the last
    /// call. Returns whether any state changed.
    pub fn pump(&mut self, registry: &mut LayerRegistry, viewport: &mut Viewport) -> bool {
        let popup_changed = self.popup.pump();
        let overlay_changed = self.overlay.pump(registry, viewport);
        popup_changed || overlay_changed
    }

    pub fn popup_state(&self) -> &PopupState {
        self.popup.state()
    }

    pub fn overlay(&self) -> &OverlayManager<S> {
        &self.overlay
    }

    pub fn thematic_enabled(&self) -> bool {
        self.thematic_enabled
    }
}
