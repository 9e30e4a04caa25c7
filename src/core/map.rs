use crate::clients::geocode::{GeoapifyClient, ReverseGeocoder};
use crate::clients::isoline::IsolineService;
use crate::core::config::WidgetConfig;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use crate::input::events::InputEvent;
use crate::input::router::InteractionRouter;
use crate::layers::base::Canvas;
use crate::layers::registry::LayerRegistry;
use crate::layers::tile::{TileLayer, BASE_LAYER_ID};
use crate::ui::popup::PopupState;
use crate::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Whether gestures are routed at all. A host without a popup anchor
    /// constructs the widget non-interactive: base map only.
    pub interactive: bool,
    /// The built-in zoom-on-double-click gesture. Off by default because
    /// the double click is bound to the reachability query instead.
    pub double_click_zoom: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            double_click_zoom: false,
        }
    }
}

/// The interactive map widget core.
///
/// Owns the viewport, the layer registry and the interaction router; the
/// host render surface feeds it gestures and commands, calls `pump` when
/// draining its event loop, and draws via `draw`.
pub struct MapWidget<G, S> {
    viewport: Viewport,
    registry: LayerRegistry,
    router: InteractionRouter<G, S>,
    options: WidgetOptions,
    config: WidgetConfig,
}

impl<G, S> MapWidget<G, S>
where
    G: ReverseGeocoder + 'static,
    S: IsolineService + 'static,
{
    pub fn new(
        config: WidgetConfig,
        size: Point,
        geocoder: Arc<G>,
        service: Arc<S>,
        options: WidgetOptions,
    ) -> Self {
        let viewport = Viewport::new(config.initial_center, config.initial_zoom, size);

        let mut registry = LayerRegistry::new();
        registry.add_layer(Box::new(TileLayer::new(
            BASE_LAYER_ID.to_string(),
            "OpenStreetMap".to_string(),
            config.base_tile_url.clone(),
        )));

        let router = InteractionRouter::new(geocoder, service, &config);

        Self {
            viewport,
            registry,
            router,
            options,
            config,
        }
    }

    /// Routes a pointer gesture. Non-interactive widgets ignore gestures
    /// entirely; the base map still renders.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.options.interactive {
            return;
        }
        self.router.handle_event(
            event,
            &mut self.registry,
            &mut self.viewport,
            &self.config,
            self.options.double_click_zoom,
        );
    }

    /// The UI toggle command for the static thematic raster
    pub fn toggle_thematic(&mut self) {
        if !self.options.interactive {
            return;
        }
        self.router
            .toggle_thematic(&mut self.registry, &mut self.viewport, &self.config);
    }

    /// The UI popup-close command
    pub fn close_popup(&mut self) {
        if !self.options.interactive {
            return;
        }
        self.router.close_popup();
    }

    /// Applies arrived network responses. Call once per event-loop turn.
    pub fn pump(&mut self) -> bool {
        self.router.pump(&mut self.registry, &mut self.viewport)
    }

    /// Draws all visible layers in stacking order
    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let mut result = Ok(());
        self.registry.for_each_layer(|layer| {
            if result.is_ok() && layer.is_visible() {
                result = layer.draw(canvas, &self.viewport);
            }
        });
        result
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn popup_state(&self) -> &PopupState {
        self.router.popup_state()
    }

    /// Registry id of the current reachability overlay, if one is shown
    pub fn overlay_layer_id(&self) -> Option<&str> {
        self.router.overlay().current_layer_id()
    }

    pub fn thematic_enabled(&self) -> bool {
        self.router.thematic_enabled()
    }

    pub fn options(&self) -> WidgetOptions {
        self.options
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

impl MapWidget<GeoapifyClient, GeoapifyClient> {
    /// Builds a widget backed by the Geoapify APIs, sharing one client
    /// between both services.
    pub fn with_geoapify(config: WidgetConfig, size: Point, options: WidgetOptions) -> Self {
        let client = Arc::new(GeoapifyClient::new(config.api_key.clone()));
        Self::new(config, size, Arc::clone(&client), client, options)
    }
}
