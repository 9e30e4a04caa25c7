use crate::layers::base::Layer;

/// Holds the layers currently handed to the render target, in stacking
/// order (first added draws first).
pub struct LayerRegistry {
    layers: Vec<Box<dyn Layer>>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Adds a layer on top of the stack. A layer with the same id replaces
    /// the existing one in place.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        if let Some(existing) = self.layers.iter_mut().find(|l| l.id() == layer.id()) {
            *existing = layer;
        } else {
            self.layers.push(layer);
        }
    }

    /// Removes a layer from the stack, returning it if present
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn Layer>> {
        let pos = self.layers.iter().position(|l| l.id() == layer_id)?;
        Some(self.layers.remove(pos))
    }

    /// Gets a reference to a layer by id
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn Layer> {
        self.layers
            .iter()
            .find(|l| l.id() == layer_id)
            .map(|l| l.as_ref())
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.iter().any(|l| l.id() == layer_id)
    }

    /// Lists layer ids in stacking order
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id()).collect()
    }

    /// Applies a function to each layer in stacking order
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&dyn Layer),
    {
        for layer in &self.layers {
            f(layer.as_ref());
        }
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;
    use crate::layers::base::{Canvas, LayerKind, LayerProperties};
    use crate::Result;

    struct StubLayer {
        properties: LayerProperties,
    }

    impl StubLayer {
        fn boxed(id: &str) -> Box<dyn Layer> {
            Box::new(Self {
                properties: LayerProperties::new(
                    id.to_string(),
                    id.to_string(),
                    LayerKind::Vector,
                ),
            })
        }
    }

    impl Layer for StubLayer {
        fn id(&self) -> &str {
            &self.properties.id
        }

        fn name(&self) -> &str {
            &self.properties.name
        }

        fn kind(&self) -> LayerKind {
            self.properties.kind
        }

        fn is_visible(&self) -> bool {
            self.properties.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.properties.visible = visible;
        }

        fn draw(&self, _canvas: &mut dyn Canvas, _viewport: &Viewport) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut registry = LayerRegistry::new();
        assert!(registry.is_empty());

        registry.add_layer(StubLayer::boxed("base"));
        registry.add_layer(StubLayer::boxed("overlay"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("base"));
        assert_eq!(registry.get_layer("overlay").unwrap().id(), "overlay");

        let removed = registry.remove_layer("base");
        assert!(removed.is_some());
        assert!(!registry.contains("base"));
        assert!(registry.remove_layer("base").is_none());
    }

    #[test]
    fn test_stacking_order() {
        let mut registry = LayerRegistry::new();
        registry.add_layer(StubLayer::boxed("a"));
        registry.add_layer(StubLayer::boxed("b"));
        registry.add_layer(StubLayer::boxed("c"));

        assert_eq!(registry.layer_ids(), vec!["a", "b", "c"]);

        registry.remove_layer("b");
        assert_eq!(registry.layer_ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_same_id_replaces_in_place() {
        let mut registry = LayerRegistry::new();
        registry.add_layer(StubLayer::boxed("a"));
        registry.add_layer(StubLayer::boxed("b"));
        registry.add_layer(StubLayer::boxed("a"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.layer_ids(), vec!["a", "b"]);
    }
}
