use slotmap::SlotMap;

use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a light in a [`LightRegistry`].
    pub struct LightId;
}

/// A dynamic point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position.
    pub position: Point3,
    /// Radius of influence.
    pub radius: f32,
    /// If `false`, the light never produces a shadow volume.
    pub cast_shadows: bool,
}

impl Light {
    /// Creates a shadow-casting point light.
    #[must_use]
    pub fn new(position: Point3, radius: f32) -> Self {
        Self {
            position,
            radius,
            cast_shadows: true,
        }
    }

    /// Sets whether this light casts shadows.
    #[must_use]
    pub fn with_cast_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows;
        self
    }
}

/// The set of lights active this frame, addressed by position in the list.
pub trait LightSource {
    /// Number of active lights.
    fn light_count(&self) -> usize;

    /// The light at `index`, or `None` past the end.
    fn light(&self, index: usize) -> Option<Light>;
}

impl LightSource for [Light] {
    fn light_count(&self) -> usize {
        self.len()
    }

    fn light(&self, index: usize) -> Option<Light> {
        self.get(index).copied()
    }
}

impl LightSource for Vec<Light> {
    fn light_count(&self) -> usize {
        self.len()
    }

    fn light(&self, index: usize) -> Option<Light> {
        self.get(index).copied()
    }
}

/// Arena of dynamic lights with stable ids.
///
/// Lights are reported to shadow volume nodes in insertion order; removing a
/// light shifts the ones after it down by one slot.
#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: SlotMap<LightId, Light>,
    order: Vec<LightId>,
}

impl LightRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a light and returns its ID.
    pub fn add(&mut self, light: Light) -> LightId {
        let id = self.lights.insert(light);
        self.order.push(id);
        id
    }

    /// Removes a light, returning it if it was present.
    pub fn remove(&mut self, id: LightId) -> Option<Light> {
        let light = self.lights.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(light)
    }

    /// Returns a reference to the light, if present.
    #[must_use]
    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id)
    }

    /// Returns a mutable reference to the light, if present.
    pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id)
    }

    /// Removes every light.
    pub fn clear(&mut self) {
        self.lights.clear();
        self.order.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl LightSource for LightRegistry {
    fn light_count(&self) -> usize {
        self.order.len()
    }

    fn light(&self, index: usize) -> Option<Light> {
        let id = *self.order.get(index)?;
        self.lights.get(id).copied()
    }
}
