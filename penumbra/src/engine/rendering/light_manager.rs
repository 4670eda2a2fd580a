use crate::rendering::lights::Light;
use delegate::delegate;
use itertools::Itertools;
use log::warn;
use penumbra_utils::debug_panic;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable name of a light registered with a [`LightManager`].
    pub struct LightHandle;
}

/// The lights of a scene, iterated in the order they were added.
#[derive(Default)]
pub struct LightManager {
    lights: SlotMap<LightHandle, Box<dyn Light>>,
    order: Vec<LightHandle>,
}

impl LightManager {
    pub fn new() -> Self {
        Self::default()
    }

    delegate! {
        to self.lights {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn contains_key(&self, handle: LightHandle) -> bool;
        }
    }

    pub fn insert(&mut self, light: Box<dyn Light>) -> LightHandle {
        let handle = self.lights.insert(light);
        self.order.push(handle);
        handle
    }

    pub fn remove(&mut self, handle: LightHandle) -> Option<Box<dyn Light>> {
        let Some((pos, _)) = self.order.iter().find_position(|h| **h == handle) else {
            warn!("Tried to remove a light that isn't registered");
            return None;
        };

        self.order.remove(pos);
        let light = self.lights.remove(handle);
        if light.is_none() {
            debug_panic!("Light order and light storage are out of sync");
        }
        light
    }

    pub fn get(&self, handle: LightHandle) -> Option<&dyn Light> {
        self.lights.get(handle).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, handle: LightHandle) -> Option<&mut (dyn Light + 'static)> {
        self.lights.get_mut(handle).map(Box::as_mut)
    }

    /// The light added `position`-th among the ones still registered.
    pub fn nth(&self, position: usize) -> Option<&dyn Light> {
        let handle = *self.order.get(position)?;
        let light = self.get(handle);
        if light.is_none() {
            debug_panic!("Light order references a removed light");
        }
        light
    }

    pub fn handles(&self) -> &[LightHandle] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightHandle, &dyn Light)> {
        self.order
            .iter()
            .filter_map(|handle| Some((*handle, self.lights.get(*handle)?.as_ref())))
    }
}
