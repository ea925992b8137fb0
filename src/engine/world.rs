//! The [`World`] stores and updates all components of a scene together with the
//! physics simulation they live in.
//!
//! Components are stored behind an [`ObjectId`] and can be fetched back by their
//! concrete type. Physics runs in fixed timesteps, after every step each component
//! gets a chance to pull the simulated state into its native object.

use crate::components::{Component, ComponentError, Polyhedron, PolyhedronParams};
use crate::physics::PhysicsManager;
use log::{debug, info};
use slotmap::{SlotMap, new_key_type};
use std::any::Any;
use std::time::{Duration, Instant};

new_key_type! { pub struct ObjectId; }

struct WorldObject {
    name: String,
    component: Box<dyn Component>,
}

/// Central structure representing the running scene.
pub struct World {
    pub physics: PhysicsManager,
    objects: SlotMap<ObjectId, WorldObject>,
    start_time: Instant,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    pub fn new() -> Self {
        World {
            physics: PhysicsManager::default(),
            objects: SlotMap::with_key(),
            start_time: Instant::now(),
        }
    }

    pub fn add<C: Component, S: Into<String>>(&mut self, name: S, component: C) -> ObjectId {
        let name = name.into();
        debug!("Adding {} \"{name}\" to the world", component.name());

        self.objects.insert(WorldObject {
            name,
            component: Box::new(component),
        })
    }

    /// Builds a polyhedron from parameters and adds it.
    pub fn spawn_polyhedron<S: Into<String>>(
        &mut self,
        name: S,
        params: PolyhedronParams,
    ) -> Result<ObjectId, ComponentError> {
        let polyhedron = Polyhedron::new(params, &mut self.physics)?;
        Ok(self.add(name, polyhedron))
    }

    pub fn get<C: Component>(&self, id: ObjectId) -> Option<&C> {
        let component: &dyn Any = &*self.objects.get(id)?.component;
        component.downcast_ref::<C>()
    }

    pub fn get_mut<C: Component>(&mut self, id: ObjectId) -> Option<&mut C> {
        let component: &mut dyn Any = &mut *self.objects.get_mut(id)?.component;
        component.downcast_mut::<C>()
    }

    /// Gives mutable access to a component together with the physics it lives in,
    /// which is what the live geometry setters need.
    pub fn with_component<C: Component, R>(
        &mut self,
        id: ObjectId,
        func: impl FnOnce(&mut C, &mut PhysicsManager) -> R,
    ) -> Option<R> {
        let object = self.objects.get_mut(id)?;
        let component: &mut dyn Any = &mut *object.component;
        let component = component.downcast_mut::<C>()?;
        Some(func(component, &mut self.physics))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys()
    }

    pub fn find_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| id)
    }

    /// Removes the object and tears down its physics body. Returns false for unknown ids.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let Some(mut object) = self.objects.remove(id) else {
            return false;
        };

        object.component.delete(&mut self.physics);
        debug!("Removed \"{}\" from the world", object.name);
        true
    }

    /// Runs one fixed physics step and syncs every component afterwards.
    pub fn step(&mut self) {
        self.physics.step();
        for object in self.objects.values_mut() {
            object.component.fixed_update(&mut self.physics);
        }
    }

    /// Steps physics as often as the elapsed wall clock time demands.
    pub fn update(&mut self) -> u32 {
        let mut steps = 0;
        while self.physics.last_update.elapsed() > self.physics.timestep {
            self.physics.last_update += self.physics.timestep;
            self.step();
            steps += 1;
        }
        steps
    }

    pub fn time(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn print_objects(&self) {
        info!("{} objects in world.", self.objects.len());
        for object in self.objects.values() {
            let kind = object
                .component
                .native()
                .map_or_else(|| "unbuilt".to_string(), |n| n.kind().to_string());
            info!("- {} ({}, {kind})", object.name, object.component.name());
        }
    }
}
