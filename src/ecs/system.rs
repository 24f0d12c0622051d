use super::*;

type UpdateFn = Box<dyn FnMut(f64, &mut [&mut Entity]) + Send>;

/// Named per-tick behavior. Runs over whatever entities it is handed, and is responsible for
/// checking their components itself.
pub struct System {
    name: String,
    update: UpdateFn,
}

impl System {
    pub fn new<F>(name: &str, update: F) -> Self
    where
        F: FnMut(f64, &mut [&mut Entity]) + Send + 'static,
    {
        Self {
            name: name.to_string(),
            update: Box::new(update),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the update function exactly once with the given time step and entities
    pub fn update(&mut self, dt: f64, entities: &mut [&mut Entity]) {
        trace!(
            "running system {} over {} entities",
            self.name,
            entities.len()
        );
        (self.update)(dt, entities);
    }
}

impl Debug for System {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "System({})", self.name)
    }
}
