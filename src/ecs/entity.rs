use super::*;

/// A type-erased component payload
pub type Component = Box<dyn Any + Send + Sync>;

/// An identity with a set of components, at most one per key. Entities have no behavior of their
/// own, systems do all the work.
pub struct Entity {
    key: EntityKey,
    id: String,
    components: HashMap<String, Component>,
}

impl Entity {
    pub(super) fn new(key: EntityKey, id: String) -> Self {
        Self {
            key,
            id,
            components: HashMap::new(),
        }
    }

    pub(super) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// The caller supplied or generated id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a component, silently replacing whatever was under the key
    pub fn add_component<T: Any + Send + Sync>(&mut self, key: &str, data: T) {
        if self
            .components
            .insert(key.to_string(), Box::new(data))
            .is_some()
        {
            trace!("{} replaced component {:?}", self.id, key);
        }
    }

    /// The component under the key, or None if there is none or it is not a T
    pub fn get_component<T: Any>(&self, key: &str) -> Option<&T> {
        self.components.get(key)?.downcast_ref()
    }

    /// A live reference into the entity's storage, changes are seen by everyone
    pub fn get_component_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.components.get_mut(key)?.downcast_mut()
    }

    /// Like get_component(), but a component of the wrong type is an error instead of None
    pub fn try_get_component<T: Any>(&self, key: &str) -> CoreResult<Option<&T>> {
        match self.components.get(key) {
            None => Ok(None),
            Some(component) => match component.downcast_ref() {
                Some(data) => Ok(Some(data)),
                None => Err(CoreError::ComponentType {
                    key: key.to_string(),
                    expected: short_type_name::<T>(),
                }),
            },
        }
    }

    pub fn has_component(&self, key: &str) -> bool {
        self.components.contains_key(key)
    }

    /// Returns the removed payload, removing a missing component is a no-op
    pub fn remove_component(&mut self, key: &str) -> Option<Component> {
        self.components.remove(key)
    }

    /// Sorted, so output is deterministic
    pub fn component_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.components.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Debug for Entity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{:?} (", self.id)?;
        format_slotmap_key(f, "Entity", self.key)?;
        write!(f, ") {:?}", self.component_keys())
    }
}
