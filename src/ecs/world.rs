use super::*;
use bimap::BiHashMap;

/// Arena of entities. Keys are stable for the life of the entity, ids are the caller facing names
/// (either given to create_entity() or generated).
pub struct World {
    entities: HopSlotMap<EntityKey, Entity>,
    ids: BiHashMap<String, EntityKey>,
    id_prefix: String,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_id_prefix("entity")
    }

    /// Generated ids start with the prefix
    pub fn with_id_prefix(prefix: &str) -> Self {
        Self {
            entities: HopSlotMap::with_key(),
            ids: BiHashMap::new(),
            id_prefix: prefix.to_string(),
        }
    }

    /// Create an entity with the given id, or a generated unique one. A caller supplied id that is
    /// already in use fails with DuplicateName, generated ids never fail.
    pub fn create_entity(&mut self, id: Option<&str>) -> CoreResult<EntityKey> {
        if let Some(id) = id {
            if self.ids.contains_left(id) {
                return Err(CoreError::DuplicateName(id.to_string()));
            }
        }
        let key = self
            .entities
            .insert_with_key(|key| Entity::new(key, String::new()));
        let id = match id {
            Some(id) => id.to_string(),
            None => self.generate_id(key),
        };
        if let Some(entity) = self.entities.get_mut(key) {
            entity.set_id(id.clone());
        }
        trace!("created entity {:?}", id);
        self.ids.insert(id, key);
        Ok(key)
    }

    fn generate_id(&self, key: EntityKey) -> String {
        let base = slotmap_key_token(&self.id_prefix, key);
        let mut id = base.clone();
        let mut suffix = 1;
        // Only loops if a caller picked an id that looks generated
        while self.ids.contains_left(&id) {
            id = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        id
    }

    /// Removes the entity and hands it back. Unknown or already destroyed keys give None.
    pub fn destroy_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        self.ids.remove_by_right(&key);
        trace!("destroyed entity {:?}", entity.id());
        Some(entity)
    }

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Look an entity up by id
    pub fn find(&self, id: &str) -> Option<EntityKey> {
        self.ids.get_by_left(id).copied()
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn keys(&self) -> Vec<EntityKey> {
        self.entities.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Keys of entities that have the component. A helper for callers building a working set,
    /// systems themselves never filter.
    pub fn keys_with(&self, component: &str) -> Vec<EntityKey> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.has_component(component))
            .map(|(key, _)| key)
            .collect()
    }

    /// Mutable references to the given entities, in the order given. Keys that are stale or
    /// repeated are skipped.
    pub fn select_mut(&mut self, keys: &[EntityKey]) -> Vec<&mut Entity> {
        let wanted: HashSet<EntityKey> = keys.iter().copied().collect();
        let mut found: HashMap<EntityKey, &mut Entity> = self
            .entities
            .iter_mut()
            .filter(|(key, _)| wanted.contains(key))
            .collect();
        if found.len() < wanted.len() {
            debug!(
                "{} of {} selected entities do not exist",
                wanted.len() - found.len(),
                wanted.len()
            );
        }
        keys.iter().filter_map(|key| found.remove(key)).collect()
    }

    /// Run a system once over exactly the given entities
    pub fn run_system(&mut self, system: &mut System, dt: f64, keys: &[EntityKey]) {
        let mut entities = self.select_mut(keys);
        system.update(dt, &mut entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_supplied_id_is_kept() {
        let mut world = World::new();
        let key = world.create_entity(Some("player")).unwrap();
        assert_eq!(world.entity(key).unwrap().id(), "player");
        assert_eq!(world.find("player"), Some(key));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut world = World::new();
        world.create_entity(Some("player")).unwrap();
        assert_eq!(
            world.create_entity(Some("player")),
            Err(CoreError::DuplicateName("player".to_string()))
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut world = World::with_id_prefix("mob");
        let keys: Vec<EntityKey> = (0..20).map(|_| world.create_entity(None).unwrap()).collect();
        let ids: HashSet<String> = keys
            .iter()
            .map(|key| world.entity(*key).unwrap().id().to_string())
            .collect();
        assert_eq!(ids.len(), 20);
        assert!(ids.iter().all(|id| id.starts_with("mob-")));
    }

    #[test]
    fn generated_id_avoids_caller_ids() {
        let mut world = World::with_id_prefix("e");
        let first = world.create_entity(None).unwrap();
        let taken = world.entity(first).unwrap().id().to_string();
        world.destroy_entity(first);
        world.create_entity(Some(&taken)).unwrap();
        let second = world.create_entity(None).unwrap();
        assert_ne!(world.entity(second).unwrap().id(), taken);
    }

    #[test]
    fn destroyed_entity_is_gone() {
        let mut world = World::new();
        let key = world.create_entity(Some("crate")).unwrap();
        assert!(world.destroy_entity(key).is_some());
        assert!(world.destroy_entity(key).is_none());
        assert!(!world.contains(key));
        assert_eq!(world.find("crate"), None);
        // The id is free again
        world.create_entity(Some("crate")).unwrap();
    }

    #[test]
    fn select_mut_keeps_caller_order_and_skips_bad_keys() {
        let mut world = World::new();
        let a = world.create_entity(Some("a")).unwrap();
        let b = world.create_entity(Some("b")).unwrap();
        let c = world.create_entity(Some("c")).unwrap();
        world.destroy_entity(b);
        let ids: Vec<String> = world
            .select_mut(&[c, b, a, c])
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn keys_with_component() {
        let mut world = World::new();
        let a = world.create_entity(None).unwrap();
        let b = world.create_entity(None).unwrap();
        world.entity_mut(a).unwrap().add_component("ai", ());
        assert_eq!(world.keys_with("ai"), vec![a]);
        assert!(world.keys().contains(&b));
    }
}
