use super::*;

/// Owns the set of known classes. A class can only derive from a class registered here, which is
/// what keeps every inheritance chain finite.
pub struct ClassRegistry {
    classes: RwLock<HashMap<String, Class>>,
    epoch: Arc<AtomicU64>,
    method_cache: bool,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::with_method_cache(true)
    }

    pub fn with_method_cache(method_cache: bool) -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            epoch: Arc::new(AtomicU64::new(0)),
            method_cache,
        }
    }

    /// Register a new class. Fails with InvalidBase if base did not come from this registry, and
    /// with DuplicateName if the name is taken.
    pub fn define_class(&self, name: &str, base: Option<&Class>) -> CoreResult<Class> {
        let mut classes = self
            .classes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(base) = base {
            if classes.get(base.name()) != Some(base) {
                return Err(CoreError::InvalidBase(base.name().to_string()));
            }
        }
        if classes.contains_key(name) {
            return Err(CoreError::DuplicateName(name.to_string()));
        }
        let class = Class::new(
            name,
            base.cloned(),
            self.epoch.clone(),
            self.method_cache,
        );
        debug!("defined {:?}", class);
        classes.insert(name.to_string(), class.clone());
        Ok(class)
    }

    /// Like define_class(), with the base given by name
    pub fn define_class_named(&self, name: &str, base: Option<&str>) -> CoreResult<Class> {
        let base = match base {
            Some(base_name) => Some(
                self.get(base_name)
                    .ok_or_else(|| CoreError::InvalidBase(base_name.to_string()))?,
            ),
            None => None,
        };
        self.define_class(name, base.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<Class> {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.classes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
