use super::*;

/// A method gets the instance it was called on and the call's arguments
pub type Method = Arc<dyn Fn(&mut Instance, &[Value]) -> CoreResult<Value> + Send + Sync>;

struct ClassInner {
    name: String,
    base: Option<Class>,
    methods: RwLock<HashMap<String, Method>>,
    /// Shared by every class in a registry and bumped whenever any of them defines a method, so a
    /// cached lookup is stale if its epoch differs. One counter for everything is coarse, but
    /// methods are normally all defined before the first call.
    epoch: Arc<AtomicU64>,
    /// Memoized results of resolve(), None if disabled
    cache: Option<Mutex<HashMap<String, (u64, Option<Method>)>>>,
}

/// A named class descriptor. Cloning gives another handle to the same class. The base link is
/// shared and never changes after creation, so chains are always finite and acyclic.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    pub(super) fn new(
        name: &str,
        base: Option<Class>,
        epoch: Arc<AtomicU64>,
        method_cache: bool,
    ) -> Self {
        Self(Arc::new(ClassInner {
            name: name.to_string(),
            base,
            methods: RwLock::new(HashMap::new()),
            epoch,
            cache: if method_cache {
                Some(Mutex::new(HashMap::new()))
            } else {
                None
            },
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn super_class(&self) -> Option<&Class> {
        self.0.base.as_ref()
    }

    /// This class followed by each of its bases, most derived first
    pub fn ancestry(&self) -> impl Iterator<Item = &Class> {
        std::iter::successors(Some(self), |class| class.super_class())
    }

    /// Attach a method under a name, replacing any this class already had under it
    pub fn define<F>(&self, name: &str, f: F)
    where
        F: Fn(&mut Instance, &[Value]) -> CoreResult<Value> + Send + Sync + 'static,
    {
        self.define_method(name, Arc::new(f));
    }

    pub fn define_method(&self, name: &str, method: Method) {
        let replaced = self
            .0
            .methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), method)
            .is_some();
        if replaced {
            debug!("{}.{} redefined", self.name(), name);
        }
        self.0.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// If this class itself (not a base) defines the method
    pub fn defines(&self, name: &str) -> bool {
        self.0
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    fn own_method(&self, name: &str) -> Option<Method> {
        self.0
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// The first definition found walking from this class toward the root
    pub fn resolve(&self, name: &str) -> Option<Method> {
        let cache = match &self.0.cache {
            Some(cache) => cache,
            None => return self.ancestry().find_map(|class| class.own_method(name)),
        };
        let epoch = self.0.epoch.load(Ordering::Acquire);
        if let Some((cached_epoch, method)) = cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            if *cached_epoch == epoch {
                return method.clone();
            }
        }
        let method = self.ancestry().find_map(|class| class.own_method(name));
        cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), (epoch, method.clone()));
        method
    }

    /// Construct an instance. Runs the most derived Init (if any class in the chain has one)
    /// exactly once. Base Inits only run if the derived one calls them through invoke().
    pub fn new_instance(&self, args: &[Value]) -> CoreResult<Instance> {
        let mut instance = Instance::new(self.clone());
        match self.resolve(INIT) {
            Some(init) => {
                init(&mut instance, args)?;
            }
            None => trace!("{} has no {}, instance left uninitialized", self.name(), INIT),
        }
        Ok(instance)
    }

    /// Call the method as resolved from this class rather than from the instance's class. This is
    /// how a derived method reaches a specific ancestor's version (Base.Init(self, ...)).
    pub fn invoke(
        &self,
        method: &str,
        instance: &mut Instance,
        args: &[Value],
    ) -> CoreResult<Value> {
        match self.resolve(method) {
            Some(f) => f(instance, args),
            None => Err(CoreError::UnknownMethod {
                class: self.name().to_string(),
                method: method.to_string(),
            }),
        }
    }

    /// True if this is the given class or derives from it
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.ancestry().any(|class| class == other)
    }

    /// Same as is_subclass_of() but by name
    pub fn inherits_from(&self, name: &str) -> bool {
        self.ancestry().any(|class| class.name() == name)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl Debug for Class {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.super_class() {
            Some(base) => write!(f, "Class({} : {})", self.name(), base.name()),
            None => write!(f, "Class({})", self.name()),
        }
    }
}
