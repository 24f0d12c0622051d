use super::*;

/// An object made by Class::new_instance(). Owns its fields and remembers its class, which is
/// what method calls are resolved against.
#[derive(Clone)]
pub struct Instance {
    class: Class,
    fields: HashMap<String, Value>,
}

impl Instance {
    pub(super) fn new(class: Class) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Read a field as T. Missing fields read as null.
    pub fn get_as<T: FromValue>(&self, field: &str) -> CoreResult<T> {
        match self.fields.get(field) {
            Some(value) => value.decode(),
            None => Value::Null.decode(),
        }
    }

    pub fn set<V: Into<Value>>(&mut self, field: &str, value: V) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Resolved at call time from the instance's class, so a method defined after the instance
    /// was made is still found
    pub fn call(&mut self, method: &str, args: &[Value]) -> CoreResult<Value> {
        let class = self.class.clone();
        class.invoke(method, self, args)
    }

    pub fn responds_to(&self, method: &str) -> bool {
        self.class.resolve(method).is_some()
    }

    /// True if the instance's class is named this or derives from a class named this
    pub fn is_a(&self, class_name: &str) -> bool {
        self.class.inherits_from(class_name)
    }

    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class.is_subclass_of(class)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        write!(f, "{} {{", self.class.name())?;
        for (i, (name, value)) in fields.iter().enumerate() {
            write!(f, "{}{}: {:?}", if i == 0 { " " } else { ", " }, name, value)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Animal <- Dog <- Puppy, where Animal and Dog both define Init and count their calls
    struct Hierarchy {
        animal: Class,
        dog: Class,
        puppy: Class,
        inits: CallRecorder<&'static str>,
    }

    fn hierarchy() -> Hierarchy {
        let classes = ClassRegistry::new();
        let animal = classes.define_class("Animal", None).unwrap();
        let dog = classes.define_class("Dog", Some(&animal)).unwrap();
        let puppy = classes.define_class("Puppy", Some(&dog)).unwrap();
        let inits = CallRecorder::new();
        let recorder = inits.clone();
        animal.define(INIT, move |this, args| {
            recorder.record("Animal");
            this.set("name", args.get(0).cloned().unwrap_or_default());
            Ok(Value::Null)
        });
        let recorder = inits.clone();
        dog.define(INIT, move |this, args| {
            recorder.record("Dog");
            this.set("tricks", args.len() as i64);
            Ok(Value::Null)
        });
        Hierarchy {
            animal,
            dog,
            puppy,
            inits,
        }
    }

    #[test]
    fn new_runs_most_derived_init_once() {
        let h = hierarchy();
        let rex = h.dog.new_instance(&[Value::from("Rex")]).unwrap();
        assert_eq!(h.inits.calls(), vec!["Dog"]);
        assert_eq!(rex.get("tricks"), Some(&Value::from(1)));
        assert_eq!(rex.get("name"), None);
    }

    #[test]
    fn new_walks_up_to_find_init() {
        let h = hierarchy();
        h.puppy.new_instance(&[]).unwrap();
        assert_eq!(h.inits.calls(), vec!["Dog"]);
    }

    #[test]
    fn derived_init_can_call_base_init_explicitly() {
        let h = hierarchy();
        let animal = h.animal.clone();
        h.puppy.define(INIT, move |this, args| {
            animal.invoke(INIT, this, args)?;
            this.set("age", 0);
            Ok(Value::Null)
        });
        let pup = h.puppy.new_instance(&[Value::from("Bit")]).unwrap();
        assert_eq!(h.inits.calls(), vec!["Animal"]);
        assert_eq!(pup.get_as::<String>("name"), Ok("Bit".to_string()));
        assert_eq!(pup.get_as::<i64>("age"), Ok(0));
    }

    #[test]
    fn class_without_init_gives_empty_instance() {
        let classes = ClassRegistry::new();
        let rock = classes.define_class("Rock", None).unwrap();
        let pebble = rock.new_instance(&[Value::from(1)]).unwrap();
        assert!(pebble.fields().is_empty());
    }

    #[test]
    fn failing_init_fails_new() {
        let classes = ClassRegistry::new();
        let picky = classes.define_class("Picky", None).unwrap();
        picky.define(INIT, |_, args| {
            if args.is_empty() {
                Err(CoreError::PreconditionViolation("Picky needs a name".into()))
            } else {
                Ok(Value::Null)
            }
        });
        assert!(picky.new_instance(&[]).is_err());
        assert!(picky.new_instance(&[Value::from("ok")]).is_ok());
    }

    #[test]
    fn is_a_walks_base_chain() {
        let h = hierarchy();
        let pup = h.puppy.new_instance(&[]).unwrap();
        assert!(pup.is_a("Puppy"));
        assert!(pup.is_a("Dog"));
        assert!(pup.is_a("Animal"));
        assert!(!pup.is_a("Cat"));
        let generic = h.animal.new_instance(&[]).unwrap();
        assert!(!generic.is_a("Dog"));
        assert!(pup.is_instance_of(&h.dog));
        assert!(!generic.is_instance_of(&h.dog));
    }

    #[test]
    fn methods_can_mutate_fields() {
        let classes = ClassRegistry::new();
        let counter = classes.define_class("Counter", None).unwrap();
        counter.define(INIT, |this, _| {
            this.set("count", 0);
            Ok(Value::Null)
        });
        counter.define("Increment", |this, args| {
            let by = match args.first() {
                Some(v) => v.decode::<i64>()?,
                None => 1,
            };
            let count = this.get_as::<i64>("count")? + by;
            this.set("count", count);
            Ok(Value::from(count))
        });
        let mut c = counter.new_instance(&[]).unwrap();
        c.call("Increment", &[]).unwrap();
        assert_eq!(c.call("Increment", &[Value::from(5)]), Ok(Value::from(6)));
        assert!(c.call("Increment", &[Value::from("x")]).is_err());
        assert!(c.responds_to("Increment"));
        assert!(!c.responds_to("Decrement"));
    }

    #[test]
    fn methods_defined_after_construction_are_found() {
        let classes = ClassRegistry::new();
        let ghost = classes.define_class("Ghost", None).unwrap();
        let mut boo = ghost.new_instance(&[]).unwrap();
        assert!(boo.call("Haunt", &[]).is_err());
        ghost.define("Haunt", |_, _| Ok(Value::from("boo")));
        assert_eq!(boo.call("Haunt", &[]), Ok(Value::from("boo")));
    }

    #[test]
    fn debug_lists_sorted_fields() {
        let classes = ClassRegistry::new();
        let point = classes.define_class("Point", None).unwrap();
        let mut p = point.new_instance(&[]).unwrap();
        p.set("y", 2);
        p.set("x", 1);
        assert_eq!(format!("{:?}", p), "Point { x: Integer(1), y: Integer(2) }");
    }
}
