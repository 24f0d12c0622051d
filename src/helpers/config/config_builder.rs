use super::*;

type ApplyFn<T> = Box<dyn Fn(&mut CoreConfig, T, Option<&str>) -> Result<(), Box<dyn Error>>>;

/// A type a config entry can hold
pub trait ConfigValue: Clone + 'static {
    const KIND: &'static str;
    fn from_toml(value: &toml::Value) -> Option<Self>;
}

impl ConfigValue for bool {
    const KIND: &'static str = "bool";
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ConfigValue for String {
    const KIND: &'static str = "string";
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl ConfigValue for i64 {
    const KIND: &'static str = "int";
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_integer()
    }
}

impl ConfigValue for f64 {
    const KIND: &'static str = "float";
    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Float(v) => Some(*v),
            toml::Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

pub trait ConfigEntry {
    fn name(&self) -> &str;
    /// Store a value from the given source (such as a file name), fails if it is the wrong type
    fn set(&mut self, value: &toml::Value, source: String) -> Result<(), Box<dyn Error>>;
    fn apply_to(&self, target: &mut CoreConfig) -> Result<(), Box<dyn Error>>;
}

struct TypedEntry<T> {
    name: &'static str,
    value: T,
    /// Some if the value is not default, describes how it was set
    source: Option<String>,
    apply: ApplyFn<T>,
}

impl<T: ConfigValue> ConfigEntry for TypedEntry<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn set(&mut self, value: &toml::Value, source: String) -> Result<(), Box<dyn Error>> {
        match T::from_toml(value) {
            Some(v) => {
                self.value = v;
                self.source = Some(source);
                Ok(())
            }
            None => Err(format!(
                "{} is not valid for {} (expected: {})",
                value,
                self.name,
                T::KIND
            )
            .into()),
        }
    }

    fn apply_to(&self, target: &mut CoreConfig) -> Result<(), Box<dyn Error>> {
        (self.apply)(target, self.value.clone(), self.source.as_deref())
    }
}

/// Create a config entry with a default value and a function that validates and applies it
pub fn entry<T, F>(name: &'static str, default_value: T, apply: F) -> Box<dyn ConfigEntry>
where
    T: ConfigValue,
    F: Fn(&mut CoreConfig, T, Option<&str>) -> Result<(), Box<dyn Error>> + 'static,
{
    Box::new(TypedEntry {
        name,
        value: default_value,
        source: None,
        apply: Box::new(apply),
    })
}

pub struct ConfigBuilder {
    entries: Vec<Box<dyn ConfigEntry>>,
}

impl ConfigBuilder {
    pub fn new(entries: Vec<Box<dyn ConfigEntry>>) -> Self {
        let mut names = HashSet::new();
        for entry in &entries {
            assert!(
                names.insert(entry.name().to_string()),
                "duplicate configuration entry {}",
                entry.name()
            );
        }
        Self { entries }
    }

    pub fn set(
        &mut self,
        name: &str,
        value: &toml::Value,
        source: String,
    ) -> Result<(), Box<dyn Error>> {
        match self.entries.iter_mut().find(|entry| entry.name() == name) {
            Some(entry) => entry.set(value, source),
            None => Err(format!("{} is not a valid option", name).into()),
        }
    }

    /// Entries are applied in the order they were given to new(), not the order they were set
    pub fn apply_to(&self, target: &mut CoreConfig) -> Result<(), Box<dyn Error>> {
        for entry in &self.entries {
            entry
                .apply_to(target)
                .map_err(|e| format!("{} configuration option: {}", entry.name(), e))?;
        }
        Ok(())
    }
}
