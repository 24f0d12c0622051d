use std::any::type_name;

/// The type name without its module path or generic parameters, for error messages
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let name = type_name::<T>();
    let without_generics = name.split('<').next().unwrap_or(name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}
