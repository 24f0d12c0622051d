use std::fmt::Formatter;

fn index_and_version<T: slotmap::Key>(key: T) -> (u64, u64) {
    // Relies on the FFI layout of slotmap keys (version in the high half). Only used for display.
    let raw = key.data().as_ffi();
    (raw & 0xffff_ffff, raw >> 32)
}

/// Debug-formats a key as name#index:version
pub fn format_slotmap_key<T: slotmap::Key>(
    f: &mut Formatter,
    type_name: &str,
    key: T,
) -> std::fmt::Result {
    if key.is_null() {
        write!(f, "{}#null", type_name)
    } else {
        let (index, version) = index_and_version(key);
        write!(f, "{}#{}:{}", type_name, index, version)
    }
}

/// A string token that is unique for the lifetime of the slotmap the key came from
pub fn slotmap_key_token<T: slotmap::Key>(prefix: &str, key: T) -> String {
    let (index, version) = index_and_version(key);
    format!("{}-{}v{}", prefix, index, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::{DefaultKey, Key, SlotMap};

    #[test]
    fn tokens_differ_for_reused_slots() {
        let mut map = SlotMap::new();
        let a = map.insert(());
        map.remove(a);
        let b = map.insert(());
        assert_ne!(slotmap_key_token("e", a), slotmap_key_token("e", b));
    }

    #[test]
    fn token_uses_prefix() {
        let mut map = SlotMap::new();
        let a = map.insert(());
        assert!(slotmap_key_token("goblin", a).starts_with("goblin-"));
    }

    #[test]
    fn null_key_is_not_given_a_token_of_real_key() {
        let mut map = SlotMap::new();
        let a: DefaultKey = map.insert(());
        assert_ne!(
            slotmap_key_token("e", a),
            slotmap_key_token("e", DefaultKey::null())
        );
    }
}
