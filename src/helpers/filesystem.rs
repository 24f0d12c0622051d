/// A mockable interface to the filesystem, only as much of it as config loading needs
pub trait FilesystemTrait {
    /// Returns Ok(None) if there is no file at the path
    fn read_optional(&self, path: &str) -> std::io::Result<Option<String>>;
}

pub type Filesystem = Box<dyn FilesystemTrait>;

pub fn real_filesystem() -> Filesystem {
    Box::new(FilesystemImpl)
}

struct FilesystemImpl;

impl FilesystemTrait for FilesystemImpl {
    fn read_optional(&self, path: &str) -> std::io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_path(parts: &[&str]) -> String {
        let mut buf = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        for part in parts {
            buf.push(part);
        }
        buf.to_str().unwrap().to_string()
    }

    #[test]
    fn reads_existing_file() {
        let fs = real_filesystem();
        let contents = fs
            .read_optional(&workspace_path(&["Cargo.toml"]))
            .unwrap()
            .expect("Cargo.toml missing");
        assert!(contents.starts_with("[package]\n"));
    }

    #[test]
    fn missing_file_is_none() {
        let fs = real_filesystem();
        let contents = fs
            .read_optional(&workspace_path(&["not-a-file.toml"]))
            .unwrap();
        assert!(contents.is_none());
    }
}
