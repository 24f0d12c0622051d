use super::*;

pub const DEFAULT_TOML_PATH: &str = "gameplay.toml";

/// Loads every key of a TOML file into the builder. Does nothing if the file does not exist.
pub fn load_toml(
    path: &str,
    builder: &mut ConfigBuilder,
    fs: &dyn FilesystemTrait,
) -> Result<(), Box<dyn Error>> {
    let contents = match fs.read_optional(path)? {
        Some(contents) => contents,
        None => {
            debug!("no {}, using default configuration", path);
            return Ok(());
        }
    };
    match contents.parse::<toml::Value>()? {
        toml::Value::Table(table) => {
            for (name, value) in table {
                builder
                    .set(&name, &value, format!("{} in {}", name, path))
                    .map_err(|e| format!("{}: {}", path, e))?;
            }
            Ok(())
        }
        _ => Err(format!("toplevel value of {} is not a table", path).into()),
    }
}
