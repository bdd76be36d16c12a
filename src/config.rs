use crate::error::{PoolError, Result};
use crate::types::config::PoolConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "pool.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".awards-pool/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/awards-pool/config.toml";

/// Loads the pool config for `root`, layered over the user's global file.
/// Returns `None` when the pool directory has no `pool.toml`.
pub fn load_config(root: &Path) -> Result<Option<PoolConfig>> {
    let global = std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global: Option<&Path>,
) -> Result<Option<PoolConfig>> {
    let pool_file = root.join(DEFAULT_CONFIG_FILE);
    if !pool_file.is_file() {
        return Ok(None);
    }

    let mut applied = 0usize;
    let merged = layer_paths(root, global)
        .into_iter()
        .try_fold(Table::new(), |mut merged, path| {
            if let Some(layer) = read_layer(&path)? {
                overlay(&mut merged, layer);
                applied += 1;
            }
            Ok::<_, PoolError>(merged)
        })?;

    let config: PoolConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| PoolError::ConfigParse(e.to_string()))?;
    config.validate()?;
    tracing::debug!(
        path = %pool_file.display(),
        layers = applied,
        year = config.year(),
        "config loaded"
    );
    Ok(Some(config))
}

/// Lowest precedence first.
fn layer_paths(root: &Path, global: Option<&Path>) -> Vec<PathBuf> {
    global
        .map(Path::to_path_buf)
        .into_iter()
        .chain([root.join(DEFAULT_CONFIG_FILE), root.join(DEFAULT_LOCAL_FILE)])
        .collect()
}

fn read_layer(path: &Path) -> Result<Option<Table>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PoolError::Io(e)),
    };
    text.parse::<Table>()
        .map(Some)
        .map_err(|e| PoolError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Writes `layer` over `base`. Tables merge key by key; any other value,
/// arrays included, replaces what was there.
fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}
