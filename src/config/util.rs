//! Configuration utility functions.

use std::path::{Path, PathBuf};
use toml::Value;

/// Find config file by searching upward from current directory.
///
/// # Example
/// ```text
/// /home/user/site/pages/       ← cwd
/// /home/user/site/quiver.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

/// Look up a dotted path (`site.name`, `navigation.2.slug`) in a TOML value.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, key| match current {
        Value::Table(table) => table.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Assign `value` at a dotted path, creating missing tables along the way.
pub fn assign(root: &mut Value, path: &str, value: Value) -> Result<(), String> {
    let mut keys: Vec<&str> = path.split('.').collect();
    let Some(last) = keys.pop().filter(|k| !k.is_empty()) else {
        return Err("empty key".into());
    };

    let mut current = root;
    for key in keys {
        current = match current {
            Value::Table(table) => table
                .entry(key)
                .or_insert(Value::Table(Default::default())),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| format!("no element `{key}`"))?,
            other => return Err(format!("`{key}` is inside a {}", other.type_str())),
        };
    }

    match current {
        Value::Table(table) => {
            table.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(|| format!("no element `{last}`"))?;
            *slot = value;
            Ok(())
        }
        other => Err(format!("cannot set a key on a {}", other.type_str())),
    }
}

/// Parse a `--set key=value` override.
///
/// The value is read as a TOML value; anything that does not parse is taken
/// as a plain string, so `--set site.name=Three Arrows` needs no quoting.
pub fn parse_override(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }

    let value = value.trim();
    let parsed = toml::from_str::<toml::Table>(&format!("v = {value}"))
        .ok()
        .and_then(|mut table| table.remove("v"))
        .unwrap_or_else(|| Value::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        toml::from_str(
            r#"
[site]
name = "Three Arrows Studio"

[[navigation]]
name = "Home"

[[navigation]]
name = "About"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let value = sample();
        assert_eq!(
            lookup(&value, "site.name").and_then(Value::as_str),
            Some("Three Arrows Studio")
        );
        assert_eq!(
            lookup(&value, "navigation.1.name").and_then(Value::as_str),
            Some("About")
        );
        assert!(lookup(&value, "site.missing").is_none());
        assert!(lookup(&value, "site.name.deeper").is_none());
    }

    #[test]
    fn test_assign_creates_tables() {
        let mut value = sample();
        assign(&mut value, "features.newsletter", Value::Boolean(true)).unwrap();
        assign(&mut value, "navigation.0.name", Value::String("Start".into())).unwrap();

        assert_eq!(lookup(&value, "features.newsletter"), Some(&Value::Boolean(true)));
        assert_eq!(
            lookup(&value, "navigation.0.name").and_then(Value::as_str),
            Some("Start")
        );
        assert!(assign(&mut value, "site.name.first", Value::Integer(1)).is_err());
        assert!(assign(&mut value, "navigation.9.name", Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("assemble.breakpoint=1024").unwrap(),
            ("assemble.breakpoint".into(), Value::Integer(1024))
        );
        assert_eq!(
            parse_override("features.blog = true").unwrap().1,
            Value::Boolean(true)
        );
        assert_eq!(
            parse_override("site.name=Three Arrows").unwrap().1,
            Value::String("Three Arrows".into())
        );
        assert_eq!(
            parse_override("site.tagline=\"a=b\"").unwrap().1,
            Value::String("a=b".into())
        );
        assert!(parse_override("no-equals").is_err());
        assert!(parse_override("=1").is_err());
    }
}
