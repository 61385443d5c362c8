pub fn get_path<'a>(root: &'a serde_json::Value, dotted: &str) -> Option<&'a serde_json::Value> {
    let mut current = root;
    for segment in dotted.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Inserts `value` at `dotted`, replacing any scalar that sits on the way.
pub fn set_path(
    root: &mut serde_json::Map<String, serde_json::Value>,
    dotted: &str,
    value: serde_json::Value,
) {
    let mut current = root;
    let mut segments = dotted.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let slot = current
            .entry(segment)
            .or_insert_with(|| serde_json::Value::Object(Default::default()));
        if !slot.is_object() {
            *slot = serde_json::Value::Object(Default::default());
        }
        current = match slot {
            serde_json::Value::Object(map) => map,
            _ => return,
        };
    }
}

pub fn merge_object(
    dst: &mut serde_json::Map<String, serde_json::Value>,
    src: serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(serde_json::Value::Object(dst_obj)), serde_json::Value::Object(src_obj)) => {
                merge_object(dst_obj, src_obj);
            }
            (_, v) => {
                dst.insert(key, v);
            }
        }
    }
}

/// Dotted paths of every non-table value under `map`.
pub fn leaf_paths(map: &serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    fn walk(map: &serde_json::Map<String, serde_json::Value>, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                serde_json::Value::Object(child) => walk(child, &path, out),
                _ => out.push(path),
            }
        }
    }

    let mut out = Vec::new();
    walk(map, "", &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_nested() {
        let mut map = serde_json::Map::new();
        set_path(&mut map, "settings.container_name", json!("docs"));
        let root = serde_json::Value::Object(map);
        assert_eq!(
            get_path(&root, "settings.container_name"),
            Some(&json!("docs"))
        );
        assert!(get_path(&root, "settings.missing").is_none());
    }

    #[test]
    fn set_replaces_scalar_parent() {
        let mut map = serde_json::Map::new();
        set_path(&mut map, "settings", json!("flat"));
        set_path(&mut map, "settings.input_file_name", json!("in.txt"));
        assert_eq!(
            serde_json::Value::Object(map),
            json!({"settings": {"input_file_name": "in.txt"}})
        );
    }

    #[test]
    fn leaf_paths_lists_scalars_only() {
        let map = json!({"a": {"b": 1, "c": {"d": "x"}}, "e": [1, 2]})
            .as_object()
            .cloned()
            .unwrap();
        let mut paths = leaf_paths(&map);
        paths.sort();
        assert_eq!(paths, ["a.b", "a.c.d", "e"]);
    }

    #[test]
    fn merge_is_deep() {
        let mut dst = json!({"settings": {"a": "1", "b": "2"}})
            .as_object()
            .cloned()
            .unwrap();
        let src = json!({"settings": {"b": "3"}, "extra": true})
            .as_object()
            .cloned()
            .unwrap();
        merge_object(&mut dst, src);
        assert_eq!(
            serde_json::Value::Object(dst),
            json!({"settings": {"a": "1", "b": "3"}, "extra": true})
        );
    }
}
