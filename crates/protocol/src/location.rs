use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a declaration starts in the host's source tree.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct SourceLocation {
    pub path: String,
    /// 1-based line of the declaration (attributes included).
    pub line: u32,
}

impl SourceLocation {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Path with forward slashes, relative to `root` when it lies underneath.
    pub fn display_path(&self, root: Option<&str>) -> String {
        let path = normalize_path(&self.path);
        let Some(root) = root.map(normalize_path).filter(|r| !r.is_empty()) else {
            return path;
        };

        if let Some(rest) = path.strip_prefix(&root) {
            if let Some(rest) = rest.strip_prefix('/') {
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
        }
        path
    }
}

fn normalize_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while value.starts_with("./") {
        value = value[2..].to_string();
    }
    let value = value.trim_end_matches('/');
    if value == "." {
        return String::new();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_when_under_root() {
        let loc = SourceLocation::new("/work/app/src/MyClass.cs", 3);
        assert_eq!(loc.display_path(Some("/work/app")), "src/MyClass.cs");
        assert_eq!(loc.display_path(Some("/work/app/")), "src/MyClass.cs");
    }

    #[test]
    fn untouched_outside_root() {
        let loc = SourceLocation::new("/work/app2/MyClass.cs", 3);
        assert_eq!(loc.display_path(Some("/work/app")), "/work/app2/MyClass.cs");
        assert_eq!(loc.display_path(None), "/work/app2/MyClass.cs");
    }

    #[test]
    fn windows_separators_are_normalized() {
        let loc = SourceLocation::new(r"C:\repo\src\MyClass.cs", 1);
        assert_eq!(loc.display_path(Some(r"C:\repo")), "src/MyClass.cs");
        assert_eq!(loc.display_path(Some(".")), "C:/repo/src/MyClass.cs");
    }
}
