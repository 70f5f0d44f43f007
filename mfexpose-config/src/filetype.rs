//! Output file types for generated facades.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Extension of the generated facade files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// TypeScript source (`.ts`)
    #[default]
    Ts,
    /// Plain JavaScript (`.js`)
    Js,
}

impl FileType {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Ts => "ts",
            FileType::Js => "js",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "ts" | "typescript" => Ok(FileType::Ts),
            "js" | "javascript" => Ok(FileType::Js),
            _ => Err(format!("unknown filetype '{}', expected 'ts' or 'js'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(FileType::from_str("ts").unwrap(), FileType::Ts);
        assert_eq!(FileType::from_str(".js").unwrap(), FileType::Js);
        assert_eq!(FileType::from_str("TypeScript").unwrap(), FileType::Ts);
        assert!(FileType::from_str("tsx").is_err());
    }

    #[test]
    fn test_default_is_typescript() {
        assert_eq!(FileType::default(), FileType::Ts);
        assert_eq!(FileType::default().to_string(), "ts");
    }

    #[test]
    fn test_deserialize() {
        let js: FileType = serde_json::from_str(r#""js""#).unwrap();
        assert_eq!(js, FileType::Js);
    }
}
