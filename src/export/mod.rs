//! Tree Exporters
//!
//! Renders a finished keyword tree into one of several text formats and
//! writes it to disk.
//!
//! | Format     | Content                                          |
//! |------------|--------------------------------------------------|
//! | `json`     | The nested tree, pretty-printed                  |
//! | `keywords` | One keyword per line, pre-order                  |
//! | `csv`      | `Keyword,Intent,Word Count,Title`, one row/node  |
//! | `graph`    | `{nodes, edges}` for graph visualisers           |
//! | `outline`  | Indented text view                               |

mod graph;
mod text;

pub use graph::{GraphEdge, GraphExport, GraphNode, clean_id};
pub use text::{render_csv, render_keywords, render_outline};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{KeyweaveError, KeywordNode, Result};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Keywords,
    Csv,
    Graph,
    Outline,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Json,
        ExportFormat::Keywords,
        ExportFormat::Csv,
        ExportFormat::Graph,
        ExportFormat::Outline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Keywords => "keywords",
            ExportFormat::Csv => "csv",
            ExportFormat::Graph => "graph",
            ExportFormat::Outline => "outline",
        }
    }

    /// File name suffix appended to the seed keyword
    fn file_suffix(&self) -> &'static str {
        match self {
            ExportFormat::Json => "seo_mindmap.json",
            ExportFormat::Keywords => "keywords.txt",
            ExportFormat::Csv => "keywords.csv",
            ExportFormat::Graph => "graph.json",
            ExportFormat::Outline => "outline.txt",
        }
    }

    /// Default output file name, e.g. `digital_marketing_keywords.csv`.
    /// Always a bare name in the working directory: every char of the seed
    /// other than a letter, digit or `-` becomes `_`.
    pub fn default_file_name(&self, seed: &str) -> String {
        let stem: String = seed
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{}_{}", stem, self.file_suffix())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = KeyweaveError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                KeyweaveError::Export(format!(
                    "Unknown format '{}'. Valid values: json, keywords, csv, graph, outline",
                    s
                ))
            })
    }
}

/// Render a tree in the given format
pub fn render(root: &KeywordNode, format: ExportFormat) -> Result<String> {
    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(root)?,
        ExportFormat::Keywords => render_keywords(root),
        ExportFormat::Csv => render_csv(root),
        ExportFormat::Graph => serde_json::to_string_pretty(&GraphExport::from_tree(root))?,
        ExportFormat::Outline => render_outline(root),
    };
    Ok(content)
}

/// Render and write to `path`, creating parent directories as needed
pub fn write(root: &KeywordNode, format: ExportFormat, path: &Path) -> Result<()> {
    let content = render(root, format)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!(format = %format, nodes = root.node_count(), "Exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keyword::fixtures::small_tree;
    use tempfile::TempDir;

    #[test]
    fn test_format_parse_and_display() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!(" CSV ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(KeyweaveError::Export(_))
        ));
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
    }

    #[test]
    fn test_default_file_names() {
        let seed = "digital marketing";
        assert_eq!(
            ExportFormat::Json.default_file_name(seed),
            "digital_marketing_seo_mindmap.json"
        );
        assert_eq!(
            ExportFormat::Keywords.default_file_name(seed),
            "digital_marketing_keywords.txt"
        );
        assert_eq!(
            ExportFormat::Csv.default_file_name(seed),
            "digital_marketing_keywords.csv"
        );
        assert_eq!(
            ExportFormat::Graph.default_file_name(seed),
            "digital_marketing_graph.json"
        );
        assert_eq!(
            ExportFormat::Outline.default_file_name(seed),
            "digital_marketing_outline.txt"
        );
    }

    #[test]
    fn test_default_file_name_stays_in_working_dir() {
        assert_eq!(
            ExportFormat::Csv.default_file_name("ci/cd pipeline"),
            "ci_cd_pipeline_keywords.csv"
        );
        assert_eq!(
            ExportFormat::Json.default_file_name("../../tmp/evil"),
            "______tmp_evil_seo_mindmap.json"
        );
        assert_eq!(
            ExportFormat::Outline.default_file_name("C:\\seo\\café"),
            "C__seo_café_outline.txt"
        );

        let dir = TempDir::new().unwrap();
        for seed in ["ci/cd pipeline", "../escape", "a\\b"] {
            let name = ExportFormat::Csv.default_file_name(seed);
            assert!(!name.contains(['/', '\\']), "{}", name);

            let path = dir.path().join(&name);
            write(&small_tree(), ExportFormat::Csv, &path).unwrap();
            assert_eq!(path.parent(), Some(dir.path()));
        }
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.as_ref().unwrap().path().is_file()));
    }

    #[test]
    fn test_json_keys() {
        let json = render(&small_tree(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["children", "competitors", "intent", "keyword", "title", "word_count"]
        );
        assert_eq!(value["intent"], "Informational");
        assert_eq!(value["children"][0]["competitors"][0]["url"], "https://www.example.com/seo-tools/");
        // two-space indent
        assert!(json.starts_with("{\n  \"keyword\""));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/tree.json");
        let tree = small_tree();

        write(&tree, ExportFormat::Json, &path).unwrap();

        let back: KeywordNode =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_every_format_renders() {
        let tree = small_tree();
        for format in ExportFormat::ALL {
            let content = render(&tree, format).unwrap();
            assert!(content.contains("seo tools"), "{}", format);
        }
    }
}
