use serde::Serialize;

use crate::registry::Registry;

/// Category toolbox in the JSON shape the block editor consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolbox {
    pub kind: &'static str,
    pub contents: Vec<ToolboxCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolboxCategory {
    pub kind: &'static str,
    pub name: String,
    /// Hue, serialised as text the way the editor expects it.
    pub colour: String,
    pub contents: Vec<ToolboxEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolboxEntry {
    pub kind: &'static str,
    #[serde(rename = "type")]
    pub type_id: String,
}

impl Registry {
    /// Build the toolbox: categories in definition order, empty ones omitted.
    pub fn toolbox(&self) -> Toolbox {
        let contents = self
            .categories()
            .filter_map(|category| {
                let entries: Vec<ToolboxEntry> = self
                    .types_in(&category.name)
                    .into_iter()
                    .map(|type_id| ToolboxEntry {
                        kind: "block",
                        type_id: type_id.to_string(),
                    })
                    .collect();
                if entries.is_empty() {
                    return None;
                }
                Some(ToolboxCategory {
                    kind: "category",
                    name: category.name.clone(),
                    colour: category.colour.to_string(),
                    contents: entries,
                })
            })
            .collect();

        Toolbox {
            kind: "categoryToolbox",
            contents,
        }
    }
}
