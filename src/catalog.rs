use serde::Deserialize;
use std::collections::HashMap;

const EMBEDDED_CATALOG: &str = include_str!("../config/projects.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub demo: String,
    pub source: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    projects: Vec<ProjectRecord>,
}

/// Fixed id → project table. Records keep their file order for rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Ok(Self::from_records(file.projects))
    }

    /// Duplicate ids keep the first record.
    pub fn from_records(records: Vec<ProjectRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index.entry(record.id.clone()).or_insert(position);
        }

        Self { records, index }
    }

    pub fn lookup(&self, id: &str) -> Option<&ProjectRecord> {
        self.index.get(id).and_then(|position| self.records.get(*position))
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// The record the project modal should show for `id`; `None` keeps the
    /// modal closed.
    pub fn modal_for(&self, id: &str) -> Option<ProjectRecord> {
        self.lookup(id.trim()).cloned()
    }

    /// Distinct category tags in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for category in self.records.iter().flat_map(|record| record.categories.iter()) {
            if !seen.contains(&category.as_str()) {
                seen.push(category.as_str());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_decodes() {
        let catalog = Catalog::embedded().expect("embedded catalog is valid JSON");

        assert_eq!(catalog.records().len(), 4);
        assert_eq!(catalog.categories(), vec!["web", "game", "data"]);
    }

    #[test]
    fn battleships_lists_its_technologies_in_order() {
        let catalog = Catalog::embedded().expect("embedded catalog is valid JSON");
        let project = catalog.lookup("battleships").expect("battleships is registered");

        assert_eq!(project.title, "Battleships Game");
        assert_eq!(
            project.technologies,
            vec!["JavaScript", "Canvas API", "Game Logic", "AI"]
        );
        assert_eq!(project.features.len(), 5);
    }

    #[test]
    fn unknown_project_is_none() {
        let catalog = Catalog::embedded().expect("embedded catalog is valid JSON");

        assert!(catalog.lookup("not-a-project").is_none());
        assert!(catalog.lookup("").is_none());
    }

    #[test]
    fn modal_opens_only_for_known_ids() {
        let catalog = Catalog::embedded().expect("embedded catalog is valid JSON");

        let shown = catalog.modal_for("escape-room").expect("known id opens the modal");
        assert_eq!(shown.title, "The Escape Room");
        assert_eq!(catalog.modal_for(" battleships ").map(|record| record.id), Some("battleships".to_string()));
        assert_eq!(catalog.modal_for("ghost"), None);
        assert_eq!(catalog.modal_for(""), None);
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let raw = r##"{"projects": [
            {"id": "a", "title": "First", "description": "", "image": "", "technologies": [], "features": [], "demo": "#", "source": "#"},
            {"id": "a", "title": "Second", "description": "", "image": "", "technologies": [], "features": [], "demo": "#", "source": "#"}
        ]}"##;
        let catalog = Catalog::from_json(raw).expect("valid JSON");

        assert_eq!(catalog.lookup("a").map(|record| record.title.as_str()), Some("First"));
        assert!(catalog.lookup("a").is_some_and(|record| record.categories.is_empty()));
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(Catalog::from_json("{\"projects\": [{\"id\": 3}]}").is_err());
    }
}
