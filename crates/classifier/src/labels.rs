use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Immutable class-index-to-breed-name map.
///
/// The persisted form uses decimal string keys (`{"0": "Holstein", ...}`),
/// matching the label file written at training time. Loaded once at
/// startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct LabelMap {
    entries: BTreeMap<String, String>,
}

impl LabelMap {
    /// Load and validate the label map from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("failed to open label map {}: {}", path.display(), e))?;
        let entries: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| anyhow::anyhow!("failed to parse label map {}: {}", path.display(), e))?;

        Self::from_entries(entries)
    }

    /// Build from an in-memory map, enforcing contiguous index coverage:
    /// every index in `0..len` must have an entry, since the model can
    /// emit any of them.
    pub fn from_entries(entries: BTreeMap<String, String>) -> anyhow::Result<Self> {
        if entries.is_empty() {
            anyhow::bail!("label map is empty");
        }

        for index in 0..entries.len() {
            if !entries.contains_key(&index.to_string()) {
                anyhow::bail!(
                    "label map has {} entries but no entry for class index {}",
                    entries.len(),
                    index
                );
            }
        }

        Ok(Self { entries })
    }

    /// Look up the breed name for a class index.
    pub fn get(&self, class_index: usize) -> Option<&str> {
        self.entries.get(&class_index.to_string()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw string-keyed map, as served by `/classes`.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}
