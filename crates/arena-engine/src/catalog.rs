use std::path::{Path, PathBuf};

/// An image file plus its footprint in arena units.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicInfo {
    /// Relative to the catalog's image directory.
    pub file: PathBuf,
    pub width: f64,
    pub height: f64,
}

impl GraphicInfo {
    pub fn new(file: impl Into<PathBuf>, width: f64, height: f64) -> Self {
        Self { file: file.into(), width, height }
    }
}

/// Graphic codes for a run, resolved lazily into registry slots.
///
/// A graphic's code is its position in the catalog. Adding an entry equal to
/// an existing one returns the existing code.
#[derive(Debug, Clone, Default)]
pub struct GraphicCatalog {
    image_dir: PathBuf,
    entries: Vec<GraphicInfo>,
}

impl GraphicCatalog {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            entries: Vec::new(),
        }
    }

    /// Registers `info`, returning its graphic code.
    pub fn add_entry(&mut self, info: GraphicInfo) -> usize {
        if let Some(code) = self.code_of(&info) {
            return code;
        }
        self.entries.push(info);
        self.entries.len() - 1
    }

    pub fn code_of(&self, info: &GraphicInfo) -> Option<usize> {
        self.entries.iter().position(|e| e == info)
    }

    #[inline]
    pub fn get(&self, code: usize) -> Option<&GraphicInfo> {
        self.entries.get(code)
    }

    /// Full path of the image behind `info`.
    pub fn path_of(&self, info: &GraphicInfo) -> PathBuf {
        self.image_dir.join(&info.file)
    }

    #[inline]
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &GraphicInfo)> {
        self.entries.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_entries_share_a_code() {
        let mut catalog = GraphicCatalog::new("assets");
        let a = catalog.add_entry(GraphicInfo::new("wall.png", 1.0, 1.0));
        let b = catalog.add_entry(GraphicInfo::new("hero.png", 0.5, 2.0));
        let again = catalog.add_entry(GraphicInfo::new("wall.png", 1.0, 1.0));

        assert_eq!((a, b, again), (0, 1, 0));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn same_file_at_different_size_is_a_new_code() {
        let mut catalog = GraphicCatalog::new("assets");
        catalog.add_entry(GraphicInfo::new("wall.png", 1.0, 1.0));
        assert_eq!(catalog.add_entry(GraphicInfo::new("wall.png", 2.0, 1.0)), 1);
    }

    #[test]
    fn paths_resolve_under_image_dir() {
        let catalog = GraphicCatalog::new("assets/img");
        let info = GraphicInfo::new("hero.png", 1.0, 1.0);
        assert_eq!(catalog.path_of(&info), Path::new("assets/img").join("hero.png"));
    }
}
