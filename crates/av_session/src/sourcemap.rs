use std::ops::Index;
use std::path::{Path, PathBuf};

use av_diagnostic::sources::{Cached, Sources};
use av_utils::declare_key_type;
use av_utils::keyvec::KeyVec;

declare_key_type! {
    pub struct SourceId;
}

/// Every source loaded during a session.
#[derive(Default, Debug, Clone)]
pub struct SourceMap {
    inner: KeyVec<SourceId, Cached<Source>>,
}

#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub path: Option<PathBuf>,
    pub source: String,
}

impl Source {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            source: source.into(),
        }
    }

    pub fn with_path(name: impl Into<String>, path: PathBuf, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path),
            source: source.into(),
        }
    }
}

impl SourceMap {
    pub fn insert(&mut self, source: Source) -> SourceId {
        self.inner.insert(Cached::new(source))
    }
}

impl Index<SourceId> for SourceMap {
    type Output = Cached<Source>;

    fn index(&self, id: SourceId) -> &Self::Output {
        &self.inner[id]
    }
}

impl Sources for SourceMap {
    type SourceId = SourceId;
    type Source = Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.inner.get(id)
    }
}

impl av_diagnostic::sources::Source for Source {
    fn name_str(&self) -> &str {
        &self.name
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn source_str(&self) -> &str {
        &self.source
    }
}
