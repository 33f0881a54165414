use codespan_reporting::files::{SimpleFile, SimpleFiles};

pub type SourceId = usize;

#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    id: SourceId,
    file: &'a SimpleFile<String, String>,
}

impl<'a> SourceFile<'a> {
    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn contents(&self) -> &'a str {
        self.file.source()
    }
}

#[derive(Debug, Clone)]
pub struct SourceMap {
    files: SimpleFiles<String, String>,
}

impl Default for SourceMap {
    fn default() -> Self {
        Self {
            files: SimpleFiles::new(),
        }
    }
}

impl SourceMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_source(&mut self, name: String, contents: String) -> SourceFile<'_> {
        let id = self.files.add(name, contents);

        self.get_by_id(id)
    }

    pub fn get_by_id(&self, id: SourceId) -> SourceFile<'_> {
        let file = self
            .files
            .get(id)
            .unwrap_or_else(|_| panic!("source id {id} does not belong to this source map"));

        SourceFile { id, file }
    }

    pub fn to_files(&self) -> &SimpleFiles<String, String> {
        &self.files
    }
}
