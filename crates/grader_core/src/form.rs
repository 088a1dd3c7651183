use std::path::PathBuf;

/// Label text used when the page markup leaves a file label empty.
pub const FALLBACK_LABEL_TEXT: &str = "Choose file...";

/// One of the three file inputs on the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UploadSlot {
    Rubric,
    ProjectArchive,
    Requirements,
}

impl UploadSlot {
    pub const ALL: [UploadSlot; 3] = [
        UploadSlot::Rubric,
        UploadSlot::ProjectArchive,
        UploadSlot::Requirements,
    ];

    /// Multipart field name expected by the analysis service.
    pub fn field_name(self) -> &'static str {
        match self {
            UploadSlot::Rubric => "rubricFile",
            UploadSlot::ProjectArchive => "projectZip",
            UploadSlot::Requirements => "requirementsFile",
        }
    }

    fn index(self) -> usize {
        match self {
            UploadSlot::Rubric => 0,
            UploadSlot::ProjectArchive => 1,
            UploadSlot::Requirements => 2,
        }
    }
}

/// A file picked for one slot. Only the name is shown; the path is read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Builds a selection from a path, using its final component as the display name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Label texts read from the page markup before any interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelDefaults {
    pub rubric: Option<String>,
    pub project_archive: Option<String>,
    pub requirements: Option<String>,
}

impl LabelDefaults {
    pub fn get(&self, slot: UploadSlot) -> Option<&str> {
        match slot {
            UploadSlot::Rubric => self.rubric.as_deref(),
            UploadSlot::ProjectArchive => self.project_archive.as_deref(),
            UploadSlot::Requirements => self.requirements.as_deref(),
        }
    }
}

/// A file input paired with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileField {
    default_text: String,
    selected: Option<SelectedFile>,
}

impl FileField {
    /// Captures the label's original text once; empty or missing text falls back.
    pub fn capture(original_label: Option<&str>) -> Self {
        let default_text = original_label
            .filter(|text| !text.is_empty())
            .unwrap_or(FALLBACK_LABEL_TEXT)
            .to_string();
        Self {
            default_text,
            selected: None,
        }
    }

    pub fn on_change(&mut self, file: Option<SelectedFile>) {
        self.selected = file;
    }

    pub fn label_text(&self) -> &str {
        self.selected
            .as_ref()
            .map(|file| file.name.as_str())
            .unwrap_or(&self.default_text)
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }
}

/// The three independent file fields of the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCapture {
    fields: [FileField; 3],
}

impl FormCapture {
    pub fn new(defaults: &LabelDefaults) -> Self {
        Self {
            fields: UploadSlot::ALL.map(|slot| FileField::capture(defaults.get(slot))),
        }
    }

    pub fn field(&self, slot: UploadSlot) -> &FileField {
        &self.fields[slot.index()]
    }

    /// Applies a change event. Returns whether the visible label changed.
    pub fn on_change(&mut self, slot: UploadSlot, file: Option<SelectedFile>) -> bool {
        let field = &mut self.fields[slot.index()];
        if field.selected == file {
            return false;
        }
        field.on_change(file);
        true
    }

    /// Snapshot of the current selection, consumed by the submit effect.
    pub fn selection(&self) -> UploadSelection {
        UploadSelection {
            rubric: self.field(UploadSlot::Rubric).selected().cloned(),
            project_archive: self.field(UploadSlot::ProjectArchive).selected().cloned(),
            requirements: self.field(UploadSlot::Requirements).selected().cloned(),
        }
    }
}

impl Default for FormCapture {
    fn default() -> Self {
        Self::new(&LabelDefaults::default())
    }
}

/// Files attached to a submission. Any slot may be empty; the service validates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSelection {
    pub rubric: Option<SelectedFile>,
    pub project_archive: Option<SelectedFile>,
    pub requirements: Option<SelectedFile>,
}

impl UploadSelection {
    pub fn get(&self, slot: UploadSlot) -> Option<&SelectedFile> {
        match slot {
            UploadSlot::Rubric => self.rubric.as_ref(),
            UploadSlot::ProjectArchive => self.project_archive.as_ref(),
            UploadSlot::Requirements => self.requirements.as_ref(),
        }
    }

    /// Present slots in form order.
    pub fn present(&self) -> impl Iterator<Item = (UploadSlot, &SelectedFile)> + '_ {
        UploadSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|file| (slot, file)))
    }
}
