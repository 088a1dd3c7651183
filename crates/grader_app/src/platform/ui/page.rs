//! In-memory page surface driven by [`PageCommand`]s.
//!
//! This is the boundary the controller writes to: every element is addressed
//! by its [`ElementId`], and only render output mutates it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use grader_core::{FlashId, LabelDefaults, Severity, UploadSlot};
use thiserror::Error;

use super::constants::{self, ElementId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub flash: FlashId,
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    CreateElement {
        id: ElementId,
        text: String,
        visible: bool,
    },
    SetText {
        id: ElementId,
        text: String,
    },
    SetEnabled {
        id: ElementId,
        enabled: bool,
    },
    SetVisible {
        id: ElementId,
        visible: bool,
    },
    SetInnerHtml {
        id: ElementId,
        html: String,
    },
    SetHref {
        id: ElementId,
        href: Option<String>,
    },
    SetBodyClass {
        class: &'static str,
        active: bool,
    },
    ReplaceMessages {
        id: ElementId,
        items: Vec<MessageNode>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no element with id `{0}` on the page")]
    UnknownElement(ElementId),
    #[error("element `{0}` already exists")]
    DuplicateElement(ElementId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub inner_html: String,
    pub visible: bool,
    pub enabled: bool,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: BTreeMap<ElementId, Element>,
    body_classes: BTreeSet<&'static str>,
    messages: Vec<MessageNode>,
}

impl Page {
    pub fn apply(&mut self, command: PageCommand) -> Result<(), PageError> {
        match command {
            PageCommand::CreateElement { id, text, visible } => {
                if self.elements.contains_key(&id) {
                    return Err(PageError::DuplicateElement(id));
                }
                self.elements.insert(
                    id,
                    Element {
                        text,
                        inner_html: String::new(),
                        visible,
                        enabled: true,
                        href: None,
                    },
                );
            }
            PageCommand::SetText { id, text } => self.element_mut(id)?.text = text,
            PageCommand::SetEnabled { id, enabled } => self.element_mut(id)?.enabled = enabled,
            PageCommand::SetVisible { id, visible } => self.element_mut(id)?.visible = visible,
            PageCommand::SetInnerHtml { id, html } => self.element_mut(id)?.inner_html = html,
            PageCommand::SetHref { id, href } => self.element_mut(id)?.href = href,
            PageCommand::SetBodyClass { class, active } => {
                if active {
                    self.body_classes.insert(class);
                } else {
                    self.body_classes.remove(class);
                }
            }
            PageCommand::ReplaceMessages { id, items } => {
                self.element_mut(id)?;
                self.messages = items;
            }
        }
        Ok(())
    }

    pub fn apply_all(
        &mut self,
        commands: impl IntoIterator<Item = PageCommand>,
    ) -> Result<(), PageError> {
        commands
            .into_iter()
            .try_for_each(|command| self.apply(command))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, PageError> {
        self.elements
            .get_mut(&id)
            .ok_or(PageError::UnknownElement(id))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|element| element.text.as_str())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|element| element.visible)
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn messages(&self) -> &[MessageNode] {
        &self.messages
    }

    /// Reads the file labels' current text, as the controller does once at init.
    pub fn label_defaults(&self) -> LabelDefaults {
        let read = |slot: UploadSlot| self.text(constants::file_label(slot)).map(str::to_string);
        LabelDefaults {
            rubric: read(UploadSlot::Rubric),
            project_archive: read(UploadSlot::ProjectArchive),
            requirements: read(UploadSlot::Requirements),
        }
    }

    /// Plain-text rendering of the visible page for the terminal.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for slot in UploadSlot::ALL {
            let label = self.text(constants::file_label(slot)).unwrap_or_default();
            let _ = writeln!(out, "{:<18} {}", constants::file_input(slot), label);
        }
        if let Some(button) = self.element(constants::ANALYZE_BTN) {
            let state = if button.enabled { "enabled" } else { "disabled" };
            let _ = writeln!(out, "[{}] ({state})", button.text);
        }
        if self.is_visible(constants::LOADING_OVERLAY)
            && self.has_body_class(constants::LOADING_ACTIVE_CLASS)
        {
            let _ = writeln!(out, "... analysis in progress ...");
        }
        for message in self.messages() {
            let tag = match message.severity {
                Severity::Info => "info",
                Severity::Error => "error",
            };
            let _ = writeln!(out, "[{tag} #{}] {} (x)", message.flash, message.text);
        }
        if self.is_visible(constants::RESULTS_CONTAINER) {
            if let Some(output) = self.element(constants::DATAFRAME_OUTPUT) {
                let _ = writeln!(out, "--- results ---\n{}", output.inner_html);
            }
        }
        if let Some(link) = self
            .element(constants::DOWNLOAD_REPORT_BTN)
            .filter(|link| link.visible)
        {
            let _ = writeln!(
                out,
                "{}: {}",
                link.text,
                link.href.as_deref().unwrap_or_default()
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_element_is_rejected() {
        let mut page = Page::default();
        let err = page
            .apply(PageCommand::SetText {
                id: constants::ANALYZE_BTN,
                text: "x".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, PageError::UnknownElement(constants::ANALYZE_BTN));
    }

    #[test]
    fn duplicate_element_is_rejected() {
        let create = PageCommand::CreateElement {
            id: constants::MESSAGES,
            text: String::new(),
            visible: true,
        };
        let mut page = Page::default();
        page.apply(create.clone()).unwrap();
        assert_eq!(
            page.apply(create),
            Err(PageError::DuplicateElement(constants::MESSAGES))
        );
    }

    #[test]
    fn body_class_toggles() {
        let mut page = Page::default();
        page.apply(PageCommand::SetBodyClass {
            class: constants::LOADING_ACTIVE_CLASS,
            active: true,
        })
        .unwrap();
        assert!(page.has_body_class(constants::LOADING_ACTIVE_CLASS));
        page.apply(PageCommand::SetBodyClass {
            class: constants::LOADING_ACTIVE_CLASS,
            active: false,
        })
        .unwrap();
        assert!(!page.has_body_class(constants::LOADING_ACTIVE_CLASS));
    }
}
